//! Async mirror of [`Inspector`].
//!
//! Every query runs the blocking implementation on tokio's blocking pool and
//! resolves with the same value or error.

use std::path::Path;
use std::sync::Arc;

use crate::config::InspectorConfig;
use crate::errors::AppResult;
use crate::git::inspector::Inspector;
use crate::types::{RepositoryReport, RevCount, StatusCounts};

#[derive(Debug, Clone)]
pub struct AsyncInspector {
    inner: Arc<Inspector>,
}

impl From<Inspector> for AsyncInspector {
    fn from(inspector: Inspector) -> Self {
        Self {
            inner: Arc::new(inspector),
        }
    }
}

impl AsyncInspector {
    pub fn new(repository_path: impl AsRef<Path>) -> Self {
        Inspector::new(repository_path).into()
    }

    pub fn with_config(repository_path: impl AsRef<Path>, config: InspectorConfig) -> Self {
        Inspector::with_config(repository_path, config).into()
    }

    /// The blocking inspector behind this handle
    pub fn blocking(&self) -> &Inspector {
        &self.inner
    }

    async fn spawn<T, F>(&self, query: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Inspector) -> AppResult<T> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || query(inner.as_ref())).await?
    }

    pub async fn branch(&self) -> AppResult<Option<String>> {
        self.spawn(Inspector::branch).await
    }

    pub async fn remote_branch(&self) -> AppResult<Option<String>> {
        self.spawn(Inspector::remote_branch).await
    }

    pub async fn ahead(&self) -> AppResult<RevCount> {
        self.spawn(Inspector::ahead).await
    }

    pub async fn behind(&self) -> AppResult<RevCount> {
        self.spawn(Inspector::behind).await
    }

    pub async fn status(&self) -> AppResult<StatusCounts> {
        self.spawn(Inspector::status).await
    }

    pub async fn dirty(&self) -> AppResult<usize> {
        self.spawn(Inspector::dirty).await
    }

    pub async fn untracked(&self) -> AppResult<usize> {
        self.spawn(Inspector::untracked).await
    }

    pub async fn commit(&self) -> AppResult<String> {
        self.spawn(Inspector::commit).await
    }

    pub async fn stashes(&self) -> AppResult<usize> {
        self.spawn(Inspector::stashes).await
    }

    pub async fn message(&self) -> AppResult<String> {
        self.spawn(Inspector::message).await
    }

    /// Constituent queries run concurrently on the blocking pool; the first
    /// failure wins and no partial report is produced.
    pub async fn check(&self) -> AppResult<RepositoryReport> {
        let (branch, remote_branch, ahead, behind, stashes, status) = tokio::try_join!(
            self.branch(),
            self.remote_branch(),
            self.ahead(),
            self.behind(),
            self.stashes(),
            self.status()
        )?;

        Ok(RepositoryReport {
            branch,
            remote_branch,
            ahead,
            behind,
            dirty: status.dirty,
            untracked: status.untracked,
            stashes,
        })
    }
}
