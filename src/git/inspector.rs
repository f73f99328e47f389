//! Blocking repository queries.
//!
//! Each query runs git once (plus a cheap probe where noted) and parses the
//! result. Failure handling differs on purpose:
//!
//! - `branch` / `remote_branch` report `None` when git fails,
//! - `ahead` / `behind` report [`RevCount::Indeterminate`] when git fails,
//! - `status`, `commit`, `stashes`, `message` and `check` propagate failures.
//!
//! `GitError::OutputTooLarge` propagates from every query.

use std::path::{Path, PathBuf};
use std::thread::{self, ScopedJoinHandle};

use crate::config::InspectorConfig;
use crate::errors::{AppError, AppResult};
use crate::git::command::GitCommand;
use crate::git::parse;
use crate::git::repository;
use crate::logging::OperationTimer;
use crate::types::{RepositoryReport, RevCount, StatusCounts};

#[derive(Debug, Clone)]
pub struct Inspector {
    repository_path: PathBuf,
    config: InspectorConfig,
}

impl Inspector {
    /// Inspector with the default configuration
    pub fn new(repository_path: impl AsRef<Path>) -> Self {
        Self::with_config(repository_path, InspectorConfig::default())
    }

    pub fn with_config(repository_path: impl AsRef<Path>, config: InspectorConfig) -> Self {
        Self {
            repository_path: repository_path.as_ref().to_path_buf(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.repository_path
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    fn git(&self) -> GitCommand {
        GitCommand::new(&self.config, &self.repository_path)
    }

    fn run<I, S>(&self, args: I) -> AppResult<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.git().args(args).run(self.config.max_output_size)
    }

    /// 检查是否在 Git 仓库中
    pub fn is_repository(&self) -> bool {
        repository::is_repository(&self.repository_path)
    }

    /// At least one reference exists, i.e. the repository has commits.
    fn has_refs(&self) -> bool {
        self.git().arg("show-ref").probe()
    }

    /// Abbreviated name of the current HEAD reference.
    ///
    /// `None` for a repository without commits, or when git cannot resolve
    /// HEAD for any other reason.
    pub fn branch(&self) -> AppResult<Option<String>> {
        if !self.has_refs() {
            tracing::debug!(repo = %self.repository_path.display(), "No refs yet, branch is absent");
            return Ok(None);
        }
        absent_on_failure("branch", self.run(["rev-parse", "--abbrev-ref", "HEAD"]))
    }

    /// Short name of the upstream tracking reference, e.g. `origin/main`.
    pub fn remote_branch(&self) -> AppResult<Option<String>> {
        if !self.has_refs() {
            tracing::debug!(repo = %self.repository_path.display(), "No refs yet, remote branch is absent");
            return Ok(None);
        }
        absent_on_failure(
            "remote_branch",
            self.run(["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"]),
        )
    }

    /// Commits reachable from HEAD but from no remote-tracking reference.
    ///
    /// Indeterminate when there are no remote-tracking references at all,
    /// since every commit would otherwise count as ahead.
    pub fn ahead(&self) -> AppResult<RevCount> {
        match self.run(["for-each-ref", "--count=1", "--format=%(refname)", "refs/remotes"]) {
            Ok(refs) if refs.trim().is_empty() => {
                tracing::debug!(repo = %self.repository_path.display(), "No remote-tracking refs, ahead is indeterminate");
                return Ok(RevCount::Indeterminate);
            }
            Ok(_) => {}
            Err(e) if e.is_output_too_large() => return Err(e),
            Err(e) => {
                tracing::debug!(error = %e, "Listing remote-tracking refs failed, ahead is indeterminate");
                return Ok(RevCount::Indeterminate);
            }
        }
        indeterminate_on_failure("ahead", self.run(["rev-list", "HEAD", "--not", "--remotes"]))
    }

    /// Commits reachable from the upstream branch but not from HEAD.
    pub fn behind(&self) -> AppResult<RevCount> {
        let Some(upstream) = self.remote_branch()? else {
            tracing::debug!(repo = %self.repository_path.display(), "No upstream, behind is indeterminate");
            return Ok(RevCount::Indeterminate);
        };
        let range = format!("HEAD..{}", upstream);
        indeterminate_on_failure("behind", self.run(["rev-list", range.as_str()]))
    }

    /// Dirty and untracked counts from one `git status --short`.
    pub fn status(&self) -> AppResult<StatusCounts> {
        let stdout = self.run([
            "-c",
            "color.status=false",
            "status",
            "--short",
            "--no-branch",
            "--untracked-files=normal",
        ])?;
        Ok(parse::parse_status(&stdout))
    }

    pub fn dirty(&self) -> AppResult<usize> {
        Ok(self.status()?.dirty)
    }

    pub fn untracked(&self) -> AppResult<usize> {
        Ok(self.status()?.untracked)
    }

    /// Abbreviated hash of the HEAD commit. Fails when there are no commits.
    pub fn commit(&self) -> AppResult<String> {
        let stdout = self.run(["rev-parse", "--short", "HEAD"])?;
        Ok(stdout.trim().to_string())
    }

    /// Number of stash entries
    pub fn stashes(&self) -> AppResult<usize> {
        let stdout = self.run(["stash", "list"])?;
        Ok(parse::count_lines(&stdout))
    }

    /// Full message of the most recent commit, trimmed
    pub fn message(&self) -> AppResult<String> {
        let stdout = self.run(["log", "-1", "--pretty=%B"])?;
        Ok(stdout.trim().to_string())
    }

    /// Run the constituent queries concurrently and merge them.
    ///
    /// The first propagated failure fails the whole report.
    pub fn check(&self) -> AppResult<RepositoryReport> {
        let timer = OperationTimer::new("check")
            .with_repository(&self.repository_path.to_string_lossy());

        let (branch, remote_branch, ahead, behind, stashes, status) = thread::scope(|s| {
            let branch = s.spawn(|| self.branch());
            let remote_branch = s.spawn(|| self.remote_branch());
            let ahead = s.spawn(|| self.ahead());
            let behind = s.spawn(|| self.behind());
            let stashes = s.spawn(|| self.stashes());
            let status = self.status();
            (
                joined("branch", branch),
                joined("remote_branch", remote_branch),
                joined("ahead", ahead),
                joined("behind", behind),
                joined("stashes", stashes),
                status,
            )
        });

        let status = status?;
        let report = RepositoryReport {
            branch: branch?,
            remote_branch: remote_branch?,
            ahead: ahead?,
            behind: behind?,
            dirty: status.dirty,
            untracked: status.untracked,
            stashes: stashes?,
        };

        timer.finish();
        Ok(report)
    }
}

fn joined<T>(query: &str, handle: ScopedJoinHandle<'_, AppResult<T>>) -> AppResult<T> {
    handle
        .join()
        .unwrap_or_else(|_| Err(AppError::Task(format!("{} query panicked", query))))
}

fn absent_on_failure(query: &str, result: AppResult<String>) -> AppResult<Option<String>> {
    match result {
        Ok(stdout) => Ok(parse::non_empty_trimmed(&stdout)),
        Err(e) if e.is_output_too_large() => Err(e),
        Err(e) => {
            tracing::debug!(query, error = %e, "Query failed, reporting no value");
            Ok(None)
        }
    }
}

fn indeterminate_on_failure(query: &str, result: AppResult<String>) -> AppResult<RevCount> {
    match result {
        Ok(stdout) => Ok(RevCount::Count(parse::count_lines(&stdout))),
        Err(e) if e.is_output_too_large() => Err(e),
        Err(e) => {
            tracing::debug!(query, error = %e, "Query failed, count is indeterminate");
            Ok(RevCount::Indeterminate)
        }
    }
}
