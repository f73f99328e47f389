use serde::Serialize;

use crate::cli::commands::Query;
use crate::errors::AppResult;
use crate::git::AsyncInspector;
use crate::types::{RepositoryReport, RevCount, StatusCounts};

/// Result of one CLI query, ready to print.
///
/// Serializes untagged, so `--json` prints the bare value: an object for
/// reports, a number (or `null` for NaN) for counts, a string for names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryOutput {
    Report(RepositoryReport),
    Status(StatusCounts),
    Name(Option<String>),
    Revisions(RevCount),
    Number(usize),
    Text(String),
    Flag(bool),
}

impl QueryOutput {
    pub fn render(&self, json: bool) -> AppResult<String> {
        if json {
            return Ok(serde_json::to_string_pretty(self)?);
        }

        let text = match self {
            QueryOutput::Report(report) => report.to_string(),
            QueryOutput::Status(counts) => {
                format!("dirty: {}\nuntracked: {}", counts.dirty, counts.untracked)
            }
            QueryOutput::Name(name) => name.clone().unwrap_or_default(),
            QueryOutput::Revisions(count) => count.to_string(),
            QueryOutput::Number(n) => n.to_string(),
            QueryOutput::Text(text) => text.clone(),
            QueryOutput::Flag(flag) => flag.to_string(),
        };
        Ok(text)
    }
}

/// Run `query` against the repository behind `inspector`.
pub async fn execute(query: Query, inspector: &AsyncInspector) -> AppResult<QueryOutput> {
    let output = match query {
        Query::Check => QueryOutput::Report(inspector.check().await?),
        Query::Branch => QueryOutput::Name(inspector.branch().await?),
        Query::RemoteBranch => QueryOutput::Name(inspector.remote_branch().await?),
        Query::Ahead => QueryOutput::Revisions(inspector.ahead().await?),
        Query::Behind => QueryOutput::Revisions(inspector.behind().await?),
        Query::Status => QueryOutput::Status(inspector.status().await?),
        Query::Dirty => QueryOutput::Number(inspector.dirty().await?),
        Query::Untracked => QueryOutput::Number(inspector.untracked().await?),
        Query::Commit => QueryOutput::Text(inspector.commit().await?),
        Query::Stashes => QueryOutput::Number(inspector.stashes().await?),
        Query::Message => QueryOutput::Text(inspector.message().await?),
        Query::IsRepo => QueryOutput::Flag(inspector.blocking().is_repository()),
    };
    Ok(output)
}
