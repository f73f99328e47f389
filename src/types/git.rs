use serde::{Deserialize, Serialize};
use std::fmt;

/// Dirty and untracked file counts, taken from a single `git status --short`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Tracked files with uncommitted modifications, staged or not
    pub dirty: usize,
    /// Files in the working tree that git does not track
    pub untracked: usize,
}

/// Number of commits a branch is ahead of or behind another.
///
/// `Indeterminate` is returned when the count cannot be known: no upstream,
/// detached HEAD, no remote-tracking references, or any other failure of the
/// underlying `git rev-list`. It serializes as `null` and displays as `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<usize>", into = "Option<usize>")]
pub enum RevCount {
    Count(usize),
    Indeterminate,
}

impl RevCount {
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, RevCount::Indeterminate)
    }

    pub fn value(&self) -> Option<usize> {
        match self {
            RevCount::Count(n) => Some(*n),
            RevCount::Indeterminate => None,
        }
    }
}

impl From<Option<usize>> for RevCount {
    fn from(value: Option<usize>) -> Self {
        value.map_or(RevCount::Indeterminate, RevCount::Count)
    }
}

impl From<RevCount> for Option<usize> {
    fn from(value: RevCount) -> Self {
        value.value()
    }
}

impl fmt::Display for RevCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevCount::Count(n) => write!(f, "{}", n),
            RevCount::Indeterminate => write!(f, "NaN"),
        }
    }
}

/// Aggregate result of `check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryReport {
    /// Current branch; `None` while the repository has no commits
    pub branch: Option<String>,
    /// Upstream tracking branch; `None` when none is configured
    pub remote_branch: Option<String>,
    pub ahead: RevCount,
    pub behind: RevCount,
    pub dirty: usize,
    pub untracked: usize,
    pub stashes: usize,
}

impl RepositoryReport {
    /// 工作区是否干净（无修改、无未跟踪文件）
    pub fn is_clean(&self) -> bool {
        self.dirty == 0 && self.untracked == 0
    }
}

impl fmt::Display for RepositoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "branch:        {}", self.branch.as_deref().unwrap_or("-"))?;
        writeln!(
            f,
            "remote branch: {}",
            self.remote_branch.as_deref().unwrap_or("-")
        )?;
        writeln!(f, "ahead:         {}", self.ahead)?;
        writeln!(f, "behind:        {}", self.behind)?;
        writeln!(f, "dirty:         {}", self.dirty)?;
        writeln!(f, "untracked:     {}", self.untracked)?;
        write!(f, "stashes:       {}", self.stashes)
    }
}
