use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gitstate 主命令行参数
#[derive(Parser, Debug)]
#[clap(
    name = "gitstate",
    version,
    about = "Report git repository state: branch, upstream, ahead/behind, dirty/untracked files and stashes"
)]
pub struct GitStateArgs {
    /// Repository directory to inspect
    #[clap(short = 'C', long, global = true, default_value = ".", value_name = "PATH")]
    pub dir: PathBuf,

    /// Walk up from --dir to the nearest repository root
    #[clap(long, global = true)]
    pub discover: bool,

    /// Cap on captured git output per stream, in bytes
    #[clap(long, global = true, value_name = "BYTES", value_parser = parse_max_output_size)]
    pub max_output_size: Option<usize>,

    /// Print results as JSON
    #[clap(long, global = true)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub query: Query,
}

/// A zero cap would fail every query with output, so it is refused here
/// just as it is for the config file and environment.
fn parse_max_output_size(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be greater than zero".to_string()),
        Ok(size) => Ok(size),
        Err(e) => Err(e.to_string()),
    }
}

/// gitstate 支持的查询
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Full report: branch, upstream, ahead/behind, dirty/untracked, stashes
    Check,
    /// Current branch (empty for a repository without commits)
    Branch,
    /// Upstream tracking branch (empty when none is configured)
    RemoteBranch,
    /// Commits not on any remote-tracking branch (NaN when unknown)
    Ahead,
    /// Commits on the upstream branch missing from HEAD (NaN when unknown)
    Behind,
    /// Dirty and untracked file counts
    Status,
    /// Number of modified tracked files
    Dirty,
    /// Number of untracked files
    Untracked,
    /// Abbreviated hash of HEAD
    Commit,
    /// Number of stash entries
    Stashes,
    /// Message of the most recent commit
    Message,
    /// Whether the directory is a git repository
    IsRepo,
}
