use anyhow::Context;
use clap::Parser;

use gitstate::cli::{execute, GitStateArgs, Query};
use gitstate::config::AppConfig;
use gitstate::git::{find_repository_root, is_repository, AsyncInspector};
use gitstate::logging::{init_logging, LoggingConfig};

/// Exit status used when the target directory is not a repository
const EXIT_NOT_A_REPOSITORY: i32 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = GitStateArgs::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(max_output_size) = args.max_output_size {
        config.inspector = config.inspector.with_max_output_size(max_output_size);
    }
    if args.verbose {
        config.logging = LoggingConfig::verbose();
    }

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Warning: logging was not initialized: {}", e);
    }

    let dir = if args.discover {
        find_repository_root(&args.dir)
            .with_context(|| format!("No repository found above {}", args.dir.display()))?
    } else {
        args.dir.clone()
    };

    if args.query != Query::IsRepo && !is_repository(&dir) {
        eprintln!("Not a git repository: {}", dir.display());
        std::process::exit(EXIT_NOT_A_REPOSITORY);
    }

    tracing::debug!(dir = %dir.display(), query = ?args.query, "Running query");

    let inspector = AsyncInspector::with_config(&dir, config.inspector);
    let output = execute(args.query, &inspector)
        .await
        .with_context(|| format!("Query {:?} failed for {}", args.query, dir.display()))?;

    println!("{}", output.render(args.json)?);
    Ok(())
}
