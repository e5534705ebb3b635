use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use arbor_cli::cli::{Cli, Commands};
use arbor_cli::commands::{self, distribute::DistributeArgs};
use arbor_config::ArborConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over the command-line level
    let level = cli.level_filter();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "arbor_cli={level},arbor_core={level},arbor_config={level},arbor_distributed={level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ArborConfig::load(cli.config.as_deref())?;
    if let Some(algorithm) = cli.algorithm {
        config.hashing.algorithm = algorithm;
        config.validate()?;
    }
    debug!(?config, "effective configuration");

    match cli.command {
        Commands::Root {
            file,
            chunk_size,
            strategy,
            threshold,
        } => commands::root::execute(&config, file, chunk_size, strategy, threshold).await,
        Commands::Prove {
            file,
            chunk_size,
            index,
            json,
        } => commands::prove::execute(&config, file, chunk_size, index, json).await,
        Commands::Distribute {
            source,
            total,
            unit_size,
            concurrency,
            endpoint,
            local,
        } => {
            let args = DistributeArgs {
                source,
                total,
                unit_size,
                concurrency,
                endpoint,
                local,
            };
            commands::distribute::execute(&config, args).await
        }
    }
}
