use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use arbor_config::ArborConfig;
use arbor_core::FileChunkSource;
use arbor_distributed::{
    ComputeEndpoint, FileSourceResolver, HttpEndpoint, LocalEndpoint, Orchestrator,
};

use super::resolve_strategy;

pub struct DistributeArgs {
    pub source: Option<String>,
    pub total: Option<u64>,
    pub unit_size: Option<u64>,
    pub concurrency: Option<usize>,
    pub endpoint: Option<String>,
    pub local: bool,
}

pub async fn execute(config: &ArborConfig, args: DistributeArgs) -> Result<()> {
    let settings = &config.distributed;
    let algorithm = config.hashing.algorithm()?;
    let source = args
        .source
        .or_else(|| settings.source.clone())
        .ok_or_else(|| anyhow!("No source given; pass --source or set distributed.source"))?;
    let unit_size = args.unit_size.unwrap_or(settings.work_unit_size as u64);
    let concurrency = args.concurrency.unwrap_or(settings.max_concurrency);
    let chunk_size = settings.chunk_size;

    let total = match args.total {
        Some(total) => total,
        None => FileChunkSource::open(Path::new(&source), chunk_size)
            .with_context(|| format!("Cannot count chunks of {}; pass --total", source))?
            .chunk_count(),
    };

    let endpoint: Arc<dyn ComputeEndpoint> = if args.local {
        let strategy = resolve_strategy(config, None, None)?;
        Arc::new(LocalEndpoint::new(
            algorithm,
            strategy,
            Arc::new(FileSourceResolver::new()),
        ))
    } else {
        let url = args
            .endpoint
            .or_else(|| settings.endpoint_url.clone())
            .ok_or_else(|| {
                anyhow!(
                    "No endpoint given; pass --endpoint, --local or set distributed.endpoint_url"
                )
            })?;
        Arc::new(HttpEndpoint::new(url))
    };

    info!(%source, total, unit_size, concurrency, local = args.local, "dispatching work units");
    let orchestrator = Orchestrator::new(endpoint, algorithm, source, chunk_size);
    let report = orchestrator
        .compute_distributed_root(total, unit_size, concurrency)
        .await?;

    println!("root: {}", report.root);
    println!("units: {}", report.units);
    println!("peak_in_flight: {}", report.peak_in_flight);
    println!("elapsed_ms: {}", report.elapsed.as_millis());
    Ok(())
}
