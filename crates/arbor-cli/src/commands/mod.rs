pub mod distribute;
pub mod prove;
pub mod root;

use arbor_config::{ArborConfig, BuildConfig};
use arbor_core::BuildStrategy;

use crate::cli::StrategyArg;

/// Strategy from command-line overrides, falling back to the config file
pub fn resolve_strategy(
    config: &ArborConfig,
    strategy: Option<StrategyArg>,
    threshold: Option<usize>,
) -> anyhow::Result<BuildStrategy> {
    let threshold = threshold.unwrap_or(config.build.threshold);
    match strategy {
        Some(arg) => Ok(BuildStrategy::parse(arg.as_str(), threshold)?),
        None => Ok(BuildConfig {
            strategy: config.build.strategy,
            threshold,
        }
        .strategy()),
    }
}
