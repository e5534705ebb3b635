use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages (default for verbose)
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Builder strategy as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    #[value(alias = "standard")]
    Sequential,
    Parallel,
    Recursive,
}

impl StrategyArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
            Self::Recursive => "recursive",
        }
    }
}

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "arbor - Merkle roots over chunked data, locally or fanned out to workers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short = 'C', long, global = true, env = "ARBOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Hash algorithm (sha256, blake3); overrides the config file
    #[arg(short = 'a', long, global = true)]
    pub algorithm: Option<String>,
}

impl Cli {
    /// Effective log level: `--verbose` wins, then `--log-level`, then warn
    pub fn level_filter(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::DEBUG
        } else {
            self.log_level.map_or(LevelFilter::WARN, LevelFilter::from)
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the Merkle root of a local file
    Root {
        /// Input file
        #[arg(short, long)]
        file: PathBuf,

        /// Bytes per chunk (defaults to the configured chunk size)
        #[arg(short = 's', long)]
        chunk_size: Option<usize>,

        /// Builder strategy (defaults to the configured strategy)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Split threshold or group size (defaults to the configured threshold)
        #[arg(short, long)]
        threshold: Option<usize>,
    },

    /// Generate and verify the proof for one chunk of a local file
    Prove {
        /// Input file
        #[arg(short, long)]
        file: PathBuf,

        /// Bytes per chunk (defaults to the configured chunk size)
        #[arg(short = 's', long)]
        chunk_size: Option<usize>,

        /// Index of the chunk to prove
        #[arg(short, long)]
        index: usize,

        /// Print the proof as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute a root by fanning work units out to workers
    Distribute {
        /// Input identifier sent to workers (defaults to the configured source)
        #[arg(long)]
        source: Option<String>,

        /// Number of leaves; counted from the source file when omitted
        #[arg(short = 'n', long)]
        total: Option<u64>,

        /// Chunks per work unit
        #[arg(short, long)]
        unit_size: Option<u64>,

        /// Maximum work units in flight
        #[arg(short = 'c', long)]
        concurrency: Option<usize>,

        /// Worker URL (defaults to the configured endpoint)
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Run workers in-process instead of over HTTP
        #[arg(long, conflicts_with = "endpoint")]
        local: bool,
    },
}
