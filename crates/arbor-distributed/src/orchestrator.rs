//! Bounded-concurrency fan-out and merge
//!
//! The orchestrator partitions the leaf range into work units, dispatches
//! each unit to a [`ComputeEndpoint`] with at most `max_concurrency` units
//! outstanding, waits for every unit, and combines the sub-roots in sequence
//! order into the final root.
//!
//! ## Failure semantics
//!
//! There is no retry and no timeout. Every dispatched unit is awaited even
//! after one fails; the run then fails with the lowest-sequence failure.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use arbor_core::{build_root, natural_height, HashingAlgorithm, NodeHash};

use crate::endpoint::ComputeEndpoint;
use crate::error::{DistributedError, DistributedResult};
use crate::partition::partition;
use crate::request::WorkRequest;

/// Outcome of a successful distributed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub root: NodeHash,
    /// Number of work units dispatched
    pub units: usize,
    /// Height every sub-root was raised to
    pub unit_height: usize,
    /// Highest number of units observed in flight at once
    pub peak_in_flight: usize,
    pub elapsed: Duration,
}

/// Tracks in-flight units and the peak reached
#[derive(Debug, Default)]
struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlight {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// Dispatches work units for one input and merges the results
pub struct Orchestrator<A: HashingAlgorithm> {
    endpoint: Arc<dyn ComputeEndpoint>,
    algorithm: A,
    source: String,
    chunk_size: usize,
}

impl<A: HashingAlgorithm> Orchestrator<A> {
    pub fn new(
        endpoint: Arc<dyn ComputeEndpoint>,
        algorithm: A,
        source: impl Into<String>,
        chunk_size: usize,
    ) -> Self {
        Self {
            endpoint,
            algorithm,
            source: source.into(),
            chunk_size,
        }
    }

    /// Compute the root over `total` leaves split into `unit_size` units
    ///
    /// The result equals the single-machine root over the same leaves when
    /// `unit_size` is a power of two or at least `total`.
    ///
    /// # Errors
    ///
    /// - [`DistributedError::Config`] for a zero `unit_size` or `max_concurrency`
    /// - [`DistributedError::UnitFailed`] if any unit failed, naming the lowest sequence
    pub async fn compute_distributed_root(
        &self,
        total: u64,
        unit_size: u64,
        max_concurrency: usize,
    ) -> DistributedResult<RunReport> {
        if max_concurrency == 0 {
            return Err(DistributedError::Config(
                "max concurrency must be at least 1".to_string(),
            ));
        }
        let units = partition(total, unit_size)?;
        if unit_size < total && !unit_size.is_power_of_two() {
            warn!(
                unit_size,
                "work unit size is not a power of two; root will differ from a single-machine build"
            );
        }

        let unit_leaves = usize::try_from(unit_size.min(total)).map_err(|_| {
            DistributedError::Config(format!("work unit size {unit_size} too large"))
        })?;
        let unit_height = natural_height(unit_leaves);

        info!(
            source = %self.source,
            total,
            unit_size,
            units = units.len(),
            max_concurrency,
            unit_height,
            "starting distributed root computation"
        );
        let started = Instant::now();

        let semaphore = Arc::new(Semaphore::new(max_concurrency.min(Semaphore::MAX_PERMITS)));
        let in_flight = Arc::new(InFlight::default());
        let mut tasks = JoinSet::new();
        let mut sequences = HashMap::with_capacity(units.len());

        for unit in &units {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| DistributedError::TaskFailed(e.to_string()))?;
            let endpoint = Arc::clone(&self.endpoint);
            let in_flight = Arc::clone(&in_flight);
            let request = WorkRequest::for_unit(&self.source, self.chunk_size, unit, unit_height);

            let handle = tasks.spawn(async move {
                let _permit = permit;
                in_flight.enter();
                let result = endpoint.compute(&request).await;
                in_flight.exit();
                result
            });
            sequences.insert(handle.id(), unit.sequence);
        }

        // Barrier: every unit completes before anything is merged
        let mut sub_roots: Vec<Option<NodeHash>> = vec![None; units.len()];
        let mut failures: Vec<(u64, DistributedError)> = Vec::new();
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, Ok(hash))) => {
                    if let Some(&sequence) = sequences.get(&id) {
                        debug!(sequence, "work unit completed");
                        sub_roots[sequence as usize] = Some(hash);
                    }
                }
                Ok((id, Err(error))) => {
                    let sequence = sequences.get(&id).copied().unwrap_or(u64::MAX);
                    warn!(sequence, error = %error, "work unit failed");
                    failures.push((sequence, error));
                }
                Err(join_error) => {
                    let sequence = sequences.get(&join_error.id()).copied().unwrap_or(u64::MAX);
                    warn!(sequence, error = %join_error, "work unit task failed");
                    failures.push((sequence, join_error.into()));
                }
            }
        }

        if let Some((sequence, source)) = failures
            .into_iter()
            .min_by_key(|(sequence, _)| *sequence)
        {
            return Err(DistributedError::UnitFailed {
                sequence,
                source: Box::new(source),
            });
        }

        let sub_roots = sub_roots
            .into_iter()
            .enumerate()
            .map(|(sequence, hash)| {
                hash.ok_or_else(|| {
                    DistributedError::TaskFailed(format!("no result for work unit {sequence}"))
                })
            })
            .collect::<DistributedResult<Vec<_>>>()?;
        let root = build_root(&self.algorithm, &sub_roots)?;

        let report = RunReport {
            root,
            units: units.len(),
            unit_height,
            peak_in_flight: in_flight.peak(),
            elapsed: started.elapsed(),
        };
        info!(
            root = %report.root,
            units = report.units,
            peak_in_flight = report.peak_in_flight,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "distributed root computed"
        );
        Ok(report)
    }
}
