//! # Confirmation Poller
//!
//! Re-queries a shrinking set of outstanding transactions until none is
//! pending, with a round cap and an optional deadline.

use crate::domain::{MultiChainError, MultiChainResult, TransactionStatus};
use crate::ports::MultiChainApi;
use c3_references::TransactionRef;
use c3_telemetry::POLL_ROUNDS;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Default sleep between rounds.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default round cap.
pub const DEFAULT_MAX_ROUNDS: u32 = 600;

/// Poller bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollOptions {
    /// Sleep between rounds; not applied after the last round.
    pub interval: Duration,
    /// Give up after this many status rounds.
    pub max_rounds: u32,
    /// Give up once this much time has passed since the first round.
    pub deadline: Option<Duration>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_rounds: DEFAULT_MAX_ROUNDS,
            deadline: None,
        }
    }
}

impl PollOptions {
    /// Options with the given interval and default bounds.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }
}

/// Poll `api` until every transaction is confirmed or failed.
///
/// Each round queries only the transactions still pending. Results are in
/// input order; duplicate references are resolved position by position.
///
/// # Errors
///
/// Status query errors are returned as-is. [`MultiChainError::PollTimeout`]
/// when `max_rounds` or `deadline` runs out first.
pub async fn wait_for_transactions<A>(
    api: &A,
    transactions: &[TransactionRef],
    options: &PollOptions,
) -> MultiChainResult<Vec<TransactionStatus>>
where
    A: MultiChainApi + ?Sized,
{
    let mut statuses: Vec<Option<TransactionStatus>> = vec![None; transactions.len()];
    let mut outstanding: Vec<usize> = (0..transactions.len()).collect();
    let started = Instant::now();
    let mut rounds = 0u32;

    while !outstanding.is_empty() {
        let timed_out = options
            .deadline
            .is_some_and(|deadline| started.elapsed() >= deadline);
        if rounds >= options.max_rounds || timed_out {
            return Err(MultiChainError::PollTimeout {
                rounds,
                outstanding: outstanding.len(),
            });
        }

        rounds += 1;
        POLL_ROUNDS.inc();

        let query: Vec<TransactionRef> = outstanding
            .iter()
            .map(|&index| transactions[index].clone())
            .collect();
        let mut results = api.get_transactions_statuses(&query).await?.into_iter();

        let mut still_pending = Vec::with_capacity(outstanding.len());
        for &index in &outstanding {
            match results.next() {
                Some(status) if !status.is_pending() => statuses[index] = Some(status),
                // A short answer leaves the remaining positions outstanding
                _ => still_pending.push(index),
            }
        }

        debug!(
            "[c3-multichain] Poll round {}: {} of {} still pending",
            rounds,
            still_pending.len(),
            transactions.len()
        );

        outstanding = still_pending;
        if !outstanding.is_empty() {
            sleep(options.interval).await;
        }
    }

    Ok(statuses.into_iter().flatten().collect())
}
