//! Wait-for-all fan-out
//!
//! Every branch runs to completion; failures never cancel siblings.

use futures::future::join_all;
use std::future::Future;

/// Outcomes of a fan-out, partitioned
#[derive(Debug)]
pub struct Settled<T, E> {
    /// Successful results, in input order
    pub successes: Vec<T>,

    /// Errors, in input order
    pub failures: Vec<E>,
}

impl<T, E> Settled<T, E> {
    /// Number of branches that ran
    pub fn attempted(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// True when there was at least one branch and none succeeded
    pub fn all_failed(&self) -> bool {
        self.successes.is_empty() && !self.failures.is_empty()
    }
}

/// Runs all futures concurrently and partitions their outcomes
///
/// Input order is preserved within each partition, so callers that later
/// sort with a stable sort keep the provider's order among ties.
pub async fn settle_all<I, F, T, E>(futures: I) -> Settled<T, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    let mut settled = Settled {
        successes: Vec::new(),
        failures: Vec::new(),
    };

    for outcome in join_all(futures).await {
        match outcome {
            Ok(value) => settled.successes.push(value),
            Err(e) => settled.failures.push(e),
        }
    }

    settled
}
