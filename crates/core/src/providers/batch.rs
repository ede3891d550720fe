use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::time::Duration;

/// Outcome of running a set of lookups under one shared deadline.
#[derive(Debug)]
pub struct Deadlined<T> {
    /// Results of the lookups that finished in time, in completion order
    pub finished: Vec<T>,
    /// Number of lookups dropped when the deadline passed
    pub unfinished: usize,
}

/// Run every lookup concurrently and keep whatever finishes within `budget`.
///
/// Lookups still running at the deadline are dropped, so a batch never takes
/// longer than `budget` no matter how many lookups it holds.
pub async fn collect_within<F, T>(budget: Duration, lookups: impl IntoIterator<Item = F>) -> Deadlined<T>
where
    F: Future<Output = T>,
{
    let deadline = tokio::time::Instant::now() + budget;
    let mut pending: FuturesUnordered<F> = lookups.into_iter().collect();
    let mut finished = Vec::with_capacity(pending.len());

    while let Ok(Some(result)) = tokio::time::timeout_at(deadline, pending.next()).await {
        finished.push(result);
    }

    Deadlined {
        finished,
        unfinished: pending.len(),
    }
}
