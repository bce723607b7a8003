//! Waiting on a batch of independent futures and reducing their outcomes.

use futures::future::join_all;
use std::fmt::Display;
use std::future::Future;
use tracing::warn;

/// What to do with failures once every task has finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Return the first failure in submission order, discarding everything else
    AbortOnFirst,
    /// Hand back every failure next to the successes
    CollectAll,
}

/// Successes and failures of a finished batch, each in submission order
#[derive(Debug)]
pub struct TaskOutcome<T, E> {
    pub succeeded: Vec<T>,
    pub failed: Vec<E>,
}

impl<T, E> Default for TaskOutcome<T, E> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<T, E> TaskOutcome<T, E> {
    pub fn len(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drive every task to completion, then reduce the results under `policy`.
///
/// The tasks run interleaved on the calling task. Nothing is cancelled: with
/// [`ErrorPolicy::AbortOnFirst`] all of them still finish before the first
/// failure is returned.
pub async fn process_future_results<I, T, E>(
    tasks: I,
    policy: ErrorPolicy,
) -> Result<TaskOutcome<T, E>, E>
where
    I: IntoIterator,
    I::Item: Future<Output = Result<T, E>>,
    E: Display,
{
    let results = join_all(tasks).await;
    reduce_results(results, policy)
}

/// Fold already-finished results under `policy`
pub fn reduce_results<T, E>(
    results: impl IntoIterator<Item = Result<T, E>>,
    policy: ErrorPolicy,
) -> Result<TaskOutcome<T, E>, E>
where
    E: Display,
{
    let mut outcome = TaskOutcome::default();

    for result in results {
        match result {
            Ok(value) => outcome.succeeded.push(value),
            Err(e) if policy == ErrorPolicy::AbortOnFirst => return Err(e),
            Err(e) => {
                warn!("task failed: {}", e);
                outcome.failed.push(e);
            }
        }
    }

    Ok(outcome)
}

/// Wait for every task and return the successes, or the first failure
pub async fn raise_future_errors<I, T, E>(tasks: I) -> Result<Vec<T>, E>
where
    I: IntoIterator,
    I::Item: Future<Output = Result<T, E>>,
    E: Display,
{
    process_future_results(tasks, ErrorPolicy::AbortOnFirst)
        .await
        .map(|outcome| outcome.succeeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn task(
        value: Result<u32, String>,
        delay_ms: u64,
        done: Arc<AtomicUsize>,
    ) -> BoxFuture<'static, Result<u32, String>> {
        async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            done.fetch_add(1, Ordering::SeqCst);
            value
        }
        .boxed()
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let tasks: Vec<BoxFuture<'static, Result<u32, String>>> = Vec::new();
        let outcome = process_future_results(tasks, ErrorPolicy::CollectAll)
            .await
            .unwrap();
        assert!(outcome.succeeded.is_empty());
        assert!(outcome.failed.is_empty());
        assert!(outcome.is_empty());

        let tasks: Vec<BoxFuture<'static, Result<u32, String>>> = Vec::new();
        assert!(raise_future_errors(tasks).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_collect_all() {
        let done = Arc::new(AtomicUsize::new(0));
        let tasks = vec![
            task(Ok(1), 20, done.clone()),
            task(Err("boom".to_string()), 5, done.clone()),
            task(Ok(3), 0, done.clone()),
            task(Err("bang".to_string()), 10, done.clone()),
            task(Ok(5), 1, done.clone()),
        ];

        let outcome = process_future_results(tasks, ErrorPolicy::CollectAll)
            .await
            .unwrap();

        assert_eq!(outcome.succeeded, vec![1, 3, 5]);
        assert_eq!(outcome.failed, vec!["boom".to_string(), "bang".to_string()]);
        assert_eq!(outcome.len(), 5);
        assert_eq!(done.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_abort_on_first_waits_for_all() {
        let done = Arc::new(AtomicUsize::new(0));
        // the slow failure was submitted first, so it is the one reported
        let tasks = vec![
            task(Ok(1), 0, done.clone()),
            task(Err("slow".to_string()), 30, done.clone()),
            task(Err("fast".to_string()), 0, done.clone()),
            task(Ok(4), 10, done.clone()),
        ];

        let err = process_future_results(tasks, ErrorPolicy::AbortOnFirst)
            .await
            .unwrap_err();

        assert_eq!(err, "slow");
        assert_eq!(done.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_raise_future_errors() {
        let done = Arc::new(AtomicUsize::new(0));
        let tasks = vec![task(Ok(7), 5, done.clone()), task(Ok(8), 0, done.clone())];
        assert_eq!(raise_future_errors(tasks).await.unwrap(), vec![7, 8]);

        let tasks = vec![
            task(Ok(7), 0, done.clone()),
            task(Err("nope".to_string()), 0, done.clone()),
        ];
        assert_eq!(raise_future_errors(tasks).await.unwrap_err(), "nope");
    }

    #[test]
    fn test_reduce_results() {
        let results: Vec<Result<u32, String>> = vec![Ok(1), Err("x".to_string()), Ok(2)];
        let outcome = reduce_results(results.clone(), ErrorPolicy::CollectAll).unwrap();
        assert_eq!(outcome.succeeded, vec![1, 2]);
        assert_eq!(outcome.failed, vec!["x".to_string()]);

        assert_eq!(
            reduce_results(results, ErrorPolicy::AbortOnFirst).unwrap_err(),
            "x"
        );
    }
}
