//! Deferred, latest-wins recomputation
//!
//! Typing into the search box can produce many list states per second while
//! each recompute walks the whole collection. [`LatestOnly`] keeps at most one
//! pending state: a new submission replaces the pending one, and the worker
//! only computes once input has been quiet for the debounce window.
//!
//! ```text
//! submit(s1) ─┐
//! submit(s2) ─┼──▶ watch (latest only) ──▶ debounce ──▶ compute(s3) ──▶ watch ──▶ subscribers
//! submit(s3) ─┘
//! ```

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A background worker that recomputes a value from the latest submitted state
pub struct LatestOnly<S, V> {
    input: watch::Sender<Option<S>>,
    output: watch::Receiver<Option<Arc<V>>>,
    task: JoinHandle<()>,
}

impl<S, V> LatestOnly<S, V>
where
    S: Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Spawn the worker on the current tokio runtime
    pub fn spawn<F>(debounce: Duration, compute: F) -> Self
    where
        F: Fn(&S) -> V + Send + 'static,
    {
        let (input, mut pending) = watch::channel(None::<S>);
        let (results, output) = watch::channel(None::<Arc<V>>);

        let task = tokio::spawn(async move {
            let mut generation: u64 = 0;

            while pending.changed().await.is_ok() {
                // Restart the quiet period on every newer submission.
                let mut closed = false;
                loop {
                    tokio::select! {
                        changed = pending.changed() => {
                            if changed.is_err() {
                                closed = true;
                                break;
                            }
                        }
                        _ = tokio::time::sleep(debounce) => break,
                    }
                }

                let state = pending.borrow_and_update().clone();
                if let Some(state) = state {
                    generation += 1;
                    let value = compute(&state);
                    tracing::debug!(generation, "recomputed latest state");
                    results.send_replace(Some(Arc::new(value)));
                }

                if closed {
                    break;
                }
            }

            tracing::debug!(generation, "recompute worker stopped");
        });

        Self {
            input,
            output,
            task,
        }
    }

    /// Queue a state, superseding any state not yet computed
    pub fn submit(&self, state: S) {
        self.input.send_replace(Some(state));
    }

    /// The most recently computed value, if any
    pub fn latest(&self) -> Option<Arc<V>> {
        self.output.borrow().clone()
    }

    /// Receive every newly computed value
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<V>>> {
        self.output.clone()
    }

    /// Flush the pending state, if any, and stop the worker
    pub async fn shutdown(self) {
        let Self { input, task, .. } = self;
        drop(input);
        if let Err(e) = task.await {
            tracing::warn!(error = %e, "recompute worker panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_burst_computes_once_with_latest_state() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        let worker = LatestOnly::spawn(Duration::from_millis(150), move |query: &String| {
            counter.fetch_add(1, Ordering::SeqCst);
            query.to_uppercase()
        });
        let mut results = worker.subscribe();

        worker.submit("a".to_string());
        worker.submit("ab".to_string());
        worker.submit("abe".to_string());

        results.changed().await.unwrap();
        assert_eq!(worker.latest().as_deref().map(String::as_str), Some("ABE"));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_quiet_period_produces_a_result() {
        let worker = LatestOnly::spawn(Duration::from_millis(50), |n: &usize| n * 2);
        let mut results = worker.subscribe();

        worker.submit(1);
        results.changed().await.unwrap();
        assert_eq!(worker.latest().as_deref(), Some(&2));

        worker.submit(21);
        results.changed().await.unwrap();
        assert_eq!(worker.latest().as_deref(), Some(&42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_flushes_pending_state() {
        let worker = LatestOnly::spawn(Duration::from_secs(60), |n: &usize| *n);
        let results = worker.subscribe();

        worker.submit(7);
        tokio::task::yield_now().await;
        worker.shutdown().await;

        assert_eq!(results.borrow().as_deref(), Some(&7));
    }
}
