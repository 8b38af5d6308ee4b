//! Real-time scheduler backed by tokio timers

use super::scheduler::{Scheduler, Task, TimerId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::AbortHandle;

/// Schedules tasks with `tokio::task::spawn_local`.
///
/// Must be used from inside a [`tokio::task::LocalSet`], which gives the
/// same single-threaded run-to-completion model as a browser event loop.
/// Clones share the same set of pending timers.
#[derive(Clone, Default)]
pub struct TokioScheduler {
    next_id: Rc<Cell<u64>>,
    pending: Rc<RefCell<HashMap<TimerId, AbortHandle>>>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers that have neither fired nor been cancelled
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let pending = Rc::clone(&self.pending);
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            pending.borrow_mut().remove(&id);
            task();
        });
        self.pending
            .borrow_mut()
            .insert(id, handle.abort_handle());
        tracing::trace!(timer = id.0, ?delay, "Timer scheduled");
        id
    }

    fn cancel(&self, id: TimerId) {
        if let Some(handle) = self.pending.borrow_mut().remove(&id) {
            handle.abort();
            tracing::trace!(timer = id.0, "Timer cancelled");
        }
    }
}

impl std::fmt::Debug for TokioScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::task::LocalSet;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Sleep on the paused clock, then let woken local tasks run
    async fn wait(n: u64) {
        tokio::time::sleep(ms(n)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_task_fires_after_delay() {
        LocalSet::new()
            .run_until(async {
                let scheduler = TokioScheduler::new();
                let fired = Rc::new(Cell::new(false));
                let f = fired.clone();
                scheduler.schedule(ms(100), Box::new(move || f.set(true)));
                assert_eq!(scheduler.pending(), 1);

                wait(50).await;
                assert!(!fired.get());

                wait(100).await;
                assert!(fired.get());
                assert_eq!(scheduler.pending(), 0);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_cancelled_task_does_not_fire() {
        LocalSet::new()
            .run_until(async {
                let scheduler = TokioScheduler::new();
                let fired = Rc::new(Cell::new(false));
                let f = fired.clone();
                let id = scheduler.schedule(ms(100), Box::new(move || f.set(true)));
                scheduler.cancel(id);
                assert_eq!(scheduler.pending(), 0);

                wait(200).await;
                assert!(!fired.get());
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_cancel_after_fire_is_noop() {
        LocalSet::new()
            .run_until(async {
                let scheduler = TokioScheduler::new();
                let count = Rc::new(Cell::new(0));
                let c = count.clone();
                let id = scheduler.schedule(ms(10), Box::new(move || c.set(c.get() + 1)));
                wait(20).await;
                scheduler.cancel(id);
                assert_eq!(count.get(), 1);
            })
            .await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_ids_are_unique() {
        LocalSet::new()
            .run_until(async {
                let scheduler = TokioScheduler::new();
                let a = scheduler.schedule(ms(10), Box::new(|| {}));
                let b = scheduler.clone().schedule(ms(10), Box::new(|| {}));
                assert_ne!(a, b);
                assert_eq!(scheduler.pending(), 2);
            })
            .await;
    }
}
