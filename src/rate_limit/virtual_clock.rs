//! Manually advanced clock for deterministic scheduling

use super::scheduler::{Scheduler, Task, TimerId};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

#[derive(Default)]
struct ClockState {
    now: Duration,
    next_id: u64,
    /// Keyed by (due time, id) so ties run in scheduling order
    queue: BTreeMap<(Duration, u64), Task>,
}

/// A scheduler whose time only moves when [`advance`](Self::advance) is
/// called. Clones share the same clock.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    state: Rc<RefCell<ClockState>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the clock was created
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of tasks still waiting to run
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Move time forward by `by`, running every task that comes due in
    /// due-time order. Tasks may schedule or cancel other tasks while
    /// running; new tasks that fall inside the window run in the same call.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        loop {
            // Release the borrow before running the task
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state.queue.first_key_value().map(|(&(due, _), _)| due);
                match due {
                    Some(due) if due <= target => {
                        state.now = due;
                        state.queue.pop_first().map(|(_, task)| task)
                    }
                    _ => None,
                }
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.state.borrow_mut().now = target;
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due = state.now + delay;
        state.queue.insert((due, id), task);
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) {
        self.state
            .borrow_mut()
            .queue
            .retain(|&(_, queued), _| queued != id.0);
    }
}

impl std::fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("VirtualScheduler")
            .field("now", &state.now)
            .field("pending", &state.queue.len())
            .finish()
    }
}
