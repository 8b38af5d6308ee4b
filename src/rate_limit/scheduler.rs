//! Deferred-execution capability

use std::rc::Rc;
use std::time::Duration;

/// A deferred callback
pub type Task = Box<dyn FnOnce()>;

/// Handle to a scheduled task, unique per scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) u64);

/// Runs tasks after a delay, on the same thread that scheduled them
#[cfg_attr(test, mockall::automock)]
pub trait Scheduler {
    /// Queue `task` to run once, `delay` from now
    fn schedule(&self, delay: Duration, task: Task) -> TimerId;

    /// Drop a queued task. Unknown or already-fired ids are ignored.
    fn cancel(&self, id: TimerId);
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        (**self).schedule(delay, task)
    }

    fn cancel(&self, id: TimerId) {
        (**self).cancel(id)
    }
}

impl<S: Scheduler + ?Sized> Scheduler for &S {
    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        (**self).schedule(delay, task)
    }

    fn cancel(&self, id: TimerId) {
        (**self).cancel(id)
    }
}
