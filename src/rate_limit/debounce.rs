//! Trailing-edge (or immediate) debounce

use super::scheduler::{Scheduler, TimerId};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Collapses a burst of calls into one invocation of the wrapped callback.
///
/// Every call cancels the pending deferred call and schedules a new one
/// `wait` later, so in the default trailing mode the callback runs once,
/// `wait` after the last call of the burst, with that call's arguments.
///
/// In immediate mode the first call of a burst runs the callback right away
/// with its own arguments and the burst gets no trailing call.
pub struct Debounce<F, S: Scheduler> {
    func: Rc<RefCell<F>>,
    wait: Duration,
    immediate: bool,
    pending: Rc<Cell<Option<TimerId>>>,
    scheduler: S,
}

/// Wrap `func` in a [`Debounce`]
pub fn debounce<A, F, S>(func: F, wait: Duration, immediate: bool, scheduler: S) -> Debounce<F, S>
where
    F: FnMut(A),
    S: Scheduler,
{
    Debounce::new(func, wait, immediate, scheduler)
}

impl<F, S: Scheduler> Debounce<F, S> {
    pub fn new(func: F, wait: Duration, immediate: bool, scheduler: S) -> Self {
        Self {
            func: Rc::new(RefCell::new(func)),
            wait,
            immediate,
            pending: Rc::new(Cell::new(None)),
            scheduler,
        }
    }

    /// Register a call, superseding any pending one
    pub fn call<A>(&self, args: A)
    where
        F: FnMut(A) + 'static,
        A: 'static,
    {
        let call_now = self.immediate && self.pending.get().is_none();

        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }

        let (now_args, trailing_args) = if self.immediate {
            (call_now.then_some(args), None)
        } else {
            (None, Some(args))
        };

        let pending = Rc::clone(&self.pending);
        let func = Rc::clone(&self.func);
        let id = self.scheduler.schedule(
            self.wait,
            Box::new(move || {
                pending.set(None);
                if let Some(args) = trailing_args {
                    (func.borrow_mut())(args);
                }
            }),
        );
        self.pending.set(Some(id));

        if let Some(args) = now_args {
            (self.func.borrow_mut())(args);
        }
    }

    /// Whether a deferred call is scheduled
    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn is_immediate(&self) -> bool {
        self.immediate
    }
}

impl<F, S: Scheduler> Drop for Debounce<F, S> {
    fn drop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
    }
}

impl<F, S: Scheduler> std::fmt::Debug for Debounce<F, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounce")
            .field("wait", &self.wait)
            .field("immediate", &self.immediate)
            .field("pending", &self.pending.get())
            .finish()
    }
}
