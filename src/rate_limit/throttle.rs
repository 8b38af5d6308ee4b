//! Leading-edge throttle

use super::scheduler::Scheduler;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Runs the wrapped callback at most once per window.
///
/// The first call while the window is open runs the callback right away and
/// closes the window. Calls made while it is closed are dropped, not queued.
/// The window reopens `interval` after the call that closed it.
pub struct Throttle<F, S> {
    func: RefCell<F>,
    interval: Duration,
    open: Rc<Cell<bool>>,
    scheduler: S,
}

/// Wrap `func` in a [`Throttle`]
pub fn throttle<A, F, S>(func: F, interval: Duration, scheduler: S) -> Throttle<F, S>
where
    F: FnMut(A),
    S: Scheduler,
{
    Throttle::new(func, interval, scheduler)
}

impl<F, S: Scheduler> Throttle<F, S> {
    pub fn new(func: F, interval: Duration, scheduler: S) -> Self {
        Self {
            func: RefCell::new(func),
            interval,
            open: Rc::new(Cell::new(true)),
            scheduler,
        }
    }

    /// Invoke the callback if the window is open; otherwise drop the call
    pub fn call<A>(&self, args: A)
    where
        F: FnMut(A),
    {
        if !self.open.get() {
            tracing::trace!("Throttled call dropped");
            return;
        }

        // Close before invoking so re-entrant calls are dropped
        self.open.set(false);
        let open = Rc::clone(&self.open);
        self.scheduler
            .schedule(self.interval, Box::new(move || open.set(true)));

        (self.func.borrow_mut())(args);
    }

    /// Whether the next call would run
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl<F, S> std::fmt::Debug for Throttle<F, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("interval", &self.interval)
            .field("open", &self.open.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::scheduler::{MockScheduler, TimerId};
    use crate::rate_limit::VirtualScheduler;
    use pretty_assertions::assert_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_burst_runs_once_then_reopens() {
        let clock = VirtualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let throttled = throttle(move |_: ()| c.set(c.get() + 1), ms(100), &clock);

        throttled.call(());
        throttled.call(());
        throttled.call(());
        assert_eq!(count.get(), 1);

        clock.advance(ms(150));
        throttled.call(());
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_leading_call_keeps_its_arguments() {
        let clock = VirtualScheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let throttled = throttle(move |n: u32| s.borrow_mut().push(n), ms(100), &clock);

        for n in 1..=5 {
            throttled.call(n);
        }
        clock.advance(ms(100));
        throttled.call(6);
        throttled.call(7);

        assert_eq!(*seen.borrow(), vec![1, 6]);
    }

    #[test]
    fn test_window_reopens_exactly_at_interval() {
        let clock = VirtualScheduler::new();
        let throttled = throttle(|_: ()| {}, ms(100), &clock);

        throttled.call(());
        clock.advance(ms(99));
        assert!(!throttled.is_open());
        clock.advance(ms(1));
        assert!(throttled.is_open());
    }

    #[test]
    fn test_dropped_calls_do_not_extend_window() {
        let clock = VirtualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let throttled = throttle(move |_: ()| c.set(c.get() + 1), ms(100), &clock);

        throttled.call(());
        clock.advance(ms(90));
        throttled.call(());
        clock.advance(ms(10));
        throttled.call(());
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let clock = VirtualScheduler::new();
        let a = throttle(|_: ()| {}, ms(100), &clock);
        let b = throttle(|_: ()| {}, ms(100), &clock);

        a.call(());
        assert!(!a.is_open());
        assert!(b.is_open());
    }

    #[test]
    fn test_only_leading_call_schedules_reopen() {
        let mut mock = MockScheduler::new();
        mock.expect_schedule()
            .withf(|delay, _| *delay == Duration::from_millis(250))
            .times(1)
            .returning(|_, _| TimerId(7));
        mock.expect_cancel().never();

        let throttled = throttle(|_: ()| {}, ms(250), mock);
        throttled.call(());
        throttled.call(());
        assert_eq!(throttled.interval(), ms(250));
    }

    #[test]
    fn test_reentrant_call_is_dropped() {
        let clock = VirtualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Rc<dyn Fn()>>>> = Rc::new(RefCell::new(None));

        let (c, inner) = (count.clone(), slot.clone());
        let throttled = Rc::new(throttle(
            move |_: ()| {
                c.set(c.get() + 1);
                if let Some(again) = inner.borrow().as_ref() {
                    again();
                }
            },
            ms(100),
            clock.clone(),
        ));
        let weak = Rc::downgrade(&throttled);
        *slot.borrow_mut() = Some(Rc::new(move || {
            if let Some(t) = weak.upgrade() {
                t.call(());
            }
        }));

        throttled.call(());
        assert_eq!(count.get(), 1);
    }
}
