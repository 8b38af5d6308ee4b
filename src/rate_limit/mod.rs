//! Callback rate limiting
//!
//! [`Throttle`] and [`Debounce`] wrap a callback and decide when it runs.
//! Neither touches a clock directly; deferred work goes through a
//! [`Scheduler`], so tests drive them with a [`VirtualScheduler`] and the
//! terminal front end uses a [`TokioScheduler`].
//!
//! Everything here is single-threaded: tasks are `!Send` and state lives in
//! `Rc`/`Cell`, owned by each wrapper instance.

mod debounce;
mod scheduler;
mod throttle;
mod tokio_scheduler;
mod virtual_clock;

pub use debounce::{debounce, Debounce};
pub use scheduler::{Scheduler, Task, TimerId};
pub use throttle::{throttle, Throttle};
pub use tokio_scheduler::TokioScheduler;
pub use virtual_clock::VirtualScheduler;
