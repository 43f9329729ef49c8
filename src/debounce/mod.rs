//! Input debouncing on top of an injectable scheduler.
//!
//! A [`Debouncer`] keeps at most one pending trigger. Scheduling a new trigger
//! cancels the previous one outright, so a superseded search never runs at all
//! rather than running and being ignored.
//!
//! Time comes from a [`Scheduler`]: [`TokioScheduler`] for real delays on a
//! `LocalSet`, [`ManualScheduler`] for a virtual clock driven by tests.

mod manual;
mod runtime;

pub use manual::{ManualHandle, ManualScheduler};
pub use runtime::TokioScheduler;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Settle time between the last keystroke and the search it triggers.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// A deferred unit of work. Everything runs on one thread, so no `Send` bound.
pub type Task = Box<dyn FnOnce() + 'static>;

/// Source of delayed execution.
///
/// Both operations return immediately; neither may run `task` synchronously.
pub trait Scheduler {
    /// Identifies a scheduled task so it can be cancelled.
    type Handle;

    /// Run `task` once, `delay` from now.
    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle;

    /// Discard a task. Cancelling a task that already ran is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

struct Pending<H> {
    handle: H,
    fired: Rc<Cell<bool>>,
}

/// Collapses bursts of triggers into the last one.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    pending: Option<Pending<S::Handle>>,
}

impl<S: Scheduler> std::fmt::Debug for Debouncer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("pending", &self.is_pending())
            .finish_non_exhaustive()
    }
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    /// Arm `trigger` to run after `delay`, cancelling any trigger still waiting.
    pub fn schedule(&mut self, trigger: impl FnOnce() + 'static, delay: Duration) {
        self.cancel();

        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let handle = self.scheduler.schedule(
            delay,
            Box::new(move || {
                flag.set(true);
                trigger();
            }),
        );
        tracing::trace!("Armed debounced trigger ({:?})", delay);

        self.pending = Some(Pending { handle, fired });
    }

    /// Drop the waiting trigger, if any.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take()
            && !pending.fired.get()
        {
            tracing::trace!("Cancelled superseded trigger");
            self.scheduler.cancel(pending.handle);
        }
    }

    /// Whether a trigger is armed and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| !pending.fired.get())
    }
}

impl<S: Scheduler> Drop for Debouncer<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use std::cell::RefCell;

    const MS: Duration = Duration::from_millis(1);

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl Fn(u32) -> Box<dyn FnOnce()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |n: u32| -> Box<dyn FnOnce()> {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.borrow_mut().push(n))
        };
        (log, make)
    }

    #[test]
    fn test_burst_collapses_to_last() {
        let clock = ManualScheduler::new();
        let mut debouncer = Debouncer::new(clock.clone());
        let (log, make) = recorder();

        for n in 0..5 {
            debouncer.schedule(make(n), DEFAULT_SETTLE_DELAY);
            clock.advance(100 * MS);
        }
        check!(log.borrow().is_empty());
        check!(debouncer.is_pending());

        clock.advance(DEFAULT_SETTLE_DELAY);
        check!(*log.borrow() == vec![4]);
        check!(!debouncer.is_pending());
        check!(clock.pending() == 0);
    }

    #[test]
    fn test_fires_exactly_once() {
        let clock = ManualScheduler::new();
        let mut debouncer = Debouncer::new(clock.clone());
        let (log, make) = recorder();

        debouncer.schedule(make(1), 300 * MS);
        clock.advance(299 * MS);
        check!(log.borrow().is_empty());
        clock.advance(MS);
        check!(*log.borrow() == vec![1]);
        clock.advance(Duration::from_secs(10));
        check!(*log.borrow() == vec![1]);
    }

    #[test]
    fn test_spaced_triggers_all_fire() {
        let clock = ManualScheduler::new();
        let mut debouncer = Debouncer::new(clock.clone());
        let (log, make) = recorder();

        debouncer.schedule(make(1), 300 * MS);
        clock.advance(300 * MS);
        debouncer.schedule(make(2), 300 * MS);
        clock.advance(300 * MS);
        check!(*log.borrow() == vec![1, 2]);
    }

    #[test]
    fn test_cancel_discards_pending() {
        let clock = ManualScheduler::new();
        let mut debouncer = Debouncer::new(clock.clone());
        let (log, make) = recorder();

        debouncer.schedule(make(1), 300 * MS);
        debouncer.cancel();
        check!(!debouncer.is_pending());
        clock.advance(Duration::from_secs(1));
        check!(log.borrow().is_empty());
    }

    #[test]
    fn test_drop_cancels_pending() {
        let clock = ManualScheduler::new();
        let (log, make) = recorder();
        {
            let mut debouncer = Debouncer::new(clock.clone());
            debouncer.schedule(make(1), 300 * MS);
        }
        clock.advance(Duration::from_secs(1));
        check!(log.borrow().is_empty());
        check!(clock.pending() == 0);
    }

    #[test]
    fn test_schedule_does_not_run_synchronously() {
        let clock = ManualScheduler::new();
        let mut debouncer = Debouncer::new(clock.clone());
        let (log, make) = recorder();

        debouncer.schedule(make(1), Duration::ZERO);
        check!(log.borrow().is_empty());
        clock.advance(Duration::ZERO);
        check!(*log.borrow() == vec![1]);
    }
}
