//! Deterministic virtual-time scheduler.

use super::{Scheduler, Task};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

/// Timers keyed by (deadline, sequence) so equal deadlines fire in scheduling order.
type TimerKey = (Duration, u64);

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_seq: u64,
    timers: BTreeMap<TimerKey, Task>,
}

/// A scheduler whose clock only moves when [`advance`](Self::advance) is called.
///
/// Clones share the same clock and timer queue, so a test can keep one clone
/// and hand another to the code under test.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

/// Handle to a timer registered on a [`ManualScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualHandle(TimerKey);

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("pending", &state.timers.len())
            .finish()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of timers waiting to fire.
    pub fn pending(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Move the clock forward by `by`, running every timer that comes due.
    ///
    /// Timers fire in deadline order with the clock set to their deadline.
    /// A task may schedule new timers; those fire too if they fall inside the
    /// window. Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut fired = 0;

        loop {
            // Release the borrow before running the task: it may reschedule.
            let task = {
                let mut state = self.state.borrow_mut();
                let Some((&key, _)) = state.timers.first_key_value() else {
                    break;
                };
                if key.0 > target {
                    break;
                }
                state.now = key.0;
                state.timers.remove(&key)
            };

            if let Some(task) = task {
                tracing::trace!("Manual timer fired at {:?}", self.now());
                task();
                fired += 1;
            }
        }

        self.state.borrow_mut().now = target;
        fired
    }

    /// Advance until no timers remain.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        loop {
            let next = self
                .state
                .borrow()
                .timers
                .first_key_value()
                .map(|(&(deadline, _), _)| deadline);
            let Some(deadline) = next else {
                return fired;
            };
            fired += self.advance(deadline.saturating_sub(self.now()));
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, delay: Duration, task: Task) -> ManualHandle {
        let mut state = self.state.borrow_mut();
        let key = (state.now + delay, state.next_seq);
        state.next_seq += 1;
        state.timers.insert(key, task);
        ManualHandle(key)
    }

    fn cancel(&self, handle: ManualHandle) {
        self.state.borrow_mut().timers.remove(&handle.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_in_deadline_then_schedule_order() {
        let clock = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (name, delay) in [("c", 20), ("a", 10), ("b", 10)] {
            let log = Rc::clone(&log);
            clock.schedule(delay * MS, Box::new(move || log.borrow_mut().push(name)));
        }
        check!(clock.advance(20 * MS) == 3);
        check!(*log.borrow() == vec!["a", "b", "c"]);
        check!(clock.now() == 20 * MS);
    }

    #[test]
    fn test_cancel_removes_timer() {
        let clock = ManualScheduler::new();
        let ran = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&ran);
        let handle = clock.schedule(MS, Box::new(move || *flag.borrow_mut() = true));
        clock.cancel(handle);
        check!(clock.pending() == 0);
        check!(clock.advance(10 * MS) == 0);
        check!(!*ran.borrow());
        // Cancelling twice is harmless.
        clock.cancel(handle);
    }

    #[test]
    fn test_task_can_reschedule() {
        let clock = ManualScheduler::new();
        let count = Rc::new(RefCell::new(0));
        let inner_clock = clock.clone();
        let inner_count = Rc::clone(&count);
        clock.schedule(
            5 * MS,
            Box::new(move || {
                *inner_count.borrow_mut() += 1;
                let c = Rc::clone(&inner_count);
                inner_clock.schedule(5 * MS, Box::new(move || *c.borrow_mut() += 1));
            }),
        );
        check!(clock.advance(7 * MS) == 1);
        check!(clock.pending() == 1);
        check!(clock.run_until_idle() == 1);
        check!(*count.borrow() == 2);
        check!(clock.now() == 10 * MS);
    }
}
