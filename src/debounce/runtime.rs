//! Scheduler backed by the tokio timer.

use super::{Scheduler, Task};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Runs tasks on the current thread's [`tokio::task::LocalSet`].
///
/// Tasks are `!Send`, so scheduling must happen from inside a `LocalSet`
/// (`LocalSet::run_until` or `LocalSet::block_on`); `spawn_local` panics otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    type Handle = JoinHandle<()>;

    fn schedule(&self, delay: Duration, task: Task) -> JoinHandle<()> {
        tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            task();
        })
    }

    fn cancel(&self, handle: JoinHandle<()>) {
        // Tasks run to completion without yielding once the sleep ends,
        // so an abort can never interrupt one halfway.
        handle.abort();
    }
}
