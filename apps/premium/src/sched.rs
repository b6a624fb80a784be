#![allow(dead_code)]

//! Cancellable timer scheduling.
//!
//! Reveal delays, auto-hide timers, and countdown ticks are all scheduled
//! through this seam so the presenter logic can be unit-tested against a
//! manually advanced clock. Handles cancel on drop; acting on stale state
//! after teardown is a bug this module exists to prevent.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[cfg(test)]
use std::sync::Mutex;

pub trait Scheduler: Send + Sync {
    /// Runs `task` once after `delay`, unless the handle is cancelled first.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send>) -> TaskHandle;

    /// Runs `task` every `period`, first fire one period from now, until the
    /// handle is cancelled.
    fn schedule_repeating(&self, period: Duration, task: Box<dyn FnMut() + Send>) -> TaskHandle;
}

/// Cancel handle for a scheduled task. Cancels on drop, so owners that must
/// keep a timer alive hold the handle for as long as the timer may fire.
pub struct TaskHandle {
    cancelled: Arc<AtomicBool>,
    abort: Option<Box<dyn FnOnce() + Send>>,
}

impl TaskHandle {
    pub fn new(cancelled: Arc<AtomicBool>, abort: Option<Box<dyn FnOnce() + Send>>) -> Self {
        TaskHandle { cancelled, abort }
    }

    pub fn cancel(&mut self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            if let Some(abort) = self.abort.take() {
                abort();
            }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// TokioScheduler — production implementation
// ────────────────────────────────────────────────────────────────────────────

/// Scheduler backed by the host's tokio runtime.
pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

impl TokioScheduler {
    /// Must be called from within a tokio runtime.
    pub fn new() -> Self {
        TokioScheduler {
            handle: tokio::runtime::Handle::current(),
        }
    }

    pub fn with_handle(handle: tokio::runtime::Handle) -> Self {
        TokioScheduler { handle }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send>) -> TaskHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if !flag.load(Ordering::SeqCst) {
                task();
            }
        });
        TaskHandle::new(cancelled, Some(Box::new(move || join.abort())))
    }

    fn schedule_repeating(
        &self,
        period: Duration,
        mut task: Box<dyn FnMut() + Send>,
    ) -> TaskHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        let join = self.handle.spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                task();
            }
        });
        TaskHandle::new(cancelled, Some(Box::new(move || join.abort())))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ManualScheduler — deterministic test clock
// ────────────────────────────────────────────────────────────────────────────

/// Test scheduler driven by explicit `advance` calls. Tasks fire in due-time
/// order (ties in scheduling order), exactly as a single-threaded event loop
/// would run them.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualInner>>,
}

#[cfg(test)]
#[derive(Default)]
struct ManualInner {
    now_ms: u64,
    seq: u64,
    tasks: Vec<ManualTask>,
}

#[cfg(test)]
struct ManualTask {
    due_ms: u64,
    period_ms: Option<u64>,
    seq: u64,
    cancelled: Arc<AtomicBool>,
    run: ManualRun,
}

#[cfg(test)]
enum ManualRun {
    Once(Option<Box<dyn FnOnce() + Send>>),
    Repeating(Box<dyn FnMut() + Send>),
}

#[cfg(test)]
impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.inner.lock().unwrap().now_ms
    }

    pub fn pending(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner
            .tasks
            .iter()
            .filter(|t| !t.cancelled.load(Ordering::SeqCst))
            .count()
    }

    /// Advances the clock, firing every due, uncancelled task in order.
    /// Tasks run outside the internal lock so they may schedule or cancel.
    pub fn advance(&self, delta: Duration) {
        let target = self.now_ms() + delta.as_millis() as u64;
        loop {
            let mut due: Option<ManualTask> = None;
            {
                let mut inner = self.inner.lock().unwrap();
                inner.tasks.retain(|t| !t.cancelled.load(Ordering::SeqCst));
                let next = inner
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_ms <= target)
                    .min_by_key(|(_, t)| (t.due_ms, t.seq))
                    .map(|(i, _)| i);
                if let Some(i) = next {
                    let task = inner.tasks.remove(i);
                    inner.now_ms = task.due_ms;
                    due = Some(task);
                } else {
                    inner.now_ms = target;
                }
            }
            let Some(mut task) = due else { break };
            if task.cancelled.load(Ordering::SeqCst) {
                continue;
            }
            match &mut task.run {
                ManualRun::Once(f) => {
                    if let Some(f) = f.take() {
                        f();
                    }
                }
                ManualRun::Repeating(f) => {
                    f();
                    if let Some(period) = task.period_ms {
                        task.due_ms += period;
                        self.inner.lock().unwrap().tasks.push(task);
                    }
                }
            }
        }
    }

    fn push(
        &self,
        delay: Duration,
        period_ms: Option<u64>,
        run: ManualRun,
    ) -> TaskHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut inner = self.inner.lock().unwrap();
        inner.seq += 1;
        let task = ManualTask {
            due_ms: inner.now_ms + delay.as_millis() as u64,
            period_ms,
            seq: inner.seq,
            cancelled: cancelled.clone(),
            run,
        };
        inner.tasks.push(task);
        TaskHandle::new(cancelled, None)
    }
}

#[cfg(test)]
impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send>) -> TaskHandle {
        self.push(delay, None, ManualRun::Once(Some(task)))
    }

    fn schedule_repeating(&self, period: Duration, task: Box<dyn FnMut() + Send>) -> TaskHandle {
        self.push(period, Some(period.as_millis() as u64), ManualRun::Repeating(task))
    }
}
