//! Trailing-edge debouncer for filter controls

use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;

// ============================================================================
// STRATEGY PATTERN: Scheduler
// ============================================================================

/// Strategy trait for delayed execution.
///
/// Dropping the returned handle must cancel the task if it has not run.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Browser `setTimeout` scheduler
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

// ============================================================================
// DEBOUNCER
// ============================================================================

struct DebounceInner<A, S: Scheduler> {
    callback: Rc<dyn Fn(A)>,
    delay_ms: u32,
    scheduler: S,
    pending: RefCell<Option<S::Handle>>,
}

/// Runs the callback once, `delay_ms` after the last call, with that
/// call's arguments. Every call restarts the timer.
pub struct Debouncer<A, S: Scheduler = TimeoutScheduler> {
    inner: Rc<DebounceInner<A, S>>,
}

impl<A: 'static> Debouncer<A, TimeoutScheduler> {
    pub fn new(delay_ms: u32, callback: impl Fn(A) + 'static) -> Self {
        Self::with_scheduler(delay_ms, TimeoutScheduler, callback)
    }
}

impl<A: 'static, S: Scheduler> Debouncer<A, S> {
    pub fn with_scheduler(delay_ms: u32, scheduler: S, callback: impl Fn(A) + 'static) -> Self {
        Self {
            inner: Rc::new(DebounceInner {
                callback: Rc::new(callback),
                delay_ms,
                scheduler,
                pending: RefCell::new(None),
            }),
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.inner.delay_ms
    }

    pub fn call(&self, args: A) {
        // the previous timer must be cleared before a new one is armed
        self.cancel();

        let callback = Rc::clone(&self.inner.callback);
        let handle = self
            .inner
            .scheduler
            .schedule(self.inner.delay_ms, Box::new(move || callback(args)));
        *self.inner.pending.borrow_mut() = Some(handle);
    }

    /// Cancel the pending invocation, if any
    pub fn cancel(&self) {
        let previous = self.inner.pending.borrow_mut().take();
        drop(previous);
    }
}

impl<A, S: Scheduler> Clone for Debouncer<A, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}
