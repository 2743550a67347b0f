//! Standard runtime services backed by Rust's `std` library.
//!
//! The widget's concurrency model is a single UI-affinity thread plus two
//! background concerns: a periodic timer and per-image fetches. This crate
//! provides those with `std` primitives:
//!
//! - [`UiQueue`]: the UI executor. Background threads post work through a
//!   [`UiQueueHandle`]; the host's main loop calls
//!   [`UiQueue::run_pending`]. Background work with a UI-side completion
//!   goes through [`UiQueue::run_in_background`], which keeps the (not
//!   `Send`) completion on the UI side and ships only the result across
//!   threads.
//! - [`IntervalTimer`]: a timer thread accumulating ticks into an atomic
//!   counter the host drains with [`IntervalTimer::take_ticks`], with an
//!   optional waker for event-loop hosts.
//! - [`ThreadFetcher`]: an [`ImageFetcher`] running a caller-supplied
//!   blocking load function on a worker thread.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use loopview_core::{Clock, DeliverImage, FetchResult, ImageFetcher, ImageLocator};

type UiTask = Box<dyn FnOnce() + Send>;
type Completion = Box<dyn FnOnce(Box<dyn Any + Send>)>;

enum Inbound {
    Task(UiTask),
    Completion { id: u64, payload: Box<dyn Any + Send> },
    /// The worker running background job `id` panicked; no payload will
    /// ever arrive, so its completion must be discarded.
    CompletionAborted { id: u64 },
}

/// Single-threaded UI executor.
///
/// Owned by the UI thread; background threads only ever hold a
/// [`UiQueueHandle`]. Nothing runs until the host drains the queue, so all
/// effects land between frames, never re-entrantly.
pub struct UiQueue {
    sender: Sender<Inbound>,
    receiver: Receiver<Inbound>,
    completions: RefCell<HashMap<u64, Completion>>,
    next_completion: Cell<u64>,
}

impl UiQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            completions: RefCell::new(HashMap::new()),
            next_completion: Cell::new(0),
        }
    }

    /// A cloneable, `Send` handle for posting work from other threads.
    pub fn handle(&self) -> UiQueueHandle {
        UiQueueHandle {
            sender: self.sender.clone(),
        }
    }

    /// Runs everything queued so far on the calling (UI) thread. Returns
    /// the number of tasks executed.
    pub fn run_pending(&self) -> usize {
        let mut executed = 0;
        while let Ok(inbound) = self.receiver.try_recv() {
            match inbound {
                Inbound::Task(task) => task(),
                Inbound::Completion { id, payload } => {
                    // Drop the map borrow before invoking: the completion
                    // may itself call `run_in_background`.
                    let complete = self.completions.borrow_mut().remove(&id);
                    match complete {
                        Some(complete) => complete(payload),
                        None => log::error!("completion {id} arrived with no receiver"),
                    }
                }
                Inbound::CompletionAborted { id } => {
                    self.completions.borrow_mut().remove(&id);
                    log::warn!("background work {id} panicked, completion dropped");
                }
            }
            executed += 1;
        }
        executed
    }

    /// Runs `work` on a worker thread and delivers its result to
    /// `complete` on the UI thread (during a later `run_pending`).
    ///
    /// `complete` never crosses a thread boundary, so it may freely
    /// capture UI-side state.
    pub fn run_in_background<T, W, C>(&self, work: W, complete: C)
    where
        T: Send + 'static,
        W: FnOnce() -> T + Send + 'static,
        C: FnOnce(T) + 'static,
    {
        let id = self.next_completion.get();
        self.next_completion.set(id + 1);
        self.completions.borrow_mut().insert(
            id,
            Box::new(move |payload| match payload.downcast::<T>() {
                Ok(value) => complete(*value),
                Err(_) => log::error!("background completion {id} had an unexpected payload type"),
            }),
        );

        let sender = self.sender.clone();
        thread::spawn(move || {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(work));
            let inbound = match outcome {
                Ok(value) => Inbound::Completion {
                    id,
                    payload: Box::new(value),
                },
                // Tell the UI side to forget the completion, otherwise its
                // map entry would leak for the queue's lifetime.
                Err(_) => Inbound::CompletionAborted { id },
            };
            if sender.send(inbound).is_err() {
                log::debug!("UI queue dropped before background work {id} completed");
            }
        });
    }

    /// Number of background jobs whose completion has not yet run.
    pub fn pending_completions(&self) -> usize {
        self.completions.borrow().len()
    }
}

impl Default for UiQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UiQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiQueue")
            .field("pending_completions", &self.completions.borrow().len())
            .finish()
    }
}

/// `Send` posting side of a [`UiQueue`].
#[derive(Clone)]
pub struct UiQueueHandle {
    sender: Sender<Inbound>,
}

impl UiQueueHandle {
    /// Queues `task` to run on the UI thread.
    pub fn post(&self, task: impl FnOnce() + Send + 'static) {
        if self.sender.send(Inbound::Task(Box::new(task))).is_err() {
            log::debug!("UI queue dropped, task discarded");
        }
    }

    /// Queues `task` after a delay, from a throwaway sleeper thread.
    pub fn post_after(&self, delay: Duration, task: impl FnOnce() + Send + 'static) {
        let handle = self.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            handle.post(task);
        });
    }
}

/// Repeating timer thread.
///
/// Ticks accumulate in an atomic counter; the UI loop drains them with
/// [`take_ticks`](Self::take_ticks) and feeds the widget's countdown. The
/// thread checks the cancellation flag after every sleep, so at most one
/// already-counted tick can trail a [`cancel`](Self::cancel), and a
/// stopped countdown ignores it anyway.
pub struct IntervalTimer {
    ticks: Arc<AtomicU32>,
    cancelled: Arc<AtomicBool>,
    waker: Arc<RwLock<Option<Arc<dyn Fn() + Send + Sync>>>>,
}

impl IntervalTimer {
    /// Spawns the timer thread with the given period.
    pub fn start(period: Duration) -> Self {
        let ticks = Arc::new(AtomicU32::new(0));
        let cancelled = Arc::new(AtomicBool::new(false));
        let waker: Arc<RwLock<Option<Arc<dyn Fn() + Send + Sync>>>> =
            Arc::new(RwLock::new(None));

        let thread_ticks = Arc::clone(&ticks);
        let thread_cancelled = Arc::clone(&cancelled);
        let thread_waker = Arc::clone(&waker);
        thread::spawn(move || loop {
            thread::sleep(period);
            if thread_cancelled.load(Ordering::SeqCst) {
                break;
            }
            thread_ticks.fetch_add(1, Ordering::SeqCst);
            let waker = thread_waker.read().unwrap().clone();
            if let Some(waker) = waker {
                waker();
            }
        });

        Self {
            ticks,
            cancelled,
            waker,
        }
    }

    /// Ticks elapsed since the last call.
    pub fn take_ticks(&self) -> u32 {
        self.ticks.swap(0, Ordering::SeqCst)
    }

    /// Registers a waker invoked from the timer thread on every tick, for
    /// hosts that park their event loop between frames.
    pub fn set_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        *self.waker.write().unwrap() = Some(Arc::new(waker));
    }

    pub fn clear_waker(&self) {
        *self.waker.write().unwrap() = None;
    }

    /// Stops the timer thread after its current sleep.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for IntervalTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalTimer")
            .field("pending_ticks", &self.ticks.load(Ordering::SeqCst))
            .field("cancelled", &self.cancelled.load(Ordering::SeqCst))
            .finish()
    }
}

/// Blocking image load function run on a worker thread.
pub type LoadFn = dyn Fn(&ImageLocator) -> FetchResult + Send + Sync;

/// [`ImageFetcher`] that runs a caller-supplied blocking load on a worker
/// thread and marshals the result back through the [`UiQueue`].
///
/// The load function owns retrieval and decoding; this type only does the
/// thread choreography. No retry, no timeout: a hung load parks its worker
/// thread and the slide keeps its placeholder.
pub struct ThreadFetcher {
    queue: Rc<UiQueue>,
    load: Arc<LoadFn>,
}

impl ThreadFetcher {
    pub fn new(queue: Rc<UiQueue>, load: impl Fn(&ImageLocator) -> FetchResult + Send + Sync + 'static) -> Self {
        Self {
            queue,
            load: Arc::new(load),
        }
    }
}

impl ImageFetcher for ThreadFetcher {
    fn fetch(&self, locator: &ImageLocator, deliver: DeliverImage) {
        let locator = locator.clone();
        let load = Arc::clone(&self.load);
        self.queue
            .run_in_background(move || load(&locator), move |result| deliver(result));
    }
}

/// Clock implementation backed by [`std::time`].
#[derive(Debug, Default, Clone)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Self::Instant) -> u64 {
        since.elapsed().as_millis() as u64
    }
}

impl StdClock {
    /// Returns the elapsed time as a [`Duration`] for convenience.
    pub fn elapsed(&self, since: Instant) -> Duration {
        since.elapsed()
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;
