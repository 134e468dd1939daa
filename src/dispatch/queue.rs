use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Work scheduled onto the consumer thread
pub type Callback<S> = Box<dyn FnOnce(&mut S) + Send>;

/// Hook run once on the consumer thread when shutdown is processed
pub type Teardown<S> = Box<dyn FnOnce(&mut S) + Send>;

/// Message carried by the dispatch queue
pub enum DispatchMessage<S> {
    /// Run this closure against the consumer state
    Callback(Callback<S>),
    /// Stop the consumer loop for good
    Shutdown,
}

/// Outcome of one polling step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    /// Queue drained; poll again later
    Continue,
    /// Shutdown processed; never poll again
    Closed,
}

/// Creates a connected producer handle and consumer loop
///
/// # Example
///
/// ```
/// use news_harvest::dispatch::{channel, LoopStatus};
/// use std::time::Duration;
///
/// let (dispatcher, mut dispatch_loop) = channel::<Vec<u32>>(Duration::from_millis(100));
/// let producer = dispatcher.clone();
/// std::thread::spawn(move || producer.push(|seen| seen.push(7)))
///     .join()
///     .unwrap();
///
/// let mut seen = Vec::new();
/// assert_eq!(dispatch_loop.poll(&mut seen), LoopStatus::Continue);
/// assert_eq!(seen, vec![7]);
/// ```
pub fn channel<S>(poll_interval: Duration) -> (Dispatcher<S>, DispatchLoop<S>) {
    let (sender, receiver) = mpsc::channel();
    let closed = Arc::new(AtomicBool::new(false));

    let dispatcher = Dispatcher {
        sender,
        closed: Arc::clone(&closed),
    };
    let dispatch_loop = DispatchLoop {
        receiver,
        closed,
        poll_interval,
        teardown: None,
        shut_down: false,
    };

    (dispatcher, dispatch_loop)
}

/// Producer side of the dispatch queue; usable from any thread
pub struct Dispatcher<S> {
    sender: Sender<DispatchMessage<S>>,
    closed: Arc<AtomicBool>,
}

impl<S> Clone for Dispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            closed: Arc::clone(&self.closed),
        }
    }
}

impl<S: 'static> Dispatcher<S> {
    /// Schedules `callback` to run on the consumer thread
    ///
    /// Silently dropped once the queue is closed.
    pub fn push<F>(&self, callback: F)
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        self.send(DispatchMessage::Callback(Box::new(callback)));
    }

    /// Asks the consumer loop to shut down
    pub fn push_shutdown(&self) {
        self.send(DispatchMessage::Shutdown);
    }

    /// Returns true once the consumer loop has processed shutdown
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Runs `task` on a detached thread and delivers its result back
    ///
    /// `callback` receives `Err` with the panic payload if `task` panicked.
    pub fn spawn_background<T, W, C>(&self, task: W, callback: C)
    where
        T: Send + 'static,
        W: FnOnce() -> T + Send + 'static,
        C: FnOnce(&mut S, thread::Result<T>) + Send + 'static,
    {
        let dispatcher = self.clone();
        thread::spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(task));
            dispatcher.push(move |state| callback(state, result));
        });
    }

    fn send(&self, message: DispatchMessage<S>) {
        if self.is_closed() {
            return;
        }
        // The loop is gone only after shutdown, so a failed send is a no-op too
        let _ = self.sender.send(message);
    }
}

/// Consumer side of the dispatch queue
///
/// Owned by one thread. Callbacks run with exclusive access to the
/// consumer state passed to [`DispatchLoop::poll`] or [`DispatchLoop::run`].
pub struct DispatchLoop<S> {
    receiver: Receiver<DispatchMessage<S>>,
    closed: Arc<AtomicBool>,
    poll_interval: Duration,
    teardown: Option<Teardown<S>>,
    shut_down: bool,
}

impl<S> DispatchLoop<S> {
    /// Sets a hook that runs once when shutdown is processed
    pub fn with_teardown<F>(mut self, teardown: F) -> Self
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        self.teardown = Some(Box::new(teardown));
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn is_closed(&self) -> bool {
        self.shut_down
    }

    /// Drains every queued message, running callbacks against `state`
    ///
    /// On `Shutdown` the queue is closed, the teardown hook runs and any
    /// messages still queued behind it are discarded unexecuted.
    pub fn poll(&mut self, state: &mut S) -> LoopStatus {
        if self.shut_down {
            return LoopStatus::Closed;
        }

        loop {
            match self.receiver.try_recv() {
                Ok(DispatchMessage::Callback(callback)) => callback(state),
                Ok(DispatchMessage::Shutdown) => {
                    self.close(state);
                    return LoopStatus::Closed;
                }
                Err(TryRecvError::Empty) => return LoopStatus::Continue,
                Err(TryRecvError::Disconnected) => {
                    tracing::debug!("All dispatchers dropped, closing dispatch loop");
                    self.close(state);
                    return LoopStatus::Closed;
                }
            }
        }
    }

    /// Polls on a fixed cadence until shutdown, then hands `state` back
    pub async fn run(mut self, mut state: S) -> S {
        loop {
            tokio::time::sleep(self.poll_interval).await;
            if self.poll(&mut state) == LoopStatus::Closed {
                return state;
            }
        }
    }

    fn close(&mut self, state: &mut S) {
        self.shut_down = true;
        self.closed.store(true, Ordering::Release);
        // Discard anything queued behind the shutdown marker
        while self.receiver.try_recv().is_ok() {}
        if let Some(teardown) = self.teardown.take() {
            teardown(state);
        }
    }
}
