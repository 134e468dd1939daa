//! Cross-thread dispatch queue
//!
//! Background workers must never touch consumer-owned state directly. They
//! push closures through a [`Dispatcher`]; the single [`DispatchLoop`] drains
//! them on its own thread at a fixed cadence and runs each one with
//! exclusive access to the consumer state. A `Shutdown` message closes the
//! queue for good; later pushes are silently dropped.

mod queue;

pub use queue::{channel, Callback, DispatchLoop, DispatchMessage, Dispatcher, LoopStatus, Teardown};
