//! State module for tracking worker progress
//!
//! - `WorkerState`: the per-worker claim/fetch/report cycle

mod worker_state;

pub use worker_state::WorkerState;
