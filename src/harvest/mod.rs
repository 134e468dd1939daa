//! Harvest module for news page fetching and extraction
//!
//! This module contains the core fetch logic, including:
//! - The shared work source workers claim targets from
//! - HTTP fetching with strict response validation
//! - HTML extraction of news items
//! - The bounded worker pool and its lifecycle hooks

mod extract;
mod pool;
mod transport;
mod work_source;

pub use extract::{extract_news, NewsItem};
pub use pool::{BeginHook, DoneHook, FetchHooks, FetchOutcome, NewsFetcher, PoolHandle, ResultHook};
pub use transport::{FetchedPage, TransportClient};
pub use work_source::{FetchTarget, WorkSource};
