//! Shared cursor over the targets of one fetch cycle
//!
//! Workers pull from the source until it runs dry. The guard is held only
//! while one pair is taken off the iterator, never across I/O.

use std::iter::Enumerate;
use std::sync::{Mutex, PoisonError};
use std::vec::IntoIter;

/// One URL scheduled for fetching, paired with its input position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchTarget {
    /// 0-based position in the input sequence
    pub id: usize,

    /// The URL to fetch
    pub url: String,
}

/// Lock-protected cursor handing each target to exactly one worker
#[derive(Debug)]
pub struct WorkSource {
    cursor: Mutex<Enumerate<IntoIter<String>>>,
    total: usize,
}

impl WorkSource {
    /// Creates a source over `urls`; ids follow input order
    pub fn new(urls: Vec<String>) -> Self {
        let total = urls.len();
        Self {
            cursor: Mutex::new(urls.into_iter().enumerate()),
            total,
        }
    }

    /// Claims the next unprocessed target
    ///
    /// Returns `None` once every target has been handed out. Safe to call
    /// from any number of workers at once; no target is returned twice.
    pub fn claim_next(&self) -> Option<FetchTarget> {
        // A worker that panicked mid-claim cannot leave the iterator torn,
        // so a poisoned guard is still usable.
        let mut cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        cursor.next().map(|(id, url)| FetchTarget { id, url })
    }

    /// Number of targets the source was created with
    pub fn total(&self) -> usize {
        self.total
    }
}
