//! Interactive news board controller
//!
//! `NewsBoard` is the consumer-side state of an interactive front end. It
//! lives on the dispatch loop's thread; worker results reach it only as
//! closures pushed through its [`Dispatcher`]. Each reload starts a new
//! session, and callbacks tagged with any other session are ignored.

use crate::dispatch::Dispatcher;
use crate::harvest::{FetchHooks, FetchOutcome, NewsFetcher, PoolHandle};
use crate::output::{format_result_lines, FetchStats, LineFormat};
use crate::BoardError;
use std::fmt;

/// Identifier of one fetch cycle started by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the board's status line shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardStatus {
    Ready,
    Working,
    Done,
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ready => "Ready",
            Self::Working => "Working",
            Self::Done => "Done",
        };
        write!(f, "Status: {}", label)
    }
}

pub struct NewsBoard {
    fetcher: NewsFetcher,
    dispatcher: Dispatcher<NewsBoard>,
    targets: Vec<String>,
    concurrency: usize,
    format: LineFormat,
    lines: Vec<String>,
    active: Option<SessionId>,
    pool: Option<PoolHandle>,
    last_session: u64,
    status: BoardStatus,
    stats: FetchStats,
}

impl NewsBoard {
    pub fn new(
        fetcher: NewsFetcher,
        dispatcher: Dispatcher<NewsBoard>,
        targets: Vec<String>,
        concurrency: usize,
    ) -> Self {
        Self {
            fetcher,
            dispatcher,
            targets,
            concurrency,
            format: LineFormat::titles_only(),
            lines: Vec::new(),
            active: None,
            pool: None,
            last_session: 0,
            status: BoardStatus::Ready,
            stats: FetchStats::default(),
        }
    }

    /// Clears the board and starts a full fetch cycle
    ///
    /// Results and completion are routed back through the dispatch queue.
    /// The URL display setting is captured at this point for the whole cycle.
    ///
    /// # Errors
    ///
    /// `BoardError::Busy` while a previous cycle is still running.
    pub fn reload(&mut self) -> Result<SessionId, BoardError> {
        self.ensure_idle()?;

        self.last_session += 1;
        let session = SessionId(self.last_session);
        self.active = Some(session);
        self.status = BoardStatus::Working;
        self.lines.clear();
        self.stats = FetchStats::default();

        tracing::info!("Board session {} started", session);

        let format = self.format.clone();
        let on_result = self.dispatcher.clone();
        let on_done = self.dispatcher.clone();
        let hooks = FetchHooks::new()
            .on_result(move |outcome| {
                let format = format.clone();
                on_result.push(move |board: &mut NewsBoard| {
                    board.apply_result(session, &format, outcome)
                });
            })
            .on_done(move || {
                on_done.push(move |board: &mut NewsBoard| board.finish(session));
            });

        // Completion arrives as a queued callback; the handle is kept for shutdown
        self.pool = Some(
            self.fetcher
                .run(self.concurrency, self.targets.clone(), hooks),
        );

        Ok(session)
    }

    /// Returns the displayed text for the clipboard
    pub fn copy(&self) -> Result<String, BoardError> {
        self.ensure_idle()?;
        Ok(self.text().trim_end().to_string())
    }

    /// Requests shutdown of the dispatch loop
    ///
    /// The last cycle's [`PoolHandle`] stays on the board; take it with
    /// [`NewsBoard::take_pool`] to wait for its workers after the loop ends.
    pub fn close(&self) -> Result<(), BoardError> {
        self.ensure_idle()?;
        if !self.is_pool_finished() {
            tracing::debug!("Closing while the last pool is still winding down");
        }
        self.dispatcher.push_shutdown();
        Ok(())
    }

    /// Returns true once the most recent cycle's pool has fully exited
    pub fn is_pool_finished(&self) -> bool {
        self.pool.as_ref().map_or(true, PoolHandle::is_finished)
    }

    /// Hands out the most recent cycle's pool handle
    pub fn take_pool(&mut self) -> Option<PoolHandle> {
        self.pool.take()
    }

    /// Toggles URLs next to titles for the next reload
    pub fn set_show_url(&mut self, show_url: bool) -> Result<(), BoardError> {
        self.ensure_idle()?;
        self.format.show_url = show_url;
        Ok(())
    }

    pub fn show_url(&self) -> bool {
        self.format.show_url
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn status(&self) -> BoardStatus {
        self.status
    }

    pub fn stats(&self) -> FetchStats {
        self.stats
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Displayed text, one line per item, each ending in `\n`
    pub fn text(&self) -> String {
        self.lines.iter().map(|line| format!("{}\n", line)).collect()
    }

    fn ensure_idle(&self) -> Result<(), BoardError> {
        if self.is_busy() {
            return Err(BoardError::Busy);
        }
        Ok(())
    }

    fn apply_result(&mut self, session: SessionId, format: &LineFormat, outcome: FetchOutcome) {
        if self.active != Some(session) {
            tracing::debug!("Ignoring result {} from stale session {}", outcome.id(), session);
            return;
        }

        self.stats.record(&outcome);
        if let Some(items) = outcome.items() {
            self.lines.extend(format_result_lines(items, format));
        }
    }

    fn finish(&mut self, session: SessionId) {
        if self.active != Some(session) {
            tracing::debug!("Ignoring completion of stale session {}", session);
            return;
        }

        self.active = None;
        self.status = BoardStatus::Done;
        tracing::info!("Board session {} done: {}", session, self.stats);
    }
}
