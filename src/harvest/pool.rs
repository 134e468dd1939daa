//! Worker pool - fetch cycle orchestration
//!
//! A fetch cycle spawns N workers over one shared [`WorkSource`]. Each worker
//! loops claim → validate → fetch → extract → report until the source runs
//! dry. A watcher task waits for every worker and then fires `on_done`
//! exactly once.
//!
//! Hooks run inline on the worker's task. They may run concurrently with
//! each other, so hooks touching shared state must synchronize it themselves
//! or forward through a [`crate::dispatch::Dispatcher`].

use crate::config::Config;
use crate::harvest::extract::{extract_news, NewsItem};
use crate::harvest::transport::TransportClient;
use crate::harvest::work_source::{FetchTarget, WorkSource};
use crate::state::WorkerState;
use crate::url::ServiceMatcher;
use crate::{FetchError, FetchResult};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// Called when a worker starts on a target
pub type BeginHook = Arc<dyn Fn(&FetchTarget) + Send + Sync>;

/// Called once per claimed target with its outcome
pub type ResultHook = Arc<dyn Fn(FetchOutcome) + Send + Sync>;

/// Called once after every worker has exited
pub type DoneHook = Box<dyn FnOnce() + Send>;

/// Result of one fetch+extract attempt
///
/// Either the extracted items (possibly none) or the error, never both.
#[derive(Debug)]
pub struct FetchOutcome {
    pub target: FetchTarget,
    pub result: FetchResult<Vec<NewsItem>>,
}

impl FetchOutcome {
    pub fn id(&self) -> usize {
        self.target.id
    }

    pub fn url(&self) -> &str {
        &self.target.url
    }

    /// Extracted items, or `None` if the attempt failed
    pub fn items(&self) -> Option<&[NewsItem]> {
        self.result.as_deref().ok()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.result.as_ref().err()
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Optional lifecycle callbacks for a fetch cycle
#[derive(Default)]
pub struct FetchHooks {
    on_begin: Option<BeginHook>,
    on_result: Option<ResultHook>,
    on_done: Option<DoneHook>,
}

impl FetchHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_begin<F>(mut self, hook: F) -> Self
    where
        F: Fn(&FetchTarget) + Send + Sync + 'static,
    {
        self.on_begin = Some(Arc::new(hook));
        self
    }

    pub fn on_result<F>(mut self, hook: F) -> Self
    where
        F: Fn(FetchOutcome) + Send + Sync + 'static,
    {
        self.on_result = Some(Arc::new(hook));
        self
    }

    pub fn on_done<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_done = Some(Box::new(hook));
        self
    }
}

/// Handle to a running fetch cycle
pub struct PoolHandle {
    watcher: JoinHandle<()>,
}

impl PoolHandle {
    /// Waits until `on_done` has returned
    pub async fn wait(self) {
        if let Err(e) = self.watcher.await {
            tracing::error!("Completion watcher failed: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.watcher.is_finished()
    }
}

struct FetcherInner {
    transport: TransportClient,
    services: ServiceMatcher,
}

/// Fetches news pages and extracts their items
///
/// Cheap to clone; clones share the transport and service allow-list.
#[derive(Clone)]
pub struct NewsFetcher {
    inner: Arc<FetcherInner>,
}

impl NewsFetcher {
    pub fn new(transport: TransportClient, services: ServiceMatcher) -> Self {
        Self {
            inner: Arc::new(FetcherInner {
                transport,
                services,
            }),
        }
    }

    /// Builds a fetcher from the `[fetch]` and `[services]` sections
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let transport = TransportClient::new(&config.fetch)?;
        let services = ServiceMatcher::new(&config.services.allowed)?;
        Ok(Self::new(transport, services))
    }

    /// Runs one validate → fetch → extract attempt for a single URL
    pub async fn fetch_news(&self, url: &str) -> FetchResult<Vec<NewsItem>> {
        let mut state = WorkerState::Claimed;
        self.attempt(0, url, &mut state).await
    }

    /// Starts a fetch cycle over `targets` with `concurrency` workers
    ///
    /// Returns immediately; progress is reported through `hooks`. A
    /// concurrency of 0 is treated as 1.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn run(&self, concurrency: usize, targets: Vec<String>, hooks: FetchHooks) -> PoolHandle {
        let FetchHooks {
            on_begin,
            on_result,
            on_done,
        } = hooks;

        let source = Arc::new(WorkSource::new(targets));
        let workers = concurrency.max(1);
        let total = source.total();
        let started = Instant::now();

        tracing::info!("Starting fetch cycle: {} targets, {} workers", total, workers);

        let handles: Vec<JoinHandle<WorkerState>> = (0..workers)
            .map(|worker_id| {
                let fetcher = self.clone();
                let source = Arc::clone(&source);
                let on_begin = on_begin.clone();
                let on_result = on_result.clone();
                tokio::spawn(async move {
                    fetcher
                        .worker_loop(worker_id, source, on_begin, on_result)
                        .await
                })
            })
            .collect();

        let watcher = tokio::spawn(async move {
            for (worker_id, handle) in handles.into_iter().enumerate() {
                match handle.await {
                    Ok(state) if state.is_terminal() => {}
                    Ok(state) => tracing::error!("Worker {} stopped in state {}", worker_id, state),
                    Err(e) => tracing::error!("Worker {} exited abnormally: {}", worker_id, e),
                }
            }

            tracing::info!(
                "Fetch cycle completed: {} targets in {:?}",
                total,
                started.elapsed()
            );

            if let Some(on_done) = on_done {
                on_done();
            }
        });

        PoolHandle { watcher }
    }

    async fn worker_loop(
        &self,
        worker_id: usize,
        source: Arc<WorkSource>,
        on_begin: Option<BeginHook>,
        on_result: Option<ResultHook>,
    ) -> WorkerState {
        let mut state = WorkerState::Idle;

        loop {
            advance(worker_id, &mut state, WorkerState::Claiming);
            let target = match source.claim_next() {
                Some(target) => target,
                None => {
                    advance(worker_id, &mut state, WorkerState::Terminated);
                    return state;
                }
            };
            advance(worker_id, &mut state, WorkerState::Claimed);

            tracing::debug!("[{}] begin: {} (worker {})", target.id, target.url, worker_id);
            if let Some(on_begin) = &on_begin {
                on_begin(&target);
            }

            let result = self.attempt(worker_id, &target.url, &mut state).await;
            advance(worker_id, &mut state, WorkerState::Reporting);

            match &result {
                Ok(items) => {
                    tracing::debug!("[{}] {} items from {}", target.id, items.len(), target.url)
                }
                Err(e) if e.is_rejected_upfront() => {
                    tracing::warn!("[{}] rejected: {}", target.id, e)
                }
                Err(e) => tracing::warn!("[{}] failed: {}", target.id, e),
            }

            if let Some(on_result) = &on_result {
                on_result(FetchOutcome { target, result });
            }
            advance(worker_id, &mut state, WorkerState::Idle);
        }
    }

    async fn attempt(
        &self,
        worker_id: usize,
        url: &str,
        state: &mut WorkerState,
    ) -> FetchResult<Vec<NewsItem>> {
        advance(worker_id, state, WorkerState::Validating);
        if !self.inner.services.is_supported(url) {
            return Err(FetchError::UnknownService {
                url: url.to_string(),
            });
        }

        advance(worker_id, state, WorkerState::Fetching);
        let page = self.inner.transport.fetch(url).await?;

        advance(worker_id, state, WorkerState::Extracting);
        Ok(extract_news(&page.body, &page.final_url))
    }
}

fn advance(worker_id: usize, state: &mut WorkerState, next: WorkerState) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal worker transition {} -> {}",
        state,
        next
    );
    tracing::trace!("worker {}: {} -> {}", worker_id, state, next);
    *state = next;
}
