//! Debounced suggestion fetcher
//!
//! A tokio worker receives [`FetchRequest`]s from the composer, waits for the
//! keyword to settle for the debounce window, then looks the last keyword up
//! in a [`SuggestionSource`]. Each lookup runs in its own task and its outcome
//! carries the request's generation back to the composer, which drops any
//! outcome that is no longer current. In-flight lookups are never aborted.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tagline_engine::{DEFAULT_SUGGESTION_LIMIT, Suggestion, filter_suggestions};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

pub use crate::core::composer::FetchRequest;

/// Default quiet period before a keyword is looked up
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Lookup failures; the composer shows an empty list for them
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("suggestion request failed: {0}")]
    Transport(String),
    #[error("invalid suggestion response: {0}")]
    Decode(String),
}

/// Store of mentionable labels
pub trait SuggestionSource: Send + Sync + 'static {
    /// Matches for `query`, already truncated by the store.
    fn lookup(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Suggestion>, LookupError>> + Send;
}

/// Result of one lookup, stamped with the generation of its request
#[derive(Debug)]
pub struct FetchOutcome {
    pub keyword: String,
    pub generation: u64,
    pub result: Result<Vec<Suggestion>, LookupError>,
}

/// Handle to the debounce worker. Dropping it stops the worker.
pub struct SuggestionFetcher {
    requests: mpsc::UnboundedSender<FetchRequest>,
    worker: JoinHandle<()>,
}

impl SuggestionFetcher {
    /// Spawn the worker on the current tokio runtime.
    pub fn spawn<S: SuggestionSource>(
        source: Arc<S>,
        debounce: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<FetchOutcome>) {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(debounce_worker(source, debounce, request_rx, outcome_tx));
        (
            Self {
                requests: request_tx,
                worker,
            },
            outcome_rx,
        )
    }

    /// Queue a request; it replaces any request still inside the debounce window.
    pub fn request(&self, request: FetchRequest) {
        if self.requests.send(request).is_err() {
            warn!("suggestion worker has stopped, request dropped");
        }
    }
}

impl Drop for SuggestionFetcher {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

async fn debounce_worker<S: SuggestionSource>(
    source: Arc<S>,
    debounce: Duration,
    mut requests: mpsc::UnboundedReceiver<FetchRequest>,
    outcomes: mpsc::UnboundedSender<FetchOutcome>,
) {
    while let Some(mut latest) = requests.recv().await {
        // Every newer request restarts the window
        loop {
            tokio::select! {
                next = requests.recv() => match next {
                    Some(request) => {
                        trace!("debounce: \"{}\" replaces \"{}\"", request.keyword, latest.keyword);
                        latest = request;
                    }
                    None => return,
                },
                () = tokio::time::sleep(debounce) => break,
            }
        }
        dispatch(&source, latest, &outcomes);
    }
}

fn dispatch<S: SuggestionSource>(
    source: &Arc<S>,
    request: FetchRequest,
    outcomes: &mpsc::UnboundedSender<FetchOutcome>,
) {
    let FetchRequest {
        keyword,
        generation,
    } = request;

    // A bare trigger has nothing to search for
    if keyword.is_empty() {
        let _ = outcomes.send(FetchOutcome {
            keyword,
            generation,
            result: Ok(Vec::new()),
        });
        return;
    }

    debug!("lookup \"{}\" (generation {})", keyword, generation);
    let source = Arc::clone(source);
    let outcomes = outcomes.clone();
    tokio::spawn(async move {
        let result = source.lookup(&keyword).await;
        // Receiver gone means the session ended
        let _ = outcomes.send(FetchOutcome {
            keyword,
            generation,
            result,
        });
    });
}

/// In-process suggestion store with the same matching rule as the backend.
///
/// Records every query it receives. Individual queries can be delayed, and
/// the whole source can be made to fail.
#[derive(Debug, Default)]
pub struct MemorySource {
    suggestions: Vec<Suggestion>,
    delays: HashMap<String, Duration>,
    failing: bool,
    queries: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new(suggestions: Vec<Suggestion>) -> Self {
        Self {
            suggestions,
            ..Self::default()
        }
    }

    /// Store whose ids are the labels themselves
    pub fn from_labels(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::new(
            labels
                .into_iter()
                .map(|label| {
                    let label = label.into();
                    Suggestion::new(label.clone(), label)
                })
                .collect(),
        )
    }

    /// Answer `query` only after `delay`
    pub fn with_delay(mut self, query: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(query.into(), delay);
        self
    }

    /// Fail every lookup
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Queries received so far, in order
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SuggestionSource for MemorySource {
    fn lookup(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Suggestion>, LookupError>> + Send {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.to_string());
        let delay = self.delays.get(query).copied();
        let result = if self.failing {
            Err(LookupError::Transport("store unavailable".to_string()))
        } else {
            Ok(filter_suggestions(
                &self.suggestions,
                query,
                DEFAULT_SUGGESTION_LIMIT,
            ))
        };
        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        }
    }
}
