//! HTTP client for a running `tagline-server`
//!
//! Implements the composer's suggestion and send collaborators with blocking
//! `ureq` calls, each moved onto tokio's blocking pool.

use std::future::Future;

use tagline_composer::fetch::{LookupError, SuggestionSource};
use tagline_composer::{Message, MessageSender, NewMessage, SendError};
use tagline_engine::Suggestion;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /api/suggestions?search=<query>` (blocking)
    pub fn search_blocking(&self, query: &str) -> Result<Vec<Suggestion>, LookupError> {
        let url = self.url("/api/suggestions");
        debug!("GET {} search={}", url, query);
        let body = ureq::get(&url)
            .query("search", query)
            .call()
            .map_err(|e| LookupError::Transport(format!("{url}: {e}")))?
            .into_body()
            .read_to_string()
            .map_err(|e| LookupError::Transport(format!("{url}: {e}")))?;
        serde_json::from_str(&body).map_err(|e| LookupError::Decode(e.to_string()))
    }

    /// `POST /api/messages` (blocking)
    pub fn send_blocking(&self, message: &NewMessage) -> Result<Message, SendError> {
        let url = self.url("/api/messages");
        debug!("POST {} room={}", url, message.room_id);
        let body = ureq::post(&url)
            .send_json(message)
            .map_err(|e| match e {
                ureq::Error::StatusCode(status) if (400..500).contains(&status) => {
                    SendError::Rejected(format!("{url}: HTTP {status}"))
                }
                e => SendError::Transport(format!("{url}: {e}")),
            })?
            .into_body()
            .read_to_string()
            .map_err(|e| SendError::Transport(format!("{url}: {e}")))?;
        serde_json::from_str(&body).map_err(|e| SendError::Decode(e.to_string()))
    }
}

impl SuggestionSource for HttpClient {
    fn lookup(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Suggestion>, LookupError>> + Send {
        let client = self.clone();
        let query = query.to_string();
        async move {
            tokio::task::spawn_blocking(move || client.search_blocking(&query))
                .await
                .map_err(|e| LookupError::Transport(e.to_string()))?
        }
    }
}

impl MessageSender for HttpClient {
    fn send(&self, message: NewMessage) -> impl Future<Output = Result<Message, SendError>> + Send {
        let client = self.clone();
        async move {
            tokio::task::spawn_blocking(move || client.send_blocking(&message))
                .await
                .map_err(|e| SendError::Transport(e.to_string()))?
        }
    }
}
