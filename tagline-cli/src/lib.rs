//! tagline-cli: chat backend, HTTP client and command-line tools
//!
//! - [`backend`]: in-memory store of suggestions, rooms and messages
//! - [`routes`]: axum HTTP/WebSocket surface over the backend
//! - [`http`]: `ureq` client implementing the composer's collaborators

pub mod backend;
pub mod http;
pub mod routes;

pub use backend::{BackendError, ChatBackend, Room};
pub use http::HttpClient;
pub use routes::{AppState, router};
