use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use super::message::{Message, NewMessage};

/// Errors from the send path; the composer keeps its buffer when one occurs
#[derive(Debug, Error)]
pub enum SendError {
    #[error("message rejected: {0}")]
    Rejected(String),
    #[error("message delivery failed: {0}")]
    Transport(String),
    #[error("invalid send response: {0}")]
    Decode(String),
}

/// Persists a message and returns the stored copy
pub trait MessageSender: Send + Sync {
    fn send(&self, message: NewMessage) -> impl Future<Output = Result<Message, SendError>> + Send;
}

impl<T: MessageSender> MessageSender for Arc<T> {
    fn send(&self, message: NewMessage) -> impl Future<Output = Result<Message, SendError>> + Send {
        (**self).send(message)
    }
}
