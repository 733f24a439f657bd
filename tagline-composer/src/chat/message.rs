use serde::{Deserialize, Serialize};
use tagline_engine::Token;

/// A persisted chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub tokens: Vec<Token>,
    pub sender_id: String,
    pub room_id: String,
    /// Unix time in milliseconds
    pub created_at: u64,
}

/// A message on its way to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub tokens: Vec<Token>,
    pub sender_id: String,
    pub room_id: String,
}
