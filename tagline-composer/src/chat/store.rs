use std::collections::HashMap;

use tracing::trace;

use super::message::Message;

/// Client-side room history: room id to messages in arrival order
#[derive(Debug, Default)]
pub struct ChatStore {
    rooms: HashMap<String, Vec<Message>>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a room's history (e.g. after fetching it from the backend)
    pub fn set_room_messages(&mut self, room_id: impl Into<String>, messages: Vec<Message>) {
        self.rooms.insert(room_id.into(), messages);
    }

    /// Append a message to its room unless a message with the same id is present.
    ///
    /// Returns whether the message was appended.
    pub fn add_room_message(&mut self, message: Message) -> bool {
        let messages = self.rooms.entry(message.room_id.clone()).or_default();
        if messages.iter().any(|m| m.id == message.id) {
            trace!("duplicate message {} in room {}", message.id, message.room_id);
            return false;
        }
        messages.push(message);
        true
    }

    /// Messages of a room; empty for unknown rooms
    pub fn messages_for_room(&self, room_id: &str) -> &[Message] {
        self.rooms
            .get(room_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
