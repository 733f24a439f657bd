use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;
use tracing::trace;

use super::message::Message;

/// Messages buffered per room before slow subscribers start lagging
pub const ROOM_CHANNEL_CAPACITY: usize = 64;

/// One-way, best-effort delivery of a message to every member of its room
pub trait RoomChannel: Send + Sync {
    fn broadcast(&self, message: &Message);
}

impl<T: RoomChannel> RoomChannel for Arc<T> {
    fn broadcast(&self, message: &Message) {
        (**self).broadcast(message);
    }
}

/// In-process room channels: one tokio broadcast channel per room.
///
/// Cloning shares the channels.
#[derive(Debug, Clone, Default)]
pub struct RoomHub {
    rooms: Arc<Mutex<HashMap<String, broadcast::Sender<Message>>>>,
}

impl RoomHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive every message broadcast to `room_id` from now on
    pub fn subscribe(&self, room_id: &str) -> broadcast::Receiver<Message> {
        let mut rooms = self.rooms.lock().unwrap_or_else(PoisonError::into_inner);
        rooms
            .entry(room_id.to_string())
            .or_insert_with(|| broadcast::channel(ROOM_CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Number of live subscribers of a room
    pub fn subscriber_count(&self, room_id: &str) -> usize {
        let rooms = self.rooms.lock().unwrap_or_else(PoisonError::into_inner);
        rooms.get(room_id).map_or(0, broadcast::Sender::receiver_count)
    }
}

impl RoomChannel for RoomHub {
    fn broadcast(&self, message: &Message) {
        let rooms = self.rooms.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = rooms.get(&message.room_id) else {
            trace!("no subscribers for room {}", message.room_id);
            return;
        };
        // Err only means nobody is listening right now
        if let Ok(count) = sender.send(message.clone()) {
            trace!("message {} sent to {} subscribers", message.id, count);
        }
    }
}
