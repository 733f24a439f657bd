//! In-memory chat backend
//!
//! Stores suggestion labels, rooms and messages for `tagline-server`. All state
//! lives behind one lock; nothing is persisted across restarts.

use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tagline_composer::{Message, NewMessage};
use tagline_engine::{DEFAULT_SUGGESTION_LIMIT, Suggestion, filter_suggestions};
use thiserror::Error;
use tracing::{debug, info};

/// Room name used when the creator gives none
pub const DEFAULT_ROOM_NAME: &str = "New Room";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("room not found: {0}")]
    RoomNotFound(String),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A chat room and its members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub users: Vec<String>,
    /// Unix time in milliseconds
    pub created_at: u64,
}

#[derive(Debug, Default)]
struct BackendState {
    suggestions: Vec<Suggestion>,
    messages: Vec<Message>,
    rooms: Vec<Room>,
}

#[derive(Debug, Default)]
pub struct ChatBackend {
    state: RwLock<BackendState>,
    next_id: AtomicU64,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

impl ChatBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend seeded with suggestion labels
    pub fn with_suggestions(labels: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        let backend = Self::new();
        for label in labels {
            // Blank labels are skipped
            let _ = backend.add_suggestion(label.as_ref());
        }
        backend
    }

    fn read(&self) -> RwLockReadGuard<'_, BackendState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BackendState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self, prefix: char) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}{}", prefix, id)
    }

    /// Case-insensitive substring search, first ten matches; blank query → none
    pub fn search_suggestions(&self, query: &str) -> Vec<Suggestion> {
        let found = filter_suggestions(&self.read().suggestions, query, DEFAULT_SUGGESTION_LIMIT);
        debug!("suggestions for \"{}\": {}", query, found.len());
        found
    }

    pub fn add_suggestion(&self, label: &str) -> Result<Suggestion, BackendError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(BackendError::MissingField("label"));
        }
        let suggestion = Suggestion::new(self.next_id('s'), label);
        self.write().suggestions.push(suggestion.clone());
        Ok(suggestion)
    }

    /// Seed labels from a text file: one label per line, `#` starts a comment.
    ///
    /// Returns the number of labels added.
    pub fn load_suggestions(&self, path: &Path) -> Result<usize, BackendError> {
        let content = fs::read_to_string(path).map_err(|source| BackendError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut added = 0;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.add_suggestion(line)?;
            added += 1;
        }
        info!("loaded {} suggestions from {}", added, path.display());
        Ok(added)
    }

    /// Persist a message; the returned copy carries its id and timestamp.
    pub fn create_message(&self, new_message: NewMessage) -> Result<Message, BackendError> {
        if new_message.room_id.trim().is_empty() {
            return Err(BackendError::MissingField("roomId"));
        }
        let message = Message {
            id: self.next_id('m'),
            tokens: new_message.tokens,
            sender_id: new_message.sender_id,
            room_id: new_message.room_id,
            created_at: now_millis(),
        };
        self.write().messages.push(message.clone());
        debug!("message {} stored in room {}", message.id, message.room_id);
        Ok(message)
    }

    /// Messages oldest first, for one room or for all rooms
    pub fn list_messages(&self, room_id: Option<&str>) -> Vec<Message> {
        let mut messages: Vec<Message> = self
            .read()
            .messages
            .iter()
            .filter(|m| room_id.is_none_or(|room| m.room_id == room))
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.created_at);
        messages
    }

    pub fn create_room(&self, user_id: &str, name: Option<&str>) -> Room {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_ROOM_NAME);
        let room = Room {
            id: self.next_id('r'),
            name: name.to_string(),
            users: vec![user_id.to_string()],
            created_at: now_millis(),
        };
        self.write().rooms.push(room.clone());
        info!("room {} created by {}", room.id, user_id);
        room
    }

    /// Rooms the user belongs to, newest first
    pub fn rooms_for_user(&self, user_id: &str) -> Result<Vec<Room>, BackendError> {
        if user_id.trim().is_empty() {
            return Err(BackendError::MissingField("userId"));
        }
        let mut rooms: Vec<Room> = self
            .read()
            .rooms
            .iter()
            .rev()
            .filter(|r| r.users.iter().any(|u| u == user_id))
            .cloned()
            .collect();
        rooms.sort_by_key(|r| Reverse(r.created_at));
        Ok(rooms)
    }

    /// Add the user to a room; joining twice is harmless
    pub fn join_room(&self, room_id: &str, user_id: &str) -> Result<Room, BackendError> {
        let mut state = self.write();
        let room = state
            .rooms
            .iter_mut()
            .find(|r| r.id == room_id)
            .ok_or_else(|| BackendError::RoomNotFound(room_id.to_string()))?;
        if !room.users.iter().any(|u| u == user_id) {
            room.users.push(user_id.to_string());
            info!("{} joined room {}", user_id, room_id);
        }
        Ok(room.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tagline_engine::{Token, Trigger};
    use tempfile::NamedTempFile;

    fn new_message(room: &str, text: &str) -> NewMessage {
        NewMessage {
            tokens: tagline_engine::tokenize(text),
            sender_id: "u1".to_string(),
            room_id: room.to_string(),
        }
    }

    #[test]
    fn test_search_suggestions() {
        let backend = ChatBackend::with_suggestions(["Alice", "alan", "bob"]);
        let labels: Vec<_> = backend
            .search_suggestions("AL")
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, vec!["Alice", "alan"]);
        assert!(backend.search_suggestions(" ").is_empty());
    }

    #[test]
    fn test_search_is_capped() {
        let labels: Vec<String> = (0..25).map(|i| format!("user{}", i)).collect();
        let backend = ChatBackend::with_suggestions(&labels);
        assert_eq!(backend.search_suggestions("user").len(), DEFAULT_SUGGESTION_LIMIT);
    }

    #[test]
    fn test_add_suggestion_requires_label() {
        let backend = ChatBackend::new();
        assert!(matches!(
            backend.add_suggestion("  "),
            Err(BackendError::MissingField("label"))
        ));
        let created = backend.add_suggestion("carol").unwrap();
        assert_eq!(created.label, "carol");
        assert!(!created.id.is_empty());
    }

    #[test]
    fn test_load_suggestions() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# team\nalice\n\n  bob  \n# topics\nurgent").unwrap();
        let backend = ChatBackend::new();
        assert_eq!(backend.load_suggestions(file.path()).unwrap(), 3);
        assert_eq!(backend.search_suggestions("bob")[0].label, "bob");
    }

    #[test]
    fn test_load_suggestions_missing_file() {
        let backend = ChatBackend::new();
        let err = backend
            .load_suggestions(Path::new("/nonexistent/labels.txt"))
            .unwrap_err();
        assert!(matches!(err, BackendError::Io { .. }));
    }

    #[test]
    fn test_create_message() {
        let backend = ChatBackend::new();
        let message = backend.create_message(new_message("r1", "hi @bob")).unwrap();
        assert!(message.id.starts_with('m'));
        assert_eq!(
            message.tokens,
            vec![Token::text("hi "), Token::tag(Trigger::At, "bob")]
        );
        assert!(matches!(
            backend.create_message(new_message("", "hi")),
            Err(BackendError::MissingField("roomId"))
        ));
    }

    #[test]
    fn test_list_messages_by_room() {
        let backend = ChatBackend::new();
        backend.create_message(new_message("r1", "one")).unwrap();
        backend.create_message(new_message("r2", "two")).unwrap();
        backend.create_message(new_message("r1", "three")).unwrap();

        let r1: Vec<_> = backend
            .list_messages(Some("r1"))
            .into_iter()
            .map(|m| m.tokens[0].to_string())
            .collect();
        assert_eq!(r1, vec!["one ", "three "]);
        assert_eq!(backend.list_messages(None).len(), 3);
        assert!(backend.list_messages(Some("r9")).is_empty());
    }

    #[test]
    fn test_rooms() {
        let backend = ChatBackend::new();
        let first = backend.create_room("ann", None);
        let second = backend.create_room("ann", Some("ops"));
        backend.create_room("ben", Some("other"));
        assert_eq!(first.name, DEFAULT_ROOM_NAME);
        assert_eq!(first.users, vec!["ann"]);

        let ids: Vec<_> = backend
            .rooms_for_user("ann")
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert!(matches!(
            backend.rooms_for_user(""),
            Err(BackendError::MissingField("userId"))
        ));
    }

    #[test]
    fn test_join_room() {
        let backend = ChatBackend::new();
        let room = backend.create_room("ann", None);
        let joined = backend.join_room(&room.id, "ben").unwrap();
        assert_eq!(joined.users, vec!["ann", "ben"]);
        // Idempotent
        let again = backend.join_room(&room.id, "ben").unwrap();
        assert_eq!(again.users, vec!["ann", "ben"]);
        assert_eq!(backend.rooms_for_user("ben").unwrap().len(), 1);

        assert!(matches!(
            backend.join_room("nope", "ben"),
            Err(BackendError::RoomNotFound(_))
        ));
    }
}
