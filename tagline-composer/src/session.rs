//! Composer session
//!
//! Drives a [`Composer`] for one participant of one room: suggestion requests
//! go to the debounced fetcher, lookup outcomes come back through
//! [`ComposerSession::next_suggestions`], and submitted messages are sent,
//! appended to the local room history and broadcast to the room.

use std::sync::{Arc, PoisonError, RwLock};

use tagline_engine::Token;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::chat::{ChatStore, Message, MessageSender, NewMessage, RoomChannel, SendError};
use crate::config::settings::ComposerSettings;
use crate::core::composer::{Composer, ComposerAction, ComposerConfig, ComposerResult};
use crate::core::keycode::KeyEvent;
use crate::fetch::{FetchOutcome, SuggestionFetcher, SuggestionSource};

/// Who is typing, and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub room_id: String,
    pub sender_id: String,
}

impl Participant {
    pub fn new(room_id: impl Into<String>, sender_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            sender_id: sender_id.into(),
        }
    }
}

pub struct ComposerSession<M, C> {
    composer: Composer,
    fetcher: SuggestionFetcher,
    outcomes: mpsc::UnboundedReceiver<FetchOutcome>,
    sender: M,
    channel: C,
    store: Arc<RwLock<ChatStore>>,
    participant: Participant,
}

impl<M: MessageSender, C: RoomChannel> ComposerSession<M, C> {
    /// Start a session. Must be called inside a tokio runtime.
    pub fn new<S: SuggestionSource>(
        settings: &ComposerSettings,
        source: Arc<S>,
        sender: M,
        channel: C,
        store: Arc<RwLock<ChatStore>>,
        participant: Participant,
    ) -> Self {
        let (fetcher, outcomes) = SuggestionFetcher::spawn(source, settings.debounce());
        Self {
            composer: Composer::with_config(ComposerConfig::from(settings)),
            fetcher,
            outcomes,
            sender,
            channel,
            store,
            participant,
        }
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    pub fn store(&self) -> &Arc<RwLock<ChatStore>> {
        &self.store
    }

    /// Process a key event.
    ///
    /// A submit is sent before this returns; on failure the error is returned
    /// and the buffer is kept so the user can retry.
    pub async fn handle_key(&mut self, key: &KeyEvent) -> Result<ComposerResult, SendError> {
        let result = self.composer.process_key(key);
        self.dispatch(result).await
    }

    /// Text changed in a UI-owned input widget
    pub fn handle_change(&mut self, text: &str, caret: usize) -> ComposerResult {
        let result = self.composer.handle_change(text, caret);
        self.request_suggestions(&result);
        result
    }

    /// Pointer selection of a candidate
    pub fn select_candidate(&mut self, index: usize) -> ComposerResult {
        self.composer.select_candidate(index)
    }

    /// Wait for the next lookup outcome and apply it.
    ///
    /// Stale outcomes are applied too; the composer ignores them and the
    /// returned result is not consumed. Returns `None` once the fetcher stops.
    pub async fn next_suggestions(&mut self) -> Option<ComposerResult> {
        let outcome = self.outcomes.recv().await?;
        Some(self.composer.apply_suggestions(outcome))
    }

    /// A message arrived over the room channel.
    ///
    /// Messages for other rooms are ignored; duplicates (e.g. our own echo)
    /// are dropped by the store. Returns whether the history changed.
    pub fn receive(&self, message: Message) -> bool {
        if message.room_id != self.participant.room_id {
            debug!(
                "ignoring message {} for room {} (session room {})",
                message.id, message.room_id, self.participant.room_id
            );
            return false;
        }
        self.store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add_room_message(message)
    }

    /// Reset the composer (unmount)
    pub fn reset(&mut self) {
        self.composer.reset();
    }

    async fn dispatch(&mut self, result: ComposerResult) -> Result<ComposerResult, SendError> {
        self.request_suggestions(&result);

        let tokens = result.actions.iter().find_map(|action| match action {
            ComposerAction::Submit(tokens) => Some(tokens.clone()),
            _ => None,
        });
        let Some(tokens) = tokens else {
            return Ok(result);
        };

        self.send(tokens).await?;
        let cleared = self.composer.complete_submit();
        Ok(result.with_actions(cleared.actions))
    }

    fn request_suggestions(&self, result: &ComposerResult) {
        if let Some(request) = result.fetch_request() {
            self.fetcher.request(request.clone());
        }
    }

    async fn send(&self, tokens: Vec<Token>) -> Result<Message, SendError> {
        let new_message = NewMessage {
            tokens,
            sender_id: self.participant.sender_id.clone(),
            room_id: self.participant.room_id.clone(),
        };
        let message = match self.sender.send(new_message).await {
            Ok(message) => message,
            Err(e) => {
                warn!("send to room {} failed: {}", self.participant.room_id, e);
                return Err(e);
            }
        };
        info!(
            "sent message {} to room {}",
            message.id, self.participant.room_id
        );

        self.store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add_room_message(message.clone());
        self.channel.broadcast(&message);
        Ok(message)
    }
}
