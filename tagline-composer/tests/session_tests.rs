//! End-to-end composer session tests with in-process collaborators

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tagline_composer::config::settings::ComposerSettings;
use tagline_composer::{
    ChatStore, ComposerAction, ComposerSession, KeyEvent, Keysym, MemorySource, Message,
    MessageSender, NewMessage, Participant, RoomHub, SendError,
};
use tagline_engine::{Token, Trigger};

/// Accepts every message and stamps it with a sequential id
#[derive(Default)]
struct MemorySender {
    next_id: AtomicU64,
    sent: Mutex<Vec<NewMessage>>,
    fail: bool,
}

impl MemorySender {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl MessageSender for MemorySender {
    fn send(&self, message: NewMessage) -> impl Future<Output = Result<Message, SendError>> + Send {
        let result = if self.fail {
            Err(SendError::Transport("backend down".to_string()))
        } else {
            self.sent.lock().unwrap().push(message.clone());
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Message {
                id: format!("m{}", id),
                tokens: message.tokens,
                sender_id: message.sender_id,
                room_id: message.room_id,
                created_at: 1_000 + id,
            })
        };
        async move { result }
    }
}

fn settings() -> ComposerSettings {
    ComposerSettings {
        debounce_ms: 250,
        max_candidates: 10,
    }
}

struct Harness {
    session: ComposerSession<Arc<MemorySender>, RoomHub>,
    source: Arc<MemorySource>,
    sender: Arc<MemorySender>,
    hub: RoomHub,
    store: Arc<RwLock<ChatStore>>,
}

fn harness_with(source: MemorySource, sender: MemorySender) -> Harness {
    let source = Arc::new(source);
    let sender = Arc::new(sender);
    let hub = RoomHub::new();
    let store = Arc::new(RwLock::new(ChatStore::new()));
    let session = ComposerSession::new(
        &settings(),
        source.clone(),
        sender.clone(),
        hub.clone(),
        store.clone(),
        Participant::new("room-1", "user-1"),
    );
    Harness {
        session,
        source,
        sender,
        hub,
        store,
    }
}

fn harness() -> Harness {
    harness_with(
        MemorySource::from_labels(["alice", "alan", "abby", "bob", "urgent"]),
        MemorySender::default(),
    )
}

async fn type_str(session: &mut ComposerSession<Arc<MemorySender>, RoomHub>, text: &str) {
    for ch in text.chars() {
        session.handle_key(&KeyEvent::char(ch)).await.unwrap();
    }
}

fn labels(session: &ComposerSession<Arc<MemorySender>, RoomHub>) -> Vec<String> {
    session
        .composer()
        .candidates()
        .map(|list| list.candidates().iter().map(|s| s.label.clone()).collect())
        .unwrap_or_default()
}

#[tokio::test(start_paused = true)]
async fn test_fast_typing_issues_one_lookup() {
    let mut h = harness();
    type_str(&mut h.session, "@a").await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    type_str(&mut h.session, "b").await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    type_str(&mut h.session, "c").await;

    let result = h.session.next_suggestions().await.unwrap();
    assert!(result.consumed);
    assert_eq!(h.source.queries(), vec!["abc"]);
}

#[tokio::test(start_paused = true)]
async fn test_suggestions_then_confirm() {
    let mut h = harness();
    type_str(&mut h.session, "hello @al").await;

    h.session.next_suggestions().await.unwrap();
    assert_eq!(labels(&h.session), vec!["alice", "alan"]);

    h.session
        .handle_key(&KeyEvent::press(Keysym::RETURN))
        .await
        .unwrap();
    assert_eq!(h.session.composer().text(), "hello @alice ");
    assert_eq!(h.session.composer().caret(), 13);
}

#[tokio::test(start_paused = true)]
async fn test_slow_outcome_does_not_overwrite_newer() {
    let mut h = harness_with(
        MemorySource::from_labels(["alice", "abby"]).with_delay("a", Duration::from_secs(2)),
        MemorySender::default(),
    );

    type_str(&mut h.session, "@a").await;
    // Let the "a" lookup fire; it takes two seconds to answer
    tokio::time::sleep(Duration::from_millis(300)).await;
    type_str(&mut h.session, "b").await;

    let applied = h.session.next_suggestions().await.unwrap();
    assert!(applied.consumed);
    assert_eq!(labels(&h.session), vec!["abby"]);

    let late = h.session.next_suggestions().await.unwrap();
    assert!(!late.consumed);
    assert_eq!(labels(&h.session), vec!["abby"]);
    assert_eq!(h.source.queries(), vec!["a", "ab"]);
}

#[tokio::test(start_paused = true)]
async fn test_submit_sends_stores_and_broadcasts() {
    let mut h = harness();
    let mut room = h.hub.subscribe("room-1");

    h.session.handle_change("hi @bob #urgent", 15);
    let result = h
        .session
        .handle_key(&KeyEvent::press(Keysym::ESCAPE))
        .await
        .unwrap();
    assert!(result.consumed);

    let result = h
        .session
        .handle_key(&KeyEvent::press(Keysym::RETURN))
        .await
        .unwrap();
    assert!(
        result
            .actions
            .contains(&ComposerAction::UpdateText(String::new()))
    );
    assert_eq!(h.session.composer().text(), "");

    let expected = vec![
        Token::text("hi "),
        Token::tag(Trigger::At, "bob"),
        Token::tag(Trigger::Hash, "urgent"),
    ];
    let sent = h.sender.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].tokens, expected);
    assert_eq!(sent[0].room_id, "room-1");
    assert_eq!(sent[0].sender_id, "user-1");

    let stored = h.store.read().unwrap().messages_for_room("room-1").to_vec();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].tokens, expected);

    let broadcast = room.recv().await.unwrap();
    assert_eq!(broadcast.id, stored[0].id);

    // Our own message echoed back by the channel is not duplicated
    assert!(!h.session.receive(broadcast));
    assert_eq!(h.store.read().unwrap().messages_for_room("room-1").len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_send_keeps_buffer() {
    let mut h = harness_with(MemorySource::default(), MemorySender::failing());
    type_str(&mut h.session, "draft").await;

    let err = h
        .session
        .handle_key(&KeyEvent::press(Keysym::RETURN))
        .await
        .unwrap_err();
    assert!(matches!(err, SendError::Transport(_)));
    assert_eq!(h.session.composer().text(), "draft");
    assert!(h.store.read().unwrap().messages_for_room("room-1").is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_receive_ignores_other_rooms() {
    let h = harness();
    let message = Message {
        id: "x1".to_string(),
        tokens: vec![Token::text("elsewhere ")],
        sender_id: "user-2".to_string(),
        room_id: "room-2".to_string(),
        created_at: 5,
    };
    assert!(!h.session.receive(message.clone()));
    assert!(h.store.read().unwrap().messages_for_room("room-2").is_empty());

    let here = Message {
        room_id: "room-1".to_string(),
        ..message
    };
    assert!(h.session.receive(here));
    assert_eq!(h.store.read().unwrap().messages_for_room("room-1").len(), 1);
}
