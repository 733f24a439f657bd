//! HTTP and WebSocket surface of `tagline-server`

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Path, Query, State,
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tagline_composer::{Message, NewMessage, RoomChannel, RoomHub};
use tagline_engine::{Suggestion, Token};
use tokio::sync::broadcast::error::RecvError;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, warn};

use crate::backend::{BackendError, ChatBackend, Room};

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<ChatBackend>,
    pub hub: RoomHub,
}

impl AppState {
    pub fn new(backend: ChatBackend) -> Self {
        Self {
            backend: Arc::new(backend),
            hub: RoomHub::new(),
        }
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = match &self {
            BackendError::MissingField(_) => StatusCode::BAD_REQUEST,
            BackendError::RoomNotFound(_) => StatusCode::NOT_FOUND,
            BackendError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: String,
}

#[derive(Debug, Deserialize)]
struct CreateSuggestionRequest {
    #[serde(default)]
    label: String,
}

// Missing fields deserialize as blank so the backend reports them as 400s
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateMessageRequest {
    #[serde(default)]
    room_id: String,
    #[serde(default)]
    sender_id: String,
    #[serde(default)]
    tokens: Vec<Token>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessagesQuery {
    room_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRoomRequest {
    #[serde(default)]
    user_id: String,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoomsQuery {
    #[serde(default)]
    user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinRoomRequest {
    room_id: String,
    user_id: String,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/suggestions",
            get(search_suggestions_handler).post(create_suggestion_handler),
        )
        .route(
            "/api/messages",
            get(list_messages_handler).post(create_message_handler),
        )
        .route("/api/rooms", get(list_rooms_handler).post(create_room_handler))
        .route("/api/rooms/join", post(join_room_handler))
        .route("/api/rooms/{room_id}/ws", get(room_socket_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(cors)
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "tagline-server"
    }))
}

async fn search_suggestions_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Suggestion>> {
    Json(state.backend.search_suggestions(&query.search))
}

async fn create_suggestion_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateSuggestionRequest>,
) -> Result<Json<Suggestion>, BackendError> {
    state.backend.add_suggestion(&req.label).map(Json)
}

async fn create_message_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateMessageRequest>,
) -> Result<Json<Message>, BackendError> {
    let message = state.backend.create_message(NewMessage {
        tokens: req.tokens,
        sender_id: req.sender_id,
        room_id: req.room_id,
    })?;
    state.hub.broadcast(&message);
    Ok(Json(message))
}

async fn list_messages_handler(
    State(state): State<AppState>,
    Query(query): Query<MessagesQuery>,
) -> Json<Vec<Message>> {
    Json(state.backend.list_messages(query.room_id.as_deref()))
}

async fn create_room_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateRoomRequest>,
) -> Json<Room> {
    Json(state.backend.create_room(&req.user_id, req.name.as_deref()))
}

async fn list_rooms_handler(
    State(state): State<AppState>,
    Query(query): Query<RoomsQuery>,
) -> Result<Json<Vec<Room>>, BackendError> {
    state.backend.rooms_for_user(&query.user_id).map(Json)
}

async fn join_room_handler(
    State(state): State<AppState>,
    Json(req): Json<JoinRoomRequest>,
) -> Result<Json<Room>, BackendError> {
    state.backend.join_room(&req.room_id, &req.user_id).map(Json)
}

async fn room_socket_handler(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| room_socket(socket, room_id, state.hub))
}

/// Forward room broadcasts to the client and relay the client's messages to the room.
async fn room_socket(socket: WebSocket, room_id: String, hub: RoomHub) {
    let (mut sink, mut stream) = socket.split();
    let mut room = hub.subscribe(&room_id);
    debug!("socket joined room {}", room_id);

    let mut send_task = tokio::spawn(async move {
        loop {
            let message = match room.recv().await {
                Ok(message) => message,
                Err(RecvError::Lagged(skipped)) => {
                    warn!("socket lagged, {} messages skipped", skipped);
                    continue;
                }
                Err(RecvError::Closed) => break,
            };
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    warn!("failed to encode message {}: {}", message.id, e);
                    continue;
                }
            };
            if sink.send(WsMessage::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let relay_room = room_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(frame)) = stream.next().await {
            match frame {
                WsMessage::Text(text) => match serde_json::from_str::<Message>(text.as_str()) {
                    Ok(message) if message.room_id == relay_room => hub.broadcast(&message),
                    Ok(message) => debug!(
                        "not relaying message for room {} on room {}",
                        message.room_id, relay_room
                    ),
                    Err(e) => debug!("ignoring malformed frame: {}", e),
                },
                WsMessage::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
    debug!("socket left room {}", room_id);
}
