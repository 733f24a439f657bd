//! Chat collaborators of the composer
//!
//! Message data, the send path, the room broadcast channel and the client-side
//! room history. The composer itself never touches these; `ComposerSession`
//! wires them together.

mod channel;
mod message;
mod sender;
mod store;

pub use channel::{ROOM_CHANNEL_CAPACITY, RoomChannel, RoomHub};
pub use message::{Message, NewMessage};
pub use sender::{MessageSender, SendError};
pub use store::ChatStore;
