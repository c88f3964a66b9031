//! SSE (Server-Sent Events) transport
//!
//! ## Endpoints
//! - `GET /sse` - event stream; the first `endpoint` event names the POST target
//! - `POST /messages?sessionId=<id>` - JSON-RPC from client to its session
//!
//! Each session owns one protocol core and one worker task that drains the
//! session's inbound queue in FIFO order. Replies go out on the stream only.

pub mod handler;
pub mod session;

pub use handler::{messages_handler, sse_handler, MessagesParams};
pub use session::{InMemorySessionStore, SessionHandle, SessionPhase, SessionStore};
