//! Server-local tools

mod ping;

pub use ping::PingTool;
