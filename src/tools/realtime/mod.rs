//! Realtime subscription tools

mod get_available_rooms;

pub use get_available_rooms::GetAvailableRoomsTool;
