//! Tag tools: name lookup and free-text tag extraction

mod match_tags;
mod search_tags;

pub use match_tags::MatchTagsTool;
pub use search_tags::SearchTagsTool;
