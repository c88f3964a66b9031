//! News tools

mod get_news;
mod get_news_scored;

pub use get_news::GetNewsTool;
pub use get_news_scored::GetNewsScoredTool;
