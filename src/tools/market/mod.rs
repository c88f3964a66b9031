//! Market data tools
//!
//! This module contains 4 tools: daily snapshots, fundamentals, sentiment
//! trends, and research reports.

mod get_financials;
mod get_research;
mod get_snapshots;
mod get_trends;

pub use get_financials::GetFinancialsTool;
pub use get_research::GetResearchTool;
pub use get_snapshots::GetSnapshotsTool;
pub use get_trends::GetTrendsTool;
