//! Chart tools: momentum scores and trend zones for stocks and coins

mod get_chart_coin;
mod get_chart_stock;

pub use get_chart_coin::GetChartCoinTool;
pub use get_chart_stock::GetChartStockTool;

/// Trend zones reported by the chart scorer
pub const CHART_ZONES: &[&str] = &["STRONG_UP", "UP_ZONE", "NEUTRAL", "DOWN_ZONE", "STRONG_DOWN"];
