use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn tag_color(self) -> &'static str {
        match self {
            Trend::Up => "success",
            Trend::Down => "error",
        }
    }

    pub fn arrow(self) -> char {
        match self {
            Trend::Up => '▲',
            Trend::Down => '▼',
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceTag {
    pub text: String,
    pub color: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeTag {
    pub text: String,
    pub trend: Trend,
    pub color: &'static str,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SparklineView {
    /// SVG polyline `points` attribute.
    pub points: String,
    pub glyphs: String,
    pub color: Option<String>,
    pub width: u32,
    pub height: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoinRow {
    pub key: String,
    pub rank: String,
    pub icon_url: String,
    pub icon_width: u32,
    pub name: String,
    pub link: String,
    pub symbol: String,
    pub price: PriceTag,
    pub change: ChangeTag,
    pub sparkline: SparklineView,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: String,
    pub value: String,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub current: u32,
    pub page_size: u32,
    pub total: u64,
    pub pages: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub total_coins: StatCard,
    pub top_coin: StatCard,
    pub rows: Vec<CoinRow>,
    pub pagination: PaginationView,
    pub loading: bool,
    pub fetched_at: Option<DateTime<Utc>>,
}
