use tabled::{settings::Style, Table, Tabled};

use super::coin_rows;
use crate::models::{
    dashboard_view::{CoinRow, DashboardView, PaginationView, StatCard},
    pagination::{page_count, SearchParams},
};
use crate::state::Snapshot;

pub fn build_view(snapshot: &Snapshot, params: &SearchParams, loading: bool) -> DashboardView {
    let total_coins = snapshot
        .stats
        .map(|stats| stats.total_coins.to_string())
        .unwrap_or_else(|| "-".to_string());
    let top_coin = match &snapshot.first_coin {
        Some(coin) => StatCard {
            title: format!("#{} coin", coin.rank),
            value: coin.name.clone(),
        },
        None => StatCard {
            title: "Top coin".to_string(),
            value: "-".to_string(),
        },
    };
    let total = snapshot.stats.map(|stats| stats.total).unwrap_or(0);

    DashboardView {
        total_coins: StatCard {
            title: "Total Coins".to_string(),
            value: total_coins,
        },
        top_coin,
        rows: coin_rows(&snapshot.coins),
        pagination: PaginationView {
            current: params.current_page(),
            page_size: params.limit,
            total,
            pages: page_count(total, params.limit),
        },
        loading,
        fetched_at: snapshot.fetched_at,
    }
}

#[derive(Tabled)]
struct TextRow {
    #[tabled(rename = "Rank")]
    rank: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Price to USD")]
    price: String,
    #[tabled(rename = "24H")]
    change: String,
    #[tabled(rename = "Trend")]
    sparkline: String,
}

impl From<&CoinRow> for TextRow {
    fn from(row: &CoinRow) -> Self {
        Self {
            rank: row.rank.clone(),
            name: row.name.clone(),
            symbol: row.symbol.clone(),
            price: row.price.text.clone(),
            change: format!("{} {}", row.change.trend.arrow(), row.change.text),
            sparkline: row.sparkline.glyphs.clone(),
        }
    }
}

/// Plain-text dashboard: the two summary cards, the coin table, then the pager.
pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}: {}    {}: {}\n",
        view.total_coins.title, view.total_coins.value, view.top_coin.title, view.top_coin.value
    ));

    let rows: Vec<TextRow> = view.rows.iter().map(TextRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::modern());
    out.push_str(&table.to_string());
    out.push('\n');

    out.push_str(&format!(
        "Page {} of {} ({} per page, {} total)",
        view.pagination.current,
        view.pagination.pages.max(1),
        view.pagination.page_size,
        view.pagination.total
    ));
    if view.loading {
        out.push_str(" [loading]");
    }
    out.push('\n');
    out
}
