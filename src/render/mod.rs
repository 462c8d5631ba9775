pub mod dashboard;
pub mod sparkline;

use crate::models::{
    dashboard_view::{ChangeTag, CoinRow, PriceTag, SparklineView, Trend},
    Coin,
};
use crate::utils::{format_change, format_price, sanitize_color};

pub const ICON_WIDTH: u32 = 32;

/// Up only for a strictly positive change; flat and unknown count as down.
pub fn trend(change: Option<f64>) -> Trend {
    match change {
        Some(change) if change > 0.0 => Trend::Up,
        _ => Trend::Down,
    }
}

pub fn coin_row(coin: &Coin) -> CoinRow {
    let color = sanitize_color(coin.color.as_deref());
    let trend = trend(coin.change_value());
    let points = sparkline::recent_points(&coin.sparkline);

    CoinRow {
        key: coin.uuid.clone(),
        rank: format!("#{}", coin.rank),
        icon_url: coin.icon_url.clone(),
        icon_width: ICON_WIDTH,
        name: coin.name.clone(),
        link: coin.coinranking_url.clone(),
        symbol: coin.symbol.clone(),
        price: PriceTag {
            text: format_price(coin.price),
            color: color.clone(),
        },
        change: ChangeTag {
            text: format_change(coin.change.as_deref()),
            trend,
            color: trend.tag_color(),
        },
        sparkline: SparklineView {
            points: sparkline::svg_points(&points),
            glyphs: sparkline::glyphs(&points),
            color,
            width: sparkline::WIDTH,
            height: sparkline::HEIGHT,
        },
    }
}

pub fn coin_rows(coins: &[Coin]) -> Vec<CoinRow> {
    coins.iter().map(coin_row).collect()
}
