use serde::{Deserialize, Deserializer, Serialize};
pub mod dashboard_view;
pub mod pagination;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub uuid: String,
    pub rank: u32,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub icon_url: String,
    #[serde(default)]
    pub coinranking_url: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    /// Decimal text exactly as the API sent it, e.g. `"2.10"`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub change: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64_seq")]
    pub sparkline: Vec<Option<f64>>,
}

impl Coin {
    pub fn change_value(&self) -> Option<f64> {
        self.change
            .as_deref()
            .and_then(|text| text.trim().parse::<f64>().ok())
            .filter(|change| change.is_finite())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: u64,
    pub total_coins: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CoinsData {
    #[serde(default)]
    pub coins: Vec<Coin>,
    #[serde(default)]
    pub stats: Stats,
}

/// Envelope returned by `GET /coins`.
#[derive(Serialize, Deserialize, Debug)]
pub struct CoinsFetchResponse {
    pub status: String,
    pub data: Option<CoinsData>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body the API sends alongside non-2xx statuses.
#[derive(Deserialize, Debug)]
pub struct ApiFailure {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One page of coins, deduplicated by uuid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinsPage {
    pub coins: Vec<Coin>,
    pub stats: Stats,
}

impl From<CoinsData> for CoinsPage {
    fn from(data: CoinsData) -> Self {
        let mut seen = std::collections::HashSet::with_capacity(data.coins.len());
        let coins = data
            .coins
            .into_iter()
            .filter(|coin| {
                let fresh = seen.insert(coin.uuid.clone());
                if !fresh {
                    tracing::warn!(uuid = %coin.uuid, "dropping duplicate coin in page");
                }
                fresh
            })
            .collect();
        Self {
            coins,
            stats: data.stats,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrStr {
    Num(f64),
    Str(String),
}

impl NumOrStr {
    fn into_f64(self) -> Option<f64> {
        match self {
            NumOrStr::Num(n) => Some(n),
            NumOrStr::Str(s) => s.trim().parse::<f64>().ok(),
        }
    }

    fn into_text(self) -> String {
        match self {
            NumOrStr::Num(n) => n.to_string(),
            NumOrStr::Str(s) => s.trim().to_string(),
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumOrStr>::deserialize(deserializer)?;
    Ok(raw.map(NumOrStr::into_text).filter(|text| !text.is_empty()))
}

// Prices and changes arrive as decimal strings, sometimes null.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumOrStr>::deserialize(deserializer)?;
    Ok(raw.and_then(NumOrStr::into_f64))
}

fn lenient_f64_seq<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Option<NumOrStr>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|point| point.and_then(NumOrStr::into_f64))
        .collect())
}
