use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};
use tracing::debug;

use crate::config::Config;
use crate::error::{ConfigError, FetchError};
use crate::models::{
    pagination::SearchParams, ApiFailure, Coin, CoinsFetchResponse, CoinsPage,
};

/// Anything that can answer a `/coins` page request.
#[async_trait]
pub trait CoinSource: Send + Sync {
    async fn fetch_coins(&self, params: &SearchParams) -> Result<CoinsPage, FetchError>;

    async fn fetch_first_coin(&self) -> Result<Option<Coin>, FetchError> {
        let page = self.fetch_coins(&SearchParams::first_coin()).await?;
        Ok(page.coins.into_iter().next())
    }
}

pub struct CoinRanking {
    client: Client,
    base_url: String,
}

impl CoinRanking {
    pub fn init(config: &Config) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(api_key) = &config.api_key {
            match HeaderValue::from_str(api_key) {
                Ok(value) => {
                    headers.insert("x-access-token", value);
                }
                Err(_) => tracing::warn!("COINRANKING_API_KEY is not a valid header value, ignoring"),
            }
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn coins_url(&self) -> String {
        format!("{}/coins", self.base_url)
    }
}

#[async_trait]
impl CoinSource for CoinRanking {
    async fn fetch_coins(&self, params: &SearchParams) -> Result<CoinsPage, FetchError> {
        let url = self.coins_url();
        debug!(%url, limit = params.limit, offset = params.offset, "fetching coins");

        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiFailure>(&body)
                .ok()
                .and_then(|failure| failure.message.or(failure.code));
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        decode_coins(&body)
    }
}

/// Parses a `/coins` body into a page.
pub fn decode_coins(body: &[u8]) -> Result<CoinsPage, FetchError> {
    let resp: CoinsFetchResponse = serde_json::from_slice(body)?;
    if resp.status != "success" {
        return Err(FetchError::Rejected(
            resp.message.unwrap_or_else(|| resp.status.clone()),
        ));
    }
    match resp.data {
        Some(data) => Ok(CoinsPage::from(data)),
        None => Err(FetchError::Rejected("response carried no data".to_string())),
    }
}
