use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use crate::domain::ports::trade_feed::{DisclosureRow, FeedError, TradeFeed};
use crate::domain::values::chamber::Chamber;

pub const QUIVER_BASE_URL: &str = "https://api.quiverquant.com/beta";

/// Quiver Quantitative live congressional trading feed (bearer-token auth).
pub struct QuiverFeed {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl QuiverFeed {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url: QUIVER_BASE_URL.into(),
            api_key,
            client: reqwest::Client::builder()
                .user_agent(concat!("congressintel/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, chamber: Chamber) -> String {
        let path = match chamber {
            Chamber::House => "live/congresstrading",
            Chamber::Senate => "live/senatetrading",
        };
        format!("{}/{path}", self.base_url)
    }
}

/// One row of either chamber endpoint. The senate endpoint names the
/// politician column `Senator`, the house endpoint `Representative`.
#[derive(Debug, Deserialize)]
struct QuiverRow {
    #[serde(rename = "Representative", alias = "Senator", default, deserialize_with = "lenient")]
    politician: Option<String>,
    #[serde(rename = "Party", default, deserialize_with = "lenient")]
    party: Option<String>,
    #[serde(rename = "Ticker", default, deserialize_with = "lenient")]
    ticker: Option<String>,
    #[serde(rename = "Transaction", default, deserialize_with = "lenient")]
    transaction: Option<String>,
    #[serde(rename = "Range", default, deserialize_with = "lenient")]
    amount_range: Option<String>,
    #[serde(rename = "TransactionDate", default, deserialize_with = "lenient")]
    transaction_date: Option<String>,
    #[serde(rename = "ReportDate", alias = "DisclosureDate", default, deserialize_with = "lenient")]
    disclosure_date: Option<String>,
}

impl From<QuiverRow> for DisclosureRow {
    fn from(row: QuiverRow) -> Self {
        DisclosureRow {
            politician: row.politician,
            party: row.party,
            ticker: row.ticker,
            transaction: row.transaction,
            amount_range: row.amount_range,
            transaction_date: row.transaction_date,
            disclosure_date: row.disclosure_date,
        }
    }
}

/// Accept strings, numbers and booleans as text; anything else is absent.
fn lenient<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[async_trait]
impl TradeFeed for QuiverFeed {
    fn name(&self) -> &str {
        "quiver"
    }

    async fn fetch(&self, chamber: Chamber) -> Result<Vec<DisclosureRow>, FeedError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| FeedError::Config("QUIVER_API_KEY is not set".into()))?;

        let resp = self
            .client
            .get(self.endpoint(chamber))
            .bearer_auth(api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                status: status.as_u16(),
                detail: truncate(&body, 200),
            });
        }

        let rows: Vec<QuiverRow> = resp
            .json()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))?;

        tracing::debug!(%chamber, rows = rows.len(), "quiver rows fetched");
        Ok(rows.into_iter().map(DisclosureRow::from).collect())
    }
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
