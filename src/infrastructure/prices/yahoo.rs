use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, NaiveTime};

use crate::domain::ports::price_provider::{
    HistoricalPriceProvider, LivePriceProvider, PriceError, PricePoint, Quote,
};

pub const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance prices using the v8 chart API (no auth required).
pub struct YahooPrices {
    base_url: String,
    client: reqwest::Client,
}

impl YahooPrices {
    pub fn new(timeout: Duration) -> Self {
        Self {
            base_url: YAHOO_BASE_URL.into(),
            client: reqwest::Client::builder()
                .user_agent(
                    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                     AppleWebKit/537.36 (KHTML, like Gecko) \
                     Chrome/120.0.0.0 Safari/537.36",
                )
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

    async fn chart(&self, ticker: &str, query: &[(&str, String)]) -> Result<ChartData, PriceError> {
        let url = format!("{}/v8/finance/chart/{ticker}", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| PriceError::Unavailable {
                status: None,
                detail: e.to_string(),
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PriceError::NotFound(ticker.to_string()));
        }
        if !status.is_success() {
            let unavailable = PriceError::Unavailable {
                status: Some(status.as_u16()),
                detail: format!("Yahoo API returned {status} for {ticker}"),
            };
            if !is_symbol_rejection(status) {
                return Err(unavailable);
            }
            // Yahoo answers 400 with a chart.error body when a symbol has no
            // data in the requested window.
            let body = resp.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ChartResponse>(&body) {
                Ok(ChartResponse {
                    chart: ChartResult { error: Some(err), .. },
                }) => PriceError::NotFound(format!("{ticker}: {err}")),
                _ => unavailable,
            });
        }

        let data: ChartResponse = resp
            .json()
            .await
            .map_err(|e| PriceError::Malformed(e.to_string()))?;

        if let Some(err) = data.chart.error {
            return Err(PriceError::NotFound(format!("{ticker}: {err}")));
        }

        data.chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| PriceError::Malformed(format!("empty chart result for {ticker}")))
    }
}

#[derive(Debug, serde::Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, serde::Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartData {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    long_name: Option<String>,
    #[serde(default)]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

impl ChartData {
    /// Pair timestamps with closes, skipping null or non-finite closes.
    fn points(&self) -> Result<Vec<PricePoint>, PriceError> {
        let closes = self
            .indicators
            .quote
            .first()
            .map(|q| q.close.as_slice())
            .unwrap_or_default();
        if !self.timestamp.is_empty() && closes.len() != self.timestamp.len() {
            return Err(PriceError::Malformed(format!(
                "{} timestamps but {} closes",
                self.timestamp.len(),
                closes.len()
            )));
        }

        let mut points = Vec::with_capacity(closes.len());
        for (ts, close) in self.timestamp.iter().zip(closes) {
            let Some(close) = (*close).filter(|c| c.is_finite()) else {
                continue;
            };
            let date = DateTime::from_timestamp(*ts, 0)
                .ok_or_else(|| PriceError::Malformed(format!("bad timestamp {ts}")))?
                .date_naive();
            points.push(PricePoint { date, close });
        }
        Ok(points)
    }
}

/// Client errors that can describe the symbol rather than the caller.
fn is_symbol_rejection(status: reqwest::StatusCode) -> bool {
    use reqwest::StatusCode;
    status.is_client_error()
        && !matches!(
            status,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
        )
}

fn epoch(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

#[async_trait]
impl HistoricalPriceProvider for YahooPrices {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    async fn daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, PriceError> {
        // period2 is exclusive on Yahoo's side.
        let end_exclusive = end.checked_add_days(Days::new(1)).unwrap_or(end);
        let data = self
            .chart(
                ticker,
                &[
                    ("period1", epoch(start).to_string()),
                    ("period2", epoch(end_exclusive).to_string()),
                    ("interval", "1d".to_string()),
                ],
            )
            .await?;

        let mut points = data.points()?;
        points.retain(|p| p.date >= start && p.date <= end);
        Ok(points)
    }
}

#[async_trait]
impl LivePriceProvider for YahooPrices {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    async fn latest(&self, ticker: &str) -> Result<Quote, PriceError> {
        let data = self
            .chart(
                ticker,
                &[("range", "5d".to_string()), ("interval", "1d".to_string())],
            )
            .await?;

        let last_close = data.points()?.last().map(|p| p.close);
        let name = data
            .meta
            .long_name
            .clone()
            .or_else(|| data.meta.short_name.clone());

        Ok(Quote {
            price: last_close.or(data.meta.regular_market_price),
            name,
        })
    }
}
