//! Shared test helpers: in-memory feed, price and notifier fakes.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use congressintel::domain::ports::notifier::{AlertDigest, Notifier, NotifyError};
use congressintel::domain::ports::price_provider::{
    HistoricalPriceProvider, LivePriceProvider, PriceError, PricePoint, Quote,
};
use congressintel::domain::ports::trade_feed::{DisclosureRow, FeedError, TradeFeed};
use congressintel::domain::values::chamber::Chamber;
use congressintel::infrastructure::config::AppConfig;
use congressintel::{CongressIntel, Providers};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn row(
    politician: &str,
    ticker: &str,
    transaction: &str,
    amount: &str,
    disclosed: &str,
) -> DisclosureRow {
    DisclosureRow {
        politician: Some(politician.into()),
        party: Some("D".into()),
        ticker: Some(ticker.into()),
        transaction: Some(transaction.into()),
        amount_range: Some(amount.into()),
        transaction_date: None,
        disclosure_date: Some(disclosed.into()),
    }
}

/// Feed serving fixed rows per chamber and counting fetches.
#[derive(Default)]
pub struct FakeFeed {
    pub house: Vec<DisclosureRow>,
    pub senate: Vec<DisclosureRow>,
    pub fail_with: Option<u16>,
    pub fetches: AtomicUsize,
}

impl FakeFeed {
    pub fn new(house: Vec<DisclosureRow>, senate: Vec<DisclosureRow>) -> Self {
        Self {
            house,
            senate,
            ..Default::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Default::default()
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TradeFeed for FakeFeed {
    fn name(&self) -> &str {
        "fake_feed"
    }

    async fn fetch(&self, chamber: Chamber) -> Result<Vec<DisclosureRow>, FeedError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.fail_with {
            return Err(FeedError::Status {
                status,
                detail: "boom".into(),
            });
        }
        Ok(match chamber {
            Chamber::House => self.house.clone(),
            Chamber::Senate => self.senate.clone(),
        })
    }
}

/// Daily closes per ticker, one per calendar day from the requested start.
/// Tickers without a series return no data.
#[derive(Default)]
pub struct FakePrices {
    pub series: HashMap<String, Vec<f64>>,
    pub unavailable: bool,
    pub quotes: HashMap<String, Quote>,
}

impl FakePrices {
    pub fn with_series(mut self, ticker: &str, closes: Vec<f64>) -> Self {
        self.series.insert(ticker.into(), closes);
        self
    }

    pub fn with_quote(mut self, ticker: &str, price: f64, name: &str) -> Self {
        self.quotes.insert(
            ticker.into(),
            Quote {
                price: Some(price),
                name: Some(name.into()),
            },
        );
        self
    }
}

#[async_trait]
impl HistoricalPriceProvider for FakePrices {
    fn name(&self) -> &str {
        "fake_prices"
    }

    async fn daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<PricePoint>, PriceError> {
        if self.unavailable {
            return Err(PriceError::Unavailable {
                status: Some(503),
                detail: "down".into(),
            });
        }
        Ok(self
            .series
            .get(ticker)
            .map(|closes| {
                closes
                    .iter()
                    .enumerate()
                    .map(|(i, &close)| PricePoint {
                        date: start + Duration::days(i as i64),
                        close,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl LivePriceProvider for FakePrices {
    fn name(&self) -> &str {
        "fake_prices"
    }

    async fn latest(&self, ticker: &str) -> Result<Quote, PriceError> {
        self.quotes
            .get(ticker)
            .cloned()
            .ok_or_else(|| PriceError::NotFound(ticker.to_string()))
    }
}

/// Records every digest it is asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<AlertDigest>>,
    pub reject: bool,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, digest: &AlertDigest) -> Result<(), NotifyError> {
        if self.reject {
            return Err(NotifyError::Rejected(500));
        }
        self.sent.lock().unwrap().push(digest.clone());
        Ok(())
    }
}

/// Steady climb: +0.5 per day from 100, 371 closes.
pub fn rising() -> Vec<f64> {
    (0..371).map(|i| 100.0 + i as f64 * 0.5).collect()
}

pub fn flat() -> Vec<f64> {
    vec![100.0; 371]
}

/// A small universe with one clear winner (NVDA), one flat stock and one
/// ticker without price data.
pub fn sample_feed() -> FakeFeed {
    FakeFeed::new(
        vec![
            row("Jane Doe", "NVDA", "Purchase", "$50,001 - $100,000", "2024-01-10"),
            row("John Roe", "KO", "Purchase", "$1,001 - $15,000", "2024-01-11"),
            row("John Roe", "KO", "Sale (Full)", "$1,001 - $15,000", "2024-01-12"),
            row("John Roe", "NODATA", "Purchase", "$1,001 - $15,000", "2024-01-13"),
            row("", "AAPL", "Purchase", "$1,001 - $15,000", "2024-01-14"),
        ],
        vec![row(
            "Sam Smith",
            "NVDA",
            "Purchase",
            "$50,001 - $100,000",
            "2024-02-01",
        )],
    )
}

pub fn sample_prices() -> FakePrices {
    FakePrices::default()
        .with_series("NVDA", rising())
        .with_series("KO", flat())
        .with_quote("NVDA", 125.456, "NVIDIA Corporation")
        .with_quote("KO", 60.0, "Coca-Cola")
}

pub fn setup_with(
    feed: Arc<FakeFeed>,
    prices: Arc<FakePrices>,
    notifier: Option<Arc<RecordingNotifier>>,
    config: &AppConfig,
) -> CongressIntel {
    CongressIntel::with_providers(
        Providers {
            feed,
            prices: prices.clone(),
            live: prices,
            notifier: notifier.map(|n| n as Arc<dyn Notifier>),
        },
        config,
    )
    .unwrap()
}

pub fn setup() -> CongressIntel {
    setup_with(
        Arc::new(sample_feed()),
        Arc::new(sample_prices()),
        None,
        &AppConfig::default(),
    )
}
