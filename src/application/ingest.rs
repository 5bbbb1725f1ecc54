//! Trade feed ingestion and row validation.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::entities::trade_record::TradeRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::trade_feed::{DisclosureRow, FeedError, TradeFeed};
use crate::domain::values::chamber::Chamber;
use crate::domain::values::transaction_type::TransactionType;

/// Why a feed row was dropped.
#[derive(Debug, Error, PartialEq)]
pub enum RowRejection {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("unparseable {field}: {value}")]
    BadDate { field: &'static str, value: String },
    #[error("{0}")]
    UnknownTransaction(String),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug)]
pub struct IngestReport {
    pub trades: Vec<TradeRecord>,
    pub rows_fetched: usize,
    pub rows_dropped: usize,
}

pub struct IngestUseCase {
    feed: Arc<dyn TradeFeed>,
}

impl IngestUseCase {
    pub fn new(feed: Arc<dyn TradeFeed>) -> Self {
        Self { feed }
    }

    /// Fetch both chambers and keep the rows that validate as of `now`.
    ///
    /// A failure to fetch either chamber aborts ingestion.
    pub async fn execute(&self, now: DateTime<Utc>) -> Result<IngestReport, DomainError> {
        let mut report = IngestReport {
            trades: Vec::new(),
            rows_fetched: 0,
            rows_dropped: 0,
        };

        for chamber in Chamber::ALL {
            let rows = self
                .feed
                .fetch(chamber)
                .await
                .map_err(|e| feed_error(self.feed.name(), chamber, e))?;
            report.rows_fetched += rows.len();

            for row in rows {
                match validate_row(row, chamber, now) {
                    Ok(trade) => report.trades.push(trade),
                    Err(reason) => {
                        debug!(%chamber, %reason, "Dropping disclosure row");
                        report.rows_dropped += 1;
                    }
                }
            }
        }

        info!(
            feed = self.feed.name(),
            fetched = report.rows_fetched,
            kept = report.trades.len(),
            dropped = report.rows_dropped,
            "Ingested disclosures"
        );
        Ok(report)
    }
}

/// Validate one feed row into a [`TradeRecord`].
pub fn validate_row(
    row: DisclosureRow,
    chamber: Chamber,
    now: DateTime<Utc>,
) -> Result<TradeRecord, RowRejection> {
    let politician = non_blank(row.politician).ok_or(RowRejection::Missing("politician"))?;
    let ticker = non_blank(row.ticker).ok_or(RowRejection::Missing("ticker"))?;
    let raw_disclosure = non_blank(row.disclosure_date).ok_or(RowRejection::Missing("disclosure date"))?;
    let disclosure_date = parse_date(&raw_disclosure).ok_or(RowRejection::BadDate {
        field: "disclosure date",
        value: raw_disclosure,
    })?;
    let transaction = non_blank(row.transaction).ok_or(RowRejection::Missing("transaction type"))?;
    let transaction_type: TransactionType = transaction
        .parse()
        .map_err(RowRejection::UnknownTransaction)?;
    // An unreadable transaction date is tolerated; only the disclosure date is load-bearing.
    let transaction_date = row.transaction_date.as_deref().and_then(parse_date);

    TradeRecord::new(
        politician,
        chamber,
        row.party,
        ticker,
        transaction_type,
        row.amount_range.unwrap_or_default(),
        transaction_date,
        disclosure_date,
        now,
    )
    .map_err(RowRejection::Invalid)
}

/// Parse `YYYY-MM-DD`, ignoring any time component that follows.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let day = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn feed_error(feed: &str, chamber: Chamber, err: FeedError) -> DomainError {
    let source_name = format!("{feed}/{}", chamber.to_string().to_lowercase());
    match err {
        FeedError::Status { status, detail } => DomainError::UpstreamUnavailable {
            source_name,
            status: Some(status),
            detail,
        },
        FeedError::Network(detail) => DomainError::UpstreamUnavailable {
            source_name,
            status: None,
            detail,
        },
        FeedError::Parse(detail) => DomainError::Parse(format!("{source_name}: {detail}")),
        FeedError::Config(detail) => DomainError::ConfigurationMissing(detail),
    }
}
