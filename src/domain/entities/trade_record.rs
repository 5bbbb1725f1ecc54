use crate::domain::values::chamber::Chamber;
use crate::domain::values::transaction_type::TransactionType;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// One disclosed congressional trade. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: String,
    pub politician: String,
    pub chamber: Chamber,
    pub party: Option<String>,
    pub ticker: String,
    pub transaction_type: TransactionType,
    pub amount_range: String,
    pub transaction_date: Option<NaiveDate>,
    pub disclosure_date: NaiveDate,
}

impl TradeRecord {
    /// Validate and build a trade record as of `now`.
    ///
    /// The ticker is trimmed and upper-cased. A record is rejected when the
    /// politician or ticker is blank, when the disclosure date is not in the
    /// past, or when the transaction date falls after the disclosure date.
    pub fn new(
        politician: String,
        chamber: Chamber,
        party: Option<String>,
        ticker: String,
        transaction_type: TransactionType,
        amount_range: String,
        transaction_date: Option<NaiveDate>,
        disclosure_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Self, String> {
        let politician = politician.trim().to_string();
        if politician.is_empty() {
            return Err("politician is empty".into());
        }
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err("ticker is empty".into());
        }
        if disclosure_date.and_time(NaiveTime::MIN).and_utc() >= now {
            return Err(format!("disclosure date {disclosure_date} is not in the past"));
        }
        if let Some(tx) = transaction_date {
            if tx > disclosure_date {
                return Err(format!(
                    "transaction date {tx} is after disclosure date {disclosure_date}"
                ));
            }
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            politician,
            chamber,
            party: party.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()),
            ticker,
            transaction_type,
            amount_range: amount_range.trim().to_string(),
            transaction_date,
            disclosure_date,
        })
    }

    pub fn is_purchase(&self) -> bool {
        self.transaction_type == TransactionType::Purchase
    }
}
