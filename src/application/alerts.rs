//! STRONG BUY alert delivery.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::scored_trade::BacktestedTrade;
use crate::domain::ports::notifier::{AlertDigest, AlertRow, Notifier};
use crate::domain::values::final_signal::FinalSignal;

pub struct AlertsUseCase {
    notifier: Option<Arc<dyn Notifier>>,
    destination: Option<String>,
    subject: String,
}

impl AlertsUseCase {
    pub fn new(
        notifier: Option<Arc<dyn Notifier>>,
        destination: Option<String>,
        subject: String,
    ) -> Self {
        Self {
            notifier,
            destination,
            subject,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.notifier.is_some() && self.destination.is_some()
    }

    /// Alert rows for every STRONG BUY trade, in table order.
    pub fn rows(trades: &[BacktestedTrade]) -> Vec<AlertRow> {
        trades
            .iter()
            .filter(|t| t.final_signal == FinalSignal::StrongBuy)
            .map(|t| AlertRow {
                politician: t.trade.politician.clone(),
                ticker: t.trade.ticker.clone(),
                amount_range: t.trade.amount_range.clone(),
                skill_score: t.skill_score,
                return_90d: t.backtest.return_90d(),
            })
            .collect()
    }

    /// Send STRONG BUY alerts. Returns whether a digest was delivered.
    ///
    /// Nothing to send, a missing notifier or destination, and transport
    /// failures all yield `false`.
    pub async fn send(&self, trades: &[BacktestedTrade]) -> bool {
        let rows = Self::rows(trades);
        if rows.is_empty() {
            info!("No STRONG BUY signals to alert on");
            return false;
        }
        let (Some(notifier), Some(destination)) = (&self.notifier, &self.destination) else {
            warn!("Notifications not configured; skipping alert");
            return false;
        };

        let digest = AlertDigest {
            destination: destination.clone(),
            subject: self.subject.clone(),
            rows,
        };
        match notifier.send(&digest).await {
            Ok(()) => {
                info!(notifier = notifier.name(), rows = digest.rows.len(), "Alert sent");
                true
            }
            Err(e) => {
                warn!(notifier = notifier.name(), error = %e, "Alert delivery failed");
                false
            }
        }
    }
}
