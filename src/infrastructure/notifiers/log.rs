use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::notifier::{AlertDigest, Notifier, NotifyError};

/// Writes alert digests to the log instead of delivering them.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn send(&self, digest: &AlertDigest) -> Result<(), NotifyError> {
        for row in &digest.rows {
            info!(
                destination = %digest.destination,
                politician = %row.politician,
                ticker = %row.ticker,
                amount = %row.amount_range,
                skill_score = row.skill_score,
                return_90d = row.return_90d,
                "STRONG BUY alert"
            );
        }
        Ok(())
    }
}
