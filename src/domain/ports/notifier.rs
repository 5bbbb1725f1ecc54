//! Notifier port for STRONG BUY alerts.
//!
//! The core only prepares an [`AlertDigest`]; delivery is up to the
//! adapter. Delivery failures come back as [`NotifyError`] and are reduced
//! to a boolean by the alerts use case.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// One alerted trade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRow {
    pub politician: String,
    pub ticker: String,
    pub amount_range: String,
    pub skill_score: f64,
    pub return_90d: f64,
}

/// A batch of alert rows addressed to one destination.
#[derive(Debug, Clone, Serialize)]
pub struct AlertDigest {
    pub destination: String,
    pub subject: String,
    pub rows: Vec<AlertRow>,
}

impl AlertDigest {
    /// Render the rows as an HTML table for email-style transports.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<h2>Alerts</h2><table><thead><tr>");
        for header in ["Politician", "Ticker", "Amount", "Skill score", "90d return %"] {
            html.push_str(&format!("<th>{header}</th>"));
        }
        html.push_str("</tr></thead><tbody>");
        for row in &self.rows {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.2}</td></tr>",
                escape_html(&row.politician),
                escape_html(&row.ticker),
                escape_html(&row.amount_range),
                row.skill_score,
                row.return_90d
            ));
        }
        html.push_str("</tbody></table>");
        html
    }

    /// Plain-text rendering, one line per row.
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|r| {
                format!(
                    "{} {} ({}) skill {:.2}, 90d {:+.2}%",
                    r.ticker, r.politician, r.amount_range, r.skill_score, r.return_90d
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("rejected with HTTP {0}")]
    Rejected(u16),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    async fn send(&self, digest: &AlertDigest) -> Result<(), NotifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest() -> AlertDigest {
        AlertDigest {
            destination: "desk@example.com".into(),
            subject: "Congress Alerts".into(),
            rows: vec![AlertRow {
                politician: "A & B <PAC>".into(),
                ticker: "NVDA".into(),
                amount_range: "$50,001 - $100,000".into(),
                skill_score: 42.5,
                return_90d: 18.25,
            }],
        }
    }

    #[test]
    fn test_html_escapes_cells() {
        let html = digest().to_html();
        assert!(html.contains("A &amp; B &lt;PAC&gt;"));
        assert!(html.contains("<td>42.50</td>"));
        assert!(html.starts_with("<h2>Alerts</h2>"));
    }

    #[test]
    fn test_text_rendering() {
        let text = digest().to_text();
        assert_eq!(text, "NVDA A & B <PAC> ($50,001 - $100,000) skill 42.50, 90d +18.25%");
    }
}
