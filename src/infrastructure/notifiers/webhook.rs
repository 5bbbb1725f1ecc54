use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::ports::notifier::{AlertDigest, AlertRow, Notifier, NotifyError};

/// Posts alert digests as JSON to a relay (mail gateway, chat webhook).
pub struct WebhookNotifier {
    url: String,
    token: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    to: &'a str,
    subject: &'a str,
    html: String,
    text: String,
    rows: &'a [AlertRow],
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            url: url.into(),
            token,
            client: reqwest::Client::builder()
                .user_agent(concat!("congressintel/", env!("CARGO_PKG_VERSION")))
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn send(&self, digest: &AlertDigest) -> Result<(), NotifyError> {
        let payload = WebhookPayload {
            to: &digest.destination,
            subject: &digest.subject,
            html: digest.to_html(),
            text: digest.to_text(),
            rows: &digest.rows,
        };

        let mut request = self.client.post(&self.url).json(&payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(NotifyError::Rejected(resp.status().as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn digest() -> AlertDigest {
        AlertDigest {
            destination: "desk@example.com".into(),
            subject: "Congress Alerts".into(),
            rows: vec![AlertRow {
                politician: "Jane Doe".into(),
                ticker: "NVDA".into(),
                amount_range: "$50,001 - $100,000".into(),
                skill_score: 42.0,
                return_90d: 18.0,
            }],
        }
    }

    #[tokio::test]
    async fn test_posts_digest_with_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(header("authorization", "Bearer s3cret"))
            .and(body_partial_json(serde_json::json!({
                "to": "desk@example.com",
                "subject": "Congress Alerts",
                "rows": [{"ticker": "NVDA"}]
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(format!("{}/hook", server.uri()), Some("s3cret".into()));
        notifier.send(&digest()).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(server.uri(), None);
        let err = notifier.send(&digest()).await.unwrap_err();
        assert!(matches!(err, NotifyError::Rejected(500)));
    }
}
