//! In-process gateway for tests. Records every send instead of calling a provider.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{GatewayError, SendRequest, SendResponse, SmsGateway};

/// A message handed to [`RecordingGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: String,
    pub from: String,
    pub text: String,
    pub media_urls: Vec<String>,
}

#[derive(Debug, Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<SentMessage>>,
    failure: Option<String>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway whose every send fails with `cause`.
    pub fn failing(cause: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(cause.into()),
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn record(
        &self,
        req: SendRequest<'_>,
        media_urls: &[String],
    ) -> Result<SendResponse, GatewayError> {
        if let Some(cause) = &self.failure {
            return Err(GatewayError::send_failed(req.to, cause));
        }
        let mut sent = self
            .sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        sent.push(SentMessage {
            to: req.to.to_string(),
            from: req.from.to_string(),
            text: req.text.to_string(),
            media_urls: media_urls.to_vec(),
        });
        Ok(SendResponse {
            id: format!("out-{}", sent.len()),
            provider: self.provider(),
        })
    }
}

#[async_trait]
impl SmsGateway for RecordingGateway {
    fn provider(&self) -> &'static str {
        "recording"
    }

    async fn send_sms(&self, req: SendRequest<'_>) -> Result<SendResponse, GatewayError> {
        self.record(req, &[])
    }

    async fn send_mms(
        &self,
        req: SendRequest<'_>,
        media_urls: &[String],
    ) -> Result<SendResponse, GatewayError> {
        self.record(req, media_urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_sends_in_order() {
        let gateway = RecordingGateway::new();
        let first = gateway
            .send_sms(SendRequest {
                to: "+1",
                from: "+2",
                text: "one",
            })
            .await
            .unwrap();
        gateway
            .send_mms(
                SendRequest {
                    to: "+1",
                    from: "+2",
                    text: "two",
                },
                &["https://example.com/a.png".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(first.id, "out-1");
        let sent = gateway.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].media_urls, vec!["https://example.com/a.png"]);
    }

    #[tokio::test]
    async fn failing_gateway_reports_destination() {
        let gateway = RecordingGateway::failing("boom");
        let err = gateway
            .send_sms(SendRequest {
                to: "+1",
                from: "+2",
                text: "x",
            })
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::send_failed("+1", "boom"));
        assert!(gateway.sent().is_empty());
    }
}
