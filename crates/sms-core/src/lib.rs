//! # SMS Core
//!
//! Core traits and types shared by the phone-tester crates.
//!
//! This crate provides the building blocks every other member depends on:
//! - [`SmsGateway`] trait for sending SMS and MMS messages through a provider
//! - [`InboundSms`], the delivery webhook payload for a received SMS
//! - [`WebhookResponse`], a framework-agnostic HTTP response
//!
//! ## Example
//!
//! ```rust,ignore
//! use sms_core::{SendRequest, SmsGateway};
//!
//! // Any provider implements SmsGateway
//! let response = gateway.send_sms(SendRequest {
//!     to: "+15551230001",
//!     from: "+15559998888",
//!     text: "ack",
//! }).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

/// Errors raised by an SMS gateway
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Provider session or configuration could not be resolved
    #[error("failed to initialise sms gateway: {0}")]
    InitFailed(String),
    /// The provider rejected the send, or the transport failed
    #[error("failed to send message to: {destination}, {cause}")]
    SendFailed { destination: String, cause: String },
}

impl GatewayError {
    pub fn send_failed(destination: impl Into<String>, cause: impl ToString) -> Self {
        Self::SendFailed {
            destination: destination.into(),
            cause: cause.to_string(),
        }
    }
}

/// HTTP status code for web responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatus {
    Ok = 200,
    Accepted = 202,
    BadRequest = 400,
    NotFound = 404,
    InternalServerError = 500,
}

impl HttpStatus {
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendRequest<'a> {
    /// Destination phone number.
    pub to: &'a str,
    /// Origination identity, normally one of our own numbers.
    pub from: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendResponse {
    /// Provider-assigned message id.
    pub id: String,
    /// Name of the backend that produced the response, e.g. "aws-pinpoint".
    pub provider: &'static str,
}

/// Inbound SMS delivery webhook, as published by the messaging provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InboundSms {
    pub origination_number: String,
    pub destination_number: String,
    pub message_keyword: String,
    pub message_body: String,
    pub inbound_message_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_published_message_id: Option<String>,
}

/// Generic response that can be converted to any framework's response type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: HttpStatus,
    pub body: String,
    pub content_type: String,
}

impl WebhookResponse {
    /// Status only, no body.
    pub fn empty(status: HttpStatus) -> Self {
        Self {
            status,
            body: String::new(),
            content_type: "application/json".to_string(),
        }
    }

    pub fn json<T: Serialize + ?Sized>(status: HttpStatus, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status,
                body,
                content_type: "application/json".to_string(),
            },
            Err(e) => Self::error(HttpStatus::InternalServerError, &e.to_string()),
        }
    }

    /// `{"error": <message>}`
    pub fn error(status: HttpStatus, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message }).to_string(),
            content_type: "application/json".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.as_u16() < 400
    }
}

/// Outbound SMS/MMS capability of a messaging provider.
///
/// Each call is a single request to the provider. Implementations never
/// retry; callers wanting a retry policy wrap the gateway themselves.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Stable provider key, e.g. "aws-pinpoint".
    fn provider(&self) -> &'static str;

    /// Send a single text SMS.
    async fn send_sms(&self, req: SendRequest<'_>) -> Result<SendResponse, GatewayError>;

    /// Send a multimedia message with the given media URLs attached.
    async fn send_mms(
        &self,
        req: SendRequest<'_>,
        media_urls: &[String],
    ) -> Result<SendResponse, GatewayError>;
}

/// Utility to create a pseudo id if a provider doesn't return one.
pub fn fallback_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_payload_parses_camel_case() {
        let body = r#"{
            "originationNumber": "+15551230001",
            "destinationNumber": "+15559998888",
            "messageKeyword": "STOP",
            "messageBody": "hello",
            "inboundMessageId": "m-1"
        }"#;
        let inbound: InboundSms = serde_json::from_str(body).unwrap();
        assert_eq!(inbound.origination_number, "+15551230001");
        assert_eq!(inbound.inbound_message_id, "m-1");
        assert_eq!(inbound.previous_published_message_id, None);
    }

    #[test]
    fn inbound_payload_keeps_previous_published_id() {
        let body = r#"{
            "originationNumber": "+15551230001",
            "destinationNumber": "+15559998888",
            "messageKeyword": "HELP",
            "messageBody": "again",
            "inboundMessageId": "m-2",
            "previousPublishedMessageId": "p-1"
        }"#;
        let inbound: InboundSms = serde_json::from_str(body).unwrap();
        assert_eq!(inbound.previous_published_message_id.as_deref(), Some("p-1"));

        let json = serde_json::to_value(&inbound).unwrap();
        assert_eq!(json["previousPublishedMessageId"], "p-1");
    }

    #[test]
    fn inbound_payload_requires_keyword() {
        let body = r#"{
            "originationNumber": "+15551230001",
            "destinationNumber": "+15559998888",
            "messageBody": "hello",
            "inboundMessageId": "m-1"
        }"#;
        let err = serde_json::from_str::<InboundSms>(body).unwrap_err();
        assert!(err.to_string().contains("messageKeyword"));
    }

    #[test]
    fn error_response_escapes_quotes() {
        let response = WebhookResponse::error(HttpStatus::BadRequest, r#"bad "input""#);
        let parsed: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(parsed["error"], r#"bad "input""#);
        assert!(!response.is_success());
    }

    #[test]
    fn send_failed_names_destination() {
        let err = GatewayError::send_failed("+15551230001", "throttled");
        assert_eq!(
            err.to_string(),
            "failed to send message to: +15551230001, throttled"
        );
    }

    #[test]
    fn fallback_ids_are_unique() {
        assert_ne!(fallback_id(), fallback_id());
    }
}
