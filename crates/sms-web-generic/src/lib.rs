use std::sync::Arc;

use serde::Deserialize;
use sms_core::{HttpStatus, InboundSms, WebhookResponse};
use sms_phones::{Message, PhoneError, PhoneStore};
use tracing::{debug, info, warn};

/// Errors raised while handling a phone API request
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Phone(#[from] PhoneError),
}

/// Body of a reply request.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub message_body: String,
}

/// Framework-agnostic processor for the inbound webhook and the phone API
#[derive(Clone)]
pub struct PhoneProcessor {
    store: Arc<dyn PhoneStore>,
}

impl PhoneProcessor {
    pub fn new(store: Arc<dyn PhoneStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn PhoneStore> {
        &self.store
    }

    /// Inbound SMS delivery webhook. 200 with an empty body once stored.
    pub fn receive_sms(&self, body: &[u8]) -> WebhookResponse {
        match self.receive_sms_internal(body) {
            Ok(()) => WebhookResponse::empty(HttpStatus::Ok),
            Err(e) => self.error_to_response(e),
        }
    }

    fn receive_sms_internal(&self, body: &[u8]) -> Result<(), WebhookError> {
        let inbound: InboundSms = parse_json(body)?;
        if inbound.inbound_message_id.is_empty() {
            return Err(WebhookError::InvalidRequest(
                "inboundMessageId must not be empty".to_string(),
            ));
        }
        info!(
            from = %inbound.origination_number,
            to = %inbound.destination_number,
            id = %inbound.inbound_message_id,
            "received sms"
        );
        let destination = inbound.destination_number.clone();
        self.store
            .receive_inbound(&destination, Message::from(inbound))?;
        Ok(())
    }

    /// Every known phone number.
    pub fn list_phones(&self) -> WebhookResponse {
        WebhookResponse::json(HttpStatus::Ok, &self.store.list_phone_numbers())
    }

    /// Messages received by `number`.
    pub fn list_messages(&self, number: &str) -> WebhookResponse {
        match self.store.get_phone(number) {
            Ok(phone) => WebhookResponse::json(HttpStatus::Ok, &phone.list_messages()),
            Err(e) => self.error_to_response(e.into()),
        }
    }

    /// Reply to message `id` on phone `number`. 202 once the gateway accepts it.
    pub async fn reply_to_message(&self, number: &str, id: &str, body: &[u8]) -> WebhookResponse {
        match self.reply_internal(number, id, body).await {
            Ok(()) => WebhookResponse::empty(HttpStatus::Accepted),
            Err(e) => self.error_to_response(e),
        }
    }

    async fn reply_internal(&self, number: &str, id: &str, body: &[u8]) -> Result<(), WebhookError> {
        let phone = self.store.get_phone(number)?;
        // Resolve the message before looking at the body so a missing
        // message is reported as 404 regardless of payload.
        phone.get_message(id)?;
        let reply: ReplyRequest = parse_json(body)?;
        let sent = phone.send_reply(id, &reply.message_body).await?;
        info!(phone = number, id, provider = sent.provider, sent_id = %sent.id, "reply sent");
        Ok(())
    }

    fn error_to_response(&self, error: WebhookError) -> WebhookResponse {
        match error {
            WebhookError::InvalidRequest(msg) => {
                debug!("rejecting request: {}", msg);
                WebhookResponse::error(HttpStatus::BadRequest, &msg)
            }
            WebhookError::Phone(e @ PhoneError::InvalidMessage(_)) => {
                WebhookResponse::error(HttpStatus::BadRequest, &e.to_string())
            }
            WebhookError::Phone(e @ (PhoneError::PhoneNotFound(_) | PhoneError::MessageNotFound(_))) => {
                debug!("{}", e);
                WebhookResponse::json(HttpStatus::NotFound, &e.to_string())
            }
            WebhookError::Phone(e @ PhoneError::GatewaySendFailed(_)) => {
                warn!("{}", e);
                WebhookResponse::error(HttpStatus::InternalServerError, &e.to_string())
            }
        }
    }
}

fn parse_json<'a, T: Deserialize<'a>>(body: &'a [u8]) -> Result<T, WebhookError> {
    serde_json::from_slice(body).map_err(|e| WebhookError::InvalidRequest(e.to_string()))
}

/// Helper trait for framework adapters to convert responses
pub trait ResponseConverter {
    type ResponseType;

    fn from_webhook_response(response: WebhookResponse) -> Self::ResponseType;
}
