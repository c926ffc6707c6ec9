use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use sms_core::{SendRequest, SendResponse, SmsGateway};
use tracing::{debug, error, info};

use crate::{Message, PhoneError};

/// A virtual phone: one number and the messages it has received.
pub struct Phone {
    number: String,
    messages: RwLock<HashMap<String, Message>>,
    gateway: Arc<dyn SmsGateway>,
}

impl Phone {
    pub fn new(number: impl Into<String>, gateway: Arc<dyn SmsGateway>) -> Self {
        Self {
            number: number.into(),
            messages: RwLock::new(HashMap::new()),
            gateway,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// Store `message`, replacing any earlier message with the same id.
    pub fn store(&self, message: Message) -> Result<(), PhoneError> {
        if message.id.is_empty() {
            return Err(PhoneError::InvalidMessage(format!(
                "message for {} has no id",
                self.number
            )));
        }
        debug!(phone = %self.number, id = %message.id, "storing message");
        let previous = self
            .messages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(message.id.clone(), message);
        if let Some(previous) = previous {
            debug!(phone = %self.number, id = %previous.id, "replaced message with duplicate id");
        }
        Ok(())
    }

    /// Snapshot of every stored message, in no particular order.
    pub fn list_messages(&self) -> Vec<Message> {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    pub fn get_message(&self, id: &str) -> Result<Message, PhoneError> {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| PhoneError::MessageNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reply to the sender of message `id`, from this phone's number.
    pub async fn send_reply(&self, id: &str, body: &str) -> Result<SendResponse, PhoneError> {
        let original = self.get_message(id)?;
        info!(phone = %self.number, id, to = %original.sender, "replying to message");
        self.send_sms(&original.sender, body).await
    }

    pub async fn send_sms(&self, destination: &str, body: &str) -> Result<SendResponse, PhoneError> {
        let req = SendRequest {
            to: destination,
            from: &self.number,
            text: body,
        };
        self.gateway.send_sms(req).await.map_err(|e| {
            error!(phone = %self.number, "sms send failed: {}", e);
            PhoneError::GatewaySendFailed(e)
        })
    }

    pub async fn send_mms(
        &self,
        destination: &str,
        body: &str,
        media_urls: &[String],
    ) -> Result<SendResponse, PhoneError> {
        let req = SendRequest {
            to: destination,
            from: &self.number,
            text: body,
        };
        self.gateway.send_mms(req, media_urls).await.map_err(|e| {
            error!(phone = %self.number, "mms send failed: {}", e);
            PhoneError::GatewaySendFailed(e)
        })
    }
}

impl fmt::Debug for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Phone")
            .field("number", &self.number)
            .field("messages", &self.len())
            .field("gateway", &self.gateway.provider())
            .finish()
    }
}
