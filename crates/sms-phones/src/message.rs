use serde::{Deserialize, Serialize};
use sms_core::InboundSms;

/// One received SMS. Immutable once stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sender: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Provider-assigned inbound message id. Unique per phone only.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip)]
    pub keyword: String,
    #[serde(skip)]
    pub previous_published_message_id: Option<String>,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        sender: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            id: id.into(),
            ..Self::default()
        }
    }
}

impl From<InboundSms> for Message {
    fn from(inbound: InboundSms) -> Self {
        Self {
            sender: inbound.origination_number,
            text: inbound.message_body,
            id: inbound.inbound_message_id,
            keyword: inbound.message_keyword,
            previous_published_message_id: inbound.previous_published_message_id,
        }
    }
}
