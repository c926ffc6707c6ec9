use sms_core::GatewayError;

/// Errors returned by the phone registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhoneError {
    /// The message cannot be stored, e.g. it has no id
    #[error("invalid message: {0}")]
    InvalidMessage(String),
    #[error("Phone: {0}, not found")]
    PhoneNotFound(String),
    #[error("Message: {0}, not found")]
    MessageNotFound(String),
    /// Outbound send through the gateway failed
    #[error(transparent)]
    GatewaySendFailed(#[from] GatewayError),
}

impl PhoneError {
    /// Phone or message absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PhoneNotFound(_) | Self::MessageNotFound(_))
    }
}
