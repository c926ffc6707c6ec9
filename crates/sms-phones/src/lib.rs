//! # SMS Phones
//!
//! In-memory registry of virtual phones. Each [`Phone`] is keyed by its
//! number and keeps the inbound [`Message`]s addressed to it; replies go out
//! through the registry's [`sms_core::SmsGateway`].
//!
//! ```rust,ignore
//! use sms_phones::{Message, PhoneStore, Registry};
//!
//! let registry = Registry::new(gateway);
//! registry.receive_inbound("+15559998888", Message::new("m-1", "+15551230001", "hello"))?;
//! let phone = registry.get_phone("+15559998888")?;
//! phone.send_reply("m-1", "ack").await?;
//! ```

mod error;
mod message;
mod phone;
mod registry;

pub use error::PhoneError;
pub use message::Message;
pub use phone::Phone;
pub use registry::{PhoneStore, Registry};
