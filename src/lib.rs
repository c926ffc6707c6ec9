//! # Phone Tester
//!
//! SMS relay test harness. Inbound SMS delivery webhooks are recorded
//! against virtual phones, callers list and reply to stored messages, and
//! replies go out through AWS Pinpoint.
//!
//! ## Endpoints
//!
//! - `POST /sms` inbound delivery webhook
//! - `GET /phones` known phone numbers
//! - `GET /phones/{number}/messages` messages received by a phone
//! - `POST /phones/{number}/messages/{id}` reply to a message
//! - `POST /test` fire a synthetic request at any endpoint
//! - `POST /sms-reply` log a JSON payload
//! - `GET /livez`
//!
//! ## Configuration
//!
//! Defaults, then `config/` files, then `SMS__`-prefixed environment variables:
//!
//! ```rust,ignore
//! use phone_tester::AppConfig;
//!
//! let config = AppConfig::load()?;
//! println!("listening on {}", config.server.socket_address());
//! ```

pub mod config;
mod echo;
mod error;
pub mod logging;
pub mod server;
pub mod tester;

pub use crate::config::*;
pub use error::StartupError;

/// Common imports for phone-tester usage
pub mod prelude {
    pub use crate::config::{AppConfig, GatewayConfig, LoggingConfig, ServerConfig};
    pub use crate::server::{build_app, connect_gateway, run};
    pub use crate::tester::{TestRequest, Tester};
    pub use sms_core::*;
    pub use sms_phones::{Message, Phone, PhoneError, PhoneStore, Registry};
}
