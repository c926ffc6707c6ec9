use config::ConfigError;
use sms_core::GatewayError;

use crate::tester::TesterError;

/// Failures that stop the service from starting or keep it from serving
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error("tester setup failed: {0}")]
    Tester(#[from] TesterError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
