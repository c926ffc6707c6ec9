//! # AWS Pinpoint SMS Gateway
//!
//! [`SmsGateway`] implementation over AWS End User Messaging SMS
//! (the `pinpoint-sms-voice-v2` API).
//!
//! ## Features
//!
//! - Send SMS through `SendTextMessage`
//! - Send MMS through `SendMediaMessage`
//! - Static credentials or the default AWS credential chain
//! - SDK retries disabled: one provider request per send
//!
//! ## Example
//!
//! ```rust,ignore
//! use sms_core::{SendRequest, SmsGateway};
//! use sms_aws_pinpoint::PinpointSmsClient;
//!
//! let client = PinpointSmsClient::from_env("us-east-1").await?;
//! let response = client.send_sms(SendRequest {
//!     to: "+15551230001",
//!     from: "+15559998888",
//!     text: "Hello from Pinpoint!"
//! }).await?;
//! ```

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_pinpointsmsvoicev2::error::DisplayErrorContext;
use aws_sdk_pinpointsmsvoicev2::{
    Client as PinpointClient, Config as PinpointConfig, config::Credentials,
};
use sms_core::{GatewayError, SendRequest, SendResponse, SmsGateway, fallback_id};
use tracing::{debug, error, info, warn};

const PROVIDER: &str = "aws-pinpoint";

/// AWS Pinpoint SMS and Voice v2 client
#[derive(Debug, Clone)]
pub struct PinpointSmsClient {
    client: PinpointClient,
    region: String,
}

impl PinpointSmsClient {
    /// Create a client with static credentials
    pub fn new(
        region: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        Self::build(region.into(), access_key_id, secret_access_key, None)
    }

    /// Static credentials against a custom endpoint; used for local testing.
    pub fn with_endpoint_url(
        region: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        endpoint_url: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        Self::build(
            region.into(),
            access_key_id,
            secret_access_key,
            Some(endpoint_url.into()),
        )
    }

    fn build(
        region: String,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        endpoint_url: Option<String>,
    ) -> Result<Self, GatewayError> {
        validate_region(&region)?;

        let credentials = Credentials::new(
            access_key_id,
            secret_access_key,
            None, // session_token
            None, // expiration
            "phone-tester",
        );

        let mut builder = PinpointConfig::builder()
            .region(Region::new(region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled())
            .behavior_version(BehaviorVersion::latest());
        if let Some(url) = endpoint_url {
            builder = builder.endpoint_url(url);
        }

        Ok(Self {
            client: PinpointClient::from_conf(builder.build()),
            region,
        })
    }

    /// Create a client using the default AWS credential chain
    pub async fn from_env(region: impl Into<String>) -> Result<Self, GatewayError> {
        let region = region.into();
        validate_region(&region)?;

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region))
            .retry_config(RetryConfig::disabled())
            .load()
            .await;

        Self::from_sdk_config(&config).await
    }

    /// Create a client from a loaded SDK config. Credentials must resolve
    /// here; failure is `InitFailed`.
    pub async fn from_sdk_config(config: &SdkConfig) -> Result<Self, GatewayError> {
        let region = config
            .region()
            .map(|r| r.to_string())
            .ok_or_else(|| GatewayError::InitFailed("AWS region is not set".to_string()))?;
        validate_region(&region)?;

        let provider = config.credentials_provider().ok_or_else(|| {
            GatewayError::InitFailed("no AWS credentials provider configured".to_string())
        })?;
        provider.provide_credentials().await.map_err(|e| {
            let cause = DisplayErrorContext(&e).to_string();
            error!("AWS credential resolution failed: {}", cause);
            GatewayError::InitFailed(format!("could not resolve AWS credentials: {cause}"))
        })?;

        info!(region = %region, "AWS Pinpoint SMS client ready");
        Ok(Self {
            client: PinpointClient::new(config),
            region,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    fn response(&self, message_id: Option<&str>, destination: &str) -> SendResponse {
        let id = match message_id {
            Some(id) => id.to_string(),
            None => {
                warn!(destination, "provider returned no message id, using fallback");
                fallback_id()
            }
        };
        SendResponse {
            id,
            provider: PROVIDER,
        }
    }
}

fn validate_region(region: &str) -> Result<(), GatewayError> {
    if region.trim().is_empty() {
        return Err(GatewayError::InitFailed("AWS region is empty".to_string()));
    }
    Ok(())
}

#[async_trait]
impl SmsGateway for PinpointSmsClient {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn send_sms(&self, req: SendRequest<'_>) -> Result<SendResponse, GatewayError> {
        info!("Sending SMS via AWS Pinpoint to {}", req.to);
        debug!(sender = req.from, "message body: {}", req.text);

        let output = self
            .client
            .send_text_message()
            .destination_phone_number(req.to)
            .origination_identity(req.from)
            .message_body(req.text)
            .send()
            .await
            .map_err(|e| {
                let cause = DisplayErrorContext(&e).to_string();
                error!("AWS Pinpoint SendTextMessage failed: {}", cause);
                GatewayError::send_failed(req.to, cause)
            })?;

        let response = self.response(output.message_id(), req.to);
        info!(
            "SMS sent successfully via AWS Pinpoint with MessageId: {}",
            response.id
        );
        Ok(response)
    }

    async fn send_mms(
        &self,
        req: SendRequest<'_>,
        media_urls: &[String],
    ) -> Result<SendResponse, GatewayError> {
        info!(
            "Sending MMS via AWS Pinpoint to {} with {} media item(s)",
            req.to,
            media_urls.len()
        );

        let output = self
            .client
            .send_media_message()
            .destination_phone_number(req.to)
            .origination_identity(req.from)
            .message_body(req.text)
            .set_media_urls(Some(media_urls.to_vec()))
            .send()
            .await
            .map_err(|e| {
                let cause = DisplayErrorContext(&e).to_string();
                error!("AWS Pinpoint SendMediaMessage failed: {}", cause);
                GatewayError::send_failed(req.to, cause)
            })?;

        let response = self.response(output.message_id(), req.to);
        info!(
            "MMS sent successfully via AWS Pinpoint with MessageId: {}",
            response.id
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_credential_types::provider::{
        SharedCredentialsProvider, error::CredentialsError, future,
    };

    #[derive(Debug)]
    struct NoCredentials;

    impl ProvideCredentials for NoCredentials {
        fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
        where
            Self: 'a,
        {
            future::ProvideCredentials::ready(Err(CredentialsError::not_loaded("nothing here")))
        }
    }

    fn sdk_config(provider: Option<SharedCredentialsProvider>) -> SdkConfig {
        let mut builder = SdkConfig::builder()
            .region(Region::new("us-east-1"))
            .behavior_version(BehaviorVersion::latest());
        builder.set_credentials_provider(provider);
        builder.build()
    }

    #[tokio::test]
    async fn unresolvable_credentials_are_init_failure() {
        let config = sdk_config(Some(SharedCredentialsProvider::new(NoCredentials)));
        let err = PinpointSmsClient::from_sdk_config(&config).await.unwrap_err();
        match err {
            GatewayError::InitFailed(msg) => assert!(msg.contains("credentials")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_credentials_provider_is_init_failure() {
        let err = PinpointSmsClient::from_sdk_config(&sdk_config(None))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InitFailed(_)));
    }

    #[tokio::test]
    async fn resolvable_credentials_build_a_client() {
        let provider = SharedCredentialsProvider::new(Credentials::new(
            "test_key", "test_secret", None, None, "test",
        ));
        let client = PinpointSmsClient::from_sdk_config(&sdk_config(Some(provider)))
            .await
            .unwrap();
        assert_eq!(client.region(), "us-east-1");
    }

    #[test]
    fn client_creation() {
        let client = PinpointSmsClient::new("us-east-1", "test_key", "test_secret").unwrap();
        assert_eq!(client.region(), "us-east-1");
        assert_eq!(client.provider(), "aws-pinpoint");
    }

    #[test]
    fn empty_region_is_init_failure() {
        let err = PinpointSmsClient::new("  ", "test_key", "test_secret").unwrap_err();
        assert!(matches!(err, GatewayError::InitFailed(_)));
    }

    #[test]
    fn missing_message_id_gets_fallback() {
        let client = PinpointSmsClient::new("us-east-1", "test_key", "test_secret").unwrap();
        let response = client.response(None, "+15551230001");
        assert!(!response.id.is_empty());
        assert_eq!(client.response(Some("abc"), "+1").id, "abc");
    }

    #[tokio::test]
    async fn transport_failure_is_send_failed() {
        // Nothing listens on port 1, so the request fails before reaching a provider.
        let client = PinpointSmsClient::with_endpoint_url(
            "us-east-1",
            "test_key",
            "test_secret",
            "http://127.0.0.1:1",
        )
        .unwrap();

        let err = client
            .send_sms(SendRequest {
                to: "+15551230001",
                from: "+15559998888",
                text: "ack",
            })
            .await
            .unwrap_err();

        match err {
            GatewayError::SendFailed { destination, .. } => {
                assert_eq!(destination, "+15551230001")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
