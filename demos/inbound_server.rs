//! Run only the phone API on :3000, with a gateway that logs instead of sending.
//!
//! ```text
//! curl -XPOST localhost:3000/sms -d '{"originationNumber":"+15551230001","destinationNumber":"+15559998888","messageKeyword":"HI","messageBody":"hello","inboundMessageId":"m-1"}'
//! curl localhost:3000/phones/+15559998888/messages
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use sms_core::{GatewayError, SendRequest, SendResponse, SmsGateway, fallback_id};
use sms_phones::Registry;
use sms_web_axum::{AppState, router};

struct LogGateway;

#[async_trait]
impl SmsGateway for LogGateway {
    fn provider(&self) -> &'static str {
        "log"
    }

    async fn send_sms(&self, req: SendRequest<'_>) -> Result<SendResponse, GatewayError> {
        println!("{} -> {}: {}", req.from, req.to, req.text);
        Ok(SendResponse {
            id: fallback_id(),
            provider: self.provider(),
        })
    }

    async fn send_mms(
        &self,
        req: SendRequest<'_>,
        media_urls: &[String],
    ) -> Result<SendResponse, GatewayError> {
        println!("{} -> {}: {} {:?}", req.from, req.to, req.text, media_urls);
        self.send_sms(req).await
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt().init();

    let registry = Registry::new(Arc::new(LogGateway));
    let app = router(AppState::new(Arc::new(registry)));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    println!("Listening on http://0.0.0.0:3000");
    axum::serve(listener, app).await
}
