//! Synthetic request tool: fires a caller-described POST at any endpoint,
//! typically this service's own `/sms` webhook, and relays the answer.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use sms_core::{HttpStatus, WebhookResponse};
use sms_web_axum::AxumResponseConverter;
use sms_web_generic::ResponseConverter;
use tracing::{error, info};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum TesterError {
    #[error("invalid target url: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Body of `POST /test`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestRequest {
    /// `http` or `https`
    pub scheme: String,
    /// Host, optionally with `:port`
    pub endpoint: String,
    pub path: String,
    /// Sent verbatim as the JSON request body
    pub payload: String,
}

impl TestRequest {
    pub fn target_url(&self) -> Result<Url, TesterError> {
        if !matches!(self.scheme.as_str(), "http" | "https") {
            return Err(TesterError::InvalidUrl(format!(
                "unsupported scheme {:?}",
                self.scheme
            )));
        }
        // Endpoint is host[:port] only; path, query and userinfo are not accepted
        if self.endpoint.is_empty() || self.endpoint.contains(['/', '?', '#', '@']) {
            return Err(TesterError::InvalidUrl(format!(
                "endpoint must be host[:port], got {:?}",
                self.endpoint
            )));
        }
        let mut url = Url::parse(&format!("{}://{}", self.scheme, self.endpoint))
            .map_err(|e| TesterError::InvalidUrl(format!("{}: {}", self.endpoint, e)))?;
        if url.host_str().is_none_or(str::is_empty) {
            return Err(TesterError::InvalidUrl(format!(
                "no host in endpoint {:?}",
                self.endpoint
            )));
        }
        url.set_path(&self.path);
        Ok(url)
    }
}

/// Upstream answer to a fired request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct Tester {
    client: reqwest::Client,
}

impl Tester {
    pub fn new(timeout: Duration) -> Result<Self, TesterError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub async fn fire(&self, req: &TestRequest) -> Result<TestResponse, TesterError> {
        let url = req.target_url()?;
        info!(%url, "firing test request");

        let res = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(req.payload.clone())
            .send()
            .await?;

        let status = res.status().as_u16();
        let content_type = res
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = res.text().await?;
        info!(status, "test request answered");

        Ok(TestResponse {
            status,
            content_type,
            body,
        })
    }
}

/// `POST /test`
pub fn router(tester: Arc<Tester>) -> Router {
    Router::new()
        .route("/test", post(send_test))
        .with_state(tester)
}

pub async fn send_test(State(tester): State<Arc<Tester>>, body: Bytes) -> Response {
    let req: TestRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => return error_response(HttpStatus::BadRequest, &e.to_string()),
    };

    match tester.fire(&req).await {
        Ok(answer) => relay(answer),
        Err(e @ TesterError::InvalidUrl(_)) => {
            error_response(HttpStatus::BadRequest, &e.to_string())
        }
        Err(e @ TesterError::Transport(_)) => {
            error!("test request failed: {}", e);
            error_response(HttpStatus::InternalServerError, &e.to_string())
        }
    }
}

fn relay(answer: TestResponse) -> Response {
    let status = StatusCode::from_u16(answer.status).unwrap_or(StatusCode::BAD_GATEWAY);
    match answer.content_type {
        Some(content_type) => {
            (status, [(header::CONTENT_TYPE, content_type)], answer.body).into_response()
        }
        None => (status, answer.body).into_response(),
    }
}

fn error_response(status: HttpStatus, message: &str) -> Response {
    AxumResponseConverter::from_webhook_response(WebhookResponse::error(status, message))
}
