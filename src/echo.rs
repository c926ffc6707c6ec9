use axum::{http::StatusCode, response::Response};
use bytes::Bytes;
use sms_core::{HttpStatus, WebhookResponse};
use sms_web_axum::AxumResponseConverter;
use sms_web_generic::ResponseConverter;
use tracing::{info, warn};

/// POST /sms-reply: logs whatever JSON the caller sends and acknowledges it.
pub async fn sms_reply(body: Bytes) -> Response {
    let value: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            warn!("sms reply is not json: {}", e);
            return AxumResponseConverter::from_webhook_response(WebhookResponse::error(
                HttpStatus::BadRequest,
                &e.to_string(),
            ));
        }
    };

    let pretty = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
    info!(message = %pretty, "received sms reply");
    AxumResponseConverter::from_webhook_response(WebhookResponse::empty(HttpStatus::Ok))
}

/// GET /livez
pub async fn livez() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
