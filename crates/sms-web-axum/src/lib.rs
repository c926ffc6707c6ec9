use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use bytes::Bytes;
use sms_phones::PhoneStore;
use sms_web_generic::{PhoneProcessor, ResponseConverter};

#[derive(Clone)]
pub struct AppState {
    pub processor: PhoneProcessor,
}

impl AppState {
    pub fn new(store: Arc<dyn PhoneStore>) -> Self {
        Self {
            processor: PhoneProcessor::new(store),
        }
    }
}

/// Axum-specific response converter
pub struct AxumResponseConverter;

impl ResponseConverter for AxumResponseConverter {
    type ResponseType = axum::response::Response;

    fn from_webhook_response(response: sms_core::WebhookResponse) -> Self::ResponseType {
        let status = StatusCode::from_u16(response.status.as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if response.body.is_empty() {
            return status.into_response();
        }
        (
            status,
            [(header::CONTENT_TYPE, response.content_type)],
            response.body,
        )
            .into_response()
    }
}

/// Phone routes:
///
/// - `POST /sms` inbound delivery webhook
/// - `GET /phones`
/// - `GET /phones/{number}/messages`
/// - `POST /phones/{number}/messages/{id}` reply
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sms", post(receive_sms))
        .route("/phones", get(list_phones))
        .route("/phones/{number}/messages", get(list_messages))
        .route("/phones/{number}/messages/{id}", post(reply_to_message))
        .with_state(state)
}

/// POST /sms
pub async fn receive_sms(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    AxumResponseConverter::from_webhook_response(state.processor.receive_sms(&body))
}

/// GET /phones
pub async fn list_phones(State(state): State<AppState>) -> impl IntoResponse {
    AxumResponseConverter::from_webhook_response(state.processor.list_phones())
}

/// GET /phones/{number}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> impl IntoResponse {
    AxumResponseConverter::from_webhook_response(state.processor.list_messages(&number))
}

/// POST /phones/{number}/messages/{id}
pub async fn reply_to_message(
    State(state): State<AppState>,
    Path((number, id)): Path<(String, String)>,
    body: Bytes,
) -> impl IntoResponse {
    let response = state.processor.reply_to_message(&number, &id, &body).await;
    AxumResponseConverter::from_webhook_response(response)
}
