use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use sms_aws_pinpoint::PinpointSmsClient;
use sms_core::SmsGateway;
use sms_phones::{PhoneStore, Registry};
use sms_web_axum::AppState;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::tester::{self, Tester};
use crate::{AppConfig, GatewayConfig, StartupError, echo};

/// Full HTTP surface: phone API, inbound webhook, reply echo, tester and
/// liveness check. Requests running past `request_timeout` get a 408 and
/// their in-flight gateway call is dropped.
pub fn build_app(store: Arc<dyn PhoneStore>, tester: Arc<Tester>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/livez", get(echo::livez))
        .route("/sms-reply", post(echo::sms_reply))
        .merge(sms_web_axum::router(AppState::new(store)))
        .merge(tester::router(tester))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
}

/// Resolve the Pinpoint gateway. Failure here is fatal.
pub async fn connect_gateway(config: &GatewayConfig) -> Result<Arc<dyn SmsGateway>, StartupError> {
    let client = match config.static_credentials() {
        Some((id, secret)) => PinpointSmsClient::new(config.region.as_str(), id, secret)?,
        None => PinpointSmsClient::from_env(config.region.as_str()).await?,
    };
    Ok(Arc::new(client))
}

/// Build everything from `config` and serve until Ctrl-C or SIGTERM.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    let gateway = connect_gateway(&config.gateway).await?;
    let registry: Arc<dyn PhoneStore> = Arc::new(Registry::new(gateway));
    let tester = Arc::new(Tester::new(config.server.request_timeout())?);
    let app = build_app(registry, tester, config.server.request_timeout());

    let address = config.server.socket_address();
    let listener = TcpListener::bind(&address).await?;
    info!(address = %address, "starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
