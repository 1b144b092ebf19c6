//! Lead notification service
//!
//! Small standalone HTTP service that turns a tagged lead payload into one
//! confirmation email through Resend. The browser calls it directly after
//! a booking, so CORS is open and the header allowlist matches what the
//! site's fetch layer sends.

pub mod notification;

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, StatusCode};
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use showroom_resend::EmailMessage;

pub use notification::Notification;

pub struct AppState {
    pub mailer: showroom_resend::Client,
    pub from: String,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ]);

    Router::new()
        .route("/send-notification-email", post(send_notification))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn send_notification(
    State(state): State<Arc<AppState>>,
    Json(request): Json<Notification>,
) -> impl IntoResponse {
    let message = EmailMessage {
        from: state.from.clone(),
        to: vec![request.recipient().to_string()],
        subject: request.subject().to_string(),
        html: request.html(),
    };

    match state.mailer.send(&message).await {
        Ok(sent) => (StatusCode::OK, Json(json!(sent))).into_response(),
        Err(e) => {
            tracing::error!("notification email failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "showroom-notify" }))
}

/// Start the service on `addr`.
pub async fn serve(state: Arc<AppState>, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("notification service listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
