//! Dealership website and back office.
//!
//! One binary serves both surfaces: the public showroom (inventory with
//! HTMX-filtered grid, car details, lead forms, testimonials) and the
//! session-protected admin dashboard (car CRUD, image gallery,
//! specification sheets, lead tables, moderation, CSV export, live
//! refresh over SSE).

pub mod forms;
pub mod routes;
pub mod state;
pub mod templates;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Image uploads cap out at 10 MB.
const UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .merge(routes::pages::router())
        .merge(routes::leads::router())
        .merge(routes::health::router())
        .merge(routes::admin::public_router());

    let protected_routes = routes::admin::protected_router()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            routes::admin::require_auth,
        ))
        .layer(DefaultBodyLimit::max(UPLOAD_LIMIT));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(routes::pages::not_found)
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the web server
pub async fn serve(state: AppState, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("showroom listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
    tracing::info!("shutdown signal received");
}
