use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(api_health))
}

async fn api_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "showroom-web",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
