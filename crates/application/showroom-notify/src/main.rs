//! Notification service entry point.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use showroom_config::{NotifyConfig, ResendConfig};
use showroom_notify::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "showroom_notify=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let resend = ResendConfig::from_env()?;
    let config = NotifyConfig::from_env();

    let state = Arc::new(AppState {
        mailer: showroom_resend::Client::new(&resend.api_key),
        from: resend.from,
    });

    showroom_notify::serve(state, &config.bind).await
}
