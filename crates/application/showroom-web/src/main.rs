//! Dealership site entry point.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use showroom_config::{AdminConfig, SupabaseConfig, WebConfig};
use showroom_supabase::{ChangeEvent, Store};
use showroom_web::state::AuthState;
use showroom_web::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "showroom_web=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let supabase = SupabaseConfig::from_env()?;
    let admin = AdminConfig::from_env()?;
    let web = WebConfig::from_env();

    let store = Store::new(&supabase.url, &supabase.key)?;
    let auth = AuthState::new(&admin);

    let (changes, _) = tokio::sync::broadcast::channel::<ChangeEvent>(64);
    tokio::spawn(showroom_supabase::subscribe(
        supabase.url.clone(),
        supabase.key.clone(),
        "cars".to_string(),
        changes.clone(),
    ));

    let state = AppState::new(store, auth, changes, web.notify_url);
    showroom_web::serve(state, &web.bind).await
}
