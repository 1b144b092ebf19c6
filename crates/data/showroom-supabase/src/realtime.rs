//! Realtime change subscription.
//!
//! Connects to the backend's Phoenix-channel websocket, joins one table's
//! `postgres_changes` topic, and forwards every event as a [`ChangeEvent`].
//! Consumers only ever refetch on an event, so the payload's row data is
//! dropped here; no deduplication is attempted.

use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use crate::{Error, Result};

const HEARTBEAT_SECS: u64 = 30;
const MAX_BACKOFF_SHIFT: u32 = 5;

/// What happened to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    Insert,
    Update,
    Delete,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Insert => "INSERT",
            ChangeAction::Update => "UPDATE",
            ChangeAction::Delete => "DELETE",
        }
    }
}

/// A change notification for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub table: String,
    pub action: ChangeAction,
}

/// Websocket endpoint for the realtime service.
pub fn ws_url(base_url: &str, key: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    let scheme = if url.scheme() == "http" { "ws" } else { "wss" };
    url.set_scheme(scheme)
        .map_err(|_| Error::Realtime(format!("unsupported scheme in {base_url}")))?;
    url.set_path("/realtime/v1/websocket");
    url.set_query(Some(&format!("apikey={key}&vsn=1.0.0")));
    Ok(url)
}

/// Channel join frame for one table's change feed.
fn join_message(table: &str) -> serde_json::Value {
    serde_json::json!({
        "topic": format!("realtime:{table}-changes"),
        "event": "phx_join",
        "ref": "1",
        "payload": {
            "config": {
                "postgres_changes": [
                    { "event": "*", "schema": "public", "table": table }
                ]
            }
        }
    })
}

fn heartbeat_message() -> serde_json::Value {
    serde_json::json!({
        "topic": "phoenix",
        "event": "heartbeat",
        "ref": "hb",
        "payload": {}
    })
}

/// Extract a change event from a channel frame. Replies, heartbeat acks,
/// and system messages yield `None`.
fn parse_change(text: &str) -> Option<ChangeEvent> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    if value.get("event")?.as_str()? != "postgres_changes" {
        return None;
    }
    let data = value.get("payload")?.get("data")?;
    let action = match data.get("type")?.as_str()? {
        "INSERT" => ChangeAction::Insert,
        "UPDATE" => ChangeAction::Update,
        "DELETE" => ChangeAction::Delete,
        _ => return None,
    };
    Some(ChangeEvent {
        table: data.get("table")?.as_str()?.to_string(),
        action,
    })
}

/// Subscribe to one table's changes forever, reconnecting with capped
/// exponential backoff. Events are fanned out on `tx`; send failures
/// (no listeners) are ignored.
pub async fn subscribe(
    base_url: String,
    key: String,
    table: String,
    tx: broadcast::Sender<ChangeEvent>,
) {
    let mut attempt: u32 = 0;
    loop {
        let started = tokio::time::Instant::now();
        if let Err(e) = run_channel(&base_url, &key, &table, &tx).await {
            tracing::warn!("realtime channel for {table} dropped: {e}");
        }

        // A connection that survived a while earns a fresh backoff.
        if started.elapsed() > std::time::Duration::from_secs(60) {
            attempt = 0;
        }
        let delay = std::time::Duration::from_secs(1 << attempt.min(MAX_BACKOFF_SHIFT));
        attempt = attempt.saturating_add(1);
        tokio::time::sleep(delay).await;
    }
}

async fn run_channel(
    base_url: &str,
    key: &str,
    table: &str,
    tx: &broadcast::Sender<ChangeEvent>,
) -> Result<()> {
    let url = ws_url(base_url, key)?;
    let (stream, _) = connect_async(url.as_str())
        .await
        .map_err(|e| Error::Realtime(e.to_string()))?;
    let (mut write, mut read) = stream.split();

    write
        .send(Message::Text(join_message(table).to_string()))
        .await
        .map_err(|e| Error::Realtime(e.to_string()))?;
    tracing::info!("subscribed to {table} changes");

    let mut heartbeat = tokio::time::interval(std::time::Duration::from_secs(HEARTBEAT_SECS));
    heartbeat.tick().await; // immediate first tick, the join just went out

    loop {
        tokio::select! {
            _ = heartbeat.tick() => {
                write
                    .send(Message::Text(heartbeat_message().to_string()))
                    .await
                    .map_err(|e| Error::Realtime(e.to_string()))?;
            }
            frame = read.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(event) = parse_change(&text) {
                            tracing::debug!("{} {}", event.table, event.action.as_str());
                            let _ = tx.send(event);
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        write
                            .send(Message::Pong(data))
                            .await
                            .map_err(|e| Error::Realtime(e.to_string()))?;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        return Err(Error::Realtime("connection closed".to_string()));
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(Error::Realtime(e.to_string())),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_url_swaps_scheme() {
        let url = ws_url("https://project.supabase.co", "anon").expect("url builds");
        assert_eq!(
            url.as_str(),
            "wss://project.supabase.co/realtime/v1/websocket?apikey=anon&vsn=1.0.0"
        );

        let url = ws_url("http://localhost:54321", "anon").expect("url builds");
        assert!(url.as_str().starts_with("ws://localhost:54321/"));
    }

    #[test]
    fn test_join_message_shape() {
        let join = join_message("cars");
        assert_eq!(join["topic"], "realtime:cars-changes");
        assert_eq!(join["event"], "phx_join");
        assert_eq!(
            join["payload"]["config"]["postgres_changes"][0]["table"],
            "cars"
        );
        assert_eq!(join["payload"]["config"]["postgres_changes"][0]["event"], "*");
    }

    #[test]
    fn test_heartbeat_targets_phoenix_topic() {
        let hb = heartbeat_message();
        assert_eq!(hb["topic"], "phoenix");
        assert_eq!(hb["event"], "heartbeat");
    }

    #[test]
    fn test_parse_change_event() {
        let frame = r#"{
            "topic": "realtime:cars-changes",
            "event": "postgres_changes",
            "ref": null,
            "payload": {
                "ids": [53953123],
                "data": {
                    "type": "UPDATE",
                    "schema": "public",
                    "table": "cars",
                    "record": { "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7" }
                }
            }
        }"#;

        let event = parse_change(frame).expect("change parses");
        assert_eq!(event.table, "cars");
        assert_eq!(event.action, ChangeAction::Update);
    }

    #[test]
    fn test_parse_ignores_replies_and_noise() {
        let reply = r#"{"topic":"realtime:cars-changes","event":"phx_reply","ref":"1","payload":{"status":"ok"}}"#;
        assert!(parse_change(reply).is_none());

        let heartbeat_ack = r#"{"topic":"phoenix","event":"phx_reply","ref":"hb","payload":{}}"#;
        assert!(parse_change(heartbeat_ack).is_none());

        assert!(parse_change("not json").is_none());
        assert!(parse_change("{}").is_none());
    }
}
