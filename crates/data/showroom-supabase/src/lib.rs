//! # Showroom Supabase shim
//!
//! Thin client for the managed backend, covering the three surfaces the
//! site consumes:
//! - PostgREST tables (select / insert / update / delete)
//! - Object storage for car photos
//! - The realtime websocket, reduced to "something changed in table X"
//!
//! The backend owns all schema, identity, and uniqueness rules; nothing in
//! this crate retries, caches, or repairs. Callers get typed rows from
//! `showroom-core` and a flat error enum.

pub mod realtime;
pub mod rest;
pub mod storage;
pub mod store;

pub use realtime::{subscribe, ChangeAction, ChangeEvent};
pub use rest::{Query, RestClient};
pub use storage::{StorageClient, CAR_IMAGES_BUCKET};
pub use store::{tables, Store};

/// Result type for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the managed backend
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Connection(String),

    #[error("store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response decode failed: {0}")]
    Decode(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("realtime channel error: {0}")]
    Realtime(String),
}
