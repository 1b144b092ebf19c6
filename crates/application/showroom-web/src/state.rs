//! Application state for the site and back-office.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use showroom_config::AdminConfig;
use showroom_supabase::{ChangeEvent, Store};

/// Admin session
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

impl AdminSession {
    pub fn new(duration_hours: i64) -> Self {
        let now = chrono::Utc::now();
        Self {
            token: generate_token(),
            created_at: now,
            expires_at: now + chrono::Duration::hours(duration_hours),
        }
    }

    pub fn is_valid(&self) -> bool {
        chrono::Utc::now() < self.expires_at
    }
}

/// Generate a secure random token
pub fn generate_token() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    hex::encode(bytes)
}

/// Hash a password with salt
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// The single back-office account, held hashed.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password_hash: String,
    pub salt: String,
}

impl AdminCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        use rand::Rng;
        let salt: String = (0..16)
            .map(|_| rand::thread_rng().gen_range('a'..='z'))
            .collect();
        let password_hash = hash_password(password, &salt);
        Self {
            username: username.to_string(),
            password_hash,
            salt,
        }
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && hash_password(password, &self.salt) == self.password_hash
    }
}

/// Authentication state for the admin dashboard
#[derive(Clone)]
pub struct AuthState {
    admin: AdminCredentials,
    session_hours: i64,
    /// Active sessions (token -> session)
    pub sessions: Arc<RwLock<HashMap<String, AdminSession>>>,
    /// CSRF tokens (token -> expiry)
    pub csrf_tokens: Arc<RwLock<HashMap<String, chrono::DateTime<chrono::Utc>>>>,
}

impl AuthState {
    pub fn new(config: &AdminConfig) -> Self {
        Self {
            admin: AdminCredentials::new(&config.username, &config.password),
            session_hours: config.session_hours,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            csrf_tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Authenticate and create session
    pub fn login(&self, username: &str, password: &str) -> Option<AdminSession> {
        if !self.admin.verify(username, password) {
            return None;
        }
        let session = AdminSession::new(self.session_hours);
        self.sessions
            .write()
            .unwrap()
            .insert(session.token.clone(), session.clone());
        Some(session)
    }

    /// Validate a session token
    pub fn validate_token(&self, token: &str) -> Option<AdminSession> {
        let sessions = self.sessions.read().unwrap();
        sessions.get(token).filter(|s| s.is_valid()).cloned()
    }

    /// Logout (invalidate session)
    pub fn logout(&self, token: &str) {
        self.sessions.write().unwrap().remove(token);
    }

    /// Generate CSRF token
    pub fn generate_csrf(&self) -> String {
        let token = generate_token();
        let expiry = chrono::Utc::now() + chrono::Duration::hours(1);
        self.csrf_tokens
            .write()
            .unwrap()
            .insert(token.clone(), expiry);
        token
    }

    /// Validate CSRF token
    pub fn validate_csrf(&self, token: &str) -> bool {
        let tokens = self.csrf_tokens.read().unwrap();
        if let Some(expiry) = tokens.get(token) {
            return chrono::Utc::now() < *expiry;
        }
        false
    }

    /// Clean up expired sessions and CSRF tokens
    pub fn cleanup_expired(&self) {
        let now = chrono::Utc::now();
        self.sessions.write().unwrap().retain(|_, s| s.expires_at > now);
        self.csrf_tokens.write().unwrap().retain(|_, e| *e > now);
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Data access to the managed backend
    pub store: Store,
    /// Admin authentication
    pub auth: AuthState,
    /// Fan-out of realtime change events to SSE subscribers
    pub changes: tokio::sync::broadcast::Sender<ChangeEvent>,
    /// Notification service endpoint, if configured
    pub notify_url: Option<String>,
    /// Client for calling the notification service
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(
        store: Store,
        auth: AuthState,
        changes: tokio::sync::broadcast::Sender<ChangeEvent>,
        notify_url: Option<String>,
    ) -> Self {
        Self {
            store,
            auth,
            changes,
            notify_url,
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_auth() -> AuthState {
        AuthState::new(&AdminConfig {
            username: "admin".to_string(),
            password: "androsan2025".to_string(),
            session_hours: 24,
        })
    }

    #[test]
    fn test_password_hashing() {
        let hash1 = hash_password("my_password", "salt_a");
        let hash2 = hash_password("my_password", "salt_a");
        assert_eq!(hash1, hash2);

        assert_ne!(hash1, hash_password("other_password", "salt_a"));
        assert_ne!(hash1, hash_password("my_password", "salt_b"));
    }

    #[test]
    fn test_credentials_verify() {
        let creds = AdminCredentials::new("admin", "secret");
        assert!(creds.verify("admin", "secret"));
        assert!(!creds.verify("admin", "wrong"));
        assert!(!creds.verify("root", "secret"));
    }

    #[test]
    fn test_login_logout_cycle() {
        let auth = test_auth();

        let session = auth.login("admin", "androsan2025").expect("valid login");
        assert!(auth.validate_token(&session.token).is_some());

        auth.logout(&session.token);
        assert!(auth.validate_token(&session.token).is_none());
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let auth = test_auth();
        assert!(auth.login("admin", "wrongpassword").is_none());
        assert!(auth.login("nobody", "androsan2025").is_none());
    }

    #[test]
    fn test_csrf_tokens() {
        let auth = test_auth();

        let token = auth.generate_csrf();
        assert!(auth.validate_csrf(&token));
        assert!(!auth.validate_csrf("invalid_token"));
    }

    #[test]
    fn test_cleanup_drops_expired_sessions() {
        let auth = test_auth();
        let session = auth.login("admin", "androsan2025").expect("valid login");

        {
            let mut sessions = auth.sessions.write().unwrap();
            let stored = sessions.get_mut(&session.token).expect("stored");
            stored.expires_at = chrono::Utc::now() - chrono::Duration::hours(1);
        }

        auth.cleanup_expired();
        assert!(auth.sessions.read().unwrap().is_empty());
    }
}
