use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration input. Field names follow the wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub name: String,
    /// Normalized to lowercase before any store access; lookups compare the
    /// normalized form.
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub fitness_level: String,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Persisted identity as the repository sees it. Deliberately not
/// serializable: the hash must never reach a client, so only the
/// [`AuthUser`] projection derives `Serialize`.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub fitness_level: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new identity; the hash is already computed.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub fitness_level: String,
}

/// Public identity view returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub fitness_level: String,
}

impl From<Identity> for AuthUser {
    fn from(i: Identity) -> Self {
        Self { id: i.id, name: i.name, email: i.email, fitness_level: i.fitness_level }
    }
}

/// Decoded session-token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Result of a successful register or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: String,
}
