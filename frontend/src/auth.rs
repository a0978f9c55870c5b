use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::backend::{BackendClient, BackendError, Query};
use crate::storage;
use crate::validation::{self, Required, ValidationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "cliente")]
    Customer,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::Customer];

    /// The value stored in the `tipo` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "cliente",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Customer => "Customer",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "admin" => Some(Role::Admin),
            "cliente" => Some(Role::Customer),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(rename = "tipo")]
    pub role: Role,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// A `users` row including the password hash. Never stored in the session.
#[derive(Clone, Debug, Deserialize)]
pub struct StoredUser {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub password_hash: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AuthError::Hashing(err.to_string())
    }
}

/// Argon2id password hashing producing self-describing PHC strings.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Custom cost: memory in KiB, iterations and lanes.
    #[cfg(test)]
    pub fn with_params(memory_kib: u32, iterations: u32, lanes: u32) -> Result<Self, AuthError> {
        let params = argon2::Params::new(memory_kib, iterations, lanes, None)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
        })
    }

    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// `false` for a wrong password and for anything that is not a PHC string.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(err) => {
                warn!(%err, "stored password hash is not a PHC string");
                false
            }
        }
    }
}

pub async fn login(
    client: &BackendClient,
    hasher: &PasswordHasher,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    let email = email.trim().to_lowercase();
    let stored: Option<StoredUser> = client
        .select_one("users", &Query::new().eq("email", &email))
        .await?;
    match stored {
        Some(row) if hasher.verify(password, &row.password_hash) => {
            info!(user_id = %row.user.id, role = row.user.role.as_str(), "signed in");
            Ok(row.user)
        }
        _ => {
            warn!("sign-in rejected");
            Err(AuthError::InvalidCredentials)
        }
    }
}

pub fn load_session() -> Option<User> {
    storage::load(storage::SESSION_KEY)
}

pub fn save_session(user: &User) {
    storage::save(storage::SESSION_KEY, user);
}

pub fn clear_session() {
    storage::remove(storage::SESSION_KEY);
}

#[derive(Serialize)]
struct ProfileChanges<'a> {
    name: &'a str,
    email: &'a str,
}

/// Saves the signed-in user's name and email and returns the updated user.
pub async fn update_profile(
    client: &BackendClient,
    user: &User,
    name: &str,
    email: &str,
) -> Result<User, AuthError> {
    Required::new()
        .field("Name", name)
        .field("Email", email)
        .check()?;
    let email = validation::email(email)?;
    let name = name.trim();
    client
        .update(
            "users",
            &Query::new().eq("id", &user.id),
            &ProfileChanges { name, email: &email },
        )
        .await?;
    Ok(User {
        name: name.to_string(),
        email,
        ..user.clone()
    })
}

#[cfg(test)]
pub(crate) fn sample_user(role: Role) -> User {
    User {
        id: "u1".into(),
        email: "ana@store.com".into(),
        name: "Ana Souza".into(),
        role,
        phone: None,
        created_at: Some("2024-01-05T10:00:00Z".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_params(1024, 1, 1).unwrap()
    }

    #[test]
    fn role_uses_stored_values() {
        assert_eq!(serde_json::to_string(&Role::Customer).unwrap(), "\"cliente\"");
        assert_eq!(serde_json::from_str::<Role>("\"admin\"").unwrap(), Role::Admin);
        assert!(serde_json::from_str::<Role>("\"owner\"").is_err());
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn hashes_verify_and_are_salted() {
        let hasher = fast_hasher();
        let first = hasher.hash("correct horse").unwrap();
        let second = hasher.hash("correct horse").unwrap();
        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(hasher.verify("correct horse", &first));
        assert!(!hasher.verify("wrong horse", &first));
    }

    #[test]
    fn legacy_encoded_passwords_do_not_verify() {
        // base64("password123")
        assert!(!fast_hasher().verify("password123", "cGFzc3dvcmQxMjM="));
        assert!(!fast_hasher().verify("", ""));
    }

    #[test]
    fn invalid_cost_is_an_error() {
        assert!(matches!(
            PasswordHasher::with_params(1, 0, 0),
            Err(AuthError::Hashing(_))
        ));
    }

    #[test]
    fn stored_user_rows_split_out_the_hash() {
        let row = r#"{"id":"u1","email":"a@b.co","name":"Ana","tipo":"cliente","phone":null,"password_hash":"x","created_at":"2024-01-01"}"#;
        let stored: StoredUser = serde_json::from_str(row).unwrap();
        assert_eq!(stored.user.role, Role::Customer);
        assert_eq!(stored.password_hash, "x");
        let session = serde_json::to_string(&stored.user).unwrap();
        assert!(!session.contains("password_hash"));
    }

    #[test]
    fn first_name() {
        assert_eq!(sample_user(Role::Customer).first_name(), "Ana");
    }
}
