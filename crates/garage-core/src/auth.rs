//! Credential checks and bearer token issuance.
//!
//! Passwords are stored as Argon2id PHC strings. Tokens are HS256 JWTs
//! carrying the administrator's email and role.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use std::sync::LazyLock;

use argon2::Argon2;
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Administrator, NewAdministrator, Role};
use crate::traits::AdministratorStore;
use crate::validation::{AdministratorInput, validate_administrator};

/// Default lifetime of an issued token, in hours.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Hash a plaintext password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}

/// Hash checked when a login names an unknown email, so that both failure
/// paths pay for one Argon2 verification.
static DECOY_HASH: LazyLock<Option<String>> = LazyLock::new(|| {
    let salt = SaltString::encode_b64(b"garage-login-decoy").ok()?;
    Argon2::default()
        .hash_password(b"decoy-password", &salt)
        .map(|hash| hash.to_string())
        .ok()
});

fn decoy_hash() -> &'static str {
    DECOY_HASH.as_deref().unwrap_or_default()
}

/// Check a plaintext password against a stored PHC hash.
///
/// Malformed hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// JWT claims payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub role: Role,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

/// Signs and verifies bearer tokens with a symmetric key.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build a token service. An empty secret is a configuration error.
    pub fn new(secret: &str, ttl: TimeDelta) -> Result<Self, AppError> {
        if secret.is_empty() {
            return Err(AppError::ConfigError(
                "token signing key must not be empty".into(),
            ));
        }
        if ttl <= TimeDelta::zero() {
            return Err(AppError::ConfigError("token TTL must be positive".into()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    /// Issue a token for `administrator`, valid for the configured TTL.
    pub fn generate_token(&self, administrator: &Administrator) -> Result<String, AppError> {
        self.generate_token_at(administrator, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`.
    pub fn generate_token_at(
        &self,
        administrator: &Administrator,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            email: administrator.email.clone(),
            role: administrator.role,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Token(e.to_string()))
    }

    /// Check signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                AppError::Unauthorized
            })
    }
}

/// Administrator login and account creation on top of an [`AdministratorStore`].
#[derive(Clone)]
pub struct AuthService<S> {
    store: S,
}

impl<S: AdministratorStore> AuthService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Look up `email` and verify `password`.
    ///
    /// Unknown email and wrong password both yield `None`, and both run a
    /// full hash verification.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<Administrator>, AppError> {
        let found = self.store.find_by_email(email).await?;
        let stored_hash = match &found {
            Some(administrator) => administrator.password.as_str(),
            None => decoy_hash(),
        };

        let matches = verify_password(password, stored_hash);
        Ok(found.filter(|_| matches))
    }

    /// Validate, hash the password, and persist a new administrator.
    pub async fn create_administrator(
        &self,
        input: AdministratorInput<'_>,
    ) -> Result<Administrator, AppError> {
        let role = validate_administrator(&input).map_err(AppError::Validation)?;
        let password = hash_password(input.password)?;

        let administrator = self
            .store
            .create(NewAdministrator {
                email: input.email.to_string(),
                password,
                role,
            })
            .await?;

        tracing::info!(id = administrator.id, role = %administrator.role, "Administrator created");
        Ok(administrator)
    }

    /// Insert an `admin`-role account if no administrators exist yet.
    ///
    /// Returns the created account, or `None` if the store was already populated.
    /// Losing a race against another process seeding the same email also
    /// yields `None`.
    pub async fn ensure_default_administrator(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Administrator>, AppError> {
        if self.store.count().await? > 0 {
            return Ok(None);
        }

        let created = self
            .create_administrator(AdministratorInput {
                email,
                password,
                role: Some(Role::Admin.as_str()),
            })
            .await;

        let administrator = match created {
            Ok(administrator) => administrator,
            Err(AppError::Validation(messages)) => {
                if self.store.find_by_email(email).await?.is_some() {
                    tracing::info!(%email, "Default administrator already seeded");
                    return Ok(None);
                }
                return Err(AppError::Validation(messages));
            }
            Err(e) => return Err(e),
        };

        tracing::info!(email = %administrator.email, "Seeded default administrator");
        Ok(Some(administrator))
    }
}
