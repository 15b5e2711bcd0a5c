use chrono::TimeDelta;

use garage_core::AppError;
use garage_core::auth::DEFAULT_TOKEN_TTL_HOURS;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SEED_EMAIL: &str = "admin@gmail.com";
pub const DEFAULT_SEED_PASSWORD: &str = "admin";

/// Server settings read from the environment.
#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl: TimeDelta,
    pub seed_email: String,
    pub seed_password: String,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("token_ttl", &self.token_ttl)
            .field("seed_email", &self.seed_email)
            .finish_non_exhaustive()
    }
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `GARAGE_JWT_SECRET` (required, non-empty)
    /// - `GARAGE_SERVER_PORT` (optional, defaults to 3000)
    /// - `GARAGE_TOKEN_TTL_HOURS` (optional, defaults to 24)
    /// - `GARAGE_SEED_ADMIN_EMAIL` / `GARAGE_SEED_ADMIN_PASSWORD` (optional)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let jwt_secret = lookup("GARAGE_JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AppError::ConfigError("GARAGE_JWT_SECRET must be set to a non-empty value".into())
            })?;

        let port = match lookup("GARAGE_SERVER_PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse().map_err(|_| {
                AppError::ConfigError(format!("Invalid GARAGE_SERVER_PORT '{raw}'"))
            })?,
        };

        let ttl_hours: i64 = match lookup("GARAGE_TOKEN_TTL_HOURS") {
            None => DEFAULT_TOKEN_TTL_HOURS,
            Some(raw) => match raw.parse() {
                Ok(hours) if hours > 0 => hours,
                _ => {
                    return Err(AppError::ConfigError(format!(
                        "Invalid GARAGE_TOKEN_TTL_HOURS '{raw}': must be a positive integer"
                    )));
                }
            },
        };
        let token_ttl = TimeDelta::try_hours(ttl_hours).ok_or_else(|| {
            AppError::ConfigError(format!("GARAGE_TOKEN_TTL_HOURS '{ttl_hours}' is too large"))
        })?;

        Ok(Self {
            port,
            jwt_secret,
            token_ttl,
            seed_email: lookup("GARAGE_SEED_ADMIN_EMAIL")
                .unwrap_or_else(|| DEFAULT_SEED_EMAIL.to_string()),
            seed_password: lookup("GARAGE_SEED_ADMIN_PASSWORD")
                .unwrap_or_else(|| DEFAULT_SEED_PASSWORD.to_string()),
        })
    }
}
