use thiserror::Error;

/// Application-wide error types for Garage.
#[derive(Error, Debug)]
pub enum AppError {
    /// One or more DTO fields failed validation.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Login failed, or the bearer token is missing, malformed or expired.
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated, but the role is not allowed on this route.
    #[error("Forbidden")]
    Forbidden,

    /// The requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Missing or invalid configuration.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Token could not be signed.
    #[error("Token error: {0}")]
    Token(String),

    /// Password could not be hashed.
    #[error("Password hash error: {0}")]
    PasswordHash(String),
}
