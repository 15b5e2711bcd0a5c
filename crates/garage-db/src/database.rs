use garage_core::auth::AuthService;
use garage_core::{Administrator, AppError};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::administrator_repository::AdministratorRepository;
use crate::config::DatabaseConfig;
use crate::vehicle_repository::VehicleRepository;

/// Database facade: owns the connection pool, runs migrations,
/// and vends repository instances.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL with the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect: {e}")))?;

        tracing::debug!(max_connections = config.max_connections, "Database pool ready");
        Ok(Self { pool })
    }

    /// Create a `Database` from an existing pool (useful for testing).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run all pending migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Migration failed: {e}")))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    /// Insert the default `admin` account when the administrators table is empty.
    pub async fn seed_default_administrator(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Administrator>, AppError> {
        AuthService::new(self.administrator_repo())
            .ensure_default_administrator(email, password)
            .await
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// Get an [`AdministratorRepository`] backed by this pool.
    pub fn administrator_repo(&self) -> AdministratorRepository {
        AdministratorRepository::new(self.pool.clone())
    }

    /// Get a [`VehicleRepository`] backed by this pool.
    pub fn vehicle_repo(&self) -> VehicleRepository {
        VehicleRepository::new(self.pool.clone())
    }
}
