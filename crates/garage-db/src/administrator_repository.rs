use garage_core::error::AppError;
use garage_core::models::{Administrator, NewAdministrator, page_window};
use garage_core::traits::AdministratorStore;
use sqlx::{PgPool, Pool, Postgres};

/// Repository for administrator accounts in PostgreSQL.
#[derive(Clone)]
pub struct AdministratorRepository {
    pool: Pool<Postgres>,
}

impl AdministratorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct AdministratorRow {
    id: i64,
    email: String,
    password: String,
    role: String,
}

impl TryFrom<AdministratorRow> for Administrator {
    type Error = AppError;

    fn try_from(row: AdministratorRow) -> Result<Self, Self::Error> {
        let role = row.role.parse().map_err(AppError::DatabaseError)?;
        Ok(Administrator {
            id: row.id,
            email: row.email,
            password: row.password,
            role,
        })
    }
}

fn map_insert_error(err: sqlx::Error, email: &str) -> AppError {
    match err.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => {
            AppError::Validation(vec![format!("email already registered: {email}")])
        }
        _ => AppError::DatabaseError(err.to_string()),
    }
}

impl AdministratorStore for AdministratorRepository {
    async fn create(&self, administrator: NewAdministrator) -> Result<Administrator, AppError> {
        let row = sqlx::query_as::<_, AdministratorRow>(
            r#"
            INSERT INTO administrators (email, password, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, password, role
            "#,
        )
        .bind(&administrator.email)
        .bind(&administrator.password)
        .bind(administrator.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &administrator.email))?;

        Administrator::try_from(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Administrator>, AppError> {
        let row = sqlx::query_as::<_, AdministratorRow>(
            r#"SELECT id, email, password, role FROM administrators WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        row.map(Administrator::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Administrator>, AppError> {
        let row = sqlx::query_as::<_, AdministratorRow>(
            r#"SELECT id, email, password, role FROM administrators WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        row.map(Administrator::try_from).transpose()
    }

    async fn list(&self, page: Option<u32>) -> Result<Vec<Administrator>, AppError> {
        let rows = if let Some((limit, offset)) = page_window(page) {
            sqlx::query_as::<_, AdministratorRow>(
                r#"
                SELECT id, email, password, role FROM administrators
                ORDER BY id ASC
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, AdministratorRow>(
                r#"SELECT id, email, password, role FROM administrators ORDER BY id ASC"#,
            )
            .fetch_all(&self.pool)
            .await
        }
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Administrator::try_from).collect()
    }

    async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM administrators"#)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(count)
    }
}
