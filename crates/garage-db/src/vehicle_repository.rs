use garage_core::error::AppError;
use garage_core::models::{Vehicle, VehicleInput, page_window};
use garage_core::traits::VehicleStore;
use sqlx::{PgPool, Pool, Postgres};

/// Repository for vehicles in PostgreSQL.
#[derive(Clone)]
pub struct VehicleRepository {
    pool: Pool<Postgres>,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct VehicleRow {
    id: i64,
    name: String,
    brand: String,
    year: i32,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Vehicle {
            id: row.id,
            name: row.name,
            brand: row.brand,
            year: row.year,
        }
    }
}

impl VehicleStore for VehicleRepository {
    async fn create(&self, vehicle: VehicleInput) -> Result<Vehicle, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO vehicles (name, brand, year)
            VALUES ($1, $2, $3)
            RETURNING id, name, brand, year
            "#,
        )
        .bind(&vehicle.name)
        .bind(&vehicle.brand)
        .bind(vehicle.year)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"SELECT id, name, brand, year FROM vehicles WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, page: Option<u32>) -> Result<Vec<Vehicle>, AppError> {
        let rows = if let Some((limit, offset)) = page_window(page) {
            sqlx::query_as::<_, VehicleRow>(
                r#"
                SELECT id, name, brand, year FROM vehicles
                ORDER BY id ASC
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, VehicleRow>(
                r#"SELECT id, name, brand, year FROM vehicles ORDER BY id ASC"#,
            )
            .fetch_all(&self.pool)
            .await
        }
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            UPDATE vehicles
            SET name = $2, brand = $3, year = $4
            WHERE id = $1
            RETURNING id, name, brand, year
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.name)
        .bind(&vehicle.brand)
        .bind(vehicle.year)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        row.map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("vehicle {}", vehicle.id)))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query(r#"DELETE FROM vehicles WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("vehicle {id}")));
        }
        Ok(())
    }
}
