use serde::{Deserialize, Serialize};

use garage_core::models::{Administrator, Role, Vehicle, VehicleInput};

// ---------------------------------------------------------------------------
// Administrators
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub email: String,
    #[schema(value_type = String, example = "admin")]
    pub role: Role,
    pub token: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateAdministratorRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// `admin` or `editor`.
    pub role: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AdministratorResponse {
    pub id: i64,
    pub email: String,
    #[schema(value_type = String, example = "editor")]
    pub role: Role,
}

impl From<Administrator> for AdministratorResponse {
    fn from(administrator: Administrator) -> Self {
        Self {
            id: administrator.id,
            email: administrator.email,
            role: administrator.role,
        }
    }
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

/// Body of `POST /vehicles` and `PUT /vehicles/{id}`.
///
/// Missing fields deserialize to empty values so that validation, not the
/// JSON extractor, reports them.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct VehicleRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub year: i32,
}

impl From<VehicleRequest> for VehicleInput {
    fn from(request: VehicleRequest) -> Self {
        VehicleInput::new(request.name, request.brand, request.year)
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct VehicleResponse {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub year: i32,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            name: vehicle.name,
            brand: vehicle.brand,
            year: vehicle.year,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct PageQuery {
    /// 1-based page of 10 records; omit to list everything.
    pub page: Option<u32>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HomeResponse {
    pub message: &'static str,
    pub docs: &'static str,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ValidationErrorResponse {
    pub messages: Vec<String>,
}
