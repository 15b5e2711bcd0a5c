use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Extension, Router, middleware};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use garage_core::error::AppError;
use garage_core::traits::AdministratorStore;
use garage_core::validation::AdministratorInput;
use garage_core::{AuthService, Claims, VehicleService};

use crate::auth::{ADMIN_ONLY, RoleGuard, STAFF, require_role};
use crate::dto::{
    AdministratorResponse, CreateAdministratorRequest, HealthResponse, HomeResponse,
    LoginRequest, LoginResponse, PageQuery, VehicleRequest, VehicleResponse,
};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let admin_guard = RoleGuard::new(state.tokens.clone(), ADMIN_ONLY);
    let staff_guard = RoleGuard::new(state.tokens.clone(), STAFF);

    let admin = Router::new()
        .route(
            "/administrators",
            post(create_administrator).get(list_administrators),
        )
        .route("/administrators/{id}", get(get_administrator))
        .route(
            "/vehicles/{id}",
            put(update_vehicle).delete(delete_vehicle),
        )
        .route_layer(middleware::from_fn_with_state(admin_guard, require_role));

    let staff = Router::new()
        .route("/vehicles", post(create_vehicle).get(list_vehicles))
        .route("/vehicles/{id}", get(get_vehicle))
        .route_layer(middleware::from_fn_with_state(staff_guard, require_role));

    let public = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/administrators/login", post(login))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public.merge(admin).merge(staff).with_state(state)
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "API information", body = HomeResponse)),
    tag = "system"
)]
pub async fn home() -> impl IntoResponse {
    axum::Json(HomeResponse {
        message: "Welcome to the Garage vehicle API",
        docs: "/swagger-ui",
    })
}

// ---------------------------------------------------------------------------
// Administrators
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/administrators/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 401, description = "Unknown email or wrong password", body = crate::dto::ErrorResponse),
    ),
    tag = "administrators"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let auth = AuthService::new(state.db.administrator_repo());

    let Some(administrator) = auth.login(&body.email, &body.password).await? else {
        tracing::warn!(email = %body.email, "Login failed");
        return Err(AppError::Unauthorized.into());
    };

    let token = state.tokens.generate_token(&administrator)?;
    tracing::info!(email = %administrator.email, role = %administrator.role, "Login succeeded");

    Ok(axum::Json(LoginResponse {
        email: administrator.email,
        role: administrator.role,
        token,
    }))
}

#[utoipa::path(
    post,
    path = "/administrators",
    request_body = CreateAdministratorRequest,
    responses(
        (status = 201, description = "Administrator created", body = AdministratorResponse),
        (status = 400, description = "Validation failed", body = crate::dto::ValidationErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
    ),
    security(("bearer" = [])),
    tag = "administrators"
)]
pub async fn create_administrator(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    axum::Json(body): axum::Json<CreateAdministratorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let auth = AuthService::new(state.db.administrator_repo());
    let administrator = auth
        .create_administrator(AdministratorInput {
            email: &body.email,
            password: &body.password,
            role: body.role.as_deref(),
        })
        .await?;

    tracing::info!(
        id = administrator.id,
        created_by = %claims.email,
        "Administrator account added"
    );

    let location = format!("/administrators/{}", administrator.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        axum::Json(AdministratorResponse::from(administrator)),
    ))
}

#[utoipa::path(
    get,
    path = "/administrators",
    params(PageQuery),
    responses(
        (status = 200, description = "Administrators, ordered by id", body = Vec<AdministratorResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
    ),
    security(("bearer" = [])),
    tag = "administrators"
)]
pub async fn list_administrators(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let administrators = state.db.administrator_repo().list(query.page).await?;

    let response: Vec<AdministratorResponse> =
        administrators.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/administrators/{id}",
    params(("id" = i64, Path, description = "Administrator id")),
    responses(
        (status = 200, description = "Administrator", body = AdministratorResponse),
        (status = 404, description = "Administrator not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
    ),
    security(("bearer" = [])),
    tag = "administrators"
)]
pub async fn get_administrator(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let administrator = state
        .db
        .administrator_repo()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("administrator {id}")))?;

    Ok(axum::Json(AdministratorResponse::from(administrator)))
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/vehicles",
    request_body = VehicleRequest,
    responses(
        (status = 201, description = "Vehicle created", body = VehicleResponse),
        (status = 400, description = "Validation failed", body = crate::dto::ValidationErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "vehicles"
)]
pub async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<VehicleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let vehicle = VehicleService::new(state.db.vehicle_repo())
        .create(body.into())
        .await?;

    let location = format!("/vehicles/{}", vehicle.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        axum::Json(VehicleResponse::from(vehicle)),
    ))
}

#[utoipa::path(
    get,
    path = "/vehicles",
    params(PageQuery),
    responses(
        (status = 200, description = "Vehicles, ordered by id", body = Vec<VehicleResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "vehicles"
)]
pub async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let vehicles = VehicleService::new(state.db.vehicle_repo())
        .list(query.page)
        .await?;

    let response: Vec<VehicleResponse> = vehicles.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/vehicles/{id}",
    params(("id" = i64, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "Vehicle", body = VehicleResponse),
        (status = 404, description = "Vehicle not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "vehicles"
)]
pub async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let vehicle = VehicleService::new(state.db.vehicle_repo()).get(id).await?;

    Ok(axum::Json(VehicleResponse::from(vehicle)))
}

#[utoipa::path(
    put,
    path = "/vehicles/{id}",
    params(("id" = i64, Path, description = "Vehicle id")),
    request_body = VehicleRequest,
    responses(
        (status = 200, description = "Vehicle updated", body = VehicleResponse),
        (status = 400, description = "Validation failed", body = crate::dto::ValidationErrorResponse),
        (status = 404, description = "Vehicle not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
    ),
    security(("bearer" = [])),
    tag = "vehicles"
)]
pub async fn update_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<VehicleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let vehicle = VehicleService::new(state.db.vehicle_repo())
        .update(id, body.into())
        .await?;

    Ok(axum::Json(VehicleResponse::from(vehicle)))
}

#[utoipa::path(
    delete,
    path = "/vehicles/{id}",
    params(("id" = i64, Path, description = "Vehicle id")),
    responses(
        (status = 204, description = "Vehicle deleted"),
        (status = 404, description = "Vehicle not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
    ),
    security(("bearer" = [])),
    tag = "vehicles"
)]
pub async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    VehicleService::new(state.db.vehicle_repo())
        .delete(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let db_status = match state.db.health_check().await {
        Ok(()) => "ok",
        Err(_) => "error",
    };

    let status = if db_status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if db_status == "ok" {
            "healthy"
        } else {
            "unhealthy"
        },
        database: db_status,
    };

    (status, axum::Json(response))
}
