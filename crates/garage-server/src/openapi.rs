use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Garage API",
        version = "0.1.0",
        description = "Vehicle registry with role-based administrator access."
    ),
    paths(
        crate::routes::home,
        crate::routes::login,
        crate::routes::create_administrator,
        crate::routes::list_administrators,
        crate::routes::get_administrator,
        crate::routes::create_vehicle,
        crate::routes::list_vehicles,
        crate::routes::get_vehicle,
        crate::routes::update_vehicle,
        crate::routes::delete_vehicle,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::LoginRequest,
        crate::dto::LoginResponse,
        crate::dto::CreateAdministratorRequest,
        crate::dto::AdministratorResponse,
        crate::dto::VehicleRequest,
        crate::dto::VehicleResponse,
        crate::dto::HomeResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
        crate::dto::ValidationErrorResponse,
    )),
    tags(
        (name = "administrators", description = "Administrator accounts and login"),
        (name = "vehicles", description = "Vehicle registry"),
        (name = "system", description = "Health and API information"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the Bearer token security scheme to the OpenAPI document.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Token returned by POST /administrators/login.",
                        ))
                        .build(),
                ),
            );
        }
    }
}
