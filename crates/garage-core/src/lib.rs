pub mod auth;
pub mod error;
pub mod models;
pub mod traits;
pub mod validation;
pub mod vehicles;

#[cfg(test)]
pub mod testutil;

pub use auth::{AuthService, Claims, TokenService};
pub use error::AppError;
pub use models::{Administrator, NewAdministrator, Role, Vehicle, VehicleInput};
pub use traits::{AdministratorStore, VehicleStore};
pub use validation::{validate_administrator, validate_vehicle};
pub use vehicles::VehicleService;
