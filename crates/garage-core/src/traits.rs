use std::future::Future;

use crate::error::AppError;
use crate::models::{Administrator, NewAdministrator, Vehicle, VehicleInput};

/// Persists and retrieves administrator accounts.
pub trait AdministratorStore: Send + Sync + Clone {
    /// Insert a new administrator. Returns the stored record with its id.
    fn create(
        &self,
        administrator: NewAdministrator,
    ) -> impl Future<Output = Result<Administrator, AppError>> + Send;

    fn find_by_id(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<Administrator>, AppError>> + Send;

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Administrator>, AppError>> + Send;

    /// List administrators in insertion order, optionally paginated (1-indexed).
    fn list(
        &self,
        page: Option<u32>,
    ) -> impl Future<Output = Result<Vec<Administrator>, AppError>> + Send;

    fn count(&self) -> impl Future<Output = Result<i64, AppError>> + Send;
}

/// Persists and retrieves vehicles.
pub trait VehicleStore: Send + Sync + Clone {
    /// Insert a new vehicle. Returns the stored record with its id.
    fn create(
        &self,
        vehicle: VehicleInput,
    ) -> impl Future<Output = Result<Vehicle, AppError>> + Send;

    fn find_by_id(&self, id: i64)
    -> impl Future<Output = Result<Option<Vehicle>, AppError>> + Send;

    /// List vehicles in insertion order, optionally paginated (1-indexed).
    fn list(
        &self,
        page: Option<u32>,
    ) -> impl Future<Output = Result<Vec<Vehicle>, AppError>> + Send;

    /// Overwrite the vehicle matched by `vehicle.id`.
    ///
    /// Returns [`AppError::NotFound`] if no such vehicle exists.
    fn update(&self, vehicle: &Vehicle) -> impl Future<Output = Result<Vehicle, AppError>> + Send;

    /// Remove the vehicle with the given id.
    ///
    /// Returns [`AppError::NotFound`] if no such vehicle exists.
    fn delete(&self, id: i64) -> impl Future<Output = Result<(), AppError>> + Send;
}
