use crate::error::AppError;
use crate::models::{Vehicle, VehicleInput};
use crate::traits::VehicleStore;
use crate::validation::validate_vehicle;

/// Vehicle registry operations on top of a [`VehicleStore`].
///
/// Mutations check that the record exists before validating the payload, so
/// an unknown id is always reported as not found.
#[derive(Clone)]
pub struct VehicleService<S> {
    store: S,
}

fn validated(input: VehicleInput) -> Result<VehicleInput, AppError> {
    let messages = validate_vehicle(&input);
    if messages.is_empty() {
        Ok(input)
    } else {
        Err(AppError::Validation(messages))
    }
}

impl<S: VehicleStore> VehicleService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: VehicleInput) -> Result<Vehicle, AppError> {
        let vehicle = self.store.create(validated(input)?).await?;
        tracing::info!(id = vehicle.id, name = %vehicle.name, "Vehicle created");
        Ok(vehicle)
    }

    pub async fn get(&self, id: i64) -> Result<Vehicle, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("vehicle {id}")))
    }

    pub async fn list(&self, page: Option<u32>) -> Result<Vec<Vehicle>, AppError> {
        self.store.list(page).await
    }

    pub async fn update(&self, id: i64, input: VehicleInput) -> Result<Vehicle, AppError> {
        self.get(id).await?;

        let vehicle = self.store.update(&validated(input)?.with_id(id)).await?;
        tracing::info!(id, "Vehicle updated");
        Ok(vehicle)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.get(id).await?;

        self.store.delete(id).await?;
        tracing::info!(id, "Vehicle deleted");
        Ok(())
    }
}
