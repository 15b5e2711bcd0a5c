//! Test utilities: in-memory implementations of the store traits.
//!
//! Each store owns its records behind `Arc<Mutex<_>>`; clones share state,
//! separate instances never do. Build a fresh store per test.

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::{Administrator, NewAdministrator, Vehicle, VehicleInput, page_window};
use crate::traits::{AdministratorStore, VehicleStore};

fn paginate<T: Clone>(records: &[T], page: Option<u32>) -> Vec<T> {
    match page_window(page) {
        None => records.to_vec(),
        Some((limit, offset)) => records
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect(),
    }
}

struct Table<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

// ---------------------------------------------------------------------------
// InMemoryAdministratorStore
// ---------------------------------------------------------------------------

/// Administrator store backed by an in-memory Vec.
#[derive(Clone, Default)]
pub struct InMemoryAdministratorStore {
    table: Arc<Mutex<Table<Administrator>>>,
}

impl InMemoryAdministratorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AdministratorStore for InMemoryAdministratorStore {
    async fn create(&self, administrator: NewAdministrator) -> Result<Administrator, AppError> {
        let mut table = self.table.lock().unwrap();
        if table.rows.iter().any(|a| a.email == administrator.email) {
            return Err(AppError::Validation(vec![format!(
                "email already registered: {}",
                administrator.email
            )]));
        }
        let stored = Administrator {
            id: table.allocate_id(),
            email: administrator.email,
            password: administrator.password,
            role: administrator.role,
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Administrator>, AppError> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Administrator>, AppError> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|a| a.email == email).cloned())
    }

    async fn list(&self, page: Option<u32>) -> Result<Vec<Administrator>, AppError> {
        let table = self.table.lock().unwrap();
        Ok(paginate(&table.rows, page))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.table.lock().unwrap().rows.len() as i64)
    }
}

// ---------------------------------------------------------------------------
// InMemoryVehicleStore
// ---------------------------------------------------------------------------

/// Vehicle store backed by an in-memory Vec.
#[derive(Clone, Default)]
pub struct InMemoryVehicleStore {
    table: Arc<Mutex<Table<Vehicle>>>,
    error: Arc<Mutex<Option<AppError>>>,
}

impl InMemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose next operation fails with `error`.
    pub fn with_error(error: AppError) -> Self {
        Self {
            table: Arc::default(),
            error: Arc::new(Mutex::new(Some(error))),
        }
    }

    fn take_error(&self) -> Result<(), AppError> {
        match self.error.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl VehicleStore for InMemoryVehicleStore {
    async fn create(&self, vehicle: VehicleInput) -> Result<Vehicle, AppError> {
        self.take_error()?;
        let mut table = self.table.lock().unwrap();
        let stored = vehicle.with_id(table.allocate_id());
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>, AppError> {
        self.take_error()?;
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|v| v.id == id).cloned())
    }

    async fn list(&self, page: Option<u32>) -> Result<Vec<Vehicle>, AppError> {
        self.take_error()?;
        let table = self.table.lock().unwrap();
        Ok(paginate(&table.rows, page))
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        self.take_error()?;
        let mut table = self.table.lock().unwrap();
        match table.rows.iter_mut().find(|v| v.id == vehicle.id) {
            Some(existing) => {
                *existing = vehicle.clone();
                Ok(existing.clone())
            }
            None => Err(AppError::NotFound(format!("vehicle {}", vehicle.id))),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.take_error()?;
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|v| v.id != id);
        if table.rows.len() == before {
            return Err(AppError::NotFound(format!("vehicle {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[tokio::test]
    async fn test_vehicle_roundtrip() {
        let store = InMemoryVehicleStore::new();
        let created = store
            .create(VehicleInput::new("Uno", "Fiat", 2013))
            .await
            .unwrap();

        let fetched = store.find_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_delete_then_find_is_none() {
        let store = InMemoryVehicleStore::new();
        let created = store
            .create(VehicleInput::new("Uno", "Fiat", 2013))
            .await
            .unwrap();

        store.delete(created.id).await.unwrap();
        assert!(store.find_by_id(created.id).await.unwrap().is_none());
        assert!(matches!(
            store.delete(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = InMemoryVehicleStore::new();
        let first = store.create(VehicleInput::new("A", "B", 2000)).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.create(VehicleInput::new("C", "D", 2001)).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_update_missing_vehicle() {
        let store = InMemoryVehicleStore::new();
        let ghost = VehicleInput::new("Uno", "Fiat", 2013).with_id(42);
        assert!(matches!(
            store.update(&ghost).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let store = InMemoryVehicleStore::new();
        for i in 0..25 {
            store
                .create(VehicleInput::new(format!("car-{i}"), "Fiat", 2000 + i))
                .await
                .unwrap();
        }

        assert_eq!(store.list(None).await.unwrap().len(), 25);

        let page1 = store.list(Some(1)).await.unwrap();
        assert_eq!(page1.len(), 10);
        assert_eq!(page1[0].name, "car-0");

        let page3 = store.list(Some(3)).await.unwrap();
        assert_eq!(page3.len(), 5);
        assert_eq!(page3[0].name, "car-20");

        assert!(store.list(Some(4)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stores_do_not_share_state() {
        let a = InMemoryAdministratorStore::new();
        let b = InMemoryAdministratorStore::new();
        a.create(NewAdministrator {
            email: "admin@gmail.com".into(),
            password: "hash".into(),
            role: Role::Admin,
        })
        .await
        .unwrap();

        assert_eq!(a.count().await.unwrap(), 1);
        assert_eq!(b.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_injected_error() {
        let store = InMemoryVehicleStore::with_error(AppError::DatabaseError("down".into()));
        assert!(matches!(
            store.list(None).await,
            Err(AppError::DatabaseError(_))
        ));
        assert!(store.list(None).await.unwrap().is_empty());
    }
}
