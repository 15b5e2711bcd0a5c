use garage_core::error::AppError;
use garage_core::models::VehicleInput;
use garage_core::traits::VehicleStore;

use crate::integration::common::setup_test_db;

#[tokio::test]
async fn create_and_find_vehicle() {
    let (db, _container) = setup_test_db().await;
    let repo = db.vehicle_repo();

    let created = repo
        .create(VehicleInput::new("Uno", "Fiat", 2013))
        .await
        .unwrap();
    assert!(created.id > 0);

    let fetched = repo
        .find_by_id(created.id)
        .await
        .unwrap()
        .expect("Should find the vehicle");

    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Uno");
    assert_eq!(fetched.brand, "Fiat");
    assert_eq!(fetched.year, 2013);
}

#[tokio::test]
async fn find_unknown_vehicle_returns_none() {
    let (db, _container) = setup_test_db().await;

    let result = db.vehicle_repo().find_by_id(9999).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn ids_are_unique_and_increasing() {
    let (db, _container) = setup_test_db().await;
    let repo = db.vehicle_repo();

    let first = repo.create(VehicleInput::new("Uno", "Fiat", 2013)).await.unwrap();
    let second = repo.create(VehicleInput::new("Gol", "VW", 2015)).await.unwrap();

    assert!(second.id > first.id);
}

#[tokio::test]
async fn update_overwrites_fields() {
    let (db, _container) = setup_test_db().await;
    let repo = db.vehicle_repo();

    let mut vehicle = repo
        .create(VehicleInput::new("Uno", "Fiat", 2013))
        .await
        .unwrap();
    vehicle.name = "Uno Mille".into();
    vehicle.year = 2014;

    let updated = repo.update(&vehicle).await.unwrap();
    assert_eq!(updated, vehicle);

    let fetched = repo.find_by_id(vehicle.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Uno Mille");
    assert_eq!(fetched.year, 2014);
}

#[tokio::test]
async fn update_missing_vehicle_is_not_found() {
    let (db, _container) = setup_test_db().await;

    let ghost = VehicleInput::new("Uno", "Fiat", 2013).with_id(4242);
    let result = db.vehicle_repo().update(&ghost).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn delete_then_find_returns_none() {
    let (db, _container) = setup_test_db().await;
    let repo = db.vehicle_repo();

    let created = repo
        .create(VehicleInput::new("Uno", "Fiat", 2013))
        .await
        .unwrap();
    repo.delete(created.id).await.unwrap();

    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    assert!(matches!(
        repo.delete(created.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn list_is_ordered_and_paginated() {
    let (db, _container) = setup_test_db().await;
    let repo = db.vehicle_repo();

    for i in 0..12 {
        repo.create(VehicleInput::new(format!("car-{i}"), "Fiat", 2000 + i))
            .await
            .unwrap();
    }

    let all = repo.list(None).await.unwrap();
    assert_eq!(all.len(), 12);
    assert_eq!(all[0].name, "car-0");
    assert_eq!(all[11].name, "car-11");

    let page1 = repo.list(Some(1)).await.unwrap();
    assert_eq!(page1.len(), 10);
    assert_eq!(page1[0].name, "car-0");

    let page2 = repo.list(Some(2)).await.unwrap();
    assert_eq!(page2.len(), 2);
    assert_eq!(page2[0].name, "car-10");
}

#[tokio::test]
async fn health_check_succeeds() {
    let (db, _container) = setup_test_db().await;

    db.health_check().await.unwrap();
}
