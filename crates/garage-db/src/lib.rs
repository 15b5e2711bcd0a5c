pub mod administrator_repository;
pub mod config;
pub mod database;
pub mod vehicle_repository;

pub use administrator_repository::AdministratorRepository;
pub use config::DatabaseConfig;
pub use database::Database;
pub use vehicle_repository::VehicleRepository;
