//! Field-level checks for client-supplied DTOs.
//!
//! Each validator returns every problem it finds; an empty list means valid.

use crate::models::{Role, VehicleInput};

/// Oldest model year accepted for a vehicle.
pub const MIN_VEHICLE_YEAR: i32 = 1950;

/// Check a vehicle payload before it is created or updated.
pub fn validate_vehicle(input: &VehicleInput) -> Vec<String> {
    let mut messages = Vec::new();

    if input.name.is_empty() {
        messages.push("name cannot be empty".to_string());
    }
    if input.brand.is_empty() {
        messages.push("brand cannot be empty".to_string());
    }
    if input.year < MIN_VEHICLE_YEAR {
        messages.push("vehicle too old, only years after 1950 accepted".to_string());
    }

    messages
}

/// Administrator creation payload, with the role still unparsed.
#[derive(Debug, Clone, Default)]
pub struct AdministratorInput<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub role: Option<&'a str>,
}

/// Check an administrator payload. On success the parsed role is returned.
pub fn validate_administrator(input: &AdministratorInput<'_>) -> Result<Role, Vec<String>> {
    let mut messages = Vec::new();

    if input.email.is_empty() {
        messages.push("email cannot be empty".to_string());
    }
    if input.password.is_empty() {
        messages.push("password cannot be empty".to_string());
    }

    let role = match input.role.map(str::trim) {
        None | Some("") => {
            messages.push("role cannot be empty".to_string());
            None
        }
        Some(raw) => match raw.parse::<Role>() {
            Ok(role) => Some(role),
            Err(_) => {
                messages.push("role must be one of: admin, editor".to_string());
                None
            }
        },
    };

    match role {
        Some(role) if messages.is_empty() => Ok(role),
        _ => Err(messages),
    }
}
