use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of records returned per page by the list operations.
pub const PAGE_SIZE: u32 = 10;

/// Access level of an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including administrator management and vehicle mutation.
    #[serde(alias = "adm")]
    Admin,
    /// May create and read vehicles.
    Editor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" | "adm" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}

/// A stored administrator account.
///
/// `password` holds the Argon2id PHC string and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Administrator {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
}

/// Administrator ready to be inserted; `password` is already hashed.
#[derive(Debug, Clone)]
pub struct NewAdministrator {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// A stored vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub year: i32,
}

/// Vehicle fields supplied by a client, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInput {
    pub name: String,
    pub brand: String,
    pub year: i32,
}

impl VehicleInput {
    pub fn new(name: impl Into<String>, brand: impl Into<String>, year: i32) -> Self {
        Self {
            name: name.into(),
            brand: brand.into(),
            year,
        }
    }

    /// Attach an id, producing the stored shape.
    pub fn with_id(self, id: i64) -> Vehicle {
        Vehicle {
            id,
            name: self.name,
            brand: self.brand,
            year: self.year,
        }
    }
}

/// Translate an optional 1-indexed page number into `(limit, offset)`.
///
/// `None` means "no pagination". Page 0 is treated as page 1.
pub fn page_window(page: Option<u32>) -> Option<(i64, i64)> {
    page.map(|p| {
        let index = i64::from(p.max(1) - 1);
        let size = i64::from(PAGE_SIZE);
        (size, index * size)
    })
}
