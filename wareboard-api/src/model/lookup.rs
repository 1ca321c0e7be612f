//! Lookup models for dropdown data.

use serde::Deserialize;
use serde::Serialize;

/// A warehouse site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: String,
    pub code: String,
    pub name: String,
}

/// A storage location within a warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub warehouse_id: String,
    pub code: String,
    #[serde(default)]
    pub zone: Option<String>,
}

/// A customer, as shown in order filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
}
