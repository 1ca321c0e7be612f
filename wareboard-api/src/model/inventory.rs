//! Inventory models

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A stock position for one SKU at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub sku: String,
    pub description: String,
    pub warehouse_id: String,
    pub location_code: String,
    /// Units physically present.
    pub on_hand: i64,
    /// Units allocated to open orders.
    #[serde(default)]
    pub reserved: i64,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Units available to promise.
    pub fn available(&self) -> i64 {
        self.on_hand - self.reserved
    }
}
