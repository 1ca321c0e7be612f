//! Inventory operations

use crate::WarehouseClient;
use crate::envelope;
use crate::error::Error;
use crate::model::InventoryItem;

use super::query::ListQuery;
use super::query::Page;

impl WarehouseClient {
    /// Lists inventory positions matching the query.
    pub async fn list_inventory(&self, query: &ListQuery) -> Result<Page<InventoryItem>, Error> {
        let value = self
            .get_json("/inventory", Some(&query.to_query_string()))
            .await?;
        Ok(envelope::extract_page(
            &value,
            query.page_index(),
            query.page_size_value(),
        ))
    }
}
