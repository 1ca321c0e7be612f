//! Audit log operations

use crate::WarehouseClient;
use crate::envelope;
use crate::error::Error;
use crate::model::AuditEntry;

use super::query::Filter;
use super::query::ListQuery;
use super::query::Page;

impl WarehouseClient {
    /// Lists audit entries for one entity (order, inventory record).
    pub async fn list_audit(
        &self,
        entity_id: &str,
        query: &ListQuery,
    ) -> Result<Page<AuditEntry>, Error> {
        let query = query.clone().filter(Filter::eq("entity_id", entity_id));
        let value = self
            .get_json("/audit", Some(&query.to_query_string()))
            .await?;
        Ok(envelope::extract_page(
            &value,
            query.page_index(),
            query.page_size_value(),
        ))
    }
}
