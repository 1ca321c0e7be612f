//! Warehouse task operations

use serde_json::json;

use crate::WarehouseClient;
use crate::envelope;
use crate::error::Error;
use crate::model::TaskStatus;
use crate::model::WarehouseTask;

use super::query::ListQuery;
use super::query::Page;

impl WarehouseClient {
    /// Lists warehouse tasks matching the query.
    pub async fn list_tasks(&self, query: &ListQuery) -> Result<Page<WarehouseTask>, Error> {
        let value = self
            .get_json("/tasks", Some(&query.to_query_string()))
            .await?;
        Ok(envelope::extract_page(
            &value,
            query.page_index(),
            query.page_size_value(),
        ))
    }

    /// Updates the status of a batch of tasks.
    ///
    /// Returns the number of tasks the backend reports as updated; if the
    /// response omits a count, the request size is assumed.
    pub async fn update_task_status(
        &self,
        ids: &[String],
        status: TaskStatus,
    ) -> Result<usize, Error> {
        let body = json!({ "ids": ids, "status": status.as_str() });
        let value = self.post_json("/tasks/status", &body).await?;

        let updated = envelope::extract_object(&value)
            .get("updated")
            .and_then(|v| v.as_u64())
            .map(|n| n as usize)
            .unwrap_or(ids.len());
        Ok(updated)
    }
}
