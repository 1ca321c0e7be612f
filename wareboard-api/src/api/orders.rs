//! Order operations

use crate::WarehouseClient;
use crate::envelope;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Order;
use crate::model::OrderDetail;

use super::query::ListQuery;
use super::query::Page;

impl WarehouseClient {
    /// Lists orders matching the query.
    ///
    /// Items that fail to deserialize are dropped; an unrecognized response
    /// envelope yields an empty page.
    pub async fn list_orders(&self, query: &ListQuery) -> Result<Page<Order>, Error> {
        let value = self
            .get_json("/orders", Some(&query.to_query_string()))
            .await?;
        Ok(envelope::extract_page(
            &value,
            query.page_index(),
            query.page_size_value(),
        ))
    }

    /// Fetches a single order with its lines.
    pub async fn order_detail(&self, id: &str) -> Result<OrderDetail, Error> {
        let value = self.get_json(&format!("/orders/{id}"), None).await?;
        let body = envelope::extract_object(&value);
        serde_json::from_value(body.clone())
            .map_err(|e| Error::Api(ApiError::parse(format!("invalid order detail: {e}"))))
    }
}
