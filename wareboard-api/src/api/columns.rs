//! Column settings operations

use crate::WarehouseClient;
use crate::envelope;
use crate::error::Error;
use crate::model::ColumnSetting;

impl WarehouseClient {
    /// Fetches the server-stored column layout for a table view.
    ///
    /// Missing or malformed settings yield an empty list; pages fall back to
    /// their built-in column defaults.
    pub async fn column_settings(&self, view: &str) -> Result<Vec<ColumnSetting>, Error> {
        let value = self.get_json(&format!("/views/{view}/columns"), None).await?;
        let page = envelope::extract_page::<ColumnSetting>(&value, 1, 1000);
        Ok(page.into_items())
    }
}
