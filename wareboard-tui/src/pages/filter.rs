//! Order list filter form state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wareboard_api::error::FieldValidationError;
use wareboard_api::model::OrderStatus;
use wareboard_api::Filter;

/// Filter criteria for the Orders page.
///
/// Serializes to JSON for saved presets. An empty filter means no
/// conditions, listing everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderFilter {
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub warehouse_id: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
}

impl OrderFilter {
    /// Validates the form.
    ///
    /// The only cross-field rule is date ordering: a range where `from`
    /// falls after `to` can never match anything, so it is rejected before
    /// a request is made.
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to)
            && from > to
        {
            return Err(FieldValidationError::new(
                "date_from",
                "start date must be on or before end date",
            ));
        }
        Ok(())
    }

    /// Whether any condition is set.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.warehouse_id.is_none()
            && self.customer.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// Builds the query filter, or `None` when the form is empty.
    pub fn to_filter(&self) -> Option<Filter> {
        let mut conditions = Vec::new();
        if let Some(status) = self.status {
            conditions.push(Filter::eq("status", status.as_str()));
        }
        if let Some(warehouse_id) = &self.warehouse_id {
            conditions.push(Filter::eq("warehouse_id", warehouse_id.clone()));
        }
        if let Some(customer) = &self.customer {
            conditions.push(Filter::contains("customer_name", customer.clone()));
        }
        if let Some(from) = self.date_from {
            conditions.push(Filter::date_from("created_at", from));
        }
        if let Some(to) = self.date_to {
            conditions.push(Filter::date_to("created_at", to));
        }
        if conditions.is_empty() {
            None
        } else {
            Some(Filter::and(conditions))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_date_range_is_rejected() {
        let filter = OrderFilter {
            date_from: NaiveDate::from_ymd_opt(2026, 2, 1),
            date_to: NaiveDate::from_ymd_opt(2026, 1, 1),
            ..Default::default()
        };
        let err = filter.validate().unwrap_err();
        assert_eq!(err.field, "date_from");
    }

    #[test]
    fn test_equal_dates_are_valid() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 15);
        let filter = OrderFilter {
            date_from: day,
            date_to: day,
            ..Default::default()
        };
        assert!(filter.validate().is_ok());
    }

    #[test]
    fn test_empty_filter_builds_no_conditions() {
        let filter = OrderFilter::default();
        assert!(filter.is_empty());
        assert!(filter.to_filter().is_none());
    }

    #[test]
    fn test_conditions_map_to_query_fields() {
        let filter = OrderFilter {
            status: Some(OrderStatus::Picking),
            customer: Some("Acme".to_string()),
            ..Default::default()
        };
        let built = filter.to_filter().unwrap();
        let query = wareboard_api::ListQuery::new().filter(built);
        let qs = query.to_query_string();
        assert!(qs.contains("status=picking"));
        assert!(qs.contains("customer_name_like=Acme"));
    }
}
