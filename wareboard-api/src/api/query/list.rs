//! List query builder.

use std::collections::BTreeMap;

use super::Filter;
use super::OrderBy;

/// Default page size for list queries.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// A query against a list endpoint: filter, ordering, and page window.
///
/// Serializes to a canonical query string with sorted parameter names, so the
/// same logical query always produces the same string. Cache keys are derived
/// from that string.
///
/// # Example
///
/// ```
/// use wareboard_api::api::query::{Filter, ListQuery, OrderBy};
///
/// let query = ListQuery::new()
///     .filter(Filter::eq("status", "picking"))
///     .order_by(OrderBy::desc("created_at"))
///     .page(2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    page: usize,
    page_size: usize,
    filter: Option<Filter>,
    order: Option<OrderBy>,
}

impl ListQuery {
    /// Creates a query for page 1 with the default page size.
    pub fn new() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            filter: None,
            order: None,
        }
    }

    /// Sets the 1-based page index.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the page size.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// Sets the filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the ordering.
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }

    /// Returns the 1-based page index.
    pub fn page_index(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn page_size_value(&self) -> usize {
        self.page_size
    }

    /// Serializes to a canonical URL query string.
    ///
    /// Parameter names sort lexicographically and values are
    /// percent-encoded, so equal queries always serialize identically.
    pub fn to_query_string(&self) -> String {
        let mut params = BTreeMap::new();
        params.insert("page".to_string(), self.page.to_string());
        params.insert("page_size".to_string(), self.page_size.to_string());

        if let Some(filter) = &self.filter {
            filter.write_params(&mut params);
        }
        if let Some(order) = &self.order {
            params.insert("sort".to_string(), order.to_param());
        }

        params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_default_query_string() {
        let query = ListQuery::new();
        assert_eq!(query.to_query_string(), "page=1&page_size=25");
    }

    #[test]
    fn test_canonical_ordering() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let query = ListQuery::new()
            .order_by(OrderBy::desc("created_at"))
            .filter(Filter::eq("status", "shipped").and_also(Filter::date_from("created_at", date)))
            .page(3)
            .page_size(10);
        assert_eq!(
            query.to_query_string(),
            "created_at_gte=2026-03-01&page=3&page_size=10&sort=created_at%3Adesc&status=shipped"
        );
    }

    #[test]
    fn test_equal_queries_serialize_identically() {
        let a = ListQuery::new()
            .filter(Filter::eq("status", "pending"))
            .order_by(OrderBy::asc("total"));
        let b = ListQuery::new()
            .order_by(OrderBy::asc("total"))
            .filter(Filter::eq("status", "pending"));
        assert_eq!(a.to_query_string(), b.to_query_string());
    }

    #[test]
    fn test_page_clamped_to_one() {
        assert_eq!(ListQuery::new().page(0).page_index(), 1);
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let query = ListQuery::new().filter(Filter::contains("customer_name", "A & B"));
        assert!(query.to_query_string().contains("customer_name_like=A%20%26%20B"));
    }
}
