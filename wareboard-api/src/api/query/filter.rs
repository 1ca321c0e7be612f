//! Filter types for list queries.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// A filter condition for list queries.
///
/// Filters flatten into URL query parameters: the backend exposes one
/// parameter per condition (`status=picking`, `sku_like=WID`,
/// `created_gte=2026-01-01`), so only conjunction is expressible.
///
/// # Example
///
/// ```
/// use wareboard_api::api::query::Filter;
///
/// let filter = Filter::eq("status", "picking")
///     .and_also(Filter::contains("customer", "Acme"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Equality: `field=value`
    Eq(String, String),
    /// Substring match: `field_like=value`
    Contains(String, String),
    /// On-or-after date: `field_gte=value`
    DateFrom(String, NaiveDate),
    /// On-or-before date: `field_lte=value`
    DateTo(String, NaiveDate),
    /// Conjunction of multiple filters.
    And(Vec<Filter>),
}

impl Filter {
    /// Creates an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    /// Creates a substring filter.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Contains(field.into(), value.into())
    }

    /// Creates an on-or-after date filter.
    pub fn date_from(field: impl Into<String>, date: NaiveDate) -> Self {
        Filter::DateFrom(field.into(), date)
    }

    /// Creates an on-or-before date filter.
    pub fn date_to(field: impl Into<String>, date: NaiveDate) -> Self {
        Filter::DateTo(field.into(), date)
    }

    /// Creates a conjunction of multiple filters.
    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::And(filters.into_iter().collect())
    }

    /// Combines this filter with another.
    pub fn and_also(self, other: Filter) -> Self {
        match self {
            Filter::And(mut filters) => {
                filters.push(other);
                Filter::And(filters)
            }
            _ => Filter::And(vec![self, other]),
        }
    }

    /// Flattens this filter into query parameters.
    ///
    /// Later conditions on the same parameter overwrite earlier ones, which
    /// matches how the backend resolves duplicates.
    pub(crate) fn write_params(&self, params: &mut BTreeMap<String, String>) {
        match self {
            Filter::Eq(field, value) => {
                params.insert(field.clone(), value.clone());
            }
            Filter::Contains(field, value) => {
                params.insert(format!("{field}_like"), value.clone());
            }
            Filter::DateFrom(field, date) => {
                params.insert(format!("{field}_gte"), date.format("%Y-%m-%d").to_string());
            }
            Filter::DateTo(field, date) => {
                params.insert(format!("{field}_lte"), date.format("%Y-%m-%d").to_string());
            }
            Filter::And(filters) => {
                for filter in filters {
                    filter.write_params(params);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_of(filter: &Filter) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        filter.write_params(&mut params);
        params
    }

    #[test]
    fn test_simple_conditions() {
        let params = params_of(&Filter::eq("status", "picking"));
        assert_eq!(params.get("status").map(String::as_str), Some("picking"));

        let params = params_of(&Filter::contains("customer_name", "Acme"));
        assert_eq!(
            params.get("customer_name_like").map(String::as_str),
            Some("Acme")
        );
    }

    #[test]
    fn test_date_conditions() {
        let from = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let params = params_of(
            &Filter::date_from("created_at", from).and_also(Filter::date_to("created_at", to)),
        );
        assert_eq!(
            params.get("created_at_gte").map(String::as_str),
            Some("2026-01-15")
        );
        assert_eq!(
            params.get("created_at_lte").map(String::as_str),
            Some("2026-02-01")
        );
    }

    #[test]
    fn test_and_also_flattens() {
        let filter = Filter::eq("a", "1")
            .and_also(Filter::eq("b", "2"))
            .and_also(Filter::eq("c", "3"));
        let params = params_of(&filter);
        assert_eq!(params.len(), 3);
    }
}
