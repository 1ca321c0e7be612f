//! Cache key derivation.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::Digest;
use sha2::Sha256;

/// Derives a cache key from a namespace and a canonical query string.
///
/// The query string is hashed so keys stay short and filesystem-safe
/// regardless of filter contents. [`ListQuery::to_query_string`] is
/// canonical (sorted parameters), so equal queries share a key.
///
/// [`ListQuery::to_query_string`]: crate::api::query::ListQuery::to_query_string
pub fn cache_key(namespace: &str, query: &str) -> String {
    let digest = Sha256::digest(query.as_bytes());
    format!("{}_{}", namespace, URL_SAFE_NO_PAD.encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_query_same_key() {
        assert_eq!(
            cache_key("warehouse_dropdown", "page=1"),
            cache_key("warehouse_dropdown", "page=1")
        );
    }

    #[test]
    fn test_key_varies_with_namespace_and_query() {
        let base = cache_key("warehouse_dropdown", "page=1");
        assert_ne!(base, cache_key("customer_dropdown", "page=1"));
        assert_ne!(base, cache_key("warehouse_dropdown", "page=2"));
    }

    #[test]
    fn test_key_is_prefixed_and_url_safe() {
        let key = cache_key("warehouse_dropdown", "a=1&b=2");
        assert!(key.starts_with("warehouse_dropdown_"));
        assert!(!key.contains('/'));
        assert!(!key.contains('+'));
        assert!(!key.contains('='));
    }
}
