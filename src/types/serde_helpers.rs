//! Custom serde helpers for DMarket's response formats.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default value.
///
/// DMarket returns `"objects": null` instead of an empty array when a
/// listing has nothing left.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use dmarket_api_client::types::serde_helpers::null_as_default;
///
/// #[derive(Deserialize, Debug)]
/// struct Response {
///     #[serde(deserialize_with = "null_as_default::deserialize", default)]
///     objects: Vec<String>,
/// }
///
/// let response: Response = serde_json::from_str(r#"{"objects":null}"#).unwrap();
/// assert!(response.objects.is_empty());
///
/// let response: Response = serde_json::from_str(r#"{"objects":["a"]}"#).unwrap();
/// assert_eq!(response.objects, vec!["a".to_string()]);
/// ```
pub mod null_as_default {
    use super::*;

    /// Deserialize a value, returning `T::default()` for `null`.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Default + Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
