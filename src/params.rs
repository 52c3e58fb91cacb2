//! Path parameters extracted from dynamic route segments.
//!
//! A route registered as `/plan/:id` matched against `/plan/42` yields
//! `{ "id": "42" }`. Nested routes inherit their parent's parameters, so a
//! child `participants` under `/plan/:id` still sees `id`.
//!
//! ```
//! use travellink_navigator::RouteParams;
//!
//! let mut params = RouteParams::new();
//! params.insert("id".to_string(), "42".to_string());
//! assert_eq!(params.get_as::<u64>("id"), Some(42));
//! ```

use std::collections::HashMap;

/// Route parameters extracted from path segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    /// Create empty route parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter value by key.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }

    /// Get a parameter parsed as `T`.
    ///
    /// Returns `None` if the key is missing or does not parse.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, key: String, value: String) {
        self.params.insert(key, value);
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Iterate over all `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.params.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Merge parent parameters with child parameters.
    ///
    /// On a key collision the child value wins.
    ///
    /// ```
    /// use travellink_navigator::RouteParams;
    ///
    /// let mut parent = RouteParams::new();
    /// parent.insert("id".to_string(), "7".to_string());
    /// parent.insert("tab".to_string(), "info".to_string());
    ///
    /// let mut child = RouteParams::new();
    /// child.insert("tab".to_string(), "members".to_string());
    ///
    /// let merged = RouteParams::merge(&parent, &child);
    /// assert_eq!(merged.get("id"), Some(&"7".to_string()));
    /// assert_eq!(merged.get("tab"), Some(&"members".to_string()));
    /// ```
    pub fn merge(parent: &RouteParams, child: &RouteParams) -> RouteParams {
        let mut merged = parent.clone();
        for (key, value) in child.iter() {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_params_basic() {
        let mut params = RouteParams::new();
        params.insert("id".to_string(), "123".to_string());

        assert_eq!(params.get("id"), Some(&"123".to_string()));
        assert!(params.contains("id"));
        assert!(!params.contains("missing"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_get_as_rejects_unparsable() {
        let params: RouteParams = [("id", "abc")].into_iter().collect();
        assert_eq!(params.get_as::<u32>("id"), None);
        assert_eq!(params.get_as::<String>("id"), Some("abc".to_string()));
    }

    #[test]
    fn test_merge_keeps_parent_only_keys() {
        let parent: RouteParams = [("id", "1")].into_iter().collect();
        let child = RouteParams::new();
        assert_eq!(RouteParams::merge(&parent, &child), parent);
    }
}
