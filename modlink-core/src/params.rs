//! Flat string parameter bag passed to actions.

use std::collections::BTreeMap;

/// A mapping from string keys to string values.
///
/// Parameters arrive either from a URL query string ([`Params::from_query`])
/// or are assembled by a local caller. Keys are kept in sorted order so that
/// logging and comparisons are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    map: BTreeMap<String, String>,
}

impl Params {
    /// Create an empty parameter bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (`k1=v1&k2=v2`).
    ///
    /// Each `&`-separated pair is split once on its first `=`, so values may
    /// themselves contain `=`. Pairs with no `=` at all are skipped and later
    /// duplicates overwrite earlier ones. Values are kept verbatim.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::new();
        for pair in query.split('&') {
            if let Some((key, value)) = pair.split_once('=') {
                params.insert(key, value);
            }
        }
        params
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.map.insert(key.into(), value.into())
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Get a value and parse it.
    ///
    /// Returns `None` when the key is absent or the value does not parse.
    pub fn parse<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// Check if a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Iterate over key/value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Get the number of parameters.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
