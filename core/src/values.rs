//! Multi-valued string mapping used for query parameters and headers.

use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Serialize};

/// String keys mapping to ordered lists of string values.
///
/// Keys are kept sorted so `iter` and `encode` are deterministic. Values
/// under one key keep insertion order; `add` and `merge` only ever append.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values {
    inner: BTreeMap<String, Vec<String>>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the values held under `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    /// Replace every value under `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), vec![value.into()]);
    }

    /// First value under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.inner.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.inner.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Every `(key, value)` pair, in key order then value order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            keys: self.inner.iter(),
            current: None,
        }
    }

    /// Append every pair of `extra` after the values already present.
    pub fn merge(&mut self, extra: &Values) {
        for (key, value) in extra.iter() {
            self.add(key, value);
        }
    }

    /// Form-urlencoded query string, without the leading `?`.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

/// Iterator over the flattened pairs of a `Values`.
pub struct Iter<'a> {
    keys: btree_map::Iter<'a, String, Vec<String>>,
    current: Option<(&'a str, std::slice::Iter<'a, String>)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, values)) = &mut self.current {
                if let Some(value) = values.next() {
                    return Some((*key, value.as_str()));
                }
            }
            let (key, values) = self.keys.next()?;
            self.current = Some((key.as_str(), values.iter()));
        }
    }
}

impl<'a> IntoIterator for &'a Values {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Values::new();
        for (key, value) in iter {
            values.add(key, value);
        }
        values
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Values {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
