use std::sync::Arc;

use hashbrown::HashMap;

use crate::values::Value;

/// A shared, string-keyed property map.
///
/// Clones share the same storage; [`Object::ptr_eq`] tells whether two handles refer to the
/// same object, which is what strict equality compares.
#[derive(Clone, Default)]
pub struct Object {
    properties: Arc<HashMap<String, Value>>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Own-property lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Set a property, copying the map first if it is shared.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        Arc::make_mut(&mut self.properties).insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in sorted order, for deterministic output.
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.properties.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.properties, &other.properties)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.properties == other.properties
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            properties: Arc::new(iter.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }
}

impl std::fmt::Debug for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for key in self.sorted_keys() {
            if let Some(value) = self.properties.get(key) {
                map.entry(&key, value);
            }
        }
        map.finish()
    }
}
