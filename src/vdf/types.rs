//! VDF Tree Types
//!
//! Keys are kept in source order and duplicates are preserved; lookups
//! compare keys ASCII case-insensitively, the way Steam reads them.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VdfValue {
    String(String),
    Object(VdfObject),
}

impl VdfValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            VdfValue::String(s) => Some(s),
            VdfValue::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&VdfObject> {
        match self {
            VdfValue::Object(obj) => Some(obj),
            VdfValue::String(_) => None,
        }
    }
}

/// An ordered block of `key value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VdfObject {
    entries: Vec<(String, VdfValue)>,
}

impl VdfObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: VdfValue) {
        self.entries.push((key.into(), value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VdfValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Last value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&VdfValue> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(VdfValue::as_str)
    }

    pub fn get_object(&self, key: &str) -> Option<&VdfObject> {
        self.get(key).and_then(VdfValue::as_object)
    }

    /// Every string leaf named `key`, at any depth, in document order.
    pub fn find_all_strings(&self, key: &str) -> Vec<&str> {
        let mut found = Vec::new();
        self.collect_strings(key, &mut found);
        found
    }

    fn collect_strings<'a>(&'a self, key: &str, found: &mut Vec<&'a str>) {
        for (k, v) in &self.entries {
            match v {
                VdfValue::String(s) if k.eq_ignore_ascii_case(key) => found.push(s),
                VdfValue::String(_) => {}
                VdfValue::Object(obj) => obj.collect_strings(key, found),
            }
        }
    }
}

impl Serialize for VdfObject {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
