use std::collections::{BTreeSet, HashMap};

use serde_json::Value;

/// Request-scoped attribute store the notifier publishes results into
#[derive(Debug, Default, Clone)]
pub struct RequestAttributes {
    values: HashMap<String, Value>,
}

impl RequestAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, returning what was there before
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Read an attribute holding a list of addresses
    pub fn address_set(&self, key: &str) -> Option<BTreeSet<String>> {
        self.get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
