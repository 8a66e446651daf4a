use serde::{Deserialize, Serialize};

use crate::types::ParamMap;

pub const ACTION_KEY: &str = "action";
pub const HOST_KEY: &str = "host";

/// Per-route default values. A missing `host` entry means the route is local.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteDefaults {
    values: ParamMap,
}

impl RouteDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults every freshly compiled route starts from.
    pub fn seeded(default_action: &str) -> Self {
        let mut values = ParamMap::new();
        values.insert(ACTION_KEY.to_string(), default_action.to_string());
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn extend<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in values {
            self.insert(key, value);
        }
    }

    pub fn host(&self) -> Option<&str> {
        self.get(HOST_KEY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_map(&self) -> &ParamMap {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<ParamMap> for RouteDefaults {
    fn from(values: ParamMap) -> Self {
        Self { values }
    }
}
