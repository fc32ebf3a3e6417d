//! Configuration properties
//!
//! A flat map of named, loosely typed values. The document is a JSON object
//! whose top-level keys become property names; nested arrays and objects are
//! kept as structured values. Readers always supply a default, so a missing
//! key is never an error.
//!
//! # Environment Variables
//!
//! - `BUBBLE_SHOOTER_CONFIG`: path of a JSON config file to load
//! - `BUBBLE_SHOOTER_DEFAULT_MODEL`: overrides the `default_bubble_model` key

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::ConfigError;

/// Key naming the model used when a lookup misses
pub const DEFAULT_BUBBLE_MODEL_KEY: &str = "default_bubble_model";

/// Env var holding the config file path
pub const CONFIG_PATH_ENV: &str = "BUBBLE_SHOOTER_CONFIG";

/// Env var overriding the default model name
pub const DEFAULT_MODEL_ENV: &str = "BUBBLE_SHOOTER_DEFAULT_MODEL";

/// A single configuration value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Property {
    #[default]
    Undefined,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Array(Vec<Property>),
    Object(BTreeMap<String, Property>),
}

impl Property {
    /// Integer view. Floats truncate, strings parse, containers use their first element.
    pub fn as_integer(&self) -> i64 {
        match self {
            Property::Undefined => 0,
            Property::Integer(v) => *v,
            Property::Float(v) => *v as i64,
            Property::Boolean(v) => *v as i64,
            Property::String(s) => s.trim().parse().unwrap_or(0),
            Property::Array(items) => items.first().map_or(0, Property::as_integer),
            Property::Object(map) => map.values().next().map_or(0, Property::as_integer),
        }
    }

    /// Float view, converted the same way as [`Property::as_integer`]
    pub fn as_float(&self) -> f64 {
        match self {
            Property::Undefined => 0.0,
            Property::Integer(v) => *v as f64,
            Property::Float(v) => *v,
            Property::Boolean(v) => {
                if *v {
                    1.0
                } else {
                    0.0
                }
            }
            Property::String(s) => s.trim().parse().unwrap_or(0.0),
            Property::Array(items) => items.first().map_or(0.0, Property::as_float),
            Property::Object(map) => map.values().next().map_or(0.0, Property::as_float),
        }
    }

    /// Boolean view. Numbers are true when non-zero.
    pub fn as_bool(&self) -> bool {
        match self {
            Property::Undefined => false,
            Property::Integer(v) => *v != 0,
            Property::Float(v) => *v != 0.0,
            Property::Boolean(v) => *v,
            Property::String(s) => {
                let s = s.trim();
                s.eq_ignore_ascii_case("true") || s.parse::<i64>().is_ok_and(|v| v != 0)
            }
            Property::Array(items) => items.first().is_some_and(Property::as_bool),
            Property::Object(map) => map.values().next().is_some_and(Property::as_bool),
        }
    }

    /// String view. Scalars are formatted.
    pub fn as_string(&self) -> String {
        match self {
            Property::Undefined => String::new(),
            Property::Integer(v) => v.to_string(),
            Property::Float(v) => v.to_string(),
            Property::Boolean(v) => v.to_string(),
            Property::String(s) => s.clone(),
            Property::Array(items) => items.first().map(Property::as_string).unwrap_or_default(),
            Property::Object(map) => map.values().next().map(Property::as_string).unwrap_or_default(),
        }
    }

    /// Array view. Scalars become a one-element array.
    pub fn as_array(&self) -> Vec<Property> {
        match self {
            Property::Undefined => Vec::new(),
            Property::Array(items) => items.clone(),
            other => vec![other.clone()],
        }
    }

    /// Object view. Non-objects are stored under the empty key.
    pub fn as_object(&self) -> BTreeMap<String, Property> {
        match self {
            Property::Undefined => BTreeMap::new(),
            Property::Object(map) => map.clone(),
            other => BTreeMap::from([(String::new(), other.clone())]),
        }
    }

    fn kind_name(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl From<Value> for Property {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Property::Undefined,
            Value::Bool(b) => Property::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Property::Integer(i),
                None => Property::Float(n.as_f64().unwrap_or(0.0)),
            },
            Value::String(s) => Property::String(s),
            Value::Array(items) => Property::Array(items.into_iter().map(Property::from).collect()),
            Value::Object(map) => Property::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Property::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<i64> for Property {
    fn from(value: i64) -> Self {
        Property::Integer(value)
    }
}

impl From<f64> for Property {
    fn from(value: f64) -> Self {
        Property::Float(value)
    }
}

impl From<bool> for Property {
    fn from(value: bool) -> Self {
        Property::Boolean(value)
    }
}

impl From<&str> for Property {
    fn from(value: &str) -> Self {
        Property::String(value.to_string())
    }
}

impl From<String> for Property {
    fn from(value: String) -> Self {
        Property::String(value)
    }
}

/// Named configuration values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    props: HashMap<String, Property>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        match value {
            Value::Object(map) => Ok(Self {
                props: map
                    .into_iter()
                    .map(|(k, v)| (k, Property::from(v)))
                    .collect(),
            }),
            other => Err(ConfigError::NotAnObject {
                found: Property::kind_name(&other),
            }),
        }
    }

    /// Load a JSON config file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let props = Self::from_json_str(&text)?;
        debug!(path = %path.display(), count = props.len(), "loaded properties");
        Ok(props)
    }

    /// Build from environment variables
    ///
    /// Loads the file named by `BUBBLE_SHOOTER_CONFIG` when set, then applies
    /// the `BUBBLE_SHOOTER_DEFAULT_MODEL` override.
    pub fn from_env() -> Result<Self, ConfigError> {
        use std::env;

        let mut props = match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load_file(path.trim())?,
            _ => Self::new(),
        };

        if let Some(model) = env::var(DEFAULT_MODEL_ENV)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            props.set(DEFAULT_BUBBLE_MODEL_KEY, model);
        }

        Ok(props)
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.props.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Property>) {
        let _ = self.props.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.props.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Integer views narrower than `i64` fall back to `default` when the
    /// stored value does not fit.
    pub fn get_u8(&self, name: &str, default: u8) -> u8 {
        self.get_narrowed(name, default)
    }

    pub fn get_u32(&self, name: &str, default: u32) -> u32 {
        self.get_narrowed(name, default)
    }

    pub fn get_u64(&self, name: &str, default: u64) -> u64 {
        self.get_narrowed(name, default)
    }

    pub fn get_i32(&self, name: &str, default: i32) -> i32 {
        self.get_narrowed(name, default)
    }

    fn get_narrowed<T: TryFrom<i64>>(&self, name: &str, default: T) -> T {
        match self.get(name) {
            Some(p) => T::try_from(p.as_integer()).unwrap_or(default),
            None => default,
        }
    }

    pub fn get_i64(&self, name: &str, default: i64) -> i64 {
        self.get(name).map_or(default, Property::as_integer)
    }

    pub fn get_f32(&self, name: &str, default: f32) -> f32 {
        self.get(name).map_or(default, |p| p.as_float() as f32)
    }

    pub fn get_f64(&self, name: &str, default: f64) -> f64 {
        self.get(name).map_or(default, Property::as_float)
    }

    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        self.get(name).map_or(default, Property::as_bool)
    }

    pub fn get_string(&self, name: &str, default: &str) -> String {
        self.get(name)
            .map_or_else(|| default.to_string(), Property::as_string)
    }

    pub fn get_array(&self, name: &str) -> Vec<Property> {
        self.get(name).map(Property::as_array).unwrap_or_default()
    }

    pub fn get_object(&self, name: &str) -> BTreeMap<String, Property> {
        self.get(name).map(Property::as_object).unwrap_or_default()
    }
}
