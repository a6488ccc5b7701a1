//! Options merging.
//!
//! Every component type has a typed options struct with a fixed default.
//! Caller-supplied JSON fields are merged over the serialized defaults
//! (caller wins field by field) and the result is deserialized.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("options must be a JSON object, got {0}")]
    NotAnObject(String),
    #[error("invalid options: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Shallow-merge `overrides` over `defaults`. `null` overrides mean "no options".
pub fn merge(defaults: Value, overrides: Value) -> Result<Value, OptionsError> {
    let mut merged = match defaults {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => return Err(OptionsError::NotAnObject(kind_of(&other).to_string())),
    };
    match overrides {
        Value::Object(map) => {
            for (key, value) in map {
                merged.insert(key, value);
            }
        }
        Value::Null => {}
        other => return Err(OptionsError::NotAnObject(kind_of(&other).to_string())),
    }
    Ok(Value::Object(merged))
}

/// Resolve typed options from caller-supplied JSON
pub fn resolve<T>(overrides: Value) -> Result<T, OptionsError>
where
    T: Default + Serialize + DeserializeOwned,
{
    let defaults = serde_json::to_value(T::default())?;
    let merged = merge(defaults, overrides)?;
    Ok(serde_json::from_value(merged)?)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
