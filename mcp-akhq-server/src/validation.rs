//! Tool argument validation
//!
//! Checks raw `tools/call` arguments against a tool's declared parameters
//! before anything reaches the templater.

use crate::mcp::{ParamType, ToolParameter};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path to the offending value (e.g. `topics.1`)
    pub path: String,
    pub message: String,
}

/// All failures found in one argument set
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            if error.path.is_empty() {
                write!(f, "{}", error.message)?;
            } else {
                write!(f, "{}: {}", error.path, error.message)?;
            }
        }
        Ok(())
    }
}

/// JSON type name of a value, as reported in messages
fn received(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expected(param_type: &str, value: &Value) -> String {
    format!("Expected {}, received {}", param_type, received(value))
}

fn check_value(param: &ToolParameter, value: &Value, errors: &mut ValidationErrors) {
    let name = param.name;
    match (&param.param_type, value) {
        (ParamType::String, Value::String(_)) => {}
        (ParamType::Number, Value::Number(_)) => {}
        (ParamType::Integer, Value::Number(n)) => {
            if n.is_i64() || n.is_u64() {
                return;
            }
            match n.as_f64() {
                Some(f) if f.fract() != 0.0 => errors.push(name, "Expected integer, received float"),
                Some(f) if whole_float_as_i64(f).is_none() => {
                    errors.push(name, "Number must be an integer in range")
                }
                _ => {}
            }
        }
        (ParamType::Boolean, Value::Bool(_)) => {}
        (ParamType::Object, Value::Object(_)) => {}
        (ParamType::StringArray, Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    errors.push(format!("{}.{}", name, i), expected("string", item));
                }
            }
        }
        (ParamType::Enum(allowed), Value::String(s)) => {
            if !allowed.contains(&s.as_str()) {
                errors.push(
                    name,
                    format!(
                        "Invalid enum value. Expected {}, received '{}'",
                        allowed
                            .iter()
                            .map(|v| format!("'{}'", v))
                            .collect::<Vec<_>>()
                            .join(" | "),
                        s
                    ),
                );
            }
        }
        (param_type, value) => errors.push(name, expected(param_type.type_name(), value)),
    }
}

/// `f` as an `i64` when it is whole and representable without clamping.
fn whole_float_as_i64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, hence the half-open range
    let in_range = (i64::MIN as f64..i64::MAX as f64).contains(&f);
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

/// Whole floats given for integer parameters are stored as integers so they
/// render as `2` rather than `2.0` in URLs.
fn normalize(param: &ToolParameter, value: &Value) -> Value {
    if param.param_type == ParamType::Integer && value.is_f64() {
        if let Some(i) = value.as_f64().and_then(whole_float_as_i64) {
            return Value::from(i);
        }
    }
    value.clone()
}

/// Validate `raw` against `parameters`.
///
/// On success the returned map holds the recognized arguments in declaration
/// order. Optional arguments given as `null` are kept as `null`; unknown keys
/// are dropped.
pub fn validate(parameters: &[ToolParameter], raw: &Value) -> Result<Map<String, Value>, ValidationErrors> {
    let empty = Map::new();
    let input = match raw {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            let mut errors = ValidationErrors::default();
            errors.push("", expected("object", other));
            return Err(errors);
        }
    };

    let mut errors = ValidationErrors::default();
    let mut output = Map::new();

    for param in parameters {
        match input.get(param.name) {
            None | Some(Value::Null) if param.required => errors.push(param.name, "Required"),
            None => {}
            Some(Value::Null) => {
                output.insert(param.name.to_string(), Value::Null);
            }
            Some(value) => {
                check_value(param, value, &mut errors);
                output.insert(param.name.to_string(), normalize(param, value));
            }
        }
    }

    for key in input.keys() {
        if !parameters.iter().any(|p| p.name == key.as_str()) {
            debug!("Dropping unrecognized argument: {}", key);
        }
    }

    if errors.is_empty() {
        Ok(output)
    } else {
        Err(errors)
    }
}
