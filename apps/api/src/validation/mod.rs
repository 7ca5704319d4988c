//! Response validator: the integrity boundary between model text and the
//! rest of the service.
//!
//! ARCHITECTURAL RULE: no other module parses model output. Every document
//! that reaches storage or an HTTP response has been through `parse`.

use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use thiserror::Error;

mod locate;
pub mod schema;

pub use locate::locate_json;
pub use schema::Schema;
use schema::{Field, Shape};

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// No usable JSON could be recovered from the text.
    #[error("{0}")]
    Parse(String),

    /// JSON was found but a value does not fit the schema.
    #[error("{path}: {message}")]
    Schema { path: String, message: String },
}

/// Recovers and normalizes a document from raw model output.
///
/// Missing lists become `[]`, missing scalars become `null`, missing objects
/// are filled with their own defaults. Enum values outside the allowed set
/// are rejected, scores are clamped into 0..=100, unknown keys are kept.
pub fn parse(raw: &str, schema: &Schema) -> Result<Value, ValidationError> {
    let (expected, other) = match schema.opener() {
        '[' => (('[', "array"), ('{', "object")),
        _ => (('{', "object"), ('[', "array")),
    };

    // Longest candidate first; a shorter one is only used when the longer
    // ones do not fit the schema.
    let mut first_error = None;
    for document in locate::candidates(raw, expected.0) {
        match conform(document, &schema.root, "$") {
            Ok(value) => return Ok(value),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }
    if let Some(e) = first_error {
        return Err(e);
    }
    if locate_json(raw, other.0).is_some() {
        return Err(schema_error(
            "$",
            format!("expected {}, found {}", expected.1, other.1),
        ));
    }
    Err(ValidationError::Parse(format!(
        "no JSON {} found in model output",
        expected.1
    )))
}

/// Normalizes an already-parsed JSON value, e.g. a client-supplied profile.
pub fn conform_value(value: Value, schema: &Schema) -> Result<Value, ValidationError> {
    if value.is_null() {
        return Err(schema_error("$", format!("expected a {} document", schema.name)));
    }
    conform(value, &schema.root, "$")
}

/// `parse` followed by deserialization into the typed document.
pub fn parse_as<T: DeserializeOwned>(raw: &str, schema: &Schema) -> Result<T, ValidationError> {
    let value = parse(raw, schema)?;
    into_typed(value, schema)
}

pub fn into_typed<T: DeserializeOwned>(value: Value, schema: &Schema) -> Result<T, ValidationError> {
    serde_json::from_value(value).map_err(|e| schema_error(schema.name, e.to_string()))
}

fn conform(value: Value, shape: &Shape, path: &str) -> Result<Value, ValidationError> {
    match shape {
        Shape::Text => match value {
            Value::Null | Value::String(_) => Ok(value),
            Value::Number(n) => Ok(Value::String(n.to_string())),
            Value::Bool(b) => Ok(Value::String(b.to_string())),
            other => Err(type_error(path, "text", &other)),
        },
        Shape::Number => match value {
            Value::Null | Value::Number(_) => Ok(value),
            Value::String(s) => parse_number(&s)
                .map(Value::Number)
                .ok_or_else(|| schema_error(path, format!("'{s}' is not a number"))),
            other => Err(type_error(path, "number", &other)),
        },
        Shape::Score => {
            let number = match value {
                Value::Null => return Ok(Value::Null),
                Value::Number(n) => n,
                Value::String(s) => parse_number(&s)
                    .ok_or_else(|| schema_error(path, format!("'{s}' is not a score")))?,
                other => return Err(type_error(path, "score", &other)),
            };
            Ok(Value::from(clamp_score(&number)))
        }
        Shape::Enum(allowed) => match value {
            Value::Null => Ok(Value::Null),
            Value::String(s) if allowed.contains(&s.as_str()) => Ok(Value::String(s)),
            Value::String(s) => Err(schema_error(
                path,
                format!("'{s}' is not one of {}", allowed.join(", ")),
            )),
            other => Err(type_error(path, "enum string", &other)),
        },
        Shape::List(item) => match value {
            Value::Null => Ok(Value::Array(Vec::new())),
            Value::Array(items) => items
                .into_iter()
                // null entries carry no information
                .filter(|v| !v.is_null())
                .enumerate()
                .map(|(i, v)| conform(v, item, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Err(type_error(path, "array", &other)),
        },
        Shape::Record(fields) => match value {
            Value::Null => conform_record(Map::new(), fields, path),
            Value::Object(map) => conform_record(map, fields, path),
            other => Err(type_error(path, "object", &other)),
        },
        Shape::Dict(values) => match value {
            Value::Null => Ok(Value::Object(Map::new())),
            Value::Object(map) => map
                .into_iter()
                .map(|(key, v)| {
                    let child = format!("{path}.{key}");
                    conform(v, values, &child).map(|v| (key, v))
                })
                .collect::<Result<Map<_, _>, _>>()
                .map(Value::Object),
            other => Err(type_error(path, "object", &other)),
        },
    }
}

fn conform_record(
    mut map: Map<String, Value>,
    fields: &[Field],
    path: &str,
) -> Result<Value, ValidationError> {
    let mut out = Map::new();
    for field in fields {
        let value = map.remove(field.name).unwrap_or(Value::Null);
        let child = format!("{path}.{}", field.name);
        out.insert(field.name.to_string(), conform(value, &field.shape, &child)?);
    }
    // Unknown keys pass through untouched.
    out.extend(map);
    Ok(Value::Object(out))
}

fn clamp_score(n: &Number) -> i64 {
    match (n.as_i64(), n.as_f64()) {
        (Some(i), _) => i.clamp(0, 100),
        (None, Some(f)) => f.round().clamp(0.0, 100.0) as i64,
        // u64 beyond i64::MAX
        (None, None) => 100,
    }
}

fn parse_number(s: &str) -> Option<Number> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

fn schema_error(path: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::Schema {
        path: path.to_string(),
        message: message.into(),
    }
}

fn type_error(path: &str, expected: &str, found: &Value) -> ValidationError {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    schema_error(path, format!("expected {expected}, found {found}"))
}
