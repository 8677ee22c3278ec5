use super::{escape, EMPTY_STRING_TOKEN, LIST_PREFIX, RESTLI_RESERVED};
use crate::field_path::FieldPath;
use percent_encoding::AsciiSet;
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Whole floats below this magnitude are written without a fraction or exponent.
const PLAIN_INTEGER_LIMIT: f64 = 1e21;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("null list element at {path} has no Rest.li representation")]
    NullListElement { path: FieldPath },
    #[error("complex key cannot be placed in a URL path segment")]
    ComplexKeyInPath,
    #[error("value cannot be converted to a structured value: {0}")]
    Unsupported(String),
}

#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    /// Bytes escaped inside string scalars and map keys.
    pub reserved: &'static AsciiSet,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            reserved: RESTLI_RESERVED,
        }
    }
}

pub fn encode_value(value: &Value) -> Result<String, EncodingError> {
    encode_value_with(value, &EncodeOptions::default())
}

pub fn encode_value_with(value: &Value, options: &EncodeOptions) -> Result<String, EncodingError> {
    encode_value_at(value, options, FieldPath::root())
}

pub fn encode_map(fields: &Map<String, Value>) -> Result<String, EncodingError> {
    let options = EncodeOptions::default();
    let mut out = String::new();
    let mut path = FieldPath::root();
    write_map(&mut out, fields, &options, &mut path)?;
    Ok(out)
}

pub fn encode_serializable<T>(value: &T) -> Result<String, EncodingError>
where
    T: Serialize + ?Sized,
{
    let value =
        serde_json::to_value(value).map_err(|error| EncodingError::Unsupported(error.to_string()))?;
    encode_value(&value)
}

pub(crate) fn encode_value_at(
    value: &Value,
    options: &EncodeOptions,
    mut path: FieldPath,
) -> Result<String, EncodingError> {
    let mut out = String::new();
    write_value(&mut out, value, options, &mut path)?;
    Ok(out)
}

fn write_value(
    out: &mut String,
    value: &Value,
    options: &EncodeOptions,
    path: &mut FieldPath,
) -> Result<(), EncodingError> {
    match value {
        Value::Null => Ok(()),
        Value::Bool(flag) => {
            out.push_str(if *flag { "true" } else { "false" });
            Ok(())
        }
        Value::Number(number) => {
            write_number(out, number);
            Ok(())
        }
        Value::String(text) => {
            write_string(out, text, options);
            Ok(())
        }
        Value::Array(items) => write_list(out, items, options, path),
        Value::Object(fields) => write_map(out, fields, options, path),
    }
}

fn write_number(out: &mut String, number: &Number) {
    match number.as_f64() {
        // whole floats share the integer token; adding 0.0 folds -0.0 into 0
        Some(float)
            if number.is_f64() && float.fract() == 0.0 && float.abs() < PLAIN_INTEGER_LIMIT =>
        {
            out.push_str(&format!("{:.0}", float + 0.0));
        }
        _ => out.push_str(&number.to_string()),
    }
}

fn write_string(out: &mut String, text: &str, options: &EncodeOptions) {
    if text.is_empty() {
        out.push_str(EMPTY_STRING_TOKEN);
    } else {
        out.push_str(&escape(text, options.reserved));
    }
}

fn write_list(
    out: &mut String,
    items: &[Value],
    options: &EncodeOptions,
    path: &mut FieldPath,
) -> Result<(), EncodingError> {
    out.push_str(LIST_PREFIX);
    for (index, item) in items.iter().enumerate() {
        path.push_index(index);
        if item.is_null() {
            return Err(EncodingError::NullListElement { path: path.clone() });
        }
        if index > 0 {
            out.push(',');
        }
        write_value(out, item, options, path)?;
        path.pop();
    }
    out.push(')');
    Ok(())
}

fn write_map(
    out: &mut String,
    fields: &Map<String, Value>,
    options: &EncodeOptions,
    path: &mut FieldPath,
) -> Result<(), EncodingError> {
    // null entries are absent fields
    let mut entries = fields
        .iter()
        .filter(|(_, value)| !value.is_null())
        .collect::<Vec<_>>();
    entries.sort_by(|left, right| left.0.cmp(right.0));

    out.push('(');
    for (position, (key, value)) in entries.into_iter().enumerate() {
        if position > 0 {
            out.push(',');
        }
        write_string(out, key, options);
        out.push(':');
        path.push_key(key.as_str());
        write_value(out, value, options, path)?;
        path.pop();
    }
    out.push(')');
    Ok(())
}

#[cfg(test)]
#[path = "encode_test.rs"]
mod tests;
