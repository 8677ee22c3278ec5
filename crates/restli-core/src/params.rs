use crate::codec::{
    encode_value_at, escape, EncodeOptions, EncodingError, QUERY_KEY_RESERVED,
    QUERY_VALUE_RESERVED,
};
use crate::field_path::FieldPath;
use serde_json::{Map, Value};

/// Builds the query string (without `?`) with keys in ascending order.
/// Parameters set to null are left out.
pub fn encode_params(params: &Map<String, Value>) -> Result<String, EncodingError> {
    let options = EncodeOptions::default();
    let mut entries = params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .collect::<Vec<_>>();
    entries.sort_by(|left, right| left.0.cmp(right.0));

    let mut pairs = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let token = encode_value_at(value, &options, FieldPath::from_keys([key.as_str()]))?;
        pairs.push(format!(
            "{}={}",
            escape(key, QUERY_KEY_RESERVED),
            escape(&token, QUERY_VALUE_RESERVED)
        ));
    }
    Ok(pairs.join("&"))
}

#[cfg(test)]
#[path = "params_test.rs"]
mod tests;
