//! Rest.li 2.0 URI grammar.
//!
//! Lists render as `List(a,b)`, maps as `(k:v,k2:v2)` with keys in ascending
//! code-point order, and the empty string as `''`. Escaping happens in two
//! layers: the grammar layer escapes [`RESTLI_RESERVED`] inside string
//! scalars, then the placement layer ([`QUERY_VALUE_RESERVED`] or
//! [`PATH_SEGMENT_RESERVED`]) escapes what is unsafe where the token lands.
//! Placement sets never contain `%` or grammar delimiters, so applying them to
//! a grammar token never re-escapes it.

mod decode;
mod encode;

pub use decode::{decode_params, decode_value, DecodeError};
pub use encode::{
    encode_map, encode_serializable, encode_value, encode_value_with, EncodeOptions, EncodingError,
};

pub(crate) use encode::encode_value_at;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

pub const LIST_PREFIX: &str = "List(";
pub const EMPTY_STRING_TOKEN: &str = "''";

const URI_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b']')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Bytes escaped inside string scalars by the grammar layer.
pub const RESTLI_RESERVED: &AsciiSet = &URI_UNSAFE
    .add(b'%')
    .add(b'(')
    .add(b')')
    .add(b',')
    .add(b':')
    .add(b'\'');

pub const QUERY_VALUE_RESERVED: &AsciiSet = &URI_UNSAFE.add(b'&').add(b'=').add(b'+');

/// Query keys are raw names, not grammar tokens, so they get the grammar set
/// and the query separators in one pass.
pub const QUERY_KEY_RESERVED: &AsciiSet = &RESTLI_RESERVED.add(b'&').add(b'=').add(b'+');

pub const PATH_SEGMENT_RESERVED: &AsciiSet = &URI_UNSAFE
    .add(b'/')
    .add(b'?')
    .add(b';')
    .add(b'&')
    .add(b'=')
    .add(b'+');

pub fn escape(input: &str, reserved: &'static AsciiSet) -> String {
    utf8_percent_encode(input, reserved).to_string()
}
