pub mod codec;
pub mod entity_id;
pub mod field_path;
pub mod issues;
pub mod params;
pub mod resource_path;
pub mod stable_hash;
pub mod stable_json;

pub use codec::{
    decode_params, decode_value, encode_map, encode_serializable, encode_value, encode_value_with,
    escape, DecodeError, EncodeOptions, EncodingError, PATH_SEGMENT_RESERVED, QUERY_KEY_RESERVED,
    QUERY_VALUE_RESERVED, RESTLI_RESERVED,
};
pub use entity_id::{batch_ids_value, encode_entity_id, EntityId, IdPlacement};
pub use field_path::{FieldPath, FieldPathSegment};
pub use issues::{IssueSeverity, StructuredIssue};
pub use params::encode_params;
pub use resource_path::{build_resource_path, resource_url_path, ResourcePathError};
pub use stable_hash::sha256_hex;
pub use stable_json::stable_json_bytes;
