mod config;
mod method;
mod recover;
mod tunnel;

pub use config::{
    load_tunnel_config, parse_tunnel_config, validate_tunnel_config, TunnelConfig,
    TunnelConfigError, DEFAULT_MAX_REQUEST_LENGTH,
};
pub use method::{
    HttpMethod, RestliMethod, UnknownHttpMethod, CONTENT_TYPE_HEADER, FORM_CONTENT_TYPE,
    JSON_CONTENT_TYPE, METHOD_OVERRIDE_HEADER, MULTIPART_MIXED_CONTENT_TYPE,
};
pub use recover::{recover_tunneled, RecoverError, RecoveredRequest};
pub use tunnel::{maybe_tunnel, TunnelDecision, TunnelRequest};
