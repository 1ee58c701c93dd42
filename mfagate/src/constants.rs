/// The authentication attribute that records which methods a completed
/// login achieved.
pub const ATTR_AUTHN_METHOD: &str = "authn_method";

pub const DEFAULT_VALIDATE_PROXY_REQUESTS: bool = false;
