use mfagate_proto::v1::{AuthenticationMethodSource, TargetService};

/// Holds a requested authentication method along with the target service and
/// the source that requirement originated from. Built once when a request is
/// received, read through the pipeline, discarded with the request. This is
/// a carrier, not logic - no validation or defaulting happens here.
#[derive(Debug, Clone)]
pub struct MfaRequestContext {
    authentication_method: Option<String>,
    target_service: TargetService,
    method_source: AuthenticationMethodSource,
}

impl MfaRequestContext {
    pub fn new(
        authentication_method: Option<String>,
        target_service: TargetService,
        method_source: AuthenticationMethodSource,
    ) -> Self {
        MfaRequestContext {
            authentication_method,
            target_service,
            method_source,
        }
    }

    pub fn authentication_method(&self) -> Option<&str> {
        self.authentication_method.as_deref()
    }

    pub fn target_service(&self) -> &TargetService {
        &self.target_service
    }

    pub fn method_source(&self) -> AuthenticationMethodSource {
        self.method_source
    }
}
