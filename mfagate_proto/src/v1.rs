use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

// These proto implementations are here because they have public definitions
// shared between the validation library and the host framework.

/* ===== errors ===== */

/// The reasons an assertion may fail to satisfy a requested authentication
/// method. Both kinds carry a stable code string so the host framework can
/// map them onto its protocol-level failure responses. Neither is retryable,
/// the user has to re-authenticate with the correct method.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Error)]
#[serde(rename_all = "lowercase")]
pub enum ValidationError {
    /// A method was required but the assertion achieved no method at all.
    #[error("Requested authentication method [{method}] is not available")]
    UnacceptableAuthenticationMethod { method: String },
    /// The assertion achieved some method(s), but not the one required.
    #[error(
        "Requested authentication method [{method}] does not match the authentication method used [{achieved:?}]"
    )]
    UnrecognizedAuthenticationMethod {
        method: String,
        achieved: BTreeSet<String>,
    },
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::UnacceptableAuthenticationMethod { .. } => {
                "UNACCEPTABLE_AUTHENTICATION_METHOD"
            }
            ValidationError::UnrecognizedAuthenticationMethod { .. } => {
                "UNRECOGNIZED_AUTHENTICATION_METHOD"
            }
        }
    }

    /// The authentication method the caller requested.
    pub fn authentication_method(&self) -> &str {
        match self {
            ValidationError::UnacceptableAuthenticationMethod { method } => method.as_str(),
            ValidationError::UnrecognizedAuthenticationMethod { method, .. } => method.as_str(),
        }
    }
}

/// The failure payload the host framework renders into its protocol error
/// response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrorResponse {
    pub code: String,
    pub message: String,
    pub authentication_method: String,
}

impl From<&ValidationError> for ValidationErrorResponse {
    fn from(err: &ValidationError) -> Self {
        ValidationErrorResponse {
            code: err.code().to_string(),
            message: err.to_string(),
            authentication_method: err.authentication_method().to_string(),
        }
    }
}

/* ===== request carrier types ===== */

/// Where a method requirement originated.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticationMethodSource {
    /// An explicit parameter on the validation request.
    RequestParam,
    /// Policy attached to the service's registry entry.
    ServiceDefinition,
    /// An attribute resolved from the authenticated principal.
    PrincipalAttribute,
}

/// The service an authentication is destined for. Carried through the
/// request pipeline, never inspected by the validation predicate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TargetService {
    pub uuid: Uuid,
    pub origin: String,
}

impl fmt::Display for TargetService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ origin: {}, ", self.origin)?;
        write!(f, "uuid: {} ]", self.uuid)
    }
}
