//! Validation of a produced assertion against a requested authentication
//! method. This is the hook the host framework calls once per validation
//! request, after the login has already been issued. The decision here is
//! purely about policy: did the login achieve the method that was asked
//! for, and is a proxied chain acceptable to this validator.

use crate::assertion::Assertion;
use mfagate_proto::v1::ValidationError;
use std::collections::BTreeSet;

/// The outcome of validating one assertion. Callers match on this rather
/// than catching anything - the two method failures convert to their
/// protocol error via [`ValidationState::error`], while `NoContext` and
/// `ProxiedChain` are plain negative results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationState {
    Satisfied,
    /// The assertion contained no authentication at all.
    NoContext,
    /// The method requirement held, but the assertion was produced via
    /// proxy authentication and this validator does not accept those.
    ProxiedChain { chain_length: usize },
    /// A method was required and no method was achieved.
    Unacceptable { method: String },
    /// A method was required and the achieved set does not contain it.
    Unrecognized {
        method: String,
        achieved: BTreeSet<String>,
    },
}

impl ValidationState {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, ValidationState::Satisfied)
    }

    pub fn error(&self) -> Option<ValidationError> {
        match self {
            ValidationState::Unacceptable { method } => {
                Some(ValidationError::UnacceptableAuthenticationMethod {
                    method: method.clone(),
                })
            }
            ValidationState::Unrecognized { method, achieved } => {
                Some(ValidationError::UnrecognizedAuthenticationMethod {
                    method: method.clone(),
                    achieved: achieved.clone(),
                })
            }
            _ => None,
        }
    }
}

/// Checks that an assertion satisfies this validator's method requirement.
/// One validator exists per required method, wired at startup and never
/// mutated after construction, so `validate` is freely callable across
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct ProtocolValidator {
    authentication_method: Option<String>,
    validate_proxy_requests: bool,
}

impl ProtocolValidator {
    /// A validator that accepts assertions produced via proxy authentication.
    pub fn with_proxy() -> Self {
        ProtocolValidator {
            authentication_method: None,
            validate_proxy_requests: true,
        }
    }

    /// A validator that rejects assertions whose chain is longer than the
    /// direct login.
    pub fn without_proxy() -> Self {
        ProtocolValidator {
            authentication_method: None,
            validate_proxy_requests: false,
        }
    }

    /// Require a specific authentication method. A blank method is the same
    /// as no requirement.
    pub fn require_method(mut self, method: &str) -> Self {
        self.authentication_method = Some(method.to_string());
        self
    }

    pub fn authentication_method(&self) -> Option<&str> {
        self.required_method()
    }

    pub fn validates_proxy_requests(&self) -> bool {
        self.validate_proxy_requests
    }

    fn required_method(&self) -> Option<&str> {
        self.authentication_method
            .as_deref()
            .map(str::trim)
            .filter(|method| !method.is_empty())
    }

    pub fn validate(&self, assertion: &Assertion) -> ValidationState {
        let authentication = match assertion.primary_authentication() {
            Some(authentication) => authentication,
            None => {
                debug!("No authentication context is available");
                return ValidationState::NoContext;
            }
        };

        let achieved = authentication.achieved_methods();

        if let Some(method) = self.required_method() {
            if achieved.is_empty() {
                debug!(
                    "Requested authentication method [{}] is not available",
                    method
                );
                return ValidationState::Unacceptable {
                    method: method.to_string(),
                };
            }

            if !achieved.contains(method) {
                debug!(
                    "Requested authentication method [{}] does not match the authentication method used [{:?}]",
                    method, achieved
                );
                return ValidationState::Unrecognized {
                    method: method.to_string(),
                    achieved,
                };
            }
        }

        let chain_length = assertion.chain_length();
        if self.validate_proxy_requests || chain_length == 1 {
            ValidationState::Satisfied
        } else {
            debug!(
                "Assertion was produced via proxy authentication, chain length {}",
                chain_length
            );
            ValidationState::ProxiedChain { chain_length }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::assertion::{Assertion, Authentication};
    use crate::constants::ATTR_AUTHN_METHOD;
    use crate::validation::{ProtocolValidator, ValidationState};

    fn test_init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn assertion_with_methods(methods: &[&str], chain_length: usize) -> Assertion {
        let mut chain: Vec<Authentication> = Vec::new();
        for _ in 1..chain_length {
            chain.push(Authentication::new());
        }
        let mut primary = Authentication::new();
        for method in methods {
            primary.add_attribute(ATTR_AUTHN_METHOD, method);
        }
        chain.push(primary);
        Assertion::new(chain)
    }

    #[test]
    fn test_validate_no_authentication_context() {
        test_init();
        let assertion = Assertion::new(Vec::new());

        let state = ProtocolValidator::without_proxy()
            .require_method("mfa-duo")
            .validate(&assertion);
        assert!(state == ValidationState::NoContext);
        assert!(!state.is_satisfied());
        // A plain negative result, not an error signal.
        assert!(state.error().is_none());

        let state = ProtocolValidator::with_proxy().validate(&assertion);
        assert!(state == ValidationState::NoContext);
    }

    #[test]
    fn test_validate_no_method_achieved() {
        test_init();
        // required "mfa-duo", achieved {}, chain length 1
        let assertion = assertion_with_methods(&[], 1);
        let state = ProtocolValidator::without_proxy()
            .require_method("mfa-duo")
            .validate(&assertion);
        assert!(
            state
                == ValidationState::Unacceptable {
                    method: "mfa-duo".to_string()
                }
        );
        let err = state.error().expect("expected an error kind");
        assert!(err.code() == "UNACCEPTABLE_AUTHENTICATION_METHOD");
        assert!(err.authentication_method() == "mfa-duo");
    }

    #[test]
    fn test_validate_method_mismatch() {
        test_init();
        // required "mfa-duo", achieved {"mfa-otp"}, chain length 1
        let assertion = assertion_with_methods(&["mfa-otp"], 1);
        let state = ProtocolValidator::without_proxy()
            .require_method("mfa-duo")
            .validate(&assertion);
        match &state {
            ValidationState::Unrecognized { method, achieved } => {
                assert!(method == "mfa-duo");
                assert!(achieved.len() == 1);
                assert!(achieved.contains("mfa-otp"));
            }
            state => panic!("unexpected state {:?}", state),
        };
        let err = state.error().expect("expected an error kind");
        assert!(err.code() == "UNRECOGNIZED_AUTHENTICATION_METHOD");
        let msg = err.to_string();
        assert!(msg.contains("mfa-duo") && msg.contains("mfa-otp"));
    }

    #[test]
    fn test_validate_method_satisfied_with_proxy() {
        test_init();
        // Proxy tolerant - chain length is irrelevant.
        for chain_length in 1..4 {
            let assertion = assertion_with_methods(&["mfa-duo"], chain_length);
            let state = ProtocolValidator::with_proxy()
                .require_method("mfa-duo")
                .validate(&assertion);
            assert!(state.is_satisfied());
        }
    }

    #[test]
    fn test_validate_method_satisfied_without_proxy() {
        test_init();
        let assertion = assertion_with_methods(&["mfa-duo"], 1);
        let state = ProtocolValidator::without_proxy()
            .require_method("mfa-duo")
            .validate(&assertion);
        assert!(state.is_satisfied());

        // required "mfa-duo", achieved {"mfa-duo"}, chain length 2 - the
        // method requirement holds but the proxied chain is rejected, with
        // no error signalled.
        let assertion = assertion_with_methods(&["mfa-duo"], 2);
        let state = ProtocolValidator::without_proxy()
            .require_method("mfa-duo")
            .validate(&assertion);
        assert!(state == ValidationState::ProxiedChain { chain_length: 2 });
        assert!(!state.is_satisfied());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_validate_no_required_method() {
        test_init();
        // required method = none, chain length 3, proxy tolerant
        let assertion = assertion_with_methods(&[], 3);
        let state = ProtocolValidator::with_proxy().validate(&assertion);
        assert!(state.is_satisfied());

        // Without proxy tolerance only a direct login passes. Neither error
        // kind is possible when no method is required.
        let state = ProtocolValidator::without_proxy().validate(&assertion);
        assert!(state == ValidationState::ProxiedChain { chain_length: 3 });
        assert!(state.error().is_none());

        let assertion = assertion_with_methods(&[], 1);
        let state = ProtocolValidator::without_proxy().validate(&assertion);
        assert!(state.is_satisfied());
    }

    #[test]
    fn test_validate_blank_method_means_no_requirement() {
        test_init();
        let assertion = assertion_with_methods(&[], 1);
        for blank in &["", "  "] {
            let validator = ProtocolValidator::without_proxy().require_method(blank);
            assert!(validator.authentication_method().is_none());
            assert!(validator.validate(&assertion).is_satisfied());
        }
    }

    #[test]
    fn test_validate_superset_of_achieved_methods() {
        test_init();
        // The login achieved more than was asked for - still satisfied.
        let assertion = assertion_with_methods(&["mfa-duo", "mfa-otp"], 1);
        let state = ProtocolValidator::without_proxy()
            .require_method("mfa-otp")
            .validate(&assertion);
        assert!(state.is_satisfied());
    }

    #[test]
    fn test_validate_reads_primary_authentication_only() {
        test_init();
        // The proxying login achieved the method, the concluding one did
        // not - the requirement is judged on the primary authentication.
        let mut proxying = Authentication::new();
        proxying.add_attribute(ATTR_AUTHN_METHOD, "mfa-duo");
        let direct = Authentication::new();
        let assertion = Assertion::new(vec![proxying, direct]);

        let state = ProtocolValidator::with_proxy()
            .require_method("mfa-duo")
            .validate(&assertion);
        assert!(
            state
                == ValidationState::Unacceptable {
                    method: "mfa-duo".to_string()
                }
        );
    }
}
