//! Wiring-time configuration for the validators. The host deployment may
//! ship a small TOML file naming the required authentication method and
//! whether proxied assertions are acceptable; a missing file just means the
//! defaults apply.

use crate::constants::DEFAULT_VALIDATE_PROXY_REQUESTS;
use crate::validation::ProtocolValidator;
use serde_derive::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ConfigInt {
    authentication_method: Option<String>,
    validate_proxy_requests: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    pub authentication_method: Option<String>,
    pub validate_proxy_requests: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig::new()
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        ValidatorConfig {
            authentication_method: None,
            validate_proxy_requests: DEFAULT_VALIDATE_PROXY_REQUESTS,
        }
    }

    pub fn read_options_from_optional_config<P: AsRef<Path>>(
        self,
        config_path: P,
    ) -> Result<Self, ()> {
        let mut f = match File::open(config_path) {
            Ok(f) => f,
            Err(e) => {
                debug!("Unable to open config file [{:?}], skipping ...", e);
                return Ok(self);
            }
        };

        let mut contents = String::new();
        f.read_to_string(&mut contents)
            .map_err(|e| eprintln!("{:?}", e))?;

        let config: ConfigInt =
            toml::from_str(contents.as_str()).map_err(|e| eprintln!("{:?}", e))?;

        // Now map the values into our config.
        Ok(ValidatorConfig {
            authentication_method: config.authentication_method.or(self.authentication_method),
            validate_proxy_requests: config
                .validate_proxy_requests
                .unwrap_or(self.validate_proxy_requests),
        })
    }

    pub fn build(&self) -> ProtocolValidator {
        let validator = if self.validate_proxy_requests {
            ProtocolValidator::with_proxy()
        } else {
            ProtocolValidator::without_proxy()
        };
        match self.authentication_method.as_deref() {
            Some(method) => validator.require_method(method),
            None => validator,
        }
    }
}
