//! The host framework's view of a completed login. An [`Assertion`] carries
//! the chain of authentications performed (direct login plus any proxying
//! logins), and each [`Authentication`] carries the attributes recorded
//! during that login. The validation predicate only ever reads these.

use crate::constants::ATTR_AUTHN_METHOD;
use std::collections::{BTreeMap, BTreeSet};

/// A single completed authentication with its recorded attributes.
/// Attributes are multi-valued, so a login that satisfied several methods
/// records them all under [`ATTR_AUTHN_METHOD`].
#[derive(Debug, Clone, Default)]
pub struct Authentication {
    attributes: BTreeMap<String, BTreeSet<String>>,
}

impl Authentication {
    pub fn new() -> Self {
        Authentication {
            attributes: BTreeMap::new(),
        }
    }

    pub fn add_attribute(&mut self, name: &str, value: &str) {
        self.attributes
            .entry(name.to_string())
            .or_insert_with(BTreeSet::new)
            .insert(value.to_string());
    }

    pub fn attribute(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.attributes.get(name)
    }

    /// The set of authentication methods this login already satisfied.
    pub fn achieved_methods(&self) -> BTreeSet<String> {
        self.attributes
            .get(ATTR_AUTHN_METHOD)
            .cloned()
            .unwrap_or_default()
    }
}

/// The outcome of a completed login as presented for validation.
#[derive(Debug, Clone, Default)]
pub struct Assertion {
    chained_authentications: Vec<Authentication>,
}

impl Assertion {
    pub fn new(chained_authentications: Vec<Authentication>) -> Self {
        Assertion {
            chained_authentications,
        }
    }

    pub fn chained_authentications(&self) -> &[Authentication] {
        self.chained_authentications.as_slice()
    }

    /// Chain length greater than one indicates proxy involvement.
    pub fn chain_length(&self) -> usize {
        self.chained_authentications.len()
    }

    /// The authentication that concluded the login, the last in the chain.
    pub fn primary_authentication(&self) -> Option<&Authentication> {
        self.chained_authentications.last()
    }
}
