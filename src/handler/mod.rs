//! Handler-chain selection
//!
//! Handler chains are configured per service, port and protocol binding. This
//! module turns descriptor entries into typed chains (name patterns parsed
//! against the descriptor's prefix bindings) and picks the handlers that apply
//! to a given port.

mod chain;
mod pattern;

use std::fmt;

pub use chain::{
    binding_uri, parse_handler_chains, select_handlers, HandlerChainEntry, HandlerChainFile,
    HandlerChainSource, HandlerRef, HandlerSelection, PortInfo,
};
pub use pattern::QNamePattern;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("malformed qualified-name pattern '{pattern}': {reason}")]
    Malformed { pattern: String, reason: String },
}

/// Namespace-qualified name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub namespace: String,
    pub local: String,
}

impl QName {
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self { namespace: namespace.into(), local: local.into() }
    }

    /// Parse `{namespace}local` or a bare `local` (empty namespace)
    pub fn parse_clark(text: &str) -> Result<Self, PatternError> {
        let text = text.trim();
        let malformed = |reason: &str| PatternError::Malformed { pattern: text.to_string(), reason: reason.to_string() };
        let (namespace, local) = match text.strip_prefix('{') {
            Some(rest) => rest.split_once('}').ok_or_else(|| malformed("missing '}'"))?,
            None => ("", text),
        };
        if local.is_empty() {
            return Err(malformed("empty local part"));
        }
        Ok(QName::new(namespace, local))
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.local)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local)
        }
    }
}
