use std::collections::HashMap;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use serde::Deserialize;

use super::{QName, QNamePattern};
use crate::common::error::{Error, Result};

/// Shorthand tokens accepted in `protocol_bindings`
static BINDING_TOKENS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("##SOAP11_HTTP", "http://schemas.xmlsoap.org/wsdl/soap/http");
    map.insert("##SOAP11_HTTP_MTOM", "http://schemas.xmlsoap.org/wsdl/soap/http?mtom=true");
    map.insert("##SOAP12_HTTP", "http://www.w3.org/2003/05/soap/bindings/HTTP/");
    map.insert("##SOAP12_HTTP_MTOM", "http://www.w3.org/2003/05/soap/bindings/HTTP/?mtom=true");
    map.insert("##XML_HTTP", "http://www.w3.org/2004/08/wsdl/http");
    map
});

/// Binding URI for a token; anything that is not a known token is taken literally
pub fn binding_uri(token: &str) -> &str {
    let token = token.trim();
    BINDING_TOKENS.get(token).copied().unwrap_or(token)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerRef {
    pub name: String,
    pub class: String,
    pub soap_roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HandlerChainEntry {
    pub service_name_pattern: Option<QNamePattern>,
    pub port_name_pattern: Option<QNamePattern>,
    pub protocol_bindings: Vec<String>,
    pub handlers: Vec<HandlerRef>,
}

/// The endpoint a handler chain is being assembled for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    pub service: QName,
    pub port: QName,
    /// Binding URI or token
    pub binding: String,
}

impl HandlerChainEntry {
    /// Every criterion present on the chain must match the port
    pub fn applies_to(&self, port: &PortInfo) -> bool {
        if let Some(pattern) = &self.service_name_pattern {
            if !pattern.matches(&port.service) {
                return false;
            }
        }
        if let Some(pattern) = &self.port_name_pattern {
            if !pattern.matches(&port.port) {
                return false;
            }
        }
        if !self.protocol_bindings.is_empty() {
            let wanted = binding_uri(&port.binding);
            if !self.protocol_bindings.iter().any(|b| binding_uri(b) == wanted) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerSelection {
    pub handler_classes: Vec<String>,
    pub soap_roles: Vec<String>,
}

/// Handlers of every chain that applies to `port`, in document order
pub fn select_handlers(chains: &[HandlerChainEntry], port: &PortInfo) -> HandlerSelection {
    let mut selection = HandlerSelection::default();
    for (index, chain) in chains.iter().enumerate() {
        if !chain.applies_to(port) {
            log::debug!("handler chain #{} does not apply to {}", index, port.port);
            continue;
        }
        for handler in &chain.handlers {
            selection.handler_classes.push(handler.class.clone());
            selection.soap_roles.extend(handler.soap_roles.iter().cloned());
        }
    }
    selection
}

/// Supplies parsed handler-chain configuration
pub trait HandlerChainSource {
    fn handler_chains(&self) -> Result<Vec<HandlerChainEntry>>;
}

/// A TOML handler-chain descriptor on disk
#[derive(Debug, Clone)]
pub struct HandlerChainFile {
    path: PathBuf,
}

impl HandlerChainFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HandlerChainSource for HandlerChainFile {
    fn handler_chains(&self) -> Result<Vec<HandlerChainEntry>> {
        let text = std::fs::read_to_string(&self.path)?;
        parse_handler_chains(&text, &self.path)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HandlerChainsDoc {
    #[serde(default)]
    namespaces: HashMap<String, String>,
    #[serde(default)]
    handler_chain: Vec<ChainEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChainEntry {
    #[serde(default)]
    service_name_pattern: Option<String>,
    #[serde(default)]
    port_name_pattern: Option<String>,
    #[serde(default)]
    protocol_bindings: Vec<String>,
    #[serde(default)]
    handler: Vec<HandlerEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HandlerEntry {
    #[serde(default)]
    name: String,
    class: String,
    #[serde(default)]
    soap_roles: Vec<String>,
}

/// Parse a handler-chain descriptor; malformed name patterns are reported as such
pub fn parse_handler_chains(text: &str, origin: &Path) -> Result<Vec<HandlerChainEntry>> {
    let doc: HandlerChainsDoc = toml::from_str(text).map_err(|e| Error::descriptor_error(origin, e.to_string()))?;
    let mut chains = Vec::with_capacity(doc.handler_chain.len());
    for entry in doc.handler_chain {
        let service_name_pattern = entry
            .service_name_pattern
            .as_deref()
            .map(|p| QNamePattern::parse(p, &doc.namespaces))
            .transpose()?;
        let port_name_pattern = entry
            .port_name_pattern
            .as_deref()
            .map(|p| QNamePattern::parse(p, &doc.namespaces))
            .transpose()?;
        // a single entry may list several space-separated tokens
        let protocol_bindings = entry
            .protocol_bindings
            .iter()
            .flat_map(|b| b.split_whitespace())
            .map(str::to_string)
            .collect();
        let mut handlers = Vec::with_capacity(entry.handler.len());
        for h in entry.handler {
            let class = h.class.trim();
            if class.is_empty() {
                return Err(Error::descriptor_error(origin, "handler without a class"));
            }
            handlers.push(HandlerRef { name: h.name, class: class.to_string(), soap_roles: h.soap_roles });
        }
        chains.push(HandlerChainEntry { service_name_pattern, port_name_pattern, protocol_bindings, handlers });
    }
    Ok(chains)
}
