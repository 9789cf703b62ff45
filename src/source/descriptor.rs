use std::path::Path;

use serde::Deserialize;

use crate::common::error::{Error, Result};
use crate::model::{ExclusionFlag, HierarchyNode, MethodCandidate, NodeKind, WebMethodMeta};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DescriptorDoc {
    #[serde(default, rename = "class")]
    classes: Vec<ClassEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClassEntry {
    name: String,
    #[serde(default)]
    kind: KindEntry,
    #[serde(default, rename = "super")]
    super_name: Option<String>,
    #[serde(default)]
    service: bool,
    #[serde(default)]
    wsdl_location: Option<String>,
    #[serde(default, rename = "method")]
    methods: Vec<MethodEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum KindEntry {
    #[default]
    Class,
    Interface,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MethodEntry {
    name: String,
    #[serde(default)]
    params: Vec<String>,
    #[serde(default)]
    returns: Option<String>,
    #[serde(default, rename = "static")]
    is_static: bool,
    #[serde(default, rename = "final")]
    is_final: bool,
    #[serde(default)]
    throws: Vec<String>,
    #[serde(default)]
    web_method: Option<WebMethodEntry>,
}

/// Presence of this table is what makes a method explicitly annotated
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct WebMethodEntry {
    #[serde(default)]
    exclude: bool,
    #[serde(default)]
    operation_name: Option<String>,
    #[serde(default)]
    action: Option<String>,
}

/// Parse the text of one descriptor; `origin` names it in error messages
pub fn parse_descriptor(text: &str, origin: &Path) -> Result<Vec<HierarchyNode>> {
    let doc: DescriptorDoc = toml::from_str(text).map_err(|e| Error::descriptor_error(origin, e.to_string()))?;
    doc.classes.into_iter().map(|entry| build_node(entry, origin)).collect()
}

fn build_node(entry: ClassEntry, origin: &Path) -> Result<HierarchyNode> {
    let name = entry.name.trim();
    if name.is_empty() {
        return Err(Error::descriptor_error(origin, "class with an empty name"));
    }
    let kind = match entry.kind {
        KindEntry::Class => NodeKind::Class,
        KindEntry::Interface => NodeKind::Interface,
    };
    let mut node = HierarchyNode::new(name, kind);
    if let Some(sup) = entry.super_name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        node = node.extends(sup);
    }
    if entry.service {
        node = node.service();
    }
    if let Some(location) = entry.wsdl_location {
        node = node.wsdl(location);
    }
    for method in entry.methods {
        node = node.method(build_method(method, name, origin)?);
    }
    Ok(node)
}

fn build_method(entry: MethodEntry, class_name: &str, origin: &Path) -> Result<MethodCandidate> {
    let method_name = entry.name.trim();
    if method_name.is_empty() {
        return Err(Error::descriptor_error(origin, format!("method with an empty name in '{}'", class_name)));
    }
    let mut method = MethodCandidate::new(method_name, entry.params.iter().map(|p| p.trim()));
    if entry.is_static {
        method = method.with_static();
    }
    if entry.is_final {
        method = method.with_final();
    }
    if let Some(returns) = entry.returns {
        method = method.returning(returns);
    }
    for fault in entry.throws {
        method = method.throwing(fault);
    }
    if let Some(wm) = entry.web_method {
        let exclusion = if wm.exclude { ExclusionFlag::Excluded } else { ExclusionFlag::Included };
        method = method.with_exclusion(exclusion).with_web_method(WebMethodMeta {
            operation_name: wm.operation_name,
            action: wm.action,
        });
    }
    Ok(method)
}
