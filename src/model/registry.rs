use std::collections::HashMap;

use super::HierarchyNode;

/// Qualified class name -> hierarchy node.
///
/// Populated once before any resolution starts; the engine only reads it, so a
/// shared `&Registry` can back any number of concurrent resolutions.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    nodes: HashMap<String, HierarchyNode>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning any node previously registered under the same name
    pub fn insert(&mut self, node: HierarchyNode) -> Option<HierarchyNode> {
        self.nodes.insert(node.name().to_string(), node)
    }

    pub fn get(&self, name: &str) -> Option<&HierarchyNode> {
        self.nodes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn nodes(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.nodes.values()
    }
}

impl FromIterator<HierarchyNode> for Registry {
    fn from_iter<T: IntoIterator<Item = HierarchyNode>>(iter: T) -> Self {
        let mut registry = Registry::new();
        for node in iter {
            registry.insert(node);
        }
        registry
    }
}

impl Extend<HierarchyNode> for Registry {
    fn extend<T: IntoIterator<Item = HierarchyNode>>(&mut self, iter: T) {
        for node in iter {
            self.insert(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_and_reports_previous_node() {
        let mut registry = Registry::new();
        assert!(registry.insert(HierarchyNode::class("a.B")).is_none());
        let previous = registry.insert(HierarchyNode::class("a.B").service());
        assert!(previous.is_some_and(|n| !n.is_service_annotated()));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("a.B").unwrap().is_service_annotated());
    }

    #[test]
    fn names_are_sorted() {
        let registry: Registry = ["z.Last", "a.First", "m.Middle"]
            .into_iter()
            .map(HierarchyNode::class)
            .collect();
        assert_eq!(registry.names(), vec!["a.First", "m.Middle", "z.Last"]);
        assert!(registry.contains("m.Middle"));
        assert!(!registry.contains("m.Missing"));
    }
}
