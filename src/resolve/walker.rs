use std::collections::HashSet;

use super::{PolicyVariant, ResolveError, ResolveResult};
use crate::common::Config;
use crate::model::{HierarchyNode, MethodCandidate, Registry};

/// Candidates collected from one hierarchy node
#[derive(Debug, Clone)]
pub(crate) struct Batch<'a> {
    pub class_name: &'a str,
    /// Distance from the traversal start (0 = start node)
    pub depth: usize,
    pub methods: Vec<&'a MethodCandidate>,
}

/// Outcome of one traversal, batches in start-to-root order
#[derive(Debug, Clone, Default)]
pub(crate) struct Walk<'a> {
    pub batches: Vec<Batch<'a>>,
    /// Some policy-evaluated node declares an operation-annotated method
    pub saw_annotated_method: bool,
}

/// `start` followed by every supertype reached through `super_name`, stopping
/// at an empty name or the terminal root.
pub(crate) fn supertype_chain<'a>(
    start: &'a HierarchyNode,
    registry: &'a Registry,
    terminal_root: &str,
) -> ResolveResult<Vec<&'a HierarchyNode>> {
    let mut chain = vec![start];
    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(start.name());
    let mut cur = start;
    loop {
        let sup = cur.super_name().trim();
        if sup.is_empty() || sup == terminal_root {
            break;
        }
        if seen.contains(sup) {
            return Err(ResolveError::CyclicHierarchy {
                start: start.name().to_string(),
                class: sup.to_string(),
            });
        }
        let next = registry.get(sup).ok_or_else(|| ResolveError::UnresolvableAncestor {
            class: cur.name().to_string(),
            ancestor: sup.to_string(),
        })?;
        log::debug!("{} -> {}", cur.name(), next.name());
        seen.insert(next.name());
        chain.push(next);
        cur = next;
    }
    Ok(chain)
}

/// Explicit contract: every method of the interface and its super-interfaces
pub(crate) fn walk_interfaces<'a>(
    start: &'a HierarchyNode,
    registry: &'a Registry,
    config: &Config,
) -> ResolveResult<Walk<'a>> {
    let chain = supertype_chain(start, registry, &config.terminal_root)?;
    let mut walk = Walk::default();
    for (depth, node) in chain.into_iter().enumerate() {
        if !node.is_interface() {
            log::warn!("{} reached from interface {} is not an interface", node.name(), start.name());
        }
        let methods: Vec<&MethodCandidate> = node.methods().iter().filter(|m| !m.is_initializer()).collect();
        walk.batches.push(Batch { class_name: node.name(), depth, methods });
    }
    Ok(walk)
}

/// Implicit contract: the policy applied to the start class and to each
/// service-annotated superclass
pub(crate) fn walk_implementation<'a>(
    start: &'a HierarchyNode,
    registry: &'a Registry,
    policy: PolicyVariant,
    config: &Config,
) -> ResolveResult<Walk<'a>> {
    let chain = supertype_chain(start, registry, &config.terminal_root)?;
    let mut walk = Walk::default();
    for (depth, node) in chain.into_iter().enumerate() {
        if depth > 0 && !node.is_service_annotated() {
            log::debug!("skipping {}: not service-annotated", node.name());
            continue;
        }
        if node.methods().iter().any(MethodCandidate::is_annotated) {
            walk.saw_annotated_method = true;
        }
        let methods = policy.eligible_methods(node, config);
        walk.batches.push(Batch { class_name: node.name(), depth, methods });
    }
    Ok(walk)
}
