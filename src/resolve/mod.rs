//! Operation resolution
//!
//! Given the root class of a service and a populated [`Registry`], compute the
//! ordered set of methods that are exposed as operations:
//!
//! ```text
//! root ──kind──▶ interface walk ─┐
//!      └──────▶ implementation walk (policy per node) ─┴▶ override elimination ▶ result
//! ```

mod overrides;
pub mod policy;
mod walker;

use std::fmt;

use crate::common::Config;
use crate::model::{HierarchyNode, MethodCandidate, Registry};

pub use policy::PolicyVariant;

pub type ResolveResult<T> = Result<T, ResolveError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("cannot resolve ancestor '{ancestor}' of '{class}'")]
    UnresolvableAncestor { class: String, ancestor: String },
    #[error("cyclic hierarchy: '{class}' is reached twice while walking up from '{start}'")]
    CyclicHierarchy { start: String, class: String },
}

/// How the operation set was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalMode {
    /// The root is an interface that defines the contract directly
    Interface,
    /// The root is a class; the contract is implied by its methods
    Implementation,
}

/// Non-fatal findings reported alongside a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Operation annotations are in use, but nothing (interface or contract
    /// document) pins the contract down, so unannotated public methods are
    /// exposed too
    PossibleUnintendedExposure { class: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PossibleUnintendedExposure { class } => write!(
                f,
                "{} uses operation annotations without an interface or contract document; \
                 unannotated public methods are exposed as operations",
                class
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    pub root: String,
    pub policy: PolicyVariant,
    pub mode: TraversalMode,
    /// No two entries share a signature; each has its declaring class set
    pub operations: Vec<MethodCandidate>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolutionResult {
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MethodCandidate> {
        self.operations.iter()
    }

    /// All overloads exposed under the given method name
    pub fn by_method_name(&self, name: &str) -> Vec<&MethodCandidate> {
        self.operations.iter().filter(|m| m.name() == name).collect()
    }

    pub fn method_names(&self) -> Vec<&str> {
        self.operations.iter().map(MethodCandidate::name).collect()
    }
}

impl<'a> IntoIterator for &'a ResolutionResult {
    type Item = &'a MethodCandidate;
    type IntoIter = std::slice::Iter<'a, MethodCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

/// Resolve the operations exposed by `root` under `policy`
pub fn resolve(
    root: &HierarchyNode,
    registry: &Registry,
    policy: PolicyVariant,
    config: &Config,
) -> ResolveResult<ResolutionResult> {
    let mode = if root.is_interface() { TraversalMode::Interface } else { TraversalMode::Implementation };
    log::debug!("resolve start: root={} mode={:?} policy={}", root.name(), mode, policy);

    let walk = match mode {
        TraversalMode::Interface => walker::walk_interfaces(root, registry, config)?,
        TraversalMode::Implementation => walker::walk_implementation(root, registry, policy, config)?,
    };

    let mut diagnostics = Vec::new();
    if policy == PolicyVariant::Modern
        && mode == TraversalMode::Implementation
        && walk.saw_annotated_method
        && root.wsdl_location().is_none()
    {
        let diagnostic = Diagnostic::PossibleUnintendedExposure { class: root.name().to_string() };
        log::warn!("{}", diagnostic);
        diagnostics.push(diagnostic);
    }

    let operations = overrides::eliminate_overrides(&walk.batches);
    log::debug!("resolve end: root={} operations={}", root.name(), operations.len());
    Ok(ResolutionResult {
        root: root.name().to_string(),
        policy,
        mode,
        operations,
        diagnostics,
    })
}

/// Look `class_name` up in the registry and resolve it with the configured policy
pub fn resolve_class(class_name: &str, registry: &Registry, config: &Config) -> ResolveResult<ResolutionResult> {
    let root = registry.get(class_name).ok_or_else(|| ResolveError::UnresolvableAncestor {
        class: class_name.to_string(),
        ancestor: class_name.to_string(),
    })?;
    resolve(root, registry, config.policy, config)
}
