//! Service Endpoint Operation Resolver (seiops)
//!
//! Determines which methods of a web-service implementation class hierarchy are
//! exposed as remotely invocable operations.
//!
//! ## Architecture
//!
//! - **model**: classes, interfaces, declared methods and the registry that holds them
//! - **source**: hierarchy descriptors that populate a registry
//! - **resolve**: exposure policies, the hierarchy walker and override elimination
//! - **handler**: handler-chain name patterns and per-port handler selection
//! - **schema**: schema location resolution for imported documents
//! - **common**: configuration, errors and shared constants
//!
//! ## Resolution Flow
//!
//! ```text
//! descriptors → Registry → resolve(root) → walk (interface | implementation) → override elimination → operations
//! ```

pub mod common;
pub mod handler;
pub mod model;
pub mod resolve;
pub mod schema;
pub mod source;

use std::path::Path;

pub use common::{Config, Error, Result};
pub use model::{ExclusionFlag, HierarchyNode, MethodCandidate, NodeKind, Registry, Signature};
pub use resolve::{resolve, resolve_class, Diagnostic, PolicyVariant, ResolutionResult, ResolveError, TraversalMode};

/// Load descriptors from `descriptors` (file or directory) and resolve `class_name`
pub fn resolve_from_descriptors(descriptors: &Path, class_name: &str, config: &Config) -> Result<ResolutionResult> {
    let registry = source::load_registry(descriptors)?;
    log::info!("resolving {} against {} registered classes", class_name, registry.len());
    Ok(resolve_class(class_name, &registry, config)?)
}
