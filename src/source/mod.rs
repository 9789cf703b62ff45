//! Hierarchy sources
//!
//! A source describes classes and interfaces, with their methods and
//! annotation data, and fills a [`Registry`] before any resolution runs.
//! The bundled sources read TOML class descriptors:
//!
//! ```toml
//! [[class]]
//! name = "com.acme.EchoImpl"
//! kind = "class"
//! super = "com.acme.BaseEcho"
//! service = true
//!
//! [[class.method]]
//! name = "echo"
//! params = ["java.lang.String"]
//! web_method = { operation_name = "Echo" }
//! ```

mod descriptor;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::common::consts::DESCRIPTOR_EXTENSION;
use crate::common::error::{Error, Result};
use crate::model::{HierarchyNode, Registry};

pub use descriptor::parse_descriptor;

/// Supplies hierarchy nodes to a registry
pub trait HierarchySource {
    /// Add every node this source describes, returning how many were added.
    /// A name that is already registered is an error.
    fn populate(&self, registry: &mut Registry) -> Result<usize>;
}

/// A single descriptor file
#[derive(Debug, Clone)]
pub struct DescriptorFile {
    path: PathBuf,
}

impl DescriptorFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HierarchySource for DescriptorFile {
    fn populate(&self, registry: &mut Registry) -> Result<usize> {
        let text = std::fs::read_to_string(&self.path)?;
        let nodes = parse_descriptor(&text, &self.path)?;
        register_all(registry, nodes, &self.path)
    }
}

/// Every descriptor file below a directory, visited in file-name order
#[derive(Debug, Clone)]
pub struct DescriptorDir {
    root: PathBuf,
}

impl DescriptorDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl HierarchySource for DescriptorDir {
    fn populate(&self, registry: &mut Registry) -> Result<usize> {
        let mut added = 0usize;
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some(DESCRIPTOR_EXTENSION) {
                continue;
            }
            log::debug!("loading descriptor {}", path.display());
            added += DescriptorFile::new(path).populate(registry)?;
        }
        log::info!("loaded {} classes from {}", added, self.root.display());
        Ok(added)
    }
}

/// Build a registry from a descriptor file or a directory of them
pub fn load_registry(path: &Path) -> Result<Registry> {
    let mut registry = Registry::new();
    if path.is_dir() {
        DescriptorDir::new(path).populate(&mut registry)?;
    } else {
        DescriptorFile::new(path).populate(&mut registry)?;
    }
    Ok(registry)
}

fn register_all(registry: &mut Registry, nodes: Vec<HierarchyNode>, origin: &Path) -> Result<usize> {
    let count = nodes.len();
    for node in nodes {
        let name = node.name().to_string();
        if registry.insert(node).is_some() {
            return Err(Error::descriptor_error(origin, format!("class '{}' is described more than once", name)));
        }
    }
    Ok(count)
}
