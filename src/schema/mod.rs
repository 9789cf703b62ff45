//! Schema location resolution
//!
//! Imported and included schemas name their target with a namespace, a
//! location that may be relative, and the location of the importing document.
//! A resolver turns that triple into the schema bytes plus a canonical system
//! identifier. Only local files are read; remote schemes are refused.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::common::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchema {
    /// Absolute, normalised URL of the document that was read
    pub system_id: String,
    pub bytes: Vec<u8>,
}

pub trait SchemaResolver {
    fn resolve(&self, namespace: Option<&str>, schema_location: &str, base: Option<&str>) -> Result<ResolvedSchema>;
}

/// Resolves against the local filesystem, with an optional namespace catalog
/// that takes precedence over the stated location
#[derive(Debug, Clone, Default)]
pub struct FileSchemaResolver {
    catalog: HashMap<String, PathBuf>,
}

impl FileSchemaResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog_entry(mut self, namespace: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.catalog.insert(namespace.into(), path.into());
        self
    }
}

impl SchemaResolver for FileSchemaResolver {
    fn resolve(&self, namespace: Option<&str>, schema_location: &str, base: Option<&str>) -> Result<ResolvedSchema> {
        let url = match namespace.and_then(|ns| self.catalog.get(ns)) {
            Some(path) => {
                log::debug!("catalog maps {:?} to {}", namespace, path.display());
                file_url(path, schema_location)?
            }
            None => resolve_location(schema_location, base)?,
        };
        if url.scheme() != "file" {
            return Err(Error::schema_error(
                schema_location,
                format!("unsupported scheme '{}'; only local files are resolved", url.scheme()),
            ));
        }
        let path = url
            .to_file_path()
            .map_err(|_| Error::schema_error(schema_location, format!("'{}' is not a local path", url)))?;
        let bytes = fs::read(&path).map_err(|e| Error::schema_error(schema_location, format!("{}: {}", path.display(), e)))?;
        Ok(ResolvedSchema { system_id: url.to_string(), bytes })
    }
}

/// Join `location` onto `base` (a URL or a file path); absolute URLs stand alone
pub fn resolve_location(location: &str, base: Option<&str>) -> Result<Url> {
    let location = location.trim();
    if location.is_empty() {
        return Err(Error::schema_error(location, "empty schema location"));
    }
    if let Some(url) = parse_absolute_url(location) {
        return Ok(url);
    }
    let base_url = match base.map(str::trim).filter(|b| !b.is_empty()) {
        Some(b) => match parse_absolute_url(b) {
            Some(url) => url,
            None => file_url(Path::new(b), location)?,
        },
        None => {
            let cwd = std::env::current_dir()?;
            Url::from_directory_path(&cwd)
                .map_err(|_| Error::schema_error(location, format!("cannot use '{}' as a base", cwd.display())))?
        }
    };
    base_url
        .join(location)
        .map_err(|e| Error::schema_error(location, format!("cannot resolve against {}: {}", base_url, e)))
}

// single-letter schemes are Windows drive letters, not URLs
fn parse_absolute_url(text: &str) -> Option<Url> {
    Url::parse(text).ok().filter(|u| u.scheme().len() > 1)
}

fn file_url(path: &Path, location: &str) -> Result<Url> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Url::from_file_path(&absolute)
        .map_err(|_| Error::schema_error(location, format!("cannot express '{}' as a URL", absolute.display())))
}
