//! Resolver configuration
//!
//! The active exposure policy is chosen from three places, highest priority first:
//! - the process environment (`JAXWS_LEGACY_WEB_METHOD`, then `JAXWS_LEGACY_WEB_METHOD_SUN`)
//! - the `[resolution]` table of a manifest file
//! - the installed tooling version (modern rules need 2.1.6 or newer)

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::consts::{
    DEFAULT_TERMINAL_ROOT, ENV_LEGACY_WEB_METHOD, ENV_LEGACY_WEB_METHOD_SUN,
    MODERN_RULES_MIN_TOOLING_VERSION,
};
use crate::common::error::{Error, Result};
use crate::resolve::PolicyVariant;

/// Settings consumed by the resolution engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Which exposure rules decide method eligibility
    pub policy: PolicyVariant,
    /// Legacy rules only: drop static methods when no method is explicitly included
    pub restrict_static: bool,
    /// Ancestor name at which superclass walks stop
    pub terminal_root: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: PolicyVariant::Modern,
            restrict_static: true,
            terminal_root: DEFAULT_TERMINAL_ROOT.to_string(),
        }
    }
}

/// Manifest file layout
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    pub resolution: ResolutionSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolutionSection {
    pub legacy_web_method: Option<String>,
    pub restrict_static: Option<bool>,
    pub tooling_version: Option<String>,
    pub terminal_root: Option<String>,
}

impl Manifest {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config_error(format!("{}: {}", origin.display(), e)))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text, path)
    }
}

/// Switches read from the process environment
#[derive(Debug, Clone, Default)]
pub struct EnvFlags {
    pub legacy_web_method: Option<String>,
    pub legacy_web_method_sun: Option<String>,
}

impl EnvFlags {
    pub fn from_env() -> Self {
        Self {
            legacy_web_method: std::env::var(ENV_LEGACY_WEB_METHOD).ok(),
            legacy_web_method_sun: std::env::var(ENV_LEGACY_WEB_METHOD_SUN).ok(),
        }
    }
}

impl Config {
    /// Build the configuration from an optional manifest file and the environment
    pub fn load(manifest_path: Option<&Path>) -> Result<Self> {
        let manifest = match manifest_path {
            Some(path) => {
                log::debug!("reading resolver manifest {}", path.display());
                Manifest::from_file(path)?
            }
            None => Manifest::default(),
        };
        Ok(Self::from_sources(&manifest, &EnvFlags::from_env()))
    }

    /// Combine already-read sources; the environment wins over the manifest
    pub fn from_sources(manifest: &Manifest, env: &EnvFlags) -> Self {
        let section = &manifest.resolution;
        let legacy_flag = match env.legacy_web_method.as_deref().filter(|v| has_value(v)) {
            Some(flag) => {
                log::debug!("{} set in environment: {}", ENV_LEGACY_WEB_METHOD, flag);
                Some(flag)
            }
            None => section.legacy_web_method.as_deref().filter(|v| has_value(v)),
        };
        let policy = select_policy(
            legacy_flag,
            env.legacy_web_method_sun.as_deref(),
            section.tooling_version.as_deref(),
        );
        let terminal_root = section
            .terminal_root
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_TERMINAL_ROOT)
            .to_string();
        Self {
            policy,
            restrict_static: section.restrict_static.unwrap_or(true),
            terminal_root,
        }
    }

    pub fn with_policy(mut self, policy: PolicyVariant) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_restrict_static(mut self, restrict_static: bool) -> Self {
        self.restrict_static = restrict_static;
        self
    }
}

/// Decide which exposure rules apply.
///
/// A legacy flag of `true` always wins. Any other legacy flag leaves the
/// vendor-specific flag to decide; failing both, modern rules apply unless the
/// tooling is too old.
pub fn select_policy(
    legacy_flag: Option<&str>,
    sun_flag: Option<&str>,
    tooling_version: Option<&str>,
) -> PolicyVariant {
    if is_true(legacy_flag) {
        log::debug!("legacy web method rules requested explicitly");
        return PolicyVariant::Legacy;
    }
    if is_true(sun_flag) {
        log::debug!("legacy web method rules requested through {}", ENV_LEGACY_WEB_METHOD_SUN);
        return PolicyVariant::Legacy;
    }
    match tooling_version.filter(|v| has_value(v)) {
        Some(version) if !is_modern_tooling_version(version) => {
            log::debug!("tooling version {} predates modern rules; using legacy", version);
            PolicyVariant::Legacy
        }
        // no tooling version configured: assume current tooling rather than legacy
        _ => PolicyVariant::Modern,
    }
}

/// True when `version` is at least the first release with modern exposure rules
pub fn is_modern_tooling_version(version: &str) -> bool {
    match (version_segments(version), version_segments(MODERN_RULES_MIN_TOOLING_VERSION)) {
        (Some(found), Some(min)) => compare_segments(&found, &min) != Ordering::Less,
        _ => {
            log::warn!("unable to interpret tooling version '{}'", version);
            false
        }
    }
}

fn version_segments(version: &str) -> Option<Vec<u64>> {
    let trimmed = version.trim();
    if !trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let segments = trimmed
        .split('.')
        .map(|seg| {
            let digits: String = seg.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<u64>().unwrap_or(0)
        })
        .collect();
    Some(segments)
}

fn compare_segments(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

fn has_value(v: &str) -> bool {
    !v.trim().is_empty()
}

fn is_true(flag: Option<&str>) -> bool {
    flag.map_or(false, |v| v.trim().eq_ignore_ascii_case("true"))
}
