// Common test utilities
#![allow(dead_code)]

use std::path::Path;

use seiops::source::parse_descriptor;
use seiops::{resolve, Config, PolicyVariant, Registry, ResolutionResult};

/// Build a registry from inline descriptor text
pub fn registry(src: &str) -> Registry {
    let nodes = parse_descriptor(src, Path::new("inline.toml")).expect("descriptor should parse");
    nodes.into_iter().collect()
}

pub fn config(policy: PolicyVariant) -> Config {
    Config::default().with_policy(policy)
}

pub fn ok(src: &str, root: &str, policy: PolicyVariant) -> ResolutionResult {
    let registry = registry(src);
    let node = registry.get(root).expect("root class registered");
    resolve(node, &registry, policy, &config(policy)).expect("expected ok")
}

pub fn err_contains(src: &str, root: &str, policy: PolicyVariant, needle: &str) {
    let registry = registry(src);
    let node = registry.get(root).expect("root class registered");
    let e = resolve(node, &registry, policy, &config(policy)).unwrap_err().to_string();
    assert!(e.contains(needle), "{}", e);
}

/// `Declaring#name(params)` for each operation, in result order
pub fn stamped(result: &ResolutionResult) -> Vec<String> {
    result
        .iter()
        .map(|m| format!("{}#{}", m.declaring_class().unwrap_or("?"), m.signature()))
        .collect()
}

pub fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}
