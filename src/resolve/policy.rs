//! Per-node exposure rules
//!
//! Two rule sets shipped in different tooling releases and are both still in
//! use. Each decides, for the methods declared directly on one hierarchy node,
//! which of them are operation candidates.

use std::fmt;
use std::str::FromStr;

use crate::common::Config;
use crate::model::{ExclusionFlag, HierarchyNode, MethodCandidate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyVariant {
    /// Explicitly included methods, if any, are the only ones exposed
    Legacy,
    /// Every non-excluded instance method that is not final is exposed
    Modern,
}

impl PolicyVariant {
    /// Methods declared on `node` that this policy accepts, in declaration order
    pub fn eligible_methods<'a>(self, node: &'a HierarchyNode, config: &Config) -> Vec<&'a MethodCandidate> {
        let declared: Vec<&MethodCandidate> = node.methods().iter().filter(|m| !m.is_initializer()).collect();
        let declared_count = declared.len();
        let eligible: Vec<&MethodCandidate> = match self {
            PolicyVariant::Legacy => {
                let any_included = has_explicit_inclusion(declared.iter().copied());
                if any_included {
                    log::debug!("{}: explicit operations present, ignoring unannotated methods", node.name());
                }
                declared
                    .into_iter()
                    .filter(|m| legacy_eligible(m, any_included, config.restrict_static))
                    .collect()
            }
            PolicyVariant::Modern => declared.into_iter().filter(|m| modern_eligible(m)).collect(),
        };
        log::debug!(
            "{} policy accepted {} of {} methods on {}",
            self,
            eligible.len(),
            declared_count,
            node.name()
        );
        eligible
    }
}

impl fmt::Display for PolicyVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyVariant::Legacy => write!(f, "legacy"),
            PolicyVariant::Modern => write!(f, "modern"),
        }
    }
}

impl FromStr for PolicyVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(PolicyVariant::Legacy),
            "modern" => Ok(PolicyVariant::Modern),
            other => Err(format!("unknown policy variant '{}' (expected legacy or modern)", other)),
        }
    }
}

pub fn is_excluded(method: &MethodCandidate) -> bool {
    method.exclusion == ExclusionFlag::Excluded
}

pub fn is_explicitly_included(method: &MethodCandidate) -> bool {
    method.exclusion == ExclusionFlag::Included
}

pub fn has_explicit_inclusion<'a>(methods: impl IntoIterator<Item = &'a MethodCandidate>) -> bool {
    methods.into_iter().any(is_explicitly_included)
}

/// Legacy rule for one method, given whether its node has any explicit inclusion
pub fn legacy_eligible(method: &MethodCandidate, any_included: bool, restrict_static: bool) -> bool {
    if any_included {
        return is_explicitly_included(method);
    }
    !is_excluded(method) && !(restrict_static && method.modifiers.is_static)
}

/// Modern rule: static and final methods are never operations
pub fn modern_eligible(method: &MethodCandidate) -> bool {
    !is_excluded(method) && !method.modifiers.is_static && !method.modifiers.is_final
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WebMethodMeta;

    fn names(methods: &[&MethodCandidate]) -> Vec<String> {
        methods.iter().map(|m| m.name().to_string()).collect()
    }

    fn no_args(name: &str) -> MethodCandidate {
        MethodCandidate::new(name, Vec::<String>::new())
    }

    #[test]
    fn legacy_explicit_inclusion_wins_over_defaults() {
        let node = HierarchyNode::class("p.Impl")
            .method(no_args("a"))
            .method(no_args("b").with_exclusion(ExclusionFlag::Included))
            .method(no_args("c").with_exclusion(ExclusionFlag::Excluded));
        let accepted = PolicyVariant::Legacy.eligible_methods(&node, &Config::default());
        assert_eq!(names(&accepted), vec!["b"]);
    }

    #[test]
    fn legacy_inclusion_ignores_modifiers() {
        let node = HierarchyNode::class("p.Impl")
            .method(no_args("s").with_static().with_web_method(WebMethodMeta::default()))
            .method(no_args("f").with_final().with_web_method(WebMethodMeta::default()))
            .method(no_args("plain"));
        let accepted = PolicyVariant::Legacy.eligible_methods(&node, &Config::default());
        assert_eq!(names(&accepted), vec!["s", "f"]);
    }

    #[test]
    fn legacy_default_branch_honours_restrict_static() {
        let node = HierarchyNode::class("p.Impl")
            .method(no_args("instance"))
            .method(no_args("helper").with_static())
            .method(no_args("hidden").with_exclusion(ExclusionFlag::Excluded))
            .method(no_args("sealed").with_final());

        let restricted = Config::default().with_restrict_static(true);
        let accepted = PolicyVariant::Legacy.eligible_methods(&node, &restricted);
        assert_eq!(names(&accepted), vec!["instance", "sealed"]);

        let relaxed = Config::default().with_restrict_static(false);
        let accepted = PolicyVariant::Legacy.eligible_methods(&node, &relaxed);
        assert_eq!(names(&accepted), vec!["instance", "helper", "sealed"]);
    }

    #[test]
    fn modern_rejects_static_and_final_even_when_annotated() {
        let node = HierarchyNode::class("p.Impl")
            .method(no_args("a").with_static())
            .method(no_args("b"))
            .method(no_args("c").with_exclusion(ExclusionFlag::Excluded))
            .method(no_args("d").with_final().with_exclusion(ExclusionFlag::Included))
            .method(no_args("e").with_static().with_exclusion(ExclusionFlag::Included));
        let accepted = PolicyVariant::Modern.eligible_methods(&node, &Config::default());
        assert_eq!(names(&accepted), vec!["b"]);
    }

    #[test]
    fn modern_has_no_inclusion_short_circuit() {
        let node = HierarchyNode::class("p.Impl")
            .method(no_args("annotated").with_exclusion(ExclusionFlag::Included))
            .method(no_args("plain"));
        let accepted = PolicyVariant::Modern.eligible_methods(&node, &Config::default());
        assert_eq!(names(&accepted), vec!["annotated", "plain"]);
    }

    #[test]
    fn initializers_never_eligible() {
        let node = HierarchyNode::class("p.Impl").method(no_args("<init>")).method(no_args("run"));
        for policy in [PolicyVariant::Legacy, PolicyVariant::Modern] {
            let accepted = policy.eligible_methods(&node, &Config::default());
            assert_eq!(names(&accepted), vec!["run"]);
        }
    }

    #[test]
    fn parses_variant_names() {
        assert_eq!("Legacy".parse::<PolicyVariant>(), Ok(PolicyVariant::Legacy));
        assert_eq!(" modern ".parse::<PolicyVariant>(), Ok(PolicyVariant::Modern));
        assert!("strict".parse::<PolicyVariant>().is_err());
    }
}
