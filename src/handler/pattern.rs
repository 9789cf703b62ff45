use std::collections::HashMap;
use std::fmt;

use super::{PatternError, QName};

/// A service-name or port-name pattern from a handler-chain descriptor.
///
/// Either the bare wildcard `*`, or `[prefix:]local` where the local part may
/// contain `*` globs. Without a prefix the pattern matches any namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QNamePattern {
    Any,
    Name { namespace: Option<String>, local: String },
}

impl QNamePattern {
    /// Parse `text`, resolving a prefix through `namespaces` (prefix -> URI)
    pub fn parse(text: &str, namespaces: &HashMap<String, String>) -> Result<Self, PatternError> {
        let pattern = text.trim();
        if pattern.is_empty() {
            return Err(malformed(text, "empty pattern"));
        }
        if pattern == "*" {
            return Ok(QNamePattern::Any);
        }
        let (namespace, local) = match pattern.split_once(':') {
            Some((prefix, local)) => {
                if !is_ncname(prefix) {
                    return Err(malformed(text, format!("invalid prefix '{}'", prefix)));
                }
                let uri = namespaces
                    .get(prefix)
                    .ok_or_else(|| malformed(text, format!("prefix '{}' is not bound to a namespace", prefix)))?;
                (Some(uri.clone()), local)
            }
            None => (None, pattern),
        };
        if local.is_empty() {
            return Err(malformed(text, "empty local part"));
        }
        if !is_local_pattern(local) {
            return Err(malformed(text, format!("invalid local part '{}'", local)));
        }
        Ok(QNamePattern::Name { namespace, local: local.to_string() })
    }

    pub fn matches(&self, name: &QName) -> bool {
        match self {
            QNamePattern::Any => true,
            QNamePattern::Name { namespace, local } => {
                if let Some(ns) = namespace {
                    if ns != &name.namespace {
                        return false;
                    }
                }
                glob_match(local, &name.local)
            }
        }
    }
}

impl fmt::Display for QNamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QNamePattern::Any => write!(f, "*"),
            QNamePattern::Name { namespace: Some(ns), local } => write!(f, "{{{}}}{}", ns, local),
            QNamePattern::Name { namespace: None, local } => write!(f, "{}", local),
        }
    }
}

fn malformed(pattern: &str, reason: impl Into<String>) -> PatternError {
    PatternError::Malformed { pattern: pattern.to_string(), reason: reason.into() }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}

fn is_ncname(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if is_name_start(first) => chars.all(is_name_char),
        _ => false,
    }
}

fn is_local_pattern(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if is_name_start(first) || first == '*' => chars.all(|c| c == '*' || is_name_char(c)),
        _ => false,
    }
}

/// `*` matches any run of characters, everything else matches itself
pub(crate) fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == text;
    }
    let first = parts[0];
    let last = parts[parts.len() - 1];
    if !text.starts_with(first) {
        return false;
    }
    let mut rest = &text[first.len()..];
    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        match rest.find(part) {
            Some(idx) => rest = &rest[idx + part.len()..],
            None => return false,
        }
    }
    rest.len() >= last.len() && rest.ends_with(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("ms".to_string(), "http://mysample".to_string());
        map.insert("other".to_string(), "http://other".to_string());
        map
    }

    fn matches(pattern: &str) -> bool {
        let name = QName::new("http://mysample", "MyName");
        QNamePattern::parse(pattern, &bindings()).unwrap().matches(&name)
    }

    #[test]
    fn pattern_match_table() {
        assert!(matches("ms:MyName"));
        assert!(matches("ms:My*"));
        assert!(matches("ms:*Name"));
        assert!(matches("ms:M*e"));
        assert!(matches("ms:*"));
        assert!(matches("*"));
        assert!(matches("*Name"));
        assert!(matches("M*e"));
        assert!(matches("MyName"));
        assert!(!matches("other:*"));
        assert!(!matches("ms:Your*"));
        assert!(!matches("ms:MyName2"));
    }

    #[test]
    fn glob_handles_overlapping_parts() {
        assert!(glob_match("a*a", "aa"));
        assert!(!glob_match("a*a", "a"));
        assert!(glob_match("*b*", "abc"));
        assert!(glob_match("a**c", "abc"));
        assert!(!glob_match("a*c*d", "abcd_c"));
    }

    #[test]
    fn malformed_patterns_are_rejected() {
        for bad in ["", "  ", "ms:", ":Local", "nope:Local", "ms:1Local", "ms:a:b", "a b", "ms:Na me"] {
            let err = QNamePattern::parse(bad, &bindings()).unwrap_err();
            assert!(matches!(err, PatternError::Malformed { .. }), "{:?}", bad);
        }
    }

    #[test]
    fn display_uses_clark_notation() {
        let p = QNamePattern::parse("ms:Port*", &bindings()).unwrap();
        assert_eq!(p.to_string(), "{http://mysample}Port*");
        assert_eq!(QNamePattern::Any.to_string(), "*");
    }
}
