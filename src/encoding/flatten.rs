//! Nested-object flattening
//!
//! A nested config object such as `{"authentication": {"type": "Basic"}}` renders
//! as flat properties. The per-type rule table is consulted by dotted path first;
//! unmapped children fall back to `<parent><CapitalizedChild>`.

use crate::templates::FlattenRule;

/// Resolves flat property names for nested configuration paths
#[derive(Debug, Clone, Copy, Default)]
pub struct Flattener<'a> {
    rules: &'a [FlattenRule],
}

impl<'a> Flattener<'a> {
    pub fn new(rules: &'a [FlattenRule]) -> Self {
        Self { rules }
    }

    /// Flat name for `child` nested under `parent_path` (dotted) whose own flat name is `parent_name`.
    pub fn resolve(&self, parent_path: &str, parent_name: &str, child: &str) -> String {
        let path = format!("{}.{}", parent_path, child);
        match self.rules.iter().find(|r| r.path == path) {
            Some(rule) => rule.property.to_string(),
            None => format!("{}{}", parent_name, capitalize(child)),
        }
    }
}

/// Upper-cases the first character, leaving the rest untouched
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::rule;

    const RULES: &[FlattenRule] = &[
        rule("authentication.type", "authenticationMethod"),
        rule("proxy.settings.host", "proxyHost"),
    ];

    #[test]
    fn mapped_path_uses_rule() {
        let f = Flattener::new(RULES);
        assert_eq!(
            f.resolve("authentication", "authentication", "type"),
            "authenticationMethod"
        );
    }

    #[test]
    fn unmapped_path_concatenates() {
        let f = Flattener::new(RULES);
        assert_eq!(
            f.resolve("authentication", "authentication", "credentialName"),
            "authenticationCredentialName"
        );
    }

    #[test]
    fn deep_paths_match_on_full_dotted_path() {
        let f = Flattener::new(RULES);
        assert_eq!(f.resolve("proxy.settings", "proxySettings", "host"), "proxyHost");
        assert_eq!(f.resolve("proxy.settings", "proxySettings", "port"), "proxySettingsPort");
    }

    #[test]
    fn capitalize_handles_edge_cases() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize("already"), "Already");
        assert_eq!(capitalize("Upper"), "Upper");
    }
}
