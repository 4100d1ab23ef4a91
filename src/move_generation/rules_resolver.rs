//! Registry mapping piece type names to their ordered rule lists.
//!
//! The resolver is an explicit value threaded through every call that needs
//! rule lookup; there is no global registry. Type names are matched
//! case-insensitively. An unknown type resolves to an empty rule list, so
//! partially defined content produces no moves instead of failing.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::moves::move_rule::{MoveRule, RuleSet};

/// A type name with its ordered rule list.
#[derive(Debug, Clone)]
pub struct PieceDefinition {
    pub type_name: String,
    pub rules: RuleSet,
}

impl PieceDefinition {
    pub fn new(type_name: impl Into<String>, rules: RuleSet) -> Self {
        Self {
            type_name: type_name.into(),
            rules,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RulesResolver {
    definitions: HashMap<String, PieceDefinition>,
}

#[inline]
fn key(type_name: &str) -> String {
    type_name.to_ascii_lowercase()
}

impl RulesResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or overwrite a definition, returning the one it replaced.
    pub fn register_or_replace(&mut self, definition: PieceDefinition) -> Option<PieceDefinition> {
        debug!(
            "registering piece type {} with {} rule(s)",
            definition.type_name,
            definition.rules.len()
        );
        self.definitions.insert(key(&definition.type_name), definition)
    }

    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        rules: RuleSet,
    ) -> Option<PieceDefinition> {
        self.register_or_replace(PieceDefinition::new(type_name, rules))
    }

    /// Ordered rules for `type_name`; empty when the type is unknown.
    pub fn rules_for(&self, type_name: &str) -> &[Arc<dyn MoveRule>] {
        self.definitions
            .get(&key(type_name))
            .map(|definition| definition.rules.as_slice())
            .unwrap_or(&[])
    }

    pub fn definition(&self, type_name: &str) -> Option<&PieceDefinition> {
        self.definitions.get(&key(type_name))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.definitions.contains_key(&key(type_name))
    }

    /// Registered type names as they were spelled at registration, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .definitions
            .values()
            .map(|d| d.type_name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Register `new_type` with the rules of `first` followed by the rules of
    /// `second` that `first` does not already have. Returns the rule count.
    pub fn fuse(&mut self, first: &str, second: &str, new_type: impl Into<String>) -> usize {
        let mut rules: RuleSet = self.rules_for(first).to_vec();
        let mut seen: Vec<String> = rules.iter().map(|r| r.signature()).collect();
        for rule in self.rules_for(second) {
            let signature = rule.signature();
            if !seen.contains(&signature) {
                seen.push(signature);
                rules.push(Arc::clone(rule));
            }
        }
        let count = rules.len();
        self.register(new_type, rules);
        count
    }
}
