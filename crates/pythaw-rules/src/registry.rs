use std::collections::HashSet;

use pythaw_core::config::CustomRuleConfig;
use pythaw_core::error::ConfigError;

use crate::{builtins, Rule};

/// Built-in rules plus configuration-supplied custom rules, unified
/// behind one exact-dotted-name matcher. Disabling an unknown rule code
/// is a configuration error: the core is never entered and the CLI
/// reports exit code 2.
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    pub fn build(disabled: &[String], custom: &[CustomRuleConfig]) -> Result<Self, ConfigError> {
        let all_builtins = builtins::all();
        let known: HashSet<&str> = all_builtins.iter().map(|r| r.code.as_str()).collect();
        for code in disabled {
            if !known.contains(code.as_str()) {
                return Err(ConfigError::UnknownRule(code.clone()));
            }
        }

        let mut rules: Vec<Rule> = all_builtins
            .into_iter()
            .filter(|r| !disabled.iter().any(|d| d == &r.code))
            .collect();

        for (i, c) in custom.iter().enumerate() {
            rules.push(Rule::custom(format!("CUSTOM{}", i + 1), &c.pattern, &c.message));
        }

        Ok(RuleRegistry { rules })
    }

    pub fn all_rules(&self) -> &[Rule] {
        &self.rules
    }

    /// All rules whose watched qualified name exactly equals `qualified_name`.
    /// More than one rule may match; every match becomes its own Violation.
    pub fn matching(&self, qualified_name: &str) -> Vec<&Rule> {
        self.rules.iter().filter(|r| r.qualified_name == qualified_name).collect()
    }

    pub fn explain(&self, code: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.code == code)
    }
}
