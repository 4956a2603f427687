//! Machine-readable output: the records pythaw already models, serialized
//! as-is rather than re-shaped for a particular tool.

use pythaw_rules::Rule;
use serde::Serialize;

use crate::{CheckReport, OutputFormatter};

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_check(&self, report: &CheckReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }

    fn format_rules(&self, rules: &[Rule]) -> String {
        let entries: Vec<RuleEntry> = rules.iter().map(RuleEntry::from).collect();
        serde_json::to_string_pretty(&entries).unwrap_or_default()
    }

    fn format_rule_explain(&self, rule: &Rule) -> String {
        serde_json::to_string_pretty(&RuleEntry::from(rule)).unwrap_or_default()
    }
}

#[derive(Serialize)]
struct RuleEntry {
    code: String,
    qualified_name: String,
    message: String,
    custom: bool,
}

impl From<&Rule> for RuleEntry {
    fn from(rule: &Rule) -> Self {
        RuleEntry {
            code: rule.code.clone(),
            qualified_name: rule.qualified_name.clone(),
            message: rule.message.clone(),
            custom: rule.source == pythaw_rules::RuleSource::Custom,
        }
    }
}
