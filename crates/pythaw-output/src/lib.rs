//! Output formatters for pythaw's `check` and `rules` commands.
//!
//! Two modes:
//! - **concise** (default) — human-readable text, direct hits on one
//!   line, indirect hits with a `via` chain.
//! - **JSON** (`--json`) — the [`CheckReport`]/[`Violation`]/[`Diagnostic`]
//!   records serialized as-is, for tooling that wants structured output.

pub mod concise;
pub mod json;

use pythaw_core::types::{Diagnostic, Violation};
use pythaw_rules::Rule;
use serde::Serialize;

/// What a `check` run produced, plus the bookkeeping the footer line
/// needs ("Found `<n>` violations in `<m>` files.").
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub violations: Vec<Violation>,
    pub diagnostics: Vec<Diagnostic>,
    pub files_scanned: usize,
}

pub trait OutputFormatter {
    fn format_check(&self, report: &CheckReport) -> String;
    fn format_rules(&self, rules: &[Rule]) -> String;
    fn format_rule_explain(&self, rule: &Rule) -> String;
}
