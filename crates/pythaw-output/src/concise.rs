//! The concise text formatter:
//!
//! ```text
//! <file>:<line>:<col>: <code> <message>
//!   via <file>:<line>:<col> → <Name1>() → <Name2>() → ...
//! Found <n> violations in <m> files.
//! ```
//!
//! The `via` line is only emitted for an indirect violation (non-empty
//! `call_chain`). Its position is `call_chain[0]`'s — the hop inside the
//! handler body — and the arrow list is every chain entry's callee name
//! in order, handler-first.

use pythaw_core::types::{Diagnostic, Violation};
use pythaw_rules::Rule;

use crate::{CheckReport, OutputFormatter};

pub struct ConciseFormatter;

impl OutputFormatter for ConciseFormatter {
    fn format_check(&self, report: &CheckReport) -> String {
        let mut out = String::new();

        for v in &report.violations {
            out.push_str(&format_violation(v));
        }
        for d in &report.diagnostics {
            out.push_str(&format_diagnostic(d));
        }

        out.push_str(&format!(
            "Found {} violation{} in {} file{}.\n",
            report.violations.len(),
            plural(report.violations.len()),
            report.files_scanned,
            plural(report.files_scanned),
        ));

        out
    }

    fn format_rules(&self, rules: &[Rule]) -> String {
        let mut out = String::new();
        for rule in rules {
            out.push_str(&format!("{}  {}\n", rule.code, rule.qualified_name));
        }
        out
    }

    fn format_rule_explain(&self, rule: &Rule) -> String {
        format!("{} ({})\n  watches: {}\n  message: {}\n", rule.code, source_label(rule), rule.qualified_name, rule.message)
    }
}

fn source_label(rule: &Rule) -> &'static str {
    match rule.source {
        pythaw_rules::RuleSource::Builtin => "built-in",
        pythaw_rules::RuleSource::Custom => "custom",
    }
}

fn format_violation(v: &Violation) -> String {
    let mut line = format!(
        "{}:{}:{}: {} {}\n",
        v.position.file.display(),
        v.position.line,
        v.position.col,
        v.code,
        v.message,
    );

    if let Some(first) = v.call_chain.first() {
        let names: Vec<String> = v.call_chain.iter().map(|c| format!("{}()", c.name)).collect();
        line.push_str(&format!(
            "  via {}:{}:{} → {}\n",
            first.file.display(),
            first.line,
            first.col,
            names.join(" → "),
        ));
    }

    line
}

fn format_diagnostic(d: &Diagnostic) -> String {
    format!(
        "{}:{}:{}: warning: {}\n",
        d.file.display(),
        d.line,
        d.col,
        d.detail,
    )
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
