use pythaw_output::OutputFormatter;
use pythaw_rules::RuleRegistry;

/// Runs `pythaw rules [--explain <code>]` — lists or explains the rules
/// a `check` run can match, independent of any scan.
pub fn run(formatter: &dyn OutputFormatter, explain: Option<String>) -> i32 {
    let registry = match RuleRegistry::build(&[], &[]) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("pythaw rules: {}", e);
            return 2;
        }
    };

    match explain {
        Some(code) => match registry.explain(&code) {
            Some(rule) => {
                print!("{}", formatter.format_rule_explain(rule));
                0
            }
            None => {
                eprintln!("pythaw rules: unknown rule code: {}", code);
                2
            }
        },
        None => {
            print!("{}", formatter.format_rules(registry.all_rules()));
            0
        }
    }
}
