use std::path::PathBuf;

use pythaw_core::config::PythawConfig;
use pythaw_engine::Engine;
use pythaw_output::{CheckReport, OutputFormatter};
use pythaw_rules::RuleRegistry;

/// Runs `pythaw check`. Returns the process exit code:
/// 0 clean, 1 violations/parse-errors found, 2 configuration error.
#[allow(clippy::too_many_arguments)]
pub fn run(
    formatter: &dyn OutputFormatter,
    paths: Vec<PathBuf>,
    config: Option<PathBuf>,
    root: Option<PathBuf>,
    handler_pattern: Vec<String>,
    exclude: Vec<String>,
    disable: Vec<String>,
) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("pythaw check: failed to get current directory: {}", e);
            return 2;
        }
    };

    let root = root.unwrap_or_else(|| cwd.clone());
    let config_path = config.unwrap_or_else(|| root.join("pyproject.toml"));

    let pythaw_config = match PythawConfig::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("pythaw check: {}", e);
            return 2;
        }
    };

    let handler_patterns = if handler_pattern.is_empty() {
        pythaw_config.handler_patterns.clone()
    } else {
        handler_pattern
    };
    let exclude_globs = if exclude.is_empty() {
        pythaw_config.exclude.clone()
    } else {
        exclude
    };

    let mut disabled_rules = pythaw_config.disabled_rules.clone();
    for code in disable {
        if !disabled_rules.contains(&code) {
            disabled_rules.push(code);
        }
    }

    let registry = match RuleRegistry::build(&disabled_rules, &pythaw_config.custom_rules) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("pythaw check: {}", e);
            return 2;
        }
    };

    let targets: Vec<PathBuf> = if paths.is_empty() {
        vec![root.clone()]
    } else {
        paths.into_iter().map(|p| if p.is_absolute() { p } else { cwd.join(p) }).collect()
    };

    let engine = Engine::new(root, &registry);
    let out = engine.run(&targets, &handler_patterns, &exclude_globs);

    let exit_code = if out.violations.is_empty()
        && !out
            .diagnostics
            .iter()
            .any(|d| d.kind == pythaw_core::types::DiagnosticKind::ParseError)
    {
        0
    } else {
        1
    };

    let report = CheckReport {
        violations: out.violations,
        diagnostics: out.diagnostics,
        files_scanned: out.files_scanned,
    };
    let output = formatter.format_check(&report);
    if !output.is_empty() {
        print!("{}", output);
    }

    exit_code
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pythaw_output::concise::ConciseFormatter;

    use super::*;

    fn write(root: &std::path::Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn exit_code_one_on_violation() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "h.py",
            "import boto3\ndef lambda_handler(e, x):\n    return boto3.client(\"s3\")\n",
        );
        let code = run(
            &ConciseFormatter,
            vec![],
            None,
            Some(dir.path().to_path_buf()),
            vec![],
            vec![],
            vec![],
        );
        assert_eq!(code, 1);
    }

    #[test]
    fn exit_code_zero_on_clean_tree() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "h.py", "def lambda_handler(e, x):\n    return 1\n");
        let code = run(
            &ConciseFormatter,
            vec![],
            None,
            Some(dir.path().to_path_buf()),
            vec![],
            vec![],
            vec![],
        );
        assert_eq!(code, 0);
    }

    #[test]
    fn exit_code_two_on_unknown_disabled_rule() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "h.py", "def lambda_handler(e, x):\n    return 1\n");
        let code = run(
            &ConciseFormatter,
            vec![],
            None,
            Some(dir.path().to_path_buf()),
            vec![],
            vec![],
            vec!["PW999".to_string()],
        );
        assert_eq!(code, 2);
    }

    #[test]
    fn exit_code_two_on_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "h.py", "def lambda_handler(e, x):\n    return 1\n");
        write(dir.path(), "pyproject.toml", "[tool.pythaw\nhandler_patterns = [");
        let code = run(
            &ConciseFormatter,
            vec![],
            None,
            Some(dir.path().to_path_buf()),
            vec![],
            vec![],
            vec![],
        );
        assert_eq!(code, 2);
    }
}
