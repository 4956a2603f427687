//! Configuration loading for pythaw.
//!
//! Reads the `[tool.pythaw]` table from a TOML file (`pyproject.toml` by
//! default) and provides typed access to handler patterns, exclude globs,
//! disabled rule codes, and custom rules. Falls back to defaults when the
//! table (or the file) is missing.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level `[tool.pythaw]` configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PythawConfig {
    pub handler_patterns: Vec<String>,
    pub exclude: Vec<String>,
    pub disabled_rules: Vec<String>,
    pub custom_rules: Vec<CustomRuleConfig>,
}

/// A single user-supplied rule: a dotted qualified-name pattern and the
/// message to emit when a call site's resolved callee matches it exactly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomRuleConfig {
    pub pattern: String,
    pub message: String,
}

impl Default for PythawConfig {
    fn default() -> Self {
        PythawConfig {
            handler_patterns: default_handler_patterns(),
            exclude: Vec::new(),
            disabled_rules: Vec::new(),
            custom_rules: Vec::new(),
        }
    }
}

pub fn default_handler_patterns() -> Vec<String> {
    vec![
        "handler".to_string(),
        "lambda_handler".to_string(),
        "*_handler".to_string(),
    ]
}

#[derive(Debug, Deserialize, Default)]
struct PyprojectFile {
    #[serde(default)]
    tool: ToolTable,
}

#[derive(Debug, Deserialize, Default)]
struct ToolTable {
    #[serde(default)]
    pythaw: Option<PythawConfig>,
}

impl PythawConfig {
    /// Load configuration from a TOML file's `[tool.pythaw]` table.
    ///
    /// A missing file yields defaults silently. A file that exists but
    /// fails to parse as TOML is a fatal [`ConfigError`] — the core is
    /// never entered in that case, and the CLI reports exit code 2.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Ok(Self::default()),
        };
        let parsed: PyprojectFile = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))?;
        Ok(parsed.tool.pythaw.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_when_file_missing() {
        let cfg = PythawConfig::load(Path::new("/nonexistent/pyproject.toml")).unwrap();
        assert_eq!(cfg.handler_patterns, default_handler_patterns());
        assert!(cfg.custom_rules.is_empty());
    }

    #[test]
    fn defaults_when_table_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        fs::write(&path, "[project]\nname = \"demo\"\n").unwrap();
        let cfg = PythawConfig::load(&path).unwrap();
        assert_eq!(cfg.handler_patterns, default_handler_patterns());
    }

    #[test]
    fn loads_full_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        fs::write(
            &path,
            r#"
[tool.pythaw]
handler_patterns = ["my_handler"]
exclude = ["tests/**"]
disabled_rules = ["PW010"]

[[tool.pythaw.custom_rules]]
pattern = "myorg.db.get_connection"
message = "do not call this inside a handler"
"#,
        )
        .unwrap();
        let cfg = PythawConfig::load(&path).unwrap();
        assert_eq!(cfg.handler_patterns, vec!["my_handler".to_string()]);
        assert_eq!(cfg.exclude, vec!["tests/**".to_string()]);
        assert_eq!(cfg.disabled_rules, vec!["PW010".to_string()]);
        assert_eq!(cfg.custom_rules.len(), 1);
        assert_eq!(cfg.custom_rules[0].pattern, "myorg.db.get_connection");
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        fs::write(&path, "[tool.pythaw\nhandler_patterns = [").unwrap();
        let err = PythawConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(..)));
    }
}
