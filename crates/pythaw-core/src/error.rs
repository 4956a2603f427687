use std::path::PathBuf;

/// Fatal conditions that keep the core from ever running and make the
/// CLI report exit code 2. Everything else — parse errors, unresolved imports,
/// unresolvable callees — is non-fatal and flows through the
/// [`crate::types::Diagnostic`]/[`crate::types::Violation`] sinks instead.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse {0}: {1}")]
    Parse(PathBuf, String),

    #[error("unknown rule code: {0}")]
    UnknownRule(String),
}
