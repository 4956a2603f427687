use std::path::{Path, PathBuf};

use serde::Serialize;

/// A location in a source file: 1-indexed line, 0-indexed column.
///
/// Immutable value — positions are copied into every record that needs
/// one rather than referenced, since the source tree they came from may
/// be dropped once a file has been fully visited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourcePosition {
    pub file: PathBuf,
    pub line: u32,
    pub col: u32,
}

impl SourcePosition {
    pub fn new(file: impl Into<PathBuf>, line: u32, col: u32) -> Self {
        SourcePosition {
            file: file.into(),
            line,
            col,
        }
    }
}

/// A single call expression encountered while walking a definition's body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CallSite {
    pub file: PathBuf,
    pub line: u32,
    pub col: u32,
    /// The callee as written at the call, e.g. "S3Client" or "boto3.client".
    pub name: String,
}

impl CallSite {
    pub fn position(&self) -> SourcePosition {
        SourcePosition::new(self.file.clone(), self.line, self.col)
    }
}

/// The path of call sites from a handler to a violation site.
/// An empty chain means the violation sits directly in the handler body.
pub type CallChain = Vec<CallSite>;

/// A rule match at a specific call site, annotated with the chain that
/// reaches it from its handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub code: String,
    pub message: String,
    pub position: SourcePosition,
    pub call_chain: CallChain,
}

/// The flavor of a non-fatal diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    ParseError,
    UnresolvedImport,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::ParseError => "parse_error",
            DiagnosticKind::UnresolvedImport => "unresolved_import",
        }
    }
}

/// A warning surfaced to the CLI layer: a file that failed to parse, or
/// an import that could not be mapped onto a project file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub file: PathBuf,
    pub line: u32,
    pub col: u32,
    pub detail: String,
}

impl Diagnostic {
    pub fn parse_error(file: impl Into<PathBuf>, line: u32, col: u32, detail: impl Into<String>) -> Self {
        Diagnostic {
            kind: DiagnosticKind::ParseError,
            file: file.into(),
            line,
            col,
            detail: detail.into(),
        }
    }

    pub fn unresolved_import(file: impl Into<PathBuf>, line: u32, module: impl Into<String>) -> Self {
        Diagnostic {
            kind: DiagnosticKind::UnresolvedImport,
            file: file.into(),
            line,
            col: 0,
            detail: format!("unresolved import: {}", module.into()),
        }
    }
}

/// Normalizes a path to be relative to `root` when possible, so output
/// stays stable across machines/checkouts. Falls back to the absolute
/// path if `path` does not live under `root`.
pub fn display_path(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).map(Path::to_path_buf).unwrap_or_else(|_| path.to_path_buf())
}
