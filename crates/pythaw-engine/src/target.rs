use std::path::{Path, PathBuf};

/// A concrete function/method body the engine can recurse into, plus the
/// `qualified_name` that identifies it for `VisitKey` purposes.
#[derive(Debug, Clone)]
pub struct Target {
    pub file: PathBuf,
    pub key: String,
    pub body_start: usize,
    pub body_end: usize,
}

impl Target {
    pub fn new(file: &Path, key: impl Into<String>, body_start: usize, body_end: usize) -> Self {
        Target {
            file: file.to_path_buf(),
            key: key.into(),
            body_start,
            body_end,
        }
    }
}

/// What resolving one call expression's callee produced: the
/// QualifiedName to run through the rule registry (if the callee's
/// leftmost segment is a module alias or a locally-defined name), an
/// unresolved-import reference to warn about, and zero or more
/// definitions to recurse into.
#[derive(Debug, Clone, Default)]
pub struct CallResolution {
    pub qualified_name: Option<String>,
    pub unresolved_import: Option<(PathBuf, String)>,
    pub targets: Vec<Target>,
}
