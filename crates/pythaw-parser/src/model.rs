//! The value types produced by parsing a single Python source file:
//! definitions, import bindings, and the overall per-file model the rest
//! of the crate and `pythaw-engine` build on.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use pythaw_core::types::SourcePosition;

/// A `def` at module or class scope.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: String,
    pub file: PathBuf,
    pub position: SourcePosition,
    pub body_start_byte: usize,
    pub body_end_byte: usize,
}

/// A `class` at module scope, with its methods indexed by name.
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub name: String,
    pub file: PathBuf,
    pub position: SourcePosition,
    pub methods: HashMap<String, FunctionDef>,
}

impl ClassDef {
    pub fn method(&self, name: &str) -> Option<&FunctionDef> {
        self.methods.get(name)
    }
}

/// One `import` / `from ... import ...` name binding.
#[derive(Debug, Clone)]
pub struct ImportBinding {
    /// The module as written: `"boto3"`, `"infra.aws"`, `".aws"`, `"..pkg.aws"`.
    pub module: String,
    /// `Some(name)` for `from module import name`; `None` for `import module`.
    pub symbol: Option<String>,
    pub is_relative: bool,
    pub line: u32,
}

/// What a bare top-level name refers to within its defining file.
#[derive(Debug, Clone)]
pub enum Binding {
    Function(FunctionDef),
    Class(ClassDef),
    Import(ImportBinding),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseStatus {
    Ok,
    Failed { message: String, position: SourcePosition },
}

/// Everything pythaw knows about one source file after parsing it once.
pub struct FileModel {
    pub path: PathBuf,
    pub status: ParseStatus,
    pub source: String,
    pub tree: Option<tree_sitter::Tree>,
    pub top_level_functions: HashMap<String, FunctionDef>,
    pub top_level_classes: HashMap<String, ClassDef>,
    /// Leftmost-name -> binding, covering functions, classes and imports
    /// declared at module scope, following the leftmost-segment resolution
    /// rule: a bare name is either a module alias or a locally-defined name.
    pub bindings: HashMap<String, Binding>,
    /// Targets of `from M import *` in this file, tried in declaration
    /// order when a name isn't found anywhere else.
    pub wildcard_modules: Vec<ImportBinding>,
}

impl FileModel {
    pub fn failed(path: &Path, source: String, message: impl Into<String>, position: SourcePosition) -> Self {
        FileModel {
            path: path.to_path_buf(),
            status: ParseStatus::Failed { message: message.into(), position },
            source,
            tree: None,
            top_level_functions: HashMap::new(),
            top_level_classes: HashMap::new(),
            bindings: HashMap::new(),
            wildcard_modules: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.status, ParseStatus::Ok)
    }

    pub fn root_node(&self) -> Option<tree_sitter::Node<'_>> {
        self.tree.as_ref().map(|t| t.root_node())
    }
}
