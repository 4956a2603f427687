//! The parser adapter: wraps `tree_sitter::Parser` configured for Python
//! and turns a source file into a [`FileModel`]. One `Parser` instance
//! is reused across files, with the language set once at construction.

use std::cell::RefCell;
use std::path::Path;

use pythaw_core::types::SourcePosition;

use crate::bindings::build_bindings;
use crate::model::{FileModel, ParseStatus};

pub struct PythonParser {
    parser: RefCell<tree_sitter::Parser>,
}

impl PythonParser {
    pub fn new() -> Self {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .expect("the bundled python grammar should always load");
        PythonParser {
            parser: RefCell::new(parser),
        }
    }

    /// Parses `source` as `path`. A syntax error tree-sitter can't
    /// recover from (or an outright parser failure) produces a
    /// [`FileModel`] whose `status` is `Failed` and whose binding/def
    /// maps are empty; it still takes up its slot in the cache, so a
    /// broken file is surfaced once as a diagnostic and then left alone.
    pub fn parse(&self, path: &Path, source: String) -> FileModel {
        let tree = self.parser.borrow_mut().parse(source.as_bytes(), None);

        let Some(tree) = tree else {
            return FileModel::failed(
                path,
                source,
                "the parser produced no syntax tree",
                SourcePosition::new(path.to_path_buf(), 1, 0),
            );
        };

        if tree.root_node().has_error() {
            let pos = first_error_position(tree.root_node());
            return FileModel::failed(
                path,
                source,
                "syntax error",
                SourcePosition::new(path.to_path_buf(), pos.row as u32 + 1, pos.column as u32),
            );
        }

        let fb = build_bindings(tree.root_node(), path, source.as_bytes());
        FileModel {
            path: path.to_path_buf(),
            status: ParseStatus::Ok,
            source,
            tree: Some(tree),
            top_level_functions: fb.top_level_functions,
            top_level_classes: fb.top_level_classes,
            bindings: fb.bindings,
            wildcard_modules: fb.wildcard_modules,
        }
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

fn first_error_position(node: tree_sitter::Node) -> tree_sitter::Point {
    if node.is_error() || node.is_missing() {
        return node.start_position();
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            return first_error_position(child);
        }
    }
    node.start_position()
}
