//! Builds the per-file binding map: every name declared at module scope
//! (function, class, or import) resolved to what it means within this
//! file. Direct `tree_sitter::Node` traversal rather than a query-based
//! extraction, since module scope here only needs a single flat pass
//! over one file's top level, not a cross-file reference index.

use std::collections::HashMap;
use std::path::Path;

use tree_sitter::Node;

use pythaw_core::types::SourcePosition;

use crate::model::{Binding, ClassDef, FunctionDef, ImportBinding};

pub struct FileBindings {
    pub top_level_functions: HashMap<String, FunctionDef>,
    pub top_level_classes: HashMap<String, ClassDef>,
    pub bindings: HashMap<String, Binding>,
    pub wildcard_modules: Vec<ImportBinding>,
}

pub fn build_bindings(root: Node, file: &Path, source: &[u8]) -> FileBindings {
    let mut top_level_functions = HashMap::new();
    let mut top_level_classes = HashMap::new();
    let mut bindings = HashMap::new();
    let mut wildcard_modules = Vec::new();

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        let def_node = match child.kind() {
            "decorated_definition" => last_named_def(child),
            "function_definition" | "class_definition" => Some(child),
            _ => None,
        };

        if let Some(def_node) = def_node {
            match def_node.kind() {
                "function_definition" => {
                    if let Some(def) = extract_function_def(def_node, file, source) {
                        bindings.insert(def.name.clone(), Binding::Function(def.clone()));
                        top_level_functions.insert(def.name.clone(), def);
                    }
                }
                "class_definition" => {
                    if let Some(def) = extract_class_def(def_node, file, source) {
                        bindings.insert(def.name.clone(), Binding::Class(def.clone()));
                        top_level_classes.insert(def.name.clone(), def);
                    }
                }
                _ => {}
            }
            continue;
        }

        match child.kind() {
            "import_statement" => extract_import_statement(child, source, &mut bindings),
            "import_from_statement" => {
                extract_import_from_statement(child, source, &mut bindings, &mut wildcard_modules)
            }
            _ => {}
        }
    }

    FileBindings {
        top_level_functions,
        top_level_classes,
        bindings,
        wildcard_modules,
    }
}

fn last_named_def(decorated: Node) -> Option<Node> {
    let mut cursor = decorated.walk();
    decorated
        .children(&mut cursor)
        .filter(|c| c.kind() == "function_definition" || c.kind() == "class_definition")
        .last()
}

pub fn extract_function_def(node: Node, file: &Path, source: &[u8]) -> Option<FunctionDef> {
    let name_node = node.child_by_field_name("name")?;
    let body_node = node.child_by_field_name("body")?;
    let pos = node.start_position();
    Some(FunctionDef {
        name: text(name_node, source),
        file: file.to_path_buf(),
        position: SourcePosition::new(file.to_path_buf(), pos.row as u32 + 1, pos.column as u32),
        body_start_byte: body_node.start_byte(),
        body_end_byte: body_node.end_byte(),
    })
}

fn extract_class_def(node: Node, file: &Path, source: &[u8]) -> Option<ClassDef> {
    let name_node = node.child_by_field_name("name")?;
    let body_node = node.child_by_field_name("body")?;
    let pos = node.start_position();

    let mut methods = HashMap::new();
    let mut cursor = body_node.walk();
    for child in body_node.children(&mut cursor) {
        let def_node = match child.kind() {
            "decorated_definition" => last_named_def(child),
            "function_definition" => Some(child),
            _ => None,
        };
        if let Some(def_node) = def_node {
            if def_node.kind() == "function_definition" {
                if let Some(def) = extract_function_def(def_node, file, source) {
                    methods.insert(def.name.clone(), def);
                }
            }
        }
    }

    Some(ClassDef {
        name: text(name_node, source),
        file: file.to_path_buf(),
        position: SourcePosition::new(file.to_path_buf(), pos.row as u32 + 1, pos.column as u32),
        methods,
    })
}

fn extract_import_statement(node: Node, source: &[u8], bindings: &mut HashMap<String, Binding>) {
    let line = node.start_position().row as u32 + 1;
    let mut cursor = node.walk();
    for name_node in node.children_by_field_name("name", &mut cursor) {
        match name_node.kind() {
            "dotted_name" => {
                let module = text(name_node, source);
                let bound_name = module.split('.').next().unwrap_or(&module).to_string();
                bindings.insert(
                    bound_name,
                    Binding::Import(ImportBinding {
                        module,
                        symbol: None,
                        is_relative: false,
                        line,
                    }),
                );
            }
            "aliased_import" => {
                if let (Some(name_n), Some(alias_n)) = (
                    name_node.child_by_field_name("name"),
                    name_node.child_by_field_name("alias"),
                ) {
                    bindings.insert(
                        text(alias_n, source),
                        Binding::Import(ImportBinding {
                            module: text(name_n, source),
                            symbol: None,
                            is_relative: false,
                            line,
                        }),
                    );
                }
            }
            _ => {}
        }
    }
}

fn extract_import_from_statement(
    node: Node,
    source: &[u8],
    bindings: &mut HashMap<String, Binding>,
    wildcard_modules: &mut Vec<ImportBinding>,
) {
    let Some(module_node) = node.child_by_field_name("module_name") else {
        return;
    };
    let line = node.start_position().row as u32 + 1;
    let is_relative = module_node.kind() == "relative_import";
    let module = text(module_node, source);

    let mut wildcard_cursor = node.walk();
    let has_wildcard = node
        .children(&mut wildcard_cursor)
        .any(|c| c.kind() == "wildcard_import");
    if has_wildcard {
        wildcard_modules.push(ImportBinding {
            module,
            symbol: None,
            is_relative,
            line,
        });
        return;
    }

    let mut cursor = node.walk();
    for name_node in node.children_by_field_name("name", &mut cursor) {
        match name_node.kind() {
            "dotted_name" => {
                let symbol = text(name_node, source);
                bindings.insert(
                    symbol.clone(),
                    Binding::Import(ImportBinding {
                        module: module.clone(),
                        symbol: Some(symbol),
                        is_relative,
                        line,
                    }),
                );
            }
            "aliased_import" => {
                if let (Some(name_n), Some(alias_n)) = (
                    name_node.child_by_field_name("name"),
                    name_node.child_by_field_name("alias"),
                ) {
                    bindings.insert(
                        text(alias_n, source),
                        Binding::Import(ImportBinding {
                            module: module.clone(),
                            symbol: Some(text(name_n, source)),
                            is_relative,
                            line,
                        }),
                    );
                }
            }
            _ => {}
        }
    }
}

fn text(node: Node, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or_default().to_string()
}
