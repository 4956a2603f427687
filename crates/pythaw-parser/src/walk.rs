//! Walks a definition's body collecting call expressions and local
//! `name = ClassName(...)` instantiations, in source order. Plain
//! recursive-cursor traversal, no query engine: recurse through every
//! child, skip nested `function_definition` / `class_definition`
//! subtrees entirely, since those are separate definitions reached only
//! if something actually calls them.

use std::collections::HashMap;
use std::path::Path;

use tree_sitter::Node;

use pythaw_core::types::SourcePosition;

/// The shape of a call's callee expression, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalleeShape {
    /// `name(...)`
    Bare { name: String },
    /// `base.path[0].path[1]...(...)`. Covers both module-qualified calls
    /// (`boto3.client`) and instance-method calls (`obj.method`) — the
    /// caller disambiguates using the binding map and local instantiation
    /// table, since that's context this module doesn't have.
    Attribute { base: String, path: Vec<String> },
    /// `ClassName().method(...)` — a constructor chained straight into a
    /// method call in the same expression. The inner `ClassName()` is
    /// also collected as its own `Bare` call (recursion into a call
    /// node's children doesn't stop at the node itself), so resolving
    /// this shape only needs to account for the `.method` half.
    ChainedCall { class_name: String, method: String },
    /// A receiver this module can't classify (subscript, lambda result,
    /// nested call more than one level deep, etc).
    Other,
}

#[derive(Debug, Clone)]
pub struct RawCall {
    pub position: SourcePosition,
    /// The callee flattened to text for display / `CallSite::name`.
    pub textual_name: String,
    pub shape: CalleeShape,
}

/// Collects every call expression and every `x = ClassName(...)` local
/// instantiation directly within `body` (not inside a nested def/class),
/// in source order.
pub fn collect_calls_and_locals(
    body: Node,
    file: &Path,
    source: &[u8],
) -> (Vec<RawCall>, HashMap<String, String>) {
    let mut calls = Vec::new();
    let mut locals = HashMap::new();
    walk(body, file, source, &mut calls, &mut locals);
    calls.sort_by_key(|c| (c.position.line, c.position.col));
    (calls, locals)
}

fn walk(
    node: Node,
    file: &Path,
    source: &[u8],
    calls: &mut Vec<RawCall>,
    locals: &mut HashMap<String, String>,
) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "function_definition" | "class_definition" => continue,
            "assignment" => record_instantiation(child, source, locals),
            "call" => {
                if let Some(func) = child.child_by_field_name("function") {
                    let shape = classify_callee(func, source);
                    let textual_name = shape_text(&shape, func, source);
                    let pos = child.start_position();
                    calls.push(RawCall {
                        position: SourcePosition::new(file.to_path_buf(), pos.row as u32 + 1, pos.column as u32),
                        textual_name,
                        shape,
                    });
                }
            }
            _ => {}
        }
        walk(child, file, source, calls, locals);
    }
}

fn record_instantiation(assign: Node, source: &[u8], locals: &mut HashMap<String, String>) {
    let (Some(left), Some(right)) = (
        assign.child_by_field_name("left"),
        assign.child_by_field_name("right"),
    ) else {
        return;
    };
    if left.kind() != "identifier" || right.kind() != "call" {
        return;
    }
    let Some(func) = right.child_by_field_name("function") else {
        return;
    };
    if func.kind() == "identifier" {
        locals.insert(text(left, source), text(func, source));
    }
}

fn classify_callee(func: Node, source: &[u8]) -> CalleeShape {
    match func.kind() {
        "identifier" => CalleeShape::Bare { name: text(func, source) },
        "attribute" => {
            if let Some((base, path)) = flatten_attribute_expr(func, source) {
                return CalleeShape::Attribute { base, path };
            }
            let (Some(object), Some(attr)) = (
                func.child_by_field_name("object"),
                func.child_by_field_name("attribute"),
            ) else {
                return CalleeShape::Other;
            };
            if object.kind() == "call" {
                if let Some(inner_fn) = object.child_by_field_name("function") {
                    if inner_fn.kind() == "identifier" {
                        return CalleeShape::ChainedCall {
                            class_name: text(inner_fn, source),
                            method: text(attr, source),
                        };
                    }
                }
            }
            CalleeShape::Other
        }
        _ => CalleeShape::Other,
    }
}

/// Flattens a plain dotted expression (`a.b.c`) to its leftmost identifier
/// and the remaining segments. Returns `None` as soon as a non-identifier,
/// non-attribute node appears (e.g. a call partway through the chain).
fn flatten_attribute_expr(node: Node, source: &[u8]) -> Option<(String, Vec<String>)> {
    match node.kind() {
        "identifier" => Some((text(node, source), Vec::new())),
        "attribute" => {
            let object = node.child_by_field_name("object")?;
            let attr = node.child_by_field_name("attribute")?;
            let (base, mut path) = flatten_attribute_expr(object, source)?;
            path.push(text(attr, source));
            Some((base, path))
        }
        _ => None,
    }
}

fn shape_text(shape: &CalleeShape, func: Node, source: &[u8]) -> String {
    match shape {
        CalleeShape::Bare { name } => name.clone(),
        CalleeShape::Attribute { base, path } => {
            if path.is_empty() {
                base.clone()
            } else {
                format!("{base}.{}", path.join("."))
            }
        }
        CalleeShape::ChainedCall { class_name, .. } => class_name.clone(),
        CalleeShape::Other => text(func, source),
    }
}

fn text(node: Node, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or_default().to_string()
}
