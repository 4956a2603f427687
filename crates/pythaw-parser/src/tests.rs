use std::path::PathBuf;

use crate::model::Binding;
use crate::treesitter::PythonParser;
use crate::walk::{collect_calls_and_locals, CalleeShape};

fn parse(src: &str) -> crate::model::FileModel {
    let parser = PythonParser::new();
    parser.parse(&PathBuf::from("handler.py"), src.to_string())
}

#[test]
fn binds_top_level_function_and_class() {
    let model = parse(
        "def lambda_handler(event, context):\n    return 1\n\n\nclass S3Client:\n    def get(self):\n        pass\n",
    );
    assert!(model.is_ok());
    assert!(model.top_level_functions.contains_key("lambda_handler"));
    let class = model.top_level_classes.get("S3Client").expect("class bound");
    assert!(class.method("get").is_some());
}

#[test]
fn binds_imports_including_aliases_and_from_import() {
    let model = parse("import boto3\nimport infra.aws as aws\nfrom infra.db import get_connection\n");
    assert!(matches!(model.bindings.get("boto3"), Some(Binding::Import(_))));
    match model.bindings.get("aws") {
        Some(Binding::Import(b)) => assert_eq!(b.module, "infra.aws"),
        other => panic!("expected import binding, got {other:?}"),
    }
    match model.bindings.get("get_connection") {
        Some(Binding::Import(b)) => assert_eq!(b.symbol.as_deref(), Some("get_connection")),
        other => panic!("expected import binding, got {other:?}"),
    }
}

#[test]
fn wildcard_import_is_recorded_separately() {
    let model = parse("from infra.aws import *\n");
    assert!(model.bindings.is_empty());
    assert_eq!(model.wildcard_modules.len(), 1);
    assert_eq!(model.wildcard_modules[0].module, "infra.aws");
}

#[test]
fn syntax_error_produces_failed_status() {
    let model = parse("def broken(:\n    pass\n");
    assert!(!model.is_ok());
}

#[test]
fn collects_bare_and_qualified_calls_in_source_order() {
    let model = parse("def lambda_handler(event, context):\n    foo()\n    boto3.client(\"s3\")\n");
    let body = model
        .top_level_functions
        .get("lambda_handler")
        .expect("handler bound");
    let root = model.root_node().unwrap();
    let body_node = root
        .named_child(0)
        .unwrap()
        .child_by_field_name("body")
        .unwrap();
    let (calls, _locals) = collect_calls_and_locals(body_node, &model.path, model.source.as_bytes());
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].textual_name, "foo");
    assert!(matches!(calls[0].shape, CalleeShape::Bare { .. }));
    assert_eq!(calls[1].textual_name, "boto3.client");
    assert!(matches!(calls[1].shape, CalleeShape::Attribute { .. }));
    assert_eq!(calls[1].position.line, body.position.line + 1);
}

#[test]
fn chained_constructor_call_is_classified() {
    let model = parse("def lambda_handler(event, context):\n    S3Client().get()\n");
    let root = model.root_node().unwrap();
    let body_node = root
        .named_child(0)
        .unwrap()
        .child_by_field_name("body")
        .unwrap();
    let (calls, _locals) = collect_calls_and_locals(body_node, &model.path, model.source.as_bytes());
    assert_eq!(calls.len(), 2, "the constructor call and the chained method call are both visited");
    match &calls[0].shape {
        CalleeShape::ChainedCall { class_name, method } => {
            assert_eq!(class_name, "S3Client");
            assert_eq!(method, "get");
        }
        other => panic!("expected ChainedCall, got {other:?}"),
    }
    assert_eq!(calls[0].textual_name, "S3Client");
}

#[test]
fn local_instantiation_is_tracked() {
    let model = parse("def lambda_handler(event, context):\n    db = Database()\n    db.query()\n");
    let root = model.root_node().unwrap();
    let body_node = root
        .named_child(0)
        .unwrap()
        .child_by_field_name("body")
        .unwrap();
    let (_calls, locals) = collect_calls_and_locals(body_node, &model.path, model.source.as_bytes());
    assert_eq!(locals.get("db").map(String::as_str), Some("Database"));
}

#[test]
fn nested_function_definitions_are_not_descended_into() {
    let model = parse(
        "def lambda_handler(event, context):\n    def inner():\n        never_called()\n    return 1\n",
    );
    let root = model.root_node().unwrap();
    let body_node = root
        .named_child(0)
        .unwrap()
        .child_by_field_name("body")
        .unwrap();
    let (calls, _locals) = collect_calls_and_locals(body_node, &model.path, model.source.as_bytes());
    assert!(calls.is_empty());
}
