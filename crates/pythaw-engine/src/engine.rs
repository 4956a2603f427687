//! The reachability engine: the `visit_definition` algorithm that walks
//! handler-reachable code, owning the one process-wide mutable resource
//! (the [`FileCache`]) plus the violation/diagnostic sinks and the
//! per-handler `VisitKey` set.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use pythaw_core::types::{CallChain, CallSite, Diagnostic, Violation};
use pythaw_parser::model::ParseStatus;
use pythaw_parser::{FileCache, FileModel};
use pythaw_rules::RuleRegistry;

use crate::handler::Handler;

pub struct Engine<'r> {
    pub(crate) root: PathBuf,
    pub(crate) cache: FileCache,
    rules: &'r RuleRegistry,
    violations: Vec<Violation>,
    diagnostics: Vec<Diagnostic>,
    emitted_parse_errors: HashSet<PathBuf>,
    emitted_unresolved_imports: HashSet<(PathBuf, String)>,
    visited: HashSet<(PathBuf, String)>,
}

/// What a single `check` run produced.
pub struct RunOutput {
    pub violations: Vec<Violation>,
    pub diagnostics: Vec<Diagnostic>,
    pub files_scanned: usize,
}

impl<'r> Engine<'r> {
    pub fn new(root: PathBuf, rules: &'r RuleRegistry) -> Self {
        Engine {
            root,
            cache: FileCache::new(),
            rules,
            violations: Vec::new(),
            diagnostics: Vec::new(),
            emitted_parse_errors: HashSet::new(),
            emitted_unresolved_imports: HashSet::new(),
            visited: HashSet::new(),
        }
    }

    pub fn run(mut self, targets: &[PathBuf], handler_patterns: &[String], exclude: &[String]) -> RunOutput {
        let handlers = self.find_handlers(targets, handler_patterns, exclude);
        for handler in handlers {
            self.visited.clear();
            self.visit_definition(&handler.file, &handler.name, handler.body_start, handler.body_end, Vec::new());
        }
        RunOutput {
            violations: self.violations,
            diagnostics: self.diagnostics,
            files_scanned: self.cache.len(),
        }
    }

    /// Fetches `path` through the shared cache, recording a `parse_error`
    /// diagnostic the first time a given path turns out to have failed.
    pub(crate) fn load(&mut self, path: &Path) -> Option<std::rc::Rc<FileModel>> {
        let model = self.cache.get_or_parse(path);
        if model.is_ok() {
            return Some(model);
        }
        if let ParseStatus::Failed { message, position } = &model.status {
            if self.emitted_parse_errors.insert(path.to_path_buf()) {
                self.diagnostics
                    .push(Diagnostic::parse_error(path, position.line, position.col, message.clone()));
            }
        }
        None
    }

    /// `self.visited` tracks definitions currently on the DFS path, not
    /// every definition visited so far in this handler's traversal: a
    /// revisit while the def is still on-stack is a true cycle (pruned);
    /// a revisit via a different, non-overlapping path is a distinct
    /// chain and must be walked again: a function reached by two
    /// disjoint paths from the handler yields two violations with
    /// distinct chains, which a single global memo across the whole run
    /// would collapse into one. The key is removed again once this
    /// definition's subtree has been fully walked.
    fn visit_definition(&mut self, file: &Path, key_name: &str, body_start: usize, body_end: usize, chain: CallChain) {
        let key = (file.to_path_buf(), key_name.to_string());
        if !self.visited.insert(key.clone()) {
            return;
        }
        self.walk_definition_body(file, body_start, body_end, chain);
        self.visited.remove(&key);
    }

    fn walk_definition_body(&mut self, file: &Path, body_start: usize, body_end: usize, chain: CallChain) {
        let Some(model) = self.load(file) else { return };
        let Some(root_node) = model.root_node() else { return };
        let Some(body_node) = root_node.descendant_for_byte_range(body_start, body_end) else {
            return;
        };

        let (calls, locals) = pythaw_parser::walk::collect_calls_and_locals(body_node, file, model.source.as_bytes());

        for call in &calls {
            let resolution = self.resolve_call(call, &model, &locals);

            let mut matched = false;
            if let Some(qualified_name) = &resolution.qualified_name {
                for rule in self.rules.matching(qualified_name) {
                    self.violations.push(Violation {
                        code: rule.code.clone(),
                        message: rule.message.clone(),
                        position: call.position.clone(),
                        call_chain: chain.clone(),
                    });
                    matched = true;
                }
            }

            if let Some((importer, module)) = &resolution.unresolved_import {
                if !matched && self.emitted_unresolved_imports.insert((importer.clone(), module.clone())) {
                    self.diagnostics
                        .push(Diagnostic::unresolved_import(importer, call.position.line, module.clone()));
                }
            }

            for target in resolution.targets {
                let mut next_chain = chain.clone();
                next_chain.push(CallSite {
                    file: file.to_path_buf(),
                    line: call.position.line,
                    col: call.position.col,
                    name: call.textual_name.clone(),
                });
                self.visit_definition(&target.file, &target.key, target.body_start, target.body_end, next_chain);
            }
        }
    }
}
