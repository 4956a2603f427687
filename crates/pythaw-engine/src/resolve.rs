//! Turns a raw call's callee shape into a [`CallResolution`]: the
//! QualifiedName to run through the rule registry, and the concrete
//! definition(s) (if any) to recurse into.
//!
//! Covers the three definition-resolution cases a call site can fall
//! into (top-level function/imported function, class constructor,
//! `obj.method()` via a tracked local instantiation) plus the
//! chained-constructor-call case (`ClassName().method()`). Rule
//! matching and definition resolution are
//! kept separate: a QualifiedName can exist without a resolvable target
//! (an external import) and a target can exist without a QualifiedName
//! (an instance-method call through a local variable, which by
//! definition isn't a module alias or locally-defined name).

use std::collections::HashMap;
use std::path::Path;

use pythaw_parser::model::{Binding, ClassDef, ImportBinding};
use pythaw_parser::{CalleeShape, FileModel, RawCall};

use crate::engine::Engine;
use crate::target::{CallResolution, Target};

impl Engine<'_> {
    pub(crate) fn resolve_call(
        &mut self,
        call: &RawCall,
        current: &FileModel,
        locals: &HashMap<String, String>,
    ) -> CallResolution {
        match &call.shape {
            CalleeShape::Bare { name } => self.resolve_bare(name, current),
            CalleeShape::Attribute { base, path } => self.resolve_attribute(base, path, current, locals),
            CalleeShape::ChainedCall { class_name, method } => self.resolve_chained(class_name, method, current),
            CalleeShape::Other => CallResolution::default(),
        }
    }

    fn resolve_bare(&mut self, name: &str, current: &FileModel) -> CallResolution {
        match current.bindings.get(name) {
            Some(Binding::Function(f)) => CallResolution {
                qualified_name: Some(name.to_string()),
                unresolved_import: None,
                targets: vec![Target::new(&f.file, name, f.body_start_byte, f.body_end_byte)],
            },
            Some(Binding::Class(c)) => CallResolution {
                qualified_name: Some(name.to_string()),
                unresolved_import: None,
                targets: class_init_target(c).into_iter().collect(),
            },
            Some(Binding::Import(imp)) => {
                let imp = imp.clone();
                self.resolve_imported_symbol(&current.path, name, &imp, &[])
            }
            None => self.resolve_via_wildcards(current, name),
        }
    }

    fn resolve_attribute(
        &mut self,
        base: &str,
        path: &[String],
        current: &FileModel,
        locals: &HashMap<String, String>,
    ) -> CallResolution {
        if let Some(class_name) = locals.get(base) {
            if path.len() == 1 {
                return self.resolve_instance_method(class_name, &path[0], current);
            }
            return CallResolution::default();
        }

        match current.bindings.get(base) {
            Some(Binding::Import(imp)) => {
                let imp = imp.clone();
                self.resolve_imported_symbol(&current.path, base, &imp, path)
            }
            Some(Binding::Class(_)) | Some(Binding::Function(_)) => CallResolution {
                qualified_name: Some(format!("{base}.{}", path.join("."))),
                unresolved_import: None,
                targets: Vec::new(),
            },
            None => CallResolution::default(),
        }
    }

    fn resolve_instance_method(&mut self, class_name: &str, method_name: &str, current: &FileModel) -> CallResolution {
        match current.bindings.get(class_name) {
            Some(Binding::Class(c)) => CallResolution {
                qualified_name: None,
                unresolved_import: None,
                targets: method_target(c, class_name, method_name).into_iter().collect(),
            },
            Some(Binding::Import(imp)) => {
                let imp = imp.clone();
                let Some(target_path) = self.resolve_import_binding(&current.path, &imp) else {
                    return CallResolution::default();
                };
                let Some(target_model) = self.load(&target_path) else {
                    return CallResolution::default();
                };
                let lookup_name = imp.symbol.as_deref().unwrap_or(class_name);
                match target_model.bindings.get(lookup_name) {
                    Some(Binding::Class(c)) => CallResolution {
                        qualified_name: None,
                        unresolved_import: None,
                        targets: method_target(c, class_name, method_name).into_iter().collect(),
                    },
                    _ => CallResolution::default(),
                }
            }
            _ => CallResolution::default(),
        }
    }

    fn resolve_chained(&mut self, class_name: &str, method: &str, current: &FileModel) -> CallResolution {
        let class_def: Option<ClassDef> = match current.bindings.get(class_name) {
            Some(Binding::Class(c)) => Some(c.clone()),
            Some(Binding::Import(imp)) => {
                let imp = imp.clone();
                let Some(target_path) = self.resolve_import_binding(&current.path, &imp) else {
                    return CallResolution {
                        qualified_name: Some(class_name.to_string()),
                        unresolved_import: Some((current.path.clone(), imp.module.clone())),
                        targets: Vec::new(),
                    };
                };
                let Some(target_model) = self.load(&target_path) else {
                    return CallResolution {
                        qualified_name: Some(class_name.to_string()),
                        unresolved_import: None,
                        targets: Vec::new(),
                    };
                };
                let lookup_name = imp.symbol.as_deref().unwrap_or(class_name);
                match target_model.bindings.get(lookup_name) {
                    Some(Binding::Class(c)) => Some(c.clone()),
                    _ => None,
                }
            }
            _ => None,
        };

        // `__init__` is not pushed here: the constructor call `ClassName()`
        // is itself walked as its own (separately positioned) call
        // expression — see walk.rs's unconditional recursion into call
        // nodes — and resolves through `resolve_bare` into the same
        // `__init__` target. Pushing it again here would visit it twice
        // and double-report any heavy init it contains.
        let mut targets = Vec::new();
        if let Some(c) = &class_def {
            if let Some(m) = c.method(method) {
                targets.push(Target::new(&m.file, format!("{class_name}.{method}"), m.body_start_byte, m.body_end_byte));
            }
        }

        CallResolution {
            qualified_name: Some(class_name.to_string()),
            unresolved_import: None,
            targets,
        }
    }

    fn resolve_via_wildcards(&mut self, current: &FileModel, name: &str) -> CallResolution {
        let wildcards = current.wildcard_modules.clone();
        for w in &wildcards {
            let Some(target_path) = self.resolve_import_binding(&current.path, w) else {
                continue;
            };
            let Some(target_model) = self.load(&target_path) else {
                continue;
            };
            let targets = lookup_definition(&target_model, name);
            if !targets.is_empty() {
                return CallResolution {
                    qualified_name: Some(format!("{}.{name}", w.module)),
                    unresolved_import: None,
                    targets,
                };
            }
        }
        CallResolution::default()
    }

    /// One-hop resolution of `from M import X` / `import M` followed by
    /// (optionally) further attribute segments: resolves `M` to a project
    /// file and looks up a single trailing name there. Deeper chains
    /// (`M.X.attr`) are not resolved to a target, only named for rule
    /// matching — see module doc comment.
    ///
    /// `from M import X` names a specific symbol, so its QualifiedName is
    /// built from the real `M.X` it denotes regardless of any local
    /// rename. A plain `import M` binds `M` itself (or an alias of the
    /// whole thing) — there is no separate symbol to resolve through, so
    /// its QualifiedName is the call as written (`base` plus whatever
    /// attribute path follows it). Building it from `imp.module` instead
    /// would double-count: for `import google.cloud.storage`, `base` is
    /// "google" and a call to `google.cloud.storage.Client()` already
    /// spells out "cloud.storage" in `path_after`, which is also the tail
    /// of `imp.module` — concatenating both repeats it.
    fn resolve_imported_symbol(
        &mut self,
        importer: &Path,
        base: &str,
        imp: &ImportBinding,
        path_after: &[String],
    ) -> CallResolution {
        let qualified_name = match &imp.symbol {
            Some(s) => {
                let target_dotted = format!("{}.{s}", imp.module);
                if path_after.is_empty() {
                    target_dotted
                } else {
                    format!("{target_dotted}.{}", path_after.join("."))
                }
            }
            None => {
                if path_after.is_empty() {
                    base.to_string()
                } else {
                    format!("{base}.{}", path_after.join("."))
                }
            }
        };

        let Some(target_path) = self.resolve_import_binding(importer, imp) else {
            return CallResolution {
                qualified_name: Some(qualified_name),
                unresolved_import: Some((importer.to_path_buf(), imp.module.clone())),
                targets: Vec::new(),
            };
        };

        let Some(target_model) = self.load(&target_path) else {
            return CallResolution {
                qualified_name: Some(qualified_name),
                unresolved_import: None,
                targets: Vec::new(),
            };
        };

        let targets = match path_after.len() {
            0 => match &imp.symbol {
                Some(s) => lookup_definition(&target_model, s),
                None => Vec::new(),
            },
            1 => lookup_definition(&target_model, &path_after[0]),
            _ => Vec::new(),
        };

        CallResolution {
            qualified_name: Some(qualified_name),
            unresolved_import: None,
            targets,
        }
    }

    pub(crate) fn resolve_import_binding(&self, importer: &Path, imp: &ImportBinding) -> Option<std::path::PathBuf> {
        pythaw_parser::imports::resolve_import(&self.root, importer, imp)
    }
}

fn class_init_target(c: &ClassDef) -> Option<Target> {
    c.method("__init__")
        .map(|f| Target::new(&f.file, format!("{}.__init__", c.name), f.body_start_byte, f.body_end_byte))
}

fn method_target(c: &ClassDef, class_name: &str, method_name: &str) -> Option<Target> {
    c.method(method_name)
        .map(|m| Target::new(&m.file, format!("{class_name}.{method_name}"), m.body_start_byte, m.body_end_byte))
}

fn lookup_definition(model: &FileModel, name: &str) -> Vec<Target> {
    match model.bindings.get(name) {
        Some(Binding::Function(f)) => vec![Target::new(&f.file, name, f.body_start_byte, f.body_end_byte)],
        Some(Binding::Class(c)) => class_init_target(c).into_iter().collect(),
        _ => Vec::new(),
    }
}
