//! Walks the file tree, parses every Python source file encountered, and
//! enumerates top-level function definitions whose name matches a
//! handler glob pattern. Uses `ignore::WalkBuilder` for gitignore-aware
//! traversal and `globset` for the name match, rather than a bespoke
//! extension dispatch table, since pythaw is Python-only.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::engine::Engine;

pub struct Handler {
    pub file: PathBuf,
    pub name: String,
    pub body_start: usize,
    pub body_end: usize,
}

impl Engine<'_> {
    /// `exclude` restricts handler enumeration only: the
    /// reachability engine may still follow imports into an excluded
    /// file, since shared utility code often lives under a path like
    /// `tests/` that handler discovery itself should skip.
    pub(crate) fn find_handlers(&mut self, targets: &[PathBuf], handler_patterns: &[String], exclude: &[String]) -> Vec<Handler> {
        let handler_glob = build_globset(handler_patterns);
        let exclude_glob = build_globset(exclude);

        let roots: Vec<PathBuf> = if targets.is_empty() {
            vec![self.root.clone()]
        } else {
            targets.to_vec()
        };

        let mut handlers = Vec::new();
        let mut builder = WalkBuilder::new(&roots[0]);
        for extra in &roots[1..] {
            builder.add(extra);
        }
        builder.hidden(false);

        for entry in builder.build().flatten() {
            let path = entry.path();
            if entry.file_type().is_some_and(|ft| !ft.is_file()) {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("py") {
                continue;
            }

            let rel = path.strip_prefix(&self.root).unwrap_or(path);
            if exclude_glob.is_match(rel) {
                continue;
            }

            let Some(model) = self.load(path) else { continue };
            for (name, def) in &model.top_level_functions {
                if handler_glob.is_match(Path::new(name)) {
                    handlers.push(Handler {
                        file: path.to_path_buf(),
                        name: name.clone(),
                        body_start: def.body_start_byte,
                        body_end: def.body_end_byte,
                    });
                }
            }
        }

        // Discovery order depends on file-system iteration, which isn't
        // guaranteed stable across platforms; sort so output is
        // deterministic across runs.
        handlers.sort_by(|a, b| (&a.file, &a.name).cmp(&(&b.file, &b.name)));
        handlers
    }
}

fn build_globset(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        if let Ok(glob) = Glob::new(pattern) {
            builder.add(glob);
        }
    }
    builder.build().unwrap_or_else(|_| GlobSetBuilder::new().build().unwrap())
}
