//! Maps an [`ImportBinding`] onto a project source file, or `None` when
//! it names something outside the project (stdlib, third-party, or a
//! path that genuinely doesn't exist on disk).
//!
//! Relative imports walk up `Path::parent()` once per leading dot;
//! absolute imports treat each dotted segment as a directory and probe
//! the final segment as `<name>.py` then `<name>/__init__.py`. A module
//! path that resolves to neither is left as `None` rather than a
//! best-guess path — pythaw only ever needs a definite yes/no about
//! whether a name is a project symbol right now.

use std::path::{Path, PathBuf};

use crate::model::ImportBinding;

pub fn resolve_import(root: &Path, importing_file: &Path, binding: &ImportBinding) -> Option<PathBuf> {
    if binding.is_relative {
        resolve_relative(importing_file, &binding.module)
    } else {
        resolve_package_chain(root, &binding.module)
    }
}

fn resolve_relative(importing_file: &Path, raw: &str) -> Option<PathBuf> {
    let dots = raw.chars().take_while(|&c| c == '.').count();
    if dots == 0 {
        return None;
    }
    let rest = &raw[dots..];

    let mut base = importing_file.parent()?.to_path_buf();
    for _ in 1..dots {
        base = base.parent()?.to_path_buf();
    }

    if rest.is_empty() {
        let init = base.join("__init__.py");
        return init.is_file().then_some(init);
    }
    resolve_package_chain(&base, rest)
}

fn resolve_package_chain(base: &Path, dotted: &str) -> Option<PathBuf> {
    let segments: Vec<&str> = dotted.split('.').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return None;
    }

    let mut dir = base.to_path_buf();
    for segment in &segments[..segments.len() - 1] {
        dir.push(segment);
    }
    let last = segments[segments.len() - 1];

    let as_file = dir.join(format!("{last}.py"));
    if as_file.is_file() {
        return Some(as_file);
    }
    let as_pkg_init = dir.join(last).join("__init__.py");
    if as_pkg_init.is_file() {
        return Some(as_pkg_init);
    }
    None
}
