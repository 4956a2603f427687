//! Parsing, name resolution, and import resolution for pythaw.
//!
//! - [`model`] — definitions, import bindings, the per-file model
//! - [`treesitter`] — the tree-sitter-python parser adapter
//! - [`bindings`] — builds a file's module-scope binding map
//! - [`imports`] — maps an import binding onto a project file, or `None`
//! - [`walk`] — collects call sites and local instantiations in a body
//! - [`cache`] — parses each file at most once

pub mod bindings;
pub mod cache;
pub mod imports;
pub mod model;
pub mod treesitter;
pub mod walk;

pub use cache::FileCache;
pub use model::{Binding, ClassDef, FileModel, FunctionDef, ImportBinding, ParseStatus};
pub use walk::{CalleeShape, RawCall};

#[cfg(test)]
mod tests;
