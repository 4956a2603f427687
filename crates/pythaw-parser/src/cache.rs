//! A cache of parsed files keyed by path: a given path is parsed at most
//! once, however many call chains lead to it. pythaw's engine is
//! single-threaded and synchronous, so a `RefCell<HashMap<..>>` is
//! enough — no need for the `Mutex` a concurrent resolver would want.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use pythaw_core::types::SourcePosition;

use crate::model::FileModel;
use crate::treesitter::PythonParser;

pub struct FileCache {
    parser: PythonParser,
    files: RefCell<HashMap<PathBuf, Rc<FileModel>>>,
}

impl FileCache {
    pub fn new() -> Self {
        FileCache {
            parser: PythonParser::new(),
            files: RefCell::new(HashMap::new()),
        }
    }

    pub fn get_or_parse(&self, path: &Path) -> Rc<FileModel> {
        if let Some(existing) = self.files.borrow().get(path) {
            return Rc::clone(existing);
        }

        let model = match std::fs::read_to_string(path) {
            Ok(source) => self.parser.parse(path, source),
            Err(e) => FileModel::failed(
                path,
                String::new(),
                format!("could not read file: {e}"),
                SourcePosition::new(path.to_path_buf(), 1, 0),
            ),
        };

        let rc = Rc::new(model);
        self.files.borrow_mut().insert(path.to_path_buf(), Rc::clone(&rc));
        rc
    }

    /// Distinct paths parsed so far this run — no path is ever parsed
    /// more than once, so this is also the count the `check` command's
    /// footer line reports.
    pub fn len(&self) -> usize {
        self.files.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FileCache {
    fn default() -> Self {
        Self::new()
    }
}
