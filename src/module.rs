// File: src/module.rs
//
// Module loading state for `import` statements.
//
// The loader resolves import paths relative to the importing file, caches
// a module's top-level bindings by canonical path so a file is evaluated
// once per process, and tracks in-flight loads to detect circular
// imports. Reading and evaluating the file is the interpreter's job; the
// loader only owns resolution and caching.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use ahash::AHashMap;

use crate::interpreter::Value;

/// The cached result of evaluating a module: its top-level bindings
pub type ModuleExports = Rc<Vec<(String, Value)>>;

/// Manages import resolution, caching, and circular-import detection
#[derive(Default)]
pub struct ModuleLoader {
    /// Evaluated modules by canonical path
    cache: AHashMap<PathBuf, ModuleExports>,
    /// Canonical paths currently being evaluated, outermost first
    loading: Vec<PathBuf>,
}

impl ModuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve an import spec against the importing file's directory
    /// (falling back to the working directory). Returns the canonical
    /// path, or None when the file does not exist.
    pub fn resolve(&self, spec: &str, base: Option<&Path>) -> Option<PathBuf> {
        let raw = Path::new(spec);
        let candidate = if raw.is_absolute() {
            raw.to_path_buf()
        } else {
            match base {
                Some(dir) => dir.join(raw),
                None => raw.to_path_buf(),
            }
        };
        candidate.canonicalize().ok()
    }

    pub fn cached(&self, path: &Path) -> Option<ModuleExports> {
        self.cache.get(path).map(Rc::clone)
    }

    pub fn is_loading(&self, path: &Path) -> bool {
        self.loading.iter().any(|loading| loading == path)
    }

    pub fn begin(&mut self, path: PathBuf) {
        self.loading.push(path);
    }

    pub fn finish(&mut self, path: &Path) {
        if let Some(position) = self.loading.iter().rposition(|loading| loading == path) {
            self.loading.remove(position);
        }
    }

    pub fn store(&mut self, path: PathBuf, exports: Vec<(String, Value)>) {
        self.cache.insert(path, Rc::new(exports));
    }
}
