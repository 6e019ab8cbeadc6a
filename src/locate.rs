//! Resolve profile file identifiers (`<module path>/<dir>/<file>.go`) to files
//! under a source root.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{GoatcovError, Result};

/// A resolved source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path relative to the source root, `/`-separated.
    pub relative: String,
    pub contents: String,
}

/// Identifier → path index built from one walk of the source root.
#[derive(Debug)]
pub struct SourceIndex {
    root: PathBuf,
    files: HashMap<String, PathBuf>,
}

impl SourceIndex {
    /// Walk `root` once, collecting `go.mod` module paths and `.go` files.
    pub fn build(root: &Path) -> Result<Self> {
        let mut modules: Vec<(PathBuf, String)> = Vec::new();
        let mut sources: Vec<PathBuf> = Vec::new();
        if let Some(module) = enclosing_module(root)? {
            modules.push((root.to_path_buf(), module));
        }

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored_dir(e));
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                GoatcovError::io(path, source)
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let is_go_mod = entry.file_name() == "go.mod";
            let is_go = entry.file_name().to_string_lossy().ends_with(".go");
            let path = entry.into_path();
            if is_go_mod {
                let text = std::fs::read_to_string(&path).map_err(|e| GoatcovError::io(&path, e))?;
                if let Some(module) = module_path(&text) {
                    let dir = path.parent().unwrap_or(root).to_path_buf();
                    modules.push((dir, module));
                }
            } else if is_go {
                sources.push(path);
            }
        }

        let mut files = HashMap::new();
        for path in sources {
            // Nearest enclosing module wins.
            let module = modules
                .iter()
                .filter(|(dir, _)| path.starts_with(dir))
                .max_by_key(|(dir, _)| dir.components().count());
            if let Some((dir, module)) = module {
                if let Some(rel) = slash_path(&path, dir) {
                    files
                        .entry(format!("{module}/{rel}"))
                        .or_insert_with(|| path.clone());
                }
            }
            if let Some(rel) = slash_path(&path, root) {
                files.entry(rel).or_insert(path);
            }
        }

        tracing::debug!(
            root = %root.display(),
            modules = modules.len(),
            files = files.len(),
            "indexed source tree"
        );

        Ok(Self {
            root: root.to_path_buf(),
            files,
        })
    }

    /// Look up an identifier and read the file it names.
    pub fn resolve(&self, id: &str) -> Result<SourceFile> {
        let path = match self.files.get(id) {
            Some(path) => path.clone(),
            None => {
                // Profiles for code outside any module carry absolute paths.
                let candidate = Path::new(id);
                if candidate.is_absolute() && candidate.is_file() {
                    candidate.to_path_buf()
                } else {
                    return Err(GoatcovError::FileResolution(id.to_string()));
                }
            }
        };

        let contents = std::fs::read_to_string(&path).map_err(|e| GoatcovError::io(&path, e))?;
        let relative = slash_path(&path, &self.root).unwrap_or_else(|| id.to_string());
        Ok(SourceFile {
            path,
            relative,
            contents,
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Directories the Go tool never treats as part of a package tree.
fn is_ignored_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name.starts_with('_') || name == "testdata" || name == "vendor"
}

/// Extract the module path from `go.mod` text.
fn module_path(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) && !rest.starts_with('"') {
            return None;
        }
        let module = rest.trim().trim_matches('"').trim_matches('`');
        (!module.is_empty()).then(|| module.to_string())
    })
}

/// Import path of `root` when it sits inside a module whose `go.mod` is in
/// an ancestor directory, e.g. `--src ./pkg/util` within a module checkout.
fn enclosing_module(root: &Path) -> Result<Option<String>> {
    if root.join("go.mod").is_file() {
        return Ok(None);
    }
    let Ok(abs) = root.canonicalize() else {
        return Ok(None);
    };
    for dir in abs.ancestors().skip(1) {
        let go_mod = dir.join("go.mod");
        if !go_mod.is_file() {
            continue;
        }
        let text = std::fs::read_to_string(&go_mod).map_err(|e| GoatcovError::io(&go_mod, e))?;
        return Ok(module_path(&text).map(|module| match slash_path(&abs, dir) {
            Some(rel) => format!("{module}/{rel}"),
            None => module,
        }));
    }
    Ok(None)
}

/// `path` relative to `base`, joined with `/` regardless of platform.
fn slash_path(path: &Path, base: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}
