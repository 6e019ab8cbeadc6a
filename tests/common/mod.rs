use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const MODULE: &str = "example.com/demo";

/// A temporary Go module with source files and coverage profiles.
/// The caller must hold onto the value to keep the temp directory alive.
pub struct GoModule {
    dir: TempDir,
}

#[allow(dead_code)]
impl GoModule {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("go.mod"), format!("module {MODULE}\n\ngo 1.22\n")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the module root, creating directories as needed.
    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Write a `mode: set` profile from block lines.
    pub fn profile(&self, name: &str, blocks: &[&str]) -> PathBuf {
        let mut text = String::from("mode: set\n");
        for block in blocks {
            text.push_str(block);
            text.push('\n');
        }
        self.write(name, &text)
    }
}
