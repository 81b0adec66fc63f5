use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::EssenceError;

/// Source directory of the `.tsx` essence tables, relative to the project root.
pub const INPUT_DIR: &str = "src/components/essences/consts";
/// Directory generated Markdown documents are written to, relative to the project root.
pub const OUTPUT_DIR: &str = "data/essences";
/// Essences converted when none are named explicitly, in processing order.
pub const DEFAULT_ESSENCES: [&str; 7] = [
    "earth",
    "metal",
    "wood",
    "poison",
    "acid",
    "lightning",
    "air",
];

/// Resolves per-essence input and output paths against a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssencePaths {
    root: PathBuf,
}

impl EssencePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn input_path(&self, essence: &str) -> PathBuf {
        self.root.join(INPUT_DIR).join(format!("{essence}.tsx"))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    pub fn output_path(&self, essence: &str) -> PathBuf {
        self.output_dir().join(format!("{essence}.md"))
    }
}

/// Every `*.md` file directly inside `dir`, sorted by path.
pub fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, EssenceError> {
    let read_dir_err = |source: io::Error| EssenceError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
