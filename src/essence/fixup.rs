//! Post-pass over generated documents: the extractor keeps string escapes
//! verbatim, so `Miner\'s Touch` reaches the Markdown with its backslash.

use std::fs;
use std::path::Path;

use log::debug;

use super::error::EssenceError;
use super::paths::markdown_files;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFix {
    pub file_name: String,
    pub replacements: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixReport {
    pub files_scanned: usize,
    /// Files that were rewritten, in name order.
    pub fixed: Vec<FileFix>,
}

impl FixReport {
    pub fn total_replacements(&self) -> usize {
        self.fixed.iter().map(|fix| fix.replacements).sum()
    }
}

/// Replaces every `\'` with `'`, returning the new text and the replacement count.
pub fn unescape_apostrophes(text: &str) -> (String, usize) {
    let count = text.matches("\\'").count();
    (text.replace("\\'", "'"), count)
}

/// Fixes every `*.md` file directly inside `dir`. Files without escapes are not touched.
pub fn fix_apostrophes(dir: &Path) -> Result<FixReport, EssenceError> {
    let files = markdown_files(dir)?;
    let mut report = FixReport {
        files_scanned: files.len(),
        fixed: Vec::new(),
    };
    for path in files {
        let content = fs::read_to_string(&path).map_err(|source| EssenceError::Read {
            path: path.clone(),
            source,
        })?;
        let (fixed, replacements) = unescape_apostrophes(&content);
        if replacements == 0 {
            debug!("{}: nothing to fix", path.display());
            continue;
        }
        fs::write(&path, fixed).map_err(|source| EssenceError::Write {
            path: path.clone(),
            source,
        })?;
        report.fixed.push(FileFix {
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            replacements,
        });
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::unescape_apostrophes;

    #[test]
    fn counts_and_replaces_escaped_apostrophes() {
        let (fixed, count) = unescape_apostrophes("### Miner\\'s Touch\n\nIt\\'s a mason\\'s tool. Don't.");
        assert_eq!(count, 3);
        assert_eq!(fixed, "### Miner's Touch\n\nIt's a mason's tool. Don't.");
    }

    #[test]
    fn clean_text_is_unchanged() {
        assert_eq!(unescape_apostrophes("plain"), ("plain".to_string(), 0));
    }
}
