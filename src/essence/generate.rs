//! The reverse direction: rebuilds an essence `.tsx` table from its Markdown
//! document, so hand edits to the documents can flow back into the source.
//!
//! Strings are written double-quoted with [`escape_string`]; flags and the
//! tier keep the text the document carried.

use std::fmt;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use log::info;

use super::error::EssenceError;
use super::markdown::parse_markdown;
use super::paths::{markdown_files, EssencePaths};
use super::record::{AbilityRecord, EssenceSections, SectionKind};

/// Escapes `text` for a double-quoted TypeScript string literal.
pub fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}

fn format_record(record: &AbilityRecord) -> String {
    let mut out = String::from("  {\n");
    let _ = writeln!(out, "    id: \"{}\",", escape_string(&record.id));
    let _ = writeln!(out, "    name: \"{}\",", escape_string(&record.name));
    let _ = writeln!(out, "    description: \"{}\",", escape_string(record.description_text()));
    let _ = writeln!(out, "    tier: \"{}\",", record.tier_text());
    for (key, value) in record.flags() {
        let _ = writeln!(out, "    {key}: {value},");
    }
    out.push_str("  }");
    out
}

/// Renders the three `export const` arrays for `essence`, abilities first.
/// Records keep their order within each array.
pub fn generate_tsx(sections: &EssenceSections, essence: &str) -> String {
    let arrays: Vec<String> = SectionKind::ALL
        .iter()
        .map(|&kind| {
            let items: Vec<String> = sections.section(kind).iter().map(format_record).collect();
            format!(
                "export const {essence}{} = [\n{}\n];\n",
                kind.const_suffix(),
                items.join(",\n")
            )
        })
        .collect();
    arrays.join("\n")
}

/// Writes `text` to the essence's `.tsx` path, creating missing directories
/// and replacing any previous file.
pub fn write_tsx(paths: &EssencePaths, essence: &str, text: &str) -> Result<PathBuf, EssenceError> {
    let output = paths.input_path(essence);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|source| EssenceError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&output, text).map_err(|source| EssenceError::Write {
        path: output.clone(),
        source,
    })?;
    Ok(output)
}

/// Essence names of every document in the output directory, in name order.
pub fn document_essences(paths: &EssencePaths) -> Result<Vec<String>, EssenceError> {
    let files = markdown_files(&paths.output_dir())?;
    Ok(files
        .iter()
        .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub essence: String,
    pub output_path: PathBuf,
    pub abilities: usize,
    pub cantrips: usize,
    pub spells: usize,
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generated {} abilities, {} cantrips, {} spells",
            self.abilities, self.cantrips, self.spells
        )
    }
}

/// Reads the essence's Markdown document and overwrites its `.tsx` table.
/// A missing document yields [`EssenceError::NotFound`] and nothing is written.
pub fn generate_essence(paths: &EssencePaths, essence: &str) -> Result<GenerationSummary, EssenceError> {
    let input = paths.output_path(essence);
    if !input.exists() {
        return Err(EssenceError::NotFound { path: input });
    }
    let document = fs::read_to_string(&input).map_err(|source| EssenceError::Read {
        path: input.clone(),
        source,
    })?;

    let sections = parse_markdown(&document);
    let text = generate_tsx(&sections, essence);
    let output_path = write_tsx(paths, essence, &text)?;
    info!("{essence}: wrote {} ({} bytes)", output_path.display(), text.len());

    Ok(GenerationSummary {
        essence: essence.to_string(),
        output_path,
        abilities: sections.abilities.len(),
        cantrips: sections.cantrips.len(),
        spells: sections.spells.len(),
    })
}
