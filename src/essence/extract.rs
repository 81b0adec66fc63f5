//! Pulls ability records out of the `export const` arrays of an essence `.tsx` file.
//!
//! This is line-oriented pattern matching, not a TypeScript parser. Object
//! blocks are found with a non-nesting `{...}` match, so a `{` or `}` inside a
//! string value splits the block in the wrong place. Values spanning several
//! lines are not supported either.

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::record::{AbilityRecord, EssenceSections, RecordBuilder, SectionKind};

static OBJECT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}]+)\}").expect("object block pattern is valid"));

/// Extracts the abilities, cantrips and spells arrays declared for `essence`.
/// A missing array yields an empty list.
pub fn extract(raw: &str, essence: &str) -> EssenceSections {
    let mut sections = EssenceSections::default();
    for kind in SectionKind::ALL {
        *sections.section_mut(kind) = extract_section(raw, essence, kind);
    }
    sections
}

pub fn extract_section(raw: &str, essence: &str, kind: SectionKind) -> Vec<AbilityRecord> {
    match find_section(raw, essence, kind) {
        Some(body) => parse_object_blocks(body),
        None => {
            debug!("{essence}: no {essence}{} array", kind.const_suffix());
            Vec::new()
        }
    }
}

/// Body of `export const <essence><Suffix> = [ ... ];`, up to the first `];`.
fn find_section<'a>(raw: &'a str, essence: &str, kind: SectionKind) -> Option<&'a str> {
    let pattern = format!(
        r"(?s)export const {}{} = \[(.*?)\];",
        regex::escape(essence),
        kind.const_suffix()
    );
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(err) => {
            warn!("{essence}: cannot build section pattern: {err}");
            return None;
        }
    };
    re.captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str())
}

/// Records for every `{...}` block in `body` that carries both `id` and `name`.
pub fn parse_object_blocks(body: &str) -> Vec<AbilityRecord> {
    OBJECT_BLOCK
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .filter_map(|block| {
            let record = parse_object_block(block.as_str());
            if record.is_none() {
                debug!("dropping object block without id and name");
            }
            record
        })
        .collect()
}

/// Parses the inside of one object literal (braces excluded).
pub fn parse_object_block(block: &str) -> Option<AbilityRecord> {
    let mut builder = RecordBuilder::default();
    for line in block.lines() {
        let line = line.trim().trim_end_matches(',');
        for property in split_properties(line) {
            let property = property.trim().trim_end_matches(',');
            let Some((key, value)) = property.split_once(':') else {
                continue;
            };
            builder.set(key.trim(), unquote(value));
        }
    }
    builder.build()
}

/// Splits a line at commas outside `'`, `"` and `` ` `` strings so that
/// `id: 'e1', name: 'Stoneskin'` yields two properties. A line holding a
/// single property comes back unchanged.
fn split_properties(line: &str) -> Vec<&str> {
    let mut properties = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (idx, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, ch) {
            (Some(_), '\\') => escaped = true,
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"' | '`') => quote = Some(ch),
            (None, ',') => {
                properties.push(&line[start..idx]);
                start = idx + 1;
            }
            (None, _) => {}
        }
    }
    properties.push(&line[start..]);
    properties
}

/// Trims whitespace, then leading/trailing `'` runs, then `"` runs.
fn unquote(value: &str) -> &str {
    value.trim().trim_matches('\'').trim_matches('"')
}
