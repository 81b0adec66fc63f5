//! Reads a generated essence document back into records.
//!
//! The document is split on `---` rules into fragments. The most recent `##`
//! heading decides whether a fragment is an ability, cantrip or spell, and the
//! fenced YAML block carries the metadata.

use std::collections::BTreeMap;

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::Value;

use super::record::{AbilityRecord, EssenceSections, RecordBuilder, SectionKind};

static METADATA_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```yaml[ \t]*\n(.*?)\n```").expect("metadata block pattern is valid")
});

pub fn parse_markdown(content: &str) -> EssenceSections {
    let content = content.replace("\r\n", "\n");
    let mut sections = EssenceSections::default();
    let mut current = SectionKind::Abilities;

    for fragment in content.split("\n---\n") {
        if let Some(kind) = section_heading(fragment) {
            current = kind;
        }
        if let Some(record) = parse_fragment(fragment) {
            sections.section_mut(current).push(record);
        }
    }
    sections
}

/// Last `## ` heading above the fragment's `### ` line, mapped to a section.
fn section_heading(fragment: &str) -> Option<SectionKind> {
    fragment
        .lines()
        .take_while(|line| !line.starts_with("### "))
        .filter_map(|line| line.strip_prefix("## "))
        .last()
        .map(|heading| match heading.trim() {
            "Cantrips" => SectionKind::Cantrips,
            "Spells" => SectionKind::Spells,
            _ => SectionKind::Abilities,
        })
}

fn parse_fragment(fragment: &str) -> Option<AbilityRecord> {
    let caps = METADATA_BLOCK.captures(fragment)?;
    let block = caps.get(0)?;
    let yaml = caps.get(1)?.as_str();

    let metadata: BTreeMap<String, Value> = match serde_yaml::from_str(yaml) {
        Ok(metadata) => metadata,
        Err(err) => {
            warn!("skipping fragment with unreadable metadata: {err}");
            return None;
        }
    };

    let mut builder = RecordBuilder::default();
    for (key, value) in &metadata {
        if key == "name" || key == "description" {
            continue;
        }
        if let Some(text) = scalar_text(value) {
            builder.set(key, text);
        }
    }
    if let Some(name) = fragment_name(fragment) {
        builder.set("name", name);
    }
    builder.set("description", fragment[block.end()..].trim());
    builder.build()
}

fn fragment_name(fragment: &str) -> Option<&str> {
    fragment
        .lines()
        .find_map(|line| line.strip_prefix("###"))
        .map(str::trim)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => Some(text.clone()),
        _ => None,
    }
}
