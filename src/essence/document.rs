//! Assembles the per-essence Markdown document and writes it to disk.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use log::info;

use super::error::EssenceError;
use super::extract::extract;
use super::paths::EssencePaths;
use super::record::AbilityRecord;
use super::render::render;
use super::tier::Tier;

/// Abilities grouped by tier, each bucket in source order.
#[derive(Debug, Default)]
pub struct TierBuckets<'a> {
    buckets: [Vec<&'a AbilityRecord>; Tier::ALL.len()],
}

impl<'a> TierBuckets<'a> {
    pub fn from_records(records: &'a [AbilityRecord]) -> Self {
        let mut buckets = Self::default();
        for record in records {
            buckets.buckets[record.bucket().index()].push(record);
        }
        buckets
    }

    pub fn get(&self, tier: Tier) -> &[&'a AbilityRecord] {
        &self.buckets[tier.index()]
    }

    /// Non-empty buckets in section order.
    pub fn non_empty(&self) -> impl Iterator<Item = (Tier, &[&'a AbilityRecord])> + '_ {
        Tier::ALL
            .into_iter()
            .map(|tier| (tier, self.get(tier)))
            .filter(|(_, records)| !records.is_empty())
    }
}

/// `earth` -> `Earth`: first character upper-cased, the rest lower-cased.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn build_document(
    essence: &str,
    abilities: &[AbilityRecord],
    cantrips: &[AbilityRecord],
    spells: &[AbilityRecord],
) -> String {
    let mut doc = format!("# {} Essence Abilities\n\n", capitalize(essence));

    let buckets = TierBuckets::from_records(abilities);
    for (tier, records) in buckets.non_empty() {
        push_section(&mut doc, tier.display_name(), records.iter().copied());
    }
    if !cantrips.is_empty() {
        push_section(&mut doc, "Cantrips", cantrips.iter());
    }
    if !spells.is_empty() {
        push_section(&mut doc, "Spells", spells.iter());
    }
    doc
}

fn push_section<'a>(doc: &mut String, heading: &str, records: impl Iterator<Item = &'a AbilityRecord>) {
    doc.push_str("## ");
    doc.push_str(heading);
    doc.push_str("\n\n");
    for record in records {
        doc.push_str(&render(record));
        doc.push('\n');
    }
}

/// Writes `text` to the essence's output path, creating missing directories
/// and replacing any previous file.
pub fn write_document(paths: &EssencePaths, essence: &str, text: &str) -> Result<PathBuf, EssenceError> {
    let output = paths.output_path(essence);
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

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub essence: String,
    pub output_path: PathBuf,
    pub abilities: usize,
    pub cantrips: usize,
    pub spells: usize,
}

impl fmt::Display for ConversionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Created {}.md ({} abilities, {} cantrips, {} spells)",
            self.essence, self.abilities, self.cantrips, self.spells
        )
    }
}

/// Reads the essence's `.tsx` table, renders it, and writes the Markdown document.
/// A missing input yields [`EssenceError::NotFound`] and nothing is written.
pub fn convert_essence(paths: &EssencePaths, essence: &str) -> Result<ConversionSummary, EssenceError> {
    let input = paths.input_path(essence);
    if !input.exists() {
        return Err(EssenceError::NotFound { path: input });
    }
    let raw = fs::read_to_string(&input).map_err(|source| EssenceError::Read {
        path: input.clone(),
        source,
    })?;

    let sections = extract(&raw, essence);
    let text = build_document(essence, &sections.abilities, &sections.cantrips, &sections.spells);
    let output_path = write_document(paths, essence, &text)?;
    info!("{essence}: wrote {} ({} bytes)", output_path.display(), text.len());

    Ok(ConversionSummary {
        essence: essence.to_string(),
        output_path,
        abilities: sections.abilities.len(),
        cantrips: sections.cantrips.len(),
        spells: sections.spells.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::{build_document, capitalize, TierBuckets};
    use crate::essence::record::AbilityRecord;
    use crate::essence::tier::Tier;

    fn ability(id: &str, tier: Option<&str>) -> AbilityRecord {
        AbilityRecord {
            tier: tier.map(str::to_string),
            ..AbilityRecord::new(id, id.to_uppercase())
        }
    }

    #[test]
    fn unknown_tier_lands_in_initiate_bucket() {
        let records = vec![
            ability("a", Some("initiate")),
            ability("b", Some("adept")),
            ability("c", Some("unknown-tier")),
        ];
        let buckets = TierBuckets::from_records(&records);
        let initiate: Vec<&str> = buckets.get(Tier::Initiate).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(initiate, vec!["a", "c"]);
        assert_eq!(buckets.get(Tier::Adept).len(), 1);

        let other = vec![ability("c", Some("something-else"))];
        assert_eq!(TierBuckets::from_records(&other).get(Tier::Initiate).len(), 1);
    }

    #[test]
    fn document_lists_non_empty_tiers_in_fixed_order() {
        let abilities = vec![
            ability("active1", Some("active")),
            ability("gm1", Some("greatgrandmaster")),
            ability("init1", None),
            ability("adept1", Some("adept")),
        ];
        let doc = build_document("earth", &abilities, &[], &[]);
        assert!(doc.starts_with("# Earth Essence Abilities\n\n## Initiate Tier\n\n### INIT1\n"));

        let headings: Vec<&str> = doc.lines().filter(|l| l.starts_with("## ")).collect();
        assert_eq!(
            headings,
            vec![
                "## Initiate Tier",
                "## Adept Tier",
                "## Great Grandmaster Tier",
                "## Active Tier"
            ]
        );
        assert!(!doc.contains("## Master Tier"));
        assert!(!doc.contains("## Cantrips"));
        assert!(!doc.contains("## Spells"));
    }

    #[test]
    fn cantrips_and_spells_follow_tiers_in_source_order() {
        let cantrips = vec![ability("c2", Some("cantrip")), ability("c1", Some("adept"))];
        let spells = vec![ability("s1", Some("1st"))];
        let doc = build_document("air", &[], &cantrips, &spells);

        assert!(doc.starts_with("# Air Essence Abilities\n\n## Cantrips\n\n### C2\n"));
        let c2 = doc.find("### C2").unwrap_or(usize::MAX);
        let c1 = doc.find("### C1").unwrap_or(0);
        let spells_at = doc.find("## Spells\n\n### S1").unwrap_or(0);
        assert!(c2 < c1 && c1 < spells_at);
        assert!(!doc.contains("Tier\n"));
    }

    #[test]
    fn fragments_are_separated_by_blank_lines() {
        let abilities = vec![ability("a", None), ability("b", None)];
        let doc = build_document("wood", &abilities, &[], &[]);
        assert!(doc.contains("---\n\n### B\n"));
        assert!(doc.ends_with("---\n\n"));
    }

    #[test]
    fn empty_essence_is_title_only() {
        assert_eq!(build_document("acid", &[], &[], &[]), "# Acid Essence Abilities\n\n");
    }

    #[test]
    fn capitalize_matches_title_case_of_one_word() {
        assert_eq!(capitalize("lightning"), "Lightning");
        assert_eq!(capitalize("aIR"), "Air");
        assert_eq!(capitalize(""), "");
    }
}
