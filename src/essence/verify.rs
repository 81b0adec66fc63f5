//! Checks that a generated document still matches its `.tsx` source.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use super::error::EssenceError;
use super::extract::extract;
use super::markdown::parse_markdown;
use super::paths::EssencePaths;
use super::record::{AbilityRecord, EssenceSections, SectionKind};

/// One difference between source and document, keyed by record id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Drift {
    /// In the source but not in the document.
    Missing { section: SectionKind, id: String },
    /// In the document but not in the source.
    Unexpected { section: SectionKind, id: String },
    Changed {
        section: SectionKind,
        id: String,
        field: &'static str,
        expected: String,
        actual: String,
    },
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { section, id } => write!(f, "{section}: {id} missing from document"),
            Self::Unexpected { section, id } => write!(f, "{section}: {id} not in source"),
            Self::Changed {
                section,
                id,
                field,
                expected,
                actual,
            } => write!(f, "{section}: {id}.{field} is '{actual}', source has '{expected}'"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub essence: String,
    pub document_path: PathBuf,
    pub drift: Vec<Drift>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.drift.is_empty()
    }
}

/// Compares the records extracted from the source with those read back from
/// the generated document.
pub fn verify_essence(paths: &EssencePaths, essence: &str) -> Result<VerifyReport, EssenceError> {
    let source = read_existing(paths.input_path(essence))?;
    let document_path = paths.output_path(essence);
    let document = read_existing(document_path.clone())?;

    let expected = extract(&source, essence);
    let actual = parse_markdown(&document);
    Ok(VerifyReport {
        essence: essence.to_string(),
        document_path,
        drift: compare_sections(&expected, &actual),
    })
}

fn read_existing(path: PathBuf) -> Result<String, EssenceError> {
    if !path.exists() {
        return Err(EssenceError::NotFound { path });
    }
    fs::read_to_string(&path).map_err(|source| EssenceError::Read { path, source })
}

/// Records are paired by id (duplicates in order), so the tier regrouping
/// done by the document does not count as drift.
pub fn compare_sections(expected: &EssenceSections, actual: &EssenceSections) -> Vec<Drift> {
    let mut drift = Vec::new();
    for section in SectionKind::ALL {
        let mut unmatched: HashMap<&str, VecDeque<&AbilityRecord>> = HashMap::new();
        for record in actual.section(section) {
            unmatched.entry(record.id.as_str()).or_default().push_back(record);
        }

        for want in expected.section(section) {
            let found = unmatched
                .get_mut(want.id.as_str())
                .and_then(VecDeque::pop_front);
            match found {
                Some(got) => drift.extend(compare_records(section, want, got)),
                None => drift.push(Drift::Missing {
                    section,
                    id: want.id.clone(),
                }),
            }
        }

        for got in actual.section(section) {
            let leftover = unmatched
                .get_mut(got.id.as_str())
                .and_then(VecDeque::pop_front);
            if leftover.is_some() {
                drift.push(Drift::Unexpected {
                    section,
                    id: got.id.clone(),
                });
            }
        }
    }
    drift
}

fn compare_records(section: SectionKind, want: &AbilityRecord, got: &AbilityRecord) -> Vec<Drift> {
    rendered_fields(want)
        .into_iter()
        .zip(rendered_fields(got))
        .filter(|((_, expected), (_, actual))| expected != actual)
        .map(|((field, expected), (_, actual))| Drift::Changed {
            section,
            id: want.id.clone(),
            field,
            expected,
            actual,
        })
        .collect()
}

/// Field values as they appear in a document. Escaped apostrophes are
/// unescaped so documents that went through the apostrophe fix still match.
fn rendered_fields(record: &AbilityRecord) -> Vec<(&'static str, String)> {
    let normalize = |text: &str| text.trim().replace("\\'", "'");
    let mut fields = vec![
        ("name", normalize(&record.name)),
        ("tier", normalize(record.tier_text())),
        ("description", normalize(record.description_text())),
    ];
    fields.extend(
        record
            .flags()
            .into_iter()
            .map(|(key, value)| (key, normalize(value))),
    );
    fields
}

#[cfg(test)]
mod tests {
    use super::{compare_sections, Drift};
    use crate::essence::record::{AbilityRecord, EssenceSections, SectionKind};

    fn sections(abilities: Vec<AbilityRecord>) -> EssenceSections {
        EssenceSections {
            abilities,
            ..EssenceSections::default()
        }
    }

    #[test]
    fn reordering_is_not_drift() {
        let a = AbilityRecord::new("a", "A");
        let b = AbilityRecord::new("b", "B");
        let drift = compare_sections(
            &sections(vec![a.clone(), b.clone()]),
            &sections(vec![b, a]),
        );
        assert!(drift.is_empty());
    }

    #[test]
    fn defaults_match_explicit_literals() {
        let bare = AbilityRecord::new("a", "A");
        let explicit = AbilityRecord {
            tier: Some("initiate".into()),
            is_active: Some("false".into()),
            description: Some(String::new()),
            ..AbilityRecord::new("a", "A")
        };
        assert!(compare_sections(&sections(vec![bare]), &sections(vec![explicit])).is_empty());
    }

    #[test]
    fn reports_missing_unexpected_and_changed() {
        let source = sections(vec![
            AbilityRecord {
                description: Some("Miner\\'s luck".into()),
                ..AbilityRecord::new("a", "A")
            },
            AbilityRecord::new("b", "B"),
        ]);
        let document = sections(vec![
            AbilityRecord {
                description: Some("Miner's luck".into()),
                tier: Some("adept".into()),
                ..AbilityRecord::new("a", "A")
            },
            AbilityRecord::new("c", "C"),
        ]);

        let drift = compare_sections(&source, &document);
        assert_eq!(
            drift,
            vec![
                Drift::Changed {
                    section: SectionKind::Abilities,
                    id: "a".into(),
                    field: "tier",
                    expected: "initiate".into(),
                    actual: "adept".into(),
                },
                Drift::Missing {
                    section: SectionKind::Abilities,
                    id: "b".into(),
                },
                Drift::Unexpected {
                    section: SectionKind::Abilities,
                    id: "c".into(),
                },
            ]
        );
        assert_eq!(drift[1].to_string(), "abilities: b missing from document");
    }

    #[test]
    fn duplicate_ids_pair_in_order() {
        let first = AbilityRecord::new("dup", "First");
        let second = AbilityRecord::new("dup", "Second");
        let drift = compare_sections(
            &sections(vec![first.clone(), second.clone()]),
            &sections(vec![first]),
        );
        assert_eq!(
            drift,
            vec![Drift::Missing {
                section: SectionKind::Abilities,
                id: "dup".into(),
            }]
        );
    }
}
