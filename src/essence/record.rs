//! Flat ability records shared by the TSX extractor and the Markdown reader.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::tier::{Tier, DEFAULT_TIER};

/// Rendered in place of an absent flag.
pub const DEFAULT_FLAG: &str = "false";

/// Keys kept from a source object; anything else is ignored.
pub const RECOGNIZED_KEYS: [&str; 8] = [
    "id",
    "name",
    "tier",
    "description",
    "isActive",
    "isPassive",
    "isSpell",
    "isCantrip",
];

/// One ability, cantrip or spell.
///
/// Flags keep the literal text found in the source (`true`, `false`, or
/// whatever else was written there) so the generated documents reproduce it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_passive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_spell: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_cantrip: Option<String>,
}

impl AbilityRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn tier_text(&self) -> &str {
        self.tier.as_deref().unwrap_or(DEFAULT_TIER)
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Flag keys and their text, in document order.
    pub fn flags(&self) -> [(&'static str, &str); 4] {
        fn text(value: &Option<String>) -> &str {
            value.as_deref().unwrap_or(DEFAULT_FLAG)
        }
        [
            ("isActive", text(&self.is_active)),
            ("isPassive", text(&self.is_passive)),
            ("isSpell", text(&self.is_spell)),
            ("isCantrip", text(&self.is_cantrip)),
        ]
    }

    /// Tier bucket this record is documented under.
    pub fn bucket(&self) -> Tier {
        Tier::bucket_for(self.tier.as_deref())
    }
}

/// Collects recognized key/value pairs until a record can be built.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    id: Option<String>,
    name: Option<String>,
    tier: Option<String>,
    description: Option<String>,
    is_active: Option<String>,
    is_passive: Option<String>,
    is_spell: Option<String>,
    is_cantrip: Option<String>,
}

impl RecordBuilder {
    /// Stores `value` under `key`. Returns false for keys outside [`RECOGNIZED_KEYS`].
    /// A repeated key overwrites the earlier value.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        let slot = match key {
            "id" => &mut self.id,
            "name" => &mut self.name,
            "tier" => &mut self.tier,
            "description" => &mut self.description,
            "isActive" => &mut self.is_active,
            "isPassive" => &mut self.is_passive,
            "isSpell" => &mut self.is_spell,
            "isCantrip" => &mut self.is_cantrip,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }

    /// `None` unless both `id` and `name` were set.
    pub fn build(self) -> Option<AbilityRecord> {
        Some(AbilityRecord {
            id: self.id?,
            name: self.name?,
            tier: self.tier,
            description: self.description,
            is_active: self.is_active,
            is_passive: self.is_passive,
            is_spell: self.is_spell,
            is_cantrip: self.is_cantrip,
        })
    }
}

/// The three named arrays of one essence file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Abilities,
    Cantrips,
    Spells,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [
        SectionKind::Abilities,
        SectionKind::Cantrips,
        SectionKind::Spells,
    ];

    /// Suffix appended to the essence name in the `export const` declaration.
    pub fn const_suffix(self) -> &'static str {
        match self {
            Self::Abilities => "Abilities",
            Self::Cantrips => "Cantrips",
            Self::Spells => "Spells",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Abilities => "abilities",
            Self::Cantrips => "cantrips",
            Self::Spells => "spells",
        };
        f.write_str(label)
    }
}

/// Abilities, cantrips and spells of one essence, each in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EssenceSections {
    pub abilities: Vec<AbilityRecord>,
    pub cantrips: Vec<AbilityRecord>,
    pub spells: Vec<AbilityRecord>,
}

impl EssenceSections {
    pub fn section(&self, kind: SectionKind) -> &[AbilityRecord] {
        match kind {
            SectionKind::Abilities => &self.abilities,
            SectionKind::Cantrips => &self.cantrips,
            SectionKind::Spells => &self.spells,
        }
    }

    pub fn section_mut(&mut self, kind: SectionKind) -> &mut Vec<AbilityRecord> {
        match kind {
            SectionKind::Abilities => &mut self.abilities,
            SectionKind::Cantrips => &mut self.cantrips,
            SectionKind::Spells => &mut self.spells,
        }
    }
}
