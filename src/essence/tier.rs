//! Ability tiers and the fixed order they are documented in.

use std::fmt;

/// Tier value used when a record has none, and the bucket unknown tiers fall into.
pub const DEFAULT_TIER: &str = "initiate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Initiate,
    Adept,
    Master,
    Grandmaster,
    GreatGrandmaster,
    /// Catch-all tier some source files use for reactions and other actives.
    Active,
}

impl Tier {
    /// Document section order.
    pub const ALL: [Tier; 6] = [
        Tier::Initiate,
        Tier::Adept,
        Tier::Master,
        Tier::Grandmaster,
        Tier::GreatGrandmaster,
        Tier::Active,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Initiate => "initiate",
            Self::Adept => "adept",
            Self::Master => "master",
            Self::Grandmaster => "grandmaster",
            Self::GreatGrandmaster => "greatgrandmaster",
            Self::Active => "active",
        }
    }

    /// Section heading text, without the leading `## `.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Initiate => "Initiate Tier",
            Self::Adept => "Adept Tier",
            Self::Master => "Master Tier",
            Self::Grandmaster => "Grandmaster Tier",
            Self::GreatGrandmaster => "Great Grandmaster Tier",
            Self::Active => "Active Tier",
        }
    }

    /// Exact, case-sensitive key lookup.
    pub fn from_key(key: &str) -> Option<Tier> {
        Self::ALL.into_iter().find(|tier| tier.key() == key)
    }

    /// Bucket for a raw tier value: absent or unrecognized values land in `Initiate`.
    pub fn bucket_for(raw: Option<&str>) -> Tier {
        raw.and_then(Tier::from_key).unwrap_or(Tier::Initiate)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
