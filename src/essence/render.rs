use std::fmt::Write as _;

use super::record::AbilityRecord;

/// Renders one record as a Markdown fragment: `###` heading, a fenced YAML
/// metadata block, the description, and a closing `---` rule.
///
/// Nothing is escaped; the description is emitted verbatim.
pub fn render(record: &AbilityRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "### {}", record.name);
    out.push_str("```yaml\n");
    let _ = writeln!(out, "id: {}", record.id);
    let _ = writeln!(out, "tier: {}", record.tier_text());
    for (key, value) in record.flags() {
        let _ = writeln!(out, "{key}: {value}");
    }
    out.push_str("```\n\n");
    out.push_str(record.description_text());
    out.push_str("\n\n---\n");
    out
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::essence::extract::parse_object_block;
    use crate::essence::record::AbilityRecord;

    #[test]
    fn renders_fixed_template() {
        let record = AbilityRecord {
            tier: Some("adept".into()),
            description: Some("Hardens skin.".into()),
            is_passive: Some("true".into()),
            ..AbilityRecord::new("e1", "Stoneskin")
        };
        let expected = "### Stoneskin\n```yaml\nid: e1\ntier: adept\nisActive: false\nisPassive: true\nisSpell: false\nisCantrip: false\n```\n\nHardens skin.\n\n---\n";
        assert_eq!(render(&record), expected);
    }

    #[test]
    fn unset_fields_use_literal_defaults() {
        let rendered = render(&AbilityRecord::new("x", "Bare"));
        assert!(rendered.contains("tier: initiate\n"));
        for flag in ["isActive", "isPassive", "isSpell", "isCantrip"] {
            assert!(rendered.contains(&format!("{flag}: false\n")), "{flag} should default");
        }
        assert!(rendered.ends_with("```\n\n\n\n---\n"));
    }

    #[test]
    fn empty_name_renders_as_empty_heading() {
        let record = parse_object_block(" id: 'e1', name: '' ").expect("id and name are present");
        let rendered = render(&record);
        assert_eq!(rendered.lines().next(), Some("### "));
    }

    #[test]
    fn unknown_tier_is_rendered_verbatim() {
        let record = AbilityRecord {
            tier: Some("unknown-tier".into()),
            ..AbilityRecord::new("x", "Odd")
        };
        assert!(render(&record).contains("tier: unknown-tier\n"));
    }

    #[test]
    fn description_is_not_escaped() {
        let record = AbilityRecord {
            description: Some("Deal *2d6* damage: `acid`.".into()),
            ..AbilityRecord::new("x", "Splash")
        };
        assert!(render(&record).contains("\n\nDeal *2d6* damage: `acid`.\n\n---\n"));
    }
}
