//! Invariant checks over a produced root document.
//! Run via the validate_data bin after any pipeline pass.

use std::collections::HashSet;
use std::fmt;

use crate::data::root::RootData;
use crate::data::weapon::compute_derived;

const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

/// Check every weapon and character record against the document invariants:
/// unique slugs, computed metrics in sync with base stats, weapon owners
/// present in the character list.
pub fn validate_root(root: &RootData) -> ValidationReport {
    let mut report = ValidationReport::default();

    if root.last_updated.trim().is_empty() {
        report.push(
            ValidationSeverity::Warning,
            "root",
            "missing last_updated timestamp",
        );
    }

    let character_names: HashSet<&str> = root
        .characters
        .iter()
        .map(|character| character.name.as_str())
        .collect();

    let mut weapon_ids = HashSet::new();
    for (index, weapon) in root.weapons.iter().enumerate() {
        let context = format!("weapons[{index}] id='{}'", weapon.id);

        if weapon.id.trim().is_empty() {
            report.push(ValidationSeverity::Error, context.clone(), "empty id");
        } else if !weapon_ids.insert(weapon.id.as_str()) {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!("duplicate id '{}'", weapon.id),
            );
        }

        let expected = compute_derived(&weapon.stats);
        if (weapon.computed.dps_body - expected.dps_body).abs() > EPSILON
            || (weapon.computed.dps_head - expected.dps_head).abs() > EPSILON
            || (weapon.computed.burst_damage - expected.burst_damage).abs() > EPSILON
            || (weapon.computed.time_to_kill - expected.time_to_kill).abs() > EPSILON
        {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                "computed metrics are stale (not a pure function of stats)",
            );
        }

        if weapon.stats.damage_body == 0.0 {
            report.push(
                ValidationSeverity::Info,
                context.clone(),
                "zero body damage (placeholder record?)",
            );
        }

        if !weapon.character.is_empty() && !character_names.contains(weapon.character.as_str()) {
            report.push(
                ValidationSeverity::Warning,
                context,
                format!("owner '{}' not in character list", weapon.character),
            );
        }
    }

    let mut character_ids = HashSet::new();
    for (index, character) in root.characters.iter().enumerate() {
        let context = format!("characters[{index}] id='{}'", character.id);
        if character.id.trim().is_empty() {
            report.push(ValidationSeverity::Error, context, "empty id");
        } else if !character_ids.insert(character.id.as_str()) {
            report.push(
                ValidationSeverity::Error,
                context,
                format!("duplicate id '{}'", character.id),
            );
        } else if character.icon.is_empty() {
            report.push(ValidationSeverity::Info, context, "missing icon URL");
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::merge::{characters_from_weapons, merge_weapons, TheoryRecord};
    use crate::data::weapon::WeaponStats;
    use std::collections::HashMap;

    fn sample_root() -> RootData {
        let mut theory = HashMap::new();
        theory.insert(
            "flavia".to_string(),
            TheoryRecord {
                character: "芙拉薇娅".to_string(),
                weapon_name: "独舞".to_string(),
                icon_url: "https://img.example/flavia.png".to_string(),
                stats: WeaponStats {
                    damage_body: 12.0,
                    damage_head: 18.0,
                    fire_rate: 600,
                    mag_capacity: 30,
                    reload_time: 2.0,
                    range: 50,
                },
            },
        );
        let weapons = merge_weapons(&theory, &HashMap::new());
        let characters = characters_from_weapons(&weapons);
        RootData::new(weapons, characters)
    }

    #[test]
    fn fresh_pipeline_output_has_no_errors() {
        let report = validate_root(&sample_root());
        assert!(!report.has_errors(), "diagnostics: {:?}", report.diagnostics);
    }

    #[test]
    fn stale_computed_metrics_are_an_error() {
        let mut root = sample_root();
        root.weapons[0].stats.damage_body = 40.0; // stats patched, computed not
        let report = validate_root(&root);
        assert!(report.has_errors());
    }

    #[test]
    fn duplicate_weapon_ids_are_an_error() {
        let mut root = sample_root();
        let mut duplicate = root.weapons[0].clone();
        duplicate.name = "复制品".to_string();
        root.weapons.push(duplicate);
        let report = validate_root(&root);
        assert!(report.has_errors());
    }
}
