//! Weapon schema and derived-metric formulas.
//! Base stats come from the wiki theory table (quantitative) and filter table
//! (qualitative scores); `computed` is always recalculated from `stats`, never
//! scraped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Opponent health pool assumed by `time_to_kill`.
pub const TARGET_HEALTH: f64 = 200.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Canonical slug (e.g. "investigator"). `unknown_*` when the display name
    /// has no mapping.
    pub id: String,
    /// Weapon display name (Chinese, e.g. "警探").
    pub name: String,
    /// Owning character's display name. Denormalized back-reference, not an
    /// enforced foreign key.
    pub character: String,
    /// Weapon category, kept in source language (e.g. "自动步枪").
    #[serde(rename = "type")]
    pub weapon_type: String,
    pub imgs: WeaponImages,
    pub stats: WeaponStats,
    /// Distance band label -> per-body-part damage. Sparse: only bands found
    /// on the detail page are present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_falloff: Option<BTreeMap<String, FalloffDamage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_part_multipliers: Option<BodyPartMultipliers>,
    pub attributes: WeaponAttributes,
    pub computed: ComputedStats,
    #[serde(rename = "wikiUrl", default, skip_serializing_if = "Option::is_none")]
    pub wiki_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponImages {
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub weapon: String,
}

/// Quantitative base stats. Zero defaults when unscraped, never null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    #[serde(default)]
    pub damage_head: f64,
    /// Base body damage. For multi-pellet weapons ("12x8") this is the
    /// per-pellet base value; the pellet count is NOT multiplied in. Known
    /// simplification carried over from the source data.
    #[serde(default)]
    pub damage_body: f64,
    /// Rounds per minute.
    #[serde(default)]
    pub fire_rate: u32,
    #[serde(default)]
    pub mag_capacity: u32,
    /// Seconds.
    #[serde(default)]
    pub reload_time: f64,
    /// Effective range in meters.
    #[serde(default)]
    pub range: u32,
}

/// Qualitative 0-100 scores from the filter table, plus two free-text fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponAttributes {
    #[serde(default)]
    pub aim_speed: u32,
    #[serde(default)]
    pub accuracy: u32,
    #[serde(default)]
    pub handling: u32,
    #[serde(default)]
    pub reload_speed: u32,
    #[serde(default)]
    pub charge_speed: u32,
    #[serde(default)]
    pub fire_mode: String,
    #[serde(default)]
    pub zoom_scale: String,
    #[serde(default)]
    pub move_speed: u32,
}

impl Default for WeaponAttributes {
    fn default() -> Self {
        WeaponAttributes {
            aim_speed: 0,
            accuracy: 0,
            handling: 0,
            reload_speed: 0,
            charge_speed: 0,
            fire_mode: "N/A".to_string(),
            zoom_scale: "1x".to_string(),
            move_speed: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FalloffDamage {
    pub head: f64,
    pub body: f64,
    pub legs: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyPartMultipliers {
    pub head: f64,
    pub chest: f64,
    pub legs: f64,
}

/// Presentation metrics derived from `stats`. Theoretical values assuming
/// single target, full accuracy, uninterrupted fire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComputedStats {
    pub dps_body: f64,
    pub dps_head: f64,
    pub burst_damage: f64,
    /// Seconds to deplete [TARGET_HEALTH], rounded to 3 decimals. 0 when
    /// `fire_rate` is 0.
    pub time_to_kill: f64,
}

/// Recalculate all derived metrics from base stats.
pub fn compute_derived(stats: &WeaponStats) -> ComputedStats {
    let rps = stats.fire_rate as f64 / 60.0;
    let time_to_kill = if stats.fire_rate == 0 {
        0.0
    } else {
        // Zero body damage counts as 1 to avoid dividing by zero.
        let shots_to_kill = (TARGET_HEALTH / stats.damage_body.max(1.0)).ceil();
        round3((shots_to_kill - 1.0) * (60.0 / stats.fire_rate as f64))
    };
    ComputedStats {
        dps_body: (rps * stats.damage_body).round(),
        dps_head: (rps * stats.damage_head).round(),
        burst_damage: stats.mag_capacity as f64 * stats.damage_body,
        time_to_kill,
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(damage_body: f64, damage_head: f64, fire_rate: u32, mag: u32) -> WeaponStats {
        WeaponStats {
            damage_body,
            damage_head,
            fire_rate,
            mag_capacity: mag,
            reload_time: 2.0,
            range: 50,
        }
    }

    #[test]
    fn dps_is_rounded_rate_times_damage() {
        let computed = compute_derived(&stats(12.0, 18.0, 600, 30));
        assert_eq!(computed.dps_body, 120.0);
        assert_eq!(computed.dps_head, 180.0);
    }

    #[test]
    fn burst_damage_is_mag_times_body_damage() {
        let computed = compute_derived(&stats(25.0, 37.0, 695, 30));
        assert_eq!(computed.burst_damage, 750.0);
    }

    #[test]
    fn time_to_kill_matches_formula() {
        // ceil(200 / 25) = 8 shots, 7 intervals of 60/695 s.
        let computed = compute_derived(&stats(25.0, 37.0, 695, 30));
        assert_eq!(computed.time_to_kill, 0.604);
    }

    #[test]
    fn zero_fire_rate_means_zero_time_to_kill() {
        let computed = compute_derived(&stats(25.0, 37.0, 0, 30));
        assert_eq!(computed.time_to_kill, 0.0);
        assert_eq!(computed.dps_body, 0.0);
    }

    #[test]
    fn zero_body_damage_treated_as_one() {
        // Guard: 200 / max(0, 1) = 200 shots.
        let computed = compute_derived(&stats(0.0, 0.0, 60, 10));
        assert_eq!(computed.time_to_kill, 199.0);
    }
}
