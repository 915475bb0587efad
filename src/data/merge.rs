//! Record merger: joins per-source intermediate records by canonical character
//! slug and applies the field-level fallback order. Detail-page data overrides
//! table-scraped data overrides defaults; conflicting values are never
//! averaged.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::data::character::{Character, CharacterImages, CharacterStats};
use crate::data::names;
use crate::data::weapon::{
    compute_derived, BodyPartMultipliers, FalloffDamage, Weapon, WeaponAttributes, WeaponImages,
    WeaponStats,
};

/// Reload time substituted when the theory table had none.
pub const DEFAULT_RELOAD_TIME: f64 = 2.0;

/// Quantitative record from the theory table, keyed by character slug.
#[derive(Debug, Clone, Default)]
pub struct TheoryRecord {
    /// Character display name as written in the table.
    pub character: String,
    /// Weapon display name, when the name cell carried one.
    pub weapon_name: String,
    /// Character icon URL (full resolution).
    pub icon_url: String,
    pub stats: WeaponStats,
}

/// Qualitative record from the filter table, keyed by character slug.
#[derive(Debug, Clone, Default)]
pub struct FilterRecord {
    pub character: String,
    pub weapon_name: String,
    pub weapon_type: String,
    /// Weapon icon URL (full resolution).
    pub image_url: String,
    pub attributes: WeaponAttributes,
}

/// Field overrides scraped from a per-weapon detail page. `None` means the
/// page did not provide the field and the existing value stands.
#[derive(Debug, Clone, Default)]
pub struct WeaponDetail {
    pub image: Option<String>,
    pub weapon_type: Option<String>,
    pub damage_body: Option<f64>,
    pub damage_head: Option<f64>,
    pub fire_rate: Option<u32>,
    pub mag_capacity: Option<u32>,
    pub reload_time: Option<f64>,
    pub range: Option<u32>,
    pub damage_falloff: Option<BTreeMap<String, FalloffDamage>>,
    pub body_part_multipliers: Option<BodyPartMultipliers>,
}

/// Merge both table sources into one weapon per slug in the union of keys.
/// A record present in only one source is still emitted, with defaults for
/// the missing side. Output is sorted by slug for deterministic documents.
pub fn merge_weapons(
    theory: &HashMap<String, TheoryRecord>,
    filter: &HashMap<String, FilterRecord>,
) -> Vec<Weapon> {
    let keys: BTreeSet<&String> = theory.keys().chain(filter.keys()).collect();

    keys.into_iter()
        .map(|key| {
            let t = theory.get(key);
            let f = filter.get(key);

            let name = first_non_empty(&[
                f.map(|r| r.weapon_name.as_str()).unwrap_or(""),
                t.map(|r| r.weapon_name.as_str()).unwrap_or(""),
            ])
            .unwrap_or("Unknown Weapon")
            .to_string();
            let character = first_non_empty(&[
                t.map(|r| r.character.as_str()).unwrap_or(""),
                f.map(|r| r.character.as_str()).unwrap_or(""),
            ])
            .unwrap_or("Unknown Character")
            .to_string();

            let mut stats = t.map(|r| r.stats.clone()).unwrap_or_default();
            if stats.reload_time == 0.0 {
                stats.reload_time = DEFAULT_RELOAD_TIME;
            }
            let computed = compute_derived(&stats);

            Weapon {
                id: names::weapon_id(&name),
                name,
                character,
                weapon_type: f
                    .filter(|r| !r.weapon_type.is_empty())
                    .map(|r| r.weapon_type.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                imgs: WeaponImages {
                    character: t.map(|r| r.icon_url.clone()).unwrap_or_default(),
                    weapon: f.map(|r| r.image_url.clone()).unwrap_or_default(),
                },
                stats,
                damage_falloff: None,
                body_part_multipliers: None,
                attributes: f.map(|r| r.attributes.clone()).unwrap_or_default(),
                computed,
                wiki_url: None,
            }
        })
        .collect()
}

/// Deduplicated character stubs for all owners of the merged weapons, keeping
/// first-seen order.
pub fn characters_from_weapons(weapons: &[Weapon]) -> Vec<Character> {
    let mut seen = BTreeSet::new();
    weapons
        .iter()
        .filter(|weapon| !weapon.character.is_empty())
        .filter_map(|weapon| {
            let id = names::canonical_character_id(&weapon.character);
            if !seen.insert(id.clone()) {
                return None;
            }
            Some(Character::stub(
                id,
                weapon.character.clone(),
                weapon.imgs.character.clone(),
            ))
        })
        .collect()
}

/// Apply detail-page overrides to a weapon and recompute derived metrics.
/// Detail values always win over table values; absent fields keep the table
/// value. Images are only filled when still empty (the filter-table icon is
/// the more consistent source).
pub fn apply_weapon_detail(weapon: &mut Weapon, detail: &WeaponDetail) {
    if let Some(image) = &detail.image {
        if weapon.imgs.weapon.is_empty() {
            weapon.imgs.weapon = image.clone();
        }
    }
    if let Some(weapon_type) = &detail.weapon_type {
        if weapon.weapon_type.is_empty() || weapon.weapon_type == "Unknown" {
            weapon.weapon_type = weapon_type.clone();
        }
    }
    if let Some(damage_body) = detail.damage_body {
        weapon.stats.damage_body = damage_body;
    }
    if let Some(damage_head) = detail.damage_head {
        weapon.stats.damage_head = damage_head;
    }
    if let Some(fire_rate) = detail.fire_rate {
        weapon.stats.fire_rate = fire_rate;
    }
    if let Some(mag_capacity) = detail.mag_capacity {
        weapon.stats.mag_capacity = mag_capacity;
    }
    if let Some(reload_time) = detail.reload_time {
        weapon.stats.reload_time = reload_time;
    }
    if let Some(range) = detail.range {
        weapon.stats.range = range;
    }
    if detail.damage_falloff.is_some() {
        weapon.damage_falloff = detail.damage_falloff.clone();
    }
    if detail.body_part_multipliers.is_some() {
        weapon.body_part_multipliers = detail.body_part_multipliers.clone();
    }
    // Invariant: computed never survives a stats update without recomputation.
    weapon.computed = compute_derived(&weapon.stats);
}

/// Field values scraped from a per-character detail page.
#[derive(Debug, Clone, Default)]
pub struct CharacterDetail {
    pub faction: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub portrait: Option<String>,
    pub stats: Option<CharacterStats>,
    pub abilities: Vec<crate::data::character::Ability>,
}

/// Fold detail-page fields into a character record. Faction and role go
/// through the display-label translation with untranslated fallback; the
/// portrait falls back to the icon; stats are always emitted in full once the
/// detail pass has run.
pub fn apply_character_detail(character: &mut Character, detail: &CharacterDetail) {
    if let Some(faction) = &detail.faction {
        character.faction = Some(names::faction_label(faction));
    } else if character.faction.is_none() {
        character.faction = Some(names::faction_for(&character.id).to_string());
    }
    if let Some(role) = &detail.role {
        character.role = Some(names::role_label(role));
    }
    if let Some(bio) = &detail.bio {
        if !bio.is_empty() {
            character.bio = Some(bio.clone());
        }
    }
    let portrait = detail
        .portrait
        .clone()
        .filter(|url| !url.is_empty())
        .or_else(|| (!character.icon.is_empty()).then(|| character.icon.clone()));
    character.images = Some(CharacterImages {
        full: portrait.clone(),
        portrait,
    });
    character.stats = Some(detail.stats.clone().unwrap_or_default());
    if !detail.abilities.is_empty() {
        character.abilities = Some(detail.abilities.clone());
    }
}

fn first_non_empty<'a>(candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}
