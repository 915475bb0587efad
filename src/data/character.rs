//! Character schema. Base crawl emits only id/name/icon; the detail filler
//! adds faction, role, bio, stats and abilities from per-character wiki pages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CHARACTER_HP: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Canonical slug (e.g. "galatea").
    pub id: String,
    /// Display name (Chinese).
    pub name: String,
    /// Icon image URL (full resolution).
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "wikiUrl", default, skip_serializing_if = "Option::is_none")]
    pub wiki_url: Option<String>,
    /// Translated faction label, or the untranslated source value, or "Unknown".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<CharacterImages>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<CharacterStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Vec<Ability>>,
}

impl Character {
    /// Minimal record as produced by the base crawl.
    pub fn stub(id: String, name: String, icon: String) -> Character {
        Character {
            id,
            name,
            icon,
            wiki_url: None,
            faction: None,
            role: None,
            bio: None,
            images: None,
            stats: None,
            abilities: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterImages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
    /// Full-body artwork; falls back to `icon` when unresolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
}

/// Always all three fields, never partial. Defaults when unscraped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterStats {
    #[serde(default)]
    pub hp: u32,
    #[serde(default)]
    pub armor: u32,
    #[serde(default)]
    pub mobility: u32,
}

impl Default for CharacterStats {
    fn default() -> Self {
        CharacterStats {
            hp: DEFAULT_CHARACTER_HP,
            armor: 0,
            mobility: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    Passive,
    Active,
    Ultimate,
    Weapon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AbilityKind,
    #[serde(default)]
    pub description: String,
    /// Free-form labelled values, e.g. { "冷却": "15s" }.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
