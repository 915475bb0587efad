//! Static lookup tables and the display-name -> canonical-slug reconciler.
//! Joins across scrape sources happen on these slugs, so every table lives
//! here rather than inline in the extractors.

use percent_encoding::percent_decode_str;

/// Character display name -> canonical slug. Names are stored without the
/// `·` interpunct; [canonical_character_id] strips it before lookup.
pub const CHARACTER_IDS: &[(&str, &str)] = &[
    ("香奈美", "kanami"),
    ("珐格兰丝", "fragrans"),
    ("芙拉薇娅", "flavia"),
    ("绯莎", "fuchsia"),
    ("拉薇", "lawine"),
    ("艾卡", "eika"),
    ("明", "ming"),
    ("忧雾", "yugiri"),
    ("梅瑞狄斯", "meredith"),
    ("米雪儿", "michelle"),
    ("蕾欧娜", "leona"),
    ("奥黛丽", "audrey"),
    ("心夏", "kokona"),
    ("千代", "chiyo"),
    ("令", "reiichi"),
    ("加拉蒂亚", "galatea"),
    ("玛德蕾娜", "madalena"),
    ("信", "nobunaga"),
    ("玛拉", "mara"),
    ("星绘", "celestia"),
    ("白墨", "baimo"),
    ("伊薇特", "yvette"),
];

/// Known aliasing bugs in the source data, applied before slug lookup.
/// These are data-specific patches, kept as an explicit auditable list: the
/// wiki sometimes writes full names (family name appended) for characters its
/// own tables elsewhere list by given name only.
pub const ALIAS_CORRECTIONS: &[(&str, &str)] = &[
    ("米雪儿李", "米雪儿"),
    ("奥黛丽格罗夫", "奥黛丽"),
    ("加拉蒂亚利里", "加拉蒂亚"),
    ("玛德蕾娜利里", "玛德蕾娜"),
];

/// Weapon display name -> canonical slug.
pub const WEAPON_IDS: &[(&str, &str)] = &[
    ("独舞", "solo_dance"),
    ("幻霜", "phantom_frost"),
    ("夜镰", "night_scythe"),
    ("谢幕曲", "curtain_call"),
    ("空境", "ethereal"),
    ("枫鸣", "maple_hum"),
    ("破晓", "dawn"),
    ("彩绘", "painted"),
    ("审判官", "inquisitor"),
    ("逆焰", "backfire"),
    ("警探", "investigator"),
    ("影袭", "shadow_raid"),
    ("欺诈师", "trickster"),
    ("绽放", "bloom"),
    ("隼", "falcon"),
    ("绝对执行", "absolute_execution"),
    ("齿锋", "sharp_fang"),
    ("北极星", "polaris"),
    ("卫冕", "defender"),
    ("校准仪", "calibrator"),
    ("自由意志", "free_will"),
    ("鸣火", "blazing_fire"),
];

/// Character slug -> faction display label. Explicit enumerated mapping used
/// by the presentation read contract; unmapped slugs are "Unknown".
pub const FACTIONS: &[(&str, &str)] = &[
    ("kokona", "The Scissors"),
    ("ming", "The Scissors"),
    ("kanami", "The Scissors"),
    ("yugiri", "The Scissors"),
    ("yvette", "The Scissors"),
    ("baimo", "The Scissors"),
    ("meredith", "Urbino"),
    ("fragrans", "Urbino"),
    ("chiyo", "Urbino"),
    ("eika", "Urbino"),
    ("michelle", "Urbino"),
    ("flavia", "Urbino"),
    ("audrey", "Opal"),
    ("fuchsia", "Opal"),
    ("lawine", "Opal"),
    ("reiichi", "Opal"),
    ("nobunaga", "Opal"),
    ("celestia", "Opal"),
    ("leona", "Opal"),
    ("madalena", "P.U.S"),
    ("galatea", "P.U.S"),
    ("mara", "P.U.S"),
];

/// Faction categorical value on the wiki -> dashboard display label.
pub const FACTION_LABELS: &[(&str, &str)] = &[
    ("剪刀手", "The Scissors"),
    ("欧泊", "Opal"),
    ("乌尔比诺", "Urbino"),
    ("公共安全部", "P.U.S"),
];

/// Role categorical value on the wiki -> dashboard display label.
pub const ROLE_LABELS: &[(&str, &str)] = &[
    ("决斗", "Duelist"),
    ("先锋", "Vanguard"),
    ("守护", "Guardian"),
    ("支援", "Support"),
    ("控场", "Controller"),
];

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Strip the interpunct and whitespace, then apply alias corrections.
fn clean_character_name(display: &str) -> String {
    let cleaned: String = display
        .trim()
        .chars()
        .filter(|ch| *ch != '·' && !ch.is_whitespace())
        .collect();
    for (alias, canonical) in ALIAS_CORRECTIONS {
        if cleaned == *alias {
            return (*canonical).to_string();
        }
    }
    cleaned
}

/// Map a character display name to its canonical slug.
/// Exact lookup, then substring-containment fuzzy match, then the cleaned name
/// itself as a pseudo-identifier (warned; accepted data-quality gap).
pub fn canonical_character_id(display: &str) -> String {
    let cleaned = clean_character_name(display);
    if cleaned.is_empty() {
        return cleaned;
    }
    if let Some((_, slug)) = CHARACTER_IDS.iter().find(|(name, _)| *name == cleaned) {
        return (*slug).to_string();
    }
    // First table key contained in the cleaned name (or vice versa) wins.
    if let Some((_, slug)) = CHARACTER_IDS
        .iter()
        .find(|(name, _)| cleaned.contains(name) || name.contains(cleaned.as_str()))
    {
        return (*slug).to_string();
    }
    eprintln!("names: no slug for character '{display}', using raw name");
    cleaned
}

/// Map a weapon display name to its canonical slug. Unmapped names get a
/// random `unknown_*` pseudo-slug so the record is still emitted.
pub fn weapon_id(display: &str) -> String {
    let trimmed = display.trim();
    if let Some((_, slug)) = WEAPON_IDS.iter().find(|(name, _)| *name == trimmed) {
        return (*slug).to_string();
    }
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    eprintln!("names: no slug for weapon '{trimmed}', using random fallback");
    format!("unknown_{}", &suffix[..5])
}

/// Stable synthetic slug for entities added from routes before any slug
/// mapping exists: hex of the name bytes, truncated.
pub fn synthetic_id(display: &str) -> String {
    let hex: String = display
        .bytes()
        .map(|b| format!("{b:02x}"))
        .collect::<String>()
        .chars()
        .take(8)
        .collect();
    format!("id_{hex}")
}

/// Faction display label for a character slug, "Unknown" when unmapped.
pub fn faction_for(character_id: &str) -> &'static str {
    let lower = character_id.to_lowercase();
    FACTIONS
        .iter()
        .find(|(slug, _)| *slug == lower)
        .map(|(_, faction)| *faction)
        .unwrap_or(UNKNOWN_LABEL)
}

/// Translate a wiki faction value; falls back to the untranslated source value.
pub fn faction_label(raw: &str) -> String {
    translate(FACTION_LABELS, raw)
}

/// Translate a wiki role value; falls back to the untranslated source value.
pub fn role_label(raw: &str) -> String {
    translate(ROLE_LABELS, raw)
}

fn translate(table: &[(&str, &str)], raw: &str) -> String {
    let trimmed = raw.trim();
    table
        .iter()
        .find(|(cn, _)| trimmed.contains(cn))
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| {
            if trimmed.is_empty() {
                UNKNOWN_LABEL.to_string()
            } else {
                trimmed.to_string()
            }
        })
}

/// Percent-decode a wiki href for name extraction (e.g. `文件:...头像` links).
pub fn decode_wiki_href(href: &str) -> String {
    percent_decode_str(href)
        .decode_utf8()
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_lookup_resolves_slug() {
        assert_eq!(canonical_character_id("香奈美"), "kanami");
    }

    #[test]
    fn interpunct_is_stripped_before_lookup() {
        assert_eq!(canonical_character_id("米雪儿·李"), "michelle");
        assert_eq!(canonical_character_id(" 加拉蒂亚 "), "galatea");
    }

    #[test]
    fn alias_correction_matches_short_form() {
        assert_eq!(
            canonical_character_id("加拉蒂亚利里"),
            canonical_character_id("加拉蒂亚")
        );
        assert_eq!(canonical_character_id("加拉蒂亚利里"), "galatea");
    }

    #[test]
    fn fuzzy_match_accepts_containment() {
        // Suffixed name not in the alias table still resolves via containment.
        assert_eq!(canonical_character_id("蕾欧娜（新）"), "leona");
    }

    #[test]
    fn unmapped_name_falls_back_to_cleaned_raw() {
        assert_eq!(canonical_character_id("不存在的角色"), "不存在的角色");
    }

    #[test]
    fn weapon_fallback_gets_unknown_prefix() {
        assert_eq!(weapon_id("独舞"), "solo_dance");
        let fallback = weapon_id("没有这把枪");
        assert!(fallback.starts_with("unknown_"));
        assert_eq!(fallback.len(), "unknown_".len() + 5);
    }

    #[test]
    fn faction_lookup_defaults_to_unknown() {
        assert_eq!(faction_for("galatea"), "P.U.S");
        assert_eq!(faction_for("GALATEA"), "P.U.S");
        assert_eq!(faction_for("nobody"), "Unknown");
    }

    #[test]
    fn labels_fall_back_to_source_value() {
        assert_eq!(faction_label("剪刀手"), "The Scissors");
        assert_eq!(faction_label("未知阵营"), "未知阵营");
        assert_eq!(role_label(""), "Unknown");
    }

    #[test]
    fn synthetic_id_is_stable() {
        assert_eq!(synthetic_id("察"), synthetic_id("察"));
        assert!(synthetic_id("察").starts_with("id_"));
    }

    #[test]
    fn wiki_href_decodes_percent_escapes() {
        let href = "/klbq/%E6%96%87%E4%BB%B6:%E5%AF%9F%E5%A4%B4%E5%83%8F.png";
        assert_eq!(decode_wiki_href(href), "/klbq/文件:察头像.png");
    }
}
