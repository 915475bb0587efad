//! Extractor for per-character wiki pages: infobox fields, bio, abilities and
//! full-body artwork.
//!
//! Pages differ in layout, so bio and portrait extraction run through an
//! ordered list of named strategies, each tried in sequence; the first
//! non-empty result wins. The order is the documented precedence.

use scraper::{ElementRef, Html};

use crate::data::character::{Ability, AbilityKind, CharacterStats};
use crate::data::merge::CharacterDetail;
use crate::scrape::html::{element_text, full_resolution_url, leading_int, selector};

/// Section headings tried for the bio, most specific first.
const BIO_STRATEGIES: &[(&str, &str)] = &[
    ("intro-section", "角色简介"),
    ("background-section", "背景故事"),
    ("profile-section", "简介"),
];

/// Section headings tried for the ability list.
const ABILITY_STRATEGIES: &[(&str, &str)] = &[
    ("skill-section", "角色技能"),
    ("skill-short-section", "技能"),
];

/// `alt`/`src` markers tried for the full-body artwork, in precedence order.
const PORTRAIT_MARKERS: &[&str] = &["立绘", "全身"];

const SIBLING_SCAN_LIMIT: usize = 25;

/// Parse a character detail page. Every field is best-effort: a missing
/// section leaves the corresponding field at its default.
pub fn extract_character_detail(html: &str) -> CharacterDetail {
    let document = Html::parse_document(html);

    let mut detail = CharacterDetail {
        stats: Some(infobox_stats(&document)),
        ..CharacterDetail::default()
    };
    detail.faction = infobox_value(&document, "阵营");
    detail.role = infobox_value(&document, "定位").or_else(|| infobox_value(&document, "职业"));

    for (_, heading) in BIO_STRATEGIES {
        if let Some(bio) = section_text(&document, heading) {
            detail.bio = Some(bio);
            break;
        }
    }

    for (_, heading) in ABILITY_STRATEGIES {
        let abilities = section_abilities(&document, heading);
        if !abilities.is_empty() {
            detail.abilities = abilities;
            break;
        }
    }

    detail.portrait = portrait_url(&document);
    detail
}

/// Value cell for an infobox row whose header contains `label`.
fn infobox_value(document: &Html, label: &str) -> Option<String> {
    let header_sel = selector("th")?;
    for header in document.select(&header_sel) {
        if !element_text(header).contains(label) {
            continue;
        }
        let value = header
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name() == "td")
            .map(element_text)?;
        if !value.is_empty() {
            return Some(value);
        }
    }
    None
}

/// {hp, armor, mobility} from infobox rows. Always all three; hp defaults to
/// 100 when unscraped, the others to 0.
fn infobox_stats(document: &Html) -> CharacterStats {
    let mut stats = CharacterStats::default();
    if let Some(raw) = infobox_value(document, "生命") {
        let hp = leading_int(&raw);
        if hp > 0 {
            stats.hp = hp;
        }
    }
    if let Some(raw) = infobox_value(document, "护甲") {
        stats.armor = leading_int(&raw);
    }
    if let Some(raw) = infobox_value(document, "移速").or_else(|| infobox_value(document, "机动")) {
        stats.mobility = leading_int(&raw);
    }
    stats
}

/// Concatenated paragraph text below the heading, up to the next h2/h3.
fn section_text(document: &Html, heading_title: &str) -> Option<String> {
    let heading = find_heading(document, heading_title)?;
    let mut lines = Vec::new();
    for sibling in siblings_until_heading(heading) {
        let text = element_text(sibling);
        if !text.is_empty() {
            lines.push(text);
        }
    }
    let joined = lines.join("\n");
    if joined.trim().is_empty() {
        None
    } else {
        Some(joined.trim().to_string())
    }
}

/// Abilities listed as h4/h5 (or bold) titles under the skill heading, each
/// followed by its description text. The kind is classified from marker
/// substrings in the title.
fn section_abilities(document: &Html, heading_title: &str) -> Vec<Ability> {
    let Some(heading) = find_heading(document, heading_title) else {
        return Vec::new();
    };
    let (Some(title_sel), Some(img_sel)) = (selector("h4, h5, b"), selector("img")) else {
        return Vec::new();
    };

    let mut abilities: Vec<Ability> = Vec::new();
    for sibling in siblings_until_heading(heading) {
        let titles: Vec<ElementRef<'_>> = if matches!(sibling.value().name(), "h4" | "h5") {
            vec![sibling]
        } else {
            sibling.select(&title_sel).collect()
        };

        for title in titles {
            let name = element_text(title);
            if name.is_empty() {
                continue;
            }
            let description = description_after(title);
            let image = title
                .select(&img_sel)
                .next()
                .and_then(|img| img.value().attr("src"))
                .map(full_resolution_url);
            abilities.push(Ability {
                kind: classify_ability(&name),
                name,
                description,
                stats: None,
                image,
            });
        }
    }
    abilities
}

/// Marker-substring classification, in precedence order.
fn classify_ability(title: &str) -> AbilityKind {
    if title.contains("被动") {
        AbilityKind::Passive
    } else if title.contains("大招") || title.contains("终极") || title.contains("觉醒") {
        AbilityKind::Ultimate
    } else if title.contains("武器") {
        AbilityKind::Weapon
    } else {
        AbilityKind::Active
    }
}

/// Text of the next non-empty sibling after an ability title.
fn description_after(title: ElementRef<'_>) -> String {
    for node in title.next_siblings() {
        if let Some(element) = ElementRef::wrap(node) {
            let tag = element.value().name();
            if matches!(tag, "h2" | "h3" | "h4" | "h5") {
                break;
            }
            let text = element_text(element);
            if !text.is_empty() {
                return text;
            }
        } else if let Some(text) = node.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    String::new()
}

fn portrait_url(document: &Html) -> Option<String> {
    let img_sel = selector("img")?;
    for marker in PORTRAIT_MARKERS {
        for img in document.select(&img_sel) {
            let alt = img.value().attr("alt").unwrap_or("");
            let src = img.value().attr("src").unwrap_or("");
            if alt.contains(marker) || src.contains(marker) {
                return Some(full_resolution_url(src));
            }
        }
    }
    None
}

fn find_heading<'a>(document: &'a Html, title: &str) -> Option<ElementRef<'a>> {
    let heading_sel = selector("h2, h3")?;
    document
        .select(&heading_sel)
        .find(|heading| element_text(*heading).contains(title))
}

fn siblings_until_heading(heading: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut out = Vec::new();
    for node in heading.next_siblings() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if matches!(element.value().name(), "h2" | "h3") {
            break;
        }
        out.push(element);
        if out.len() >= SIBLING_SCAN_LIMIT {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<table class=\"wikitable\">\
         <tr><th>阵营</th><td>剪刀手</td></tr>\
         <tr><th>定位</th><td>决斗</td></tr>\
         <tr><th>生命值</th><td>120</td></tr>\
         <tr><th>护甲</th><td>50</td></tr>\
         <tr><th>移速</th><td>310</td></tr>\
         </table>\
         <h2><span>角色简介</span></h2><p>来自剪刀手的角色。</p>\
         <h2><span>角色技能</span></h2>\
         <h4>被动·余烬</h4><p>持续恢复。</p>\
         <h4>战术闪现</h4><p>短距离位移。</p>\
         <h4>大招·焚天</h4><p>范围爆发。</p>\
         <h2>其他</h2>";

    #[test]
    fn infobox_fields_are_extracted() {
        let detail = extract_character_detail(PAGE);
        assert_eq!(detail.faction.as_deref(), Some("剪刀手"));
        assert_eq!(detail.role.as_deref(), Some("决斗"));
        let stats = detail.stats.unwrap();
        assert_eq!(stats.hp, 120);
        assert_eq!(stats.armor, 50);
        assert_eq!(stats.mobility, 310);
    }

    #[test]
    fn bio_comes_from_first_matching_section() {
        let detail = extract_character_detail(PAGE);
        assert_eq!(detail.bio.as_deref(), Some("来自剪刀手的角色。"));
    }

    #[test]
    fn abilities_are_classified_by_markers() {
        let detail = extract_character_detail(PAGE);
        let kinds: Vec<AbilityKind> = detail.abilities.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![AbilityKind::Passive, AbilityKind::Active, AbilityKind::Ultimate]
        );
        assert_eq!(detail.abilities[0].description, "持续恢复。");
    }

    #[test]
    fn empty_page_defaults_everything() {
        let detail = extract_character_detail("<html><body></body></html>");
        assert!(detail.faction.is_none());
        assert!(detail.bio.is_none());
        assert!(detail.abilities.is_empty());
        assert_eq!(detail.stats.unwrap().hp, 100);
    }
}
