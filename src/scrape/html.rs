//! Shared helpers for the markup extractors: defensive numeric parsing,
//! thumbnail URL normalization and the multi-format name-cell split.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

fn leading_int_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)").expect("leading-int regex"))
}

fn leading_float_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+(?:\.\d+)?)").expect("leading-float regex"))
}

/// Leading integer of a raw cell value, tolerating trailing units ("695转/分").
/// Zero on no match, never an error.
pub fn leading_int(raw: &str) -> u32 {
    leading_int_re()
        .captures(raw.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Leading float of a raw cell value ("2.0s" -> 2.0). Zero on no match.
pub fn leading_float(raw: &str) -> f64 {
    leading_float_re()
        .captures(raw.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// Decompose a damage cell into (base value, pellet count).
/// `"12x8"` is 12 damage per pellet, 8 pellets. The pellet count is returned
/// for reference but deliberately not multiplied into the stored base damage;
/// the source data leaves that question open and we preserve the simplification.
pub fn decompose_damage(raw: &str) -> (f64, u32) {
    let trimmed = raw.trim();
    match trimmed.split_once(['x', 'X', '×']) {
        Some((base, pellets)) => {
            let count = leading_int(pellets);
            (leading_float(base), if count == 0 { 1 } else { count })
        }
        None => (leading_float(trimmed), 1),
    }
}

/// Rewrite a MediaWiki thumbnail URL to its full-resolution form: drop the
/// `/thumb` path segment and the size-specific final component.
/// `.../thumb/1/1b/X.png/40px-X.png` -> `.../1/1b/X.png`
pub fn full_resolution_url(url: &str) -> String {
    if !url.contains("/thumb/") {
        return url.to_string();
    }
    let without_thumb = url.replacen("/thumb", "", 1);
    match without_thumb.rfind('/') {
        Some(index) => without_thumb[..index].to_string(),
        None => without_thumb,
    }
}

/// Character/weapon pair split from a table name cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameCell {
    pub character: String,
    pub weapon: String,
}

/// Split a name cell that may be `"角色：武器"`, `"角色\n武器"` or bare text.
/// Bare text goes through suffix-stripping (icon/file-name remnants) and
/// yields no weapon name.
pub fn split_name_cell(full_text: &str, raw_fallback: &str) -> NameCell {
    let full_text = full_text.trim();
    if let Some((character, weapon)) = full_text.split_once('：') {
        return NameCell {
            character: character.trim().to_string(),
            weapon: weapon.trim().to_string(),
        };
    }
    if full_text.contains('\n') {
        let parts: Vec<&str> = full_text
            .split('\n')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if parts.len() >= 2 {
            return NameCell {
                character: parts[0].to_string(),
                weapon: parts[1].to_string(),
            };
        }
    }
    NameCell {
        character: strip_name_suffixes(raw_fallback),
        weapon: String::new(),
    }
}

/// Strip literal tokens left over from icon file names: the `头像` suffix,
/// `.png` remnants, interpuncts and spaces.
pub fn strip_name_suffixes(raw: &str) -> String {
    raw.replace("头像", "")
        .replace(".png", "")
        .chars()
        .filter(|ch| *ch != '·' && !ch.is_whitespace())
        .collect()
}

/// Concatenated text content of an element, trimmed.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parse a static selector, logging and degrading on failure so extractors
/// can fall back to empty output instead of panicking.
pub fn selector(raw: &'static str) -> Option<Selector> {
    match Selector::parse(raw) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            eprintln!("scrape: bad selector '{raw}': {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_numbers_tolerate_annotations() {
        assert_eq!(leading_int("695转/分"), 695);
        assert_eq!(leading_int("30发"), 30);
        assert_eq!(leading_int(""), 0);
        assert_eq!(leading_int("满"), 0);
        assert_eq!(leading_float("2.0s"), 2.0);
        assert_eq!(leading_float("50m"), 50.0);
        assert_eq!(leading_float("n/a"), 0.0);
    }

    #[test]
    fn pellet_notation_keeps_base_damage() {
        assert_eq!(decompose_damage("12x8"), (12.0, 8));
        assert_eq!(decompose_damage("25"), (25.0, 1));
        assert_eq!(decompose_damage("9.5x6(每颗)"), (9.5, 6));
    }

    #[test]
    fn thumbnail_urls_lose_thumb_segment_and_filename() {
        let thumb =
            "https://patchwiki.biligame.com/images/klbq/thumb/1/1b/abcdef.png/40px-abcdef.png";
        assert_eq!(
            full_resolution_url(thumb),
            "https://patchwiki.biligame.com/images/klbq/1/1b/abcdef.png"
        );
        // Full-size URLs pass through untouched.
        let full = "https://patchwiki.biligame.com/images/klbq/1/1b/abcdef.png";
        assert_eq!(full_resolution_url(full), full);
    }

    #[test]
    fn name_cell_colon_format() {
        let cell = split_name_cell("芙拉薇娅：独舞", "芙拉薇娅：独舞");
        assert_eq!(cell.character, "芙拉薇娅");
        assert_eq!(cell.weapon, "独舞");
    }

    #[test]
    fn name_cell_newline_format() {
        let cell = split_name_cell("芙拉薇娅\n独舞", "芙拉薇娅\n独舞");
        assert_eq!(cell.character, "芙拉薇娅");
        assert_eq!(cell.weapon, "独舞");
    }

    #[test]
    fn name_cell_bare_text_strips_icon_suffix() {
        let cell = split_name_cell("", "米雪儿·李头像.png");
        assert_eq!(cell.character, "米雪儿李");
        assert_eq!(cell.weapon, "");
    }
}
