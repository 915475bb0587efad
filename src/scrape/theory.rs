//! Extractor for the main-weapon theory table (quantitative base stats).
//!
//! The table is irregular: a row missing an explicit character name belongs to
//! the most recently named character (carry-forward), rows below the column
//! threshold are headers or merged-cell filler, and evolved/awakened variant
//! rows are excluded so only the base weapon is kept.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use crate::data::merge::TheoryRecord;
use crate::data::names;
use crate::data::weapon::WeaponStats;
use crate::scrape::html::{
    decompose_damage, element_text, full_resolution_url, leading_float, leading_int, selector,
    split_name_cell,
};

/// Full data rows carry at least this many columns; shorter rows are skipped.
pub const MIN_THEORY_COLUMNS: usize = 24;
/// Range is not present in the theory table; detail pages refine it later.
const DEFAULT_RANGE_M: u32 = 50;

const COL_STATUS: usize = 1;
const COL_DAMAGE_BODY: usize = 2;
const COL_MAG_CAPACITY: usize = 8;
const COL_FIRE_RATE: usize = 9;
const COL_DAMAGE_HEAD: usize = 21;

/// `文件:<名字>头像` pattern inside icon file hrefs.
fn icon_href_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"文件:(.*?)头像").expect("icon-href regex"))
}

/// Parse the first theory table into per-character records, keyed by canonical
/// character slug. Later rows for the same character overwrite earlier ones,
/// matching the source table order (base variant rows come first and variant
/// rows are filtered out anyway).
pub fn extract_theory(html: &str) -> HashMap<String, TheoryRecord> {
    let document = Html::parse_document(html);
    let (Some(table_sel), Some(row_sel)) = (selector(".klbqtable"), selector("tr")) else {
        return HashMap::new();
    };

    let Some(table) = document.select(&table_sel).next() else {
        eprintln!("theory: no .klbqtable found on page");
        return HashMap::new();
    };

    // Carry-forward state lives in the fold accumulator: one "last seen
    // character" per table, reset only here, never per row.
    let (records, _last) = table.select(&row_sel).skip(1).fold(
        (HashMap::new(), String::new()),
        |(mut records, last_character), row| {
            let carried = match scan_row(row, &last_character) {
                Some((character, record)) => {
                    records.insert(names::canonical_character_id(&character), record);
                    character
                }
                None => last_character,
            };
            (records, carried)
        },
    );
    records
}

/// One data row -> (owning character display name, record). None for header
/// rows, variant rows and rows with no attributable character.
fn scan_row(row: ElementRef<'_>, last_character: &str) -> Option<(String, TheoryRecord)> {
    let cell_sel = selector("td")?;
    let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
    if cells.len() < MIN_THEORY_COLUMNS {
        return None;
    }

    let full_text = element_text(cells[0]);
    let raw_name = if full_text.is_empty() {
        name_from_markup(cells[0])
    } else {
        full_text.clone()
    };
    let cell = split_name_cell(&full_text, &raw_name);

    // Blank leading cell inherits the nearest preceding named row.
    let character = if cell.character.is_empty() {
        if last_character.is_empty() {
            return None;
        }
        last_character.to_string()
    } else {
        cell.character
    };

    // Only the base variant is kept; evolved/awakened rows are excluded.
    let status = element_text(cells[COL_STATUS]);
    if !matches!(status.as_str(), "无" | "常规" | "")
        && (status.contains('-') || status.contains("三觉"))
    {
        return None;
    }

    let (damage_body, _pellets) = decompose_damage(&element_text(cells[COL_DAMAGE_BODY]));
    let stats = WeaponStats {
        damage_body,
        damage_head: leading_float(&element_text(cells[COL_DAMAGE_HEAD])),
        fire_rate: leading_int(&element_text(cells[COL_FIRE_RATE])),
        mag_capacity: leading_int(&element_text(cells[COL_MAG_CAPACITY])),
        reload_time: 0.0,
        range: DEFAULT_RANGE_M,
    };

    let record = TheoryRecord {
        character: character.clone(),
        weapon_name: cell.weapon,
        icon_url: icon_url(cells[0]),
        stats,
    };
    Some((character, record))
}

/// Name recovery for name cells with no text: image alt/title, link title,
/// then the `文件:` component of the icon href.
fn name_from_markup(cell: ElementRef<'_>) -> String {
    let img_sel = match selector("img") {
        Some(sel) => sel,
        None => return String::new(),
    };
    if let Some(img) = cell.select(&img_sel).next() {
        for attr in ["alt", "title"] {
            if let Some(value) = img.value().attr(attr) {
                if !value.trim().is_empty() {
                    return value.trim().to_string();
                }
            }
        }
    }
    let link_sel = match selector("a") {
        Some(sel) => sel,
        None => return String::new(),
    };
    if let Some(link) = cell.select(&link_sel).next() {
        if let Some(title) = link.value().attr("title") {
            if !title.trim().is_empty() {
                return title.trim().to_string();
            }
        }
        if let Some(href) = link.value().attr("href") {
            let decoded = names::decode_wiki_href(href);
            if let Some(caps) = icon_href_re().captures(&decoded) {
                return caps[1].to_string();
            }
        }
    }
    String::new()
}

fn icon_url(cell: ElementRef<'_>) -> String {
    let Some(img_sel) = selector("img") else {
        return String::new();
    };
    cell.select(&img_sel)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(full_resolution_url)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name_cell: &str, status: &str, damage: &str, mag: &str, rate: &str, head: &str) -> String {
        // 24 columns: indices 1 (status), 2 (body damage), 8 (mag), 9 (rate),
        // 21 (head damage) populated, the rest filler.
        let mut cells = vec!["".to_string(); MIN_THEORY_COLUMNS];
        cells[0] = name_cell.to_string();
        cells[COL_STATUS] = status.to_string();
        cells[COL_DAMAGE_BODY] = damage.to_string();
        cells[COL_MAG_CAPACITY] = mag.to_string();
        cells[COL_FIRE_RATE] = rate.to_string();
        cells[COL_DAMAGE_HEAD] = head.to_string();
        let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
        format!("<tr>{tds}</tr>")
    }

    fn table(rows: &[String]) -> String {
        format!(
            "<table class=\"klbqtable\"><tr><th>表头</th></tr>{}</table>",
            rows.concat()
        )
    }

    #[test]
    fn synthetic_row_parses_base_stats() {
        let html = table(&[row("芙拉薇娅：独舞", "无", "12x8", "30", "600", "18")]);
        let records = extract_theory(&html);
        let record = records.get("flavia").expect("flavia record");
        assert_eq!(record.weapon_name, "独舞");
        assert_eq!(record.stats.damage_body, 12.0);
        assert_eq!(record.stats.damage_head, 18.0);
        assert_eq!(record.stats.fire_rate, 600);
        assert_eq!(record.stats.mag_capacity, 30);
    }

    #[test]
    fn blank_name_row_inherits_previous_character() {
        let html = table(&[
            row("察：某枪", "无", "20", "12", "300", "30"),
            row("", "无", "25", "10", "240", "40"),
        ]);
        let records = extract_theory(&html);
        // Both rows attribute to 察; the later one wins.
        assert_eq!(records.len(), 1);
        let record = records.get("察").expect("carried-forward record");
        assert_eq!(record.character, "察");
        assert_eq!(record.stats.damage_body, 25.0);
    }

    #[test]
    fn evolved_variant_rows_are_excluded() {
        let html = table(&[
            row("芙拉薇娅：独舞", "无", "12", "30", "600", "18"),
            row("", "三觉", "99", "30", "600", "99"),
        ]);
        let records = extract_theory(&html);
        assert_eq!(records["flavia"].stats.damage_body, 12.0);
    }

    #[test]
    fn short_rows_are_silently_skipped() {
        let html = "<table class=\"klbqtable\">\
             <tr><th>表头</th></tr>\
             <tr><td>芙拉薇娅：独舞</td><td>无</td><td>12</td></tr>\
             </table>";
        assert!(extract_theory(html).is_empty());
    }

    #[test]
    fn missing_table_degrades_to_empty() {
        assert!(extract_theory("<html><body><p>维护中</p></body></html>").is_empty());
    }

    #[test]
    fn icon_thumbnail_is_normalized() {
        let name_cell = "<a href=\"/klbq/%E6%96%87%E4%BB%B6:%E5%AF%9F%E5%A4%B4%E5%83%8F.png\">\
             <img src=\"https://patchwiki.biligame.com/images/klbq/thumb/1/1b/cha.png/40px-cha.png\" \
             alt=\"察头像\"></a>";
        let html = table(&[row(name_cell, "无", "20", "12", "300", "30")]);
        let records = extract_theory(&html);
        let record = records.get("察").expect("record from markup name");
        assert_eq!(
            record.icon_url,
            "https://patchwiki.biligame.com/images/klbq/1/1b/cha.png"
        );
    }
}
