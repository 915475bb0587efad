//! Extractor for per-weapon wiki pages: infobox base-stat overrides, the
//! weapon image, a category heuristic, and the optional damage-falloff and
//! body-part-multiplier tables.

use std::collections::BTreeMap;

use scraper::{ElementRef, Html};

use crate::data::merge::WeaponDetail;
use crate::data::weapon::{BodyPartMultipliers, FalloffDamage};
use crate::scrape::html::{element_text, full_resolution_url, leading_float, leading_int, selector};

/// Category keywords probed in the page's meta description when the table
/// scrape left the type unknown. First match wins.
const TYPE_HEURISTICS: &[(&[&str], &str)] = &[
    (&["突击步枪", "自动步枪"], "自动步枪"),
    (&["冲锋枪"], "冲锋枪"),
    (&["狙击"], "狙击枪"),
    (&["霰弹", "喷子"], "霰弹枪"),
    (&["机枪"], "轻机枪"),
    (&["手枪"], "手枪"),
];

/// Parse a weapon detail page. Absent labels leave fields at None so the
/// merger keeps table-scraped values.
pub fn extract_weapon_detail(html: &str) -> WeaponDetail {
    let document = Html::parse_document(html);

    let mut detail = WeaponDetail {
        image: first_image(&document),
        weapon_type: type_from_description(&document),
        ..WeaponDetail::default()
    };

    scan_stat_labels(&document, &mut detail);
    detail.damage_falloff = falloff_table(&document);
    detail.body_part_multipliers = body_part_multipliers(&document);
    detail
}

/// First image in the stat table, falling back to the tab container.
fn first_image(document: &Html) -> Option<String> {
    for raw in [".wikitable img", ".resp-tabs-container img"] {
        let sel = selector(raw)?;
        if let Some(src) = document
            .select(&sel)
            .next()
            .and_then(|img| img.value().attr("src"))
        {
            return Some(full_resolution_url(src));
        }
    }
    None
}

/// Walk every `th` and match its label text; the value is the adjacent `td`.
/// A damage value formatted "25/37" is body/head.
fn scan_stat_labels(document: &Html, detail: &mut WeaponDetail) {
    let Some(header_sel) = selector("th") else {
        return;
    };
    for header in document.select(&header_sel) {
        let label = element_text(header);
        let Some(value) = adjacent_cell_text(header) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        if label.contains("伤害") {
            match value.split_once('/') {
                Some((body, head)) => {
                    detail.damage_body = Some(leading_float(body));
                    detail.damage_head = Some(leading_float(head));
                }
                None => detail.damage_body = Some(leading_float(&value)),
            }
        } else if label.contains("射速") {
            detail.fire_rate = Some(leading_int(&value));
        } else if label.contains("弹匣") {
            detail.mag_capacity = Some(leading_int(&value));
        } else if label.contains("换弹") {
            detail.reload_time = Some(leading_float(&value));
        } else if label.contains("射程") {
            detail.range = Some(leading_int(&value));
        }
    }
}

fn adjacent_cell_text(header: ElementRef<'_>) -> Option<String> {
    header
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "td")
        .map(element_text)
}

fn type_from_description(document: &Html) -> Option<String> {
    let meta_sel = selector("meta[name=\"description\"]")?;
    let content = document
        .select(&meta_sel)
        .next()
        .and_then(|meta| meta.value().attr("content"))?;
    for (keywords, category) in TYPE_HEURISTICS {
        if keywords.iter().any(|keyword| content.contains(keyword)) {
            return Some((*category).to_string());
        }
    }
    None
}

/// Distance-banded damage table: a wikitable whose header row mentions 距离,
/// with rows of `band | head | body | legs`. Only bands actually present are
/// emitted.
fn falloff_table(document: &Html) -> Option<BTreeMap<String, FalloffDamage>> {
    let table_sel = selector("table.wikitable")?;
    let row_sel = selector("tr")?;
    let header_sel = selector("th")?;
    let cell_sel = selector("td")?;

    for table in document.select(&table_sel) {
        let mentions_distance = table
            .select(&header_sel)
            .any(|header| element_text(header).contains("距离"));
        if !mentions_distance {
            continue;
        }

        let mut bands = BTreeMap::new();
        for row in table.select(&row_sel) {
            let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
            if cells.len() < 4 {
                continue;
            }
            let band = element_text(cells[0]);
            if band.is_empty() {
                continue;
            }
            bands.insert(
                band,
                FalloffDamage {
                    head: leading_float(&element_text(cells[1])),
                    body: leading_float(&element_text(cells[2])),
                    legs: leading_float(&element_text(cells[3])),
                },
            );
        }
        if !bands.is_empty() {
            return Some(bands);
        }
    }
    None
}

/// Per-body-part multipliers from labelled infobox rows ("头部倍率" etc).
fn body_part_multipliers(document: &Html) -> Option<BodyPartMultipliers> {
    let head = labelled_multiplier(document, "头部倍率");
    let chest = labelled_multiplier(document, "胸部倍率");
    let legs = labelled_multiplier(document, "腿部倍率");
    if head.is_none() && chest.is_none() && legs.is_none() {
        return None;
    }
    Some(BodyPartMultipliers {
        head: head.unwrap_or(1.0),
        chest: chest.unwrap_or(1.0),
        legs: legs.unwrap_or(1.0),
    })
}

fn labelled_multiplier(document: &Html, label: &str) -> Option<f64> {
    let header_sel = selector("th")?;
    for header in document.select(&header_sel) {
        if !element_text(header).contains(label) {
            continue;
        }
        let value = adjacent_cell_text(header)?;
        let parsed = leading_float(&value);
        if parsed > 0.0 {
            return Some(parsed);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<head><meta name=\"description\" content=\"独舞是一把突击步枪\"></head>\
         <body><table class=\"wikitable\">\
         <tr><th>伤害</th><td>25/37</td></tr>\
         <tr><th>射速</th><td>695</td></tr>\
         <tr><th>弹匣容量</th><td>30</td></tr>\
         <tr><th>换弹时间</th><td>2.1s</td></tr>\
         <tr><th>射程</th><td>50m</td></tr>\
         <tr><th>头部倍率</th><td>1.5x</td></tr>\
         <tr><th>胸部倍率</th><td>1.0x</td></tr>\
         <tr><th>腿部倍率</th><td>0.85x</td></tr>\
         </table>\
         <table class=\"wikitable\">\
         <tr><th>距离</th><th>头部</th><th>身体</th><th>腿部</th></tr>\
         <tr><td>0-10m</td><td>37</td><td>25</td><td>21</td></tr>\
         <tr><td>10-30m</td><td>33</td><td>22</td><td>18</td></tr>\
         </table></body>";

    #[test]
    fn stat_labels_fill_overrides() {
        let detail = extract_weapon_detail(PAGE);
        assert_eq!(detail.damage_body, Some(25.0));
        assert_eq!(detail.damage_head, Some(37.0));
        assert_eq!(detail.fire_rate, Some(695));
        assert_eq!(detail.mag_capacity, Some(30));
        assert_eq!(detail.reload_time, Some(2.1));
        assert_eq!(detail.range, Some(50));
    }

    #[test]
    fn type_heuristic_reads_meta_description() {
        let detail = extract_weapon_detail(PAGE);
        assert_eq!(detail.weapon_type.as_deref(), Some("自动步枪"));
    }

    #[test]
    fn falloff_bands_are_sparse() {
        let detail = extract_weapon_detail(PAGE);
        let falloff = detail.damage_falloff.expect("falloff table");
        assert_eq!(falloff.len(), 2);
        assert_eq!(falloff["0-10m"].body, 25.0);
        assert_eq!(falloff["10-30m"].legs, 18.0);
    }

    #[test]
    fn multipliers_come_from_labelled_rows() {
        let detail = extract_weapon_detail(PAGE);
        let multipliers = detail.body_part_multipliers.expect("multipliers");
        assert_eq!(multipliers.head, 1.5);
        assert_eq!(multipliers.legs, 0.85);
    }

    #[test]
    fn bare_page_yields_no_overrides() {
        let detail = extract_weapon_detail("<p>页面不存在</p>");
        assert_eq!(detail.damage_body, None);
        assert_eq!(detail.weapon_type, None);
        assert!(detail.damage_falloff.is_none());
        assert!(detail.body_part_multipliers.is_none());
    }
}
