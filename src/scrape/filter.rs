//! Extractor for the weapon filter table (qualitative 0-100 handling scores).

use std::collections::HashMap;

use scraper::{ElementRef, Html};

use crate::data::merge::FilterRecord;
use crate::data::names;
use crate::data::weapon::WeaponAttributes;
use crate::scrape::html::{element_text, full_resolution_url, leading_int, selector};

/// Data rows carry at least this many columns.
pub const MIN_FILTER_COLUMNS: usize = 10;

const COL_NAME: usize = 0;
const COL_TYPE: usize = 1;
const COL_AIM_SPEED: usize = 3;
const COL_ACCURACY: usize = 4;
const COL_HANDLING: usize = 5;
const COL_RELOAD_SPEED: usize = 7;
const COL_CHARGE_SPEED: usize = 8;
const COL_FIRE_MODE: usize = 9;
const COL_ZOOM_SCALE: usize = 10;
const COL_MOVE_SPEED: usize = 11;

/// Parse the filter table into per-character records keyed by canonical slug.
pub fn extract_filter(html: &str) -> HashMap<String, FilterRecord> {
    let document = Html::parse_document(html);
    let (Some(table_sel), Some(row_sel)) = (selector(".select-table"), selector("tr")) else {
        return HashMap::new();
    };

    let Some(table) = document.select(&table_sel).next() else {
        eprintln!("filter: no .select-table found on page");
        return HashMap::new();
    };

    let mut records = HashMap::new();
    for row in table.select(&row_sel) {
        if let Some((key, record)) = scan_row(row) {
            records.insert(key, record);
        }
    }
    records
}

fn scan_row(row: ElementRef<'_>) -> Option<(String, FilterRecord)> {
    let cell_sel = selector("td")?;
    let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
    if cells.len() < MIN_FILTER_COLUMNS {
        return None;
    }

    let raw_name = element_text(cells[COL_NAME]);
    // Usually "角色：武器"; otherwise assume "角色-..." or bare character name.
    let (character, weapon_name) = match raw_name.split_once('：') {
        Some((character, weapon)) => (character.trim().to_string(), weapon.trim().to_string()),
        None => (
            raw_name.split('-').next().unwrap_or("").trim().to_string(),
            String::new(),
        ),
    };
    if character.is_empty() {
        return None;
    }

    let attributes = WeaponAttributes {
        aim_speed: leading_int(&element_text(cells[COL_AIM_SPEED])),
        accuracy: leading_int(&element_text(cells[COL_ACCURACY])),
        handling: leading_int(&element_text(cells[COL_HANDLING])),
        reload_speed: leading_int(&element_text(cells[COL_RELOAD_SPEED])),
        charge_speed: leading_int(&element_text(cells[COL_CHARGE_SPEED])),
        fire_mode: element_text(cells[COL_FIRE_MODE]),
        zoom_scale: cells
            .get(COL_ZOOM_SCALE)
            .map(|cell| element_text(*cell))
            .unwrap_or_default(),
        move_speed: cells
            .get(COL_MOVE_SPEED)
            .map(|cell| leading_int(&element_text(*cell)))
            .unwrap_or(0),
    };

    let record = FilterRecord {
        character: character.clone(),
        weapon_name,
        weapon_type: element_text(cells[COL_TYPE]),
        image_url: image_url(cells[COL_NAME]),
        attributes,
    };
    Some((names::canonical_character_id(&character), record))
}

fn image_url(cell: ElementRef<'_>) -> String {
    let Some(img_sel) = selector("img") else {
        return String::new();
    };
    cell.select(&img_sel)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(full_resolution_url)
        .unwrap_or_default()
}
