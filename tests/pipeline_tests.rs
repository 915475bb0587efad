//! End-to-end pipeline checks on synthetic wiki markup: extract both tables,
//! merge, write the document, read it back and validate.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use strinova_data::data::{
    apply_weapon_detail, characters_from_weapons, load_root_data, merge_weapons, validate_root,
    write_root_data, RootData,
};
use strinova_data::scrape::{
    extract_filter, extract_theory, extract_weapon_detail, load_routes, write_routes, Route,
    RouteMap,
};
use strinova_data::store::DataStore;

fn unique_temp_path(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("strinova-{name}-{stamp}.json"))
}

/// 24-column theory row matching the live table layout: name, status, body
/// damage, ..., mag (8), fire rate (9), ..., head damage (21).
fn theory_row(name_cell: &str, status: &str, damage: &str, mag: &str, rate: &str) -> String {
    let mut cells = vec![String::new(); 24];
    cells[0] = name_cell.to_string();
    cells[1] = status.to_string();
    cells[2] = damage.to_string();
    cells[8] = mag.to_string();
    cells[9] = rate.to_string();
    cells[21] = "18".to_string();
    let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
    format!("<tr>{tds}</tr>")
}

fn theory_page(rows: &[String]) -> String {
    format!(
        "<table class=\"klbqtable\"><tr><th>header</th></tr>{}</table>",
        rows.concat()
    )
}

fn filter_row(name_cell: &str, weapon_type: &str) -> String {
    let cells = [
        name_cell,
        weapon_type,
        "",
        "70",
        "65",
        "80",
        "",
        "55",
        "0",
        "自动",
        "1.25X",
        "95",
    ];
    let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
    format!("<tr>{tds}</tr>")
}

fn filter_page(rows: &[String]) -> String {
    format!("<table class=\"select-table\">{}</table>", rows.concat())
}

#[test]
fn tables_to_document_round_trip() {
    let theory_html = theory_page(&[theory_row("芙拉薇娅：独舞", "无", "12x8", "30", "600")]);
    let filter_html = filter_page(&[filter_row("芙拉薇娅：独舞", "自动步枪")]);

    let theory = extract_theory(&theory_html);
    let filter = extract_filter(&filter_html);
    assert_eq!(theory.len(), 1);
    assert_eq!(filter.len(), 1);

    let weapons = merge_weapons(&theory, &filter);
    assert_eq!(weapons.len(), 1);
    let weapon = &weapons[0];
    assert_eq!(weapon.name, "独舞");
    assert_eq!(weapon.character, "芙拉薇娅");
    assert_eq!(weapon.weapon_type, "自动步枪");
    assert_eq!(weapon.stats.damage_body, 12.0);
    assert_eq!(weapon.stats.mag_capacity, 30);
    // 600 rpm at 12 body damage is 120 dps.
    assert_eq!(weapon.computed.dps_body, 120.0);
    assert_eq!(weapon.attributes.move_speed, 95);

    let characters = characters_from_weapons(&weapons);
    assert_eq!(characters.len(), 1);
    assert_eq!(characters[0].id, "flavia");

    let root = RootData::new(weapons, characters);
    let path = unique_temp_path("round-trip");
    write_root_data(&path, &root).expect("document should write");
    let reloaded = load_root_data(&path).expect("document should reload");
    assert_eq!(reloaded, root);

    let report = validate_root(&reloaded);
    assert!(!report.has_errors(), "diagnostics: {:?}", report.diagnostics);

    std::fs::remove_file(&path).ok();
}

#[test]
fn carried_forward_rows_attribute_to_previous_character() {
    let theory_html = theory_page(&[
        theory_row("星绘：角斗士", "无", "20", "25", "500"),
        theory_row("", "无", "22", "25", "500"),
    ]);
    let theory = extract_theory(&theory_html);
    let record = theory.get("celestia").expect("celestia record");
    assert_eq!(record.character, "星绘");
    // The later nameless row overwrites the earlier one.
    assert_eq!(record.stats.damage_body, 22.0);
}

#[test]
fn detail_page_overrides_keep_computed_in_sync() {
    let theory_html = theory_page(&[theory_row("芙拉薇娅：独舞", "无", "12", "30", "600")]);
    let theory = extract_theory(&theory_html);
    let mut weapons = merge_weapons(&theory, &Default::default());

    let detail_html = "<table class=\"wikitable\">\
         <tr><th>伤害</th><td>25/37</td></tr>\
         <tr><th>射速</th><td>695</td></tr>\
         </table>";
    let detail = extract_weapon_detail(detail_html);
    apply_weapon_detail(&mut weapons[0], &detail);

    assert_eq!(weapons[0].stats.damage_body, 25.0);
    assert_eq!(weapons[0].stats.fire_rate, 695);
    // dps must reflect the overridden stats, not the table-scraped ones.
    assert_eq!(weapons[0].computed.dps_body, (695.0 / 60.0 * 25.0_f64).round());
}

#[test]
fn routes_survive_serialization() {
    let mut routes = RouteMap::new();
    routes.insert(
        "芙拉薇娅".to_string(),
        Route {
            character_url: "https://wiki.biligame.com/klbq/芙拉薇娅".to_string(),
            weapon_name: Some("独舞".to_string()),
            weapon_url: Some("https://wiki.biligame.com/klbq/独舞".to_string()),
        },
    );
    let path = unique_temp_path("routes");
    write_routes(&path, &routes).expect("routes should write");
    let reloaded = load_routes(&path).expect("routes should reload");
    assert_eq!(reloaded, routes);

    std::fs::remove_file(&path).ok();
}

#[test]
fn store_serves_generated_document() {
    let theory_html = theory_page(&[theory_row("芙拉薇娅：独舞", "无", "12", "30", "600")]);
    let theory = extract_theory(&theory_html);
    let weapons = merge_weapons(&theory, &Default::default());
    let characters = characters_from_weapons(&weapons);
    let root = RootData::new(weapons, characters);

    let path = unique_temp_path("store");
    write_root_data(&path, &root).expect("document should write");

    let mut store = DataStore::new();
    assert!(store.load(&path));
    assert_eq!(store.weapons_for_character("芙拉薇娅").len(), 1);
    assert_eq!(store.character_by_name("芙拉薇娅").map(|c| c.id.as_str()), Some("flavia"));

    std::fs::remove_file(&path).ok();
}
