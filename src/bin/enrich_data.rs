//! Reconcile data.json against data/routes.json: attach wiki URLs to known
//! records, and add placeholder entries for characters and weapons the table
//! crawl never saw. Patches in place, never drops existing records.
//! Run: cargo run --bin enrich_data

use strinova_data::data::names::{canonical_character_id, synthetic_id, weapon_id};
use strinova_data::data::weapon::compute_derived;
use strinova_data::data::{
    load_root_data, repo_data_path, write_root_data, Character, Weapon, DEFAULT_DATA_PATH,
};
use strinova_data::scrape::{load_routes, DEFAULT_ROUTES_PATH};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data_path = repo_data_path(DEFAULT_DATA_PATH);
    let mut root = load_root_data(&data_path)
        .ok_or("data.json missing or unreadable; run crawl_weapons first")?;
    let routes_path = repo_data_path(DEFAULT_ROUTES_PATH);
    let routes = load_routes(&routes_path)
        .ok_or("routes.json missing or unreadable; run crawl_routes first")?;

    let mut added_characters = 0usize;
    let mut added_weapons = 0usize;

    for (name, route) in &routes {
        match root.characters.iter_mut().find(|c| &c.name == name) {
            Some(character) => {
                character.wiki_url = Some(route.character_url.clone());
            }
            None => {
                let canonical = canonical_character_id(name);
                // Unmapped names keep a stable synthetic slug instead of the
                // raw display string.
                let id = if canonical == *name {
                    synthetic_id(name)
                } else {
                    canonical
                };
                let mut character = Character::stub(id, name.clone(), String::new());
                character.wiki_url = Some(route.character_url.clone());
                root.characters.push(character);
                added_characters += 1;
            }
        }

        let Some(weapon_name) = &route.weapon_name else {
            continue;
        };
        match root.weapons.iter_mut().find(|w| &w.name == weapon_name) {
            Some(weapon) => {
                weapon.wiki_url = route.weapon_url.clone();
                if weapon.character.is_empty() {
                    weapon.character = name.clone();
                }
            }
            None => {
                let mut weapon = Weapon {
                    id: weapon_id(weapon_name),
                    name: weapon_name.clone(),
                    character: name.clone(),
                    weapon_type: "Unknown".to_string(),
                    wiki_url: route.weapon_url.clone(),
                    ..Weapon::default()
                };
                weapon.computed = compute_derived(&weapon.stats);
                root.weapons.push(weapon);
                added_weapons += 1;
            }
        }
    }

    root.touch();
    write_root_data(&data_path, &root)?;
    println!(
        "Enriched {} routes: +{} characters, +{} weapons ({} weapons, {} characters total)",
        routes.len(),
        added_characters,
        added_weapons,
        root.weapons.len(),
        root.characters.len()
    );
    Ok(())
}
