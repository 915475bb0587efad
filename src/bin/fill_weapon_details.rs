//! Visit each weapon's wiki page and fold detail-page stats, images, the
//! category heuristic and falloff tables into data.json. Per-weapon failures
//! are logged and skipped; the run always writes what it has.
//! Run: cargo run --bin fill_weapon_details

use strinova_data::data::{
    apply_weapon_detail, load_root_data, repo_data_path, write_root_data, DEFAULT_DATA_PATH,
};
use strinova_data::scrape::{extract_weapon_detail, polite_pause, PageClient};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data_path = repo_data_path(DEFAULT_DATA_PATH);
    let mut root = load_root_data(&data_path)
        .ok_or("data.json missing or unreadable; run crawl_weapons first")?;
    let client = PageClient::new()?;

    let mut filled = 0usize;
    let mut skipped = 0usize;
    let mut failures = 0usize;
    for weapon in &mut root.weapons {
        let Some(url) = weapon.wiki_url.clone() else {
            skipped += 1;
            continue;
        };
        polite_pause();
        let page = match client.get(&url) {
            Ok(page) => page,
            Err(err) => {
                eprintln!("[{}] detail fetch failed: {err}", weapon.name);
                failures += 1;
                continue;
            }
        };
        let detail = extract_weapon_detail(&page);
        apply_weapon_detail(weapon, &detail);
        filled += 1;
    }

    root.touch();
    write_root_data(&data_path, &root)?;
    println!(
        "Filled {filled} weapons ({skipped} without wiki url, {failures} fetch failures)"
    );
    Ok(())
}
