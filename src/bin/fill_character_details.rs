//! Visit each character's wiki page and fold infobox, bio, portrait and
//! ability sections into data.json. Per-character failures are logged and
//! skipped.
//! Run: cargo run --bin fill_character_details

use strinova_data::data::{
    apply_character_detail, load_root_data, repo_data_path, write_root_data, DEFAULT_DATA_PATH,
};
use strinova_data::scrape::{extract_character_detail, polite_pause, PageClient};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data_path = repo_data_path(DEFAULT_DATA_PATH);
    let mut root = load_root_data(&data_path)
        .ok_or("data.json missing or unreadable; run crawl_weapons first")?;
    let client = PageClient::new()?;

    let mut filled = 0usize;
    let mut skipped = 0usize;
    let mut failures = 0usize;
    for character in &mut root.characters {
        let Some(url) = character.wiki_url.clone() else {
            skipped += 1;
            continue;
        };
        polite_pause();
        let page = match client.get(&url) {
            Ok(page) => page,
            Err(err) => {
                eprintln!("[{}] detail fetch failed: {err}", character.name);
                failures += 1;
                continue;
            }
        };
        let detail = extract_character_detail(&page);
        apply_character_detail(character, &detail);
        filled += 1;
    }

    root.touch();
    write_root_data(&data_path, &root)?;
    println!(
        "Filled {filled} characters ({skipped} without wiki url, {failures} fetch failures)"
    );
    Ok(())
}
