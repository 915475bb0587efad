//! Crawl both weapon tables from the wiki, merge them and write a fresh
//! public/data.json. This is the full-rebuild entry point of the pipeline.
//! Run: cargo run --bin crawl_weapons

use strinova_data::data::{
    characters_from_weapons, merge_weapons, repo_data_path, write_root_data, RootData,
    DEFAULT_DATA_PATH,
};
use strinova_data::scrape::{extract_filter, extract_theory, PageClient, FILTER_URL, THEORY_URL};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = PageClient::new()?;

    // Both table pages are required; a failed fetch aborts the rebuild and
    // leaves the previous document in place.
    println!("Fetching theory table...");
    let theory_html = client.get(THEORY_URL)?;
    println!("Fetching filter table...");
    let filter_html = client.get(FILTER_URL)?;

    let theory = extract_theory(&theory_html);
    let filter = extract_filter(&filter_html);
    println!(
        "Extracted {} theory rows, {} filter rows",
        theory.len(),
        filter.len()
    );

    let weapons = merge_weapons(&theory, &filter);
    let characters = characters_from_weapons(&weapons);
    let root = RootData::new(weapons, characters);

    let out_path = repo_data_path(DEFAULT_DATA_PATH);
    write_root_data(&out_path, &root)?;
    println!(
        "Wrote {} weapons, {} characters to {}",
        root.weapons.len(),
        root.characters.len(),
        out_path.display()
    );
    Ok(())
}
