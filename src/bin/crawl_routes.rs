//! Walk the faction roster page, then each character page, recording wiki
//! URLs for characters and their signature weapons in data/routes.json.
//! Run: cargo run --bin crawl_routes

use strinova_data::data::repo_data_path;
use strinova_data::scrape::{
    extract_faction_roster, extract_weapon_link, polite_pause, write_routes, PageClient, Route,
    RouteMap, DEFAULT_ROUTES_PATH, FACTION_URL,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = PageClient::new()?;

    println!("Fetching faction roster...");
    let roster_html = client.get(FACTION_URL)?;
    let roster = extract_faction_roster(&roster_html);
    println!("Found {} characters", roster.len());

    let mut routes = RouteMap::new();
    let mut failures = 0usize;
    for (name, character_url) in roster {
        polite_pause();
        let (weapon_name, weapon_url) = match client.get(&character_url) {
            Ok(page) => match extract_weapon_link(&page) {
                Some((weapon_name, weapon_url)) => (Some(weapon_name), Some(weapon_url)),
                None => {
                    eprintln!("[{name}] no weapon link on character page");
                    (None, None)
                }
            },
            Err(err) => {
                eprintln!("[{name}] character page fetch failed: {err}");
                failures += 1;
                (None, None)
            }
        };
        routes.insert(
            name,
            Route {
                character_url,
                weapon_name,
                weapon_url,
            },
        );
    }

    let out_path = repo_data_path(DEFAULT_ROUTES_PATH);
    write_routes(&out_path, &routes)?;
    println!(
        "Wrote {} routes ({} fetch failures) to {}",
        routes.len(),
        failures,
        out_path.display()
    );
    Ok(())
}
