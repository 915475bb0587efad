//! Wiki scraping: HTTP fetch plus the extractors that turn wiki markup into
//! the typed records the data layer merges.

pub mod character_page;
pub mod fetch;
pub mod filter;
pub mod html;
pub mod routes;
pub mod theory;
pub mod weapon_page;

pub use character_page::extract_character_detail;
pub use fetch::{polite_pause, PageClient, FACTION_URL, FILTER_URL, THEORY_URL};
pub use filter::extract_filter;
pub use routes::{
    extract_faction_roster, extract_weapon_link, load_routes, write_routes, Route, RouteMap,
    DEFAULT_ROUTES_PATH,
};
pub use theory::extract_theory;
pub use weapon_page::extract_weapon_detail;
