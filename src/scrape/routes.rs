//! Route discovery: the faction roster page lists every character; each
//! character page links its signature weapon. The resulting route map drives
//! the enrich and detail-fill passes.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

use crate::scrape::fetch::absolute_url;
use crate::scrape::html::{element_text, selector};

pub const DEFAULT_ROUTES_PATH: &str = "data/routes.json";

/// Heading that precedes each faction's character link list.
const ROSTER_HEADING: &str = "阵营角色";
/// Heading on a character page that precedes the weapon link.
const WEAPON_HEADING: &str = "角色武器";
/// How many siblings below a heading are scanned before giving up.
const SIBLING_SCAN_LIMIT: usize = 10;

/// Wiki locations for one character, keyed by display name in the route map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    #[serde(rename = "characterUrl")]
    pub character_url: String,
    #[serde(rename = "weaponName", default, skip_serializing_if = "Option::is_none")]
    pub weapon_name: Option<String>,
    #[serde(rename = "weaponUrl", default, skip_serializing_if = "Option::is_none")]
    pub weapon_url: Option<String>,
}

/// Character display name -> route. BTreeMap for a stable JSON document.
pub type RouteMap = BTreeMap<String, Route>;

pub fn load_routes(path: &Path) -> Option<RouteMap> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

pub fn write_routes(path: &Path, routes: &RouteMap) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let payload = serde_json::to_string_pretty(routes).map_err(io::Error::other)?;
    fs::write(path, payload)
}

/// Collect (display name, absolute URL) for every character linked under a
/// `阵营角色` heading, deduplicated by name in page order.
pub fn extract_faction_roster(html: &str) -> Vec<(String, String)> {
    let document = Html::parse_document(html);
    let (Some(heading_sel), Some(link_sel)) = (selector("h2, h3"), selector("a")) else {
        return Vec::new();
    };

    let mut characters: Vec<(String, String)> = Vec::new();
    for heading in document.select(&heading_sel) {
        if !element_text(heading).contains(ROSTER_HEADING) {
            continue;
        }
        for sibling in siblings_until_heading(heading) {
            for link in sibling.select(&link_sel) {
                let name = element_text(link);
                let Some(href) = link.value().attr("href") else {
                    continue;
                };
                if name.is_empty() || characters.iter().any(|(seen, _)| seen == &name) {
                    continue;
                }
                characters.push((name, absolute_url(href)));
            }
        }
    }
    characters
}

/// First weapon link below the `角色武器` heading of a character page.
pub fn extract_weapon_link(html: &str) -> Option<(String, String)> {
    let document = Html::parse_document(html);
    let heading_sel = selector("h2, h3")?;
    let link_sel = selector("a")?;

    for heading in document.select(&heading_sel) {
        if !element_text(heading).contains(WEAPON_HEADING) {
            continue;
        }
        for sibling in siblings_until_heading(heading) {
            if let Some(link) = sibling.select(&link_sel).next() {
                let name = element_text(link);
                if name.is_empty() {
                    continue;
                }
                let url = link.value().attr("href").map(absolute_url);
                return Some((name, url.unwrap_or_default()));
            }
        }
    }
    None
}

/// Elements following a heading up to the next h2/h3, bounded by the scan
/// limit. The wiki puts the relevant list in a nearby sibling, not a child.
fn siblings_until_heading(heading: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut out = Vec::new();
    for node in heading.next_siblings() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        let tag = element.value().name();
        if tag == "h2" || tag == "h3" {
            break;
        }
        out.push(element);
        if out.len() >= SIBLING_SCAN_LIMIT {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_collects_links_until_next_heading() {
        let html = "<h2>欧泊</h2><h3>阵营角色</h3>\
             <ul><li><a href=\"/klbq/奥黛丽\">奥黛丽</a></li>\
             <li><a href=\"/klbq/绯莎\">绯莎</a></li>\
             <li><a href=\"/klbq/奥黛丽\">奥黛丽</a></li></ul>\
             <h3>其他</h3><a href=\"/klbq/无关\">无关</a>";
        let roster = extract_faction_roster(html);
        assert_eq!(
            roster,
            vec![
                (
                    "奥黛丽".to_string(),
                    "https://wiki.biligame.com/klbq/奥黛丽".to_string()
                ),
                (
                    "绯莎".to_string(),
                    "https://wiki.biligame.com/klbq/绯莎".to_string()
                ),
            ]
        );
    }

    #[test]
    fn weapon_link_found_below_heading() {
        let html = "<h2><span class=\"mw-headline\">角色武器</span></h2>\
             <p><a href=\"/klbq/独舞\">独舞</a></p>";
        let link = extract_weapon_link(html);
        assert_eq!(
            link,
            Some((
                "独舞".to_string(),
                "https://wiki.biligame.com/klbq/独舞".to_string()
            ))
        );
    }

    #[test]
    fn missing_weapon_heading_yields_none() {
        assert_eq!(extract_weapon_link("<h2>技能</h2><a href=\"/x\">x</a>"), None);
    }

    #[test]
    fn route_map_round_trips() {
        let mut routes = RouteMap::new();
        routes.insert(
            "芙拉薇娅".to_string(),
            Route {
                character_url: "https://wiki.biligame.com/klbq/芙拉薇娅".to_string(),
                weapon_name: Some("独舞".to_string()),
                weapon_url: Some("https://wiki.biligame.com/klbq/独舞".to_string()),
            },
        );
        let payload = serde_json::to_string(&routes).unwrap();
        let parsed: RouteMap = serde_json::from_str(&payload).unwrap();
        assert_eq!(parsed, routes);
    }
}
