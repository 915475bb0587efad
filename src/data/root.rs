//! Root document: the single JSON artifact the dashboard fetches.
//! Written by the crawl/enrich/fill bins, fully overwriting the previous copy.
//! No atomic write or backup; a failed run is re-run from source.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::character::Character;
use crate::data::weapon::Weapon;

pub const DEFAULT_DATA_PATH: &str = "public/data.json";
pub const GAME_VERSION: &str = "1.0";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootData {
    /// RFC 3339 timestamp of the producing run.
    pub last_updated: String,
    pub game_version: String,
    pub weapons: Vec<Weapon>,
    pub characters: Vec<Character>,
}

impl RootData {
    pub fn new(weapons: Vec<Weapon>, characters: Vec<Character>) -> RootData {
        RootData {
            last_updated: chrono::Utc::now().to_rfc3339(),
            game_version: game_version(),
            weapons,
            characters,
        }
    }

    /// Refresh the timestamp after an in-place patch run.
    pub fn touch(&mut self) {
        self.last_updated = chrono::Utc::now().to_rfc3339();
    }
}

/// Game version stamped into the document; override with STRINOVA_DATA_VERSION.
pub fn game_version() -> String {
    std::env::var("STRINOVA_DATA_VERSION").unwrap_or_else(|_| GAME_VERSION.to_string())
}

/// Resolve a path relative to the repo root (CARGO_MANIFEST_DIR when run via
/// cargo).
pub fn repo_data_path(suffix: &str) -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        return PathBuf::from(manifest_dir).join(suffix);
    }
    PathBuf::from(suffix)
}

/// Load the root document. Returns None if the file is missing or unparsable.
pub fn load_root_data(path: &Path) -> Option<RootData> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

/// Serialize and fully overwrite the root document.
pub fn write_root_data(path: &Path, root: &RootData) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let payload = serde_json::to_string_pretty(root).map_err(io::Error::other)?;
    fs::write(path, payload)
}
