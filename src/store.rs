//! Read-side contract over the generated document. Consumers call `load` once
//! and then query by id or name; a failed load leaves the store empty with a
//! generic error message rather than surfacing parse details.

use std::path::{Path, PathBuf};

use crate::data::names;
use crate::data::root::{load_root_data, repo_data_path, DEFAULT_DATA_PATH};
use crate::data::{Character, Weapon};

pub const LOAD_ERROR_MESSAGE: &str = "Failed to load data";

#[derive(Debug, Default)]
pub struct DataStore {
    pub weapons: Vec<Weapon>,
    pub characters: Vec<Character>,
    pub last_updated: String,
    pub game_version: String,
    pub loaded: bool,
    pub error: Option<String>,
    path: Option<PathBuf>,
}

impl DataStore {
    pub fn new() -> DataStore {
        DataStore::default()
    }

    /// Load the document at `path`. On failure the store is emptied and the
    /// error is a fixed consumer-facing message.
    pub fn load(&mut self, path: &Path) -> bool {
        self.path = Some(path.to_path_buf());
        match load_root_data(path) {
            Some(root) => {
                self.weapons = root.weapons;
                self.characters = root.characters;
                self.last_updated = root.last_updated;
                self.game_version = root.game_version;
                self.loaded = true;
                self.error = None;
                true
            }
            None => {
                self.weapons.clear();
                self.characters.clear();
                self.last_updated.clear();
                self.game_version.clear();
                self.loaded = false;
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
                false
            }
        }
    }

    /// Load from the repo-relative default location.
    pub fn load_default(&mut self) -> bool {
        let path = repo_data_path(DEFAULT_DATA_PATH);
        self.load(&path)
    }

    /// Re-read whatever path the last `load` used.
    pub fn reload(&mut self) -> bool {
        match self.path.clone() {
            Some(path) => self.load(&path),
            None => self.load_default(),
        }
    }

    pub fn weapon(&self, id: &str) -> Option<&Weapon> {
        self.weapons.iter().find(|weapon| weapon.id == id)
    }

    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|character| character.id == id)
    }

    pub fn character_by_name(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|character| character.name == name)
    }

    /// All weapons whose owner back-reference matches the display name.
    pub fn weapons_for_character(&self, name: &str) -> Vec<&Weapon> {
        self.weapons
            .iter()
            .filter(|weapon| weapon.character == name)
            .collect()
    }

    pub fn faction_of(&self, character_id: &str) -> &'static str {
        names::faction_for(character_id)
    }
}
