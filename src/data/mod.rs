pub mod character;
pub mod merge;
pub mod names;
pub mod root;
pub mod validate;
pub mod weapon;

pub use character::{Ability, AbilityKind, Character, CharacterImages, CharacterStats};
pub use merge::{
    apply_character_detail, apply_weapon_detail, characters_from_weapons, merge_weapons,
    CharacterDetail, FilterRecord, TheoryRecord, WeaponDetail,
};
pub use root::{load_root_data, repo_data_path, write_root_data, RootData, DEFAULT_DATA_PATH};
pub use validate::{validate_root, ValidationReport, ValidationSeverity};
pub use weapon::{
    compute_derived, BodyPartMultipliers, ComputedStats, FalloffDamage, Weapon, WeaponAttributes,
    WeaponImages, WeaponStats, TARGET_HEALTH,
};
