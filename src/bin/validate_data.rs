//! Validate public/data.json: print every diagnostic grouped by severity and
//! exit non-zero when any error-level problem is found.
//! Run: cargo run --bin validate_data

use strinova_data::data::{
    load_root_data, repo_data_path, validate_root, ValidationSeverity, DEFAULT_DATA_PATH,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data_path = repo_data_path(DEFAULT_DATA_PATH);
    let root = load_root_data(&data_path)
        .ok_or("data.json missing or unreadable; run crawl_weapons first")?;

    let report = validate_root(&root);
    let mut errors = 0usize;
    let mut warnings = 0usize;
    let mut infos = 0usize;
    for diag in &report.diagnostics {
        match diag.severity {
            ValidationSeverity::Error => errors += 1,
            ValidationSeverity::Warning => warnings += 1,
            ValidationSeverity::Info => infos += 1,
        }
        eprintln!("[{}] {}: {}", diag.severity, diag.context, diag.message);
    }

    println!(
        "Checked {} weapons, {} characters: {errors} errors, {warnings} warnings, {infos} notes",
        root.weapons.len(),
        root.characters.len()
    );
    if report.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}
