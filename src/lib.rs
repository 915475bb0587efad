//! Offline data pipeline for a fan-made Strinova stats dashboard.
//!
//! Scrapes weapon and character tables from the biligame wiki, reconciles
//! display names against canonical slugs, merges the per-source records and
//! writes one `public/data.json` document consumed by the dashboard.

pub mod data;
pub mod scrape;
pub mod store;
