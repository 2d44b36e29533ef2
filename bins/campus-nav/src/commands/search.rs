use super::{print_json, print_location};
use campus_nav_cli::output::{format_count, Status};
use campus_nav_core::error::exit_codes;
use campus_nav_geo::GeoDataStore;
use campus_nav_search::SearchIndex;
use campus_nav_telemetry::{metrics, names};

pub fn run(data: &GeoDataStore, text: &str, json: bool) -> anyhow::Result<i32> {
    metrics().increment(names::SEARCH_QUERIES);
    let results = SearchIndex::new(data.locations()).query(text);
    tracing::debug!(query = text, hits = results.len(), "Search");

    if json {
        print_json(&results)?;
    } else if results.is_empty() {
        Status::warning(&format!("No locations match '{text}'"));
    } else {
        Status::header(&format_count(results.len(), "match", "matches"));
        results.iter().copied().for_each(print_location);
    }

    Ok(if results.is_empty() {
        exit_codes::NOT_FOUND
    } else {
        exit_codes::SUCCESS
    })
}
