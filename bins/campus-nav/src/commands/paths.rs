use super::print_json;
use campus_nav_cli::output::{format_count, format_distance, Status};
use campus_nav_core::config::ConfigSchema;
use campus_nav_core::error::exit_codes;
use campus_nav_geo::{haversine_distance_meters, GeoDataStore};
use campus_nav_map::{PathStyle, StaticPathOverlay};
use owo_colors::OwoColorize;

pub fn run(data: &GeoDataStore, config: &ConfigSchema, json: bool) -> anyhow::Result<i32> {
    let overlay = StaticPathOverlay::render(data.paths(), &PathStyle::from(&config.paths));

    if json {
        print_json(&overlay)?;
        return Ok(exit_codes::SUCCESS);
    }

    Status::header(&format!(
        "Walkways ({}, drawn {} weight {})",
        format_count(overlay.len(), "path", "paths"),
        config.paths.color,
        config.paths.weight
    ));
    for line in overlay.polylines() {
        let length: f64 = line
            .points
            .windows(2)
            .map(|pair| haversine_distance_meters(&pair[0], &pair[1]))
            .sum();
        println!(
            "  {:<32} {:>3} points  {}",
            line.name.as_deref().unwrap_or("(unnamed)"),
            line.points.len(),
            format_distance(length).dimmed()
        );
    }
    Ok(exit_codes::SUCCESS)
}
