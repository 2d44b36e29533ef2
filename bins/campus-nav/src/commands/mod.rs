//! Subcommand implementations. Each returns the process exit code.

pub mod config;
pub mod locations;
pub mod navigate;
pub mod paths;
pub mod search;

use campus_nav_geo::Location;
use owo_colors::OwoColorize;

/// One location per line: id, name, category.
fn print_location(location: &Location) {
    println!(
        "  {:>4}  {:<32} {}",
        location.id.to_string().dimmed(),
        location.name,
        location.category.cyan()
    );
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
