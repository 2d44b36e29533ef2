use super::{print_json, print_location};
use campus_nav_cli::output::{format_count, Status};
use campus_nav_core::error::exit_codes;
use campus_nav_geo::GeoDataStore;

pub fn run(data: &GeoDataStore, json: bool) -> anyhow::Result<i32> {
    if json {
        print_json(&data.locations())?;
        return Ok(exit_codes::SUCCESS);
    }

    Status::header(&format!(
        "Campus locations ({})",
        format_count(data.locations().len(), "entry", "entries")
    ));
    data.locations().iter().for_each(print_location);
    Ok(exit_codes::SUCCESS)
}
