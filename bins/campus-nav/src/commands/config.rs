use super::print_json;
use campus_nav_cli::output::Status;
use campus_nav_core::config::Config;
use campus_nav_core::error::exit_codes;

pub fn run(config: &Config, json: bool) -> anyhow::Result<i32> {
    if json {
        print_json(&config.schema)?;
        return Ok(exit_codes::SUCCESS);
    }

    match &config.path {
        Some(path) => Status::info(&format!("Loaded from {}", path.display())),
        None => Status::info("No config file found; using defaults"),
    }
    println!();
    print!("{}", config.to_toml()?);
    Ok(exit_codes::SUCCESS)
}
