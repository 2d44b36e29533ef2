//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use campus_nav_core::Error;
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print a labelled value, label dimmed
    pub fn field(label: &str, value: impl std::fmt::Display) {
        println!("  {:<12} {}", label.dimmed(), value);
    }

    /// Print a structured error with its context and suggestion
    pub fn report(error: &Error) {
        eprintln!("{} {}", "✗".red(), error.message);
        eprintln!("  {} {}", "code:".dimmed(), error.code);
        if let Some(context) = &error.context {
            eprintln!("  {} {}", "context:".dimmed(), context);
        }
        if let Some(suggestion) = &error.suggestion {
            eprintln!("  {} {}", "hint:".cyan(), suggestion);
        }
    }
}

/// Render an error as a JSON report for `--json` output
pub fn error_json(error: &Error) -> String {
    serde_json::to_string_pretty(&error.to_report())
        .unwrap_or_else(|_| format!("{{\"code_str\": \"{}\"}}", error.code))
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a walking distance for display
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
    }

    #[test]
    fn test_format_duration_secs() {
        assert_eq!(format_duration(Duration::from_secs_f32(1.5)), "1.5s");
    }

    #[test]
    fn test_format_duration_mins() {
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn test_format_distance_meters() {
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(412.4), "412 m");
    }

    #[test]
    fn test_format_distance_km() {
        assert_eq!(format_distance(1500.0), "1.50 km");
    }

    #[test]
    fn test_error_json_report() {
        let error = Error::config_not_found("missing.toml");
        let json: serde_json::Value = serde_json::from_str(&error_json(&error)).unwrap();

        assert_eq!(json["code_str"], "E3001");
        assert_eq!(json["category"], "Configuration");
        assert!(json["message"].as_str().unwrap().contains("missing.toml"));
        assert!(json["suggestion"].is_string());
        assert!(json.get("context").is_none());
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "path", "paths"), "1 path");
        assert_eq!(format_count(7, "path", "paths"), "7 paths");
    }
}
