//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults.
    ///
    /// An explicit path must exist; discovered paths are optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        schema.validate()?;

        tracing::debug!(path = %display_path(config_path.as_deref()), "Configuration loaded");

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load with defaults only (no file)
    pub fn defaults() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(&self.schema)?)
    }
}

fn display_path(path: Option<&Path>) -> String {
    path.map_or_else(|| "<defaults>".to_string(), |p| p.display().to_string())
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [
        ".campus-nav.toml",
        "campus-nav.toml",
        ".config/campus-nav.toml",
    ];

    for candidate in candidates {
        let path = Path::new(candidate);
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("campus-nav").join("config.toml"))
        .filter(|path| path.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file {}: {}", path.display(), e)).with_source(e))?;

    let schema: ConfigSchema = toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {}", path.display()))?;

    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_defaults() {
        let config = Config::defaults();
        assert!(config.path.is_none());
        assert_eq!(config.schema.map.focus_zoom, 17);
    }

    #[test]
    fn test_config_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[transition]\nduration_ms = 900").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.schema.transition.duration_ms, 900);
        assert_eq!(config.path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_config_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/campus-nav.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_config_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[map]\nzoom = \"high\"").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.context.is_some());
    }

    #[test]
    fn test_config_validation_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[map]\nmin_zoom = 18\nmax_zoom = 16").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
    }

    #[test]
    fn test_to_toml_round_trips_layer() {
        let rendered = Config::defaults().to_toml().unwrap();
        assert!(rendered.contains("layer = \"satellite\""));
    }
}
