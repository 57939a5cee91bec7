use directories::ProjectDirs;
use orbit_layout::{DEFAULT_GLIDE_STEP, LayoutParams, ParamsError, Size};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub items: usize,
    pub viewport: Size,
    pub item: Size,
    pub glide_step: f64,
    pub format: OutputFormat,
    pub layout: LayoutParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            items: 12,
            viewport: Size::new(480.0, 320.0),
            item: Size::new(64.0, 96.0),
            glide_step: DEFAULT_GLIDE_STEP,
            format: OutputFormat::Text,
            layout: LayoutParams::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid layout parameters: {0}")]
    Params(#[from] ParamsError),
    #[error("glide_step must be a finite number greater than zero, got {0}")]
    GlideStep(f64),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "orbit", "orbit").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Reads `path` (required) or the per-user config file (optional), then
/// `ORBIT_*` environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    match path {
        Some(path) => {
            builder = builder.add_source(config::File::from(path.to_path_buf()).required(true));
        }
        None => match get_config_path() {
            Ok(path) => {
                builder = builder.add_source(config::File::from(path).required(false));
            }
            Err(e) => log::warn!("{}; using built-in defaults", e),
        },
    }

    let s = builder
        .add_source(config::Environment::with_prefix("ORBIT"))
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        if !(self.glide_step.is_finite() && self.glide_step > 0.0) {
            return Err(ConfigError::GlideStep(self.glide_step));
        }
        Ok(())
    }
}

/// Writes the commented default config to `path` unless a file is already
/// there. Returns whether anything was written.
pub fn write_default_config_to(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        log::debug!("config already present at {}", path.display());
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, DEFAULT_CONFIG)?;
    Ok(true)
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    write_default_config_to(&path)?;
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_deserialization() {
        let cases = vec![
            ("\"text\"", OutputFormat::Text),
            ("\"Text\"", OutputFormat::Text),
            ("\"json\"", OutputFormat::Json),
            ("\"JSON\"", OutputFormat::Json),
        ];

        for (json, expected) in cases {
            let deserialized: OutputFormat = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<OutputFormat>("\"yaml\"").is_err());
    }

    #[test]
    fn test_default_config_matches_defaults() {
        let parsed: Config = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let defaults = Config::default();
        assert_eq!(parsed.items, defaults.items);
        assert_eq!(parsed.viewport, defaults.viewport);
        assert_eq!(parsed.item, defaults.item);
        assert_eq!(parsed.glide_step, defaults.glide_step);
        assert_eq!(parsed.format, defaults.format);
        assert_eq!(parsed.layout, defaults.layout);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orbit.toml");
        fs_err::write(
            &path,
            "items = 7\nformat = \"json\"\n\n[layout]\nradius = 180.0\ninterval_angle = 20.0\n",
        )
        .unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.items, 7);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.layout.radius, 180.0);
        assert_eq!(config.layout.interval_angle, 20.0);
        assert_eq!(config.layout.max_scale, 1.4);
        assert_eq!(config.viewport, Config::default().viewport);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            load_config(Some(path.as_path())),
            Err(ConfigError::Config(_))
        ));
    }

    #[test]
    fn test_write_default_config_keeps_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(write_default_config_to(&path).unwrap());
        assert_eq!(fs_err::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        fs_err::write(&path, "items = 3\n").unwrap();
        assert!(!write_default_config_to(&path).unwrap());
        assert_eq!(load_config(Some(path.as_path())).unwrap().items, 3);
    }

    #[test]
    fn test_write_default_config_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs_err::write(&blocker, "").unwrap();

        let path = blocker.join("config.toml");
        assert!(matches!(
            write_default_config_to(&path),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orbit.toml");
        fs_err::write(&path, "[layout]\ninterval_angle = 0.0\n").unwrap();

        assert!(matches!(
            load_config(Some(path.as_path())),
            Err(ConfigError::Params(ParamsError::NotPositive { .. }))
        ));
    }
}
