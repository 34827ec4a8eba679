//! Layered configuration for the downsample tool
//!
//! Priority (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables (`DOWNSAMPLE_` prefix)
//! 3. Config file given with `--config` (TOML, YAML or JSON)
//! 4. Default values

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use voltage_downsample::DEFAULT_DESIRED_POINTS;

use crate::error::{Result, ToolError};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DOWNSAMPLE_";

/// Input file used when none is configured
pub const DEFAULT_INPUT: &str = "Etest.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Series file to read
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Output file; derived from the input name when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Desired number of output points
    #[serde(default = "default_points")]
    pub points: usize,

    /// Reduce windows on all cores
    #[serde(default)]
    pub parallel: bool,

    /// Log filter (e.g. "info", "debug", "info,voltage_downsample=trace")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT)
}

fn default_points() -> usize {
    DEFAULT_DESIRED_POINTS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: None,
            points: default_points(),
            parallel: false,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Output path: the configured one, or `<stem>_processed.csv` beside the input
    pub fn output_path(&self) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        derive_output_path(&self.input)
    }
}

/// `data/Etest.csv` -> `data/Etest_processed.csv`
pub fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{}_processed.csv", stem))
}

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// Config file provider chosen by extension
fn file_figment(path: &Path) -> Result<Figment> {
    if !path.exists() {
        return Err(ToolError::config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ToolError::config("Config file must have an extension"))?;

    match extension {
        "toml" => Ok(Figment::new().merge(Toml::file(path))),
        "yaml" | "yml" => Ok(Figment::new().merge(Yaml::file(path))),
        "json" => Ok(Figment::new().merge(Json::file(path))),
        _ => Err(ToolError::config(format!(
            "Unsupported config file format: {}",
            extension
        ))),
    }
}

/// Build the layered figment without extracting it
pub fn figment(config_file: Option<&Path>, overrides: &Overrides) -> Result<Figment> {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));

    if let Some(path) = config_file {
        figment = figment.merge(file_figment(path)?);
    }

    Ok(figment
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(overrides)))
}

/// Load settings from all layers
pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Settings> {
    let settings: Settings = figment(config_file, overrides)?.extract()?;
    Ok(settings)
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let settings = load(None, &Overrides::default()).unwrap();
            assert_eq!(settings, Settings::default());
            assert_eq!(settings.points, 100);
            assert_eq!(settings.output_path(), PathBuf::from("Etest_processed.csv"));
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_then_flags() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "downsample.yaml",
                "input: data/power.txt\npoints: 50\nparallel: true\n",
            )?;
            let path = PathBuf::from("downsample.yaml");

            let settings = load(Some(&path), &Overrides::default()).unwrap();
            assert_eq!(settings.points, 50);
            assert!(settings.parallel);
            assert_eq!(
                settings.output_path(),
                PathBuf::from("data/power_processed.csv")
            );

            jail.set_env("DOWNSAMPLE_POINTS", "25");
            let settings = load(Some(&path), &Overrides::default()).unwrap();
            assert_eq!(settings.points, 25);

            let overrides = Overrides {
                points: Some(10),
                output: Some(PathBuf::from("out.csv")),
                ..Default::default()
            };
            let settings = load(Some(&path), &overrides).unwrap();
            assert_eq!(settings.points, 10);
            assert_eq!(settings.output_path(), PathBuf::from("out.csv"));
            assert_eq!(settings.input, PathBuf::from("data/power.txt"));
            Ok(())
        });
    }

    #[test]
    fn test_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file("cfg.toml", "points = 7\nlog_level = \"debug\"\n")?;
            let settings = load(Some(Path::new("cfg.toml")), &Overrides::default()).unwrap();
            assert_eq!(settings.points, 7);
            assert_eq!(settings.log_level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_unsupported_or_missing_file() {
        Jail::expect_with(|jail| {
            jail.create_file("cfg.ini", "points=7")?;
            assert!(matches!(
                load(Some(Path::new("cfg.ini")), &Overrides::default()),
                Err(ToolError::Config(_))
            ));
            assert!(matches!(
                load(Some(Path::new("missing.yaml")), &Overrides::default()),
                Err(ToolError::Config(_))
            ));
            Ok(())
        });
    }

    #[test]
    fn test_derive_output_path() {
        assert_eq!(
            derive_output_path(Path::new("/tmp/Etest.csv")),
            PathBuf::from("/tmp/Etest_processed.csv")
        );
        assert_eq!(
            derive_output_path(Path::new("series")),
            PathBuf::from("series_processed.csv")
        );
    }
}
