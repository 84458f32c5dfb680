use crate::measure::{CellOracle, FontSpec, MeasureContext};
use clap::Parser;
use config::{
    Config as ConfigCrate, // Need this for builder
    ConfigError as ConfigCrateError,
    Environment,
    File,
    Map,
    Source,
    Value,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// Using constants for default values makes them easy to change.
pub const DEFAULT_MAX_WIDTH: f32 = 80.0;
const DEFAULT_FONT_FAMILY: &str = "monospace";
const DEFAULT_FONT_SIZE: f32 = 1.0;
const DEFAULT_ADVANCE_RATIO: f32 = 1.0;
const DEFAULT_LOCALE: &str = "en";

// Define potential errors during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] ConfigCrateError),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

// Serde struct for deserializing config file values.
// Optional fields allow for layered config (defaults -> file -> env -> args).
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct FileConfig {
    max_width: Option<f32>,
    font_family: Option<String>,
    font_size: Option<f32>,
    advance_ratio: Option<f32>,
    locale: Option<String>,
    preview: Option<bool>,
    strict: Option<bool>,
}

// Final Config struct, combining all sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Container width, in the oracle's unit (terminal columns by default).
    pub max_width: f32,
    pub font_family: String,
    pub font_size: f32,
    /// Width of one cell relative to the font size.
    pub advance_ratio: f32,
    pub locale: String,
    /// Print the boxed rendering after each fitted token.
    pub preview: bool,
    /// Report tokens that cannot be fitted instead of printing them unsplit.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_width: DEFAULT_MAX_WIDTH,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            advance_ratio: DEFAULT_ADVANCE_RATIO,
            locale: DEFAULT_LOCALE.to_string(),
            preview: false,
            strict: false,
        }
    }
}

impl Config {
    pub fn measure_context(&self) -> MeasureContext {
        MeasureContext::new(self.max_width)
            .with_font(FontSpec {
                family: self.font_family.clone(),
            })
            .with_size(self.font_size)
            .with_locale(self.locale.clone())
    }

    pub fn oracle(&self) -> CellOracle {
        CellOracle::new(self.advance_ratio)
    }
}

// Command line arguments defined using clap.
#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Insert soft breaks into long unbreakable tokens so they wrap inside a fixed width",
    long_about = None
)]
pub struct CliArgs {
    /// Tokens to fit. Read from stdin, one per line, when omitted
    pub tokens: Vec<String>,

    /// Path to a custom configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Container width (defaults to the terminal width)
    #[arg(long)]
    pub max_width: Option<f32>,
    #[arg(long)]
    pub font_family: Option<String>,
    #[arg(long)]
    pub font_size: Option<f32>,
    #[arg(long)]
    pub advance_ratio: Option<f32>,
    #[arg(long)]
    pub locale: Option<String>,

    /// Draw each fitted token inside a box of the target width
    #[arg(long)]
    pub preview: bool,

    /// Fail on tokens that cannot be fitted
    #[arg(long)]
    pub strict: bool,

    /// Only split off the last N characters of each token
    #[arg(long, value_name = "N")]
    pub split_tail: Option<usize>,

    /// Print the resolved configuration and exit
    #[arg(long)]
    pub debug_config: bool,
}

/// Width of the attached terminal, if there is one.
pub fn terminal_width() -> Option<f32> {
    crossterm::terminal::size()
        .ok()
        .filter(|(columns, _)| *columns > 0)
        .map(|(columns, _)| f32::from(columns))
}

// Function to load configuration from all sources.
pub fn load_config(args: &CliArgs) -> Result<Config, ConfigError> {
    let env_source = Environment::with_prefix("TOKENFIT").separator("__");
    let env_map: Map<String, Value> = env_source.collect()?;

    let fallback_width = terminal_width().unwrap_or(DEFAULT_MAX_WIDTH);
    build_config_from_args(args, Some(env_map), fallback_width)
}

fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("tokenfit-rs").join("config.toml"))
}

// Separate function to allow testing with specific args and override sources
fn build_config_from_args(
    args: &CliArgs,
    override_source: Option<Map<String, Value>>,
    fallback_width: f32,
) -> Result<Config, ConfigError> {
    let mut config_builder = ConfigCrate::builder();

    // An explicit --config must exist; the default location is optional
    if let Some(ref path) = args.config {
        config_builder = config_builder.add_source(File::from(path.clone()).required(true));
    } else if let Some(path) = default_config_path() {
        config_builder = config_builder.add_source(File::from(path).required(false));
    }

    // Overrides (environment or a test map) beat the file
    if let Some(overrides) = override_source {
        for (key, value) in overrides {
            config_builder = config_builder.set_override(&key, value)?;
        }
    }

    let loaded_sources: FileConfig = config_builder.build()?.try_deserialize()?;

    // Args are checked first, then overrides/file, then defaults.
    let config = Config {
        max_width: args
            .max_width
            .or(loaded_sources.max_width)
            .unwrap_or(fallback_width),
        font_family: args
            .font_family
            .clone()
            .or(loaded_sources.font_family)
            .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
        font_size: args
            .font_size
            .or(loaded_sources.font_size)
            .unwrap_or(DEFAULT_FONT_SIZE),
        advance_ratio: args
            .advance_ratio
            .or(loaded_sources.advance_ratio)
            .unwrap_or(DEFAULT_ADVANCE_RATIO),
        locale: args
            .locale
            .clone()
            .or(loaded_sources.locale)
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
        preview: args.preview || loaded_sources.preview.unwrap_or(false),
        strict: args.strict || loaded_sources.strict.unwrap_or(false),
    };

    validate_config(&config)?;
    Ok(config)
}

/// Widths and sizes must be usable as measurement inputs.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let positive = [
        ("max_width", config.max_width),
        ("font_size", config.font_size),
        ("advance_ratio", config.advance_ratio),
    ];
    for (name, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "{} must be a positive number, got {}",
                name, value
            )));
        }
    }

    if config.font_family.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "font_family must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use config::{Map, Value, ValueKind};
    use std::fs;
    use tempfile::TempDir;

    // Helper to create Args for testing. Points at an empty config file so
    // the user's own configuration never leaks into the test.
    fn test_args(dir: &TempDir, extra: &[&str]) -> CliArgs {
        let path = dir.path().join("config.toml");
        if !path.exists() {
            fs::write(&path, "").unwrap();
        }
        let path = path.to_string_lossy().to_string();

        let mut cmd = vec!["test_binary", "--config", path.as_str()];
        cmd.extend_from_slice(extra);
        CliArgs::try_parse_from(cmd).expect("Failed to parse test args")
    }

    #[test]
    fn test_default_config() {
        let dir = TempDir::new().unwrap();
        let args = test_args(&dir, &[]);
        let config =
            build_config_from_args(&args, None, 120.0).expect("Failed to load default config");

        assert_eq!(config.max_width, 120.0, "Fallback width should be used");
        assert_eq!(config.font_family, DEFAULT_FONT_FAMILY);
        assert_eq!(config.font_size, DEFAULT_FONT_SIZE);
        assert_eq!(config.locale, DEFAULT_LOCALE);
        assert!(!config.preview);
        assert!(!config.strict);
    }

    #[test]
    fn test_file_layer() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "max_width = 42.0\nfont_family = \"Inter\"\npreview = true\n",
        )
        .unwrap();

        let args = test_args(&dir, &[]);
        let config = build_config_from_args(&args, None, 120.0).unwrap();

        assert_eq!(config.max_width, 42.0);
        assert_eq!(config.font_family, "Inter");
        assert!(config.preview);
    }

    #[test]
    fn test_env_override() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "max_width = 42.0\n").unwrap();

        let mut override_map = Map::new();
        override_map.insert(
            "max_width".to_string(),
            Value::new(None, ValueKind::Float(64.0)),
        );
        override_map.insert(
            "locale".to_string(),
            Value::new(None, ValueKind::String("de".to_string())),
        );

        let args = test_args(&dir, &[]);
        let config = build_config_from_args(&args, Some(override_map), 120.0)
            .expect("Failed to load config with simulated env");

        assert_eq!(config.max_width, 64.0, "Env override max_width failed");
        assert_eq!(config.locale, "de", "Env override locale failed");
        assert_eq!(
            config.font_size, DEFAULT_FONT_SIZE,
            "Env override affected unrelated default"
        );
    }

    #[test]
    fn test_arg_override() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "max_width = 42.0\n").unwrap();

        let args = test_args(
            &dir,
            &["--max-width=30", "--font-size=2", "--strict", "deadbeef"],
        );
        let config = build_config_from_args(&args, None, 120.0).unwrap();

        assert_eq!(config.max_width, 30.0);
        assert_eq!(config.font_size, 2.0);
        assert!(config.strict);
        assert_eq!(args.tokens, vec!["deadbeef".to_string()]);
    }

    #[test]
    fn test_missing_explicit_config_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");
        let args =
            CliArgs::try_parse_from(["test_binary", "--config", path.to_str().unwrap()]).unwrap();

        let result = build_config_from_args(&args, None, 120.0);
        assert!(matches!(result, Err(ConfigError::ConfigFile(_))));
    }

    #[test]
    fn test_rejects_non_positive_width() {
        let dir = TempDir::new().unwrap();
        let args = test_args(&dir, &["--max-width=0"]);

        let result = build_config_from_args(&args, None, 120.0);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_measure_context_from_config() {
        let config = Config {
            max_width: 50.0,
            font_size: 2.0,
            locale: "fr".to_string(),
            ..Config::default()
        };
        let ctx = config.measure_context();

        assert_eq!(ctx.max_width, 50.0);
        assert_eq!(ctx.size, 2.0);
        assert_eq!(ctx.locale, "fr");
        assert_eq!(ctx.font.family, DEFAULT_FONT_FAMILY);
    }
}
