//! Viewer configuration.
//!
//! Settings come from built-in defaults, an optional TOML file, and
//! `QUICKRECIPES_*` environment variables, in that order of precedence
//! (later wins). Command line flags are applied on top by the binary.

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::viewer::OverlapPolicy;

/// Default length of the transition window in milliseconds.
pub const DEFAULT_TRANSITION_MS: u64 = 300;

/// Upper bound for `transition_ms`.
pub const MAX_TRANSITION_MS: u64 = 5_000;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// The configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(#[from] config::ConfigError),

    /// The configuration file path is invalid.
    #[error("invalid configuration path: {0}")]
    InvalidPath(String),

    /// A value is out of range.
    #[error("invalid configuration value: {0}")]
    Invalid(String),
}

/// Settings for the recipe viewer and its terminal front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Length of the transition window in milliseconds
    pub transition_ms: u64,
    /// Redraw rate of the interactive view
    pub frame_rate: u32,
    /// What a trigger does while a pick is already pending
    pub overlap: OverlapPolicy,
    /// Whether the fade/scale effect is drawn
    pub animations: bool,
    /// Whether output is colored
    pub colors: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            transition_ms: DEFAULT_TRANSITION_MS,
            frame_rate: 30,
            overlap: OverlapPolicy::default(),
            animations: true,
            colors: true,
        }
    }
}

impl ViewerConfig {
    /// Load configuration, optionally from a TOML file.
    ///
    /// Environment variables with the `QUICKRECIPES_` prefix override file
    /// values, e.g. `QUICKRECIPES_TRANSITION_MS=500`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be parsed, or
    /// holds out-of-range values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            let path_str = path
                .to_str()
                .ok_or_else(|| ConfigError::InvalidPath(format!("{:?}", path)))?;

            if !path.exists() {
                return Err(ConfigError::FileNotFound(path_str.to_string()));
            }

            builder = builder.add_source(File::new(path_str, FileFormat::Toml));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("QUICKRECIPES")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let viewer_config: ViewerConfig = config.try_deserialize()?;
        viewer_config.validated()
    }

    /// Parse configuration from a TOML string, without environment overrides.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        let viewer_config: ViewerConfig = config.try_deserialize()?;
        viewer_config.validated()
    }

    /// The transition window as a [`Duration`].
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Set the transition length in milliseconds.
    pub fn with_transition_ms(mut self, ms: u64) -> Self {
        self.transition_ms = ms;
        self
    }

    /// Set the overlap policy.
    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Enable or disable animations.
    pub fn with_animations(mut self, enabled: bool) -> Self {
        self.animations = enabled;
        self
    }

    /// Enable or disable colors.
    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    /// Check value ranges, returning the configuration unchanged if valid.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.transition_ms > MAX_TRANSITION_MS {
            return Err(ConfigError::Invalid(format!(
                "transition_ms must be at most {}, got {}",
                MAX_TRANSITION_MS, self.transition_ms
            )));
        }
        if !(1..=120).contains(&self.frame_rate) {
            return Err(ConfigError::Invalid(format!(
                "frame_rate must be between 1 and 120, got {}",
                self.frame_rate
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.transition_ms, 300);
        assert_eq!(config.transition_delay(), Duration::from_millis(300));
        assert_eq!(config.overlap, OverlapPolicy::Race);
        assert!(config.animations);
        assert!(config.colors);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ViewerConfig::from_toml_str("overlap = \"debounce\"").unwrap();
        assert_eq!(config.overlap, OverlapPolicy::Debounce);
        assert_eq!(config.transition_ms, DEFAULT_TRANSITION_MS);
        assert_eq!(config.frame_rate, 30);
    }

    #[test]
    fn test_full_toml() {
        let toml = r#"
            transition_ms = 150
            frame_rate = 60
            overlap = "ignore"
            animations = false
            colors = false
        "#;
        let config = ViewerConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.transition_ms, 150);
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.overlap, OverlapPolicy::Ignore);
        assert!(!config.animations);
        assert!(!config.colors);
    }

    #[test]
    fn test_rejects_long_transition() {
        let err = ViewerConfig::from_toml_str("transition_ms = 60000").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("transition_ms"));
    }

    #[test]
    fn test_rejects_zero_frame_rate() {
        let err = ViewerConfig::from_toml_str("frame_rate = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_unknown_overlap_policy() {
        let err = ViewerConfig::from_toml_str("overlap = \"queue-forever\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ViewerConfig::load(Some(Path::new("/nonexistent/quickrecipes.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "transition_ms = 450").unwrap();
        writeln!(file, "frame_rate = 24").unwrap();

        let config = ViewerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.transition_ms, 450);
        assert_eq!(config.frame_rate, 24);
    }

    #[test]
    fn test_validated_after_builder() {
        let err = ViewerConfig::default()
            .with_transition_ms(MAX_TRANSITION_MS + 1)
            .validated()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(ViewerConfig::default().validated().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = ViewerConfig::default()
            .with_transition_ms(10)
            .with_overlap(OverlapPolicy::Ignore)
            .with_animations(false)
            .with_colors(false);
        assert_eq!(config.transition_ms, 10);
        assert_eq!(config.overlap, OverlapPolicy::Ignore);
        assert!(!config.animations);
        assert!(!config.colors);
    }
}
