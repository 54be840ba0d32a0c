//! Chrome configuration.
//!
//! [`ChromeConfig`] collects every tunable of a controller. It can be built
//! in code with the `with_*` methods or loaded from TOML:
//!
//! ```toml
//! border_thickness = 6.0
//! corner_size = 24.0
//! update_behavior = "animate"
//! suppression_policy = "manual"
//! debounce_ms = 10
//! animation_duration_ms = 200
//! easing = "ease_out"
//!
//! [min_size]
//! width = 240.0
//! height = 160.0
//! ```
//!
//! Missing keys keep their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use horizon_chrome_core::logging::targets;

use crate::easing::Easing;
use crate::geometry::{Rect, Size};
use crate::hit_test::{HitTester, WindowStyle};
use crate::layout::{AnimationSettings, UpdateBehavior};
use crate::suppression::SuppressionLevel;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML text is malformed or has wrongly typed values.
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be written as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of range.
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Settings for one chrome controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Width of the resize border in logical pixels.
    pub border_thickness: f32,
    /// Extent of each corner zone along its two edges.
    pub corner_size: f32,
    /// Smallest size a resize or request may produce.
    pub min_size: Size,
    /// Whether border regions resize.
    pub style: WindowStyle,
    /// Whether dragging the client area moves the window.
    pub client_drag: bool,
    /// How settled requests are applied.
    pub update_behavior: UpdateBehavior,
    /// Suppression level restored after programmatic passes.
    pub suppression_policy: SuppressionLevel,
    /// Debounce delay in milliseconds.
    pub debounce_ms: u64,
    /// Length of an animated pass in milliseconds.
    pub animation_duration_ms: u64,
    /// Interpolation steps per animated pass.
    pub animation_steps: u32,
    /// Progress curve for animated passes.
    pub easing: Easing,
    /// Maximum gap between the clicks of a double-click, in milliseconds.
    pub double_click_ms: u64,
    /// Maximized bounds used when the host cannot report its available area.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximized_bounds: Option<Rect>,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            border_thickness: 5.0,
            corner_size: 20.0,
            min_size: Size::new(100.0, 60.0),
            style: WindowStyle::Sizable,
            client_drag: true,
            update_behavior: UpdateBehavior::Static,
            suppression_policy: SuppressionLevel::None,
            debounce_ms: 15,
            animation_duration_ms: 150,
            animation_steps: 10,
            easing: Easing::Linear,
            double_click_ms: 500,
            maximized_bounds: None,
        }
    }
}

impl ChromeConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: ChromeConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Check every value is in range.
    pub fn validate(&self) -> ConfigResult<()> {
        let non_negative = |name: &str, value: f32| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                )))
            }
        };
        non_negative("border_thickness", self.border_thickness)?;
        non_negative("corner_size", self.corner_size)?;
        non_negative("min_size.width", self.min_size.width)?;
        non_negative("min_size.height", self.min_size.height)?;

        if self.animation_steps == 0 {
            return Err(ConfigError::Invalid(
                "animation_steps must be at least 1".into(),
            ));
        }
        if self.debounce_ms >= self.animation_duration_ms {
            return Err(ConfigError::Invalid(format!(
                "debounce_ms ({}) must be shorter than animation_duration_ms ({})",
                self.debounce_ms, self.animation_duration_ms
            )));
        }
        if let Some(bounds) = self.maximized_bounds
            && (!bounds.is_finite() || bounds.is_empty())
        {
            return Err(ConfigError::Invalid(format!(
                "maximized_bounds must be finite and non-empty, got {bounds:?}"
            )));
        }
        Ok(())
    }

    /// Set the border thickness.
    pub fn with_border_thickness(mut self, thickness: f32) -> Self {
        self.border_thickness = thickness;
        self
    }

    /// Set the corner size.
    pub fn with_corner_size(mut self, size: f32) -> Self {
        self.corner_size = size;
        self
    }

    /// Set the minimum window size.
    pub fn with_min_size(mut self, min_size: Size) -> Self {
        self.min_size = min_size;
        self
    }

    /// Set the window style.
    pub fn with_style(mut self, style: WindowStyle) -> Self {
        self.style = style;
        self
    }

    /// Allow or forbid moving the window from the client area.
    pub fn with_client_drag(mut self, enabled: bool) -> Self {
        self.client_drag = enabled;
        self
    }

    /// Set the update behavior.
    pub fn with_update_behavior(mut self, behavior: UpdateBehavior) -> Self {
        self.update_behavior = behavior;
        self
    }

    /// Set the suppression policy.
    pub fn with_suppression_policy(mut self, policy: SuppressionLevel) -> Self {
        self.suppression_policy = policy;
        self
    }

    /// Set the debounce delay.
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce_ms = delay.as_millis() as u64;
        self
    }

    /// Set the animation duration and step count.
    pub fn with_animation(mut self, duration: Duration, steps: u32) -> Self {
        self.animation_duration_ms = duration.as_millis() as u64;
        self.animation_steps = steps;
        self
    }

    /// Set the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the double-click interval.
    pub fn with_double_click_interval(mut self, interval: Duration) -> Self {
        self.double_click_ms = interval.as_millis() as u64;
        self
    }

    /// Set the fallback maximized bounds.
    pub fn with_maximized_bounds(mut self, bounds: Rect) -> Self {
        self.maximized_bounds = Some(bounds);
        self
    }

    /// The debounce delay.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// The double-click interval.
    pub fn double_click_interval(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }

    /// Frame settings for animated passes.
    pub fn animation(&self) -> AnimationSettings {
        AnimationSettings {
            duration: Duration::from_millis(self.animation_duration_ms),
            steps: self.animation_steps,
            easing: self.easing,
        }
    }

    /// A hit tester with this frame geometry.
    pub fn hit_tester(&self) -> HitTester {
        HitTester::new()
            .with_border_thickness(self.border_thickness)
            .with_corner_size(self.corner_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ChromeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.debounce(), Duration::from_millis(15));
        assert_eq!(config.animation().frame_interval(), Duration::from_millis(15));
        assert_eq!(config.hit_tester().corner_size(), 20.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ChromeConfig::from_toml_str(
            r#"
            border_thickness = 8.0
            update_behavior = "animate"
            suppression_policy = "manual"
            easing = "ease_in_out"

            [min_size]
            width = 200.0
            height = 120.0
            "#,
        )
        .unwrap();

        assert_eq!(config.border_thickness, 8.0);
        assert_eq!(config.corner_size, 20.0);
        assert_eq!(config.update_behavior, UpdateBehavior::Animate);
        assert_eq!(config.suppression_policy, SuppressionLevel::Manual);
        assert_eq!(config.easing, Easing::EaseInOut);
        assert_eq!(config.min_size, Size::new(200.0, 120.0));
        assert!(config.client_drag);
    }

    #[test]
    fn test_style_parses_lowercase() {
        let config = ChromeConfig::from_toml_str(r#"style = "fixed""#).unwrap();
        assert_eq!(config.style, WindowStyle::Fixed);
    }

    #[test]
    fn test_parse_error() {
        let err = ChromeConfig::from_toml_str("update_behavior = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_errors() {
        let negative = ChromeConfig::default().with_border_thickness(-1.0);
        assert!(matches!(negative.validate(), Err(ConfigError::Invalid(_))));

        let nan = ChromeConfig::default().with_corner_size(f32::NAN);
        assert!(matches!(nan.validate(), Err(ConfigError::Invalid(_))));

        let no_steps = ChromeConfig::default().with_animation(Duration::from_millis(100), 0);
        assert!(matches!(no_steps.validate(), Err(ConfigError::Invalid(_))));

        let slow_debounce = ChromeConfig::default()
            .with_debounce(Duration::from_millis(200))
            .with_animation(Duration::from_millis(150), 10);
        assert!(matches!(slow_debounce.validate(), Err(ConfigError::Invalid(_))));

        let empty_max = ChromeConfig::default().with_maximized_bounds(Rect::ZERO);
        assert!(matches!(empty_max.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_toml_string_round_trip() {
        let config = ChromeConfig::default()
            .with_style(WindowStyle::Fixed)
            .with_maximized_bounds(Rect::new(0.0, 0.0, 1920.0, 1040.0));
        let text = config.to_toml_string().unwrap();
        assert_eq!(ChromeConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debounce_ms = 5").unwrap();
        writeln!(file, "double_click_ms = 300").unwrap();

        let config = ChromeConfig::load(file.path()).unwrap();
        assert_eq!(config.debounce(), Duration::from_millis(5));
        assert_eq!(config.double_click_interval(), Duration::from_millis(300));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ChromeConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
