//! Startup configuration read from `SNAKEY_*` environment variables.

use std::time::Duration;

use thiserror::Error;

use crate::animation::DEFAULT_ANIMATION_UNIT;
use crate::geometry::DEFAULT_X_PADDING;

const ENV_ANIM_MS: &str = "SNAKEY_ANIM_MS";
const ENV_X_PADDING: &str = "SNAKEY_X_PADDING";
const ENV_ROW_HEIGHT: &str = "SNAKEY_ROW_HEIGHT";
const ENV_LINE_WIDTH: &str = "SNAKEY_LINE_WIDTH";
const ENV_ANIMATE: &str = "SNAKEY_ANIMATE";

const DEFAULT_ROW_HEIGHT: i32 = 44;
const DEFAULT_LINE_WIDTH: f64 = 1.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?} is not a valid {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Stagger step between rows and length of each draw-on.
    pub animation_unit: Duration,
    /// Horizontal inset of the connector arcs.
    pub x_padding: f64,
    /// Fixed row height in pixels.
    pub row_height: i32,
    /// Connector stroke width in pixels.
    pub line_width: f64,
    /// Animate connectors while the list first appears.
    pub animate_first_appearance: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            animation_unit: DEFAULT_ANIMATION_UNIT,
            x_padding: DEFAULT_X_PADDING,
            row_height: DEFAULT_ROW_HEIGHT,
            line_width: DEFAULT_LINE_WIDTH,
            animate_first_appearance: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset or blank keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        if let Some(raw) = get(ENV_ANIM_MS) {
            let ms = raw
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| invalid(ENV_ANIM_MS, &raw, "positive number of milliseconds"))?;
            config.animation_unit = Duration::from_millis(ms);
        }

        if let Some(raw) = get(ENV_X_PADDING) {
            config.x_padding = raw
                .parse::<f64>()
                .ok()
                .filter(|px| px.is_finite() && *px >= 0.0)
                .ok_or_else(|| invalid(ENV_X_PADDING, &raw, "non-negative pixel size"))?;
        }

        if let Some(raw) = get(ENV_ROW_HEIGHT) {
            config.row_height = raw
                .parse::<i32>()
                .ok()
                .filter(|px| *px > 0)
                .ok_or_else(|| invalid(ENV_ROW_HEIGHT, &raw, "positive pixel height"))?;
        }

        if let Some(raw) = get(ENV_LINE_WIDTH) {
            config.line_width = raw
                .parse::<f64>()
                .ok()
                .filter(|px| px.is_finite() && *px > 0.0)
                .ok_or_else(|| invalid(ENV_LINE_WIDTH, &raw, "positive pixel width"))?;
        }

        if let Some(raw) = get(ENV_ANIMATE) {
            config.animate_first_appearance =
                parse_flag(&raw).ok_or_else(|| invalid(ENV_ANIMATE, &raw, "boolean"))?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(key: &'static str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.animation_unit, Duration::from_millis(250));
        assert_eq!(config.x_padding, 36.0);
        assert_eq!(config.row_height, 44);
        assert!(config.animate_first_appearance);
    }

    #[test]
    fn test_values_are_parsed() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_ANIM_MS, "120"),
            (ENV_X_PADDING, " 24.5 "),
            (ENV_ROW_HEIGHT, "60"),
            (ENV_LINE_WIDTH, "2"),
            (ENV_ANIMATE, "off"),
        ]))
        .unwrap();
        assert_eq!(config.animation_unit, Duration::from_millis(120));
        assert_eq!(config.x_padding, 24.5);
        assert_eq!(config.row_height, 60);
        assert_eq!(config.line_width, 2.0);
        assert!(!config.animate_first_appearance);
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_ANIM_MS, "  ")])).unwrap();
        assert_eq!(config.animation_unit, DEFAULT_ANIMATION_UNIT);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_ANIM_MS, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_ANIM_MS, .. }));

        let err = AppConfig::from_lookup(lookup(&[(ENV_X_PADDING, "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_X_PADDING, .. }));

        let err = AppConfig::from_lookup(lookup(&[(ENV_ROW_HEIGHT, "tall")])).unwrap_err();
        assert!(err.to_string().contains(ENV_ROW_HEIGHT));

        let err = AppConfig::from_lookup(lookup(&[(ENV_ANIMATE, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_ANIMATE, .. }));
    }

    #[test]
    fn test_flag_spellings() {
        for raw in ["1", "true", "YES", "On"] {
            assert_eq!(parse_flag(raw), Some(true), "{raw}");
        }
        for raw in ["0", "false", "No", "OFF"] {
            assert_eq!(parse_flag(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_flag("2"), None);
    }
}
