// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Configuration system

use crate::axis::{
    normalize_with_span, AxisBounds, AxisRenderResult, AxisRenderer, AxisStyle, BackgroundTheme,
    UnitSystem, DEFAULT_SPAN,
};
use crate::factory::{FactoryOptions, NodeFactory};
use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "scadgen.toml";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for node construction
    pub nodes: FactoryOptions,
    /// Axis overlay defaults
    pub axis: AxisConfig,
}

/// Axis overlay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub unit_system: UnitSystem,
    pub theme: BackgroundTheme,
    /// Span a zero-length range is reset to
    pub default_span: f64,
    pub metric_style: AxisStyle,
    pub imperial_style: AxisStyle,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            theme: BackgroundTheme::Light,
            default_span: DEFAULT_SPAN,
            metric_style: AxisStyle::for_unit(UnitSystem::Metric),
            imperial_style: AxisStyle::for_unit(UnitSystem::Imperial),
        }
    }
}

impl AxisConfig {
    pub fn style(&self, unit_system: UnitSystem) -> AxisStyle {
        match unit_system {
            UnitSystem::Metric => self.metric_style,
            UnitSystem::Imperial => self.imperial_style,
        }
    }

    /// Normalize `bounds` and render the overlay with the configured style
    pub fn generate(
        &self,
        bounds: AxisBounds,
        unit_system: UnitSystem,
        theme: BackgroundTheme,
    ) -> AxisRenderResult {
        let normalized = normalize_with_span(bounds, unit_system, self.default_span);
        AxisRenderer::new(self.style(unit_system)).render(&normalized, unit_system, theme)
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            debug!("loading {}", CONFIG_FILE);
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `SCADGEN_*` overrides; unparsable values are ignored
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(unit) = lookup("SCADGEN_UNIT") {
            match unit.parse() {
                Ok(unit) => self.axis.unit_system = unit,
                Err(e) => warn!("SCADGEN_UNIT: {}", e),
            }
        }

        if let Some(theme) = lookup("SCADGEN_THEME") {
            match theme.parse() {
                Ok(theme) => self.axis.theme = theme,
                Err(e) => warn!("SCADGEN_THEME: {}", e),
            }
        }

        if let Some(height) = lookup("SCADGEN_TOOL_HEIGHT") {
            match height.parse() {
                Ok(height) => self.nodes.tool_height = height,
                Err(_) => warn!("SCADGEN_TOOL_HEIGHT: not a number: {}", height),
            }
        }

        if let Some(resolution) = lookup("SCADGEN_RESOLUTION") {
            match resolution.parse() {
                Ok(resolution) => self.nodes.resolution = resolution,
                Err(_) => warn!("SCADGEN_RESOLUTION: not an integer: {}", resolution),
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Node factory using the configured defaults
    pub fn factory(&self) -> NodeFactory {
        NodeFactory::with_options(self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scadgen.toml");

        let mut config = Config::default();
        config.axis.unit_system = UnitSystem::Imperial;
        config.axis.default_span = 120.0;
        config.nodes.resolution = 48;
        config.save(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[axis]\ntheme = \"dark\"\n").unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.axis.theme, BackgroundTheme::Dark);
        assert_eq!(loaded.axis.default_span, DEFAULT_SPAN);
        assert_eq!(loaded.nodes, FactoryOptions::default());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("SCADGEN_UNIT", "imperial"),
            ("SCADGEN_THEME", "neon"),
            ("SCADGEN_TOOL_HEIGHT", "0.01"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.axis.unit_system, UnitSystem::Imperial);
        assert_eq!(config.axis.theme, BackgroundTheme::Light);
        assert_eq!(config.nodes.tool_height, 0.01);
    }

    #[test]
    fn test_configured_span() {
        let mut config = AxisConfig::default();
        config.default_span = 100.0;
        let result = config.generate(
            AxisBounds::from_raw(1.0, 1.0, 1.0, 1.0, 1.0, 1.0),
            UnitSystem::Metric,
            BackgroundTheme::Light,
        );
        assert_eq!(result.module_name, "axis_light_100x100x100_mm");
    }
}
