// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use versit::{FormatOptions, VersitType};

use crate::cli::APP_NAME;

const VERSIT_CONFIG_ENV: &str = "VERSIT_CONFIG";

/// Loads the configuration.
///
/// The file is taken from `path`, then from `$VERSIT_CONFIG`, then from the
/// user config directory. Only a missing default file is tolerated.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid config.
#[tracing::instrument]
pub fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let env_path = std::env::var_os(VERSIT_CONFIG_ENV).map(PathBuf::from);
    let Some(path) = path.or(env_path) else {
        let Some(path) = default_config_path() else {
            tracing::debug!("no config directory, using defaults");
            return Ok(Config::default());
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        return read_config(&path);
    };

    read_config(&path)
}

fn read_config(path: &Path) -> Result<Config, Box<dyn Error>> {
    fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse()
        .map_err(|e| format!("Invalid config file at {}: {}", path.display(), e).into())
}

/// Configuration for the versit command-line tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Format for documents without their own, e.g. `2.1` or `ical`.
    pub format: Option<String>,

    /// Charset label of the output, e.g. `utf-8` or `latin1`.
    pub charset: Option<String>,

    /// Whether the output must be plain 7-bit ASCII.
    #[serde(default)]
    pub ascii: bool,

    /// Maximum line length; `0` disables folding.
    pub line_length: Option<usize>,
}

impl Config {
    /// The configured default format, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the format label is unknown.
    pub fn versit_type(&self) -> Result<Option<VersitType>, Box<dyn Error>> {
        let Some(format) = self.format.as_deref() else {
            return Ok(None);
        };
        let versit_type = format
            .parse()
            .map_err(|_| format!("Unknown format in config: {format}"))?;
        Ok(Some(versit_type))
    }

    /// Formatting options derived from `line_length`.
    #[must_use]
    pub fn format_options(&self) -> FormatOptions {
        match self.line_length {
            None => FormatOptions::default(),
            Some(0) => FormatOptions::default().folding(None),
            Some(n) => FormatOptions::default().folding(Some(n)),
        }
    }
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn default_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
}

fn get_config_dir() -> Option<PathBuf> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: Config = r#"
format = "2.1"
charset = "latin1"
ascii = true
line_length = 0
"#
        .parse()
        .unwrap();
        assert_eq!(config.versit_type().unwrap(), Some(VersitType::VCard21));
        assert_eq!(config.charset.as_deref(), Some("latin1"));
        assert!(config.ascii);
        assert_eq!(config.format_options().folding, None);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.versit_type().unwrap(), None);
        assert_eq!(config.format_options().folding, Some(76));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!("colour = \"red\"".parse::<Config>().is_err());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let config: Config = "format = \"5.0\"".parse().unwrap();
        assert!(config.versit_type().is_err());
    }

    #[test]
    fn test_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "format = \"ical\"\nline_length = 60\n").unwrap();

        let config = parse_config(Some(path)).unwrap();
        assert_eq!(config.versit_type().unwrap(), Some(VersitType::ICalendar20));
        assert_eq!(config.format_options().folding, Some(60));
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");
        let err = parse_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
