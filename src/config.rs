//! Configuration management and validation.
//!
//! Provides the pattern lists consumed by the line filter, the currency
//! symbol used in cassette reports and the report format for a run.
//!
//! Configuration files are line-oriented `key=value` text:
//!
//! ```text
//! # keyword allow-list, comma separated; `\,` keeps a literal comma
//! logKeywordPatterns=CARD INSERTED,\[INFO:10\],DSP--
//! logRemovePatterns=\[DEBUG:20\]
//! currencySymbol=Rp
//! ```

use crate::app::models::ReportFormat;
use crate::constants;
use crate::{Error, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Effective settings for one processing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Keyword allow-list (regex sources, combined as one alternation)
    pub keyword_patterns: Vec<String>,

    /// Spans removed from reported lines (regex sources)
    pub remove_patterns: Vec<String>,

    /// Symbol prefixed to currency amounts
    pub currency_symbol: String,

    /// Output strategy
    pub format: ReportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keyword_patterns: constants::DEFAULT_KEYWORD_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            remove_patterns: constants::DEFAULT_REMOVE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            currency_symbol: constants::DEFAULT_CURRENCY_SYMBOL.to_string(),
            format: ReportFormat::default(),
        }
    }
}

impl Config {
    /// Platform location of the optional configuration file
    pub fn default_config_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir
            .join(constants::CONFIG_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME))
    }

    /// Resolve configuration: explicit file, then the platform file, then defaults
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_file {
            info!("Using config file: {}", path.display());
            return Self::load_from_file(path);
        }

        match Self::default_config_path() {
            Ok(path) if path.is_file() => {
                info!("Using config file: {}", path.display());
                Self::load_from_file(&path)
            }
            _ => {
                info!("No config file found, using built-in patterns");
                Ok(Self::default())
            }
        }
    }

    /// Load a configuration file over the built-in defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file '{}'", path.display()),
                e,
            )
        })?;

        Self::load_from_str(&content)
    }

    /// Parse `key=value` text over the built-in defaults
    pub fn load_from_str(content: &str) -> Result<Self> {
        let values = parse_key_values(content);
        let mut config = Self::default();

        if let Some(value) = values.get(constants::CONFIG_KEY_KEYWORDS) {
            let patterns = split_by_comma(value);
            if patterns.is_empty() {
                debug!("Empty keyword pattern list, keeping defaults");
            } else {
                config.keyword_patterns = patterns;
            }
        }

        if let Some(value) = values.get(constants::CONFIG_KEY_REMOVE) {
            let patterns = split_by_comma(value);
            if patterns.is_empty() {
                debug!("Empty remove pattern list, keeping defaults");
            } else {
                config.remove_patterns = patterns;
            }
        }

        if let Some(value) = values.get(constants::CONFIG_KEY_CURRENCY) {
            if !value.is_empty() {
                config.currency_symbol = value.clone();
            }
        }

        debug!(
            "Loaded {} keyword and {} remove patterns",
            config.keyword_patterns.len(),
            config.remove_patterns.len()
        );

        config.validate()?;
        Ok(config)
    }

    /// Set the report format
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the currency symbol
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Replace the keyword allow-list
    pub fn with_keyword_patterns(mut self, patterns: Vec<String>) -> Self {
        self.keyword_patterns = patterns;
        self
    }

    /// Replace the remove patterns
    pub fn with_remove_patterns(mut self, patterns: Vec<String>) -> Self {
        self.remove_patterns = patterns;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<()> {
        if self.keyword_patterns.is_empty() {
            return Err(Error::configuration(
                "Keyword pattern list cannot be empty".to_string(),
            ));
        }

        if self.currency_symbol.trim().is_empty() {
            return Err(Error::configuration(
                "Currency symbol cannot be empty".to_string(),
            ));
        }

        if self.currency_symbol.contains(['\r', '\n']) {
            return Err(Error::configuration(
                "Currency symbol must be a single line".to_string(),
            ));
        }

        Ok(())
    }
}

/// Collect trimmed `key=value` pairs; blank and `#` lines are skipped, last key wins
fn parse_key_values(content: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.split_once('=') {
            Some((key, value)) => {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => debug!("Ignoring config line without '=': {}", line),
        }
    }

    values
}

/// Split a comma-separated list where `\` escapes the next character
///
/// The backslash is kept in the item because items are regex sources
/// (`\[INFO:10\]` must reach the regex engine unchanged). Items are trimmed
/// and empty items dropped.
pub fn split_by_comma(value: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ',' => {
                push_trimmed(&mut items, &current);
                current.clear();
            }
            _ => current.push(c),
        }
    }
    push_trimmed(&mut items, &current);

    items
}

fn push_trimmed(items: &mut Vec<String>, item: &str) {
    let trimmed = item.trim();
    if !trimmed.is_empty() {
        items.push(trimmed.to_string());
    }
}
