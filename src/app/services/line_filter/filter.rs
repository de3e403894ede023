//! Keyword classification and prefix normalization
//!
//! The filter is compiled once per run from the configured pattern lists.
//! Every pattern keeps a literal fallback, so matching never fails.

use crate::config::Config;
use crate::constants;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static TIMESTAMP_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4} \d{2}:\d{2}:\d{2}\.\d{3}").unwrap());

static LEADING_TID_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[TID:0x[A-Fa-f0-9]+\]\s*").unwrap());

static LEADING_LEVEL_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[[A-Z]+:\d+\]\s*").unwrap());

static CONTENT_TAGS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\[TID:0x[0-9A-Fa-f]+\]",
        r"\[INFO:\d+\]",
        r"\[PRINT:\d+\]",
        r"\[DEBUG:\d+\]",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Keyword allow-list, compiled or literal
#[derive(Debug, Clone)]
enum KeywordMatcher {
    Combined(Regex),
    Literal(Vec<String>),
}

/// One remove pattern, compiled or literal
#[derive(Debug, Clone)]
enum RemovePattern {
    Compiled(Regex),
    Literal(String),
}

impl RemovePattern {
    fn apply(&self, text: &str) -> String {
        match self {
            RemovePattern::Compiled(regex) => regex.replace_all(text, "").into_owned(),
            RemovePattern::Literal(literal) if literal.is_empty() => text.to_string(),
            RemovePattern::Literal(literal) => text.replace(literal.as_str(), ""),
        }
    }
}

/// Decides which journal lines are reported and rewrites their prefix
#[derive(Debug, Clone)]
pub struct PatternFilter {
    keywords: KeywordMatcher,
    remove_patterns: Vec<RemovePattern>,
}

impl PatternFilter {
    /// Compile keyword and remove patterns, falling back to literals on error
    pub fn new(keyword_patterns: &[String], remove_patterns: &[String]) -> Self {
        let keywords = if keyword_patterns.is_empty() {
            KeywordMatcher::Literal(Vec::new())
        } else {
            let combined = format!("({})", keyword_patterns.join("|"));
            match Regex::new(&combined) {
                Ok(regex) => KeywordMatcher::Combined(regex),
                Err(e) => {
                    warn!(
                        "Keyword patterns do not compile, matching them literally: {}",
                        e
                    );
                    KeywordMatcher::Literal(keyword_patterns.to_vec())
                }
            }
        };

        let remove_patterns = remove_patterns
            .iter()
            .map(|pattern| match Regex::new(pattern) {
                Ok(regex) => RemovePattern::Compiled(regex),
                Err(e) => {
                    warn!(
                        "Remove pattern '{}' does not compile, removing it literally: {}",
                        pattern, e
                    );
                    RemovePattern::Literal(pattern.clone())
                }
            })
            .collect();

        Self {
            keywords,
            remove_patterns,
        }
    }

    /// Build a filter from the configured pattern lists
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.keyword_patterns, &config.remove_patterns)
    }

    /// Whether the line is kept; fixed noise exclusions beat the allow-list
    pub fn classify(&self, line: &str) -> bool {
        if constants::NOISE_MARKERS
            .iter()
            .any(|marker| line.contains(marker))
        {
            return false;
        }

        match &self.keywords {
            KeywordMatcher::Combined(regex) => regex.is_match(line),
            KeywordMatcher::Literal(keywords) => keywords
                .iter()
                .any(|keyword| !keyword.is_empty() && line.contains(keyword.as_str())),
        }
    }

    /// Remove every span matched by a remove pattern, in configured order
    pub fn remove_spans(&self, line: &str) -> String {
        self.remove_patterns
            .iter()
            .fold(line.to_string(), |text, pattern| pattern.apply(&text))
    }

    /// Rewrite a kept line as `timestamp + 4 spaces + content`
    ///
    /// Without a leading timestamp only the remove patterns apply.
    pub fn normalize(&self, line: &str) -> String {
        let filtered = self.remove_spans(line);

        let Some(timestamp) = TIMESTAMP_PREFIX.find(line).map(|m| m.as_str()) else {
            return filtered;
        };

        let content = filtered.strip_prefix(timestamp).unwrap_or(&filtered);
        let content = LEADING_TID_TAG.replace(content, "");
        let content = LEADING_LEVEL_TAG.replace(&content, "");
        let content = content.trim_start();

        format!("{}{}{}", timestamp, constants::TIMESTAMP_GAP, content)
    }

    /// Text column of a Standard row: timestamp and journal tags removed, trimmed
    pub fn clean_content(&self, line: &str) -> String {
        let filtered = self.remove_spans(line);

        let Some(timestamp) = TIMESTAMP_PREFIX.find(line).map(|m| m.as_str()) else {
            return filtered.trim().to_string();
        };

        let content = filtered.strip_prefix(timestamp).unwrap_or(&filtered);
        let content = CONTENT_TAGS
            .iter()
            .fold(content.to_string(), |text, tag| {
                tag.replace_all(&text, "").into_owned()
            });

        content.trim().to_string()
    }

    /// Whether the keyword list fell back to literal matching as a whole
    ///
    /// One bad keyword breaks the combined alternation, so every keyword is
    /// then matched as a substring.
    pub fn keywords_are_literal(&self) -> bool {
        matches!(self.keywords, KeywordMatcher::Literal(_))
    }

    /// Whether every configured pattern compiled
    pub fn is_fully_compiled(&self) -> bool {
        matches!(self.keywords, KeywordMatcher::Combined(_))
            && self
                .remove_patterns
                .iter()
                .all(|pattern| matches!(pattern, RemovePattern::Compiled(_)))
    }
}

impl Default for PatternFilter {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
