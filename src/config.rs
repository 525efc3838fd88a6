// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Highlighter configuration.
//!
//! Every policy the highlighter supports is selected here: how date tokens are
//! delimited, how distance is counted, how distances are bucketed and how
//! buckets are colored. Configuration can be built in code or loaded from TOML:
//!
//! ```toml
//! boundary = "word-boundary"
//! distance = "business"
//! quiet_period_ms = 300
//! reference_date = 2024-06-15
//!
//! [bucketing]
//! policy = "linear"
//! cap = 30
//!
//! [colors]
//! scheme = "rgb"
//! near = "#ff0000"
//! far = "#0000ff"
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::dates::{BoundaryPolicy, DistanceMode};
use crate::error::{Error, Result};
use crate::highlight::{BucketPolicy, ColorScheme};

/// Default quiet period between the last text change and the next update.
pub const DEFAULT_QUIET_PERIOD_MS: u64 = 200;

/// Longest quiet period accepted by [`HighlightConfig::validate`].
pub const MAX_QUIET_PERIOD_MS: u64 = 60_000;

/// Complete configuration of one highlighter instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightConfig {
    /// How a date token must be delimited from surrounding text
    pub boundary: BoundaryPolicy,
    /// Calendar days or business days
    pub distance: DistanceMode,
    /// Distance to category mapping
    pub bucketing: BucketPolicy,
    /// Category to color mapping
    pub colors: ColorScheme,
    /// Debounce delay for text changes, in milliseconds
    pub quiet_period_ms: u64,
    /// Fixed "today". When unset, today is read from the local clock on every run.
    /// Accepts a TOML local date or a quoted `yyyy-MM-dd` string.
    #[serde(deserialize_with = "deserialize_reference_date")]
    pub reference_date: Option<NaiveDate>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            boundary: BoundaryPolicy::default(),
            distance: DistanceMode::default(),
            bucketing: BucketPolicy::default(),
            colors: ColorScheme::default(),
            quiet_period_ms: DEFAULT_QUIET_PERIOD_MS,
            reference_date: None,
        }
    }
}

impl HighlightConfig {
    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Checks that every policy holds values the engine can work with.
    pub fn validate(&self) -> Result<()> {
        self.bucketing.validate()?;
        self.colors.validate()?;
        if self.quiet_period_ms > MAX_QUIET_PERIOD_MS {
            return Err(Error::Config(format!(
                "quiet_period_ms must be at most {MAX_QUIET_PERIOD_MS}, got {}",
                self.quiet_period_ms
            )));
        }
        Ok(())
    }

    /// Returns the debounce delay as a [`Duration`].
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    /// Pins "today" to the given `yyyy-MM-dd` date.
    pub fn with_reference_date(mut self, date: &str) -> Result<Self> {
        self.reference_date = Some(parse_reference_date(date)?);
        Ok(self)
    }
}

fn parse_reference_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| Error::InvalidDate(format!("{date}: {e}")))
}

fn deserialize_reference_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ReferenceDateVisitor).map(Some)
}

/// Reads either a plain string or the single-entry map `toml` uses for its
/// native date values.
struct ReferenceDateVisitor;

impl<'de> Visitor<'de> for ReferenceDateVisitor {
    type Value = NaiveDate;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a yyyy-MM-dd date")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<NaiveDate, E> {
        parse_reference_date(value).map_err(E::custom)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<NaiveDate, A::Error> {
        match map.next_entry::<String, String>()? {
            Some((_, value)) => self.visit_str(&value),
            None => Err(de::Error::invalid_length(0, &self)),
        }
    }
}
