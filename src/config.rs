// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! TOML configuration of an observer and a table span.
//!
//! ```toml
//! [observer]
//! latitude = 34.0522
//! longitude = -118.2437
//! utc_offset = -8.0
//! dst_adjustment = 0.0   # days, optional
//!
//! [table]                # optional
//! start_date = "2019-01-01"
//! years = 1              # optional
//! ```

use chrono::NaiveDate;
use qtty::{Days, Degrees, Hours};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{SolarError, SolarResult};
use crate::observer::Observer;
use crate::table::DateSpan;

/// Configuration file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunrisetConfig {
    pub observer: ObserverSettings,
    #[serde(default)]
    pub table: Option<TableSettings>,
}

/// Observer settings, in degrees, hours and days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverSettings {
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset: f64,
    #[serde(default)]
    pub dst_adjustment: f64,
}

/// Table span settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSettings {
    pub start_date: NaiveDate,
    #[serde(default = "default_years")]
    pub years: u32,
}

fn default_years() -> u32 {
    1
}

impl SunrisetConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// [`SolarError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SolarResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SolarError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        content.parse()
    }

    /// Validated observer.
    ///
    /// # Errors
    /// The [`Observer::new`] and [`Observer::with_dst_adjustment`] validation
    /// errors.
    pub fn observer(&self) -> SolarResult<Observer> {
        let s = &self.observer;
        Observer::new(
            Degrees::new(s.latitude),
            Degrees::new(s.longitude),
            Hours::new(s.utc_offset),
        )?
        .with_dst_adjustment(Days::new(s.dst_adjustment))
    }

    /// Span of the `[table]` section, if present.
    ///
    /// # Errors
    /// [`SolarError::InvalidSpan`] for a zero-year or unrepresentable span.
    pub fn span(&self) -> SolarResult<Option<DateSpan>> {
        self.table
            .as_ref()
            .map(|t| DateSpan::years(t.start_date, t.years))
            .transpose()
    }
}

impl FromStr for SunrisetConfig {
    type Err = SolarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(|e| SolarError::Config(format!("failed to parse config: {e}")))
    }
}
