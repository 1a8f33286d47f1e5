// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar Ephemeris Module
//!
//! NOAA solar calculator for a civil date and an observer: sunrise, solar
//! noon, sunset, day length and the Sun's position at local noon.
//!
//! # Core types
//!
//! - [`Observer`] — validated latitude, longitude, UTC offset and
//!   daylight-saving adjustment.
//! - [`JulianDay`] — local Julian Day with the banded Julian Century lookup.
//! - [`SolarDay`] — every intermediate of the pipeline for one date.
//! - [`SolarEvents`] — sunrise, sunset and solar noon since local midnight.
//! - [`DateSpan`] / [`SolarTable`] — row-per-date tables over a range.
//! - [`SolarError`] — validation failures and polar conditions.
//!
//! # Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | civil date → Julian Day → Julian Century | [`julian`] |
//! | mean elements, obliquity, declination, equation of time, sunrise hour angle | [`orbit`] |
//! | solar noon, sunrise, sunset, day length | [`clock`] |
//! | true solar time, hour angle, zenith, elevation, azimuth | [`position`] |
//! | atmospheric refraction | [`refraction`] |
//!
//! Angles and times are [`qtty`] quantities (`Degrees`, `Minutes`, `Days`, …),
//! so a radian value cannot reach a degree parameter.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use qtty::{Degrees, Hours};
//! use sunriset::{Observer, SolarDay};
//!
//! let la = Observer::new(Degrees::new(34.0522), Degrees::new(-118.2437), Hours::new(-8.0))?;
//! let day = SolarDay::compute(NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(), &la)?;
//! assert!(day.sunrise < day.solar_noon && day.solar_noon < day.sunset);
//! # Ok::<(), sunriset::SolarError>(())
//! ```

pub mod clock;
#[cfg(feature = "config")]
mod config;
mod error;
pub mod julian;
mod observer;
pub mod orbit;
mod pipeline;
pub mod position;
pub mod refraction;
mod table;

// ── Re-exports ────────────────────────────────────────────────────────────

#[cfg(feature = "config")]
pub use config::{ObserverSettings, SunrisetConfig, TableSettings};
pub use error::{PolarCondition, SolarError, SolarResult};
pub use julian::JulianDay;
pub use observer::Observer;
pub use pipeline::{compute_solar_events, ColumnValue, SolarDay, SolarEvents, COLUMN_COUNT};
pub use table::{DateSpan, SolarTable, TableRow};
