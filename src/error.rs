// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error taxonomy for the solar pipeline.
//!
//! Every stage is deterministic, so no error here is transient: a failed
//! date fails the same way on every call.

use std::fmt;
use thiserror::Error;

/// Result type for pipeline operations.
pub type SolarResult<T> = Result<T, SolarError>;

/// Why the Sun has no rise/set crossing on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolarCondition {
    /// The Sun stays above the horizon all day (midnight sun).
    PolarDay,
    /// The Sun stays below the horizon all day.
    PolarNight,
}

impl fmt::Display for PolarCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolarCondition::PolarDay => f.write_str("polar day"),
            PolarCondition::PolarNight => f.write_str("polar night"),
        }
    }
}

/// Errors produced while validating input or evaluating a stage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolarError {
    /// Latitude is not finite or lies on (or beyond) a pole.
    #[error("latitude {0}° must be finite and strictly between -90° and 90°")]
    InvalidLatitude(f64),

    /// Longitude is not finite or lies outside `[-180, 180]`.
    #[error("longitude {0}° must be finite and within [-180°, 180°]")]
    InvalidLongitude(f64),

    /// UTC offset (hours) is not finite.
    #[error("UTC offset {0} h must be finite")]
    InvalidUtcOffset(f64),

    /// Daylight-saving adjustment (days) is not finite.
    #[error("daylight-saving adjustment {0} d must be finite")]
    InvalidDstAdjustment(f64),

    /// The sunrise hour-angle equation has no solution on this date.
    #[error("no sunrise or sunset on this date ({0})")]
    NoSunriseSunset(PolarCondition),

    /// Azimuth is undefined: the Sun is at the zenith or nadir.
    #[error("solar azimuth undefined at zenith angle {zenith}°")]
    UndefinedAzimuth { zenith: f64 },

    /// An inverse-trigonometric argument left `[-1, 1]` (or was NaN).
    #[error("{stage}: argument {argument} outside the domain [-1, 1]")]
    Domain { stage: &'static str, argument: f64 },

    /// A fractional day could not be turned into a clock time.
    #[error("fraction of day {0} is not representable as a time of day")]
    UnrepresentableTime(f64),

    /// The requested date span is empty or not representable.
    #[error("invalid date span: {0}")]
    InvalidSpan(String),

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SolarError {
    /// `true` when the failure is a physical condition (polar day/night,
    /// Sun at zenith) rather than bad input.
    pub fn is_physical(&self) -> bool {
        matches!(
            self,
            SolarError::NoSunriseSunset(_) | SolarError::UndefinedAzimuth { .. }
        )
    }
}

/// `acos` that refuses arguments outside `[-1, 1]` instead of returning NaN.
pub(crate) fn checked_acos(stage: &'static str, argument: f64) -> SolarResult<f64> {
    if (-1.0..=1.0).contains(&argument) {
        Ok(argument.acos())
    } else {
        Err(SolarError::Domain { stage, argument })
    }
}
