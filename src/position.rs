// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Topocentric solar position: true solar time, hour angle, zenith,
//! elevation and azimuth.
//!
//! The daily pipeline evaluates these at local clock noon; the
//! `*_at` variants accept any time of day.

use qtty::{Days, Degrees, Hours, Minutes};

use crate::error::{SolarError, SolarResult};
use crate::orbit::{normalize_degrees, to_degrees};

const MINUTES_PER_DAY: f64 = 1440.0;
const MINUTES_PER_DEGREE: f64 = 4.0;

/// Rounding slack accepted on the azimuth `acos` argument before the value
/// is treated as undefined.
const AZIMUTH_TOLERANCE: f64 = 1e-9;

/// True solar time at local clock noon, in `[0, 1440)` minutes.
pub fn true_solar_time(
    equation_of_time: Minutes,
    longitude: Degrees,
    utc_offset: Hours,
) -> Minutes {
    true_solar_time_at(equation_of_time, longitude, utc_offset, Days::new(0.5))
}

/// True solar time at `time_of_day` (fraction of the local civil day).
pub fn true_solar_time_at(
    equation_of_time: Minutes,
    longitude: Degrees,
    utc_offset: Hours,
    time_of_day: Days,
) -> Minutes {
    let minutes = time_of_day.value() * MINUTES_PER_DAY + equation_of_time.value()
        + MINUTES_PER_DEGREE * longitude.value()
        - 60.0 * utc_offset.value();
    Minutes::new(minutes.rem_euclid(MINUTES_PER_DAY))
}

/// Hour angle from true solar time: zero at true solar noon, negative in the
/// morning.
pub fn hour_angle(true_solar_time: Minutes) -> Degrees {
    let quarter = true_solar_time.value() / MINUTES_PER_DEGREE;
    if quarter < 0.0 {
        Degrees::new(quarter + 180.0)
    } else {
        Degrees::new(quarter - 180.0)
    }
}

/// Solar zenith angle in `[0°, 180°]`.
///
/// The cosine is clamped into `[-1, 1]` so rounding at the exact zenith or
/// nadir cannot leave the `acos` domain.
///
/// # Errors
/// [`SolarError::Domain`] if any input is NaN.
pub fn solar_zenith_angle(
    latitude: Degrees,
    declination: Degrees,
    hour_angle: Degrees,
) -> SolarResult<Degrees> {
    let argument = latitude.sin() * declination.sin()
        + latitude.cos() * declination.cos() * hour_angle.cos();
    if argument.is_nan() {
        return Err(SolarError::Domain {
            stage: "solar zenith angle",
            argument,
        });
    }
    Ok(to_degrees(argument.clamp(-1.0, 1.0).acos()))
}

/// Geometric elevation, `90° − zenith`.
#[inline]
pub fn solar_elevation_angle(zenith: Degrees) -> Degrees {
    Degrees::new(90.0) - zenith
}

/// Elevation lifted by atmospheric refraction.
#[inline]
pub fn corrected_elevation(refraction: Degrees, elevation: Degrees) -> Degrees {
    refraction + elevation
}

/// Solar azimuth measured clockwise from north, in `[0°, 360°)`.
///
/// # Errors
/// [`SolarError::UndefinedAzimuth`] when the Sun sits at the zenith or nadir
/// (`sin zenith = 0`) or the `acos` argument falls outside `[-1, 1]` by more
/// than rounding.
pub fn solar_azimuth(
    hour_angle: Degrees,
    latitude: Degrees,
    zenith: Degrees,
    declination: Degrees,
) -> SolarResult<Degrees> {
    let argument =
        (latitude.sin() * zenith.cos() - declination.sin()) / (latitude.cos() * zenith.sin());
    if !argument.is_finite() || argument.abs() > 1.0 + AZIMUTH_TOLERANCE {
        return Err(SolarError::UndefinedAzimuth {
            zenith: zenith.value(),
        });
    }

    let angle = to_degrees(argument.clamp(-1.0, 1.0).acos());
    if hour_angle.value() > 0.0 {
        Ok(normalize_degrees(angle + Degrees::new(180.0)))
    } else {
        Ok(normalize_degrees(Degrees::new(540.0) - angle))
    }
}
