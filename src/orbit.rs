// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Orbital and geometric stages of the NOAA solar algorithm.
//!
//! Each function is a closed-form expression of the Julian Century (or of
//! earlier stages).  Angles travel as [`Degrees`]; the conversion to radians
//! happens inside the trigonometric calls, so a caller cannot hand a radian
//! value to a degree parameter.
//!
//! ```text
//! T ─┬─ L0 (mean longitude) ─────────────┬─ L (true longitude) ─ λ (apparent) ─┬─ α, δ
//!    ├─ M  (mean anomaly) ── C (centre) ─┴─ ν (true anomaly) ─ R              │
//!    ├─ e  (eccentricity)                                                      │
//!    └─ ε0 (mean obliquity) ─ ε (corrected) ───────────────────────────────────┘
//! ```
//!
//! ## References
//! * NOAA Global Monitoring Laboratory, *Solar Calculation Details* spreadsheet
//! * Jean Meeus, *Astronomical Algorithms* (2nd ed. 1998), ch. 22 and 25

use qtty::{AstronomicalUnits, Centuries, Degree, Degrees, Minutes, Radian, Radians};

use crate::error::{checked_acos, PolarCondition, SolarError, SolarResult};

/// Zenith of the Sun's centre at apparent rise/set: 90° plus 0.833° for
/// refraction and the solar semi-diameter.
pub const SUNRISE_ZENITH: Degrees = Degrees::new(90.833);

/// Arc-minutes / arc-seconds per degree.
const ARC_PER_DEGREE: f64 = 60.0;

/// Reduce an angle into `[0°, 360°)`.
#[inline]
pub(crate) fn normalize_degrees(angle: Degrees) -> Degrees {
    Degrees::new(angle.value().rem_euclid(360.0))
}

#[inline]
pub(crate) fn to_degrees(radians: f64) -> Degrees {
    Radians::new(radians).to::<Degree>()
}

/// Longitude of the Moon's ascending node, used by the nutation and
/// aberration corrections.
#[inline]
fn lunar_node(t: Centuries) -> Degrees {
    Degrees::new(125.04 - 1934.136 * t.value())
}

/// Geometric mean longitude of the Sun, reduced to `[0°, 360°)`.
pub fn geometric_mean_longitude(t: Centuries) -> Degrees {
    let t = t.value();
    normalize_degrees(Degrees::new(280.46646 + t * (36000.76983 + t * 0.0003032)))
}

/// Geometric mean anomaly of the Sun (not reduced).
pub fn geometric_mean_anomaly(t: Centuries) -> Degrees {
    let t = t.value();
    Degrees::new(357.52911 + t * (35999.05029 - 0.0001537 * t))
}

/// Eccentricity of Earth's orbit (dimensionless).
pub fn eccentricity_earth_orbit(t: Centuries) -> f64 {
    let t = t.value();
    0.016708634 - t * (0.000042037 + 0.0000001267 * t)
}

/// Equation of the centre: the three-harmonic correction from mean to true
/// anomaly.
pub fn equation_of_center(t: Centuries, mean_anomaly: Degrees) -> Degrees {
    let t = t.value();
    Degrees::new(
        mean_anomaly.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
            + (mean_anomaly * 2.0).sin() * (0.019993 - 0.000101 * t)
            + (mean_anomaly * 3.0).sin() * 0.000289,
    )
}

/// True longitude of the Sun.
#[inline]
pub fn true_longitude(mean_longitude: Degrees, center: Degrees) -> Degrees {
    mean_longitude + center
}

/// True anomaly of the Sun.
#[inline]
pub fn true_anomaly(mean_anomaly: Degrees, center: Degrees) -> Degrees {
    mean_anomaly + center
}

/// Sun–Earth distance.  Informational only; nothing downstream uses it.
pub fn radius_vector(eccentricity: f64, true_anomaly: Degrees) -> AstronomicalUnits {
    AstronomicalUnits::new(
        (1.000001018 * (1.0 - eccentricity * eccentricity))
            / (1.0 + eccentricity * true_anomaly.cos()),
    )
}

/// Apparent longitude: true longitude corrected for nutation and aberration.
pub fn apparent_longitude(true_longitude: Degrees, t: Centuries) -> Degrees {
    Degrees::new(true_longitude.value() - 0.00569 - 0.00478 * lunar_node(t).sin())
}

/// Mean obliquity of the ecliptic.
///
/// The polynomial is evaluated in arc-seconds on top of 23° 26′ and folded
/// back into degrees.
pub fn mean_obliquity_of_ecliptic(t: Centuries) -> Degrees {
    let t = t.value();
    let seconds = 21.448 - t * (46.815 + t * (0.00059 - t * 0.001813));
    Degrees::new(23.0 + (26.0 + seconds / ARC_PER_DEGREE) / ARC_PER_DEGREE)
}

/// Obliquity corrected for nutation.
pub fn obliquity_correction(mean_obliquity: Degrees, t: Centuries) -> Degrees {
    Degrees::new(mean_obliquity.value() + 0.00256 * lunar_node(t).cos())
}

/// Apparent right ascension in `(-180°, 180°]`.
///
/// `atan2(cos ε · sin λ, cos λ)` keeps the quadrant of λ.  Worksheet tables
/// that pass the spreadsheet `ATAN2(x, y)` operands in swapped order show a
/// quadrant-shifted value here (167.92° instead of −77.92° on 2019-01-01);
/// this column does not reproduce them.
pub fn right_ascension(apparent_longitude: Degrees, obliquity: Degrees) -> Degrees {
    let (sin_l, cos_l) = apparent_longitude.sin_cos();
    to_degrees((obliquity.cos() * sin_l).atan2(cos_l))
}

/// Apparent declination in `[-90°, 90°]`.
pub fn declination(obliquity: Degrees, apparent_longitude: Degrees) -> Degrees {
    to_degrees((obliquity.sin() * apparent_longitude.sin()).asin())
}

/// `tan²(ε/2)`, the helper term of the equation of time.
pub fn var_y(obliquity: Degrees) -> f64 {
    let half = (obliquity / 2.0).tan();
    half * half
}

/// Equation of time: apparent minus mean solar time.
///
/// Five-term series; the result approaches ±16.5 min at its extremes.
pub fn equation_of_time(
    var_y: f64,
    mean_longitude: Degrees,
    eccentricity: f64,
    mean_anomaly: Degrees,
) -> Minutes {
    let l0 = mean_longitude.to::<Radian>().value();
    let m = mean_anomaly.to::<Radian>().value();
    let y = var_y;
    let e = eccentricity;

    let series = y * (2.0 * l0).sin() - 2.0 * e * m.sin()
        + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();

    // 4 minutes of time per degree of rotation.
    Minutes::new(4.0 * to_degrees(series).value())
}

/// Hour angle of the Sun at apparent sunrise.
///
/// # Errors
/// * [`SolarError::InvalidLatitude`] at or beyond a pole (`cos φ = 0`).
/// * [`SolarError::NoSunriseSunset`] when the `acos` argument leaves
///   `[-1, 1]`: above `1` the Sun never rises ([`PolarCondition::PolarNight`]),
///   below `-1` it never sets ([`PolarCondition::PolarDay`]).
/// * [`SolarError::Domain`] when the argument is NaN.
pub fn hour_angle_sunrise(latitude: Degrees, declination: Degrees) -> SolarResult<Degrees> {
    if !latitude.value().is_finite() || latitude.value().abs() >= 90.0 {
        return Err(SolarError::InvalidLatitude(latitude.value()));
    }

    let argument = SUNRISE_ZENITH.cos() / (latitude.cos() * declination.cos())
        - latitude.tan() * declination.tan();

    if argument > 1.0 {
        return Err(SolarError::NoSunriseSunset(PolarCondition::PolarNight));
    }
    if argument < -1.0 {
        return Err(SolarError::NoSunriseSunset(PolarCondition::PolarDay));
    }
    checked_acos("hour angle at sunrise", argument).map(to_degrees)
}
