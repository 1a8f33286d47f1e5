// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Approximate atmospheric refraction
//!
//! Piecewise model of the apparent lift of the Sun caused by the atmosphere,
//! as tabulated in the NOAA solar calculator.  The model is split into four
//! elevation bands, each evaluated in **arc-seconds** and returned in degrees:
//!
//! | Geometric elevation `h` | Expression (arc-seconds) |
//! |-------------------------|--------------------------|
//! | `h > 85°` | `0` |
//! | `5° < h ≤ 85°` | `58.1/tan h − 0.07/tan³ h + 0.000086/tan⁵ h` |
//! | `−0.575° < h ≤ 5°` | `1735 − 518.2h + 103.4h² − 12.79h³ + 0.711h⁴` |
//! | `h ≤ −0.575°` | `−20.772/tan h` |
//!
//! The bounds are strict on the lower side of each band, so the boundary
//! values 85°, 5° and −0.575° fall into the band below them.
//!
//! ## References
//! * G. G. Bennett (1982), "The calculation of astronomical refraction in
//!   marine navigation", *Journal of Navigation* 35.
//! * NOAA Global Monitoring Laboratory, *Solar Calculation Details*.

use qtty::{Arcseconds, Degree, Degrees};

/// Upper edge of the polynomial-in-cotangent band.
const NEAR_ZENITH_EDGE: Degrees = Degrees::new(85.0);
/// Upper edge of the horizon polynomial band.
const LOW_SUN_EDGE: Degrees = Degrees::new(5.0);
/// Upper edge of the below-horizon band.
const HORIZON_EDGE: Degrees = Degrees::new(-0.575);

/// **h > 85°**: refraction is negligible.
#[inline]
fn refraction_near_zenith() -> Arcseconds {
    Arcseconds::new(0.0)
}

/// **5° < h ≤ 85°**: odd series in `cot h`.
#[inline]
fn refraction_high_sun(elevation: Degrees) -> Arcseconds {
    const C1: f64 = 58.1;
    const C3: f64 = -0.07;
    const C5: f64 = 0.000086;

    let tan_h = elevation.tan();
    Arcseconds::new(C1 / tan_h + C3 / tan_h.powi(3) + C5 / tan_h.powi(5))
}

/// **−0.575° < h ≤ 5°**: quartic in the elevation itself.
#[inline]
fn refraction_low_sun(elevation: Degrees) -> Arcseconds {
    const A0: f64 = 1735.0;
    const A1: f64 = -518.2;
    const A2: f64 = 103.4;
    const A3: f64 = -12.79;
    const A4: f64 = 0.711;

    let h = elevation.value();
    Arcseconds::new(A0 + h * (A1 + h * (A2 + h * (A3 + h * A4))))
}

/// **h ≤ −0.575°**: single cotangent term.
#[inline]
fn refraction_below_horizon(elevation: Degrees) -> Arcseconds {
    const K: f64 = -20.772;
    Arcseconds::new(K / elevation.tan())
}

/// Approximate atmospheric refraction for a geometric solar elevation.
pub fn approx_atmospheric_refraction(elevation: Degrees) -> Degrees {
    let arcsec = match elevation {
        h if h > NEAR_ZENITH_EDGE => refraction_near_zenith(),
        h if h > LOW_SUN_EDGE => refraction_high_sun(h),
        h if h > HORIZON_EDGE => refraction_low_sun(h),
        h => refraction_below_horizon(h),
    };
    arcsec.to::<Degree>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn refraction(h: f64) -> f64 {
        approx_atmospheric_refraction(Degrees::new(h)).value()
    }

    #[test]
    fn zero_near_zenith() {
        assert_eq!(refraction(90.0), 0.0);
        assert_eq!(refraction(85.000_001), 0.0);
    }

    #[test]
    fn high_sun_band_includes_85_degrees() {
        assert_abs_diff_eq!(refraction(85.0), 0.001_411_956_798_608_42, epsilon = 1e-12);
        assert_abs_diff_eq!(refraction(60.0), 0.009_314_051_291_816_32, epsilon = 1e-12);
        assert_abs_diff_eq!(refraction(30.0), 0.027_852_711_627_079_828, epsilon = 1e-12);
    }

    #[test]
    fn low_sun_band_includes_5_degrees() {
        assert_abs_diff_eq!(refraction(5.0), 0.159_618_055_555_555_55, epsilon = 1e-12);
        assert_abs_diff_eq!(refraction(2.0), 0.283_682_222_222_222_2, epsilon = 1e-12);
        assert_abs_diff_eq!(refraction(0.0), 1735.0 / 3600.0, epsilon = 1e-12);
        assert_abs_diff_eq!(refraction(-0.3), 0.527_810_302_527_777_7, epsilon = 1e-12);
    }

    #[test]
    fn below_horizon_band_includes_its_edge() {
        assert_abs_diff_eq!(refraction(-0.575), 0.574_931_389_792_853_6, epsilon = 1e-12);
        assert_abs_diff_eq!(refraction(-1.0), 0.330_563_078_609_481_86, epsilon = 1e-12);
        assert_abs_diff_eq!(refraction(-10.0), 0.032_723_296_099_194_18, epsilon = 1e-12);
    }

    #[test]
    fn refraction_is_non_negative_above_the_horizon() {
        for tenth in -5..=900 {
            let h = f64::from(tenth) / 10.0;
            assert!(refraction(h) >= 0.0, "negative refraction at {h}°");
        }
    }
}
