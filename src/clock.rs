// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Daily event times as fractions of the local civil day.
//!
//! The NOAA formulas place solar noon, sunrise and sunset on a `[0, 1)` scale
//! where `0` is local midnight and `0.5` is 12:00.  The helpers at the bottom
//! of this module turn those fractions into [`chrono`] values.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use qtty::{Days, Degrees, Hours, Minutes};

/// Minutes in one civil day.
const MINUTES_PER_DAY: f64 = 1440.0;
/// Minutes of clock time per degree of Earth rotation.
const MINUTES_PER_DEGREE: f64 = 4.0;
/// Microseconds in one civil day.
const MICROS_PER_DAY: f64 = 86_400.0 * 1e6;

/// Local solar noon as a fraction of the civil day.
///
/// `(720 − 4·longitude − EoT + 60·offset) / 1440`
pub fn solar_noon(equation_of_time: Minutes, longitude: Degrees, utc_offset: Hours) -> Days {
    let minutes = 720.0 - MINUTES_PER_DEGREE * longitude.value() - equation_of_time.value()
        + utc_offset.value() * 60.0;
    Days::new(minutes / MINUTES_PER_DAY)
}

/// Sunrise: solar noon minus four minutes per degree of sunrise hour angle.
pub fn sunrise(solar_noon: Days, hour_angle_sunrise: Degrees) -> Days {
    Days::new(
        (solar_noon.value() * MINUTES_PER_DAY - hour_angle_sunrise.value() * MINUTES_PER_DEGREE)
            / MINUTES_PER_DAY,
    )
}

/// Sunset: solar noon plus four minutes per degree of sunrise hour angle.
pub fn sunset(solar_noon: Days, hour_angle_sunrise: Degrees) -> Days {
    Days::new(
        (solar_noon.value() * MINUTES_PER_DAY + hour_angle_sunrise.value() * MINUTES_PER_DEGREE)
            / MINUTES_PER_DAY,
    )
}

/// Sunlight duration, `8 · HA_sunrise` minutes.
///
/// The sunset-minus-sunrise span is `8 · HA` minutes, so the two agree, but
/// the published worksheet labels this column as a day length in minutes
/// while many tools expect hours.  Compare against `sunset − sunrise` before
/// relying on it.
#[inline]
pub fn sunlight_duration(hour_angle_sunrise: Degrees) -> Minutes {
    Minutes::new(8.0 * hour_angle_sunrise.value())
}

/// Time elapsed since local midnight for a day fraction, after adding a
/// daylight-saving `adjustment`.
///
/// The result is rounded to the nearest microsecond.  Returns `None` when
/// the value is not finite or overflows a microsecond count.
///
/// ```
/// use qtty::Days;
/// use sunriset::clock::to_duration;
///
/// let noon = to_duration(Days::new(0.5), Days::new(0.0)).unwrap();
/// assert_eq!(noon.num_hours(), 12);
/// ```
pub fn to_duration(fraction: Days, adjustment: Days) -> Option<TimeDelta> {
    let micros = ((fraction + adjustment).value() * MICROS_PER_DAY).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(TimeDelta::microseconds(micros as i64))
}

/// Local wall-clock time of a day fraction on `date`.
///
/// Fractions outside `[0, 1)` roll into the previous or next date.
pub fn to_local_datetime(
    fraction: Days,
    date: NaiveDate,
    adjustment: Days,
) -> Option<NaiveDateTime> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    midnight.checked_add_signed(to_duration(fraction, adjustment)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{NaiveTime, Timelike};

    const EOT_2019: Minutes = Minutes::new(-3.597_397_599_712_921);
    const HA_2019: Degrees = Degrees::new(74.489_409_614_748_03);

    fn los_angeles_noon() -> Days {
        solar_noon(EOT_2019, Degrees::new(-118.2437), Hours::new(-8.0))
    }

    #[test]
    fn noon_rise_and_set_fractions() {
        let noon = los_angeles_noon();
        assert_abs_diff_eq!(noon.value(), 0.497_619_581_666_467_25, epsilon = 1e-12);
        assert_abs_diff_eq!(
            sunrise(noon, HA_2019).value(),
            0.290_704_554_958_833_8,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            sunset(noon, HA_2019).value(),
            0.704_534_608_374_100_6,
            epsilon = 1e-12
        );
    }

    #[test]
    fn rise_and_set_are_symmetric_about_noon() {
        let noon = los_angeles_noon();
        let before = noon - sunrise(noon, HA_2019);
        let after = sunset(noon, HA_2019) - noon;
        assert_abs_diff_eq!(before.value(), after.value(), epsilon = 1e-12);
    }

    #[test]
    fn daylight_span_matches_sunlight_duration() {
        let noon = los_angeles_noon();
        let span_minutes = (sunset(noon, HA_2019) - sunrise(noon, HA_2019)).value() * 1440.0;
        let duration = sunlight_duration(HA_2019);
        assert_abs_diff_eq!(duration.value(), 595.915_276_917_984_2, epsilon = 1e-9);
        assert_abs_diff_eq!(span_minutes, duration.value(), epsilon = 1e-6);
    }

    #[test]
    fn to_duration_rounds_to_microseconds() {
        let d = to_duration(Days::new(0.290_704_554_958_833_8), Days::new(0.0)).unwrap();
        assert_eq!(d.num_microseconds(), Some(25_116_873_548));
        assert_eq!(d.num_seconds(), 25_116);
    }

    #[test]
    fn to_duration_applies_adjustment() {
        let d = to_duration(Days::new(0.5), Days::new(1.0 / 24.0)).unwrap();
        assert_eq!(d, TimeDelta::hours(13));
    }

    #[test]
    fn to_duration_rejects_non_finite() {
        assert_eq!(to_duration(Days::new(f64::NAN), Days::new(0.0)), None);
        assert_eq!(to_duration(Days::new(f64::INFINITY), Days::new(0.0)), None);
    }

    #[test]
    fn local_datetime_rolls_over_midnight() {
        let date = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let t = to_local_datetime(Days::new(0.25), date, Days::new(0.0)).unwrap();
        assert_eq!(t.date(), date);
        assert_eq!(t.time(), NaiveTime::from_hms_opt(6, 0, 0).unwrap());

        let late = to_local_datetime(Days::new(1.125), date, Days::new(0.0)).unwrap();
        assert_eq!(late.date(), date.succ_opt().unwrap());
        assert_eq!(late.hour(), 3);
    }
}
