// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Per-date pipeline.
//!
//! [`SolarDay::compute`] runs every stage for one civil date and keeps each
//! intermediate; [`compute_solar_events`] stops after the rise/set/noon
//! clock times.  Both fail as a whole: a result is either complete or an
//! error, never partially filled.

use chrono::{NaiveDate, TimeDelta};
use log::trace;
use qtty::{AstronomicalUnits, Centuries, Days, Degrees, Hours, Minutes};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::clock;
use crate::error::{SolarError, SolarResult};
use crate::julian::JulianDay;
use crate::observer::Observer;
use crate::orbit;
use crate::position;
use crate::refraction::approx_atmospheric_refraction;

/// Number of quantities kept per date.
pub const COLUMN_COUNT: usize = 31;

/// Orbital stages shared by the full and the events-only pipelines.
struct Ephemeris {
    julian_century: Centuries,
    mean_longitude: Degrees,
    mean_anomaly: Degrees,
    eccentricity: f64,
    equation_of_center: Degrees,
    true_longitude: Degrees,
    apparent_longitude: Degrees,
    mean_obliquity: Degrees,
    obliquity_correction: Degrees,
    declination: Degrees,
    var_y: f64,
    equation_of_time: Minutes,
}

impl Ephemeris {
    fn at(julian_day: JulianDay) -> Self {
        let t = julian_day.julian_century();
        let mean_longitude = orbit::geometric_mean_longitude(t);
        let mean_anomaly = orbit::geometric_mean_anomaly(t);
        let eccentricity = orbit::eccentricity_earth_orbit(t);
        let equation_of_center = orbit::equation_of_center(t, mean_anomaly);
        let true_longitude = orbit::true_longitude(mean_longitude, equation_of_center);
        let apparent_longitude = orbit::apparent_longitude(true_longitude, t);
        let mean_obliquity = orbit::mean_obliquity_of_ecliptic(t);
        let obliquity_correction = orbit::obliquity_correction(mean_obliquity, t);
        let declination = orbit::declination(obliquity_correction, apparent_longitude);
        let var_y = orbit::var_y(obliquity_correction);
        let equation_of_time =
            orbit::equation_of_time(var_y, mean_longitude, eccentricity, mean_anomaly);

        Self {
            julian_century: t,
            mean_longitude,
            mean_anomaly,
            eccentricity,
            equation_of_center,
            true_longitude,
            apparent_longitude,
            mean_obliquity,
            obliquity_correction,
            declination,
            var_y,
            equation_of_time,
        }
    }
}

fn clock_time(fraction: Days, adjustment: Days) -> SolarResult<TimeDelta> {
    clock::to_duration(fraction, adjustment)
        .ok_or(SolarError::UnrepresentableTime(fraction.value()))
}

/// Sunrise, sunset and solar noon as time elapsed since local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarEvents {
    pub sunrise: TimeDelta,
    pub sunset: TimeDelta,
    pub solar_noon: TimeDelta,
}

impl SolarEvents {
    /// Rise, set and noon for `date` at `observer`.
    ///
    /// # Errors
    /// [`SolarError::NoSunriseSunset`] during polar day or night.
    pub fn compute(date: NaiveDate, observer: &Observer) -> SolarResult<Self> {
        let julian_day = JulianDay::from_civil_date(date, observer.utc_offset());
        let eph = Ephemeris::at(julian_day);
        let ha = orbit::hour_angle_sunrise(observer.latitude(), eph.declination)?;
        let noon = clock::solar_noon(
            eph.equation_of_time,
            observer.longitude(),
            observer.utc_offset(),
        );
        let adjustment = observer.dst_adjustment();

        Ok(Self {
            sunrise: clock_time(clock::sunrise(noon, ha), adjustment)?,
            sunset: clock_time(clock::sunset(noon, ha), adjustment)?,
            solar_noon: clock_time(noon, adjustment)?,
        })
    }
}

/// Rise, set and noon from raw coordinates.
///
/// Latitude is validated first, so a pole is reported as
/// [`SolarError::InvalidLatitude`] rather than a polar condition.  A
/// non-finite `dst_adjustment` is [`SolarError::InvalidDstAdjustment`].
///
/// ```
/// use chrono::NaiveDate;
/// use qtty::{Days, Degrees, Hours};
/// use sunriset::compute_solar_events;
///
/// let date = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
/// let events = compute_solar_events(
///     date,
///     Degrees::new(34.0522),
///     Degrees::new(-118.2437),
///     Hours::new(-8.0),
///     Days::new(0.0),
/// )
/// .unwrap();
/// assert_eq!(events.sunrise.num_seconds(), 25_116);
/// ```
pub fn compute_solar_events(
    date: NaiveDate,
    latitude: Degrees,
    longitude: Degrees,
    utc_offset: Hours,
    dst_adjustment: Days,
) -> SolarResult<SolarEvents> {
    let observer =
        Observer::new(latitude, longitude, utc_offset)?.with_dst_adjustment(dst_adjustment)?;
    SolarEvents::compute(date, &observer)
}

/// One value of a [`SolarDay`] row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnValue {
    Number(f64),
    Duration(TimeDelta),
}

impl ColumnValue {
    /// Numeric view; durations become seconds.
    pub fn as_f64(&self) -> f64 {
        match self {
            ColumnValue::Number(v) => *v,
            ColumnValue::Duration(d) => {
                d.num_seconds() as f64 + f64::from(d.subsec_nanos()) * 1e-9
            }
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Number(v) => write!(f, "{v}"),
            ColumnValue::Duration(d) => write!(f, "{d}"),
        }
    }
}

/// Every intermediate of the pipeline for one date, in column order.
///
/// Fraction fields are days since local midnight; the `TimeDelta` fields are
/// the same instants after the daylight-saving adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarDay {
    pub date: NaiveDate,
    pub julian_day: JulianDay,
    pub julian_century: Centuries,
    pub mean_longitude: Degrees,
    pub mean_anomaly: Degrees,
    pub eccentricity: f64,
    pub equation_of_center: Degrees,
    pub true_longitude: Degrees,
    pub true_anomaly: Degrees,
    pub radius_vector: AstronomicalUnits,
    pub apparent_longitude: Degrees,
    pub mean_obliquity: Degrees,
    pub obliquity_correction: Degrees,
    pub right_ascension: Degrees,
    pub declination: Degrees,
    pub var_y: f64,
    pub equation_of_time: Minutes,
    pub hour_angle_sunrise: Degrees,
    pub solar_noon_fraction: Days,
    pub sunrise_fraction: Days,
    pub sunset_fraction: Days,
    pub solar_noon: TimeDelta,
    pub sunrise: TimeDelta,
    pub sunset: TimeDelta,
    pub sunlight_duration: Minutes,
    pub true_solar_time: Minutes,
    pub hour_angle: Degrees,
    pub zenith: Degrees,
    pub elevation: Degrees,
    pub refraction: Degrees,
    pub corrected_elevation: Degrees,
    pub azimuth: Degrees,
}

impl SolarDay {
    /// Human-readable column headings, in row order.
    pub const COLUMNS: [&'static str; COLUMN_COUNT] = [
        "Julian Day",
        "Julian Century",
        "Solar Geometric Mean Longitude",
        "Solar Geometric Mean Anomaly",
        "Eccentricity Earth Orbit",
        "Solar Equation of Center",
        "Solar True Longitude",
        "Solar True Anomaly",
        "Solar Radius Vector AUs",
        "Solar Apparent Longitude",
        "Mean Obliquity of Ecliptic",
        "Obliquity Correction Degrees",
        "Solar Right Ascension",
        "Solar Declination",
        "Var Y",
        "Equation Of Time Min",
        "Hour Angle Sunrise",
        "Solar Noon (float)",
        "Sunrise (float)",
        "Sunset (float)",
        "Solar Noon",
        "Sunrise",
        "Sunset",
        "Sunlight Duration (minutes)",
        "True Solar Time",
        "Hour Angle Deg",
        "Solar Zenith Angle (degrees)",
        "Solar Elevation Angle (degrees)",
        "Approximate Atmospheric Refraction (degrees)",
        "Solar Elevation Corrected ATM Refraction (degrees)",
        "Solar Azimuth Angle (degrees cw from North)",
    ];

    /// Machine keys matching [`Self::COLUMNS`], used for serialization.
    pub const KEYS: [&'static str; COLUMN_COUNT] = [
        "julian_day",
        "julian_century",
        "mean_longitude",
        "mean_anomaly",
        "eccentricity",
        "equation_of_center",
        "true_longitude",
        "true_anomaly",
        "radius_vector",
        "apparent_longitude",
        "mean_obliquity",
        "obliquity_correction",
        "right_ascension",
        "declination",
        "var_y",
        "equation_of_time",
        "hour_angle_sunrise",
        "solar_noon_fraction",
        "sunrise_fraction",
        "sunset_fraction",
        "solar_noon",
        "sunrise",
        "sunset",
        "sunlight_duration",
        "true_solar_time",
        "hour_angle",
        "zenith",
        "elevation",
        "refraction",
        "corrected_elevation",
        "azimuth",
    ];

    /// Run the full pipeline for `date`.
    ///
    /// # Errors
    /// * [`SolarError::NoSunriseSunset`] during polar day or night.
    /// * [`SolarError::UndefinedAzimuth`] with the Sun exactly overhead or
    ///   underfoot at local noon.
    /// * [`SolarError::Domain`] if a NaN reaches an inverse-trig stage.
    pub fn compute(date: NaiveDate, observer: &Observer) -> SolarResult<Self> {
        let latitude = observer.latitude();
        let longitude = observer.longitude();
        let utc_offset = observer.utc_offset();
        let adjustment = observer.dst_adjustment();

        let julian_day = JulianDay::from_civil_date(date, utc_offset);
        let eph = Ephemeris::at(julian_day);

        let true_anomaly = orbit::true_anomaly(eph.mean_anomaly, eph.equation_of_center);
        let radius_vector = orbit::radius_vector(eph.eccentricity, true_anomaly);
        let right_ascension =
            orbit::right_ascension(eph.apparent_longitude, eph.obliquity_correction);

        let hour_angle_sunrise = orbit::hour_angle_sunrise(latitude, eph.declination)?;
        let solar_noon_fraction = clock::solar_noon(eph.equation_of_time, longitude, utc_offset);
        let sunrise_fraction = clock::sunrise(solar_noon_fraction, hour_angle_sunrise);
        let sunset_fraction = clock::sunset(solar_noon_fraction, hour_angle_sunrise);

        let true_solar_time =
            position::true_solar_time(eph.equation_of_time, longitude, utc_offset);
        let hour_angle = position::hour_angle(true_solar_time);
        let zenith = position::solar_zenith_angle(latitude, eph.declination, hour_angle)?;
        let elevation = position::solar_elevation_angle(zenith);
        let refraction = approx_atmospheric_refraction(elevation);
        let azimuth = position::solar_azimuth(hour_angle, latitude, zenith, eph.declination)?;

        let day = Self {
            date,
            julian_day,
            julian_century: eph.julian_century,
            mean_longitude: eph.mean_longitude,
            mean_anomaly: eph.mean_anomaly,
            eccentricity: eph.eccentricity,
            equation_of_center: eph.equation_of_center,
            true_longitude: eph.true_longitude,
            true_anomaly,
            radius_vector,
            apparent_longitude: eph.apparent_longitude,
            mean_obliquity: eph.mean_obliquity,
            obliquity_correction: eph.obliquity_correction,
            right_ascension,
            declination: eph.declination,
            var_y: eph.var_y,
            equation_of_time: eph.equation_of_time,
            hour_angle_sunrise,
            solar_noon_fraction,
            sunrise_fraction,
            sunset_fraction,
            solar_noon: clock_time(solar_noon_fraction, adjustment)?,
            sunrise: clock_time(sunrise_fraction, adjustment)?,
            sunset: clock_time(sunset_fraction, adjustment)?,
            sunlight_duration: clock::sunlight_duration(hour_angle_sunrise),
            true_solar_time,
            hour_angle,
            zenith,
            elevation,
            refraction,
            corrected_elevation: position::corrected_elevation(refraction, elevation),
            azimuth,
        };

        trace!(
            "{date}: {} sunrise {} sunset {} noon {} elevation {:.3}°",
            julian_day,
            day.sunrise,
            day.sunset,
            day.solar_noon,
            day.corrected_elevation.value()
        );
        Ok(day)
    }

    /// The rise/set/noon subset.
    pub fn events(&self) -> SolarEvents {
        SolarEvents {
            sunrise: self.sunrise,
            sunset: self.sunset,
            solar_noon: self.solar_noon,
        }
    }

    /// All quantities in [`Self::COLUMNS`] order.
    pub fn column_values(&self) -> [ColumnValue; COLUMN_COUNT] {
        use ColumnValue::{Duration, Number};
        [
            Number(self.julian_day.value()),
            Number(self.julian_century.value()),
            Number(self.mean_longitude.value()),
            Number(self.mean_anomaly.value()),
            Number(self.eccentricity),
            Number(self.equation_of_center.value()),
            Number(self.true_longitude.value()),
            Number(self.true_anomaly.value()),
            Number(self.radius_vector.value()),
            Number(self.apparent_longitude.value()),
            Number(self.mean_obliquity.value()),
            Number(self.obliquity_correction.value()),
            Number(self.right_ascension.value()),
            Number(self.declination.value()),
            Number(self.var_y),
            Number(self.equation_of_time.value()),
            Number(self.hour_angle_sunrise.value()),
            Number(self.solar_noon_fraction.value()),
            Number(self.sunrise_fraction.value()),
            Number(self.sunset_fraction.value()),
            Duration(self.solar_noon),
            Duration(self.sunrise),
            Duration(self.sunset),
            Number(self.sunlight_duration.value()),
            Number(self.true_solar_time.value()),
            Number(self.hour_angle.value()),
            Number(self.zenith.value()),
            Number(self.elevation.value()),
            Number(self.refraction.value()),
            Number(self.corrected_elevation.value()),
            Number(self.azimuth.value()),
        ]
    }
}

// Durations are written as seconds since local midnight.
#[cfg(feature = "serde")]
impl Serialize for SolarDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("SolarDay", COLUMN_COUNT + 1)?;
        s.serialize_field("date", &self.date.to_string())?;
        for (&key, value) in Self::KEYS.iter().zip(self.column_values()) {
            s.serialize_field(key, &value.as_f64())?;
        }
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn los_angeles() -> Observer {
        Observer::new(Degrees::new(34.0522), Degrees::new(-118.2437), Hours::new(-8.0)).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn full_row_for_los_angeles() {
        let day = SolarDay::compute(date(2019, 1, 1), &los_angeles()).unwrap();
        assert_abs_diff_eq!(day.julian_day.value(), 2_458_485.333_333_333_5, epsilon = 1e-6);
        assert_abs_diff_eq!(day.julian_century.value(), 0.190_015_970_796_262_5, epsilon = 1e-12);
        assert_abs_diff_eq!(day.declination.value(), -22.971_243_911_826_146, epsilon = 1e-8);
        assert_abs_diff_eq!(day.equation_of_time.value(), -3.597_397_599_712_921, epsilon = 1e-7);
        assert_abs_diff_eq!(day.hour_angle_sunrise.value(), 74.489_409_614_748_03, epsilon = 1e-8);
        assert_abs_diff_eq!(day.zenith.value(), 57.029_271_050_851_13, epsilon = 1e-8);
        assert_abs_diff_eq!(day.refraction.value(), 0.024_808_498_515_039_33, epsilon = 1e-10);
        assert_abs_diff_eq!(
            day.corrected_elevation.value(),
            32.995_537_447_663_914,
            epsilon = 1e-8
        );
        assert_abs_diff_eq!(day.azimuth.value(), 180.940_464_118_502_72, epsilon = 1e-6);
        assert_abs_diff_eq!(day.sunlight_duration.value(), 595.915_276_917_984_2, epsilon = 1e-6);
    }

    #[test]
    fn events_match_the_full_row() {
        let observer = los_angeles();
        let day = SolarDay::compute(date(2019, 1, 1), &observer).unwrap();
        let events = SolarEvents::compute(date(2019, 1, 1), &observer).unwrap();
        assert_eq!(day.events(), events);
    }

    #[test]
    fn column_values_follow_column_order() {
        let day = SolarDay::compute(date(2019, 1, 1), &los_angeles()).unwrap();
        let values = day.column_values();
        assert_eq!(values.len(), SolarDay::COLUMNS.len());
        assert_eq!(values[0], ColumnValue::Number(day.julian_day.value()));
        assert_eq!(values[21], ColumnValue::Duration(day.sunrise));
        assert_eq!(values[30], ColumnValue::Number(day.azimuth.value()));
        assert_eq!(SolarDay::COLUMNS[21], "Sunrise");
    }

    #[test]
    fn dst_adjustment_shifts_clock_times_only() {
        let base = los_angeles();
        let summer = base.with_dst_adjustment(Days::new(1.0 / 24.0)).unwrap();
        let a = SolarDay::compute(date(2019, 1, 1), &base).unwrap();
        let b = SolarDay::compute(date(2019, 1, 1), &summer).unwrap();
        assert_eq!(a.sunrise_fraction, b.sunrise_fraction);
        let shift = b.sunrise - a.sunrise;
        assert!((shift - TimeDelta::hours(1)).num_microseconds().unwrap().abs() <= 1);
    }

    #[test]
    fn polar_night_is_reported() {
        let north = Observer::new(Degrees::new(89.9), Degrees::new(0.0), Hours::new(0.0)).unwrap();
        assert_eq!(
            SolarDay::compute(date(2019, 12, 21), &north),
            Err(SolarError::NoSunriseSunset(
                crate::error::PolarCondition::PolarNight
            ))
        );
    }

    #[test]
    fn raw_entry_point_validates_latitude() {
        let err = compute_solar_events(
            date(2019, 1, 1),
            Degrees::new(-90.0),
            Degrees::new(0.0),
            Hours::new(0.0),
            Days::new(0.0),
        );
        assert_eq!(err, Err(SolarError::InvalidLatitude(-90.0)));
    }
}
