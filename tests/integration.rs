use chrono::{NaiveDate, TimeDelta};
use proptest::prelude::*;
use qtty::{Days, Degrees, Hours};
use sunriset::{
    compute_solar_events, DateSpan, JulianDay, Observer, PolarCondition, SolarDay, SolarError,
    SolarTable,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn los_angeles() -> Observer {
    Observer::new(Degrees::new(34.0522), Degrees::new(-118.2437), Hours::new(-8.0)).unwrap()
}

fn seconds(d: TimeDelta) -> f64 {
    d.num_microseconds().unwrap() as f64 / 1e6
}

#[test]
fn los_angeles_new_year_2019_events() {
    let events = compute_solar_events(
        date(2019, 1, 1),
        Degrees::new(34.0522),
        Degrees::new(-118.2437),
        Hours::new(-8.0),
        Days::new(0.0),
    )
    .unwrap();

    assert!((seconds(events.sunrise) - 25_116.873_548).abs() < 1e-3);
    assert!((seconds(events.sunset) - 60_871.790_164).abs() < 1e-3);
    assert!((seconds(events.solar_noon) - 42_994.331_856).abs() < 1e-3);
}

#[test]
fn london_midsummer_2019() {
    let london = Observer::new(Degrees::new(51.5), Degrees::new(0.0), Hours::new(0.0)).unwrap();
    let day = SolarDay::compute(date(2019, 6, 21), &london).unwrap();

    assert!((seconds(day.solar_noon) - 43_304.501_912).abs() < 1e-3);
    assert!((seconds(day.sunrise) - 13_357.502_435).abs() < 1e-3);
    assert!((seconds(day.sunset) - 73_251.501_389).abs() < 1e-3);
    assert!((day.declination.value() - 23.435_855_797_172_774).abs() < 1e-8);
    assert!((day.elevation.value() - 61.933_847_199_487_914).abs() < 1e-7);
    assert!((day.azimuth.value() - 179.150_853_637_676_62).abs() < 1e-6);
}

#[test]
fn reference_julian_day_and_century() {
    let jd = JulianDay::from_civil_date(date(2021, 5, 31), Hours::new(-2.0));
    assert!((jd.value() - 2_459_366.083_333_333_5).abs() < 1e-9);

    let jc = JulianDay::new(2_459_366.0).julian_century();
    assert!((jc.value() - 0.214_127_310_061_601_66).abs() < 1e-15);
}

#[test]
fn sunrise_precedes_noon_precedes_sunset_all_year() {
    let span = DateSpan::years(date(2019, 1, 1), 1).unwrap();
    let table = SolarTable::build(span, &los_angeles());
    assert_eq!(table.len(), 365);
    assert_eq!(table.failures().count(), 0);

    for day in table.days() {
        assert!(day.sunrise_fraction < day.solar_noon_fraction, "{}", day.date);
        assert!(day.solar_noon_fraction < day.sunset_fraction, "{}", day.date);
        let sum = day.elevation + day.zenith;
        assert!((sum.value() - 90.0).abs() < 1e-9);
    }
}

#[test]
fn declination_repeats_after_a_year_and_stays_bounded() {
    let observer = los_angeles();
    let span = DateSpan::years(date(2019, 1, 1), 2).unwrap();
    let table = SolarTable::build(span, &observer);

    for day in table.days() {
        assert!(day.declination.value().abs() <= 23.45, "{}", day.date);
    }

    let a = table.row(date(2019, 6, 21)).unwrap().day().unwrap().declination;
    let b = table.row(date(2020, 6, 21)).unwrap().day().unwrap().declination;
    assert!((a.value() - b.value()).abs() < 0.05);
}

#[test]
fn polar_night_near_the_north_pole() {
    let result = compute_solar_events(
        date(2019, 12, 21),
        Degrees::new(89.9),
        Degrees::new(0.0),
        Hours::new(0.0),
        Days::new(0.0),
    );
    assert_eq!(
        result,
        Err(SolarError::NoSunriseSunset(PolarCondition::PolarNight))
    );
}

#[test]
fn midnight_sun_near_the_north_pole() {
    let result = compute_solar_events(
        date(2019, 6, 21),
        Degrees::new(89.9),
        Degrees::new(0.0),
        Hours::new(0.0),
        Days::new(0.0),
    );
    assert_eq!(
        result,
        Err(SolarError::NoSunriseSunset(PolarCondition::PolarDay))
    );
}

#[test]
fn non_finite_dst_adjustment_is_an_error() {
    for adjustment in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let result = compute_solar_events(
            date(2019, 1, 1),
            Degrees::new(34.0522),
            Degrees::new(-118.2437),
            Hours::new(-8.0),
            Days::new(adjustment),
        );
        assert!(
            matches!(result, Err(SolarError::InvalidDstAdjustment(_))),
            "{adjustment}: {result:?}"
        );
    }
}

proptest! {
    #[test]
    fn prop_sunrise_precedes_noon_precedes_sunset(
        lat in -60.0..60.0f64,
        lon in -180.0..180.0f64,
        day in 0u64..(365 * 60),
    ) {
        let d = date(1990, 1, 1) + chrono::Days::new(day);
        let offset = Hours::new((lon / 15.0).round());
        let events =
            compute_solar_events(d, Degrees::new(lat), Degrees::new(lon), offset, Days::new(0.0))
                .unwrap();
        prop_assert!(events.sunrise < events.solar_noon, "{} at {}°", d, lat);
        prop_assert!(events.solar_noon < events.sunset, "{} at {}°", d, lat);
    }
}

#[test]
fn julian_day_steps_by_one_per_date() {
    let offset = Hours::new(-8.0);
    for d in DateSpan::new(date(1999, 12, 25), 20).unwrap().dates() {
        let today = JulianDay::from_civil_date(d, offset);
        let tomorrow = JulianDay::from_civil_date(d.succ_opt().unwrap(), offset);
        assert_eq!((tomorrow - today).value(), 1.0);
    }
}

#[cfg(feature = "serde")]
#[test]
fn serde_rows_use_snake_case_keys() {
    let span = DateSpan::new(date(2019, 1, 1), 1).unwrap();
    let table = SolarTable::build(span, &los_angeles());
    let json = serde_json::to_value(&table).unwrap();

    let row = &json[0];
    assert_eq!(row["date"], "2019-01-01");
    assert!((row["sunrise"].as_f64().unwrap() - 25_116.873_548).abs() < 1e-3);
    assert!(row["julian_day"].is_number());
    assert!(row["azimuth"].is_number());
}

#[cfg(feature = "serde")]
#[test]
fn serde_failed_rows_carry_the_error() {
    let arctic = Observer::new(Degrees::new(80.0), Degrees::new(15.0), Hours::new(1.0)).unwrap();
    let span = DateSpan::new(date(2019, 12, 21), 1).unwrap();
    let json = serde_json::to_value(SolarTable::build(span, &arctic)).unwrap();
    assert_eq!(json[0]["error"], "no sunrise or sunset on this date (polar night)");
}

#[cfg(feature = "config")]
#[test]
fn config_drives_a_table() {
    let config: sunriset::SunrisetConfig = r#"
[observer]
latitude = 34.0522
longitude = -118.2437
utc_offset = -8.0

[table]
start_date = "2020-01-01"
years = 1
"#
    .parse()
    .unwrap();

    let observer = config.observer().unwrap();
    let span = config.span().unwrap().unwrap();
    let table = SolarTable::build(span, &observer);
    assert_eq!(table.len(), 366);
    assert_eq!(table.to_map().len(), 366);
}
