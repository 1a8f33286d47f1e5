use chrono::NaiveDate;
use qtty::{Degrees, Hours};
use sunriset::{clock, DateSpan, Observer, SolarDay, SolarTable};

fn main() -> Result<(), sunriset::SolarError> {
    let la = Observer::new(Degrees::new(34.0522), Degrees::new(-118.2437), Hours::new(-8.0))?;
    let date = NaiveDate::from_ymd_opt(2019, 1, 1).expect("valid calendar date");

    let day = SolarDay::compute(date, &la)?;
    println!("Observer: {la}");
    println!("{}", day.julian_day);
    for (name, value) in SolarDay::COLUMNS.iter().zip(day.column_values()) {
        println!("{name:>52}: {value}");
    }

    let adjustment = la.dst_adjustment();
    if let Some(rise) = clock::to_local_datetime(day.sunrise_fraction, date, adjustment) {
        println!("Sunrise (local): {rise}");
    }
    if let Some(set) = clock::to_local_datetime(day.sunset_fraction, date, adjustment) {
        println!("Sunset (local):  {set}");
    }

    let week = SolarTable::build(DateSpan::new(date, 7)?, &la);
    for day in week.days() {
        println!(
            "{}  rise {}  noon {}  set {}",
            day.date, day.sunrise, day.solar_noon, day.sunset
        );
    }
    Ok(())
}
