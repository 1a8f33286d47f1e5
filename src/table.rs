// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date spans and row-per-date solar tables.
//!
//! This module provides:
//! - [`DateSpan`]: a half-open range of civil dates `[start, end)`
//! - [`SolarTable`]: one [`TableRow`] per date of a span, each holding the
//!   complete [`SolarDay`] or the error that stopped it

use chrono::{Days as CalendarDays, Months, NaiveDate};
use log::debug;
use qtty::Days;
use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::error::{SolarError, SolarResult};
use crate::observer::Observer;
use crate::pipeline::{SolarDay, COLUMN_COUNT};

/// A half-open range of civil dates.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sunriset::DateSpan;
///
/// let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// let leap_year = DateSpan::years(start, 1).unwrap();
/// assert_eq!(leap_year.dates().count(), 366);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateSpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateSpan {
    /// `days` consecutive dates beginning at `start`.
    ///
    /// # Errors
    /// [`SolarError::InvalidSpan`] for an empty span or one running past the
    /// last representable date.
    pub fn new(start: NaiveDate, days: u32) -> SolarResult<Self> {
        if days == 0 {
            return Err(SolarError::InvalidSpan("span must cover at least one day".into()));
        }
        let end = start
            .checked_add_days(CalendarDays::new(u64::from(days)))
            .ok_or_else(|| SolarError::InvalidSpan(format!("{start} + {days} days overflows")))?;
        Ok(Self { start, end })
    }

    /// `years` calendar years beginning at `start`.
    ///
    /// Each year contributes 365 or 366 days depending on whether it crosses a
    /// 29 February.  A start on 29 February ends on 28 February when the
    /// target year is not a leap year.
    ///
    /// # Errors
    /// [`SolarError::InvalidSpan`] for zero years or an unrepresentable end.
    pub fn years(start: NaiveDate, years: u32) -> SolarResult<Self> {
        if years == 0 {
            return Err(SolarError::InvalidSpan("span must cover at least one year".into()));
        }
        let end = years
            .checked_mul(12)
            .and_then(|months| start.checked_add_months(Months::new(months)))
            .ok_or_else(|| SolarError::InvalidSpan(format!("{start} + {years} years overflows")))?;
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// First date after the span.
    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Length of the span.
    pub fn duration_days(&self) -> Days {
        Days::new((self.end - self.start).num_days() as f64)
    }

    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Every date in the span, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d < end)
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Outcome of the pipeline for one date.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub date: NaiveDate,
    pub result: SolarResult<SolarDay>,
}

impl TableRow {
    /// The computed row, if the date succeeded.
    pub fn day(&self) -> Option<&SolarDay> {
        self.result.as_ref().ok()
    }
}

/// Row-per-date solar table for one observer.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarTable {
    observer: Observer,
    span: DateSpan,
    rows: Vec<TableRow>,
}

impl SolarTable {
    /// Column headings of every complete row.
    pub const COLUMNS: [&'static str; COLUMN_COUNT] = SolarDay::COLUMNS;

    /// Run the pipeline once per date of `span`.
    ///
    /// Dates are independent: a polar-night date is recorded as a failed row
    /// and the remaining dates are still computed.
    pub fn build(span: DateSpan, observer: &Observer) -> Self {
        debug!("building solar table for {observer} over {span}");

        let rows: Vec<TableRow> = span
            .dates()
            .map(|date| {
                let result = SolarDay::compute(date, observer);
                if let Err(err) = &result {
                    debug!("{date}: {err}");
                }
                TableRow { date, result }
            })
            .collect();

        debug!(
            "solar table complete: {} rows, {} failed",
            rows.len(),
            rows.iter().filter(|r| r.result.is_err()).count()
        );
        Self {
            observer: *observer,
            span,
            rows,
        }
    }

    #[inline]
    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    #[inline]
    pub fn span(&self) -> DateSpan {
        self.span
    }

    #[inline]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for `date`, if it lies in the span.
    pub fn row(&self, date: NaiveDate) -> Option<&TableRow> {
        self.rows
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|i| &self.rows[i])
    }

    /// Complete rows, in date order.
    pub fn days(&self) -> impl Iterator<Item = &SolarDay> {
        self.rows.iter().filter_map(TableRow::day)
    }

    /// Failed dates with their errors, in date order.
    pub fn failures(&self) -> impl Iterator<Item = (NaiveDate, &SolarError)> {
        self.rows
            .iter()
            .filter_map(|r| r.result.as_ref().err().map(|e| (r.date, e)))
    }

    /// Date-keyed map of the complete rows.
    pub fn to_map(&self) -> BTreeMap<NaiveDate, SolarDay> {
        self.days().map(|d| (d.date, *d)).collect()
    }

    /// All rows, or the first failure.
    pub fn into_days(self) -> SolarResult<Vec<SolarDay>> {
        self.rows.into_iter().map(|r| r.result).collect()
    }
}

// Failed rows are written as `{ date, error }` with the error's message.
#[cfg(feature = "serde")]
impl Serialize for TableRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.result {
            Ok(day) => day.serialize(serializer),
            Err(err) => {
                let mut s = serializer.serialize_struct("TableRow", 2)?;
                s.serialize_field("date", &self.date.to_string())?;
                s.serialize_field("error", &err.to_string())?;
                s.end()
            }
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for SolarTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.rows)
    }
}
