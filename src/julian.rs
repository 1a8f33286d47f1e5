// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Local Julian Day and the banded Julian Century.
//!
//! [`JulianDay`] stores a single [`Days`] quantity counted from the Julian
//! epoch (JD 0 = noon, −4712-01-01 Julian proleptic calendar), already shifted
//! by the observer's UTC offset.  It is the first stage of the pipeline; every
//! later stage is driven by its [`JulianDay::julian_century`].
//!
//! # Epoch bands
//!
//! The century value is measured from the start of the 36 525-day band that
//! encloses the instant, not always from J2000.0:
//!
//! | Julian Day | Anchor |
//! |------------|--------|
//! | `≥ 2 451 545` | 2 451 545 (J2000.0) |
//! | `[2 415 020, 2 451 545)` | 2 415 020 |
//! | `[2 378 495, 2 415 020)` | 2 378 495 |
//! | … | one band per 36 525 days, down to the last positive boundary |

use chrono::{Datelike, NaiveDate};
use qtty::{Centuries, Days, Hours};
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Hours in one civil day.
const HOURS_PER_DAY: f64 = 24.0;

/// A local Julian Day number.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JulianDay {
    quantity: Days,
}

impl JulianDay {
    /// J2000.0 reference epoch (2000-01-01, JD 2 451 545).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days; also the width of an epoch band.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Julian Day at midnight of proleptic Gregorian day number 0, i.e. the
    /// offset that aligns `NaiveDate::num_days_from_ce()` with the Julian Day
    /// convention.
    pub const ORDINAL_OFFSET: Days = Days::new(1_721_424.5);

    /// Create from a raw day count.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self { quantity: days }
    }

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Local Julian Day of a civil date for an observer at `utc_offset`.
    ///
    /// Computed as `ordinal + 1 721 424.5 + 0.5 − offset/24`, where `ordinal`
    /// counts 0001-01-01 as day 1.  Any valid date and finite offset yields a
    /// finite value.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use qtty::Hours;
    /// use sunriset::JulianDay;
    ///
    /// let date = NaiveDate::from_ymd_opt(2021, 5, 31).unwrap();
    /// let jd = JulianDay::from_civil_date(date, Hours::new(-2.0));
    /// assert!((jd.value() - 2_459_366.083_333_333_5).abs() < 1e-9);
    /// ```
    pub fn from_civil_date(date: NaiveDate, utc_offset: Hours) -> Self {
        let ordinal = Days::new(f64::from(date.num_days_from_ce()));
        let midnight = ordinal + Self::ORDINAL_OFFSET;
        Self::from_days(midnight + Days::new(0.5) - Days::new(utc_offset.value() / HOURS_PER_DAY))
    }

    /// Start of the epoch band enclosing this instant.
    ///
    /// Boundaries are scanned downwards from J2000.0 in steps of one Julian
    /// century while they stay positive; the first boundary not after `self`
    /// wins.  Instants at or after J2000.0 always anchor on J2000.0, and
    /// instants below the last positive boundary anchor one band beneath it.
    pub fn epoch_anchor(&self) -> Self {
        let mut anchor = Self::J2000;
        let mut boundary = Self::J2000;
        while boundary.value() > 0.0 {
            if *self < boundary {
                anchor = boundary - Self::JULIAN_CENTURY;
            } else {
                break;
            }
            boundary -= Self::JULIAN_CENTURY;
        }
        anchor
    }

    /// Julian centuries elapsed since the enclosing band's anchor.
    ///
    /// For instants before J2000.0 the value lies in `[0, 1)`; from J2000.0
    /// onwards it is the plain century count since J2000.0.
    ///
    /// The value counts Julian centuries of 36 525 days.  It is carried as
    /// [`Centuries`] for typing only: do not convert it with `.to::<Day>()`,
    /// which assumes tropical centuries.
    #[inline]
    pub fn julian_century(&self) -> Centuries {
        let anchor = self.epoch_anchor();
        Centuries::new((self.value() - anchor.value()) / Self::JULIAN_CENTURY.value())
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl std::fmt::Display for JulianDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Julian Day: {}", self.value())
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for JulianDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for JulianDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl AddAssign<Days> for JulianDay {
    #[inline]
    fn add_assign(&mut self, rhs: Days) {
        self.quantity += rhs;
    }
}

impl Sub<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl SubAssign<Days> for JulianDay {
    #[inline]
    fn sub_assign(&mut self, rhs: Days) {
        self.quantity -= rhs;
    }
}

impl Sub for JulianDay {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

impl From<JulianDay> for Days {
    #[inline]
    fn from(jd: JulianDay) -> Self {
        jd.quantity
    }
}
