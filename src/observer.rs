// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observer location and clock settings.

use qtty::{Days, Degrees, Hours};
use std::fmt;

use crate::error::{SolarError, SolarResult};

/// A validated observing site.
///
/// Latitude is positive north, longitude positive east, and the UTC offset
/// positive east of Greenwich (UTC−8 is `-8.0`).  The daylight-saving
/// adjustment is added to every clock time the pipeline produces; it defaults
/// to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    latitude: Degrees,
    longitude: Degrees,
    utc_offset: Hours,
    dst_adjustment: Days,
}

impl Observer {
    /// Validate and build an observer.
    ///
    /// # Errors
    /// * [`SolarError::InvalidLatitude`] unless `-90 < latitude < 90`.
    /// * [`SolarError::InvalidLongitude`] unless `-180 ≤ longitude ≤ 180`.
    /// * [`SolarError::InvalidUtcOffset`] if the offset is not finite.
    ///
    /// ```
    /// use qtty::{Degrees, Hours};
    /// use sunriset::Observer;
    ///
    /// let la = Observer::new(Degrees::new(34.0522), Degrees::new(-118.2437), Hours::new(-8.0));
    /// assert!(la.is_ok());
    /// assert!(Observer::new(Degrees::new(90.0), Degrees::new(0.0), Hours::new(0.0)).is_err());
    /// ```
    pub fn new(latitude: Degrees, longitude: Degrees, utc_offset: Hours) -> SolarResult<Self> {
        let lat = latitude.value();
        if !lat.is_finite() || lat.abs() >= 90.0 {
            return Err(SolarError::InvalidLatitude(lat));
        }
        let lon = longitude.value();
        if !lon.is_finite() || lon.abs() > 180.0 {
            return Err(SolarError::InvalidLongitude(lon));
        }
        if !utc_offset.value().is_finite() {
            return Err(SolarError::InvalidUtcOffset(utc_offset.value()));
        }
        Ok(Self {
            latitude,
            longitude,
            utc_offset,
            dst_adjustment: Days::new(0.0),
        })
    }

    /// Same site with a daylight-saving adjustment (e.g. `1/24` day).
    ///
    /// # Errors
    /// [`SolarError::InvalidDstAdjustment`] if the adjustment is not finite.
    pub fn with_dst_adjustment(mut self, adjustment: Days) -> SolarResult<Self> {
        if !adjustment.value().is_finite() {
            return Err(SolarError::InvalidDstAdjustment(adjustment.value()));
        }
        self.dst_adjustment = adjustment;
        Ok(self)
    }

    /// Latitude in degrees, positive north.
    #[inline]
    pub fn latitude(&self) -> Degrees {
        self.latitude
    }

    /// Longitude in degrees, positive east.
    #[inline]
    pub fn longitude(&self) -> Degrees {
        self.longitude
    }

    /// Offset of local standard time from UTC, in hours.
    #[inline]
    pub fn utc_offset(&self) -> Hours {
        self.utc_offset
    }

    /// Daylight-saving adjustment added to clock times, in days.
    #[inline]
    pub fn dst_adjustment(&self) -> Days {
        self.dst_adjustment
    }
}

impl fmt::Display for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lat {}°, lon {}°, UTC{:+}h",
            self.latitude.value(),
            self.longitude.value(),
            self.utc_offset.value()
        )
    }
}
