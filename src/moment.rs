// SPDX-License-Identifier: AGPL-3.0-or-later

//! Broken-down calendar moment.
//!
//! [`Moment`] is the field-wise representation of a point on the calendar:
//! year down to attoseconds, with the sub-second part split into three
//! six-digit fields (microseconds, picoseconds, attoseconds).  A dedicated
//! year value marks Not-a-Time.
//!
//! The only mutating operations are [`Moment::add_minutes`] and
//! [`Moment::add_seconds`], which carry across field boundaries (including
//! month lengths and leap years) and leave the moment normalised.

use crate::calendar::{days_from_civil, days_in_month};
use crate::error::{Error, Result};

/// Year value that marks a Not-a-Time moment.
pub const NAT_YEAR: i64 = i64::MIN;

/// A broken-down calendar moment.
///
/// Invariants on a validated moment: `month ∈ [1,12]`,
/// `day ∈ [1, days_in_month]`, `hour ∈ [0,23]`, `minute ∈ [0,59]`,
/// `second ∈ [0,59]` (60 appears only when decoding a tick that lands on a
/// leap second), and each sub-second field in `[0, 999999]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Moment {
    pub year: i64,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub microsecond: i32,
    pub picosecond: i32,
    pub attosecond: i32,
}

impl Default for Moment {
    /// The Unix epoch, 1970-01-01T00:00:00.
    fn default() -> Self {
        Moment {
            year: 1970,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            microsecond: 0,
            picosecond: 0,
            attosecond: 0,
        }
    }
}

impl Moment {
    /// The Not-a-Time moment.
    pub const NAT: Moment = Moment {
        year: NAT_YEAR,
        month: 1,
        day: 1,
        hour: 0,
        minute: 0,
        second: 0,
        microsecond: 0,
        picosecond: 0,
        attosecond: 0,
    };

    /// Builds a date-only moment, validating the calendar fields.
    pub fn from_date(year: i64, month: i32, day: i32) -> Result<Moment> {
        let moment = Moment {
            year,
            month,
            day,
            ..Moment::default()
        };
        moment.validate_date()?;
        Ok(moment)
    }

    /// Builds a moment with microsecond precision, validating every field.
    #[allow(clippy::too_many_arguments)]
    pub fn from_datetime(
        year: i64,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        microsecond: i32,
    ) -> Result<Moment> {
        let moment = Moment {
            year,
            month,
            day,
            hour,
            minute,
            second,
            microsecond,
            ..Moment::default()
        };
        moment.validate_date()?;
        moment.validate_time()?;
        Ok(moment)
    }

    /// True if this moment is the NaT sentinel.
    #[inline]
    pub const fn is_nat(&self) -> bool {
        self.year == NAT_YEAR
    }

    /// Checks the calendar fields against the month-length table.
    pub fn validate_date(&self) -> Result<()> {
        if self.month < 1 || self.month > 12 {
            return Err(Error::InvalidDate {
                year: self.year,
                month: self.month,
                day: self.day,
            });
        }
        if self.day < 1 || self.day > days_in_month(self.year, self.month) {
            return Err(Error::InvalidDate {
                year: self.year,
                month: self.month,
                day: self.day,
            });
        }
        Ok(())
    }

    /// Checks the time-of-day fields.  Second 60 is rejected here; it is
    /// only tolerated when a tick is decoded back into fields.
    pub fn validate_time(&self) -> Result<()> {
        if self.hour < 0
            || self.hour >= 24
            || self.minute < 0
            || self.minute >= 60
            || self.second < 0
            || self.second >= 60
            || self.microsecond < 0
            || self.microsecond >= 1_000_000
            || self.picosecond < 0
            || self.picosecond >= 1_000_000
            || self.attosecond < 0
            || self.attosecond >= 1_000_000
        {
            return Err(Error::InvalidTime {
                hour: self.hour,
                minute: self.minute,
                second: self.second,
                microsecond: self.microsecond,
            });
        }
        Ok(())
    }

    /// Day offset of this moment from the 1970 epoch.
    #[inline]
    pub fn days_since_epoch(&self) -> i64 {
        days_from_civil(self.year, self.month, self.day)
    }

    /// Minute offset of this moment from the 1970 epoch.
    pub fn minutes_since_epoch(&self) -> i64 {
        let mut minutes = self.days_since_epoch() * 24 * 60;
        minutes += self.hour as i64 * 60;
        minutes += self.minute as i64;
        minutes
    }

    /// Adjusts the moment by a signed number of seconds, carrying into the
    /// minute and coarser fields.  Assumes the current values are valid.
    pub fn add_seconds(&mut self, seconds: i64) {
        let mut total = self.second as i64 + seconds;
        self.second = total.rem_euclid(60) as i32;
        total = total.div_euclid(60);
        if total != 0 {
            self.add_minutes(total);
        }
    }

    /// Adjusts the moment by a signed number of minutes, carrying across
    /// hour, day, month, and year boundaries.  Assumes the current values
    /// are valid.
    pub fn add_minutes(&mut self, minutes: i64) {
        let mut total = self.minute as i64 + minutes;
        self.minute = total.rem_euclid(60) as i32;
        total = total.div_euclid(60);

        total += self.hour as i64;
        self.hour = total.rem_euclid(24) as i32;
        total = total.div_euclid(24);

        // Carry whole days one at a time; the tick codec only produces
        // offsets within a couple of hundred minutes, so this never spins.
        let mut day = self.day as i64 + total;
        while day < 1 {
            self.month -= 1;
            if self.month < 1 {
                self.year -= 1;
                self.month = 12;
            }
            day += days_in_month(self.year, self.month) as i64;
        }
        loop {
            let length = days_in_month(self.year, self.month) as i64;
            if day <= length {
                break;
            }
            day -= length;
            self.month += 1;
            if self.month > 12 {
                self.year += 1;
                self.month = 1;
            }
        }
        self.day = day as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_epoch() {
        let epoch = Moment::default();
        assert_eq!(epoch.year, 1970);
        assert_eq!((epoch.month, epoch.day), (1, 1));
        assert_eq!(epoch.days_since_epoch(), 0);
        assert_eq!(epoch.minutes_since_epoch(), 0);
    }

    #[test]
    fn nat_marker() {
        assert!(Moment::NAT.is_nat());
        assert!(!Moment::default().is_nat());
    }

    #[test]
    fn date_validation() {
        assert!(Moment::from_date(2021, 2, 28).is_ok());
        assert!(matches!(
            Moment::from_date(2021, 2, 29),
            Err(Error::InvalidDate { .. })
        ));
        assert!(Moment::from_date(2020, 2, 29).is_ok());
        assert!(matches!(
            Moment::from_date(2020, 13, 1),
            Err(Error::InvalidDate { .. })
        ));
        assert!(matches!(
            Moment::from_date(2020, 0, 1),
            Err(Error::InvalidDate { .. })
        ));
    }

    #[test]
    fn time_validation() {
        assert!(Moment::from_datetime(2020, 1, 1, 23, 59, 59, 999_999).is_ok());
        assert!(matches!(
            Moment::from_datetime(2020, 1, 1, 24, 0, 0, 0),
            Err(Error::InvalidTime { .. })
        ));
        // A leap second is not accepted on ingestion.
        assert!(matches!(
            Moment::from_datetime(2016, 12, 31, 23, 59, 60, 0),
            Err(Error::InvalidTime { .. })
        ));
    }

    #[test]
    fn minute_carry_across_midnight() {
        let mut m = Moment::from_datetime(2020, 1, 1, 0, 10, 0, 0).unwrap();
        m.add_minutes(-30);
        assert_eq!((m.year, m.month, m.day), (2019, 12, 31));
        assert_eq!((m.hour, m.minute), (23, 40));
    }

    #[test]
    fn minute_carry_across_leap_day() {
        let mut m = Moment::from_datetime(2020, 2, 28, 23, 30, 0, 0).unwrap();
        m.add_minutes(60);
        assert_eq!((m.month, m.day, m.hour, m.minute), (2, 29, 0, 30));

        let mut m = Moment::from_datetime(2021, 2, 28, 23, 30, 0, 0).unwrap();
        m.add_minutes(60);
        assert_eq!((m.month, m.day, m.hour, m.minute), (3, 1, 0, 30));
    }

    #[test]
    fn second_carry_chains_into_minutes() {
        let mut m = Moment::from_datetime(1999, 12, 31, 23, 59, 30, 0).unwrap();
        m.add_seconds(45);
        assert_eq!((m.year, m.month, m.day), (2000, 1, 1));
        assert_eq!((m.hour, m.minute, m.second), (0, 0, 15));

        let mut m = Moment::from_datetime(2000, 1, 1, 0, 0, 10, 0).unwrap();
        m.add_seconds(-25);
        assert_eq!((m.year, m.month, m.day), (1999, 12, 31));
        assert_eq!((m.hour, m.minute, m.second), (23, 59, 45));
    }

    #[test]
    fn year_rollover_on_minutes() {
        let mut m = Moment::from_date(2020, 12, 31).unwrap();
        m.add_minutes(24 * 60);
        assert_eq!((m.year, m.month, m.day), (2021, 1, 1));
    }
}
