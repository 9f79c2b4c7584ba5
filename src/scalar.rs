// SPDX-License-Identifier: AGPL-3.0-or-later

//! The two scalar kinds: [`Datetime64`] (absolute instant) and
//! [`Timedelta64`] (signed duration).
//!
//! Both are a [`Tick`] qualified by a [`Resolution`]; they differ only in
//! their unit algebra.  Instants may cross the year/month boundary with
//! average-Gregorian factors; durations may not, which shows up in the
//! casting rules and in how mixed-resolution arithmetic promotes.
//!
//! Arithmetic is provided as `checked_*` methods because promotion itself
//! can fail (incompatible nonlinear units, overflow); the comparison traits
//! promote internally and treat NaT like a floating-point NaN.

use crate::algebra::{
    can_cast_datetime, can_cast_timedelta, conversion_factor, gcd, Casting,
};
use crate::codec::{moment_to_tick, tick_to_moment};
use crate::error::{Error, Result};
use crate::iso::format_iso_8601;
use crate::moment::Moment;
use crate::resolution::{Resolution, TemporalKind};
use crate::tick::Tick;
use crate::unit::Unit;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════
// Promotion
// ═══════════════════════════════════════════════════════════════════════════

/// Promotes the resolutions of two scalars into a common one.
///
/// The result is an instant if either operand is; duration operands are
/// strict about their nonlinear units, instants are not.
pub fn promote_resolutions(
    left: (TemporalKind, Resolution),
    right: (TemporalKind, Resolution),
) -> Result<(TemporalKind, Resolution)> {
    let kind = if left.0 == TemporalKind::Datetime || right.0 == TemporalKind::Datetime {
        TemporalKind::Datetime
    } else {
        TemporalKind::Timedelta
    };
    let meta = gcd(
        left.1,
        right.1,
        left.0 == TemporalKind::Timedelta,
        right.0 == TemporalKind::Timedelta,
    )?;
    Ok((kind, meta))
}

// ═══════════════════════════════════════════════════════════════════════════
// Datetime64
// ═══════════════════════════════════════════════════════════════════════════

/// An absolute instant: a tick count since 1970-01-01T00:00:00 at some
/// resolution.
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Datetime64 {
    tick: Tick,
    meta: Resolution,
}

impl Datetime64 {
    /// Not-a-Time at generic resolution.
    pub const NAT: Datetime64 = Datetime64 {
        tick: Tick::NaT,
        meta: Resolution::GENERIC,
    };

    #[inline]
    pub const fn new(tick: Tick, meta: Resolution) -> Datetime64 {
        Datetime64 { tick, meta }
    }

    /// Builds from a raw wire value (`i64::MIN` is NaT).
    #[inline]
    pub const fn from_raw(raw: i64, meta: Resolution) -> Datetime64 {
        Datetime64 {
            tick: Tick::from_raw(raw),
            meta,
        }
    }

    /// Encodes a broken-down moment at the given resolution.
    pub fn from_moment(moment: &Moment, meta: Resolution) -> Result<Datetime64> {
        Ok(Datetime64 {
            tick: moment_to_tick(meta, moment)?,
            meta,
        })
    }

    #[inline]
    pub const fn tick(&self) -> Tick {
        self.tick
    }

    #[inline]
    pub const fn resolution(&self) -> Resolution {
        self.meta
    }

    #[inline]
    pub const fn is_nat(&self) -> bool {
        self.tick.is_nat()
    }

    /// Decodes into a broken-down moment.
    pub fn to_moment(&self) -> Result<Moment> {
        tick_to_moment(self.meta, self.tick)
    }

    /// Casts to another resolution under the given rule.  NaT slips
    /// through every rule.
    pub fn cast(self, dst: Resolution, casting: Casting) -> Result<Datetime64> {
        if !self.tick.is_nat() && !can_cast_datetime(self.meta, dst, casting) {
            return Err(Error::CastingForbidden {
                src: self.meta.bare(),
                dst: dst.bare(),
                casting,
            });
        }
        self.cast_unchecked(dst)
    }

    /// Casting transformation without the rule check: conversion goes
    /// through the broken-down moment, so instants crossing the
    /// year/month boundary land on the calendar-correct tick.
    pub(crate) fn cast_unchecked(self, dst: Resolution) -> Result<Datetime64> {
        if self.meta.base() == dst.base() && self.meta.num() == dst.num() {
            return Ok(Datetime64 { tick: self.tick, meta: dst });
        }
        let moment = tick_to_moment(self.meta, self.tick)?;
        Ok(Datetime64 {
            tick: moment_to_tick(dst, &moment)?,
            meta: dst,
        })
    }

    /// `self + duration`, promoting to the common resolution.
    pub fn checked_add(self, rhs: Timedelta64) -> Result<Datetime64> {
        let meta = gcd(self.meta, rhs.meta, false, true)?;
        let a = self.cast_unchecked(meta)?;
        let b = rhs.cast_unchecked(meta)?;
        Ok(Datetime64 {
            tick: a.tick.checked_add(b.tick)?,
            meta,
        })
    }

    /// `self − duration`, promoting to the common resolution.
    pub fn checked_sub(self, rhs: Timedelta64) -> Result<Datetime64> {
        let meta = gcd(self.meta, rhs.meta, false, true)?;
        let a = self.cast_unchecked(meta)?;
        let b = rhs.cast_unchecked(meta)?;
        Ok(Datetime64 {
            tick: a.tick.checked_sub(b.tick)?,
            meta,
        })
    }

    /// `self − other`, yielding the duration between two instants.
    pub fn checked_diff(self, rhs: Datetime64) -> Result<Timedelta64> {
        let meta = gcd(self.meta, rhs.meta, false, false)?;
        let a = self.cast_unchecked(meta)?;
        let b = rhs.cast_unchecked(meta)?;
        Ok(Timedelta64 {
            tick: a.tick.checked_sub(b.tick)?,
            meta,
        })
    }

    /// The calendar date, for day-or-coarser resolutions inside chrono's
    /// representable range.
    pub fn to_chrono_date(&self) -> Option<NaiveDate> {
        if self.meta.base() > Unit::Day || self.meta.is_generic() {
            return None;
        }
        let moment = self.to_moment().ok()?;
        if moment.is_nat() {
            return None;
        }
        NaiveDate::from_ymd_opt(
            i32::try_from(moment.year).ok()?,
            moment.month as u32,
            moment.day as u32,
        )
    }

    /// The timestamp, for microsecond-or-coarser resolutions.  Values on a
    /// leap second or outside chrono's range yield `None`; the caller falls
    /// back to the raw tick.
    pub fn to_chrono_datetime(&self) -> Option<NaiveDateTime> {
        if self.meta.base() > Unit::Microsecond || self.meta.is_generic() {
            return None;
        }
        let moment = self.to_moment().ok()?;
        if moment.is_nat() || moment.second == 60 {
            return None;
        }
        NaiveDate::from_ymd_opt(
            i32::try_from(moment.year).ok()?,
            moment.month as u32,
            moment.day as u32,
        )?
        .and_hms_micro_opt(
            moment.hour as u32,
            moment.minute as u32,
            moment.second as u32,
            moment.microsecond as u32,
        )
    }

    fn promote_and_compare(&self, other: &Datetime64) -> Option<Ordering> {
        let meta = gcd(self.meta, other.meta, false, false).ok()?;
        let a = self.cast_unchecked(meta).ok()?;
        let b = other.cast_unchecked(meta).ok()?;
        a.tick.partial_cmp(&b.tick)
    }
}

impl PartialEq for Datetime64 {
    /// Promoted comparison; NaT compares unequal to everything, itself
    /// included.
    fn eq(&self, other: &Datetime64) -> bool {
        self.promote_and_compare(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Datetime64 {
    fn partial_cmp(&self, other: &Datetime64) -> Option<Ordering> {
        self.promote_and_compare(other)
    }
}

impl fmt::Display for Datetime64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tick.is_nat() {
            return f.write_str("NaT");
        }
        match self.to_moment() {
            Ok(moment) => f.write_str(&format_iso_8601(&moment, self.meta.base())),
            Err(_) => write!(f, "{}", self.tick),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Timedelta64
// ═══════════════════════════════════════════════════════════════════════════

/// A signed duration: a tick count at some resolution.
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timedelta64 {
    tick: Tick,
    meta: Resolution,
}

impl Timedelta64 {
    /// Not-a-Time at generic resolution.
    pub const NAT: Timedelta64 = Timedelta64 {
        tick: Tick::NaT,
        meta: Resolution::GENERIC,
    };

    #[inline]
    pub const fn new(tick: Tick, meta: Resolution) -> Timedelta64 {
        Timedelta64 { tick, meta }
    }

    /// Builds from a raw wire value (`i64::MIN` is NaT).
    #[inline]
    pub const fn from_raw(raw: i64, meta: Resolution) -> Timedelta64 {
        Timedelta64 {
            tick: Tick::from_raw(raw),
            meta,
        }
    }

    #[inline]
    pub const fn tick(&self) -> Tick {
        self.tick
    }

    #[inline]
    pub const fn resolution(&self) -> Resolution {
        self.meta
    }

    #[inline]
    pub const fn is_nat(&self) -> bool {
        self.tick.is_nat()
    }

    /// Casts to another resolution under the given rule.  NaT slips
    /// through every rule.
    pub fn cast(self, dst: Resolution, casting: Casting) -> Result<Timedelta64> {
        if !self.tick.is_nat() && !can_cast_timedelta(self.meta, dst, casting) {
            return Err(Error::CastingForbidden {
                src: self.meta.bare(),
                dst: dst.bare(),
                casting,
            });
        }
        self.cast_unchecked(dst)
    }

    /// Casting transformation without the rule check: durations scale by
    /// the exact conversion fraction, flooring toward −∞.
    pub(crate) fn cast_unchecked(self, dst: Resolution) -> Result<Timedelta64> {
        if self.meta.base() == dst.base() && self.meta.num() == dst.num() {
            return Ok(Timedelta64 { tick: self.tick, meta: dst });
        }
        let value = match self.tick {
            Tick::NaT => return Ok(Timedelta64 { tick: Tick::NaT, meta: dst }),
            Tick::Value(v) => v,
        };
        let (num, den) = conversion_factor(self.meta, dst)?;
        let scaled = value
            .checked_mul(num)
            .ok_or_else(|| Error::Overflow("while scaling a duration".into()))?;
        let tick = if value < 0 {
            (scaled - (den - 1)) / den
        } else {
            scaled / den
        };
        Ok(Timedelta64 {
            tick: Tick::checked(tick, "scaling a duration")?,
            meta: dst,
        })
    }

    /// `self + other`, promoting to the common resolution.
    pub fn checked_add(self, rhs: Timedelta64) -> Result<Timedelta64> {
        let meta = gcd(self.meta, rhs.meta, true, true)?;
        let a = self.cast_unchecked(meta)?;
        let b = rhs.cast_unchecked(meta)?;
        Ok(Timedelta64 {
            tick: a.tick.checked_add(b.tick)?,
            meta,
        })
    }

    /// `self − other`, promoting to the common resolution.
    pub fn checked_sub(self, rhs: Timedelta64) -> Result<Timedelta64> {
        let meta = gcd(self.meta, rhs.meta, true, true)?;
        let a = self.cast_unchecked(meta)?;
        let b = rhs.cast_unchecked(meta)?;
        Ok(Timedelta64 {
            tick: a.tick.checked_sub(b.tick)?,
            meta,
        })
    }

    /// Negation.
    pub fn checked_neg(self) -> Result<Timedelta64> {
        Ok(Timedelta64 {
            tick: self.tick.checked_neg()?,
            meta: self.meta,
        })
    }

    /// The duration as a chrono value, for linear microsecond-or-coarser
    /// resolutions.  Nonlinear and sub-microsecond durations have no exact
    /// chrono equivalent and yield `None`.
    pub fn to_chrono(&self) -> Option<Duration> {
        if self.meta.base() > Unit::Microsecond
            || self.meta.base().is_nonlinear()
            || self.meta.is_generic()
        {
            return None;
        }
        let value = self.tick.value()?;
        let per_unit: i64 = match self.meta.base() {
            Unit::Week => 7 * 24 * 60 * 60 * 1_000_000,
            Unit::Day => 24 * 60 * 60 * 1_000_000,
            Unit::Hour => 60 * 60 * 1_000_000,
            Unit::Minute => 60 * 1_000_000,
            Unit::Second => 1_000_000,
            Unit::Millisecond => 1_000,
            _ => 1,
        };
        let micros = value
            .checked_mul(self.meta.num() as i64)?
            .checked_mul(per_unit)?;
        Some(Duration::microseconds(micros))
    }

    fn promote_and_compare(&self, other: &Timedelta64) -> Option<Ordering> {
        let meta = gcd(self.meta, other.meta, true, true).ok()?;
        let a = self.cast_unchecked(meta).ok()?;
        let b = other.cast_unchecked(meta).ok()?;
        a.tick.partial_cmp(&b.tick)
    }
}

impl PartialEq for Timedelta64 {
    /// Promoted comparison; NaT compares unequal to everything, itself
    /// included.
    fn eq(&self, other: &Timedelta64) -> bool {
        self.promote_and_compare(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Timedelta64 {
    fn partial_cmp(&self, other: &Timedelta64) -> Option<Ordering> {
        self.promote_and_compare(other)
    }
}

impl fmt::Display for Timedelta64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tick.is_nat() {
            return f.write_str("NaT");
        }
        if self.meta.is_generic() {
            return write!(f, "{}", self.tick);
        }
        write!(f, "{} {}", self.tick, self.meta.bare())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(base: Unit, num: i32) -> Resolution {
        Resolution::new(base, num).unwrap()
    }

    #[test]
    fn datetime_safe_cast_to_finer() {
        let day = Datetime64::from_raw(1, Resolution::of(Unit::Day));
        let hours = day.cast(Resolution::of(Unit::Hour), Casting::Safe).unwrap();
        assert_eq!(hours.tick(), Tick::Value(24));

        let back = hours.cast(Resolution::of(Unit::Day), Casting::SameKind).unwrap();
        assert_eq!(back.tick(), Tick::Value(1));
    }

    #[test]
    fn datetime_finer_to_coarser_floors() {
        let one_hour = Datetime64::from_raw(1, Resolution::of(Unit::Hour));
        assert!(matches!(
            one_hour.cast(Resolution::of(Unit::Day), Casting::Safe),
            Err(Error::CastingForbidden { .. })
        ));
        let day = one_hour.cast(Resolution::of(Unit::Day), Casting::SameKind).unwrap();
        assert_eq!(day.tick(), Tick::Value(0));

        let before_epoch = Datetime64::from_raw(-1, Resolution::of(Unit::Hour));
        let day = before_epoch.cast(Resolution::of(Unit::Day), Casting::SameKind).unwrap();
        assert_eq!(day.tick(), Tick::Value(-1));
    }

    #[test]
    fn datetime_crosses_year_boundary_on_the_calendar() {
        // Year 31 is 2001; the cast goes through the calendar, not the
        // average year length, so it lands exactly on 2001-01-01.
        let years = Datetime64::from_raw(31, Resolution::of(Unit::Year));
        let days = years.cast(Resolution::of(Unit::Day), Casting::SameKind).unwrap();
        let moment = days.to_moment().unwrap();
        assert_eq!((moment.year, moment.month, moment.day), (2001, 1, 1));
    }

    #[test]
    fn nat_slips_through_casting_rules() {
        let nat = Datetime64::new(Tick::NaT, Resolution::of(Unit::Second));
        let cast = nat.cast(Resolution::of(Unit::Year), Casting::No).unwrap();
        assert!(cast.is_nat());

        let nat = Timedelta64::new(Tick::NaT, Resolution::of(Unit::Day));
        let cast = nat.cast(Resolution::of(Unit::Year), Casting::Safe).unwrap();
        assert!(cast.is_nat());
    }

    #[test]
    fn timedelta_cast_scales_exactly() {
        let td = Timedelta64::from_raw(3, Resolution::of(Unit::Day));
        let hours = td.cast(Resolution::of(Unit::Hour), Casting::Safe).unwrap();
        assert_eq!(hours.tick(), Tick::Value(72));

        // Floor toward −∞ when the fraction truncates.
        let td = Timedelta64::from_raw(-90, Resolution::of(Unit::Minute));
        let hours = td.cast(Resolution::of(Unit::Hour), Casting::SameKind).unwrap();
        assert_eq!(hours.tick(), Tick::Value(-2));
        let td = Timedelta64::from_raw(90, Resolution::of(Unit::Minute));
        let hours = td.cast(Resolution::of(Unit::Hour), Casting::SameKind).unwrap();
        assert_eq!(hours.tick(), Tick::Value(1));
    }

    #[test]
    fn timedelta_nonlinear_barrier() {
        let year = Timedelta64::from_raw(1, Resolution::of(Unit::Year));
        assert!(matches!(
            year.cast(Resolution::of(Unit::Day), Casting::SameKind),
            Err(Error::CastingForbidden { .. })
        ));
        let months = year.cast(Resolution::of(Unit::Month), Casting::Safe).unwrap();
        assert_eq!(months.tick(), Tick::Value(12));
        // Unsafe casting applies the average-Gregorian ratio.
        let days = year.cast(Resolution::of(Unit::Day), Casting::Unsafe).unwrap();
        assert_eq!(days.tick(), Tick::Value(365));
    }

    #[test]
    fn datetime_plus_timedelta_promotes() {
        let start = Datetime64::from_raw(10, Resolution::of(Unit::Day));
        let step = Timedelta64::from_raw(36, Resolution::of(Unit::Hour));
        let sum = start.checked_add(step).unwrap();
        assert_eq!(sum.resolution(), Resolution::of(Unit::Hour));
        assert_eq!(sum.tick(), Tick::Value(10 * 24 + 36));

        let diff = sum.checked_sub(step).unwrap();
        assert_eq!(diff.tick(), Tick::Value(240));
    }

    #[test]
    fn datetime_difference_is_a_timedelta() {
        let a = Datetime64::from_raw(5, Resolution::of(Unit::Day));
        let b = Datetime64::from_raw(36, Resolution::of(Unit::Hour));
        let diff = a.checked_diff(b).unwrap();
        assert_eq!(diff.resolution(), Resolution::of(Unit::Hour));
        assert_eq!(diff.tick(), Tick::Value(120 - 36));
    }

    #[test]
    fn timedelta_year_plus_day_is_incompatible() {
        let years = Timedelta64::from_raw(1, Resolution::of(Unit::Year));
        let days = Timedelta64::from_raw(1, Resolution::of(Unit::Day));
        assert!(matches!(
            years.checked_add(days),
            Err(Error::IncompatibleUnits { .. })
        ));
        // But an instant at year resolution takes a day step.
        let start = Datetime64::from_raw(0, Resolution::of(Unit::Year));
        let sum = start.checked_add(days).unwrap();
        assert_eq!(sum.resolution(), Resolution::of(Unit::Day));
        assert_eq!(sum.tick(), Tick::Value(1));
    }

    #[test]
    fn nat_absorbs_arithmetic() {
        let nat = Datetime64::NAT;
        let td = Timedelta64::from_raw(1, Resolution::of(Unit::Day));
        assert!(nat.checked_add(td).unwrap().is_nat());
        assert!(Timedelta64::NAT.checked_neg().unwrap().is_nat());
        assert!(td.checked_add(Timedelta64::NAT).unwrap().is_nat());
    }

    #[test]
    fn comparisons_promote_and_nat_is_unordered() {
        let day = Datetime64::from_raw(1, Resolution::of(Unit::Day));
        let hours = Datetime64::from_raw(24, Resolution::of(Unit::Hour));
        assert_eq!(day, hours);
        assert!(Datetime64::from_raw(2, Resolution::of(Unit::Day)) > hours);

        assert_ne!(Datetime64::NAT, Datetime64::NAT);
        assert_eq!(Datetime64::NAT.partial_cmp(&day), None);

        let a = Timedelta64::from_raw(90, Resolution::of(Unit::Minute));
        let b = Timedelta64::from_raw(1, Resolution::of(Unit::Hour));
        assert!(a > b);
        assert_ne!(Timedelta64::NAT, Timedelta64::NAT);
    }

    #[test]
    fn promotion_rules() {
        let (kind, meta) = promote_resolutions(
            (TemporalKind::Datetime, Resolution::of(Unit::Day)),
            (TemporalKind::Timedelta, res(Unit::Hour, 2)),
        )
        .unwrap();
        assert_eq!(kind, TemporalKind::Datetime);
        assert_eq!(meta, res(Unit::Hour, 2));

        assert!(promote_resolutions(
            (TemporalKind::Timedelta, Resolution::of(Unit::Year)),
            (TemporalKind::Timedelta, Resolution::of(Unit::Day)),
        )
        .is_err());

        // The instant side may cross the boundary.
        let (_, meta) = promote_resolutions(
            (TemporalKind::Datetime, Resolution::of(Unit::Year)),
            (TemporalKind::Timedelta, Resolution::of(Unit::Day)),
        )
        .unwrap();
        assert_eq!(meta, Resolution::of(Unit::Day));
    }

    #[test]
    fn chrono_egress() {
        let day = Datetime64::from_raw(10_957, Resolution::of(Unit::Day));
        assert_eq!(
            day.to_chrono_date(),
            NaiveDate::from_ymd_opt(2000, 1, 1)
        );
        assert_eq!(day.to_chrono_datetime().unwrap().to_string(), "2000-01-01 00:00:00");

        // Sub-microsecond resolutions have no chrono timestamp.
        let ns = Datetime64::from_raw(0, Resolution::of(Unit::Nanosecond));
        assert_eq!(ns.to_chrono_datetime(), None);

        let td = Timedelta64::from_raw(90, Resolution::of(Unit::Minute));
        assert_eq!(td.to_chrono(), Some(Duration::minutes(90)));
        assert_eq!(
            Timedelta64::from_raw(1, Resolution::of(Unit::Year)).to_chrono(),
            None
        );
        assert_eq!(Timedelta64::NAT.to_chrono(), None);
    }

    #[test]
    fn display_forms() {
        let dt = Datetime64::from_raw(0, Resolution::of(Unit::Second));
        assert_eq!(dt.to_string(), "1970-01-01T00:00:00");
        assert_eq!(Datetime64::NAT.to_string(), "NaT");

        let td = Timedelta64::from_raw(5, res(Unit::Day, 2));
        assert_eq!(td.to_string(), "5 2D");
        assert_eq!(Timedelta64::NAT.to_string(), "NaT");
    }
}
