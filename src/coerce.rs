// SPDX-License-Identifier: AGPL-3.0-or-later

//! Ingestion of heterogeneous external values.
//!
//! [`TemporalInput`] is the set of shapes the library accepts: text,
//! integers, broken-down moments, existing scalars, and the chrono host
//! objects.  [`TemporalInput::to_datetime`] and
//! [`TemporalInput::to_timedelta`] fit a value to a `(Resolution, Tick)`
//! pair, inferring the resolution when the caller passes `None` and
//! checking the casting rules when it does not.
//!
//! Timezone-aware inputs are normalised to UTC by applying the signed
//! offset and discarding it, with a one-shot deprecation notice.  Under
//! [`Casting::Unsafe`] an unconvertible input degrades to NaT instead of
//! an error; under [`Casting::SameKind`] only the explicit NaT sentinel
//! does.

use crate::algebra::{can_cast_datetime, can_cast_timedelta, gcd, Casting};
use crate::codec::moment_to_tick;
use crate::error::{Error, Result};
use crate::iso::parse_iso_8601;
use crate::moment::Moment;
use crate::resolution::{Resolution, TemporalKind};
use crate::scalar::{Datetime64, Timedelta64};
use crate::tick::Tick;
use crate::unit::Unit;
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use log::warn;
use std::str::FromStr;
use std::sync::Once;

fn warn_tz_aware_once() {
    static NOTICE: Once = Once::new();
    NOTICE.call_once(|| {
        warn!("ingesting timezone-aware datetimes is deprecated; the offset is applied and discarded");
    });
}

/// An external value the coercion layer can ingest.
#[derive(Debug, Clone)]
pub enum TemporalInput<'a> {
    /// ISO-8601 text for datetimes; `NaT` or integer text for timedeltas.
    Str(&'a str),
    /// A raw tick count; requires a concrete resolution for datetimes.
    Int(i64),
    /// An already broken-down moment.
    Moment(Moment),
    /// An existing instant scalar.
    Datetime(Datetime64),
    /// An existing duration scalar.
    Timedelta(Timedelta64),
    /// A chrono calendar date.
    Date(NaiveDate),
    /// A chrono timestamp without offset.
    DateTime(NaiveDateTime),
    /// A chrono timestamp with a fixed offset; normalised to UTC.
    DateTimeTz(DateTime<FixedOffset>),
    /// A chrono duration; decomposed as days/seconds/microseconds.
    Duration(Duration),
    /// The explicit not-a-value sentinel.
    Nat,
}

impl TemporalInput<'_> {
    /// True for shapes that can only mean an instant.
    pub(crate) fn is_datetime_like(&self) -> bool {
        matches!(
            self,
            TemporalInput::Datetime(_)
                | TemporalInput::Date(_)
                | TemporalInput::DateTime(_)
                | TemporalInput::DateTimeTz(_)
        )
    }

    /// True for shapes the range generator treats as durations.
    pub(crate) fn is_timedelta_like(&self) -> bool {
        matches!(
            self,
            TemporalInput::Timedelta(_) | TemporalInput::Duration(_) | TemporalInput::Int(_)
        )
    }

    /// Text that can only be an ISO datetime (not `NaT`, not an integer).
    pub(crate) fn is_datetime_text(&self) -> bool {
        match self {
            TemporalInput::Str(s) => {
                let t = s.trim();
                !t.is_empty() && !t.eq_ignore_ascii_case("nat") && t.parse::<i64>().is_err()
            }
            _ => false,
        }
    }

    /// Fits this value to an instant `(Resolution, Tick)`.
    ///
    /// With `meta == None` the resolution is inferred from the value;
    /// otherwise the value is cast to `meta` under `casting`.
    pub fn to_datetime(
        &self,
        meta: Option<Resolution>,
        casting: Casting,
    ) -> Result<(Resolution, Tick)> {
        match self {
            TemporalInput::Str(s) => {
                let (moment, bestunit) = parse_iso_8601(s, meta.map(|m| m.base()), casting)?;
                let meta = meta.unwrap_or(Resolution::of(bestunit));
                Ok((meta, moment_to_tick(meta, &moment)?))
            }

            // Raw integers are copied, never converted.
            TemporalInput::Int(value) => match meta {
                Some(target) if !target.is_generic() => Ok((target, Tick::from_raw(*value))),
                _ => Err(Error::GenericUnitMisuse(
                    "converting an integer to a datetime requires a specified unit",
                )),
            },

            TemporalInput::Datetime(scalar) => match meta {
                None => Ok((scalar.resolution(), scalar.tick())),
                Some(target) => {
                    // NaT slips through every casting rule.
                    let cast = if scalar.is_nat() {
                        scalar.cast_unchecked(target)?
                    } else {
                        scalar.cast(target, casting)?
                    };
                    Ok((target, cast.tick()))
                }
            },

            TemporalInput::Moment(moment) => {
                if moment.is_nat() {
                    return Ok((meta.unwrap_or(Resolution::GENERIC), Tick::NaT));
                }
                moment.validate_date()?;
                moment.validate_time()?;
                finish_datetime_object(*moment, moment_best_unit(moment), meta, casting)
            }

            TemporalInput::Date(date) => {
                let moment = Moment {
                    year: date.year() as i64,
                    month: date.month() as i32,
                    day: date.day() as i32,
                    ..Moment::default()
                };
                finish_datetime_object(moment, Unit::Day, meta, casting)
            }

            TemporalInput::DateTime(naive) => {
                finish_datetime_object(moment_from_naive(naive), Unit::Microsecond, meta, casting)
            }

            TemporalInput::DateTimeTz(aware) => {
                warn_tz_aware_once();
                let offset_minutes = (aware.offset().local_minus_utc() / 60) as i64;
                let mut moment = moment_from_naive(&aware.naive_local());
                moment.add_minutes(-offset_minutes);
                finish_datetime_object(moment, Unit::Microsecond, meta, casting)
            }

            TemporalInput::Timedelta(_) | TemporalInput::Duration(_) | TemporalInput::Nat => {
                self.fallback(meta, casting, "datetime")
            }
        }
    }

    /// Fits this value to a duration `(Resolution, Tick)`.
    pub fn to_timedelta(
        &self,
        meta: Option<Resolution>,
        casting: Casting,
    ) -> Result<(Resolution, Tick)> {
        match self {
            // Duration strings are either NaT or a plain tick count.
            TemporalInput::Str(s) => {
                let text = s.trim();
                if text.is_empty() || text.eq_ignore_ascii_case("nat") {
                    Ok((meta.unwrap_or(Resolution::GENERIC), Tick::NaT))
                } else if let Ok(value) = text.parse::<i64>() {
                    Ok((meta.unwrap_or(Resolution::GENERIC), Tick::from_raw(value)))
                } else {
                    self.fallback(meta, casting, "timedelta")
                }
            }

            // Raw integers default to generic units.
            TemporalInput::Int(value) => Ok((
                meta.unwrap_or(Resolution::GENERIC),
                Tick::from_raw(*value),
            )),

            TemporalInput::Timedelta(scalar) => match meta {
                None => Ok((scalar.resolution(), scalar.tick())),
                Some(target) => {
                    let cast = if scalar.is_nat() {
                        scalar.cast_unchecked(target)?
                    } else {
                        scalar.cast(target, casting)?
                    };
                    Ok((target, cast.tick()))
                }
            },

            TemporalInput::Duration(duration) => {
                let micros = duration.num_microseconds().ok_or_else(|| {
                    Error::Overflow("converting a chrono duration to microseconds".into())
                })?;
                let micros = Tick::checked(micros, "converting a chrono duration")?;
                match meta {
                    None => Ok((Resolution::of(Unit::Microsecond), micros)),
                    Some(target) => {
                        // Castability is judged from the finest nonzero
                        // field, so a whole-hour duration may cast safely
                        // to hours even though it arrives as microseconds.
                        let implied = implied_duration_unit(micros.to_raw());
                        if !can_cast_timedelta(Resolution::of(implied), target, casting) {
                            return Err(Error::CastingForbidden {
                                src: implied.symbol().to_string(),
                                dst: target.bare(),
                                casting,
                            });
                        }
                        let scalar =
                            Timedelta64::new(micros, Resolution::of(Unit::Microsecond));
                        Ok((target, scalar.cast_unchecked(target)?.tick()))
                    }
                }
            }

            TemporalInput::Moment(_)
            | TemporalInput::Datetime(_)
            | TemporalInput::Date(_)
            | TemporalInput::DateTime(_)
            | TemporalInput::DateTimeTz(_)
            | TemporalInput::Nat => self.fallback(meta, casting, "timedelta"),
        }
    }

    /// Last resort: unsafe casting turns anything into NaT, same-kind
    /// accepts the explicit sentinel, everything else is a failure.
    fn fallback(
        &self,
        meta: Option<Resolution>,
        casting: Casting,
        kind: &str,
    ) -> Result<(Resolution, Tick)> {
        let is_sentinel = matches!(self, TemporalInput::Nat);
        if casting == Casting::Unsafe || (is_sentinel && casting == Casting::SameKind) {
            Ok((meta.unwrap_or(Resolution::GENERIC), Tick::NaT))
        } else {
            Err(Error::ConversionFailure(format!(
                "cannot interpret {self:?} as a {kind}"
            )))
        }
    }
}

/// Converts several inputs to a shared resolution, inferring it by folding
/// the descriptor GCD across the items when no target is given.
pub(crate) fn resolve_common(
    inputs: &[(&TemporalInput<'_>, TemporalKind)],
    casting: Casting,
    meta: Option<Resolution>,
) -> Result<(Resolution, Vec<Tick>)> {
    let convert = |input: &TemporalInput<'_>, kind: TemporalKind, meta: Option<Resolution>| {
        match kind {
            TemporalKind::Datetime => input.to_datetime(meta, casting),
            TemporalKind::Timedelta => input.to_timedelta(meta, casting),
        }
    };

    if let Some(target) = meta {
        let mut ticks = Vec::with_capacity(inputs.len());
        for &(input, kind) in inputs {
            ticks.push(convert(input, kind, Some(target))?.1);
        }
        return Ok((target, ticks));
    }

    // First pass: per-item resolution and value.
    let mut converted = Vec::with_capacity(inputs.len());
    for &(input, kind) in inputs {
        converted.push(convert(input, kind, None)?);
    }

    // Merge the resolutions, accumulating duration strictness.
    let mut common = converted[0].0;
    let mut strict_acc = inputs[0].1 == TemporalKind::Timedelta;
    for (i, (item_meta, _)) in converted.iter().enumerate().skip(1) {
        let strict_item = inputs[i].1 == TemporalKind::Timedelta;
        common = gcd(*item_meta, common, strict_item, strict_acc)?;
        strict_acc = strict_acc || strict_item;
    }

    // Second pass: bring every value to the common resolution.
    let mut ticks = Vec::with_capacity(inputs.len());
    for (i, (item_meta, tick)) in converted.into_iter().enumerate() {
        let tick = match inputs[i].1 {
            TemporalKind::Datetime => Datetime64::new(tick, item_meta)
                .cast_unchecked(common)?
                .tick(),
            TemporalKind::Timedelta => Timedelta64::new(tick, item_meta)
                .cast_unchecked(common)?
                .tick(),
        };
        ticks.push(tick);
    }

    Ok((common, ticks))
}

/// Precision implied by a broken-down moment.
///
/// A `Moment` always carries time-of-day fields, so the floor is
/// microseconds — the same unit the chrono timestamp arms use, midnight
/// included.  Nonzero sub-microsecond fields promote the unit further so
/// their values survive encoding.  Date-only intent is expressed by
/// passing an explicit target resolution instead.
fn moment_best_unit(moment: &Moment) -> Unit {
    if moment.attosecond != 0 {
        Unit::Attosecond
    } else if moment.picosecond != 0 {
        Unit::Picosecond
    } else {
        Unit::Microsecond
    }
}

/// Coarsest unit that still represents a microsecond total exactly.
fn implied_duration_unit(micros: i64) -> Unit {
    if micros % 1_000 != 0 {
        Unit::Microsecond
    } else if micros % 1_000_000 != 0 {
        Unit::Millisecond
    } else if micros % (60 * 1_000_000) != 0 {
        Unit::Second
    } else if micros % (60 * 60 * 1_000_000) != 0 {
        Unit::Minute
    } else if micros % (24 * 60 * 60 * 1_000_000) != 0 {
        Unit::Hour
    } else if micros % (7 * 24 * 60 * 60 * 1_000_000) != 0 {
        Unit::Day
    } else {
        Unit::Week
    }
}

fn moment_from_naive(naive: &NaiveDateTime) -> Moment {
    Moment {
        year: naive.year() as i64,
        month: naive.month() as i32,
        day: naive.day() as i32,
        hour: naive.hour() as i32,
        minute: naive.minute() as i32,
        second: naive.second() as i32,
        microsecond: ((naive.nanosecond() % 1_000_000_000) / 1_000) as i32,
        ..Moment::default()
    }
}

fn finish_datetime_object(
    moment: Moment,
    bestunit: Unit,
    meta: Option<Resolution>,
    casting: Casting,
) -> Result<(Resolution, Tick)> {
    match meta {
        None => {
            let meta = Resolution::of(bestunit);
            Ok((meta, moment_to_tick(meta, &moment)?))
        }
        Some(target) => {
            let src = Resolution::of(bestunit);
            if !can_cast_datetime(src, target, casting) {
                return Err(Error::CastingForbidden {
                    src: src.bare(),
                    dst: target.bare(),
                    casting,
                });
            }
            Ok((target, moment_to_tick(target, &moment)?))
        }
    }
}

impl FromStr for Datetime64 {
    type Err = Error;

    /// Parses ISO-8601 text, adopting the resolution the text spells out.
    fn from_str(s: &str) -> Result<Datetime64> {
        let (meta, tick) = TemporalInput::Str(s).to_datetime(None, Casting::SameKind)?;
        Ok(Datetime64::new(tick, meta))
    }
}

impl FromStr for Timedelta64 {
    type Err = Error;

    /// Parses `NaT` or a plain tick count at generic resolution.
    fn from_str(s: &str) -> Result<Timedelta64> {
        let (meta, tick) = TemporalInput::Str(s).to_timedelta(None, Casting::SameKind)?;
        Ok(Timedelta64::new(tick, meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(base: Unit, num: i32) -> Resolution {
        Resolution::new(base, num).unwrap()
    }

    #[test]
    fn strings_adopt_their_spelled_precision() {
        let (meta, tick) = TemporalInput::Str("2020-01-01")
            .to_datetime(None, Casting::SameKind)
            .unwrap();
        assert_eq!(meta, Resolution::of(Unit::Day));
        assert_eq!(tick, Tick::Value(18_262));

        let (meta, tick) = TemporalInput::Str("1970-01-01T00:00:01")
            .to_datetime(None, Casting::SameKind)
            .unwrap();
        assert_eq!(meta, Resolution::of(Unit::Second));
        assert_eq!(tick, Tick::Value(1));
    }

    #[test]
    fn string_into_requested_resolution() {
        let (meta, tick) = TemporalInput::Str("2020-01-01")
            .to_datetime(Some(res(Unit::Hour, 1)), Casting::SameKind)
            .unwrap();
        assert_eq!(meta, Resolution::of(Unit::Hour));
        assert_eq!(tick, Tick::Value(18_262 * 24));
    }

    #[test]
    fn nat_string_is_generic_nat() {
        let (meta, tick) = TemporalInput::Str("NaT")
            .to_datetime(None, Casting::SameKind)
            .unwrap();
        assert!(meta.is_generic());
        assert!(tick.is_nat());
    }

    #[test]
    fn integers_need_a_unit_for_datetimes_only() {
        assert!(matches!(
            TemporalInput::Int(5).to_datetime(None, Casting::SameKind),
            Err(Error::GenericUnitMisuse(_))
        ));
        assert!(matches!(
            TemporalInput::Int(5).to_datetime(Some(Resolution::GENERIC), Casting::SameKind),
            Err(Error::GenericUnitMisuse(_))
        ));
        let (meta, tick) = TemporalInput::Int(5)
            .to_datetime(Some(res(Unit::Day, 1)), Casting::SameKind)
            .unwrap();
        assert_eq!((meta, tick), (Resolution::of(Unit::Day), Tick::Value(5)));

        // Timedeltas default to generic units instead.
        let (meta, tick) = TemporalInput::Int(5)
            .to_timedelta(None, Casting::SameKind)
            .unwrap();
        assert!(meta.is_generic());
        assert_eq!(tick, Tick::Value(5));
    }

    #[test]
    fn scalars_adopt_or_cast() {
        let scalar = Datetime64::from_raw(3, Resolution::of(Unit::Day));
        let (meta, tick) = TemporalInput::Datetime(scalar)
            .to_datetime(None, Casting::SameKind)
            .unwrap();
        assert_eq!((meta, tick), (Resolution::of(Unit::Day), Tick::Value(3)));

        let (_, tick) = TemporalInput::Datetime(scalar)
            .to_datetime(Some(res(Unit::Hour, 1)), Casting::Safe)
            .unwrap();
        assert_eq!(tick, Tick::Value(72));

        assert!(matches!(
            TemporalInput::Datetime(scalar)
                .to_datetime(Some(res(Unit::Year, 1)), Casting::Safe),
            Err(Error::CastingForbidden { .. })
        ));

        // NaT bypasses the rule check entirely.
        let nat = Datetime64::new(Tick::NaT, Resolution::of(Unit::Day));
        let (_, tick) = TemporalInput::Datetime(nat)
            .to_datetime(Some(res(Unit::Year, 1)), Casting::No)
            .unwrap();
        assert!(tick.is_nat());
    }

    #[test]
    fn chrono_dates_are_day_resolution() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let (meta, tick) = TemporalInput::Date(date)
            .to_datetime(None, Casting::SameKind)
            .unwrap();
        assert_eq!(meta, Resolution::of(Unit::Day));
        assert_eq!(tick, Tick::Value(10_957));

        // A date casts safely to seconds but not the reverse direction.
        let (_, tick) = TemporalInput::Date(date)
            .to_datetime(Some(res(Unit::Second, 1)), Casting::Safe)
            .unwrap();
        assert_eq!(tick, Tick::Value(10_957 * 86_400));
    }

    #[test]
    fn chrono_datetimes_are_microsecond_resolution() {
        let naive = NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_micro_opt(0, 0, 1, 500_000)
            .unwrap();
        let (meta, tick) = TemporalInput::DateTime(naive)
            .to_datetime(None, Casting::SameKind)
            .unwrap();
        assert_eq!(meta, Resolution::of(Unit::Microsecond));
        assert_eq!(tick, Tick::Value(1_500_000));

        // Casting to seconds would drop the fraction under safe casting.
        assert!(matches!(
            TemporalInput::DateTime(naive)
                .to_datetime(Some(res(Unit::Second, 1)), Casting::Safe),
            Err(Error::CastingForbidden { .. })
        ));
    }

    #[test]
    fn tz_aware_normalises_to_utc() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let aware = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 30, 0)
            .unwrap()
            .and_local_timezone(offset)
            .unwrap();
        let (meta, tick) = TemporalInput::DateTimeTz(aware)
            .to_datetime(Some(Resolution::of(Unit::Minute)), Casting::Unsafe)
            .unwrap();
        assert_eq!(meta, Resolution::of(Unit::Minute));
        // 2019-12-31T23:30 UTC.
        let moment = crate::codec::tick_to_moment(meta, tick).unwrap();
        assert_eq!((moment.year, moment.month, moment.day), (2019, 12, 31));
        assert_eq!((moment.hour, moment.minute), (23, 30));
    }

    #[test]
    fn chrono_durations_and_the_implied_unit() {
        let (meta, tick) = TemporalInput::Duration(Duration::milliseconds(1_500))
            .to_timedelta(None, Casting::SameKind)
            .unwrap();
        assert_eq!(meta, Resolution::of(Unit::Microsecond));
        assert_eq!(tick, Tick::Value(1_500_000));

        // A whole number of hours casts safely to hours.
        let (_, tick) = TemporalInput::Duration(Duration::hours(5))
            .to_timedelta(Some(Resolution::of(Unit::Hour)), Casting::Safe)
            .unwrap();
        assert_eq!(tick, Tick::Value(5));

        // Half an hour does not.
        assert!(matches!(
            TemporalInput::Duration(Duration::minutes(90))
                .to_timedelta(Some(Resolution::of(Unit::Hour)), Casting::Safe),
            Err(Error::CastingForbidden { .. })
        ));
        let (_, tick) = TemporalInput::Duration(Duration::minutes(90))
            .to_timedelta(Some(Resolution::of(Unit::Hour)), Casting::SameKind)
            .unwrap();
        assert_eq!(tick, Tick::Value(1));
    }

    #[test]
    fn timedelta_strings() {
        let (meta, tick) = TemporalInput::Str("-42")
            .to_timedelta(None, Casting::SameKind)
            .unwrap();
        assert!(meta.is_generic());
        assert_eq!(tick, Tick::Value(-42));

        let (_, tick) = TemporalInput::Str("nat")
            .to_timedelta(None, Casting::SameKind)
            .unwrap();
        assert!(tick.is_nat());

        assert!(TemporalInput::Str("tomorrow")
            .to_timedelta(None, Casting::SameKind)
            .is_err());
    }

    #[test]
    fn unsafe_degrades_to_nat_same_kind_only_for_sentinels() {
        let (meta, tick) = TemporalInput::Nat
            .to_datetime(None, Casting::SameKind)
            .unwrap();
        assert!(meta.is_generic());
        assert!(tick.is_nat());

        let duration = TemporalInput::Duration(Duration::seconds(1));
        assert!(matches!(
            duration.to_datetime(None, Casting::SameKind),
            Err(Error::ConversionFailure(_))
        ));
        let (_, tick) = duration.to_datetime(None, Casting::Unsafe).unwrap();
        assert!(tick.is_nat());
    }

    #[test]
    fn moment_inputs_validate() {
        let bad = Moment {
            month: 13,
            ..Moment::default()
        };
        assert!(matches!(
            TemporalInput::Moment(bad).to_datetime(None, Casting::SameKind),
            Err(Error::InvalidDate { .. })
        ));

        // A moment carries time-of-day fields, so like a chrono timestamp
        // it lands on microseconds; a day target must be asked for.
        let date_only = Moment::from_date(1970, 1, 2).unwrap();
        let (meta, tick) = TemporalInput::Moment(date_only)
            .to_datetime(None, Casting::SameKind)
            .unwrap();
        assert_eq!(meta, Resolution::of(Unit::Microsecond));
        assert_eq!(tick, Tick::Value(86_400_000_000));

        let (meta, tick) = TemporalInput::Moment(date_only)
            .to_datetime(Some(Resolution::of(Unit::Day)), Casting::SameKind)
            .unwrap();
        assert_eq!(meta, Resolution::of(Unit::Day));
        assert_eq!(tick, Tick::Value(1));
    }

    #[test]
    fn moment_midnight_keeps_microsecond_resolution() {
        // Exact midnight is indistinguishable from a date in field values,
        // but not in precision.
        let midnight = Moment::from_datetime(2020, 1, 1, 0, 0, 0, 0).unwrap();
        let (meta, tick) = TemporalInput::Moment(midnight)
            .to_datetime(None, Casting::SameKind)
            .unwrap();
        assert_eq!(meta, Resolution::of(Unit::Microsecond));
        assert_eq!(tick, Tick::Value(18_262 * 86_400_000_000));

        // Sub-microsecond fields promote the unit so they are not
        // truncated away.
        let fine = Moment {
            picosecond: 500_000,
            ..Moment::default()
        };
        let (meta, tick) = TemporalInput::Moment(fine)
            .to_datetime(None, Casting::SameKind)
            .unwrap();
        assert_eq!(meta, Resolution::of(Unit::Picosecond));
        assert_eq!(tick, Tick::Value(500_000));

        let finest = Moment {
            attosecond: 25,
            ..Moment::default()
        };
        let (meta, tick) = TemporalInput::Moment(finest)
            .to_datetime(None, Casting::SameKind)
            .unwrap();
        assert_eq!(meta, Resolution::of(Unit::Attosecond));
        assert_eq!(tick, Tick::Value(25));
    }

    #[test]
    fn common_resolution_folds_gcd() {
        let a = TemporalInput::Str("2020-01-01");
        let b = TemporalInput::Str("2020-01-05T06");
        let step = TemporalInput::Int(1);
        let (meta, ticks) = resolve_common(
            &[
                (&a, TemporalKind::Datetime),
                (&b, TemporalKind::Datetime),
                (&step, TemporalKind::Timedelta),
            ],
            Casting::SameKind,
            None,
        )
        .unwrap();
        assert_eq!(meta, Resolution::of(Unit::Hour));
        assert_eq!(
            ticks,
            vec![
                Tick::Value(18_262 * 24),
                Tick::Value(18_266 * 24 + 6),
                Tick::Value(1)
            ]
        );
    }

    #[test]
    fn scalar_from_str() {
        let dt: Datetime64 = "2000-01-01".parse().unwrap();
        assert_eq!(dt.resolution(), Resolution::of(Unit::Day));
        assert_eq!(dt.tick(), Tick::Value(10_957));

        let td: Timedelta64 = "17".parse().unwrap();
        assert!(td.resolution().is_generic());
        assert_eq!(td.tick(), Tick::Value(17));

        let nat: Datetime64 = "NaT".parse().unwrap();
        assert!(nat.is_nat());
    }
}
