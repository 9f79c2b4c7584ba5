// SPDX-License-Identifier: AGPL-3.0-or-later

//! Bidirectional codec between a broken-down [`Moment`] and a [`Tick`] at a
//! given [`Resolution`].
//!
//! Every base unit has an exact encoding; the multiplier truncates the tick
//! toward −∞ on encode and multiplies back on decode.  Femtoseconds and
//! attoseconds are special on decode: a whole day of them overflows an
//! `i64`, so the tick is split into an intermediate minute (respectively
//! second) offset that is carried into the moment by
//! [`Moment::add_minutes`] / [`Moment::add_seconds`].

use crate::calendar::civil_from_days;
use crate::error::{Error, Result};
use crate::moment::Moment;
use crate::resolution::Resolution;
use crate::tick::Tick;
use crate::unit::Unit;

fn encode_overflow() -> Error {
    Error::Overflow("while encoding a moment into ticks".into())
}

fn decode_overflow() -> Error {
    Error::Overflow("while applying the resolution multiplier".into())
}

#[inline]
fn mul_add(value: i64, factor: i64, add: i64) -> Result<i64> {
    value
        .checked_mul(factor)
        .and_then(|v| v.checked_add(add))
        .ok_or_else(encode_overflow)
}

/// Encodes a moment as a tick count at the given resolution.
///
/// NaT moments encode to NaT.  A concrete moment at generic resolution is
/// an error, as is a value outside the 64-bit range of the target unit.
pub fn moment_to_tick(meta: Resolution, moment: &Moment) -> Result<Tick> {
    if moment.is_nat() {
        return Ok(Tick::NaT);
    }
    if meta.base().is_generic() {
        return Err(Error::GenericUnitMisuse(
            "cannot create a non-NaT value with generic units",
        ));
    }

    let mut ticks = match meta.base() {
        // Truncate to the year or month.
        Unit::Year => moment.year - 1970,
        Unit::Month => 12 * (moment.year - 1970) + (moment.month - 1) as i64,
        base => {
            let days = moment.days_since_epoch();
            match base {
                Unit::Week => {
                    // Floor toward −∞ so partial weeks before the epoch
                    // land on the earlier week.
                    if days >= 0 {
                        days / 7
                    } else {
                        (days - 6) / 7
                    }
                }
                Unit::Day => days,
                _ => encode_within_day(base, days, moment)?,
            }
        }
    };

    // Divide by the multiplier, truncating toward −∞.
    let num = meta.num() as i64;
    if num > 1 {
        if ticks >= 0 {
            ticks /= num;
        } else {
            ticks = ticks
                .checked_sub(num - 1)
                .ok_or_else(encode_overflow)?
                / num;
        }
    }

    Tick::checked(ticks, "encoding a moment")
}

/// Sub-day encoding: scale the day count down the factor chain and add the
/// within-day fields.
fn encode_within_day(base: Unit, days: i64, moment: &Moment) -> Result<i64> {
    let hours = mul_add(days, 24, moment.hour as i64)?;
    if base == Unit::Hour {
        return Ok(hours);
    }
    let minutes = mul_add(hours, 60, moment.minute as i64)?;
    if base == Unit::Minute {
        return Ok(minutes);
    }
    let seconds = mul_add(minutes, 60, moment.second as i64)?;
    match base {
        Unit::Second => Ok(seconds),
        Unit::Millisecond => mul_add(seconds, 1_000, (moment.microsecond / 1_000) as i64),
        Unit::Microsecond => mul_add(seconds, 1_000_000, moment.microsecond as i64),
        Unit::Nanosecond => {
            let micros = mul_add(seconds, 1_000_000, moment.microsecond as i64)?;
            mul_add(micros, 1_000, (moment.picosecond / 1_000) as i64)
        }
        Unit::Picosecond => {
            let micros = mul_add(seconds, 1_000_000, moment.microsecond as i64)?;
            mul_add(micros, 1_000_000, moment.picosecond as i64)
        }
        Unit::Femtosecond => {
            let micros = mul_add(seconds, 1_000_000, moment.microsecond as i64)?;
            let picos = mul_add(micros, 1_000_000, moment.picosecond as i64)?;
            mul_add(picos, 1_000, (moment.attosecond / 1_000) as i64)
        }
        Unit::Attosecond => {
            let micros = mul_add(seconds, 1_000_000, moment.microsecond as i64)?;
            let picos = mul_add(micros, 1_000_000, moment.picosecond as i64)?;
            mul_add(picos, 1_000_000, moment.attosecond as i64)
        }
        _ => unreachable!("sub-day encoding called with {base:?}"),
    }
}

/// Splits `dt` into a whole-day count and a remainder in `[0, perday)`,
/// flooring toward −∞.
fn extract_days(dt: &mut i64, perday: i64) -> i64 {
    if *dt >= 0 {
        let days = *dt / perday;
        *dt %= perday;
        days
    } else {
        let days = (*dt - (perday - 1)) / perday;
        *dt = (perday - 1) + (*dt + 1) % perday;
        days
    }
}

/// Decodes a tick at the given resolution into a broken-down moment.
pub fn tick_to_moment(meta: Resolution, tick: Tick) -> Result<Moment> {
    let mut dt = match tick {
        Tick::NaT => return Ok(Moment::NAT),
        Tick::Value(v) => v,
    };
    if meta.base().is_generic() {
        return Err(Error::GenericUnitMisuse(
            "cannot convert a non-NaT value with generic units",
        ));
    }

    // Expand the multiplier back into base-unit ticks.
    dt = dt
        .checked_mul(meta.num() as i64)
        .ok_or_else(decode_overflow)?;

    let mut out = Moment::default();

    match meta.base() {
        Unit::Year => {
            out.year = 1970i64.checked_add(dt).ok_or_else(decode_overflow)?;
        }
        Unit::Month => {
            if dt >= 0 {
                out.year = 1970 + dt / 12;
                out.month = (dt % 12) as i32 + 1;
            } else {
                out.year = 1969 + (dt + 1) / 12;
                out.month = (12 + (dt + 1) % 12) as i32;
            }
        }
        Unit::Week => {
            let days = dt.checked_mul(7).ok_or_else(decode_overflow)?;
            set_days(&mut out, days);
        }
        Unit::Day => {
            set_days(&mut out, dt);
        }
        Unit::Hour => {
            set_days(&mut out, extract_days(&mut dt, 24));
            out.hour = dt as i32;
        }
        Unit::Minute => {
            set_days(&mut out, extract_days(&mut dt, 24 * 60));
            out.hour = (dt / 60) as i32;
            out.minute = (dt % 60) as i32;
        }
        Unit::Second => {
            set_days(&mut out, extract_days(&mut dt, 24 * 60 * 60));
            out.hour = (dt / (60 * 60)) as i32;
            out.minute = ((dt / 60) % 60) as i32;
            out.second = (dt % 60) as i32;
        }
        Unit::Millisecond => {
            set_days(&mut out, extract_days(&mut dt, 24 * 60 * 60 * 1_000));
            out.hour = (dt / (60 * 60 * 1_000)) as i32;
            out.minute = ((dt / (60 * 1_000)) % 60) as i32;
            out.second = ((dt / 1_000) % 60) as i32;
            out.microsecond = ((dt % 1_000) * 1_000) as i32;
        }
        Unit::Microsecond => {
            set_days(&mut out, extract_days(&mut dt, 24 * 60 * 60 * 1_000_000));
            out.hour = (dt / (60 * 60 * 1_000_000)) as i32;
            out.minute = ((dt / (60 * 1_000_000)) % 60) as i32;
            out.second = ((dt / 1_000_000) % 60) as i32;
            out.microsecond = (dt % 1_000_000) as i32;
        }
        Unit::Nanosecond => {
            set_days(&mut out, extract_days(&mut dt, 24 * 60 * 60 * 1_000_000_000));
            out.hour = (dt / (60 * 60 * 1_000_000_000)) as i32;
            out.minute = ((dt / (60 * 1_000_000_000)) % 60) as i32;
            out.second = ((dt / 1_000_000_000) % 60) as i32;
            out.microsecond = ((dt / 1_000) % 1_000_000) as i32;
            out.picosecond = ((dt % 1_000) * 1_000) as i32;
        }
        Unit::Picosecond => {
            set_days(
                &mut out,
                extract_days(&mut dt, 24 * 60 * 60 * 1_000_000_000_000),
            );
            out.hour = (dt / (60 * 60 * 1_000_000_000_000)) as i32;
            out.minute = ((dt / (60 * 1_000_000_000_000)) % 60) as i32;
            out.second = ((dt / 1_000_000_000_000) % 60) as i32;
            out.microsecond = ((dt / 1_000_000) % 1_000_000) as i32;
            out.picosecond = (dt % 1_000_000) as i32;
        }
        Unit::Femtosecond => {
            // A whole day of femtoseconds overflows an i64, so route the
            // tick through a minute offset; the representable span is only
            // about ±2.6 hours either side of the epoch.
            const PER_MINUTE: i64 = 60 * 1_000_000_000_000_000;
            if dt >= 0 {
                out.hour = (dt / (60 * PER_MINUTE)) as i32;
                out.minute = ((dt / PER_MINUTE) % 60) as i32;
            } else {
                let mut minutes = dt / PER_MINUTE;
                dt %= PER_MINUTE;
                if dt < 0 {
                    dt += PER_MINUTE;
                    minutes -= 1;
                }
                out.add_minutes(minutes);
            }
            out.second = ((dt / 1_000_000_000_000_000) % 60) as i32;
            out.microsecond = ((dt / 1_000_000_000) % 1_000_000) as i32;
            out.picosecond = ((dt / 1_000) % 1_000_000) as i32;
            out.attosecond = ((dt % 1_000) * 1_000) as i32;
        }
        Unit::Attosecond => {
            // Same trick one level down: ±9.2 seconds of range, carried by
            // a second offset.
            const PER_SECOND: i64 = 1_000_000_000_000_000_000;
            if dt >= 0 {
                out.second = ((dt / PER_SECOND) % 60) as i32;
            } else {
                let mut seconds = dt / PER_SECOND;
                dt %= PER_SECOND;
                if dt < 0 {
                    dt += PER_SECOND;
                    seconds -= 1;
                }
                out.add_seconds(seconds);
            }
            out.microsecond = ((dt / 1_000_000_000_000) % 1_000_000) as i32;
            out.picosecond = ((dt / 1_000_000) % 1_000_000) as i32;
            out.attosecond = (dt % 1_000_000) as i32;
        }
        Unit::Generic => unreachable!("generic handled above"),
    }

    Ok(out)
}

fn set_days(out: &mut Moment, days: i64) {
    let (year, month, day) = civil_from_days(days);
    out.year = year;
    out.month = month;
    out.day = day;
}
