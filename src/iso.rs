// SPDX-License-Identifier: AGPL-3.0-or-later

//! ISO-8601 string codec.
//!
//! The coercion layer consumes exactly two functions from this module:
//! [`parse_iso_8601`], which turns text into a broken-down [`Moment`] plus
//! the finest unit the text actually spelled out, and [`format_iso_8601`],
//! the inverse used for display.
//!
//! Offsets (`Z` or `±hh[:mm]`) are normalised away at ingestion: the signed
//! minute count is subtracted from the local fields and discarded.  Numeric
//! offsets additionally emit a one-shot deprecation notice, since the crate
//! has no representation of time zones.

use crate::algebra::{can_cast_datetime_units, Casting};
use crate::calendar::days_in_month;
use crate::error::{Error, Result};
use crate::moment::Moment;
use crate::unit::Unit;
use log::warn;
use std::sync::Once;

fn parse_failure(text: &str) -> Error {
    Error::ConversionFailure(format!("could not parse \"{text}\" as a datetime string"))
}

fn warn_timezone_once() {
    static NOTICE: Once = Once::new();
    NOTICE.call_once(|| {
        warn!("parsing timezone offsets is deprecated; values are normalised to UTC and the offset is discarded");
    });
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(s: &'a str) -> Cursor<'a> {
        Cursor {
            bytes: s.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Reads exactly two digits.
    fn two_digits(&mut self) -> Option<i32> {
        let a = self.peek()?;
        if !a.is_ascii_digit() {
            return None;
        }
        self.pos += 1;
        let b = match self.peek() {
            Some(b) if b.is_ascii_digit() => b,
            _ => {
                self.pos -= 1;
                return None;
            }
        };
        self.pos += 1;
        Some(((a - b'0') as i32) * 10 + (b - b'0') as i32)
    }

    fn digits(&mut self) -> &'a [u8] {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        &self.bytes[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn at_end(&self) -> bool {
        self.pos == self.bytes.len()
    }
}

/// Parses an ISO-8601 datetime string into a broken-down moment and the
/// finest unit the text spelled out.
///
/// `hint` is the unit the caller intends to store the value at; when given,
/// the precision of the text must be castable to it under `casting`.
/// The literal `NaT` (any case) yields the NaT moment at generic unit.
pub fn parse_iso_8601(
    text: &str,
    hint: Option<Unit>,
    casting: Casting,
) -> Result<(Moment, Unit)> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("nat") {
        return Ok((Moment::NAT, Unit::Generic));
    }
    if !trimmed.is_ascii() {
        return Err(parse_failure(text));
    }

    let mut cursor = Cursor::new(trimmed);
    let mut out = Moment::default();

    // Year, with an optional sign.
    let negative = if cursor.eat(b'-') {
        true
    } else {
        cursor.eat(b'+');
        false
    };
    let year_digits = cursor.digits();
    if year_digits.is_empty() {
        return Err(parse_failure(text));
    }
    let mut year: i64 = 0;
    for &d in year_digits {
        year = year
            .checked_mul(10)
            .and_then(|y| y.checked_add((d - b'0') as i64))
            .ok_or_else(|| parse_failure(text))?;
    }
    out.year = if negative { -year } else { year };
    let mut bestunit = Unit::Year;

    // Month and day.
    if cursor.eat(b'-') {
        out.month = cursor.two_digits().ok_or_else(|| parse_failure(text))?;
        bestunit = Unit::Month;
        if out.month < 1 || out.month > 12 {
            return Err(Error::InvalidDate {
                year: out.year,
                month: out.month,
                day: out.day,
            });
        }

        if cursor.eat(b'-') {
            out.day = cursor.two_digits().ok_or_else(|| parse_failure(text))?;
            bestunit = Unit::Day;
            if out.day < 1 || out.day > days_in_month(out.year, out.month) {
                return Err(Error::InvalidDate {
                    year: out.year,
                    month: out.month,
                    day: out.day,
                });
            }

            // Time of day, introduced by 'T' or a single space.
            if cursor.eat(b'T') || cursor.eat(b' ') {
                bestunit = parse_time(&mut cursor, &mut out, text)?;

                // Timezone designator.
                if cursor.eat(b'Z') || cursor.eat(b'z') {
                    // Already UTC.
                } else if let Some(sign @ (b'+' | b'-')) = cursor.peek() {
                    cursor.bump();
                    let hours = cursor.two_digits().ok_or_else(|| parse_failure(text))?;
                    let minutes = if cursor.eat(b':') {
                        cursor.two_digits().ok_or_else(|| parse_failure(text))?
                    } else {
                        cursor.two_digits().unwrap_or(0)
                    };
                    if hours > 23 || minutes > 59 {
                        return Err(parse_failure(text));
                    }
                    let mut offset = (hours * 60 + minutes) as i64;
                    if sign == b'-' {
                        offset = -offset;
                    }
                    warn_timezone_once();
                    out.add_minutes(-offset);
                }
            }
        }
    }

    cursor.skip_whitespace();
    if !cursor.at_end() {
        return Err(parse_failure(text));
    }

    if let Some(target) = hint {
        if !can_cast_datetime_units(bestunit, target, casting) {
            return Err(Error::CastingForbidden {
                src: bestunit.symbol().to_string(),
                dst: target.symbol().to_string(),
                casting,
            });
        }
    }

    Ok((out, bestunit))
}

/// Parses `HH[:MM[:SS[.fraction]]]` and returns the precision as a unit.
fn parse_time(cursor: &mut Cursor<'_>, out: &mut Moment, text: &str) -> Result<Unit> {
    out.hour = cursor.two_digits().ok_or_else(|| parse_failure(text))?;
    let mut bestunit = Unit::Hour;
    if out.hour > 23 {
        return Err(invalid_time(out));
    }

    if cursor.eat(b':') {
        out.minute = cursor.two_digits().ok_or_else(|| parse_failure(text))?;
        bestunit = Unit::Minute;
        if out.minute > 59 {
            return Err(invalid_time(out));
        }

        if cursor.eat(b':') {
            out.second = cursor.two_digits().ok_or_else(|| parse_failure(text))?;
            bestunit = Unit::Second;
            if out.second > 59 {
                return Err(invalid_time(out));
            }

            if cursor.eat(b'.') {
                let digits = cursor.digits();
                if digits.is_empty() || digits.len() > 18 {
                    return Err(parse_failure(text));
                }
                // Widen the fraction to attoseconds and split it into the
                // three six-digit fields.
                let mut fraction: u64 = 0;
                for &d in digits {
                    fraction = fraction * 10 + (d - b'0') as u64;
                }
                for _ in digits.len()..18 {
                    fraction *= 10;
                }
                out.microsecond = (fraction / 1_000_000_000_000) as i32;
                out.picosecond = ((fraction / 1_000_000) % 1_000_000) as i32;
                out.attosecond = (fraction % 1_000_000) as i32;
                bestunit = match digits.len() {
                    1..=3 => Unit::Millisecond,
                    4..=6 => Unit::Microsecond,
                    7..=9 => Unit::Nanosecond,
                    10..=12 => Unit::Picosecond,
                    13..=15 => Unit::Femtosecond,
                    _ => Unit::Attosecond,
                };
            }
        }
    }

    Ok(bestunit)
}

fn invalid_time(out: &Moment) -> Error {
    Error::InvalidTime {
        hour: out.hour,
        minute: out.minute,
        second: out.second,
        microsecond: out.microsecond,
    }
}

/// Formats a moment at the precision of the given unit.
///
/// The inverse of [`parse_iso_8601`] on the fields the unit can express;
/// NaT renders as `NaT`.
pub fn format_iso_8601(moment: &Moment, unit: Unit) -> String {
    if moment.is_nat() {
        return "NaT".to_string();
    }

    let mut s = if moment.year < 0 {
        format!("-{:04}", -moment.year)
    } else {
        format!("{:04}", moment.year)
    };
    if unit == Unit::Year {
        return s;
    }

    s.push_str(&format!("-{:02}", moment.month));
    if unit == Unit::Month {
        return s;
    }

    s.push_str(&format!("-{:02}", moment.day));
    if matches!(unit, Unit::Week | Unit::Day) {
        return s;
    }

    s.push_str(&format!("T{:02}", moment.hour));
    if unit == Unit::Hour {
        return s;
    }

    s.push_str(&format!(":{:02}", moment.minute));
    if unit == Unit::Minute {
        return s;
    }

    s.push_str(&format!(":{:02}", moment.second));
    if matches!(unit, Unit::Second | Unit::Generic) {
        return s;
    }

    let fraction = format!(
        "{:06}{:06}{:06}",
        moment.microsecond, moment.picosecond, moment.attosecond
    );
    let width = match unit {
        Unit::Millisecond => 3,
        Unit::Microsecond => 6,
        Unit::Nanosecond => 9,
        Unit::Picosecond => 12,
        Unit::Femtosecond => 15,
        _ => 18,
    };
    s.push('.');
    s.push_str(&fraction[..width]);
    s
}
