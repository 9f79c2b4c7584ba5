// SPDX-License-Identifier: AGPL-3.0-or-later

//! Resolution algebra: conversion factors, divisibility, greatest common
//! divisors, and casting rules.
//!
//! The linear chain (`Week` and finer) converts by exact integer factors.
//! `Year` and `Month` form a nonlinear island: between themselves the factor
//! is the exact `12`, but against the linear chain only the
//! average-Gregorian ratio `(97 + 400·365) / 400` days per year exists.
//! Instants are allowed to cross that boundary with the average ratio;
//! durations are not, which is what the `strict_with_nonlinear_units`
//! parameters and the timedelta casting rules enforce.

use crate::error::{Error, Result};
use crate::resolution::Resolution;
use crate::unit::Unit;
use std::fmt;

/// Days per 400-year Gregorian cycle, the numerator of every
/// average-Gregorian conversion.
const AVG_DAYS_PER_400_YEARS: u64 = 97 + 400 * 365;

/// Casting strictness, from most to least restrictive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Casting {
    /// No casting at all: descriptors must match exactly.
    No,
    /// Byte-equivalent only: same as [`Casting::No`] for resolutions.
    Equiv,
    /// Only towards finer units, without losing representability.
    Safe,
    /// Any conversion within the same kind of unit.
    SameKind,
    /// Anything goes; failures degrade to NaT.
    Unsafe,
}

impl fmt::Display for Casting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Casting::No => "no",
            Casting::Equiv => "equiv",
            Casting::Safe => "safe",
            Casting::SameKind => "same_kind",
            Casting::Unsafe => "unsafe",
        })
    }
}

/// Scale factor between two linear units, `big` being the coarser one.
///
/// Returns `None` on multiplicative overflow.  `Year` and `Month` inputs
/// contribute a factor of 1; callers special-case them first.
pub(crate) fn units_factor(big: Unit, little: Unit) -> Option<u64> {
    let mut factor: u64 = 1;
    let mut unit = big;
    while unit < little {
        factor = factor.checked_mul(unit.step_factor())?;
        unit = unit.next_finer()?;
    }
    Some(factor)
}

/// Euclidean GCD on unsigned values.
fn gcd_u64(mut x: u64, mut y: u64) -> u64 {
    while y != 0 {
        let tmp = x % y;
        x = y;
        y = tmp;
    }
    x
}

fn factor_overflow(src: &Resolution, dst: &Resolution) -> Error {
    Error::Overflow(format!(
        "while computing the conversion factor between {} and {}",
        src.bare(),
        dst.bare()
    ))
}

/// Exact reduced fraction `(num, den)` such that a tick at `src` becomes
/// `tick · num / den` at `dst`.
///
/// Generic sources absorb any destination (`(1, 1)`); converting a specific
/// unit *to* generic is an error.  Conversions crossing the year/month
/// boundary use the average-Gregorian ratio; such conversions apply to
/// instants, never to durations under strict casting, and the callers
/// enforce that distinction.
pub fn conversion_factor(src: Resolution, dst: Resolution) -> Result<(i64, i64)> {
    if src.base().is_generic() {
        return Ok((1, 1));
    }
    if dst.base().is_generic() {
        return Err(Error::GenericUnitMisuse(
            "cannot convert from specific units to generic units",
        ));
    }

    let (src_base, dst_base, swapped) = if src.base() <= dst.base() {
        (src.base(), dst.base(), false)
    } else {
        (dst.base(), src.base(), true)
    };

    let mut num: u64 = 1;
    let mut den: u64 = 1;

    if src_base != dst_base {
        if src_base == Unit::Year {
            if dst_base == Unit::Month {
                num = 12;
            } else if dst_base == Unit::Week {
                num = AVG_DAYS_PER_400_YEARS;
                den = 400 * 7;
            } else {
                num = AVG_DAYS_PER_400_YEARS;
                den = 400;
                let tail = units_factor(Unit::Day, dst_base)
                    .ok_or_else(|| factor_overflow(&src, &dst))?;
                num = num
                    .checked_mul(tail)
                    .ok_or_else(|| factor_overflow(&src, &dst))?;
            }
        } else if src_base == Unit::Month {
            if dst_base == Unit::Week {
                num = AVG_DAYS_PER_400_YEARS;
                den = 400 * 12 * 7;
            } else {
                num = AVG_DAYS_PER_400_YEARS;
                den = 400 * 12;
                let tail = units_factor(Unit::Day, dst_base)
                    .ok_or_else(|| factor_overflow(&src, &dst))?;
                num = num
                    .checked_mul(tail)
                    .ok_or_else(|| factor_overflow(&src, &dst))?;
            }
        } else {
            num = units_factor(src_base, dst_base).ok_or_else(|| factor_overflow(&src, &dst))?;
        }
    }

    if swapped {
        std::mem::swap(&mut num, &mut den);
    }

    num = num
        .checked_mul(src.num() as u64)
        .ok_or_else(|| factor_overflow(&src, &dst))?;
    den = den
        .checked_mul(dst.num() as u64)
        .ok_or_else(|| factor_overflow(&src, &dst))?;

    let g = gcd_u64(num, den);
    let num = num / g;
    let den = den / g;
    if num > i64::MAX as u64 || den > i64::MAX as u64 {
        return Err(factor_overflow(&src, &dst));
    }
    Ok((num as i64, den as i64))
}

/// Whether ticks at `divisor` resolution divide evenly into ticks at
/// `dividend` resolution.
///
/// With `strict_with_nonlinear_units` set (the duration rule), mixing
/// `Year`/`Month` with any other unit fails; without it (the instant rule)
/// such mixes are optimistically reported as divisible.  Overflow while
/// aligning the multipliers reports "does not divide".
pub fn divides(dividend: Resolution, divisor: Resolution, strict_with_nonlinear_units: bool) -> bool {
    // Any unit divides into generic; generic does not divide into a
    // specific unit.
    if dividend.base().is_generic() {
        return true;
    }
    if divisor.base().is_generic() {
        return false;
    }

    let mut num1 = dividend.num() as u64;
    let mut num2 = divisor.num() as u64;

    if dividend.base() != divisor.base() {
        if dividend.base() == Unit::Year {
            if divisor.base() == Unit::Month {
                num1 *= 12;
            } else if strict_with_nonlinear_units {
                return false;
            } else {
                return true;
            }
        } else if divisor.base() == Unit::Year {
            if dividend.base() == Unit::Month {
                num2 *= 12;
            } else if strict_with_nonlinear_units {
                return false;
            } else {
                return true;
            }
        } else if dividend.base() == Unit::Month || divisor.base() == Unit::Month {
            if strict_with_nonlinear_units {
                return false;
            } else {
                return true;
            }
        }

        // Align on the finer of the two bases.
        if dividend.base() > divisor.base() {
            match units_factor(divisor.base(), dividend.base())
                .and_then(|f| num2.checked_mul(f))
            {
                Some(aligned) => num2 = aligned,
                None => return false,
            }
        } else {
            match units_factor(dividend.base(), divisor.base())
                .and_then(|f| num1.checked_mul(f))
            {
                Some(aligned) => num1 = aligned,
                None => return false,
            }
        }
    }

    num1 % num2 == 0
}

/// Greatest common divisor of two resolutions: the finest base of the two,
/// with the coarser operand's multiplier aligned through the conversion
/// factor, reduced by Euclidean GCD.
///
/// The strictness flags follow the operands: a duration operand forbids its
/// `Year`/`Month` base from crossing into the linear chain.  When crossing
/// is permitted the coarser multiplier is aligned by walking the factor
/// chain from its base, exactly like the linear case (the year and month
/// steps contribute a factor of 1).
pub fn gcd(
    left: Resolution,
    right: Resolution,
    strict_left: bool,
    strict_right: bool,
) -> Result<Resolution> {
    // Generic adopts the other operand wholesale.
    if left.is_generic() {
        return Ok(right);
    }
    if right.is_generic() {
        return Ok(left);
    }

    let mut num1 = left.num() as u64;
    let mut num2 = right.num() as u64;
    let base;

    if left.base() == right.base() {
        base = left.base();
    } else {
        // Year and Month only pair exactly with each other; against the
        // linear chain a duration operand refuses outright.
        if left.base() == Unit::Year && right.base() == Unit::Month {
            num1 *= 12;
        } else if left.base() == Unit::Month && right.base() == Unit::Year {
            num2 *= 12;
        } else if left.base().is_nonlinear() || right.base().is_nonlinear() {
            let strict = if left.base().is_nonlinear() {
                strict_left
            } else {
                strict_right
            };
            if strict {
                return Err(Error::IncompatibleUnits {
                    left: left.bare(),
                    right: right.bare(),
                });
            }
        }

        // Align on the finer of the two bases.
        if left.base() > right.base() {
            base = left.base();
            num2 = units_factor(right.base(), left.base())
                .and_then(|f| num2.checked_mul(f))
                .ok_or_else(|| gcd_overflow(&left, &right))?;
        } else {
            base = right.base();
            num1 = units_factor(left.base(), right.base())
                .and_then(|f| num1.checked_mul(f))
                .ok_or_else(|| gcd_overflow(&left, &right))?;
        }
    }

    let num = gcd_u64(num1, num2);
    if num == 0 || num > i32::MAX as u64 {
        return Err(gcd_overflow(&left, &right));
    }
    Resolution::new(base, num as i32)
}

fn gcd_overflow(left: &Resolution, right: &Resolution) -> Error {
    Error::Overflow(format!(
        "getting a common resolution for {} and {}",
        left.bare(),
        right.bare()
    ))
}

/// Casting rules between instant base units.
pub fn can_cast_datetime_units(src: Unit, dst: Unit, casting: Casting) -> bool {
    match casting {
        Casting::Unsafe => true,
        Casting::SameKind => {
            if src.is_generic() || dst.is_generic() {
                src.is_generic()
            } else {
                true
            }
        }
        Casting::Safe => {
            if src.is_generic() || dst.is_generic() {
                src.is_generic()
            } else {
                src <= dst
            }
        }
        // No and Equiv demand exact equality.
        _ => src == dst,
    }
}

/// Casting rules between duration base units.
///
/// Unlike instants, durations carry a barrier between the nonlinear
/// `Year`/`Month` island and every other unit.
pub fn can_cast_timedelta_units(src: Unit, dst: Unit, casting: Casting) -> bool {
    let same_side = |a: Unit, b: Unit| a.is_nonlinear() == b.is_nonlinear();
    match casting {
        Casting::Unsafe => true,
        Casting::SameKind => {
            if src.is_generic() || dst.is_generic() {
                src.is_generic()
            } else {
                same_side(src, dst)
            }
        }
        Casting::Safe => {
            if src.is_generic() || dst.is_generic() {
                src.is_generic()
            } else {
                src <= dst && same_side(src, dst)
            }
        }
        _ => src == dst,
    }
}

/// Full-descriptor casting rule for instants.
pub fn can_cast_datetime(src: Resolution, dst: Resolution, casting: Casting) -> bool {
    match casting {
        Casting::Unsafe => true,
        Casting::SameKind => can_cast_datetime_units(src.base(), dst.base(), casting),
        Casting::Safe => {
            can_cast_datetime_units(src.base(), dst.base(), casting) && divides(src, dst, false)
        }
        _ => src.base() == dst.base() && src.num() == dst.num(),
    }
}

/// Full-descriptor casting rule for durations.
pub fn can_cast_timedelta(src: Resolution, dst: Resolution, casting: Casting) -> bool {
    match casting {
        Casting::Unsafe => true,
        Casting::SameKind => can_cast_timedelta_units(src.base(), dst.base(), casting),
        Casting::Safe => {
            can_cast_timedelta_units(src.base(), dst.base(), casting) && divides(src, dst, true)
        }
        _ => src.base() == dst.base() && src.num() == dst.num(),
    }
}
