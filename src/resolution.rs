// SPDX-License-Identifier: AGPL-3.0-or-later

//! Unit resolution descriptors and their textual grammar.
//!
//! A [`Resolution`] pairs a base [`Unit`] with an integer multiplier:
//! `(Day, 7)` means "ticks of seven days".  The textual grammar is
//!
//! ```text
//! descriptor  := '' | '[' extended ']'
//! extended    := [integer] base ['/' integer]
//! base        := 'Y' | 'M' | 'W' | 'D' | 'h' | 'm' | 's'
//!              | 'ms' | 'us' | 'ns' | 'ps' | 'fs' | 'as' | 'generic'
//! ```
//!
//! with no whitespace anywhere.  A trailing `/den` divisor is rewritten into
//! a multiple of a finer unit (`[1W/7]` becomes `(Day, 1)`); type strings
//! (`M8`, `m8`, `datetime64`, `timedelta64` followed by a bracketed
//! descriptor) select between the two scalar kinds.

use crate::error::{Error, Result};
use crate::unit::Unit;
use log::warn;
use std::fmt;
use std::str::FromStr;
use std::sync::Once;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which of the two scalar kinds a type string denotes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemporalKind {
    /// An absolute instant (`datetime64` / `M8`).
    Datetime,
    /// A signed duration (`timedelta64` / `m8`).
    Timedelta,
}

/// A base unit together with its integer multiplier.
///
/// Invariants: `num >= 1`, and `num == 1` whenever the base is
/// [`Unit::Generic`].  Both are enforced by every constructor, so a
/// `Resolution` in hand is always well-formed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Resolution {
    base: Unit,
    num: i32,
}

impl Resolution {
    /// The generic (unit-not-yet-chosen) resolution.
    pub const GENERIC: Resolution = Resolution {
        base: Unit::Generic,
        num: 1,
    };

    /// Single-multiple resolution of the given base.
    #[inline]
    pub const fn of(base: Unit) -> Resolution {
        Resolution { base, num: 1 }
    }

    /// Builds a resolution, enforcing the multiplier invariants.
    pub fn new(base: Unit, num: i32) -> Result<Resolution> {
        if num < 1 {
            return Err(Error::InvalidDescriptor(format!("{num}{base}")));
        }
        if base.is_generic() && num != 1 {
            return Err(Error::InvalidDescriptor(format!("{num}generic")));
        }
        Ok(Resolution { base, num })
    }

    /// The base unit.
    #[inline]
    pub const fn base(&self) -> Unit {
        self.base
    }

    /// The multiplier (`>= 1`).
    #[inline]
    pub const fn num(&self) -> i32 {
        self.num
    }

    /// True if the base is the generic pseudo-unit.
    #[inline]
    pub const fn is_generic(&self) -> bool {
        self.base.is_generic()
    }

    /// Equivalence with the multiplier ignored on generic resolutions.
    pub fn equivalent(&self, other: &Resolution) -> bool {
        if self.base.is_generic() && other.base.is_generic() {
            return true;
        }
        self.base == other.base && self.num == other.num
    }

    /// Descriptor text without brackets: `7D`, `s`, or `generic`.
    pub fn bare(&self) -> String {
        if self.base.is_generic() {
            "generic".to_string()
        } else if self.num == 1 {
            self.base.symbol().to_string()
        } else {
            format!("{}{}", self.num, self.base.symbol())
        }
    }

    /// Builds a resolution from already-split descriptor parts, as carried
    /// by the legacy tuple forms.
    ///
    /// `den`, when not 1, is rewritten into a multiple of a finer unit.
    /// A present `event` value is ignored with a one-shot notice; the slot
    /// has carried no meaning for a long time.
    pub fn from_symbol_parts(
        symbol: &str,
        num: i32,
        den: Option<i32>,
        event: Option<i64>,
    ) -> Result<Resolution> {
        if event.is_some() {
            warn_legacy_event_once();
        }
        let base = Unit::parse_symbol(symbol)?;
        let den = den.unwrap_or(1);
        if num < 1 || den < 1 {
            return Err(Error::InvalidDescriptor(format!("({symbol}, {num}, {den})")));
        }
        let mut resolution = Resolution::new(base, num)?;
        if den != 1 {
            resolution = resolution.apply_divisor(den)?;
        }
        Ok(resolution)
    }

    /// Rewrites a `num base / den` descriptor as a plain multiple of a
    /// finer unit, stepping down the factor chain until the divisor divides
    /// the accumulated factor.
    fn apply_divisor(self, den: i32) -> Result<Resolution> {
        if self.base.is_generic() {
            return Err(Error::GenericUnitMisuse(
                "cannot use a divisor with generic units",
            ));
        }
        for &(multiple, finer) in divisor_candidates(self.base) {
            if multiple % den as i64 == 0 {
                let q = (multiple / den as i64) as i32;
                let num = self
                    .num
                    .checked_mul(q)
                    .ok_or_else(|| Error::Overflow("applying a descriptor divisor".into()))?;
                return Resolution::new(finer, num);
            }
        }
        Err(Error::IndivisibleDivisor(den))
    }
}

/// Multiples of finer units that one step of `base` can be rewritten into.
///
/// Weeks get one extra candidate (a week of seconds) via the factor 7; the
/// attosecond row is empty because nothing finer exists.
fn divisor_candidates(base: Unit) -> &'static [(i64, Unit)] {
    match base {
        Unit::Year => &[(12, Unit::Month), (52, Unit::Week), (365, Unit::Day)],
        Unit::Month => &[(4, Unit::Week), (30, Unit::Day), (720, Unit::Hour)],
        Unit::Week => &[
            (7, Unit::Day),
            (168, Unit::Hour),
            (10_080, Unit::Minute),
            (604_800, Unit::Second),
        ],
        Unit::Day => &[(24, Unit::Hour), (1_440, Unit::Minute), (86_400, Unit::Second)],
        Unit::Hour => &[(60, Unit::Minute), (3_600, Unit::Second)],
        Unit::Minute => &[(60, Unit::Second), (60_000, Unit::Millisecond)],
        Unit::Second => &[(1_000, Unit::Millisecond), (1_000_000, Unit::Microsecond)],
        Unit::Millisecond => &[(1_000, Unit::Microsecond), (1_000_000, Unit::Nanosecond)],
        Unit::Microsecond => &[(1_000, Unit::Nanosecond), (1_000_000, Unit::Picosecond)],
        Unit::Nanosecond => &[(1_000, Unit::Picosecond), (1_000_000, Unit::Femtosecond)],
        Unit::Picosecond => &[(1_000, Unit::Femtosecond), (1_000_000, Unit::Attosecond)],
        Unit::Femtosecond => &[(1_000, Unit::Attosecond)],
        Unit::Attosecond | Unit::Generic => &[],
    }
}

fn warn_legacy_event_once() {
    static NOTICE: Once = Once::new();
    NOTICE.call_once(|| {
        warn!("the event slot in a legacy resolution tuple is ignored; use (unit, num)");
    });
}

/// Parses the `extended` production (`[num] base [/den]`, no brackets).
fn parse_extended(s: &str) -> Result<Resolution> {
    let bytes = s.as_bytes();
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    let num = if digits == 0 {
        1
    } else {
        s[..digits]
            .parse::<i32>()
            .map_err(|_| Error::InvalidDescriptor(s.to_string()))?
    };

    let rest = &s[digits..];
    let (unit_str, den) = match rest.find('/') {
        Some(pos) => {
            let den_str = &rest[pos + 1..];
            if den_str.is_empty() || !den_str.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidDescriptor(s.to_string()));
            }
            let den = den_str
                .parse::<i32>()
                .map_err(|_| Error::InvalidDescriptor(s.to_string()))?;
            (&rest[..pos], Some(den))
        }
        None => (rest, None),
    };
    if unit_str.is_empty() {
        return Err(Error::InvalidDescriptor(s.to_string()));
    }

    Resolution::from_symbol_parts(unit_str, num, den, None)
}

/// Parses a full descriptor: empty (generic) or `[extended]`.
pub(crate) fn parse_descriptor(s: &str) -> Result<Resolution> {
    if s.is_empty() {
        return Ok(Resolution::GENERIC);
    }
    if !s.is_ascii() {
        return Err(Error::InvalidDescriptor(s.to_string()));
    }
    let inner = s
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| Error::InvalidDescriptor(s.to_string()))?;
    if inner.is_empty() {
        return Err(Error::InvalidDescriptor(s.to_string()));
    }
    parse_extended(inner)
}

/// Parses a scalar type string: `M8`/`m8`/`datetime64`/`timedelta64`
/// followed by an optional bracketed descriptor.
pub fn parse_type_string(s: &str) -> Result<(TemporalKind, Resolution)> {
    if s.len() < 2 || !s.is_ascii() {
        return Err(Error::InvalidDescriptor(s.to_string()));
    }
    let (kind, rest) = if let Some(rest) = s.strip_prefix("m8") {
        (TemporalKind::Timedelta, rest)
    } else if let Some(rest) = s.strip_prefix("M8") {
        (TemporalKind::Datetime, rest)
    } else if let Some(rest) = s.strip_prefix("timedelta64") {
        (TemporalKind::Timedelta, rest)
    } else if let Some(rest) = s.strip_prefix("datetime64") {
        (TemporalKind::Datetime, rest)
    } else {
        return Err(Error::InvalidDescriptor(s.to_string()));
    };
    Ok((kind, parse_descriptor(rest)?))
}

impl FromStr for Resolution {
    type Err = Error;

    /// Accepts the bracketed form, the bare extended form, and the empty
    /// string (generic).
    fn from_str(s: &str) -> Result<Resolution> {
        if s.is_empty() {
            return Ok(Resolution::GENERIC);
        }
        if !s.is_ascii() {
            return Err(Error::InvalidDescriptor(s.to_string()));
        }
        if s.starts_with('[') {
            parse_descriptor(s)
        } else {
            parse_extended(s)
        }
    }
}

impl TryFrom<(Unit, i32)> for Resolution {
    type Error = Error;

    fn try_from((base, num): (Unit, i32)) -> Result<Resolution> {
        Resolution::new(base, num)
    }
}

impl fmt::Display for Resolution {
    /// The canonical bracketed form.  Generic renders as nothing, so a type
    /// string concatenation yields `datetime64` rather than `datetime64[]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.base.is_generic() {
            return Ok(());
        }
        if self.num == 1 {
            write!(f, "[{}]", self.base.symbol())
        } else {
            write!(f, "[{}{}]", self.num, self.base.symbol())
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Resolution {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.bare())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Resolution {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
