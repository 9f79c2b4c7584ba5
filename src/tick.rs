// SPDX-License-Identifier: AGPL-3.0-or-later

//! Tick counts with an absorbing Not-a-Time member.
//!
//! A [`Tick`] is a signed 64-bit count of resolution units since the epoch,
//! or NaT.  On the wire NaT is `i64::MIN`; internally it is a dedicated
//! variant, so arithmetic can never synthesise the sentinel from a valid
//! computation — the checked operations report [`Error::Overflow`] instead.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raw `i64` value reserved for Not-a-Time at the external boundary.
pub const NAT_RAW: i64 = i64::MIN;

/// A unit count since the epoch, or Not-a-Time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Tick {
    /// Not-a-Time; absorbs every operation.
    NaT,
    /// A concrete count.  Never `i64::MIN`.
    Value(i64),
}

impl Tick {
    /// Reads a raw wire value; `i64::MIN` becomes NaT.
    #[inline]
    pub const fn from_raw(raw: i64) -> Tick {
        if raw == NAT_RAW {
            Tick::NaT
        } else {
            Tick::Value(raw)
        }
    }

    /// Serialises to the raw wire value; NaT becomes `i64::MIN`.
    #[inline]
    pub const fn to_raw(self) -> i64 {
        match self {
            Tick::NaT => NAT_RAW,
            Tick::Value(v) => v,
        }
    }

    /// True for the NaT member.
    #[inline]
    pub const fn is_nat(self) -> bool {
        matches!(self, Tick::NaT)
    }

    /// The concrete count, if any.
    #[inline]
    pub const fn value(self) -> Option<i64> {
        match self {
            Tick::NaT => None,
            Tick::Value(v) => Some(v),
        }
    }

    /// Wraps a computed count, rejecting the reserved sentinel value.
    pub(crate) fn checked(value: i64, context: &str) -> Result<Tick> {
        if value == NAT_RAW {
            Err(Error::Overflow(format!("in {context}")))
        } else {
            Ok(Tick::Value(value))
        }
    }

    /// NaT-absorbing checked addition.
    pub fn checked_add(self, rhs: Tick) -> Result<Tick> {
        match (self, rhs) {
            (Tick::Value(a), Tick::Value(b)) => {
                let sum = a
                    .checked_add(b)
                    .ok_or_else(|| Error::Overflow("in tick addition".into()))?;
                Tick::checked(sum, "tick addition")
            }
            _ => Ok(Tick::NaT),
        }
    }

    /// NaT-absorbing checked subtraction.
    pub fn checked_sub(self, rhs: Tick) -> Result<Tick> {
        match (self, rhs) {
            (Tick::Value(a), Tick::Value(b)) => {
                let diff = a
                    .checked_sub(b)
                    .ok_or_else(|| Error::Overflow("in tick subtraction".into()))?;
                Tick::checked(diff, "tick subtraction")
            }
            _ => Ok(Tick::NaT),
        }
    }

    /// NaT-absorbing checked negation.
    pub fn checked_neg(self) -> Result<Tick> {
        match self {
            Tick::Value(v) => Tick::checked(-v, "tick negation"),
            Tick::NaT => Ok(Tick::NaT),
        }
    }
}

impl PartialOrd for Tick {
    /// NaT is unordered, like a floating-point NaN.
    fn partial_cmp(&self, other: &Tick) -> Option<Ordering> {
        match (self, other) {
            (Tick::Value(a), Tick::Value(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tick::NaT => f.write_str("NaT"),
            Tick::Value(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Tick {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.to_raw())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Tick {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Ok(Tick::from_raw(raw))
    }
}
