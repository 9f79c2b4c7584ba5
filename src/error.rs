// SPDX-License-Identifier: AGPL-3.0-or-later

//! Crate-wide error type.
//!
//! Every fallible operation in the crate returns [`Result`].  The variants
//! map one-to-one onto the distinct failure classes of the library: unit
//! grammar, descriptor construction, casting rules, calendar validation,
//! integer overflow, and ingestion.

use crate::algebra::Casting;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for temporal values and their unit algebra.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A textual unit symbol is not part of the unit grammar.
    #[error("invalid temporal unit \"{0}\"")]
    InvalidUnit(String),

    /// A resolution descriptor literal or tuple form is malformed.
    #[error("invalid resolution descriptor \"{0}\"")]
    InvalidDescriptor(String),

    /// A `/den` divisor cannot be rewritten as a multiple of a finer unit.
    #[error("divisor {0} is not a multiple of a lower unit")]
    IndivisibleDivisor(i32),

    /// A concrete (non-NaT) value was demanded at generic resolution, or a
    /// conversion from a specific unit to generic was requested.
    #[error("{0}")]
    GenericUnitMisuse(&'static str),

    /// The castability rules reject this conversion under the given mode.
    #[error("cannot cast from {src} to {dst} under rule \"{casting}\"")]
    CastingForbidden {
        src: String,
        dst: String,
        casting: Casting,
    },

    /// Integer overflow in unit conversion, alignment, or tick arithmetic.
    #[error("integer overflow {0}")]
    Overflow(String),

    /// Two descriptors sit on opposite sides of the year/month barrier and
    /// no common resolution exists under strict rules.
    #[error("no common resolution for {left} and {right}: incompatible nonlinear base units")]
    IncompatibleUnits { left: String, right: String },

    /// Month or day-of-month outside the calendar range.
    #[error("invalid date ({year}, {month}, {day})")]
    InvalidDate { year: i64, month: i32, day: i32 },

    /// Time-of-day field outside its range.
    #[error("invalid time ({hour}, {minute}, {second}, {microsecond})")]
    InvalidTime {
        hour: i32,
        minute: i32,
        second: i32,
        microsecond: i32,
    },

    /// The range generator was given a zero step.
    #[error("range step cannot be zero")]
    StepZero,

    /// The coercion layer exhausted every ingestion strategy.
    #[error("could not convert input to a temporal value: {0}")]
    ConversionFailure(String),

    /// Nested input exceeded the recursion guard during unit inference.
    #[error("input nesting exceeds the recursion limit")]
    RecursionLimit,
}
