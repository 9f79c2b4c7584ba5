// SPDX-License-Identifier: AGPL-3.0-or-later

//! Typed temporal values
//!
//! This crate provides two scalar kinds — [`Datetime64`] (an absolute
//! instant) and [`Timedelta64`] (a signed duration) — each stored as a
//! signed 64-bit [`Tick`] count qualified by a [`Resolution`] (a base
//! [`Unit`] plus an integer multiplier).  Around them sit the unit algebra,
//! a proleptic-Gregorian calendar engine, the descriptor grammar, a
//! coercion layer for heterogeneous inputs, and a range generator.
//!
//! # Core types
//!
//! - [`Unit`] — the closed base-unit enumeration, `Year` down to
//!   `Attosecond` plus `Generic`.
//! - [`Resolution`] — `(base, num)` descriptor with the `[7D]` textual
//!   grammar.
//! - [`Tick`] — a 64-bit count or NaT; `i64::MIN` is reserved for NaT on
//!   the wire.
//! - [`Moment`] — the broken-down year/…/attosecond structure.
//! - [`Datetime64`], [`Timedelta64`] — the scalars.
//! - [`Casting`] — the strictness dial for conversions.
//!
//! # Unit symbols
//!
//! | Symbol | Unit | | Symbol | Unit |
//! |--------|------|-|--------|------|
//! | `Y`  | year   | | `ms` | millisecond |
//! | `M`  | month  | | `us` | microsecond |
//! | `W`  | week   | | `ns` | nanosecond  |
//! | `D`  | day    | | `ps` | picosecond  |
//! | `h`  | hour   | | `fs` | femtosecond |
//! | `m`  | minute | | `as` | attosecond  |
//! | `s`  | second | | `generic` | unit not yet chosen |
//!
//! # Quick example
//!
//! ```
//! use unitick::{arange, Casting, Datetime64, Resolution, TemporalInput, Timedelta64, Unit};
//!
//! // Parsing adopts the precision the text spells out.
//! let start: Datetime64 = "2020-01-01".parse().unwrap();
//! assert_eq!(start.resolution(), Resolution::of(Unit::Day));
//!
//! // Casting follows the strictness dial.
//! let hours = start.cast(Resolution::of(Unit::Hour), Casting::Safe).unwrap();
//! assert_eq!(hours.to_string(), "2020-01-01T00");
//!
//! // Ranges resolve a common unit across their arguments.
//! let stop = TemporalInput::Str("2020-01-05");
//! let step = TemporalInput::Timedelta(Timedelta64::from_raw(
//!     1,
//!     Resolution::of(Unit::Day),
//! ));
//! let range = arange(
//!     Some(&TemporalInput::Str("2020-01-01")),
//!     Some(&stop),
//!     Some(&step),
//!     None,
//! )
//! .unwrap();
//! assert_eq!(range.ticks.len(), 4);
//! ```
//!
//! # NaT
//!
//! Not-a-Time absorbs every operation: encoding, decoding, casting,
//! arithmetic, and comparison (where it behaves like a floating-point NaN).
//! The coercion layer accepts the literal `NaT` in strings and the
//! [`TemporalInput::Nat`] sentinel; the range generator rejects NaT
//! operands outright.

mod algebra;
mod calendar;
mod codec;
mod coerce;
mod error;
mod infer;
mod iso;
mod moment;
mod range;
mod resolution;
mod scalar;
mod tick;
mod unit;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use algebra::{
    can_cast_datetime, can_cast_datetime_units, can_cast_timedelta, can_cast_timedelta_units,
    conversion_factor, divides, gcd, Casting,
};
pub use calendar::{
    civil_from_days, days_from_civil, days_in_month, is_leap_year, month_of_day_offset,
};
pub use codec::{moment_to_tick, tick_to_moment};
pub use coerce::TemporalInput;
pub use error::{Error, Result};
pub use infer::{
    infer_datetime_resolution, infer_timedelta_resolution, InferInput, RECURSION_LIMIT,
};
pub use iso::{format_iso_8601, parse_iso_8601};
pub use moment::{Moment, NAT_YEAR};
pub use range::{arange, Range};
pub use resolution::{parse_type_string, Resolution, TemporalKind};
pub use scalar::{promote_resolutions, Datetime64, Timedelta64};
pub use tick::{Tick, NAT_RAW};
pub use unit::{Unit, ALL_UNITS};
