// SPDX-License-Identifier: AGPL-3.0-or-later

//! Recursive resolution inference over nested inputs.
//!
//! Walks a tree of sequences and leaves, producing one resolution that
//! every leaf can be stored at: the fold of the descriptor GCD over the
//! leaf candidates.  Leaves that cannot contribute (numbers, the wrong
//! kind, unparseable or out-of-range strings) are skipped, so mixed arrays
//! still infer from their temporal members.

use crate::algebra::{gcd, Casting};
use crate::coerce::TemporalInput;
use crate::error::{Error, Result};
use crate::resolution::Resolution;
use crate::unit::Unit;

/// Maximum nesting depth the walk will follow.
pub const RECURSION_LIMIT: usize = 64;

/// A nested input: either a coercible leaf or a sequence of further inputs.
#[derive(Debug, Clone)]
pub enum InferInput<'a> {
    Leaf(TemporalInput<'a>),
    Sequence(Vec<InferInput<'a>>),
}

/// Infers the resolution for storing the input as instants.
///
/// Strings contribute the precision they spell out, chrono timestamps
/// contribute microseconds, chrono dates days, and existing instant
/// scalars their own resolution.
pub fn infer_datetime_resolution(input: &InferInput<'_>) -> Result<Resolution> {
    let mut meta = Resolution::GENERIC;
    walk_datetime(input, &mut meta, 0)?;
    Ok(meta)
}

/// Infers the resolution for storing the input as durations.
///
/// Existing duration scalars contribute their own resolution (strictly,
/// so a year-duration leaf cannot merge with a day-duration one) and
/// chrono durations contribute microseconds.
pub fn infer_timedelta_resolution(input: &InferInput<'_>) -> Result<Resolution> {
    let mut meta = Resolution::GENERIC;
    walk_timedelta(input, &mut meta, 0)?;
    Ok(meta)
}

fn walk_datetime(input: &InferInput<'_>, meta: &mut Resolution, depth: usize) -> Result<()> {
    match input {
        InferInput::Sequence(items) => {
            if depth >= RECURSION_LIMIT {
                return Err(Error::RecursionLimit);
            }
            for item in items {
                walk_datetime(item, meta, depth + 1)?;
            }
            Ok(())
        }
        InferInput::Leaf(leaf) => {
            let candidate = match leaf {
                // Parse to find out; a leaf that does not parse, or whose
                // fields are out of range, is ignored rather than failing
                // the whole walk.
                TemporalInput::Str(_) | TemporalInput::Moment(_) => {
                    match leaf.to_datetime(None, Casting::Unsafe) {
                        Ok((leaf_meta, _)) => Some(leaf_meta),
                        Err(
                            Error::InvalidDate { .. }
                            | Error::InvalidTime { .. }
                            | Error::ConversionFailure(_),
                        ) => None,
                        Err(other) => return Err(other),
                    }
                }
                TemporalInput::Datetime(scalar) => Some(scalar.resolution()),
                TemporalInput::Date(_) => Some(Resolution::of(Unit::Day)),
                TemporalInput::DateTime(_) | TemporalInput::DateTimeTz(_) => {
                    Some(Resolution::of(Unit::Microsecond))
                }
                // Numbers and duration-shaped leaves say nothing about an
                // instant resolution.
                TemporalInput::Int(_)
                | TemporalInput::Timedelta(_)
                | TemporalInput::Duration(_)
                | TemporalInput::Nat => None,
            };
            if let Some(candidate) = candidate {
                *meta = gcd(candidate, *meta, false, false)?;
            }
            Ok(())
        }
    }
}

fn walk_timedelta(input: &InferInput<'_>, meta: &mut Resolution, depth: usize) -> Result<()> {
    match input {
        InferInput::Sequence(items) => {
            if depth >= RECURSION_LIMIT {
                return Err(Error::RecursionLimit);
            }
            for item in items {
                walk_timedelta(item, meta, depth + 1)?;
            }
            Ok(())
        }
        InferInput::Leaf(leaf) => match leaf {
            TemporalInput::Timedelta(scalar) => {
                *meta = gcd(scalar.resolution(), *meta, true, true)?;
                Ok(())
            }
            TemporalInput::Duration(_) => {
                *meta = gcd(Resolution::of(Unit::Microsecond), *meta, false, false)?;
                Ok(())
            }
            // There is no duration string grammar beyond NaT and bare
            // integers, so text leaves are skipped here.
            _ => Ok(()),
        },
    }
}
