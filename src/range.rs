// SPDX-License-Identifier: AGPL-3.0-or-later

//! Arithmetic progressions of instants and durations.
//!
//! [`arange`] resolves `(start, stop, step)` to a common resolution via the
//! descriptor GCD, then emits `(stop − start) / step` ticks (rounded up in
//! the direction of the step).  In instant mode a duration-shaped `stop` is
//! reinterpreted as `start + stop`.

use crate::coerce::{resolve_common, TemporalInput};
use crate::error::{Error, Result};
use crate::resolution::{Resolution, TemporalKind};
use crate::tick::Tick;
use crate::algebra::Casting;

/// A generated progression: the resolved kind and resolution, plus the
/// ticks themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    pub kind: TemporalKind,
    pub resolution: Resolution,
    pub ticks: Vec<i64>,
}

/// Generates the progression `start, start+step, …` up to (exclusive)
/// `stop`.
///
/// With `stop` absent, `start` becomes the stop and the progression starts
/// at zero.  A missing `step` defaults to 1.  `descriptor` fixes the kind
/// and, unless generic, the resolution; without it the kind is detected
/// from the inputs and the resolution inferred by repeated GCD.  All three
/// values are coerced under same-kind casting; NaT anywhere is an error.
pub fn arange(
    start: Option<&TemporalInput<'_>>,
    stop: Option<&TemporalInput<'_>>,
    step: Option<&TemporalInput<'_>>,
    descriptor: Option<(TemporalKind, Resolution)>,
) -> Result<Range> {
    // Normalise: a single positional value is the stop.
    let (start, stop) = match (start, stop) {
        (start, Some(stop)) => (start, stop),
        (Some(stop), None) => (None, stop),
        (None, None) => {
            return Err(Error::ConversionFailure(
                "a range needs at least a stopping value".into(),
            ))
        }
    };

    // A step that is itself an instant makes no sense.
    if let Some(step) = step {
        if step.is_datetime_like() || step.is_datetime_text() {
            return Err(Error::ConversionFailure(
                "cannot use a datetime as a range step".into(),
            ));
        }
    }

    // Determine the kind, then the target resolution (a generic descriptor
    // means "infer from the values").
    let kind = match descriptor {
        Some((kind, _)) => kind,
        None => {
            let datetime_shaped = |input: &TemporalInput<'_>| {
                input.is_datetime_like() || input.is_datetime_text()
            };
            if start.is_some_and(datetime_shaped) || datetime_shaped(stop) {
                TemporalKind::Datetime
            } else {
                TemporalKind::Timedelta
            }
        }
    };
    let target = descriptor
        .map(|(_, meta)| meta)
        .filter(|meta| !meta.is_generic());

    if kind == TemporalKind::Datetime && start.is_none() {
        return Err(Error::ConversionFailure(
            "a datetime range requires both a start and a stop".into(),
        ));
    }

    // Missing pieces take their defaults before coercion, so the common
    // resolution sees every operand.
    let zero = TemporalInput::Int(0);
    let one = TemporalInput::Int(1);
    let start = start.unwrap_or(&zero);
    let step = step.unwrap_or(&one);

    // In instant mode the stop may still be duration-shaped, meaning
    // "this far past the start".
    let stop_kind = if kind == TemporalKind::Timedelta || stop.is_timedelta_like() {
        TemporalKind::Timedelta
    } else {
        TemporalKind::Datetime
    };
    let start_kind = if kind == TemporalKind::Datetime {
        TemporalKind::Datetime
    } else {
        TemporalKind::Timedelta
    };

    let (resolution, values) = resolve_common(
        &[
            (start, start_kind),
            (stop, stop_kind),
            (step, TemporalKind::Timedelta),
        ],
        Casting::SameKind,
        target,
    )?;

    let (mut start, mut stop, step) = match (values[0], values[1], values[2]) {
        (Tick::Value(a), Tick::Value(b), Tick::Value(c)) => (a, b, c),
        _ => {
            return Err(Error::ConversionFailure(
                "cannot use NaT (not-a-time) values in a range".into(),
            ))
        }
    };

    if kind == TemporalKind::Datetime && stop_kind == TemporalKind::Timedelta {
        stop = start
            .checked_add(stop)
            .ok_or_else(|| Error::Overflow("while offsetting the range stop".into()))?;
    }

    let length = if step > 0 && stop > start {
        (stop - start + (step - 1)) / step
    } else if step < 0 && stop < start {
        (stop - start + (step + 1)) / step
    } else if step != 0 {
        0
    } else {
        return Err(Error::StepZero);
    };

    let mut ticks = Vec::with_capacity(length as usize);
    for _ in 0..length {
        ticks.push(start);
        start += step;
    }

    Ok(Range {
        kind,
        resolution,
        ticks,
    })
}
