// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher: execute handlers over a router sequence.
//!
//! Walks contiguous runs of the same [`Phase`], calling the handler for each
//! entry and honoring [`Outcome`]: `Stop` skips the rest of the current phase,
//! `StopAndConsume` aborts every remaining phase.

use crate::types::{Dispatch, Outcome};

/// Run `handler` over `seq`, threading `state` through every call.
///
/// Returns `true` if a handler consumed the event.
///
/// ```
/// use vitrine_responder::dispatcher::run;
/// use vitrine_responder::types::{Dispatch, Outcome, Phase};
///
/// let seq = [
///     Dispatch { phase: Phase::Capture, node: 1_u32, widget: None::<u8> },
///     Dispatch { phase: Phase::Target, node: 2, widget: None },
///     Dispatch { phase: Phase::Bubble, node: 2, widget: None },
/// ];
/// let mut seen = Vec::new();
/// let consumed = run(&seq, &mut seen, |seen, d| {
///     seen.push(d.node);
///     if d.phase == Phase::Target { Outcome::StopAndConsume } else { Outcome::Continue }
/// });
/// assert!(consumed);
/// assert_eq!(seen, [1, 2]);
/// ```
pub fn run<K, W, S>(
    seq: &[Dispatch<K, W>],
    state: &mut S,
    mut handler: impl FnMut(&mut S, &Dispatch<K, W>) -> Outcome,
) -> bool {
    let mut i = 0;
    while i < seq.len() {
        let phase = seq[i].phase;
        while i < seq.len() && seq[i].phase == phase {
            match handler(state, &seq[i]) {
                Outcome::Continue => {}
                Outcome::Stop => {
                    while i + 1 < seq.len() && seq[i + 1].phase == phase {
                        i += 1;
                    }
                }
                Outcome::StopAndConsume => return true,
            }
            i += 1;
        }
    }
    false
}
