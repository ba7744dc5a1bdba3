use crate::{JumpEntry, ScrollDirection};

/// Computes the corrective scroll delta for a batch of size changes.
///
/// Policies by the direction in effect when the changes were recorded:
///
/// - `Backward`: the user is scrolling toward the start, so any growth
///   above the viewport must push the window down by the same amount.
///   All deltas apply.
/// - `Programmatic`: above-viewport deltas apply unless the viewport is
///   pinned to the very start (the start is expected to stay put);
///   below-viewport deltas apply only when the viewport is pinned to the
///   very end and not to the start, preserving stuck-to-bottom feeds.
///   When both ends are pinned, keeping the start stationary wins.
/// - `Forward`/`Idle`: growth below or ahead of the viewport needs no
///   correction.
pub fn compensation_delta(
    entries: &[JumpEntry],
    direction: ScrollDirection,
    start_pinned: bool,
    end_pinned: bool,
) -> i64 {
    match direction {
        ScrollDirection::Backward => entries.iter().map(|e| e.delta).sum(),
        ScrollDirection::Programmatic => entries
            .iter()
            .filter(|e| {
                if e.above_viewport {
                    !start_pinned
                } else {
                    !start_pinned && end_pinned
                }
            })
            .map(|e| e.delta)
            .sum(),
        ScrollDirection::Forward | ScrollDirection::Idle => 0,
    }
}
