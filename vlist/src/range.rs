use crate::{ItemSizeTable, ItemsRange};

/// Finds the inclusive range of items overlapping
/// `[scroll_offset, scroll_offset + viewport_size)`.
///
/// Offsets are list-relative (callers account for any start margin). The
/// lookup is a binary descent over the table's prefix sums, so it is
/// `O(log n)` per call and safe to run on every scroll tick.
///
/// Boundary ties: an item whose offset equals the viewport end is not part
/// of the range; an item ending exactly at `scroll_offset` is excluded too.
pub fn find_range(
    table: &ItemSizeTable,
    scroll_offset: u64,
    viewport_size: u32,
) -> Option<ItemsRange> {
    if table.is_empty() || viewport_size == 0 {
        return None;
    }

    let total = table.total();
    let view = viewport_size as u64;
    let offset = scroll_offset.min(total.saturating_sub(view));
    let end_exclusive = offset.saturating_add(view).min(total);
    if end_exclusive <= offset {
        return None;
    }

    let start = table.index_at(offset);
    let end = table.index_at(end_exclusive - 1);
    Some(ItemsRange { start, end })
}

/// Expands a visible range by `overscan` items on both sides, clamped to
/// `[0, count)`.
///
/// Overscan is applied here rather than in [`find_range`] so "true visible
/// range" (driving range-change and end-reached callbacks) and "rendered
/// range" stay distinct concepts.
pub fn with_overscan(range: ItemsRange, overscan: usize, count: usize) -> ItemsRange {
    ItemsRange {
        start: range.start.saturating_sub(overscan),
        end: range
            .end
            .saturating_add(overscan)
            .min(count.saturating_sub(1)),
    }
}
