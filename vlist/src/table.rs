use alloc::vec::Vec;
use core::iter;

use crate::ItemsRange;
use crate::fenwick::Fenwick;

/// Per-item size records plus memoized cumulative offsets.
///
/// Each entry holds a size in pixels and whether it came from a real
/// measurement or the configured estimate. Offsets are prefix sums over
/// the sizes; `offset(i) == sum(size(0..i))` holds after every mutation.
#[derive(Clone, Debug)]
pub struct ItemSizeTable {
    sizes: Vec<u32>,
    measured: Vec<bool>,
    sums: Fenwick,
    default_size: u32,
}

impl ItemSizeTable {
    pub fn new(count: usize, default_size: u32) -> Self {
        let sizes = alloc::vec![default_size; count];
        let sums = Fenwick::from_sizes(&sizes);
        Self {
            sizes,
            measured: alloc::vec![false; count],
            sums,
            default_size,
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Size of the item at `index`, clamped to valid bounds (0 when empty).
    pub fn size(&self, index: usize) -> u32 {
        let last = self.sizes.len().saturating_sub(1);
        self.sizes.get(index.min(last)).copied().unwrap_or(0)
    }

    /// Offset of the item at `index` from the list start.
    ///
    /// `index == len()` yields the total size; larger indexes clamp.
    pub fn offset(&self, index: usize) -> u64 {
        self.sums.prefix_sum(index)
    }

    pub fn total(&self) -> u64 {
        self.sums.total()
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).copied().unwrap_or(false)
    }

    /// Index of the item containing `offset` (clamped to the last item).
    pub fn index_at(&self, offset: u64) -> usize {
        self.sums
            .lower_bound(offset)
            .min(self.len().saturating_sub(1))
    }

    /// Records a measured size, returning the signed delta against the
    /// previously stored value (0 when unchanged).
    pub fn set_size(&mut self, index: usize, size: u32) -> i64 {
        let cur = self.sizes[index];
        self.measured[index] = true;
        if cur == size {
            return 0;
        }
        self.sizes[index] = size;
        let delta = size as i64 - cur as i64;
        self.sums.add(index, delta);
        delta
    }

    /// Resizes the table to `count` entries.
    ///
    /// Growth appends estimated entries at the end, or prepends them when
    /// `shift` is set (items were inserted at the start). Shrinking
    /// truncates from the end, or removes leading entries when `shift` is
    /// set. Existing measured sizes stay attached to their surviving rows.
    ///
    /// Returns the signed sum of the sizes added to or removed from the
    /// start of the list, so callers can keep the visual scroll position
    /// stationary.
    pub fn resize(&mut self, count: usize, shift: bool) -> i64 {
        let prev = self.sizes.len();
        let mut shifted = 0i64;
        if count > prev {
            let added = count - prev;
            if shift {
                self.sizes
                    .splice(0..0, iter::repeat_n(self.default_size, added));
                self.measured.splice(0..0, iter::repeat_n(false, added));
                shifted = added as i64 * self.default_size as i64;
            } else {
                self.sizes.extend(iter::repeat_n(self.default_size, added));
                self.measured.extend(iter::repeat_n(false, added));
            }
        } else if count < prev {
            let removed = prev - count;
            if shift {
                shifted = -self.sizes.drain(..removed).map(|s| s as i64).sum::<i64>();
                self.measured.drain(..removed);
            } else {
                self.sizes.truncate(count);
                self.measured.truncate(count);
            }
        } else {
            return 0;
        }
        self.sums = Fenwick::from_sizes(&self.sizes);
        shifted
    }

    pub fn has_unmeasured_in(&self, range: ItemsRange) -> bool {
        let end = range.end.min(self.len().saturating_sub(1));
        (range.start..=end).any(|i| !self.measured[i])
    }
}
