use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::table::ItemSizeTable;
use crate::{
    ConfigError, ItemsRange, JumpEntry, ListOptions, Rect, ScrollDirection, find_range,
};

/// A state mutation applied through [`VirtualStore::update`].
///
/// The store is the single mutable unit of truth; bridges (resizer,
/// scroller) and adapters never touch its fields directly, they dispatch.
#[derive(Clone, Debug)]
pub enum StoreAction {
    /// The item collection grew or shrank. With `shift`, the change
    /// happened at the start of the list and existing entries are
    /// logically re-indexed.
    ItemCountChanged { count: usize, shift: bool },
    /// Measured sizes for mounted items, one batch per host reflow.
    ItemSizesChanged { entries: Vec<(usize, u32)> },
    /// The scrollable container was resized.
    ViewportSizeChanged { width: u32, height: u32 },
    /// The viewport scrolled (live offset read from the host).
    ScrollOffsetChanged { offset: u64 },
    /// The synthetic leading offset before index 0 changed.
    StartMarginChanged { margin: u32 },
    /// An imperative scroll began; direction inference is suspended.
    ManualScrollStarted,
    /// The scroll-stop debounce fired.
    ScrollStopped,
}

/// Handle returned by [`VirtualStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type SubscriberCallback = Arc<dyn Fn(u64) + Send + Sync>;

/// The authoritative state of one virtual list.
///
/// Holds per-item sizes (measured or estimated), cumulative offsets, the
/// viewport geometry, scroll state and the jump log. Every committed
/// update bumps the state version exactly once and synchronously notifies
/// subscribers; a notification means "something changed, re-derive your
/// snapshot", not a diff.
pub struct VirtualStore {
    options: ListOptions,
    table: ItemSizeTable,

    viewport: Rect,
    viewport_initialized: bool,
    scroll_offset: u64,
    direction: ScrollDirection,
    is_scrolling: bool,
    // The first scroll event after a resize may report a spurious
    // direction; events are frequent enough that skipping one is fine.
    skip_direction_once: bool,

    jump_log: Vec<JumpEntry>,
    // Offset corrections applied store-side (shift remaps) that an
    // attached host has not mirrored yet.
    pending_host_shift: i64,

    version: u64,
    subscribers: Vec<(SubscriptionId, SubscriberCallback)>,
    next_subscriber: u64,
}

impl VirtualStore {
    pub fn new(count: usize, options: ListOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        vdebug!(
            count,
            item_size_hint = options.item_size_hint,
            horizontal = options.horizontal,
            "VirtualStore::new"
        );
        Ok(Self {
            table: ItemSizeTable::new(count, options.item_size_hint),
            options,
            viewport: Rect::default(),
            viewport_initialized: false,
            scroll_offset: 0,
            direction: ScrollDirection::Idle,
            is_scrolling: false,
            skip_direction_once: false,
            jump_log: Vec::new(),
            pending_host_shift: 0,
            version: 0,
            subscribers: Vec::new(),
            next_subscriber: 0,
        })
    }

    /// Applies an action. Commits bump the version once and notify all
    /// subscribers; no-op dispatches leave the store untouched.
    pub fn update(&mut self, action: StoreAction) {
        let changed = match action {
            StoreAction::ItemCountChanged { count, shift } => self.apply_item_count(count, shift),
            StoreAction::ItemSizesChanged { entries } => self.apply_item_sizes(&entries),
            StoreAction::ViewportSizeChanged { width, height } => {
                self.apply_viewport_size(width, height)
            }
            StoreAction::ScrollOffsetChanged { offset } => self.apply_scroll_offset(offset),
            StoreAction::StartMarginChanged { margin } => self.apply_start_margin(margin),
            StoreAction::ManualScrollStarted => self.apply_manual_scroll(),
            StoreAction::ScrollStopped => self.apply_scroll_stopped(),
        };
        if changed {
            self.version += 1;
            self.notify();
        }
    }

    fn apply_item_count(&mut self, count: usize, shift: bool) -> bool {
        if count == self.table.len() {
            return false;
        }
        vdebug!(count, shift, prev = self.table.len(), "item count changed");
        let shifted = self.table.resize(count, shift);
        if shifted != 0 {
            // Keep visible content stationary when rows appear or vanish
            // at the start of the list.
            let before = self.scroll_offset;
            self.scroll_offset =
                self.clamp_scroll_offset(add_delta(self.scroll_offset, shifted));
            self.pending_host_shift += self.scroll_offset as i64 - before as i64;
        } else {
            self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
        }
        true
    }

    fn apply_item_sizes(&mut self, entries: &[(usize, u32)]) -> bool {
        if entries.is_empty() {
            return false;
        }
        // Above/below classification is anchored to the range before this
        // batch applies.
        let start_index = self.visible_range().map_or(0, |r| r.start);
        let mut changed = false;
        for &(index, size) in entries {
            if index >= self.table.len() {
                continue;
            }
            if size == 0 {
                vwarn!(index, "ignoring zero-sized observation");
                continue;
            }
            let was_measured = self.table.is_measured(index);
            let delta = self.table.set_size(index, size);
            if delta != 0 {
                vtrace!(index, size, delta, "item size changed");
                self.jump_log.push(JumpEntry {
                    index,
                    delta,
                    above_viewport: index < start_index,
                });
                changed = true;
            } else if !was_measured {
                // Estimate confirmed by a real measurement; offsets are
                // unchanged but the measured flag is new state.
                changed = true;
            }
        }
        if changed {
            self.skip_direction_once = true;
        }
        changed
    }

    fn apply_viewport_size(&mut self, width: u32, height: u32) -> bool {
        let rect = if self.options.horizontal {
            Rect {
                main: width,
                cross: height,
            }
        } else {
            Rect {
                main: height,
                cross: width,
            }
        };
        if rect == self.viewport {
            return false;
        }
        vdebug!(main = rect.main, cross = rect.cross, "viewport resized");
        self.viewport = rect;
        if rect.main > 0 {
            self.viewport_initialized = true;
        }
        true
    }

    fn apply_scroll_offset(&mut self, offset: u64) -> bool {
        let offset = self.clamp_scroll_offset(offset);
        if offset == self.scroll_offset {
            return false;
        }
        let prev = self.scroll_offset;
        self.scroll_offset = offset;
        if self.skip_direction_once && self.direction != ScrollDirection::Idle {
            self.skip_direction_once = false;
        } else if self.direction != ScrollDirection::Programmatic {
            self.direction = if offset > prev {
                ScrollDirection::Forward
            } else {
                ScrollDirection::Backward
            };
        }
        self.is_scrolling = true;
        vtrace!(offset, prev, direction = ?self.direction, "scroll offset changed");
        true
    }

    fn apply_start_margin(&mut self, margin: u32) -> bool {
        if margin == self.options.start_margin {
            return false;
        }
        self.options.start_margin = margin;
        true
    }

    fn apply_manual_scroll(&mut self) -> bool {
        if self.direction == ScrollDirection::Programmatic {
            return false;
        }
        self.direction = ScrollDirection::Programmatic;
        true
    }

    fn apply_scroll_stopped(&mut self) -> bool {
        if !self.is_scrolling && self.direction == ScrollDirection::Idle {
            return false;
        }
        self.is_scrolling = false;
        self.direction = ScrollDirection::Idle;
        self.skip_direction_once = false;
        true
    }

    fn notify(&self) {
        let version = self.version;
        for (_, f) in &self.subscribers {
            f(version);
        }
    }

    /// Registers a change listener, called synchronously with the new
    /// state version after every commit.
    pub fn subscribe(&mut self, f: impl Fn(u64) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Arc::new(f)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn item_count(&self) -> usize {
        self.table.len()
    }

    /// Offset of the item at `index` from the scroll origin, including the
    /// start margin. Out-of-range indexes clamp.
    pub fn item_offset(&self, index: usize) -> u64 {
        let margin = self.options.start_margin as u64;
        margin.saturating_add(self.table.offset(index.min(self.table.len())))
    }

    pub fn item_size(&self, index: usize) -> u32 {
        self.table.size(index)
    }

    pub fn is_unmeasured_item(&self, index: usize) -> bool {
        index < self.table.len() && !self.table.is_measured(index)
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn viewport_size(&self) -> u32 {
        self.viewport.main
    }

    pub fn viewport_rect(&self) -> Rect {
        self.viewport
    }

    pub fn is_viewport_initialized(&self) -> bool {
        self.viewport_initialized
    }

    pub fn scroll_direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    /// Total scrollable size: start margin plus all item sizes, or 0 for
    /// an empty list.
    pub fn total_size(&self) -> u64 {
        if self.table.is_empty() {
            return 0;
        }
        (self.options.start_margin as u64).saturating_add(self.table.total())
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_size()
            .saturating_sub(self.viewport.main as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// The unoverscanned range of items intersecting the viewport, or
    /// `None` while the list is empty or the viewport has never reported a
    /// non-zero size (rendering against a zero-size viewport is useless).
    pub fn visible_range(&self) -> Option<ItemsRange> {
        self.range_at(self.scroll_offset)
    }

    /// Like [`Self::visible_range`], for a hypothetical scroll offset.
    pub fn range_at(&self, scroll_offset: u64) -> Option<ItemsRange> {
        if !self.viewport_initialized {
            return None;
        }
        let margin = self.options.start_margin as u64;
        let view = self.viewport.main as u64;
        let scroll_end = scroll_offset.saturating_add(view);
        if scroll_end <= margin {
            // Only the margin is visible.
            return None;
        }
        let list_offset = scroll_offset.saturating_sub(margin);
        // The viewport may straddle the margin boundary; only the part
        // past it intersects items.
        let list_view = (scroll_end - margin).saturating_sub(list_offset);
        find_range(&self.table, list_offset, list_view.min(u32::MAX as u64) as u32)
    }

    /// Whether the window visible at `scroll_offset` would contain items
    /// that have never been measured.
    pub fn has_unmeasured_in_window(&self, scroll_offset: u64) -> bool {
        self.range_at(self.clamp_scroll_offset(scroll_offset))
            .is_some_and(|r| self.table.has_unmeasured_in(r))
    }

    pub fn has_pending_jump(&self) -> bool {
        !self.jump_log.is_empty()
    }

    /// Returns and clears the jump log accumulated since the last drain.
    pub fn drain_jump_log(&mut self) -> Vec<JumpEntry> {
        core::mem::take(&mut self.jump_log)
    }

    /// Returns and clears the offset delta a shift remap applied to the
    /// stored scroll position. The real scrollbar must move by the same
    /// amount to keep content stationary on screen.
    pub fn take_host_shift(&mut self) -> i64 {
        core::mem::take(&mut self.pending_host_shift)
    }

    /// Read-only access to the size table, for range math on snapshots.
    pub fn table(&self) -> &ItemSizeTable {
        &self.table
    }
}

fn add_delta(offset: u64, delta: i64) -> u64 {
    if delta >= 0 {
        offset.saturating_add(delta as u64)
    } else {
        offset.saturating_sub(delta.unsigned_abs())
    }
}
