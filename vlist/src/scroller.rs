use crate::{Align, ScrollToIndexOptions, StoreAction, VirtualStore};

/// The real scrollable viewport, as seen by the core.
///
/// Implementations wrap whatever the embedding UI scrolls (a DOM element,
/// a TUI pane, ...). `scroll_size` must report the live laid-out content
/// size: it can differ from the store's computed total while appended
/// items have never been measured, and imperative scrolls trust the live
/// value over the estimate.
pub trait ScrollHost {
    fn scroll_offset(&self) -> u64;
    fn set_scroll_offset(&mut self, offset: u64);
    fn scroll_size(&self) -> u64;
}

#[derive(Clone, Copy, Debug)]
struct PendingIndexScroll {
    index: usize,
    align: Align,
}

/// Drives scroll state from host events and performs imperative scrolls.
///
/// The scroller owns no clock; callers stamp events with `now_ms` and
/// call [`Scroller::tick`] periodically, which is what detects that
/// scrolling has stopped.
#[derive(Debug)]
pub struct Scroller<H: ScrollHost> {
    host: Option<H>,
    scroll_stop_delay_ms: u64,
    last_scroll_event_ms: Option<u64>,
    pending: Option<PendingIndexScroll>,
}

impl<H: ScrollHost> Scroller<H> {
    pub fn new(scroll_stop_delay_ms: u64) -> Self {
        Self {
            host: None,
            scroll_stop_delay_ms,
            last_scroll_event_ms: None,
            pending: None,
        }
    }

    pub fn attach(&mut self, host: H) {
        self.host = Some(host);
    }

    /// Detaches the host. Any pending scroll-to-index resolves silently
    /// without effect; that is a normal race with teardown, not an error.
    pub fn detach(&mut self) -> Option<H> {
        self.pending = None;
        self.last_scroll_event_ms = None;
        self.host.take()
    }

    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn has_pending_index_scroll(&self) -> bool {
        self.pending.is_some()
    }

    /// Forwards one host scroll event: reads the live offset, dispatches
    /// it, and arms the scroll-stop debounce.
    pub fn on_scroll(&mut self, store: &mut VirtualStore, now_ms: u64) {
        let Some(host) = &self.host else {
            return;
        };
        let offset = host.scroll_offset();
        self.last_scroll_event_ms = Some(now_ms);
        store.update(StoreAction::ScrollOffsetChanged { offset });
    }

    /// Advances the debounce. Returns `true` when a scroll stop was
    /// detected on this call.
    ///
    /// Hosts coalesce rapid scroll events, so one more authoritative read
    /// happens after motion stops; without it the store could drift from
    /// the real position.
    pub fn tick(&mut self, store: &mut VirtualStore, now_ms: u64) -> bool {
        if store.is_scrolling() && self.last_scroll_event_ms.is_none() {
            // Offset moved without a host event (e.g. a compensation
            // nudge); start the quiet period now.
            self.last_scroll_event_ms = Some(now_ms);
            return false;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return false;
        };
        if now_ms.saturating_sub(last) < self.scroll_stop_delay_ms {
            return false;
        }
        self.last_scroll_event_ms = None;
        if let Some(host) = &self.host {
            store.update(StoreAction::ScrollOffsetChanged {
                offset: host.scroll_offset(),
            });
        }
        store.update(StoreAction::ScrollStopped);
        true
    }

    /// Imperative scroll to an absolute offset. No-op while detached.
    pub fn scroll_to(&mut self, store: &mut VirtualStore, offset: u64, now_ms: u64) {
        let Some(host) = &mut self.host else {
            return;
        };
        self.pending = None;
        self.last_scroll_event_ms = Some(now_ms);
        let offset = store.clamp_scroll_offset(offset);
        vtrace!(offset, "scroll_to");
        store.update(StoreAction::ManualScrollStarted);
        host.set_scroll_offset(offset);
        store.update(StoreAction::ScrollOffsetChanged { offset });
    }

    /// Imperative scroll by a signed delta. No-op while detached.
    pub fn scroll_by(&mut self, store: &mut VirtualStore, delta: i64, now_ms: u64) {
        let cur = store.scroll_offset();
        let target = if delta >= 0 {
            cur.saturating_add(delta as u64)
        } else {
            cur.saturating_sub(delta.unsigned_abs())
        };
        self.scroll_to(store, target, now_ms);
    }

    /// Scrolls so the item at `index` lands in the viewport.
    ///
    /// Offsets of never-rendered items are estimates, so this can be a
    /// multi-round protocol: while the destination window contains
    /// unmeasured items, only the store's offset moves (mounting them so
    /// they get measured); the real scrollbar is assigned once, when the
    /// destination is fully measured. [`Self::advance`] performs the
    /// follow-up rounds. A superseding call replaces any pending round.
    pub fn scroll_to_index(
        &mut self,
        store: &mut VirtualStore,
        index: usize,
        opts: ScrollToIndexOptions,
        now_ms: u64,
    ) {
        if self.host.is_none() {
            return;
        }
        let count = store.item_count();
        if count == 0 {
            return;
        }
        let index = index.min(count - 1);
        vdebug!(index, align = ?opts.align, "scroll_to_index");
        self.pending = Some(PendingIndexScroll {
            index,
            align: opts.align,
        });
        self.last_scroll_event_ms = Some(now_ms);
        self.advance(store);
    }

    /// Progresses a pending scroll-to-index, if any.
    ///
    /// Call after store updates that may have measured new items
    /// (typically after each resize batch has been applied).
    pub fn advance(&mut self, store: &mut VirtualStore) {
        let Some(pending) = self.pending else {
            return;
        };
        let Some(host) = self.host.as_mut() else {
            self.pending = None;
            return;
        };
        let dest = destination_offset(store, &*host, pending.index, pending.align);
        store.update(StoreAction::ManualScrollStarted);
        if store.has_unmeasured_in_window(dest) {
            // Mount the destination items; their measurements trigger the
            // next round.
            store.update(StoreAction::ScrollOffsetChanged { offset: dest });
            return;
        }
        self.pending = None;
        vdebug!(index = pending.index, offset = dest, "scroll_to_index settled");
        host.set_scroll_offset(dest);
        store.update(StoreAction::ScrollOffsetChanged { offset: dest });
    }

    /// Applies a jump-compensation delta to both the real and the stored
    /// scroll position, without touching direction inference.
    pub fn nudge(&mut self, store: &mut VirtualStore, delta: i64) {
        if delta == 0 {
            return;
        }
        let cur = store.scroll_offset();
        let target = if delta >= 0 {
            cur.saturating_add(delta as u64)
        } else {
            cur.saturating_sub(delta.unsigned_abs())
        };
        vtrace!(delta, target, "jump compensation");
        if let Some(host) = &mut self.host {
            host.set_scroll_offset(target);
        }
        store.update(StoreAction::ScrollOffsetChanged { offset: target });
    }

    /// Moves only the real scrollbar by `delta`, mirroring an offset
    /// correction the store has already applied to itself (a shift remap).
    pub fn shift_host(&mut self, delta: i64) {
        if delta == 0 {
            return;
        }
        let Some(host) = &mut self.host else {
            return;
        };
        let cur = host.scroll_offset();
        let target = if delta >= 0 {
            cur.saturating_add(delta as u64)
        } else {
            cur.saturating_sub(delta.unsigned_abs())
        };
        vtrace!(delta, target, "host shift");
        host.set_scroll_offset(target);
    }
}

/// Computes where `index` should scroll to, trusting the host's live
/// scroll size over the store's total for the end-of-content clamp.
fn destination_offset<H: ScrollHost>(
    store: &VirtualStore,
    host: &H,
    index: usize,
    align: Align,
) -> u64 {
    let start = store.item_offset(index);
    let size = store.item_size(index) as u64;
    let end = start.saturating_add(size);
    let view = store.viewport_size() as u64;

    let target = match align {
        Align::Start => start,
        Align::End => end.saturating_sub(view),
        Align::Center => start
            .saturating_add(size / 2)
            .saturating_sub(view / 2),
        Align::Auto => {
            let cur = store.scroll_offset();
            let cur_end = cur.saturating_add(view);
            if start >= cur && end <= cur_end {
                cur
            } else if start < cur {
                start
            } else {
                end.saturating_sub(view)
            }
        }
    };

    // Never scroll the target past the end of content. The live size is
    // authoritative here; the store's total can lag behind for items that
    // were appended but never measured.
    target.min(host.scroll_size().saturating_sub(view))
}
