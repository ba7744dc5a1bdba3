use alloc::sync::Arc;

use vlist::{
    ConfigError, ElementId, ItemsRange, ListOptions, ObservationToken, ResizeEntry, Resizer,
    ScrollHost, ScrollToIndexOptions, Scroller, StoreAction, SubscriptionId, VirtualStore,
    compensation_delta, with_overscan,
};

type RangeCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;
type OffsetCallback = Arc<dyn Fn(u64) + Send + Sync>;
type UnitCallback = Arc<dyn Fn() + Send + Sync>;

/// Wires a [`VirtualStore`], [`Resizer`] and [`Scroller`] into the full
/// event protocol of one virtual list.
///
/// This type holds no UI objects. The embedding binding drives it by
/// forwarding host events (`on_scroll_event`, `on_resize_batch`,
/// element (un)registration) and calling `tick(now_ms)` periodically;
/// after every entry point the controller settles the list: it drains the
/// jump log into a scroll correction, advances any pending
/// scroll-to-index round, and delivers the boundary callbacks.
pub struct ListController<H: ScrollHost> {
    store: VirtualStore,
    resizer: Resizer,
    scroller: Scroller<H>,

    on_range_change: Option<RangeCallback>,
    on_scroll: Option<OffsetCallback>,
    on_scroll_end: Option<UnitCallback>,
    on_end_reached: Option<UnitCallback>,

    last_range: Option<ItemsRange>,
    last_scroll_offset: u64,
    // Item count at which on_end_reached last fired; re-armed when the
    // count drops below it (a data reset).
    end_reached_at: Option<usize>,
}

impl<H: ScrollHost> ListController<H> {
    pub fn new(count: usize, options: ListOptions) -> Result<Self, ConfigError> {
        let store = VirtualStore::new(count, options)?;
        Ok(Self {
            resizer: Resizer::new(options.horizontal),
            scroller: Scroller::new(options.scroll_stop_delay_ms),
            store,
            on_range_change: None,
            on_scroll: None,
            on_scroll_end: None,
            on_end_reached: None,
            last_range: None,
            last_scroll_offset: 0,
            end_reached_at: None,
        })
    }

    /// Fires on changes of the true (unoverscanned) visible range.
    pub fn set_on_range_change(
        &mut self,
        f: Option<impl Fn(usize, usize) + Send + Sync + 'static>,
    ) {
        self.on_range_change = f.map(|f| Arc::new(f) as _);
    }

    /// Fires on every committed scroll-offset update.
    pub fn set_on_scroll(&mut self, f: Option<impl Fn(u64) + Send + Sync + 'static>) {
        self.on_scroll = f.map(|f| Arc::new(f) as _);
    }

    /// Fires once each time scrolling is detected to have stopped.
    pub fn set_on_scroll_end(&mut self, f: Option<impl Fn() + Send + Sync + 'static>) {
        self.on_scroll_end = f.map(|f| Arc::new(f) as _);
    }

    /// Fires when the visible end comes within `end_threshold` items of
    /// the last item; at most once per item-count epoch.
    pub fn set_on_end_reached(&mut self, f: Option<impl Fn() + Send + Sync + 'static>) {
        self.on_end_reached = f.map(|f| Arc::new(f) as _);
    }

    pub fn attach(&mut self, host: H) {
        self.scroller.attach(host);
    }

    /// Detaches the host viewport; a pending scroll-to-index is cancelled
    /// silently.
    pub fn detach(&mut self) -> Option<H> {
        self.scroller.detach()
    }

    /// Tears down all element registrations and the host.
    pub fn dispose(&mut self) -> Option<H> {
        self.resizer.dispose();
        self.scroller.detach()
    }

    pub fn observe_root(&mut self, element: ElementId) {
        self.resizer.observe_root(element);
    }

    pub fn observe_item(&mut self, element: ElementId, index: usize) -> ObservationToken {
        self.resizer.observe_item(element, index)
    }

    pub fn unobserve_item(&mut self, token: ObservationToken) {
        self.resizer.unobserve_item(token);
    }

    /// Applies one resize-observation batch from the host.
    pub fn on_resize_batch(&mut self, entries: &[ResizeEntry]) {
        self.resizer.handle_entries(&mut self.store, entries);
        self.settle();
    }

    /// Forwards one scroll event from the host viewport.
    pub fn on_scroll_event(&mut self, now_ms: u64) {
        self.scroller.on_scroll(&mut self.store, now_ms);
        self.settle();
    }

    /// Advances timers; call once per frame or timer tick.
    pub fn tick(&mut self, now_ms: u64) {
        let stopped = self.scroller.tick(&mut self.store, now_ms);
        if stopped {
            if let Some(f) = &self.on_scroll_end {
                f();
            }
        }
        self.settle();
    }

    /// Updates the item count after the data set changed. Whether a count
    /// change is treated as append/truncate or prepend/shift follows
    /// [`ListOptions::shift_on_prepend`].
    pub fn set_item_count(&mut self, count: usize) {
        let shift = self.store.options().shift_on_prepend;
        self.set_item_count_shift(count, shift);
    }

    /// Like [`Self::set_item_count`], overriding the configured shift
    /// behavior for this one change. Feeds that both append and prepend
    /// pick per update.
    pub fn set_item_count_shift(&mut self, count: usize, shift: bool) {
        self.store
            .update(StoreAction::ItemCountChanged { count, shift });
        self.settle();
    }

    pub fn set_start_margin(&mut self, margin: u32) {
        self.store.update(StoreAction::StartMarginChanged { margin });
        self.settle();
    }

    pub fn scroll_to_index(&mut self, index: usize, opts: ScrollToIndexOptions, now_ms: u64) {
        self.scroller
            .scroll_to_index(&mut self.store, index, opts, now_ms);
        self.settle();
    }

    pub fn scroll_to(&mut self, offset: u64, now_ms: u64) {
        self.scroller.scroll_to(&mut self.store, offset, now_ms);
        self.settle();
    }

    pub fn scroll_by(&mut self, delta: i64, now_ms: u64) {
        self.scroller.scroll_by(&mut self.store, delta, now_ms);
        self.settle();
    }

    /// The range to render: visible range plus overscan, clamped.
    pub fn render_range(&self) -> Option<ItemsRange> {
        let range = self.store.visible_range()?;
        Some(with_overscan(
            range,
            self.store.options().overscan,
            self.store.item_count(),
        ))
    }

    pub fn visible_range(&self) -> Option<ItemsRange> {
        self.store.visible_range()
    }

    pub fn item_offset(&self, index: usize) -> u64 {
        self.store.item_offset(index)
    }

    pub fn is_item_unmeasured(&self, index: usize) -> bool {
        self.store.is_unmeasured_item(index)
    }

    pub fn total_size(&self) -> u64 {
        self.store.total_size()
    }

    pub fn viewport_size(&self) -> u32 {
        self.store.viewport_size()
    }

    pub fn scroll_offset(&self) -> u64 {
        self.store.scroll_offset()
    }

    /// Live content size when a host is attached, the store's total
    /// otherwise.
    pub fn scroll_size(&self) -> u64 {
        self.scroller
            .host()
            .map_or(self.store.total_size(), |h| h.scroll_size())
    }

    pub fn is_scrolling(&self) -> bool {
        self.store.is_scrolling()
    }

    pub fn has_pending_index_scroll(&self) -> bool {
        self.scroller.has_pending_index_scroll()
    }

    pub fn version(&self) -> u64 {
        self.store.version()
    }

    pub fn subscribe(&mut self, f: impl Fn(u64) + Send + Sync + 'static) -> SubscriptionId {
        self.store.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn store(&self) -> &VirtualStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut VirtualStore {
        &mut self.store
    }

    fn settle(&mut self) {
        let shift = self.store.take_host_shift();
        self.scroller.shift_host(shift);
        self.compensate_jump();
        self.scroller.advance(&mut self.store);
        self.deliver_callbacks();
    }

    fn compensate_jump(&mut self) {
        if !self.store.has_pending_jump() {
            return;
        }
        let entries = self.store.drain_jump_log();
        let count = self.store.item_count();
        let (start_pinned, end_pinned) = match self.store.visible_range() {
            Some(r) => (r.start == 0, r.end + 1 == count),
            None => (true, true),
        };
        let delta = compensation_delta(
            &entries,
            self.store.scroll_direction(),
            start_pinned,
            end_pinned,
        );
        if delta != 0 {
            self.scroller.nudge(&mut self.store, delta);
        }
    }

    fn deliver_callbacks(&mut self) {
        let offset = self.store.scroll_offset();
        if offset != self.last_scroll_offset {
            self.last_scroll_offset = offset;
            if let Some(f) = &self.on_scroll {
                f(offset);
            }
        }

        let range = self.store.visible_range();
        if range != self.last_range {
            self.last_range = range;
            if let Some(r) = range {
                if let Some(f) = &self.on_range_change {
                    f(r.start, r.end);
                }
            }
        }

        self.check_end_reached();
    }

    fn check_end_reached(&mut self) {
        let count = self.store.item_count();
        if let Some(at) = self.end_reached_at {
            if at > count {
                // Items were probably refreshed; re-arm.
                self.end_reached_at = None;
            }
        }
        if count == 0 {
            return;
        }
        let Some(range) = self.store.visible_range() else {
            return;
        };
        let end_margin = count - 1 - range.end;
        if end_margin <= self.store.options().end_threshold
            && self.end_reached_at.is_none_or(|at| at < count)
        {
            self.end_reached_at = Some(count);
            if let Some(f) = &self.on_end_reached {
                f();
            }
        }
    }
}
