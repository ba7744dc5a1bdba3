//! Simulates a chat-style feed against a fake scroll host: stick to the
//! bottom while messages arrive, then load older history above without
//! the view moving.
//!
//! Run with `cargo run --example feed_sim`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use vlist::{ElementId, ListOptions, ResizeEntry, ScrollHost, ScrollToIndexOptions};
use vlist_adapter::ListController;

#[derive(Clone)]
struct SimHost {
    offset: Arc<AtomicU64>,
    size: Arc<AtomicU64>,
}

impl SimHost {
    fn new(size: u64) -> Self {
        Self {
            offset: Arc::new(AtomicU64::new(0)),
            size: Arc::new(AtomicU64::new(size)),
        }
    }

    fn set_size(&self, size: u64) {
        self.size.store(size, Ordering::Relaxed);
    }
}

impl ScrollHost for SimHost {
    fn scroll_offset(&self) -> u64 {
        self.offset.load(Ordering::Relaxed)
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        self.offset.store(offset, Ordering::Relaxed);
    }

    fn scroll_size(&self) -> u64 {
        self.size.load(Ordering::Relaxed)
    }
}

const ROOT: ElementId = ElementId(0);

fn measure_visible(controller: &mut ListController<SimHost>, message_size: u32) {
    // Pretend every visible message mounted and reported its height.
    let Some(range) = controller.render_range() else {
        return;
    };
    let entries: Vec<ResizeEntry> = (range.start..=range.end)
        .map(|i| {
            let _ = controller.observe_item(ElementId(1 + i as u64), i);
            ResizeEntry {
                target: ElementId(1 + i as u64),
                width: 400,
                height: message_size,
            }
        })
        .collect();
    controller.on_resize_batch(&entries);
}

fn main() {
    let options = ListOptions::default()
        .with_item_size_hint(40)
        .with_shift_on_prepend(true)
        .with_end_threshold(2);

    let mut count = 50usize;
    let mut controller = ListController::new(count, options).expect("valid options");
    controller.set_on_range_change(Some(|start: usize, end: usize| {
        println!("  range    -> [{start}, {end}]");
    }));
    controller.set_on_end_reached(Some(|| println!("  reached the newest message")));

    let host = SimHost::new(count as u64 * 40);
    controller.attach(host.clone());
    controller.observe_root(ROOT);
    controller.on_resize_batch(&[ResizeEntry {
        target: ROOT,
        width: 400,
        height: 500,
    }]);
    measure_visible(&mut controller, 48);
    host.set_size(controller.total_size());

    println!("jump to the newest message:");
    controller.scroll_to_index(count - 1, ScrollToIndexOptions::default(), 0);
    while controller.has_pending_index_scroll() {
        // Each round mounts the destination window; measuring it may move
        // the target again until the estimates are confirmed.
        measure_visible(&mut controller, 48);
        host.set_size(controller.total_size());
    }
    println!("  offset   -> {}", controller.scroll_offset());

    println!("five new messages arrive while pinned to the bottom:");
    for _ in 0..5 {
        count += 1;
        controller.set_item_count_shift(count, false);
        host.set_size(controller.total_size());
        measure_visible(&mut controller, 48);
    }
    println!("  offset   -> {}", controller.scroll_offset());

    println!("load 20 older messages above:");
    let before = controller.scroll_offset();
    count += 20;
    controller.set_item_count(count);
    host.set_size(controller.total_size());
    println!(
        "  offset   -> {} (was {}, shifted by {})",
        controller.scroll_offset(),
        before,
        controller.scroll_offset() - before,
    );
}
