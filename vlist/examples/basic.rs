//! Store-level walkthrough: dispatch host events by hand and inspect the
//! derived state.
//!
//! Run with `cargo run --example basic`.

use vlist::{ListOptions, StoreAction, VirtualStore, with_overscan};

fn print_window(store: &VirtualStore) {
    match store.visible_range() {
        Some(range) => {
            let render = with_overscan(range, store.options().overscan, store.item_count());
            println!(
                "offset {:>6}  visible [{:>4}, {:>4}]  render [{:>4}, {:>4}]  total {}",
                store.scroll_offset(),
                range.start,
                range.end,
                render.start,
                render.end,
                store.total_size(),
            );
        }
        None => println!("offset {:>6}  (viewport not ready)", store.scroll_offset()),
    }
}

fn main() {
    let options = ListOptions::default().with_item_size_hint(40).with_overscan(6);
    let mut store = VirtualStore::new(10_000, options).expect("valid options");

    // Nothing is derivable before the viewport reports a size.
    print_window(&store);
    store.update(StoreAction::ViewportSizeChanged {
        width: 400,
        height: 600,
    });
    print_window(&store);

    // Scroll around; every offset is an estimate until items measure.
    for offset in [1_000, 20_000, 399_999] {
        store.update(StoreAction::ScrollOffsetChanged { offset });
        print_window(&store);
    }

    // The visible items mount and report real sizes.
    let range = store.visible_range().expect("viewport is ready");
    let entries: Vec<(usize, u32)> = (range.start..=range.end)
        .map(|i| (i, 40 + (i % 7) as u32 * 10))
        .collect();
    store.update(StoreAction::ItemSizesChanged { entries });

    for jump in store.drain_jump_log() {
        println!(
            "item {:>4} changed by {:+} ({})",
            jump.index,
            jump.delta,
            if jump.above_viewport { "above" } else { "in/below" },
        );
    }
    print_window(&store);
}
