//! A headless virtual list core.
//!
//! Given a large, dynamically-sized collection, this crate computes which
//! items intersect a scrollable viewport and keeps the scroll position
//! stable while items are measured, resized, appended or prepended.
//!
//! It is UI-agnostic. A rendering layer (DOM, TUI, GUI, ...) is expected to:
//! - forward viewport/item resize observations and scroll events
//! - render the item window reported by the store, positioned by offsets
//! - implement [`ScrollHost`] so imperative scrolling can drive the real
//!   scrollbar
//!
//! For the framework-neutral controller that wires these pieces together,
//! see the `vlist-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod fenwick;
mod jump;
mod options;
mod range;
mod resizer;
mod scroller;
mod store;
mod table;
mod types;


pub use jump::compensation_delta;
pub use options::{ConfigError, ListOptions};
pub use range::{find_range, with_overscan};
pub use resizer::{ObservationToken, Resizer};
pub use scroller::{ScrollHost, Scroller};
pub use store::{StoreAction, SubscriptionId, VirtualStore};
pub use table::ItemSizeTable;
pub use types::{
    Align, ElementId, ItemsRange, JumpEntry, Rect, ResizeEntry, ScrollDirection,
    ScrollToIndexOptions,
};
