//! Framework-neutral controller for the `vlist` virtual list core.
//!
//! The `vlist` crate exposes the individual pieces (store, range finder,
//! resize bridge, scroller, jump compensation); this crate wires them
//! into a [`ListController`] implementing the full event protocol a UI
//! binding needs:
//!
//! - forward mount/unmount/resize/scroll events from the host
//! - call [`ListController::tick`] periodically for scroll-stop detection
//! - render the item window from [`ListController::render_range`],
//!   re-rendering whenever a subscribed state version changes
//!
//! UI framework bindings themselves (DOM, TUI, GUI) stay out of this
//! crate; each is an independent consumer of the same interface.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;


pub use controller::ListController;
