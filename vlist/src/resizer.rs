#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use alloc::vec::Vec;

use crate::{ElementId, ResizeEntry, StoreAction, VirtualStore};

#[cfg(feature = "std")]
type ElementIndexMap = HashMap<ElementId, usize>;
#[cfg(not(feature = "std"))]
type ElementIndexMap = BTreeMap<ElementId, usize>;

/// Registration handle returned by [`Resizer::observe_item`].
///
/// Hand it back to [`Resizer::unobserve_item`] when the element unmounts;
/// observations for unregistered elements are dropped.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "unobserve the element with this token when it unmounts"]
pub struct ObservationToken(ElementId);

/// Translates raw host size observations into store updates.
///
/// The bridge distinguishes "viewport resized" from "item resized" by the
/// registered element identity, and batches all item entries of one
/// observation pass into a single `ItemSizesChanged` dispatch: a single
/// reflow must cost exactly one version bump and one jump-compensation
/// pass, not one per item.
#[derive(Clone, Debug, Default)]
pub struct Resizer {
    root: Option<ElementId>,
    items: ElementIndexMap,
    horizontal: bool,
}

impl Resizer {
    pub fn new(horizontal: bool) -> Self {
        Self {
            root: None,
            items: ElementIndexMap::default(),
            horizontal,
        }
    }

    /// Registers the scrollable container.
    pub fn observe_root(&mut self, element: ElementId) {
        self.root = Some(element);
    }

    pub fn unobserve_root(&mut self) {
        self.root = None;
    }

    /// Registers one mounted item element.
    ///
    /// Indexes change when items are inserted or removed before the
    /// element; adapters re-observe with the new index on such moves.
    pub fn observe_item(&mut self, element: ElementId, index: usize) -> ObservationToken {
        vtrace!(element = element.0, index, "observe item");
        self.items.insert(element, index);
        ObservationToken(element)
    }

    pub fn unobserve_item(&mut self, token: ObservationToken) {
        self.items.remove(&token.0);
    }

    pub fn observed_items(&self) -> usize {
        self.items.len()
    }

    /// Applies one observation batch, returning whether any item sizes
    /// were dispatched.
    pub fn handle_entries(&self, store: &mut VirtualStore, entries: &[ResizeEntry]) -> bool {
        let mut sizes: Vec<(usize, u32)> = Vec::new();
        for entry in entries {
            if Some(entry.target) == self.root {
                store.update(StoreAction::ViewportSizeChanged {
                    width: entry.width,
                    height: entry.height,
                });
            } else if let Some(&index) = self.items.get(&entry.target) {
                let size = if self.horizontal {
                    entry.width
                } else {
                    entry.height
                };
                sizes.push((index, size));
            }
            // Anything else targets an element unmounted between
            // observation and delivery; drop it.
        }
        if sizes.is_empty() {
            return false;
        }
        store.update(StoreAction::ItemSizesChanged { entries: sizes });
        true
    }

    /// Unregisters everything. Call on teardown so detached elements are
    /// not kept alive through the index map.
    pub fn dispose(&mut self) {
        self.root = None;
        self.items.clear();
    }
}
