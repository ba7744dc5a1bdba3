/// Logical direction of the current scroll interaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    /// No scroll in progress.
    #[default]
    Idle,
    /// Scrolling toward the end of the list.
    Forward,
    /// Scrolling toward the start of the list.
    Backward,
    /// An imperative scroll (`scroll_to*`) is in progress; direction
    /// inference from raw scroll events is suspended until the next stop.
    Programmatic,
}

/// Viewport geometry in the scroll axis (`main`) and the cross axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub main: u32,
    pub cross: u32,
}

/// An inclusive index range of items intersecting the viewport.
///
/// The empty range is represented as `Option::<ItemsRange>::None` by the
/// functions producing ranges, so `start <= end` always holds here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemsRange {
    pub start: usize,
    pub end: usize,
}

impl ItemsRange {
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }
}

/// Identity of a host-side element observed for size changes.
///
/// The core never touches real UI objects; adapters assign each mounted
/// element a stable id and report observations keyed by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub u64);

/// One raw size observation delivered by the host's resize observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeEntry {
    pub target: ElementId,
    pub width: u32,
    pub height: u32,
}

/// A recorded size change, consumed once by jump compensation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JumpEntry {
    pub index: usize,
    /// Signed size delta (measured minus previously stored).
    pub delta: i64,
    /// Whether the item was above the visible start index when the change
    /// was recorded.
    pub above_viewport: bool,
}

/// Where the target item should land in the viewport after a
/// [`Scroller::scroll_to_index`](crate::Scroller::scroll_to_index) call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    /// Keep the current offset if the item is already fully visible,
    /// otherwise scroll the minimal distance.
    Auto,
}

/// Options for [`Scroller::scroll_to_index`](crate::Scroller::scroll_to_index).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollToIndexOptions {
    pub align: Align,
}
