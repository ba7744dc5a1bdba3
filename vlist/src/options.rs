use thiserror::Error;

/// A configuration problem detected at setup time.
///
/// These are programmer errors, surfaced eagerly; nothing at runtime
/// produces them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("item_size_hint must be greater than zero")]
    ZeroItemSizeHint,
    #[error("scroll_stop_delay_ms must be greater than zero")]
    ZeroScrollStopDelay,
}

/// Configuration for a virtual list.
///
/// Multiple lists may run in the same process with different options;
/// there are no shared defaults beyond the `Default` impl below.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListOptions {
    /// Size assumed for items that have never been measured. Accurate
    /// hints reduce scroll jumps when real measurements arrive.
    pub item_size_hint: u32,
    /// Extra items rendered above/below the visible range to hide blank
    /// flashes during fast scrolling.
    pub overscan: usize,
    /// Synthetic leading offset applied before index 0, for lists that
    /// start after other content inside the same scroll container.
    pub start_margin: u32,
    /// Number of trailing items treated as "the end" for the end-reached
    /// callback.
    pub end_threshold: usize,
    /// When the item count changes, assume items were added/removed at
    /// the start and remap existing measurements accordingly.
    pub shift_on_prepend: bool,
    /// Virtualize the horizontal axis instead of the vertical one.
    pub horizontal: bool,
    /// Quiet time after the last scroll event before scrolling is
    /// considered stopped.
    pub scroll_stop_delay_ms: u64,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            item_size_hint: 40,
            overscan: 6,
            start_margin: 0,
            end_threshold: 0,
            shift_on_prepend: false,
            horizontal: false,
            scroll_stop_delay_ms: 300,
        }
    }
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item_size_hint(mut self, item_size_hint: u32) -> Self {
        self.item_size_hint = item_size_hint;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_start_margin(mut self, start_margin: u32) -> Self {
        self.start_margin = start_margin;
        self
    }

    pub fn with_end_threshold(mut self, end_threshold: usize) -> Self {
        self.end_threshold = end_threshold;
        self
    }

    pub fn with_shift_on_prepend(mut self, shift_on_prepend: bool) -> Self {
        self.shift_on_prepend = shift_on_prepend;
        self
    }

    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn with_scroll_stop_delay_ms(mut self, delay_ms: u64) -> Self {
        self.scroll_stop_delay_ms = delay_ms;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_size_hint == 0 {
            return Err(ConfigError::ZeroItemSizeHint);
        }
        if self.scroll_stop_delay_ms == 0 {
            return Err(ConfigError::ZeroScrollStopDelay);
        }
        Ok(())
    }
}
