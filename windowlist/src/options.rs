use alloc::sync::Arc;

use crate::ConfigError;
use crate::window::ListWindow;

/// A callback fired when a window state update occurs.
///
/// The second argument is `is_scrolling`.
pub type OnChangeCallback = Arc<dyn Fn(&ListWindow, bool) + Send + Sync>;

/// Initial scroll offset configuration.
#[derive(Clone)]
pub enum InitialOffset {
    /// A fixed initial offset.
    Value(u64),
    /// A lazily evaluated initial offset provider (called by `ListWindow::new`).
    Provider(Arc<dyn Fn() -> u64 + Send + Sync>),
}

impl InitialOffset {
    pub(crate) fn resolve(&self) -> u64 {
        match self {
            Self::Value(v) => *v,
            Self::Provider(f) => f(),
        }
    }
}

impl Default for InitialOffset {
    fn default() -> Self {
        Self::Value(0)
    }
}

impl core::fmt::Debug for InitialOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Configuration for [`crate::ListWindow`].
///
/// This type is cheap to clone: the callback fields are stored in `Arc`s so adapters can update
/// a few fields and call `ListWindow::set_options` without reallocating closures.
#[derive(Clone)]
pub struct ListWindowOptions {
    /// Number of rows in the list.
    pub count: usize,
    /// Fixed height of every row, in pixels. Must be positive.
    pub row_height: u32,
    /// Visible height of the scroll viewport, in pixels.
    ///
    /// A zero viewport (host not laid out yet) yields empty ranges.
    pub viewport_height: u32,
    /// Extra rows rendered beyond each edge of the strictly-visible range, to reduce blank
    /// flashes during fast scrolling.
    pub overscan: usize,

    /// Enables/disables the window. When disabled, query methods return empty results.
    pub enabled: bool,

    /// Initial scroll offset applied by `ListWindow::new`.
    pub initial_offset: InitialOffset,

    /// Optional callback fired when the window's internal state changes.
    ///
    /// The second argument indicates whether a scroll is in progress.
    pub on_change: Option<OnChangeCallback>,

    /// Debounced duration for resetting `is_scrolling` after the last scroll event.
    pub is_scrolling_reset_delay_ms: u64,
}

impl ListWindowOptions {
    /// Creates options for a list of `count` rows of `row_height` pixels each, shown in a
    /// viewport of `viewport_height` pixels.
    pub fn new(count: usize, row_height: u32, viewport_height: u32) -> Self {
        Self {
            count,
            row_height,
            viewport_height,
            overscan: 5,
            enabled: true,
            initial_offset: InitialOffset::default(),
            on_change: None,
            is_scrolling_reset_delay_ms: 150,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.row_height == 0 {
            return Err(ConfigError::ZeroRowHeight);
        }
        Ok(())
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: InitialOffset) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_initial_offset_value(mut self, initial_offset: u64) -> Self {
        self.initial_offset = InitialOffset::Value(initial_offset);
        self
    }

    pub fn with_initial_offset_provider(
        mut self,
        initial_offset: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Self {
        self.initial_offset = InitialOffset::Provider(Arc::new(initial_offset));
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&ListWindow, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }
}

impl core::fmt::Debug for ListWindowOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListWindowOptions")
            .field("count", &self.count)
            .field("row_height", &self.row_height)
            .field("viewport_height", &self.viewport_height)
            .field("overscan", &self.overscan)
            .field("enabled", &self.enabled)
            .field("initial_offset", &self.initial_offset)
            .field(
                "is_scrolling_reset_delay_ms",
                &self.is_scrolling_reset_delay_ms,
            )
            .finish_non_exhaustive()
    }
}
