use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::cmp;

use crate::{
    Align, ConfigError, FrameState, InitialOffset, ListWindowOptions, RowRange, ScrollDirection,
    ScrollState, ViewportState, WindowRow,
};

/// A headless windowed-list engine for fixed-height rows.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects, nor the row data itself.
/// - Your adapter drives it by providing viewport height and scroll offsets.
/// - Rendering is exposed via zero-allocation iteration APIs (`for_each_window_row`) and the
///   [`crate::render_window`] pass.
///
/// Every row occupies exactly `row_height` pixels, so ranges and positions are plain integer
/// arithmetic: no prefix sums, no measurement feedback loop.
#[derive(Clone, Debug)]
pub struct ListWindow {
    options: ListWindowOptions,
    scroll_offset: u64,
    is_scrolling: bool,
    scroll_direction: Option<ScrollDirection>,
    last_scroll_event_ms: Option<u64>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl ListWindow {
    /// Creates a new window from options.
    ///
    /// If `options.initial_offset` is set, it is resolved and applied immediately.
    ///
    /// Fails fast on degenerate geometry (`row_height == 0`) instead of computing undefined
    /// ranges later.
    pub fn new(options: ListWindowOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let scroll_offset = options.initial_offset.resolve();
        wdebug!(
            count = options.count,
            row_height = options.row_height,
            viewport_height = options.viewport_height,
            overscan = options.overscan,
            "ListWindow::new"
        );
        Ok(Self {
            scroll_offset,
            is_scrolling: false,
            scroll_direction: None,
            last_scroll_event_ms: None,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        })
    }

    pub fn options(&self) -> &ListWindowOptions {
        &self.options
    }

    fn reset_to_initial(&mut self) {
        self.scroll_offset = self.options.initial_offset.resolve();
        self.is_scrolling = false;
        self.scroll_direction = None;
        self.last_scroll_event_ms = None;
    }

    pub fn set_options(&mut self, options: ListWindowOptions) -> Result<(), ConfigError> {
        options.validate()?;
        let was_enabled = self.options.enabled;
        self.options = options;
        wtrace!(
            count = self.options.count,
            row_height = self.options.row_height,
            overscan = self.options.overscan,
            "ListWindow::set_options"
        );

        if !self.options.enabled {
            self.scroll_offset = self.options.initial_offset.resolve();
            self.is_scrolling = false;
            self.scroll_direction = None;
            self.last_scroll_event_ms = None;
        } else if !was_enabled {
            self.reset_to_initial();
        }

        self.notify();
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut ListWindowOptions),
    ) -> Result<(), ConfigError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&ListWindow, bool) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    pub fn set_initial_offset(&mut self, initial_offset: u64) {
        self.options.initial_offset = InitialOffset::Value(initial_offset);
        self.notify();
    }

    pub fn set_initial_offset_provider(
        &mut self,
        initial_offset: impl Fn() -> u64 + Send + Sync + 'static,
    ) {
        self.options.initial_offset = InitialOffset::Provider(Arc::new(initial_offset));
        self.notify();
    }

    pub fn set_is_scrolling_reset_delay_ms(&mut self, delay_ms: u64) {
        self.options.is_scrolling_reset_delay_ms = delay_ms;
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self, self.is_scrolling);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// On a typical frame an adapter updates the viewport height, scroll offset, and scrolling
    /// state together. Without batching, each setter may trigger `on_change`, which can be
    /// expensive if the callback drives rendering.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.notify();
    }

    pub fn row_height(&self) -> u32 {
        self.options.row_height
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
        self.notify();
    }

    pub fn enabled(&self) -> bool {
        self.options.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.options.enabled == enabled {
            return;
        }
        self.options.enabled = enabled;
        if !enabled {
            self.scroll_offset = self.options.initial_offset.resolve();
            self.is_scrolling = false;
            self.scroll_direction = None;
            self.last_scroll_event_ms = None;
        } else {
            self.reset_to_initial();
        }
        self.notify();
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        if self.is_scrolling == is_scrolling {
            return;
        }
        self.is_scrolling = is_scrolling;
        if !is_scrolling {
            self.scroll_direction = None;
            self.last_scroll_event_ms = None;
        }
        self.notify();
    }

    pub fn notify_scroll_event(&mut self, now_ms: u64) {
        if !self.options.enabled {
            return;
        }
        self.last_scroll_event_ms = Some(now_ms);
        self.set_is_scrolling(true);
    }

    /// Resets `is_scrolling` once no scroll event has arrived for the configured delay.
    ///
    /// Only the scrolling *flag* is debounced; the window range itself is recomputed on every
    /// scroll notification, favoring correctness over event-rate reduction.
    pub fn update_scrolling(&mut self, now_ms: u64) {
        if !self.options.enabled {
            return;
        }
        if !self.is_scrolling {
            return;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return;
        };
        if now_ms.saturating_sub(last) >= self.options.is_scrolling_reset_delay_ms {
            self.set_is_scrolling(false);
        }
    }

    pub fn viewport_height(&self) -> u32 {
        self.options.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        if self.options.viewport_height == height {
            return;
        }
        self.options.viewport_height = height;
        self.notify();
    }

    /// Returns a lightweight snapshot of the current viewport state.
    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            height: self.options.viewport_height,
        }
    }

    /// Returns a lightweight snapshot of the current scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.scroll_offset,
            is_scrolling: self.is_scrolling,
        }
    }

    /// Returns a combined snapshot of viewport + scroll state.
    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            scroll: self.scroll_state(),
        }
    }

    /// Restores viewport geometry from a previously captured snapshot.
    pub fn restore_viewport_state(&mut self, viewport: ViewportState) {
        self.set_viewport_height(viewport.height);
    }

    /// Restores scroll state from a previously captured snapshot.
    ///
    /// When `scroll.is_scrolling` is `true`, this updates the internal scrolling timers as if a
    /// scroll event happened at `now_ms`.
    pub fn restore_scroll_state(&mut self, scroll: ScrollState, now_ms: u64) {
        if scroll.is_scrolling {
            self.apply_scroll_offset_event_clamped(scroll.offset, now_ms);
            return;
        }
        self.batch_update(|w| {
            w.set_scroll_offset_clamped(scroll.offset);
            w.set_is_scrolling(false);
        });
    }

    /// Restores both viewport + scroll state from a previously captured snapshot.
    pub fn restore_frame_state(&mut self, frame: FrameState, now_ms: u64) {
        if frame.scroll.is_scrolling {
            self.apply_scroll_frame_clamped(frame.viewport.height, frame.scroll.offset, now_ms);
            return;
        }
        self.batch_update(|w| {
            w.set_viewport_height(frame.viewport.height);
            w.set_scroll_offset_clamped(frame.scroll.offset);
            w.set_is_scrolling(false);
        });
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset == offset {
            return;
        }
        let prev = self.scroll_offset;
        self.scroll_offset = offset;
        self.scroll_direction = match offset.cmp(&prev) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.notify();
    }

    /// Applies a scroll offset update from your UI layer (e.g. wheel/drag), and marks the
    /// window as scrolling.
    pub fn apply_scroll_offset_event(&mut self, offset: u64, now_ms: u64) {
        wtrace!(offset, now_ms, "apply_scroll_offset_event");
        self.batch_update(|w| {
            w.set_scroll_offset(offset);
            w.notify_scroll_event(now_ms);
        });
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    /// Same as `apply_scroll_offset_event`, but clamps the offset.
    pub fn apply_scroll_offset_event_clamped(&mut self, offset: u64, now_ms: u64) {
        wtrace!(offset, now_ms, "apply_scroll_offset_event_clamped");
        self.batch_update(|w| {
            w.set_scroll_offset_clamped(offset);
            w.notify_scroll_event(now_ms);
        });
    }

    pub fn set_viewport_and_scroll(&mut self, viewport_height: u32, scroll_offset: u64) {
        self.batch_update(|w| {
            w.set_viewport_height(viewport_height);
            w.set_scroll_offset(scroll_offset);
        });
    }

    pub fn set_viewport_and_scroll_clamped(&mut self, viewport_height: u32, scroll_offset: u64) {
        self.batch_update(|w| {
            w.set_viewport_height(viewport_height);
            w.set_scroll_offset_clamped(scroll_offset);
        });
    }

    /// Applies both viewport height and scroll offset in a single coalesced update.
    ///
    /// This is the recommended entry point for UI adapters that receive scroll events along
    /// with updated viewport information.
    pub fn apply_scroll_frame(&mut self, viewport_height: u32, scroll_offset: u64, now_ms: u64) {
        wtrace!(viewport_height, scroll_offset, now_ms, "apply_scroll_frame");
        self.batch_update(|w| {
            w.set_viewport_height(viewport_height);
            w.set_scroll_offset(scroll_offset);
            w.notify_scroll_event(now_ms);
        });
    }

    /// Same as `apply_scroll_frame`, but clamps the offset.
    pub fn apply_scroll_frame_clamped(
        &mut self,
        viewport_height: u32,
        scroll_offset: u64,
        now_ms: u64,
    ) {
        wtrace!(
            viewport_height,
            scroll_offset,
            now_ms,
            "apply_scroll_frame_clamped"
        );
        self.batch_update(|w| {
            w.set_viewport_height(viewport_height);
            w.set_scroll_offset_clamped(scroll_offset);
            w.notify_scroll_event(now_ms);
        });
    }

    /// Total height of the full (unrendered) list: `count * row_height`.
    ///
    /// An outer spacer of this height keeps native scrollbar size/position correct while only a
    /// window of rows exists in the UI tree.
    pub fn total_height(&self) -> u64 {
        if !self.options.enabled {
            return 0;
        }
        (self.options.count as u64).saturating_mul(self.options.row_height as u64)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        if !self.options.enabled {
            return self.options.initial_offset.resolve();
        }
        self.total_height()
            .saturating_sub(self.options.viewport_height as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// The strictly-visible range: every row whose pixel interval intersects the viewport, with
    /// no overscan applied.
    pub fn visible_range(&self) -> RowRange {
        if !self.options.enabled {
            return RowRange { start: 0, end: 0 };
        }
        self.compute_visible_range(self.scroll_offset, self.options.viewport_height)
    }

    pub fn visible_range_for(&self, scroll_offset: u64, viewport_height: u32) -> RowRange {
        if !self.options.enabled {
            return RowRange { start: 0, end: 0 };
        }
        self.compute_visible_range(scroll_offset, viewport_height)
    }

    /// The rendered range: the visible range padded by `overscan` rows on each edge, clamped to
    /// `[0, count]`.
    pub fn window_range(&self) -> RowRange {
        if !self.options.enabled {
            return RowRange { start: 0, end: 0 };
        }
        self.compute_window_range(self.scroll_offset, self.options.viewport_height)
    }

    pub fn window_range_for(&self, scroll_offset: u64, viewport_height: u32) -> RowRange {
        if !self.options.enabled {
            return RowRange { start: 0, end: 0 };
        }
        self.compute_window_range(scroll_offset, viewport_height)
    }

    /// Vertical translation for the rendered block: `window_range().start * row_height`.
    pub fn translate_offset(&self) -> u64 {
        (self.window_range().start as u64).saturating_mul(self.options.row_height as u64)
    }

    pub fn for_each_window_row(&self, f: impl FnMut(WindowRow)) {
        self.for_each_window_row_for(self.scroll_offset, self.options.viewport_height, f);
    }

    pub fn for_each_window_row_for(
        &self,
        scroll_offset: u64,
        viewport_height: u32,
        mut f: impl FnMut(WindowRow),
    ) {
        if !self.options.enabled {
            return;
        }
        let range = self.compute_window_range(scroll_offset, viewport_height);
        let height = self.options.row_height;
        for index in range.start..range.end {
            f(WindowRow {
                index,
                top: (index as u64).saturating_mul(height as u64),
                height,
            });
        }
    }

    /// Collects window rows into `out` (clears `out` first).
    ///
    /// This is a convenience wrapper around [`Self::for_each_window_row`]. For maximum
    /// performance, prefer `for_each_window_row` and reuse a scratch buffer in your adapter.
    pub fn collect_window_rows(&self, out: &mut Vec<WindowRow>) {
        out.clear();
        self.for_each_window_row(|row| out.push(row));
    }

    pub fn row_at_offset(&self, offset: u64) -> Option<usize> {
        if !self.options.enabled {
            return None;
        }
        let count = self.options.count;
        if count == 0 {
            return None;
        }
        let index = (offset / self.options.row_height as u64) as usize;
        Some(index.min(count - 1))
    }

    pub fn row_top(&self, index: usize) -> Option<u64> {
        if !self.options.enabled {
            return None;
        }
        (index < self.options.count)
            .then(|| (index as u64).saturating_mul(self.options.row_height as u64))
    }

    pub fn row(&self, index: usize) -> Option<WindowRow> {
        let top = self.row_top(index)?;
        Some(WindowRow {
            index,
            top,
            height: self.options.row_height,
        })
    }

    /// Programmatically scrolls to a row (no animation).
    ///
    /// This sets the internal `scroll_offset` to the computed (clamped) target and triggers
    /// `on_change`. It does **not** mark the window as "scrolling".
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_offset(offset);
        offset
    }

    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        if !self.options.enabled {
            return self.options.initial_offset.resolve();
        }
        if self.options.count == 0 {
            return 0;
        }
        let index = index.min(self.options.count - 1);
        let height = self.options.row_height as u64;
        let start = (index as u64).saturating_mul(height);
        let end = start.saturating_add(height);
        let view = self.options.viewport_height as u64;

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => {
                let center = start.saturating_add(height / 2);
                center.saturating_sub(view / 2)
            }
            Align::Auto => {
                let cur = self.scroll_offset;
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

        self.clamp_scroll_offset(target)
    }

    fn compute_window_range(&self, scroll_offset: u64, viewport_height: u32) -> RowRange {
        let mut range = self.compute_visible_range(scroll_offset, viewport_height);
        if range.is_empty() {
            return range;
        }
        let overscan = self.options.overscan;
        range.start = range.start.saturating_sub(overscan);
        range.end = cmp::min(self.options.count, range.end.saturating_add(overscan));
        range
    }

    fn compute_visible_range(&self, scroll_offset: u64, viewport_height: u32) -> RowRange {
        let count = self.options.count;
        if count == 0 || viewport_height == 0 {
            return RowRange { start: 0, end: 0 };
        }

        let height = self.options.row_height as u64;
        let view = viewport_height as u64;
        let total = (count as u64).saturating_mul(height);

        let max_scroll = total.saturating_sub(view);
        let scroll_offset = scroll_offset.min(max_scroll);
        let scroll_end = scroll_offset.saturating_add(view);

        // The last visible pixel decides the end index, so a row that only partially enters the
        // viewport is still included.
        let last_visible = scroll_end.saturating_sub(1);
        let start = ((scroll_offset / height) as usize).min(count);
        let end = ((last_visible / height) as usize + 1).min(count);

        RowRange { start, end }
    }
}
