use alloc::vec::Vec;

use crate::{ListWindow, RowRange};

/// Strategy interface for turning a row's item into a UI fragment.
///
/// The fragment type is adapter-defined (a widget, a DOM node handle, a draw command list).
/// Implementations must be pure with respect to the engine: side effects observable outside the
/// returned fragment belong in the adapter, not here.
///
/// Any closure `Fn(&T, usize) -> F` is a `RowRenderer` via the blanket impl.
pub trait RowRenderer<T> {
    type Fragment;

    fn render(&self, item: &T, index: usize) -> Self::Fragment;
}

impl<T, F, Frag> RowRenderer<T> for F
where
    F: Fn(&T, usize) -> Frag,
{
    type Fragment = Frag;

    fn render(&self, item: &T, index: usize) -> Frag {
        self(item, index)
    }
}

/// The output of a window render pass: fragments for the rows in the window, plus the geometry
/// an adapter needs to mount them with correct scrollbar behavior.
#[derive(Clone, Debug)]
pub struct WindowFragment<F> {
    /// Total height of the outer spacer (`count * row_height`).
    pub spacer_height: u64,
    /// Vertical translation of the rendered block (`start * row_height`).
    pub translate: u64,
    /// Absolute index of the first rendered row.
    pub start: usize,
    /// Fixed height of each rendered row, for the per-row placeholders.
    pub row_height: u32,
    /// Fragments for rows `[start, start + rows.len())`, in index order.
    pub rows: Vec<F>,
}

impl<F> WindowFragment<F> {
    /// The absolute index range covered by `rows`.
    pub fn range(&self) -> RowRange {
        RowRange {
            start: self.start,
            end: self.start.saturating_add(self.rows.len()),
        }
    }
}

/// Renders the current window of `items` through `renderer`.
///
/// Only rows in the window range are rendered; the caller mounts `rows` inside a block of
/// `spacer_height` total height, translated down by `translate`, with each row wrapped in a
/// fixed-height placeholder of `row_height`.
///
/// `items` is borrowed for the pass and never copied. Renderer panics propagate to the caller's
/// rendering boundary rather than being caught here.
pub fn render_window<T, R: RowRenderer<T>>(
    window: &ListWindow,
    items: &[T],
    renderer: &R,
) -> WindowFragment<R::Fragment> {
    debug_assert_eq!(
        items.len(),
        window.count(),
        "items length must match the window's configured count"
    );

    let range = window.window_range();
    let end = range.end.min(items.len());
    let start = range.start.min(end);

    let mut rows = Vec::with_capacity(end - start);
    for (index, item) in items.iter().enumerate().take(end).skip(start) {
        rows.push(renderer.render(item, index));
    }

    let row_height = window.row_height();
    WindowFragment {
        spacer_height: window.total_height(),
        translate: (start as u64).saturating_mul(row_height as u64),
        start,
        row_height,
        rows,
    }
}
