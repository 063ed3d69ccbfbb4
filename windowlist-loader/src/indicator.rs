use alloc::vec::Vec;

use windowlist::RowRenderer;

use crate::LoadState;

/// Trailing fragment state rendered after the last real item.
///
/// The two states are mutually exclusive: `Loading` wins whenever a fetch is in flight,
/// `EndOfList` only appears for a non-empty, exhausted list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrailingIndicator {
    Loading,
    EndOfList,
}

/// Selects the trailing indicator for the current pagination state.
///
/// Returns `None` when nothing should render (idle with more data upstream, or an empty
/// exhausted list).
pub fn trailing_indicator(state: LoadState, is_empty: bool) -> Option<TrailingIndicator> {
    if state.loading {
        return Some(TrailingIndicator::Loading);
    }
    if !state.has_more && !is_empty {
        return Some(TrailingIndicator::EndOfList);
    }
    None
}

/// The output of a full-list render pass: one fragment per item (no windowing), plus the
/// trailing indicator fragment when one applies.
#[derive(Clone, Debug)]
pub struct ListFragment<F> {
    /// Fragments for every item, in index order.
    pub rows: Vec<F>,
    /// Which trailing state applied, if any.
    pub indicator: Option<TrailingIndicator>,
    /// The rendered trailing fragment for `indicator`.
    pub trailing: Option<F>,
}

/// Renders `items` in full through `renderer` and appends the trailing indicator.
///
/// `render_indicator` is the caller's override point for the loading spinner / end-of-list
/// fragments; it is only invoked when an indicator applies. Renderer panics propagate to the
/// caller.
pub fn render_list<T, R: RowRenderer<T>>(
    items: &[T],
    renderer: &R,
    state: LoadState,
    render_indicator: impl FnOnce(TrailingIndicator) -> R::Fragment,
) -> ListFragment<R::Fragment> {
    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        rows.push(renderer.render(item, index));
    }

    let indicator = trailing_indicator(state, items.is_empty());
    let trailing = indicator.map(render_indicator);

    ListFragment {
        rows,
        indicator,
        trailing,
    }
}
