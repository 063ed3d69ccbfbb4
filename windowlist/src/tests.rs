use crate::*;

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

/// Brute-force reference: every row whose pixel interval overlaps the (clamped) viewport.
fn expected_visible_range(
    count: usize,
    row_height: u32,
    viewport_height: u32,
    scroll_offset: u64,
) -> RowRange {
    if count == 0 || viewport_height == 0 {
        return RowRange { start: 0, end: 0 };
    }
    let h = row_height as u64;
    let view = viewport_height as u64;
    let total = count as u64 * h;
    let offset = scroll_offset.min(total.saturating_sub(view));
    let view_end = offset + view;

    let mut start = count;
    let mut end = 0;
    for i in 0..count {
        let top = i as u64 * h;
        let bottom = top + h;
        if top < view_end && bottom > offset {
            start = start.min(i);
            end = end.max(i + 1);
        }
    }
    if start >= end {
        return RowRange { start: 0, end: 0 };
    }
    RowRange { start, end }
}

fn window(count: usize, row_height: u32, viewport_height: u32) -> ListWindow {
    ListWindow::new(ListWindowOptions::new(count, row_height, viewport_height)).unwrap()
}

#[test]
fn zero_row_height_is_rejected() {
    let err = ListWindow::new(ListWindowOptions::new(10, 0, 100)).unwrap_err();
    assert_eq!(err, ConfigError::ZeroRowHeight);

    let mut w = window(10, 1, 100);
    assert_eq!(
        w.update_options(|o| o.row_height = 0),
        Err(ConfigError::ZeroRowHeight)
    );
    // The failed update must not have been applied.
    assert_eq!(w.row_height(), 1);
}

#[test]
fn spec_scenario_fixed_rows() {
    // row_height=50, viewport=500, overscan=2, count=1000, scroll=2000.
    let mut w = ListWindow::new(ListWindowOptions::new(1000, 50, 500).with_overscan(2)).unwrap();
    w.set_scroll_offset(2000);

    assert_eq!(w.visible_range(), RowRange { start: 40, end: 50 });
    assert_eq!(w.window_range(), RowRange { start: 38, end: 52 });
    assert_eq!(w.window_range().len(), 14);
    assert_eq!(w.total_height(), 50_000);
    assert_eq!(w.translate_offset(), 1900);
}

#[test]
fn misaligned_offset_includes_partially_visible_rows() {
    let mut w = ListWindow::new(ListWindowOptions::new(1000, 50, 500).with_overscan(0)).unwrap();
    w.set_scroll_offset(2025);

    // Viewport covers [2025, 2525): row 40 ([2000, 2050)) and row 50 ([2500, 2550)) both
    // partially intersect and must be included.
    assert_eq!(w.visible_range(), RowRange { start: 40, end: 51 });
}

#[test]
fn empty_list_has_empty_range_and_zero_spacer() {
    let w = window(0, 50, 500);
    assert!(w.visible_range().is_empty());
    assert!(w.window_range().is_empty());
    assert_eq!(w.total_height(), 0);
    assert_eq!(w.row_at_offset(0), None);

    let fragment = render_window(&w, &[] as &[u32], &|_: &u32, i: usize| i);
    assert!(fragment.rows.is_empty());
    assert_eq!(fragment.spacer_height, 0);
    assert_eq!(fragment.translate, 0);
}

#[test]
fn row_taller_than_viewport_yields_single_visible_row() {
    let mut w = ListWindow::new(ListWindowOptions::new(100, 100, 50).with_overscan(3)).unwrap();
    w.set_scroll_offset(425);

    // Offset 425 sits inside row 4 ([400, 500)); the viewport ends at 475, still inside it.
    assert_eq!(w.visible_range(), RowRange { start: 4, end: 5 });
    assert_eq!(w.window_range(), RowRange { start: 1, end: 8 });
}

#[test]
fn short_list_window_is_clamped_to_count() {
    let w = window(3, 50, 500);
    assert_eq!(w.visible_range(), RowRange { start: 0, end: 3 });
    assert_eq!(w.window_range(), RowRange { start: 0, end: 3 });
}

#[test]
fn coverage_and_boundedness_hold_for_random_geometry() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..200 {
        let count = rng.gen_range_usize(0, 500);
        let row_height = rng.gen_range_u32(1, 120);
        let viewport_height = rng.gen_range_u32(0, 800);
        let overscan = rng.gen_range_usize(0, 8);

        let w = ListWindow::new(
            ListWindowOptions::new(count, row_height, viewport_height).with_overscan(overscan),
        )
        .unwrap();

        let total = count as u64 * row_height as u64;
        for _ in 0..20 {
            let offset = rng.gen_range_u64(0, total.max(1) * 2);
            let visible = w.visible_range_for(offset, viewport_height);
            let expected = expected_visible_range(count, row_height, viewport_height, offset);
            assert_eq!(
                visible, expected,
                "count={count} h={row_height} view={viewport_height} offset={offset}"
            );

            // Boundedness: at most ceil(view/h) + 1 visible rows, plus overscan on both edges.
            let rendered = w.window_range_for(offset, viewport_height).len();
            let max_visible = (viewport_height as usize).div_ceil(row_height as usize) + 1;
            assert!(rendered <= max_visible + 2 * overscan);
        }
    }
}

#[test]
fn range_is_monotonic_in_scroll_offset() {
    let mut rng = Lcg::new(42);
    for _ in 0..50 {
        let count = rng.gen_range_usize(1, 300);
        let row_height = rng.gen_range_u32(1, 80);
        let viewport_height = rng.gen_range_u32(1, 400);
        let w = ListWindow::new(
            ListWindowOptions::new(count, row_height, viewport_height)
                .with_overscan(rng.gen_range_usize(0, 6)),
        )
        .unwrap();

        let mut offset = 0u64;
        let mut prev = w.window_range_for(0, viewport_height);
        let max = w.max_scroll_offset();
        while offset < max {
            offset += rng.gen_range_u64(1, (row_height as u64) * 3);
            let next = w.window_range_for(offset, viewport_height);
            assert!(next.start >= prev.start, "start regressed at offset {offset}");
            assert!(next.end >= prev.end, "end regressed at offset {offset}");
            prev = next;
        }
    }
}

#[test]
fn render_window_produces_translated_block() {
    let items: Vec<String> = (0..1000).map(|i| format!("row {i}")).collect();
    let mut w = ListWindow::new(ListWindowOptions::new(1000, 50, 500).with_overscan(2)).unwrap();
    w.set_scroll_offset(2000);

    let fragment = render_window(&w, &items, &|item: &String, index: usize| {
        format!("{index}:{item}")
    });

    assert_eq!(fragment.start, 38);
    assert_eq!(fragment.rows.len(), 14);
    assert_eq!(fragment.rows[0], "38:row 38");
    assert_eq!(fragment.rows[13], "51:row 51");
    assert_eq!(fragment.spacer_height, 50_000);
    assert_eq!(fragment.translate, 1900);
    assert_eq!(fragment.row_height, 50);
    assert_eq!(fragment.range(), RowRange { start: 38, end: 52 });
}

#[test]
#[should_panic(expected = "renderer exploded")]
fn renderer_panics_propagate_to_the_caller() {
    let items: Vec<u32> = (0..10).collect();
    let w = window(10, 10, 50);
    let _ = render_window(&w, &items, &|_: &u32, _| -> u32 {
        panic!("renderer exploded")
    });
}

#[test]
fn for_each_window_row_reports_absolute_positions() {
    let mut w = ListWindow::new(ListWindowOptions::new(100, 20, 60).with_overscan(1)).unwrap();
    w.set_scroll_offset(200);

    let mut rows = Vec::new();
    w.collect_window_rows(&mut rows);
    // Visible [10, 13), overscan 1 => [9, 14).
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].index, 9);
    assert_eq!(rows[0].top, 180);
    assert_eq!(rows[0].height, 20);
    assert_eq!(rows[4].bottom(), 14 * 20);
}

#[test]
fn scroll_offsets_are_clamped_against_total_height() {
    let mut w = window(100, 10, 300);
    assert_eq!(w.max_scroll_offset(), 700);

    w.set_scroll_offset_clamped(5000);
    assert_eq!(w.scroll_offset(), 700);
    assert_eq!(w.visible_range(), RowRange { start: 70, end: 100 });
}

#[test]
fn scroll_to_index_alignments() {
    let mut w = window(100, 10, 50);

    assert_eq!(w.scroll_to_index_offset(30, Align::Start), 300);
    assert_eq!(w.scroll_to_index_offset(30, Align::End), 260);
    assert_eq!(w.scroll_to_index_offset(30, Align::Center), 280);

    // Auto keeps the current offset when the row is already fully visible.
    w.set_scroll_offset(300);
    assert_eq!(w.scroll_to_index_offset(32, Align::Auto), 300);
    assert_eq!(
        w.scroll_to_index_offset(99, Align::Auto),
        w.max_scroll_offset()
    );

    // Out-of-range indexes clamp to the last row.
    assert_eq!(
        w.scroll_to_index_offset(500, Align::Start),
        w.scroll_to_index_offset(99, Align::Start)
    );
}

#[test]
fn scroll_direction_tracks_offset_changes() {
    let mut w = window(100, 10, 50);
    assert_eq!(w.scroll_direction(), None);

    w.set_scroll_offset(100);
    assert_eq!(w.scroll_direction(), Some(ScrollDirection::Forward));

    w.set_scroll_offset(40);
    assert_eq!(w.scroll_direction(), Some(ScrollDirection::Backward));
}

#[test]
fn is_scrolling_debounces_after_last_event() {
    let mut w = ListWindow::new(
        ListWindowOptions::new(100, 10, 50).with_is_scrolling_reset_delay_ms(100),
    )
    .unwrap();

    w.apply_scroll_offset_event(30, 0);
    assert!(w.is_scrolling());

    w.update_scrolling(50);
    assert!(w.is_scrolling());

    w.apply_scroll_offset_event(60, 80);
    w.update_scrolling(150);
    assert!(w.is_scrolling()); // 70ms since last event, under the delay

    w.update_scrolling(180);
    assert!(!w.is_scrolling());
    assert_eq!(w.scroll_direction(), None);
}

#[test]
fn batch_update_coalesces_notifications() {
    let notifications = Arc::new(AtomicUsize::new(0));
    let mut w = window(100, 10, 50);
    w.set_on_change(Some({
        let notifications = Arc::clone(&notifications);
        move |_: &ListWindow, _| {
            notifications.fetch_add(1, Ordering::Relaxed);
        }
    }));

    let before = notifications.load(Ordering::Relaxed);
    w.batch_update(|w| {
        w.set_viewport_height(60);
        w.set_scroll_offset(100);
        w.notify_scroll_event(0);
    });
    assert_eq!(notifications.load(Ordering::Relaxed), before + 1);
}

#[test]
fn initial_offset_provider_is_resolved_on_construction() {
    static SAVED: AtomicU64 = AtomicU64::new(0);
    SAVED.store(230, Ordering::Relaxed);

    let w = ListWindow::new(
        ListWindowOptions::new(100, 10, 50)
            .with_initial_offset_provider(|| SAVED.load(Ordering::Relaxed)),
    )
    .unwrap();
    assert_eq!(w.scroll_offset(), 230);
}

#[test]
fn disabled_window_is_empty_and_side_effect_free() {
    let mut w =
        ListWindow::new(ListWindowOptions::new(100, 10, 50).with_enabled(false)).unwrap();

    assert_eq!(w.total_height(), 0);
    assert!(w.visible_range().is_empty());
    assert!(w.window_range().is_empty());
    assert_eq!(w.row_at_offset(0), None);

    // Setters should not panic and should keep returning empty results.
    w.set_viewport_and_scroll_clamped(10, 5);
    assert!(w.window_range().is_empty());

    w.set_enabled(true);
    assert_eq!(w.total_height(), 1000);
}

#[test]
fn frame_state_snapshot_round_trips() {
    let mut w = window(100, 10, 300);
    w.apply_scroll_frame_clamped(300, 250, 0);
    w.update_scrolling(1000);
    let frame = w.frame_state();
    assert_eq!(frame.scroll.offset, 250);
    assert!(!frame.scroll.is_scrolling);

    let mut restored = window(100, 10, 50);
    restored.restore_frame_state(frame, 0);
    assert_eq!(restored.viewport_height(), 300);
    assert_eq!(restored.scroll_offset(), 250);
    assert!(!restored.is_scrolling());
    assert_eq!(restored.window_range(), w.window_range());
}

#[test]
fn row_at_offset_maps_pixels_to_indexes() {
    let w = window(10, 50, 200);
    assert_eq!(w.row_at_offset(0), Some(0));
    assert_eq!(w.row_at_offset(49), Some(0));
    assert_eq!(w.row_at_offset(50), Some(1));
    assert_eq!(w.row_at_offset(10_000), Some(9)); // clamped to the last row
}
