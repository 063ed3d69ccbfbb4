// Example: minimal usage and scroll-to helper.
use windowlist::{Align, ListWindow, ListWindowOptions, render_window};

fn main() {
    let items: Vec<String> = (0..100_000).map(|i| format!("row {i}")).collect();

    let mut w = ListWindow::new(ListWindowOptions::new(items.len(), 24, 480).with_overscan(5))
        .expect("valid geometry");
    w.set_scroll_offset(123_456);

    println!("total_height={}", w.total_height());
    println!("visible_range={:?}", w.visible_range());
    println!("window_range={:?}", w.window_range());

    let fragment = render_window(&w, &items, &|item: &String, index: usize| {
        format!("[{index}] {item}")
    });
    println!(
        "rendered {} rows, translate={}px, spacer={}px",
        fragment.rows.len(),
        fragment.translate,
        fragment.spacer_height
    );
    println!("first_rendered={:?}", fragment.rows.first());

    let off = w.scroll_to_index_offset(items.len() - 1, Align::End);
    w.set_scroll_offset_clamped(off);
    println!("after scroll_to_index: offset={}", w.scroll_offset());
}
