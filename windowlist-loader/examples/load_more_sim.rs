// Example: simulate a paged list that loads more items as the user nears the bottom.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use windowlist_loader::{
    IncrementalLoader, LoadState, LoaderOptions, ScrollMetrics, TriggerPolicy, render_list,
    trailing_indicator,
};

const PAGE_SIZE: usize = 20;
const TOTAL_UPSTREAM: usize = 65;
const ROW_HEIGHT: u64 = 30;

fn main() {
    let requested = Arc::new(AtomicBool::new(false));
    let mut loader = IncrementalLoader::new(
        LoaderOptions::new()
            .with_policy(TriggerPolicy::Deduplicated)
            .with_on_load_more({
                let requested = Arc::clone(&requested);
                move || requested.store(true, Ordering::Relaxed)
            }),
    );

    let mut items: Vec<String> = (0..PAGE_SIZE).map(|i| format!("entry {i}")).collect();
    let mut state = LoadState {
        loading: false,
        has_more: true,
    };

    // Simulate the user scrolling towards the bottom in steps.
    let mut scroll_top = 0u64;
    for step in 0..40 {
        scroll_top += 120;
        let metrics = ScrollMetrics {
            scroll_top,
            scroll_height: items.len() as u64 * ROW_HEIGHT,
            client_height: 400,
        };

        if loader.handle_scroll(metrics, state) {
            println!(
                "step {step}: remaining={}px -> load more requested",
                metrics.remaining()
            );
            state.loading = true;
        }

        // Pretend the fetch resolves one step later.
        if requested.swap(false, Ordering::Relaxed) {
            let next = (items.len()..TOTAL_UPSTREAM.min(items.len() + PAGE_SIZE))
                .map(|i| format!("entry {i}"))
                .collect::<Vec<_>>();
            items.extend(next);
            state.loading = false;
            state.has_more = items.len() < TOTAL_UPSTREAM;
            loader.load_complete();
            println!(
                "          fetched a page: {} items, has_more={}",
                items.len(),
                state.has_more
            );
        }

        if !state.has_more {
            break;
        }
    }

    println!(
        "trailing indicator: {:?}",
        trailing_indicator(state, items.is_empty())
    );

    let fragment = render_list(
        &items,
        &|item: &String, index: usize| format!("[{index}] {item}"),
        state,
        |indicator| format!("-- {indicator:?} --"),
    );
    println!(
        "rendered {} rows, trailing={:?}",
        fragment.rows.len(),
        fragment.trailing
    );
}
