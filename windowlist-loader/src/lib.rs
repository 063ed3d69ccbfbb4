//! Incremental-loading utilities for the `windowlist` crate.
//!
//! The `windowlist` crate is UI-agnostic and focuses on windowed rendering. This crate provides
//! the companion pattern for growing lists: watching scroll proximity to the bottom of a
//! scrollable region and asking the caller for more data, plus the trailing loading /
//! end-of-list indicator states.
//!
//! The loader owns no pagination state of its own: `loading` and `has_more` stay with the
//! caller, and the fetch itself is fire-and-forget from the loader's perspective.
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui/DOM bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod indicator;
mod loader;


pub use indicator::{ListFragment, TrailingIndicator, render_list, trailing_indicator};
pub use loader::{
    IncrementalLoader, LoadMoreCallback, LoadState, LoaderOptions, ScrollMetrics, TriggerPolicy,
};
