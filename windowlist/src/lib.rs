//! A headless windowed-list engine for fixed-height rows.
//!
//! Given a row count, a fixed per-row height, and a viewport height, this crate computes which
//! contiguous subrange of rows intersects the current scroll viewport (plus a configurable
//! overscan margin), along with the geometry needed to keep native scrollbar size/position
//! correct: a spacer of the full list height and a vertical translation for the rendered block.
//!
//! It is UI-agnostic. A UI layer is expected to provide:
//! - the viewport height
//! - scroll offsets as scroll events arrive
//! - a [`RowRenderer`] that turns an item into a UI fragment
//!
//! Rendered node count is bounded by the viewport, independent of the row count. For
//! incremental-loading helpers (load-more triggering, trailing indicators), see the
//! `windowlist-loader` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod options;
mod render;
mod state;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use options::{InitialOffset, ListWindowOptions, OnChangeCallback};
pub use render::{RowRenderer, WindowFragment, render_window};
pub use state::{FrameState, ScrollState, ViewportState};
pub use types::{Align, RowRange, ScrollDirection, WindowRow};
pub use window::ListWindow;
