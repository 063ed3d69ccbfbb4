use alloc::sync::Arc;

/// Geometry of a scroll container at the time of a scroll notification.
///
/// Matches the usual scroll-element measurements: `scroll_top` is the current offset,
/// `scroll_height` the full content height, `client_height` the visible height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics {
    pub scroll_top: u64,
    pub scroll_height: u64,
    pub client_height: u32,
}

impl ScrollMetrics {
    /// Distance in pixels from the bottom edge of the viewport to the bottom edge of the
    /// scrollable content.
    pub fn remaining(&self) -> u64 {
        self.scroll_height
            .saturating_sub(self.scroll_top)
            .saturating_sub(self.client_height as u64)
    }
}

/// Caller-owned pagination state, read (never mutated) by the loader on each notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadState {
    /// True while a fetch is in flight.
    pub loading: bool,
    /// True if the caller believes additional items exist upstream.
    pub has_more: bool,
}

/// How the loader behaves while a triggered fetch has not yet flipped the caller's `loading`
/// flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerPolicy {
    /// Every qualifying scroll event fires `on_load_more`. The caller's `loading` flag is the
    /// only suppression, so a caller that is slow to flip it can observe repeated calls.
    #[default]
    Permissive,
    /// The loader owns a transient in-flight flag, set synchronously when it fires and cleared
    /// by [`IncrementalLoader::load_complete`]. At most one call per in-flight window.
    Deduplicated,
}

/// Fired when the scroll position crosses the trigger threshold. Fire-and-forget: the loader
/// never awaits it and cannot observe its failure.
pub type LoadMoreCallback = Arc<dyn Fn() + Send + Sync>;

/// Configuration for [`IncrementalLoader`].
#[derive(Clone)]
pub struct LoaderOptions {
    /// Trigger when `remaining() < threshold`. Zero disables triggering entirely.
    pub threshold: u32,
    pub policy: TriggerPolicy,
    pub on_load_more: Option<LoadMoreCallback>,
}

impl LoaderOptions {
    pub fn new() -> Self {
        Self {
            threshold: 200,
            policy: TriggerPolicy::default(),
            on_load_more: None,
        }
    }

    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_policy(mut self, policy: TriggerPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_on_load_more(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_load_more = Some(Arc::new(f));
        self
    }
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for LoaderOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoaderOptions")
            .field("threshold", &self.threshold)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Observes scroll proximity to the end of a list and requests more data from the caller.
///
/// The loader keeps no pagination bookkeeping: it reads the caller's [`LoadState`] on every
/// notification and decides whether to invoke `on_load_more`. With
/// [`TriggerPolicy::Deduplicated`] it additionally guards against re-entrant triggering while a
/// fetch is in flight, since a caller that flips `loading` asynchronously can otherwise see a
/// storm of calls from rapid scroll events.
#[derive(Clone, Debug)]
pub struct IncrementalLoader {
    options: LoaderOptions,
    in_flight: bool,
}

impl IncrementalLoader {
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            options,
            in_flight: false,
        }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    pub fn set_threshold(&mut self, threshold: u32) {
        self.options.threshold = threshold;
    }

    pub fn set_policy(&mut self, policy: TriggerPolicy) {
        self.options.policy = policy;
    }

    pub fn set_on_load_more(&mut self, f: impl Fn() + Send + Sync + 'static) {
        self.options.on_load_more = Some(Arc::new(f));
    }

    /// True while a deduplicated trigger is awaiting [`Self::load_complete`].
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Returns whether a scroll notification with these metrics and caller state would fire.
    pub fn should_trigger(&self, metrics: ScrollMetrics, state: LoadState) -> bool {
        if state.loading || !state.has_more {
            return false;
        }
        if self.options.policy == TriggerPolicy::Deduplicated && self.in_flight {
            return false;
        }
        metrics.remaining() < self.options.threshold as u64
    }

    /// Handles a scroll notification, invoking `on_load_more` when the threshold is crossed.
    ///
    /// Returns `true` when the callback fired.
    pub fn handle_scroll(&mut self, metrics: ScrollMetrics, state: LoadState) -> bool {
        if !self.should_trigger(metrics, state) {
            return false;
        }
        if self.options.policy == TriggerPolicy::Deduplicated {
            self.in_flight = true;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "windowlist_loader",
            remaining = metrics.remaining(),
            threshold = self.options.threshold,
            "load_more triggered"
        );
        if let Some(cb) = &self.options.on_load_more {
            cb();
        }
        true
    }

    /// Signals that the in-flight fetch finished (successfully or not), re-arming a
    /// [`TriggerPolicy::Deduplicated`] loader.
    pub fn load_complete(&mut self) {
        self.in_flight = false;
    }
}

impl Default for IncrementalLoader {
    fn default() -> Self {
        Self::new(LoaderOptions::new())
    }
}
