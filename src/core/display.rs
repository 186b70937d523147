//! Display traits - per-session text overlays
//!
//! The host owns the rendering surface. The HUD attaches a `TextSource` to a
//! session and receives an opaque handle that is used to detach it later.
//! The host calls `current_text` whenever it refreshes the overlay.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::traits::SessionId;

// =============================================================================
// TYPES
// =============================================================================

/// Opaque overlay handle returned by the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

impl fmt::Display for OverlayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Horizontal alignment of an overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

/// How often the host refreshes an overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SyncSpeed {
    Fastest,
    Fast,
    #[default]
    Normal,
    Slow,
    Slowest,
    /// Rendered once, never refreshed
    UnSync,
}

/// Where and how an overlay is drawn
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayLayout {
    pub x: f32,
    pub y: f32,
    pub font_size: u32,
    pub alignment: Alignment,
    pub sync_speed: SyncSpeed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DisplayError {
    #[error("display for session {0} is not available")]
    Unavailable(SessionId),
    #[error("overlay rejected: {0}")]
    Rejected(String),
    #[error("unknown overlay {0}")]
    UnknownHandle(OverlayHandle),
}

// =============================================================================
// TRAITS
// =============================================================================

/// Produces the text of one overlay on demand
pub trait TextSource: Send + Sync {
    fn current_text(&self) -> String;
}

/// Per-session overlay surface provided by the host
pub trait OverlayDisplay: Send + Sync {
    /// Attach an overlay to a session's screen
    fn add_overlay(
        &self,
        session: SessionId,
        layout: &OverlayLayout,
        source: Arc<dyn TextSource>,
    ) -> Result<OverlayHandle, DisplayError>;

    /// Detach a previously added overlay
    fn remove_overlay(&self, session: SessionId, handle: OverlayHandle) -> Result<(), DisplayError>;
}

// =============================================================================
// TEST MOCKS
// =============================================================================

#[cfg(test)]
pub mod mocks {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// One overlay currently attached to the mock display
    pub struct LiveOverlay {
        pub session: SessionId,
        pub layout: OverlayLayout,
        pub source: Arc<dyn TextSource>,
    }

    /// Mock display that records every overlay it hands out
    #[derive(Default)]
    pub struct MockDisplay {
        next_handle: Mutex<u64>,
        pub live: Mutex<HashMap<OverlayHandle, LiveOverlay>>,
        /// How many times each handle was removed
        pub removals: Mutex<HashMap<OverlayHandle, usize>>,
        pub adds: AtomicUsize,
        /// Fail every add once this many adds have succeeded
        pub fail_after: Option<usize>,
        pub fail_removals: bool,
    }

    impl MockDisplay {
        pub fn new() -> Self {
            Self::default()
        }

        /// Display that rejects every add after `n` successful ones
        pub fn failing_after(n: usize) -> Self {
            Self {
                fail_after: Some(n),
                ..Default::default()
            }
        }

        /// Display whose removals always fail
        pub fn failing_removals() -> Self {
            Self {
                fail_removals: true,
                ..Default::default()
            }
        }

        pub fn live_count(&self) -> usize {
            self.live.lock().len()
        }

        pub fn live_for(&self, session: SessionId) -> usize {
            self.live
                .lock()
                .values()
                .filter(|o| o.session == session)
                .count()
        }

        pub fn removal_count(&self, handle: OverlayHandle) -> usize {
            self.removals.lock().get(&handle).copied().unwrap_or(0)
        }

        /// Ask every live overlay of a session for its text, in handle order
        pub fn texts_for(&self, session: SessionId) -> Vec<String> {
            let live = self.live.lock();
            let mut handles: Vec<_> = live
                .iter()
                .filter(|(_, o)| o.session == session)
                .map(|(h, _)| *h)
                .collect();
            handles.sort_by_key(|h| h.0);
            handles
                .iter()
                .map(|h| live[h].source.current_text())
                .collect()
        }
    }

    impl OverlayDisplay for MockDisplay {
        fn add_overlay(
            &self,
            session: SessionId,
            layout: &OverlayLayout,
            source: Arc<dyn TextSource>,
        ) -> Result<OverlayHandle, DisplayError> {
            if let Some(limit) = self.fail_after {
                if self.adds.load(Ordering::SeqCst) >= limit {
                    return Err(DisplayError::Rejected("mock limit reached".to_string()));
                }
            }
            self.adds.fetch_add(1, Ordering::SeqCst);

            let handle = {
                let mut next = self.next_handle.lock();
                *next += 1;
                OverlayHandle(*next)
            };
            self.live.lock().insert(
                handle,
                LiveOverlay {
                    session,
                    layout: *layout,
                    source,
                },
            );
            Ok(handle)
        }

        fn remove_overlay(
            &self,
            _session: SessionId,
            handle: OverlayHandle,
        ) -> Result<(), DisplayError> {
            *self.removals.lock().entry(handle).or_insert(0) += 1;
            if self.fail_removals {
                return Err(DisplayError::Rejected("mock removal failure".to_string()));
            }
            self.live
                .lock()
                .remove(&handle)
                .map(|_| ())
                .ok_or(DisplayError::UnknownHandle(handle))
        }
    }
}
