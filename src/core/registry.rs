//! Overlay registry
//!
//! Tracks which sessions currently have HUD overlays and the display handles
//! backing them. Each session is either absent or active with one handle per
//! enabled label.
//!
//! Every mutation goes through one registry lock. Bulk removal drains the
//! entries under the lock and talks to the display after releasing it.
//! Rendering never takes this lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use super::config_source::ConfigSource;
use super::display::{DisplayError, OverlayDisplay, OverlayHandle};
use super::label::{HudContext, LabelRenderer, LabelSpec};
use super::traits::SessionId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("overlay registry has been disposed")]
    Disposed,
    #[error(transparent)]
    Display(#[from] DisplayError),
}

#[derive(Default)]
struct RegistryState {
    /// Handles per active session, in label priority order
    entries: HashMap<SessionId, Vec<OverlayHandle>>,
    disposed: bool,
}

pub struct OverlayRegistry {
    /// Enabled labels only, in priority order
    labels: Vec<LabelSpec>,
    ctx: HudContext,
    display: Arc<dyn OverlayDisplay>,
    config: Arc<dyn ConfigSource>,
    state: Mutex<RegistryState>,
}

impl OverlayRegistry {
    /// Create a registry for `labels`; disabled labels are dropped here
    pub fn new(
        labels: impl IntoIterator<Item = LabelSpec>,
        ctx: HudContext,
        display: Arc<dyn OverlayDisplay>,
        config: Arc<dyn ConfigSource>,
    ) -> Self {
        Self {
            labels: labels.into_iter().filter(|l| l.enabled).collect(),
            ctx,
            display,
            config,
            state: Mutex::new(RegistryState::default()),
        }
    }

    /// Whether at least one label is enabled
    pub fn has_labels(&self) -> bool {
        !self.labels.is_empty()
    }

    pub fn context(&self) -> &HudContext {
        &self.ctx
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Clear every session, then reload rules and role colors
    pub fn start(&self) -> Result<(), RegistryError> {
        if self.state.lock().disposed {
            return Err(RegistryError::Disposed);
        }

        let cleared = self.stop_all();
        if cleared > 0 {
            debug!(cleared, "[HUD] Cleared stale overlays on start");
        }

        self.ctx.assets.reload(self.config.as_ref(), Instant::now());
        info!(labels = self.labels.len(), "[HUD] HUD started");
        Ok(())
    }

    /// Attach every enabled label to `session`
    ///
    /// Returns `Ok(false)` if the session is already active or no label is
    /// enabled. If the display refuses one overlay, the overlays created for
    /// this session so far are removed again and nothing is recorded.
    pub fn add_session(&self, session: SessionId) -> Result<bool, RegistryError> {
        let mut state = self.state.lock();
        if state.disposed {
            return Err(RegistryError::Disposed);
        }
        if state.entries.contains_key(&session) || self.labels.is_empty() {
            return Ok(false);
        }

        let mut handles = Vec::with_capacity(self.labels.len());
        for spec in &self.labels {
            let renderer = Arc::new(LabelRenderer::new(session, spec.clone(), self.ctx.clone()));
            match self.display.add_overlay(session, &spec.layout(), renderer) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    drop(state);
                    error!(
                        session = %session,
                        created = handles.len(),
                        error = %e,
                        "[HUD] Failed to create overlay, rolling back"
                    );
                    self.remove_handles(session, &handles);
                    return Err(e.into());
                }
            }
        }

        debug!(session = %session, overlays = handles.len(), "[HUD] Session added");
        state.entries.insert(session, handles);
        Ok(true)
    }

    /// Detach all overlays of `session`. Returns whether it was active.
    pub fn remove_session(&self, session: SessionId) -> bool {
        let Some(handles) = self.state.lock().entries.remove(&session) else {
            return false;
        };

        self.remove_handles(session, &handles);
        debug!(session = %session, "[HUD] Session removed");
        true
    }

    /// Detach every session. Returns how many were active.
    pub fn stop_all(&self) -> usize {
        let drained: Vec<_> = self.state.lock().entries.drain().collect();
        self.remove_entries(drained)
    }

    /// Detach everything and refuse further use. Safe to call repeatedly.
    pub fn dispose(&self) {
        let drained: Vec<_> = {
            let mut state = self.state.lock();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.entries.drain().collect()
        };

        let cleared = self.remove_entries(drained);
        info!(cleared, "[HUD] Registry disposed");
    }

    // =========================================================================
    // INTROSPECTION
    // =========================================================================

    pub fn is_disposed(&self) -> bool {
        self.state.lock().disposed
    }

    pub fn is_active(&self, session: SessionId) -> bool {
        self.state.lock().entries.contains_key(&session)
    }

    /// Active sessions, sorted by id
    pub fn active_sessions(&self) -> Vec<SessionId> {
        let mut sessions: Vec<_> = self.state.lock().entries.keys().copied().collect();
        sessions.sort();
        sessions
    }

    /// Total number of recorded overlay handles
    pub fn overlay_count(&self) -> usize {
        self.state.lock().entries.values().map(Vec::len).sum()
    }

    // =========================================================================
    // DISPLAY CALLS (never under the registry lock)
    // =========================================================================

    fn remove_entries(&self, mut entries: Vec<(SessionId, Vec<OverlayHandle>)>) -> usize {
        entries.sort_by_key(|(session, _)| *session);
        for (session, handles) in &entries {
            self.remove_handles(*session, handles);
        }
        entries.len()
    }

    fn remove_handles(&self, session: SessionId, handles: &[OverlayHandle]) {
        for handle in handles {
            if let Err(e) = self.display.remove_overlay(session, *handle) {
                warn!(
                    session = %session,
                    handle = %handle,
                    error = %e,
                    "[HUD] Failed to remove overlay"
                );
            }
        }
    }
}

impl Drop for OverlayRegistry {
    fn drop(&mut self) {
        self.dispose();
    }
}
