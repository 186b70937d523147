//! Host lifecycle entry points
//!
//! The host calls these four handlers on round and session events. Handlers
//! log failures and never return them to the host.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use super::config::HudConfig;
use crate::core::config_source::ConfigSource;
use crate::core::display::OverlayDisplay;
use crate::core::label::{HudAssets, HudContext};
use crate::core::registry::OverlayRegistry;
use crate::core::traits::{SessionId, StateQuery};

// =============================================================================
// EVENT HANDLERS
// =============================================================================

pub struct HudEventHandlers {
    registry: OverlayRegistry,
    state: Arc<dyn StateQuery>,
}

impl HudEventHandlers {
    pub fn new(registry: OverlayRegistry, state: Arc<dyn StateQuery>) -> Self {
        Self { registry, state }
    }

    pub fn registry(&self) -> &OverlayRegistry {
        &self.registry
    }

    /// Start the HUD and attach every session already in the round
    pub fn on_round_started(&self, sessions: &[SessionId]) {
        if !self.registry.has_labels() {
            debug!("[HUD] No label enabled, ignoring round start");
            return;
        }

        if let Err(e) = self.registry.start() {
            error!(error = %e, "[HUD] Failed to start HUD");
            return;
        }

        let added = sessions
            .iter()
            .filter(|session| self.add(**session))
            .count();
        info!(added, "[HUD] Round started");
    }

    /// Attach a session that spawned mid-round
    pub fn on_session_spawned(&self, session: SessionId) {
        if !self.registry.has_labels() {
            return;
        }

        match self.state.is_round_started() {
            Ok(true) => {
                self.add(session);
            }
            Ok(false) => debug!(session = %session, "[HUD] Round not started, skipping spawn"),
            Err(e) => {
                warn!(
                    session = %session,
                    error = %e,
                    "[HUD] Round state unavailable, skipping spawn"
                )
            }
        }
    }

    pub fn on_round_ended(&self) {
        let cleared = self.registry.stop_all();
        info!(cleared, "[HUD] Round ended");
    }

    pub fn on_session_left(&self, session: SessionId) {
        if self.registry.remove_session(session) {
            debug!(session = %session, "[HUD] Session left");
        }
    }

    fn add(&self, session: SessionId) -> bool {
        match self.registry.add_session(session) {
            Ok(added) => added,
            Err(e) => {
                error!(session = %session, error = %e, "[HUD] Failed to add session");
                false
            }
        }
    }
}

// =============================================================================
// PLUGIN
// =============================================================================

/// Enabled/disabled plugin lifecycle
#[derive(Default)]
pub struct HudPlugin {
    handlers: Option<HudEventHandlers>,
}

impl HudPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the HUD from `config` and its collaborators
    ///
    /// Returns false when the config disables the plugin. Enabling twice
    /// replaces the previous HUD.
    pub fn enable(
        &mut self,
        config: &HudConfig,
        state: Arc<dyn StateQuery>,
        display: Arc<dyn OverlayDisplay>,
        config_source: Arc<dyn ConfigSource>,
    ) -> bool {
        self.disable();

        if !config.enabled {
            info!("[HUD] Plugin disabled by config");
            return false;
        }

        let ctx = HudContext {
            state: state.clone(),
            assets: Arc::new(HudAssets::new(Instant::now())),
            rotation_interval: config.rule_interval(),
        };
        let registry = OverlayRegistry::new(config.labels(), ctx, display, config_source);
        self.handlers = Some(HudEventHandlers::new(registry, state));

        info!(
            any_label = config.any_label_enabled(),
            "[HUD] Plugin enabled"
        );
        true
    }

    /// Tear down every overlay and drop the handlers
    pub fn disable(&mut self) {
        if let Some(handlers) = self.handlers.take() {
            handlers.registry.dispose();
            info!("[HUD] Plugin disabled");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.handlers.is_some()
    }

    pub fn handlers(&self) -> Option<&HudEventHandlers> {
        self.handlers.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config_source::mocks::MemoryConfigSource;
    use crate::core::config_source::ConfigResource;
    use crate::core::display::mocks::MockDisplay;
    use crate::core::roles::RoleId;
    use crate::core::traits::mocks::MockState;
    use crate::core::traits::StateError;

    struct Setup {
        state: Arc<MockState>,
        display: Arc<MockDisplay>,
        config_source: Arc<MemoryConfigSource>,
    }

    impl Setup {
        fn new(state: MockState) -> Self {
            for id in 1..=3 {
                state.add_session(id, &format!("P{}", id), RoleId::ClassD);
            }
            Self {
                state: Arc::new(state),
                display: Arc::new(MockDisplay::new()),
                config_source: Arc::new(MemoryConfigSource::new()),
            }
        }

        fn enable(&self, plugin: &mut HudPlugin, config: &HudConfig) -> bool {
            plugin.enable(
                config,
                self.state.clone(),
                self.display.clone(),
                self.config_source.clone(),
            )
        }
    }

    fn enabled_plugin(setup: &Setup) -> HudPlugin {
        let mut plugin = HudPlugin::new();
        assert!(setup.enable(&mut plugin, &HudConfig::default()));
        plugin
    }

    #[test]
    fn test_round_start_adds_sessions() {
        let setup = Setup::new(MockState::new());
        let plugin = enabled_plugin(&setup);
        let handlers = plugin.handlers().unwrap();

        handlers.on_round_started(&[SessionId(1), SessionId(2)]);
        assert_eq!(
            handlers.registry().active_sessions(),
            vec![SessionId(1), SessionId(2)]
        );
        // Three default labels per session
        assert_eq!(setup.display.live_count(), 6);
        // Defaults are generated on start
        assert_eq!(setup.config_source.write_count(ConfigResource::Rules), 1);
        assert_eq!(setup.config_source.write_count(ConfigResource::RoleColors), 1);
    }

    #[test]
    fn test_round_start_resets_previous_round() {
        let setup = Setup::new(MockState::new());
        let plugin = enabled_plugin(&setup);
        let handlers = plugin.handlers().unwrap();

        handlers.on_round_started(&[SessionId(1), SessionId(2)]);
        handlers.on_round_started(&[SessionId(3)]);
        assert_eq!(handlers.registry().active_sessions(), vec![SessionId(3)]);
        assert_eq!(setup.display.live_count(), 3);
    }

    #[test]
    fn test_spawn_only_during_round() {
        let mut state = MockState::new();
        state.round_started = Ok(false);
        let setup = Setup::new(state);
        let plugin = enabled_plugin(&setup);
        let handlers = plugin.handlers().unwrap();

        handlers.on_session_spawned(SessionId(1));
        assert!(handlers.registry().active_sessions().is_empty());
    }

    #[test]
    fn test_spawn_with_unreadable_round_state() {
        let mut state = MockState::new();
        state.round_started = Err(StateError::NotInitialized("round"));
        let setup = Setup::new(state);
        let plugin = enabled_plugin(&setup);
        let handlers = plugin.handlers().unwrap();

        handlers.on_session_spawned(SessionId(1));
        assert!(handlers.registry().active_sessions().is_empty());
    }

    #[test]
    fn test_spawn_twice_is_idempotent() {
        let setup = Setup::new(MockState::new());
        let plugin = enabled_plugin(&setup);
        let handlers = plugin.handlers().unwrap();

        handlers.on_session_spawned(SessionId(2));
        handlers.on_session_spawned(SessionId(2));
        assert_eq!(handlers.registry().active_sessions(), vec![SessionId(2)]);
        assert_eq!(setup.display.live_count(), 3);
    }

    #[test]
    fn test_session_left_and_round_end() {
        let setup = Setup::new(MockState::new());
        let plugin = enabled_plugin(&setup);
        let handlers = plugin.handlers().unwrap();
        handlers.on_round_started(&[SessionId(1), SessionId(2), SessionId(3)]);

        handlers.on_session_left(SessionId(2));
        assert_eq!(
            handlers.registry().active_sessions(),
            vec![SessionId(1), SessionId(3)]
        );
        // Leaving twice is harmless
        handlers.on_session_left(SessionId(2));

        handlers.on_round_ended();
        assert!(handlers.registry().active_sessions().is_empty());
        assert_eq!(setup.display.live_count(), 0);
    }

    #[test]
    fn test_no_enabled_label_ignores_events() {
        let setup = Setup::new(MockState::new());
        let mut config = HudConfig::default();
        config.standard.enabled = false;
        config.rules.enabled = false;
        config.announcement.enabled = false;

        let mut plugin = HudPlugin::new();
        assert!(setup.enable(&mut plugin, &config));
        let handlers = plugin.handlers().unwrap();

        handlers.on_round_started(&[SessionId(1)]);
        handlers.on_session_spawned(SessionId(2));
        assert!(handlers.registry().active_sessions().is_empty());
        assert_eq!(setup.config_source.write_count(ConfigResource::Rules), 0);
    }

    #[test]
    fn test_disabled_by_config() {
        let setup = Setup::new(MockState::new());
        let config = HudConfig {
            enabled: false,
            ..Default::default()
        };
        let mut plugin = HudPlugin::new();
        assert!(!setup.enable(&mut plugin, &config));
        assert!(!plugin.is_enabled());
        assert!(plugin.handlers().is_none());
    }

    #[test]
    fn test_disable_removes_overlays() {
        let setup = Setup::new(MockState::new());
        let mut plugin = enabled_plugin(&setup);
        plugin
            .handlers()
            .unwrap()
            .on_round_started(&[SessionId(1), SessionId(2)]);

        plugin.disable();
        assert!(!plugin.is_enabled());
        assert_eq!(setup.display.live_count(), 0);
        plugin.disable();
    }

    #[test]
    fn test_display_failure_does_not_stop_round() {
        let state = MockState::new();
        for id in 1..=2 {
            state.add_session(id, "P", RoleId::ClassD);
        }
        let display = Arc::new(MockDisplay::failing_after(3));
        let mut plugin = HudPlugin::new();
        plugin.enable(
            &HudConfig::default(),
            Arc::new(state),
            display.clone(),
            Arc::new(MemoryConfigSource::new()),
        );
        let handlers = plugin.handlers().unwrap();

        handlers.on_round_started(&[SessionId(1), SessionId(2)]);
        assert_eq!(handlers.registry().active_sessions(), vec![SessionId(1)]);
        assert_eq!(display.live_count(), 3);
    }
}
