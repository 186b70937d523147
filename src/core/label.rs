//! HUD labels
//!
//! A label is one configured overlay line (standard, rules, announcement).
//! `LabelRenderer` binds a label to a session and renders it on demand for
//! the display.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::config_source::ConfigSource;
use super::display::{Alignment, OverlayLayout, SyncSpeed, TextSource};
use super::hud_template::{resolve, ResolveContext};
use super::role_catalog::RoleCatalog;
use super::rotation::RotatingMessageList;
use super::traits::{SessionId, StateQuery};

// =============================================================================
// LABEL SPEC
// =============================================================================

/// Layout and template of one HUD label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSpec {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Only render while the viewer is spectating
    #[serde(default)]
    pub only_spectator: bool,

    #[serde(default)]
    pub x_coordinate: f32,

    #[serde(default = "default_y_coordinate")]
    pub y_coordinate: f32,

    /// Font size, also emitted as the `<size=N>` wrapper
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default)]
    pub alignment: Alignment,

    #[serde(default)]
    pub sync_speed: SyncSpeed,

    /// Template, see `hud_template` for the placeholder list
    #[serde(default)]
    pub format: String,
}

fn default_enabled() -> bool {
    true
}
fn default_y_coordinate() -> f32 {
    700.0
}
fn default_font_size() -> u32 {
    20
}

impl Default for LabelSpec {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            only_spectator: false,
            x_coordinate: 0.0,
            y_coordinate: default_y_coordinate(),
            font_size: default_font_size(),
            alignment: Alignment::default(),
            sync_speed: SyncSpeed::default(),
            format: String::new(),
        }
    }
}

impl LabelSpec {
    pub fn layout(&self) -> OverlayLayout {
        OverlayLayout {
            x: self.x_coordinate,
            y: self.y_coordinate,
            font_size: self.font_size,
            alignment: self.alignment,
            sync_speed: self.sync_speed,
        }
    }
}

// =============================================================================
// SHARED ASSETS
// =============================================================================

/// Admin-editable data shared by every label
pub struct HudAssets {
    pub rotation: Mutex<RotatingMessageList>,
    pub roles: RwLock<RoleCatalog>,
}

impl HudAssets {
    pub fn new(now: Instant) -> Self {
        Self {
            rotation: Mutex::new(RotatingMessageList::new(now)),
            roles: RwLock::new(RoleCatalog::new()),
        }
    }

    /// Reload rules and role colors
    ///
    /// Both are read outside their locks and swapped in afterwards. A rules
    /// read failure leaves the rotation empty. A role catalog read failure
    /// keeps the catalog that was loaded before.
    pub fn reload(&self, source: &dyn ConfigSource, now: Instant) {
        let mut rotation = RotatingMessageList::new(now);
        if let Err(e) = rotation.load(source, now) {
            error!(error = %e, "[RULES] Failed to load rules");
        }
        *self.rotation.lock() = rotation;

        match RoleCatalog::load(source) {
            Ok(catalog) => *self.roles.write() = catalog,
            Err(e) => error!(error = %e, "[ROLES] Failed to load role config"),
        }
    }
}

/// State a renderer reads from, shared across sessions
#[derive(Clone)]
pub struct HudContext {
    pub state: Arc<dyn StateQuery>,
    pub assets: Arc<HudAssets>,
    pub rotation_interval: Duration,
}

// =============================================================================
// RENDERER
// =============================================================================

/// Renders one label for one session
pub struct LabelRenderer {
    session: SessionId,
    spec: LabelSpec,
    ctx: HudContext,
}

impl LabelRenderer {
    pub fn new(session: SessionId, spec: LabelSpec, ctx: HudContext) -> Self {
        Self { session, spec, ctx }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn spec(&self) -> &LabelSpec {
        &self.spec
    }

    /// Render at `now`. Empty when the label should not show.
    pub fn render(&self, now: Instant) -> String {
        let session = match self.ctx.state.session(self.session) {
            Ok(session) => session,
            Err(e) => {
                debug!(session = %self.session, error = %e, "[HUD] Session unavailable");
                return String::new();
            }
        };

        if self.spec.only_spectator && !session.role.is_spectating() {
            return String::new();
        }

        let roles = self.ctx.assets.roles.read();
        let resolve_ctx = ResolveContext {
            state: self.ctx.state.as_ref(),
            session: &session,
            rotation: &self.ctx.assets.rotation,
            roles: &roles,
            rotation_interval: self.ctx.rotation_interval,
            now,
        };

        let text = resolve(&self.spec.format, &resolve_ctx);
        if text.is_empty() {
            return text;
        }
        format!("<size={}>{}</size>", self.spec.font_size, text)
    }
}

impl TextSource for LabelRenderer {
    fn current_text(&self) -> String {
        // The display calls this from its own refresh loop; never unwind into it
        match panic::catch_unwind(AssertUnwindSafe(|| self.render(Instant::now()))) {
            Ok(text) => text,
            Err(_) => {
                warn!(session = %self.session, "[HUD] Label rendering panicked");
                String::new()
            }
        }
    }
}
