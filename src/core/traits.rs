//! Core traits - read access to live server state
//!
//! The HUD never owns game state. Every value a template can reference is
//! read through `StateQuery`, and every accessor may fail independently: the
//! object may be gone, or not spawned yet this round. For testing, mock
//! implementations are provided.

use std::fmt;
use std::time::Duration;

use super::roles::RoleId;

// =============================================================================
// TYPES
// =============================================================================

/// Stable per-session identifier assigned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub i32);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one connected session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInfo {
    pub id: SessionId,
    /// Display name, if the host has one yet
    pub name: Option<String>,
    pub role: RoleId,
    /// Session currently being spectated, if any
    pub spectating: Option<SessionId>,
}

/// Generator progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeneratorStatus {
    pub engaged: u32,
    pub total: u32,
}

/// Alpha warhead state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WarheadStatus {
    pub detonated: bool,
    pub detonation_in_progress: bool,
    /// Seconds until detonation, meaningful while in progress
    pub time_left: f32,
    /// Lever switched to enabled
    pub armed: bool,
}

/// Wave queue phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveQueueState {
    Idle,
    WaveSelected,
    WaveSpawning,
    WaveSpawned,
}

impl WaveQueueState {
    /// A wave has been picked and is about to spawn or spawning
    pub fn is_spawning(self) -> bool {
        matches!(self, WaveQueueState::WaveSelected | WaveQueueState::WaveSpawning)
    }
}

/// Team a respawn wave reinforces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveTeam {
    Foundation,
    Chaos,
}

/// One respawn wave and its timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnWave {
    pub team: WaveTeam,
    /// Mini waves are time based but are not the team's primary wave
    pub mini: bool,
    /// Seconds until the wave, `None` if the timer could not be read
    pub time_left: Option<f32>,
    pub ready_to_spawn: bool,
}

/// A live value could not be read
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("{0} is not available")]
    Unavailable(&'static str),
    #[error("{0} has not been initialized yet")]
    NotInitialized(&'static str),
    #[error("session {0} is no longer connected")]
    SessionGone(SessionId),
}

// =============================================================================
// STATE QUERY
// =============================================================================

/// Read live server, round, session and facility state
pub trait StateQuery: Send + Sync {
    /// Current server tick rate
    fn tps(&self) -> Result<f64, StateError>;

    fn player_count(&self) -> Result<u32, StateError>;

    fn max_players(&self) -> Result<u32, StateError>;

    /// Whether a round is currently running
    fn is_round_started(&self) -> Result<bool, StateError>;

    /// Time since the round started
    fn round_elapsed(&self) -> Result<Duration, StateError>;

    /// Look up a connected session
    fn session(&self, id: SessionId) -> Result<SessionInfo, StateError>;

    /// Number of sessions with the spectator role
    fn spectator_count(&self) -> Result<u32, StateError>;

    fn generators(&self) -> Result<GeneratorStatus, StateError>;

    fn warhead(&self) -> Result<WarheadStatus, StateError>;

    fn wave_queue_state(&self) -> Result<WaveQueueState, StateError>;

    /// All registered respawn waves, in host order
    fn waves(&self) -> Result<Vec<SpawnWave>, StateError>;
}

// =============================================================================
// TEST MOCKS
// =============================================================================
