//! Placeholder dispatch table
//!
//! Each known `{name}` maps to one evaluator. Evaluators return a typed
//! `StateError` when the value they need cannot be read, and the resolver
//! substitutes the placeholder's own fallback text instead.

use super::format::{format_countdown, format_elapsed, format_tps};
use super::hud_template::ResolveContext;
use super::traits::{SessionInfo, StateError, WaveTeam};

/// Shown instead of a countdown while a wave is spawning
pub const SPAWNING_TEXT: &str = "Spawning...";
/// Shown when no countdown is running
pub const NOT_AVAILABLE_TEXT: &str = "N/A";
/// Shown when the session spectates nobody
pub const NO_TARGET_TEXT: &str = "None";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Tps,
    PlayerCount,
    MaxPlayers,
    Id,
    PlayerName,
    Role,
    Time,
    Rules,
    MtfSpawnLeft,
    ChaosSpawnLeft,
    /// `{nextspawn}` or `{nextwave}`
    NextSpawn,
    SpectatedName,
    SpectatedId,
    SpectatedRole,
    SpectatorCount,
    GeneratorCount,
    Warhead,
}

impl Placeholder {
    /// Look up a placeholder by name, ignoring case
    pub fn parse(name: &str) -> Option<Self> {
        let placeholder = match name.to_lowercase().as_str() {
            "tps" => Placeholder::Tps,
            "playercount" => Placeholder::PlayerCount,
            "maxplayers" => Placeholder::MaxPlayers,
            "id" => Placeholder::Id,
            "playername" => Placeholder::PlayerName,
            "role" => Placeholder::Role,
            "time" => Placeholder::Time,
            "rules" => Placeholder::Rules,
            "mtfspawnleft" => Placeholder::MtfSpawnLeft,
            "chaosspawnleft" => Placeholder::ChaosSpawnLeft,
            "nextspawn" | "nextwave" => Placeholder::NextSpawn,
            "spectated_name" => Placeholder::SpectatedName,
            "spectated_id" => Placeholder::SpectatedId,
            "spectated_role" => Placeholder::SpectatedRole,
            "spectatorcount" => Placeholder::SpectatorCount,
            "generatorcount" => Placeholder::GeneratorCount,
            "warhead" => Placeholder::Warhead,
            _ => return None,
        };
        Some(placeholder)
    }

    /// Text substituted when evaluation fails
    ///
    /// `raw` is the token as written in the template, e.g. `{Time}`.
    pub fn fallback(self, raw: &str) -> String {
        match self {
            Placeholder::Tps
            | Placeholder::PlayerCount
            | Placeholder::MaxPlayers
            | Placeholder::SpectatorCount => "0".to_string(),
            Placeholder::GeneratorCount => "0/0".to_string(),
            Placeholder::Id
            | Placeholder::MtfSpawnLeft
            | Placeholder::ChaosSpawnLeft
            | Placeholder::NextSpawn => NOT_AVAILABLE_TEXT.to_string(),
            Placeholder::PlayerName | Placeholder::Role | Placeholder::Warhead => {
                "Unknown".to_string()
            }
            Placeholder::SpectatedName | Placeholder::SpectatedId | Placeholder::SpectatedRole => {
                NO_TARGET_TEXT.to_string()
            }
            Placeholder::Time | Placeholder::Rules => raw.to_string(),
        }
    }

    /// Compute the current value
    pub fn evaluate(self, ctx: &ResolveContext<'_>) -> Result<String, StateError> {
        match self {
            Placeholder::Tps => ctx.state.tps().map(format_tps),
            Placeholder::PlayerCount => ctx.state.player_count().map(|n| n.to_string()),
            Placeholder::MaxPlayers => ctx.state.max_players().map(|n| n.to_string()),
            Placeholder::Id => Ok(ctx.session.id.to_string()),
            Placeholder::PlayerName => Ok(ctx
                .session
                .name
                .clone()
                .unwrap_or_else(|| "Unknown".to_string())),
            Placeholder::Role => Ok(ctx.roles.colored_name(ctx.session.role)),
            Placeholder::Time => ctx.state.round_elapsed().map(format_elapsed),
            Placeholder::Rules => Ok(ctx
                .rotation
                .lock()
                .get_current(ctx.rotation_interval, ctx.now)
                .to_string()),
            Placeholder::MtfSpawnLeft => team_spawn_time(ctx, WaveTeam::Foundation),
            Placeholder::ChaosSpawnLeft => team_spawn_time(ctx, WaveTeam::Chaos),
            Placeholder::NextSpawn => next_spawn_time(ctx),
            Placeholder::SpectatedName => Ok(spectated_target(ctx)?
                .map(|target| target.name.unwrap_or_else(|| "Unknown".to_string()))
                .unwrap_or_else(|| NO_TARGET_TEXT.to_string())),
            Placeholder::SpectatedId => Ok(spectated_target(ctx)?
                .map(|target| target.id.to_string())
                .unwrap_or_else(|| NO_TARGET_TEXT.to_string())),
            Placeholder::SpectatedRole => Ok(spectated_target(ctx)?
                .map(|target| ctx.roles.colored_name(target.role))
                .unwrap_or_else(|| NO_TARGET_TEXT.to_string())),
            Placeholder::SpectatorCount => ctx.state.spectator_count().map(|n| n.to_string()),
            Placeholder::GeneratorCount => ctx
                .state
                .generators()
                .map(|g| format!("{}/{}", g.engaged, g.total)),
            Placeholder::Warhead => warhead_status(ctx),
        }
    }
}

/// Session being spectated, `None` if the viewer is not spectating anyone
fn spectated_target(ctx: &ResolveContext<'_>) -> Result<Option<SessionInfo>, StateError> {
    match ctx.session.spectating {
        Some(target) => ctx.state.session(target).map(Some),
        None => Ok(None),
    }
}

/// Time until the soonest time-based wave of any team
fn next_spawn_time(ctx: &ResolveContext<'_>) -> Result<String, StateError> {
    if ctx.state.wave_queue_state()?.is_spawning() {
        return Ok(SPAWNING_TEXT.to_string());
    }

    let soonest = ctx
        .state
        .waves()?
        .iter()
        .filter_map(|wave| wave.time_left)
        .filter(|t| *t > 0.0)
        .fold(None, |min: Option<f32>, t| Some(min.map_or(t, |m| m.min(t))));

    Ok(soonest
        .map(format_countdown)
        .unwrap_or_else(|| NOT_AVAILABLE_TEXT.to_string()))
}

/// Time until the primary wave of one team
fn team_spawn_time(ctx: &ResolveContext<'_>, team: WaveTeam) -> Result<String, StateError> {
    let waves = ctx.state.waves()?;
    let mut primary = waves.iter().filter(|w| w.team == team && !w.mini);

    if ctx.state.wave_queue_state()?.is_spawning()
        && primary.clone().any(|wave| wave.ready_to_spawn)
    {
        return Ok(SPAWNING_TEXT.to_string());
    }

    Ok(primary
        .next()
        .and_then(|wave| wave.time_left)
        .filter(|t| *t > 0.0)
        .map(format_countdown)
        .unwrap_or_else(|| NOT_AVAILABLE_TEXT.to_string()))
}

fn warhead_status(ctx: &ResolveContext<'_>) -> Result<String, StateError> {
    let warhead = ctx.state.warhead()?;

    if warhead.detonated {
        return Ok("Detonated".to_string());
    }

    if warhead.detonation_in_progress {
        let time_left = warhead.time_left as i64;
        if time_left > 0 {
            return Ok(format!("Detonating in {}s", time_left));
        }
        return Ok("Detonating".to_string());
    }

    if warhead.armed {
        return Ok("Armed".to_string());
    }

    Ok("Idle".to_string())
}
