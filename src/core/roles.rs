//! Role identifiers and team classification
//!
//! Numeric role ids as reported by the host. The identifier names double as
//! keys in the role-color file, so `as_str` must stay in sync with the enum.

use std::fmt;
use std::str::FromStr;

use num_enum::TryFromPrimitive;

// =============================================================================
// TEAMS
// =============================================================================

/// Team a role belongs to, used to pick default colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Scps,
    FoundationForces,
    ChaosInsurgency,
    Scientists,
    ClassD,
    Dead,
    OtherAlive,
    Flamingos,
}

impl Team {
    /// Default color used when generating the role-color file
    pub fn default_color(self) -> &'static str {
        match self {
            Team::Scps => "red",
            Team::FoundationForces => "#0096FF",
            Team::ChaosInsurgency => "#008F1C",
            Team::Scientists => "#FFFF7C",
            Team::ClassD => "#FF8E00",
            Team::Dead => "grey",
            Team::OtherAlive | Team::Flamingos => "white",
        }
    }
}

// =============================================================================
// ROLE IDS
// =============================================================================

/// Known role ids
///
/// Use `RoleId::try_from(raw)` to convert a raw host id.
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum RoleId {
    None = -1,
    Scp173 = 0,
    ClassD = 1,
    Spectator = 2,
    Scp106 = 3,
    NtfSpecialist = 4,
    Scp049 = 5,
    Scientist = 6,
    Scp079 = 7,
    ChaosConscript = 8,
    Scp096 = 9,
    Scp0492 = 10,
    NtfSergeant = 11,
    NtfCaptain = 12,
    NtfPrivate = 13,
    Tutorial = 14,
    FacilityGuard = 15,
    Scp939 = 16,
    CustomRole = 17,
    ChaosRifleman = 18,
    ChaosMarauder = 19,
    ChaosRepressor = 20,
    Overwatch = 21,
    Filmmaker = 22,
    Scp3114 = 23,
    Destroyed = 24,
    Flamingo = 25,
    AlphaFlamingo = 26,
    ZombieFlamingo = 27,
}

impl RoleId {
    /// Every role in id order, `None` included
    pub const ALL: [RoleId; 29] = [
        RoleId::None,
        RoleId::Scp173,
        RoleId::ClassD,
        RoleId::Spectator,
        RoleId::Scp106,
        RoleId::NtfSpecialist,
        RoleId::Scp049,
        RoleId::Scientist,
        RoleId::Scp079,
        RoleId::ChaosConscript,
        RoleId::Scp096,
        RoleId::Scp0492,
        RoleId::NtfSergeant,
        RoleId::NtfCaptain,
        RoleId::NtfPrivate,
        RoleId::Tutorial,
        RoleId::FacilityGuard,
        RoleId::Scp939,
        RoleId::CustomRole,
        RoleId::ChaosRifleman,
        RoleId::ChaosMarauder,
        RoleId::ChaosRepressor,
        RoleId::Overwatch,
        RoleId::Filmmaker,
        RoleId::Scp3114,
        RoleId::Destroyed,
        RoleId::Flamingo,
        RoleId::AlphaFlamingo,
        RoleId::ZombieFlamingo,
    ];

    /// Identifier name, as written in the role-color file
    pub fn as_str(self) -> &'static str {
        match self {
            RoleId::None => "None",
            RoleId::Scp173 => "Scp173",
            RoleId::ClassD => "ClassD",
            RoleId::Spectator => "Spectator",
            RoleId::Scp106 => "Scp106",
            RoleId::NtfSpecialist => "NtfSpecialist",
            RoleId::Scp049 => "Scp049",
            RoleId::Scientist => "Scientist",
            RoleId::Scp079 => "Scp079",
            RoleId::ChaosConscript => "ChaosConscript",
            RoleId::Scp096 => "Scp096",
            RoleId::Scp0492 => "Scp0492",
            RoleId::NtfSergeant => "NtfSergeant",
            RoleId::NtfCaptain => "NtfCaptain",
            RoleId::NtfPrivate => "NtfPrivate",
            RoleId::Tutorial => "Tutorial",
            RoleId::FacilityGuard => "FacilityGuard",
            RoleId::Scp939 => "Scp939",
            RoleId::CustomRole => "CustomRole",
            RoleId::ChaosRifleman => "ChaosRifleman",
            RoleId::ChaosMarauder => "ChaosMarauder",
            RoleId::ChaosRepressor => "ChaosRepressor",
            RoleId::Overwatch => "Overwatch",
            RoleId::Filmmaker => "Filmmaker",
            RoleId::Scp3114 => "Scp3114",
            RoleId::Destroyed => "Destroyed",
            RoleId::Flamingo => "Flamingo",
            RoleId::AlphaFlamingo => "AlphaFlamingo",
            RoleId::ZombieFlamingo => "ZombieFlamingo",
        }
    }

    pub fn team(self) -> Team {
        match self {
            RoleId::Scp173
            | RoleId::Scp106
            | RoleId::Scp049
            | RoleId::Scp079
            | RoleId::Scp096
            | RoleId::Scp0492
            | RoleId::Scp939
            | RoleId::Scp3114 => Team::Scps,
            RoleId::NtfSpecialist
            | RoleId::NtfSergeant
            | RoleId::NtfCaptain
            | RoleId::NtfPrivate
            | RoleId::FacilityGuard => Team::FoundationForces,
            RoleId::ChaosConscript
            | RoleId::ChaosRifleman
            | RoleId::ChaosMarauder
            | RoleId::ChaosRepressor => Team::ChaosInsurgency,
            RoleId::Scientist => Team::Scientists,
            RoleId::ClassD => Team::ClassD,
            RoleId::None
            | RoleId::Spectator
            | RoleId::Overwatch
            | RoleId::Filmmaker
            | RoleId::Destroyed => Team::Dead,
            RoleId::Tutorial | RoleId::CustomRole => Team::OtherAlive,
            RoleId::Flamingo | RoleId::AlphaFlamingo | RoleId::ZombieFlamingo => Team::Flamingos,
        }
    }

    /// Whether this role watches the round rather than plays it
    pub fn is_spectating(self) -> bool {
        matches!(self, RoleId::Spectator | RoleId::Overwatch)
    }

    /// Display name written to a freshly generated role-color file
    pub fn default_display_name(self) -> &'static str {
        match self {
            RoleId::ClassD => "Class-D",
            RoleId::FacilityGuard => "Facility Guard",
            RoleId::NtfPrivate => "Nine-Tailed Fox Private",
            RoleId::NtfSergeant => "Nine-Tailed Fox Sergeant",
            RoleId::NtfSpecialist => "Nine-Tailed Fox Specialist",
            RoleId::NtfCaptain => "Nine-Tailed Fox Captain",
            RoleId::ChaosConscript => "Chaos Insurgency Conscript",
            RoleId::ChaosRifleman => "Chaos Insurgency Rifleman",
            RoleId::ChaosRepressor => "Chaos Insurgency Repressor",
            RoleId::ChaosMarauder => "Chaos Insurgency Marauder",
            other => other.as_str(),
        }
    }

    pub fn default_color(self) -> &'static str {
        self.team().default_color()
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role key matches no known role
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for RoleId {
    type Err = UnknownRole;

    /// Accepts the identifier name or the numeric id
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if let Some(role) = RoleId::ALL.iter().find(|r| r.as_str() == key) {
            return Ok(*role);
        }
        key.parse::<i8>()
            .ok()
            .and_then(|raw| RoleId::try_from(raw).ok())
            .ok_or_else(|| UnknownRole(key.to_string()))
    }
}
