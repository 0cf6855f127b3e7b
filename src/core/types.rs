//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the two belligerent powers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Rome,
    Carthage,
}

impl Faction {
    /// The opposing belligerent
    pub fn enemy(&self) -> Faction {
        match self {
            Faction::Rome => Faction::Carthage,
            Faction::Carthage => Faction::Rome,
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Faction::Rome => write!(f, "Rome"),
            Faction::Carthage => write!(f, "Carthage"),
        }
    }
}

/// Kind of military unit
///
/// Legion and SacredBand are faction-flavor labels over identical stats;
/// only the land/sea distinction matters for movement and conquest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Legion,
    SacredBand,
    Fleet,
}

impl UnitKind {
    pub fn is_fleet(&self) -> bool {
        matches!(self, UnitKind::Fleet)
    }

    pub fn is_land(&self) -> bool {
        !self.is_fleet()
    }

    /// The land-unit flavor recruited by a faction
    pub fn land_flavor(faction: Faction) -> UnitKind {
        match faction {
            Faction::Rome => UnitKind::Legion,
            Faction::Carthage => UnitKind::SacredBand,
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitKind::Legion => write!(f, "Legion"),
            UnitKind::SacredBand => write!(f, "Sacred Band"),
            UnitKind::Fleet => write!(f, "Fleet"),
        }
    }
}

/// Stable key for a map node, defined by the compiled-in theater dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub &'static str);

impl NodeId {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub Uuid);

impl UnitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

/// Simulation day counter (monotonic, never resets)
pub type Day = u64;

/// 2D position on the map
///
/// Carried through for the renderer; the simulation never interprets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
