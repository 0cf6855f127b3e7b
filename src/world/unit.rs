//! Units - the armies and fleets moving across the theater

use serde::Serialize;

use crate::core::types::{Faction, NodeId, UnitId, UnitKind};

/// A single army or fleet
///
/// A unit is created by recruitment, always starting in training
/// (immobile, combat-ineligible), and is destroyed the instant it
/// loses a battle.
#[derive(Debug, Clone, Serialize)]
pub struct Unit {
    pub id: UnitId,
    pub faction: Faction,
    pub kind: UnitKind,
    pub strength: f32,
    pub max_strength: f32,
    pub location: NodeId,
    /// Immediate next hop, if the unit is underway
    pub destination: Option<NodeId>,
    /// Remaining route beyond the immediate hop
    pub path: Vec<NodeId>,
    /// Where the unit was raised; winter drives it back here
    pub origin: NodeId,
    /// Progress toward the next hop, 0-100, reset on arrival
    pub progress: f32,
    pub training: bool,
    /// Progress toward combat readiness, 0-100
    pub training_progress: f32,
}

impl Unit {
    /// A freshly recruited unit, still drilling at its origin
    pub fn recruit(faction: Faction, kind: UnitKind, at: NodeId, max_strength: f32) -> Self {
        Self {
            id: UnitId::new(),
            faction,
            kind,
            strength: max_strength,
            max_strength,
            location: at,
            destination: None,
            path: Vec::new(),
            origin: at,
            progress: 0.0,
            training: true,
            training_progress: 0.0,
        }
    }

    /// A unit that skips training, for scenario starting forces
    pub fn veteran(faction: Faction, kind: UnitKind, at: NodeId, max_strength: f32) -> Self {
        let mut unit = Self::recruit(faction, kind, at, max_strength);
        unit.training = false;
        unit.training_progress = 100.0;
        unit
    }

    pub fn is_moving(&self) -> bool {
        self.destination.is_some()
    }

    /// Idle: combat-ready and holding position
    pub fn is_idle(&self) -> bool {
        !self.training && self.destination.is_none()
    }

    /// Start along a route; `next` is the immediate hop, `rest` the queue
    pub fn begin_move(&mut self, next: NodeId, rest: Vec<NodeId>) {
        self.destination = Some(next);
        self.path = rest;
        self.progress = 0.0;
    }

    /// Cancel movement in place; the unit stays where it currently is
    pub fn halt(&mut self) {
        self.destination = None;
        self.path.clear();
        self.progress = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recruit_starts_training() {
        let unit = Unit::recruit(Faction::Rome, UnitKind::Legion, NodeId("roma"), 100.0);
        assert!(unit.training);
        assert!(!unit.is_idle());
        assert!(!unit.is_moving());
        assert_eq!(unit.origin, NodeId("roma"));
        assert_eq!(unit.strength, 100.0);
    }

    #[test]
    fn test_veteran_is_idle() {
        let unit = Unit::veteran(Faction::Rome, UnitKind::Fleet, NodeId("mare"), 100.0);
        assert!(unit.is_idle());
    }

    #[test]
    fn test_begin_and_halt() {
        let mut unit = Unit::veteran(Faction::Rome, UnitKind::Legion, NodeId("roma"), 100.0);
        unit.begin_move(NodeId("capua"), vec![NodeId("tarentum")]);
        assert!(unit.is_moving());
        assert_eq!(unit.path, vec![NodeId("tarentum")]);

        unit.progress = 60.0;
        unit.halt();
        assert!(unit.is_idle());
        assert_eq!(unit.location, NodeId("roma"));
        assert_eq!(unit.progress, 0.0);
        assert!(unit.path.is_empty());
    }
}
