//! Battle resolution between two co-located units
//!
//! One pairwise exchange per arrival: both sides roll against their
//! modified strength, the loser is eliminated, the winner pays attrition.

use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::types::{Faction, NodeId, UnitId};
use crate::map::node::Node;
use crate::world::unit::Unit;

/// Outcome of one resolved battle
///
/// Resolution itself mutates nothing; the tick engine applies the report
/// (strength update, removal) so each tick stays one atomic transition.
#[derive(Debug, Clone)]
pub struct CombatReport {
    pub location: NodeId,
    pub winner: UnitId,
    pub loser: UnitId,
    pub winner_faction: Faction,
    pub loser_faction: Faction,
    /// Winner's strength after attrition and the defeat floor
    pub winner_strength: f32,
}

/// Effective strength multiplier for a unit fighting at a node
///
/// Base 1.0; a fleet inside a sea zone fights at the naval multiplier;
/// the side whose faction owns the node adds the fortification bonus per
/// level on top (additive, not a cross-multiply).
pub fn effective_modifier(unit: &Unit, node: &Node, config: &SimulationConfig) -> f32 {
    let mut modifier = 1.0;

    if unit.kind.is_fleet() && node.kind.is_sea() {
        modifier = config.naval_multiplier;
    }

    if node.owner == Some(unit.faction) {
        modifier += config.fortification_bonus * node.fortification as f32;
    }

    modifier
}

/// Resolve a single battle between `attacker` and `defender` at `node`
///
/// Each side draws uniformly from `[0, strength x modifier)`. Exact ties
/// go to the attacker (the unit evaluated first) - a documented,
/// reproducible tie-break rather than a re-roll.
pub fn resolve(
    attacker: &Unit,
    defender: &Unit,
    node: &Node,
    config: &SimulationConfig,
    rng: &mut impl Rng,
) -> CombatReport {
    let attacker_modifier = effective_modifier(attacker, node, config);
    let defender_modifier = effective_modifier(defender, node, config);

    let attacker_roll = roll(attacker.strength, attacker_modifier, rng);
    let defender_roll = roll(defender.strength, defender_modifier, rng);

    let attacker_wins = attacker_roll >= defender_roll;
    let (winner, winner_modifier, loser) = if attacker_wins {
        (attacker, attacker_modifier, defender)
    } else {
        (defender, defender_modifier, attacker)
    };

    let winner_strength =
        (winner.strength - config.winner_attrition / winner_modifier).max(config.defeat_floor);

    CombatReport {
        location: node.id,
        winner: winner.id,
        loser: loser.id,
        winner_faction: winner.faction,
        loser_faction: loser.faction,
        winner_strength,
    }
}

fn roll(strength: f32, modifier: f32, rng: &mut impl Rng) -> f32 {
    let ceiling = strength * modifier;
    if ceiling <= 0.0 {
        return 0.0;
    }
    rng.gen_range(0.0..ceiling)
}
