//! Opponent policy - periodic recruit and movement intents
//!
//! A stateless decision function over the current world. Intents are
//! collected here and applied by the tick engine through the same
//! validation path as player commands, never directly.

use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::types::{Faction, NodeId, UnitId, UnitKind};
use crate::map::node::NodeKind;
use crate::map::pathfinding::legal_neighbors;
use crate::world::state::World;

/// One decision produced by the policy
#[derive(Debug, Clone, PartialEq)]
pub enum AiIntent {
    Recruit { node: NodeId, kind: UnitKind },
    Move { unit: UnitId, target: NodeId },
}

/// Plan this round's intents for one controlled faction
pub fn plan(
    world: &World,
    faction: Faction,
    config: &SimulationConfig,
    rng: &mut impl Rng,
) -> Vec<AiIntent> {
    // Armies neither march nor muster through the winter
    if world.winter {
        return Vec::new();
    }

    let mut intents = Vec::new();

    if let Some(intent) = plan_recruitment(world, faction, config, rng) {
        intents.push(intent);
    }
    plan_movement(world, faction, config, rng, &mut intents);

    intents
}

/// Pick the first owned settlement that can raise and garrison a new unit
///
/// The faction is inferred from node ownership: the policy only ever
/// recruits where it already holds the ground.
fn plan_recruitment(
    world: &World,
    faction: Faction,
    config: &SimulationConfig,
    rng: &mut impl Rng,
) -> Option<AiIntent> {
    if world.gold(faction) <= config.land_gold_cost {
        return None;
    }

    let site = world.graph.iter().find(|n| {
        n.owner == Some(faction)
            && !n.kind.is_sea()
            && n.manpower >= config.land_manpower_cost
            && world.units_at(n.id).count() < config.ai_max_units_per_node
    })?;

    let kind = if site.kind == NodeKind::Port && rng.gen::<f32>() < config.ai_fleet_chance {
        UnitKind::Fleet
    } else {
        UnitKind::land_flavor(faction)
    };

    Some(AiIntent::Recruit { node: site.id, kind })
}

/// March idle units toward enemies, then unclaimed ground, then wherever
fn plan_movement(
    world: &World,
    faction: Faction,
    config: &SimulationConfig,
    rng: &mut impl Rng,
    intents: &mut Vec<AiIntent>,
) {
    let enemy = faction.enemy();

    for unit in world.units.iter().filter(|u| u.faction == faction && u.is_idle()) {
        let legal = legal_neighbors(world, unit.location, faction);
        if legal.is_empty() {
            continue;
        }

        let owner_of = |id: NodeId| world.graph.get(id).and_then(|n| n.owner);
        let target = legal
            .iter()
            .copied()
            .find(|&id| owner_of(id) == Some(enemy))
            .or_else(|| legal.iter().copied().find(|&id| owner_of(id).is_none()))
            .unwrap_or_else(|| legal[rng.gen_range(0..legal.len())]);

        // Friction: often enough, hold position anyway
        if rng.gen::<f32>() < config.ai_friction {
            continue;
        }

        intents.push(AiIntent::Move { unit: unit.id, target });
    }
}
