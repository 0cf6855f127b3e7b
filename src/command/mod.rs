//! Player command handlers - validate and apply intents against the
//! current committed state
//!
//! Every handler checks all preconditions against a consistent snapshot
//! before mutating anything: either the whole command applies or nothing
//! changes. Rejections are ordinary values, never errors.

use crate::core::config::SimulationConfig;
use crate::core::types::{Faction, NodeId, UnitKind};
use crate::map::node::NodeKind;
use crate::map::pathfinding::{find_path, PathResult};
use crate::world::state::World;
use crate::world::unit::Unit;

/// Result of attempting a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// Preconditions failed; no state changed
    Rejected(&'static str),
    /// Valid request, but no route exists under current fleet placement
    NoRoute,
}

impl CommandOutcome {
    pub fn applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied)
    }
}

/// Raise a new unit at a node
///
/// Needs treasury for the gold cost, local manpower for the levy, and
/// terrain that admits the kind: fleets only at ports, land units at
/// cities or ports. The unit starts in training.
pub fn recruit(
    world: &mut World,
    node_id: NodeId,
    kind: UnitKind,
    faction: Faction,
    config: &SimulationConfig,
) -> CommandOutcome {
    if world.game_over() {
        return CommandOutcome::Rejected("the war is over");
    }

    let (gold_cost, manpower_cost) = if kind.is_fleet() {
        (config.fleet_gold_cost, config.fleet_manpower_cost)
    } else {
        (config.land_gold_cost, config.land_manpower_cost)
    };

    let Some(node) = world.graph.get(node_id) else {
        return CommandOutcome::Rejected("no such node");
    };

    let terrain_ok = match node.kind {
        NodeKind::Port => true,
        NodeKind::City => kind.is_land(),
        NodeKind::Sea => false,
    };
    if !terrain_ok {
        tracing::debug!(%node_id, ?kind, "recruit rejected: terrain");
        return CommandOutcome::Rejected("terrain does not admit this unit");
    }

    if node.manpower < manpower_cost {
        tracing::debug!(%node_id, "recruit rejected: manpower");
        return CommandOutcome::Rejected("not enough local manpower");
    }

    if world.gold(faction) < gold_cost {
        tracing::debug!(%faction, "recruit rejected: gold");
        return CommandOutcome::Rejected("not enough gold");
    }

    // All checks passed; apply everything
    world.try_spend(faction, gold_cost);
    let node = world.graph.get_mut(node_id).expect("checked above");
    node.manpower -= manpower_cost;
    world
        .units
        .push(Unit::recruit(faction, kind, node_id, config.unit_max_strength));

    CommandOutcome::Applied
}

/// Raise a node's fortification by one level
pub fn fortify(
    world: &mut World,
    node_id: NodeId,
    faction: Faction,
    config: &SimulationConfig,
) -> CommandOutcome {
    if world.game_over() {
        return CommandOutcome::Rejected("the war is over");
    }

    let Some(node) = world.graph.get(node_id) else {
        return CommandOutcome::Rejected("no such node");
    };

    if node.fortification >= config.max_fortification {
        return CommandOutcome::Rejected("fortification already at maximum");
    }

    if world.gold(faction) < config.fortify_cost {
        return CommandOutcome::Rejected("not enough gold");
    }

    world.try_spend(faction, config.fortify_cost);
    world.graph.get_mut(node_id).expect("checked above").fortification += 1;

    CommandOutcome::Applied
}

/// March every idle unit at `from` along a shortest route to `to`
///
/// All gathered units share the same immediate hop and remaining queue.
pub fn move_units(
    world: &mut World,
    from: NodeId,
    to: NodeId,
    faction: Faction,
) -> CommandOutcome {
    if world.game_over() {
        return CommandOutcome::Rejected("the war is over");
    }

    let movers: Vec<_> = world
        .units_at(from)
        .filter(|u| u.faction == faction && u.is_idle())
        .map(|u| u.id)
        .collect();

    if movers.is_empty() {
        tracing::debug!(%from, "move rejected: no idle units");
        return CommandOutcome::Rejected("no idle units at that node");
    }

    let path = match find_path(world, from, to, faction) {
        PathResult::Found(path) if path.is_empty() => {
            return CommandOutcome::Rejected("already there")
        }
        PathResult::Found(path) => path,
        PathResult::Unreachable => {
            tracing::debug!(%from, %to, "move: no route");
            return CommandOutcome::NoRoute;
        }
    };

    let next = path[0];
    let rest = path[1..].to_vec();
    for id in movers {
        if let Some(unit) = world.unit_mut(id) {
            unit.begin_move(next, rest.clone());
        }
    }

    CommandOutcome::Applied
}

/// Gather idle land forces from quiet sectors toward a target node
///
/// Units adjacent to enemy-held territory hold their front line; fleets
/// keep their stations. Everything else marches if a route exists.
pub fn rally(world: &mut World, target: NodeId, faction: Faction) -> CommandOutcome {
    if world.game_over() {
        return CommandOutcome::Rejected("the war is over");
    }

    if !world.graph.contains(target) {
        return CommandOutcome::Rejected("no such node");
    }

    let enemy = faction.enemy();
    let candidates: Vec<_> = world
        .units
        .iter()
        .filter(|u| {
            u.faction == faction && u.is_idle() && u.kind.is_land() && u.location != target
        })
        .filter(|u| {
            // Front-line gate: stay put next to enemy-held territory
            !world
                .graph
                .neighbors(u.location)
                .iter()
                .any(|&n| world.graph.get(n).map(|node| node.owner) == Some(Some(enemy)))
        })
        .map(|u| (u.id, u.location))
        .collect();

    let mut moved = 0;
    for (id, location) in candidates {
        if let PathResult::Found(path) = find_path(world, location, target, faction) {
            if path.is_empty() {
                continue;
            }
            let next = path[0];
            let rest = path[1..].to_vec();
            if let Some(unit) = world.unit_mut(id) {
                unit.begin_move(next, rest);
                moved += 1;
            }
        }
    }

    tracing::debug!(%target, moved, "rally");
    if moved == 0 {
        return CommandOutcome::Rejected("no unit could answer the rally");
    }
    CommandOutcome::Applied
}

/// Stop every unit currently routed through or toward `target`
///
/// Halted units become idle at their current location, not their
/// destination.
pub fn halt(world: &mut World, target: NodeId, faction: Faction) -> CommandOutcome {
    if world.game_over() {
        return CommandOutcome::Rejected("the war is over");
    }

    let mut halted = 0;
    for unit in &mut world.units {
        if unit.faction != faction || !unit.is_moving() {
            continue;
        }
        if unit.destination == Some(target) || unit.path.contains(&target) {
            unit.halt();
            halted += 1;
        }
    }

    tracing::debug!(%target, halted, "halt");
    if halted == 0 {
        return CommandOutcome::Rejected("no unit is headed there");
    }
    CommandOutcome::Applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::theater::{
        ARIMINUM, CAPUA, CARTHAGO, GENUA, MESSANA, NEAPOLIS, OSTIA, ROMA, TARENTUM,
    };

    fn setup() -> (World, SimulationConfig) {
        let config = SimulationConfig::default();
        let world = World::standard(&config);
        (world, config)
    }

    #[test]
    fn test_recruit_deducts_both_costs() {
        let (mut world, config) = setup();
        let gold_before = world.gold(Faction::Rome);
        let manpower_before = world.graph.get(ROMA).unwrap().manpower;
        let units_before = world.units.len();

        let outcome = recruit(&mut world, ROMA, UnitKind::Legion, Faction::Rome, &config);

        assert!(outcome.applied());
        assert_eq!(world.gold(Faction::Rome), gold_before - config.land_gold_cost);
        assert_eq!(
            world.graph.get(ROMA).unwrap().manpower,
            manpower_before - config.land_manpower_cost
        );
        assert_eq!(world.units.len(), units_before + 1);

        let recruited = world.units.last().unwrap();
        assert!(recruited.training);
        assert!(!recruited.is_idle());
    }

    #[test]
    fn test_recruit_rejected_without_gold() {
        let (mut world, config) = setup();
        let gold = world.gold(Faction::Rome);
        world.try_spend(Faction::Rome, gold);

        let manpower_before = world.graph.get(ROMA).unwrap().manpower;
        let outcome = recruit(&mut world, ROMA, UnitKind::Legion, Faction::Rome, &config);

        assert_eq!(outcome, CommandOutcome::Rejected("not enough gold"));
        // Nothing changed: atomic rejection
        assert_eq!(world.graph.get(ROMA).unwrap().manpower, manpower_before);
        assert_eq!(world.units.len(), 6);
    }

    #[test]
    fn test_recruit_fleet_requires_port() {
        let (mut world, config) = setup();
        // Roma is a city, not a port
        let outcome = recruit(&mut world, ROMA, UnitKind::Fleet, Faction::Rome, &config);
        assert!(matches!(outcome, CommandOutcome::Rejected(_)));

        let outcome = recruit(&mut world, OSTIA, UnitKind::Fleet, Faction::Rome, &config);
        assert!(outcome.applied());
    }

    #[test]
    fn test_fortify_caps_at_max() {
        let (mut world, config) = setup();
        world.earn(Faction::Rome, 10_000);

        for _ in 0..3 {
            assert!(fortify(&mut world, ROMA, Faction::Rome, &config).applied());
        }
        assert_eq!(world.graph.get(ROMA).unwrap().fortification, 3);

        let gold_before = world.gold(Faction::Rome);
        let outcome = fortify(&mut world, ROMA, Faction::Rome, &config);
        assert!(matches!(outcome, CommandOutcome::Rejected(_)));
        assert_eq!(world.gold(Faction::Rome), gold_before);
        assert_eq!(world.graph.get(ROMA).unwrap().fortification, 3);
    }

    #[test]
    fn test_move_assigns_shared_route() {
        let (mut world, _config) = setup();
        let outcome = move_units(&mut world, ROMA, TARENTUM, Faction::Rome);
        assert!(outcome.applied());

        let movers: Vec<_> = world
            .units_at(ROMA)
            .filter(|u| u.faction == Faction::Rome)
            .collect();
        assert_eq!(movers.len(), 2);
        for unit in movers {
            assert_eq!(unit.destination, Some(CAPUA));
            assert_eq!(unit.path, vec![TARENTUM]);
        }
    }

    #[test]
    fn test_move_without_idle_units_is_rejected() {
        let (mut world, _config) = setup();
        assert!(move_units(&mut world, ROMA, CAPUA, Faction::Rome).applied());
        // Already moving now; a second order finds nobody idle
        let outcome = move_units(&mut world, ROMA, CAPUA, Faction::Rome);
        assert!(matches!(outcome, CommandOutcome::Rejected(_)));
    }

    #[test]
    fn test_move_unreachable_is_no_route() {
        let (mut world, _config) = setup();
        world
            .units
            .retain(|u| !(u.faction == Faction::Carthage && u.kind.is_fleet()));
        let outcome = move_units(&mut world, CARTHAGO, ROMA, Faction::Carthage);
        assert_eq!(outcome, CommandOutcome::NoRoute);
    }

    #[test]
    fn test_rally_skips_front_line_and_fleets() {
        let (mut world, _config) = setup();

        // Make Capua hostile so Roma sits on the front line
        world.graph.get_mut(CAPUA).unwrap().owner = Some(Faction::Carthage);

        // A quiet garrison in Genua answers the rally
        let config = SimulationConfig::default();
        world.units.push(Unit::veteran(
            Faction::Rome,
            UnitKind::Legion,
            GENUA,
            config.unit_max_strength,
        ));

        let outcome = rally(&mut world, ARIMINUM, Faction::Rome);
        assert!(outcome.applied());

        // Garrison at Genua marches
        let genoese = world.units_at(GENUA).next().unwrap();
        assert_eq!(genoese.destination, Some(ARIMINUM));

        // The legions at Roma hold the line
        for unit in world.units_at(ROMA) {
            assert!(!unit.is_moving());
        }

        // The fleet never rallies
        let fleet = world
            .units
            .iter()
            .find(|u| u.faction == Faction::Rome && u.kind.is_fleet())
            .unwrap();
        assert!(!fleet.is_moving());
    }

    #[test]
    fn test_halt_stops_units_routed_through_target() {
        let (mut world, _config) = setup();
        assert!(move_units(&mut world, ROMA, TARENTUM, Faction::Rome).applied());

        // Tarentum is in the queue; halting it stops the column at Roma
        let outcome = halt(&mut world, TARENTUM, Faction::Rome);
        assert!(outcome.applied());

        for unit in world.units_at(ROMA).filter(|u| u.kind.is_land()) {
            assert!(unit.is_idle());
            assert_eq!(unit.location, ROMA);
            assert_eq!(unit.progress, 0.0);
        }
    }

    #[test]
    fn test_halt_ignores_other_routes() {
        let (mut world, _config) = setup();
        assert!(move_units(&mut world, ROMA, CAPUA, Faction::Rome).applied());

        let outcome = halt(&mut world, MESSANA, Faction::Rome);
        assert!(matches!(outcome, CommandOutcome::Rejected(_)));
        for unit in world.units_at(ROMA).filter(|u| u.kind.is_land()) {
            assert!(unit.is_moving());
        }
    }

    #[test]
    fn test_commands_rejected_after_game_over() {
        let (mut world, config) = setup();
        world.winner = Some(Faction::Rome);

        assert!(matches!(
            recruit(&mut world, ROMA, UnitKind::Legion, Faction::Rome, &config),
            CommandOutcome::Rejected(_)
        ));
        assert!(matches!(
            move_units(&mut world, ROMA, CAPUA, Faction::Rome),
            CommandOutcome::Rejected(_)
        ));
        assert!(matches!(
            fortify(&mut world, ROMA, Faction::Rome, &config),
            CommandOutcome::Rejected(_)
        ));
    }

    #[test]
    fn test_move_to_self_is_rejected() {
        let (mut world, _config) = setup();
        let outcome = move_units(&mut world, ROMA, ROMA, Faction::Rome);
        assert_eq!(outcome, CommandOutcome::Rejected("already there"));
    }

    #[test]
    fn test_recruit_neutral_node_allowed_only_with_resources() {
        let (mut world, config) = setup();
        // The handler does not gate on ownership; the AI planner does.
        // Neutral Messana has 350 manpower, below the land levy of 400.
        let outcome = recruit(&mut world, MESSANA, UnitKind::Legion, Faction::Rome, &config);
        assert!(matches!(outcome, CommandOutcome::Rejected(_)));

        let outcome = recruit(&mut world, NEAPOLIS, UnitKind::Legion, Faction::Rome, &config);
        assert!(outcome.applied());
    }
}
