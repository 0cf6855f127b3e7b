//! Shortest-route search over the theater graph
//!
//! Breadth-first search guarantees a shortest hop-count route; ties fall
//! to adjacency-list visitation order, which is stable for a fixed world.
//! Boarding a sea zone from land requires a friendly fleet on station in
//! that zone.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};

use crate::core::types::{Faction, NodeId};
use crate::world::state::World;

/// Outcome of a route request
///
/// `Unreachable` is an ordinary value, not an error: a blockaded or
/// disconnected request is a fact about the map, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum PathResult {
    /// Route from start (exclusive) to end (inclusive); empty when
    /// start == end
    Found(Vec<NodeId>),
    Unreachable,
}

impl PathResult {
    pub fn found(self) -> Option<Vec<NodeId>> {
        match self {
            PathResult::Found(path) => Some(path),
            PathResult::Unreachable => None,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, PathResult::Unreachable)
    }
}

/// Can `faction` traverse the edge `from -> to` right now?
///
/// Entering a sea zone from land needs a friendly fleet present in that
/// zone; every other edge is open.
fn edge_usable(world: &World, from: NodeId, to: NodeId, faction: Faction) -> bool {
    let (Some(from_node), Some(to_node)) = (world.graph.get(from), world.graph.get(to)) else {
        return false;
    };

    if !from_node.kind.is_sea() && to_node.kind.is_sea() {
        return world.fleet_in_zone(to, faction);
    }

    true
}

/// Neighbors of `node` that `faction` may enter, in adjacency order
///
/// Shared between the pathfinder and the opponent policy's move rule.
pub fn legal_neighbors(world: &World, node: NodeId, faction: Faction) -> Vec<NodeId> {
    world
        .graph
        .neighbors(node)
        .iter()
        .copied()
        .filter(|&next| edge_usable(world, node, next, faction))
        .collect()
}

/// Find a shortest route for `faction` from `start` to `end`
pub fn find_path(world: &World, start: NodeId, end: NodeId, faction: Faction) -> PathResult {
    if !world.graph.contains(start) || !world.graph.contains(end) {
        return PathResult::Unreachable;
    }

    if start == end {
        return PathResult::Found(Vec::new());
    }

    let mut frontier = VecDeque::new();
    let mut visited = AHashSet::new();
    let mut came_from: AHashMap<NodeId, NodeId> = AHashMap::new();

    frontier.push_back(start);
    visited.insert(start);

    while let Some(current) = frontier.pop_front() {
        for &next in world.graph.neighbors(current) {
            if visited.contains(&next) || !edge_usable(world, current, next, faction) {
                continue;
            }

            visited.insert(next);
            came_from.insert(next, current);

            if next == end {
                let mut path = vec![end];
                let mut cursor = end;
                while let Some(&prev) = came_from.get(&cursor) {
                    if prev == start {
                        break;
                    }
                    path.push(prev);
                    cursor = prev;
                }
                path.reverse();
                return PathResult::Found(path);
            }

            frontier.push_back(next);
        }
    }

    PathResult::Unreachable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::UnitKind;
    use crate::map::theater::{
        ARIMINUM, CAPUA, CARTHAGO, GENUA, MARE_SICULUM, MARE_TYRRHENUM, NEAPOLIS, OSTIA, ROMA,
    };
    use crate::world::unit::Unit;

    fn standard_world() -> World {
        World::standard(&SimulationConfig::default())
    }

    #[test]
    fn test_same_node_is_empty_path() {
        let world = standard_world();
        assert_eq!(
            find_path(&world, ROMA, ROMA, Faction::Rome),
            PathResult::Found(Vec::new())
        );
    }

    #[test]
    fn test_direct_edge_is_single_hop() {
        let world = standard_world();
        assert_eq!(
            find_path(&world, ROMA, CAPUA, Faction::Rome),
            PathResult::Found(vec![CAPUA])
        );
    }

    #[test]
    fn test_overland_route() {
        let world = standard_world();
        let path = find_path(&world, GENUA, CAPUA, Faction::Rome).found().unwrap();
        assert_eq!(path, vec![ARIMINUM, ROMA, CAPUA]);
    }

    #[test]
    fn test_boarding_requires_fleet() {
        let mut world = standard_world();

        // Rome holds Mare Tyrrhenum with a fleet; boarding from Ostia works
        let path = find_path(&world, OSTIA, NEAPOLIS, Faction::Rome).found().unwrap();
        assert_eq!(path, vec![MARE_TYRRHENUM, NEAPOLIS]);

        // Without fleets Carthage cannot board any African sea zone, and
        // there is no land route out of Africa
        world
            .units
            .retain(|u| !(u.faction == Faction::Carthage && u.kind.is_fleet()));
        assert!(find_path(&world, CARTHAGO, ROMA, Faction::Carthage).is_unreachable());
    }

    #[test]
    fn test_fleet_placement_opens_route() {
        let mut world = standard_world();
        world
            .units
            .retain(|u| !(u.faction == Faction::Carthage && u.kind.is_fleet()));
        assert!(find_path(&world, CARTHAGO, ROMA, Faction::Carthage).is_unreachable());

        // One fleet on station is enough: boarding is only checked on the
        // land-to-sea edge, open water is free to cross
        let config = SimulationConfig::default();
        world.units.push(Unit::veteran(
            Faction::Carthage,
            UnitKind::Fleet,
            MARE_SICULUM,
            config.unit_max_strength,
        ));

        let path = find_path(&world, CARTHAGO, ROMA, Faction::Carthage)
            .found()
            .unwrap();
        assert_eq!(path, vec![MARE_SICULUM, MARE_TYRRHENUM, OSTIA, ROMA]);
    }

    #[test]
    fn test_sea_to_land_is_always_open() {
        let world = standard_world();
        // Disembarking needs no fleet check even for Carthage
        let path = find_path(&world, MARE_TYRRHENUM, OSTIA, Faction::Carthage)
            .found()
            .unwrap();
        assert_eq!(path, vec![OSTIA]);
    }

    #[test]
    fn test_legal_neighbors_filters_boarding() {
        let world = standard_world();

        let rome_exits = legal_neighbors(&world, OSTIA, Faction::Rome);
        assert!(rome_exits.contains(&MARE_TYRRHENUM));

        let carthage_exits = legal_neighbors(&world, OSTIA, Faction::Carthage);
        assert!(!carthage_exits.contains(&MARE_TYRRHENUM));
        assert!(carthage_exits.contains(&ROMA));
    }

    #[test]
    fn test_unknown_node_is_unreachable() {
        let world = standard_world();
        assert!(find_path(&world, NodeId("atlantis"), ROMA, Faction::Rome).is_unreachable());
    }
}
