//! World - the single mutable aggregate the engine, commands, and AI share

use serde::Serialize;

use crate::core::config::SimulationConfig;
use crate::core::types::{Day, Faction, NodeId, UnitId};
use crate::map::graph::MapGraph;
use crate::map::node::Node;
use crate::map::theater;
use crate::world::unit::Unit;

/// The whole game state: map, units, treasuries, calendar, terminal flag
///
/// Exactly one `&mut World` flows through each tick or command; the
/// single-threaded tick contract is what makes in-place mutation safe.
#[derive(Debug, Clone, Serialize)]
pub struct World {
    pub graph: MapGraph,
    pub units: Vec<Unit>,
    gold_rome: u64,
    gold_carthage: u64,
    pub day: Day,
    /// Derived from day-of-year each tick
    pub winter: bool,
    /// UI cursor state; stored here for snapshot consumers, never read
    /// by the simulation itself
    pub selected: Option<NodeId>,
    /// Set once when a capital falls; terminal
    pub winner: Option<Faction>,
}

impl World {
    pub fn new(graph: MapGraph, starting_gold: u64) -> Self {
        Self {
            graph,
            units: Vec::new(),
            gold_rome: starting_gold,
            gold_carthage: starting_gold,
            day: 0,
            winter: false,
            selected: None,
            winner: None,
        }
    }

    /// The standard Punic Wars opening position
    pub fn standard(config: &SimulationConfig) -> Self {
        let mut world = Self::new(theater::standard_graph(), theater::STARTING_GOLD);
        for (faction, kind, at) in theater::starting_units() {
            world
                .units
                .push(Unit::veteran(faction, kind, at, config.unit_max_strength));
        }
        world
    }

    pub fn game_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn gold(&self, faction: Faction) -> u64 {
        match faction {
            Faction::Rome => self.gold_rome,
            Faction::Carthage => self.gold_carthage,
        }
    }

    pub fn earn(&mut self, faction: Faction, amount: u64) {
        match faction {
            Faction::Rome => self.gold_rome += amount,
            Faction::Carthage => self.gold_carthage += amount,
        }
    }

    /// Spend gold if the treasury covers it; overspending is rejected,
    /// the ledger never goes negative
    pub fn try_spend(&mut self, faction: Faction, amount: u64) -> bool {
        let ledger = match faction {
            Faction::Rome => &mut self.gold_rome,
            Faction::Carthage => &mut self.gold_carthage,
        };
        match ledger.checked_sub(amount) {
            Some(rest) => {
                *ledger = rest;
                true
            }
            None => false,
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    pub fn units_at(&self, node: NodeId) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |u| u.location == node)
    }

    /// Is a combat-ready fleet of this faction on station in the zone?
    pub fn fleet_in_zone(&self, zone: NodeId, faction: Faction) -> bool {
        self.units_at(zone)
            .any(|u| u.faction == faction && u.kind.is_fleet() && !u.training)
    }

    pub fn owned_nodes(&self, faction: Faction) -> impl Iterator<Item = &Node> {
        self.graph.iter().filter(move |n| n.owner == Some(faction))
    }

    pub fn set_selected(&mut self, node: Option<NodeId>) {
        self.selected = node;
    }
}
