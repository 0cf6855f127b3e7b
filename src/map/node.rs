//! Map nodes - the fixed locations of the theater

use serde::Serialize;

use crate::core::types::{Faction, NodeId, Vec2};

/// Terrain class of a node, deciding who can recruit, fight well,
/// and take ownership there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    City,
    Port,
    Sea,
}

impl NodeKind {
    pub fn is_sea(&self) -> bool {
        matches!(self, NodeKind::Sea)
    }
}

/// A single location on the theater map
///
/// Nodes are created once at world initialization and mutated in place
/// (owner, fortification, manpower) for the game's lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub name: &'static str,
    pub kind: NodeKind,
    pub position: Vec2,
    pub owner: Option<Faction>,
    /// Gold collected once a year on the autumn day
    pub income: u32,
    /// Local manpower gained per day while faction-owned
    pub manpower_growth: u32,
    pub manpower: u32,
    pub max_manpower: u32,
    /// Fortification level 0..=3; reset to 0 on conquest
    pub fortification: u8,
    /// Adjacent node keys in a stable order (symmetric by construction)
    pub adjacent: Vec<NodeId>,
}

impl Node {
    pub fn city(id: NodeId, name: &'static str, position: Vec2) -> Self {
        Self::new(id, name, NodeKind::City, position)
    }

    pub fn port(id: NodeId, name: &'static str, position: Vec2) -> Self {
        Self::new(id, name, NodeKind::Port, position)
    }

    /// Sea zones carry no economy of their own; owning one is a
    /// trade-route abstraction worth daily trade gold.
    pub fn sea(id: NodeId, name: &'static str, position: Vec2) -> Self {
        Self::new(id, name, NodeKind::Sea, position)
    }

    fn new(id: NodeId, name: &'static str, kind: NodeKind, position: Vec2) -> Self {
        Self {
            id,
            name,
            kind,
            position,
            owner: None,
            income: 0,
            manpower_growth: 0,
            manpower: 0,
            max_manpower: 0,
            fortification: 0,
            adjacent: Vec::new(),
        }
    }

    pub fn owned_by(mut self, faction: Faction) -> Self {
        self.owner = Some(faction);
        self
    }

    pub fn with_income(mut self, income: u32) -> Self {
        self.income = income;
        self
    }

    pub fn with_manpower(mut self, growth: u32, max: u32, current: u32) -> Self {
        self.manpower_growth = growth;
        self.max_manpower = max;
        self.manpower = current.min(max);
        self
    }

    pub fn is_adjacent_to(&self, other: NodeId) -> bool {
        self.adjacent.contains(&other)
    }
}
