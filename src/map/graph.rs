//! The theater map graph - node store plus undirected adjacency

use ahash::AHashMap;
use serde::Serialize;

use crate::core::error::{GameError, Result};
use crate::core::types::{Faction, NodeId};
use crate::map::node::{Node, NodeKind};

/// All nodes of the theater and their adjacency
///
/// Iteration follows insertion order so every pass over the map is
/// deterministic for a fixed dataset.
#[derive(Debug, Clone, Serialize)]
pub struct MapGraph {
    nodes: AHashMap<NodeId, Node>,
    order: Vec<NodeId>,
    capitals: Vec<(Faction, NodeId)>,
}

impl MapGraph {
    pub fn new() -> Self {
        Self {
            nodes: AHashMap::new(),
            order: Vec::new(),
            capitals: Vec::new(),
        }
    }

    pub fn insert(&mut self, node: Node) {
        if !self.nodes.contains_key(&node.id) {
            self.order.push(node.id);
        }
        self.nodes.insert(node.id, node);
    }

    /// Add an undirected edge; both adjacency lists are updated
    pub fn connect(&mut self, a: NodeId, b: NodeId) {
        if let Some(node) = self.nodes.get_mut(&a) {
            if !node.adjacent.contains(&b) {
                node.adjacent.push(b);
            }
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            if !node.adjacent.contains(&a) {
                node.adjacent.push(a);
            }
        }
    }

    pub fn set_capital(&mut self, faction: Faction, id: NodeId) {
        self.capitals.retain(|(f, _)| *f != faction);
        self.capitals.push((faction, id));
    }

    pub fn capital(&self, faction: Faction) -> Option<NodeId> {
        self.capitals
            .iter()
            .find(|(f, _)| *f == faction)
            .map(|(_, id)| *id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Neighbors of a node in adjacency-list order
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.adjacent.as_slice())
            .unwrap_or(&[])
    }

    /// All nodes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Mutable pass over all nodes, in no particular order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Check the graph for structural consistency
    ///
    /// Every edge must appear in both endpoints' adjacency lists, all
    /// referenced ids must exist, sea zones must carry no economy, and
    /// both capitals must be present on the map.
    pub fn validate(&self) -> Result<()> {
        for node in self.iter() {
            for &other in &node.adjacent {
                let Some(neighbor) = self.nodes.get(&other) else {
                    return Err(GameError::InvalidMap(format!(
                        "{} links to unknown node {}",
                        node.id, other
                    )));
                };
                if !neighbor.adjacent.contains(&node.id) {
                    return Err(GameError::InvalidMap(format!(
                        "edge {} -> {} is not symmetric",
                        node.id, other
                    )));
                }
            }

            if node.kind == NodeKind::Sea
                && (node.income != 0 || node.manpower_growth != 0 || node.max_manpower != 0)
            {
                return Err(GameError::InvalidMap(format!(
                    "sea zone {} carries an economy",
                    node.id
                )));
            }
        }

        for faction in [Faction::Rome, Faction::Carthage] {
            match self.capital(faction) {
                Some(id) if self.contains(id) => {}
                _ => {
                    return Err(GameError::InvalidMap(format!(
                        "missing capital for {}",
                        faction
                    )))
                }
            }
        }

        Ok(())
    }
}

impl Default for MapGraph {
    fn default() -> Self {
        Self::new()
    }
}
