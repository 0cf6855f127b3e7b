//! Simulation - owns the world and everything a tick needs
//!
//! One `Simulation` value serializes ticks and player commands: both
//! take `&mut self`, so no command can ever read a world that a tick is
//! still mutating.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::command::{self, CommandOutcome};
use crate::core::config::SimulationConfig;
use crate::core::types::{Faction, NodeId, UnitKind};
use crate::engine::tick::{run_world_tick, TickContext};
use crate::narrative::NarrativeHandle;
use crate::world::events::{EventLog, GameEvent};
use crate::world::state::World;

pub struct Simulation {
    pub world: World,
    pub log: EventLog,
    pub config: SimulationConfig,
    rng: ChaCha8Rng,
    narrative: NarrativeHandle,
    ai_factions: Vec<Faction>,
}

impl Simulation {
    pub fn new(world: World, config: SimulationConfig, seed: u64) -> Self {
        Self {
            world,
            log: EventLog::new(),
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            narrative: NarrativeHandle::disabled(),
            // The player commands Rome by default
            ai_factions: vec![Faction::Carthage],
        }
    }

    /// The standard Punic Wars scenario
    pub fn standard(seed: u64) -> Self {
        let config = SimulationConfig::default();
        let world = World::standard(&config);
        Self::new(world, config, seed)
    }

    /// Attach a live narrative service
    pub fn with_narrative(mut self, narrative: NarrativeHandle) -> Self {
        self.narrative = narrative;
        self
    }

    /// Hand both factions to the opponent policy (spectator mode)
    pub fn observer(mut self) -> Self {
        self.ai_factions = vec![Faction::Rome, Faction::Carthage];
        self
    }

    pub fn ai_factions(&self) -> &[Faction] {
        &self.ai_factions
    }

    /// Advance the world one tick
    pub fn tick(&mut self) {
        let mut ctx = TickContext {
            config: &self.config,
            rng: &mut self.rng,
            narrative: &mut self.narrative,
            ai_factions: &self.ai_factions,
        };
        run_world_tick(&mut self.world, &mut self.log, &mut ctx);
    }

    pub fn recruit(&mut self, node: NodeId, kind: UnitKind, faction: Faction) -> CommandOutcome {
        let outcome = command::recruit(&mut self.world, node, kind, faction, &self.config);
        if outcome.applied() {
            self.log
                .append(self.world.day, GameEvent::UnitRecruited { faction, kind, node });
        }
        outcome
    }

    pub fn fortify(&mut self, node: NodeId, faction: Faction) -> CommandOutcome {
        let outcome = command::fortify(&mut self.world, node, faction, &self.config);
        if outcome.applied() {
            let level = self
                .world
                .graph
                .get(node)
                .map(|n| n.fortification)
                .unwrap_or_default();
            self.log
                .append(self.world.day, GameEvent::NodeFortified { node, level });
        }
        outcome
    }

    pub fn move_units(&mut self, from: NodeId, to: NodeId, faction: Faction) -> CommandOutcome {
        command::move_units(&mut self.world, from, to, faction)
    }

    pub fn rally(&mut self, target: NodeId, faction: Faction) -> CommandOutcome {
        command::rally(&mut self.world, target, faction)
    }

    pub fn halt(&mut self, target: NodeId, faction: Faction) -> CommandOutcome {
        command::halt(&mut self.world, target, faction)
    }

    /// UI cursor passthrough
    pub fn select(&mut self, node: Option<NodeId>) {
        self.world.set_selected(node);
    }
}
