//! Game event log - the persistent record consumers display

use serde::Serialize;

use crate::core::types::{Day, Faction, NodeId, UnitKind};

/// Events generated during ticks and commands
///
/// Appended to the persistent log in the order produced; consumers
/// display only a recent suffix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// The winter flag flipped on a season edge
    SeasonChanged { winter: bool },
    /// Autumn tax collection
    AnnualIncome { faction: Faction, amount: u64 },
    UnitRecruited {
        faction: Faction,
        kind: UnitKind,
        node: NodeId,
    },
    NodeFortified { node: NodeId, level: u8 },
    /// A battle was resolved; `report` starts as the deterministic
    /// fallback text and stands permanently if the narrative service
    /// never delivers
    BattleFought {
        location: NodeId,
        winner: Faction,
        loser: Faction,
        report: String,
    },
    NodeCaptured { node: NodeId, by: Faction },
    GameOver { winner: Faction },
    /// Deterministic state-of-the-war summary logged at the thaw; the
    /// narrative service may later deliver prose for the same day
    YearlyReport { summary: String },
    /// Late-arriving narrative prose, tagged with the day it describes
    NarrativeDelivered { describes_day: Day, text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub day: Day,
    pub event: GameEvent,
}

/// Append-only event log, unbounded by design
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, day: Day, event: GameEvent) {
        self.entries.push(LogEntry { day, event });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The most recent `n` entries, oldest first
    pub fn recent(&self, n: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
