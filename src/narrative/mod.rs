//! Narrative text service - injected async flavor-text capability
//!
//! The simulation never blocks on narration: battle and yearly reports
//! are requested fire-and-forget through the dispatcher, and every
//! consumer-visible string has a deterministic local fallback.

pub mod client;
pub mod dispatcher;

use std::future::Future;
use std::pin::Pin;

use crate::core::error::Result;
use crate::core::types::Faction;

pub use client::LlmNarrator;
pub use dispatcher::{NarrativeHandle, NarrativeRequest, NarrativeResult};

/// Boxed future type so `Narrator` stays object-safe
pub type NarrationFuture = Pin<Box<dyn Future<Output = Result<String>> + Send + 'static>>;

/// A source of period prose for battles and yearly summaries
///
/// Implementations may fail or be unavailable; callers must fall back
/// to the deterministic texts below and never block a tick on a result.
pub trait Narrator: Send + Sync {
    fn report_battle(&self, location: String, winner: Faction, loser: Faction)
        -> NarrationFuture;

    fn report_yearly(&self, summary: String) -> NarrationFuture;
}

/// The deterministic battle text used until (and unless) the narrative
/// service delivers something better
pub fn fallback_battle_text(winner: Faction, loser: Faction, location: &str) -> String {
    format!("{} defeated {} at {}", winner, loser, location)
}
