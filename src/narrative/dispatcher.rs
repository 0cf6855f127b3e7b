//! Fire-and-forget narrative dispatch
//!
//! The tick engine submits requests and drains finished prose through a
//! pair of unbounded channels; a background task owns the narrator. The
//! engine never awaits: a slow or failed request costs nothing but the
//! missing flavor text, and the deterministic fallback already logged
//! stands permanently (no retry).

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::types::{Day, Faction};
use crate::narrative::Narrator;

/// A narration request, tagged with enough context to splice the result
/// into the log sensibly however late it arrives
#[derive(Debug, Clone)]
pub enum NarrativeRequest {
    Battle {
        day: Day,
        location: String,
        winner: Faction,
        loser: Faction,
    },
    Yearly { day: Day, summary: String },
}

impl NarrativeRequest {
    fn day(&self) -> Day {
        match self {
            NarrativeRequest::Battle { day, .. } => *day,
            NarrativeRequest::Yearly { day, .. } => *day,
        }
    }
}

/// Finished prose, tagged with the day it describes
#[derive(Debug, Clone)]
pub struct NarrativeResult {
    pub describes_day: Day,
    pub text: String,
}

/// The engine-side handle to the narrative task
///
/// `disabled()` builds a no-op handle for tests and offline runs:
/// submissions are dropped and drains yield nothing.
pub struct NarrativeHandle {
    tx: Option<mpsc::UnboundedSender<NarrativeRequest>>,
    rx: Option<mpsc::UnboundedReceiver<NarrativeResult>>,
}

impl NarrativeHandle {
    pub fn disabled() -> Self {
        Self { tx: None, rx: None }
    }

    /// Spawn the background narrative task; requires a tokio runtime
    pub fn spawn(narrator: Arc<dyn Narrator>) -> Self {
        let (req_tx, mut req_rx) = mpsc::unbounded_channel::<NarrativeRequest>();
        let (res_tx, res_rx) = mpsc::unbounded_channel::<NarrativeResult>();

        tokio::spawn(async move {
            while let Some(request) = req_rx.recv().await {
                let narrator = narrator.clone();
                let res_tx = res_tx.clone();
                tokio::spawn(async move {
                    let day = request.day();
                    let outcome = match request {
                        NarrativeRequest::Battle {
                            location,
                            winner,
                            loser,
                            ..
                        } => narrator.report_battle(location, winner, loser).await,
                        NarrativeRequest::Yearly { summary, .. } => {
                            narrator.report_yearly(summary).await
                        }
                    };

                    match outcome {
                        Ok(text) => {
                            let _ = res_tx.send(NarrativeResult {
                                describes_day: day,
                                text,
                            });
                        }
                        Err(e) => {
                            // Fallback text already logged; nothing to retry
                            tracing::warn!(day, error = %e, "narrative request failed");
                        }
                    }
                });
            }
        });

        Self {
            tx: Some(req_tx),
            rx: Some(res_rx),
        }
    }

    pub fn submit(&mut self, request: NarrativeRequest) {
        if let Some(tx) = &self.tx {
            // A closed channel means the runtime is gone; drop silently
            let _ = tx.send(request);
        }
    }

    /// Drain one finished result, if any arrived
    pub fn try_recv(&mut self) -> Option<NarrativeResult> {
        self.rx.as_mut()?.try_recv().ok()
    }
}
