//! Global Raffle Session State
//!
//! This module provides a thread-safe global state manager for the
//! runtime raffle session. The `RaffleState` struct holds the active
//! roster and draw result and can be converted to/from `RosterSave` for
//! persistence.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rand::Rng;
use std::sync::{Arc, RwLock};

use crate::draw::{draw_winners, draw_winners_with_rng};
use crate::error::Result;
use crate::models::{Entrant, EntrantDraft};
use crate::registry::EntrantRegistry;
use crate::save::format::current_timestamp;
use crate::save::{RosterSave, ROSTER_VERSION};

/// Global session state singleton
pub static RAFFLE_STATE: Lazy<Arc<RwLock<RaffleState>>> =
    Lazy::new(|| Arc::new(RwLock::new(RaffleState::default())));

/// Runtime raffle session state
///
/// Holds the entrant roster, the operator's requested winner count, and
/// the most recent draw result. It can be converted to `RosterSave` for
/// persistence and restored from it.
#[derive(Debug, Clone)]
pub struct RaffleState {
    /// Registered entrants, in registration order
    pub roster: EntrantRegistry,

    /// Winner count for the next draw, clamped to `1..=roster.len()`
    pub requested_winners: u32,

    /// Winners of the most recent draw, in draw order
    pub winners: Vec<Entrant>,

    /// When the current winner list was drawn
    pub last_draw_at: Option<DateTime<Utc>>,
}

impl Default for RaffleState {
    fn default() -> Self {
        Self::new()
    }
}

impl RaffleState {
    /// Create a new empty session
    pub fn new() -> Self {
        Self {
            roster: EntrantRegistry::new(),
            requested_winners: 1,
            winners: Vec::new(),
            last_draw_at: None,
        }
    }

    /// Convert the session to the persisted snapshot format. Draw
    /// results are not persisted.
    pub fn to_save(&self) -> RosterSave {
        RosterSave {
            version: ROSTER_VERSION,
            timestamp: current_timestamp(),
            entrants: self.roster.entrants().to_vec(),
            requested_winners: self.requested_winners,
        }
    }

    /// Restore a session from a persisted snapshot
    pub fn from_save(save: &RosterSave) -> Self {
        let mut state = Self {
            roster: EntrantRegistry::from_entrants(save.entrants.clone()),
            requested_winners: save.requested_winners,
            winners: Vec::new(),
            last_draw_at: None,
        };
        state.requested_winners = state.clamped(state.requested_winners);
        state
    }

    // ========================
    // Roster Management
    // ========================

    /// Register a new entrant
    pub fn add_entrant(&mut self, draft: EntrantDraft) -> Result<Entrant> {
        let entrant = self.roster.add(draft)?;
        self.sync_after_roster_change();
        Ok(entrant)
    }

    /// Edit an existing entrant
    pub fn update_entrant(&mut self, id: &str, draft: EntrantDraft) -> Result<Entrant> {
        let entrant = self.roster.update(id, draft)?;
        self.sync_after_roster_change();
        Ok(entrant)
    }

    /// Remove an entrant; winners referring to it are pruned
    pub fn remove_entrant(&mut self, id: &str) -> Option<Entrant> {
        let removed = self.roster.remove(id);
        if removed.is_some() {
            self.sync_after_roster_change();
        }
        removed
    }

    /// Drop the whole roster and any draw result
    pub fn clear_entrants(&mut self) {
        self.roster.clear();
        self.winners.clear();
        self.last_draw_at = None;
        self.requested_winners = 1;
        log::info!("Roster cleared");
    }

    // ========================
    // Draw Control
    // ========================

    /// Set the winner count for the next draw, clamped to the valid range
    pub fn set_requested_winners(&mut self, count: u32) {
        self.requested_winners = self.clamped(count);
    }

    /// Run a draw over the current roster with a fresh random source
    pub fn run_draw(&mut self) -> Vec<Entrant> {
        if self.roster.is_empty() {
            return Vec::new();
        }
        let winners = draw_winners(self.roster.entrants(), self.requested_winners as i64);
        self.apply_draw_result(winners)
    }

    /// Run a draw with an injected random source (deterministic tests)
    pub fn run_draw_with_rng(&mut self, rng: &mut impl Rng) -> Vec<Entrant> {
        if self.roster.is_empty() {
            return Vec::new();
        }
        let winners =
            draw_winners_with_rng(self.roster.entrants(), self.requested_winners as i64, rng);
        self.apply_draw_result(winners)
    }

    /// Clear the draw result
    pub fn reset_result(&mut self) {
        self.winners.clear();
        self.last_draw_at = None;
    }

    fn apply_draw_result(&mut self, winners: Vec<Entrant>) -> Vec<Entrant> {
        log::info!(
            "Draw selected {} winner(s) of {} requested from {} entrant(s)",
            winners.len(),
            self.requested_winners,
            self.roster.len()
        );

        self.last_draw_at = if winners.is_empty() { None } else { Some(Utc::now()) };
        self.winners = winners.clone();
        winners
    }

    /// Re-establish the session invariants after a roster mutation:
    /// the requested count stays within `1..=roster.len()`, and winners
    /// that are no longer registered are dropped.
    fn sync_after_roster_change(&mut self) {
        self.requested_winners = self.clamped(self.requested_winners);

        let roster = &self.roster;
        self.winners.retain(|w| roster.get(&w.id).is_some());
        if self.winners.is_empty() {
            self.last_draw_at = None;
        }
    }

    fn clamped(&self, count: u32) -> u32 {
        if self.roster.is_empty() {
            1
        } else {
            count.clamp(1, self.roster.len() as u32)
        }
    }
}

// ========================
// Global State Access Functions
// ========================

/// Get a read lock on the global session state
pub fn get_state() -> std::sync::RwLockReadGuard<'static, RaffleState> {
    RAFFLE_STATE.read().expect("RAFFLE_STATE lock poisoned")
}

/// Get a write lock on the global session state
pub fn get_state_mut() -> std::sync::RwLockWriteGuard<'static, RaffleState> {
    RAFFLE_STATE.write().expect("RAFFLE_STATE lock poisoned")
}

/// Reset the global state to an empty session
pub fn reset_state() {
    *RAFFLE_STATE.write().expect("RAFFLE_STATE lock poisoned") = RaffleState::new();
}

/// Replace the entire global state
pub fn set_state(new_state: RaffleState) {
    *RAFFLE_STATE.write().expect("RAFFLE_STATE lock poisoned") = new_state;
}
