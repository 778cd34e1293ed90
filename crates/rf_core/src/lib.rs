//! # rf_core - Weighted Raffle Draw Engine
//!
//! This library provides the draw engine behind the RF Lottery operator
//! console: a weighted winner selection without replacement, the entrant
//! roster around it, and a JSON API for easy integration with UI hosts.
//!
//! ## Features
//! - Weighted sampling without replacement (per-step probability
//!   proportional to an entrant's chances)
//! - Entrant registry with validation and contact uniqueness
//! - Roster persistence under a fixed store key with integrity checks
//! - JSON API for easy integration

pub mod api;
pub mod draw;
pub mod error;
pub mod models;
pub mod registry;
pub mod save;
pub mod state;

// Re-export main API functions
pub use api::{
    get_roster_json, register_entrant_json, remove_entrant_json, reset_result_json,
    run_draw_json, set_requested_winners_json, update_entrant_json,
};

// Re-export the draw engine
pub use draw::{draw_winners, draw_winners_with_rng};
pub use error::{RegistryError, Result};

// Re-export model types
pub use models::{normalize_contact, Entrant, EntrantDraft};
pub use registry::EntrantRegistry;

// Re-export save system
pub use save::{RosterInfo, RosterSave, SaveError, SaveManager, ROSTER_KEY, ROSTER_VERSION};

// Re-export state management
pub use state::{get_state, get_state_mut, reset_state, set_state, RaffleState, RAFFLE_STATE};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
