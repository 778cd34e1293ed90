// Raffle JSON API Layer
// Connects a UI host to the session state without linking against its types

use crate::models::{Entrant, EntrantDraft};
use crate::state::{get_state, get_state_mut};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ========== Request/Response Structures ==========

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateEntrantRequest {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub chances: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveEntrantRequest {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetRequestedWinnersRequest {
    pub count: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntrantResponse {
    pub success: bool,
    pub entrant: Option<Entrant>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveEntrantResponse {
    pub success: bool,
    pub removed: Option<Entrant>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RosterResponse {
    pub success: bool,
    pub entrants: Vec<Entrant>,
    pub total_chances: u64,
    pub requested_winners: u32,
    pub winners: Vec<Entrant>,
    pub last_draw_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetRequestedWinnersResponse {
    pub success: bool,
    /// Count actually in effect after clamping to the roster size
    pub requested_winners: u32,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DrawResponse {
    pub success: bool,
    pub winners: Vec<Entrant>,
    pub drawn_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub success: bool,
    pub error: Option<String>,
}

const SERIALIZE_FALLBACK: &str = r#"{"success":false,"error":"Serialization failed"}"#;

fn respond<T: Serialize>(response: &T) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| SERIALIZE_FALLBACK.to_string())
}

// ========== Public API Functions ==========

/// Register a new entrant
pub fn register_entrant_json(request_json: &str) -> String {
    let draft: EntrantDraft = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            return respond(&EntrantResponse {
                success: false,
                entrant: None,
                error: Some(format!("Invalid request format: {}", e)),
            });
        }
    };

    match get_state_mut().add_entrant(draft) {
        Ok(entrant) => {
            respond(&EntrantResponse { success: true, entrant: Some(entrant), error: None })
        }
        Err(e) => {
            respond(&EntrantResponse { success: false, entrant: None, error: Some(e.to_string()) })
        }
    }
}

/// Edit an existing entrant
pub fn update_entrant_json(request_json: &str) -> String {
    let request: UpdateEntrantRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            return respond(&EntrantResponse {
                success: false,
                entrant: None,
                error: Some(format!("Invalid request format: {}", e)),
            });
        }
    };

    let draft = EntrantDraft {
        name: request.name,
        contact: request.contact,
        chances: request.chances,
    };

    match get_state_mut().update_entrant(&request.id, draft) {
        Ok(entrant) => {
            respond(&EntrantResponse { success: true, entrant: Some(entrant), error: None })
        }
        Err(e) => {
            respond(&EntrantResponse { success: false, entrant: None, error: Some(e.to_string()) })
        }
    }
}

/// Remove an entrant. Removing an id that is no longer registered is
/// not an error; `removed` is null in that case.
pub fn remove_entrant_json(request_json: &str) -> String {
    let request: RemoveEntrantRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            return respond(&RemoveEntrantResponse {
                success: false,
                removed: None,
                error: Some(format!("Invalid request format: {}", e)),
            });
        }
    };

    let removed = get_state_mut().remove_entrant(&request.id);
    respond(&RemoveEntrantResponse { success: true, removed, error: None })
}

/// Fetch the full session view: roster, totals, and the current result
pub fn get_roster_json() -> String {
    let state = get_state();

    respond(&RosterResponse {
        success: true,
        entrants: state.roster.entrants().to_vec(),
        total_chances: state.roster.total_chances(),
        requested_winners: state.requested_winners,
        winners: state.winners.clone(),
        last_draw_at: state.last_draw_at,
        error: None,
    })
}

/// Set the winner count for the next draw; responds with the clamped
/// value actually in effect
pub fn set_requested_winners_json(request_json: &str) -> String {
    let request: SetRequestedWinnersRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            return respond(&SetRequestedWinnersResponse {
                success: false,
                requested_winners: 0,
                error: Some(format!("Invalid request format: {}", e)),
            });
        }
    };

    let mut state = get_state_mut();
    state.set_requested_winners(request.count);

    respond(&SetRequestedWinnersResponse {
        success: true,
        requested_winners: state.requested_winners,
        error: None,
    })
}

/// Run a draw over the current roster with a fresh random source. An
/// empty roster yields an empty winner list, not an error.
pub fn run_draw_json() -> String {
    let mut state = get_state_mut();
    let winners = state.run_draw();

    respond(&DrawResponse { success: true, winners, drawn_at: state.last_draw_at, error: None })
}

/// Clear the current draw result
pub fn reset_result_json() -> String {
    get_state_mut().reset_result();
    respond(&ResetResponse { success: true, error: None })
}
