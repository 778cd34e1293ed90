pub mod raffle_json;

pub use raffle_json::{
    get_roster_json, register_entrant_json, remove_entrant_json, reset_result_json,
    run_draw_json, set_requested_winners_json, update_entrant_json,
};
