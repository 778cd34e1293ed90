use rf_core::{get_state, get_state_mut, reset_state, EntrantDraft, SaveManager, ROSTER_KEY};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔧 Testing Roster Save/Load Integration...");
    println!("📁 Using current directory for the store (store/ subdirectory will be created)");

    // Test 1: Register entrants and draw
    println!("\n🧪 Test 1: Register and draw");
    reset_state();

    {
        let mut state = get_state_mut();
        for (name, contact, chances) in [
            ("Ana", "ana@example.com", 1u32),
            ("Bo", "bo@example.com", 5),
            ("Cy", "cy@example.com", 3),
        ] {
            state.add_entrant(EntrantDraft {
                name: name.to_string(),
                contact: contact.to_string(),
                chances,
            })?;
        }
        state.set_requested_winners(2);

        let winners = state.run_draw();
        if winners.len() != 2 {
            return Err(format!("Expected 2 winners, got {}", winners.len()).into());
        }
        println!(
            "✅ Drew {} winners: {}",
            winners.len(),
            winners.iter().map(|w| w.name.as_str()).collect::<Vec<_>>().join(", ")
        );
    }

    // Test 2: Save the roster under the fixed key
    println!("\n🧪 Test 2: Save roster");
    SaveManager::clear_current_roster();
    SaveManager::save_roster()?;
    println!("✅ Saved roster under key '{}'", ROSTER_KEY);

    if !SaveManager::roster_exists() {
        return Err("Roster snapshot should exist but doesn't".into());
    }
    println!("✅ Snapshot exists");

    if let Some(info) = SaveManager::get_roster_info()? {
        println!("✅ Snapshot info: {}", info.get_display_text());
    } else {
        return Err("Snapshot info should be available".into());
    }

    // Test 3: Wipe the session and load it back
    println!("\n🧪 Test 3: Load roster");
    reset_state();
    SaveManager::clear_current_roster();
    if !get_state().roster.is_empty() {
        return Err("Session should be empty after reset".into());
    }

    let loaded = SaveManager::load_roster()?;
    println!("✅ Loaded {} entrant(s)", loaded.entrants.len());

    {
        let state = get_state();
        if state.roster.len() != 3 || state.requested_winners != 2 {
            return Err(format!(
                "Data integrity failed - expected 3 entrants and requested_winners=2, got {} and {}",
                state.roster.len(),
                state.requested_winners
            )
            .into());
        }
        if !state.winners.is_empty() {
            return Err("Draw results must not survive persistence".into());
        }
    }
    println!("✅ Data integrity verified - roster and requested count match");

    // Cleanup
    SaveManager::delete_roster()?;
    println!("\n🎉 All roster save/load tests passed!");
    Ok(())
}
