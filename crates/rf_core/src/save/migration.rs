use super::error::SaveError;
use super::format::RosterSave;
use super::ROSTER_VERSION;

/// Migrate roster data from older versions to the current version
pub fn migrate_roster(mut save: RosterSave) -> Result<RosterSave, SaveError> {
    let original_version = save.version;

    // Apply migrations step by step
    save = match save.version {
        0 => migrate_v0_to_v1(save)?,
        1 => save, // Current version, no migration needed
        _ => {
            return Err(SaveError::VersionMismatch {
                found: save.version,
                expected: ROSTER_VERSION,
            });
        }
    };

    // Update to current version
    save.version = ROSTER_VERSION;
    save.update_timestamp();

    if original_version != ROSTER_VERSION {
        log::info!("Migrated roster from version {} to {}", original_version, ROSTER_VERSION);
    }

    Ok(save)
}

/// Migrate from version 0 to version 1
///
/// Version 0 snapshots came from the unversioned console store and may
/// carry entries the old form never validated. Repair them the way the
/// console repaired its restore path: drop malformed entries, pull
/// zero weights up to the eligible minimum.
fn migrate_v0_to_v1(mut save: RosterSave) -> Result<RosterSave, SaveError> {
    log::info!("Migrating roster from version 0 to 1");

    // 1. Drop entries without an identity or a name
    let before = save.entrants.len();
    save.entrants.retain(|e| !e.id.is_empty() && !e.name.trim().is_empty());
    let dropped = before - save.entrants.len();
    if dropped > 0 {
        log::warn!("Dropped {} malformed entrant(s) during migration", dropped);
    }

    // 2. Every stored entrant is eligible: clamp chances to at least 1
    for entrant in &mut save.entrants {
        if entrant.chances == 0 {
            entrant.chances = 1;
        }
    }

    // 3. A zero requested count predates clamping
    if save.requested_winners == 0 {
        save.requested_winners = 1;
    }

    Ok(save)
}
