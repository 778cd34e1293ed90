use super::error::SaveError;
use super::format::{decompress_and_deserialize, serialize_and_compress, RosterSave};
use super::migration::migrate_roster;

use once_cell::sync::Lazy;
use std::fs::{remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Fixed key under which the roster snapshot persists. The key maps to
/// exactly one file in the store directory.
pub const ROSTER_KEY: &str = "rf-lottery::participants";

// Most recently saved/loaded snapshot
static CURRENT_ROSTER: Lazy<Mutex<Option<RosterSave>>> = Lazy::new(|| Mutex::new(None));

pub struct SaveManager;

impl SaveManager {
    /// Get the cached roster snapshot (thread-safe)
    pub fn get_current_roster() -> Option<RosterSave> {
        CURRENT_ROSTER.lock().expect("CURRENT_ROSTER lock poisoned").clone()
    }

    /// Update the cached roster snapshot
    pub fn update_current_roster(save: RosterSave) {
        *CURRENT_ROSTER.lock().expect("CURRENT_ROSTER lock poisoned") = Some(save);
    }

    /// Clear the cached roster snapshot
    pub fn clear_current_roster() {
        *CURRENT_ROSTER.lock().expect("CURRENT_ROSTER lock poisoned") = None;
    }

    /// Snapshot the global session state
    pub fn collect_from_session() -> RosterSave {
        crate::state::get_state().to_save()
    }

    /// Apply a loaded snapshot to the global session state
    pub fn apply_to_session(save: &RosterSave) -> Result<(), SaveError> {
        crate::state::set_state(crate::state::RaffleState::from_save(save));
        Ok(())
    }

    /// Save the roster under the fixed store key
    pub fn save_roster() -> Result<(), SaveError> {
        let current = Self::get_current_roster().unwrap_or_else(Self::collect_from_session);

        let path = Self::roster_path();
        Self::save_to_path(&path, &current)?;
        Self::update_current_roster(current);

        log::info!("Roster saved under key '{}'", ROSTER_KEY);
        Ok(())
    }

    /// Load the roster from the fixed store key and apply it to the
    /// global session state
    pub fn load_roster() -> Result<RosterSave, SaveError> {
        let path = Self::roster_path();
        let save = Self::load_from_path(&path)?;

        Self::apply_to_session(&save)?;
        Self::update_current_roster(save.clone());

        log::info!("Roster loaded from key '{}'", ROSTER_KEY);
        Ok(save)
    }

    /// Check if a roster snapshot exists
    pub fn roster_exists() -> bool {
        Self::roster_path().exists()
    }

    /// Delete the persisted roster snapshot
    pub fn delete_roster() -> Result<(), SaveError> {
        let path = Self::roster_path();
        if path.exists() {
            remove_file(&path)?;
            log::info!("Deleted roster under key '{}'", ROSTER_KEY);
        }

        Ok(())
    }

    /// Get snapshot metadata for display without touching session state
    pub fn get_roster_info() -> Result<Option<RosterInfo>, SaveError> {
        let path = Self::roster_path();
        if !path.exists() {
            return Ok(None);
        }

        let save = Self::load_from_path(&path)?;

        Ok(Some(RosterInfo {
            timestamp: save.timestamp,
            version: save.version,
            entrant_count: save.entrants.len(),
            total_chances: save.entrants.iter().map(|e| e.chances as u64).sum(),
        }))
    }

    // Private helper methods

    fn roster_path() -> PathBuf {
        Self::store_dir().join(Self::file_name_for_key(ROSTER_KEY))
    }

    fn file_name_for_key(key: &str) -> String {
        let stem: String =
            key.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect();
        format!("{}.dat", stem)
    }

    fn store_dir() -> PathBuf {
        // The embedding host decides the real data directory; default to
        // a local store next to the working directory
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("store")
    }

    fn save_to_path(path: &Path, save: &RosterSave) -> Result<(), SaveError> {
        // Ensure store directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Serialize and compress
        let data = serialize_and_compress(save)?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;

            // sync_all ensures data is written to disk (portable fsync)
            file.sync_all()?;
        }

        // Atomic rename
        rename(&temp_path, path)?;

        log::debug!("Saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    fn load_from_path(path: &Path) -> Result<RosterSave, SaveError> {
        if !path.exists() {
            return Err(SaveError::FileNotFound { path: path.display().to_string() });
        }

        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let mut save = decompress_and_deserialize(&data)?;

        // Apply migrations if needed
        save = migrate_roster(save)?;

        log::debug!("Loaded {} bytes from {:?}", data.len(), path);
        Ok(save)
    }
}

/// Snapshot metadata for display
#[derive(Debug, Clone)]
pub struct RosterInfo {
    pub timestamp: u64,
    pub version: u32,
    pub entrant_count: usize,
    pub total_chances: u64,
}

impl RosterInfo {
    pub fn format_timestamp(&self) -> String {
        use chrono::TimeZone;

        chrono::Utc
            .timestamp_millis_opt(self.timestamp as i64)
            .single()
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn get_display_text(&self) -> String {
        format!(
            "{} entrant(s), {} total chances, saved {}",
            self.entrant_count,
            self.total_chances,
            self.format_timestamp()
        )
    }
}
