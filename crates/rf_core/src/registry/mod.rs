//! Entrant roster with validation and contact uniqueness.
//!
//! The registry owns the entrant lifecycle: drafts are validated and
//! admitted here, and nowhere else. Iteration order is insertion order;
//! the Drawer relies on a stable relative order of the pool.

use crate::error::{RegistryError, Result};
use crate::models::{normalize_contact, Entrant, EntrantDraft};

#[derive(Debug, Clone, Default)]
pub struct EntrantRegistry {
    entrants: Vec<Entrant>,
}

impl EntrantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from a persisted snapshot. The snapshot is
    /// trusted to satisfy the registry invariants (save-side validation
    /// and migration enforce them).
    pub fn from_entrants(entrants: Vec<Entrant>) -> Self {
        Self { entrants }
    }

    /// Validate and admit a new entrant. Returns a clone of the stored
    /// record with its generated id.
    pub fn add(&mut self, draft: EntrantDraft) -> Result<Entrant> {
        self.validate_draft(&draft, None)?;

        let entrant = Entrant::from_draft(draft);
        self.entrants.push(entrant.clone());
        Ok(entrant)
    }

    /// Validate and apply an edit to an existing entrant. The duplicate
    /// contact check excludes the entrant being edited, so saving a form
    /// without changing the contact is not a conflict.
    pub fn update(&mut self, id: &str, draft: EntrantDraft) -> Result<Entrant> {
        let idx = self
            .entrants
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        self.validate_draft(&draft, Some(id))?;

        let entrant = &mut self.entrants[idx];
        entrant.apply_draft(draft);
        Ok(entrant.clone())
    }

    /// Remove an entrant by id
    pub fn remove(&mut self, id: &str) -> Option<Entrant> {
        if let Some(idx) = self.entrants.iter().position(|e| e.id == id) {
            Some(self.entrants.remove(idx))
        } else {
            None
        }
    }

    /// Get an entrant by id
    pub fn get(&self, id: &str) -> Option<&Entrant> {
        self.entrants.iter().find(|e| e.id == id)
    }

    /// All entrants, in registration order
    pub fn entrants(&self) -> &[Entrant] {
        &self.entrants
    }

    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    pub fn clear(&mut self) {
        self.entrants.clear();
    }

    /// Sum of all chances, eligible or not (the console displays this
    /// next to the draw button)
    pub fn total_chances(&self) -> u64 {
        self.entrants.iter().map(|e| e.chances as u64).sum()
    }

    fn validate_draft(&self, draft: &EntrantDraft, exclude_id: Option<&str>) -> Result<()> {
        if draft.name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }

        if draft.contact.trim().is_empty() {
            return Err(RegistryError::EmptyContact);
        }

        if draft.chances == 0 {
            return Err(RegistryError::InvalidChances(draft.chances));
        }

        let normalized = normalize_contact(&draft.contact);
        let duplicate = self
            .entrants
            .iter()
            .any(|e| e.normalized_contact() == normalized && exclude_id != Some(e.id.as_str()));

        if duplicate {
            return Err(RegistryError::DuplicateContact(normalized));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, contact: &str, chances: u32) -> EntrantDraft {
        EntrantDraft { name: name.to_string(), contact: contact.to_string(), chances }
    }

    #[test]
    fn test_add_and_get() {
        let mut registry = EntrantRegistry::new();

        let ana = registry.add(draft("Ana", "ana@example.com", 2)).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&ana.id).unwrap().name, "Ana");
        assert_eq!(registry.total_chances(), 2);
    }

    #[test]
    fn test_add_rejects_invalid_drafts() {
        let mut registry = EntrantRegistry::new();

        assert_eq!(registry.add(draft("  ", "a@example.com", 1)), Err(RegistryError::EmptyName));
        assert_eq!(registry.add(draft("Ana", "   ", 1)), Err(RegistryError::EmptyContact));
        assert_eq!(
            registry.add(draft("Ana", "a@example.com", 0)),
            Err(RegistryError::InvalidChances(0))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_contact_is_case_and_whitespace_insensitive() {
        let mut registry = EntrantRegistry::new();
        registry.add(draft("Ana", "ana@example.com", 1)).unwrap();

        let result = registry.add(draft("Impostor", "  ANA@example.com ", 3));

        assert_eq!(result, Err(RegistryError::DuplicateContact("ana@example.com".to_string())));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_update_excludes_self_from_duplicate_check() {
        let mut registry = EntrantRegistry::new();
        let ana = registry.add(draft("Ana", "ana@example.com", 1)).unwrap();
        registry.add(draft("Bo", "bo@example.com", 1)).unwrap();

        // Keeping the same contact is fine
        let updated = registry.update(&ana.id, draft("Ana Maria", "ana@example.com", 4)).unwrap();
        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.chances, 4);

        // Taking another entrant's contact is not
        let result = registry.update(&ana.id, draft("Ana", "BO@example.com", 1));
        assert_eq!(result, Err(RegistryError::DuplicateContact("bo@example.com".to_string())));
    }

    #[test]
    fn test_update_unknown_id() {
        let mut registry = EntrantRegistry::new();

        let result = registry.update("missing", draft("Ana", "ana@example.com", 1));

        assert_eq!(result, Err(RegistryError::NotFound("missing".to_string())));
    }

    #[test]
    fn test_remove() {
        let mut registry = EntrantRegistry::new();
        let ana = registry.add(draft("Ana", "ana@example.com", 1)).unwrap();

        let removed = registry.remove(&ana.id).unwrap();
        assert_eq!(removed.id, ana.id);
        assert!(registry.is_empty());
        assert!(registry.remove(&ana.id).is_none());

        // The freed contact can be registered again
        registry.add(draft("Ana", "ana@example.com", 1)).unwrap();
    }

    #[test]
    fn test_registration_order_is_preserved() {
        let mut registry = EntrantRegistry::new();
        for i in 0..5 {
            registry.add(draft(&format!("E{}", i), &format!("e{}@example.com", i), 1)).unwrap();
        }

        let names: Vec<&str> = registry.entrants().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["E0", "E1", "E2", "E3", "E4"]);
    }
}
