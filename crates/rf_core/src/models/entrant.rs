use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered raffle entrant.
///
/// `id` is the stable identity: it is the only field used to deduplicate
/// entrants and to decide whether a previously drawn winner is still
/// registered. `chances` is the relative probability mass for a single
/// draw step; an entrant with `chances == 0` is ineligible and never
/// enters the draw pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub chances: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for an entrant. Identity and timestamps are
/// assigned by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrantDraft {
    pub name: String,
    pub contact: String,
    pub chances: u32,
}

impl Entrant {
    /// Create a new entrant with a generated ID and current timestamps
    pub fn new(name: impl Into<String>, contact: impl Into<String>, chances: u32) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            contact: contact.into(),
            chances,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_draft(draft: EntrantDraft) -> Self {
        Self::new(draft.name, draft.contact, draft.chances)
    }

    /// Whether this entrant participates in draws at all
    pub fn is_eligible(&self) -> bool {
        self.chances > 0
    }

    /// Contact in the canonical form used for duplicate detection
    pub fn normalized_contact(&self) -> String {
        normalize_contact(&self.contact)
    }

    /// Overwrite the editable fields and refresh `updated_at`
    pub fn apply_draft(&mut self, draft: EntrantDraft) {
        self.name = draft.name;
        self.contact = draft.contact;
        self.chances = draft.chances;
        self.touch();
    }

    /// Update the entrant's timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Canonical contact form: surrounding whitespace stripped, lowercased.
/// Two entrants with the same normalized contact are considered the same
/// person.
pub fn normalize_contact(contact: &str) -> String {
    contact.trim().to_lowercase()
}
