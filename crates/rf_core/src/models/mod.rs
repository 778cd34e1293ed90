pub mod entrant;

pub use entrant::{normalize_contact, Entrant, EntrantDraft};
