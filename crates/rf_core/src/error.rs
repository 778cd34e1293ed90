use std::fmt;

/// Errors produced by roster mutation. The Drawer itself has no error
/// taxonomy: every input, however degenerate, maps to a well-defined
/// (possibly empty) winner list.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// Name is empty after trimming
    EmptyName,

    /// Contact is empty after trimming
    EmptyContact,

    /// Chances below the eligible minimum of 1
    InvalidChances(u32),

    /// Another entrant already uses this contact (normalized form)
    DuplicateContact(String),

    /// No entrant with this id
    NotFound(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::EmptyName => write!(f, "Entrant name must not be empty"),
            RegistryError::EmptyContact => write!(f, "Entrant contact must not be empty"),
            RegistryError::InvalidChances(chances) => {
                write!(f, "Chances must be at least 1, got {}", chances)
            }
            RegistryError::DuplicateContact(contact) => {
                write!(f, "An entrant with contact '{}' is already registered", contact)
            }
            RegistryError::NotFound(id) => write!(f, "No entrant with id '{}'", id),
        }
    }
}

impl std::error::Error for RegistryError {}

pub type Result<T> = std::result::Result<T, RegistryError>;
