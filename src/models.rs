//! Domain model mirroring the SQLite schema and passed between the store,
//! the controllers, and the presentation layer. The type stays a light-weight
//! data holder so persistence and screen logic can each own their half of the
//! rules: the store assigns identifiers, the controllers enforce the required
//! fields.

use std::fmt;

#[derive(Debug, Clone, Default)]
/// A customer record, the sole persisted entity of the application.
pub struct Cliente {
    /// Primary key from the database. `0` marks a record that has not been
    /// persisted yet; the store assigns the real key on first save and it
    /// never changes afterwards.
    pub id: i64,
    /// First name. Required; controllers reject blank values before saving.
    pub name: String,
    /// Last name. Required.
    pub last_name: String,
    /// Age in years. Must be a positive integer.
    pub age: i64,
    /// Street address. Required.
    pub address: String,
}

impl Cliente {
    /// Whether the record still lives only in memory (`id == 0`). The store
    /// uses this to pick between INSERT and UPDATE.
    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}

impl fmt::Display for Cliente {
    /// Write `Name LastName`, the form lists and window titles use.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.last_name)
    }
}
