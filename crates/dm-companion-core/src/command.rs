//! Write requests accepted by the character and encounter contexts.

use uuid::Uuid;

/// A write request such as creating a character or adding one to an
/// encounter.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted name logged by the routes, e.g. `encounter.create_encounter`.
    fn command_type(&self) -> &'static str;

    /// Copied into the metadata of the event the command produces.
    fn correlation_id(&self) -> Uuid;
}
