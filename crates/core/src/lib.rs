//! Domain layer for the actor image lookup service.
//!
//! Holds the stored-record types, the collaborator traits the lookup depends
//! on, and the lookup orchestrator itself. No I/O lives here; the database
//! and object-store adapters are in `actorstats-db` and `actorstats-storage`.

pub mod error;
pub mod lookup;
pub mod record;
pub mod types;
