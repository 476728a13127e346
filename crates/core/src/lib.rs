//! Domain types and pure logic for the folio editorial workflow:
//! submission state machine, publication role hierarchy, revision
//! diffing, and notification rendering. No I/O lives here.

pub mod error;
pub mod notify;
pub mod revision;
pub mod roles;
pub mod submission;
pub mod types;
