//! Repository layer for battle sessions.
//!
//! Sessions are the only data that changes during play. Character stats and
//! ownership are handled by registries (see [`crate::oracle`]), not here.

mod error;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use memory::InMemorySessionStore;
pub use traits::{SessionEntry, SessionStore};
