//! Runtime orchestration for turn-based battles.
//!
//! This crate wires the pure rules of `battle-core` to concrete collaborators:
//! a session store with per-session exclusion, a clock, registries and an
//! event bus. Consumers embed [`Arena`] and call its operations from any
//! thread; sessions are independent and proceed in parallel.
//!
//! Modules are organized by responsibility:
//! - [`arena`] hosts the turn engine service and its builder
//! - [`api`] exposes the error types downstream clients handle
//! - [`events`] provides the event sink contract and a topic-based bus
//! - [`oracle`] holds in-memory character and delegation registries
//! - [`repository`] stores battle sessions
//! - [`clock`] and [`entropy`] supply time and randomness
//! - [`testing`] ships deterministic collaborators for tests and simulations
pub mod api;
pub mod arena;
pub mod clock;
pub mod config;
pub mod entropy;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod testing;

pub use api::{Result, RuntimeError};
pub use arena::{Arena, ArenaBuilder};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ArenaConfig;
pub use entropy::OsEntropy;
pub use events::{EventBus, EventSink, FanoutSink, RecordingSink, Topic, TracingSink};
pub use oracle::{DelegationError, DelegationRegistry, InMemoryCharacterRegistry};
pub use repository::{InMemorySessionStore, RepositoryError, SessionEntry, SessionStore};
