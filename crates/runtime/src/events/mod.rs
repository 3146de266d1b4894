//! Event delivery for battle observers.
//!
//! The arena hands every event to an [`EventSink`] while it still holds the
//! session's lock, so per-session order is preserved. [`EventBus`] fans
//! events out to async subscribers by topic.

mod bus;
mod sink;

pub use bus::{EventBus, Topic};
pub use sink::{EventSink, FanoutSink, RecordingSink, TracingSink};
