//! Game event system
//!
//! Rally systems queue events on the EventBus. The logger takes them every
//! frame, traces them, and when enabled writes a JSON-lines session log.

mod bus;
mod logger;
mod types;

pub use bus::{BusEvent, EventBus, advance_bus_tick, update_event_bus_time};
pub use logger::{EventLogConfig, EventLogger, log_bus_events, start_event_log};
pub use types::{GameEvent, Wall};
