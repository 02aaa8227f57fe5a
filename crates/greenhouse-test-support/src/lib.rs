//! Shared test doubles and utilities for the Greenhouse platform.

mod bus;
mod call_log;
mod clock;
mod repository;

pub use bus::{FailingEventBus, RecordingEventBus};
pub use call_log::{Call, CallLog};
pub use clock::{FixedClock, fixed_now};
pub use repository::{FailingRepository, RecordingRepository};
