//! Muscle selection and haptic pattern resolution for wearable haptic suits.
//!
//! The modules turn a muscle-group selection plus pulse parameters into a
//! composed, muscle-annotated pattern, persist the selection as JSON records,
//! and drive a device client through connect/send/stop.

pub mod device;
pub mod muscle;
pub mod pattern;
pub mod prelude;
pub mod record;
pub mod resolver;
pub mod telemetry;

pub use prelude::{PatternError, PatternResult};
