use crate::pattern::ComposedPattern;
use crate::prelude::PatternResult;
use serde::{Deserialize, Serialize};

/// Link state as reported by the device client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Outcome of a timeout-guarded connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionResult {
    Connected,
    TimedOut,
    Failed(String),
}

/// Seam to the vendor SDK that owns the wire protocol and pulse encoding.
#[allow(async_fn_in_trait)]
pub trait DeviceClient {
    /// Discovers and connects to the suit. May never resolve.
    async fn auto_connect(&mut self) -> PatternResult<ConnectionState>;
    /// Fire-and-forget playback; errors only when the client rejects the pattern.
    fn send(&mut self, pattern: &ComposedPattern) -> PatternResult<()>;
    /// Cancels any playback in flight.
    fn stop(&mut self);
    fn disconnect(&mut self);
    fn state(&self) -> ConnectionState;
}
