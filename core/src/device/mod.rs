pub mod client;
pub mod loopback;
pub mod session;

pub use client::{ConnectionResult, ConnectionState, DeviceClient};
pub use loopback::{ConnectBehavior, LoopbackDevice};
pub use session::{DeviceSession, DEFAULT_CONNECT_TIMEOUT};
