use crate::device::client::{ConnectionState, DeviceClient};
use crate::pattern::ComposedPattern;
use crate::prelude::{PatternError, PatternResult};
use crate::telemetry::LogManager;

/// How a [`LoopbackDevice`] answers `auto_connect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectBehavior {
    #[default]
    Accept,
    /// Never resolves; the caller's timeout decides.
    Hang,
    Refuse,
}

/// In-process device that keeps every pattern it is sent.
#[derive(Debug)]
pub struct LoopbackDevice {
    behavior: ConnectBehavior,
    state: ConnectionState,
    sent: Vec<ComposedPattern>,
    stops: usize,
    reject_sends: bool,
    logger: LogManager,
}

impl LoopbackDevice {
    pub fn new(behavior: ConnectBehavior) -> Self {
        Self {
            behavior,
            state: ConnectionState::Disconnected,
            sent: Vec::new(),
            stops: 0,
            reject_sends: false,
            logger: LogManager::new("hapticore::loopback"),
        }
    }

    pub fn rejecting_sends(mut self) -> Self {
        self.reject_sends = true;
        self
    }

    pub fn sent(&self) -> &[ComposedPattern] {
        &self.sent
    }

    pub fn stops(&self) -> usize {
        self.stops
    }
}

impl Default for LoopbackDevice {
    fn default() -> Self {
        Self::new(ConnectBehavior::Accept)
    }
}

impl DeviceClient for LoopbackDevice {
    async fn auto_connect(&mut self) -> PatternResult<ConnectionState> {
        self.state = ConnectionState::Connecting;
        match self.behavior {
            ConnectBehavior::Accept => {
                self.state = ConnectionState::Connected;
                Ok(self.state)
            }
            ConnectBehavior::Hang => std::future::pending().await,
            ConnectBehavior::Refuse => {
                self.state = ConnectionState::Disconnected;
                Err(PatternError::Device("connection refused".into()))
            }
        }
    }

    fn send(&mut self, pattern: &ComposedPattern) -> PatternResult<()> {
        if self.reject_sends {
            return Err(PatternError::Device("pattern rejected".into()));
        }
        self.logger.record(&format!(
            "loopback play: {} pulses over {} segments, {:.2}s",
            pattern.len(),
            pattern.segment_count(),
            pattern.total_duration()
        ));
        self.sent.push(pattern.clone());
        Ok(())
    }

    fn stop(&mut self) {
        self.stops += 1;
        self.logger.record("loopback stop");
    }

    fn disconnect(&mut self) {
        self.state = ConnectionState::Disconnected;
        self.logger.record("loopback disconnected");
    }

    fn state(&self) -> ConnectionState {
        self.state
    }
}
