use crate::device::client::{ConnectionResult, ConnectionState, DeviceClient};
use crate::muscle::{Muscle, TargetMuscle};
use crate::pattern::{ComposedPattern, PulseParameters};
use crate::prelude::{PatternError, PatternResult};
use crate::resolver::compose_pattern;
use crate::telemetry::{LogManager, Metrics, MetricsRecorder};
use std::time::Duration;
use tokio::time::{sleep, timeout};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const STARTUP_DELAY: Duration = Duration::from_millis(500);
const STARTUP_INTERVAL: Duration = Duration::from_secs(1);
const STARTUP_WINDOW: Duration = Duration::from_secs(3);

/// Drives a device client: guarded connect, playback and teardown.
pub struct DeviceSession<C: DeviceClient> {
    client: C,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl<C: DeviceClient> DeviceSession<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("hapticore::session"),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot()
    }

    pub fn is_connected(&self) -> bool {
        self.client.state() == ConnectionState::Connected
    }

    pub async fn connect(&mut self, limit: Duration) -> ConnectionResult {
        self.logger.record("initializing suit");
        let outcome = timeout(limit, self.client.auto_connect()).await;
        let result = match outcome {
            Ok(Ok(ConnectionState::Connected)) if self.is_connected() => ConnectionResult::Connected,
            Ok(Ok(state)) => ConnectionResult::Failed(format!("device reported {:?}", state)),
            Ok(Err(err)) => ConnectionResult::Failed(err.to_string()),
            Err(_) => ConnectionResult::TimedOut,
        };

        match &result {
            ConnectionResult::Connected => self.logger.record("suit connected"),
            ConnectionResult::TimedOut => self.logger.warn(&format!(
                "failed to connect to suit within {:.1}s",
                limit.as_secs_f32()
            )),
            ConnectionResult::Failed(reason) => {
                self.logger.warn(&format!("failed to connect to suit: {}", reason))
            }
        }
        result
    }

    pub fn send(&mut self, pattern: &ComposedPattern) -> PatternResult<()> {
        if !self.is_connected() {
            self.metrics.record_failed();
            return Err(PatternError::NotConnected);
        }
        match self.client.send(pattern) {
            Ok(()) => {
                self.metrics.record_sent();
                Ok(())
            }
            Err(err) => {
                self.metrics.record_failed();
                self.logger.warn(&format!("send failed: {}", err));
                Err(err)
            }
        }
    }

    pub fn stop(&mut self) {
        self.client.stop();
        self.metrics.record_stop();
    }

    pub fn disconnect(&mut self) {
        self.client.disconnect();
        self.logger.record("suit disconnected");
    }

    /// Confirms the link by pulsing every muscle once a second for three
    /// seconds, after a short settle delay. Returns the number of sends.
    pub async fn startup_pulse(&mut self) -> PatternResult<usize> {
        let targets: Vec<TargetMuscle> = Muscle::ALL.iter().copied().map(TargetMuscle::new).collect();
        let pattern = compose_pattern(&targets, &PulseParameters::STARTUP)?;

        sleep(STARTUP_DELAY).await;
        self.logger.record("startup pulse");
        let mut elapsed = Duration::ZERO;
        let mut sends = 0;
        while elapsed < STARTUP_WINDOW {
            self.send(&pattern)?;
            sends += 1;
            sleep(STARTUP_INTERVAL).await;
            elapsed += STARTUP_INTERVAL;
        }
        Ok(sends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::loopback::{ConnectBehavior, LoopbackDevice};
    use crate::muscle::{MuscleGroup, MuscleSelection};
    use crate::resolver::resolve_muscles;
    use tokio::time::Instant;

    fn front_pattern() -> ComposedPattern {
        let targets = resolve_muscles(&MuscleSelection::group(MuscleGroup::Front)).unwrap();
        compose_pattern(&targets, &PulseParameters::default()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn connect_reports_connected() {
        let mut session = DeviceSession::new(LoopbackDevice::default());
        assert_eq!(
            session.connect(DEFAULT_CONNECT_TIMEOUT).await,
            ConnectionResult::Connected
        );
        assert!(session.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_connect_times_out() {
        let mut session = DeviceSession::new(LoopbackDevice::new(ConnectBehavior::Hang));
        let started = Instant::now();
        assert_eq!(
            session.connect(Duration::from_secs(10)).await,
            ConnectionResult::TimedOut
        );
        assert!(started.elapsed() >= Duration::from_secs(10));
        assert!(!session.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn refused_connect_fails() {
        let mut session = DeviceSession::new(LoopbackDevice::new(ConnectBehavior::Refuse));
        assert!(matches!(
            session.connect(DEFAULT_CONNECT_TIMEOUT).await,
            ConnectionResult::Failed(_)
        ));
    }

    #[test]
    fn send_before_connect_is_rejected() {
        let mut session = DeviceSession::new(LoopbackDevice::default());
        assert!(matches!(
            session.send(&front_pattern()),
            Err(PatternError::NotConnected)
        ));
        assert_eq!(session.metrics().failed, 1);
        assert!(session.client().sent().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_send_surfaces_device_error() {
        let mut session = DeviceSession::new(LoopbackDevice::default().rejecting_sends());
        session.connect(DEFAULT_CONNECT_TIMEOUT).await;
        assert!(matches!(
            session.send(&front_pattern()),
            Err(PatternError::Device(_))
        ));
        assert_eq!(session.metrics().failed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn startup_pulse_sends_three_times() {
        let mut session = DeviceSession::new(LoopbackDevice::default());
        session.connect(DEFAULT_CONNECT_TIMEOUT).await;

        let started = Instant::now();
        assert_eq!(session.startup_pulse().await.unwrap(), 3);
        assert!(started.elapsed() >= Duration::from_millis(3500));

        let sent = session.client().sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].muscles().collect::<Vec<_>>(), Muscle::ALL.to_vec());
        assert_eq!(session.metrics().sent, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_and_disconnect_reach_client() {
        let mut session = DeviceSession::new(LoopbackDevice::default());
        session.connect(DEFAULT_CONNECT_TIMEOUT).await;
        session.send(&front_pattern()).unwrap();
        session.stop();
        session.disconnect();

        assert_eq!(session.client().stops(), 1);
        assert_eq!(session.metrics().stops, 1);
        assert!(!session.is_connected());
        assert!(matches!(
            session.send(&front_pattern()),
            Err(PatternError::NotConnected)
        ));
    }
}
