use std::sync::Mutex;

/// Counts patterns handed to a device and the sends it rejected.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub sent: usize,
    pub failed: usize,
    pub stops: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_sent(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.sent += 1;
        }
    }

    pub fn record_failed(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.failed += 1;
        }
    }

    pub fn record_stop(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.stops += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let recorder = MetricsRecorder::new();
        recorder.record_sent();
        recorder.record_sent();
        recorder.record_failed();
        recorder.record_stop();
        assert_eq!(
            recorder.snapshot(),
            Metrics {
                sent: 2,
                failed: 1,
                stops: 1
            }
        );
    }
}
