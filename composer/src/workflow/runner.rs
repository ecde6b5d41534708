use crate::gui_bridge::model::PatternView;
use crate::workflow::config::ComposerConfig;
use anyhow::{bail, Context};
use hapticore::device::{ConnectionResult, DeviceClient, DeviceSession};
use hapticore::pattern::ComposedPattern;
use hapticore::record::{HapticPatternRecord, PatternStore};
use hapticore::resolver::resolve_record;
use std::path::PathBuf;

/// Executes composer commands against the pattern store and a device session.
#[derive(Clone)]
pub struct Runner {
    config: ComposerConfig,
    store: PatternStore,
}

impl Runner {
    pub fn new(config: ComposerConfig) -> Self {
        let store = config.to_store();
        Self { config, store }
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Resolves the record first so out-of-range values never reach disk.
    pub fn save(&self, record: &HapticPatternRecord) -> anyhow::Result<PathBuf> {
        resolve_record(record)
            .with_context(|| format!("validating pattern {}", record.name))?;
        self.store
            .save(record)
            .with_context(|| format!("saving pattern {}", record.name))
    }

    pub fn list(&self) -> anyhow::Result<Vec<String>> {
        self.store.list().with_context(|| {
            format!("listing patterns in {}", self.store.pattern_dir().display())
        })
    }

    pub fn view(&self, name: &str) -> anyhow::Result<PatternView> {
        let record = self
            .store
            .load(name)
            .with_context(|| format!("loading pattern {}", name))?;
        let pattern =
            resolve_record(&record).with_context(|| format!("resolving pattern {}", name))?;
        Ok(PatternView::new(&record, &pattern))
    }

    pub fn compose(&self, name: &str) -> anyhow::Result<ComposedPattern> {
        let record = self
            .store
            .load(name)
            .with_context(|| format!("loading pattern {}", name))?;
        resolve_record(&record).with_context(|| format!("resolving pattern {}", name))
    }

    pub fn append(&self, names: &[String], output: &str) -> anyhow::Result<(ComposedPattern, PathBuf)> {
        let combined = self
            .store
            .append_from_store(names)
            .with_context(|| format!("appending {}", names.join(", ")))?;
        let path = self
            .store
            .save_appended(output, &combined)
            .with_context(|| format!("saving appended pattern {}", output))?;
        Ok((combined, path))
    }

    pub fn load_appended(&self, name: &str) -> anyhow::Result<ComposedPattern> {
        self.store
            .load_appended(name)
            .with_context(|| format!("loading appended pattern {}", name))
    }

    /// Connects if needed, optionally runs the startup pulse, then sends.
    pub async fn play<C: DeviceClient>(
        &self,
        session: &mut DeviceSession<C>,
        pattern: &ComposedPattern,
        startup_pulse: bool,
    ) -> anyhow::Result<()> {
        if !session.is_connected() {
            match session.connect(self.config.connect_timeout()).await {
                ConnectionResult::Connected => {}
                ConnectionResult::TimedOut => bail!(
                    "suit did not connect within {:.1}s",
                    self.config.connect_timeout_secs
                ),
                ConnectionResult::Failed(reason) => bail!("suit connection failed: {}", reason),
            }
            if startup_pulse {
                session.startup_pulse().await.context("running startup pulse")?;
            }
        }
        session.send(pattern).context("sending pattern to suit")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hapticore::device::{ConnectBehavior, LoopbackDevice};
    use hapticore::muscle::{Muscle, MuscleGroup, MuscleSelection};
    use hapticore::pattern::PulseParameters;
    use hapticore::PatternError;
    use tempfile::TempDir;

    fn runner_in(temp: &TempDir) -> Runner {
        Runner::new(ComposerConfig::default().with_dirs(
            Some(temp.path().join("records")),
            Some(temp.path().join("appended")),
        ))
    }

    fn record(name: &str, group: MuscleGroup) -> HapticPatternRecord {
        HapticPatternRecord::new(name, MuscleSelection::group(group), PulseParameters::default())
    }

    #[test]
    fn save_rejects_out_of_range_pulse() {
        let temp = TempDir::new().unwrap();
        let runner = runner_in(&temp);
        let mut bad = record("bad", MuscleGroup::All);
        bad.pulse.frequency = 250;

        let err = runner.save(&bad).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PatternError>(),
            Some(PatternError::InvalidParameter { field: "frequency", .. })
        ));
        assert!(runner.list().unwrap().is_empty());
    }

    #[test]
    fn view_reports_resolved_muscles() {
        let temp = TempDir::new().unwrap();
        let runner = runner_in(&temp);
        runner.save(&record("back", MuscleGroup::Back)).unwrap();

        let view = runner.view("back").unwrap();
        let muscles: Vec<Muscle> = view.muscles.iter().map(|m| m.muscle).collect();
        assert_eq!(muscles, Muscle::BACK.to_vec());
    }

    #[test]
    fn append_saves_combined_pattern() {
        let temp = TempDir::new().unwrap();
        let runner = runner_in(&temp);
        runner.save(&record("a", MuscleGroup::Front)).unwrap();
        runner.save(&record("b", MuscleGroup::Back)).unwrap();

        let (combined, path) = runner
            .append(&["a".to_string(), "b".to_string()], "ab")
            .unwrap();
        assert!(path.starts_with(temp.path().join("appended")));
        assert_eq!(runner.load_appended("ab").unwrap(), combined);
    }

    #[tokio::test(start_paused = true)]
    async fn play_connects_then_sends() {
        let temp = TempDir::new().unwrap();
        let runner = runner_in(&temp);
        runner.save(&record("all", MuscleGroup::All)).unwrap();
        let pattern = runner.compose("all").unwrap();

        let mut session = DeviceSession::new(LoopbackDevice::default());
        runner.play(&mut session, &pattern, true).await.unwrap();
        assert_eq!(session.client().sent().len(), 4);
        assert_eq!(session.client().sent().last(), Some(&pattern));
    }

    #[tokio::test(start_paused = true)]
    async fn play_reports_connect_timeout() {
        let temp = TempDir::new().unwrap();
        let runner = runner_in(&temp);
        let mut session = DeviceSession::new(LoopbackDevice::new(ConnectBehavior::Hang));

        let err = runner
            .play(&mut session, &ComposedPattern::default(), false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("did not connect"));
    }
}
