use anyhow::Context;
use hapticore::record::{PatternStore, DEFAULT_APPENDED_DIR, DEFAULT_PATTERN_DIR};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Composer settings; every key may be omitted from the YAML file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComposerConfig {
    pub pattern_dir: PathBuf,
    pub appended_dir: PathBuf,
    pub connect_timeout_secs: f32,
    pub bind_port: u16,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            pattern_dir: PathBuf::from(DEFAULT_PATTERN_DIR),
            appended_dir: PathBuf::from(DEFAULT_APPENDED_DIR),
            connect_timeout_secs: 10.0,
            bind_port: 9000,
        }
    }
}

impl ComposerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading composer config {}", path_ref.display()))?;
        let config: ComposerConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing composer config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn with_dirs(mut self, pattern_dir: Option<PathBuf>, appended_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = pattern_dir {
            self.pattern_dir = dir;
        }
        if let Some(dir) = appended_dir {
            self.appended_dir = dir;
        }
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::try_from_secs_f32(self.connect_timeout_secs)
            .unwrap_or(hapticore::device::DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn to_store(&self) -> PatternStore {
        PatternStore::new(&self.pattern_dir, &self.appended_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn overrides_replace_configured_dirs() {
        let cfg = ComposerConfig::default().with_dirs(Some("custom".into()), None);
        assert_eq!(cfg.to_store().pattern_dir(), Path::new("custom"));
        assert_eq!(cfg.to_store().appended_dir(), Path::new(DEFAULT_APPENDED_DIR));
    }

    #[test]
    fn config_load_reads_partial_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"pattern_dir: events\nconnect_timeout_secs: 2.5\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = ComposerConfig::load(&path).unwrap();
        assert_eq!(cfg.pattern_dir, PathBuf::from("events"));
        assert_eq!(cfg.connect_timeout(), Duration::from_millis(2500));
        assert_eq!(cfg.bind_port, 9000);
    }

    #[test]
    fn negative_timeout_falls_back_to_default() {
        let cfg = ComposerConfig {
            connect_timeout_secs: -1.0,
            ..Default::default()
        };
        assert_eq!(cfg.connect_timeout(), hapticore::device::DEFAULT_CONNECT_TIMEOUT);
    }
}
