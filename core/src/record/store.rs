use crate::pattern::ComposedPattern;
use crate::prelude::{PatternError, PatternResult};
use crate::record::haptic::{self, HapticPatternRecord};
use crate::resolver::{append_patterns, resolve_record};
use crate::telemetry::LogManager;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_PATTERN_DIR: &str = "Assets/MicroSensation Events";
pub const DEFAULT_APPENDED_DIR: &str = "Assets/Sensation Events";
const RECORD_EXTENSION: &str = "json";

/// Saved result of appending several records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppendedPatternFile {
    pub name: String,
    pub pulses: ComposedPattern,
}

/// One JSON file per named record, plus a second folder for appended patterns.
#[derive(Debug, Clone)]
pub struct PatternStore {
    pattern_dir: PathBuf,
    appended_dir: PathBuf,
    logger: LogManager,
}

impl PatternStore {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(pattern_dir: P, appended_dir: Q) -> Self {
        Self {
            pattern_dir: pattern_dir.as_ref().to_path_buf(),
            appended_dir: appended_dir.as_ref().to_path_buf(),
            logger: LogManager::new("hapticore::store"),
        }
    }

    pub fn pattern_dir(&self) -> &Path {
        &self.pattern_dir
    }

    pub fn appended_dir(&self) -> &Path {
        &self.appended_dir
    }

    /// Writes `<name>.json`, replacing any record saved under the same name.
    pub fn save(&self, record: &HapticPatternRecord) -> PatternResult<PathBuf> {
        let path = record_path(&self.pattern_dir, &record.name)?;
        let record = record.clone().with_default_target();
        fs::create_dir_all(&self.pattern_dir)?;
        fs::write(&path, haptic::serialize(&record)?)?;
        self.logger
            .record(&format!("saved pattern {} to {}", record.name, path.display()));
        Ok(path)
    }

    pub fn load(&self, name: &str) -> PatternResult<HapticPatternRecord> {
        let path = record_path(&self.pattern_dir, name)?;
        let bytes = read_existing(&path, name)?;
        haptic::deserialize(&bytes)
    }

    /// Record names, sorted. A missing folder simply holds no records.
    pub fn list(&self) -> PatternResult<Vec<String>> {
        let entries = match fs::read_dir(&self.pattern_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Loads and resolves each named record, skipping the ones that fail,
    /// then appends what is left in the given order.
    pub fn append_from_store<S: AsRef<str>>(&self, names: &[S]) -> PatternResult<ComposedPattern> {
        let mut loaded = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            match self.load(name).and_then(|record| resolve_record(&record)) {
                Ok(pattern) => loaded.push(pattern),
                Err(err) => self
                    .logger
                    .warn(&format!("skipping pattern {} for append: {}", name, err)),
            }
        }
        append_patterns(&loaded)
    }

    pub fn save_appended(&self, name: &str, pattern: &ComposedPattern) -> PatternResult<PathBuf> {
        let path = record_path(&self.appended_dir, name)?;
        let file = AppendedPatternFile {
            name: name.to_string(),
            pulses: pattern.clone(),
        };
        fs::create_dir_all(&self.appended_dir)?;
        fs::write(&path, serde_json::to_vec_pretty(&file)?)?;
        self.logger.record(&format!(
            "saved appended pattern {} ({} pulses) to {}",
            name,
            pattern.len(),
            path.display()
        ));
        Ok(path)
    }

    pub fn load_appended(&self, name: &str) -> PatternResult<ComposedPattern> {
        let path = record_path(&self.appended_dir, name)?;
        let bytes = read_existing(&path, name)?;
        let file: AppendedPatternFile = serde_json::from_slice(&bytes)?;
        Ok(file.pulses)
    }
}

impl Default for PatternStore {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN_DIR, DEFAULT_APPENDED_DIR)
    }
}

fn record_path(dir: &Path, name: &str) -> PatternResult<PathBuf> {
    if name.trim().is_empty()
        || name.trim() != name
        || name == "."
        || name == ".."
        || name.contains(|c: char| c == '/' || c == '\\')
    {
        return Err(PatternError::invalid(
            "name",
            name,
            "a non-empty file name without path separators or surrounding whitespace",
        ));
    }
    Ok(dir.join(format!("{}.{}", name, RECORD_EXTENSION)))
}

fn read_existing(path: &Path, name: &str) -> PatternResult<Vec<u8>> {
    fs::read(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => PatternError::NotFound(name.to_string()),
        _ => PatternError::Io(err),
    })
}
