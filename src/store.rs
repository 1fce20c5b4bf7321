//! Saved-schedule persistence.
//!
//! Schedules live in one JSON file, keyed by [`Schedule::storage_key`],
//! next to the set of saved schedule names under
//! [`SCHEDULE_NAMES`](crate::models::SCHEDULE_NAMES).
//!
//! ```json
//! {
//!   "SCHEDULE_NAMES": ["Fall Plan"],
//!   "SCHEDULE_NAMES_Fall Plan": { "ScheduleName": "Fall Plan", ... }
//! }
//! ```
//!
//! Writes go to a temp file that is renamed over the original.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{Schedule, ScheduleRecord};

/// File name used by [`ScheduleStore::in_dir`].
pub const SCHEDULE_SAVEFILE: &str = "SCHEDULE_SAVEFILE.json";

/// On-disk layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SaveFile {
    #[serde(rename = "SCHEDULE_NAMES", default)]
    names: BTreeSet<String>,
    /// Storage key → schedule record. Kept as raw JSON so one bad entry
    /// does not hide the rest.
    #[serde(flatten)]
    entries: BTreeMap<String, serde_json::Value>,
}

/// Key-value store of saved schedules backed by a JSON file.
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    path: PathBuf,
}

impl ScheduleStore {
    /// Creates a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store using the default file name inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SCHEDULE_SAVEFILE))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces everything on file with `schedules`.
    pub fn save_all(&self, schedules: &[Schedule]) -> Result<()> {
        let mut file = SaveFile::default();
        for schedule in schedules {
            file.names.insert(schedule.name().to_string());
            file.entries.insert(
                schedule.storage_key(),
                serde_json::to_value(schedule.to_record())?,
            );
        }
        self.write(&file)?;
        info!(path = %self.path.display(), count = schedules.len(), "Saved schedules");
        Ok(())
    }

    /// Saves one schedule, replacing any saved schedule of the same name.
    pub fn save(&self, schedule: &Schedule) -> Result<()> {
        let mut file = self.read()?;
        file.names.insert(schedule.name().to_string());
        file.entries.insert(
            schedule.storage_key(),
            serde_json::to_value(schedule.to_record())?,
        );
        self.write(&file)?;
        info!(key = %schedule.storage_key(), "Saved schedule");
        Ok(())
    }

    /// Loads every schedule that can be decoded.
    ///
    /// Entries that fail to decode are logged and skipped.
    pub fn load_all(&self) -> Result<Vec<Schedule>> {
        let file = self.read()?;
        let mut schedules = Vec::with_capacity(file.entries.len());

        for (key, value) in file.entries {
            match ScheduleRecord::from_value(value).and_then(Schedule::from_record) {
                Ok(schedule) => {
                    debug!(key = %key, "Loaded schedule");
                    schedules.push(schedule);
                }
                Err(e) => warn!(key = %key, error = %e, "Skipping unreadable schedule"),
            }
        }

        Ok(schedules)
    }

    /// Names of saved schedules.
    pub fn names(&self) -> Result<BTreeSet<String>> {
        Ok(self.read()?.names)
    }

    /// Removes the saved schedule with this schedule's name.
    ///
    /// Returns `false` if nothing was saved under that name.
    pub fn remove(&self, schedule: &Schedule) -> Result<bool> {
        let mut file = self.read()?;
        if file.entries.remove(&schedule.storage_key()).is_none() {
            return Ok(false);
        }
        file.names.remove(schedule.name());
        self.write(&file)?;
        info!(key = %schedule.storage_key(), "Removed schedule");
        Ok(true)
    }

    /// Removes every saved schedule.
    pub fn clear(&self) -> Result<()> {
        self.write(&SaveFile::default())?;
        info!(path = %self.path.display(), "Cleared saved schedules");
        Ok(())
    }

    fn read(&self) -> Result<SaveFile> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No save file, starting empty");
            return Ok(SaveFile::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, file: &SaveFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(file)?)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
