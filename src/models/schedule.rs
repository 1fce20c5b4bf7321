//! Schedule (solution) model.
//!
//! A schedule is a named, semester-tagged list of picked sections, one per
//! requested course, optionally carrying the block-out windows it was built
//! against.
//!
//! # Conflict-freedom
//! The type does not check its sections. Schedules produced by the
//! backtracking picker are conflict-free; schedules built with the
//! conflict-ignoring picker are not, and say so through [`ScheduleOrigin`].

use serde::{Deserialize, Serialize};

use super::{Course, Section};
use crate::error::{Error, Result};

/// Storage key prefix and name-set key for persisted schedules.
pub const SCHEDULE_NAMES: &str = "SCHEDULE_NAMES";

/// How a schedule came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScheduleOrigin {
    /// Assembled directly by the caller.
    #[default]
    Assembled,
    /// Built by backtracking search; no overlaps.
    ConflictFree,
    /// Built by the best-effort picker; sections may overlap.
    IgnoringConflicts,
    /// Decoded from a persisted record.
    Restored,
}

/// A saved or generated timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    name: String,
    semester: u32,
    id: u64,
    sections: Vec<Section>,
    block_outs: Option<Vec<Section>>,
    origin: ScheduleOrigin,
}

/// Persistence shape of a schedule.
///
/// Every course entry carries exactly the one section that was picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    #[serde(rename = "ScheduleName")]
    pub name: String,
    #[serde(rename = "ScheduleSemester")]
    pub semester: u32,
    /// 0 = not yet assigned; omitted from the wire form.
    #[serde(rename = "ScheduleID", default, skip_serializing_if = "is_unassigned")]
    pub id: u64,
    #[serde(rename = "ScheduleCourses")]
    pub courses: Vec<Course>,
    #[serde(rename = "BlockOutTimes", default, skip_serializing_if = "Option::is_none")]
    pub block_out_times: Option<Vec<Course>>,
}

fn is_unassigned(id: &u64) -> bool {
    *id == 0
}

impl ScheduleRecord {
    /// Decodes a record from a JSON value.
    ///
    /// Accepts the record either as an object or as a string holding the
    /// object's JSON text.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let value = match value {
            serde_json::Value::String(text) => serde_json::from_str(&text)
                .map_err(|e| Error::MalformedRecord(e.to_string()))?,
            other => other,
        };
        serde_json::from_value(value).map_err(|e| Error::MalformedRecord(e.to_string()))
    }
}

impl Schedule {
    /// Creates an unsaved schedule (id 0) with no block-outs.
    pub fn new(name: impl Into<String>, semester: u32, sections: Vec<Section>) -> Self {
        Self {
            name: name.into(),
            semester,
            id: 0,
            sections,
            block_outs: None,
            origin: ScheduleOrigin::Assembled,
        }
    }

    /// Attaches the block-out windows the schedule was built against.
    pub fn with_block_outs(mut self, block_outs: Vec<Section>) -> Self {
        self.block_outs = Some(block_outs);
        self
    }

    pub(crate) fn with_origin(mut self, origin: ScheduleOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Rebuilds a schedule from its persisted record.
    ///
    /// # Errors
    /// [`Error::MalformedRecord`] if a course entry does not carry exactly
    /// one section.
    pub fn from_record(record: ScheduleRecord) -> Result<Self> {
        let sections = single_sections(record.courses, "ScheduleCourses")?;
        let block_outs = record
            .block_out_times
            .map(|courses| single_sections(courses, "BlockOutTimes"))
            .transpose()?;

        Ok(Self {
            name: record.name,
            semester: record.semester,
            id: record.id,
            sections,
            block_outs,
            origin: ScheduleOrigin::Restored,
        })
    }

    /// Builds the persisted record for this schedule.
    pub fn to_record(&self) -> ScheduleRecord {
        ScheduleRecord {
            name: self.name.clone(),
            semester: self.semester,
            id: self.id,
            courses: self.sections.iter().map(Course::of_section).collect(),
            block_out_times: self
                .block_outs
                .as_ref()
                .map(|b| b.iter().map(Course::of_section).collect()),
        }
    }

    /// Decodes a schedule from its JSON record.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: ScheduleRecord =
            serde_json::from_str(json).map_err(|e| Error::MalformedRecord(e.to_string()))?;
        Self::from_record(record)
    }

    /// Encodes this schedule as its JSON record.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    /// Decodes a JSON array of schedule records, keeping array order.
    ///
    /// Entries may be objects or strings holding a record's JSON text.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(json).map_err(|e| Error::MalformedRecord(e.to_string()))?;
        entries
            .into_iter()
            .map(|entry| ScheduleRecord::from_value(entry).and_then(Self::from_record))
            .collect()
    }

    /// Schedule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the schedule.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Registrar semester number.
    pub fn semester(&self) -> u32 {
        self.semester
    }

    /// Persistent identifier; 0 if never assigned.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Assigns the persistent identifier.
    pub fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    /// Picked sections, in course order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Block-out windows carried with this schedule, if any.
    pub fn block_outs(&self) -> Option<&[Section]> {
        self.block_outs.as_deref()
    }

    /// How this schedule was produced.
    pub fn origin(&self) -> ScheduleOrigin {
        self.origin
    }

    /// Key under which the schedule is persisted.
    pub fn storage_key(&self) -> String {
        format!("{SCHEDULE_NAMES}_{}", self.name)
    }

    /// Section IDs in course order.
    pub fn section_ids(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.id.as_str()).collect()
    }

    /// Overlapping pairs: picked vs. picked, then picked vs. block-out.
    pub fn conflicts(&self) -> Vec<(&Section, &Section)> {
        let mut pairs = Vec::new();
        for (i, a) in self.sections.iter().enumerate() {
            for b in &self.sections[i + 1..] {
                if a.conflicts_with(b) {
                    pairs.push((a, b));
                }
            }
        }
        for a in &self.sections {
            for b in self.block_outs().unwrap_or_default() {
                if a.conflicts_with(b) {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }

    /// Whether no two entries overlap.
    pub fn is_conflict_free(&self) -> bool {
        self.conflicts().is_empty()
    }
}

/// Unwraps course entries that must each carry exactly one section.
fn single_sections(courses: Vec<Course>, field: &str) -> Result<Vec<Section>> {
    courses
        .into_iter()
        .map(|mut course| {
            if course.sections.len() != 1 {
                return Err(Error::MalformedRecord(format!(
                    "{field}: course '{}' has {} sections, expected 1",
                    course.id,
                    course.sections.len()
                )));
            }
            Ok(course.sections.remove(0))
        })
        .collect()
}
