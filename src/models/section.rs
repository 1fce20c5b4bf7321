//! Section model.
//!
//! A section is one schedulable offering of a course: a specific set of
//! meeting times with its own seat status. Sections of the same course are
//! interchangeable from the student's point of view.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::MeetingTime;
use crate::scheduler::Candidate;

/// Course ID used for user-defined block-out windows.
pub const BLOCK_OUT_COURSE_ID: &str = "BLOCK-OUT";

/// Seat status reported by the registrar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClassStatus {
    /// Seats available.
    Open,
    /// No seats available.
    Closed,
    /// Full, but a wait list is accepting students.
    WaitList,
    /// Section will not be offered.
    Cancelled,
}

impl ClassStatus {
    /// Whether the section can be registered for right now.
    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::WaitList => "Wait List",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

/// A single offering of a course.
///
/// `course_id` and `course_title` point back at the owning [`Course`](super::Course).
/// They are not serialized: a section is always persisted nested inside its
/// course, and the back-reference is restored when the course is rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    /// Unique section identifier (registrar class number).
    pub id: String,
    /// Owning course ID.
    #[serde(skip)]
    pub course_id: String,
    /// Owning course title.
    #[serde(skip)]
    pub course_title: String,
    /// Seat status.
    pub status: ClassStatus,
    /// Instructor name (empty if staff/TBA).
    #[serde(default)]
    pub instructor: String,
    /// Room (empty if TBA).
    #[serde(default)]
    pub room: String,
    /// Weekly meeting times. Empty = TBA, never conflicts.
    #[serde(default)]
    pub meetings: Vec<MeetingTime>,
}

impl Section {
    /// Creates a section with no meetings and no owning course yet.
    pub fn new(id: impl Into<String>, status: ClassStatus) -> Self {
        Self {
            id: id.into(),
            course_id: String::new(),
            course_title: String::new(),
            status,
            instructor: String::new(),
            room: String::new(),
            meetings: Vec::new(),
        }
    }

    /// Creates a block-out window: a pseudo-section that only occupies time.
    pub fn block_out(id: impl Into<String>, label: impl Into<String>, meetings: Vec<MeetingTime>) -> Self {
        Self {
            course_id: BLOCK_OUT_COURSE_ID.to_string(),
            course_title: label.into(),
            meetings,
            ..Self::new(id, ClassStatus::Open)
        }
    }

    /// Adds a weekly meeting time.
    pub fn with_meeting(mut self, meeting: MeetingTime) -> Self {
        self.meetings.push(meeting);
        self
    }

    /// Sets the instructor.
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    /// Sets the room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    /// Sets the back-reference to the owning course.
    pub fn in_course(mut self, course_id: impl Into<String>, course_title: impl Into<String>) -> Self {
        self.course_id = course_id.into();
        self.course_title = course_title.into();
        self
    }

    /// Whether this section is a user block-out rather than a real class.
    pub fn is_block_out(&self) -> bool {
        self.course_id == BLOCK_OUT_COURSE_ID
    }

    /// Whether any meeting of `self` overlaps any meeting of `other`.
    ///
    /// Symmetric. Sections with no meetings never conflict.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.meetings
            .iter()
            .any(|m| other.meetings.iter().any(|o| m.conflicts_with(o)))
    }

    /// Human-readable summary used in diagnostics.
    pub fn description(&self) -> String {
        let times = if self.meetings.is_empty() {
            "TBA".to_string()
        } else {
            self.meetings
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        if self.is_block_out() {
            format!("block-out '{}' {}", self.course_title, times)
        } else {
            format!("{} #{} [{}] {}", self.course_id, self.id, self.status, times)
        }
    }
}

impl Candidate for Section {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> ClassStatus {
        self.status
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        Section::conflicts_with(self, other)
    }

    fn description(&self) -> String {
        Section::description(self)
    }
}
