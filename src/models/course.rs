//! Course model.
//!
//! A course is an academic offering with one or more candidate sections.
//! Exactly one of its sections ends up in a schedule.

use serde::{Deserialize, Serialize};

use super::Section;
use crate::scheduler::Offering;

/// An academic offering with interchangeable sections.
///
/// Adding a section (or deserializing a course) stamps the section's
/// back-reference with this course's ID and title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "CourseData")]
pub struct Course {
    /// Unique course identifier (e.g. `CSE-1310`).
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Candidate sections, in catalog order.
    pub sections: Vec<Section>,
}

/// Wire shape of a course; sections arrive without back-references.
#[derive(Deserialize)]
struct CourseData {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    sections: Vec<Section>,
}

impl From<CourseData> for Course {
    fn from(data: CourseData) -> Self {
        let mut course = Course::new(data.id, data.title);
        for section in data.sections {
            course = course.with_section(section);
        }
        course
    }
}

impl Course {
    /// Creates a course with no sections.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Adds a section, linking it back to this course.
    pub fn with_section(mut self, section: Section) -> Self {
        let section = section.in_course(self.id.clone(), self.title.clone());
        self.sections.push(section);
        self
    }

    /// Wraps a single section into a course record of its source course.
    ///
    /// This is the per-section persistence shape: the course carrying only
    /// the section that was picked.
    pub fn of_section(section: &Section) -> Self {
        Self {
            id: section.course_id.clone(),
            title: section.course_title.clone(),
            sections: vec![section.clone()],
        }
    }

    /// Human-readable summary used in diagnostics.
    pub fn description(&self) -> String {
        if self.title.is_empty() {
            self.id.clone()
        } else {
            format!("{} {}", self.id, self.title)
        }
    }
}

impl Offering for Course {
    type Section = Section;

    fn sections(&self) -> &[Section] {
        &self.sections
    }

    fn description(&self) -> String {
        Course::description(self)
    }
}
