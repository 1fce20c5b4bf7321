//! Input validation for course catalogs.
//!
//! Checks structural integrity of courses, sections, and block-outs
//! before searching. Detects:
//! - Duplicate course IDs
//! - Duplicate section IDs (across all courses, and among block-outs)
//! - Sections whose back-reference names a different course
//! - Meetings with an empty or inverted time window, or no days
//!
//! A course with no sections is not an error here: the search reports it
//! as infeasible with a diagnosis naming the course.

use crate::models::{Course, Section};
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A section's back-reference does not match the course holding it.
    DetachedSection,
    /// A meeting time has no days or a non-positive window.
    InvalidMeetingTime,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a catalog and block-out list before searching.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(courses: &[Course], block_outs: &[Section]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut course_ids = HashSet::new();
    let mut section_ids = HashSet::new();

    for course in courses {
        if !course_ids.insert(course.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", course.id),
            ));
        }

        for section in &course.sections {
            if !section_ids.insert(section.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate section ID: {}", section.id),
                ));
            }

            if section.course_id != course.id {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DetachedSection,
                    format!(
                        "Section '{}' belongs to '{}' but is listed under '{}'",
                        section.id, section.course_id, course.id
                    ),
                ));
            }

            check_meetings(section, &mut errors);
        }
    }

    let mut block_out_ids = HashSet::new();
    for block_out in block_outs {
        if !block_out_ids.insert(block_out.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate block-out ID: {}", block_out.id),
            ));
        }
        check_meetings(block_out, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_meetings(section: &Section, errors: &mut Vec<ValidationError>) {
    for meeting in &section.meetings {
        if meeting.days.is_empty() || meeting.window.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidMeetingTime,
                format!("Section '{}' has an invalid meeting time: {meeting}", section.id),
            ));
        }
    }
}
