//! Failure accumulator for the section search.

use std::fmt;

use super::Candidate;

/// Ordered list of reasons a search branch failed.
///
/// Each branch owns one; when a branch fails, its parent absorbs it with
/// [`merge`](Self::merge). The final report is one reason per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnosis {
    lines: Vec<String>,
}

impl Diagnosis {
    /// Creates a diagnosis seeded with `initial`. An empty string yields an
    /// empty diagnosis.
    pub fn new(initial: impl Into<String>) -> Self {
        let mut diagnosis = Self::default();
        diagnosis.record(initial);
        diagnosis
    }

    /// A collision between two sections.
    pub fn conflict<C: Candidate>(first: &C, second: &C) -> Self {
        let mut diagnosis = Self::default();
        diagnosis.record_conflict(first, second);
        diagnosis
    }

    /// A course left with nothing to pick from.
    pub fn no_eligible_section(course: &str) -> Self {
        Self::new(format!("No eligible sections found for course: {course}"))
    }

    /// Appends one reason. Empty strings are ignored.
    pub fn record(&mut self, line: impl Into<String>) {
        let line = line.into();
        if !line.is_empty() {
            self.lines.push(line);
        }
    }

    /// Appends a collision between two sections.
    pub fn record_conflict<C: Candidate>(&mut self, first: &C, second: &C) {
        self.record(format!(
            "Conflict between {} and {}",
            first.description(),
            second.description()
        ));
    }

    /// Absorbs another branch's reasons after this one's.
    pub fn merge(&mut self, other: Diagnosis) {
        self.lines.extend(other.lines);
    }

    /// Newline-joined report.
    pub fn describe(&self) -> String {
        self.lines.join("\n")
    }

    /// Individual reasons, in the order they were recorded.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether any reason mentions `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    /// Number of recorded reasons.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
