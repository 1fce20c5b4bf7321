//! Weekly meeting-time models.
//!
//! A section meets on one or more weekdays during a daily time window.
//! Two meeting times collide when they share a day and their windows
//! overlap.
//!
//! # Time Model
//! Times are minutes after midnight. Windows are half-open, so a class
//! ending at 10:00 does not collide with one starting at 10:00.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Short registrar code (`M`, `Tu`, `W`, `Th`, `F`, `Sa`, `Su`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::Monday => "M",
            Self::Tuesday => "Tu",
            Self::Wednesday => "W",
            Self::Thursday => "Th",
            Self::Friday => "F",
            Self::Saturday => "Sa",
            Self::Sunday => "Su",
        }
    }
}

/// A daily interval [start, end) in minutes after midnight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Interval start (minutes, inclusive).
    pub start_min: u32,
    /// Interval end (minutes, exclusive).
    pub end_min: u32,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start_min: u32, end_min: u32) -> Self {
        Self { start_min, end_min }
    }

    /// Length of this window (minutes). Zero for empty or inverted windows.
    #[inline]
    pub fn duration_min(&self) -> u32 {
        self.end_min.saturating_sub(self.start_min)
    }

    /// Whether the window has positive length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end_min <= self.start_min
    }

    /// Whether a minute falls within this window.
    #[inline]
    pub fn contains(&self, minute: u32) -> bool {
        minute >= self.start_min && minute < self.end_min
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_min < other.end_min && other.start_min < self.end_min
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start_min / 60,
            self.start_min % 60,
            self.end_min / 60,
            self.end_min % 60
        )
    }
}

/// Recurring weekly meeting: a set of days sharing one time window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeetingTime {
    /// Days on which the meeting recurs.
    pub days: Vec<Weekday>,
    /// Daily time window.
    pub window: TimeWindow,
}

impl MeetingTime {
    /// Creates a meeting on `days` from `start_min` to `end_min`.
    pub fn new(days: Vec<Weekday>, start_min: u32, end_min: u32) -> Self {
        Self {
            days,
            window: TimeWindow::new(start_min, end_min),
        }
    }

    /// Whether the two meetings share a day.
    pub fn shares_day(&self, other: &Self) -> bool {
        self.days.iter().any(|d| other.days.contains(d))
    }

    /// Whether the two meetings are ever in session at the same time.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.shares_day(other) && self.window.overlaps(&other.window)
    }
}

impl fmt::Display for MeetingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in &self.days {
            f.write_str(day.code())?;
        }
        write!(f, " {}", self.window)
    }
}
