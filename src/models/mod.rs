//! Course scheduling domain models.
//!
//! Provides the data types the section picker works on and the schedule
//! it produces.
//!
//! # Domain Mappings
//!
//! | u-course-schedule | Registrar | Student planner |
//! |-------------------|-----------|-----------------|
//! | Course | Catalog entry | Course on the wish list |
//! | Section | Class number | One concrete meeting pattern |
//! | Block-out | — | "Busy" time (work, commute) |
//! | Schedule | Enrollment cart | Saved timetable |

mod calendar;
mod course;
mod schedule;
mod section;

pub use calendar::{MeetingTime, TimeWindow, Weekday};
pub use course::Course;
pub use schedule::{Schedule, ScheduleOrigin, ScheduleRecord, SCHEDULE_NAMES};
pub use section::{ClassStatus, Section, BLOCK_OUT_COURSE_ID};
