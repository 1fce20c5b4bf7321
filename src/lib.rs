//! Course timetable construction.
//!
//! Given a list of courses, each offering several interchangeable sections,
//! picks exactly one section per course so that no two picked sections meet
//! at the same time and none collides with the user's block-out times.
//! When no such timetable exists, the search explains why.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Course`, `Section`, `ClassStatus`,
//!   `MeetingTime`, `TimeWindow`, `Schedule`, `ScheduleRecord`
//! - **`scheduler`**: Backtracking section picker, the conflict-ignoring
//!   variant, and the `Diagnosis` failure accumulator
//! - **`planner`**: Configured entry point producing `Schedule`s
//! - **`store`**: JSON file persistence for saved schedules
//! - **`validation`**: Catalog integrity checks (duplicate IDs, bad windows)
//! - **`config`**: `PlannerConfig` loaded from TOML
//!
//! # Example
//!
//! ```
//! use u_course_schedule::models::{ClassStatus, Course, MeetingTime, Section, Weekday};
//! use u_course_schedule::planner::Planner;
//!
//! let courses = vec![
//!     Course::new("CSE-1310", "Intro to Programming").with_section(
//!         Section::new("1001", ClassStatus::Open)
//!             .with_meeting(MeetingTime::new(vec![Weekday::Monday], 9 * 60, 10 * 60)),
//!     ),
//!     Course::new("MATH-1426", "Calculus I")
//!         .with_section(
//!             Section::new("2001", ClassStatus::Open)
//!                 .with_meeting(MeetingTime::new(vec![Weekday::Monday], 9 * 60 + 30, 10 * 60 + 30)),
//!         )
//!         .with_section(
//!             Section::new("2002", ClassStatus::Open)
//!                 .with_meeting(MeetingTime::new(vec![Weekday::Tuesday], 9 * 60, 10 * 60)),
//!         ),
//! ];
//!
//! let schedule = Planner::default().generate(&courses, &[], 2158).unwrap();
//! assert_eq!(schedule.section_ids(), vec!["1001", "2002"]);
//! ```
//!
//! # References
//!
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6
//!   (backtracking search for CSPs)

pub mod config;
pub mod error;
pub mod models;
pub mod planner;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use error::{Error, Result};
