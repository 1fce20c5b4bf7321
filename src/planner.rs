//! Configured entry point for schedule generation.
//!
//! Validates the catalog, runs the section picker with the configured
//! policy, and wraps the result into a [`Schedule`].

use rand::Rng;
use tracing::info;

use crate::config::PlannerConfig;
use crate::error::{Error, Result};
use crate::models::{Course, Schedule, ScheduleOrigin, Section};
use crate::scheduler::SectionPicker;
use crate::validation::validate_catalog;

/// Generates schedules from a course catalog.
///
/// Production calls draw a fresh OS-seeded generator each time, so repeated
/// calls explore different valid schedules. The `*_with_rng` variants take
/// an injected generator for reproducible runs.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    /// Creates a planner with the given configuration.
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn picker(&self) -> SectionPicker {
        let picker = SectionPicker::new().with_allow_non_open(self.config.allow_non_open);
        match self.config.step_budget {
            Some(steps) => picker.with_step_budget(steps),
            None => picker,
        }
    }

    /// Builds a conflict-free schedule avoiding `block_outs`.
    ///
    /// # Errors
    /// - [`Error::InvalidCatalog`] if the catalog fails validation.
    /// - [`Error::Search`] if no schedule exists or the budget ran out.
    pub fn generate(&self, courses: &[Course], block_outs: &[Section], semester: u32) -> Result<Schedule> {
        self.generate_with_rng(courses, block_outs, semester, &mut rand::rng())
    }

    /// [`generate`](Self::generate) with an injected generator.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        courses: &[Course],
        block_outs: &[Section],
        semester: u32,
        rng: &mut R,
    ) -> Result<Schedule> {
        validate_catalog(courses, block_outs).map_err(Error::InvalidCatalog)?;

        let sections = self.picker().build(courses, block_outs, rng)?;
        info!(semester, sections = sections.len(), "Generated schedule");

        Ok(Schedule::new(&self.config.default_schedule_name, semester, sections)
            .with_block_outs(block_outs.to_vec())
            .with_origin(ScheduleOrigin::ConflictFree))
    }

    /// Builds a best-effort schedule: one eligible section per course,
    /// overlaps allowed, no block-outs.
    pub fn generate_ignoring_conflicts(&self, courses: &[Course], semester: u32) -> Result<Schedule> {
        self.generate_ignoring_conflicts_with_rng(courses, semester, &mut rand::rng())
    }

    /// [`generate_ignoring_conflicts`](Self::generate_ignoring_conflicts)
    /// with an injected generator.
    pub fn generate_ignoring_conflicts_with_rng<R: Rng + ?Sized>(
        &self,
        courses: &[Course],
        semester: u32,
        rng: &mut R,
    ) -> Result<Schedule> {
        validate_catalog(courses, &[]).map_err(Error::InvalidCatalog)?;

        let sections = self.picker().build_ignoring_conflicts(courses, rng)?;
        info!(semester, sections = sections.len(), "Generated schedule ignoring conflicts");

        Ok(Schedule::new(&self.config.default_schedule_name, semester, sections)
            .with_origin(ScheduleOrigin::IgnoringConflicts))
    }
}
