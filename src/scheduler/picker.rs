//! Backtracking section picker.
//!
//! # Algorithm
//!
//! 0. Fail up front, naming each one, if any course has no eligible section.
//! 1. At course `i`, shuffle a copy of its sections.
//! 2. Skip sections that are not open (unless non-open sections are allowed).
//! 3. Test the candidate against every block-out and every picked section,
//!    recording each collision. Any collision rejects the candidate.
//! 4. Otherwise push it, recurse into course `i + 1`, and on failure pop it
//!    and fold the subtree's diagnosis into this level's.
//! 5. When no candidate survives, fail with everything recorded at this level.
//!
//! The picked list is a stack: the undo always pops the entry the same
//! level pushed, so its length equals the course index on every entry.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use tracing::{debug, warn};

use super::{Candidate, Diagnosis, Offering, SearchError};

/// Picks one section per course.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_course_schedule::models::{ClassStatus, Course, MeetingTime, Section, Weekday};
/// use u_course_schedule::scheduler::SectionPicker;
///
/// let courses = vec![
///     Course::new("A", "Course A").with_section(
///         Section::new("A1", ClassStatus::Closed)
///             .with_meeting(MeetingTime::new(vec![Weekday::Monday], 540, 600)),
///     ),
/// ];
/// let mut rng = SmallRng::seed_from_u64(7);
///
/// let strict = SectionPicker::new();
/// assert!(strict.build(&courses, &[], &mut rng).is_err());
///
/// let relaxed = SectionPicker::new().with_allow_non_open(true);
/// let picked = relaxed.build(&courses, &[], &mut rng).unwrap();
/// assert_eq!(picked[0].id, "A1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SectionPicker {
    allow_non_open: bool,
    step_budget: Option<usize>,
}

impl SectionPicker {
    /// Creates a picker that only accepts open sections and never gives up.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allows closed, wait-listed, and cancelled sections to be picked.
    pub fn with_allow_non_open(mut self, allow: bool) -> Self {
        self.allow_non_open = allow;
        self
    }

    /// Caps the number of candidate evaluations in [`build`](Self::build).
    pub fn with_step_budget(mut self, steps: usize) -> Self {
        self.step_budget = Some(steps);
        self
    }

    /// Finds a conflict-free pick, one section per course in course order.
    ///
    /// Successive calls may return different picks for the same input.
    ///
    /// # Errors
    /// - [`SearchError::Infeasible`] with every collision met, when no
    ///   conflict-free pick exists.
    /// - [`SearchError::BudgetExhausted`] when a step budget is set and runs out.
    pub fn build<O, R>(
        &self,
        courses: &[O],
        block_outs: &[O::Section],
        rng: &mut R,
    ) -> Result<Vec<O::Section>, SearchError>
    where
        O: Offering,
        R: Rng + ?Sized,
    {
        let unschedulable = self.unschedulable(courses);
        if !unschedulable.is_empty() {
            let err = SearchError::Infeasible(unschedulable);
            warn!(courses = courses.len(), steps = 0, "{err}");
            return Err(err);
        }

        let mut search = Search {
            courses,
            block_outs,
            allow_non_open: self.allow_non_open,
            step_budget: self.step_budget,
            picked: Vec::with_capacity(courses.len()),
            steps: 0,
        };

        match search.descend(0, rng) {
            Ok(()) => {
                debug!(
                    courses = courses.len(),
                    steps = search.steps,
                    "Built conflict-free schedule"
                );
                Ok(search.picked.into_iter().cloned().collect())
            }
            Err(err) => {
                warn!(courses = courses.len(), steps = search.steps, "{err}");
                Err(err)
            }
        }
    }

    /// Picks a random eligible section per course, ignoring time conflicts.
    ///
    /// No block-outs are consulted and nothing is backtracked.
    ///
    /// # Errors
    /// [`SearchError::Infeasible`] naming the first course with no eligible
    /// section.
    pub fn build_ignoring_conflicts<O, R>(
        &self,
        courses: &[O],
        rng: &mut R,
    ) -> Result<Vec<O::Section>, SearchError>
    where
        O: Offering,
        R: Rng + ?Sized,
    {
        let mut picked = Vec::with_capacity(courses.len());

        for (index, course) in courses.iter().enumerate() {
            let eligible: Vec<&O::Section> = course
                .sections()
                .iter()
                .filter(|s| is_eligible(*s, self.allow_non_open))
                .collect();

            match eligible.choose(rng) {
                Some(section) => picked.push((*section).clone()),
                None => {
                    let description = course.description();
                    warn!(index, course = %description, "No eligible section");
                    return Err(SearchError::Infeasible(Diagnosis::no_eligible_section(
                        &description,
                    )));
                }
            }
        }

        Ok(picked)
    }

    /// One line per course with no eligible section, in course order.
    fn unschedulable<O: Offering>(&self, courses: &[O]) -> Diagnosis {
        let mut diagnosis = Diagnosis::default();
        for course in courses {
            if !course
                .sections()
                .iter()
                .any(|s| is_eligible(s, self.allow_non_open))
            {
                diagnosis.merge(Diagnosis::no_eligible_section(&course.description()));
            }
        }
        diagnosis
    }
}

fn is_eligible<C: Candidate>(section: &C, allow_non_open: bool) -> bool {
    allow_non_open || section.status().is_open()
}

/// State of one `build` call.
struct Search<'a, O: Offering> {
    courses: &'a [O],
    block_outs: &'a [O::Section],
    allow_non_open: bool,
    step_budget: Option<usize>,
    picked: Vec<&'a O::Section>,
    steps: usize,
}

impl<'a, O: Offering> Search<'a, O> {
    fn descend<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) -> Result<(), SearchError> {
        debug_assert_eq!(self.picked.len(), index);

        let courses = self.courses;
        let Some(course) = courses.get(index) else {
            return Ok(());
        };
        debug!(index, course = %course.description(), "Choosing section");

        let mut candidates: Vec<&'a O::Section> = course.sections().iter().collect();
        candidates.shuffle(rng);

        let mut diagnosis = Diagnosis::default();

        for section in candidates {
            if !is_eligible(section, self.allow_non_open) {
                continue;
            }
            self.spend_step()?;

            let mut rejected = false;
            for other in self.block_outs.iter().chain(self.picked.iter().copied()) {
                if section.conflicts_with(other) {
                    diagnosis.record_conflict(section, other);
                    rejected = true;
                }
            }
            if rejected {
                continue;
            }

            self.picked.push(section);
            match self.descend(index + 1, rng) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    self.picked.pop();
                    match err {
                        SearchError::Infeasible(nested) => diagnosis.merge(nested),
                        aborted => return Err(aborted),
                    }
                }
            }
        }

        Err(SearchError::Infeasible(diagnosis))
    }

    fn spend_step(&mut self) -> Result<(), SearchError> {
        self.steps += 1;
        match self.step_budget {
            Some(limit) if self.steps > limit => Err(SearchError::BudgetExhausted { limit }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassStatus, Course, MeetingTime, Section, Weekday};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn section(id: &str, status: ClassStatus, day: Weekday, start: u32, end: u32) -> Section {
        Section::new(id, status).with_meeting(MeetingTime::new(vec![day], start, end))
    }

    fn open(id: &str, day: Weekday, start: u32, end: u32) -> Section {
        section(id, ClassStatus::Open, day, start, end)
    }

    fn ids(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.id.as_str()).collect()
    }

    fn assert_conflict_free(picked: &[Section], block_outs: &[Section]) {
        for (i, a) in picked.iter().enumerate() {
            for b in &picked[i + 1..] {
                assert!(!a.conflicts_with(b), "{} overlaps {}", a.id, b.id);
            }
            for b in block_outs {
                assert!(!a.conflicts_with(b), "{} overlaps block-out {}", a.id, b.id);
            }
        }
    }

    #[test]
    fn test_unique_feasible_pick() {
        // B1 overlaps A1 on Monday; only B2 fits.
        let courses = vec![
            Course::new("A", "Course A").with_section(open("A1", Weekday::Monday, 540, 600)),
            Course::new("B", "Course B")
                .with_section(open("B1", Weekday::Monday, 570, 630))
                .with_section(open("B2", Weekday::Tuesday, 540, 600)),
        ];
        let picker = SectionPicker::new();

        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let picked = picker.build(&courses, &[], &mut rng).unwrap();
            assert_eq!(ids(&picked), vec!["A1", "B2"]);
        }
    }

    #[test]
    fn test_backtracks_into_earlier_course() {
        // X1 collides with Y1, the only open section of course Y, so any
        // branch starting with X1 must be undone.
        let courses = vec![
            Course::new("X", "Course X")
                .with_section(open("X1", Weekday::Monday, 540, 600))
                .with_section(open("X2", Weekday::Tuesday, 540, 600)),
            Course::new("Y", "Course Y")
                .with_section(open("Y1", Weekday::Monday, 540, 600))
                .with_section(section("Y2", ClassStatus::Closed, Weekday::Friday, 540, 600)),
            Course::new("Z", "Course Z").with_section(open("Z1", Weekday::Wednesday, 540, 600)),
        ];
        let picker = SectionPicker::new();

        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let picked = picker.build(&courses, &[], &mut rng).unwrap();
            assert_eq!(picked.len(), 3);
            assert_eq!(ids(&picked), vec!["X2", "Y1", "Z1"]);
            assert_conflict_free(&picked, &[]);
        }
    }

    #[test]
    fn test_deep_backtrack_leaves_no_stale_entries() {
        // Only C3 fits both A1/B2; earlier branches fail at the last course.
        let courses = vec![
            Course::new("A", "A")
                .with_section(open("A1", Weekday::Monday, 480, 540))
                .with_section(open("A2", Weekday::Friday, 480, 540)),
            Course::new("B", "B")
                .with_section(open("B1", Weekday::Tuesday, 480, 540))
                .with_section(open("B2", Weekday::Wednesday, 480, 540)),
            Course::new("C", "C").with_section(open("C1", Weekday::Tuesday, 500, 560)),
            Course::new("D", "D")
                .with_section(open("D1", Weekday::Friday, 500, 560))
                .with_section(open("D2", Weekday::Thursday, 500, 560)),
        ];
        let picker = SectionPicker::new();

        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let picked = picker.build(&courses, &[], &mut rng).unwrap();
            assert_eq!(picked.len(), courses.len());
            for (course, section) in courses.iter().zip(&picked) {
                assert_eq!(section.course_id, course.id);
            }
            assert_eq!(ids(&picked)[1..3], ["B2", "C1"]);
            assert_conflict_free(&picked, &[]);
        }
    }

    #[test]
    fn test_closed_section_needs_policy() {
        let courses = vec![Course::new("A", "Course A").with_section(section(
            "A1",
            ClassStatus::Closed,
            Weekday::Monday,
            540,
            600,
        ))];
        let mut rng = SmallRng::seed_from_u64(42);

        let err = SectionPicker::new().build(&courses, &[], &mut rng).unwrap_err();
        let diagnosis = err.diagnosis().unwrap();
        assert!(diagnosis.mentions("A Course A"));

        let picked = SectionPicker::new()
            .with_allow_non_open(true)
            .build(&courses, &[], &mut rng)
            .unwrap();
        assert_eq!(ids(&picked), vec!["A1"]);
    }

    #[test]
    fn test_block_out_rejects_section() {
        let courses =
            vec![Course::new("A", "Course A").with_section(open("A1", Weekday::Monday, 540, 600))];
        let block_outs = vec![Section::block_out(
            "work",
            "Work",
            vec![MeetingTime::new(vec![Weekday::Monday], 480, 720)],
        )];
        let mut rng = SmallRng::seed_from_u64(42);

        let err = SectionPicker::new()
            .build(&courses, &block_outs, &mut rng)
            .unwrap_err();
        let diagnosis = err.diagnosis().unwrap();
        assert_eq!(diagnosis.len(), 1);
        assert!(diagnosis.mentions("block-out 'Work'"));
        assert!(diagnosis.mentions("#A1"));
    }

    #[test]
    fn test_records_every_collision() {
        // B1 hits both the block-out and A1; both are reported.
        let courses = vec![
            Course::new("A", "A").with_section(open("A1", Weekday::Monday, 540, 600)),
            Course::new("B", "B").with_section(open("B1", Weekday::Monday, 570, 630)),
        ];
        let block_outs = vec![Section::block_out(
            "gym",
            "Gym",
            vec![MeetingTime::new(vec![Weekday::Monday], 600, 660)],
        )];
        let mut rng = SmallRng::seed_from_u64(42);

        let err = SectionPicker::new()
            .build(&courses, &block_outs, &mut rng)
            .unwrap_err();
        let diagnosis = err.diagnosis().unwrap();
        assert_eq!(diagnosis.len(), 2);
        assert!(diagnosis.lines()[0].contains("block-out 'Gym'"));
        assert!(diagnosis.lines()[1].contains("#A1"));
        assert!(diagnosis.lines().iter().all(|l| l.starts_with("Conflict between B #B1")));
    }

    #[test]
    fn test_nested_failures_are_folded() {
        // Both A sections lead to a dead end at B; the top-level report
        // carries the collisions from both subtrees.
        let courses = vec![
            Course::new("A", "A")
                .with_section(open("A1", Weekday::Monday, 540, 600))
                .with_section(open("A2", Weekday::Monday, 545, 600)),
            Course::new("B", "B").with_section(open("B1", Weekday::Monday, 550, 610)),
        ];
        let mut rng = SmallRng::seed_from_u64(3);

        let err = SectionPicker::new().build(&courses, &[], &mut rng).unwrap_err();
        let diagnosis = err.diagnosis().unwrap();
        assert_eq!(diagnosis.len(), 2);
        assert!(diagnosis.mentions("#A1"));
        assert!(diagnosis.mentions("#A2"));
    }

    #[test]
    fn test_empty_course_is_infeasible() {
        let courses = vec![
            Course::new("A", "A").with_section(open("A1", Weekday::Monday, 540, 600)),
            Course::new("EMPTY", "No Sections"),
        ];
        let mut rng = SmallRng::seed_from_u64(42);

        let err = SectionPicker::new().build(&courses, &[], &mut rng).unwrap_err();
        assert!(err
            .diagnosis()
            .unwrap()
            .mentions("No eligible sections found for course: EMPTY No Sections"));
    }

    #[test]
    fn test_names_course_without_eligible_behind_earlier_failure() {
        // A dies on the block-out before B is ever reached.
        let courses = vec![
            Course::new("A", "A").with_section(open("A1", Weekday::Monday, 540, 600)),
            Course::new("B", "Closed Only").with_section(section(
                "B1",
                ClassStatus::Closed,
                Weekday::Tuesday,
                540,
                600,
            )),
        ];
        let block_outs = vec![Section::block_out(
            "work",
            "Work",
            vec![MeetingTime::new(vec![Weekday::Monday], 480, 720)],
        )];
        let mut rng = SmallRng::seed_from_u64(42);

        let err = SectionPicker::new()
            .build(&courses, &block_outs, &mut rng)
            .unwrap_err();
        assert!(err
            .diagnosis()
            .unwrap()
            .mentions("No eligible sections found for course: B Closed Only"));
    }

    #[test]
    fn test_each_course_without_eligible_named_once() {
        let courses = vec![
            Course::new("A", "A")
                .with_section(open("A1", Weekday::Monday, 540, 600))
                .with_section(open("A2", Weekday::Tuesday, 540, 600))
                .with_section(open("A3", Weekday::Wednesday, 540, 600))
                .with_section(open("A4", Weekday::Thursday, 540, 600)),
            Course::new("B", "Empty"),
            Course::new("C", "Cancelled")
                .with_section(section("C1", ClassStatus::Cancelled, Weekday::Friday, 540, 600)),
        ];
        let mut rng = SmallRng::seed_from_u64(42);

        let err = SectionPicker::new().build(&courses, &[], &mut rng).unwrap_err();
        assert_eq!(
            err.diagnosis().unwrap().describe(),
            "No eligible sections found for course: B Empty\n\
             No eligible sections found for course: C Cancelled"
        );
    }

    #[test]
    fn test_no_courses() {
        let courses: Vec<Course> = Vec::new();
        let mut rng = SmallRng::seed_from_u64(42);
        let picked = SectionPicker::new().build(&courses, &[], &mut rng).unwrap();
        assert!(picked.is_empty());
    }

    #[test]
    fn test_repeated_builds_vary_but_stay_valid() {
        let courses = vec![
            Course::new("A", "A")
                .with_section(open("A1", Weekday::Monday, 540, 600))
                .with_section(open("A2", Weekday::Tuesday, 540, 600))
                .with_section(open("A3", Weekday::Wednesday, 540, 600)),
            Course::new("B", "B")
                .with_section(open("B1", Weekday::Monday, 570, 630))
                .with_section(open("B2", Weekday::Thursday, 540, 600))
                .with_section(open("B3", Weekday::Friday, 540, 600)),
        ];
        let block_outs = vec![Section::block_out(
            "lunch",
            "Lunch",
            vec![MeetingTime::new(vec![Weekday::Friday], 720, 780)],
        )];
        let picker = SectionPicker::new();
        let mut seen = HashSet::new();

        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let picked = picker.build(&courses, &block_outs, &mut rng).unwrap();
            assert_eq!(picked.len(), 2);
            assert_conflict_free(&picked, &block_outs);
            seen.insert(ids(&picked).join(","));
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_same_seed_same_pick() {
        let courses = vec![Course::new("A", "A")
            .with_section(open("A1", Weekday::Monday, 540, 600))
            .with_section(open("A2", Weekday::Tuesday, 540, 600))
            .with_section(open("A3", Weekday::Wednesday, 540, 600))];
        let picker = SectionPicker::new();

        let first = picker
            .build(&courses, &[], &mut SmallRng::seed_from_u64(9))
            .unwrap();
        let second = picker
            .build(&courses, &[], &mut SmallRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_step_budget() {
        // Every section meets Monday 9-10; infeasible after course 0.
        let courses: Vec<Course> = (0..8)
            .map(|c| {
                let mut course = Course::new(format!("C{c}"), "");
                for s in 0..3 {
                    course = course.with_section(open(&format!("C{c}-{s}"), Weekday::Monday, 540, 600));
                }
                course
            })
            .collect();
        let mut rng = SmallRng::seed_from_u64(42);

        let err = SectionPicker::new()
            .with_step_budget(5)
            .build(&courses, &[], &mut rng)
            .unwrap_err();
        assert_eq!(err, SearchError::BudgetExhausted { limit: 5 });
        assert!(err.diagnosis().is_none());

        let err = SectionPicker::new().build(&courses, &[], &mut rng).unwrap_err();
        assert!(matches!(err, SearchError::Infeasible(_)));
    }

    #[test]
    fn test_ignoring_conflicts_picks_overlaps() {
        let courses = vec![
            Course::new("A", "A").with_section(open("A1", Weekday::Monday, 540, 600)),
            Course::new("B", "B").with_section(open("B1", Weekday::Monday, 540, 600)),
        ];
        let mut rng = SmallRng::seed_from_u64(42);

        let picked = SectionPicker::new()
            .build_ignoring_conflicts(&courses, &mut rng)
            .unwrap();
        assert_eq!(ids(&picked), vec!["A1", "B1"]);
        assert!(picked[0].conflicts_with(&picked[1]));
    }

    #[test]
    fn test_ignoring_conflicts_filters_status() {
        let courses = vec![Course::new("A", "A")
            .with_section(section("A1", ClassStatus::Closed, Weekday::Monday, 540, 600))
            .with_section(open("A2", Weekday::Tuesday, 540, 600))];
        let picker = SectionPicker::new();

        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let picked = picker.build_ignoring_conflicts(&courses, &mut rng).unwrap();
            assert_eq!(ids(&picked), vec!["A2"]);
        }
    }

    #[test]
    fn test_ignoring_conflicts_fails_on_course_without_eligible() {
        let courses = vec![
            Course::new("A", "A").with_section(open("A1", Weekday::Monday, 540, 600)),
            Course::new("B", "Closed Course")
                .with_section(section("B1", ClassStatus::WaitList, Weekday::Monday, 600, 660)),
            Course::new("C", "C").with_section(open("C1", Weekday::Friday, 540, 600)),
        ];
        let mut rng = SmallRng::seed_from_u64(42);

        let err = SectionPicker::new()
            .build_ignoring_conflicts(&courses, &mut rng)
            .unwrap_err();
        let diagnosis = err.diagnosis().unwrap();
        assert_eq!(
            diagnosis.describe(),
            "No eligible sections found for course: B Closed Course"
        );

        let picked = SectionPicker::new()
            .with_allow_non_open(true)
            .build_ignoring_conflicts(&courses, &mut rng)
            .unwrap();
        assert_eq!(picked.len(), 3);
    }
}
