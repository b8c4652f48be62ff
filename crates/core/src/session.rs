//! Session state controller for the tutoring screen.
//!
//! `TutorSession` is the only mutable state of a tutoring session. It changes
//! through named transitions. Every transition that waits on the model is
//! split in two: a *begin* step that validates, updates loading flags and
//! returns a ticket, and a *completion* step that takes the ticket back
//! together with the outcome.
//!
//! Tickets carry the upload epoch and the similar-list batch they were issued
//! under. A completion whose ticket no longer matches is reported as
//! [`Transition::Stale`] and leaves the session untouched, so a response from
//! a replaced upload or a discarded list can never overwrite newer state.

use std::fmt;

use crate::error::ValidationError;
use crate::model::{
    GeneratedProblems, ProblemImage, ProblemSolutionResult, SimilarCount, SimilarProblem, Solution,
};

//
// ─── USER-FACING MESSAGES ──────────────────────────────────────────────────────
//

/// The single error line shown above the panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMessage {
    SolveOriginalFailed,
    GenerateSimilarFailed,
    SolveSimilarFailed { index: usize },
    OriginalRequired,
    CountOutOfRange,
    UnsupportedImage,
}

impl SessionMessage {
    #[must_use]
    pub fn from_validation(error: &ValidationError) -> Self {
        match error {
            ValidationError::CountOutOfRange { .. } => Self::CountOutOfRange,
            ValidationError::MissingOriginal | ValidationError::EmptyProblemText => {
                Self::OriginalRequired
            }
            ValidationError::EmptyImage | ValidationError::UnsupportedImage => {
                Self::UnsupportedImage
            }
        }
    }
}

impl fmt::Display for SessionMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SolveOriginalFailed => {
                write!(f, "Something went wrong while solving the problem. Please try again.")
            }
            Self::GenerateSimilarFailed => {
                write!(f, "Something went wrong while generating similar problems.")
            }
            Self::SolveSimilarFailed { index } => {
                write!(f, "Something went wrong while solving problem {}.", index + 1)
            }
            Self::OriginalRequired => {
                write!(f, "Solve the original problem before generating similar ones.")
            }
            Self::CountOutOfRange => write!(
                f,
                "Please enter a number of problems from {} to {}.",
                SimilarCount::MIN,
                SimilarCount::MAX
            ),
            Self::UnsupportedImage => write!(f, "Please upload a PNG, JPG or WEBP image."),
        }
    }
}

//
// ─── TICKETS ───────────────────────────────────────────────────────────────────
//

/// Outcome of a completion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Stale,
}

impl Transition {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Issued by [`TutorSession::upload_image`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalTicket {
    epoch: u64,
    image: ProblemImage,
}

impl OriginalTicket {
    #[must_use]
    pub fn image(&self) -> &ProblemImage {
        &self.image
    }
}

/// Issued by [`TutorSession::request_similar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateTicket {
    epoch: u64,
    batch: u64,
    problem_text: String,
    count: SimilarCount,
}

impl GenerateTicket {
    #[must_use]
    pub fn problem_text(&self) -> &str {
        &self.problem_text
    }

    #[must_use]
    pub fn count(&self) -> SimilarCount {
        self.count
    }
}

/// Issued by [`TutorSession::solve_similar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarSolveTicket {
    epoch: u64,
    batch: u64,
    index: usize,
    statement: String,
}

impl SimilarSolveTicket {
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn statement(&self) -> &str {
        &self.statement
    }
}

/// The three independent loading indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadingFlags {
    pub solving_original: bool,
    pub generating_similar: bool,
    pub solving_similar: Option<usize>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorSession {
    epoch: u64,
    batch: u64,
    image: Option<ProblemImage>,
    preview: Option<String>,
    problem_text: String,
    original_solution: Option<Solution>,
    problem_count: u32,
    similar_count: SimilarCount,
    original_expanded: bool,
    similar: Vec<SimilarProblem>,
    loading: LoadingFlags,
    error: Option<SessionMessage>,
}

impl Default for TutorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TutorSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: 0,
            batch: 0,
            image: None,
            preview: None,
            problem_text: String::new(),
            original_solution: None,
            problem_count: 1,
            similar_count: SimilarCount::default(),
            original_expanded: false,
            similar: Vec::new(),
            loading: LoadingFlags::default(),
            error: None,
        }
    }

    // ── accessors ──────────────────────────────────────────────────────────────

    #[must_use]
    pub fn image(&self) -> Option<&ProblemImage> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    #[must_use]
    pub fn problem_text(&self) -> &str {
        &self.problem_text
    }

    #[must_use]
    pub fn original_solution(&self) -> Option<&Solution> {
        self.original_solution.as_ref()
    }

    #[must_use]
    pub fn problem_count(&self) -> u32 {
        self.problem_count
    }

    #[must_use]
    pub fn similar_count(&self) -> SimilarCount {
        self.similar_count
    }

    #[must_use]
    pub fn is_original_expanded(&self) -> bool {
        self.original_expanded
    }

    #[must_use]
    pub fn similar_problems(&self) -> &[SimilarProblem] {
        &self.similar
    }

    #[must_use]
    pub fn loading(&self) -> LoadingFlags {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<SessionMessage> {
        self.error
    }

    #[must_use]
    pub fn has_original(&self) -> bool {
        self.original_solution.is_some()
    }

    // ── upload / original problem ─────────────────────────────────────────────

    /// Replace the upload and start a new epoch. Every derived field returns
    /// to its initial value before the solve call is issued.
    pub fn upload_image(&mut self, image: ProblemImage) -> OriginalTicket {
        self.reset_derived();
        self.epoch = self.epoch.wrapping_add(1);
        self.preview = Some(image.data_url());
        self.image = Some(image.clone());
        self.loading.solving_original = true;
        OriginalTicket {
            epoch: self.epoch,
            image,
        }
    }

    /// A picked file failed validation; only the message changes.
    pub fn reject_upload(&mut self, error: &ValidationError) {
        self.error = Some(SessionMessage::from_validation(error));
    }

    pub fn original_solved(
        &mut self,
        ticket: &OriginalTicket,
        result: ProblemSolutionResult,
    ) -> Transition {
        if ticket.epoch != self.epoch {
            return Transition::Stale;
        }
        let (problem_text, problem_count, solution) = result.into_parts();
        self.problem_text = problem_text;
        self.original_solution = Some(solution);
        self.problem_count = problem_count;
        self.similar_count = SimilarCount::clamped(i64::from(problem_count));
        self.loading.solving_original = false;
        self.error = None;
        Transition::Applied
    }

    pub fn original_failed(&mut self, ticket: &OriginalTicket) -> Transition {
        if ticket.epoch != self.epoch {
            return Transition::Stale;
        }
        self.loading.solving_original = false;
        self.error = Some(SessionMessage::SolveOriginalFailed);
        Transition::Applied
    }

    pub fn toggle_original(&mut self) {
        self.original_expanded = !self.original_expanded;
    }

    // ── similar problems ──────────────────────────────────────────────────────

    /// Store the editable count, clamped into range.
    pub fn set_similar_count(&mut self, raw: i64) {
        self.similar_count = SimilarCount::clamped(raw);
    }

    /// Start generating `count` similar problems.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingOriginal` when no problem text has been
    /// extracted yet, or `ValidationError::CountOutOfRange` for a bad count.
    /// Either way the error message is set and nothing else changes.
    pub fn request_similar(&mut self, count: u32) -> Result<GenerateTicket, ValidationError> {
        if self.problem_text.trim().is_empty() {
            self.error = Some(SessionMessage::OriginalRequired);
            return Err(ValidationError::MissingOriginal);
        }
        let count = match SimilarCount::new(count) {
            Ok(count) => count,
            Err(err) => {
                self.error = Some(SessionMessage::from_validation(&err));
                return Err(err);
            }
        };

        self.error = None;
        self.clear_similar();
        self.loading.generating_similar = true;
        Ok(GenerateTicket {
            epoch: self.epoch,
            batch: self.batch,
            problem_text: self.problem_text.clone(),
            count,
        })
    }

    pub fn similar_generated(
        &mut self,
        ticket: &GenerateTicket,
        problems: GeneratedProblems,
    ) -> Transition {
        if !self.is_current_batch(ticket.epoch, ticket.batch) {
            return Transition::Stale;
        }
        self.similar = problems
            .into_problems()
            .into_iter()
            .map(SimilarProblem::unsolved)
            .collect();
        self.loading.generating_similar = false;
        Transition::Applied
    }

    pub fn similar_generation_failed(&mut self, ticket: &GenerateTicket) -> Transition {
        if !self.is_current_batch(ticket.epoch, ticket.batch) {
            return Transition::Stale;
        }
        self.similar.clear();
        self.loading.generating_similar = false;
        self.error = Some(SessionMessage::GenerateSimilarFailed);
        Transition::Applied
    }

    /// Drop the current list so a fresh set can be generated. Outstanding
    /// tickets for the old list become stale.
    pub fn discard_similar(&mut self) {
        self.clear_similar();
    }

    /// Start solving the problem at `index`.
    ///
    /// Returns `None` without side effects while another similar-solve is in
    /// flight, when `index` is out of bounds, or when it is already solved.
    pub fn solve_similar(&mut self, index: usize) -> Option<SimilarSolveTicket> {
        if self.loading.solving_similar.is_some() {
            return None;
        }
        let problem = self.similar.get(index)?;
        if problem.is_solved() {
            return None;
        }
        let statement = problem.statement().to_owned();

        self.loading.solving_similar = Some(index);
        self.error = None;
        Some(SimilarSolveTicket {
            epoch: self.epoch,
            batch: self.batch,
            index,
            statement,
        })
    }

    pub fn similar_solved(
        &mut self,
        ticket: &SimilarSolveTicket,
        result: ProblemSolutionResult,
    ) -> Transition {
        if !self.is_current_solve(ticket) {
            return Transition::Stale;
        }
        let Some(problem) = self.similar.get_mut(ticket.index) else {
            return Transition::Stale;
        };
        let (_, _, solution) = result.into_parts();
        problem.reveal(solution);
        self.loading.solving_similar = None;
        Transition::Applied
    }

    /// The slot stays unsolved so the user can retry it.
    pub fn similar_solve_failed(&mut self, ticket: &SimilarSolveTicket) -> Transition {
        if !self.is_current_solve(ticket) {
            return Transition::Stale;
        }
        self.loading.solving_similar = None;
        self.error = Some(SessionMessage::SolveSimilarFailed {
            index: ticket.index,
        });
        Transition::Applied
    }

    /// Out-of-range indices are ignored.
    pub fn toggle_similar(&mut self, index: usize) {
        if let Some(problem) = self.similar.get_mut(index) {
            problem.toggle();
        }
    }

    // ── internals ─────────────────────────────────────────────────────────────

    fn reset_derived(&mut self) {
        self.problem_text.clear();
        self.original_solution = None;
        self.problem_count = 1;
        self.similar_count = SimilarCount::default();
        self.original_expanded = false;
        self.clear_similar();
        self.loading = LoadingFlags::default();
        self.error = None;
    }

    fn clear_similar(&mut self) {
        self.similar.clear();
        self.batch = self.batch.wrapping_add(1);
        self.loading.generating_similar = false;
        self.loading.solving_similar = None;
    }

    fn is_current_batch(&self, epoch: u64, batch: u64) -> bool {
        epoch == self.epoch && batch == self.batch
    }

    fn is_current_solve(&self, ticket: &SimilarSolveTicket) -> bool {
        self.is_current_batch(ticket.epoch, ticket.batch)
            && self.loading.solving_similar == Some(ticket.index)
    }
}
