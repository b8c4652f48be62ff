use crate::model::Solution;

/// Statements produced by one "generate similar" call, in model order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratedProblems {
    problems: Vec<String>,
}

impl GeneratedProblems {
    #[must_use]
    pub fn new(problems: Vec<String>) -> Self {
        Self { problems }
    }

    #[must_use]
    pub fn problems(&self) -> &[String] {
        &self.problems
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    #[must_use]
    pub fn into_problems(self) -> Vec<String> {
        self.problems
    }
}

/// One generated practice problem and everything the screen tracks for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarProblem {
    statement: String,
    solution: Option<Solution>,
    expanded: bool,
}

impl SimilarProblem {
    #[must_use]
    pub fn unsolved(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            solution: None,
            expanded: false,
        }
    }

    #[must_use]
    pub fn statement(&self) -> &str {
        &self.statement
    }

    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub(crate) fn reveal(&mut self, solution: Solution) {
        self.solution = Some(solution);
        self.expanded = true;
    }

    pub(crate) fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }
}
