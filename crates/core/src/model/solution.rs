/// A worked solution returned by the model.
///
/// `steps` carries text with `$...$` inline math. `svg` is only present for
/// geometry problems; blank or `null` markup is normalized away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    steps: String,
    svg: Option<String>,
}

impl Solution {
    #[must_use]
    pub fn new(steps: impl Into<String>, svg: Option<String>) -> Self {
        let svg = svg.filter(|markup| {
            let trimmed = markup.trim();
            !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("null")
        });
        Self {
            steps: steps.into(),
            svg,
        }
    }

    #[must_use]
    pub fn steps(&self) -> &str {
        &self.steps
    }

    #[must_use]
    pub fn svg(&self) -> Option<&str> {
        self.svg.as_deref()
    }

    #[must_use]
    pub fn has_illustration(&self) -> bool {
        self.svg.is_some()
    }
}

/// Transcribed problem plus its solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemSolutionResult {
    problem_text: String,
    problem_count: u32,
    solution: Solution,
}

impl ProblemSolutionResult {
    /// A zero `problem_count` is stored as 1.
    #[must_use]
    pub fn new(problem_text: impl Into<String>, problem_count: u32, solution: Solution) -> Self {
        Self {
            problem_text: problem_text.into(),
            problem_count: problem_count.max(1),
            solution,
        }
    }

    #[must_use]
    pub fn problem_text(&self) -> &str {
        &self.problem_text
    }

    #[must_use]
    pub fn problem_count(&self) -> u32 {
        self.problem_count
    }

    #[must_use]
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    #[must_use]
    pub fn into_parts(self) -> (String, u32, Solution) {
        (self.problem_text, self.problem_count, self.solution)
    }
}
