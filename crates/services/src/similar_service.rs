use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use tutor_core::ValidationError;
use tutor_core::model::{GeneratedProblems, ProblemSolutionResult, SimilarCount};

use crate::error::{ReplySchema, ResponseFormatError, TutorServiceError};
use crate::model::{ModelClient, ModelRequest, RequestPart};
use crate::prompts::{CREATIVE_PERSONA, GENERATE_TEMPERATURE, similar_instruction, similar_schema};
use crate::solve_service::SolveService;

/// Generates practice problems like a solved one and solves them on demand.
#[derive(Clone)]
pub struct SimilarService {
    client: Arc<dyn ModelClient>,
    solver: SolveService,
}

impl SimilarService {
    #[must_use]
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        let solver = SolveService::new(Arc::clone(&client));
        Self { client, solver }
    }

    /// Ask for `count` new problems in the same knowledge area as `problem_text`.
    ///
    /// # Errors
    ///
    /// Returns `TutorServiceError::Validation` (and issues no call) when
    /// `count` is outside `1..=20` or the source text is blank.
    /// Returns `TutorServiceError::Upstream` / `ResponseFormat` for call and
    /// decoding failures.
    pub async fn generate_similar(
        &self,
        problem_text: &str,
        count: u32,
    ) -> Result<GeneratedProblems, TutorServiceError> {
        let count = SimilarCount::new(count)?;
        if problem_text.trim().is_empty() {
            return Err(ValidationError::EmptyProblemText.into());
        }

        let request = ModelRequest {
            system_instruction: CREATIVE_PERSONA.to_string(),
            parts: vec![RequestPart::Text(similar_instruction(problem_text, count))],
            response_schema: similar_schema(),
            temperature: GENERATE_TEMPERATURE,
        };

        debug!(count = count.get(), "generating similar problems");
        let reply = self.client.generate(&request).await?;
        Ok(parse_similar_reply(&reply, count)?)
    }

    /// Solve one generated problem. Independent of every other index.
    ///
    /// # Errors
    ///
    /// See [`SolveService::solve_from_text`].
    pub async fn solve_one(
        &self,
        problem_text: &str,
    ) -> Result<ProblemSolutionResult, TutorServiceError> {
        self.solver.solve_from_text(problem_text).await
    }
}

#[derive(Debug, Deserialize)]
struct SimilarReply {
    problems: Vec<String>,
}

/// Blank statements are dropped and anything past `count` is cut off.
pub(crate) fn parse_similar_reply(
    raw: &str,
    count: SimilarCount,
) -> Result<GeneratedProblems, ResponseFormatError> {
    let reply: SimilarReply = serde_json::from_str(raw.trim()).map_err(|source| {
        warn!(reply = raw, error = %source, "failed to parse similar problems reply");
        ResponseFormatError::Malformed {
            schema: ReplySchema::SimilarProblems,
            source,
        }
    })?;

    let wanted = usize::try_from(count.get()).unwrap_or(usize::MAX);
    let problems: Vec<String> = reply
        .problems
        .into_iter()
        .filter(|problem| !problem.trim().is_empty())
        .take(wanted)
        .collect();

    if problems.is_empty() {
        return Err(ResponseFormatError::NoProblems);
    }
    if problems.len() < wanted {
        warn!(
            requested = wanted,
            received = problems.len(),
            "model returned fewer similar problems than requested"
        );
    }
    Ok(GeneratedProblems::new(problems))
}
