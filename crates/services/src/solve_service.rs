use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use tutor_core::ValidationError;
use tutor_core::model::{ProblemImage, ProblemSolutionResult, Solution};

use crate::error::{ReplySchema, ResponseFormatError, TutorServiceError};
use crate::model::{ModelClient, ModelRequest, RequestPart};
use crate::prompts::{
    IMAGE_INSTRUCTION, SOLVE_TEMPERATURE, SolveInput, TUTOR_PERSONA, solution_schema,
    text_instruction,
};

/// Transcribes and solves a problem from a photo or from text.
#[derive(Clone)]
pub struct SolveService {
    client: Arc<dyn ModelClient>,
}

impl SolveService {
    #[must_use]
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Transcribe, count and solve the problem in `image`.
    ///
    /// # Errors
    ///
    /// Returns `TutorServiceError::Upstream` when the model call fails and
    /// `TutorServiceError::ResponseFormat` when the reply does not decode.
    pub async fn solve_from_image(
        &self,
        image: &ProblemImage,
    ) -> Result<ProblemSolutionResult, TutorServiceError> {
        let request = ModelRequest {
            system_instruction: TUTOR_PERSONA.to_string(),
            parts: vec![
                RequestPart::InlineImage {
                    mime_type: image.mime_type().to_string(),
                    data: image.shared_bytes(),
                },
                RequestPart::Text(IMAGE_INSTRUCTION.to_string()),
            ],
            response_schema: solution_schema(SolveInput::Image),
            temperature: SOLVE_TEMPERATURE,
        };

        debug!(file = image.file_name(), bytes = image.len(), "solving problem image");
        let reply = self.client.generate(&request).await?;
        Ok(parse_solve_reply(&reply, None)?)
    }

    /// Solve an already transcribed problem statement.
    ///
    /// # Errors
    ///
    /// Returns `TutorServiceError::Validation` for blank input, otherwise the
    /// same errors as [`SolveService::solve_from_image`].
    pub async fn solve_from_text(
        &self,
        problem_text: &str,
    ) -> Result<ProblemSolutionResult, TutorServiceError> {
        if problem_text.trim().is_empty() {
            return Err(ValidationError::EmptyProblemText.into());
        }

        let request = ModelRequest {
            system_instruction: TUTOR_PERSONA.to_string(),
            parts: vec![RequestPart::Text(text_instruction(problem_text))],
            response_schema: solution_schema(SolveInput::Text),
            temperature: SOLVE_TEMPERATURE,
        };

        debug!(chars = problem_text.chars().count(), "solving problem text");
        let reply = self.client.generate(&request).await?;
        Ok(parse_solve_reply(&reply, Some(problem_text))?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolveReply {
    #[serde(default)]
    problem_text: Option<String>,
    #[serde(default)]
    problem_count: Option<i64>,
    solution: SolutionReply,
}

#[derive(Debug, Deserialize)]
struct SolutionReply {
    #[serde(default)]
    steps: Option<String>,
    #[serde(default)]
    svg: Option<String>,
}

/// Decode a solve reply. `echo` is the statement that was sent on the text
/// path; it stands in when the model leaves `problemText` out.
pub(crate) fn parse_solve_reply(
    raw: &str,
    echo: Option<&str>,
) -> Result<ProblemSolutionResult, ResponseFormatError> {
    let reply: SolveReply = serde_json::from_str(raw.trim()).map_err(|source| {
        warn!(reply = raw, error = %source, "failed to parse solve reply");
        ResponseFormatError::Malformed {
            schema: ReplySchema::Solution,
            source,
        }
    })?;

    let problem_text = match reply.problem_text.filter(|text| !text.trim().is_empty()) {
        Some(text) => text,
        None => echo
            .map(str::to_owned)
            .ok_or(ResponseFormatError::MissingProblemText)?,
    };
    let steps = reply
        .solution
        .steps
        .filter(|steps| !steps.trim().is_empty())
        .ok_or(ResponseFormatError::MissingSteps)?;
    let problem_count = reply
        .problem_count
        .and_then(|count| u32::try_from(count).ok())
        .filter(|count| *count > 0)
        .unwrap_or(1);

    Ok(ProblemSolutionResult::new(
        problem_text,
        problem_count,
        Solution::new(steps, reply.solution.svg),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_reply() {
        let raw = r#"
            {"problemText":"Solve 2x+3=7","problemCount":1,
             "solution":{"steps":"Step 1...","svg":null}}
        "#;
        let result = parse_solve_reply(raw, None).unwrap();
        assert_eq!(result.problem_text(), "Solve 2x+3=7");
        assert_eq!(result.problem_count(), 1);
        assert_eq!(result.solution().steps(), "Step 1...");
        assert_eq!(result.solution().svg(), None);
    }

    #[test]
    fn keeps_svg_for_geometry() {
        let raw = r#"{"problemText":"Triangle","problemCount":2,
            "solution":{"steps":"s","svg":"<svg><line x1=\"0\"/></svg>"}}"#;
        let result = parse_solve_reply(raw, None).unwrap();
        assert_eq!(result.problem_count(), 2);
        assert_eq!(result.solution().svg(), Some("<svg><line x1=\"0\"/></svg>"));
    }

    #[test]
    fn text_path_fills_missing_statement() {
        let raw = r#"{"problemCount":1,"solution":{"steps":"s"}}"#;
        let result = parse_solve_reply(raw, Some("P2")).unwrap();
        assert_eq!(result.problem_text(), "P2");

        let blank = r#"{"problemText":"  ","solution":{"steps":"s"}}"#;
        assert_eq!(parse_solve_reply(blank, Some("P3")).unwrap().problem_text(), "P3");
    }

    #[test]
    fn image_path_requires_statement() {
        let raw = r#"{"problemCount":1,"solution":{"steps":"s"}}"#;
        assert!(matches!(
            parse_solve_reply(raw, None),
            Err(ResponseFormatError::MissingProblemText)
        ));
    }

    #[test]
    fn bad_counts_default_to_one() {
        for count in ["0", "-3", "null"] {
            let raw = format!(
                r#"{{"problemText":"x","problemCount":{count},"solution":{{"steps":"s"}}}}"#
            );
            assert_eq!(parse_solve_reply(&raw, None).unwrap().problem_count(), 1);
        }
        let missing = r#"{"problemText":"x","solution":{"steps":"s"}}"#;
        assert_eq!(parse_solve_reply(missing, None).unwrap().problem_count(), 1);
    }

    #[test]
    fn malformed_replies_are_format_errors() {
        assert!(matches!(
            parse_solve_reply("Sorry, I cannot help with that.", None),
            Err(ResponseFormatError::Malformed {
                schema: ReplySchema::Solution,
                ..
            })
        ));
        assert!(matches!(
            parse_solve_reply(r#"{"problemText":"x"}"#, None),
            Err(ResponseFormatError::Malformed { .. })
        ));
        assert!(matches!(
            parse_solve_reply(r#"{"problemText":"x","solution":{"steps":""}}"#, None),
            Err(ResponseFormatError::MissingSteps)
        ));
    }
}
