//! Fixed instructions and response schemas sent to the model.

use serde_json::{Value, json};
use tutor_core::model::SimilarCount;

pub const SOLVE_TEMPERATURE: f32 = 0.2;
pub const GENERATE_TEMPERATURE: f32 = 0.8;

pub const TUTOR_PERSONA: &str = "You are an excellent middle-school (grades 6 to 9) mathematics \
teacher. Your job is to solve problems in detail, step by step, in a way students can follow. \
IMPORTANT: every mathematical formula, expression, exponent and fraction MUST be written in LaTeX \
and wrapped in a pair of $ signs (for example $x^2 + 2x + 1 = 0$, $\\frac{1}{2}$).";

pub const CREATIVE_PERSONA: &str = "You are a creative middle-school (grades 6 to 9) mathematics \
teacher. You always write formulas in LaTeX wrapped in $ signs ($...$).";

pub const IMAGE_INSTRUCTION: &str = "Analyze the following image. First, transcribe the problem \
exactly, keeping its line breaks. Count how many separate problems it contains. Then present a \
detailed step-by-step solution. If it is a geometry problem you MUST draw a clear SVG figure with \
every label needed to illustrate it. Remember to use LaTeX for formulas ($...$).";

const STATEMENT_DESCRIPTION: &str = "The problem statement transcribed exactly from the image. \
Mathematical formulas MUST be written in LaTeX wrapped in $ signs (for example $x^2$).";
const ECHO_STATEMENT_DESCRIPTION: &str = "The given problem statement, copied back.";
const COUNT_DESCRIPTION: &str =
    "How many separate problems the statement contains (for example Problem 1 and Problem 2 is 2).";
const STEPS_DESCRIPTION: &str = "A detailed, easy to follow, step-by-step solution. Mathematical \
formulas MUST be written in LaTeX wrapped in $ signs (for example $x^2$).";
const SVG_DESCRIPTION: &str =
    "SVG source of an illustrative figure when this is a geometry problem. Otherwise null.";
const SIMILAR_DESCRIPTION: &str =
    "One similar problem statement. Formulas use LaTeX wrapped in $ signs.";

/// Which input the solve request starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveInput {
    Image,
    Text,
}

#[must_use]
pub fn text_instruction(problem_text: &str) -> String {
    format!(
        "Here is the problem: \"{problem_text}\". Present a detailed step-by-step solution. If it \
is a geometry problem you MUST draw a clear SVG figure with every label needed to illustrate it. \
Remember to use LaTeX for formulas ($...$)."
    )
}

#[must_use]
pub fn similar_instruction(problem_text: &str, count: SimilarCount) -> String {
    let count = count.get();
    format!(
        "Based on the following original problem: \"{problem_text}\", create exactly {count} \
similar problems (keep the same structure and number of exercises, only change the numbers or \
the context). The new problems must test the same kind of knowledge at an equivalent difficulty.

Important presentation rules:
- Every problem must be written clearly.
- Sub-parts (such as a, b, c... or 1, 2, 3...) of a problem MUST each start on their own line.
- Use LaTeX for formulas ($...$).
- Do not run everything together into one paragraph.

Return the result as a JSON object."
    )
}

#[must_use]
pub fn solution_schema(input: SolveInput) -> Value {
    let statement = match input {
        SolveInput::Image => STATEMENT_DESCRIPTION,
        SolveInput::Text => ECHO_STATEMENT_DESCRIPTION,
    };
    json!({
        "type": "OBJECT",
        "properties": {
            "problemText": { "type": "STRING", "description": statement },
            "problemCount": { "type": "INTEGER", "description": COUNT_DESCRIPTION },
            "solution": {
                "type": "OBJECT",
                "properties": {
                    "steps": { "type": "STRING", "description": STEPS_DESCRIPTION },
                    "svg": { "type": "STRING", "description": SVG_DESCRIPTION, "nullable": true }
                },
                "required": ["steps", "svg"]
            }
        },
        "required": ["problemText", "problemCount", "solution"]
    })
}

#[must_use]
pub fn similar_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "problems": {
                "type": "ARRAY",
                "items": { "type": "STRING", "description": SIMILAR_DESCRIPTION }
            }
        },
        "required": ["problems"]
    })
}
