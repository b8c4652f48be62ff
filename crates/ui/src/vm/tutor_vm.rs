use tutor_core::TutorSession;
use tutor_core::model::{SimilarCount, Solution};

use crate::vm::math_vm::{render_statement_html, render_steps_html, sanitize_svg};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolutionVm {
    pub steps_html: String,
    pub svg_html: Option<String>,
}

impl From<&Solution> for SolutionVm {
    fn from(solution: &Solution) -> Self {
        Self {
            steps_html: render_steps_html(solution.steps()),
            svg_html: solution.svg().and_then(sanitize_svg),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadVm {
    pub preview: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OriginalVm {
    Empty,
    Loading,
    Ready {
        statement_html: String,
        expanded: bool,
        /// Present only while expanded.
        solution: Option<SolutionVm>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatementVm {
    pub label: String,
    pub html: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerateVm {
    Locked,
    Loading {
        count: u32,
    },
    Controls {
        detected: u32,
        count: u32,
        min: u32,
        max: u32,
    },
    Generated {
        summary: String,
        problems: Vec<StatementVm>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PracticeAction {
    Solve { enabled: bool },
    Solving,
    Toggle { expanded: bool },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeItemVm {
    pub index: usize,
    pub title: String,
    pub action: PracticeAction,
    pub solution: Option<SolutionVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PracticeVm {
    Empty,
    Items(Vec<PracticeItemVm>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TutorVm {
    pub error: Option<String>,
    pub upload: UploadVm,
    pub original: OriginalVm,
    pub generate: GenerateVm,
    pub practice: PracticeVm,
}

#[must_use]
pub fn map_tutor_session(session: &TutorSession) -> TutorVm {
    TutorVm {
        error: session.error().map(|message| message.to_string()),
        upload: map_upload(session),
        original: map_original(session),
        generate: map_generate(session),
        practice: map_practice(session),
    }
}

fn map_upload(session: &TutorSession) -> UploadVm {
    UploadVm {
        preview: session.preview().map(str::to_owned),
        file_name: session.image().map(|image| image.file_name().to_owned()),
    }
}

fn map_original(session: &TutorSession) -> OriginalVm {
    if session.loading().solving_original {
        return OriginalVm::Loading;
    }
    let Some(solution) = session.original_solution() else {
        return OriginalVm::Empty;
    };
    let expanded = session.is_original_expanded();
    OriginalVm::Ready {
        statement_html: render_statement_html(session.problem_text()),
        expanded,
        solution: expanded.then(|| SolutionVm::from(solution)),
    }
}

fn map_generate(session: &TutorSession) -> GenerateVm {
    if session.loading().generating_similar {
        return GenerateVm::Loading {
            count: session.similar_count().get(),
        };
    }
    let problems = session.similar_problems();
    if !problems.is_empty() {
        return GenerateVm::Generated {
            summary: format!("Generated {} problems.", problems.len()),
            problems: problems
                .iter()
                .enumerate()
                .map(|(index, problem)| StatementVm {
                    label: format!("Problem {}", index + 1),
                    html: render_statement_html(problem.statement()),
                })
                .collect(),
        };
    }
    if session.has_original() {
        GenerateVm::Controls {
            detected: session.problem_count(),
            count: session.similar_count().get(),
            min: SimilarCount::MIN,
            max: SimilarCount::MAX,
        }
    } else {
        GenerateVm::Locked
    }
}

fn map_practice(session: &TutorSession) -> PracticeVm {
    let problems = session.similar_problems();
    if problems.is_empty() {
        return PracticeVm::Empty;
    }
    let in_flight = session.loading().solving_similar;
    let items = problems
        .iter()
        .enumerate()
        .map(|(index, problem)| {
            let action = match problem.solution() {
                Some(_) => PracticeAction::Toggle {
                    expanded: problem.is_expanded(),
                },
                None if in_flight == Some(index) => PracticeAction::Solving,
                None => PracticeAction::Solve {
                    enabled: in_flight.is_none(),
                },
            };
            let solution = problem
                .solution()
                .filter(|_| problem.is_expanded())
                .map(SolutionVm::from);
            PracticeItemVm {
                index,
                title: format!("Problem {}", index + 1),
                action,
                solution,
            }
        })
        .collect();
    PracticeVm::Items(items)
}

#[cfg(test)]
mod tests {
    use tutor_core::model::{GeneratedProblems, ProblemImage, ProblemSolutionResult};

    use super::*;

    fn png() -> ProblemImage {
        ProblemImage::from_upload("a.png", b"\x89PNG\r\n\x1a\nrest".to_vec()).unwrap()
    }

    fn solved_session() -> TutorSession {
        let mut session = TutorSession::new();
        let ticket = session.upload_image(png());
        session.original_solved(
            &ticket,
            ProblemSolutionResult::new(
                "Solve $2x+3=7$",
                3,
                Solution::new("Step 1", Some("<svg><line x1=\"0\"/></svg>".into())),
            ),
        );
        session
    }

    fn with_problems(mut session: TutorSession, items: &[&str]) -> TutorSession {
        let ticket = session.request_similar(2).unwrap();
        session.similar_generated(
            &ticket,
            GeneratedProblems::new(items.iter().map(ToString::to_string).collect()),
        );
        session
    }

    #[test]
    fn fresh_session_is_locked() {
        let vm = map_tutor_session(&TutorSession::new());
        assert_eq!(vm.original, OriginalVm::Empty);
        assert_eq!(vm.generate, GenerateVm::Locked);
        assert_eq!(vm.practice, PracticeVm::Empty);
        assert_eq!(vm.upload.preview, None);
        assert_eq!(vm.error, None);
    }

    #[test]
    fn uploading_shows_preview_and_spinner() {
        let mut session = TutorSession::new();
        session.upload_image(png());
        let vm = map_tutor_session(&session);
        assert_eq!(vm.original, OriginalVm::Loading);
        assert!(vm.upload.preview.unwrap().starts_with("data:image/png;base64,"));
        assert_eq!(vm.upload.file_name.as_deref(), Some("a.png"));
    }

    #[test]
    fn solution_is_hidden_until_expanded() {
        let mut session = solved_session();
        let OriginalVm::Ready {
            expanded, solution, ..
        } = map_tutor_session(&session).original
        else {
            panic!("original not ready");
        };
        assert!(!expanded);
        assert!(solution.is_none());

        session.toggle_original();
        let OriginalVm::Ready { solution, .. } = map_tutor_session(&session).original else {
            panic!("original not ready");
        };
        let solution = solution.unwrap();
        assert!(solution.steps_html.contains("Step 1"));
        assert!(solution.svg_html.is_some());
    }

    #[test]
    fn controls_follow_detected_count() {
        let vm = map_tutor_session(&solved_session());
        assert_eq!(
            vm.generate,
            GenerateVm::Controls {
                detected: 3,
                count: 3,
                min: 1,
                max: 20,
            }
        );
    }

    #[test]
    fn practice_actions_reflect_single_in_flight_solve() {
        let mut session = with_problems(solved_session(), &["P1", "P2"]);
        session.solve_similar(0).unwrap();
        let PracticeVm::Items(items) = map_tutor_session(&session).practice else {
            panic!("no practice items");
        };
        assert_eq!(items[0].action, PracticeAction::Solving);
        assert_eq!(items[1].action, PracticeAction::Solve { enabled: false });
        assert_eq!(items[1].title, "Problem 2");
    }

    #[test]
    fn generated_panel_lists_statements() {
        let session = with_problems(solved_session(), &["P1", "P2"]);
        let GenerateVm::Generated { summary, problems } = map_tutor_session(&session).generate
        else {
            panic!("not generated");
        };
        assert_eq!(summary, "Generated 2 problems.");
        assert_eq!(problems[0].label, "Problem 1");
        assert_eq!(problems[1].html, "P2");
    }
}
