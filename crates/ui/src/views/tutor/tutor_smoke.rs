use tutor_core::{SessionMessage, TutorSession};

use super::actions::TutorIntent;
use super::test_harness::{session_with_similar, setup_tutor_harness, solved_session};

#[tokio::test(flavor = "current_thread")]
async fn fresh_view_renders_placeholders() {
    let mut harness = setup_tutor_harness(TutorSession::new(), &[]);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("1. Upload the problem"), "missing upload panel in {html}");
    assert!(html.contains("Upload and solve the original problem first."));
    assert!(html.contains("Generate similar problems in step 3"));
    assert!(!html.contains("error-banner"));
}

#[tokio::test(flavor = "current_thread")]
async fn solved_view_shows_statement_and_controls() {
    let mut harness = setup_tutor_harness(solved_session(2), &[]);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Problem extracted from the image:"), "{html}");
    assert!(html.contains("\\(2x+3&#61;7\\)"), "{html}");
    assert!(html.contains("Show detailed solution"));
    assert!(!html.contains("Solution steps:"));
    assert!(html.contains("Generate similar problems"));
    assert!(html.contains("data:image/png;base64,"));
}

#[tokio::test(flavor = "current_thread")]
async fn failed_solve_shows_banner() {
    let mut session = TutorSession::new();
    let ticket = session.upload_image(super::test_harness::png());
    session.original_failed(&ticket);

    let mut harness = setup_tutor_harness(session, &[]);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("error-banner"), "{html}");
    assert!(html.contains(&SessionMessage::SolveOriginalFailed.to_string()));
}

#[tokio::test(flavor = "current_thread")]
async fn toggling_original_reveals_steps() {
    let mut harness = setup_tutor_harness(solved_session(1), &[]);
    harness.rebuild();
    harness.dispatch(TutorIntent::ToggleOriginal);
    let html = harness.render();
    assert!(html.contains("Solution steps:"), "{html}");
    assert!(html.contains("Hide solution"));
    assert!(html.contains("<br>"));
}

#[tokio::test(flavor = "current_thread")]
async fn generate_then_solve_one_problem() {
    let mut harness = setup_tutor_harness(
        solved_session(1),
        &[
            r#"{"problems":["P1","P2"]}"#,
            r#"{"problemText":"P2","problemCount":1,"solution":{"steps":"S2","svg":null}}"#,
        ],
    );
    harness.rebuild();

    harness.dispatch(TutorIntent::SetSimilarCount(2));
    harness.dispatch(TutorIntent::GenerateSimilar);
    harness.drive_async().await;

    let session = harness.session();
    assert_eq!(session.similar_problems().len(), 2);
    assert!(!session.loading().generating_similar);

    harness.dispatch(TutorIntent::SolveSimilar(1));
    harness.drive_async().await;

    let session = harness.session();
    let problems = session.similar_problems();
    assert!(problems[0].solution().is_none());
    assert_eq!(problems[1].solution().map(|s| s.steps()), Some("S2"));
    assert!(problems[1].is_expanded());
    assert_eq!(harness.client.calls(), 2);

    let html = harness.render();
    assert!(html.contains("Generated 2 problems."), "{html}");
    assert!(html.contains("Solve this problem"));
    assert!(html.contains("Hide solution"));
}

#[tokio::test(flavor = "current_thread")]
async fn failed_generation_keeps_list_empty() {
    let mut harness = setup_tutor_harness(solved_session(1), &["not json"]);
    harness.rebuild();

    harness.dispatch(TutorIntent::GenerateSimilar);
    harness.drive_async().await;

    let session = harness.session();
    assert!(session.similar_problems().is_empty());
    assert_eq!(session.error(), Some(SessionMessage::GenerateSimilarFailed));
    let html = harness.render();
    assert!(html.contains("Something went wrong while generating similar problems."));
}

#[tokio::test(flavor = "current_thread")]
async fn discarding_returns_to_controls() {
    let mut harness = setup_tutor_harness(session_with_similar(&["P1", "P2"]), &[]);
    harness.rebuild();
    assert!(harness.render().contains("Generate another set"));

    harness.dispatch(TutorIntent::DiscardSimilar);
    let html = harness.render();
    assert!(!html.contains("Generate another set"));
    assert!(html.contains("How many similar problems"));
    assert_eq!(harness.client.calls(), 0);
}
