use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{
    ModelClient, ModelError, ModelRequest, SimilarService, SolveService, TutorServices,
};
use tutor_core::model::{GeneratedProblems, ProblemImage, ProblemSolutionResult, Solution};
use tutor_core::TutorSession;

use crate::context::{UiApp, build_app_context};

use super::actions::TutorIntent;
use super::view::{TutorTestHandles, TutorView};

/// Model fake that answers from a queue and fails once the queue is empty.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<usize>,
}

impl ScriptedClient {
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    async fn generate(&self, _request: &ModelRequest) -> Result<String, ModelError> {
        *self.calls.lock().unwrap() += 1;
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ModelError::EmptyResponse)
    }
}

struct TestApp {
    services: TutorServices,
}

impl UiApp for TestApp {
    fn solve_service(&self) -> Arc<SolveService> {
        self.services.solve()
    }

    fn similar_service(&self) -> Arc<SimilarService> {
        self.services.similar()
    }

    fn model_configured(&self) -> bool {
        self.services.is_configured()
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    handles: TutorTestHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HarnessProps {}

#[component]
fn TutorViewHarness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { TutorView {} }
}

pub struct TutorHarness {
    pub dom: VirtualDom,
    pub client: Arc<ScriptedClient>,
    handles: TutorTestHandles,
}

impl TutorHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn dispatch(&mut self, intent: TutorIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn session(&self) -> TutorSession {
        let session = self.handles.session();
        self.dom.in_runtime(|| session.peek().clone())
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_tutor_harness(seed: TutorSession, replies: &[&str]) -> TutorHarness {
    let client = Arc::new(ScriptedClient {
        replies: Mutex::new(replies.iter().map(|reply| (*reply).to_string()).collect()),
        calls: Mutex::new(0),
    });
    let app = Arc::new(TestApp {
        services: TutorServices::with_client(client.clone()),
    });
    let handles = TutorTestHandles::seeded(seed);

    let dom = VirtualDom::new_with_props(
        TutorViewHarness,
        HarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    TutorHarness {
        dom,
        client,
        handles,
    }
}

pub fn png() -> ProblemImage {
    ProblemImage::from_upload("problem.png", b"\x89PNG\r\n\x1a\npixels".to_vec())
        .expect("png upload")
}

/// A session whose original problem has been solved.
pub fn solved_session(problem_count: u32) -> TutorSession {
    let mut session = TutorSession::new();
    let ticket = session.upload_image(png());
    session.original_solved(
        &ticket,
        ProblemSolutionResult::new(
            "Solve $2x+3=7$",
            problem_count,
            Solution::new("Subtract 3.\nDivide by 2: $x=2$", None),
        ),
    );
    session
}

pub fn session_with_similar(items: &[&str]) -> TutorSession {
    let mut session = solved_session(1);
    let count = u32::try_from(items.len()).expect("count fits");
    let ticket = session.request_similar(count).expect("request similar");
    session.similar_generated(
        &ticket,
        GeneratedProblems::new(items.iter().map(|item| (*item).to_string()).collect()),
    );
    session
}
