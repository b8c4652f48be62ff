use dioxus::prelude::*;

use tutor_core::TutorSession;

use crate::context::AppContext;
use crate::vm::map_tutor_session;

use super::actions::use_tutor_dispatcher;
use super::components::{GeneratePanel, OriginalPanel, PracticePanel, UploadPanel};

#[cfg(test)]
use super::actions::TutorIntent;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn TutorView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_signal(initial_session);
    let dispatch = use_tutor_dispatcher(session);

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<TutorTestHandles>() {
                handles.register(dispatch, session);
            }
        }
    }

    let vm = map_tutor_session(&session.read());

    rsx! {
        div { class: "tutor",
            header { class: "tutor-header",
                h1 { "Math Tutor" }
                p { "Solve a problem from a photo, then practice with similar ones." }
            }
            if !ctx.model_configured() {
                div { class: "notice",
                    "No model key is configured. Set TUTOR_AI_API_KEY and restart to solve problems."
                }
            }
            if let Some(message) = vm.error {
                div { class: "error-banner", role: "alert",
                    strong { "Error!" }
                    span { "{message}" }
                }
            }
            main { class: "panels",
                UploadPanel { upload: vm.upload, on_intent: dispatch }
                OriginalPanel { original: vm.original, on_intent: dispatch }
                GeneratePanel { generate: vm.generate, on_intent: dispatch }
                PracticePanel { practice: vm.practice, on_intent: dispatch }
            }
        }
    }
}

fn initial_session() -> TutorSession {
    #[cfg(test)]
    if let Some(handles) = try_consume_context::<TutorTestHandles>() {
        if let Some(seed) = handles.seed.borrow_mut().take() {
            return seed;
        }
    }
    TutorSession::new()
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct TutorTestHandles {
    seed: Rc<RefCell<Option<TutorSession>>>,
    dispatch: Rc<RefCell<Option<Callback<TutorIntent>>>>,
    session: Rc<RefCell<Option<Signal<TutorSession>>>>,
}

#[cfg(test)]
impl TutorTestHandles {
    pub(crate) fn seeded(session: TutorSession) -> Self {
        let handles = Self::default();
        *handles.seed.borrow_mut() = Some(session);
        handles
    }

    fn register(&self, dispatch: Callback<TutorIntent>, session: Signal<TutorSession>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<TutorIntent> {
        (*self.dispatch.borrow()).expect("tutor dispatch registered")
    }

    pub(crate) fn session(&self) -> Signal<TutorSession> {
        (*self.session.borrow()).expect("tutor session registered")
    }
}
