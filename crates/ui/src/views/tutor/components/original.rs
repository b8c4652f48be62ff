use dioxus::prelude::*;

use crate::vm::OriginalVm;

use super::super::actions::TutorIntent;
use super::{MathBlock, Panel, SolutionBlock, Spinner};

#[component]
pub fn OriginalPanel(original: OriginalVm, on_intent: Callback<TutorIntent>) -> Element {
    rsx! {
        Panel { title: "2. Problem content",
            match original {
                OriginalVm::Loading => rsx! {
                    Spinner { label: "Reading and solving the problem..." }
                },
                OriginalVm::Empty => rsx! {
                    p { class: "placeholder",
                        "The problem text and its solution will appear here after you upload an image."
                    }
                },
                OriginalVm::Ready { statement_html, expanded, solution } => rsx! {
                    h3 { "Problem extracted from the image:" }
                    MathBlock { id: "original-statement", html: statement_html, class: "statement" }
                    div { class: "panel-actions",
                        button {
                            class: if expanded { "toggle toggle--open" } else { "toggle" },
                            r#type: "button",
                            onclick: move |_| on_intent.call(TutorIntent::ToggleOriginal),
                            if expanded { "Hide solution" } else { "Show detailed solution" }
                        }
                    }
                    if let Some(solution) = solution {
                        SolutionBlock { id: "original-solution", solution }
                    }
                },
            }
        }
    }
}
