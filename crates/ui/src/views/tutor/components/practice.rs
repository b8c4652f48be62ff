use dioxus::prelude::*;

use crate::vm::{PracticeAction, PracticeItemVm, PracticeVm};

use super::super::actions::TutorIntent;
use super::{Panel, SolutionBlock};

#[component]
pub fn PracticePanel(practice: PracticeVm, on_intent: Callback<TutorIntent>) -> Element {
    rsx! {
        Panel { title: "4. Solutions for similar problems",
            match practice {
                PracticeVm::Empty => rsx! {
                    p { class: "placeholder",
                        "Generate similar problems in step 3 to see their solutions here."
                    }
                },
                PracticeVm::Items(items) => rsx! {
                    p { class: "muted", "Pick a problem to see its solution:" }
                    for item in items {
                        PracticeItem { key: "{item.index}", item: item.clone(), on_intent }
                    }
                },
            }
        }
    }
}

#[component]
fn PracticeItem(item: PracticeItemVm, on_intent: Callback<TutorIntent>) -> Element {
    let index = item.index;
    rsx! {
        div { class: "practice-item",
            div { class: "practice-item-header",
                h3 { "{item.title}" }
                match item.action {
                    PracticeAction::Toggle { expanded } => rsx! {
                        button {
                            class: "toggle",
                            r#type: "button",
                            onclick: move |_| on_intent.call(TutorIntent::ToggleSimilar(index)),
                            if expanded { "Hide solution" } else { "Show solution" }
                        }
                    },
                    PracticeAction::Solving => rsx! {
                        button { class: "solve solve--busy", r#type: "button", disabled: true,
                            span { class: "spinner-ring spinner-ring--small" }
                            "Solving..."
                        }
                    },
                    PracticeAction::Solve { enabled } => rsx! {
                        button {
                            id: "solve-similar-{index}",
                            class: "solve",
                            r#type: "button",
                            disabled: !enabled,
                            onclick: move |_| on_intent.call(TutorIntent::SolveSimilar(index)),
                            "Solve this problem"
                        }
                    },
                }
            }
            if let Some(solution) = item.solution {
                SolutionBlock { id: "similar-solution-{index}", solution }
            }
        }
    }
}
