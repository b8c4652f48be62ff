use dioxus::prelude::*;

use crate::vm::GenerateVm;

use super::super::actions::TutorIntent;
use super::{MathBlock, Panel, Spinner};

#[component]
pub fn GeneratePanel(generate: GenerateVm, on_intent: Callback<TutorIntent>) -> Element {
    rsx! {
        Panel { title: "3. Generate similar problems",
            match generate {
                GenerateVm::Locked => rsx! {
                    p { class: "placeholder", "Upload and solve the original problem first." }
                },
                GenerateVm::Loading { count } => rsx! {
                    Spinner { label: "Writing {count} new problems..." }
                },
                GenerateVm::Controls { detected, count, min, max } => rsx! {
                    div { class: "generate-controls",
                        p {
                            "Detected "
                            strong { "{detected}" }
                            " problem(s) in the photo. How many similar problems do you want?"
                        }
                        label { class: "count-field",
                            span { "Count:" }
                            input {
                                id: "similar-count",
                                r#type: "number",
                                min: "{min}",
                                max: "{max}",
                                value: "{count}",
                                oninput: move |evt: FormEvent| {
                                    let raw = evt.value().trim().parse::<i64>().unwrap_or(1);
                                    on_intent.call(TutorIntent::SetSimilarCount(raw));
                                },
                            }
                        }
                        button {
                            id: "generate-similar",
                            class: "primary",
                            r#type: "button",
                            onclick: move |_| on_intent.call(TutorIntent::GenerateSimilar),
                            "Generate similar problems"
                        }
                    }
                },
                GenerateVm::Generated { summary, problems } => rsx! {
                    div { class: "generated-header",
                        p { class: "muted", "{summary}" }
                        button {
                            class: "link",
                            r#type: "button",
                            onclick: move |_| on_intent.call(TutorIntent::DiscardSimilar),
                            "Generate another set"
                        }
                    }
                    for (index, problem) in problems.into_iter().enumerate() {
                        div { key: "{index}", class: "problem-card",
                            span { class: "badge", "{problem.label}" }
                            MathBlock { id: "similar-statement-{index}", html: problem.html.clone(), class: "statement" }
                        }
                    }
                },
            }
        }
    }
}
