use dioxus::prelude::*;

use crate::vm::SolutionVm;

use super::MathBlock;

#[component]
pub fn SolutionBlock(id: String, solution: SolutionVm) -> Element {
    rsx! {
        div { class: "solution",
            h3 { class: "solution-heading", "Solution steps:" }
            MathBlock { id: "{id}-steps", html: solution.steps_html, class: "solution-steps" }
            if let Some(svg) = solution.svg_html {
                div { class: "illustration",
                    h4 { "Illustration:" }
                    div { class: "illustration-frame", dangerous_inner_html: "{svg}" }
                }
            }
        }
    }
}
