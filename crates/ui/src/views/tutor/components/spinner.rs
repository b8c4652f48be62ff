use dioxus::prelude::*;

#[component]
pub fn Spinner(label: String) -> Element {
    rsx! {
        div { class: "spinner", role: "status",
            div { class: "spinner-ring" }
            p { class: "spinner-label", "{label}" }
        }
    }
}
