use dioxus::prelude::*;

#[component]
pub fn Panel(title: String, children: Element) -> Element {
    rsx! {
        section { class: "panel",
            h2 { class: "panel-title", "{title}" }
            div { class: "panel-body", {children} }
        }
    }
}
