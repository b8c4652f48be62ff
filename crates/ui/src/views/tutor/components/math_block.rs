use dioxus::document::eval;
use dioxus::prelude::*;
use tracing::warn;

use crate::vm::typeset_script;

/// Pre-rendered HTML that gets typeset again whenever it changes.
#[component]
pub fn MathBlock(id: String, html: String, #[props(default)] class: String) -> Element {
    use_effect(use_reactive((&id, &html), move |(id, _html)| {
        spawn(async move {
            typeset(&id).await;
        });
    }));

    rsx! {
        div { id: "{id}", class: "math-block {class}", dangerous_inner_html: "{html}" }
    }
}

async fn typeset(element_id: &str) {
    match eval(&typeset_script(element_id)).join::<String>().await {
        Ok(status) if status.starts_with("error") => {
            warn!(element = element_id, %status, "math typesetting failed");
        }
        Ok(_) => {}
        Err(err) => {
            warn!(element = element_id, error = ?err, "math typesetting script did not run");
        }
    }
}
