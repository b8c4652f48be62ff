use dioxus::prelude::*;
use tracing::{error, warn};

use tutor_core::ValidationError;
use tutor_core::model::ProblemImage;

use crate::vm::UploadVm;

use super::super::actions::TutorIntent;
use super::Panel;

#[component]
pub fn UploadPanel(upload: UploadVm, on_intent: Callback<TutorIntent>) -> Element {
    let on_change = move |evt: FormEvent| async move {
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        let file_name = file.name();
        let intent = match file.read_bytes().await {
            Ok(bytes) => match ProblemImage::from_upload(file_name.clone(), bytes.to_vec()) {
                Ok(image) => TutorIntent::Upload(image),
                Err(err) => {
                    warn!(file = %file_name, error = %err, "rejected upload");
                    TutorIntent::RejectUpload(err)
                }
            },
            Err(err) => {
                error!(file = %file_name, error = ?err, "reading the uploaded file failed");
                TutorIntent::RejectUpload(ValidationError::EmptyImage)
            }
        };
        on_intent.call(intent);
    };

    rsx! {
        Panel { title: "1. Upload the problem",
            label { class: "upload-drop", r#for: "file-upload",
                if let Some(preview) = upload.preview {
                    img { class: "upload-preview", src: "{preview}", alt: "Problem preview" }
                } else {
                    p { class: "upload-cta", "Click to choose a photo of the problem" }
                    p { class: "upload-hint", "PNG, JPG or WEBP images" }
                }
            }
            input {
                id: "file-upload",
                class: "hidden",
                r#type: "file",
                accept: "image/png,image/jpeg,image/webp",
                onchange: on_change,
            }
            if let Some(file_name) = upload.file_name {
                p { class: "upload-name", "{file_name}" }
            }
        }
    }
}
