use std::sync::Arc;

use dioxus::prelude::*;
use tracing::{debug, error};

use services::{SimilarService, SolveService};
use tutor_core::model::ProblemImage;
use tutor_core::{Transition, TutorSession, ValidationError};

use crate::context::AppContext;

/// Everything a user can do on the tutoring screen.
#[derive(Clone, Debug)]
pub enum TutorIntent {
    Upload(ProblemImage),
    RejectUpload(ValidationError),
    ToggleOriginal,
    SetSimilarCount(i64),
    GenerateSimilar,
    DiscardSimilar,
    SolveSimilar(usize),
    ToggleSimilar(usize),
}

pub(super) fn use_tutor_dispatcher(session: Signal<TutorSession>) -> Callback<TutorIntent> {
    let ctx = use_context::<AppContext>();
    let solve = ctx.solve_service();
    let similar = ctx.similar_service();

    use_callback(move |intent: TutorIntent| {
        let mut session = session;
        match intent {
            TutorIntent::Upload(image) => solve_original(session, Arc::clone(&solve), image),
            TutorIntent::RejectUpload(err) => session.write().reject_upload(&err),
            TutorIntent::ToggleOriginal => session.write().toggle_original(),
            TutorIntent::SetSimilarCount(raw) => session.write().set_similar_count(raw),
            TutorIntent::GenerateSimilar => generate_similar(session, Arc::clone(&similar)),
            TutorIntent::DiscardSimilar => session.write().discard_similar(),
            TutorIntent::SolveSimilar(index) => {
                solve_similar(session, Arc::clone(&similar), index);
            }
            TutorIntent::ToggleSimilar(index) => session.write().toggle_similar(index),
        }
    })
}

fn solve_original(mut session: Signal<TutorSession>, solve: Arc<SolveService>, image: ProblemImage) {
    let ticket = session.write().upload_image(image);
    spawn(async move {
        let outcome = solve.solve_from_image(ticket.image()).await;
        let transition = match outcome {
            Ok(result) => session.write().original_solved(&ticket, result),
            Err(err) => {
                error!(error = %err, "solving the uploaded problem failed");
                session.write().original_failed(&ticket)
            }
        };
        note_stale(transition, "solve original");
    });
}

fn generate_similar(mut session: Signal<TutorSession>, similar: Arc<SimilarService>) {
    let count = session.peek().similar_count().get();
    let requested = session.write().request_similar(count);
    let ticket = match requested {
        Ok(ticket) => ticket,
        Err(err) => {
            debug!(error = %err, "similar generation rejected");
            return;
        }
    };

    spawn(async move {
        let outcome = similar
            .generate_similar(ticket.problem_text(), ticket.count().get())
            .await;
        let transition = match outcome {
            Ok(problems) => session.write().similar_generated(&ticket, problems),
            Err(err) => {
                error!(error = %err, "generating similar problems failed");
                session.write().similar_generation_failed(&ticket)
            }
        };
        note_stale(transition, "generate similar");
    });
}

fn solve_similar(mut session: Signal<TutorSession>, similar: Arc<SimilarService>, index: usize) {
    let Some(ticket) = session.write().solve_similar(index) else {
        debug!(index, "similar solve ignored");
        return;
    };

    spawn(async move {
        let outcome = similar.solve_one(ticket.statement()).await;
        let transition = match outcome {
            Ok(result) => session.write().similar_solved(&ticket, result),
            Err(err) => {
                error!(index = ticket.index(), error = %err, "solving similar problem failed");
                session.write().similar_solve_failed(&ticket)
            }
        };
        note_stale(transition, "solve similar");
    });
}

fn note_stale(transition: Transition, action: &'static str) {
    if !transition.is_applied() {
        debug!(action, "dropped a response for replaced state");
    }
}
