#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod session;

pub use error::ValidationError;
pub use session::{
    GenerateTicket, LoadingFlags, OriginalTicket, SessionMessage, SimilarSolveTicket, Transition,
    TutorSession,
};
