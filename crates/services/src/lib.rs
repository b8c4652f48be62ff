#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod model;
pub mod prompts;
pub mod similar_service;
pub mod solve_service;

pub use app_services::TutorServices;
pub use config::ModelConfig;
pub use error::{ModelError, ReplySchema, ResponseFormatError, TutorServiceError};
pub use model::{GeminiClient, ModelClient, ModelRequest, RequestPart};
pub use similar_service::SimilarService;
pub use solve_service::SolveService;
