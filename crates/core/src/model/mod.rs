mod count;
mod image;
mod problem;
mod solution;

pub use count::SimilarCount;
pub use image::{ImageFormat, ProblemImage};
pub use problem::{GeneratedProblems, SimilarProblem};
pub use solution::{ProblemSolutionResult, Solution};
