mod generate;
mod math_block;
mod original;
mod panel;
mod practice;
mod solution;
mod spinner;
mod upload;

pub use generate::GeneratePanel;
pub use math_block::MathBlock;
pub use original::OriginalPanel;
pub use panel::Panel;
pub use practice::PracticePanel;
pub use solution::SolutionBlock;
pub use spinner::Spinner;
pub use upload::UploadPanel;
