mod math_vm;
mod tutor_vm;

pub use math_vm::{
    MathSegment, render_statement_html, render_steps_html, sanitize_svg, split_math,
    typeset_script,
};
pub use tutor_vm::{
    GenerateVm, OriginalVm, PracticeAction, PracticeItemVm, PracticeVm, SolutionVm, StatementVm,
    TutorVm, UploadVm, map_tutor_session,
};
