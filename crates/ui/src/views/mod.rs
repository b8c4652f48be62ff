mod tutor;

pub use tutor::TutorView;
