mod actions;
mod components;
mod view;

pub use view::TutorView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod tutor_smoke;
