/// Errors building a scripted flight profile.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProfileError {
    #[error("profile has no keyframes")]
    Empty,

    #[error("keyframe {0} is not strictly after its predecessor")]
    NonMonotonic(usize),

    #[error("keyframe {0} has a non-finite time or value")]
    NonFinite(usize),
}
