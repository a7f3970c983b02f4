use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("A0h page too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}
