use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiagnosticError {
    #[error("A2h page too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}
