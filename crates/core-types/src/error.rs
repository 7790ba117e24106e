use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("The terms and conditions must be accepted before running a simulation")]
    TermsNotAccepted,
}
