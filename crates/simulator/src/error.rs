use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid run parameters: {0}")]
    InvalidParameters(#[from] core_types::CoreError),

    #[error("Analytics calculation error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("Progress bar template error: {0}")]
    ProgressBarTemplate(String),
}

impl From<indicatif::style::TemplateError> for SimulationError {
    fn from(error: indicatif::style::TemplateError) -> Self {
        SimulationError::ProgressBarTemplate(error.to_string())
    }
}
