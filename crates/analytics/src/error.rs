use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("No price data available for {0}")]
    NoData(String),

    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),

    #[error("Calculation error: Division by zero encountered in metric '{0}'")]
    DivisionByZero(String),

    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Error in calculation: {0}")]
    Calculation(String),
}
