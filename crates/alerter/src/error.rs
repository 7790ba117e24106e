use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlerterError {
    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("SMTP server rejected the message with code {0}")]
    Rejected(String),

    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build the email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("Notifier is not configured. Missing SMTP host, sender or credentials.")]
    NotConfigured,
}
