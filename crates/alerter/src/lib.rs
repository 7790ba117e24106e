use async_trait::async_trait;
use configuration::NotifierConfig;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

pub mod error;

pub use error::AlerterError;

const SUBJECT: &str = "Contact request - ETF Simulator";
const DEFAULT_SIGNATURE: &str = "The Advisory Team";

/// Who should hear back from an advisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRequest {
    pub recipient: String,
    pub display_name: String,
}

impl ContactRequest {
    pub fn new(recipient: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into().trim().to_string(),
            display_name: display_name.into().trim().to_string(),
        }
    }
}

/// A rendered contact email, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub subject: String,
    pub body: String,
}

impl ContactMessage {
    /// Renders the fixed acknowledgement sent when a user asks for an advisor.
    pub fn render(request: &ContactRequest, signature: &str) -> Self {
        let signature = if signature.trim().is_empty() {
            DEFAULT_SIGNATURE
        } else {
            signature
        };
        let body = format!(
            "Dear {},\n\n\
             Thank you for using the ETF Comparison Simulator. \
             An advisor will get in touch with you shortly.\n\n\
             Kind regards,\n\
             {}\n",
            request.display_name, signature
        );

        Self {
            subject: SUBJECT.to_string(),
            body,
        }
    }
}

/// Sends the advisor contact acknowledgement.
///
/// Implementations report failure through the `Result`; callers surface it to
/// the user and carry on, so a failed send never affects computed results.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_contact_request(&self, request: &ContactRequest) -> Result<(), AlerterError>;
}

/// Sends the contact email over authenticated SMTP with implicit TLS.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpNotifier {
    /// Creates a new `SmtpNotifier`.
    ///
    /// Returns `None` if the SMTP host, sender or credentials are missing from
    /// the configuration, or the sender address is malformed, allowing the
    /// system to gracefully disable the contact feature.
    pub fn new(config: &NotifierConfig) -> Option<Self> {
        if config.smtp_host.is_empty()
            || config.sender_address.is_empty()
            || config.username.is_empty()
            || config.password.is_empty()
        {
            tracing::warn!("Mail notifier is not configured (missing SMTP host, sender or credentials).");
            return None;
        }

        let sender = match sender_mailbox(config) {
            Ok(sender) => sender,
            Err(e) => {
                tracing::warn!(error = %e, "Mail notifier disabled: invalid sender address.");
                return None;
            }
        };

        let transport = match AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host) {
            Ok(builder) => builder
                .port(config.smtp_port)
                .credentials(Credentials::new(
                    config.username.clone(),
                    config.password.clone(),
                ))
                .build(),
            Err(e) => {
                tracing::warn!(error = %e, host = %config.smtp_host, "Mail notifier disabled: invalid SMTP host.");
                return None;
            }
        };

        Some(Self { transport, sender })
    }

    /// Builds the MIME message for `request`, signed with the sender's name.
    pub fn build_message(&self, request: &ContactRequest) -> Result<Message, AlerterError> {
        let signature = self.sender.name.as_deref().unwrap_or_default();
        let rendered = ContactMessage::render(request, signature);
        let display_name = (!request.display_name.is_empty()).then(|| request.display_name.clone());
        let recipient = Mailbox::new(display_name, request.recipient.parse::<Address>()?);

        Ok(Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(rendered.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(rendered.body)?)
    }
}

fn sender_mailbox(config: &NotifierConfig) -> Result<Mailbox, AlerterError> {
    let address = config.sender_address.parse::<Address>()?;
    let name = (!config.sender_name.trim().is_empty()).then(|| config.sender_name.trim().to_string());
    Ok(Mailbox::new(name, address))
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_contact_request(&self, request: &ContactRequest) -> Result<(), AlerterError> {
        let message = self.build_message(request)?;
        let response = self.transport.send(message).await?;

        if !response.is_positive() {
            return Err(AlerterError::Rejected(response.code().to_string()));
        }

        tracing::info!(recipient = %request.recipient, "Contact request email sent.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> NotifierConfig {
        NotifierConfig {
            smtp_host: "127.0.0.1".to_string(),
            smtp_port: 9,
            sender_address: "advisors@example.com".to_string(),
            sender_name: "ETF Advisors".to_string(),
            username: "smtp-user".to_string(),
            password: "smtp-secret".to_string(),
        }
    }

    #[test]
    fn message_greets_the_user_by_name() {
        let request = ContactRequest::new(" ana@example.com ", " Ana Pérez ");
        let message = ContactMessage::render(&request, "ETF Advisors");

        assert_eq!(request.recipient, "ana@example.com");
        assert_eq!(message.subject, "Contact request - ETF Simulator");
        assert!(message.body.starts_with("Dear Ana Pérez,"));
        assert!(message.body.contains("An advisor will get in touch"));
        assert!(message.body.trim_end().ends_with("ETF Advisors"));
    }

    #[test]
    fn blank_signature_falls_back_to_default() {
        let request = ContactRequest::new("a@b.c", "A");
        let message = ContactMessage::render(&request, "  ");
        assert!(message.body.contains(DEFAULT_SIGNATURE));
    }

    #[tokio::test]
    async fn missing_settings_disable_the_notifier() {
        assert!(SmtpNotifier::new(&NotifierConfig::default()).is_none());

        let mut config = configured();
        config.password.clear();
        assert!(SmtpNotifier::new(&config).is_none());

        let mut config = configured();
        config.sender_address = "not an address".to_string();
        assert!(SmtpNotifier::new(&config).is_none());

        assert!(SmtpNotifier::new(&configured()).is_some());
    }

    #[tokio::test]
    async fn built_message_carries_headers_and_template() {
        let notifier = SmtpNotifier::new(&configured()).unwrap();
        let message = notifier
            .build_message(&ContactRequest::new("ana@example.com", "Ana"))
            .unwrap();

        let envelope = message.envelope();
        assert_eq!(envelope.from().map(|a| a.to_string()), Some("advisors@example.com".to_string()));
        assert_eq!(envelope.to()[0].to_string(), "ana@example.com");

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Contact request - ETF Simulator"));
        assert!(raw.contains("Dear Ana,"));
        assert!(raw.contains("ETF Advisors"));
    }

    #[tokio::test]
    async fn invalid_recipient_is_an_address_error() {
        let notifier = SmtpNotifier::new(&configured()).unwrap();
        let result = notifier
            .send_contact_request(&ContactRequest::new("no-at-sign", "Ana"))
            .await;
        assert!(matches!(result, Err(AlerterError::Address(_))));
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error_not_a_panic() {
        let notifier = SmtpNotifier::new(&configured()).unwrap();
        let result = notifier
            .send_contact_request(&ContactRequest::new("ana@example.com", "Ana"))
            .await;
        assert!(matches!(result, Err(AlerterError::Smtp(_))));
    }
}
