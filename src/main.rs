use alerter::{AlerterError, ContactRequest, SmtpNotifier, Notifier};
use anyhow::Context;
use api_client::YahooClient;
use clap::{Parser, Subcommand};
use configuration::{Config, LogFormat, logging::init_tracing};
use core_types::ContactDetails;
use rust_decimal::Decimal;
use simulator::Simulator;
use std::sync::Arc;

mod render;

/// The main entry point for the ETF simulator.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables (SMTP credentials) from .env if present
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config().context("Failed to load configuration")?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    let _log_guard = init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Compare(args) => handle_compare(args, &config).await,
        Commands::Etfs => {
            render::print_catalogue();
            Ok(())
        }
        Commands::Privacy => {
            println!("{}", render::PRIVACY_NOTICE);
            Ok(())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Compare the growth of selected ETFs against CETES at a fixed annual rate.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Console log format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a comparison of the selected ETFs against the reference instrument.
    Compare(CompareArgs),
    /// List the ETFs available for comparison.
    Etfs,
    /// Print the privacy notice.
    Privacy,
}

#[derive(Parser)]
struct CompareArgs {
    /// Your full name.
    #[arg(long)]
    name: String,

    /// Your email address; used only if you ask an advisor to contact you.
    #[arg(long)]
    email: String,

    /// Accept the terms and conditions (required).
    #[arg(long)]
    accept_terms: bool,

    /// Initial investment in MXN (defaults to the configured amount).
    #[arg(long)]
    amount: Option<Decimal>,

    /// Investment horizon in years (defaults to the configured horizon).
    #[arg(long)]
    years: Option<u32>,

    /// ETF tickers to compare, e.g. `--etf SPY --etf QQQ` or `--etf SPY,QQQ`.
    #[arg(long = "etf", value_delimiter = ',')]
    etfs: Vec<String>,

    /// Send an email asking an advisor to get in touch after the comparison.
    #[arg(long)]
    contact_advisor: bool,
}

// ==============================================================================
// Compare Command Logic
// ==============================================================================

/// Handles the orchestration of one comparison run.
async fn handle_compare(args: CompareArgs, config: &Config) -> anyhow::Result<()> {
    let contact = ContactDetails {
        name: args.name,
        email: args.email,
        terms_accepted: args.accept_terms,
    };
    contact
        .validate()
        .context("Please complete all fields and accept the terms to continue")?;

    let provider = YahooClient::new(&config.provider).context("Failed to build the price client")?;
    let simulator = Simulator::from_config(Arc::new(provider), config);

    let params = simulator.parameters(args.amount, args.years, args.etfs)?;
    if params.symbols.is_empty() {
        tracing::warn!("No ETFs selected; only the reference instrument will be shown.");
    }

    let outcome = simulator.run(params).await?;
    render::print_report(&outcome);

    if args.contact_advisor {
        let notifier = SmtpNotifier::new(&config.notifier);
        let request = ContactRequest::new(&contact.email, &contact.name);
        match contact_advisor(notifier.as_ref().map(|n| n as &dyn Notifier), &request).await {
            Ok(()) => println!("\nEmail sent successfully to {}.", request.recipient),
            Err(e) => eprintln!("\nError sending the email: {}", e),
        }
    }

    Ok(())
}

/// Sends the contact acknowledgement. Failures are returned to the caller to
/// report; they never affect the computed results.
async fn contact_advisor(
    notifier: Option<&dyn Notifier>,
    request: &ContactRequest,
) -> Result<(), AlerterError> {
    let notifier = notifier.ok_or(AlerterError::NotConfigured)?;
    notifier.send_contact_request(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts attempts and fails every one of them.
    #[derive(Default)]
    struct FailingNotifier {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send_contact_request(&self, _request: &ContactRequest) -> Result<(), AlerterError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(AlerterError::Rejected("554".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: std::sync::Mutex<Vec<ContactRequest>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_contact_request(&self, request: &ContactRequest) -> Result<(), AlerterError> {
            self.sent.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    fn request() -> ContactRequest {
        ContactRequest::new("ana@example.com", "Ana")
    }

    #[tokio::test]
    async fn missing_notifier_is_reported_as_not_configured() {
        let result = contact_advisor(None, &request()).await;
        assert!(matches!(result, Err(AlerterError::NotConfigured)));
    }

    #[tokio::test]
    async fn failed_send_is_returned_to_the_caller() {
        let notifier = FailingNotifier::default();
        let result = contact_advisor(Some(&notifier), &request()).await;

        assert!(matches!(result, Err(AlerterError::Rejected(code)) if code == "554"));
        assert_eq!(notifier.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn configured_notifier_receives_the_request() {
        let notifier = RecordingNotifier::default();
        contact_advisor(Some(&notifier), &request()).await.unwrap();
        assert_eq!(*notifier.sent.lock().unwrap(), vec![request()]);
    }

    #[test]
    fn compare_flags_parse() {
        let cli = Cli::try_parse_from([
            "etf-simulator",
            "compare",
            "--name",
            "Ana",
            "--email",
            "ana@example.com",
            "--accept-terms",
            "--etf",
            "SPY,QQQ",
            "--etf",
            "EEM",
            "--contact-advisor",
        ])
        .unwrap();

        let Commands::Compare(args) = cli.command else {
            panic!("expected the compare command");
        };
        assert_eq!(args.etfs, vec!["SPY", "QQQ", "EEM"]);
        assert!(args.accept_terms);
        assert!(args.contact_advisor);
        assert_eq!(args.amount, None);
    }
}
