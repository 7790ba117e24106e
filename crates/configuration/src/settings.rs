use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its defaults, so an absent `config.toml` still
/// yields a usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: Simulation,
    pub reference: ReferenceInstrument,
    pub analytics: AnalyticsSettings,
    pub provider: ProviderConfig,
    pub notifier: NotifierConfig,
    pub logging: LoggingConfig,
}

/// Default investment parameters offered to the user.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Simulation {
    /// Initial amount in MXN used when none is given.
    pub initial_amount: Decimal,
    /// Investment horizon used when none is given.
    pub horizon_years: u32,
    /// The longest horizon a user may choose.
    pub max_horizon_years: u32,
}

/// The fixed-rate instrument every ETF is compared against.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReferenceInstrument {
    pub name: String,
    /// Annual rate as a fraction; 0.1020 is 10.20%.
    pub annual_rate: Decimal,
}

/// Conventions used by the analytics engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Periods per year used to annualize daily statistics.
    pub trading_days_per_year: u32,
    /// Confidence level for the historical Value-at-Risk (0.95 => 5th percentile).
    pub var_confidence: Decimal,
    /// Per-period risk-free rate subtracted in the Sharpe ratio.
    pub risk_free_rate: Decimal,
}

/// Settings for the price-history provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Bar interval requested from the provider (e.g., "1d").
    pub interval: String,
    /// The provider rejects requests without a browser-like user agent.
    pub user_agent: String,
    /// Use dividend/split adjusted closes instead of raw closes.
    pub use_adjusted_close: bool,
}

/// SMTP server, sender and login for the advisor contact email.
///
/// The secrets are expected to come from the environment
/// (e.g. `ETFSIM__NOTIFIER__PASSWORD`), never from a committed file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Host of an SMTP server accepting implicit TLS (SMTPS).
    pub smtp_host: String,
    pub smtp_port: u16,
    pub sender_address: String,
    pub sender_name: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

/// Logging output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
    pub file_prefix: String,
}

// --- Default Implementations ---

impl Default for Simulation {
    fn default() -> Self {
        Self {
            initial_amount: dec!(10000),
            horizon_years: 5,
            max_horizon_years: 10,
        }
    }
}

impl Default for ReferenceInstrument {
    fn default() -> Self {
        Self {
            name: "CETES".to_string(),
            annual_rate: dec!(0.1020),
        }
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            trading_days_per_year: 252,
            var_confidence: dec!(0.95),
            risk_free_rate: Decimal::ZERO,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            interval: "1d".to_string(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) etf-simulator/0.1".to_string(),
            use_adjusted_close: true,
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 465,
            sender_address: String::new(),
            sender_name: String::new(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            directory: None,
            file_prefix: "etf-simulator.log".to_string(),
        }
    }
}
