use crate::error::ConfigError;
use rust_decimal::Decimal;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    AnalyticsSettings, Config, LogFormat, LoggingConfig, NotifierConfig, ProviderConfig,
    ReferenceInstrument, Simulation,
};

/// Environment variables with this prefix override file values,
/// e.g. `ETFSIM__REFERENCE__ANNUAL_RATE=0.11`.
const ENV_PREFIX: &str = "ETFSIM";

/// Loads the application configuration.
///
/// Sources, lowest priority first: built-in defaults, an optional
/// `config.toml` in the working directory, then `ETFSIM__*` environment
/// variables. The result is validated before it is returned.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from("config")
}

/// Same as [`load_config`] but reads the file with the given base name.
pub fn load_config_from(file_name: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(file_name).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        reference = %config.reference.name,
        rate = %config.reference.annual_rate,
        "Configuration loaded."
    );
    Ok(config)
}

impl Config {
    /// Rejects settings that would make the analytics meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if sim.initial_amount <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "simulation.initial_amount must be greater than zero".to_string(),
            ));
        }
        if sim.max_horizon_years < 1 {
            return Err(ConfigError::ValidationError(
                "simulation.max_horizon_years must be at least 1".to_string(),
            ));
        }
        if sim.horizon_years < 1 || sim.horizon_years > sim.max_horizon_years {
            return Err(ConfigError::ValidationError(format!(
                "simulation.horizon_years must be between 1 and {}",
                sim.max_horizon_years
            )));
        }

        if self.reference.annual_rate < Decimal::NEGATIVE_ONE {
            return Err(ConfigError::ValidationError(
                "reference.annual_rate cannot be below -1 (a total loss)".to_string(),
            ));
        }

        let analytics = &self.analytics;
        if analytics.trading_days_per_year == 0 {
            return Err(ConfigError::ValidationError(
                "analytics.trading_days_per_year must be greater than zero".to_string(),
            ));
        }
        if analytics.var_confidence <= Decimal::ZERO || analytics.var_confidence >= Decimal::ONE {
            return Err(ConfigError::ValidationError(
                "analytics.var_confidence must lie strictly between 0 and 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_match_the_reference_setup() {
        let config = Config::default();
        assert_eq!(config.reference.name, "CETES");
        assert_eq!(config.reference.annual_rate, dec!(0.1020));
        assert_eq!(config.analytics.trading_days_per_year, 252);
        assert_eq!(config.analytics.var_confidence, dec!(0.95));
        assert_eq!(config.simulation.horizon_years, 5);
        assert_eq!(config.notifier.smtp_host, "smtp.gmail.com");
        assert_eq!(config.notifier.smtp_port, 465);
        assert!(config.notifier.password.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config_from("definitely-not-a-config-file").unwrap();
        assert_eq!(config.simulation.initial_amount, dec!(10000));
        assert_eq!(config.simulation.max_horizon_years, 10);
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                "[reference]\nannual_rate = \"0.11\"\n\n[simulation]\nhorizon_years = 3\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.reference.annual_rate, dec!(0.11));
        assert_eq!(config.reference.name, "CETES");
        assert_eq!(config.simulation.horizon_years, 3);
        assert_eq!(config.simulation.max_horizon_years, 10);
    }

    #[test]
    fn invalid_confidence_is_rejected() {
        let mut config = Config::default();
        config.analytics.var_confidence = dec!(1);
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn default_horizon_must_fit_the_maximum() {
        let mut config = Config::default();
        config.simulation.horizon_years = 12;
        assert!(config.validate().is_err());
    }
}
