use crate::core::{AppError, Result};
use crate::modules::taxes::models::{NetPayPolicy, PricingContext, TaxRate, TaxRuleSet};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub storage: StorageBackend,
    /// Present when `storage` is MySQL
    pub database: Option<DatabaseConfig>,
    pub taxes: TaxConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    /// Overrides the crate's own log level when set
    pub log_level: Option<String>,
    pub log_format: LogFormat,
    /// Allowed CORS origin; any origin when unset outside production
    pub cors_allowed_origin: Option<String>,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env == "production"
    }

    /// Default tracing filter when RUST_LOG is unset
    pub fn log_filter(&self) -> String {
        format!(
            "obras_admin={},actix_web=info",
            self.log_level.as_deref().unwrap_or("debug")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(AppError::Configuration(format!("Invalid LOG_FORMAT: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    MySql,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mysql" => Ok(StorageBackend::MySql),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(AppError::Configuration(format!("Invalid STORAGE_BACKEND: {}", s))),
        }
    }
}

/// Tax rates and payroll policy, as fractions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxConfig {
    pub vat: Decimal,
    pub withholding: Decimal,
    pub social_security: Decimal,
    pub income_tax: Decimal,
    pub net_pay_policy: NetPayPolicy,
}

impl TaxConfig {
    /// Validated rule set plus payroll policy for the calculators
    pub fn pricing(&self) -> Result<PricingContext> {
        let rules = TaxRuleSet::new([
            (TaxRate::Vat.as_str(), self.vat),
            (TaxRate::Withholding.as_str(), self.withholding),
            (TaxRate::SocialSecurity.as_str(), self.social_security),
            (TaxRate::IncomeTax.as_str(), self.income_tax),
        ])
        .map_err(|e| AppError::Configuration(format!("Invalid tax rates: {}", e)))?;

        Ok(PricingContext::new(rules, self.net_pay_policy))
    }
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            vat: TaxRate::Vat.default_rate(),
            withholding: TaxRate::Withholding.default_rate(),
            social_security: TaxRate::SocialSecurity.default_rate(),
            income_tax: TaxRate::IncomeTax.default_rate(),
            net_pay_policy: NetPayPolicy::default(),
        }
    }
}

/// Reads `key` through `lookup` and parses it, falling back to `default`
pub(crate) fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}: {}", key, raw))),
        _ => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage = parse_var(&lookup, "STORAGE_BACKEND", StorageBackend::MySql)?;
        let database = match storage {
            StorageBackend::MySql => Some(DatabaseConfig::from_lookup(&lookup)?),
            StorageBackend::Memory => None,
        };

        let defaults = TaxConfig::default();

        let config = Config {
            app: AppConfig {
                env: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
                log_level: lookup("LOG_LEVEL").filter(|level| !level.is_empty()),
                log_format: parse_var(&lookup, "LOG_FORMAT", LogFormat::Pretty)?,
                cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN").filter(|o| !o.is_empty()),
            },
            server: ServerConfig::from_lookup(&lookup)?,
            storage,
            database,
            taxes: TaxConfig {
                vat: parse_var(&lookup, "TAX_RATE_VAT", defaults.vat)?,
                withholding: parse_var(&lookup, "TAX_RATE_WITHHOLDING", defaults.withholding)?,
                social_security: parse_var(
                    &lookup,
                    "TAX_RATE_SOCIAL_SECURITY",
                    defaults.social_security,
                )?,
                income_tax: parse_var(&lookup, "TAX_RATE_INCOME_TAX", defaults.income_tax)?,
                net_pay_policy: parse_var(&lookup, "NET_PAY_POLICY", defaults.net_pay_policy)?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "SERVER_WORKERS must be greater than 0".to_string(),
            ));
        }

        if let Some(database) = &self.database {
            database.validate()?;
        }

        if self.app.is_production() && self.app.cors_allowed_origin.is_none() {
            return Err(AppError::Configuration(
                "CORS_ALLOWED_ORIGIN must be set in production".to_string(),
            ));
        }

        self.taxes.pricing()?;

        Ok(())
    }
}
