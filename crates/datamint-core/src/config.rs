//! Configuration module
//!
//! This module provides configuration structures for the API and services,
//! including database, ledger, enrichment, and authentication settings.
//! All values come from the environment (with `.env` support via dotenvy).

use std::env;

use crate::ledger_types::LedgerBackend;

// Common constants
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_EXPIRY_HOURS: i64 = 168; // 7 days, matching token lifetime shown to users
const AUTH_MAX_FAILURES: u32 = 10;
const AUTH_FAILURE_WINDOW_SECS: u64 = 900;

/// Base configuration shared by server-side components
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub environment: String,
}

/// Marketplace service configuration
#[derive(Clone, Debug)]
pub struct MarketplaceConfig {
    pub base: BaseConfig,
    pub database_url: String,
    // Upload limits
    pub max_upload_size_bytes: usize,
    // Enrichment (generative analysis) configuration; the deterministic
    // analyzer is always available as the fallback path.
    pub enrichment_enabled: bool,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub enrichment_timeout_secs: u64,
    // Ledger configuration
    pub ledger_backend: LedgerBackend,
    pub contract_address: String,
    pub default_access_duration_days: i32,
    // Auth failure limiting
    pub auth_max_failures: u32,
    pub auth_failure_window_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<MarketplaceConfig>);

impl Config {
    fn inner(&self) -> &MarketplaceConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = MarketplaceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().base.db_timeout_seconds
    }

    pub fn jwt_secret(&self) -> &str {
        &self.inner().base.jwt_secret
    }

    pub fn jwt_expiry_hours(&self) -> i64 {
        self.inner().base.jwt_expiry_hours
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn database_url(&self) -> &str {
        &self.inner().database_url
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.inner().max_upload_size_bytes
    }

    pub fn enrichment_enabled(&self) -> bool {
        self.inner().enrichment_enabled
    }

    pub fn gemini_api_key(&self) -> Option<&str> {
        self.inner().gemini_api_key.as_deref()
    }

    pub fn gemini_model(&self) -> &str {
        &self.inner().gemini_model
    }

    pub fn enrichment_timeout_secs(&self) -> u64 {
        self.inner().enrichment_timeout_secs
    }

    pub fn ledger_backend(&self) -> LedgerBackend {
        self.inner().ledger_backend
    }

    pub fn contract_address(&self) -> &str {
        &self.inner().contract_address
    }

    pub fn default_access_duration_days(&self) -> i32 {
        self.inner().default_access_duration_days
    }

    pub fn auth_max_failures(&self) -> u32 {
        self.inner().auth_max_failures
    }

    pub fn auth_failure_window_secs(&self) -> u64 {
        self.inner().auth_failure_window_secs
    }
}

impl MarketplaceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        use crate::constants::DEFAULT_ACCESS_DURATION_DAYS;

        const MAX_UPLOAD_SIZE_MB: usize = 200;
        const ENRICHMENT_TIMEOUT_SECS: u64 = 60;
        // Well-known placeholder address shown when no contract is configured
        const DEFAULT_CONTRACT_ADDRESS: &str = "0x742d35Cc6634C0532925a3b8D4C9db96590c6C87";

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| JWT_EXPIRY_HOURS.to_string())
                .parse()
                .unwrap_or(JWT_EXPIRY_HOURS),
            environment,
        };

        let ledger_backend = env::var("LEDGER_BACKEND")
            .unwrap_or_else(|_| "simulated".to_string())
            .parse::<LedgerBackend>()
            .map_err(|e| anyhow::anyhow!(e))?;

        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
        let enrichment_enabled = env::var("ENRICHMENT_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .to_lowercase()
            .parse()
            .unwrap_or(true)
            && gemini_api_key.is_some();

        let config = MarketplaceConfig {
            base,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            max_upload_size_bytes: env::var("MAX_UPLOAD_SIZE_MB")
                .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_UPLOAD_SIZE_MB)
                * 1024
                * 1024,
            enrichment_enabled,
            gemini_api_key,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            enrichment_timeout_secs: env::var("ENRICHMENT_TIMEOUT_SECS")
                .unwrap_or_else(|_| ENRICHMENT_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(ENRICHMENT_TIMEOUT_SECS),
            ledger_backend,
            contract_address: env::var("CONTRACT_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_CONTRACT_ADDRESS.to_string()),
            default_access_duration_days: env::var("DEFAULT_ACCESS_DURATION_DAYS")
                .unwrap_or_else(|_| DEFAULT_ACCESS_DURATION_DAYS.to_string())
                .parse()
                .unwrap_or(DEFAULT_ACCESS_DURATION_DAYS),
            auth_max_failures: env::var("AUTH_MAX_FAILURES")
                .unwrap_or_else(|_| AUTH_MAX_FAILURES.to_string())
                .parse()
                .unwrap_or(AUTH_MAX_FAILURES),
            auth_failure_window_secs: env::var("AUTH_FAILURE_WINDOW_SECS")
                .unwrap_or_else(|_| AUTH_FAILURE_WINDOW_SECS.to_string())
                .parse()
                .unwrap_or(AUTH_FAILURE_WINDOW_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }
        if self.default_access_duration_days <= 0 {
            return Err(anyhow::anyhow!(
                "DEFAULT_ACCESS_DURATION_DAYS must be positive"
            ));
        }
        Ok(())
    }
}
