//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `LEADSCORE_*` environment
//! variables; provider credentials use the vendors' usual `GEMINI_API_KEY` and
//! `OPENAI_API_KEY`.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::collections::HashMap;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::constants::{GEMINI_PROVIDER_ID, OPENAI_PROVIDER_ID};
use crate::orchestrator::{ConfigurationError, RetryPolicy};
use crate::provider::PromptLimits;
use crate::provider::gemini::DEFAULT_GEMINI_MODEL;
use crate::provider::openai::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
use crate::usage::Pricing;

/// Options consumed by the scoring core.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Provider tried first. Default: `gemini` (free tier).
    pub primary_provider_id: String,
    /// When `false`, only the primary provider is used. Default: `true`.
    pub fallback_enabled: bool,
    /// Fallback order. The primary is always moved to the front. Default: `gemini,openai`.
    pub provider_order: Vec<String>,
    /// Retries per provider after the first attempt. Default: `2`.
    pub max_retries_per_provider: u32,
    /// Hard limit for a single provider call. Default: `15s`.
    pub per_call_timeout: Duration,
    /// Fixed pause before retrying the same provider. Default: `500ms`.
    pub retry_delay: Duration,
    /// Prompt truncation caps.
    pub prompt_limits: PromptLimits,
    /// Leads scored concurrently within a batch. Default: `10`.
    pub max_concurrency: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            primary_provider_id: GEMINI_PROVIDER_ID.to_string(),
            fallback_enabled: true,
            provider_order: vec![
                GEMINI_PROVIDER_ID.to_string(),
                OPENAI_PROVIDER_ID.to_string(),
            ],
            max_retries_per_provider: 2,
            per_call_timeout: Duration::from_secs(15),
            retry_delay: Duration::from_millis(500),
            prompt_limits: PromptLimits::default(),
            max_concurrency: 10,
        }
    }
}

impl ScoringConfig {
    /// Providers in the order they are tried.
    ///
    /// The primary comes first, followed by the rest of `provider_order`
    /// (duplicates dropped). With fallback disabled only the primary remains.
    pub fn provider_sequence(&self) -> Result<Vec<String>, ConfigurationError> {
        let primary = self.primary_provider_id.trim();
        if primary.is_empty() {
            return Err(ConfigurationError::NoProviders);
        }

        if !self.fallback_enabled {
            return Ok(vec![primary.to_string()]);
        }

        if self.provider_order.iter().all(|id| id.trim().is_empty()) {
            return Err(ConfigurationError::EmptyProviderOrder);
        }

        let mut sequence = vec![primary.to_string()];
        for id in &self.provider_order {
            let id = id.trim();
            if !id.is_empty() && !sequence.iter().any(|seen| seen == id) {
                sequence.push(id.to_string());
            }
        }
        Ok(sequence)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries_per_provider: self.max_retries_per_provider,
            per_call_timeout: self.per_call_timeout,
            retry_delay: self.retry_delay,
        }
    }
}

/// Settings for the concrete provider adapters.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub gemini_model: String,
    pub openai_model: String,
    pub openai_base_url: String,
    /// Requests-per-minute ceilings. `0` disables limiting for that provider.
    pub requests_per_minute: HashMap<String, u32>,
    /// Estimated price per provider.
    pub pricing: HashMap<String, Pricing>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            openai_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            requests_per_minute: HashMap::from([
                (GEMINI_PROVIDER_ID.to_string(), 10),
                (OPENAI_PROVIDER_ID.to_string(), 100),
            ]),
            pricing: HashMap::from([
                (GEMINI_PROVIDER_ID.to_string(), Pricing::FREE),
                (OPENAI_PROVIDER_ID.to_string(), Pricing::new(0.15, 0.60)),
            ]),
        }
    }
}

impl ProviderSettings {
    pub fn rate_limit_for(&self, provider_id: &str) -> Option<u32> {
        self.requests_per_minute
            .get(provider_id)
            .copied()
            .filter(|rpm| *rpm > 0)
    }

    pub fn pricing_for(&self, provider_id: &str) -> Pricing {
        self.pricing
            .get(provider_id)
            .copied()
            .unwrap_or(Pricing::FREE)
    }
}

/// Process configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `LEADSCORE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Scoring core options.
    pub scoring: ScoringConfig,

    /// Adapter credentials, models, limits and prices.
    pub providers: ProviderSettings,

    /// Replace every remote provider with the offline classifier.
    pub mock_provider: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            scoring: ScoringConfig::default(),
            providers: ProviderSettings::default(),
            mock_provider: false,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "LEADSCORE_PORT";
    const ENV_BIND_ADDR: &'static str = "LEADSCORE_BIND_ADDR";
    const ENV_PRIMARY_PROVIDER: &'static str = "LEADSCORE_PRIMARY_PROVIDER";
    const ENV_FALLBACK_ENABLED: &'static str = "LEADSCORE_FALLBACK_ENABLED";
    const ENV_PROVIDER_ORDER: &'static str = "LEADSCORE_PROVIDER_ORDER";
    const ENV_MAX_RETRIES: &'static str = "LEADSCORE_MAX_RETRIES";
    const ENV_TIMEOUT_SECS: &'static str = "LEADSCORE_TIMEOUT_SECS";
    const ENV_RETRY_DELAY_MS: &'static str = "LEADSCORE_RETRY_DELAY_MS";
    const ENV_BIO_CHARS: &'static str = "LEADSCORE_BIO_CHARS";
    const ENV_USE_CASES_COUNT: &'static str = "LEADSCORE_USE_CASES_COUNT";
    const ENV_VALUE_PROPS_COUNT: &'static str = "LEADSCORE_VALUE_PROPS_COUNT";
    const ENV_MAX_CONCURRENCY: &'static str = "LEADSCORE_MAX_CONCURRENCY";
    const ENV_GEMINI_MODEL: &'static str = "LEADSCORE_GEMINI_MODEL";
    const ENV_OPENAI_MODEL: &'static str = "LEADSCORE_OPENAI_MODEL";
    const ENV_OPENAI_BASE_URL: &'static str = "LEADSCORE_OPENAI_BASE_URL";
    const ENV_GEMINI_RPM: &'static str = "LEADSCORE_GEMINI_RPM";
    const ENV_OPENAI_RPM: &'static str = "LEADSCORE_OPENAI_RPM";
    const ENV_GEMINI_API_KEY: &'static str = "GEMINI_API_KEY";
    const ENV_OPENAI_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_MOCK_PROVIDER: &'static str = "LEADSCORE_MOCK_PROVIDER";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let scoring_defaults = defaults.scoring;
        let provider_defaults = defaults.providers;

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;

        let scoring = ScoringConfig {
            primary_provider_id: Self::parse_string_from_env(
                Self::ENV_PRIMARY_PROVIDER,
                scoring_defaults.primary_provider_id,
            ),
            fallback_enabled: Self::parse_bool_from_env(
                Self::ENV_FALLBACK_ENABLED,
                scoring_defaults.fallback_enabled,
            ),
            provider_order: Self::parse_list_from_env(
                Self::ENV_PROVIDER_ORDER,
                scoring_defaults.provider_order,
            ),
            max_retries_per_provider: Self::parse_u64_from_env(
                Self::ENV_MAX_RETRIES,
                u64::from(scoring_defaults.max_retries_per_provider),
            )?
            .try_into()
            .unwrap_or(u32::MAX),
            per_call_timeout: Duration::from_secs(Self::parse_u64_from_env(
                Self::ENV_TIMEOUT_SECS,
                scoring_defaults.per_call_timeout.as_secs(),
            )?),
            retry_delay: Duration::from_millis(Self::parse_u64_from_env(
                Self::ENV_RETRY_DELAY_MS,
                scoring_defaults.retry_delay.as_millis() as u64,
            )?),
            prompt_limits: PromptLimits {
                bio_chars: Self::parse_usize_from_env(
                    Self::ENV_BIO_CHARS,
                    scoring_defaults.prompt_limits.bio_chars,
                )?,
                use_cases_count: Self::parse_usize_from_env(
                    Self::ENV_USE_CASES_COUNT,
                    scoring_defaults.prompt_limits.use_cases_count,
                )?,
                value_props_count: Self::parse_usize_from_env(
                    Self::ENV_VALUE_PROPS_COUNT,
                    scoring_defaults.prompt_limits.value_props_count,
                )?,
            },
            max_concurrency: Self::parse_usize_from_env(
                Self::ENV_MAX_CONCURRENCY,
                scoring_defaults.max_concurrency,
            )?,
        };

        let mut requests_per_minute = provider_defaults.requests_per_minute.clone();
        for (id, var) in [
            (GEMINI_PROVIDER_ID, Self::ENV_GEMINI_RPM),
            (OPENAI_PROVIDER_ID, Self::ENV_OPENAI_RPM),
        ] {
            let default = requests_per_minute.get(id).copied().unwrap_or(0);
            let rpm = Self::parse_u64_from_env(var, u64::from(default))?;
            requests_per_minute.insert(id.to_string(), rpm.try_into().unwrap_or(u32::MAX));
        }

        let providers = ProviderSettings {
            gemini_api_key: Self::parse_optional_string_from_env(Self::ENV_GEMINI_API_KEY),
            openai_api_key: Self::parse_optional_string_from_env(Self::ENV_OPENAI_API_KEY),
            gemini_model: Self::parse_string_from_env(
                Self::ENV_GEMINI_MODEL,
                provider_defaults.gemini_model,
            ),
            openai_model: Self::parse_string_from_env(
                Self::ENV_OPENAI_MODEL,
                provider_defaults.openai_model,
            ),
            openai_base_url: Self::parse_string_from_env(
                Self::ENV_OPENAI_BASE_URL,
                provider_defaults.openai_base_url,
            ),
            requests_per_minute,
            pricing: provider_defaults.pricing,
        };

        let mock_provider = env::var_os(Self::ENV_MOCK_PROVIDER).is_some_and(|v| !v.is_empty());

        Ok(Self {
            port,
            bind_addr,
            scoring,
            providers,
            mock_provider,
        })
    }

    /// Checks numeric ranges and provider selection rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scoring.max_concurrency == 0 {
            return Err(ConfigError::MustBePositive {
                name: Self::ENV_MAX_CONCURRENCY,
            });
        }
        if self.scoring.per_call_timeout.is_zero() {
            return Err(ConfigError::MustBePositive {
                name: Self::ENV_TIMEOUT_SECS,
            });
        }
        self.scoring.provider_sequence()?;
        Ok(())
    }

    /// Address the HTTP listener binds to. IPv6 hosts are bracketed when displayed.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        env::var(var_name)
            .map(|s| {
                let s = s.trim().to_ascii_lowercase();
                s != "false" && s != "0" && s != "no" && s != "off"
            })
            .unwrap_or(default)
    }

    fn parse_list_from_env(var_name: &str, default: Vec<String>) -> Vec<String> {
        match env::var(var_name) {
            Ok(value) => value
                .split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
            Err(_) => default,
        }
    }

    fn parse_u64_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        let value = Self::parse_u64_from_env(var_name, default as u64)?;
        Ok(usize::try_from(value).unwrap_or(usize::MAX))
    }
}
