use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;

const ALL_VARS: &[&str] = &[
    "LEADSCORE_PORT",
    "LEADSCORE_BIND_ADDR",
    "LEADSCORE_PRIMARY_PROVIDER",
    "LEADSCORE_FALLBACK_ENABLED",
    "LEADSCORE_PROVIDER_ORDER",
    "LEADSCORE_MAX_RETRIES",
    "LEADSCORE_TIMEOUT_SECS",
    "LEADSCORE_RETRY_DELAY_MS",
    "LEADSCORE_BIO_CHARS",
    "LEADSCORE_USE_CASES_COUNT",
    "LEADSCORE_VALUE_PROPS_COUNT",
    "LEADSCORE_MAX_CONCURRENCY",
    "LEADSCORE_GEMINI_MODEL",
    "LEADSCORE_OPENAI_MODEL",
    "LEADSCORE_OPENAI_BASE_URL",
    "LEADSCORE_GEMINI_RPM",
    "LEADSCORE_OPENAI_RPM",
    "LEADSCORE_MOCK_PROVIDER",
    "GEMINI_API_KEY",
    "OPENAI_API_KEY",
];

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_leadscore_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for key in ALL_VARS {
        unsafe { env::remove_var(key) };
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.scoring.primary_provider_id, "gemini");
    assert!(config.scoring.fallback_enabled);
    assert_eq!(config.scoring.provider_order, vec!["gemini", "openai"]);
    assert_eq!(config.scoring.max_retries_per_provider, 2);
    assert_eq!(config.scoring.per_call_timeout, Duration::from_secs(15));
    assert_eq!(config.scoring.max_concurrency, 10);
    assert_eq!(config.scoring.prompt_limits.bio_chars, 200);
    assert_eq!(config.scoring.prompt_limits.use_cases_count, 2);
    assert!(!config.mock_provider);
    assert!(config.validate().is_ok());
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");

    let config = Config {
        bind_addr: IpAddr::V6(std::net::Ipv6Addr::LOCALHOST),
        ..Default::default()
    };
    assert_eq!(config.socket_addr().to_string(), "[::1]:8080");
    assert!(config.socket_addr().is_ipv6());
}

#[test]
fn test_provider_sequence_primary_first() {
    let scoring = ScoringConfig {
        primary_provider_id: "openai".to_string(),
        ..Default::default()
    };
    assert_eq!(
        scoring.provider_sequence().expect("valid"),
        vec!["openai", "gemini"]
    );
}

#[test]
fn test_provider_sequence_drops_duplicates_and_blanks() {
    let scoring = ScoringConfig {
        provider_order: vec![
            "gemini".to_string(),
            " ".to_string(),
            "openai".to_string(),
            "gemini".to_string(),
        ],
        ..Default::default()
    };
    assert_eq!(
        scoring.provider_sequence().expect("valid"),
        vec!["gemini", "openai"]
    );
}

#[test]
fn test_provider_sequence_fallback_disabled() {
    let scoring = ScoringConfig {
        fallback_enabled: false,
        provider_order: Vec::new(),
        ..Default::default()
    };
    assert_eq!(scoring.provider_sequence().expect("valid"), vec!["gemini"]);
}

#[test]
fn test_provider_sequence_empty_order_with_fallback() {
    let scoring = ScoringConfig {
        provider_order: Vec::new(),
        ..Default::default()
    };
    assert_eq!(
        scoring.provider_sequence(),
        Err(ConfigurationError::EmptyProviderOrder)
    );
}

#[test]
fn test_provider_sequence_blank_primary() {
    let scoring = ScoringConfig {
        primary_provider_id: "  ".to_string(),
        ..Default::default()
    };
    assert_eq!(
        scoring.provider_sequence(),
        Err(ConfigurationError::NoProviders)
    );
}

#[test]
fn test_provider_settings_lookups() {
    let settings = ProviderSettings::default();
    assert_eq!(settings.rate_limit_for("gemini"), Some(10));
    assert_eq!(settings.rate_limit_for("openai"), Some(100));
    assert_eq!(settings.rate_limit_for("other"), None);
    assert_eq!(settings.pricing_for("gemini"), Pricing::FREE);
    assert_eq!(settings.pricing_for("unknown"), Pricing::FREE);
    assert!(settings.pricing_for("openai").output_per_million > 0.0);
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_leadscore_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert_eq!(config.scoring, ScoringConfig::default());
    assert!(config.providers.gemini_api_key.is_none());
    assert!(config.providers.openai_api_key.is_none());
    assert!(!config.mock_provider);
}

#[test]
#[serial]
fn test_from_env_custom_port() {
    clear_leadscore_env();

    with_env_vars(&[("LEADSCORE_PORT", "3000")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.port, 3000);
    });
}

#[test]
#[serial]
fn test_from_env_ipv6_bind_addr() {
    clear_leadscore_env();

    with_env_vars(&[("LEADSCORE_BIND_ADDR", "::1")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.bind_addr,
            IpAddr::V6(std::net::Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))
        );
    });
}

#[test]
#[serial]
fn test_from_env_scoring_overrides() {
    clear_leadscore_env();

    with_env_vars(
        &[
            ("LEADSCORE_PRIMARY_PROVIDER", "openai"),
            ("LEADSCORE_FALLBACK_ENABLED", "false"),
            ("LEADSCORE_PROVIDER_ORDER", "openai, gemini"),
            ("LEADSCORE_MAX_RETRIES", "0"),
            ("LEADSCORE_TIMEOUT_SECS", "5"),
            ("LEADSCORE_RETRY_DELAY_MS", "0"),
            ("LEADSCORE_BIO_CHARS", "80"),
            ("LEADSCORE_MAX_CONCURRENCY", "3"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            let scoring = &config.scoring;

            assert_eq!(scoring.primary_provider_id, "openai");
            assert!(!scoring.fallback_enabled);
            assert_eq!(scoring.provider_order, vec!["openai", "gemini"]);
            assert_eq!(scoring.max_retries_per_provider, 0);
            assert_eq!(scoring.per_call_timeout, Duration::from_secs(5));
            assert_eq!(scoring.retry_delay, Duration::ZERO);
            assert_eq!(scoring.prompt_limits.bio_chars, 80);
            assert_eq!(scoring.max_concurrency, 3);
        },
    );
}

#[test]
#[serial]
fn test_from_env_provider_settings() {
    clear_leadscore_env();

    with_env_vars(
        &[
            ("GEMINI_API_KEY", "g-key"),
            ("OPENAI_API_KEY", "  "),
            ("LEADSCORE_OPENAI_MODEL", "gpt-4o"),
            ("LEADSCORE_GEMINI_RPM", "0"),
            ("LEADSCORE_MOCK_PROVIDER", "1"),
        ],
        || {
            let config = Config::from_env().expect("should parse");

            assert_eq!(config.providers.gemini_api_key.as_deref(), Some("g-key"));
            assert!(config.providers.openai_api_key.is_none());
            assert_eq!(config.providers.openai_model, "gpt-4o");
            assert_eq!(config.providers.rate_limit_for("gemini"), None);
            assert!(config.mock_provider);
        },
    );
}

#[test]
#[serial]
fn test_invalid_port_zero() {
    clear_leadscore_env();

    with_env_vars(&[("LEADSCORE_PORT", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
        assert!(err.to_string().contains("invalid port"));
    });
}

#[test]
#[serial]
fn test_invalid_port_not_number() {
    clear_leadscore_env();

    with_env_vars(&[("LEADSCORE_PORT", "not_a_port")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
    });
}

#[test]
#[serial]
fn test_invalid_bind_addr() {
    clear_leadscore_env();

    with_env_vars(&[("LEADSCORE_BIND_ADDR", "not.an.ip.address")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    });
}

#[test]
#[serial]
fn test_invalid_number() {
    clear_leadscore_env();

    with_env_vars(&[("LEADSCORE_MAX_RETRIES", "-1")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                name: "LEADSCORE_MAX_RETRIES",
                ..
            }
        ));
    });
}

#[test]
fn test_validate_rejects_zero_concurrency() {
    let mut config = Config::default();
    config.scoring.max_concurrency = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MustBePositive { .. })
    ));
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let mut config = Config::default();
    config.scoring.per_call_timeout = Duration::ZERO;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MustBePositive { .. })
    ));
}

#[test]
fn test_validate_rejects_empty_order() {
    let mut config = Config::default();
    config.scoring.provider_order.clear();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Providers(ConfigurationError::EmptyProviderOrder))
    ));
}
