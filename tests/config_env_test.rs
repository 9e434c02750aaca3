//! Config environment variable tests
//!
//! These tests verify that Config::from_env() correctly reads and applies
//! environment variable overrides.
//!
//! Tests use #[serial] to prevent race conditions with shared env vars.

use debate_smelter::config::{Config, LogFormat};
use debate_smelter::error::AppError;
use serial_test::serial;
use std::env;

#[test]
#[serial]
fn test_config_from_env_needs_no_key() {
    env::remove_var("OPENAI_API_KEY");
    assert!(Config::from_env().is_ok());
}

#[test]
#[serial]
fn test_config_from_env_custom_openai() {
    env::set_var("OPENAI_BASE_URL", "https://proxy.example.com");
    env::set_var("OPENAI_MODEL", "gpt-4o-mini");
    env::set_var("OPENAI_TEMPERATURE", "0.3");

    let config = Config::from_env().unwrap();
    assert_eq!(config.openai.base_url, "https://proxy.example.com");
    assert_eq!(config.openai.model, "gpt-4o-mini");
    assert!((config.openai.temperature - 0.3).abs() < f32::EPSILON);

    env::remove_var("OPENAI_BASE_URL");
    env::remove_var("OPENAI_MODEL");
    env::remove_var("OPENAI_TEMPERATURE");
}

#[test]
#[serial]
fn test_config_from_env_invalid_numbers_use_defaults() {
    env::set_var("OPENAI_TEMPERATURE", "warm");
    env::set_var("SERVER_PORT", "not-a-port");
    env::set_var("REQUEST_TIMEOUT_MS", "0");

    let config = Config::from_env().unwrap();
    assert!((config.openai.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(config.server.port, 8888);
    assert!(config.request.timeout_ms.is_none());

    env::remove_var("OPENAI_TEMPERATURE");
    env::remove_var("SERVER_PORT");
    env::remove_var("REQUEST_TIMEOUT_MS");
}

#[test]
#[serial]
fn test_config_from_env_request_timeout() {
    env::set_var("REQUEST_TIMEOUT_MS", "60000");

    let config = Config::from_env().unwrap();
    assert_eq!(config.request.timeout_ms, Some(60000));

    env::remove_var("REQUEST_TIMEOUT_MS");
}

#[test]
#[serial]
fn test_config_from_env_json_log_format() {
    env::set_var("LOG_FORMAT", "JSON");

    let config = Config::from_env().unwrap();
    assert_eq!(config.logging.format, LogFormat::Json);

    env::remove_var("LOG_FORMAT");
}

#[test]
#[serial]
fn test_config_from_env_gate_and_route() {
    env::set_var("CREDENTIAL_PREFIX", "sk-proj-");
    env::set_var("DEBATE_PATH", "/.netlify/functions/smelter");

    let config = Config::from_env().unwrap();
    assert_eq!(config.debate.credential_prefix, "sk-proj-");
    assert_eq!(config.server.debate_path, "/.netlify/functions/smelter");

    env::remove_var("CREDENTIAL_PREFIX");
    env::remove_var("DEBATE_PATH");
}

#[test]
#[serial]
fn test_config_from_env_rejects_relative_path() {
    env::set_var("DEBATE_PATH", "api/debate");

    assert!(Config::from_env().is_err());

    env::remove_var("DEBATE_PATH");
}

#[test]
#[serial]
fn test_config_from_env_rejects_unmountable_paths() {
    for path in ["/health", "/api/{id}", "/api/:id", "/files/*rest"] {
        env::set_var("DEBATE_PATH", path);

        let err = Config::from_env().unwrap_err();
        assert!(
            matches!(err, AppError::Config { .. }),
            "{} gave {:?}",
            path,
            err
        );
    }

    env::remove_var("DEBATE_PATH");
}
