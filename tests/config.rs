//! Environment selection and consumer key lookup.

use std::collections::HashMap;

use etrade_chains::config::{Config, consumer_key_from};
use etrade_chains::constants::{
    DEFAULT_TOKEN_FILE, LIVE_API_BASE_URL, OAUTH_BASE_URL, SANDBOX_API_BASE_URL,
};
use etrade_chains::{EtradeError, exit_status};
use etrade_chains::types::auth::{ConsumerKey, Credential};
use etrade_chains::types::enums::Environment;

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn environment_keys_and_hosts() {
    assert_eq!(Environment::from_sandbox_flag(true), Environment::Sandbox);
    assert_eq!(Environment::from_sandbox_flag(false), Environment::Live);
    assert_eq!(Environment::default(), Environment::Live);

    assert_eq!(Environment::Sandbox.key(), "sandbox");
    assert_eq!(Environment::Live.key(), "live");
    assert_eq!(Environment::Sandbox.api_base_url(), SANDBOX_API_BASE_URL);
    assert_eq!(Environment::Live.api_base_url(), LIVE_API_BASE_URL);

    assert_eq!(
        serde_json::to_string(&Environment::Sandbox).unwrap(),
        "\"sandbox\""
    );
}

#[test]
fn consumer_key_is_read_per_environment() {
    let vars = vars(&[
        ("ETRADE_SANDBOX_CONSUMER_KEY", "sb-key"),
        ("ETRADE_SANDBOX_CONSUMER_SECRET", "sb-secret"),
        ("ETRADE_LIVE_CONSUMER_KEY", "live-key"),
        ("ETRADE_LIVE_CONSUMER_SECRET", "live-secret"),
    ]);
    assert_eq!(
        consumer_key_from(Environment::Sandbox, |n| vars.get(n).cloned()).unwrap(),
        ConsumerKey::new("sb-key", "sb-secret")
    );
    assert_eq!(
        consumer_key_from(Environment::Live, |n| vars.get(n).cloned()).unwrap(),
        ConsumerKey::new("live-key", "live-secret")
    );
}

#[test]
fn missing_or_blank_consumer_values_name_the_variable() {
    let vars = vars(&[
        ("ETRADE_LIVE_CONSUMER_KEY", "live-key"),
        ("ETRADE_LIVE_CONSUMER_SECRET", "  "),
    ]);
    match consumer_key_from(Environment::Live, |n| vars.get(n).cloned()) {
        Err(EtradeError::InvalidArgument(msg)) => {
            assert!(msg.contains("ETRADE_LIVE_CONSUMER_SECRET"), "{msg}")
        }
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
    assert!(consumer_key_from(Environment::Sandbox, |n| vars.get(n).cloned()).is_err());
}

#[test]
fn config_defaults_follow_the_environment() {
    let vars = vars(&[
        ("ETRADE_SANDBOX_CONSUMER_KEY", "sb-key"),
        ("ETRADE_SANDBOX_CONSUMER_SECRET", "sb-secret"),
    ]);
    let config = Config::from_lookup(Environment::Sandbox, |n| vars.get(n).cloned()).unwrap();
    assert_eq!(config.consumer, ConsumerKey::new("sb-key", "sb-secret"));
    assert_eq!(config.api_base_url, SANDBOX_API_BASE_URL);
    assert_eq!(config.auth_base_url, OAUTH_BASE_URL);
    assert_eq!(config.token_file.to_str(), Some(DEFAULT_TOKEN_FILE));
    assert_eq!(config.output_dir.to_str(), Some("."));
}

#[test]
fn missing_consumer_key_is_a_failing_exit() {
    let result = Config::from_lookup(Environment::Live, |_| None);
    assert!(matches!(result, Err(EtradeError::InvalidArgument(_))));
    assert_eq!(exit_status(&result), 1);
    assert_eq!(exit_status(&Ok::<(), EtradeError>(())), 0);
}

#[test]
fn token_endpoint_bodies_parse_into_credentials() {
    let cred = Credential::from_form(
        "oauth_token=abc%3D&oauth_token_secret=def&oauth_callback_confirmed=true\n",
    )
    .unwrap();
    assert_eq!(cred, Credential::new("abc=", "def"));

    assert!(matches!(
        Credential::from_form("oauth_token=abc"),
        Err(EtradeError::InvalidResponse(_))
    ));
}
