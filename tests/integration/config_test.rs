use honeybadger::core::config::{DEFAULT_ENDPOINT, ENV_API_KEY, ENV_ENV, ENV_HOSTNAME, ENV_ROOT};
use honeybadger::core::{NullBackend, StderrLogger};
use honeybadger::platform::StaticEnvironment;
use honeybadger::Configuration;
use std::sync::Arc;
use std::time::Duration;

fn environment() -> StaticEnvironment {
    StaticEnvironment::new()
        .with_var(ENV_API_KEY, "from-env")
        .with_var(ENV_ENV, "production")
        .with_var(ENV_HOSTNAME, "")
        .with_var(ENV_ROOT, "")
        .with_hostname("machine")
        .with_current_dir("/var/www/app")
}

#[test]
fn test_config_zero_overrides_keep_defaults() {
    let config = Configuration::resolve_with(&environment(), Configuration::default());

    assert_eq!(config.api_key, "from-env");
    assert_eq!(config.env, "production");
    assert_eq!(config.hostname, "machine");
    assert_eq!(config.root, "/var/www/app");
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.timeout, Duration::from_secs(3));
}

#[test]
fn test_config_every_override_wins() {
    let overrides = Configuration {
        api_key: "k".to_string(),
        root: "/r".to_string(),
        env: "e".to_string(),
        hostname: "h".to_string(),
        endpoint: "http://127.0.0.1:1".to_string(),
        timeout: Duration::from_secs(1),
        logger: Some(Arc::new(StderrLogger::with_prefix("[test] "))),
        backend: Some(Arc::new(NullBackend)),
    };
    let config = Configuration::resolve_with(&environment(), overrides);

    assert_eq!(config.api_key, "k");
    assert_eq!(config.root, "/r");
    assert_eq!(config.env, "e");
    assert_eq!(config.hostname, "h");
    assert_eq!(config.endpoint, "http://127.0.0.1:1");
    assert_eq!(config.timeout, Duration::from_secs(1));
}

#[test]
fn test_config_resolve_against_process() {
    // Real environment: only the fixed defaults are predictable
    let config = Configuration::resolve(Configuration::default().with_api_key("explicit"));

    assert_eq!(config.api_key, "explicit");
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert!(config.backend.is_some());
    assert!(config.logger.is_some());
}

#[test]
fn test_config_shared_across_threads() {
    let config = Arc::new(Configuration::resolve_with(
        &environment(),
        Configuration::default().with_backend(Arc::new(NullBackend)),
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = Arc::clone(&config);
            std::thread::spawn(move || config.api_key.clone())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "from-env");
    }
}
