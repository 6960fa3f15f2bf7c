use super::*;

/// # Safety
/// Env vars are process-global; every env assertion lives in one test so
/// parallel test threads never observe each other's values.
unsafe fn clear_relay_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("CHIKU_UPSTREAM_URL");
        std::env::remove_var("CHIKU_HISTORY_BUDGET");
        std::env::remove_var("CHIKU_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("CHIKU_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_defaults_overrides_and_errors() {
    unsafe { clear_relay_env() };

    let cfg = RelayConfig::from_env().unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.upstream_url, DEFAULT_UPSTREAM_URL);
    assert_eq!(cfg.history_budget, DEFAULT_HISTORY_BUDGET);
    assert_eq!(
        cfg.timeouts,
        UpstreamTimeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );

    unsafe {
        std::env::set_var("PORT", "8080");
        std::env::set_var("CHIKU_UPSTREAM_URL", "http://127.0.0.1:9000/Chiku");
        std::env::set_var("CHIKU_HISTORY_BUDGET", "500");
        std::env::set_var("CHIKU_REQUEST_TIMEOUT_SECS", "5");
        std::env::set_var("CHIKU_CONNECT_TIMEOUT_SECS", "not-a-number");
    }
    let cfg = RelayConfig::from_env().unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.upstream_url, "http://127.0.0.1:9000/Chiku");
    assert_eq!(cfg.history_budget, 500);
    assert_eq!(cfg.timeouts, UpstreamTimeouts { request_secs: 5, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS });

    unsafe { std::env::set_var("CHIKU_HISTORY_BUDGET", "0") };
    assert!(matches!(RelayConfig::from_env(), Err(ConfigError::ZeroHistoryBudget)));

    unsafe {
        std::env::set_var("CHIKU_HISTORY_BUDGET", "2000");
        std::env::set_var("CHIKU_UPSTREAM_URL", "not a url");
    }
    let err = RelayConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("invalid CHIKU_UPSTREAM_URL"));

    unsafe { clear_relay_env() };
}
