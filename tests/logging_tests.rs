//! These run in their own test binary: enabling logging installs a global
//! subscriber, which can happen only once per process.

use agent_tools_rs::{enable_log, log_config, log_enabled, LogLevel, LogMode, ToolError};

#[test]
fn enable_then_check() {
    let path = std::env::temp_dir().join("agent-tools-logging-test.log");
    let path_str = path.to_str().unwrap();

    assert!(!log_enabled());

    enable_log(Some(path_str), "info", "truncate").unwrap();

    assert!(log_enabled());
    let config = log_config().unwrap();
    assert_eq!(config.path, path);
    assert_eq!(config.level, LogLevel::Info);
    assert_eq!(config.mode, LogMode::Truncate);
    assert!(path.exists());

    tracing::info!("logging bootstrap smoke line");

    // Setup is a one-time startup step; a second call fails.
    let err = enable_log(Some(path_str), "debug", "append").unwrap_err();
    assert!(matches!(err, ToolError::Logging(_)));
}
