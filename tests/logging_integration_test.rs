//! Integration tests for logging functionality

use cdp_report::config::LoggingConfig;
use cdp_report::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "./logs");
    assert_eq!(config.local_rotation, "daily");
}

// The global subscriber can only be installed once per process, so every
// init_logging case lives in this one test.
#[test]
fn test_init_logging_with_file_layer() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    assert!(init_logging("verbose", &LoggingConfig::default()).is_err());

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("debug", &config).unwrap();
    tracing::info!(queries = 38, "Report completed");
    drop(guard);

    assert!(log_path.exists());
    assert!(log_path.join("cdp-report.log").exists());
}
