use preprocessor::infrastructure::observability::TracingConfig;
use preprocessor::presentation::Environment;
use preprocessor::presentation::config::LoggingSettings;

#[test]
fn given_logging_settings_when_building_tracing_config_then_fields_carry_over() {
    let logging = LoggingSettings {
        level: "debug".to_string(),
        enable_json: true,
    };

    let config = TracingConfig::from_settings(Environment::Prod, &logging);

    assert_eq!(config.environment, Environment::Prod);
    assert!(config.json_format);
    assert_eq!(
        config.default_filter(),
        "debug,preprocessor=debug,tower_http=debug"
    );
}

#[test]
fn given_default_tracing_config_when_filtering_then_logs_at_info() {
    let config = TracingConfig::default();

    assert_eq!(config.default_filter(), "info,preprocessor=info,tower_http=debug");
    assert!(!config.json_format);
}
