//! Global subscriber installation.

use cardwire_core::config::LoggingConfig;
use cardwire_core::telemetry::init_tracing;

#[test]
fn init_tracing_installs_once() {
    let config = LoggingConfig {
        level: "cardwire=debug".to_string(),
    };

    assert!(init_tracing(&config).is_ok());
    assert!(init_tracing(&config).is_err());
}
