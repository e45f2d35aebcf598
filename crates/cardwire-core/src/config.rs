use anyhow::Result;
use config::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub marshal: MarshalConfig,
    pub logging: LoggingConfig,
}

/// Marshaller defaults. Version and compatibility mode stay textual here and
/// are resolved by the marshalling crate.
#[derive(Debug, Clone, Deserialize)]
pub struct MarshalConfig {
    pub target_version: String,
    pub compatibility_mode: String,
    pub add_generator: bool,
}

impl Default for MarshalConfig {
    fn default() -> Self {
        Self {
            target_version: "4.0".to_string(),
            compatibility_mode: "rfc".to_string(),
            add_generator: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `CARDWIRE_`-prefixed environment variables
    /// (`__` between section and key) and an optional `config.toml` into a
    /// `Settings`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::load_from(environment())
    }

    fn load_from(environment: config::Environment) -> Result<Self> {
        Ok(Config::builder()
            .set_default("marshal.target_version", "4.0")?
            .set_default("marshal.compatibility_mode", "rfc")?
            .set_default("marshal.add_generator", true)?
            .set_default("logging.level", "info")?
            .add_source(config::File::with_name("config.toml").required(false))
            .add_source(environment)
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// `CARDWIRE_MARSHAL__TARGET_VERSION` maps to `marshal.target_version`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("CARDWIRE")
        .prefix_separator("_")
        .separator("__")
        .ignore_empty(true)
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn load_uses_defaults() {
        let settings = Settings::load().unwrap();
        tracing::debug!(?settings, "Loaded settings");

        assert!(!settings.marshal.target_version.is_empty());
        assert!(!settings.logging.level.is_empty());
    }

    #[test]
    fn load_reads_environment_overrides() {
        let vars = [
            ("CARDWIRE_MARSHAL__TARGET_VERSION", "3.0"),
            ("CARDWIRE_MARSHAL__ADD_GENERATOR", "false"),
            ("CARDWIRE_MARSHAL__COMPATIBILITY_MODE", "ms_outlook"),
            ("CARDWIRE_LOGGING__LEVEL", "cardwire=trace"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let settings = Settings::load_from(environment().source(Some(vars))).unwrap();

        assert_eq!(settings.marshal.target_version, "3.0");
        assert!(!settings.marshal.add_generator);
        assert_eq!(settings.marshal.compatibility_mode, "ms_outlook");
        assert_eq!(settings.logging.level, "cardwire=trace");
    }

    #[test]
    fn load_ignores_unprefixed_variables() {
        let vars = [("MARSHAL_ADD_GENERATOR".to_string(), "false".to_string())]
            .into_iter()
            .collect();

        let settings = Settings::load_from(environment().source(Some(vars))).unwrap();
        assert!(settings.marshal.add_generator);
    }

    #[test]
    fn marshal_config_default() {
        let config = MarshalConfig::default();
        assert_eq!(config.target_version, "4.0");
        assert_eq!(config.compatibility_mode, "rfc");
        assert!(config.add_generator);
    }

    #[test]
    fn logging_config_clone() {
        let config = LoggingConfig {
            level: "trace".to_string(),
        };

        let cloned = config.clone();
        assert_eq!(cloned.level, config.level);
    }
}
