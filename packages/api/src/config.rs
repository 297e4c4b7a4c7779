use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "users-api.toml";
pub const ENV_PREFIX: &str = "USERS_API_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    DynamoDb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Plain,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub bind_address: String,
    pub storage: StorageBackend,
    pub users_table: String,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_address: "0.0.0.0:8080".to_string(),
            storage: StorageBackend::Memory,
            users_table: "users".to_string(),
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Defaults, then `users-api.toml`, then `USERS_TABLE`, then `USERS_API_*` variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::raw().only(&["USERS_TABLE"]))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load()?;
            assert_eq!(config, Config::default());
            assert_eq!(config.storage, StorageBackend::Memory);
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                    bind_address = "127.0.0.1:3000"
                    storage = "dynamodb"
                    users_table = "from-file"
                "#,
            )?;
            jail.set_env("USERS_API_USERS_TABLE", "from-env");
            jail.set_env("USERS_API_LOG_FORMAT", "json");

            let config = Config::load()?;
            assert_eq!(config.bind_address, "127.0.0.1:3000");
            assert_eq!(config.storage, StorageBackend::DynamoDb);
            assert_eq!(config.users_table, "from-env");
            assert_eq!(config.log_format, LogFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn test_plain_users_table_variable() {
        Jail::expect_with(|jail| {
            jail.set_env("USERS_TABLE", "checkmate-dev-users-table");

            let config = Config::load()?;
            assert_eq!(config.users_table, "checkmate-dev-users-table");
            Ok(())
        });
    }

    #[test]
    fn test_unknown_storage_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("USERS_API_STORAGE", "postgres");
            assert!(Config::load().is_err());
            Ok(())
        });
    }
}
