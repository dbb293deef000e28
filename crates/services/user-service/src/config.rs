//! User service configuration.

use std::env;
use std::str::FromStr;

use common::{AppError, AppResult, DatabaseConfig, ProcedureConfig};

/// Which repository variant backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Volatile in-process store
    Memory,
    /// Database accessed through stored procedures
    Procedures,
}

impl FromStr for StorageKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageKind::Memory),
            "procedures" => Ok(StorageKind::Procedures),
            other => Err(AppError::validation(format!("unknown storage kind '{}'", other))),
        }
    }
}

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Repository variant
    pub storage: StorageKind,
    /// Database connection settings (procedure storage only)
    pub database: DatabaseConfig,
    /// Stored procedure names (procedure storage only)
    pub procedures: ProcedureConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`.
    ///
    /// Unset keys take the defaults. A key that is set but does not parse
    /// is a validation error.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let storage = match lookup("USER_SERVICE_STORAGE") {
            Some(raw) => raw.parse::<StorageKind>()?,
            None => defaults.storage,
        };

        Ok(Self {
            storage,
            database: DatabaseConfig {
                url: lookup("USER_SERVICE_DATABASE_URL")
                    .or_else(|| lookup("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: parse_or(
                    &lookup,
                    "USER_SERVICE_DB_MAX_CONNECTIONS",
                    defaults.database.max_connections,
                )?,
                min_connections: parse_or(
                    &lookup,
                    "USER_SERVICE_DB_MIN_CONNECTIONS",
                    defaults.database.min_connections,
                )?,
            },
            procedures: ProcedureConfig {
                create: lookup("USER_SERVICE_PROC_CREATE").unwrap_or(defaults.procedures.create),
                get: lookup("USER_SERVICE_PROC_GET").unwrap_or(defaults.procedures.get),
                update: lookup("USER_SERVICE_PROC_UPDATE").unwrap_or(defaults.procedures.update),
                delete: lookup("USER_SERVICE_PROC_DELETE").unwrap_or(defaults.procedures.delete),
            },
        })
    }
}

fn parse_or<F>(lookup: &F, key: &str, default: u32) -> AppResult<u32>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::validation(format!("{} must be a number, got '{}'", key, raw))),
        None => Ok(default),
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::Memory,
            database: DatabaseConfig::default(),
            procedures: ProcedureConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_storage_kind_parse() {
        assert_eq!("memory".parse::<StorageKind>().unwrap(), StorageKind::Memory);
        assert_eq!(" Procedures ".parse::<StorageKind>().unwrap(), StorageKind::Procedures);
        assert!("redis".parse::<StorageKind>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = UserServiceConfig::default();

        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.procedures.get, "get_user");
    }

    #[test]
    fn test_unset_variables_take_defaults() {
        let config = UserServiceConfig::from_lookup(lookup_in(&[])).unwrap();

        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.database.max_connections, DatabaseConfig::default().max_connections);
        assert_eq!(config.procedures.delete, "delete_user");
    }

    #[test]
    fn test_variables_override_defaults() {
        let config = UserServiceConfig::from_lookup(lookup_in(&[
            ("USER_SERVICE_STORAGE", "procedures"),
            ("DATABASE_URL", "postgres://db/users"),
            ("USER_SERVICE_DB_MAX_CONNECTIONS", "25"),
            ("USER_SERVICE_PROC_GET", "fetch_user"),
        ]))
        .unwrap();

        assert_eq!(config.storage, StorageKind::Procedures);
        assert_eq!(config.database.url, "postgres://db/users");
        assert_eq!(config.database.max_connections, 25);
        assert_eq!(config.procedures.get, "fetch_user");
    }

    #[test]
    fn test_unknown_storage_kind_is_rejected() {
        // A near miss must not quietly select the volatile store
        let result = UserServiceConfig::from_lookup(lookup_in(&[("USER_SERVICE_STORAGE", "procedure")]));

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("procedure")));
    }

    #[test]
    fn test_unparsable_pool_size_is_rejected() {
        let result = UserServiceConfig::from_lookup(lookup_in(&[("USER_SERVICE_DB_MIN_CONNECTIONS", "ten")]));

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("USER_SERVICE_DB_MIN_CONNECTIONS")));
    }
}
