use crate::core::etl::MigrationSettings;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SQL_FILE: &str = "smallRelationsInsertFile.sql";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub postgres: PostgresSettings,
    pub neo4j: Neo4jSettings,
    pub seed: SeedConfig,
    pub migration: MigrationConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostgresSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl Default for PostgresSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "postgres".to_string(),
            user: "postgres".to_string(),
            password: "1234".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Neo4jSettings {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "12345678".to_string(),
            database: "neo4j".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub enabled: bool,
    pub sql_file: Option<String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sql_file: Some(DEFAULT_SQL_FILE.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    pub run_queries: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self { run_queries: true }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，未提供的欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NEO4J_PASSWORD})，未定義的變數保留原文
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("postgres.host", &self.postgres.host)?;
        validation::validate_port("postgres.port", self.postgres.port)?;
        validation::validate_non_empty_string("postgres.database", &self.postgres.database)?;
        validation::validate_non_empty_string("postgres.user", &self.postgres.user)?;

        validation::validate_bolt_uri("neo4j.uri", &self.neo4j.uri)?;
        validation::validate_non_empty_string("neo4j.user", &self.neo4j.user)?;
        validation::validate_non_empty_string("neo4j.database", &self.neo4j.database)?;

        if self.seed.enabled {
            let sql_file = validation::validate_required_field("seed.sql_file", &self.seed.sql_file)?;
            validation::validate_path("seed.sql_file", sql_file)?;
        }

        Ok(())
    }

    /// 種子腳本路徑；停用時回傳 None
    pub fn seed_file(&self) -> Option<PathBuf> {
        if !self.seed.enabled {
            return None;
        }
        self.seed.sql_file.as_ref().map(PathBuf::from)
    }

    pub fn migration_settings(&self) -> MigrationSettings {
        MigrationSettings {
            sql_file: self.seed_file(),
            run_queries: self.migration.run_queries,
        }
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.enabled
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_local_setup() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.postgres.host, "localhost");
        assert_eq!(config.postgres.database, "postgres");
        assert_eq!(config.postgres.password, "1234");
        assert_eq!(config.neo4j.uri, "bolt://localhost:7687");
        assert_eq!(config.neo4j.password, "12345678");
        assert_eq!(config.seed_file(), Some(PathBuf::from(DEFAULT_SQL_FILE)));
        assert!(config.migration.run_queries);
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_content = r#"
[postgres]
host = "db.internal"
port = 6543
database = "university"

[neo4j]
uri = "neo4j://graph.internal:7687"

[seed]
enabled = false

[migration]
run_queries = false
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.postgres.host, "db.internal");
        assert_eq!(config.postgres.port, 6543);
        assert_eq!(config.postgres.user, "postgres");
        assert_eq!(config.neo4j.uri, "neo4j://graph.internal:7687");
        assert_eq!(config.neo4j.user, "neo4j");

        let settings = config.migration_settings();
        assert!(settings.sql_file.is_none());
        assert!(!settings.run_queries);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PG2NEO_TEST_NEO4J_PASSWORD", "s3cret");

        let toml_content = r#"
[neo4j]
password = "${PG2NEO_TEST_NEO4J_PASSWORD}"
user = "${PG2NEO_TEST_UNDEFINED_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.neo4j.password, "s3cret");
        assert_eq!(config.neo4j.user, "${PG2NEO_TEST_UNDEFINED_VAR}");

        std::env::remove_var("PG2NEO_TEST_NEO4J_PASSWORD");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[neo4j]
uri = "http://localhost:7474"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[seed]
enabled = true
sql_file = ""
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let err = TomlConfig::from_toml_str("[postgres\nhost = 1").unwrap_err();
        assert!(matches!(err, EtlError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[postgres]\ndatabase = \"university\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.postgres.database, "university");
    }
}
