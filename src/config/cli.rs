use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "pg2neo-etl")]
#[command(about = "Migrate the university schema from PostgreSQL into Neo4j and run the report queries")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "PG2NEO_CONFIG")]
    pub config: Option<String>,

    /// SQL script used to seed PostgreSQL before the migration
    #[arg(long)]
    pub sql_file: Option<String>,

    /// Do not run the seed script
    #[arg(long)]
    pub skip_seed: bool,

    /// Do not run the analytical queries after loading
    #[arg(long)]
    pub skip_queries: bool,

    /// Show what would be done without connecting to either database
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, env = "PG_HOST")]
    pub pg_host: Option<String>,

    #[arg(long, env = "PG_PORT")]
    pub pg_port: Option<u16>,

    #[arg(long, env = "PG_DATABASE")]
    pub pg_database: Option<String>,

    #[arg(long, env = "PG_USER")]
    pub pg_user: Option<String>,

    #[arg(long, env = "PG_PASSWORD", hide_env_values = true)]
    pub pg_password: Option<String>,

    #[arg(long, env = "NEO4J_URI")]
    pub neo4j_uri: Option<String>,

    #[arg(long, env = "NEO4J_USER")]
    pub neo4j_user: Option<String>,

    #[arg(long, env = "NEO4J_PASSWORD", hide_env_values = true)]
    pub neo4j_password: Option<String>,

    #[arg(long, env = "NEO4J_DATABASE")]
    pub neo4j_database: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log per-phase process statistics
    #[arg(long)]
    pub monitor: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    /// 載入 TOML（若有指定）並套用命令列覆蓋設定
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        let pg = &mut config.postgres;
        override_with(&mut pg.host, &self.pg_host);
        override_with(&mut pg.database, &self.pg_database);
        override_with(&mut pg.user, &self.pg_user);
        override_with(&mut pg.password, &self.pg_password);
        if let Some(port) = self.pg_port {
            pg.port = port;
        }

        let neo = &mut config.neo4j;
        override_with(&mut neo.uri, &self.neo4j_uri);
        override_with(&mut neo.user, &self.neo4j_user);
        override_with(&mut neo.password, &self.neo4j_password);
        override_with(&mut neo.database, &self.neo4j_database);

        if let Some(sql_file) = &self.sql_file {
            config.seed.sql_file = Some(sql_file.clone());
        }
        if self.skip_seed {
            config.seed.enabled = false;
        }
        if self.skip_queries {
            config.migration.run_queries = false;
        }
        if self.monitor {
            config.monitoring.enabled = true;
        }
        if self.log_json {
            config.monitoring.json_logs = true;
        }
    }
}

fn override_with(target: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_defaults() {
        let cli = CliConfig::parse_from([
            "pg2neo-etl",
            "--pg-host",
            "db.internal",
            "--pg-port",
            "6543",
            "--neo4j-uri",
            "bolt://graph:7687",
            "--sql-file",
            "seed.sql",
            "--skip-queries",
        ]);

        let config = cli.resolve().unwrap();
        assert_eq!(config.postgres.host, "db.internal");
        assert_eq!(config.postgres.port, 6543);
        assert_eq!(config.neo4j.uri, "bolt://graph:7687");
        assert_eq!(config.seed.sql_file.as_deref(), Some("seed.sql"));
        assert!(!config.migration.run_queries);
    }

    #[test]
    fn test_skip_seed_disables_script() {
        let cli = CliConfig::parse_from(["pg2neo-etl", "--skip-seed"]);
        let config = cli.resolve().unwrap();
        assert!(config.seed_file().is_none());
    }
}
