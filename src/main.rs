use anyhow::Context;
use clap::Parser;
use pg2neo_etl::core::queries::ANALYTICAL_QUERIES;
use pg2neo_etl::domain::schema::UNIVERSITY_TABLES;
use pg2neo_etl::utils::error::ErrorSeverity;
use pg2neo_etl::utils::{logger, validation::Validate};
use pg2neo_etl::{
    CliConfig, MigrationEngine, MigrationReport, Neo4jSink, PostgresSource, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = cli.resolve().with_context(|| match &cli.config {
        Some(path) => format!("failed to load configuration file '{}'", path),
        None => "failed to build configuration".to_string(),
    })?;

    // 初始化日誌
    if config.monitoring.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting pg2neo-etl");
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No connection will be opened");
        print_plan(&config);
        return Ok(());
    }

    let source = match PostgresSource::connect(&config.postgres).await {
        Ok(source) => Some(source),
        Err(e) => {
            tracing::error!("❌ {}", e);
            None
        }
    };
    let sink = match Neo4jSink::connect(&config.neo4j) {
        Ok(sink) => Some(sink),
        Err(e) => {
            tracing::error!("❌ {}", e);
            None
        }
    };

    let engine = MigrationEngine::new_with_monitoring(
        source,
        sink,
        config.migration_settings(),
        config.monitoring_enabled(),
    );

    match engine.run().await {
        Ok(report) => {
            print_summary(&report);
            if report.failure_count() > 0 {
                tracing::warn!(
                    "⚠️ Migration completed with {} failures, see the log above",
                    report.failure_count()
                );
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Migration failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn print_summary(report: &MigrationReport) {
    println!();
    println!("✅ Migration summary");
    println!(
        "  Seed statements: {} executed, {} failed",
        report.statements_executed, report.statements_failed
    );
    println!(
        "  Graph cleared: {}",
        if report.graph_cleared { "yes" } else { "no" }
    );
    for table in &report.tables {
        match table.rows_read {
            Some(rows) => println!(
                "  {:<10} -> :{:<10} {} rows, {} nodes created, {} failed",
                table.table, table.label, rows, table.nodes_created, table.nodes_failed
            ),
            None => println!("  {:<10} -> :{:<10} read failed", table.table, table.label),
        }
    }
    let failed_queries = report.queries.iter().filter(|q| !q.succeeded).count();
    println!(
        "  Queries: {} run, {} failed",
        report.queries.len(),
        failed_queries
    );
}

fn print_plan(config: &TomlConfig) {
    println!("🐘 PostgreSQL:");
    println!(
        "  {}:{}/{} as {}",
        config.postgres.host, config.postgres.port, config.postgres.database, config.postgres.user
    );

    println!();
    println!("🕸️ Neo4j:");
    println!(
        "  {} (database: {}) as {}",
        config.neo4j.uri, config.neo4j.database, config.neo4j.user
    );

    println!();
    println!("🌱 Seed:");
    match config.seed_file() {
        Some(path) => println!("  Script: {}", path.display()),
        None => println!("  Disabled"),
    }

    println!();
    println!("📤 Table mappings (graph is cleared first):");
    for mapping in UNIVERSITY_TABLES.iter() {
        println!("  {} -> {}", mapping.select_all_sql(), mapping.create_cypher());
    }

    println!();
    if config.migration.run_queries {
        println!("🔎 Analytical queries:");
        for query in ANALYTICAL_QUERIES.iter() {
            println!("  Q{}) {}", query.number, query.description);
        }
    } else {
        println!("🔎 Analytical queries: disabled");
    }

    println!();
    println!("✅ Dry run analysis complete.");
}
