use crate::core::convert::convert_params;
use crate::core::mapping::map_row;
use crate::core::queries::ANALYTICAL_QUERIES;
use crate::core::sql_script::load_script;
use crate::domain::model::Row;
use crate::domain::ports::{GraphSink, RelationalSource};
use crate::domain::schema::{TableMapping, UNIVERSITY_TABLES};
use crate::utils::error::{EtlError, Result};
use crate::utils::monitor::{Phase, SystemMonitor};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct MigrationSettings {
    /// 種子 SQL 腳本，None 表示略過
    pub sql_file: Option<PathBuf>,
    pub run_queries: bool,
}

impl Default for MigrationSettings {
    fn default() -> Self {
        Self {
            sql_file: Some(PathBuf::from("smallRelationsInsertFile.sql")),
            run_queries: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableReport {
    pub table: &'static str,
    pub label: &'static str,
    /// None 表示查詢失敗
    pub rows_read: Option<usize>,
    pub nodes_created: usize,
    pub nodes_failed: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub number: u8,
    pub succeeded: bool,
    pub records: usize,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationReport {
    pub statements_executed: usize,
    pub statements_failed: usize,
    pub graph_cleared: bool,
    pub tables: Vec<TableReport>,
    pub queries: Vec<QueryOutcome>,
}

impl MigrationReport {
    pub fn nodes_created(&self) -> usize {
        self.tables.iter().map(|t| t.nodes_created).sum()
    }

    pub fn failure_count(&self) -> usize {
        self.statements_failed
            + self.tables.iter().filter(|t| t.rows_read.is_none()).count()
            + self.tables.iter().map(|t| t.nodes_failed).sum::<usize>()
            + self.queries.iter().filter(|q| !q.succeeded).count()
            + usize::from(!self.graph_cleared)
    }

    pub fn table(&self, table: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == table)
    }
}

/// 依序執行：種子資料 -> 擷取 -> 清空圖 -> 建立節點 -> 分析查詢 -> 關閉連線。
///
/// 單一語句、資料列或查詢失敗只會被記錄並計數，流程繼續進行。
pub struct MigrationEngine<S: RelationalSource, G: GraphSink> {
    source: Option<S>,
    sink: Option<G>,
    settings: MigrationSettings,
    monitor: SystemMonitor,
}

impl<S: RelationalSource, G: GraphSink> MigrationEngine<S, G> {
    pub fn new(source: Option<S>, sink: Option<G>, settings: MigrationSettings) -> Self {
        Self::new_with_monitoring(source, sink, settings, false)
    }

    pub fn new_with_monitoring(
        source: Option<S>,
        sink: Option<G>,
        settings: MigrationSettings,
        monitor_enabled: bool,
    ) -> Self {
        Self {
            source,
            sink,
            settings,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// 兩端皆已連線時回傳報告；缺少任一連線時仍會執行可進行的步驟並關閉連線，
    /// 之後回傳連線錯誤。
    pub async fn run(&self) -> Result<MigrationReport> {
        tracing::info!("🚀 Starting relational-to-graph migration");
        let mut report = MigrationReport::default();

        if let Some(source) = &self.source {
            self.seed(source, &mut report).await;
            self.monitor.phase_finished(Phase::Seed);
        }

        let outcome = match (&self.source, &self.sink) {
            (Some(source), Some(sink)) => {
                let extracted = self.extract(source).await;
                self.monitor.phase_finished(Phase::Extract);

                report.graph_cleared = self.clear_graph(sink).await;
                self.monitor.phase_finished(Phase::Clear);

                report.tables = self.load(sink, extracted).await;
                self.monitor.phase_finished(Phase::Load);

                if self.settings.run_queries {
                    report.queries = self.run_queries(sink).await;
                    self.monitor.phase_finished(Phase::Report);
                }
                Ok(report)
            }
            (None, _) => Err(EtlError::ConnectionError {
                target: "PostgreSQL".to_string(),
                message: "no connection, migration skipped".to_string(),
            }),
            (_, None) => Err(EtlError::ConnectionError {
                target: "Neo4j".to_string(),
                message: "no connection, migration skipped".to_string(),
            }),
        };

        self.close().await;
        self.monitor.log_final_stats();

        if let Ok(report) = &outcome {
            tracing::info!(
                "✅ Migration finished: {} statements seeded, {} nodes created, {} failures",
                report.statements_executed,
                report.nodes_created(),
                report.failure_count()
            );
        }
        outcome
    }

    async fn seed(&self, source: &S, report: &mut MigrationReport) {
        let Some(path) = &self.settings.sql_file else {
            tracing::info!("⏭️ Seeding skipped");
            return;
        };

        tracing::info!("🌱 Seeding PostgreSQL from {}", path.display());
        let statements = match load_script(path).await {
            Ok(statements) => statements,
            Err(e) => {
                tracing::error!("❌ Failed to read SQL script {}: {}", path.display(), e);
                return;
            }
        };

        for (index, statement) in statements.iter().enumerate() {
            match source.execute(statement).await {
                Ok(affected) => {
                    report.statements_executed += 1;
                    tracing::debug!("Statement #{} executed ({} rows)", index + 1, affected);
                }
                Err(e) => {
                    report.statements_failed += 1;
                    tracing::error!("❌ Statement #{} failed: {}", index + 1, e);
                    tracing::debug!("Failed statement: {}", statement);
                }
            }
        }

        tracing::info!(
            "🌱 Seeding done: {} executed, {} failed",
            report.statements_executed,
            report.statements_failed
        );
    }

    async fn extract(&self, source: &S) -> Vec<(&'static TableMapping, Option<Vec<Row>>)> {
        tracing::info!("📥 Extracting {} tables", UNIVERSITY_TABLES.len());
        let mut extracted = Vec::with_capacity(UNIVERSITY_TABLES.len());

        for mapping in UNIVERSITY_TABLES.iter() {
            match source.fetch_all(&mapping.select_all_sql()).await {
                Ok(rows) => {
                    tracing::debug!("Table {}: {} rows", mapping.table, rows.len());
                    extracted.push((mapping, Some(rows)));
                }
                Err(e) => {
                    tracing::error!("❌ Failed to read table {}: {}", mapping.table, e);
                    extracted.push((mapping, None));
                }
            }
        }
        extracted
    }

    async fn clear_graph(&self, sink: &G) -> bool {
        match sink.clear().await {
            Ok(()) => {
                tracing::info!("🧹 Graph cleared");
                true
            }
            Err(e) => {
                tracing::error!("❌ Failed to clear graph: {}", e);
                false
            }
        }
    }

    async fn load(
        &self,
        sink: &G,
        extracted: Vec<(&'static TableMapping, Option<Vec<Row>>)>,
    ) -> Vec<TableReport> {
        let mut reports = Vec::with_capacity(extracted.len());

        for (mapping, rows) in extracted {
            let mut table_report = TableReport {
                table: mapping.table,
                label: mapping.label,
                rows_read: rows.as_ref().map(Vec::len),
                nodes_created: 0,
                nodes_failed: 0,
            };

            if let Some(rows) = rows {
                let cypher = mapping.create_cypher();
                for row in rows {
                    let created = match map_row(mapping, row) {
                        Ok(params) => sink.create_node(&cypher, &convert_params(params)).await,
                        Err(e) => Err(e),
                    };
                    match created {
                        Ok(()) => table_report.nodes_created += 1,
                        Err(e) => {
                            table_report.nodes_failed += 1;
                            tracing::error!("❌ Failed to create {} node: {}", mapping.label, e);
                        }
                    }
                }
                tracing::info!(
                    "📤 {} -> :{} ({} created, {} failed)",
                    mapping.table,
                    mapping.label,
                    table_report.nodes_created,
                    table_report.nodes_failed
                );
            }

            reports.push(table_report);
        }
        reports
    }

    async fn run_queries(&self, sink: &G) -> Vec<QueryOutcome> {
        let mut outcomes = Vec::with_capacity(ANALYTICAL_QUERIES.len());

        for query in ANALYTICAL_QUERIES.iter() {
            tracing::info!("🔎 Q{}) {}", query.number, query.description);
            let outcome = match sink.query(query.cypher, &query.columns()).await {
                Ok(records) => QueryOutcome {
                    number: query.number,
                    succeeded: true,
                    records: records.len(),
                    lines: query.render(&records),
                },
                Err(e) => {
                    tracing::error!("❌ Q{} failed: {}", query.number, e);
                    QueryOutcome {
                        number: query.number,
                        succeeded: false,
                        records: 0,
                        lines: vec![format!("Query Q{} failed: {}", query.number, e)],
                    }
                }
            };

            for line in &outcome.lines {
                println!("{}", line);
            }
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn close(&self) {
        if let Some(source) = &self.source {
            match source.close().await {
                Ok(()) => tracing::info!("🔌 PostgreSQL connection closed"),
                Err(e) => tracing::warn!("⚠️ Failed to close PostgreSQL connection: {}", e),
            }
        }
        if let Some(sink) = &self.sink {
            match sink.close().await {
                Ok(()) => tracing::info!("🔌 Neo4j connection closed"),
                Err(e) => tracing::warn!("⚠️ Failed to close Neo4j connection: {}", e),
            }
        }
    }
}
