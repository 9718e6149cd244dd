use crate::domain::model::{GraphRecord, NodeParams, Row};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 關聯式資料來源（PostgreSQL）
#[async_trait]
pub trait RelationalSource: Send + Sync {
    /// 執行單一語句並提交
    async fn execute(&self, sql: &str) -> Result<u64>;

    /// 執行查詢並取回所有列
    async fn fetch_all(&self, sql: &str) -> Result<Vec<Row>>;

    /// 關閉連線，之後的呼叫皆會失敗
    async fn close(&self) -> Result<()>;
}

/// 圖資料庫寫入與查詢端（Neo4j）
#[async_trait]
pub trait GraphSink: Send + Sync {
    /// 刪除所有節點與關聯
    async fn clear(&self) -> Result<()>;

    async fn create_node(&self, cypher: &str, params: &NodeParams) -> Result<()>;

    /// 執行唯讀查詢，只讀取 `columns` 指定的欄位
    async fn query(&self, cypher: &str, columns: &[&str]) -> Result<Vec<GraphRecord>>;

    /// 關閉連線，之後的呼叫皆會失敗
    async fn close(&self) -> Result<()>;
}
