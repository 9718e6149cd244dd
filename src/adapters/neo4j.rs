use crate::config::toml_config::Neo4jSettings;
use crate::domain::model::{GraphRecord, NodeParams, Value};
use crate::domain::ports::GraphSink;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use neo4rs::{
    query, BoltBoolean, BoltFloat, BoltInteger, BoltList, BoltMap, BoltNull, BoltString, BoltType,
    ConfigBuilder, Graph,
};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

const CLEAR_GRAPH: &str = "MATCH (n) DETACH DELETE n";

pub struct Neo4jSink {
    graph: RwLock<Option<Graph>>,
}

impl Neo4jSink {
    pub fn connect(settings: &Neo4jSettings) -> Result<Self> {
        let config = ConfigBuilder::default()
            .uri(settings.uri.as_str())
            .user(settings.user.as_str())
            .password(settings.password.as_str())
            .db(settings.database.as_str())
            .build()
            .map_err(|e| EtlError::ConfigError {
                message: format!("Invalid Neo4j settings: {}", e),
            })?;

        let graph = Graph::connect(config).map_err(|e| EtlError::ConnectionError {
            target: "Neo4j".to_string(),
            message: e.to_string(),
        })?;

        tracing::info!("🕸️ Connected to Neo4j at {}", settings.uri);
        Ok(Self {
            graph: RwLock::new(Some(graph)),
        })
    }
}

fn closed() -> EtlError {
    EtlError::ConnectionError {
        target: "Neo4j".to_string(),
        message: "connection already closed".to_string(),
    }
}

#[async_trait]
impl GraphSink for Neo4jSink {
    async fn clear(&self) -> Result<()> {
        let guard = self.graph.read().await;
        let graph = guard.as_ref().ok_or_else(closed)?;
        graph.run(query(CLEAR_GRAPH)).await?;
        Ok(())
    }

    async fn create_node(&self, cypher: &str, params: &NodeParams) -> Result<()> {
        let guard = self.graph.read().await;
        let graph = guard.as_ref().ok_or_else(closed)?;

        let mut q = query(cypher);
        for (key, value) in &params.properties {
            q = q.param(key.as_str(), value_to_bolt(value));
        }
        tracing::debug!("Neo4j CREATE: {} {:?}", cypher, params.properties);
        graph.run(q).await?;
        Ok(())
    }

    async fn query(&self, cypher: &str, columns: &[&str]) -> Result<Vec<GraphRecord>> {
        let guard = self.graph.read().await;
        let graph = guard.as_ref().ok_or_else(closed)?;

        let mut stream = graph.execute(query(cypher)).await?;
        let mut records = Vec::new();
        while let Some(row) = stream.next().await? {
            let mut data = HashMap::with_capacity(columns.len());
            for column in columns {
                let value = match row.get::<BoltType>(column) {
                    Ok(bolt) => bolt_to_value(bolt),
                    Err(e) => {
                        tracing::debug!("Column {} unreadable, using null: {}", column, e);
                        Value::Null
                    }
                };
                data.insert(column.to_string(), value);
            }
            records.push(GraphRecord { data });
        }
        Ok(records)
    }

    async fn close(&self) -> Result<()> {
        // neo4rs 沒有明確的關閉 API，釋放 Graph 即關閉連線池
        drop(self.graph.write().await.take());
        Ok(())
    }
}

pub(crate) fn value_to_bolt(value: &Value) -> BoltType {
    match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => BoltType::Boolean(BoltBoolean::new(*b)),
        Value::Int(i) => BoltType::Integer(BoltInteger::new(*i)),
        Value::Float(f) => BoltType::Float(BoltFloat::new(*f)),
        // 正常流程中已先轉為浮點數；未轉換者以字串保存以免失去精度
        Value::Decimal(d) => BoltType::String(BoltString::new(&d.to_string())),
        Value::Text(s) => BoltType::String(BoltString::new(s)),
        Value::List(items) => {
            let mut list = BoltList::new();
            for item in items {
                list.push(value_to_bolt(item));
            }
            BoltType::List(list)
        }
        Value::Map(entries) => {
            let mut map = BoltMap::new();
            for (key, item) in entries {
                map.put(key.as_str().into(), value_to_bolt(item));
            }
            BoltType::Map(map)
        }
    }
}

pub(crate) fn bolt_to_value(bolt: BoltType) -> Value {
    match bolt {
        BoltType::Null(_) => Value::Null,
        BoltType::Boolean(b) => Value::Bool(b.value),
        BoltType::Integer(i) => Value::Int(i.value),
        BoltType::Float(f) => Value::Float(f.value),
        BoltType::String(s) => Value::Text(s.value),
        BoltType::List(list) => Value::List(list.value.into_iter().map(bolt_to_value).collect()),
        BoltType::Map(map) => Value::Map(
            map.value
                .into_iter()
                .map(|(k, v)| (k.value, bolt_to_value(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
        // 分析查詢只回傳純量屬性，其餘型別以除錯格式呈現
        other => Value::Text(format!("{:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_bolt_conversion_preserves_scalars() {
        for value in [
            Value::Null,
            Value::Bool(false),
            Value::Int(2010),
            Value::Float(3.5),
            Value::from("Taylor"),
        ] {
            assert_eq!(bolt_to_value(value_to_bolt(&value)), value);
        }
    }

    #[test]
    fn test_nested_value_conversion() {
        let value = Value::Map(BTreeMap::from([(
            "rooms".to_string(),
            Value::List(vec![Value::from("101"), Value::Int(514)]),
        )]));
        assert_eq!(bolt_to_value(value_to_bolt(&value)), value);
    }
}
