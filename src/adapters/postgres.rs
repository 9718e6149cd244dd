use crate::config::toml_config::PostgresSettings;
use crate::domain::model::{Row, Value};
use crate::domain::ports::RelationalSource;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_postgres::types::Type;
use tokio_postgres::{Client, NoTls};

/// PostgreSQL 連線；連線驅動在背景 task 執行
pub struct PostgresSource {
    client: RwLock<Option<Client>>,
    connection: Mutex<Option<JoinHandle<()>>>,
}

impl PostgresSource {
    pub async fn connect(settings: &PostgresSettings) -> Result<Self> {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&settings.host)
            .port(settings.port)
            .dbname(&settings.database)
            .user(&settings.user)
            .password(&settings.password);

        tracing::debug!(
            "Connecting to PostgreSQL at {}:{}/{} as {}",
            settings.host,
            settings.port,
            settings.database,
            settings.user
        );

        let (client, connection) =
            config
                .connect(NoTls)
                .await
                .map_err(|e| EtlError::ConnectionError {
                    target: "PostgreSQL".to_string(),
                    message: e.to_string(),
                })?;

        let handle = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        tracing::info!("🐘 Connected to PostgreSQL");
        Ok(Self {
            client: RwLock::new(Some(client)),
            connection: Mutex::new(Some(handle)),
        })
    }
}

fn closed() -> EtlError {
    EtlError::ConnectionError {
        target: "PostgreSQL".to_string(),
        message: "connection already closed".to_string(),
    }
}

#[async_trait]
impl RelationalSource for PostgresSource {
    async fn execute(&self, sql: &str) -> Result<u64> {
        let guard = self.client.read().await;
        let client = guard.as_ref().ok_or_else(closed)?;
        // 未開啟交易，每個語句各自自動提交
        Ok(client.execute(sql, &[]).await?)
    }

    async fn fetch_all(&self, sql: &str) -> Result<Vec<Row>> {
        let guard = self.client.read().await;
        let client = guard.as_ref().ok_or_else(closed)?;
        let rows = client.query(sql, &[]).await?;

        rows.iter()
            .map(|row| {
                (0..row.columns().len())
                    .map(|i| convert_postgres_value(row, i))
                    .collect::<Result<Row>>()
            })
            .collect()
    }

    async fn close(&self) -> Result<()> {
        // 釋放 Client 後連線驅動會自行結束
        drop(self.client.write().await.take());
        if let Some(handle) = self.connection.lock().await.take() {
            if let Err(e) = handle.await {
                tracing::warn!("PostgreSQL connection task ended abnormally: {}", e);
            }
        }
        Ok(())
    }
}

/// 依欄位型別轉為 [`Value`]
fn convert_postgres_value(row: &tokio_postgres::Row, index: usize) -> Result<Value> {
    let column = &row.columns()[index];
    let conversion_error = |e: tokio_postgres::Error| EtlError::ConversionError {
        column: column.name().to_string(),
        message: e.to_string(),
    };

    let value = match *column.type_() {
        Type::BOOL => row
            .try_get::<_, Option<bool>>(index)
            .map_err(conversion_error)?
            .map(Value::Bool)
            .into(),
        Type::INT2 => row
            .try_get::<_, Option<i16>>(index)
            .map_err(conversion_error)?
            .map(|i| Value::Int(i as i64))
            .into(),
        Type::INT4 => row
            .try_get::<_, Option<i32>>(index)
            .map_err(conversion_error)?
            .map(|i| Value::Int(i as i64))
            .into(),
        Type::INT8 => row
            .try_get::<_, Option<i64>>(index)
            .map_err(conversion_error)?
            .into(),
        Type::FLOAT4 => row
            .try_get::<_, Option<f32>>(index)
            .map_err(conversion_error)?
            .map(|f| Value::Float(f as f64))
            .into(),
        Type::FLOAT8 => row
            .try_get::<_, Option<f64>>(index)
            .map_err(conversion_error)?
            .into(),
        Type::NUMERIC => row
            .try_get::<_, Option<Decimal>>(index)
            .map_err(conversion_error)?
            .into(),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => row
            .try_get::<_, Option<String>>(index)
            .map_err(conversion_error)?
            .into(),
        Type::DATE => row
            .try_get::<_, Option<NaiveDate>>(index)
            .map_err(conversion_error)?
            .map(|d| d.to_string())
            .into(),
        Type::TIME => row
            .try_get::<_, Option<NaiveTime>>(index)
            .map_err(conversion_error)?
            .map(|t| t.to_string())
            .into(),
        Type::TIMESTAMP => row
            .try_get::<_, Option<NaiveDateTime>>(index)
            .map_err(conversion_error)?
            .map(|t| t.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            .into(),
        Type::TIMESTAMPTZ => row
            .try_get::<_, Option<DateTime<Utc>>>(index)
            .map_err(conversion_error)?
            .map(|t| t.to_rfc3339())
            .into(),
        ref other => {
            return Err(EtlError::ConversionError {
                column: column.name().to_string(),
                message: format!("unsupported PostgreSQL type: {}", other),
            })
        }
    };
    Ok(value)
}
