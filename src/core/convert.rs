use crate::domain::model::{NodeParams, Value};
use rust_decimal::prelude::ToPrimitive;

/// 將 NUMERIC 轉為浮點數，遞迴處理 Map 與 List，其他值原樣回傳。
///
/// Neo4j 沒有十進位型別；對已轉換的資料再次呼叫不會改變結果。
pub fn decimal_to_float(value: Value) -> Value {
    match value {
        Value::Decimal(d) => match d.to_f64() {
            Some(f) => Value::Float(f),
            None => {
                tracing::warn!("⚠️ Decimal {} does not fit in f64, keeping as text", d);
                Value::Text(d.to_string())
            }
        },
        Value::Map(entries) => Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k, decimal_to_float(v)))
                .collect(),
        ),
        Value::List(items) => Value::List(items.into_iter().map(decimal_to_float).collect()),
        other => other,
    }
}

pub fn convert_params(params: NodeParams) -> NodeParams {
    NodeParams {
        properties: params
            .properties
            .into_iter()
            .map(|(k, v)| (k, decimal_to_float(v)))
            .collect(),
    }
}
