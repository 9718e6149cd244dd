use crate::domain::model::{NodeParams, Row};
use crate::domain::schema::TableMapping;
use crate::utils::error::{EtlError, Result};

/// 依欄位位置將一列對應為節點參數
pub fn map_row(mapping: &TableMapping, row: Row) -> Result<NodeParams> {
    if row.len() != mapping.arity() {
        return Err(EtlError::MappingError {
            table: mapping.table.to_string(),
            message: format!(
                "expected {} columns ({}), got {}",
                mapping.arity(),
                mapping.properties.join(", "),
                row.len()
            ),
        });
    }

    let mut params = NodeParams::new();
    for (name, value) in mapping.properties.iter().zip(row) {
        params.insert(*name, value);
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Value;
    use crate::domain::schema::find_mapping;
    use rust_decimal::Decimal;

    #[test]
    fn test_row_maps_positionally() {
        let section = find_mapping("section").unwrap();
        let row: Row = vec![
            Value::from("BIO-101"),
            Value::from("1"),
            Value::from("Summer"),
            Value::Decimal(Decimal::from(2009)),
            Value::from("Painter"),
            Value::from("514"),
            Value::from("B"),
        ];

        let params = map_row(section, row.clone()).unwrap();

        assert_eq!(params.len(), 7);
        for (name, value) in section.properties.iter().zip(&row) {
            assert_eq!(params.get(name), Some(value));
        }
    }

    #[test]
    fn test_null_cells_are_kept() {
        let takes = find_mapping("takes").unwrap();
        let row: Row = vec![
            Value::from("98988"),
            Value::from("BIO-301"),
            Value::from("1"),
            Value::from("Summer"),
            Value::Int(2010),
            Value::Null,
        ];

        let params = map_row(takes, row).unwrap();
        assert_eq!(params.get("grade"), Some(&Value::Null));
    }

    #[test]
    fn test_arity_mismatch_is_error() {
        let advisor = find_mapping("advisor").unwrap();
        let err = map_row(advisor, vec![Value::from("12345")]).unwrap_err();
        assert!(matches!(err, EtlError::MappingError { ref table, .. } if table == "advisor"));
    }
}
