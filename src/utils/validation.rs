use crate::utils::error::{EtlError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

const BOLT_SCHEMES: [&str; 6] = ["bolt", "bolt+s", "bolt+ssc", "neo4j", "neo4j+s", "neo4j+ssc"];

pub fn validate_bolt_uri(field_name: &str, uri: &str) -> Result<()> {
    if uri.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: uri.to_string(),
            reason: "URI cannot be empty".to_string(),
        });
    }

    match Url::parse(uri) {
        Ok(url) => {
            if !BOLT_SCHEMES.contains(&url.scheme()) {
                return Err(EtlError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: uri.to_string(),
                    reason: format!(
                        "Unsupported URI scheme: {}. Valid schemes: {}",
                        url.scheme(),
                        BOLT_SCHEMES.join(", ")
                    ),
                });
            }
            if url.host_str().map(str::is_empty).unwrap_or(true) {
                return Err(EtlError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: uri.to_string(),
                    reason: "URI has no host".to_string(),
                });
            }
            Ok(())
        }
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: uri.to_string(),
            reason: format!("Invalid URI format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_port(field_name: &str, port: u16) -> Result<()> {
    if port == 0 {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: port.to_string(),
            reason: "Port must be between 1 and 65535".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| EtlError::MissingConfigError {
        field: field_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bolt_uri() {
        assert!(validate_bolt_uri("neo4j.uri", "bolt://localhost:7687").is_ok());
        assert!(validate_bolt_uri("neo4j.uri", "neo4j+s://graph.example.com").is_ok());
        assert!(validate_bolt_uri("neo4j.uri", "").is_err());
        assert!(validate_bolt_uri("neo4j.uri", "localhost:7687").is_err());
        assert!(validate_bolt_uri("neo4j.uri", "http://localhost:7474").is_err());
    }

    #[test]
    fn test_validate_port() {
        assert!(validate_port("postgres.port", 5432).is_ok());
        assert!(validate_port("postgres.port", 0).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("postgres".to_string());
        assert_eq!(
            validate_required_field("postgres.user", &present).unwrap(),
            "postgres"
        );

        let missing: Option<String> = None;
        assert!(matches!(
            validate_required_field("postgres.user", &missing),
            Err(EtlError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("neo4j.user", "neo4j").is_ok());
        assert!(validate_non_empty_string("neo4j.user", "   ").is_err());
    }
}
