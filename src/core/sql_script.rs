use crate::utils::error::Result;
use std::path::Path;

/// 以 `;` 切割 SQL 腳本。
///
/// 不解析字串常值，常值中的 `;` 也會被切開。空白片段會被略過。
pub fn split_statements(script: &str) -> Vec<String> {
    script
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn load_script<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    let statements = split_statements(&content);
    tracing::debug!(
        "Loaded {} statements from {}",
        statements.len(),
        path.as_ref().display()
    );
    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SEED: &str = "
insert into classroom values ('Packard', '101', '500');
insert into classroom values ('Painter', '514', '10');
insert into department values ('Biology', 'Watson', '90000');
insert into course values ('BIO-101', 'Intro. to Biology', 'Biology', '4');
";

    #[test]
    fn test_statement_count_matches_semicolons() {
        let statements = split_statements(SEED);
        assert_eq!(statements.len(), SEED.matches(';').count());
        assert_eq!(
            statements[0],
            "insert into classroom values ('Packard', '101', '500')"
        );
    }

    #[test]
    fn test_blank_fragments_are_skipped() {
        assert!(split_statements("").is_empty());
        assert!(split_statements(" ;\n; ").is_empty());
        assert_eq!(split_statements("delete from takes").len(), 1);
    }

    #[test]
    fn test_semicolon_inside_literal_is_split() {
        let statements = split_statements("insert into course values ('A;B');");
        assert_eq!(statements.len(), 2);
    }

    #[tokio::test]
    async fn test_load_script_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SEED.as_bytes()).unwrap();

        let statements = load_script(file.path()).await.unwrap();
        assert_eq!(statements.len(), 4);
    }

    #[tokio::test]
    async fn test_load_missing_script_fails() {
        let result = load_script("/nonexistent/smallRelationsInsertFile.sql").await;
        assert!(result.is_err());
    }
}
