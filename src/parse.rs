use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Error;
use crate::value::{ConfigDocument, ConfigValue};

/// Parse `key=value` properties text. Blank lines and lines whose first
/// non-whitespace character is `#` are skipped; everything else must
/// contain `=` and is split on the first one only, with key and value
/// trimmed.
pub fn properties_str(text: &str, source: &str) -> Result<ConfigDocument, Error> {
    let mut doc = BTreeMap::new();
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(Error::format(
                source,
                format!("line {}: expected key=value, found no '='", lineno + 1),
            ));
        };
        doc.insert(
            key.trim().to_string(),
            ConfigValue::String(value.trim().to_string()),
        );
    }
    Ok(doc)
}

/// Parse tfvars-style HCL (attributes and nested blocks). The grammar
/// is delegated to the `hcl` crate; the body deserializes into a JSON
/// object which is then normalized.
pub fn tfvars_str(text: &str, source: &str) -> Result<ConfigDocument, Error> {
    let value: serde_json::Value =
        hcl::from_str(text).map_err(|e| Error::format(source, e.to_string()))?;
    into_document(value, source)
}

/// Parse a JSON document. The root must be an object; serde_json's
/// line/column detail is carried into the error message.
pub fn json_str(text: &str, source: &str) -> Result<ConfigDocument, Error> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| Error::format(source, e.to_string()))?;
    into_document(value, source)
}

fn into_document(value: serde_json::Value, source: &str) -> Result<ConfigDocument, Error> {
    match ConfigValue::from(value) {
        ConfigValue::Mapping(doc) => Ok(doc),
        other => Err(Error::format(
            source,
            format!("expected an object at the document root, found {}", other),
        )),
    }
}

pub fn load_properties(path: &Path) -> Result<ConfigDocument, Error> {
    properties_str(&read_source(path)?, &path.display().to_string())
}

pub fn load_tfvars(path: &Path) -> Result<ConfigDocument, Error> {
    tfvars_str(&read_source(path)?, &path.display().to_string())
}

pub fn load_json(path: &Path) -> Result<ConfigDocument, Error> {
    json_str(&read_source(path)?, &path.display().to_string())
}

fn read_source(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path)
        .map_err(|e| Error::not_found(path.display().to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_properties_skips_comments_and_blanks() {
        let doc = properties_str("# comment\n\n  key = value \n", "test").unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc["key"], ConfigValue::String("value".to_string()));
    }

    #[test]
    fn test_properties_splits_on_first_equals() {
        let doc = properties_str("key=value=extra\n", "test").unwrap();
        assert_eq!(doc["key"], ConfigValue::String("value=extra".to_string()));
    }

    #[test]
    fn test_properties_indented_comment_skipped() {
        let doc = properties_str("   # still a comment\n", "test").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_properties_missing_equals_is_format_error() {
        let err = properties_str("just-a-token\n", "test").unwrap_err();
        match err {
            Error::Format { message, .. } => assert!(message.contains("line 1")),
            other => panic!("expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn test_json_root_must_be_object() {
        assert!(json_str(r#"{"a": 1}"#, "test").is_ok());
        assert!(matches!(
            json_str("[1, 2]", "test"),
            Err(Error::Format { .. })
        ));
    }

    #[test]
    fn test_json_malformed_is_format_error() {
        assert!(matches!(
            json_str("{not json", "test"),
            Err(Error::Format { .. })
        ));
    }

    #[test]
    fn test_tfvars_attributes_and_blocks() {
        let text = "region = \"us-east-1\"\nreplicas = 3\ntags {\n  team = \"payments\"\n}\n";
        let doc = tfvars_str(text, "test").unwrap();
        assert_eq!(doc["region"], ConfigValue::String("us-east-1".to_string()));
        assert_eq!(doc["replicas"].to_string(), "3");
        assert_eq!(
            doc["tags"].as_mapping().unwrap()["team"],
            ConfigValue::String("payments".to_string())
        );
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let err = load_properties(Path::new("/no/such/file.properties")).unwrap_err();
        match err {
            Error::NotFound { path, message } => {
                assert_eq!(path, "/no/such/file.properties");
                // The underlying io error text is preserved.
                assert!(!message.is_empty());
            }
            other => panic!("expected NotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_properties_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"db.pool=10\n").unwrap();
        let doc = load_properties(file.path()).unwrap();
        assert_eq!(doc["db.pool"], ConfigValue::String("10".to_string()));
    }
}
