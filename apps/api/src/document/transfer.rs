//! JSON export / import of whole documents.

use serde_json::Value;
use thiserror::Error;

use crate::models::document::CvDocument;

/// Top-level keys of which an importable file must carry at least one.
pub const RECOGNIZED_KEYS: [&str; 3] = ["personalInfo", "education", "experience"];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file is not valid JSON: {0}")]
    Parse(serde_json::Error),

    #[error("file must contain a JSON object")]
    NotAnObject,

    #[error("file contains none of personalInfo, education or experience")]
    MissingSections,

    #[error("file does not match the CV format: {0}")]
    Schema(serde_json::Error),
}

/// Pretty-printed document JSON.
pub fn export_json(document: &CvDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}

/// Parses an exported file. The caller keeps its current document on error.
pub fn import_json(raw: &str) -> Result<CvDocument, ImportError> {
    let value: Value = serde_json::from_str(raw).map_err(ImportError::Parse)?;
    let object = value.as_object().ok_or(ImportError::NotAnObject)?;
    if !RECOGNIZED_KEYS.iter().any(|key| object.contains_key(*key)) {
        return Err(ImportError::MissingSections);
    }
    serde_json::from_value(value).map_err(ImportError::Schema)
}

/// File stem derived from the person's name, whitespace runs collapsed to `_`.
pub fn file_stem(name: &str) -> String {
    let stem = name.split_whitespace().collect::<Vec<_>>().join("_");
    if stem.is_empty() {
        "CV".to_string()
    } else {
        stem
    }
}

pub fn json_file_name(name: &str) -> String {
    format!("{}_data.json", file_stem(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::sample::sample_document;

    #[test]
    fn test_export_then_import_round_trips() {
        let doc = sample_document();
        let exported = export_json(&doc).unwrap();
        assert!(exported.contains('\n'), "export must be indented");
        assert_eq!(import_json(&exported).unwrap(), doc);
    }

    #[test]
    fn test_round_trip_with_single_recognized_section() {
        let mut doc = CvDocument::default();
        doc.personal_info.name = "Ana Lee".to_string();
        assert_eq!(import_json(&export_json(&doc).unwrap()).unwrap(), doc);
    }

    #[test]
    fn test_import_rejects_unrecognized_file() {
        assert!(matches!(
            import_json(r#"{"foo": "bar"}"#),
            Err(ImportError::MissingSections)
        ));
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        assert!(matches!(import_json("{not json"), Err(ImportError::Parse(_))));
        assert!(matches!(import_json("[1, 2]"), Err(ImportError::NotAnObject)));
    }

    #[test]
    fn test_import_rejects_wrong_shapes() {
        assert!(matches!(
            import_json(r#"{"education": "MIT"}"#),
            Err(ImportError::Schema(_))
        ));
    }

    #[test]
    fn test_import_fills_missing_sections() {
        let doc = import_json(r#"{"experience": [{"id": 1, "jobTitle": "Chef"}]}"#).unwrap();
        assert_eq!(doc.experience[0].job_title, "Chef");
        assert!(doc.skills.is_empty());
        assert_eq!(doc.personal_info.name, "");
    }

    #[test]
    fn test_file_names_collapse_whitespace() {
        assert_eq!(json_file_name("Ana  Lee"), "Ana_Lee_data.json");
        assert_eq!(json_file_name(" Mary Jane\tWatson "), "Mary_Jane_Watson_data.json");
        assert_eq!(json_file_name(""), "CV_data.json");
    }
}
