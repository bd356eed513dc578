use jsonschema::JSONSchema;
use serde_json::Value;
use tablewright_core::{Project, project_json_schema};

use crate::errors::{DocumentError, IssueSeverity, Result, ValidationIssue};

/// Check a project JSON document against the project JSON Schema.
pub fn check_project_document(document: &Value) -> Result<Vec<ValidationIssue>> {
    let schema = serde_json::to_value(project_json_schema())?;
    let compiled =
        JSONSchema::compile(&schema).map_err(|err| DocumentError::Schema(err.to_string()))?;

    let mut issues = Vec::new();
    if let Err(errors) = compiled.validate(document) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            issues.push(ValidationIssue::new(
                IssueSeverity::Error,
                "schema_violation",
                path,
                error.to_string(),
                None,
            ));
        }
    }

    Ok(issues)
}

/// Parse a project from JSON text, rejecting documents that do not match
/// the project JSON Schema.
pub fn parse_project(text: &str) -> Result<Project> {
    let document: Value = serde_json::from_str(text)?;
    let issues = check_project_document(&document)?;
    if !issues.is_empty() {
        return Err(DocumentError::Invalid(issues));
    }

    let project = serde_json::from_value(document)?;
    Ok(project)
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_documents_missing_required_fields() {
        let document = serde_json::json!({ "name": "shop" });
        let issues = check_project_document(&document).expect("schema compiles");
        assert!(!issues.is_empty());
        assert!(issues.iter().all(|issue| issue.code == "schema_violation"));
    }

    #[test]
    fn parses_valid_documents() {
        let text = r#"{
  "id": "0b3c9b9e-6a43-4c55-9d2a-0d4f1d7c1a10",
  "name": "shop",
  "tables": [
    {
      "id": "0b3c9b9e-6a43-4c55-9d2a-0d4f1d7c1a11",
      "name": "Orders",
      "columns": [
        {
          "id": "0b3c9b9e-6a43-4c55-9d2a-0d4f1d7c1a12",
          "name": "Id",
          "data_type": "INT",
          "nullable": false,
          "is_primary_key": true
        }
      ]
    }
  ]
}"#;
        let project = parse_project(text).expect("valid project");
        assert_eq!(project.tables[0].columns[0].name, "Id");
        assert!(project.tables[0].columns[0].is_primary_key());
    }

    #[test]
    fn unknown_data_types_are_schema_violations() {
        let text = r#"{
  "id": "0b3c9b9e-6a43-4c55-9d2a-0d4f1d7c1a10",
  "name": "shop",
  "tables": [
    {
      "id": "0b3c9b9e-6a43-4c55-9d2a-0d4f1d7c1a11",
      "name": "Orders",
      "columns": [
        {
          "id": "0b3c9b9e-6a43-4c55-9d2a-0d4f1d7c1a12",
          "name": "Payload",
          "data_type": "JSONB"
        }
      ]
    }
  ]
}"#;
        match parse_project(text) {
            Err(DocumentError::Invalid(issues)) => {
                assert!(issues.iter().any(|issue| issue.path.contains("/columns/0")));
            }
            other => panic!("expected schema violations, got {other:?}"),
        }
    }
}
