use tablewright_core::{
    CaseStyle, Column, DataType, Index, IndexType, NamingRules, Project, SortOrder, Table,
};
use tablewright_validate::{IssueSeverity, validate_for_export};

fn users_table(name: &str) -> Table {
    Table::new(name)
        .with_column(Column::new("Id", DataType::Int).primary_key().with_identity(1, 1))
        .with_column(Column::new("Email", DataType::NVarChar).with_length(320).not_null())
}

fn codes(issues: &[tablewright_validate::ValidationIssue]) -> Vec<&str> {
    issues.iter().map(|issue| issue.code.as_str()).collect()
}

#[test]
fn empty_project_is_not_exportable() {
    let project = Project::new("empty");
    let result = validate_for_export(&project);

    assert_eq!(codes(&result.structural_errors), vec!["no_tables"]);
    assert_eq!(result.structural_errors[0].message, "no tables defined");
    assert!(!result.can_export_schema());
    assert!(result.data_type_errors.is_empty());
    assert!(result.naming_errors.is_empty());
}

#[test]
fn duplicate_table_names_compare_case_insensitively() {
    let project = Project::new("shop")
        .with_table(users_table("User"))
        .with_table(users_table("user"));
    let result = validate_for_export(&project);

    assert_eq!(codes(&result.structural_errors), vec!["duplicate_table_name"]);
    assert_eq!(result.structural_errors[0].path, "/tables/1/name");
    assert!(!result.can_export_schema());
}

#[test]
fn duplicate_column_names_compare_case_insensitively() {
    let table = users_table("Users").with_column(Column::new("EMAIL", DataType::Int));
    let result = validate_for_export(&Project::new("shop").with_table(table));

    assert_eq!(codes(&result.structural_errors), vec!["duplicate_column_name"]);
}

#[test]
fn table_without_columns_skips_remaining_checks() {
    let table = Table::new("Empty").with_index(Index::new("IX_Empty", IndexType::Clustered));
    let result = validate_for_export(&Project::new("shop").with_table(table));

    assert_eq!(codes(&result.structural_errors), vec!["no_columns"]);
    assert!(result.structural_warnings.is_empty());
}

#[test]
fn missing_primary_key_is_only_a_warning() {
    let table = Table::new("Logs").with_column(Column::new("Message", DataType::NVarChar).with_length(200));
    let result = validate_for_export(&Project::new("shop").with_table(table));

    assert!(result.structural_errors.is_empty());
    assert_eq!(codes(&result.structural_warnings), vec!["no_primary_key"]);
    assert!(result.can_export_schema());
}

#[test]
fn clustered_index_next_to_primary_key_warns_once() {
    let mut table = users_table("Users");
    let email = table.column_by_name("Email").map(|column| column.id).unwrap();
    table.add_index(Index::new("CIX_Users_Email", IndexType::Clustered).with_column(email, SortOrder::Asc));
    let result = validate_for_export(&Project::new("shop").with_table(table));

    assert_eq!(
        codes(&result.structural_warnings),
        vec!["clustered_index_with_primary_key"]
    );
    assert!(result.structural_errors.is_empty());
    assert!(result.data_type_errors.is_empty());
    assert!(result.can_export_schema());
}

#[test]
fn index_reference_problems_are_structural_errors() {
    let mut table = users_table("Users");
    table.add_index(Index::new("IX_Empty", IndexType::NonClustered));
    table.add_index(
        Index::new("IX_Ghost", IndexType::NonClustered)
            .with_column(uuid::Uuid::new_v4(), SortOrder::Asc),
    );
    let result = validate_for_export(&Project::new("shop").with_table(table));

    assert_eq!(
        codes(&result.structural_errors),
        vec!["index_without_columns", "unknown_index_column"]
    );
    assert_eq!(result.structural_errors[1].path, "/tables/0/indexes/1/columns/0");
}

#[test]
fn every_length_requiring_column_without_length_gets_one_error() {
    let table = users_table("Users")
        .with_column(Column::new("Code", DataType::Char))
        .with_column(Column::new("Name", DataType::VarChar).with_length(0))
        .with_column(Column::new("Blob", DataType::VarBinary).with_length(-5))
        .with_column(Column::new("Title", DataType::NVarChar).with_length(100));
    let result = validate_for_export(&Project::new("shop").with_table(table));

    assert_eq!(result.data_type_errors.len(), 3);
    for (error, column) in result.data_type_errors.iter().zip(["Code", "Name", "Blob"]) {
        assert_eq!(error.code, "missing_length");
        assert!(error.message.contains(column), "{}", error.message);
    }
    assert!(!result.can_export_schema());
}

#[test]
fn nullable_identity_and_primary_key_are_datatype_errors() {
    let document = serde_json::json!({
        "id": "1d8c7b4a-2f3e-4c5d-8e9f-0a1b2c3d4e01",
        "name": "Users",
        "columns": [
            {
                "id": "1d8c7b4a-2f3e-4c5d-8e9f-0a1b2c3d4e02",
                "name": "Id",
                "data_type": "INT",
                "nullable": true,
                "is_primary_key": true,
                "identity": { "seed": 1, "increment": 1 }
            }
        ]
    });
    let table: Table = serde_json::from_value(document).expect("parse table");
    let result = validate_for_export(&Project::new("shop").with_table(table));

    assert_eq!(
        codes(&result.data_type_errors),
        vec!["nullable_identity", "nullable_primary_key"]
    );
}

#[test]
fn undefined_data_type_is_reported_not_raised() {
    let table = users_table("Users").with_column(Column::untyped("Pending"));
    let result = validate_for_export(&Project::new("shop").with_table(table));

    assert_eq!(codes(&result.data_type_errors), vec!["undefined_data_type"]);
}

#[test]
fn naming_violations_alone_do_not_block_export() {
    let rules = NamingRules {
        table_prefix: Some("TB_".to_string()),
        case_style: Some(CaseStyle::Upper),
        ..NamingRules::default()
    };
    let project = Project::new("shop")
        .with_naming_rules(rules)
        .with_table(users_table("users"));
    let result = validate_for_export(&project);

    assert!(result.can_export_schema());
    assert!(!result.naming_errors.is_empty());
    let table_error = result
        .naming_errors
        .iter()
        .find(|issue| issue.code == "invalid_table_name")
        .expect("table naming error");
    assert_eq!(table_error.hint.as_deref(), Some("rename to 'TB_USERS'"));
    assert!(result.naming_errors.iter().all(|issue| issue.severity == IssueSeverity::Error));
}

#[test]
fn advisory_toggles_produce_naming_warnings() {
    let rules = NamingRules {
        require_description: true,
        enforce_constraint_naming: true,
        enforce_single_word_key_naming: true,
        ..NamingRules::default()
    };
    let mut table = Table::new("Users")
        .with_description("people")
        .with_column(Column::new("User_Id", DataType::Int).primary_key().with_description("key"));
    let id = table.columns[0].id;
    table.add_index(Index::new("ByUser", IndexType::NonClustered).with_column(id, SortOrder::Asc));
    let project = Project::new("shop").with_naming_rules(rules).with_table(table);

    let result = validate_for_export(&project);
    assert_eq!(
        codes(&result.naming_warnings),
        vec!["single_word_key_recommended", "constraint_prefix_recommended"]
    );
    assert!(result.naming_errors.is_empty());
}

#[test]
fn validation_is_idempotent() {
    let table = users_table("Users")
        .with_column(Column::new("Code", DataType::Char))
        .with_column(Column::new("Amount", DataType::Decimal).with_precision(10).with_scale(12));
    let project = Project::new("shop").with_table(table.clone()).with_table(table);

    let first = validate_for_export(&project);
    let second = validate_for_export(&project);
    assert_eq!(first, second);
    assert!(first.total_errors() > 0);
}
