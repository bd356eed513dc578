//! Naming rule engine: per-kind validators and best-effort fixers.

use std::collections::HashSet;

use regex::Regex;
use tablewright_core::{CaseStyle, NamingRules, ObjectKind, Project, Table};

use crate::errors::{
    IssueSeverity, ValidationIssue, column_path, index_path, table_path,
};

/// Compiled form of a naming pattern.
#[derive(Debug, Clone)]
enum Pattern {
    Regex(Regex),
    /// Empty or unparsable pattern; matches nothing.
    Never { error: Option<String> },
}

impl Pattern {
    fn compile(raw: &str) -> Self {
        if raw.is_empty() {
            return Pattern::Never { error: None };
        }
        match Regex::new(&format!("^(?:{raw})$")) {
            Ok(regex) => Pattern::Regex(regex),
            Err(err) => Pattern::Never {
                error: Some(err.to_string()),
            },
        }
    }

    fn is_match(&self, name: &str) -> bool {
        match self {
            Pattern::Regex(regex) => regex.is_match(name),
            Pattern::Never { .. } => false,
        }
    }
}

/// Naming rules with their patterns compiled once.
#[derive(Debug, Clone)]
pub struct NamingEngine<'a> {
    rules: &'a NamingRules,
    table_pattern: Option<Pattern>,
    column_pattern: Option<Pattern>,
    index_pattern: Option<Pattern>,
}

impl<'a> NamingEngine<'a> {
    pub fn new(rules: &'a NamingRules) -> Self {
        Self {
            rules,
            table_pattern: rules.table_pattern.as_deref().map(Pattern::compile),
            column_pattern: rules.column_pattern.as_deref().map(Pattern::compile),
            index_pattern: rules.index_pattern.as_deref().map(Pattern::compile),
        }
    }

    pub fn rules(&self) -> &NamingRules {
        self.rules
    }

    fn pattern(&self, kind: ObjectKind) -> Option<&Pattern> {
        match kind {
            ObjectKind::Table => self.table_pattern.as_ref(),
            ObjectKind::Column => self.column_pattern.as_ref(),
            ObjectKind::Index => self.index_pattern.as_ref(),
        }
    }

    /// Patterns that failed to compile, with the regex error.
    pub fn invalid_patterns(&self) -> Vec<(ObjectKind, String)> {
        [ObjectKind::Table, ObjectKind::Column, ObjectKind::Index]
            .into_iter()
            .filter_map(|kind| match self.pattern(kind) {
                Some(Pattern::Never { error: Some(err) }) => Some((kind, err.clone())),
                _ => None,
            })
            .collect()
    }

    /// Whether `name` satisfies every configured rule for `kind`.
    pub fn validate(&self, kind: ObjectKind, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }

        if kind == ObjectKind::Table {
            if let Some(prefix) = self.rules.table_prefix.as_deref()
                && !name.starts_with(prefix)
            {
                return false;
            }
            if let Some(suffix) = self.rules.table_suffix.as_deref()
                && !name.ends_with(suffix)
            {
                return false;
            }
        }

        if let Some(pattern) = self.pattern(kind)
            && !pattern.is_match(name)
        {
            return false;
        }

        match self.rules.case_style_for(kind) {
            Some(style) => matches_case_style(style, name),
            None => true,
        }
    }

    /// Best-effort fix for `name`: case transform, then (tables only) the
    /// missing prefix and suffix.
    pub fn suggest(&self, kind: ObjectKind, name: &str) -> String {
        let mut suggestion = match self.rules.case_style_for(kind) {
            Some(style) => apply_case_style(style, name),
            None => name.to_string(),
        };

        if kind == ObjectKind::Table {
            if let Some(prefix) = self.rules.table_prefix.as_deref()
                && !suggestion.starts_with(prefix)
            {
                suggestion.insert_str(0, prefix);
            }
            if let Some(suffix) = self.rules.table_suffix.as_deref()
                && !suggestion.ends_with(suffix)
            {
                suggestion.push_str(suffix);
            }
        }

        if suggestion == name {
            name.to_string()
        } else {
            suggestion
        }
    }

    /// `Ix` + table + column, in the index case style.
    pub fn suggest_index_name(&self, table_name: &str, column_name: &str) -> String {
        let composed = format!("Ix{table_name}{column_name}");
        match self.rules.case_style_for(ObjectKind::Index) {
            Some(style) => apply_case_style(style, &composed),
            None => composed,
        }
    }
}

pub fn validate_table_name(name: &str, rules: &NamingRules) -> bool {
    NamingEngine::new(rules).validate(ObjectKind::Table, name)
}

pub fn validate_column_name(name: &str, rules: &NamingRules) -> bool {
    NamingEngine::new(rules).validate(ObjectKind::Column, name)
}

pub fn validate_index_name(name: &str, rules: &NamingRules) -> bool {
    NamingEngine::new(rules).validate(ObjectKind::Index, name)
}

pub fn suggest_table_name(name: &str, rules: &NamingRules) -> String {
    NamingEngine::new(rules).suggest(ObjectKind::Table, name)
}

pub fn suggest_column_name(name: &str, rules: &NamingRules) -> String {
    NamingEngine::new(rules).suggest(ObjectKind::Column, name)
}

pub fn suggest_index_name(table_name: &str, column_name: &str, rules: &NamingRules) -> String {
    NamingEngine::new(rules).suggest_index_name(table_name, column_name)
}

fn matches_case_style(style: CaseStyle, name: &str) -> bool {
    match style {
        CaseStyle::Upper => !name.chars().any(char::is_lowercase),
        CaseStyle::Lower => !name.chars().any(char::is_uppercase),
        CaseStyle::Pascal => {
            let mut chars = name.chars();
            chars.next().is_some_and(|first| first.is_ascii_uppercase())
                && chars.all(|ch| ch.is_ascii_alphanumeric())
        }
        CaseStyle::Snake => {
            let mut chars = name.chars();
            chars.next().is_some_and(|first| first.is_ascii_lowercase())
                && chars.all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
        }
    }
}

fn apply_case_style(style: CaseStyle, name: &str) -> String {
    match style {
        CaseStyle::Upper => name.to_uppercase(),
        CaseStyle::Lower => name.to_lowercase(),
        CaseStyle::Pascal => to_pascal_case(name),
        CaseStyle::Snake => to_snake_case(name),
    }
}

fn to_pascal_case(name: &str) -> String {
    name.split(|ch: char| !ch.is_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Runs of separators collapse to a single `_`, and leading or trailing
/// separators are dropped, so `__id` becomes `id`.
fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut previous_lowercase = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if ch.is_uppercase() && previous_lowercase {
                push_separator(&mut out);
            }
            out.extend(ch.to_lowercase());
            previous_lowercase = ch.is_lowercase();
        } else {
            push_separator(&mut out);
            previous_lowercase = false;
        }
    }

    while out.ends_with('_') {
        out.pop();
    }
    out
}

fn push_separator(out: &mut String) {
    if !out.is_empty() && !out.ends_with('_') {
        out.push('_');
    }
}

/// A rename performed by [`apply_suggestions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub kind: ObjectKind,
    pub from: String,
    pub to: String,
}

/// Rename every object whose name fails the project's rules to its
/// suggestion. Indexes are renamed from their table and first key column;
/// clashes within a table get a numeric suffix.
pub fn apply_suggestions(project: &mut Project) -> Vec<Rename> {
    let rules = project.naming_rules.clone().unwrap_or_default();
    let engine = NamingEngine::new(&rules);
    let mut renames = Vec::new();

    for table in &mut project.tables {
        if !engine.validate(ObjectKind::Table, &table.name) {
            let to = engine.suggest(ObjectKind::Table, &table.name);
            record_rename(&mut renames, ObjectKind::Table, &mut table.name, to);
        }

        for column in &mut table.columns {
            if !engine.validate(ObjectKind::Column, &column.name) {
                let to = engine.suggest(ObjectKind::Column, &column.name);
                record_rename(&mut renames, ObjectKind::Column, &mut column.name, to);
            }
        }

        let mut taken: HashSet<String> = table
            .indexes
            .iter()
            .filter(|index| engine.validate(ObjectKind::Index, &index.name))
            .map(|index| index.name.to_lowercase())
            .collect();
        let mut suggestions: Vec<Option<String>> = Vec::with_capacity(table.indexes.len());
        for index in &table.indexes {
            if engine.validate(ObjectKind::Index, &index.name) {
                suggestions.push(None);
                continue;
            }
            let first_column = index
                .columns
                .first()
                .and_then(|key| table.column(key.column_id));
            let base = match first_column {
                Some(column) => engine.suggest_index_name(&table.name, &column.name),
                None => engine.suggest(ObjectKind::Index, &index.name),
            };
            suggestions.push(Some(unused_name(base, &mut taken)));
        }
        for (index, suggestion) in table.indexes.iter_mut().zip(suggestions) {
            if let Some(to) = suggestion {
                record_rename(&mut renames, ObjectKind::Index, &mut index.name, to);
            }
        }
    }

    tracing::info!(event = "naming_fixed", renamed = renames.len());
    renames
}

/// `base`, or `base` with the smallest numeric suffix (from 2) not yet in
/// `taken`. The chosen name is added to `taken`.
fn unused_name(base: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(base.to_lowercase()) {
        return base;
    }
    let mut counter = 2;
    loop {
        let candidate = format!("{base}{counter}");
        if taken.insert(candidate.to_lowercase()) {
            return candidate;
        }
        counter += 1;
    }
}

fn record_rename(renames: &mut Vec<Rename>, kind: ObjectKind, name: &mut String, to: String) {
    if *name == to || to.trim().is_empty() {
        return;
    }
    renames.push(Rename {
        kind,
        from: std::mem::replace(name, to.clone()),
        to,
    });
}

/// Naming errors (rule violations) and warnings (advisory toggles).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NamingFindings {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// Check every table, column and index name of `project`.
pub fn check_project_names(project: &Project) -> NamingFindings {
    let rules = project.naming_rules.clone().unwrap_or_default();
    let engine = NamingEngine::new(&rules);
    let mut findings = NamingFindings::default();

    for (kind, err) in engine.invalid_patterns() {
        findings.errors.push(ValidationIssue::new(
            IssueSeverity::Error,
            "invalid_naming_pattern",
            format!("/naming_rules/{kind}_pattern"),
            format!("{kind} pattern does not compile: {err}"),
            Some("fix the regular expression; until then no name matches".to_string()),
        ));
    }

    for (table_index, table) in project.tables.iter().enumerate() {
        let base_path = table_path(table_index);
        check_name(
            &engine,
            ObjectKind::Table,
            &table.name,
            &base_path,
            &mut findings,
        );

        for (column_index, column) in table.columns.iter().enumerate() {
            check_name(
                &engine,
                ObjectKind::Column,
                &column.name,
                &column_path(table_index, column_index),
                &mut findings,
            );
        }

        for (index_index, index) in table.indexes.iter().enumerate() {
            check_name(
                &engine,
                ObjectKind::Index,
                &index.name,
                &index_path(table_index, index_index),
                &mut findings,
            );
        }

        check_advisory(&rules, table, table_index, &mut findings);
    }

    findings
}

fn check_name(
    engine: &NamingEngine<'_>,
    kind: ObjectKind,
    name: &str,
    path: &str,
    findings: &mut NamingFindings,
) {
    if name.trim().is_empty() {
        findings.errors.push(ValidationIssue::new(
            IssueSeverity::Error,
            format!("empty_{kind}_name"),
            path,
            format!("{kind} name is empty"),
            None,
        ));
        return;
    }

    if engine.validate(kind, name) {
        return;
    }

    let suggestion = engine.suggest(kind, name);
    let hint = (suggestion != name).then(|| format!("rename to '{suggestion}'"));
    findings.errors.push(ValidationIssue::new(
        IssueSeverity::Error,
        format!("invalid_{kind}_name"),
        path,
        format!("{kind} name '{name}' does not satisfy the naming rules"),
        hint,
    ));
}

fn check_advisory(
    rules: &NamingRules,
    table: &Table,
    table_index: usize,
    findings: &mut NamingFindings,
) {
    let base_path = table_path(table_index);

    if rules.enforce_uppercase {
        if table.name.chars().any(char::is_lowercase) {
            findings.warnings.push(warning(
                "uppercase_recommended",
                &base_path,
                format!("table name '{}' is not uppercase", table.name),
            ));
        }
        for (column_index, column) in table.columns.iter().enumerate() {
            if column.name.chars().any(char::is_lowercase) {
                findings.warnings.push(warning(
                    "uppercase_recommended",
                    &column_path(table_index, column_index),
                    format!("column name '{}.{}' is not uppercase", table.name, column.name),
                ));
            }
        }
    }

    if rules.recommend_audit_columns {
        let has = |needle: &str| {
            table
                .columns
                .iter()
                .any(|column| column.name.to_lowercase().contains(needle))
        };
        if !has("created") || !has("updated") {
            findings.warnings.push(warning(
                "audit_columns_recommended",
                &base_path,
                format!("table '{}' has no created/updated audit columns", table.name),
            ));
        }
    }

    if rules.require_description {
        if is_blank(table.description.as_deref()) {
            findings.warnings.push(warning(
                "description_missing",
                &base_path,
                format!("table '{}' has no description", table.name),
            ));
        }
        for (column_index, column) in table.columns.iter().enumerate() {
            if is_blank(column.description.as_deref()) {
                findings.warnings.push(warning(
                    "description_missing",
                    &column_path(table_index, column_index),
                    format!("column '{}.{}' has no description", table.name, column.name),
                ));
            }
        }
    }

    if rules.enforce_single_word_key_naming {
        for (column_index, column) in table.columns.iter().enumerate() {
            if column.is_primary_key() && column.name.contains(['_', ' ', '-']) {
                findings.warnings.push(warning(
                    "single_word_key_recommended",
                    &column_path(table_index, column_index),
                    format!(
                        "primary key column '{}.{}' should be a single word",
                        table.name, column.name
                    ),
                ));
            }
        }
    }

    if rules.enforce_constraint_naming {
        for (index_index, index) in table.indexes.iter().enumerate() {
            let expected = if index.unique { "UX_" } else { "IX_" };
            let has_prefix = index
                .name
                .get(..expected.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(expected));
            if !has_prefix {
                findings.warnings.push(warning(
                    "constraint_prefix_recommended",
                    &index_path(table_index, index_index),
                    format!("index '{}' should start with '{expected}'", index.name),
                ));
            }
        }
    }
}

fn warning(code: &str, path: &str, message: String) -> ValidationIssue {
    ValidationIssue::new(IssueSeverity::Warning, code, path, message, None)
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|text| text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablewright_core::{Column, DataType, Index, IndexType, SortOrder};

    fn rules_with(case_style: Option<CaseStyle>) -> NamingRules {
        NamingRules {
            case_style,
            ..NamingRules::default()
        }
    }

    #[test]
    fn prefix_and_upper_case_reach_a_fixed_point() {
        let rules = NamingRules {
            table_prefix: Some("TB_".to_string()),
            case_style: Some(CaseStyle::Upper),
            ..NamingRules::default()
        };
        assert_eq!(suggest_table_name("user", &rules), "TB_USER");
        assert!(validate_table_name("TB_USER", &rules));
        assert!(!validate_table_name("user", &rules));
        assert_eq!(suggest_table_name("TB_USER", &rules), "TB_USER");
    }

    #[test]
    fn blank_names_never_validate() {
        let rules = NamingRules::default();
        assert!(!validate_table_name("", &rules));
        assert!(!validate_column_name("   ", &rules));
        assert!(validate_index_name("anything", &rules));
    }

    #[test]
    fn patterns_must_match_fully() {
        let rules = NamingRules {
            column_pattern: Some("[a-z]+".to_string()),
            ..NamingRules::default()
        };
        assert!(validate_column_name("email", &rules));
        assert!(!validate_column_name("email2", &rules));
    }

    #[test]
    fn empty_pattern_matches_nothing() {
        let rules = NamingRules {
            index_pattern: Some(String::new()),
            ..NamingRules::default()
        };
        assert!(!validate_index_name("IX_anything", &rules));
    }

    #[test]
    fn invalid_pattern_matches_nothing_and_is_reported() {
        let rules = NamingRules {
            table_pattern: Some("([".to_string()),
            ..NamingRules::default()
        };
        let engine = NamingEngine::new(&rules);
        assert!(!engine.validate(ObjectKind::Table, "users"));
        assert_eq!(engine.invalid_patterns().len(), 1);
    }

    #[test]
    fn suffix_applies_to_tables_only() {
        let rules = NamingRules {
            table_suffix: Some("_T".to_string()),
            ..NamingRules::default()
        };
        assert!(!validate_table_name("ORDERS", &rules));
        assert_eq!(suggest_table_name("ORDERS", &rules), "ORDERS_T");
        assert!(validate_column_name("ORDERS", &rules));
        assert_eq!(suggest_column_name("ORDERS", &rules), "ORDERS");
    }

    #[test]
    fn case_style_shapes() {
        let pascal = rules_with(Some(CaseStyle::Pascal));
        assert!(validate_column_name("OrderLine2", &pascal));
        assert!(!validate_column_name("order_line", &pascal));

        let snake = rules_with(Some(CaseStyle::Snake));
        assert!(validate_column_name("order_line_2", &snake));
        assert!(!validate_column_name("OrderLine", &snake));
        assert!(!validate_column_name("2nd_line", &snake));

        let lower = rules_with(Some(CaseStyle::Lower));
        assert!(validate_column_name("order-line", &lower));
        assert!(!validate_column_name("Order", &lower));
    }

    #[test]
    fn case_transforms() {
        let pascal = rules_with(Some(CaseStyle::Pascal));
        assert_eq!(suggest_column_name("order_line item", &pascal), "OrderLineItem");
        assert_eq!(suggest_column_name("orderLine", &pascal), "OrderLine");

        let snake = rules_with(Some(CaseStyle::Snake));
        assert_eq!(suggest_column_name("OrderLine", &snake), "order_line");
        assert_eq!(suggest_column_name("order-line  item", &snake), "order_line_item");
        assert_eq!(suggest_column_name("userID", &snake), "user_id");
        assert_eq!(suggest_column_name("__id", &snake), "id");
        assert_eq!(suggest_column_name("order__line_", &snake), "order_line");

        let none = rules_with(None);
        assert_eq!(suggest_column_name("Whatever", &none), "Whatever");
    }

    #[test]
    fn index_suggestion_composes_table_and_column() {
        let snake = rules_with(Some(CaseStyle::Snake));
        assert_eq!(suggest_index_name("Orders", "CustomerId", &snake), "ix_orders_customer_id");

        let upper = NamingRules {
            table_prefix: Some("TB_".to_string()),
            case_style: Some(CaseStyle::Upper),
            ..NamingRules::default()
        };
        assert_eq!(suggest_index_name("Orders", "Id", &upper), "IXORDERSID");
    }

    fn orders_with_indexes(names: &[&str]) -> Project {
        let mut table = Table::new("Orders")
            .with_column(Column::new("Id", DataType::Int).primary_key())
            .with_column(Column::new("order_date", DataType::Date));
        let id = table.columns[0].id;
        for name in names {
            table.add_index(Index::new(*name, IndexType::NonClustered).with_column(id, SortOrder::Asc));
        }
        Project::new("shop")
            .with_naming_rules(rules_with(Some(CaseStyle::Pascal)))
            .with_table(table)
    }

    fn index_names(project: &Project) -> Vec<&str> {
        project.tables[0].indexes.iter().map(|index| index.name.as_str()).collect()
    }

    #[test]
    fn applied_suggestions_rename_columns_and_indexes() {
        let mut project = orders_with_indexes(&["ix_a", "ix_b"]);

        let renames = apply_suggestions(&mut project);
        assert_eq!(
            renames,
            vec![
                Rename {
                    kind: ObjectKind::Column,
                    from: "order_date".to_string(),
                    to: "OrderDate".to_string(),
                },
                Rename {
                    kind: ObjectKind::Index,
                    from: "ix_a".to_string(),
                    to: "IxOrdersId".to_string(),
                },
                Rename {
                    kind: ObjectKind::Index,
                    from: "ix_b".to_string(),
                    to: "IxOrdersId2".to_string(),
                },
            ]
        );
        assert!(apply_suggestions(&mut project).is_empty());
    }

    #[test]
    fn suggested_index_names_skip_names_already_in_the_table() {
        let mut project = orders_with_indexes(&["ix_a", "IxOrdersId", "ix_b"]);

        apply_suggestions(&mut project);
        assert_eq!(index_names(&project), vec!["IxOrdersId2", "IxOrdersId", "IxOrdersId3"]);
    }
}
