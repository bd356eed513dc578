use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier case convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum CaseStyle {
    Upper,
    Lower,
    Pascal,
    Snake,
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaseStyle::Upper => "UPPER",
            CaseStyle::Lower => "LOWER",
            CaseStyle::Pascal => "PASCAL",
            CaseStyle::Snake => "SNAKE",
        };
        f.write_str(name)
    }
}

impl FromStr for CaseStyle {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "UPPER" => Ok(CaseStyle::Upper),
            "LOWER" => Ok(CaseStyle::Lower),
            "PASCAL" => Ok(CaseStyle::Pascal),
            "SNAKE" => Ok(CaseStyle::Snake),
            _ => Err(Error::UnknownVariant {
                kind: "case style",
                value: value.to_string(),
            }),
        }
    }
}

/// Kind of named schema object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Table,
    Column,
    Index,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Table => "table",
            ObjectKind::Column => "column",
            ObjectKind::Index => "index",
        };
        f.write_str(name)
    }
}

/// Identifier conventions for a project.
///
/// Absent values impose no constraint. An empty pattern is different from
/// an absent one: it matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NamingRules {
    pub table_pattern: Option<String>,
    pub column_pattern: Option<String>,
    pub index_pattern: Option<String>,
    pub table_prefix: Option<String>,
    pub table_suffix: Option<String>,
    /// Global case style, used when no per-kind override is set.
    pub case_style: Option<CaseStyle>,
    pub table_case_style: Option<CaseStyle>,
    pub column_case_style: Option<CaseStyle>,
    pub index_case_style: Option<CaseStyle>,
    pub enforce_uppercase: bool,
    pub recommend_audit_columns: bool,
    pub require_description: bool,
    pub enforce_single_word_key_naming: bool,
    pub enforce_constraint_naming: bool,
}

impl NamingRules {
    pub fn pattern_for(&self, kind: ObjectKind) -> Option<&str> {
        match kind {
            ObjectKind::Table => self.table_pattern.as_deref(),
            ObjectKind::Column => self.column_pattern.as_deref(),
            ObjectKind::Index => self.index_pattern.as_deref(),
        }
    }

    /// Per-kind override, falling back to the global style.
    pub fn case_style_for(&self, kind: ObjectKind) -> Option<CaseStyle> {
        let specific = match kind {
            ObjectKind::Table => self.table_case_style,
            ObjectKind::Column => self.column_case_style,
            ObjectKind::Index => self.index_case_style,
        };
        specific.or(self.case_style)
    }
}
