use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::Column;

/// Length value meaning "unbounded" (`VARCHAR(MAX)` and friends).
pub const MAX_LENGTH: i32 = i32::MAX;

/// SQL Server column types supported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    BigInt,
    Int,
    SmallInt,
    TinyInt,
    Bit,
    Decimal,
    Numeric,
    Money,
    SmallMoney,
    Float,
    Real,
    Date,
    Time,
    DateTime,
    DateTime2,
    DateTimeOffset,
    SmallDateTime,
    Char,
    VarChar,
    NChar,
    NVarChar,
    Text,
    NText,
    Binary,
    VarBinary,
    Image,
    UniqueIdentifier,
    Xml,
}

/// Coarse grouping used to judge whether a type change is safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Numeric,
    String,
    DateTime,
    Binary,
    Other,
}

/// How a `DEFAULT` literal is sanity-checked for a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Decimal,
    Bit,
    Character,
    Unchecked,
}

/// Upper bound for a length-bearing type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBound {
    pub max: i32,
    /// Whether [`MAX_LENGTH`] is accepted.
    pub allows_max: bool,
}

/// Static capability record for one catalog type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: &'static str,
    pub category: TypeCategory,
    pub requires_length: bool,
    pub requires_precision: bool,
    pub requires_scale: bool,
    pub supports_identity: bool,
    pub can_be_primary_key: bool,
    pub length_bound: Option<LengthBound>,
    /// Inclusive precision range.
    pub precision_range: Option<(i32, i32)>,
    pub literal: LiteralKind,
}

const fn plain(name: &'static str, category: TypeCategory, literal: LiteralKind) -> TypeSpec {
    TypeSpec {
        name,
        category,
        requires_length: false,
        requires_precision: false,
        requires_scale: false,
        supports_identity: false,
        can_be_primary_key: true,
        length_bound: None,
        precision_range: None,
        literal,
    }
}

const fn integer(name: &'static str) -> TypeSpec {
    TypeSpec {
        supports_identity: true,
        ..plain(name, TypeCategory::Numeric, LiteralKind::Integer)
    }
}

const fn exact_numeric(name: &'static str) -> TypeSpec {
    TypeSpec {
        requires_precision: true,
        requires_scale: true,
        supports_identity: true,
        precision_range: Some((1, 38)),
        ..plain(name, TypeCategory::Numeric, LiteralKind::Decimal)
    }
}

const fn fractional_time(name: &'static str) -> TypeSpec {
    TypeSpec {
        requires_precision: true,
        precision_range: Some((0, 7)),
        ..plain(name, TypeCategory::DateTime, LiteralKind::Unchecked)
    }
}

const fn sized(
    name: &'static str,
    category: TypeCategory,
    literal: LiteralKind,
    max: i32,
    allows_max: bool,
) -> TypeSpec {
    TypeSpec {
        requires_length: true,
        length_bound: Some(LengthBound { max, allows_max }),
        ..plain(name, category, literal)
    }
}

const fn large_object(name: &'static str, category: TypeCategory) -> TypeSpec {
    TypeSpec {
        can_be_primary_key: false,
        ..plain(name, category, LiteralKind::Unchecked)
    }
}

const BIGINT: TypeSpec = integer("BIGINT");
const INT: TypeSpec = integer("INT");
const SMALLINT: TypeSpec = integer("SMALLINT");
const TINYINT: TypeSpec = integer("TINYINT");
const BIT: TypeSpec = plain("BIT", TypeCategory::Numeric, LiteralKind::Bit);
const DECIMAL: TypeSpec = exact_numeric("DECIMAL");
const NUMERIC: TypeSpec = exact_numeric("NUMERIC");
const MONEY: TypeSpec = plain("MONEY", TypeCategory::Numeric, LiteralKind::Decimal);
const SMALLMONEY: TypeSpec = plain("SMALLMONEY", TypeCategory::Numeric, LiteralKind::Decimal);
const FLOAT: TypeSpec = TypeSpec {
    requires_precision: true,
    precision_range: Some((1, 53)),
    ..plain("FLOAT", TypeCategory::Numeric, LiteralKind::Decimal)
};
const REAL: TypeSpec = plain("REAL", TypeCategory::Numeric, LiteralKind::Decimal);
const DATE: TypeSpec = plain("DATE", TypeCategory::DateTime, LiteralKind::Unchecked);
const TIME: TypeSpec = fractional_time("TIME");
const DATETIME: TypeSpec = plain("DATETIME", TypeCategory::DateTime, LiteralKind::Unchecked);
const DATETIME2: TypeSpec = fractional_time("DATETIME2");
const DATETIMEOFFSET: TypeSpec = fractional_time("DATETIMEOFFSET");
const SMALLDATETIME: TypeSpec =
    plain("SMALLDATETIME", TypeCategory::DateTime, LiteralKind::Unchecked);
const CHAR: TypeSpec = sized("CHAR", TypeCategory::String, LiteralKind::Character, 8000, false);
const VARCHAR: TypeSpec =
    sized("VARCHAR", TypeCategory::String, LiteralKind::Character, 8000, true);
const NCHAR: TypeSpec = sized("NCHAR", TypeCategory::String, LiteralKind::Character, 8000, false);
const NVARCHAR: TypeSpec =
    sized("NVARCHAR", TypeCategory::String, LiteralKind::Character, 4000, true);
const TEXT: TypeSpec = large_object("TEXT", TypeCategory::String);
const NTEXT: TypeSpec = large_object("NTEXT", TypeCategory::String);
const BINARY: TypeSpec = sized("BINARY", TypeCategory::Binary, LiteralKind::Unchecked, 8000, false);
const VARBINARY: TypeSpec =
    sized("VARBINARY", TypeCategory::Binary, LiteralKind::Unchecked, 8000, true);
const IMAGE: TypeSpec = large_object("IMAGE", TypeCategory::Binary);
const UNIQUEIDENTIFIER: TypeSpec =
    plain("UNIQUEIDENTIFIER", TypeCategory::Other, LiteralKind::Unchecked);
const XML: TypeSpec = large_object("XML", TypeCategory::Other);

impl DataType {
    /// Every catalog type, in catalog order.
    pub const ALL: [DataType; 28] = [
        DataType::BigInt,
        DataType::Int,
        DataType::SmallInt,
        DataType::TinyInt,
        DataType::Bit,
        DataType::Decimal,
        DataType::Numeric,
        DataType::Money,
        DataType::SmallMoney,
        DataType::Float,
        DataType::Real,
        DataType::Date,
        DataType::Time,
        DataType::DateTime,
        DataType::DateTime2,
        DataType::DateTimeOffset,
        DataType::SmallDateTime,
        DataType::Char,
        DataType::VarChar,
        DataType::NChar,
        DataType::NVarChar,
        DataType::Text,
        DataType::NText,
        DataType::Binary,
        DataType::VarBinary,
        DataType::Image,
        DataType::UniqueIdentifier,
        DataType::Xml,
    ];

    /// Capability record for this type.
    pub fn spec(self) -> &'static TypeSpec {
        match self {
            DataType::BigInt => &BIGINT,
            DataType::Int => &INT,
            DataType::SmallInt => &SMALLINT,
            DataType::TinyInt => &TINYINT,
            DataType::Bit => &BIT,
            DataType::Decimal => &DECIMAL,
            DataType::Numeric => &NUMERIC,
            DataType::Money => &MONEY,
            DataType::SmallMoney => &SMALLMONEY,
            DataType::Float => &FLOAT,
            DataType::Real => &REAL,
            DataType::Date => &DATE,
            DataType::Time => &TIME,
            DataType::DateTime => &DATETIME,
            DataType::DateTime2 => &DATETIME2,
            DataType::DateTimeOffset => &DATETIMEOFFSET,
            DataType::SmallDateTime => &SMALLDATETIME,
            DataType::Char => &CHAR,
            DataType::VarChar => &VARCHAR,
            DataType::NChar => &NCHAR,
            DataType::NVarChar => &NVARCHAR,
            DataType::Text => &TEXT,
            DataType::NText => &NTEXT,
            DataType::Binary => &BINARY,
            DataType::VarBinary => &VARBINARY,
            DataType::Image => &IMAGE,
            DataType::UniqueIdentifier => &UNIQUEIDENTIFIER,
            DataType::Xml => &XML,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn category(self) -> TypeCategory {
        self.spec().category
    }

    pub fn requires_length(self) -> bool {
        self.spec().requires_length
    }

    pub fn requires_precision(self) -> bool {
        self.spec().requires_precision
    }

    pub fn requires_scale(self) -> bool {
        self.spec().requires_scale
    }

    pub fn supports_identity(self) -> bool {
        self.spec().supports_identity
    }

    pub fn can_be_primary_key(self) -> bool {
        self.spec().can_be_primary_key
    }

    /// BIGINT, INT, SMALLINT and TINYINT.
    pub fn is_integer(self) -> bool {
        self.spec().literal == LiteralKind::Integer
    }

    pub fn is_string(self) -> bool {
        self.category() == TypeCategory::String
    }

    /// VARCHAR and NVARCHAR.
    pub fn is_variable_string(self) -> bool {
        matches!(self, DataType::VarChar | DataType::NVarChar)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let wanted = value.trim();
        DataType::ALL
            .into_iter()
            .find(|data_type| data_type.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownVariant {
                kind: "data type",
                value: value.to_string(),
            })
    }
}

/// Render the canonical type string, e.g. `DECIMAL(18,2)` or `NVARCHAR(MAX)`.
///
/// Parameters are emitted by presence: length wins, then precision with
/// scale, then precision alone.
pub fn render(
    data_type: Option<DataType>,
    length: Option<i32>,
    precision: Option<i32>,
    scale: Option<i32>,
) -> Result<String> {
    let data_type = data_type.ok_or(Error::UndefinedDataType)?;
    let name = data_type.name();
    let rendered = match (length, precision, scale) {
        (Some(MAX_LENGTH), _, _) => format!("{name}(MAX)"),
        (Some(length), _, _) => format!("{name}({length})"),
        (None, Some(precision), Some(scale)) => format!("{name}({precision},{scale})"),
        (None, Some(precision), None) => format!("{name}({precision})"),
        (None, None, _) => name.to_string(),
    };
    Ok(rendered)
}

/// Render the type string of a column.
pub fn render_column_type(column: &Column) -> Result<String> {
    render(
        column.data_type,
        column.max_length,
        column.precision,
        column.scale,
    )
}

/// Whether changing `from` into `to` stays within one type category.
pub fn compatible(from: DataType, to: DataType) -> bool {
    from.category() == to.category()
}

/// One catalog finding for a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFinding {
    pub code: &'static str,
    pub message: String,
}

/// Errors and warnings from checking a column against the catalog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TypeReport {
    pub errors: Vec<TypeFinding>,
    pub warnings: Vec<TypeFinding>,
}

impl TypeReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, code: &'static str, message: String) {
        self.errors.push(TypeFinding { code, message });
    }

    fn warning(&mut self, code: &'static str, message: String) {
        self.warnings.push(TypeFinding { code, message });
    }
}

/// Check a column's parameters, key flags and default against its type.
pub fn validate_column(column: &Column) -> TypeReport {
    let mut report = TypeReport::default();
    let name = column.name.as_str();

    let Some(data_type) = column.data_type else {
        report.error(
            "undefined_data_type",
            format!("column '{name}' has no data type"),
        );
        return report;
    };
    let spec = data_type.spec();

    check_length(name, spec, column.max_length, &mut report);
    check_precision_and_scale(name, spec, column.precision, column.scale, &mut report);

    if column.is_identity() && !spec.supports_identity {
        report.error(
            "identity_not_supported",
            format!("column '{name}': {} does not support IDENTITY", spec.name),
        );
    }

    if column.is_primary_key() && !spec.can_be_primary_key {
        report.error(
            "primary_key_not_supported",
            format!("column '{name}': {} cannot be part of a primary key", spec.name),
        );
    }

    if let Some(raw) = column.default_value.as_deref() {
        check_default(name, spec, raw, &mut report);
    }

    report
}

fn check_length(name: &str, spec: &TypeSpec, length: Option<i32>, report: &mut TypeReport) {
    if !spec.requires_length {
        if length.is_some() {
            report.warning(
                "unused_length",
                format!("column '{name}': {} does not take a length", spec.name),
            );
        }
        return;
    }

    let bound = spec.length_bound.unwrap_or(LengthBound {
        max: 8000,
        allows_max: false,
    });
    match length {
        None => report.error(
            "missing_length",
            format!("column '{name}': {} requires a length", spec.name),
        ),
        Some(length) if length <= 0 => report.error(
            "missing_length",
            format!(
                "column '{name}': {} requires a positive length, got {length}",
                spec.name
            ),
        ),
        Some(MAX_LENGTH) => {
            if !bound.allows_max {
                report.error(
                    "length_out_of_range",
                    format!("column '{name}': {} does not support MAX", spec.name),
                );
            }
        }
        Some(length) => {
            if length > bound.max {
                report.error(
                    "length_out_of_range",
                    format!(
                        "column '{name}': {} length {length} exceeds {}",
                        spec.name, bound.max
                    ),
                );
            }
        }
    }
}

fn check_precision_and_scale(
    name: &str,
    spec: &TypeSpec,
    precision: Option<i32>,
    scale: Option<i32>,
    report: &mut TypeReport,
) {
    if !spec.requires_precision && precision.is_some() {
        report.warning(
            "unused_precision",
            format!("column '{name}': {} does not take a precision", spec.name),
        );
    }
    if !spec.requires_scale && scale.is_some() {
        report.warning(
            "unused_scale",
            format!("column '{name}': {} does not take a scale", spec.name),
        );
    }

    if spec.requires_precision {
        match precision {
            None => report.error(
                "missing_precision",
                format!("column '{name}': {} requires a precision", spec.name),
            ),
            Some(value) => {
                if let Some((min, max)) = spec.precision_range
                    && !(min..=max).contains(&value)
                {
                    report.error(
                        "precision_out_of_range",
                        format!(
                            "column '{name}': {} precision {value} must be between {min} and {max}",
                            spec.name
                        ),
                    );
                }
            }
        }
    }

    if spec.requires_scale {
        match scale {
            None => report.error(
                "missing_scale",
                format!("column '{name}': {} requires a scale", spec.name),
            ),
            Some(value) if value < 0 => report.error(
                "scale_out_of_range",
                format!("column '{name}': scale {value} must not be negative"),
            ),
            Some(_) => {}
        }
    }

    if spec.requires_scale
        && let (Some(precision), Some(scale)) = (precision, scale)
        && scale > precision
    {
        report.error(
            "scale_exceeds_precision",
            format!("column '{name}': scale {scale} exceeds precision {precision}"),
        );
    }
}

fn check_default(name: &str, spec: &TypeSpec, raw: &str, report: &mut TypeReport) {
    let literal = strip_parentheses(raw.trim());
    if literal.is_empty() || literal.eq_ignore_ascii_case("NULL") {
        return;
    }

    match spec.literal {
        LiteralKind::Integer => {
            if literal.parse::<i64>().is_err() {
                report.error(
                    "invalid_default",
                    format!(
                        "column '{name}': default '{raw}' is not a valid {} literal",
                        spec.name
                    ),
                );
            }
        }
        LiteralKind::Decimal => {
            if literal.parse::<f64>().is_err() {
                report.error(
                    "invalid_default",
                    format!(
                        "column '{name}': default '{raw}' is not a valid {} literal",
                        spec.name
                    ),
                );
            }
        }
        LiteralKind::Bit => {
            if literal != "0" && literal != "1" {
                report.error(
                    "invalid_default",
                    format!("column '{name}': BIT default must be 0 or 1, got '{raw}'"),
                );
            }
        }
        LiteralKind::Character => {
            if !is_quoted(literal) {
                report.warning(
                    "unquoted_default",
                    format!("column '{name}': character default '{raw}' is not quoted"),
                );
            }
        }
        LiteralKind::Unchecked => {}
    }
}

fn strip_parentheses(mut literal: &str) -> &str {
    while literal.len() >= 2 && literal.starts_with('(') && literal.ends_with(')') {
        literal = literal[1..literal.len() - 1].trim();
    }
    literal
}

fn is_quoted(literal: &str) -> bool {
    let body = literal
        .strip_prefix('N')
        .or_else(|| literal.strip_prefix('n'))
        .unwrap_or(literal);
    body.len() >= 2 && body.starts_with('\'') && body.ends_with('\'')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(findings: &[TypeFinding]) -> Vec<&'static str> {
        findings.iter().map(|finding| finding.code).collect()
    }

    #[test]
    fn renders_parameters_by_presence() {
        assert_eq!(
            render(Some(DataType::Decimal), None, Some(18), Some(2)).unwrap(),
            "DECIMAL(18,2)"
        );
        assert_eq!(
            render(Some(DataType::Time), None, Some(7), None).unwrap(),
            "TIME(7)"
        );
        assert_eq!(render(Some(DataType::Int), None, None, None).unwrap(), "INT");
        assert_eq!(
            render(Some(DataType::NVarChar), Some(MAX_LENGTH), None, None).unwrap(),
            "NVARCHAR(MAX)"
        );
        assert_eq!(
            render(Some(DataType::VarChar), Some(255), None, None).unwrap(),
            "VARCHAR(255)"
        );
    }

    #[test]
    fn render_rejects_undefined_type() {
        assert_eq!(
            render(None, Some(10), None, None),
            Err(Error::UndefinedDataType)
        );
    }

    #[test]
    fn parses_type_names_case_insensitively() {
        assert_eq!("nvarchar".parse::<DataType>().unwrap(), DataType::NVarChar);
        assert_eq!(
            "DATETIMEOFFSET".parse::<DataType>().unwrap(),
            DataType::DateTimeOffset
        );
        let err = "JSONB".parse::<DataType>().unwrap_err();
        assert!(matches!(err, Error::UnknownVariant { kind: "data type", .. }));
    }

    #[test]
    fn catalog_flags_match_type_families() {
        assert!(DataType::VarChar.requires_length());
        assert!(DataType::Decimal.requires_precision() && DataType::Decimal.requires_scale());
        assert!(DataType::Float.requires_precision() && !DataType::Float.requires_scale());
        assert!(DataType::DateTime2.requires_precision());
        for large in [DataType::Text, DataType::Image, DataType::Xml] {
            assert!(!large.supports_identity());
            assert!(!large.can_be_primary_key());
        }
        assert!(DataType::BigInt.supports_identity());
        assert!(!DataType::UniqueIdentifier.supports_identity());
    }

    #[test]
    fn missing_length_reports_single_error() {
        let column = Column::new("code", DataType::VarChar);
        let report = validate_column(&column);
        assert_eq!(codes(&report.errors), vec!["missing_length"]);

        let column = Column::new("code", DataType::NChar).with_length(0);
        let report = validate_column(&column);
        assert_eq!(codes(&report.errors), vec!["missing_length"]);
    }

    #[test]
    fn length_bounds_depend_on_type() {
        let ok = Column::new("notes", DataType::VarChar).with_length(8000);
        assert!(validate_column(&ok).is_ok());

        let wide = Column::new("notes", DataType::NVarChar).with_length(4001);
        assert_eq!(codes(&validate_column(&wide).errors), vec!["length_out_of_range"]);

        let max = Column::new("notes", DataType::NVarChar).with_length(MAX_LENGTH);
        assert!(validate_column(&max).is_ok());

        let fixed_max = Column::new("code", DataType::Char).with_length(MAX_LENGTH);
        assert_eq!(
            codes(&validate_column(&fixed_max).errors),
            vec!["length_out_of_range"]
        );
    }

    #[test]
    fn precision_and_scale_ranges() {
        let column = Column::new("amount", DataType::Decimal)
            .with_precision(39)
            .with_scale(2);
        assert_eq!(
            codes(&validate_column(&column).errors),
            vec!["precision_out_of_range"]
        );

        let column = Column::new("amount", DataType::Numeric)
            .with_precision(5)
            .with_scale(6);
        assert_eq!(
            codes(&validate_column(&column).errors),
            vec!["scale_exceeds_precision"]
        );

        let column = Column::new("ratio", DataType::Float).with_precision(53);
        assert!(validate_column(&column).is_ok());

        let column = Column::new("at", DataType::DateTime2).with_precision(0);
        assert!(validate_column(&column).is_ok());

        let column = Column::new("at", DataType::Time).with_precision(8);
        assert_eq!(
            codes(&validate_column(&column).errors),
            vec!["precision_out_of_range"]
        );

        let column = Column::new("amount", DataType::Decimal);
        assert_eq!(
            codes(&validate_column(&column).errors),
            vec!["missing_precision", "missing_scale"]
        );
    }

    #[test]
    fn parameters_a_type_does_not_take_are_warnings() {
        let column = Column::new("Id", DataType::Int).with_precision(5);
        let report = validate_column(&column);
        assert!(report.is_ok());
        assert_eq!(codes(&report.warnings), vec!["unused_precision"]);

        let column = Column::new("At", DataType::DateTime).with_precision(3);
        assert_eq!(codes(&validate_column(&column).warnings), vec!["unused_precision"]);

        let column = Column::new("F", DataType::Float).with_precision(10).with_scale(2);
        let report = validate_column(&column);
        assert!(report.is_ok());
        assert_eq!(codes(&report.warnings), vec!["unused_scale"]);

        let column = Column::new("T", DataType::Time).with_precision(7).with_scale(3);
        assert_eq!(codes(&validate_column(&column).warnings), vec!["unused_scale"]);

        let column = Column::new("Code", DataType::Char).with_length(3).with_scale(1);
        assert_eq!(codes(&validate_column(&column).warnings), vec!["unused_scale"]);

        let column = Column::new("Amount", DataType::Decimal).with_precision(18).with_scale(2);
        assert!(validate_column(&column).warnings.is_empty());
    }

    #[test]
    fn identity_and_key_eligibility() {
        let column = Column::new("body", DataType::Text).with_identity(1, 1);
        assert_eq!(
            codes(&validate_column(&column).errors),
            vec!["identity_not_supported"]
        );

        let column = Column::new("doc", DataType::Xml).primary_key();
        assert_eq!(
            codes(&validate_column(&column).errors),
            vec!["primary_key_not_supported"]
        );
    }

    #[test]
    fn default_literals_are_checked_by_category() {
        let column = Column::new("qty", DataType::Int).with_default("((0))");
        assert!(validate_column(&column).is_ok());

        let column = Column::new("qty", DataType::Int).with_default("zero");
        assert_eq!(codes(&validate_column(&column).errors), vec!["invalid_default"]);

        let column = Column::new("price", DataType::Money).with_default("9.99");
        assert!(validate_column(&column).is_ok());

        let column = Column::new("active", DataType::Bit).with_default("2");
        assert_eq!(codes(&validate_column(&column).errors), vec!["invalid_default"]);

        let column = Column::new("status", DataType::NVarChar)
            .with_length(20)
            .with_default("active");
        let report = validate_column(&column);
        assert!(report.is_ok());
        assert_eq!(codes(&report.warnings), vec!["unquoted_default"]);

        let column = Column::new("status", DataType::NVarChar)
            .with_length(20)
            .with_default("N'active'");
        assert!(validate_column(&column).warnings.is_empty());
    }

    #[test]
    fn compatibility_is_category_equality() {
        assert!(compatible(DataType::Int, DataType::Decimal));
        assert!(compatible(DataType::VarChar, DataType::NText));
        assert!(!compatible(DataType::Int, DataType::VarChar));
        assert!(!compatible(DataType::Date, DataType::Binary));
    }
}
