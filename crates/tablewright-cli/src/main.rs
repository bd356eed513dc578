mod config;
mod logging;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use config::{CliConfig, ConfigError, load_config};
use tablewright_core::{DataType, Error as CoreError, Project};
use tablewright_generate::{
    ExportFormat, Exporter, GenerateError, ScriptOptions, ValidatedProject, alter_project,
    generate_script,
};
use tablewright_validate::{
    DocumentError, SchemaValidationResult, ValidationIssue, analyze, apply_suggestions,
    parse_project, validate_for_export,
};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("schema has {0} blocking error(s)")]
    Blocked(usize),
}

#[derive(Parser, Debug)]
#[command(name = "tablewright", version, about = "SQL Server schema validation and DDL generation")]
struct Cli {
    /// Config file (defaults to ./tablewright.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a project document and print the findings.
    Validate(ValidateArgs),
    /// Write the T-SQL deployment script for a project.
    Generate(GenerateArgs),
    /// Render a project as SQL, Markdown, HTML, JSON or CSV.
    Export(ExportArgs),
    /// Write migration statements between two versions of a project.
    Alter(AlterArgs),
    /// Rename objects that break the project's naming rules.
    FixNames(FixNamesArgs),
    /// Print the data type catalog.
    Types,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Project JSON document.
    project: PathBuf,
    /// Also run the advanced heuristics.
    #[arg(long, default_value_t = false)]
    advanced: bool,
    /// Print the full result as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug, Default)]
struct ScriptFlags {
    /// Schema name that qualifies every table.
    #[arg(long)]
    schema: Option<String>,
    /// Drop each table before creating it.
    #[arg(long, default_value_t = false)]
    drop: bool,
    /// Guard creation with existence checks.
    #[arg(long, default_value_t = false)]
    existence_checks: bool,
    /// Wrap the script in a transaction with GO separators.
    #[arg(long, default_value_t = false)]
    batch: bool,
    #[arg(long, default_value_t = false)]
    no_comments: bool,
    #[arg(long, default_value_t = false)]
    no_indexes: bool,
    #[arg(long, default_value_t = false)]
    no_constraints: bool,
}

impl ScriptFlags {
    /// Layer the flags that were given over the configured options.
    fn apply(&self, mut options: ScriptOptions) -> ScriptOptions {
        if let Some(schema) = &self.schema {
            options.schema_name = Some(schema.clone());
        }
        options.include_drop_statements |= self.drop;
        options.include_existence_checks |= self.existence_checks;
        options.generate_batch_script |= self.batch;
        if self.no_comments {
            options.include_comments = false;
        }
        if self.no_indexes {
            options.include_indexes = false;
        }
        if self.no_constraints {
            options.include_constraints = false;
        }
        options
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    project: PathBuf,
    /// Output file (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
    #[command(flatten)]
    script: ScriptFlags,
}

#[derive(Args, Debug)]
struct ExportArgs {
    project: PathBuf,
    /// sql, markdown, html, json or csv (config value when omitted).
    #[arg(long)]
    format: Option<String>,
    #[arg(long)]
    out: Option<PathBuf>,
    #[command(flatten)]
    script: ScriptFlags,
}

#[derive(Args, Debug)]
struct AlterArgs {
    /// Project document before the change.
    original: PathBuf,
    /// Project document after the change.
    modified: PathBuf,
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FixNamesArgs {
    project: PathBuf,
    /// Where to write the renamed project (in place when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Only print the renames.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_json).map_err(CliError::Logging)?;
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Validate(args) => run_validate(args, &config),
        Command::Generate(args) => run_generate(args, &config),
        Command::Export(args) => run_export(args, &config),
        Command::Alter(args) => run_alter(args),
        Command::FixNames(args) => run_fix_names(args),
        Command::Types => run_types(),
    }
}

fn read_project(path: &Path) -> Result<Project, CliError> {
    let text = std::fs::read_to_string(path)?;
    let project = parse_project(&text)?;
    tracing::info!(
        event = "project_loaded",
        path = %path.display(),
        tables = project.tables.len(),
    );
    Ok(project)
}

fn write_output(out: Option<&Path>, content: &str) -> Result<(), CliError> {
    match out {
        Some(path) => {
            std::fs::write(path, content)?;
            tracing::info!(event = "output_written", path = %path.display(), bytes = content.len());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn run_validate(args: ValidateArgs, config: &CliConfig) -> Result<(), CliError> {
    let project = read_project(&args.project)?;
    let result = validate_for_export(&project);
    let advanced = (args.advanced || config.validation.advanced).then(|| analyze(&project));

    if args.json {
        let document = serde_json::json!({
            "validation": &result,
            "can_export": result.can_export_schema(),
            "advanced": &advanced,
        });
        write_output(None, &format!("{}\n", serde_json::to_string_pretty(&document)?))?;
    } else {
        let mut lines = Vec::new();
        push_issues(&mut lines, "structural errors", &result.structural_errors);
        push_issues(&mut lines, "structural warnings", &result.structural_warnings);
        push_issues(&mut lines, "data type errors", &result.data_type_errors);
        push_issues(&mut lines, "data type warnings", &result.data_type_warnings);
        push_issues(&mut lines, "naming errors", &result.naming_errors);
        push_issues(&mut lines, "naming warnings", &result.naming_warnings);
        if let Some(report) = &advanced {
            push_issues(&mut lines, "performance", &report.performance);
            push_issues(&mut lines, "best practice", &report.best_practice);
            push_issues(&mut lines, "security", &report.security);
        }
        lines.push(format!(
            "{} error(s), {} warning(s); exportable: {}",
            result.total_errors(),
            result.total_warnings(),
            if result.can_export_schema() { "yes" } else { "no" }
        ));
        write_output(None, &format!("{}\n", lines.join("\n")))?;
    }

    ensure_exportable(&result)
}

fn push_issues(lines: &mut Vec<String>, title: &str, issues: &[ValidationIssue]) {
    if issues.is_empty() {
        return;
    }
    lines.push(format!("{title}:"));
    for issue in issues {
        let mut line = format!("  [{}] {} {}", issue.code, issue.path, issue.message);
        if let Some(hint) = &issue.hint {
            line.push_str(&format!(" ({hint})"));
        }
        lines.push(line);
    }
}

fn ensure_exportable(result: &SchemaValidationResult) -> Result<(), CliError> {
    if result.can_export_schema() {
        Ok(())
    } else {
        Err(CliError::Blocked(result.blocking_errors().count()))
    }
}

fn run_generate(args: GenerateArgs, config: &CliConfig) -> Result<(), CliError> {
    let project = read_project(&args.project)?;
    let result = validate_for_export(&project);
    for issue in result.blocking_errors() {
        tracing::error!(event = "blocking_issue", code = %issue.code, path = %issue.path, message = %issue.message);
    }
    ensure_exportable(&result)?;

    let options = args.script.apply(config.script.clone());
    let validated = ValidatedProject::new(&project, &result)?;
    let script = generate_script(&validated, &options)?;
    write_output(args.out.as_deref(), &script)
}

fn run_export(args: ExportArgs, config: &CliConfig) -> Result<(), CliError> {
    let format = match &args.format {
        Some(value) => value.parse::<ExportFormat>()?,
        None => config.export.format,
    };
    let project = read_project(&args.project)?;
    let result = validate_for_export(&project);

    let exporter = Exporter::new(args.script.apply(config.script.clone()));
    let exported = exporter.export(&project, &result, format)?;
    write_output(args.out.as_deref(), &exported.content)
}

fn run_alter(args: AlterArgs) -> Result<(), CliError> {
    let original = read_project(&args.original)?;
    let modified = read_project(&args.modified)?;
    let mut script = alter_project(&original, &modified)?;
    script.push('\n');
    write_output(args.out.as_deref(), &script)
}

fn run_fix_names(args: FixNamesArgs) -> Result<(), CliError> {
    let mut project = read_project(&args.project)?;
    let renames = apply_suggestions(&mut project);

    let mut lines: Vec<String> = renames
        .iter()
        .map(|rename| format!("{} '{}' -> '{}'", rename.kind, rename.from, rename.to))
        .collect();
    lines.push(format!("{} rename(s)", renames.len()));
    write_output(None, &format!("{}\n", lines.join("\n")))?;

    if args.dry_run || renames.is_empty() {
        return Ok(());
    }
    let target = args.out.unwrap_or(args.project);
    let mut document = serde_json::to_string_pretty(&project)?;
    document.push('\n');
    write_output(Some(&target), &document)
}

fn run_types() -> Result<(), CliError> {
    let mut lines = vec![format!(
        "{:<18} {:<10} {:<8} {:<10} {:<6} {:<9} {}",
        "TYPE", "CATEGORY", "LENGTH", "PRECISION", "SCALE", "IDENTITY", "PK"
    )];
    for data_type in DataType::ALL {
        let spec = data_type.spec();
        let length = match spec.length_bound {
            Some(bound) if bound.allows_max => format!("{}|MAX", bound.max),
            Some(bound) => bound.max.to_string(),
            None => "-".to_string(),
        };
        let precision = match spec.precision_range {
            Some((low, high)) => format!("{low}-{high}"),
            None => "-".to_string(),
        };
        lines.push(format!(
            "{:<18} {:<10} {:<8} {:<10} {:<6} {:<9} {}",
            spec.name,
            format!("{:?}", spec.category),
            length,
            precision,
            yes_no(spec.requires_scale),
            yes_no(spec.supports_identity),
            yes_no(spec.can_be_primary_key),
        ));
    }
    write_output(None, &format!("{}\n", lines.join("\n")))
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
