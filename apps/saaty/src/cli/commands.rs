//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::{CliError, Questionnaire};
use crate::api::{self, AppState, PersistenceJson, SubmissionRequest, WeightsResponse};
use crate::config::Config;
use crate::report;
use saaty_core::{
    Assessment, Cell, Locale, RowId, SaatyError, SheetBackend, SheetId, SheetStore,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum request file size (1 MB).
const MAX_REQUEST_FILE_SIZE: u64 = 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), SaatyError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| SaatyError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(SaatyError::Io(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve `..` and symlinks; the result must be an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, SaatyError> {
    let canonical = path.canonicalize().map_err(|e| {
        SaatyError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(SaatyError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Print a JSON value the way every `--json-mode` command does.
fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// SHARED STEPS
// =============================================================================

/// Language from a `--locale` flag, falling back to the configured one.
pub fn resolve_locale(config: &Config, flag: Option<&str>) -> Result<Locale, SaatyError> {
    flag.map_or(Ok(config.report.locale), str::parse)
}

/// Read and solve a request file.
pub fn solve_file(
    path: &Path,
    config: &Config,
) -> Result<(SubmissionRequest, Assessment), SaatyError> {
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, MAX_REQUEST_FILE_SIZE)?;

    let contents = std::fs::read(&validated_path)
        .map_err(|e| SaatyError::Io(format!("Read file: {}", e)))?;
    let request: SubmissionRequest = serde_json::from_slice(&contents)
        .map_err(|e| SaatyError::Io(format!("Invalid request file: {}", e)))?;

    let assessment = request.weights_request().solve(config.bounds()?)?;
    Ok((request, assessment))
}

/// Append one record to the configured sheet of `store`.
pub fn append_assessment(
    store: &mut impl SheetStore,
    sheet: &SheetId,
    assessment: &Assessment,
    respondent: &str,
    phenomenon: &str,
) -> Result<RowId, SaatyError> {
    let record = assessment.to_record(respondent, phenomenon)?;
    store.append(sheet, &record)
}

/// Open the store and append. Names are checked before the store is touched.
fn save(
    config: &Config,
    assessment: &Assessment,
    respondent: &str,
    phenomenon: &str,
) -> Result<PersistenceJson, CliError> {
    let sheet = config.sheet();
    // Blank names are the caller's mistake, not a storage failure.
    assessment.to_record(respondent, phenomenon)?;

    let appended = config.open_store().and_then(|mut store| {
        append_assessment(&mut store, &sheet, assessment, respondent, phenomenon)
    });

    match appended {
        Ok(row) => {
            tracing::info!(sheet = %sheet, row = row.value(), "Submission saved");
            Ok(PersistenceJson::saved(&sheet, row))
        }
        Err(e) => {
            tracing::error!(sheet = %sheet, error = %e, "Submission not saved");
            Ok(PersistenceJson::failed(&sheet, &e))
        }
    }
}

/// Print the weights and, if attempted, the persistence outcome.
fn present(
    assessment: &Assessment,
    persistence: Option<&PersistenceJson>,
    locale: Locale,
    json_mode: bool,
) {
    if json_mode {
        print_json(&serde_json::json!({
            "weights": WeightsResponse::success(assessment),
            "persistence": persistence,
        }));
        return;
    }

    print!("{}", report::render(assessment, locale));
    if let Some(persistence) = persistence {
        println!();
        match (&persistence.row, &persistence.error) {
            (Some(row), _) => println!("Saved to sheet '{}' as row {}", persistence.sheet, row),
            (None, Some(error)) => println!("NOT saved to sheet '{}': {}", persistence.sheet, error),
            (None, None) => println!("NOT saved to sheet '{}'", persistence.sheet),
        }
    }
}

/// Turn a failed save into the command's error after the weights were shown.
fn check_saved(persistence: Option<PersistenceJson>) -> Result<(), CliError> {
    match persistence {
        Some(p) if !p.saved => Err(CliError::NotSaved(p.error.unwrap_or_default())),
        _ => Ok(()),
    }
}

/// Save under `names` if given, then show the weights whatever the save did.
fn finish(
    config: &Config,
    assessment: &Assessment,
    names: Option<(&str, &str)>,
    locale: Locale,
    json_mode: bool,
) -> Result<(), CliError> {
    let persistence = match names {
        Some((respondent, phenomenon)) => match save(config, assessment, respondent, phenomenon) {
            Ok(persistence) => Some(persistence),
            Err(e) => {
                present(assessment, None, locale, json_mode);
                return Err(e);
            }
        },
        None => None,
    };

    present(assessment, persistence.as_ref(), locale, json_mode);
    check_saved(persistence)
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &Config) -> Result<(), CliError> {
    let store = config.open_store()?;
    let persistent = store.is_persistent();
    let state = AppState::from_config(config, store)?;

    println!("Saaty AHP Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", config.server.host);
    println!("  Port:     {}", config.server.port);
    println!("  Database: {:?}", config.storage.database);
    println!("  Sheet:    {}", config.sheet());
    println!("  Criteria: {}..={}", state.bounds.min(), state.bounds.max());
    if !persistent {
        println!("  (in-memory: submissions are lost on exit)");
    }
    println!();
    println!("Endpoints:");
    println!("  GET  /health         - Health check");
    println!("  GET  /scale          - Judgment scale");
    println!("  POST /weights        - Criteria + judgments to weights");
    println!("  POST /weights/matrix - Comparison matrix to weights");
    println!("  POST /submissions    - Compute and save a questionnaire");
    println!("  GET  /submissions    - List saved questionnaires");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(&config.bind_address(), state).await?;
    Ok(())
}

// =============================================================================
// ASK COMMAND
// =============================================================================

/// Run the interactive questionnaire on stdin.
///
/// In JSON mode the prompts go to stderr so stdout carries only the result.
pub fn cmd_ask(
    config: &Config,
    locale: Locale,
    save_result: bool,
    json_mode: bool,
) -> Result<(), CliError> {
    let bounds = config.bounds()?;
    let stdin = std::io::stdin();

    let outcome = if json_mode {
        Questionnaire::new(stdin.lock(), std::io::stderr(), bounds, locale).run()?
    } else {
        Questionnaire::new(stdin.lock(), std::io::stdout(), bounds, locale).run()?
    };
    if !json_mode {
        println!();
    }

    let names = save_result.then_some((
        outcome.respondent.as_str(),
        outcome.phenomenon.as_str(),
    ));
    finish(config, &outcome.assessment, names, locale, json_mode)
}

// =============================================================================
// SOLVE COMMAND
// =============================================================================

/// Compute weights from a request file, optionally saving the result.
pub fn cmd_solve(
    config: &Config,
    file: &Path,
    save_result: bool,
    locale: Locale,
    json_mode: bool,
) -> Result<(), CliError> {
    tracing::info!("Solving {:?}", file);

    let (request, assessment) = solve_file(file, config)?;

    let names = save_result.then_some((
        request.respondent.as_str(),
        request.phenomenon.as_str(),
    ));
    finish(config, &assessment, names, locale, json_mode)
}

// =============================================================================
// SCALE COMMAND
// =============================================================================

/// Show the five judgment levels.
pub fn cmd_scale(locale: Locale, json_mode: bool) -> Result<(), CliError> {
    if json_mode {
        print_json(&serde_json::json!(api::ScaleResponse::new(locale)));
        return Ok(());
    }

    print!("{}", report::scale_table(locale));
    Ok(())
}

// =============================================================================
// RECORDS COMMAND
// =============================================================================

fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => text.clone(),
        Cell::Number(number) => format!("{:.1}", number),
    }
}

/// List the rows of a sheet.
pub fn cmd_records(config: &Config, sheet: Option<&str>, json_mode: bool) -> Result<(), CliError> {
    let sheet = sheet.map_or_else(|| config.sheet(), |s| SheetId::new(s.trim()));
    let store = config.open_store()?;
    let rows = store.rows(&sheet)?;

    if json_mode {
        print_json(&serde_json::json!(api::RecordsResponse::success(&sheet, rows)));
        return Ok(());
    }

    println!("Sheet: {} ({} rows)", sheet, rows.len());
    for (row, record) in &rows {
        let cells: Vec<String> = record.to_row().iter().map(format_cell).collect();
        println!("{:>4}  {}", row.value(), cells.join(" | "));
    }
    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Create an empty database file.
pub fn cmd_init(config: &Config, force: bool) -> Result<(), CliError> {
    if config.is_memory_database() {
        println!("In-memory storage selected; nothing to initialize.");
        return Ok(());
    }

    let path = &config.storage.database;
    if path.exists() {
        if !force {
            return Err(SaatyError::Io(
                "Database already exists. Use --force to overwrite.".to_string(),
            )
            .into());
        }
        if !path.is_file() {
            return Err(SaatyError::Io(format!(
                "Path '{}' is not a regular file",
                path.display()
            ))
            .into());
        }
        std::fs::remove_file(path)
            .map_err(|e| SaatyError::Io(format!("Remove old database: {}", e)))?;
    }

    let _store = SheetBackend::with_redb(path)?;
    println!("Initialized new database at {:?}", path);
    Ok(())
}

// =============================================================================
// CONFIG COMMAND
// =============================================================================

/// Print the configuration after file, environment and flag overrides.
pub fn cmd_config(config: &Config) -> Result<(), CliError> {
    print!("{}", config.to_toml()?);
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
