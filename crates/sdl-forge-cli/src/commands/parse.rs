use std::path::{Path, PathBuf};

use sdl_forge_core::Schema;
use sdl_forge_dsl::print_with;

use crate::cli::ParseArgs;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::{syntax_errors_json, FileStatus, OutputContext, OutputMode, Tone};

/// Run the `parse` command: validate SDL files and render diagnostics.
pub fn run(args: ParseArgs, config: &CliConfig, output: &OutputContext) -> Result<(), CliError> {
    let paths = paths_or_default(args.paths, config);
    let files = discover_sdl_files(&paths, &config.cli.extensions)?;
    let options = config.printer.options();

    let mut total_types = 0usize;
    let mut total_errors = 0usize;
    let mut failed_files = 0usize;
    let mut all_file_results: Vec<serde_json::Value> = Vec::new();

    for file in &files {
        let source_text = read_source(file)?;

        match sdl_forge_dsl::parse(&source_text) {
            Ok(schema) => {
                let count = schema.len();
                total_types += count;

                if args.print {
                    let printed = print_with(&schema, &options).map_err(|e| {
                        CliError::Generation {
                            file: file.clone(),
                            source: e,
                        }
                    })?;
                    println!("{printed}");
                }

                let fields = schema.field_count();
                output.file(file, FileStatus::Parsed { types: count, fields });
                all_file_results.push(serde_json::json!({
                    "file": file.display().to_string(),
                    "types": count,
                    "fields": fields,
                    "errors": [],
                }));
            }
            Err(errors) => {
                failed_files += 1;
                total_errors += errors.len();

                output.syntax_errors(file, &source_text, &errors);
                all_file_results.push(serde_json::json!({
                    "file": file.display().to_string(),
                    "types": 0,
                    "fields": 0,
                    "errors": syntax_errors_json(file, &errors),
                }));
            }
        }
    }

    match output.mode {
        OutputMode::Human => {
            let summary = format!(
                "{total_types} types parsed from {} files, {total_errors} errors",
                files.len()
            );
            let tone = if failed_files > 0 { Tone::Warning } else { Tone::Ok };
            output.summary(tone, &summary);
        }
        OutputMode::Json => {
            output.print_json(&serde_json::json!({
                "files": files.len(),
                "types": total_types,
                "errors": total_errors,
                "results": all_file_results,
            }));
        }
        OutputMode::Plain => {
            if !args.print {
                println!("{}\t{total_types}\t{total_errors}", files.len());
            }
        }
    }

    if failed_files > 0 {
        Err(CliError::InvalidFiles {
            count: failed_files,
        })
    } else {
        Ok(())
    }
}

/// The given paths, or the configured schema directory when none are given.
pub fn paths_or_default(paths: Vec<PathBuf>, config: &CliConfig) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![PathBuf::from(&config.cli.default_schema_dir)]
    } else {
        paths
    }
}

/// Discover SDL files from a list of paths.
///
/// Files are used directly whatever their extension. Directories are
/// searched recursively for files with one of `extensions`.
pub fn discover_sdl_files(
    paths: &[PathBuf],
    extensions: &[String],
) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            for ext in extensions {
                let pattern = path.join("**").join(format!("*.{ext}"));
                let entries = glob::glob(&pattern.to_string_lossy())
                    .map_err(|e| CliError::Other(e.to_string()))?;
                for entry in entries {
                    files.push(entry.map_err(|e| CliError::Other(e.to_string()))?);
                }
            }
        } else {
            return Err(CliError::NoSchemaFiles { path: path.clone() });
        }
    }

    if files.is_empty() {
        let display_path = paths
            .first()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("schema/"));
        return Err(CliError::NoSchemaFiles { path: display_path });
    }

    files.sort();
    files.dedup();
    tracing::debug!(count = files.len(), "discovered SDL files");
    Ok(files)
}

pub fn read_source(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read and parse a single SDL file, keeping its text for diagnostics.
pub fn load_schema(path: &Path) -> Result<(String, Schema), CliError> {
    let source_text = read_source(path)?;
    match sdl_forge_dsl::parse(&source_text) {
        Ok(schema) => Ok((source_text, schema)),
        Err(errors) => Err(CliError::Parse {
            errors,
            source_text,
            file: path.to_path_buf(),
        }),
    }
}
