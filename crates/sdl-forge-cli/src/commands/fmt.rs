use sdl_forge_dsl::print_with;

use super::parse::{discover_sdl_files, paths_or_default, read_source};
use crate::cli::FmtArgs;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::{syntax_errors_json, FileStatus, OutputContext, OutputMode, Tone};

/// Run the `fmt` command: rewrite SDL files in canonical form.
///
/// Formatted files end with a single newline. With `--check` nothing is
/// written and any file that would change makes the command fail.
pub fn run(args: FmtArgs, config: &CliConfig, output: &OutputContext) -> Result<(), CliError> {
    let paths = paths_or_default(args.paths, config);
    let files = discover_sdl_files(&paths, &config.cli.extensions)?;
    let options = config.printer.options();

    let mut changed = Vec::new();
    let mut failed_files = 0usize;
    let mut syntax_errors = Vec::new();

    for file in &files {
        let source_text = read_source(file)?;
        let filename = file.display().to_string();

        let schema = match sdl_forge_dsl::parse(&source_text) {
            Ok(schema) => schema,
            Err(errors) => {
                failed_files += 1;
                output.syntax_errors(file, &source_text, &errors);
                syntax_errors.extend(syntax_errors_json(file, &errors));
                continue;
            }
        };

        let mut formatted = print_with(&schema, &options).map_err(|e| CliError::Generation {
            file: file.clone(),
            source: e,
        })?;
        if !formatted.is_empty() {
            formatted.push('\n');
        }
        if formatted == source_text {
            continue;
        }

        if args.check {
            output.file(file, FileStatus::WouldReformat);
        } else {
            std::fs::write(file, &formatted).map_err(|e| CliError::Io {
                path: file.clone(),
                source: e,
            })?;
            tracing::info!(file = %filename, "reformatted");
            output.file(file, FileStatus::Reformatted);
        }
        changed.push(filename);
    }

    match output.mode {
        OutputMode::Human => {
            let verb = if args.check { "would be reformatted" } else { "reformatted" };
            output.summary(Tone::Ok, &format!(
                "{} of {} files {verb}",
                changed.len(),
                files.len()
            ));
        }
        OutputMode::Json => {
            output.print_json(&serde_json::json!({
                "files": files.len(),
                "check": args.check,
                "changed": changed,
                "failed": failed_files,
                "errors": syntax_errors,
            }));
        }
        OutputMode::Plain => {
            for name in &changed {
                println!("{name}");
            }
        }
    }

    if failed_files > 0 {
        Err(CliError::InvalidFiles {
            count: failed_files,
        })
    } else if args.check && !changed.is_empty() {
        Err(CliError::Unformatted {
            count: changed.len(),
        })
    } else {
        Ok(())
    }
}
