mod cli;
mod commands;
mod config;
#[allow(unused_assignments)]
mod diagnostic;
mod error;
mod logging;
mod output;

use clap::Parser;

use crate::error::{CliError, ExitCode};

fn main() {
    let cli = cli::Cli::parse();
    let output = output::OutputContext::from_global(&cli.global);

    let result = run(cli, &output);

    match result {
        Ok(()) => std::process::exit(ExitCode::Success as i32),
        Err(e) => {
            if let CliError::Parse {
                errors,
                source_text,
                file,
            } = &e
            {
                output.syntax_errors(file, source_text, errors);
            }
            output.print_error(&e);
            std::process::exit(e.exit_code() as i32);
        }
    }
}

fn run(cli: cli::Cli, output: &output::OutputContext) -> Result<(), CliError> {
    let config = config::load_config(cli.global.config.as_deref())?;
    logging::init(
        cli.global.verbose,
        cli.global.quiet,
        &config.logging.level,
        output.use_color,
    );

    match cli.command {
        cli::Commands::Parse(args) => commands::parse::run(args, &config, output),
        cli::Commands::Fmt(args) => commands::fmt::run(args, &config, output),
        cli::Commands::Edit(args) => commands::edit::run(args, &config, output),
        cli::Commands::Inspect(args) => commands::inspect::run(args, output),
        cli::Commands::Completions(args) => commands::completions::run(args),
    }
}
