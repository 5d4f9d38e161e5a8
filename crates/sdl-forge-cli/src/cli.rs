use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Parse, format and edit GraphQL SDL schemas.
///
/// Works on the `type`/`enum` subset of SDL with data-governance
/// directives. Edits are applied by script and always re-emit canonical SDL.
#[derive(Parser)]
#[command(
    name = "sdl-forge",
    version,
    about = "Parse, format and edit GraphQL SDL schemas",
    after_help = "Use 'sdl-forge <command> --help' for more information about a command.",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Global options available to all subcommands.
#[derive(Args, Debug)]
pub struct GlobalOpts {
    /// Configuration file path [env: SDL_FORGE_CONFIG]
    #[arg(short = 'c', long = "config", global = true, env = "SDL_FORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format: human (default), json, plain
    #[arg(
        long,
        global = true,
        default_value = "human",
        value_parser = ["human", "json", "plain"]
    )]
    pub format: String,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-error output
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output [env: NO_COLOR]
    #[arg(long = "no-color", global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse and validate SDL files
    Parse(ParseArgs),

    /// Rewrite SDL files in canonical form
    Fmt(FmtArgs),

    /// Apply an edit script to an SDL file
    Edit(EditArgs),

    /// List the types, fields and access scopes of an SDL file
    Inspect(InspectArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Arguments for `sdl-forge parse`.
#[derive(Args)]
pub struct ParseArgs {
    /// SDL files or directories to parse (default: the configured schema dir)
    pub paths: Vec<PathBuf>,

    /// Print the canonical SDL of each parsed file
    #[arg(long = "print")]
    pub print: bool,
}

/// Arguments for `sdl-forge fmt`.
#[derive(Args)]
pub struct FmtArgs {
    /// SDL files or directories to format (default: the configured schema dir)
    pub paths: Vec<PathBuf>,

    /// Report files that would change instead of rewriting them
    #[arg(long = "check")]
    pub check: bool,
}

/// Arguments for `sdl-forge edit`.
#[derive(Args)]
pub struct EditArgs {
    /// SDL file to edit
    pub file: PathBuf,

    /// TOML edit script
    #[arg(short = 's', long = "script")]
    pub script: PathBuf,

    /// Write the result back to the file instead of printing it
    #[arg(short = 'w', long = "write")]
    pub write: bool,
}

/// Arguments for `sdl-forge inspect`.
#[derive(Args)]
pub struct InspectArgs {
    /// SDL file to inspect
    pub file: PathBuf,

    /// Show only this type
    #[arg(short = 't', long = "type")]
    pub type_name: Option<String>,
}

/// Arguments for `sdl-forge completions`.
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_parser = ["bash", "zsh", "fish", "powershell", "elvish"])]
    pub shell: String,
}
