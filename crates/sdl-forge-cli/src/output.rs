//! Where command results, per-file progress and diagnostics are written.
//!
//! Results (printed SDL, JSON documents, plain rows) go to stdout. Progress
//! lines, summaries and diagnostics go to stderr so stdout stays pipeable.

use std::path::Path;

use console::{Style, Term};
use sdl_forge_dsl::DslError;

use crate::cli::GlobalOpts;
use crate::diagnostic::render_diagnostics;
use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

impl OutputMode {
    fn from_format(format: &str) -> Self {
        match format {
            "json" => Self::Json,
            "plain" => Self::Plain,
            _ => Self::Human,
        }
    }
}

/// Severity of a summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Ok,
    Warning,
    Error,
}

impl Tone {
    fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning:",
            Self::Error => "error:",
        }
    }

    fn style(self) -> Style {
        let style = Style::new().bold();
        match self {
            Self::Ok => style.green(),
            Self::Warning => style.yellow(),
            Self::Error => style.red(),
        }
    }
}

/// What a command did with one SDL file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Parsed { types: usize, fields: usize },
    WouldReformat,
    Reformatted,
}

impl FileStatus {
    fn line(self, path: &Path) -> String {
        let file = path.display();
        match self {
            Self::Parsed { types, fields } => format!("  {file} .... {types} types, {fields} fields"),
            Self::WouldReformat => format!("  would reformat {file}"),
            Self::Reformatted => format!("  reformatted {file}"),
        }
    }
}

pub struct OutputContext {
    pub mode: OutputMode,
    pub quiet: bool,
    pub use_color: bool,
}

impl OutputContext {
    pub fn from_global(global: &GlobalOpts) -> Self {
        let use_color = !global.no_color
            && std::env::var("TERM").map_or(true, |t| t != "dumb")
            && Term::stderr().is_term();

        Self {
            mode: OutputMode::from_format(&global.format),
            quiet: global.quiet,
            use_color,
        }
    }

    fn human(&self) -> bool {
        !self.quiet && self.mode == OutputMode::Human
    }

    fn tag(&self, tone: Tone) -> String {
        if self.use_color {
            tone.style().apply_to(tone.label()).to_string()
        } else {
            tone.label().to_string()
        }
    }

    /// Progress line for one file; human mode only.
    pub fn file(&self, path: &Path, status: FileStatus) {
        if self.human() {
            eprintln!("{}", status.line(path));
        }
    }

    /// Closing line of a command run; human mode only.
    pub fn summary(&self, tone: Tone, msg: &str) {
        if self.human() {
            eprintln!("{} {msg}", self.tag(tone));
        }
    }

    /// Untagged informational line; human mode only.
    pub fn note(&self, msg: &str) {
        if self.human() {
            eprintln!("{msg}");
        }
    }

    /// Reports the syntax errors of one file.
    ///
    /// Human mode renders source snippets, plain mode writes one
    /// `file<TAB>error<TAB>message` row per error. JSON callers put the
    /// errors in their own document, so nothing is written here.
    pub fn syntax_errors(&self, path: &Path, source: &str, errors: &[DslError]) {
        let filename = path.display().to_string();
        match self.mode {
            OutputMode::Human => {
                for report in render_diagnostics(errors, source, &filename) {
                    eprintln!("{report:?}");
                }
            }
            OutputMode::Plain => {
                for err in errors {
                    eprintln!("{filename}\terror\t{err}");
                }
            }
            OutputMode::Json => {}
        }
    }

    /// Reports the error a command ended with. Printed even when quiet.
    pub fn print_error(&self, err: &CliError) {
        match self.mode {
            OutputMode::Human => eprintln!("{} {err}", self.tag(Tone::Error)),
            OutputMode::Json => eprintln!("{}", err.to_json()),
            OutputMode::Plain => eprintln!("error\t{err}"),
        }
    }

    pub fn print_json(&self, value: &serde_json::Value) {
        if let Ok(s) = serde_json::to_string_pretty(value) {
            println!("{s}");
        }
    }
}

/// `{"file": ..., "message": ...}` entries for a JSON report.
pub fn syntax_errors_json(path: &Path, errors: &[DslError]) -> Vec<serde_json::Value> {
    errors
        .iter()
        .map(|e| {
            serde_json::json!({
                "file": path.display().to_string(),
                "message": e.to_string(),
            })
        })
        .collect()
}
