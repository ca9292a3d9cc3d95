//! Render target that writes to the terminal.
//!
//! Fields go to stdout in the selected [`OutputFormat`]. Suggestions,
//! notices and errors go to stderr so piped output stays clean.

use std::io::{self, IsTerminal, Stderr, Stdout, Write};

use colored::Colorize;
use fakexy::{to_copy_text, DisplayList, Notice, NoticeLevel, RenderTarget, NO_DATA_MESSAGE};
use indicatif::{ProgressBar, ProgressStyle};

use crate::table;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    /// `key: value` lines, same text as "copy all"
    Plain,
    Json,
}

/// Whether ANSI colors should be used on `stream`.
///
/// `NO_COLOR` and `CLICOLOR*` are handled by `colored` itself.
pub fn use_color(stream: &impl IsTerminal) -> bool {
    stream.is_terminal()
}

pub struct TerminalTarget<W: Write = Stdout, E: Write = Stderr> {
    out: W,
    diag: E,
    format: OutputFormat,
    /// Color for diagnostics on `diag`
    color: bool,
    interactive: bool,
    spinner: Option<ProgressBar>,
    write_error: Option<io::Error>,
}

impl TerminalTarget {
    /// Target writing to stdout/stderr, with a spinner and colors when stderr is a terminal.
    pub fn stdio(format: OutputFormat) -> Self {
        let diag = io::stderr();
        let interactive = use_color(&diag);
        Self {
            out: io::stdout(),
            diag,
            format,
            color: interactive,
            interactive,
            spinner: None,
            write_error: None,
        }
    }
}

impl<W: Write, E: Write> TerminalTarget<W, E> {
    /// Target writing to arbitrary sinks, without spinner or colors.
    pub fn new(out: W, diag: E, format: OutputFormat) -> Self {
        Self {
            out,
            diag,
            format,
            color: false,
            interactive: false,
            spinner: None,
            write_error: None,
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.diag)
    }

    /// The first write failure since the last call, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.write_error.take()
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            tracing::error!("Failed to write output: {}", e);
            self.write_error.get_or_insert(e);
        }
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn diagnostic(&mut self, text: &str, level: Option<NoticeLevel>) {
        let line = match (self.color, level) {
            (false, _) => text.to_string(),
            (true, Some(NoticeLevel::Success)) => text.green().to_string(),
            (true, Some(NoticeLevel::Warning)) => text.yellow().to_string(),
            (true, None) => text.red().to_string(),
        };
        let result = writeln!(self.diag, "{line}");
        self.record(result);
    }

    fn write_fields(&mut self, list: &DisplayList) -> io::Result<()> {
        match self.format {
            OutputFormat::Table => writeln!(self.out, "{}", table::field_table(list)),
            OutputFormat::Plain => write!(self.out, "{}", to_copy_text(list)),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(list).map_err(io::Error::other)?;
                writeln!(self.out, "{json}")
            }
        }
    }
}

impl<W: Write, E: Write> RenderTarget for TerminalTarget<W, E> {
    fn loading(&mut self, placeholders: usize) {
        if !self.interactive {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(format!("Generating address ({placeholders} fields loading)..."));
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn fields(&mut self, list: &DisplayList) {
        self.stop_spinner();
        let result = self.write_fields(list);
        self.record(result);
    }

    fn suggestion(&mut self, suggestion: &str) {
        self.stop_spinner();
        self.diagnostic(
            &format!("Did you mean {suggestion}? Showing results for {suggestion}."),
            Some(NoticeLevel::Warning),
        );
    }

    fn no_data(&mut self) {
        self.stop_spinner();
        let result = match self.format {
            OutputFormat::Json => writeln!(self.out, "[]")
                .and_then(|()| writeln!(self.diag, "{NO_DATA_MESSAGE}")),
            _ => writeln!(self.out, "{NO_DATA_MESSAGE}"),
        };
        self.record(result);
    }

    fn error(&mut self, message: &str) {
        self.stop_spinner();
        self.diagnostic(message, None);
    }

    fn notify(&mut self, notice: Notice) {
        let text = match notice.level {
            NoticeLevel::Success => format!("✓ {}", notice.message),
            NoticeLevel::Warning => format!("! {}", notice.message),
        };
        self.diagnostic(&text, Some(notice.level));
    }
}
