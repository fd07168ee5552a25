//! Command-line entry point.
//!
//! Parses flags, loads configuration, sets up logging, and runs the console
//! loop. The loop waits on three sources at once:
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌──────────────┐
//! │ stdin lines  │   │ gateway response │   │ toast ticker │
//! └──────┬───────┘   └────────┬─────────┘   └──────┬───────┘
//!        │ parse_command      │ Event::Gateway     │ expire
//!        └───────────────┬────┴────────────────────┘
//!                        ▼
//!                 Console::dispatch → redraw
//! ```
//!
//! Gateway responses are handled as they arrive, so the prompt stays usable
//! while calls are in flight.

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use petdesk::command::{parse_command, Command, HELP};
use petdesk::gateway::{Gateway, HttpGateway, MemoryGateway};
use petdesk::{Config, Console, Event};
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Terminal width used when `COLUMNS` is not set.
const DEFAULT_COLUMNS: usize = 100;

/// How often expired notifications are checked.
const TOAST_TICK: Duration = Duration::from_millis(250);

/// Terminal CRUD console for a remote pet registry.
#[derive(Debug, Parser)]
#[command(name = "petdesk", version, about)]
struct Args {
    /// Configuration file (default: <config_dir>/petdesk/config.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the pet service, e.g. http://localhost:8080/api/v1.
    #[arg(long)]
    base_url: Option<String>,

    /// Use an in-memory sample collection instead of the service.
    #[arg(long)]
    offline: bool,

    /// Rows per page (5, 10 or 25).
    #[arg(long)]
    page_size: Option<usize>,

    /// Built-in theme name (saga-blue, vela-blue).
    #[arg(long)]
    theme: Option<String>,

    /// Custom TOML theme file; wins over --theme.
    #[arg(long)]
    theme_file: Option<PathBuf>,

    /// Compare filter text case-insensitively.
    #[arg(long)]
    case_insensitive: bool,

    /// Directory receiving export files.
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG wins.
    #[arg(long)]
    trace_level: Option<String>,
}

impl Args {
    /// Overrides configuration values with the flags that were given.
    fn apply(self, config: &mut Config) {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if self.offline {
            config.offline = true;
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if self.theme_file.is_some() {
            config.theme_file = self.theme_file;
        }
        if self.case_insensitive {
            config.case_sensitive = false;
        }
        if let Some(export_dir) = self.export_dir {
            config.export_dir = export_dir;
        }
        if self.trace_level.is_some() {
            config.trace_level = self.trace_level;
        }
    }
}

fn terminal_columns() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse().ok())
        .filter(|cols| *cols > 20)
        .unwrap_or(DEFAULT_COLUMNS)
}

/// Writes `text` and flushes; a closed or broken terminal is only logged.
fn emit(out: &mut impl Write, text: &str) -> bool {
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "failed to write to terminal");
            false
        }
    }
}

fn draw<G: Gateway>(console: &Console<G>, cols: usize) {
    emit(&mut std::io::stdout().lock(), &format!("\n{}> ", console.render(cols)));
}

fn report(message: &str) {
    emit(&mut std::io::stdout().lock(), &format!("{message}\n> "));
}

/// Runs the console until `quit` or end of input.
async fn run<G: Gateway>(mut console: Console<G>) -> petdesk::Result<()> {
    let cols = terminal_columns();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(TOAST_TICK);

    console.dispatch(&Event::Load)?;
    draw(&console, cols);

    loop {
        let render = tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("end of input");
                    break;
                };
                let _span = tracing::debug_span!("command", line = %line).entered();
                match parse_command(&line, console.state()) {
                    Ok(None) => false,
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Help)) => {
                        report(HELP);
                        false
                    }
                    Ok(Some(Command::Event(event))) => match console.dispatch(&event) {
                        Ok(render) => render,
                        Err(e) => {
                            tracing::debug!(error = %e, "event rejected");
                            report(&e.to_string());
                            false
                        }
                    },
                    Err(e) => {
                        report(&e.to_string());
                        false
                    }
                }
            }
            Some(response) = console.next_response(), if console.has_in_flight() => {
                console.dispatch(&Event::Gateway(response))?
            }
            _ = ticker.tick() => console.expire_notifications(Instant::now()),
        };

        if render {
            draw(&console, cols);
        }
    }

    tracing::info!(in_flight = console.has_in_flight(), "console closed");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> petdesk::Result<()> {
    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    let log_file = petdesk::observability::init_tracing(&config);
    tracing::info!(log = ?log_file, offline = config.offline, "petdesk starting");

    let state = petdesk::initialize(&config)?;
    let export_dir = config.export_dir();

    if config.offline {
        tracing::info!("running against the in-memory sample collection");
        run(Console::new(state, MemoryGateway::sample(), export_dir)).await
    } else {
        tracing::info!(
            base_url = %config.base_url,
            resource = %config.resource,
            "connecting to pet service"
        );
        let gateway = HttpGateway::new(config.base_url.clone(), config.resource.clone());
        run(Console::new(state, gateway, export_dir)).await
    }
}
