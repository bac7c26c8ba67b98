//! typie CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use typie::cli::{Cli, RunCommand};
use typie::ui::{TerminalUI, TypieTheme, UserInterface};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr; stdout is reserved for status lines.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("typie=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("typie=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("typie starting with args: {:?}", cli);

    let theme = if cli.no_color {
        TypieTheme::plain()
    } else {
        TypieTheme::detect()
    };
    let mut ui = TerminalUI::with_theme(cli.output_mode(), theme);

    let result = cli
        .run_config()
        .and_then(|config| RunCommand::new(config).execute(&mut ui));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui.error(&e.to_string());
            ExitCode::from(exit_byte(e.exit_code()))
        }
    }
}

fn exit_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
