//! fuzzgate: adversarial fuzzing with a pass/fail gate
//!
//! Fuzzes every callable export of a catalog module and exits non-zero when
//! any of them crashes, so it can gate a CI pipeline.
//!
//! ## Example Usage
//!
//! ```bash
//! # Fuzz every export of the demo module
//! fuzzgate demo
//!
//! # Fuzz two exports with a 2 s budget and a 100 ms async timeout
//! fuzzgate demo --fn parse_json --fn divide --duration 2000 --timeout 100
//!
//! # Reproducible corpus, machine-readable output
//! fuzzgate text --seed 42 --json
//!
//! # SARIF for code-scanning upload
//! fuzzgate demo --sarif > fuzzgate.sarif
//! ```

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fuzzgate::args::Args;
use fuzzgate::catalog::ModuleCatalog;
use fuzzgate::output::format_catalog;
use fuzzgate::runner::run_session;
use fuzzgate_core::fuzz::panic_is_contained;

/// Exit status for usage and module errors.
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing();
    install_panic_hook();

    let catalog = ModuleCatalog::builtin();
    if args.list {
        print!("{}", format_catalog(&catalog));
        return ExitCode::SUCCESS;
    }

    let Some(module) = args.module.as_deref() else {
        println!("{}", Args::command().render_usage());
        return ExitCode::SUCCESS;
    };

    match run_session(&args, &catalog, module).await {
        Ok(status) => ExitCode::from(status.exit_code()),
        Err(err) => {
            eprintln!("\x1b[31m✗ {:#}\x1b[0m", err);
            ExitCode::from(EXIT_USAGE)
        }
    }
}

/// Panics inside target code become crash records, so they are only logged
/// at debug level. Any other panic goes to the default hook.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if panic_is_contained() {
            debug!(%info, "target panicked");
        } else {
            default_hook(info);
        }
    }));
}

/// Log to stderr so stdout stays parseable; `RUST_LOG` overrides the `warn` default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
