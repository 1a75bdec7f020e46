use clap::Parser;

use fuzzgate_core::fuzz::{FuzzConfig, DEFAULT_DURATION_MS, DEFAULT_TIMEOUT_MS};

#[derive(Debug, Parser)]
#[command(
    name = "fuzzgate",
    author,
    version,
    about = "Fuzz exported functions with adversarial inputs and gate on crashes",
    long_about = "Feeds boundary-heavy argument tuples to every callable export of a \
                  module, deduplicates failures by type and message, and exits non-zero \
                  when any function crashes.\n\n\
                  Exit status: 0 when every gate passes, 1 when any gate fails, \
                  2 on usage or module errors."
)]
pub struct Args {
    /// Module to fuzz (see `--list` for the available modules)
    pub module: Option<String>,

    /// Export to fuzz. Can be provided multiple times (default: every callable export)
    #[arg(long = "fn", value_name = "NAME")]
    pub fns: Vec<String>,

    /// Session budget per function in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_DURATION_MS)]
    pub duration: u64,

    /// Maximum wait for an asynchronous result in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout: u64,

    /// Random seed for a reproducible corpus (default: random)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop each session at its first crash
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,

    /// Print reports as a JSON array instead of the console summary
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Print a SARIF 2.1.0 log (takes precedence over `--json`)
    #[arg(long, default_value_t = false)]
    pub sarif: bool,

    /// List the available modules and their exports, then exit
    #[arg(long, default_value_t = false)]
    pub list: bool,
}

impl Args {
    pub fn fuzz_config(&self) -> FuzzConfig {
        FuzzConfig {
            seed: self.seed,
            fail_fast: self.fail_fast,
            ..FuzzConfig::from_millis(self.duration, self.timeout)
        }
    }

    /// Whether the console summary should be printed.
    pub fn console(&self) -> bool {
        !self.json && !self.sarif
    }
}
