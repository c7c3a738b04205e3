//! bemforge CLI entry point
//!
//! Parses arguments, installs logging and runs the selected command. Any
//! error is shown through [`user_friendly_error`] and exits with status 1.

use bemforge::cli;
use bemforge::core::user_friendly_error;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = cli::Cli::parse();
    let config = cli.build_config();

    // RUST_LOG wins over the flag-derived default
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute_with_config(&config) {
        user_friendly_error(e).display();
        std::process::exit(1);
    }
}
