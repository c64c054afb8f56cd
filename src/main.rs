use std::process::exit;

use tracing_subscriber::EnvFilter;

use rusty_phonebook::cli;

fn main() {
    // Diagnostics go to stderr so they never mix with the interactive menu.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run_app() {
        eprintln!("Error: {e}");
        exit(1);
    }
}
