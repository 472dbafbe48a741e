//! `components` - render, resolve and list components from the command line.

use anyhow::Result;
use clap::Parser;
use component_views::cli;
use component_views::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
