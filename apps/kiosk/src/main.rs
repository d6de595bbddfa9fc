//! # Cafe Kiosk Entry Point
//!
//! The actual setup is in lib.rs so it can be tested.

use std::process::ExitCode;

use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    cafe_kiosk::run(cafe_kiosk::Cli::parse()).await
}
