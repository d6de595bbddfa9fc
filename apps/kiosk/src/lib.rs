//! # Cafe Kiosk
//!
//! Terminal front-end for the cafe shell. It plays the part of the browser
//! page: it renders the mounted view as text and turns typed commands into
//! link clicks, history signals and cart writes.
//!
//! ## Module Organization
//! ```text
//! cafe_kiosk/
//! ├── lib.rs          ◄─── You are here (startup & input loop)
//! ├── commands.rs     ◄─── Command parsing and execution
//! ├── loader.rs       ◄─── ViewLoader with simulated fetch delay
//! ├── transitions.rs  ◄─── Screen-clearing view transitions
//! ├── views/
//! │   ├── mod.rs      ◄─── TextElement (mount/subscribe/unmount)
//! │   ├── menu.rs     ◄─── Menu listing
//! │   ├── order.rs    ◄─── Priced order
//! │   └── details.rs  ◄─── Product details
//! └── error.rs        ◄─── Kiosk error type with codes
//! ```

pub mod commands;
pub mod error;
pub mod loader;
pub mod transitions;
pub mod views;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use cafe_core::ChangeKind;
use cafe_shell::{FileMenuSource, MenuSource, ShellBuilder, ShellConfig, StaticMenuSource};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use commands::{Command, Reply, Session};
use error::KioskError;
use loader::KioskViewLoader;
use transitions::TerminalTransitions;

/// Menu shipped with the binary, used when no menu file is configured.
pub const BUNDLED_MENU: &str = include_str!("../data/menu.json");

#[derive(Debug, Parser)]
#[command(name = "cafe-kiosk")]
#[command(about = "Coffee shop ordering kiosk", long_about = None)]
pub struct Cli {
    /// Config file path (defaults to the platform config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Menu JSON file, overrides [data] menu_path
    #[arg(short, long)]
    pub menu: Option<PathBuf>,
}

/// Runs the kiosk until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load ShellConfig (defaults → cafe.toml → CAFE_* env)               │
/// │  2. Initialize logging (RUST_LOG, else [log] filter) to stderr         │
/// │  3. Build the shell: menu view pre-loaded, others on demand            │
/// │  4. Load the menu (file or bundled) and mount the home route           │
/// │  5. Read commands from stdin                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> ExitCode {
    // Loaded before logging exists, so a failure is reported right after.
    let (config, config_error) = match ShellConfig::load(cli.config) {
        Ok(config) => (config, None),
        Err(err) => (ShellConfig::default(), Some(err)),
    };
    init_tracing(&config.log.filter);
    if let Some(err) = config_error {
        warn!(error = %err, "Failed to load shell config, using defaults");
    }

    info!("Starting cafe kiosk");

    let session = match build_session(config, cli.menu) {
        Ok(session) => session,
        Err(err) => {
            error!(error = %err, "Kiosk setup failed");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = session.start().await {
        error!(error = %err, "Kiosk start failed");
        return ExitCode::FAILURE;
    }

    match input_loop(&session).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Input loop failed");
            ExitCode::FAILURE
        }
    }
}

fn build_session(config: ShellConfig, menu_override: Option<PathBuf>) -> Result<Session, KioskError> {
    let menu_path = menu_override.or_else(|| config.data.menu_path.clone());
    let menu_source: Box<dyn MenuSource> = match menu_path {
        Some(path) => {
            info!(path = %path.display(), "Using menu file");
            Box::new(FileMenuSource::new(path))
        }
        None => Box::new(StaticMenuSource::from_json(BUNDLED_MENU)?),
    };

    let mut builder = ShellBuilder::new(Arc::new(KioskViewLoader::new(config.load_delay())))
        .home_module(KioskViewLoader::module(cafe_core::ViewKind::HOME));
    if let Some(capability) = TerminalTransitions::detect() {
        builder = builder.view_transitions(Arc::new(capability));
    }
    let shell = builder.config(config).build()?;

    // Lives for the whole session, unlike the view subscriptions.
    shell.store().subscribe(ChangeKind::CartChanged, |_, store| {
        let lines = store.cart();
        let items = lines.iter().fold(0u32, |n, l| n.saturating_add(l.quantity));
        info!(lines = lines.len(), items, "Cart changed");
        Ok(())
    });

    Ok(Session::new(shell, menu_source))
}

async fn input_loop(session: &Session) -> Result<(), KioskError> {
    println!("{}\n", session.screen());
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let reply = match line.parse::<Command>() {
            Ok(command) => session.execute(command).await,
            Err(err) => Err(err),
        };

        match reply {
            Ok(Reply::Screen) => println!("{}\n", session.screen()),
            Ok(Reply::Text(text)) => println!("{}\n", text),
            Ok(Reply::Quit) => break,
            Err(err) => {
                warn!(error = %err, "Command failed");
                println!("! [{}] {}\n", err.code().as_str(), err);
            }
        }
    }

    info!("Kiosk closed");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cafe_shell=trace` - Show trace for the shell only
/// - Default: the `[log] filter` setting (`info,cafe=debug`)
fn init_tracing(configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
