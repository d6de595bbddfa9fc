//! # Kiosk Commands
//!
//! One typed line is one command. Navigation commands go through the history
//! bridge exactly like a browser event would; cart commands build the next
//! cart sequence with `cafe_core::cart` and write it through the store.
//!
//! ## Command Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command            Shell call                        Browser analogue  │
//! │  ───────            ──────────                        ────────────────  │
//! │  go <path>          bridge.handle_click(navlink)      <a class=navlink> │
//! │  open <path>        router.go(path)                   app.router.go()   │
//! │  back / forward     bridge.back() / forward()         popstate          │
//! │  add [id] [qty]     store.set_cart(cart::add(..))     "Add" button      │
//! │  remove <id>        store.set_cart(cart::remove(..))  "Delete" button   │
//! │  clear              store.set_cart([])                                  │
//! │  reload             load_menu(source)                 menu refetch      │
//! │  show / help / quit                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use cafe_core::validation::{validate_product_id, validate_quantity};
use cafe_core::{cart, CoreError, ViewKind};
use cafe_shell::{LinkClick, MenuSource, NavigationOutcome, Shell, ShellError};
use tracing::{debug, info};

use crate::error::KioskError;

pub const HELP: &str = "\
Commands:
  go <path>        follow a link (/, /order, /product-<id>)
  open <path>      navigate without a link
  back, forward    move through history
  add [id] [qty]   add to the order (id defaults to the product on screen)
  remove <id>      remove a product from the order
  clear            empty the order
  reload           fetch the menu again
  show             redraw the screen
  help             this text
  quit             leave";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Open(String),
    Back,
    Forward,
    Add {
        product_id: Option<String>,
        quantity: u32,
    },
    Remove(String),
    Clear,
    Reload,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = KioskError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Command::Show);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name.to_lowercase().as_str(), args.as_slice()) {
            ("go", [path]) => Command::Go(path.to_string()),
            ("open", [path]) => Command::Open(path.to_string()),
            ("back", []) => Command::Back,
            ("forward", []) => Command::Forward,
            ("add", []) => Command::Add {
                product_id: None,
                quantity: 1,
            },
            ("add", [id]) => Command::Add {
                product_id: Some(id.to_string()),
                quantity: 1,
            },
            ("add", [id, qty]) => Command::Add {
                product_id: Some(id.to_string()),
                quantity: qty
                    .parse()
                    .map_err(|_| KioskError::usage(format!("not a quantity: {}", qty)))?,
            },
            ("remove", [id]) => Command::Remove(id.to_string()),
            ("clear", []) => Command::Clear,
            ("reload", []) => Command::Reload,
            ("show", []) => Command::Show,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit" | "q", []) => Command::Quit,
            (other, _) => {
                return Err(KioskError::usage(format!(
                    "unknown command or arguments: {} (try `help`)",
                    other
                )))
            }
        };
        Ok(command)
    }
}

/// What the input loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Redraw the screen.
    Screen,
    /// Print a message.
    Text(String),
    Quit,
}

/// A running kiosk: the shell plus the menu source used for reloads.
pub struct Session {
    shell: Shell,
    menu_source: Box<dyn MenuSource>,
}

impl Session {
    pub fn new(shell: Shell, menu_source: Box<dyn MenuSource>) -> Self {
        Session { shell, menu_source }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Loads the menu and mounts the home route.
    pub async fn start(&self) -> Result<(), KioskError> {
        self.shell.load_menu(self.menu_source.as_ref()).await?;
        self.shell.start().await?;
        Ok(())
    }

    /// Title line plus the mounted view.
    pub fn screen(&self) -> String {
        let router = self.shell.router();
        let route = router
            .current_route()
            .map(|r| r.to_string())
            .unwrap_or_default();
        format!(
            "== {} ==  {}\n{}",
            router.document().title(),
            route,
            router.slot().render().unwrap_or_default()
        )
    }

    pub async fn execute(&self, command: Command) -> Result<Reply, KioskError> {
        debug!(?command, "Executing command");
        match command {
            Command::Go(path) => {
                let mut click = LinkClick::navlink(path.clone());
                let outcome = self.shell.bridge().handle_click(&mut click).await?;
                Ok(navigation_reply(&path, outcome))
            }
            Command::Open(path) => {
                let outcome = self.shell.router().go(&path).await?;
                Ok(navigation_reply(&path, Some(outcome)))
            }
            Command::Back => {
                let outcome = self.shell.bridge().back().await?;
                Ok(navigation_reply("back", outcome))
            }
            Command::Forward => {
                let outcome = self.shell.bridge().forward().await?;
                Ok(navigation_reply("forward", outcome))
            }
            Command::Add {
                product_id,
                quantity,
            } => self.add(product_id, quantity),
            Command::Remove(product_id) => {
                let store = self.shell.store();
                let next = cart::remove(&store.cart(), &product_id)?;
                store.set_cart(next);
                Ok(Reply::Screen)
            }
            Command::Clear => {
                self.shell.store().set_cart(Vec::new());
                Ok(Reply::Screen)
            }
            Command::Reload => {
                let report = self.shell.load_menu(self.menu_source.as_ref()).await?;
                info!(views_refreshed = report.delivered, "Menu reloaded");
                Ok(Reply::Screen)
            }
            Command::Show => Ok(Reply::Screen),
            Command::Help => Ok(Reply::Text(HELP.to_string())),
            Command::Quit => Ok(Reply::Quit),
        }
    }

    fn add(&self, product_id: Option<String>, quantity: u32) -> Result<Reply, KioskError> {
        let router = self.shell.router();
        let product_id = match product_id {
            Some(id) => id,
            None if router.current_view() == Some(ViewKind::Details) => {
                router.slot().current_param().unwrap_or_default()
            }
            None => return Err(KioskError::usage("add needs a product id outside a product page")),
        };

        validate_product_id(&product_id).map_err(CoreError::from)?;
        validate_quantity(quantity).map_err(CoreError::from)?;

        let store = self.shell.store();
        let menu = store
            .menu()
            .ok_or_else(|| ShellError::MenuUnavailable("menu not loaded yet".into()))?;
        if menu.find_product(&product_id).is_none() {
            return Err(CoreError::ProductNotFound(product_id).into());
        }

        let next = cart::add(&store.cart(), &product_id, quantity)?;
        let report = store.set_cart(next);
        info!(product_id = %product_id, quantity, delivered = report.delivered, "Added to order");
        Ok(Reply::Screen)
    }
}

fn navigation_reply(target: &str, outcome: Option<NavigationOutcome>) -> Reply {
    match outcome {
        Some(NavigationOutcome::Mounted { .. }) => Reply::Screen,
        Some(NavigationOutcome::Unroutable) => Reply::Text(format!("No page at {}", target)),
        Some(NavigationOutcome::Superseded) => Reply::Text("Navigation superseded".to_string()),
        None => Reply::Text(format!("Cannot go {}", target)),
    }
}
