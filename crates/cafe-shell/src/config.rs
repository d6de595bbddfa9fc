//! # Shell Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CAFE_HOME_ROUTE=/order                                             │
//! │     CAFE_TRANSITIONS=off                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/cafe-shell/cafe.toml (Linux)                             │
//! │     ~/Library/Application Support/com.cafe.shell/cafe.toml (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     home "/", transitions auto, bundled menu                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cafe.toml
//! [shell]
//! home_route = "/"
//! transitions = "auto"  # auto | animated | off
//! transition_ms = 250
//!
//! [data]
//! menu_path = "/srv/cafe/menu.json"
//!
//! [kiosk]
//! load_delay_ms = 0
//!
//! [log]
//! filter = "info,cafe=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ShellError, ShellResult};

// =============================================================================
// Transition Mode
// =============================================================================

/// Whether page swaps are animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    /// Animate when the platform supports it.
    #[default]
    Auto,

    /// Always ask for animation. Falls back with a warning when unsupported.
    Animated,

    /// Never animate.
    Off,
}

impl std::fmt::Display for TransitionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionMode::Auto => write!(f, "auto"),
            TransitionMode::Animated => write!(f, "animated"),
            TransitionMode::Off => write!(f, "off"),
        }
    }
}

impl std::str::FromStr for TransitionMode {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(TransitionMode::Auto),
            "animated" | "on" => Ok(TransitionMode::Animated),
            "off" | "none" | "disabled" => Ok(TransitionMode::Off),
            other => Err(ShellError::InvalidConfig(format!(
                "Unknown transition mode: '{}'. Valid options: auto, animated, off",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Router behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellSettings {
    /// Path mounted at startup.
    #[serde(default = "default_home_route")]
    pub home_route: String,

    #[serde(default)]
    pub transitions: TransitionMode,

    /// Length of an animated page swap (milliseconds).
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
}

fn default_home_route() -> String {
    cafe_core::HOME_ROUTE.to_string()
}

fn default_transition_ms() -> u64 {
    250
}

impl Default for ShellSettings {
    fn default() -> Self {
        ShellSettings {
            home_route: default_home_route(),
            transitions: TransitionMode::default(),
            transition_ms: default_transition_ms(),
        }
    }
}

/// Where the menu comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSettings {
    /// Menu JSON file. `None` uses the bundled menu.
    #[serde(default)]
    pub menu_path: Option<PathBuf>,
}

/// Terminal front-end settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KioskSettings {
    /// Artificial delay for each view module load (milliseconds).
    #[serde(default)]
    pub load_delay_ms: u64,
}

/// Log filter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directive.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,cafe=debug".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete shell configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub shell: ShellSettings,

    #[serde(default)]
    pub data: DataSettings,

    #[serde(default)]
    pub kiosk: KioskSettings,

    #[serde(default)]
    pub log: LogSettings,
}

impl ShellConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (cafe.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ShellResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading shell config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load shell config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ShellResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ShellError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Shell config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ShellResult<()> {
        if cafe_core::resolve(&self.shell.home_route).is_none() {
            return Err(ShellError::InvalidConfig(format!(
                "home_route '{}' does not match any view",
                self.shell.home_route
            )));
        }

        if let Some(ref path) = self.data.menu_path {
            if path.as_os_str().is_empty() {
                return Err(ShellError::InvalidConfig(
                    "menu_path must not be empty".into(),
                ));
            }
        }

        if self.log.filter.trim().is_empty() {
            return Err(ShellError::InvalidConfig(
                "log filter must not be empty".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(route) = std::env::var("CAFE_HOME_ROUTE") {
            debug!(route = %route, "Overriding home route from environment");
            self.shell.home_route = route;
        }

        if let Ok(mode) = std::env::var("CAFE_TRANSITIONS") {
            match mode.parse() {
                Ok(parsed) => self.shell.transitions = parsed,
                Err(_) => warn!(mode = %mode, "Unknown transition mode in environment"),
            }
        }

        if let Ok(ms) = std::env::var("CAFE_TRANSITION_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                self.shell.transition_ms = ms;
            }
        }

        if let Ok(path) = std::env::var("CAFE_MENU_PATH") {
            debug!(path = %path, "Overriding menu path from environment");
            self.data.menu_path = Some(PathBuf::from(path));
        }

        if let Ok(ms) = std::env::var("CAFE_LOAD_DELAY_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                self.kiosk.load_delay_ms = ms;
            }
        }

        if let Ok(filter) = std::env::var("CAFE_LOG") {
            self.log.filter = filter;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cafe", "shell")
            .map(|dirs| dirs.config_dir().join("cafe.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn home_route(&self) -> &str {
        &self.shell.home_route
    }

    pub fn transition_mode(&self) -> TransitionMode {
        self.shell.transitions
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.shell.transition_ms)
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.kiosk.load_delay_ms)
    }
}
