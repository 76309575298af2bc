//! Configuration management for the hwhook parameter hook.
//!
//! # Features
//!
//! - **Hook configuration**: [`HookConfig`] TOML files carrying the
//!   `hook_args` compound (`opencmd`, `closecmd`) and adapter settings
//! - **Configuration tree**: [`ConfigNode`], the compound value handed to
//!   the hook at install time
//! - **Paths**: user and system configuration locations
//! - **asoundrc**: [`AsoundPcm`] renders the ALSA stanza that loads the hook
//!
//! # Example
//!
//! ```rust,no_run
//! use hwhook_config::{AsoundPcm, HookConfig};
//!
//! let (path, config) = HookConfig::discover(None).unwrap();
//! println!("loaded {}", path.display());
//!
//! let pcm = AsoundPcm::from_config("loophook", "hw:Loopback,0", &config).unwrap();
//! print!("{}", pcm.render());
//! ```

mod error;
mod hook_config;
mod node;

/// Rendering of the ALSA configuration stanza.
pub mod asoundrc;

/// Platform-specific paths for the configuration file.
pub mod paths;

pub use asoundrc::AsoundPcm;
pub use error::ConfigError;
pub use hook_config::{DEFAULT_PROC_ROOT, DEFAULT_SHELL, HookConfig, IoSettings};
pub use node::ConfigNode;
pub use paths::{find_config, search_paths, system_config_file, user_config_dir, user_config_file};
