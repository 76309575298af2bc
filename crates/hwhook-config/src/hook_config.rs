//! Hook configuration file format and operations.

use std::path::{Path, PathBuf};

use hwhook_core::{CLOSE_COMMAND_KEY, HookState, OPEN_COMMAND_KEY};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::node::ConfigNode;

/// Default root of the per-card parameter descriptions.
pub const DEFAULT_PROC_ROOT: &str = "/proc/asound";

/// Default shell used to run commands.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Hook configuration file.
///
/// # TOML Format
///
/// ```toml
/// [hook_args]
/// opencmd = "/usr/local/bin/loop-capture start"
/// closecmd = "/usr/local/bin/loop-capture stop"
///
/// [io]
/// proc_root = "/proc/asound"
/// shell = "/bin/sh"
/// ```
///
/// `hook_args` is handed to the hook unchanged, exactly like the
/// `hook_args` compound of an ALSA `hooks` PCM definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HookConfig {
    /// Arguments passed to the hook at install time.
    #[serde(default)]
    pub hook_args: ConfigNode,

    /// Settings for the production adapters.
    #[serde(default)]
    pub io: IoSettings,
}

/// Settings for the procfs parameter source and the shell runner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IoSettings {
    /// Root directory holding `card<N>/pcm<D>p/sub<S>/hw_params`.
    #[serde(default = "default_proc_root")]
    pub proc_root: PathBuf,

    /// Shell invoked as `<shell> -c <command>`.
    #[serde(default = "default_shell")]
    pub shell: PathBuf,
}

fn default_proc_root() -> PathBuf {
    PathBuf::from(DEFAULT_PROC_ROOT)
}

fn default_shell() -> PathBuf {
    PathBuf::from(DEFAULT_SHELL)
}

impl Default for IoSettings {
    fn default() -> Self {
        Self {
            proc_root: default_proc_root(),
            shell: default_shell(),
        }
    }
}

impl HookConfig {
    /// Create a configuration holding both command templates.
    pub fn new(opencmd: impl Into<String>, closecmd: impl Into<String>) -> Self {
        Self {
            hook_args: ConfigNode::compound()
                .with(OPEN_COMMAND_KEY, ConfigNode::String(opencmd.into()))
                .with(CLOSE_COMMAND_KEY, ConfigNode::String(closecmd.into())),
            io: IoSettings::default(),
        }
    }

    /// Override the procfs root.
    pub fn with_proc_root(mut self, proc_root: impl Into<PathBuf>) -> Self {
        self.io.proc_root = proc_root.into();
        self
    }

    /// Override the shell.
    pub fn with_shell(mut self, shell: impl Into<PathBuf>) -> Self {
        self.io.shell = shell.into();
        self
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config: HookConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Locate and load the configuration, see [`crate::paths::find_config`].
    pub fn discover(explicit: Option<&Path>) -> Result<(PathBuf, Self), ConfigError> {
        let path = crate::paths::find_config(explicit)?;
        let config = Self::load(&path)?;
        Ok((path, config))
    }

    /// Load a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the hook arguments the way installation will.
    pub fn validate(&self) -> Result<HookState, ConfigError> {
        Ok(HookState::from_config(&self.hook_args)?)
    }

    /// Configured open command, if present and a string.
    pub fn open_command(&self) -> Option<&str> {
        self.hook_args.search(OPEN_COMMAND_KEY)?.as_str()
    }

    /// Configured close command, if present and a string.
    pub fn close_command(&self) -> Option<&str> {
        self.hook_args.search(CLOSE_COMMAND_KEY)?.as_str()
    }
}
