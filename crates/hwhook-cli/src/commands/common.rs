//! Shared CLI helpers used across multiple commands.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use hwhook_config::HookConfig;
use hwhook_core::DeviceIdentity;

/// Playback substream selection.
#[derive(Args, Debug, Clone, Copy)]
pub struct DeviceArgs {
    /// Card number
    #[arg(long, default_value_t = 0)]
    pub card: u16,

    /// Device number on the card
    #[arg(long, default_value_t = 0)]
    pub device: u32,

    /// Subdevice number
    #[arg(long, default_value_t = 0)]
    pub subdevice: u32,
}

impl DeviceArgs {
    /// Identity of the selected substream.
    pub fn identity(&self) -> DeviceIdentity {
        DeviceIdentity::new(self.card, self.device, self.subdevice)
    }
}

/// Where the hook's command templates come from.
#[derive(Args, Debug, Clone)]
pub struct CommandSourceArgs {
    /// Hook configuration file (defaults to the standard search paths)
    #[arg(long, conflicts_with_all = ["opencmd", "closecmd"])]
    pub config: Option<PathBuf>,

    /// Command run when hardware parameters are ready
    #[arg(long, requires = "closecmd")]
    pub opencmd: Option<String>,

    /// Command run when hardware parameters are freed
    #[arg(long, requires = "opencmd")]
    pub closecmd: Option<String>,
}

impl CommandSourceArgs {
    /// Build the hook configuration from flags or from a configuration file.
    pub fn resolve(&self) -> anyhow::Result<HookConfig> {
        if let (Some(open), Some(close)) = (&self.opencmd, &self.closecmd) {
            return Ok(HookConfig::new(open.clone(), close.clone()));
        }
        let (path, config) = HookConfig::discover(self.config.as_deref())?;
        tracing::debug!(path = %path.display(), "loaded hook configuration");
        config
            .validate()
            .with_context(|| format!("in {}", path.display()))?;
        Ok(config)
    }
}
