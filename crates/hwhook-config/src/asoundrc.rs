//! Rendering of the ALSA configuration that loads the hook.
//!
//! The hook is attached to a playback PCM through the `hooks` plugin. The
//! generated stanza declares the hook type and a PCM that wraps the loopback
//! device:
//!
//! ```text
//! pcm_hook_type.hwparams {
//!     install "_snd_pcm_hook_hwparams_install"
//!     lib "libasound_module_pcm_hook_hwparams.so"
//! }
//!
//! pcm.loophook {
//!     type hooks
//!     slave.pcm "hw:Loopback,0"
//!     hooks.0 {
//!         type hwparams
//!         hook_args {
//!             opencmd "/usr/local/bin/loop-capture start"
//!             closecmd "/usr/local/bin/loop-capture stop"
//!         }
//!     }
//! }
//! ```

use std::fmt::{self, Write as _};

use crate::{ConfigError, HookConfig};

/// Hook type name used in the generated configuration.
pub const HOOK_TYPE: &str = "hwparams";

/// Symbol the hooks plugin resolves to install the hook.
pub const INSTALL_SYMBOL: &str = "_snd_pcm_hook_hwparams_install";

/// Shared object providing the install symbol.
pub const DEFAULT_MODULE_LIB: &str = "libasound_module_pcm_hook_hwparams.so";

/// A `hooks` PCM definition carrying the parameter hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsoundPcm {
    /// PCM name, used as `pcm.<name>`.
    pub name: String,
    /// Slave PCM, typically the playback side of a loopback card.
    pub slave_pcm: String,
    /// Command run when parameters are ready.
    pub opencmd: String,
    /// Command run when parameters are freed.
    pub closecmd: String,
    /// Module library providing the hook.
    pub module_lib: String,
}

impl AsoundPcm {
    /// Create a definition with the default module library.
    pub fn new(
        name: impl Into<String>,
        slave_pcm: impl Into<String>,
        opencmd: impl Into<String>,
        closecmd: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            slave_pcm: slave_pcm.into(),
            opencmd: opencmd.into(),
            closecmd: closecmd.into(),
            module_lib: DEFAULT_MODULE_LIB.to_string(),
        }
    }

    /// Build a definition from a validated hook configuration.
    pub fn from_config(
        name: impl Into<String>,
        slave_pcm: impl Into<String>,
        config: &HookConfig,
    ) -> Result<Self, ConfigError> {
        let state = config.validate()?;
        Ok(Self::new(
            name,
            slave_pcm,
            state.open_command(),
            state.close_command(),
        ))
    }

    /// Use a different module library path.
    pub fn with_module_lib(mut self, module_lib: impl Into<String>) -> Self {
        self.module_lib = module_lib.into();
        self
    }

    /// Render the configuration text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AsoundPcm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pcm_hook_type.{HOOK_TYPE} {{")?;
        writeln!(f, "    install {}", quote(INSTALL_SYMBOL))?;
        writeln!(f, "    lib {}", quote(&self.module_lib))?;
        writeln!(f, "}}")?;
        writeln!(f)?;
        writeln!(f, "pcm.{} {{", self.name)?;
        writeln!(f, "    type hooks")?;
        writeln!(f, "    slave.pcm {}", quote(&self.slave_pcm))?;
        writeln!(f, "    hooks.0 {{")?;
        writeln!(f, "        type {HOOK_TYPE}")?;
        writeln!(f, "        hook_args {{")?;
        writeln!(f, "            opencmd {}", quote(&self.opencmd))?;
        writeln!(f, "            closecmd {}", quote(&self.closecmd))?;
        writeln!(f, "        }}")?;
        writeln!(f, "    }}")?;
        writeln!(f, "}}")
    }
}

/// Double-quote a string for an ALSA configuration file.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
