//! hwhook core - hardware-parameter hook for loopback audio devices
//!
//! A loopback device cannot learn the sample format, rate and channel count
//! its peer negotiated. This crate implements a stream hook that discovers
//! those parameters out-of-band when they become fixed and hands them to an
//! operator-configured command, and runs a second command when they are
//! released.
//!
//! # Components
//!
//! - [`HardwareParameters`] - parser for `key: value` parameter records
//! - [`DeviceIdentity`] - stream handle to card/device/subdevice resolution
//! - [`render_open_command`] / [`render_close_command`] - command templating
//! - [`ParamsHook`] - lifecycle controller owning the [`HookState`]
//!
//! # Seams
//!
//! Everything outside the lifecycle is injected:
//!
//! - [`HookHost`] - the audio framework delivering events
//! - [`ConfigSource`] - the compound configuration holding `opencmd`/`closecmd`
//! - [`ParameterSource`] - where per-device parameter records live
//! - [`CommandRunner`] - synchronous command execution
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use hwhook_core::{
//!     DeviceIdentity, HookHost, HookId, HookKind, HookError, ParameterSource, ParamsHook,
//!     PcmInfo, PcmStream, RecordingRunner,
//! };
//!
//! struct Host(u32);
//! impl HookHost for Host {
//!     fn add_hook(&mut self, _kind: HookKind) -> Result<HookId, i32> {
//!         self.0 += 1;
//!         Ok(HookId(self.0))
//!     }
//!     fn remove_hook(&mut self, _id: HookId) {}
//! }
//!
//! struct Proc;
//! impl ParameterSource for Proc {
//!     fn read_lines(&self, _device: &DeviceIdentity) -> hwhook_core::Result<Vec<String>> {
//!         Ok(vec!["format: S16_LE".into(), "rate: 48000".into(), "channels: 2".into()])
//!     }
//! }
//!
//! struct Stream;
//! impl PcmStream for Stream {
//!     fn info(&self) -> Result<PcmInfo, i32> {
//!         Ok(PcmInfo { card: 0, device: 0, subdevice: 0 })
//!     }
//! }
//!
//! let mut config = BTreeMap::new();
//! config.insert("opencmd".to_string(), "/bin/echo".to_string());
//! config.insert("closecmd".to_string(), "/bin/true".to_string());
//!
//! let mut host = Host(0);
//! let mut hook = ParamsHook::install(&mut host, &config, RecordingRunner::new(), Proc)?;
//! hook.on_params_ready(Some(&Stream))?;
//! assert_eq!(hook.runner().calls()[1], "/bin/echo S16_LE 48000 2\n");
//! hook.on_close();
//! # Ok::<(), HookError>(())
//! ```

pub mod command;
pub mod config;
pub mod device;
mod error;
pub mod hook;
pub mod host;
pub mod params;

pub use command::{
    CommandRunner, MAX_COMMAND_LEN, RecordingRunner, render_close_command, render_open_command,
    translate_status,
};
pub use config::{CLOSE_COMMAND_KEY, ConfigLookup, ConfigSource, OPEN_COMMAND_KEY};
pub use device::{DeviceIdentity, ParameterSource, PcmInfo, PcmStream};
pub use error::{HookError, Result, errno, status_of};
pub use hook::{HookPhase, HookState, ParamsHook};
pub use host::{HookHost, HookId, HookKind};
pub use params::{FORMAT_MAX_LEN, HardwareParameters, UNSET};
