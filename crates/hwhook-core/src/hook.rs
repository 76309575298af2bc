//! Hook lifecycle controller.
//!
//! [`ParamsHook::install`] validates the configuration, registers the three
//! lifecycle handlers with the host and primes the downstream device by
//! running the close command once. The installed hook then answers
//! params-ready and params-freed events until [`ParamsHook::on_close`]
//! consumes it.
//!
//! ```text
//! Uninstalled --install--> Installed --ready--> ParamsReady <--ready/freed--> ParamsFreed
//!
//! any installed phase --close--> Removed (hook consumed)
//! ```

use crate::command::{render_close_command, render_open_command, translate_status};
use crate::config::{CLOSE_COMMAND_KEY, ConfigLookup, ConfigSource, OPEN_COMMAND_KEY};
use crate::device::{DeviceIdentity, ParameterSource, PcmStream};
use crate::host::{HookHost, HookId, HookKind};
use crate::{CommandRunner, HardwareParameters, HookError, Result};

/// Command templates shared by every handler of one installed hook.
///
/// Both templates are non-empty and never change after installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookState {
    open_command: Box<str>,
    close_command: Box<str>,
}

impl HookState {
    /// Read both templates from a compound configuration value.
    pub fn from_config(config: &dyn ConfigSource) -> Result<Self> {
        if !config.is_compound() {
            return Err(HookError::ConfigNotCompound);
        }
        let open_command = copy_template(config, OPEN_COMMAND_KEY)?;
        let close_command = copy_template(config, CLOSE_COMMAND_KEY)?;
        Ok(Self {
            open_command,
            close_command,
        })
    }

    /// Template run when hardware parameters are ready.
    pub fn open_command(&self) -> &str {
        &self.open_command
    }

    /// Template run when hardware parameters are freed.
    pub fn close_command(&self) -> &str {
        &self.close_command
    }
}

fn copy_template(config: &dyn ConfigSource, key: &'static str) -> Result<Box<str>> {
    let value = match config.lookup(key) {
        ConfigLookup::Missing => return Err(HookError::ConfigMissingKey(key)),
        ConfigLookup::Other(kind) => {
            return Err(HookError::ConfigInvalidValue {
                key,
                reason: format!("expected a string, found {kind}"),
            });
        }
        ConfigLookup::String(value) => value,
    };
    if value.is_empty() {
        return Err(HookError::ConfigInvalidValue {
            key,
            reason: "command is empty".to_string(),
        });
    }
    let mut owned = String::new();
    owned
        .try_reserve_exact(value.len())
        .map_err(|_| HookError::OutOfMemory)?;
    owned.push_str(value);
    Ok(owned.into_boxed_str())
}

/// Where an installed hook is in the parameter lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    /// Installed, no parameters negotiated yet.
    Installed,
    /// The open command ran successfully for the current parameters.
    ParamsReady,
    /// The close command ran after parameters were released.
    ParamsFreed,
}

/// Registrations made during installation, removed again on drop unless
/// committed.
struct PendingRegistrations<'h, H: HookHost + ?Sized> {
    host: &'h mut H,
    ids: Vec<HookId>,
}

impl<'h, H: HookHost + ?Sized> PendingRegistrations<'h, H> {
    fn new(host: &'h mut H) -> Self {
        Self {
            host,
            ids: Vec::with_capacity(HookKind::ALL.len()),
        }
    }

    fn add(&mut self, kind: HookKind) -> Result<()> {
        let id = self
            .host
            .add_hook(kind)
            .map_err(HookError::HostRegistration)?;
        self.ids.push(id);
        Ok(())
    }

    fn commit(mut self) -> Vec<HookId> {
        std::mem::take(&mut self.ids)
    }
}

impl<H: HookHost + ?Sized> Drop for PendingRegistrations<'_, H> {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            #[cfg(feature = "tracing")]
            tracing::debug!(%id, "rolling back hook registration");
            self.host.remove_hook(id);
        }
    }
}

/// An installed hardware-parameter hook.
///
/// Owns the [`HookState`] for its whole lifetime. Dropping the hook, or
/// calling [`ParamsHook::on_close`], releases it exactly once. Teardown takes
/// the hook by value, so no event can reach it afterwards.
#[derive(Debug)]
pub struct ParamsHook<R: CommandRunner, S: ParameterSource> {
    state: HookState,
    runner: R,
    source: S,
    registrations: Vec<HookId>,
    phase: HookPhase,
}

impl<R: CommandRunner, S: ParameterSource> ParamsHook<R, S> {
    /// Install the hook on the stream represented by `host`.
    ///
    /// Reads `opencmd` and `closecmd`, registers the hw-params, hw-free and
    /// close handlers, then runs the close command once so that a device left
    /// open by a previous session is closed before this session opens it.
    ///
    /// A priming run that exits with a positive status is tolerated. A
    /// negative status (the command could not run) fails installation: every
    /// registration is removed and the templates are released before the
    /// error is returned.
    pub fn install<H>(host: &mut H, config: &dyn ConfigSource, runner: R, source: S) -> Result<Self>
    where
        H: HookHost + ?Sized,
    {
        let state = HookState::from_config(config)?;

        let mut pending = PendingRegistrations::new(host);
        for kind in HookKind::ALL {
            pending.add(kind)?;
        }

        let status = runner.run(&render_close_command(state.close_command()));
        if status < 0 {
            #[cfg(feature = "tracing")]
            tracing::warn!(status, "priming close command failed, rolling back install");
            return Err(HookError::CommandExecutionFailed(status));
        }
        #[cfg(feature = "tracing")]
        if status > 0 {
            tracing::debug!(status, "priming close command exited non-zero, treating device as closed");
        }

        let registrations = pending.commit();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            opencmd = state.open_command(),
            closecmd = state.close_command(),
            "hw_params hook installed"
        );
        Ok(Self {
            state,
            runner,
            source,
            registrations,
            phase: HookPhase::Installed,
        })
    }

    /// Handle the params-ready event.
    ///
    /// Resolves the stream's device, reads and parses its parameters, and
    /// runs the open command with them. Nothing parsed outlives the call.
    pub fn on_params_ready(&mut self, stream: Option<&dyn PcmStream>) -> Result<()> {
        let device = DeviceIdentity::resolve(stream)?;
        let params = self.discover(&device)?;
        #[cfg(feature = "tracing")]
        if !params.is_complete() {
            tracing::warn!(%device, %params, "incomplete hardware parameters");
        }
        let line = render_open_command(self.state.open_command(), &params);
        self.dispatch(&line)?;
        self.phase = HookPhase::ParamsReady;
        Ok(())
    }

    /// Handle the params-freed event by running the close command verbatim.
    pub fn on_params_freed(&mut self) -> Result<()> {
        let line = render_close_command(self.state.close_command());
        self.dispatch(&line)?;
        self.phase = HookPhase::ParamsFreed;
        Ok(())
    }

    /// Handle teardown, releasing the hook state.
    pub fn on_close(self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(registrations = self.registrations.len(), "hw_params hook closed");
        drop(self);
    }

    /// Read the current parameters of `device` from the parameter source.
    pub fn discover(&self, device: &DeviceIdentity) -> Result<HardwareParameters> {
        let lines = self.source.read_lines(device)?;
        Ok(HardwareParameters::parse(&lines))
    }

    fn dispatch(&self, line: &str) -> Result<()> {
        #[cfg(feature = "tracing")]
        tracing::debug!(command = line.trim_end(), "dispatching command");
        match translate_status(self.runner.run(line)) {
            0 => Ok(()),
            code => Err(HookError::CommandExecutionFailed(code)),
        }
    }

    /// Templates held by this hook.
    pub fn state(&self) -> &HookState {
        &self.state
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> HookPhase {
        self.phase
    }

    /// Host registrations made at install, in registration order.
    pub fn registrations(&self) -> &[HookId] {
        &self.registrations
    }

    /// The injected command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }
}
