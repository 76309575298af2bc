//! In-process stand-ins for the audio framework.
//!
//! [`SimulatedHost`] keeps the registration list a real host would keep and
//! can be told to refuse a registration. [`FixedStream`] answers the
//! identity query with a fixed device or a fixed error code.

use hwhook_core::{DeviceIdentity, HookHost, HookId, HookKind, PcmInfo, PcmStream};

/// One registration held by a [`SimulatedHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    /// Handle issued to the hook.
    pub id: HookId,
    /// Lifecycle point registered for.
    pub kind: HookKind,
}

/// Hook host recording every registration and removal.
#[derive(Debug, Default)]
pub struct SimulatedHost {
    next_id: u32,
    active: Vec<Registration>,
    removed: Vec<HookId>,
    refuse: Option<(HookKind, i32)>,
}

impl SimulatedHost {
    /// Create a host with no registrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse registrations for `kind` with `code`.
    pub fn refusing(mut self, kind: HookKind, code: i32) -> Self {
        self.refuse = Some((kind, code));
        self
    }

    /// Registrations currently held.
    pub fn active(&self) -> &[Registration] {
        &self.active
    }

    /// Handles removed so far, in removal order.
    pub fn removed(&self) -> &[HookId] {
        &self.removed
    }

    /// `true` when a handler is registered for `kind`.
    pub fn is_registered(&self, kind: HookKind) -> bool {
        self.active.iter().any(|r| r.kind == kind)
    }

    /// Drop every registration, as the host does when the stream closes.
    pub fn release_all(&mut self) {
        for registration in std::mem::take(&mut self.active) {
            self.removed.push(registration.id);
        }
    }
}

impl HookHost for SimulatedHost {
    fn add_hook(&mut self, kind: HookKind) -> Result<HookId, i32> {
        if let Some((refused, code)) = self.refuse
            && refused == kind
        {
            tracing::debug!(%kind, code, "refusing hook registration");
            return Err(code);
        }
        self.next_id += 1;
        let id = HookId(self.next_id);
        self.active.push(Registration { id, kind });
        tracing::debug!(%kind, %id, "hook registered");
        Ok(id)
    }

    fn remove_hook(&mut self, id: HookId) {
        self.active.retain(|r| r.id != id);
        self.removed.push(id);
        tracing::debug!(%id, "hook removed");
    }
}

/// Stream handle with a fixed identity query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStream {
    info: Result<PcmInfo, i32>,
}

impl FixedStream {
    /// Stream on `device`.
    pub fn device(device: DeviceIdentity) -> Self {
        Self {
            info: Ok(PcmInfo {
                card: device.card,
                device: device.device,
                subdevice: device.subdevice,
            }),
        }
    }

    /// Stream whose identity query fails with `code`.
    pub fn failing(code: i32) -> Self {
        Self { info: Err(code) }
    }
}

impl PcmStream for FixedStream {
    fn info(&self) -> Result<PcmInfo, i32> {
        self.info
    }
}
