//! Hook host seam.
//!
//! The host owns the stream, decides when events fire, and keeps the list of
//! registered hooks. The hook only needs to add and remove registrations.

use std::fmt;

/// Lifecycle point a hook can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Hardware parameters have been fixed.
    HwParams,
    /// Hardware parameters are being released.
    HwFree,
    /// The stream is being closed.
    Close,
}

impl HookKind {
    /// The kinds the parameter hook registers, in registration order.
    pub const ALL: [HookKind; 3] = [HookKind::HwParams, HookKind::HwFree, HookKind::Close];

    /// Short name, as used in host configuration.
    pub fn name(self) -> &'static str {
        match self {
            HookKind::HwParams => "hw_params",
            HookKind::HwFree => "hw_free",
            HookKind::Close => "close",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle for one registration, issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(pub u32);

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Registration interface of the audio framework hosting the hook.
pub trait HookHost {
    /// Register interest in `kind`. Fails with the host's negative error code.
    fn add_hook(&mut self, kind: HookKind) -> Result<HookId, i32>;

    /// Drop a registration previously returned by [`HookHost::add_hook`].
    fn remove_hook(&mut self, id: HookId);
}

impl<T: HookHost + ?Sized> HookHost for &mut T {
    fn add_hook(&mut self, kind: HookKind) -> Result<HookId, i32> {
        (**self).add_hook(kind)
    }

    fn remove_hook(&mut self, id: HookId) {
        (**self).remove_hook(id);
    }
}
