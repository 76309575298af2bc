//! Device identity resolution and the parameter source seam.
//!
//! A stream handle is resolved to a [`DeviceIdentity`], which in turn names
//! the parameter description for the playback substream:
//! `card<card>/pcm<device>p/sub<subdevice>/hw_params`.

use std::fmt;

use crate::{HookError, Result};

/// Identity fields reported by a stream's info query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmInfo {
    /// Card number. Negative values are error codes.
    pub card: i32,
    /// Device number on the card.
    pub device: u32,
    /// Subdevice number on the device.
    pub subdevice: u32,
}

/// Live stream handle as seen by the hook.
///
/// Implemented by the host's stream object. The query returns the host's
/// negative error code on failure.
pub trait PcmStream {
    /// Query the card/device/subdevice triple of this stream.
    fn info(&self) -> std::result::Result<PcmInfo, i32>;
}

/// Stable identity of a playback substream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceIdentity {
    /// Card number, always non-negative.
    pub card: i32,
    /// Device number.
    pub device: u32,
    /// Subdevice number.
    pub subdevice: u32,
}

impl DeviceIdentity {
    /// Create an identity directly.
    ///
    /// Card numbers are bounded by `u16`, so the stored card is always
    /// non-negative.
    pub fn new(card: u16, device: u32, subdevice: u32) -> Self {
        Self {
            card: i32::from(card),
            device,
            subdevice,
        }
    }

    /// Resolve the identity of the stream behind `stream`.
    ///
    /// A missing handle is [`HookError::InvalidHandle`]. A failing query, or a
    /// negative card number, is [`HookError::DeviceQueryFailed`] carrying the
    /// code unchanged.
    pub fn resolve(stream: Option<&dyn PcmStream>) -> Result<Self> {
        let stream = stream.ok_or(HookError::InvalidHandle)?;
        let info = stream.info().map_err(HookError::DeviceQueryFailed)?;
        if info.card < 0 {
            return Err(HookError::DeviceQueryFailed(info.card));
        }
        Ok(Self {
            card: info.card,
            device: info.device,
            subdevice: info.subdevice,
        })
    }

    /// Location of this substream's parameter description, relative to the
    /// parameter source root.
    pub fn hw_params_location(&self) -> String {
        format!(
            "card{}/pcm{}p/sub{}/hw_params",
            self.card, self.device, self.subdevice
        )
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hw:{},{},{}", self.card, self.device, self.subdevice)
    }
}

/// Readable source of per-device parameter descriptions.
///
/// Production reads procfs; tests serve records from memory.
pub trait ParameterSource {
    /// Read the parameter record for `device` as text lines.
    ///
    /// Fails with [`HookError::ParameterSourceUnavailable`] when the record
    /// does not exist or cannot be read.
    fn read_lines(&self, device: &DeviceIdentity) -> Result<Vec<String>>;
}

impl<T: ParameterSource + ?Sized> ParameterSource for Box<T> {
    fn read_lines(&self, device: &DeviceIdentity) -> Result<Vec<String>> {
        (**self).read_lines(device)
    }
}

impl<T: ParameterSource + ?Sized> ParameterSource for &T {
    fn read_lines(&self, device: &DeviceIdentity) -> Result<Vec<String>> {
        (**self).read_lines(device)
    }
}
