//! procfs-backed parameter source.
//!
//! The kernel publishes the negotiated parameters of every open substream at
//! `/proc/asound/card<N>/pcm<D>p/sub<S>/hw_params`. A closed substream reads
//! `closed`.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use hwhook_core::{DeviceIdentity, HardwareParameters, HookError, ParameterSource};

use crate::{Error, Result};

/// Default procfs root for sound cards.
pub const DEFAULT_PROC_ROOT: &str = "/proc/asound";

/// Parameter source reading `hw_params` files below a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcfsSource {
    root: PathBuf,
}

impl ProcfsSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of this source.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the `hw_params` record for `device`.
    pub fn path_for(&self, device: &DeviceIdentity) -> PathBuf {
        self.root.join(device.hw_params_location())
    }

    /// Read and parse the current parameters of `device`.
    pub fn read_params(&self, device: &DeviceIdentity) -> Result<HardwareParameters> {
        let lines = self.read_lines(device)?;
        Ok(HardwareParameters::parse(&lines))
    }

    /// Enumerate playback substreams present under the root, sorted.
    ///
    /// Entries that do not follow the `card<N>/pcm<D>p/sub<S>` naming are
    /// skipped.
    pub fn list_playback_substreams(&self) -> Result<Vec<DeviceIdentity>> {
        let mut found = Vec::new();
        for (card, card_dir) in numbered_dirs::<u16>(&self.root, "card", "")? {
            for (device, pcm_dir) in numbered_dirs::<u32>(&card_dir, "pcm", "p")? {
                for (subdevice, _) in numbered_dirs::<u32>(&pcm_dir, "sub", "")? {
                    found.push(DeviceIdentity::new(card, device, subdevice));
                }
            }
        }
        found.sort();
        tracing::debug!(root = %self.root.display(), count = found.len(), "listed playback substreams");
        Ok(found)
    }
}

impl Default for ProcfsSource {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl ParameterSource for ProcfsSource {
    fn read_lines(&self, device: &DeviceIdentity) -> hwhook_core::Result<Vec<String>> {
        let path = self.path_for(device);
        let bytes = fs::read(&path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "hw_params unavailable");
            HookError::source_unavailable(path.display().to_string(), e)
        })?;
        // Undecodable bytes only spoil the line they sit on.
        Ok(String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect())
    }
}

/// Subdirectories of `dir` named `<prefix><number><suffix>`.
fn numbered_dirs<N: FromStr>(dir: &Path, prefix: &str, suffix: &str) -> Result<Vec<(N, PathBuf)>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(number) = name
            .to_str()
            .and_then(|name| name.strip_prefix(prefix))
            .and_then(|rest| rest.strip_suffix(suffix))
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<N>().ok())
        else {
            continue;
        };
        let path = entry.path();
        if path.is_dir() {
            dirs.push((number, path));
        }
    }
    Ok(dirs)
}
