//! Configuration seam for hook installation.
//!
//! The hook reads two string keys, `opencmd` and `closecmd`, from a
//! compound configuration value. [`ConfigSource`] abstracts over whatever
//! tree the host parsed its configuration into.

use std::collections::{BTreeMap, HashMap};

/// Key holding the command run when hardware parameters are ready.
pub const OPEN_COMMAND_KEY: &str = "opencmd";

/// Key holding the command run when hardware parameters are freed.
pub const CLOSE_COMMAND_KEY: &str = "closecmd";

/// Result of looking up one key in a configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLookup<'a> {
    /// The key is absent.
    Missing,
    /// The key holds a string.
    String(&'a str),
    /// The key holds a value of another type, named for diagnostics.
    Other(&'static str),
}

/// Structured key/value configuration handed to the hook at install time.
pub trait ConfigSource {
    /// `true` when this value is a compound (a table of keys).
    fn is_compound(&self) -> bool;

    /// Look up a direct child of this compound.
    fn lookup(&self, key: &str) -> ConfigLookup<'_>;
}

impl<T: ConfigSource + ?Sized> ConfigSource for &T {
    fn is_compound(&self) -> bool {
        (**self).is_compound()
    }

    fn lookup(&self, key: &str) -> ConfigLookup<'_> {
        (**self).lookup(key)
    }
}

impl ConfigSource for BTreeMap<String, String> {
    fn is_compound(&self) -> bool {
        true
    }

    fn lookup(&self, key: &str) -> ConfigLookup<'_> {
        self.get(key)
            .map_or(ConfigLookup::Missing, |v| ConfigLookup::String(v.as_str()))
    }
}

impl<S: std::hash::BuildHasher> ConfigSource for HashMap<String, String, S> {
    fn is_compound(&self) -> bool {
        true
    }

    fn lookup(&self, key: &str) -> ConfigLookup<'_> {
        self.get(key)
            .map_or(ConfigLookup::Missing, |v| ConfigLookup::String(v.as_str()))
    }
}
