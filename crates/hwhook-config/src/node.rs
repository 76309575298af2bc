//! Configuration tree handed to the hook at install time.
//!
//! [`ConfigNode`] mirrors the shape of an ALSA configuration node: a leaf
//! holding a string, number or boolean, or a compound holding named
//! children. Compounds can be searched with dotted paths, as
//! `snd_config_search` does.

use std::collections::BTreeMap;

use hwhook_core::{ConfigLookup, ConfigSource};
use serde::{Deserialize, Serialize};

/// A node in a hook configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigNode {
    /// String leaf.
    String(String),
    /// Integer leaf.
    Integer(i64),
    /// Floating point leaf.
    Real(f64),
    /// Boolean leaf.
    Boolean(bool),
    /// Named children.
    Compound(BTreeMap<String, ConfigNode>),
}

impl Default for ConfigNode {
    fn default() -> Self {
        ConfigNode::Compound(BTreeMap::new())
    }
}

impl ConfigNode {
    /// Empty compound.
    pub fn compound() -> Self {
        Self::default()
    }

    /// Add or replace a child, turning a leaf into a compound.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigNode>) -> Self {
        self.set(key, value);
        self
    }

    /// Add or replace a direct child. A leaf is replaced by a compound first.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigNode>) {
        if !matches!(self, ConfigNode::Compound(_)) {
            *self = ConfigNode::compound();
        }
        if let ConfigNode::Compound(children) = self {
            children.insert(key.into(), value.into());
        }
    }

    /// Find a descendant by dotted path, e.g. `hooks.0.type`.
    pub fn search(&self, path: &str) -> Option<&ConfigNode> {
        path.split('.').try_fold(self, |node, key| match node {
            ConfigNode::Compound(children) => children.get(key),
            _ => None,
        })
    }

    /// String value of this node, if it is a string leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigNode::String(value) => Some(value),
            _ => None,
        }
    }

    /// Type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigNode::String(_) => "string",
            ConfigNode::Integer(_) => "integer",
            ConfigNode::Real(_) => "real",
            ConfigNode::Boolean(_) => "boolean",
            ConfigNode::Compound(_) => "compound",
        }
    }
}

impl From<&str> for ConfigNode {
    fn from(value: &str) -> Self {
        ConfigNode::String(value.to_string())
    }
}

impl From<String> for ConfigNode {
    fn from(value: String) -> Self {
        ConfigNode::String(value)
    }
}

impl From<i64> for ConfigNode {
    fn from(value: i64) -> Self {
        ConfigNode::Integer(value)
    }
}

impl From<bool> for ConfigNode {
    fn from(value: bool) -> Self {
        ConfigNode::Boolean(value)
    }
}

impl ConfigSource for ConfigNode {
    fn is_compound(&self) -> bool {
        matches!(self, ConfigNode::Compound(_))
    }

    fn lookup(&self, key: &str) -> ConfigLookup<'_> {
        match self.search(key) {
            None => ConfigLookup::Missing,
            Some(ConfigNode::String(value)) => ConfigLookup::String(value),
            Some(other) => ConfigLookup::Other(other.type_name()),
        }
    }
}
