use std::fmt;

use crate::secrets::{SecretKey, SecretsMap};

/// A single preprocessor definition, rendered as `-D<name>="<value>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFlag {
    name: String,
    value: String,
}

impl BuildFlag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for BuildFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-D{}=\"{}\"", self.name, self.value)
    }
}

/// The definitions for one firmware build: one per [`SecretKey`], always in
/// [`SecretKey::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFlagSet {
    flags: [BuildFlag; 4],
}

impl BuildFlagSet {
    pub fn from_secrets(secrets: &SecretsMap) -> Self {
        let flags = SecretKey::ALL.map(|key| BuildFlag::new(key.define_name(), secrets.value(key)));
        Self { flags }
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildFlag> {
        self.flags.iter()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The definition for `key`.
    pub fn get(&self, key: SecretKey) -> &BuildFlag {
        // Discriminants follow `SecretKey::ALL`.
        &self.flags[key as usize]
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.flags.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a BuildFlagSet {
    type Item = &'a BuildFlag;
    type IntoIter = std::slice::Iter<'a, BuildFlag>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.iter()
    }
}
