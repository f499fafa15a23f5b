//! Configuration for field mutation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::path::FieldAddress;

/// Options for building and applying mutations.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `merge-fuzzing`, `truncate-at`).
/// This naming convention is part of the public API contract for config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MutationOptions {
    /// Derive the mutation shape from the existing value and apply the
    /// strategy payload through it instead of processing the value directly.
    pub merge_fuzzing: bool,
    /// Keep the generated base value at a constant length when splicing in
    /// fillers. Enumerated fields ignore this and always insert.
    pub maintain_size: bool,
    /// Approximate size, in characters, of marked large strings.
    pub large_string_size: usize,
    /// Number of payload characters kept in human-readable renderings.
    pub truncate_at: usize,
}

impl Default for MutationOptions {
    fn default() -> Self {
        Self {
            merge_fuzzing: false,
            maintain_size: true,
            large_string_size: 20_000,
            truncate_at: 30,
        }
    }
}

/// Immutable snapshot of field names used as type discriminators.
///
/// Callers build one per run and hand it to whatever decides which fields to
/// mutate; nothing in this crate keeps discriminators in global state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscriminatorSet(BTreeSet<String>);

impl DiscriminatorSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the addressed field's own property name is a discriminator.
    pub fn contains_field(&self, address: &FieldAddress) -> bool {
        address
            .property_name()
            .is_some_and(|name| self.0.contains(name))
    }
}
