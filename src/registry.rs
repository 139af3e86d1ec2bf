//! Service registry holding all registered descriptors.

use std::collections::HashMap;

use crate::descriptors::ServiceDescriptor;
use crate::error::{DiError, DiResult};
use crate::key::Key;

/// Identity-keyed descriptor storage.
///
/// Registration is fail-fast: inserting an identity that is already
/// present is an error, never a silent replace. Mutation stops once the
/// provider is built; after that the registry is only read.
pub(crate) struct Registry {
    /// Fast Vec lookup for the first N registrations (cache-friendly)
    one_small: Vec<(Key, ServiceDescriptor)>,
    /// HashMap fallback for remaining registrations
    one_large: HashMap<Key, ServiceDescriptor>,
    /// Threshold for Vec vs HashMap (Vec wins for small collections)
    small_threshold: usize,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            one_small: Vec::new(),
            one_large: HashMap::new(),
            small_threshold: 16,
        }
    }

    /// Inserts a descriptor, failing on duplicate identity.
    pub(crate) fn insert(&mut self, descriptor: ServiceDescriptor) -> DiResult<()> {
        let key = *descriptor.key();
        if self.contains_key(&key) {
            return Err(DiError::Duplicate(key.display_name()));
        }
        if self.one_small.len() < self.small_threshold {
            self.one_small.push((key, descriptor));
        } else {
            self.one_large.insert(key, descriptor);
        }
        Ok(())
    }

    /// Gets a descriptor with optimal lookup
    #[inline(always)]
    pub(crate) fn get(&self, key: &Key) -> Option<&ServiceDescriptor> {
        // Fast path: linear search through Vec
        for (k, descriptor) in &self.one_small {
            if k == key {
                return Some(descriptor);
            }
        }

        // Fallback: HashMap lookup
        self.one_large.get(key)
    }

    /// Checks if a key exists in the registry
    #[inline(always)]
    pub(crate) fn contains_key(&self, key: &Key) -> bool {
        self.one_small.iter().any(|(k, _)| k == key) || self.one_large.contains_key(key)
    }

    /// Iterator over all descriptors in storage order
    pub(crate) fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.one_small
            .iter()
            .map(|(_, d)| d)
            .chain(self.one_large.values())
    }

    pub(crate) fn len(&self) -> usize {
        self.one_small.len() + self.one_large.len()
    }

    /// Finalizes the registry before building a provider.
    ///
    /// Sorts the small Vec by key for lookup locality.
    pub(crate) fn finalize(&mut self) {
        self.one_small.sort_by(|a, b| a.0.cmp(&b.0));
    }
}
