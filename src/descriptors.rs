//! Service descriptors: the registry's per-identity records.

use once_cell::sync::OnceCell;

use crate::binding::AnyArc;
use crate::key::Key;
use crate::lifetime::Lifetime;

/// The registry's record for one registered identity.
///
/// Holds the key, the lifetime, and (for singletons only) the cache
/// cell the resolver fills on first construction. A transient descriptor
/// carries no cell at all, so the "never consult or write the cache for a
/// transient" rule is enforced by construction rather than by a lifetime
/// check scattered through the resolver.
///
/// Descriptors are owned by the registry for its entire lifetime. The
/// resolver only reads them and, for a singleton's first resolution,
/// fills the cell; `Built` is terminal, there is no invalidation.
///
/// # Examples
///
/// ```rust
/// use cobalt_di::{ServiceCollection, Lifetime, key_of};
///
/// struct Cache;
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton(Cache).unwrap();
///
/// let descriptor = services.descriptor(&key_of::<Cache>()).unwrap();
/// assert_eq!(descriptor.lifetime(), Lifetime::Singleton);
/// assert!(!descriptor.is_built()); // nothing resolved yet
/// ```
pub struct ServiceDescriptor {
    key: Key,
    lifetime: Lifetime,
    // Some iff lifetime == Singleton
    cell: Option<OnceCell<AnyArc>>,
}

impl ServiceDescriptor {
    pub(crate) fn new(key: Key, lifetime: Lifetime) -> Self {
        let cell = match lifetime {
            Lifetime::Singleton => Some(OnceCell::new()),
            Lifetime::Transient => None,
        };
        Self { key, lifetime, cell }
    }

    /// The identity this descriptor was registered under.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Get the type name
    ///
    /// Returns the human-readable type name for this service. This is
    /// the result of `std::any::type_name`.
    pub fn type_name(&self) -> &'static str {
        self.key.display_name()
    }

    /// Service lifetime
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Whether the singleton instance has been constructed and cached.
    ///
    /// Always `false` for transient descriptors: they have no cache to
    /// fill, and a transient resolution never transitions any state.
    pub fn is_built(&self) -> bool {
        self.cell.as_ref().map_or(false, |c| c.get().is_some())
    }

    /// The singleton cache cell, `None` for transients.
    pub(crate) fn cell(&self) -> Option<&OnceCell<AnyArc>> {
        self.cell.as_ref()
    }
}

impl std::fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("key", &self.key)
            .field("lifetime", &self.lifetime)
            .field("is_built", &self.is_built())
            .finish()
    }
}
