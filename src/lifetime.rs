//! Service lifetime definitions.

/// Service lifetimes controlling instance caching behavior
///
/// Defines how service instances are created, cached, and shared by the
/// container. The lifetime is fixed at registration time and drives the
/// resolver's cache check and cache write: singletons consult and fill
/// their descriptor's cache cell, transients never touch it.
///
/// # Examples
///
/// ```rust
/// use cobalt_di::{ServiceCollection, key_of};
/// use std::sync::Arc;
///
/// struct Config { url: String }
/// struct Session { config: Arc<Config> }
///
/// let mut services = ServiceCollection::new();
///
/// // Singleton: one instance for the life of the provider
/// services.add_singleton(Config {
///     url: "postgres://localhost".to_string(),
/// }).unwrap();
///
/// // Transient: new instance every resolution
/// services.add_transient_factory::<Session, _>(&[key_of::<Config>()], |deps| {
///     Session { config: deps.get_required::<Config>(0) }
/// }).unwrap();
///
/// let provider = services.build();
///
/// let c1 = provider.get_required::<Config>();
/// let c2 = provider.get_required::<Config>();
/// assert!(Arc::ptr_eq(&c1, &c2)); // Same instance
///
/// let s1 = provider.get_required::<Session>();
/// let s2 = provider.get_required::<Session>();
/// assert!(!Arc::ptr_eq(&s1, &s2)); // Always different
/// assert!(Arc::ptr_eq(&s1.config, &s2.config)); // Shared singleton inside
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Single instance per provider, cached forever
    ///
    /// Singleton services are created once when first requested and then
    /// cached in their descriptor. The same instance is shared by every
    /// later resolution, including resolutions reached transitively from
    /// other services' dependency lists.
    Singleton,
    /// New instance per resolution, never cached
    ///
    /// Transient services create a fresh instance every time they're
    /// requested. A transient descriptor carries no cache slot at all, so
    /// a stale instance can never leak into a later resolution.
    Transient,
}
