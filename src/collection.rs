//! Service collection: the registration phase of the container.
//!
//! A [`ServiceCollection`] is a caller-owned value: created empty,
//! populated with registrations, then consumed by [`build`] to produce
//! the resolving side. There is no ambient global collection.
//!
//! [`build`]: ServiceCollection::build

use std::sync::Arc;

use crate::binding::{BindingTable, Constructor, ConstructorSource, ResolvedArgs};
use crate::descriptors::ServiceDescriptor;
use crate::error::{DiError, DiResult, FactoryError};
use crate::key::{key_of, Key};
use crate::lifetime::Lifetime;
use crate::provider::ServiceProvider;
use crate::registry::Registry;

/// Registration-phase container: a registry of descriptors plus the
/// constructor bindings that tell the resolver how to build each one.
///
/// Registration is fail-fast: registering the same identity twice is
/// [`DiError::Duplicate`]. Use the `try_add_*` variants for
/// register-if-absent semantics.
///
/// # Examples
///
/// ```rust
/// use cobalt_di::{ServiceCollection, key_of};
/// use std::sync::Arc;
///
/// struct Database { url: String }
/// struct UserService { db: Arc<Database> }
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton(Database {
///     url: "postgres://localhost".to_string(),
/// }).unwrap();
/// services.add_transient_factory::<UserService, _>(&[key_of::<Database>()], |deps| {
///     UserService { db: deps.get_required::<Database>(0) }
/// }).unwrap();
///
/// let provider = services.build();
/// let user_service = provider.get_required::<UserService>();
/// assert_eq!(user_service.db.url, "postgres://localhost");
/// ```
pub struct ServiceCollection {
    registry: Registry,
    bindings: BindingTable,
}

impl ServiceCollection {
    /// Creates a new empty service collection.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            bindings: BindingTable::new(),
        }
    }

    // ----- Primitive Operations -----

    /// Registers an identity with a lifetime, without a constructor.
    ///
    /// This is the registry half only; the service still needs exactly
    /// one constructor declared via [`bind`](Self::bind) (or supplied by
    /// a custom [`ConstructorSource`] at build time) before it can
    /// resolve. Resolving a registered identity with no binding fails
    /// with [`DiError::AmbiguousConstructor`].
    pub fn register<T: 'static + Send + Sync>(&mut self, lifetime: Lifetime) -> DiResult<&mut Self> {
        self.registry
            .insert(ServiceDescriptor::new(key_of::<T>(), lifetime))?;
        Ok(self)
    }

    /// Declares the constructor for `T`.
    ///
    /// Bindings are append-only; declaring a second constructor for the
    /// same identity makes its resolution ambiguous.
    pub fn bind<T: 'static + Send + Sync>(&mut self, constructor: Constructor) -> &mut Self {
        self.bindings.bind(key_of::<T>(), constructor);
        self
    }

    // ----- Concrete Type Registrations -----

    /// Registers a singleton instance shared across every resolution.
    ///
    /// The instance is wrapped in an `Arc` immediately; all requests for
    /// this service type return clones of the same `Arc`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cobalt_di::ServiceCollection;
    /// struct Config {
    ///     database_url: String,
    /// }
    ///
    /// let mut services = ServiceCollection::new();
    /// services.add_singleton(Config {
    ///     database_url: "postgres://localhost".to_string(),
    /// }).unwrap();
    /// ```
    pub fn add_singleton<T: 'static + Send + Sync>(&mut self, value: T) -> DiResult<&mut Self> {
        self.register::<T>(Lifetime::Singleton)?;
        Ok(self.bind::<T>(Constructor::from_instance(value)))
    }

    /// Registers a singleton built on first request.
    ///
    /// `deps` is the ordered list of dependency identities; the resolver
    /// resolves each before invoking `factory` with the results. The
    /// factory runs at most once; the instance is cached and shared.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cobalt_di::{ServiceCollection, key_of};
    /// # use std::sync::Arc;
    /// struct Database { url: String }
    /// struct UserService { db: Arc<Database> }
    ///
    /// let mut services = ServiceCollection::new();
    /// services.add_singleton(Database { url: "postgres://localhost".to_string() }).unwrap();
    /// services.add_singleton_factory::<UserService, _>(&[key_of::<Database>()], |deps| {
    ///     UserService { db: deps.get_required::<Database>(0) }
    /// }).unwrap();
    /// ```
    pub fn add_singleton_factory<T, F>(&mut self, deps: &[Key], factory: F) -> DiResult<&mut Self>
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolvedArgs<'_>) -> T + Send + Sync + 'static,
    {
        self.register::<T>(Lifetime::Singleton)?;
        Ok(self.bind::<T>(Constructor::new(deps, factory)))
    }

    /// Registers a transient built fresh on every request.
    ///
    /// No caching is performed; the factory runs on each resolution,
    /// after its declared dependencies have been resolved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cobalt_di::{ServiceCollection, key_of};
    /// # use std::sync::Arc;
    /// struct Counter { start: u32 }
    ///
    /// let mut services = ServiceCollection::new();
    /// services.add_transient_factory::<Counter, _>(&[], |_| Counter { start: 0 }).unwrap();
    /// ```
    pub fn add_transient_factory<T, F>(&mut self, deps: &[Key], factory: F) -> DiResult<&mut Self>
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolvedArgs<'_>) -> T + Send + Sync + 'static,
    {
        self.register::<T>(Lifetime::Transient)?;
        Ok(self.bind::<T>(Constructor::new(deps, factory)))
    }

    // ----- Fallible Factories -----

    /// Registers a singleton with a factory that can fail.
    ///
    /// A factory error is surfaced as [`DiError::Instantiation`] with the
    /// cause preserved; the descriptor stays unbuilt and a later
    /// resolution retries the factory.
    pub fn add_singleton_try_factory<T, F>(&mut self, deps: &[Key], factory: F) -> DiResult<&mut Self>
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolvedArgs<'_>) -> Result<T, FactoryError> + Send + Sync + 'static,
    {
        self.register::<T>(Lifetime::Singleton)?;
        Ok(self.bind::<T>(Constructor::try_new(deps, factory)))
    }

    /// Registers a transient with a factory that can fail.
    pub fn add_transient_try_factory<T, F>(&mut self, deps: &[Key], factory: F) -> DiResult<&mut Self>
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolvedArgs<'_>) -> Result<T, FactoryError> + Send + Sync + 'static,
    {
        self.register::<T>(Lifetime::Transient)?;
        Ok(self.bind::<T>(Constructor::try_new(deps, factory)))
    }

    // ----- Conditional Registration (TryAdd*) -----

    /// Registers a singleton instance if not already registered.
    ///
    /// Returns `true` if the service was registered, `false` if the
    /// identity was already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cobalt_di::ServiceCollection;
    ///
    /// let mut services = ServiceCollection::new();
    ///
    /// assert!(services.try_add_singleton(42usize));
    /// assert!(!services.try_add_singleton(100usize)); // already registered
    /// ```
    pub fn try_add_singleton<T: 'static + Send + Sync>(&mut self, value: T) -> bool {
        if self.contains::<T>() {
            false
        } else {
            self.add_singleton(value).is_ok()
        }
    }

    /// Registers a singleton factory if not already registered.
    pub fn try_add_singleton_factory<T, F>(&mut self, deps: &[Key], factory: F) -> bool
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolvedArgs<'_>) -> T + Send + Sync + 'static,
    {
        if self.contains::<T>() {
            false
        } else {
            self.add_singleton_factory::<T, F>(deps, factory).is_ok()
        }
    }

    /// Registers a transient factory if not already registered.
    pub fn try_add_transient_factory<T, F>(&mut self, deps: &[Key], factory: F) -> bool
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolvedArgs<'_>) -> T + Send + Sync + 'static,
    {
        if self.contains::<T>() {
            false
        } else {
            self.add_transient_factory::<T, F>(deps, factory).is_ok()
        }
    }

    // ----- Lookup and Introspection -----

    /// Whether `T` is registered.
    pub fn contains<T: 'static>(&self) -> bool {
        self.registry.contains_key(&key_of::<T>())
    }

    /// Looks up the descriptor registered under `key`.
    pub fn descriptor(&self, key: &Key) -> DiResult<&ServiceDescriptor> {
        self.registry
            .get(key)
            .ok_or(DiError::NotFound(key.display_name()))
    }

    /// All registered descriptors, for diagnostics and validation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cobalt_di::{ServiceCollection, Lifetime};
    ///
    /// struct Config;
    /// struct Job;
    ///
    /// let mut services = ServiceCollection::new();
    /// services.add_singleton(Config).unwrap();
    /// services.add_transient_factory::<Job, _>(&[], |_| Job).unwrap();
    ///
    /// let descriptors = services.descriptors();
    /// assert_eq!(descriptors.len(), 2);
    /// let singletons = descriptors.iter()
    ///     .filter(|d| d.lifetime() == Lifetime::Singleton)
    ///     .count();
    /// assert_eq!(singletons, 1);
    /// ```
    pub fn descriptors(&self) -> Vec<&ServiceDescriptor> {
        self.registry.iter().collect()
    }

    /// Number of registered services.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    // ----- Building -----

    /// Consumes the collection and builds a [`ServiceProvider`] over the
    /// bindings declared here.
    pub fn build(mut self) -> ServiceProvider {
        self.registry.finalize();
        ServiceProvider::new(self.registry, Arc::new(self.bindings))
    }

    /// Builds a provider over a custom [`ConstructorSource`].
    ///
    /// For embedding environments with their own constructor discovery
    /// (codegen, a plugin manifest). Bindings declared on this collection
    /// are ignored; `source` alone answers constructor lookups.
    pub fn build_with_source<S>(mut self, source: S) -> ServiceProvider
    where
        S: ConstructorSource + 'static,
    {
        self.registry.finalize();
        ServiceProvider::new(self.registry, Arc::new(source))
    }
}

impl Default for ServiceCollection {
    fn default() -> Self {
        Self::new()
    }
}
