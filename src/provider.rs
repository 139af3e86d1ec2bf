//! Service provider: the resolving side of the container.
//!
//! A [`ServiceProvider`] is built from a
//! [`ServiceCollection`](crate::ServiceCollection) and walks the
//! dependency graph depth-first: look up the descriptor, consult the
//! singleton cache, ask the constructor source for the declared
//! dependency list, resolve each dependency recursively, invoke the
//! factory, and cache the result according to lifetime.

use std::sync::Arc;

use crate::binding::{AnyArc, ConstructorSource, ResolvedArgs};
use crate::descriptors::ServiceDescriptor;
use crate::error::{DiError, DiResult};
use crate::internal::ResolutionStack;
use crate::key::{key_of, Key};
use crate::registry::Registry;

/// Resolver over a built registry.
///
/// Cheap to clone (`Arc` inner) and `Send + Sync`. Singleton services
/// are cached in their descriptor's cell with an atomic first-write:
/// at most one instance is ever constructed per singleton identity,
/// even when several threads race the first resolution.
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
/// let mut collection = ServiceCollection::new();
/// collection.add_singleton(Database { url: "postgres://localhost".to_string() }).unwrap();
/// collection.add_transient_factory::<UserService, _>(&[key_of::<Database>()], |deps| {
///     UserService { db: deps.get_required::<Database>(0) }
/// }).unwrap();
///
/// let provider = collection.build();
/// let user_service = provider.get_required::<UserService>();
/// assert_eq!(user_service.db.url, "postgres://localhost");
/// ```
pub struct ServiceProvider {
    inner: Arc<ProviderInner>,
}

struct ProviderInner {
    registry: Registry,
    source: Arc<dyn ConstructorSource>,
}

impl ServiceProvider {
    pub(crate) fn new(registry: Registry, source: Arc<dyn ConstructorSource>) -> Self {
        Self {
            inner: Arc::new(ProviderInner { registry, source }),
        }
    }

    /// Resolves a concrete service type.
    ///
    /// Runs the full recursive resolution for `T` and returns the
    /// instance wrapped in an `Arc`. For singletons every call returns
    /// a clone of the same `Arc`; for transients each call constructs a
    /// fresh instance.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cobalt_di::ServiceCollection;
    ///
    /// let mut collection = ServiceCollection::new();
    /// collection.add_singleton("configuration".to_string()).unwrap();
    ///
    /// let provider = collection.build();
    /// let config = provider.get::<String>().unwrap();
    /// assert_eq!(&*config, "configuration");
    /// ```
    pub fn get<T: 'static + Send + Sync>(&self) -> DiResult<Arc<T>> {
        let key = key_of::<T>();
        let any = self.resolve(&key)?;
        any.downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// Resolves a concrete service type, panicking on failure.
    ///
    /// Convenience for callers certain the graph is well-formed and who
    /// want to fail fast on configuration errors.
    ///
    /// # Panics
    ///
    /// Panics if the service cannot be resolved (not found, ambiguous
    /// constructor, circular dependency, factory failure).
    pub fn get_required<T: 'static + Send + Sync>(&self) -> Arc<T> {
        self.get::<T>()
            .unwrap_or_else(|e| panic!("Failed to resolve {}: {:?}", std::any::type_name::<T>(), e))
    }

    /// Resolves by key, type-erased.
    ///
    /// The dynamic entry point behind [`get`](Self::get); useful when
    /// the requested identity is only known at runtime.
    pub fn resolve(&self, key: &Key) -> DiResult<Arc<dyn std::any::Any + Send + Sync>> {
        let mut stack = ResolutionStack::new();
        self.resolve_key(key, &mut stack)
    }

    /// Looks up the descriptor registered under `key`.
    pub fn descriptor(&self, key: &Key) -> DiResult<&ServiceDescriptor> {
        self.inner
            .registry
            .get(key)
            .ok_or(DiError::NotFound(key.display_name()))
    }

    /// All registered descriptors, for diagnostics and validation.
    pub fn descriptors(&self) -> Vec<&ServiceDescriptor> {
        self.inner.registry.iter().collect()
    }

    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Service Provider Debug ===\n");
        for d in self.inner.registry.iter() {
            s.push_str(&format!(
                "  {}: {:?} (built: {})\n",
                d.type_name(),
                d.lifetime(),
                d.is_built()
            ));
        }
        s
    }

    fn resolve_key(&self, key: &Key, stack: &mut ResolutionStack) -> DiResult<AnyArc> {
        let descriptor = self
            .inner
            .registry
            .get(key)
            .ok_or(DiError::NotFound(key.display_name()))?;

        match descriptor.cell() {
            // Singleton: consult the cache, construct at most once.
            Some(cell) => {
                // Fast path: already built
                if let Some(built) = cell.get() {
                    return Ok(built.clone());
                }

                // The cycle check must run before entering the cell's
                // initialization: a cycle reaching this identity again on
                // the same stack would otherwise re-enter get_or_try_init
                // and deadlock instead of reporting the path.
                stack.enter(key)?;
                let result = cell
                    .get_or_try_init(|| self.construct(descriptor, stack))
                    .map(|built| built.clone());
                stack.leave(key);
                result
            }
            // Transient: no cache read, no cache write.
            None => {
                stack.enter(key)?;
                let result = self.construct(descriptor, stack);
                stack.leave(key);
                result
            }
        }
    }

    fn construct(
        &self,
        descriptor: &ServiceDescriptor,
        stack: &mut ResolutionStack,
    ) -> DiResult<AnyArc> {
        let constructor = self.inner.source.constructor(descriptor.key())?;
        let deps = constructor.dependencies();

        // Declaration order; a failure anywhere discards the partial list.
        let mut resolved = Vec::with_capacity(deps.len());
        for dep in deps {
            resolved.push(self.resolve_key(dep, stack)?);
        }

        let args = ResolvedArgs::new(deps, &resolved);
        constructor
            .invoke(&args)
            .map_err(|source| DiError::Instantiation {
                service: descriptor.type_name(),
                source: Arc::from(source),
            })
    }
}

impl Clone for ServiceProvider {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
