//! Constructor bindings: the introspection boundary of the container.
//!
//! The resolver never inspects service types itself. It asks a
//! [`ConstructorSource`] for the one constructor bound to an identity:
//! an ordered list of dependency keys plus a factory invoked with the
//! already-resolved arguments. [`BindingTable`] is the default source,
//! populated at registration time; an embedding environment with its own
//! notion of constructor discovery (codegen, a plugin manifest) can
//! implement the trait and build the provider against it.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{DiError, DiResult, FactoryError};
use crate::key::Key;

// Type-erased Arc for storage
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

type FactoryFn = Arc<dyn Fn(&ResolvedArgs<'_>) -> Result<AnyArc, FactoryError> + Send + Sync>;

/// The dependencies of one constructor invocation, already resolved.
///
/// Passed to factory functions in declaration order: index `i` holds the
/// instance for the `i`-th key of the constructor's dependency list.
/// Access is type-checked against the declared key, so a factory that
/// drifts out of sync with its declaration fails with
/// [`DiError::TypeMismatch`] instead of resolving the wrong service.
///
/// # Examples
///
/// ```rust
/// use cobalt_di::{ServiceCollection, key_of};
/// use std::sync::Arc;
///
/// struct Config { port: u16 }
/// struct Server { config: Arc<Config> }
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton(Config { port: 8080 }).unwrap();
/// services.add_singleton_factory::<Server, _>(&[key_of::<Config>()], |deps| {
///     Server { config: deps.get_required::<Config>(0) }
/// }).unwrap();
///
/// let provider = services.build();
/// assert_eq!(provider.get_required::<Server>().config.port, 8080);
/// ```
pub struct ResolvedArgs<'a> {
    keys: &'a [Key],
    values: &'a [AnyArc],
}

impl<'a> ResolvedArgs<'a> {
    pub(crate) fn new(keys: &'a [Key], values: &'a [AnyArc]) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        Self { keys, values }
    }

    /// Number of resolved dependencies.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for a dependency-free constructor.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolves the dependency at `index` as `T`.
    ///
    /// Fails with [`DiError::TypeMismatch`] if `index` is out of range or
    /// `T` is not the type declared at that position.
    pub fn get<T: 'static + Send + Sync>(&self, index: usize) -> DiResult<Arc<T>> {
        let declared = self
            .keys
            .get(index)
            .ok_or(DiError::TypeMismatch(std::any::type_name::<T>()))?;
        if *declared != Key::of::<T>() {
            return Err(DiError::TypeMismatch(std::any::type_name::<T>()));
        }
        self.values[index]
            .clone()
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// Resolves the dependency at `index` as `T`, panicking on mismatch.
    ///
    /// The panicking twin of [`get`](Self::get) for factories whose
    /// declaration and body are maintained together; a mismatch is a
    /// registration bug, not a runtime condition.
    pub fn get_required<T: 'static + Send + Sync>(&self, index: usize) -> Arc<T> {
        self.get::<T>(index).unwrap_or_else(|e| {
            panic!(
                "Declared dependency {} of {} mismatched: {:?}",
                index,
                std::any::type_name::<T>(),
                e
            )
        })
    }
}

/// One declared constructor: ordered dependency keys plus a factory.
///
/// The explicit counterpart of reflecting over a constructor signature:
/// what the container knows about building a service is exactly what was
/// declared here, nothing more.
pub struct Constructor {
    deps: Box<[Key]>,
    factory: FactoryFn,
}

impl Constructor {
    /// Declares a constructor from an infallible factory.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cobalt_di::{Constructor, key_of};
    /// use std::sync::Arc;
    ///
    /// struct Greeter;
    /// struct App { greeter: Arc<Greeter> }
    ///
    /// let ctor = Constructor::new::<App, _>(&[key_of::<Greeter>()], |deps| App {
    ///     greeter: deps.get_required::<Greeter>(0),
    /// });
    /// assert_eq!(ctor.dependencies().len(), 1);
    /// ```
    pub fn new<T, F>(deps: &[Key], factory: F) -> Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolvedArgs<'_>) -> T + Send + Sync + 'static,
    {
        Self {
            deps: deps.into(),
            factory: Arc::new(move |args: &ResolvedArgs<'_>| -> Result<AnyArc, FactoryError> {
                Ok(Arc::new(factory(args)) as AnyArc)
            }),
        }
    }

    /// Declares a dependency-free constructor for a pre-built instance.
    ///
    /// The instance is wrapped in an `Arc` once, up front; the factory
    /// hands out clones of that `Arc`. Under a `Singleton` registration
    /// the descriptor's cache pins the first clone, so later resolutions
    /// never re-enter the factory at all.
    pub fn from_instance<T: 'static + Send + Sync>(value: T) -> Self {
        let arc: AnyArc = Arc::new(value);
        Self {
            deps: Box::new([]),
            factory: Arc::new(move |_: &ResolvedArgs<'_>| -> Result<AnyArc, FactoryError> {
                Ok(arc.clone())
            }),
        }
    }

    /// Declares a constructor from a fallible factory.
    ///
    /// The factory's error is preserved as the cause of
    /// [`DiError::Instantiation`] when resolution reaches this service.
    pub fn try_new<T, F>(deps: &[Key], factory: F) -> Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolvedArgs<'_>) -> Result<T, FactoryError> + Send + Sync + 'static,
    {
        Self {
            deps: deps.into(),
            factory: Arc::new(move |args: &ResolvedArgs<'_>| -> Result<AnyArc, FactoryError> {
                factory(args).map(|v| Arc::new(v) as AnyArc)
            }),
        }
    }

    /// The ordered dependency identities this constructor requires.
    pub fn dependencies(&self) -> &[Key] {
        &self.deps
    }

    pub(crate) fn invoke(&self, args: &ResolvedArgs<'_>) -> Result<AnyArc, FactoryError> {
        (self.factory)(args)
    }
}

impl std::fmt::Debug for Constructor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Constructor")
            .field("deps", &self.deps.iter().map(|k| k.display_name()).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Abstract constructor-introspection capability.
///
/// Given a service identity, yields the one constructor selected for it.
/// Exactly one constructor must be eligible per identity: zero or more
/// than one fails with [`DiError::AmbiguousConstructor`]. This boundary
/// keeps constructor discovery out of the resolution algorithm proper;
/// [`BindingTable`] is the in-crate implementation, and
/// [`ServiceCollection::build_with_source`](crate::ServiceCollection::build_with_source)
/// accepts any other.
pub trait ConstructorSource: Send + Sync {
    /// Selects the constructor for `key`.
    fn constructor(&self, key: &Key) -> DiResult<&Constructor>;
}

/// Default [`ConstructorSource`]: explicit registration-time bindings.
///
/// Append-only; binding the same identity twice is accepted here and
/// surfaces as [`DiError::AmbiguousConstructor`] when the identity is
/// first resolved, mirroring single-eligible-constructor selection.
#[derive(Default)]
pub struct BindingTable {
    bindings: HashMap<Key, Vec<Constructor>>,
}

impl BindingTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a constructor binding for `key`.
    pub fn bind(&mut self, key: Key, constructor: Constructor) {
        self.bindings.entry(key).or_default().push(constructor);
    }

    /// Number of identities with at least one binding.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True if no binding was declared.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl ConstructorSource for BindingTable {
    fn constructor(&self, key: &Key) -> DiResult<&Constructor> {
        match self.bindings.get(key).map(Vec::as_slice) {
            Some([single]) => Ok(single),
            Some(candidates) => Err(DiError::AmbiguousConstructor {
                service: key.display_name(),
                candidates: candidates.len(),
            }),
            None => Err(DiError::AmbiguousConstructor {
                service: key.display_name(),
                candidates: 0,
            }),
        }
    }
}
