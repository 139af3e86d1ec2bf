//! # cobalt-di
//!
//! Minimal explicit-binding dependency injection for Rust, inspired by
//! Microsoft.Extensions.DependencyInjection.
//!
//! ## Features
//!
//! - **Two lifetimes**: Singleton (one shared instance) and Transient (fresh per resolution)
//! - **Explicit bindings**: each service declares its factory and ordered dependency list
//!   at registration time, with no runtime type inspection
//! - **Circular dependency detection**: cycles fail with the full dependency path
//! - **Fail-fast registration**: duplicate identities are rejected, never silently replaced
//! - **Thread-safe**: `Arc`-based sharing; at most one construction per singleton,
//!   even under concurrent first resolution
//!
//! ## Quick Start
//!
//! ```rust
//! use cobalt_di::{ServiceCollection, key_of};
//! use std::sync::Arc;
//!
//! // Define your services
//! struct MessageSource {
//!     text: String,
//! }
//!
//! struct Greeter {
//!     source: Arc<MessageSource>,
//! }
//!
//! impl Greeter {
//!     fn greet(&self) -> String {
//!         format!("hello {}", self.source.text)
//!     }
//! }
//!
//! // Register services
//! let mut services = ServiceCollection::new();
//! services.add_singleton(MessageSource {
//!     text: "world".to_string(),
//! }).unwrap();
//! services.add_transient_factory::<Greeter, _>(&[key_of::<MessageSource>()], |deps| {
//!     Greeter {
//!         source: deps.get_required::<MessageSource>(0),
//!     }
//! }).unwrap();
//!
//! // Build and use the service provider
//! let provider = services.build();
//! let greeter = provider.get_required::<Greeter>();
//! assert_eq!(greeter.greet(), "hello world");
//! ```
//!
//! ## Service Lifetimes
//!
//! - **Singleton**: Created once and shared across every resolution
//! - **Transient**: Created fresh on every resolution
//!
//! Transient consumers of a singleton dependency all share the one
//! singleton instance; the sharing is pointer identity on the `Arc`, not
//! structural equality.
//!
//! ## Constructor Bindings
//!
//! The resolver never inspects types. What it knows about building a
//! service is its [`Constructor`]: a declared factory plus the ordered
//! identities it depends on. [`ServiceCollection::build`] resolves
//! constructors from the bindings declared alongside registration;
//! [`ServiceCollection::build_with_source`] accepts any other
//! [`ConstructorSource`] the embedding environment supplies. Exactly one
//! constructor must be eligible per identity; zero or several fail with
//! [`DiError::AmbiguousConstructor`].

// Module declarations
pub mod binding;
pub mod collection;
pub mod descriptors;
pub mod error;
pub mod key;
pub mod lifetime;
pub mod provider;

// Internal modules
mod internal;
mod registry;

// Re-export core types
pub use binding::{BindingTable, Constructor, ConstructorSource, ResolvedArgs};
pub use collection::ServiceCollection;
pub use descriptors::ServiceDescriptor;
pub use error::{DiError, DiResult, FactoryError};
pub use key::{key_of, Key};
pub use lifetime::Lifetime;
pub use provider::ServiceProvider;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_singleton_resolution() {
        let mut sc = ServiceCollection::new();
        sc.add_singleton(42usize).unwrap();

        let sp = sc.build();
        let a = sp.get_required::<usize>();
        let b = sp.get_required::<usize>();

        assert_eq!(*a, 42);
        assert!(Arc::ptr_eq(&a, &b)); // Same instance
    }

    #[test]
    fn test_transient_resolution() {
        let mut sc = ServiceCollection::new();
        let counter = Arc::new(Mutex::new(0));
        let counter_clone = counter.clone();

        sc.add_transient_factory::<String, _>(&[], move |_| {
            let mut c = counter_clone.lock().unwrap();
            *c += 1;
            format!("instance-{}", *c)
        })
        .unwrap();

        let sp = sc.build();
        let a = sp.get_required::<String>();
        let b = sp.get_required::<String>();

        assert_eq!(a.as_str(), "instance-1");
        assert_eq!(b.as_str(), "instance-2");
        assert!(!Arc::ptr_eq(&a, &b)); // Different instances
    }

    #[test]
    fn test_dependency_resolution() {
        struct Inner(u32);
        struct Outer {
            inner: Arc<Inner>,
        }

        let mut sc = ServiceCollection::new();
        sc.add_singleton(Inner(7)).unwrap();
        sc.add_transient_factory::<Outer, _>(&[key_of::<Inner>()], |deps| Outer {
            inner: deps.get_required::<Inner>(0),
        })
        .unwrap();

        let sp = sc.build();
        let outer = sp.get_required::<Outer>();
        assert_eq!(outer.inner.0, 7);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut sc = ServiceCollection::new();
        sc.add_singleton(1usize).unwrap();

        match sc.add_singleton(2usize) {
            Err(DiError::Duplicate(name)) => assert!(name.contains("usize")),
            other => panic!("expected Duplicate, got {:?}", other.map(|_| ())),
        }
    }
}
