//! Error types for the dependency injection container.

use std::fmt;
use std::sync::Arc;

/// Boxed error produced by a fallible service factory.
///
/// Fallible factories (`try_*` registrations) return this; the resolver
/// wraps it into [`DiError::Instantiation`] with the failing service's
/// name so the cause survives the trip up the recursive resolution chain.
pub type FactoryError = Box<dyn std::error::Error + Send + Sync>;

/// Dependency injection errors
///
/// Represents the error conditions that can occur during service
/// registration or resolution. Every variant is surfaced to the immediate
/// caller; the resolver never recovers locally, and a failure anywhere in
/// the recursive chain aborts the entire resolution with partial results
/// discarded.
///
/// # Examples
///
/// ```rust
/// use cobalt_di::{DiError, ServiceCollection};
///
/// // Example of NotFound error
/// let provider = ServiceCollection::new().build();
/// match provider.get::<String>() {
///     Err(DiError::NotFound(type_name)) => {
///         assert_eq!(type_name, "alloc::string::String");
///     }
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use cobalt_di::DiError;
///
/// let not_found = DiError::NotFound("MyService");
/// let circular = DiError::Circular(vec!["ServiceA", "ServiceB", "ServiceA"]);
///
/// // All errors implement Display
/// println!("Error: {}", not_found);
/// println!("Error: {}", circular);
/// ```
#[derive(Debug, Clone)]
pub enum DiError {
    /// Identity already registered (registration is fail-fast)
    Duplicate(&'static str),
    /// Service not registered
    NotFound(&'static str),
    /// Zero or multiple constructor bindings for the identity
    AmbiguousConstructor {
        /// The service whose constructor lookup failed
        service: &'static str,
        /// How many bindings were found (anything but exactly one fails)
        candidates: usize,
    },
    /// Circular dependency detected (includes path)
    Circular(Vec<&'static str>),
    /// Maximum recursion depth exceeded
    DepthExceeded(usize),
    /// Resolved argument did not match the declared dependency
    TypeMismatch(&'static str),
    /// A factory failed while constructing the service
    Instantiation {
        /// The service whose factory failed
        service: &'static str,
        /// The factory's own error, preserved as the cause
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::Duplicate(name) => write!(f, "Service already registered: {}", name),
            DiError::NotFound(name) => write!(f, "Service not found: {}", name),
            DiError::AmbiguousConstructor { service, candidates: 0 } => {
                write!(f, "No constructor bound for: {}", service)
            }
            DiError::AmbiguousConstructor { service, candidates } => {
                write!(f, "Ambiguous constructor for {}: {} bindings", service, candidates)
            }
            DiError::Circular(path) => {
                write!(f, "Circular dependency: {}", path.join(" -> "))
            }
            DiError::DepthExceeded(depth) => write!(f, "Max depth {} exceeded", depth),
            DiError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
            DiError::Instantiation { service, source } => {
                write!(f, "Failed to construct {}: {}", service, source)
            }
        }
    }
}

impl std::error::Error for DiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiError::Instantiation { source, .. } => Some(&**source),
            _ => None,
        }
    }
}

/// Result type for DI operations
///
/// A convenience type alias for `Result<T, DiError>` used throughout the
/// crate to reduce boilerplate in function signatures.
///
/// # Examples
///
/// ```rust
/// use cobalt_di::{DiResult, DiError};
///
/// fn failing_operation() -> DiResult<()> {
///     Err(DiError::NotFound("some_service"))
/// }
///
/// assert!(failing_operation().is_err());
/// ```
pub type DiResult<T> = Result<T, DiError>;
