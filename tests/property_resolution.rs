/// Property-based tests for service resolution
///
/// These tests verify that resolution behavior follows expected patterns
/// regardless of the specific services or configuration used.

use cobalt_di::{key_of, ServiceCollection};
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct ServiceA {
    value: String,
}

#[derive(Debug, Clone)]
struct ServiceB {
    number: u64,
}

#[derive(Debug, Clone)]
struct ServiceC {
    flag: bool,
}

// Property: Resolution should be consistent - same service should resolve to same instance for singletons
proptest! {
    #[test]
    fn singleton_resolution_consistency(service_value in "\\PC{0,50}") {
        let mut services = ServiceCollection::new();
        services.add_singleton(ServiceA { value: service_value.clone() }).unwrap();

        let provider = services.build();

        // Multiple resolutions should return the same instance
        let resolved1 = provider.get_required::<ServiceA>();
        let resolved2 = provider.get_required::<ServiceA>();
        let resolved3 = provider.get_required::<ServiceA>();

        prop_assert!(Arc::ptr_eq(&resolved1, &resolved2));
        prop_assert!(Arc::ptr_eq(&resolved2, &resolved3));
        prop_assert_eq!(&resolved1.value, &service_value);
    }
}

proptest! {
    #[test]
    fn resolution_matches_registration_state(register_service in any::<bool>()) {
        let mut services = ServiceCollection::new();

        if register_service {
            services.add_singleton(ServiceB { number: 42 }).unwrap();
        }

        let provider = services.build();

        // Resolution outcome should match registration state
        let result = provider.get::<ServiceB>();
        prop_assert_eq!(result.is_ok(), register_service);

        if register_service {
            let required = provider.get_required::<ServiceB>();
            prop_assert_eq!(required.number, 42);
        }
    }
}

proptest! {
    #[test]
    fn error_conditions_consistent(should_register in any::<bool>()) {
        let mut services = ServiceCollection::new();

        if should_register {
            services.add_singleton(ServiceC { flag: true }).unwrap();
        }

        let provider = services.build();

        // Multiple attempts to resolve should behave consistently
        let result1 = provider.get::<ServiceC>();
        let result2 = provider.get::<ServiceC>();

        prop_assert_eq!(result1.is_ok(), result2.is_ok());
        prop_assert_eq!(result1.is_ok(), should_register);
    }
}

proptest! {
    #[test]
    fn dependency_chain_resolution(level in 0usize..5) {
        let mut services = ServiceCollection::new();

        // Base service
        services.add_singleton(ServiceA { value: "base".to_string() }).unwrap();

        // Dependent service built from the declared base
        services.add_singleton_factory::<String, _>(&[key_of::<ServiceA>()], move |deps| {
            let base = deps.get_required::<ServiceA>(0);
            format!("{}->level_{}", base.value, level)
        }).unwrap();

        let provider = services.build();

        let result = provider.get_required::<String>();
        prop_assert!(result.starts_with("base->"));
        let expected_suffix = format!("level_{}", level);
        prop_assert!(result.ends_with(&expected_suffix));
    }
}

proptest! {
    #[test]
    fn transient_resolutions_are_distinct(resolution_count in 2usize..10) {
        let mut services = ServiceCollection::new();
        services.add_transient_factory::<ServiceC, _>(&[], |_| {
            ServiceC { flag: false }
        }).unwrap();

        let provider = services.build();

        // Hold every resolution alive so addresses cannot be reused
        let resolved: Vec<Arc<ServiceC>> = (0..resolution_count)
            .map(|_| provider.get_required::<ServiceC>())
            .collect();

        for i in 0..resolved.len() {
            for j in (i + 1)..resolved.len() {
                prop_assert!(!Arc::ptr_eq(&resolved[i], &resolved[j]));
            }
        }
    }
}

proptest! {
    #[test]
    fn concurrent_resolution_safety(
        thread_count in 1usize..8,
        resolution_count in 1usize..20,
    ) {
        use std::sync::Barrier;
        use std::thread;

        let mut services = ServiceCollection::new();
        services.add_singleton(ServiceB { number: 12345 }).unwrap();

        let provider = services.build();
        let barrier = Arc::new(Barrier::new(thread_count));
        let mut handles = Vec::new();

        for _thread_id in 0..thread_count {
            let provider = provider.clone();
            let barrier = Arc::clone(&barrier);

            handles.push(thread::spawn(move || {
                barrier.wait(); // Synchronize start

                let mut results = Vec::new();
                for _ in 0..resolution_count {
                    let singleton = provider.get_required::<ServiceB>();
                    results.push(singleton.number);
                }
                results
            }));
        }

        let mut all_results = Vec::new();
        for handle in handles {
            all_results.extend(handle.join().unwrap());
        }

        // All singleton resolutions should return the same value
        for &result in &all_results {
            prop_assert_eq!(result, 12345);
        }
    }
}
