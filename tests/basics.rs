use cobalt_di::{key_of, DiError, ServiceCollection};
use std::sync::{Arc, Mutex};

#[test]
fn test_concrete_singleton() {
    let mut sc = ServiceCollection::new();
    sc.add_singleton(42usize).unwrap();
    sc.add_singleton("hello".to_string()).unwrap();

    let sp = sc.build();

    let num1 = sp.get_required::<usize>();
    let num2 = sp.get_required::<usize>();
    let str1 = sp.get_required::<String>();
    let str2 = sp.get_required::<String>();

    assert_eq!(*num1, 42);
    assert_eq!(*str1, "hello");
    assert!(Arc::ptr_eq(&num1, &num2)); // Same instance
    assert!(Arc::ptr_eq(&str1, &str2)); // Same instance
}

#[test]
fn test_factory_with_dependencies() {
    #[derive(Debug)]
    struct Config {
        port: u16,
    }

    #[derive(Debug)]
    struct Server {
        config: Arc<Config>,
        name: String,
    }

    let mut sc = ServiceCollection::new();
    sc.add_singleton(Config { port: 8080 }).unwrap();
    sc.add_singleton_factory::<Server, _>(&[key_of::<Config>()], |deps| Server {
        config: deps.get_required::<Config>(0),
        name: "MyServer".to_string(),
    })
    .unwrap();

    let sp = sc.build();
    let server = sp.get_required::<Server>();

    assert_eq!(server.config.port, 8080);
    assert_eq!(server.name, "MyServer");
}

#[test]
fn test_transient_creates_new_instances() {
    let counter = Arc::new(Mutex::new(0));
    let counter_clone = counter.clone();

    let mut sc = ServiceCollection::new();
    sc.add_transient_factory::<String, _>(&[], move |_| {
        let mut c = counter_clone.lock().unwrap();
        *c += 1;
        format!("instance-{}", *c)
    })
    .unwrap();

    let sp = sc.build();

    let a = sp.get_required::<String>();
    let b = sp.get_required::<String>();
    let c = sp.get_required::<String>();

    assert_eq!(*a, "instance-1");
    assert_eq!(*b, "instance-2");
    assert_eq!(*c, "instance-3");

    // All different instances
    assert!(!Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&b, &c));
    assert!(!Arc::ptr_eq(&a, &c));
}

#[test]
fn test_not_found_error() {
    struct UnregisteredType;

    let sc = ServiceCollection::new();
    let sp = sc.build();

    match sp.get::<UnregisteredType>() {
        Err(DiError::NotFound(name)) => assert!(name.contains("UnregisteredType")),
        _ => panic!("Expected NotFound when resolving unregistered type"),
    }
}

#[test]
fn test_duplicate_registration_rejected() {
    let mut sc = ServiceCollection::new();

    sc.add_singleton(1usize).unwrap();
    // Second registration for the same identity fails fast
    match sc.add_singleton(2usize) {
        Err(DiError::Duplicate(name)) => assert!(name.contains("usize")),
        other => panic!("Expected Duplicate error, got {:?}", other.map(|_| ())),
    }

    // The original registration is untouched
    let sp = sc.build();
    let value = sp.get_required::<usize>();
    assert_eq!(*value, 1);
}

#[test]
fn test_try_add_skips_existing() {
    let mut sc = ServiceCollection::new();

    assert!(sc.try_add_singleton(1usize));
    assert!(!sc.try_add_singleton(2usize)); // Ignored, already registered

    let sp = sc.build();
    assert_eq!(*sp.get_required::<usize>(), 1);
}

#[test]
fn test_complex_dependency_graph() {
    struct A {
        value: i32,
    }

    struct B {
        a: Arc<A>,
    }

    struct C {
        a: Arc<A>,
        b: Arc<B>,
    }

    let mut sc = ServiceCollection::new();

    sc.add_singleton(A { value: 100 }).unwrap();

    sc.add_singleton_factory::<B, _>(&[key_of::<A>()], |deps| B {
        a: deps.get_required::<A>(0),
    })
    .unwrap();

    sc.add_singleton_factory::<C, _>(&[key_of::<A>(), key_of::<B>()], |deps| C {
        a: deps.get_required::<A>(0),
        b: deps.get_required::<B>(1),
    })
    .unwrap();

    let sp = sc.build();
    let c = sp.get_required::<C>();

    assert_eq!(c.a.value, 100);
    assert_eq!(c.b.a.value, 100);
    // A is singleton, so should be same instance on both paths
    assert!(Arc::ptr_eq(&c.a, &c.b.a));
}
