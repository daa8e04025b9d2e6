//! Registration and dispatch scenarios for `Overloaded`.

mod common;

use common::{Adder, Scale, f1, f2, f3, f4, hits, serial};
use overload::{ParamKey, StorageKind, prelude::*};
use std::{
    cell::Cell,
    sync::atomic::{AtomicUsize, Ordering},
};

#[test]
fn test_function_pointer() {
    let _guard = serial();
    let fp: fn(&i32) -> i32 = f2;
    let o = make!(fp).unwrap();

    assert_eq!(o.size(), 1);
    assert!(o.exists::<fn(&i32) -> i32>());
    assert!(!o.exists::<fn() -> &'static str>());

    assert_eq!(hits("f2"), 0);
    assert_eq!(o.invoke((4_i32,)), 8);
    assert_eq!(hits("f2"), 1);
}

#[test]
fn test_no_argument_function() {
    let _guard = serial();
    let o = make!(f1 as fn()).unwrap();

    assert_eq!(o.size(), 1);
    assert!(o.exists::<fn()>());
    assert!(o.exists::<fn() -> ()>());

    call!(o);
    assert_eq!(hits("f1"), 1);
}

#[test]
fn test_many_functions() {
    let _guard = serial();
    let o = make!(f1 as fn(), f2 as fn(&i32) -> i32).unwrap();

    assert_eq!(Overloaded::<overload::TableOf![fn(), fn(&i32) -> i32]>::SIZE, 2);
    assert_eq!(o.size(), 2);
    assert!(o.exists::<fn()>());
    assert!(o.exists::<fn(&i32) -> i32>());
    assert!(!o.exists::<fn(&f64) -> i32>());

    call!(o);
    assert_eq!(hits("f1"), 1);

    assert_eq!(call!(o, 2_i32), 4);
    assert_eq!(hits("f2"), 1);
}

#[test]
fn test_closure_by_value() {
    let counter = AtomicUsize::new(0);
    let o = make!(Erased::<fn(i32) -> i32>::new(|v: i32| {
        counter.fetch_add(1, Ordering::SeqCst);
        v * 2
    }))
    .unwrap();

    assert_eq!(o.size(), 1);
    assert!(o.exists::<fn(i32) -> i32>());
    assert!(!o.exists::<fn()>());

    assert_eq!(call!(o, 3_i32), 6);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_closure_by_reference() {
    let counter = AtomicUsize::new(0);
    let double = |v: i32| {
        counter.fetch_add(1, Ordering::SeqCst);
        v * 2
    };
    let o = make!(Erased::<fn(i32) -> i32>::new(&double)).unwrap();

    assert_eq!(call!(o, 3_i32), 6);
    assert_eq!(double(1), 2);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_already_erased_callable() {
    let counter = AtomicUsize::new(0);
    let erased = Erased::<fn(i32) -> i32>::new(|v: i32| {
        counter.fetch_add(1, Ordering::SeqCst);
        v * 2
    });
    let o = make!(erased).unwrap();

    assert_eq!(o.describe()[0].kind, StorageKind::Erased);
    assert_eq!(call!(o, 3_i32), 6);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_closure_with_thread_local_state() {
    let hits = Cell::new(0);
    let o = make!(Erased::<fn(i32) -> i32>::new(|v: i32| {
        hits.set(hits.get() + 1);
        v * 2
    }))
    .unwrap();

    assert_eq!(call!(o, 3_i32), 6);
    assert_eq!(call!(o, 4_i32), 8);
    assert_eq!(hits.get(), 2);
}

#[test]
fn test_erased_entry_never_matches_a_value() {
    let o = make!(Erased::<fn(i32) -> i32>::new(|v: i32| v + 2)).unwrap();

    // Same key as the entry, but erased storage keeps no address.
    assert!(o.exists::<fn(i32) -> i32>());
    assert!(!o.exists_value(&(f4 as fn(i32) -> i32)));
    assert!(!o.exists_value(&Erased::<fn(i32) -> i32>::new(f4)));
}

#[test]
fn test_move_only_functor() {
    let o = make!(Adder).unwrap();

    assert_eq!(o.size(), 1);
    assert!(o.exists::<fn(i32, i32) -> i32>());
    assert!(!o.exists::<fn()>());
    assert_eq!(o.describe()[0].kind, StorageKind::Owned);

    assert_eq!(call!(o, 3_i32, 3_i32), 6);
}

#[test]
fn test_owned_entry_never_matches_a_value() {
    let o = make!(Adder).unwrap();
    let adder = Adder;
    let borrowed = &adder;

    assert!(o.exists::<fn(i32, i32) -> i32>());
    assert!(!o.exists_value(&borrowed));
    assert!(!o.exists_value(&ByMove::new(Adder)));
}

#[test]
fn test_borrowed_functor() {
    let adder = Adder;
    let o = make!(&adder).unwrap();

    assert_eq!(o.size(), 1);
    assert!(o.exists::<fn(i32, i32) -> i32>());
    assert_eq!(o.describe()[0].kind, StorageKind::Borrowed);

    assert_eq!(call!(o, 3_i32, 3_i32), 6);
    drop(o);

    let owned = make!(adder).unwrap();
    assert_eq!(owned.describe()[0].kind, StorageKind::Owned);
}

#[test]
fn test_borrowed_functor_identity() {
    let half = Scale { factor: 0.5 };
    let other = Scale { factor: 0.5 };
    let o = make!(&half).unwrap();
    let (registered, unregistered) = (&half, &other);

    assert!(o.exists_value(&registered));
    assert!(!o.exists_value(&unregistered));
    assert_eq!(call!(o, 3.0_f64), 1.5);
}

#[test]
fn test_shared_reference_parameter_takes_plain_value() {
    let _guard = serial();
    let o = make!(f2 as fn(&i32) -> i32).unwrap();

    let v = 3_i32;
    assert_eq!(call!(o, v), 6);
    assert_eq!(call!(o, &v), 6);
    assert_eq!(hits("f2"), 2);
}

#[test]
fn test_mutable_reference_parameter_mutates_caller() {
    let _guard = serial();
    let o = make!(f3 as fn(&mut i32) -> i32).unwrap();

    assert!(o.exists::<fn(&mut i32) -> i32>());

    let mut v = 3_i32;
    let r = call!(o, &mut v);
    assert_eq!(v, 6);
    assert_eq!(r, 6);
    assert_eq!(hits("f3"), 1);
}

#[test]
fn test_value_parameter_leaves_caller_untouched() {
    let _guard = serial();
    let o = make!(f4 as fn(i32) -> i32).unwrap();

    assert!(o.exists::<fn(i32) -> i32>());

    let v = 3_i32;
    assert_eq!(o.invoke((v,)), 5);
    assert_eq!(o.invoke((&v,)), 5);
    assert_eq!(v, 3);
    assert_eq!(hits("f4"), 2);
}

#[test]
fn test_duplicate_normalized_key_is_rejected() {
    let err = make!(f2 as fn(&i32) -> i32, f4 as fn(i32) -> i32).unwrap_err();
    assert!(err.to_string().contains("only unique signatures are allowed"));
    assert_eq!(err.key(), ParamKey::of::<(i32,)>());

    let err = make!(f3 as fn(&mut i32) -> i32, f2 as fn(&i32) -> i32).unwrap_err();
    assert!(matches!(
        err,
        BuildError::DuplicateSignature {
            first: 0,
            second: 1,
            ..
        }
    ));
}

#[test]
fn test_distinct_keys_construct() {
    let o = make!(
        f1 as fn(),
        f2 as fn(&i32) -> i32,
        (|a: u8, b: u8| a.wrapping_add(b)) as fn(u8, u8) -> u8,
        Erased::<fn(&str, usize) -> bool>::new(|s: &str, n: usize| s.len() == n),
    )
    .unwrap();

    assert_eq!(o.size(), 4);
    assert!(call!(o, "four", 4_usize));
    assert_eq!(call!(o, 250_u8, 10_u8), 4);
}

#[test]
fn test_builder_matches_make() {
    let built = Overloaded::builder()
        .with(f2 as fn(&i32) -> i32)
        .with(Adder)
        .build()
        .unwrap();
    let made = make!(f2 as fn(&i32) -> i32, Adder).unwrap();

    assert_eq!(built.describe(), made.describe());
    assert_eq!(call!(built, 1_i32, 2_i32), call!(made, 1_i32, 2_i32));
}

#[test]
fn test_shared_across_threads() {
    let o = make!(
        f4 as fn(i32) -> i32,
        SyncErased::<fn(u64) -> u64>::new(|x: u64| x * x),
    )
    .unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4_u64)
            .map(|i| {
                let o = &o;
                s.spawn(move || call!(o, i))
            })
            .collect();
        let squares: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(squares, vec![0, 1, 4, 9]);
    });
}
