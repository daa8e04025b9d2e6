//! `#[overload]`, `#[derive(Param)]` and `impl_param!` working together.

use overload::{
    Callable, Candidate, Param, Signature, StorageKind, impl_param, prelude::*,
    testing::{CountingCallable, RecordingCallable},
};

/// Celsius to Fahrenheit.
#[overload]
fn convert(c: Celsius) -> Fahrenheit {
    Fahrenheit(c.0 * 9.0 / 5.0 + 32.0)
}

#[overload]
fn describe(f: &Fahrenheit) -> String {
    format!("{:.1}F", f.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celsius(f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fahrenheit(f64);

impl_param!(Celsius, Fahrenheit);

#[derive(Param, Debug, Clone, PartialEq)]
pub struct Wrapper<T> {
    value: T,
}

struct Offset<T> {
    by: T,
}

#[overload]
impl<T> Offset<T>
where
    T: Param + Copy + std::ops::Add<Output = T> + 'static,
{
    fn apply(&self, x: T) -> T {
        x + self.by
    }
}

#[test]
fn test_overload_fn_keeps_direct_call() {
    assert_eq!(convert.call(Celsius(100.0)), Fahrenheit(212.0));
    let pointer: fn(Celsius) -> Fahrenheit = convert.pointer();
    assert_eq!(pointer(Celsius(0.0)), Fahrenheit(32.0));
}

#[test]
fn test_overload_fn_signature() {
    fn signature_of<C: Callable>(_: &C) -> usize {
        <C::Signature as Signature>::ARITY
    }
    assert_eq!(signature_of(&convert), 1);
    assert_eq!(format!("{:?}", describe), "describe");
    assert!(Candidate::identity(&convert).is_some());
}

#[test]
fn test_user_types_dispatch() {
    let o = make!(convert, describe).unwrap();

    let hot = call!(o, Celsius(40.0));
    assert_eq!(hot, Fahrenheit(104.0));
    assert_eq!(call!(o, hot), "104.0F");
    assert_eq!(call!(o, &hot), "104.0F");

    assert!(o.exists_value(&convert));
    assert!(o.exists_value(&describe));
}

#[test]
fn test_derived_generic_param() {
    let unwrap_i32 = |w: Wrapper<i32>| w.value;
    let unwrap_str = |w: Wrapper<&'static str>| w.value.len();
    let o = make!(
        Erased::<fn(Wrapper<i32>) -> i32>::new(unwrap_i32),
        Erased::<fn(Wrapper<&'static str>) -> usize>::new(unwrap_str),
    )
    .unwrap();

    assert_eq!(call!(o, Wrapper { value: 9_i32 }), 9);
    assert_eq!(call!(o, Wrapper { value: "nine" }), 4);
}

#[test]
fn test_generic_functor_impl() {
    let o = make!(Offset { by: 10_i64 }, Offset { by: 0.5_f32 }).unwrap();

    assert_eq!(o.describe()[0].kind, StorageKind::Owned);
    assert_eq!(call!(o, 5_i64), 15);
    assert_eq!(call!(o, 1.0_f32), 1.5);
}

#[test]
fn test_counting_and_recording_wrappers() {
    let counter = CountingCallable::new(convert.pointer());
    let recorder = RecordingCallable::new(describe.pointer());
    let o = make!(counter.clone(), recorder.clone()).unwrap();

    let f = call!(o, Celsius(100.0));
    call!(o, f);
    call!(o, Fahrenheit(0.0));

    assert_eq!(counter.count(), 1);
    assert_eq!(recorder.outputs(), vec!["212.0F".to_string(), "0.0F".to_string()]);
    assert_eq!(o.describe()[1].kind, StorageKind::Owned);
}
