//! Parameter normalization.
//!
//! Every declared parameter and every call-site argument maps to a `'static`
//! key type through [`Param`]. The keys of a parameter list form the
//! signature's key, and two signatures with equal keys cannot live in the same
//! registry.
//!
//! | Type | Key |
//! |---|---|
//! | `&T`, `&mut T` | `T::Key` |
//! | `[T; N]`, `[T]`, `*const T`, `*mut T` | `*const T` |
//! | `str` | `*const str` |
//! | everything else | itself |

use std::{rc::Rc, sync::Arc};

/// A type that can appear as an overload parameter.
///
/// Implement it for your own types with `#[derive(Param)]` or
/// [`impl_param!`](crate::impl_param).
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as an overload parameter",
    label = "missing `Param` implementation",
    note = "derive it with `#[derive(Param)]` or list the type in `impl_param!`"
)]
pub trait Param {
    /// The normalized key of this parameter.
    type Key: 'static;
}

/// Marker key of a signature without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Void;

/// Implements [`Param`] for types that are their own key.
///
/// ```rust,ignore
/// struct Celsius(f64);
/// struct Fahrenheit(f64);
///
/// impl_param!(Celsius, Fahrenheit);
/// ```
#[macro_export]
macro_rules! impl_param {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::Param for $ty {
                type Key = Self;
            }
        )*
    };
}

impl_param!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, (),
    String, Void
);

impl Param for str {
    type Key = *const str;
}

impl<T: 'static> Param for [T] {
    type Key = *const T;
}

impl<T: 'static, const N: usize> Param for [T; N] {
    type Key = *const T;
}

impl<T: ?Sized + 'static> Param for *const T {
    type Key = *const T;
}

impl<T: ?Sized + 'static> Param for *mut T {
    type Key = *const T;
}

impl<T: ?Sized + Param> Param for &T {
    type Key = T::Key;
}

impl<T: ?Sized + Param> Param for &mut T {
    type Key = T::Key;
}

impl<T: 'static> Param for Option<T> {
    type Key = Self;
}

impl<T: 'static, E: 'static> Param for Result<T, E> {
    type Key = Self;
}

impl<T: 'static> Param for Vec<T> {
    type Key = Self;
}

impl<T: ?Sized + 'static> Param for Box<T> {
    type Key = Self;
}

impl<T: ?Sized + 'static> Param for Rc<T> {
    type Key = Self;
}

impl<T: ?Sized + 'static> Param for Arc<T> {
    type Key = Self;
}

/// Maps a call-site argument tuple to the key it dispatches on.
pub trait Arguments {
    /// The normalized parameter key.
    type Key: 'static;
}

impl Arguments for () {
    type Key = Void;
}

macro_rules! impl_arguments {
    ($($x:ident),+) => {
        impl<$($x: Param),+> Arguments for ($($x,)+) {
            type Key = ($(<$x as Param>::Key,)+);
        }
    };
}

impl_arguments!(X0);
impl_arguments!(X0, X1);
impl_arguments!(X0, X1, X2);
impl_arguments!(X0, X1, X2, X3);
impl_arguments!(X0, X1, X2, X3, X4);
impl_arguments!(X0, X1, X2, X3, X4, X5);
impl_arguments!(X0, X1, X2, X3, X4, X5, X6);
impl_arguments!(X0, X1, X2, X3, X4, X5, X6, X7);

/// Conversion from a call-site argument to a by-value parameter.
///
/// Besides identity this copies out of references and decays arrays, slices
/// and mutable pointers to `*const T`.
pub trait IntoParam<T> {
    /// Converts the argument.
    fn into_param(self) -> T;
}

impl<T> IntoParam<T> for T {
    #[inline]
    fn into_param(self) -> T {
        self
    }
}

impl<T: Copy> IntoParam<T> for &T {
    #[inline]
    fn into_param(self) -> T {
        *self
    }
}

impl<T: Copy> IntoParam<T> for &mut T {
    #[inline]
    fn into_param(self) -> T {
        *self
    }
}

impl<T> IntoParam<*const T> for *mut T {
    #[inline]
    fn into_param(self) -> *const T {
        self.cast_const()
    }
}

impl<T, const N: usize> IntoParam<*const T> for &[T; N] {
    #[inline]
    fn into_param(self) -> *const T {
        self.as_ptr()
    }
}

impl<T> IntoParam<*const T> for &[T] {
    #[inline]
    fn into_param(self) -> *const T {
        self.as_ptr()
    }
}

/// Borrows a call-site argument as a `&T` parameter.
///
/// Covers the argument forms whose key matches `T`: the value itself, shared
/// and exclusive references to it, and arrays decaying to slices.
pub trait AsParamRef<T: ?Sized> {
    /// Borrows the argument.
    fn as_param_ref(&self) -> &T;
}

impl<T: ?Sized> AsParamRef<T> for T {
    #[inline]
    fn as_param_ref(&self) -> &T {
        self
    }
}

impl<T: ?Sized> AsParamRef<T> for &T {
    #[inline]
    fn as_param_ref(&self) -> &T {
        self
    }
}

impl<T: ?Sized> AsParamRef<T> for &mut T {
    #[inline]
    fn as_param_ref(&self) -> &T {
        self
    }
}

impl<T, const N: usize> AsParamRef<[T]> for [T; N] {
    #[inline]
    fn as_param_ref(&self) -> &[T] {
        self
    }
}

impl<T, const N: usize> AsParamRef<[T]> for &[T; N] {
    #[inline]
    fn as_param_ref(&self) -> &[T] {
        &self[..]
    }
}

impl<T, const N: usize> AsParamRef<[T]> for &mut [T; N] {
    #[inline]
    fn as_param_ref(&self) -> &[T] {
        &self[..]
    }
}

/// Borrows a call-site argument as a `&mut T` parameter.
pub trait AsParamMut<T: ?Sized> {
    /// Borrows the argument mutably.
    fn as_param_mut(&mut self) -> &mut T;
}

impl<T: ?Sized> AsParamMut<T> for T {
    #[inline]
    fn as_param_mut(&mut self) -> &mut T {
        self
    }
}

impl<T: ?Sized> AsParamMut<T> for &mut T {
    #[inline]
    fn as_param_mut(&mut self) -> &mut T {
        self
    }
}

impl<T, const N: usize> AsParamMut<[T]> for [T; N] {
    #[inline]
    fn as_param_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T, const N: usize> AsParamMut<[T]> for &mut [T; N] {
    #[inline]
    fn as_param_mut(&mut self) -> &mut [T] {
        &mut self[..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::TypeId;

    fn key<P: ?Sized + Param>() -> TypeId {
        TypeId::of::<P::Key>()
    }

    fn args<A: Arguments>() -> TypeId {
        TypeId::of::<A::Key>()
    }

    #[test]
    fn test_references_normalize_to_referent() {
        assert_eq!(key::<&i32>(), key::<i32>());
        assert_eq!(key::<&mut i32>(), key::<i32>());
        assert_eq!(key::<&&String>(), key::<String>());
    }

    #[test]
    fn test_arrays_and_pointers_decay() {
        assert_eq!(key::<[u8; 4]>(), TypeId::of::<*const u8>());
        assert_eq!(key::<[u8]>(), key::<[u8; 16]>());
        assert_eq!(key::<*mut u8>(), key::<*const u8>());
        assert_eq!(key::<&str>(), TypeId::of::<*const str>());
        assert_ne!(key::<[u8; 4]>(), key::<[u16; 4]>());
    }

    #[test]
    fn test_argument_tuples() {
        assert_eq!(args::<()>(), TypeId::of::<Void>());
        assert_eq!(args::<(i32,)>(), args::<(&i32,)>());
        assert_eq!(args::<(&mut i32, &str)>(), TypeId::of::<(i32, *const str)>());
        assert_ne!(args::<(i32, u8)>(), args::<(u8, i32)>());
    }

    #[test]
    fn test_into_param_conversions() {
        let value = 7_i32;
        assert_eq!(IntoParam::<i32>::into_param(&value), 7);

        let mut data = [1_u8, 2, 3];
        let ptr: *const u8 = IntoParam::<*const u8>::into_param(&data);
        assert_eq!(ptr, data.as_ptr());

        let mutable: *mut u8 = data.as_mut_ptr();
        let decayed: *const u8 = mutable.into_param();
        assert_eq!(decayed, data.as_ptr());
    }

    fn total(values: &[u8]) -> u32 {
        values.iter().map(|&v| u32::from(v)).sum()
    }

    #[test]
    fn test_arrays_borrow_as_slices() {
        let mut data = [1_u8, 2, 3];
        assert_eq!(total(AsParamRef::<[u8]>::as_param_ref(&data)), 6);

        let shared = &data;
        assert_eq!(total(AsParamRef::<[u8]>::as_param_ref(&shared)), 6);

        let exclusive = &mut data;
        assert_eq!(total(AsParamRef::<[u8]>::as_param_ref(&exclusive)), 6);

        let mut borrowed = &mut data;
        AsParamMut::<[u8]>::as_param_mut(&mut borrowed)[0] = 10;
        assert_eq!(data, [10, 2, 3]);
    }

    #[test]
    fn test_references_borrow_as_referent() {
        let value = 5_i32;
        let shared = &value;
        assert_eq!(*AsParamRef::<i32>::as_param_ref(&shared), 5);
        assert_eq!(*AsParamRef::<i32>::as_param_ref(&value), 5);

        let mut target = 1_i32;
        let mut exclusive = &mut target;
        *AsParamMut::<i32>::as_param_mut(&mut exclusive) += 1;
        assert_eq!(target, 2);
    }
}
