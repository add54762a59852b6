//! The `TryClone` trait for types that cannot be 'implicitly copied'.
//!
//! Copy-constructing a container allocates, so it is fallible. `TryClone` is
//! the fallible counterpart of [`Clone`] used whenever a [`Vec`] copies its
//! elements.
//!
//! [`Vec`]: crate::Vec

use crate::error::Error;

/// Fallible `Clone` trait.
///
/// # Examples
///
/// ```
/// use kvec::prelude::*;
/// use kvec::{try_vec, Vec};
///
/// let a: Vec<Vec<u32>> = try_vec![try_vec![1, 2], try_vec![3]];
/// let mut b = a.try_clone()?;
/// b[0].try_push(4)?;
///
/// assert_eq!(a[0], [1, 2]);
/// assert_eq!(b[0], [1, 2, 4]);
/// # Ok::<_, kvec::Error>(())
/// ```
pub trait TryClone: Sized {
    /// Try to clone the current value, raising an allocation error if it's
    /// unsuccessful.
    fn try_clone(&self) -> Result<Self, Error>;

    /// Performs copy-assignment from `source`.
    ///
    /// `a.try_clone_from(&b)` is equivalent to `a = b.try_clone()?` in
    /// functionality, but can be overridden to reuse the resources of `a` to
    /// avoid unnecessary allocations.
    #[inline]
    fn try_clone_from(&mut self, source: &Self) -> Result<(), Error> {
        *self = source.try_clone()?;
        Ok(())
    }
}

impl<T: ?Sized> TryClone for &T {
    #[inline]
    fn try_clone(&self) -> Result<Self, Error> {
        Ok(*self)
    }
}

impl<T> TryClone for Option<T>
where
    T: TryClone,
{
    #[inline]
    fn try_clone(&self) -> Result<Self, Error> {
        Ok(match self {
            Some(value) => Some(value.try_clone()?),
            None => None,
        })
    }
}

impl<T, E> TryClone for Result<T, E>
where
    T: TryClone,
    E: TryClone,
{
    #[inline]
    fn try_clone(&self) -> Result<Self, Error> {
        Ok(match self {
            Ok(value) => Ok(value.try_clone()?),
            Err(value) => Err(value.try_clone()?),
        })
    }
}

impl<T: ?Sized> TryClone for std::rc::Rc<T> {
    #[inline]
    fn try_clone(&self) -> Result<Self, Error> {
        Ok(self.clone())
    }
}

impl<T: ?Sized> TryClone for std::sync::Arc<T> {
    #[inline]
    fn try_clone(&self) -> Result<Self, Error> {
        Ok(self.clone())
    }
}

impl TryClone for std::string::String {
    #[inline]
    fn try_clone(&self) -> Result<Self, Error> {
        Ok(self.clone())
    }
}

macro_rules! impl_tuple {
    ($count:expr $(, $ty:ident $var:ident $num:expr)*) => {
        impl<$($ty,)*> TryClone for ($($ty,)*) where $($ty: TryClone,)* {
            #[inline]
            fn try_clone(&self) -> Result<Self, Error> {
                let ($($var,)*) = self;
                Ok(($($var.try_clone()?,)*))
            }
        }
    }
}

impl_tuple!(0);
impl_tuple!(1, A a 0);
impl_tuple!(2, A a 0, B b 1);
impl_tuple!(3, A a 0, B b 1, C c 2);
impl_tuple!(4, A a 0, B b 1, C c 2, D d 3);

macro_rules! impl_copy {
    ($ty:ty) => {
        impl TryClone for $ty {
            #[inline]
            fn try_clone(&self) -> Result<Self, Error> {
                Ok(*self)
            }
        }
    };
}

impl_copy!(char);
impl_copy!(bool);
impl_copy!(usize);
impl_copy!(isize);
impl_copy!(u8);
impl_copy!(u16);
impl_copy!(u32);
impl_copy!(u64);
impl_copy!(u128);
impl_copy!(i8);
impl_copy!(i16);
impl_copy!(i32);
impl_copy!(i64);
impl_copy!(i128);
impl_copy!(f32);
impl_copy!(f64);
impl_copy!(core::num::NonZeroUsize);
impl_copy!(core::num::NonZeroIsize);
impl_copy!(core::num::NonZeroU8);
impl_copy!(core::num::NonZeroU16);
impl_copy!(core::num::NonZeroU32);
impl_copy!(core::num::NonZeroU64);
impl_copy!(core::num::NonZeroU128);
impl_copy!(core::num::NonZeroI8);
impl_copy!(core::num::NonZeroI16);
impl_copy!(core::num::NonZeroI32);
impl_copy!(core::num::NonZeroI64);
impl_copy!(core::num::NonZeroI128);
