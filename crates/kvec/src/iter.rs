//! Fallible counterparts to the collection traits of [`core::iter`].

use crate::alloc::{Allocator, Global};
use crate::error::Error;

/// Extend a collection with the contents of an iterator.
///
/// # Examples
///
/// ```
/// use kvec::prelude::*;
/// use kvec::{try_vec, Vec};
///
/// let mut values = try_vec![1, 2];
/// values.try_extend([3, 4])?;
/// assert_eq!(values, [1, 2, 3, 4]);
/// # Ok::<_, kvec::Error>(())
/// ```
pub trait TryExtend<T> {
    /// Extends a collection with the contents of an iterator.
    fn try_extend<I>(&mut self, iter: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>;
}

/// Conversion from an [`Iterator`] within a custom allocator `A`.
///
/// # Examples
///
/// ```
/// use kvec::prelude::*;
/// use kvec::{Pool, Vec};
///
/// let pool = Pool::new();
/// let values = Vec::<u32, Pool>::try_from_iter_in(1..=3, pool)?;
/// assert_eq!(values, [1, 2, 3]);
/// # Ok::<_, kvec::Error>(())
/// ```
pub trait TryFromIteratorIn<T, A: Allocator>: Sized {
    /// Creates a value from an iterator within an allocator.
    fn try_from_iter_in<I>(iter: I, alloc: A) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>;
}

/// Conversion from an [`Iterator`] using the [`Global`] allocator.
pub trait TryFromIterator<T>: Sized {
    /// Creates a value from an iterator.
    fn try_from_iter<I>(iter: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>;
}

impl<T, U> TryFromIterator<T> for U
where
    U: TryFromIteratorIn<T, Global>,
{
    #[inline]
    fn try_from_iter<I>(iter: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
    {
        U::try_from_iter_in(iter, Global)
    }
}

/// Iterator extension trait.
pub trait IteratorExt: Iterator + Sized {
    /// Transforms an iterator into a collection using fallible allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use kvec::prelude::*;
    /// use kvec::Vec;
    ///
    /// let squares: Vec<u32> = (1..=4).map(|n| n * n).try_collect()?;
    /// assert_eq!(squares, [1, 4, 9, 16]);
    /// # Ok::<_, kvec::Error>(())
    /// ```
    fn try_collect<B>(self) -> Result<B, Error>
    where
        B: TryFromIterator<Self::Item>,
    {
        TryFromIterator::try_from_iter(self)
    }
}

impl<I> IteratorExt for I where I: Iterator {}
