//! A contiguous growable array with a pluggable allocator.
//!
//! [`Vec<T, A>`] owns a single block of storage acquired through an
//! [`Allocator`], tracks how many elements are live in it and grows
//! geometrically (by a factor of two) when it runs out of room. Every
//! operation which might allocate is fallible and reports [`Error`] instead of
//! aborting, and an operation which fails leaves the vector untouched.
//!
//! ```
//! use kvec::{try_vec, Vec};
//!
//! let mut values = try_vec![1, 2, 3];
//! values.try_insert(1, 8)?;
//! values.try_insert_n(1, 3, 0)?;
//! assert_eq!(values, [1, 0, 0, 0, 8, 2, 3]);
//!
//! values.erase(..3);
//! assert_eq!(values.to_string(), "[0, 8, 2, 3]");
//! # Ok::<_, kvec::Error>(())
//! ```
//!
//! Storage can be supplied by a custom allocator, such as the pooling
//! [`Pool`]:
//!
//! ```
//! use kvec::{Pool, Vec};
//!
//! let pool = Pool::new();
//! let mut values = Vec::try_from_array_in([2, 4, 6, 8, 10], pool.clone())?;
//! values.try_push(12)?;
//! assert_eq!(values, [2, 4, 6, 8, 10, 12]);
//! # Ok::<_, kvec::Error>(())
//! ```
//!
//! Note that there is unsafety in here. Use with caution.

#![allow(clippy::comparison_chain)]
#![allow(clippy::type_complexity)]

#[macro_use]
mod public_macros;

pub use self::alloc::{AllocError, Allocator, Global, Pool, PoolStats};
pub mod alloc;

pub use self::clone::TryClone;
pub mod clone;

pub use self::error::Error;
mod error;

pub use self::iter::{IteratorExt, TryExtend, TryFromIterator, TryFromIteratorIn};
pub mod iter;

pub mod limit;

pub(crate) mod lifecycle;

pub(crate) mod raw_vec;

pub(crate) mod slice;

pub use self::vec::{Cursor, IntoIter, Vec};
pub mod vec;

pub mod prelude {
    //! Prelude for the fallible traits used in combination with this crate.
    pub use crate::{IteratorExt, TryClone, TryExtend, TryFromIterator, TryFromIteratorIn};
}

#[cfg(test)]
mod testing;

#[cfg(test)]
mod tests;
