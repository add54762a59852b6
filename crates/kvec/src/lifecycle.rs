//! Construction and destruction of values in raw storage.
//!
//! These are the only places where values enter or leave the storage owned by
//! a [`RawVec`]. Moving a value in Rust is a bitwise copy after which the
//! source is considered uninitialized, so relocating elements never runs user
//! code.
//!
//! [`RawVec`]: crate::raw_vec::RawVec

use core::ptr;

use crate::clone::TryClone;
use crate::error::Error;

/// Construct `value` in place at `dst`.
///
/// # Safety
///
/// `dst` must be valid for writes and properly aligned. Whatever was stored
/// at `dst` is overwritten without being dropped.
#[inline]
pub(crate) unsafe fn construct<T>(dst: *mut T, value: T) {
    unsafe { ptr::write(dst, value) }
}

/// Construct a clone of `src` in place at `dst`.
///
/// Nothing is written if cloning fails.
///
/// # Safety
///
/// Same as [`construct`].
#[inline]
pub(crate) unsafe fn clone_into<T>(dst: *mut T, src: &T) -> Result<(), Error>
where
    T: TryClone,
{
    let value = src.try_clone()?;
    unsafe { construct(dst, value) };
    Ok(())
}

/// Destroy `len` consecutive values starting at `ptr`, leaving the slots
/// uninitialized.
///
/// # Safety
///
/// Every value in `ptr..ptr + len` must be live and is not used again
/// afterwards.
#[inline]
pub(crate) unsafe fn destroy_slice<T>(ptr: *mut T, len: usize) {
    unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr, len)) }
}

/// Move `len` values from `src` into `dst`.
///
/// After this the values in `src` are logically uninitialized.
///
/// # Safety
///
/// The two regions must not overlap, `src` must hold `len` live values and
/// `dst` must be valid for `len` writes.
#[inline]
pub(crate) unsafe fn relocate<T>(src: *const T, dst: *mut T, len: usize) {
    unsafe { ptr::copy_nonoverlapping(src, dst, len) }
}

/// Move `len` values from `src` to `dst` within the same block, where the two
/// regions may overlap.
///
/// # Safety
///
/// `src` must hold `len` live values and `dst` must be valid for `len`
/// writes. Values in the part of `src` not covered by `dst` are logically
/// uninitialized afterwards.
#[inline]
pub(crate) unsafe fn shift<T>(src: *const T, dst: *mut T, len: usize) {
    unsafe { ptr::copy(src, dst, len) }
}
