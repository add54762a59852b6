/// Construct a [`Vec`] from a list of values or from a value and a count.
///
/// This is the initializer-list constructor. The generated code uses `?` to
/// propagate allocation errors, so it has to be used in a function returning
/// a `Result` whose error type implements `From<kvec::Error>`.
///
/// The resulting vector has exactly the capacity needed for its elements.
///
/// [`Vec`]: crate::Vec
///
/// # Examples
///
/// ```
/// use kvec::{try_vec, Vec};
///
/// let odd = try_vec![1, 3, 5, 7, 9];
/// assert_eq!(odd, [1, 3, 5, 7, 9]);
/// assert_eq!(odd.capacity(), 5);
///
/// let fives = try_vec![5; 10];
/// assert_eq!(fives.len(), 10);
///
/// let empty: Vec<u32> = try_vec![];
/// assert!(empty.is_empty());
/// # Ok::<_, kvec::Error>(())
/// ```
#[macro_export]
macro_rules! try_vec {
    () => (
        $crate::vec::Vec::new()
    );

    ($elem:expr; $n:expr) => (
        $crate::vec::try_from_elem($elem, $n)?
    );

    ($($x:expr),+ $(,)?) => (
        $crate::vec::Vec::try_from_array_in([$($x),+], $crate::alloc::Global)?
    );
}
