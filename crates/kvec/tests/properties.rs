use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;
use std::rc::Rc;

use kvec::prelude::*;
use kvec::{try_vec, AllocError, Allocator, Error, Global, Pool, Vec};

/// Counts calls made to the global allocator.
#[derive(Default, Clone)]
struct Counting {
    allocs: Rc<Cell<usize>>,
    deallocs: Rc<Cell<usize>>,
}

unsafe impl Allocator for Counting {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        self.allocs.set(self.allocs.get() + 1);
        Global.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.deallocs.set(self.deallocs.get() + 1);
        unsafe { Global.deallocate(ptr, layout) }
    }
}

#[test]
fn push_preserves_order() -> Result<(), Error> {
    let mut vec = Vec::new();

    for n in 0..1000u32 {
        vec.try_push(n)?;
        assert!(vec.len() <= vec.capacity());
    }

    assert!(vec.iter().copied().eq(0..1000));
    Ok(())
}

#[test]
fn reallocations_are_logarithmic() -> Result<(), Error> {
    let alloc = Counting::default();
    let mut vec = Vec::new_in(alloc.clone());
    let mut capacity = vec.capacity();

    for n in 0..10_000u32 {
        vec.try_push(n)?;
        assert!(vec.capacity() >= capacity);
        capacity = vec.capacity();
    }

    // ceil(log2(10_000)) + 1
    assert_eq!(alloc.allocs.get(), 15);
    drop(vec);
    assert_eq!(alloc.allocs.get(), alloc.deallocs.get());
    Ok(())
}

#[test]
fn insert_examples() -> Result<(), Error> {
    let mut vec = try_vec![1, 2, 3];
    vec.try_insert(1, 8)?;
    assert_eq!(vec, [1, 8, 2, 3]);

    vec.try_insert_n(1, 3, 0)?;
    assert_eq!(vec, [1, 0, 0, 0, 8, 2, 3]);
    assert_eq!(vec.to_string(), "[1, 0, 0, 0, 8, 2, 3]");
    Ok(())
}

#[test]
fn erase_prefix() -> Result<(), Error> {
    let mut vec: Vec<u32> = (0..10).try_collect()?;
    let capacity = vec.capacity();

    for k in [0, 1, 3] {
        let expected = vec[k..].to_vec();
        vec.erase(..k);
        assert_eq!(vec, expected);
    }

    assert_eq!(vec, [4, 5, 6, 7, 8, 9]);
    assert_eq!(vec.capacity(), capacity);

    vec.erase(2..);
    assert_eq!(vec, [4, 5]);
    Ok(())
}

#[test]
fn clear_keeps_storage() -> Result<(), Error> {
    let mut vec = try_vec![String::from("a"), String::from("b")];
    let capacity = vec.capacity();
    vec.clear();

    assert!(vec.is_empty());
    assert_eq!(vec.len(), 0);
    assert_eq!(vec.capacity(), capacity);
    Ok(())
}

#[test]
fn at_checks_bounds() -> Result<(), Error> {
    let vec = try_vec![8, 2, 3];
    assert_eq!(vec.at(1)?, &2);

    assert!(matches!(
        vec.at(vec.len()),
        Err(Error::OutOfRange { index: 3, len: 3, .. })
    ));

    let empty = Vec::<u32>::new();
    assert!(empty.at(0).is_err());
    Ok(())
}

#[test]
fn copies_are_independent() -> Result<(), Error> {
    let mut a = try_vec![String::from("x"), String::from("y")];
    let mut b = a.try_clone()?;
    assert_eq!(a, b);

    b[0].push('!');
    a.try_push(String::from("z"))?;

    assert_eq!(a, ["x", "y", "z"]);
    assert_eq!(b, ["x!", "y"]);
    Ok(())
}

#[test]
fn move_leaves_source_empty() -> Result<(), Error> {
    let mut a = try_vec![5; 10];
    let ptr = a.as_ptr();

    let b = a.take();
    assert_eq!(b.as_ptr(), ptr);
    assert_eq!(b, [5; 10]);
    assert!(a.is_empty());
    assert_eq!(a.to_string(), "[]");

    let mut c = try_vec![6; 15];
    let mut d = try_vec![1];
    d.assign_from(&mut c);
    assert_eq!(d.len(), 15);
    assert!(c.is_empty());

    // The source is still usable.
    c.try_push(1)?;
    assert_eq!(c, [1]);
    Ok(())
}

#[test]
fn initializer_round_trip() -> Result<(), Error> {
    let odd = try_vec![1, 3, 5, 7, 9];
    let mut seen = std::vec::Vec::new();

    let mut it = odd.begin();

    while it != odd.end() {
        seen.push(*it);
        it += 1;
    }

    assert_eq!(seen, [1, 3, 5, 7, 9]);
    Ok(())
}

#[test]
fn pool_recycles_storage() -> Result<(), Error> {
    let pool = Pool::new();

    for _ in 0..10 {
        let mut vec = Vec::new_in(pool.clone());

        for n in 0..64u64 {
            vec.try_push(n)?;
        }
    }

    let stats = pool.stats();
    // 1, 2, 4, .., 64 on the first round only.
    assert_eq!(stats.misses, 7);
    assert_eq!(stats.hits, 63);
    assert_eq!(stats.cached, 7);
    Ok(())
}

#[test]
fn other_element_types() -> Result<(), Error> {
    let floats = Vec::try_from_elem(5.5f64, 6)?;
    assert_eq!(floats.to_string(), "[5.5, 5.5, 5.5, 5.5, 5.5, 5.5]");

    let chars = try_vec!['k', 'v', 'e', 'c'];
    assert_eq!(chars.iter().collect::<String>(), "kvec");

    let mut longs = Vec::<i64>::new();
    longs.try_extend([-1, i64::MAX, i64::MIN])?;
    assert_eq!(longs, [-1, i64::MAX, i64::MIN]);
    Ok(())
}
