use core::alloc::Layout;
use core::cell::{Cell, RefCell};
use core::ptr::NonNull;

use std::collections::HashMap;
use std::rc::Rc;

use crate::alloc::{AllocError, Allocator, Global};
use crate::clone::TryClone;
use crate::error::Error;

pub(crate) trait TestExt<T> {
    fn abort(self) -> T;
}

impl<T> TestExt<T> for Result<T, Error> {
    #[track_caller]
    fn abort(self) -> T {
        match self {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

/// Shared counters for [`Tracked`] values.
#[derive(Default)]
pub(crate) struct Counters {
    created: Cell<usize>,
    clones: Cell<usize>,
    drops: Cell<usize>,
    /// Number of clones allowed before cloning starts failing.
    clone_budget: Cell<Option<usize>>,
}

impl Counters {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn make(self: &Rc<Self>, value: u32) -> Tracked {
        self.created.set(self.created.get() + 1);

        Tracked {
            value,
            counters: self.clone(),
        }
    }

    pub(crate) fn clones(&self) -> usize {
        self.clones.get()
    }

    pub(crate) fn drops(&self) -> usize {
        self.drops.get()
    }

    /// Values which have been constructed but not yet dropped.
    pub(crate) fn live(&self) -> usize {
        self.created.get() + self.clones.get() - self.drops.get()
    }

    pub(crate) fn fail_after(&self, clones: usize) {
        self.clone_budget.set(Some(clones));
    }
}

/// A value which records how often it is cloned and dropped.
pub(crate) struct Tracked {
    pub(crate) value: u32,
    counters: Rc<Counters>,
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl core::fmt::Debug for Tracked {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.value.fmt(f)
    }
}

impl TryClone for Tracked {
    fn try_clone(&self) -> Result<Self, Error> {
        if let Some(budget) = self.counters.clone_budget.get() {
            if budget == 0 {
                return Err(Error::from(AllocError {
                    layout: Layout::new::<Self>(),
                }));
            }

            self.counters.clone_budget.set(Some(budget - 1));
        }

        self.counters.clones.set(self.counters.clones.get() + 1);

        Ok(Tracked {
            value: self.value,
            counters: self.counters.clone(),
        })
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counters.drops.set(self.counters.drops.get() + 1);
    }
}

#[derive(Default)]
struct TrackingState {
    acquires: Cell<usize>,
    releases: Cell<usize>,
    live: RefCell<HashMap<usize, Layout>>,
}

/// An allocator which forwards to [`Global`] and checks that every block is
/// released exactly once with the layout it was allocated with.
#[derive(Default, Clone)]
pub(crate) struct Tracking {
    state: Rc<TrackingState>,
}

impl Tracking {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn acquires(&self) -> usize {
        self.state.acquires.get()
    }

    pub(crate) fn releases(&self) -> usize {
        self.state.releases.get()
    }

    /// Number of blocks which are currently allocated.
    pub(crate) fn outstanding(&self) -> usize {
        self.state.live.borrow().len()
    }
}

unsafe impl Allocator for Tracking {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        assert_ne!(layout.size(), 0, "zero-sized request reached the allocator");
        let block = Global.allocate(layout)?;
        self.state.acquires.set(self.state.acquires.get() + 1);

        let addr = block.cast::<u8>().as_ptr() as usize;
        let previous = self.state.live.borrow_mut().insert(addr, layout);
        assert!(previous.is_none(), "block {addr:#x} handed out twice");
        Ok(block)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        let addr = ptr.as_ptr() as usize;

        let Some(allocated) = self.state.live.borrow_mut().remove(&addr) else {
            panic!("block {addr:#x} released without being allocated");
        };

        assert_eq!(allocated, layout, "block {addr:#x} released with another layout");
        self.state.releases.set(self.state.releases.get() + 1);

        unsafe {
            Global.deallocate(ptr, layout);
        }
    }
}
