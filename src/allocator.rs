// Copyright © 2023-2025 Andrea Corbellini and contributors
// SPDX-License-Identifier: BSD-3-Clause

//! The raw memory interface consumed by [`CircularBuffer`](crate::CircularBuffer).
//!
//! A buffer never talks to the heap directly: every block of slots it owns is obtained from, and
//! returned to, an implementation of [`RawAllocator`]. The buffer stores its allocator by value
//! and clones it when the buffer itself is cloned, so implementations are expected to be cheap to
//! clone (a unit struct, a reference, or an `Rc`/`Arc` handle to shared state).
//!
//! # Examples
//!
//! An allocator that refuses anything larger than a fixed budget:
//!
//! ```
//! use circular_deque::CircularBuffer;
//! use circular_deque::CapacityError;
//! use circular_deque::allocator::Global;
//! use circular_deque::allocator::RawAllocator;
//! use core::alloc::Layout;
//! use core::ptr::NonNull;
//!
//! #[derive(Copy, Clone, Default)]
//! struct Budget;
//!
//! unsafe impl RawAllocator for Budget {
//!     fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
//!         if layout.size() > 64 {
//!             return None;
//!         }
//!         Global.allocate(layout)
//!     }
//!
//!     unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) -> bool {
//!         Global.deallocate(ptr, layout)
//!     }
//! }
//!
//! let mut buf = CircularBuffer::<u32, Budget>::with_capacity(16).unwrap();
//! assert_eq!(buf.resize(17), Err(CapacityError::AllocationFailed { bytes: 68 }));
//! assert_eq!(buf.capacity(), 16);
//! ```

use core::alloc::Layout;
use core::ptr::NonNull;

/// A source of raw memory blocks.
///
/// # Safety
///
/// A pointer returned by [`allocate()`](Self::allocate) must be valid for reads and writes of
/// `layout.size()` bytes, must be aligned to `layout.align()`, and must stay valid until it is
/// passed to [`deallocate()`](Self::deallocate) on this allocator or on one of its clones.
/// Blocks handed out by different calls must not overlap.
pub unsafe trait RawAllocator {
    /// Allocates a block described by `layout`, or returns `None` if the memory is not available.
    ///
    /// `layout` always has a non-zero size.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Releases a block previously returned by [`allocate()`](Self::allocate).
    ///
    /// Returns `false` if the allocator could not take the block back. The caller must not use
    /// the block afterwards either way.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate()` on this allocator (or a clone of it) with the
    /// same `layout`, and must not have been deallocated already.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) -> bool;
}

unsafe impl<A> RawAllocator for &A
    where A: RawAllocator + ?Sized
{
    #[inline]
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) -> bool {
        (**self).deallocate(ptr, layout)
    }
}

/// The Rust global heap.
///
/// This is the allocator used by [`CircularBuffer`](crate::CircularBuffer) unless another one is
/// specified.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct Global;

unsafe impl RawAllocator for Global {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        ring_assert!(layout.size() > 0, "zero-sized allocation request");
        // SAFETY: `layout` has a non-zero size
        let ptr = NonNull::new(unsafe { alloc::alloc::alloc(layout) });
        if ptr.is_some() {
            report!(bytes = layout.size(), address = ?ptr, "global allocator allocated block");
        } else {
            report!(bytes = layout.size(), "global allocator is out of memory");
        }
        ptr
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) -> bool {
        report!(bytes = layout.size(), address = ?ptr, "global allocator released block");
        alloc::alloc::dealloc(ptr.as_ptr(), layout);
        true
    }
}
