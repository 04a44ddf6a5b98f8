// Copyright © 2023-2025 Andrea Corbellini and contributors
// SPDX-License-Identifier: BSD-3-Clause

use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ptr::NonNull;
use core::slice;
use crate::CapacityError;
use crate::allocator::RawAllocator;

/// A block of `capacity` uninitialized slots obtained from a [`RawAllocator`].
///
/// `Slots` only owns the memory: it never reads, writes or drops the values stored in it. Keeping
/// track of which slots are initialized is the job of the owning buffer.
pub(crate) struct Slots<T, A>
    where A: RawAllocator
{
    ptr: NonNull<MaybeUninit<T>>,
    capacity: usize,
    pub(crate) alloc: A,
    /// `Slots` is semantically the owner of a `[T]`; this is relevant for drop-check and for
    /// covariance over `T`.
    marker: PhantomData<T>,
}

impl<T, A> Slots<T, A>
    where A: RawAllocator
{
    /// Returns a block with no slots. This does not allocate.
    #[inline]
    pub(crate) const fn empty(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            alloc,
            marker: PhantomData,
        }
    }

    /// Returns a block with `capacity` slots obtained from `alloc`.
    pub(crate) fn allocate_in(capacity: usize, alloc: A) -> Result<Self, (CapacityError, A)> {
        match Self::allocate_block(&alloc, capacity) {
            Ok(ptr) => Ok(Self { ptr, capacity, alloc, marker: PhantomData }),
            Err(err) => Err((err, alloc)),
        }
    }

    #[inline]
    pub(crate) const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[MaybeUninit<T>] {
        // SAFETY: `ptr` is either dangling with `capacity == 0`, points to a zero-sized type, or
        // points to a live block of `capacity` slots
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.capacity) }
    }

    #[inline]
    pub(crate) fn as_slice_mut(&mut self) -> &mut [MaybeUninit<T>] {
        // SAFETY: see `as_slice()`; `&mut self` guarantees exclusive access
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.capacity) }
    }

    /// Obtains a new block of `capacity` slots from the same allocator, without installing it.
    #[inline]
    pub(crate) fn allocate_detached(&self, capacity: usize) -> Result<NonNull<MaybeUninit<T>>, CapacityError> {
        Self::allocate_block(&self.alloc, capacity)
    }

    /// Installs a block returned by [`allocate_detached()`](Self::allocate_detached), releasing
    /// the current one. Values still stored in the current block are forgotten, not dropped.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate_detached(capacity)` on this same `Slots`.
    pub(crate) unsafe fn install(&mut self, ptr: NonNull<MaybeUninit<T>>, capacity: usize) {
        self.release();
        self.ptr = ptr;
        self.capacity = capacity;
    }

    /// Returns the layout of a block of `capacity` slots.
    pub(crate) fn layout(capacity: usize) -> Result<Layout, CapacityError> {
        Layout::array::<T>(capacity).map_err(|_| CapacityError::LayoutOverflow { capacity })
    }

    fn allocate_block(alloc: &A, capacity: usize) -> Result<NonNull<MaybeUninit<T>>, CapacityError> {
        let layout = Self::layout(capacity)?;
        if layout.size() == 0 {
            // Either `capacity` is 0 or `T` is a ZST: no memory is needed
            return Ok(NonNull::dangling());
        }
        match alloc.allocate(layout) {
            Some(ptr) => {
                ring_assert!(ptr.as_ptr() as usize % layout.align() == 0,
                             "allocator returned a misaligned block");
                report!(capacity, bytes = layout.size(), "allocated slots");
                Ok(ptr.cast())
            },
            None => {
                report!(capacity, bytes = layout.size(), "allocator refused block");
                Err(CapacityError::AllocationFailed { bytes: layout.size() })
            },
        }
    }

    fn release(&mut self) {
        let layout = match Self::layout(self.capacity) {
            Ok(layout) if layout.size() > 0 => layout,
            _ => return,
        };
        // SAFETY: a block with a non-zero size was obtained from `alloc` with this same layout
        let released = unsafe { self.alloc.deallocate(self.ptr.cast(), layout) };
        if !released {
            report!(capacity = self.capacity, bytes = layout.size(), "allocator refused to release slots");
        }
        self.ptr = NonNull::dangling();
        self.capacity = 0;
    }
}

impl<T, A> Drop for Slots<T, A>
    where A: RawAllocator
{
    #[inline]
    fn drop(&mut self) {
        self.release();
    }
}
