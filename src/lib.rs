//! This crate implements a resizable [circular buffer], also known as cyclic buffer, circular
//! queue or ring, that can be used as a double-ended queue.
//!
//! The main struct is [`CircularBuffer`]. It owns one contiguous block of memory, obtained from a
//! pluggable [`RawAllocator`], that holds up to [`capacity()`](CircularBuffer::capacity) elements.
//! Elements can be pushed and popped at both ends in constant time. Unlike a [`Vec`] or a
//! [`VecDeque`], the buffer never grows by itself: once it is full, pushing fails and hands the
//! element back to the caller, until [`resize()`](CircularBuffer::resize) is called explicitly.
//!
//! [circular buffer]: https://en.wikipedia.org/wiki/Circular_buffer
//! [`Vec`]: alloc::vec::Vec
//! [`VecDeque`]: alloc::collections::VecDeque
//!
//! # Examples
//!
//! ```
//! use circular_deque::CircularBuffer;
//!
//! // Initialize a new, empty circular buffer with room for 4 elements
//! let mut buf = CircularBuffer::<u32>::with_capacity(4).unwrap();
//!
//! // Add a few elements at both ends
//! buf.push_back(1).unwrap();
//! buf.push_back(2).unwrap();
//! buf.push_front(0).unwrap();
//! assert_eq!(buf, [0, 1, 2]);
//!
//! // Fill the buffer: further pushes are rejected and the element is given back
//! buf.push_back(3).unwrap();
//! assert_eq!(buf.push_back(4), Err(4));
//! assert_eq!(buf, [0, 1, 2, 3]);
//!
//! // Make room explicitly
//! buf.resize(8).unwrap();
//! buf.push_back(4).unwrap();
//! assert_eq!(buf, [0, 1, 2, 3, 4]);
//!
//! assert_eq!(buf.pop_front(), Some(0));
//! assert_eq!(buf.pop_back(), Some(4));
//! assert_eq!(buf, [1, 2, 3]);
//! ```
//!
//! # Physical indexes
//!
//! Every element lives in a fixed slot of the underlying memory until it is popped or the buffer
//! is resized. Pushing returns the *physical index* of that slot, which can be used later to look
//! at the element again with [`look_at()`](CircularBuffer::look_at) or to start a [`Cursor`] with
//! [`cursor_at()`](CircularBuffer::cursor_at):
//!
//! ```
//! use circular_deque::CircularBuffer;
//!
//! let mut buf = CircularBuffer::<&str>::with_capacity(4).unwrap();
//! let a = buf.push_back("a").unwrap();
//! let b = buf.push_back("b").unwrap();
//! let z = buf.push_front("z").unwrap();
//!
//! assert_eq!((a, b, z), (0, 3, 1));
//! assert_eq!(buf.look_at(b), Some(&"b"));
//! assert_eq!(buf.look_at(2), None); // slot 2 is not occupied
//! ```
//!
//! The front of the buffer is the *head* slot; pushing to the front moves the head forward,
//! wrapping from the last slot to slot 0. The back of the buffer is the *tail* slot, which is never
//! stored: it is always `len() - 1` slots behind the head. The live elements therefore occupy one
//! contiguous arc of slots, from the tail forward to the head, that may wrap around the end of the
//! memory block.
//!
//! Physical indexes are only stable until the next [`resize()`](CircularBuffer::resize), which
//! moves every element so that the tail lands in slot 0.
//!
//! # Interface
//!
//! ## Adding/removing elements
//!
//! * [`push_back()`](CircularBuffer::push_back), [`push_front()`](CircularBuffer::push_front)
//! * [`emplace_back()`](CircularBuffer::emplace_back), [`emplace_front()`](CircularBuffer::emplace_front)
//! * [`pop_back()`](CircularBuffer::pop_back), [`pop_front()`](CircularBuffer::pop_front)
//! * [`clear()`](CircularBuffer::clear)
//!
//! ## Getting/mutating elements
//!
//! * [`peek_front()`](CircularBuffer::peek_front), [`peek_front_mut()`](CircularBuffer::peek_front_mut)
//! * [`peek_back()`](CircularBuffer::peek_back), [`peek_back_mut()`](CircularBuffer::peek_back_mut)
//! * [`look_at()`](CircularBuffer::look_at), [`look_at_mut()`](CircularBuffer::look_at_mut)
//! * [`get()`](CircularBuffer::get), [`get_mut()`](CircularBuffer::get_mut)
//!
//! ## Iterators and cursors
//!
//! * [`iter()`](CircularBuffer::iter), [`iter_mut()`](CircularBuffer::iter_mut),
//!   [`into_iter()`](CircularBuffer::into_iter)
//! * [`cursor_begin()`](CircularBuffer::cursor_begin), [`cursor_end()`](CircularBuffer::cursor_end),
//!   [`cursor_front()`](CircularBuffer::cursor_front), [`cursor_back()`](CircularBuffer::cursor_back),
//!   [`cursor_at()`](CircularBuffer::cursor_at)
//!
//! ## Writing/reading bytes
//!
//! For the special case of a `CircularBuffer` containing `u8` elements, bytes can be written and
//! read using the standard [`Write`](std::io::Write) and [`Read`](std::io::Read) traits. Writing
//! stops once the buffer is full, and reading consumes bytes from the front of the buffer.
//!
//! ```
//! use circular_deque::CircularBuffer;
//! use std::io::Read;
//! use std::io::Write;
//!
//! let mut buf = CircularBuffer::<u8>::with_capacity(5).unwrap();
//! assert_eq!(buf.write(b"hello world").unwrap(), 5);
//! assert_eq!(buf, b"hello");
//!
//! let mut s = String::new();
//! buf.read_to_string(&mut s).expect("failed to read from buffer");
//! assert_eq!(s, "hello");
//! assert!(buf.is_empty());
//! ```
//!
//! # Time complexity
//!
//! | Method                                                                                    | Complexity                                                   |
//! |-------------------------------------------------------------------------------------------|--------------------------------------------------------------|
//! | [`push_back()`](CircularBuffer::push_back), [`push_front()`](CircularBuffer::push_front) | *O*(1)                                                       |
//! | [`pop_back()`](CircularBuffer::pop_back), [`pop_front()`](CircularBuffer::pop_front)     | *O*(1)                                                       |
//! | [`look_at()`](CircularBuffer::look_at), [`get()`](CircularBuffer::get)                   | *O*(1)                                                       |
//! | [`Cursor::advance()`], [`Cursor::retreat()`]                                             | *O*(1)                                                       |
//! | [`resize()`](CircularBuffer::resize)                                                      | *O*(*n*)                                                     |
//! | [`clear()`](CircularBuffer::clear)                                                        | *O*(*n*) for types that implement [`Drop`], *O*(1) otherwise |
//!
//! # `no_std`
//!
//! This crate can be used in a [`no_std` environment] that provides the `alloc` crate, although
//! the `std::io` integration won't be available in `no_std` mode. To use this crate in `no_std`
//! mode, disable the default features for this crate in your `Cargo.toml`:
//!
//! ```text
//! [dependencies]
//! circular-deque = { version = "0.1", default-features = false }
//! ```
//!
//! [`no_std` environment]: https://docs.rust-embedded.org/book/intro/no-std.html

#![cfg_attr(not(feature = "std"), no_std)]

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(unreachable_pub)]
#![warn(unused_qualifications)]

extern crate alloc;

#[macro_use]
mod debug;

mod backend;
mod cursor;
mod error;
mod index;
mod iter;

#[cfg(feature = "std")]
mod io;

#[cfg(any(feature = "embedded-io", feature = "embedded-io-async"))]
mod embedded_io;


pub mod allocator;

use core::alloc::Layout;
use core::cmp::Ordering;
use core::fmt;
use core::hash::Hash;
use core::hash::Hasher;
use core::mem;
use core::ptr;
use alloc::vec::Vec;
use crate::allocator::Global;
use crate::allocator::RawAllocator;
use crate::backend::Slots;
use crate::index::Occupancy;
use crate::index::wrap_dec;

pub use crate::cursor::Cursor;
pub use crate::cursor::Position;
pub use crate::error::CapacityError;
pub use crate::iter::IntoIter;
pub use crate::iter::Iter;
pub use crate::iter::IterMut;

#[cfg(any(feature = "embedded-io", feature = "embedded-io-async"))]
pub use crate::embedded_io::BufferFull;

/// The sentinel physical index.
///
/// It is never the index of an occupied slot, and it is rejected as a capacity by
/// [`CircularBuffer::resize()`].
pub const INVALID_INDEX: usize = usize::MAX;

/// A double-ended circular buffer with a fixed capacity that can be changed on request.
///
/// The memory for the elements is obtained from the allocator `A`, which defaults to the Rust
/// global heap.
///
/// See the [module-level documentation](self) for more details and examples.
pub struct CircularBuffer<T, A = Global>
    where A: RawAllocator
{
    slots: Slots<T, A>,
    /// Physical index of the front element, or `INVALID_INDEX` if the buffer is empty.
    head: usize,
    len: usize,
}

// SAFETY: `CircularBuffer` owns its elements and its allocator; it is as thread-safe as they are
unsafe impl<T, A> Send for CircularBuffer<T, A>
    where T: Send, A: RawAllocator + Send
{}

// SAFETY: see above
unsafe impl<T, A> Sync for CircularBuffer<T, A>
    where T: Sync, A: RawAllocator + Sync
{}

impl<T, A> CircularBuffer<T, A>
    where A: RawAllocator + Default
{
    /// Returns an empty `CircularBuffer` with a capacity of 0.
    ///
    /// This does not allocate. Every push will fail until the buffer is given a capacity with
    /// [`resize()`](Self::resize).
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<u32>::new();
    /// assert_eq!(buf.capacity(), 0);
    /// assert_eq!(buf.push_back(1), Err(1));
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::new_in(A::default())
    }

    /// Returns an empty `CircularBuffer` that can hold `capacity` elements.
    ///
    /// A `capacity` of 0 does not allocate and always succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the allocator cannot provide the memory, or if the size of the block
    /// would overflow.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let buf = CircularBuffer::<u32>::with_capacity(16).unwrap();
    /// assert_eq!(buf.capacity(), 16);
    /// assert!(buf.is_empty());
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        Self::with_capacity_in(capacity, A::default())
    }
}

impl<T, A> CircularBuffer<T, A>
    where A: RawAllocator
{
    /// Returns an empty `CircularBuffer` with a capacity of 0 that will obtain its memory from
    /// `alloc`.
    #[inline]
    #[must_use]
    pub const fn new_in(alloc: A) -> Self {
        Self {
            slots: Slots::empty(alloc),
            head: INVALID_INDEX,
            len: 0,
        }
    }

    /// Returns an empty `CircularBuffer` that can hold `capacity` elements, with memory obtained
    /// from `alloc`.
    ///
    /// # Errors
    ///
    /// Returns an error if `alloc` cannot provide the memory, or if the size of the block would
    /// overflow.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, CapacityError> {
        if capacity == INVALID_INDEX {
            return Err(CapacityError::InvalidSentinel);
        }
        let slots = Slots::allocate_in(capacity, alloc).map_err(|(err, _)| err)?;
        Ok(Self { slots, head: INVALID_INDEX, len: 0 })
    }

    /// Returns a reference to the allocator used by the buffer.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.slots.alloc
    }

    /// Returns the capacity of the buffer.
    ///
    /// This is the maximum number of elements that the buffer can hold before it needs to be
    /// resized.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    /// let buf = CircularBuffer::<u32>::with_capacity(16).unwrap();
    /// assert_eq!(buf.capacity(), 16);
    /// ```
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the number of elements in the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<u32>::with_capacity(16).unwrap();
    /// assert_eq!(buf.len(), 0);
    ///
    /// buf.push_back(1).unwrap();
    /// buf.push_back(2).unwrap();
    /// buf.push_back(3).unwrap();
    /// assert_eq!(buf.len(), 3);
    /// ```
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer contains 0 elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the number of elements in the buffer matches the buffer capacity.
    ///
    /// An unallocated buffer (with a capacity of 0) is always full.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<u32>::with_capacity(2).unwrap();
    /// assert!(!buf.is_full());
    ///
    /// buf.push_back(1).unwrap();
    /// buf.push_back(2).unwrap();
    /// assert!(buf.is_full());
    /// ```
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Returns the physical index of the front element, or `None` if the buffer is empty.
    #[inline]
    pub const fn head_index(&self) -> Option<usize> {
        if self.len == 0 { None } else { Some(self.head) }
    }

    /// Returns the physical index of the back element, or `None` if the buffer is empty.
    ///
    /// The back element always sits `len() - 1` slots behind the front element, wrapping from
    /// slot 0 to the last slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<char>::with_capacity(4).unwrap();
    /// assert_eq!(buf.tail_index(), None);
    ///
    /// buf.push_back('a').unwrap();
    /// assert_eq!(buf.tail_index(), Some(0));
    ///
    /// buf.push_back('b').unwrap();
    /// assert_eq!(buf.tail_index(), Some(3));
    /// assert_eq!(buf.head_index(), Some(0));
    /// ```
    #[inline]
    pub const fn tail_index(&self) -> Option<usize> {
        match self.occupancy().tail() {
            INVALID_INDEX => None,
            tail => Some(tail),
        }
    }

    /// Returns `true` if the slot at the physical `index` currently holds an element.
    ///
    /// Exactly [`len()`](Self::len) indexes are occupied at any time, and they form a single arc
    /// from the tail forward to the head, possibly wrapping around the last slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<u32>::with_capacity(5).unwrap();
    /// buf.push_back(1).unwrap(); // slot 0
    /// buf.push_back(2).unwrap(); // slot 4
    /// buf.push_front(0).unwrap(); // slot 1
    ///
    /// let occupied: Vec<usize> = (0..5).filter(|&i| buf.is_index_occupied(i)).collect();
    /// assert_eq!(occupied, [0, 1, 4]);
    /// ```
    #[inline]
    pub const fn is_index_occupied(&self, index: usize) -> bool {
        self.occupancy().contains(index)
    }

    #[inline]
    pub(crate) const fn occupancy(&self) -> Occupancy {
        Occupancy::new(self.head, self.len, self.capacity())
    }

    /// Appends an element to the back of the buffer, returning the physical index of the slot
    /// that now holds it.
    ///
    /// The new element goes one slot behind the current back element, wrapping from slot 0 to the
    /// last slot. The first element pushed into an empty buffer always goes to slot 0.
    ///
    /// # Errors
    ///
    /// If the buffer is full (or has a capacity of 0), the buffer is left unchanged and `item` is
    /// returned back.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<u32>::with_capacity(2).unwrap();
    /// assert_eq!(buf.push_back(1), Ok(0));
    /// assert_eq!(buf.push_back(2), Ok(1));
    /// assert_eq!(buf.push_back(3), Err(3));
    /// assert_eq!(buf, [1, 2]);
    /// ```
    pub fn push_back(&mut self, item: T) -> Result<usize, T> {
        if self.is_full() {
            report!(capacity = self.capacity(), "push_back rejected: buffer full");
            return Err(item);
        }
        let index = self.occupancy().next_tail();
        self.slots.as_slice_mut()[index].write(item);
        if self.len == 0 {
            self.head = index;
        }
        self.len += 1;
        ring_assert!(self.occupancy().tail() == index, "tail desynchronized after push_back");
        Ok(index)
    }

    /// Prepends an element to the front of the buffer, returning the physical index of the slot
    /// that now holds it.
    ///
    /// The new element goes one slot after the current front element, wrapping from the last slot
    /// to slot 0. The first element pushed into an empty buffer always goes to slot 0.
    ///
    /// # Errors
    ///
    /// If the buffer is full (or has a capacity of 0), the buffer is left unchanged and `item` is
    /// returned back.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<u32>::with_capacity(3).unwrap();
    /// assert_eq!(buf.push_front(1), Ok(0));
    /// assert_eq!(buf.push_front(2), Ok(1));
    /// assert_eq!(buf, [2, 1]);
    /// ```
    pub fn push_front(&mut self, item: T) -> Result<usize, T> {
        if self.is_full() {
            report!(capacity = self.capacity(), "push_front rejected: buffer full");
            return Err(item);
        }
        let index = self.occupancy().next_head();
        self.slots.as_slice_mut()[index].write(item);
        self.head = index;
        self.len += 1;
        Ok(index)
    }

    /// Removes and returns the front element, or `None` if the buffer is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<u32>::with_capacity(4).unwrap();
    /// buf.push_back(1).unwrap();
    /// buf.push_back(2).unwrap();
    ///
    /// assert_eq!(buf.pop_front(), Some(1));
    /// assert_eq!(buf.pop_front(), Some(2));
    /// assert_eq!(buf.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let index = self.head;
        // Update the bookkeeping first so that the slot is no longer considered occupied
        if self.len > 1 {
            self.head = wrap_dec(index, self.capacity());
            self.len -= 1;
        } else {
            self.head = INVALID_INDEX;
            self.len = 0;
        }
        // SAFETY: `index` was the front slot, which is initialized; it is now outside of the
        // occupied arc, so it will not be read again
        Some(unsafe { self.slots.as_slice()[index].assume_init_read() })
    }

    /// Removes and returns the back element, or `None` if the buffer is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<u32>::with_capacity(4).unwrap();
    /// buf.push_back(1).unwrap();
    /// buf.push_back(2).unwrap();
    ///
    /// assert_eq!(buf.pop_back(), Some(2));
    /// assert_eq!(buf.pop_back(), Some(1));
    /// assert_eq!(buf.pop_back(), None);
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let index = self.occupancy().tail();
        if self.len > 1 {
            self.len -= 1;
        } else {
            self.head = INVALID_INDEX;
            self.len = 0;
        }
        // SAFETY: `index` was the back slot, which is initialized; it is now outside of the
        // occupied arc, so it will not be read again
        Some(unsafe { self.slots.as_slice()[index].assume_init_read() })
    }

    /// Returns a reference to the front element, or `None` if the buffer is empty.
    #[inline]
    pub fn peek_front(&self) -> Option<&T> {
        self.head_index().and_then(|index| self.look_at(index))
    }

    /// Returns a mutable reference to the front element, or `None` if the buffer is empty.
    #[inline]
    pub fn peek_front_mut(&mut self) -> Option<&mut T> {
        self.head_index().and_then(|index| self.look_at_mut(index))
    }

    /// Returns a reference to the back element, or `None` if the buffer is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<char>::with_capacity(4).unwrap();
    /// assert_eq!(buf.peek_back(), None);
    ///
    /// buf.push_back('a').unwrap();
    /// buf.push_back('b').unwrap();
    /// assert_eq!(buf.peek_back(), Some(&'b'));
    /// assert_eq!(buf.peek_front(), Some(&'a'));
    /// ```
    #[inline]
    pub fn peek_back(&self) -> Option<&T> {
        self.tail_index().and_then(|index| self.look_at(index))
    }

    /// Returns a mutable reference to the back element, or `None` if the buffer is empty.
    #[inline]
    pub fn peek_back_mut(&mut self) -> Option<&mut T> {
        self.tail_index().and_then(|index| self.look_at_mut(index))
    }

    /// Returns a reference to the element in the slot at the physical `index`, or `None` if that
    /// slot is not occupied.
    ///
    /// Physical indexes are returned by [`push_back()`](Self::push_back),
    /// [`push_front()`](Self::push_front), [`head_index()`](Self::head_index),
    /// [`tail_index()`](Self::tail_index) and [`Cursor::index()`]. To access elements by their
    /// position relative to the front of the buffer, use [`get()`](Self::get) instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<char>::with_capacity(4).unwrap();
    /// let index = buf.push_back('a').unwrap();
    /// buf.push_front('b').unwrap();
    ///
    /// assert_eq!(buf.look_at(index), Some(&'a'));
    /// assert_eq!(buf.pop_back(), Some('a'));
    /// assert_eq!(buf.look_at(index), None);
    /// ```
    #[inline]
    pub fn look_at(&self, index: usize) -> Option<&T> {
        if !self.is_index_occupied(index) {
            return None;
        }
        // SAFETY: occupied slots are initialized
        Some(unsafe { self.slots.as_slice()[index].assume_init_ref() })
    }

    /// Returns a mutable reference to the element in the slot at the physical `index`, or `None`
    /// if that slot is not occupied.
    #[inline]
    pub fn look_at_mut(&mut self, index: usize) -> Option<&mut T> {
        if !self.is_index_occupied(index) {
            return None;
        }
        // SAFETY: occupied slots are initialized
        Some(unsafe { self.slots.as_slice_mut()[index].assume_init_mut() })
    }

    /// Returns a reference to the element at logical position `index`, where position 0 is the
    /// front of the buffer, or `None` if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<char>::with_capacity(4).unwrap();
    /// buf.push_back('b').unwrap();
    /// buf.push_back('c').unwrap();
    /// buf.push_front('a').unwrap();
    ///
    /// assert_eq!(buf.get(0), Some(&'a'));
    /// assert_eq!(buf.get(2), Some(&'c'));
    /// assert_eq!(buf.get(3), None);
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.occupancy().logical(index).and_then(|index| self.look_at(index))
    }

    /// Returns a mutable reference to the element at logical position `index`, where position 0
    /// is the front of the buffer, or `None` if `index` is out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.occupancy().logical(index).and_then(move |index| self.look_at_mut(index))
    }

    /// Changes the capacity of the buffer to `new_capacity`, keeping every element in order.
    ///
    /// On success, a new block of memory is obtained from the allocator, the elements are moved
    /// into it so that the back element lands in slot 0 and the front element in slot
    /// `len() - 1`, and the old block is released. This is the only operation that can change
    /// the physical index of an element.
    ///
    /// # Errors
    ///
    /// The buffer is left unchanged if `new_capacity` is 0, is [`INVALID_INDEX`], or is smaller
    /// than [`len()`](Self::len), or if the allocator cannot provide the memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CapacityError;
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<u32>::with_capacity(2).unwrap();
    /// buf.push_back(1).unwrap();
    /// buf.push_back(2).unwrap();
    /// assert_eq!(buf.push_back(3), Err(3));
    ///
    /// buf.resize(3).unwrap();
    /// buf.push_back(3).unwrap();
    /// assert_eq!(buf, [1, 2, 3]);
    ///
    /// assert_eq!(buf.resize(2), Err(CapacityError::BelowLength { requested: 2, len: 3 }));
    /// assert_eq!(buf.resize(0), Err(CapacityError::Zero));
    /// assert_eq!(buf.capacity(), 3);
    /// ```
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), CapacityError> {
        if new_capacity == 0 {
            return Err(CapacityError::Zero);
        }
        if new_capacity == INVALID_INDEX {
            return Err(CapacityError::InvalidSentinel);
        }
        if new_capacity < self.len {
            return Err(CapacityError::BelowLength { requested: new_capacity, len: self.len });
        }

        let block = self.slots.allocate_detached(new_capacity)?;
        let occ = self.occupancy();
        let src = self.slots.as_slice_mut().as_mut_ptr();
        let dst = block.as_ptr();

        if !occ.is_empty() {
            let tail = occ.tail();
            // SAFETY: the source ranges lie on the occupied arc and are initialized; `dst` is a
            // fresh block with room for `new_capacity >= len` slots, so the ranges cannot overlap
            unsafe {
                if occ.is_wrapped() {
                    let tail_part = occ.capacity - tail;
                    ptr::copy_nonoverlapping(src.add(tail), dst, tail_part);
                    ptr::copy_nonoverlapping(src, dst.add(tail_part), occ.head + 1);
                } else {
                    ptr::copy_nonoverlapping(src.add(tail), dst, occ.len);
                }
            }
            self.head = occ.len - 1;
        }

        report!(old_capacity = occ.capacity, new_capacity, len = occ.len, wrapped = occ.is_wrapped(), "resized");

        // SAFETY: `block` was just obtained from `allocate_detached(new_capacity)`. The values in
        // the old block have been moved out, so it is released without dropping them.
        unsafe { self.slots.install(block, new_capacity) };
        Ok(())
    }

    /// Drops all the elements in the buffer, keeping its capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<u32>::with_capacity(4).unwrap();
    /// buf.extend([1, 2, 3]);
    /// buf.clear();
    /// assert!(buf.is_empty());
    /// assert_eq!(buf.capacity(), 4);
    /// ```
    pub fn clear(&mut self) {
        if self.len == 0 {
            return;
        }

        // Drops all the items in the slice when dropped. This is needed to ensure that all
        // elements are dropped in case a panic occurs during the drop of a single element.
        struct Dropper<'a, T>(&'a mut [T]);

        impl<'a, T> Drop for Dropper<'a, T> {
            #[inline]
            fn drop(&mut self) {
                // SAFETY: the slice only covers elements that were on the occupied arc
                unsafe { ptr::drop_in_place(self.0); }
            }
        }

        let (tail_run, head_run) = self.as_mut_slices();
        let tail_run: *mut [T] = tail_run;
        let head_run: *mut [T] = head_run;

        // The buffer is emptied before dropping, so no value will be dropped twice in case of
        // panics
        self.head = INVALID_INDEX;
        self.len = 0;

        // SAFETY: the memory behind the slices is still owned by `self.slots`, and nothing else
        // can reach the elements now that the buffer is marked empty
        let _tail_run = Dropper(unsafe { &mut *tail_run });
        let _head_run = Dropper(unsafe { &mut *head_run });
    }

    /// Returns the occupied arc as a pair of slices, in physical order.
    ///
    /// The first slice starts at the back element; the second slice is non-empty only if the arc
    /// wraps around the last slot, and ends at the front element. Because elements pushed to the
    /// back go to lower indexes, the slices list the elements from **back to front**. Use
    /// [`iter()`](Self::iter) to visit them from front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<u32>::with_capacity(4).unwrap();
    /// buf.push_back(1).unwrap(); // slot 0
    /// buf.push_back(2).unwrap(); // slot 3
    /// buf.push_front(0).unwrap(); // slot 1
    ///
    /// assert_eq!(buf.as_slices(), (&[2][..], &[1, 0][..]));
    /// ```
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let occ = self.occupancy();
        if occ.is_empty() {
            return (&[], &[]);
        }

        let tail = occ.tail();
        let slots = self.slots.as_slice();
        let (tail_run, head_run) = if occ.is_wrapped() {
            (&slots[tail..], &slots[..=occ.head])
        } else {
            (&slots[tail..=occ.head], &[][..])
        };

        // SAFETY: The elements in these slices are guaranteed to be initialized
        unsafe {
            (slice_assume_init_ref(tail_run), slice_assume_init_ref(head_run))
        }
    }

    /// Returns the occupied arc as a pair of mutable slices, in physical order.
    ///
    /// See [`as_slices()`](Self::as_slices) for the order of the elements.
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let occ = self.occupancy();
        if occ.is_empty() {
            return (&mut [], &mut []);
        }

        let tail = occ.tail();
        let slots = self.slots.as_slice_mut();
        let (tail_run, head_run) = if occ.is_wrapped() {
            let (low, high) = slots.split_at_mut(tail);
            (high, &mut low[..=occ.head])
        } else {
            (&mut slots[tail..=occ.head], &mut [][..])
        };

        // SAFETY: The elements in these slices are guaranteed to be initialized
        unsafe {
            (slice_assume_init_mut(tail_run), slice_assume_init_mut(head_run))
        }
    }

    /// Returns an iterator over the elements of the buffer.
    ///
    /// The iterator advances from front to back. Use [`.rev()`](Iter::rev) to advance from back
    /// to front.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<char>::with_capacity(5).unwrap();
    /// buf.extend("abc".chars());
    /// let mut it = buf.iter();
    ///
    /// assert_eq!(it.next(), Some(&'a'));
    /// assert_eq!(it.next(), Some(&'b'));
    /// assert_eq!(it.next(), Some(&'c'));
    /// assert_eq!(it.next(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Returns an iterator over the elements of the buffer that allows modifying each value.
    ///
    /// The iterator advances from front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<u32>::with_capacity(5).unwrap();
    /// buf.extend([1, 2, 3]);
    /// for elem in buf.iter_mut() {
    ///     *elem += 5;
    /// }
    /// assert_eq!(buf, [6, 7, 8]);
    /// ```
    #[inline]
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Returns a cursor positioned before the back element.
    ///
    /// Moving the cursor forward with [`Cursor::move_next()`] visits the elements from back to
    /// front, then reaches [`Position::End`].
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<char>::with_capacity(4).unwrap();
    /// buf.extend("abc".chars());
    ///
    /// let mut cursor = buf.cursor_begin();
    /// let mut visited = Vec::new();
    /// while let Some(c) = cursor.move_next().get() {
    ///     visited.push(*c);
    /// }
    /// assert_eq!(visited, ['c', 'b', 'a']);
    /// ```
    #[inline]
    #[must_use]
    pub fn cursor_begin(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, Position::Begin)
    }

    /// Returns a cursor positioned after the front element.
    #[inline]
    #[must_use]
    pub fn cursor_end(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, Position::End)
    }

    /// Returns a cursor positioned on the front element, or at [`Position::End`] if the buffer
    /// is empty.
    #[inline]
    #[must_use]
    pub fn cursor_front(&self) -> Cursor<'_, T, A> {
        match self.head_index() {
            Some(index) => Cursor::new(self, Position::InRange(index)),
            None => self.cursor_end(),
        }
    }

    /// Returns a cursor positioned on the back element, or at [`Position::Begin`] if the buffer
    /// is empty.
    #[inline]
    #[must_use]
    pub fn cursor_back(&self) -> Cursor<'_, T, A> {
        match self.tail_index() {
            Some(index) => Cursor::new(self, Position::InRange(index)),
            None => self.cursor_begin(),
        }
    }

    /// Returns a cursor positioned on the slot at the physical `index`, or `None` if that slot is
    /// not occupied.
    #[inline]
    #[must_use]
    pub fn cursor_at(&self, index: usize) -> Option<Cursor<'_, T, A>> {
        if self.is_index_occupied(index) {
            Some(Cursor::new(self, Position::InRange(index)))
        } else {
            None
        }
    }
}

impl<T, A> CircularBuffer<T, A>
    where
        T: Default,
        A: RawAllocator
{
    /// Moves the value out of `item` into a new slot at the back of the buffer, leaving
    /// `T::default()` in its place. Returns the physical index of the new slot.
    ///
    /// If the buffer is full, `item` is left untouched and `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<String>::with_capacity(1).unwrap();
    /// let mut s = String::from("hello");
    ///
    /// assert_eq!(buf.emplace_back(&mut s), Some(0));
    /// assert_eq!(s, "");
    /// assert_eq!(buf.peek_back().map(String::as_str), Some("hello"));
    ///
    /// let mut t = String::from("world");
    /// assert_eq!(buf.emplace_back(&mut t), None);
    /// assert_eq!(t, "world");
    /// ```
    pub fn emplace_back(&mut self, item: &mut T) -> Option<usize> {
        if self.is_full() {
            report!(capacity = self.capacity(), "emplace_back rejected: buffer full");
            return None;
        }
        self.push_back(mem::take(item)).ok()
    }

    /// Moves the value out of `item` into a new slot at the front of the buffer, leaving
    /// `T::default()` in its place. Returns the physical index of the new slot.
    ///
    /// If the buffer is full, `item` is left untouched and `None` is returned.
    pub fn emplace_front(&mut self, item: &mut T) -> Option<usize> {
        if self.is_full() {
            report!(capacity = self.capacity(), "emplace_front rejected: buffer full");
            return None;
        }
        self.push_front(mem::take(item)).ok()
    }
}

impl<T, A> CircularBuffer<T, A>
    where
        T: Clone,
        A: RawAllocator + Clone
{
    /// Returns a copy of the buffer, with the same capacity and a clone of the allocator.
    ///
    /// The elements are cloned from front to back and pushed to the back of the new buffer, so
    /// the copy holds the same sequence, but not necessarily in the same physical slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the allocator cannot provide the memory for the copy.
    pub fn try_clone(&self) -> Result<Self, CapacityError> {
        let mut this = Self::with_capacity_in(self.capacity(), self.slots.alloc.clone())?;
        for item in self.iter() {
            let pushed = this.push_back(item.clone()).is_ok();
            ring_assert!(pushed, "clone ran out of capacity");
        }
        Ok(this)
    }
}

impl<T, A> CircularBuffer<T, A>
    where
        T: Clone,
        A: RawAllocator
{
    /// Clones the elements of the buffer into a new [`Vec`], from front to back, leaving the
    /// buffer unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::<u32>::with_capacity(5).unwrap();
    /// buf.extend([1, 2, 3]);
    /// let vec: Vec<u32> = buf.to_vec();
    ///
    /// assert_eq!(buf, [1, 2, 3]);
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        let mut vec = Vec::with_capacity(self.len);
        vec.extend(self.iter().cloned());
        ring_assert!(vec.len() == self.len);
        vec
    }
}

#[inline]
unsafe fn slice_assume_init_ref<T>(slice: &[mem::MaybeUninit<T>]) -> &[T] {
    &*(slice as *const [mem::MaybeUninit<T>] as *const [T])
}

#[inline]
unsafe fn slice_assume_init_mut<T>(slice: &mut [mem::MaybeUninit<T>]) -> &mut [T] {
    &mut *(slice as *mut [mem::MaybeUninit<T>] as *mut [T])
}

impl<T, A> Default for CircularBuffer<T, A>
    where A: RawAllocator + Default
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A> Drop for CircularBuffer<T, A>
    where A: RawAllocator
{
    #[inline]
    fn drop(&mut self) {
        // `clear()` will make sure that every element is dropped in a safe way; `slots` releases
        // the memory afterwards
        self.clear();
    }
}

impl<T, A> Clone for CircularBuffer<T, A>
    where
        T: Clone,
        A: RawAllocator + Clone
{
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(this) => this,
            Err(_) => {
                report!(capacity = self.capacity(), "failed to clone buffer");
                // The layout of an allocated capacity always fits
                let layout = Slots::<T, A>::layout(self.capacity())
                    .unwrap_or_else(|_| Layout::new::<T>());
                alloc::alloc::handle_alloc_error(layout)
            },
        }
    }
}

/// Appends the elements of the iterator to the back of the buffer.
///
/// Extending stops at the first element that does not fit: that element is dropped, and the rest
/// of the iterator is not consumed.
impl<T, A> Extend<T> for CircularBuffer<T, A>
    where A: RawAllocator
{
    fn extend<I>(&mut self, iter: I)
        where I: IntoIterator<Item = T>
    {
        for item in iter {
            if self.push_back(item).is_err() {
                break;
            }
        }
    }
}

impl<'a, T, A> Extend<&'a T> for CircularBuffer<T, A>
    where
        T: Copy,
        A: RawAllocator
{
    fn extend<I>(&mut self, iter: I)
        where I: IntoIterator<Item = &'a T>
    {
        self.extend(iter.into_iter().copied())
    }
}

impl<T, A> IntoIterator for CircularBuffer<T, A>
    where A: RawAllocator
{
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, A> IntoIterator for &'a CircularBuffer<T, A>
    where A: RawAllocator
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}

impl<'a, T, A> IntoIterator for &'a mut CircularBuffer<T, A>
    where A: RawAllocator
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IterMut::new(self)
    }
}

impl<T, U, A, B> PartialEq<CircularBuffer<U, B>> for CircularBuffer<T, A>
    where
        T: PartialEq<U>,
        A: RawAllocator,
        B: RawAllocator
{
    fn eq(&self, other: &CircularBuffer<U, B>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T, A> Eq for CircularBuffer<T, A>
    where
        T: Eq,
        A: RawAllocator
{}

impl<T, U, A> PartialEq<[U]> for CircularBuffer<T, A>
    where
        T: PartialEq<U>,
        A: RawAllocator
{
    fn eq(&self, other: &[U]) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<const M: usize, T, U, A> PartialEq<[U; M]> for CircularBuffer<T, A>
    where
        T: PartialEq<U>,
        A: RawAllocator
{
    #[inline]
    fn eq(&self, other: &[U; M]) -> bool {
        self == &other[..]
    }
}

impl<'a, T, U, A> PartialEq<&'a [U]> for CircularBuffer<T, A>
    where
        T: PartialEq<U>,
        A: RawAllocator
{
    #[inline]
    fn eq(&self, other: &&'a [U]) -> bool {
        self == *other
    }
}

impl<'a, const M: usize, T, U, A> PartialEq<&'a [U; M]> for CircularBuffer<T, A>
    where
        T: PartialEq<U>,
        A: RawAllocator
{
    #[inline]
    fn eq(&self, other: &&'a [U; M]) -> bool {
        self == *other
    }
}

impl<T, U, A> PartialEq<Vec<U>> for CircularBuffer<T, A>
    where
        T: PartialEq<U>,
        A: RawAllocator
{
    #[inline]
    fn eq(&self, other: &Vec<U>) -> bool {
        self == &other[..]
    }
}

impl<T, U, A, B> PartialOrd<CircularBuffer<U, B>> for CircularBuffer<T, A>
    where
        T: PartialOrd<U>,
        A: RawAllocator,
        B: RawAllocator
{
    fn partial_cmp(&self, other: &CircularBuffer<U, B>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T, A> Ord for CircularBuffer<T, A>
    where
        T: Ord,
        A: RawAllocator
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T, A> Hash for CircularBuffer<T, A>
    where
        T: Hash,
        A: RawAllocator
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        self.iter().for_each(|item| item.hash(state));
    }
}

impl<T, A> fmt::Debug for CircularBuffer<T, A>
    where
        T: fmt::Debug,
        A: RawAllocator
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}
