// Copyright © 2023-2025 Andrea Corbellini and contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Bidirectional cursors over the physical slots of a [`CircularBuffer`].

use core::fmt;
use core::ptr;
use crate::CircularBuffer;
use crate::allocator::RawAllocator;
use crate::index::Occupancy;

/// Where a [`Cursor`] points to.
///
/// The occupied slots of a buffer are walked from the back element to the front element.
/// `Begin` sits before the back element, `End` sits after the front element, and `Invalid` is
/// reached by stepping past either of them. Once a cursor is `Invalid`, it stays `Invalid`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Position {
    /// Before the back element.
    Begin,
    /// On the occupied slot with the given physical index.
    InRange(usize),
    /// After the front element.
    End,
    /// Past `Begin` or `End`.
    Invalid,
}

/// A cursor over the occupied slots of a [`CircularBuffer`].
///
/// Moving forward goes from the back element toward the front element, following increasing
/// physical indexes and wrapping from the last slot to slot 0. This is the order in which the
/// elements were pushed to the front (or the reverse of the order in which they were pushed to
/// the back).
///
/// Cursors borrow the buffer, so the buffer cannot be modified while a cursor exists.
///
/// This struct is created by [`CircularBuffer::cursor_begin()`], [`CircularBuffer::cursor_end()`],
/// [`CircularBuffer::cursor_front()`], [`CircularBuffer::cursor_back()`] and
/// [`CircularBuffer::cursor_at()`].
///
/// # Examples
///
/// ```
/// use circular_deque::CircularBuffer;
/// use circular_deque::Position;
///
/// let mut buf = CircularBuffer::<char>::with_capacity(4).unwrap();
/// buf.push_front('a').unwrap(); // slot 0
/// buf.push_front('b').unwrap(); // slot 1
/// buf.push_front('c').unwrap(); // slot 2
///
/// let mut cursor = buf.cursor_begin();
/// assert_eq!(cursor.advance(2).get(), Some(&'b'));
/// assert_eq!(cursor.position(), Position::InRange(1));
/// assert_eq!(cursor.advance(2).position(), Position::End);
/// assert_eq!(cursor.move_next().position(), Position::Invalid);
/// ```
pub struct Cursor<'a, T, A>
    where A: RawAllocator
{
    buf: &'a CircularBuffer<T, A>,
    position: Position,
}

impl<'a, T, A> Cursor<'a, T, A>
    where A: RawAllocator
{
    #[inline]
    pub(crate) const fn new(buf: &'a CircularBuffer<T, A>, position: Position) -> Self {
        Self { buf, position }
    }

    #[inline]
    fn occupancy(&self) -> Occupancy {
        self.buf.occupancy()
    }

    /// Returns the current position of the cursor.
    #[inline]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the physical index of the slot the cursor points to, or `None` if the cursor is
    /// not in range.
    #[inline]
    pub const fn index(&self) -> Option<usize> {
        match self.position {
            Position::InRange(index) => Some(index),
            _ => None,
        }
    }

    /// Returns `true` if the cursor points to an occupied slot.
    #[inline]
    pub const fn is_in_range(&self) -> bool {
        matches!(self.position, Position::InRange(_))
    }

    /// Returns `true` if the cursor has stepped past `Begin` or `End`.
    #[inline]
    pub const fn is_invalid(&self) -> bool {
        matches!(self.position, Position::Invalid)
    }

    /// Returns the buffer this cursor walks over.
    #[inline]
    pub const fn buffer(&self) -> &'a CircularBuffer<T, A> {
        self.buf
    }

    /// Returns a reference to the element the cursor points to, or `None` if the cursor is not in
    /// range.
    ///
    /// The returned reference borrows the buffer, not the cursor, so it stays usable after the
    /// cursor moves.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        let index = self.index()?;
        ring_assert!(self.buf.is_index_occupied(index), "cursor points to an unoccupied slot");
        self.buf.look_at(index)
    }

    /// Moves the cursor one step toward the front element.
    ///
    /// `Begin` moves to the back element (or to `End` if the buffer is empty); the front element
    /// moves to `End`; `End` moves to `Invalid`.
    pub fn move_next(&mut self) -> &mut Self {
        let occ = self.occupancy();
        self.position = match self.position {
            Position::Begin if occ.is_empty() => Position::End,
            Position::Begin => Position::InRange(occ.tail()),
            Position::InRange(index) => match occ.next(index) {
                Some(next) => Position::InRange(next),
                None => Position::End,
            },
            Position::End | Position::Invalid => Position::Invalid,
        };
        self
    }

    /// Moves the cursor one step toward the back element.
    ///
    /// `End` moves to the front element (or to `Begin` if the buffer is empty); the back element
    /// moves to `Begin`; `Begin` moves to `Invalid`.
    pub fn move_prev(&mut self) -> &mut Self {
        let occ = self.occupancy();
        self.position = match self.position {
            Position::End if occ.is_empty() => Position::Begin,
            Position::End => Position::InRange(occ.head),
            Position::InRange(index) => match occ.prev(index) {
                Some(prev) => Position::InRange(prev),
                None => Position::Begin,
            },
            Position::Begin | Position::Invalid => Position::Invalid,
        };
        self
    }

    /// Moves the cursor `n` steps toward the front element.
    ///
    /// This is equivalent to calling [`move_next()`](Self::move_next) `n` times, but runs in
    /// constant time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularBuffer;
    /// use circular_deque::Position;
    ///
    /// let mut buf = CircularBuffer::<u32>::with_capacity(4).unwrap();
    /// buf.extend([1, 2, 3]);
    ///
    /// let mut cursor = buf.cursor_begin();
    /// assert_eq!(cursor.advance(3).get(), Some(&1));
    /// assert_eq!(cursor.advance(1).position(), Position::End);
    ///
    /// let mut cursor = buf.cursor_begin();
    /// assert_eq!(cursor.advance(5).position(), Position::Invalid);
    /// ```
    pub fn advance(&mut self, n: usize) -> &mut Self {
        if n == 0 {
            return self;
        }
        let occ = self.occupancy();
        self.position = match self.position {
            Position::Begin => {
                if occ.is_empty() {
                    if n == 1 { Position::End } else { Position::Invalid }
                } else {
                    // The first step lands on the back element
                    Self::forward_from(&occ, occ.tail(), n - 1, occ.len - 1)
                }
            },
            Position::InRange(index) => {
                Self::forward_from(&occ, index, n, occ.steps_to_head(index))
            },
            Position::End | Position::Invalid => Position::Invalid,
        };
        self
    }

    /// Moves the cursor `n` steps toward the back element.
    ///
    /// This is equivalent to calling [`move_prev()`](Self::move_prev) `n` times, but runs in
    /// constant time.
    pub fn retreat(&mut self, n: usize) -> &mut Self {
        if n == 0 {
            return self;
        }
        let occ = self.occupancy();
        self.position = match self.position {
            Position::End => {
                if occ.is_empty() {
                    if n == 1 { Position::Begin } else { Position::Invalid }
                } else {
                    // The first step lands on the front element
                    Self::backward_from(&occ, occ.head, n - 1, occ.len - 1)
                }
            },
            Position::InRange(index) => {
                Self::backward_from(&occ, index, n, occ.steps_from_tail(index))
            },
            Position::Begin | Position::Invalid => Position::Invalid,
        };
        self
    }

    /// Position reached after `n` forward steps from `index`, given that `room` steps are left
    /// before the front element.
    fn forward_from(occ: &Occupancy, index: usize, n: usize, room: usize) -> Position {
        if n <= room {
            Position::InRange(occ.forward(index, n))
        } else if n - room == 1 {
            Position::End
        } else {
            Position::Invalid
        }
    }

    /// Position reached after `n` backward steps from `index`, given that `room` steps are left
    /// before the back element.
    fn backward_from(occ: &Occupancy, index: usize, n: usize, room: usize) -> Position {
        if n <= room {
            Position::InRange(occ.backward(index, n))
        } else if n - room == 1 {
            Position::Begin
        } else {
            Position::Invalid
        }
    }
}

impl<'a, T, A> Clone for Cursor<'a, T, A>
    where A: RawAllocator
{
    #[inline]
    fn clone(&self) -> Self {
        Self { buf: self.buf, position: self.position }
    }
}

impl<'a, T, A> Copy for Cursor<'a, T, A>
    where A: RawAllocator
{}

/// Two cursors are equal if they walk over the same buffer and point to the same position.
impl<'a, T, A> PartialEq for Cursor<'a, T, A>
    where A: RawAllocator
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.buf, other.buf) && self.position == other.position
    }
}

impl<'a, T, A> Eq for Cursor<'a, T, A>
    where A: RawAllocator
{}

impl<'a, T, A> fmt::Debug for Cursor<'a, T, A>
    where A: RawAllocator
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
         .field("buf", &ptr::addr_of!(*self.buf))
         .field("position", &self.position)
         .finish()
    }
}
