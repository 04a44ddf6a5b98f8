// Copyright © 2023-2025 Andrea Corbellini and contributors
// SPDX-License-Identifier: BSD-3-Clause

use core::fmt;
use core::iter::FusedIterator;
use crate::CircularBuffer;
use crate::allocator::RawAllocator;

/// An owning [iterator](core::iter::Iterator) over the elements of a [`CircularBuffer`].
///
/// This yields the elements of a `CircularBuffer` from front to back.
///
/// This struct is created when iterating over a `CircularBuffer`. See the documentation for
/// [`IntoIterator`] for more details.
pub struct IntoIter<T, A>
    where A: RawAllocator
{
    inner: CircularBuffer<T, A>,
}

impl<T, A> IntoIter<T, A>
    where A: RawAllocator
{
    pub(crate) const fn new(inner: CircularBuffer<T, A>) -> Self {
        Self { inner }
    }
}

impl<T, A> Iterator for IntoIter<T, A>
    where A: RawAllocator
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }
}

impl<T, A> ExactSizeIterator for IntoIter<T, A>
    where A: RawAllocator
{
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T, A> FusedIterator for IntoIter<T, A>
    where A: RawAllocator
{}

impl<T, A> DoubleEndedIterator for IntoIter<T, A>
    where A: RawAllocator
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.pop_back()
    }
}

impl<T, A> Clone for IntoIter<T, A>
    where
        T: Clone,
        A: RawAllocator + Clone
{
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T, A> fmt::Debug for IntoIter<T, A>
    where
        T: fmt::Debug,
        A: RawAllocator
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

fn slice_take_first<'a, T>(slice: &mut &'a [T]) -> Option<&'a T> {
    let (item, rest) = slice.split_first()?;
    *slice = rest;
    Some(item)
}

fn slice_take_first_mut<'a, T>(slice: &mut &'a mut [T]) -> Option<&'a mut T> {
    let (item, rest) = core::mem::take(slice).split_first_mut()?;
    *slice = rest;
    Some(item)
}

fn slice_take_last<'a, T>(slice: &mut &'a [T]) -> Option<&'a T> {
    let (item, rest) = slice.split_last()?;
    *slice = rest;
    Some(item)
}

fn slice_take_last_mut<'a, T>(slice: &mut &'a mut [T]) -> Option<&'a mut T> {
    let (item, rest) = core::mem::take(slice).split_last_mut()?;
    *slice = rest;
    Some(item)
}

/// An [iterator](core::iter::Iterator) over the elements of a `CircularBuffer`.
///
/// This struct is created by [`CircularBuffer::iter()`]. See its documentation for more details.
pub struct Iter<'a, T> {
    // Both runs are in physical order, which is back to front: the front element is the last one
    // of `head_run` (or of `tail_run` if the buffer does not wrap)
    tail_run: &'a [T],
    head_run: &'a [T],
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new<A>(buf: &'a CircularBuffer<T, A>) -> Self
        where A: RawAllocator
    {
        let (tail_run, head_run) = buf.as_slices();
        Self { tail_run, head_run }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = slice_take_last(&mut self.head_run) {
            Some(item)
        } else {
            slice_take_last(&mut self.tail_run)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {
    #[inline]
    fn len(&self) -> usize {
        self.tail_run.len() + self.head_run.len()
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if let Some(item) = slice_take_first(&mut self.tail_run) {
            Some(item)
        } else {
            slice_take_first(&mut self.head_run)
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self { tail_run: self.tail_run, head_run: self.head_run }
    }
}

impl<'a, T> fmt::Debug for Iter<'a, T>
    where T: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// A mutable [iterator](core::iter::Iterator) over the elements of a `CircularBuffer`.
///
/// This struct is created by [`CircularBuffer::iter_mut()`]. See its documentation for more
/// details.
pub struct IterMut<'a, T> {
    tail_run: &'a mut [T],
    head_run: &'a mut [T],
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new<A>(buf: &'a mut CircularBuffer<T, A>) -> Self
        where A: RawAllocator
    {
        let (tail_run, head_run) = buf.as_mut_slices();
        Self { tail_run, head_run }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = slice_take_last_mut(&mut self.head_run) {
            Some(item)
        } else {
            slice_take_last_mut(&mut self.tail_run)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {
    #[inline]
    fn len(&self) -> usize {
        self.tail_run.len() + self.head_run.len()
    }
}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if let Some(item) = slice_take_first_mut(&mut self.tail_run) {
            Some(item)
        } else {
            slice_take_first_mut(&mut self.head_run)
        }
    }
}

impl<'a, T> fmt::Debug for IterMut<'a, T>
    where T: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let it = Iter { tail_run: self.tail_run, head_run: self.head_run };
        it.fmt(f)
    }
}
