// Copyright © 2023-2025 Andrea Corbellini and contributors
// SPDX-License-Identifier: BSD-3-Clause

#![allow(clippy::extra_unused_lifetimes)]

/// Tests to verify that certain types offered by the crate are [covariant].
///
/// [covariant]: https://doc.rust-lang.org/nomicon/subtyping.html

use circular_deque::CircularBuffer;
use circular_deque::Cursor;
use circular_deque::IntoIter;
use circular_deque::Iter;
use circular_deque::allocator::Global;

/// Verify that `CircularBuffer<T>` is covariant over `T`
#[test]
fn circular_buffer<'a>() {
    let buf = CircularBuffer::<&'static str>::with_capacity(1).unwrap();
    let _: CircularBuffer::<&'a str> = buf;
}

/// Verify that `Iter<'_, T>` is covariant over `T`
#[test]
fn iter<'a>() {
    let buf = CircularBuffer::<&'static str>::with_capacity(1).unwrap();
    let iter: Iter<'_, &'static str> = buf.iter();
    let _: Iter<'_, &'a str> = iter;
}

/// Verify that `IntoIter<T, A>` is covariant over `T`
#[test]
fn into_iter<'a>() {
    let buf = CircularBuffer::<&'static str>::with_capacity(1).unwrap();
    let iter: IntoIter<&'static str, Global> = buf.into_iter();
    let _: IntoIter<&'a str, Global> = iter;
}

/// Verify that `Cursor<'_, T, A>` is covariant over `T`
#[test]
fn cursor<'a>() {
    let buf = CircularBuffer::<&'static str>::with_capacity(1).unwrap();
    let cursor: Cursor<'_, &'static str, Global> = buf.cursor_begin();
    let _: Cursor<'_, &'a str, Global> = cursor;
}

// `IterMut<'a, T>` is invariant over `T` because it holds a mutable reference to the elements of
// the buffer.
