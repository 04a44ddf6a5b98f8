// Copyright © 2023-2025 Andrea Corbellini and contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Index arithmetic over the occupied arc of a buffer.
//!
//! The buffer stores the physical index of its front element (`head`) and the number of live
//! elements (`len`). The back element (`tail`) sits `len - 1` slots behind `head`, walking
//! backwards through the index space and wrapping from `0` to `capacity - 1`. The live elements
//! therefore occupy the arc `tail, tail + 1, ..., capacity - 1, 0, 1, ..., head`, which wraps
//! whenever `tail > head`.
//!
//! Everything in this module is a pure function of `(head, len, capacity)`.

use crate::INVALID_INDEX;

/// Returns `(x + y) % m` without risk of overflows if `x + y` cannot fit in `usize`.
///
/// `x` and `y` are expected to be less than, or equal to `m`.
#[inline]
pub(crate) const fn add_mod(x: usize, y: usize, m: usize) -> usize {
    debug_assert!(m > 0);
    debug_assert!(x <= m);
    debug_assert!(y <= m);
    let (z, overflow) = x.overflowing_add(y);
    (z + (overflow as usize) * (usize::MAX % m + 1)) % m
}

/// Returns `(x - y) % m` without risk of underflows if `x - y` is negative.
///
/// `x` and `y` are expected to be less than, or equal to `m`.
#[inline]
pub(crate) const fn sub_mod(x: usize, y: usize, m: usize) -> usize {
    debug_assert!(m > 0);
    debug_assert!(x <= m);
    debug_assert!(y <= m);
    add_mod(x, m - y, m)
}

/// Snapshot of the bookkeeping fields of a buffer.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct Occupancy {
    pub(crate) head: usize,
    pub(crate) len: usize,
    pub(crate) capacity: usize,
}

impl Occupancy {
    #[inline]
    pub(crate) const fn new(head: usize, len: usize, capacity: usize) -> Self {
        Self { head, len, capacity }
    }

    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Physical index of the back element, or [`INVALID_INDEX`] if there are no elements.
    pub(crate) const fn tail(&self) -> usize {
        if self.capacity == 0 || self.len == 0 || self.head == INVALID_INDEX {
            return INVALID_INDEX;
        }
        debug_assert!(self.head < self.capacity, "head out-of-bounds");
        debug_assert!(self.len <= self.capacity, "len out-of-bounds");
        if self.len == 1 {
            return self.head;
        }
        if self.head < self.len - 1 {
            self.capacity - (self.len - self.head - 1)
        } else {
            self.head - (self.len - 1)
        }
    }

    /// Returns `true` if the occupied arc crosses the `capacity - 1 → 0` boundary.
    #[inline]
    pub(crate) const fn is_wrapped(&self) -> bool {
        !self.is_empty() && self.tail() > self.head
    }

    /// Returns `true` if `index` lies on the occupied arc.
    pub(crate) const fn contains(&self, index: usize) -> bool {
        if index >= self.capacity || self.is_empty() {
            return false;
        }
        let tail = self.tail();
        if tail <= self.head {
            tail <= index && index <= self.head
        } else {
            index >= tail || index <= self.head
        }
    }

    /// The slot a `push_front` would write to: one step forward from `head`, or slot 0 when
    /// empty.
    #[inline]
    pub(crate) const fn next_head(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            wrap_inc(self.head, self.capacity)
        }
    }

    /// The slot a `push_back` would write to: one step backward from the tail, or slot 0 when
    /// empty.
    #[inline]
    pub(crate) const fn next_tail(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            wrap_dec(self.tail(), self.capacity)
        }
    }

    /// Number of forward steps from `index` to `head`. `index` must be occupied.
    pub(crate) const fn steps_to_head(&self, index: usize) -> usize {
        debug_assert!(self.contains(index), "index not occupied");
        let tail = self.tail();
        if tail <= self.head || index <= self.head {
            self.head - index
        } else {
            // Walk up to the physical end, wrap to 0, then walk up to `head`
            (self.capacity - 1 - index) + 1 + self.head
        }
    }

    /// Number of backward steps from `index` to the tail. `index` must be occupied.
    pub(crate) const fn steps_from_tail(&self, index: usize) -> usize {
        debug_assert!(self.contains(index), "index not occupied");
        let tail = self.tail();
        if tail <= self.head || index >= tail {
            index - tail
        } else {
            (self.capacity - tail) + index
        }
    }

    /// The occupied index after `index` going toward `head`, if any.
    #[inline]
    pub(crate) const fn next(&self, index: usize) -> Option<usize> {
        if !self.contains(index) || index == self.head {
            None
        } else {
            Some(wrap_inc(index, self.capacity))
        }
    }

    /// The occupied index before `index` going toward the tail, if any.
    #[inline]
    pub(crate) const fn prev(&self, index: usize) -> Option<usize> {
        if !self.contains(index) || index == self.tail() {
            None
        } else {
            Some(wrap_dec(index, self.capacity))
        }
    }

    /// Moves `index` forward by `n` slots, wrapping at the physical boundary.
    #[inline]
    pub(crate) const fn forward(&self, index: usize, n: usize) -> usize {
        debug_assert!(index < self.capacity, "index out-of-bounds");
        debug_assert!(n < self.capacity, "step larger than capacity");
        add_mod(index, n, self.capacity)
    }

    /// Moves `index` backward by `n` slots, wrapping at the physical boundary.
    #[inline]
    pub(crate) const fn backward(&self, index: usize, n: usize) -> usize {
        debug_assert!(index < self.capacity, "index out-of-bounds");
        debug_assert!(n < self.capacity, "step larger than capacity");
        sub_mod(index, n, self.capacity)
    }

    /// Physical index of the element at logical position `n`, counting from the front.
    #[inline]
    pub(crate) const fn logical(&self, n: usize) -> Option<usize> {
        if n >= self.len {
            None
        } else {
            Some(self.backward(self.head, n))
        }
    }
}

#[inline]
pub(crate) const fn wrap_inc(index: usize, capacity: usize) -> usize {
    if index == capacity - 1 { 0 } else { index + 1 }
}

#[inline]
pub(crate) const fn wrap_dec(index: usize, capacity: usize) -> usize {
    if index == 0 { capacity - 1 } else { index - 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupied(occ: &Occupancy) -> Vec<usize> {
        (0..occ.capacity).filter(|&i| occ.contains(i)).collect()
    }

    #[test]
    fn tail() {
        assert_eq!(Occupancy::new(INVALID_INDEX, 0, 0).tail(), INVALID_INDEX);
        assert_eq!(Occupancy::new(INVALID_INDEX, 0, 4).tail(), INVALID_INDEX);
        assert_eq!(Occupancy::new(2, 1, 4).tail(), 2);
        assert_eq!(Occupancy::new(3, 4, 4).tail(), 0);
        assert_eq!(Occupancy::new(3, 2, 4).tail(), 2);
        assert_eq!(Occupancy::new(1, 3, 4).tail(), 3);
        assert_eq!(Occupancy::new(0, 2, 4).tail(), 3);
        assert_eq!(Occupancy::new(0, 4, 4).tail(), 1);
    }

    #[test]
    fn contains_forms_one_arc() {
        assert_eq!(occupied(&Occupancy::new(INVALID_INDEX, 0, 4)), []);
        assert_eq!(occupied(&Occupancy::new(2, 1, 4)), [2]);
        assert_eq!(occupied(&Occupancy::new(3, 3, 5)), [1, 2, 3]);
        assert_eq!(occupied(&Occupancy::new(1, 3, 5)), [0, 1, 4]);
        assert_eq!(occupied(&Occupancy::new(0, 5, 5)), [0, 1, 2, 3, 4]);
        assert!(!Occupancy::new(1, 3, 5).contains(5));
        assert!(!Occupancy::new(1, 3, 5).contains(INVALID_INDEX));

        for capacity in 1..8 {
            for len in 1..=capacity {
                for head in 0..capacity {
                    let occ = Occupancy::new(head, len, capacity);
                    let slots = occupied(&occ);
                    assert_eq!(slots.len(), len, "{occ:?}");
                    let tail = occ.tail();
                    for step in 0..len {
                        assert!(occ.contains((tail + step) % capacity), "{occ:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn wrapped() {
        assert!(!Occupancy::new(INVALID_INDEX, 0, 4).is_wrapped());
        assert!(!Occupancy::new(3, 4, 4).is_wrapped());
        assert!(Occupancy::new(0, 2, 4).is_wrapped());
        assert!(Occupancy::new(2, 4, 4).is_wrapped());
    }

    #[test]
    fn next_slots() {
        let empty = Occupancy::new(INVALID_INDEX, 0, 4);
        assert_eq!(empty.next_head(), 0);
        assert_eq!(empty.next_tail(), 0);

        let occ = Occupancy::new(0, 1, 4);
        assert_eq!(occ.next_head(), 1);
        assert_eq!(occ.next_tail(), 3);

        let occ = Occupancy::new(3, 2, 4);
        assert_eq!(occ.next_head(), 0);
        assert_eq!(occ.next_tail(), 1);
    }

    #[test]
    fn steps() {
        let occ = Occupancy::new(1, 4, 6);
        // Arc: 4, 5, 0, 1
        assert_eq!(occ.tail(), 4);
        assert_eq!(occ.steps_to_head(4), 3);
        assert_eq!(occ.steps_to_head(5), 2);
        assert_eq!(occ.steps_to_head(0), 1);
        assert_eq!(occ.steps_to_head(1), 0);
        assert_eq!(occ.steps_from_tail(4), 0);
        assert_eq!(occ.steps_from_tail(5), 1);
        assert_eq!(occ.steps_from_tail(0), 2);
        assert_eq!(occ.steps_from_tail(1), 3);

        let occ = Occupancy::new(4, 3, 6);
        // Arc: 2, 3, 4
        assert_eq!(occ.steps_to_head(2), 2);
        assert_eq!(occ.steps_from_tail(4), 2);
    }

    #[test]
    fn next_prev() {
        let occ = Occupancy::new(1, 4, 6);
        assert_eq!(occ.next(4), Some(5));
        assert_eq!(occ.next(5), Some(0));
        assert_eq!(occ.next(0), Some(1));
        assert_eq!(occ.next(1), None);
        assert_eq!(occ.next(2), None);
        assert_eq!(occ.prev(1), Some(0));
        assert_eq!(occ.prev(0), Some(5));
        assert_eq!(occ.prev(5), Some(4));
        assert_eq!(occ.prev(4), None);
        assert_eq!(occ.prev(3), None);
    }

    #[test]
    fn forward_backward() {
        let occ = Occupancy::new(0, 1, 5);
        assert_eq!(occ.forward(3, 0), 3);
        assert_eq!(occ.forward(3, 1), 4);
        assert_eq!(occ.forward(3, 2), 0);
        assert_eq!(occ.forward(3, 4), 2);
        assert_eq!(occ.backward(1, 0), 1);
        assert_eq!(occ.backward(1, 1), 0);
        assert_eq!(occ.backward(1, 2), 4);
        assert_eq!(occ.backward(1, 4), 2);

        for i in 0..5 {
            for n in 0..5 {
                assert_eq!(occ.forward(i, n), (i + n) % 5);
                assert_eq!(occ.backward(i, n), (i + 5 - n) % 5);
            }
        }
    }

    #[test]
    fn logical() {
        let occ = Occupancy::new(1, 4, 6);
        assert_eq!(occ.logical(0), Some(1));
        assert_eq!(occ.logical(1), Some(0));
        assert_eq!(occ.logical(2), Some(5));
        assert_eq!(occ.logical(3), Some(4));
        assert_eq!(occ.logical(4), None);
    }

    #[test]
    fn modular() {
        assert_eq!(add_mod(usize::MAX - 1, usize::MAX - 1, usize::MAX), usize::MAX - 2);
        assert_eq!(sub_mod(0, 1, 7), 6);
        assert_eq!(sub_mod(3, 7, 7), 3);

        // Steps near the top of the index space must not overflow
        let occ = Occupancy::new(0, 1, usize::MAX - 1);
        assert_eq!(occ.forward(usize::MAX - 3, usize::MAX - 2), usize::MAX - 4);
        assert_eq!(occ.backward(1, usize::MAX - 2), 2);
    }
}
