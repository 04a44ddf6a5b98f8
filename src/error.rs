// Copyright © 2023-2025 Andrea Corbellini and contributors
// SPDX-License-Identifier: BSD-3-Clause

use thiserror::Error;

/// The error returned when a [`CircularBuffer`](crate::CircularBuffer) cannot be given the
/// requested capacity.
///
/// Whenever this error is returned, the buffer is left exactly as it was before the call.
#[derive(Error, Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum CapacityError {
    /// A capacity of zero slots was requested.
    #[error("requested capacity is zero")]
    Zero,

    /// The requested capacity is the [`INVALID_INDEX`](crate::INVALID_INDEX) sentinel.
    #[error("requested capacity is the invalid index sentinel")]
    InvalidSentinel,

    /// The requested capacity cannot hold the elements currently in the buffer.
    #[error("requested capacity {requested} is smaller than the buffer length {len}")]
    BelowLength {
        /// The capacity that was requested.
        requested: usize,
        /// The number of elements in the buffer at the time of the request.
        len: usize,
    },

    /// The size in bytes of the requested capacity does not fit in `isize`.
    #[error("capacity {capacity} overflows the maximum allocation size")]
    LayoutOverflow {
        /// The capacity that was requested.
        capacity: usize,
    },

    /// The allocator could not provide a block of the requested size.
    #[error("allocator failed to provide {bytes} bytes")]
    AllocationFailed {
        /// Size of the failed allocation, in bytes.
        bytes: usize,
    },
}
