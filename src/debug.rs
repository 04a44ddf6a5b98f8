// Copyright © 2023-2025 Andrea Corbellini and contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Diagnostic hooks used throughout the crate. Both compile to nothing in release builds.

/// Checks an internal invariant of the buffer. Only evaluated in debug builds.
macro_rules! ring_assert {
    ( $cond:expr $(,)? ) => {
        debug_assert!($cond)
    };
    ( $cond:expr , $( $msg:tt )+ ) => {
        debug_assert!($cond, $($msg)+)
    };
}

/// Emits a trace event describing a notable buffer or allocator event.
macro_rules! report {
    ( $( $tt:tt )* ) => {{
        #[cfg(debug_assertions)]
        {
            ::tracing::trace!(target: "circular_deque", $($tt)*);
        }
    }};
}
