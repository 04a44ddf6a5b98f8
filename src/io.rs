// Copyright © 2023-2025 Andrea Corbellini and contributors
// SPDX-License-Identifier: BSD-3-Clause

use crate::CircularBuffer;
use crate::allocator::RawAllocator;
use std::io::Read;
use std::io::Result;
use std::io::Write;

/// Bytes are appended to the back of the buffer until it is full. A full buffer accepts 0 bytes.
impl<A> Write for CircularBuffer<u8, A>
    where A: RawAllocator
{
    fn write(&mut self, src: &[u8]) -> Result<usize> {
        let count = src.iter()
                       .take_while(|&&byte| self.push_back(byte).is_ok())
                       .count();
        Ok(count)
    }

    #[inline]
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Bytes are consumed from the front of the buffer.
impl<A> Read for CircularBuffer<u8, A>
    where A: RawAllocator
{
    fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        let count = dst.iter_mut()
                       .map_while(|slot| self.pop_front().map(|byte| *slot = byte))
                       .count();
        Ok(count)
    }
}
