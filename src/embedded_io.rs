// Copyright © 2024 Andrea Corbellini and contributors
// SPDX-License-Identifier: BSD-3-Clause

use crate::CircularBuffer;
use crate::allocator::RawAllocator;
use thiserror::Error;

#[cfg(feature = "embedded-io")]
use embedded_io::ErrorKind;
#[cfg(feature = "embedded-io")]
use embedded_io::ErrorType;

#[cfg(all(feature = "embedded-io-async", not(feature = "embedded-io")))]
use embedded_io_async::ErrorKind;
#[cfg(all(feature = "embedded-io-async", not(feature = "embedded-io")))]
use embedded_io_async::ErrorType;

/// The error returned when writing a non-empty slice of bytes into a full [`CircularBuffer`]
/// through the `embedded-io` traits.
#[derive(Error, Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[error("circular buffer is full")]
pub struct BufferFull;

#[cfg(feature = "embedded-io")]
impl embedded_io::Error for BufferFull {
    #[inline]
    fn kind(&self) -> ErrorKind {
        ErrorKind::OutOfMemory
    }
}

#[cfg(all(feature = "embedded-io-async", not(feature = "embedded-io")))]
impl embedded_io_async::Error for BufferFull {
    #[inline]
    fn kind(&self) -> ErrorKind {
        ErrorKind::OutOfMemory
    }
}

impl<A> ErrorType for CircularBuffer<u8, A>
    where A: RawAllocator
{
    type Error = BufferFull;
}

impl<A> CircularBuffer<u8, A>
    where A: RawAllocator
{
    fn write_bytes(&mut self, src: &[u8]) -> Result<usize, BufferFull> {
        if src.is_empty() {
            return Ok(0);
        }
        let count = src.iter()
                       .take_while(|&&byte| self.push_back(byte).is_ok())
                       .count();
        if count == 0 {
            return Err(BufferFull);
        }
        Ok(count)
    }

    fn read_bytes(&mut self, dst: &mut [u8]) -> usize {
        dst.iter_mut()
           .map_while(|slot| self.pop_front().map(|byte| *slot = byte))
           .count()
    }
}

#[cfg(feature = "embedded-io")]
impl<A> embedded_io::Write for CircularBuffer<u8, A>
    where A: RawAllocator
{
    #[inline]
    fn write(&mut self, src: &[u8]) -> Result<usize, Self::Error> {
        self.write_bytes(src)
    }

    #[inline]
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(feature = "embedded-io")]
impl<A> embedded_io::Read for CircularBuffer<u8, A>
    where A: RawAllocator
{
    #[inline]
    fn read(&mut self, dst: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(self.read_bytes(dst))
    }
}

#[cfg(feature = "embedded-io-async")]
impl<A> embedded_io_async::Write for CircularBuffer<u8, A>
    where A: RawAllocator
{
    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn write(&mut self, src: &[u8]) -> Result<usize, Self::Error> {
        self.write_bytes(src)
    }
}

#[cfg(feature = "embedded-io-async")]
impl<A> embedded_io_async::Read for CircularBuffer<u8, A>
    where A: RawAllocator
{
    async fn read(&mut self, dst: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(self.read_bytes(dst))
    }
}
