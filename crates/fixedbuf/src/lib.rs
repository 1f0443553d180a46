use bytes::{BufMut, BytesMut};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixedBufError {
    #[error("exceeds fixed capacity: need {need} bytes but only {remaining} remaining")]
    Overflow { need: usize, remaining: usize },
}

/// Write buffer which refuses to grow past the capacity given at creation.
///
/// Encoders write protocol messages through it so a message can never exceed
/// the negotiated maximum size; the overflowing write fails and nothing is
/// written.
#[derive(Debug)]
pub struct FixedBuf {
    inner: BytesMut,
    capacity: usize,
}

impl FixedBuf {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.inner.len()
    }

    fn reserve(&self, need: usize) -> Result<(), FixedBufError> {
        if need > self.remaining() {
            return Err(FixedBufError::Overflow {
                need,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    pub fn put_u8(&mut self, val: u8) -> Result<(), FixedBufError> {
        self.reserve(1)?;
        self.inner.put_u8(val);
        Ok(())
    }

    pub fn put_u16(&mut self, val: u16) -> Result<(), FixedBufError> {
        self.reserve(2)?;
        self.inner.put_u16(val);
        Ok(())
    }

    pub fn put_u32(&mut self, val: u32) -> Result<(), FixedBufError> {
        self.reserve(4)?;
        self.inner.put_u32(val);
        Ok(())
    }

    pub fn put_slice(&mut self, src: &[u8]) -> Result<(), FixedBufError> {
        self.reserve(src.len())?;
        self.inner.put_slice(src);
        Ok(())
    }

    pub fn into_inner(self) -> BytesMut {
        self.inner
    }
}
