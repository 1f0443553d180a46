use bytes::Buf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("truncated input: requested {requested} bytes, {available} available")]
    Truncated { requested: usize, available: usize },
}

/// Bounds checked big-endian reader over a borrowed buffer.
///
/// Every read either returns the requested value and advances, or fails with
/// [`CursorError::Truncated`] and leaves the position untouched.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn at_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn ensure(&self, requested: usize) -> Result<&'a [u8], CursorError> {
        let available = self.remaining();
        if requested > available {
            return Err(CursorError::Truncated {
                requested,
                available,
            });
        }
        Ok(&self.buf[self.pos..self.pos + requested])
    }

    pub fn peek_u8(&self) -> Result<u8, CursorError> {
        let mut src = self.ensure(1)?;
        Ok(src.get_u8())
    }

    pub fn read_u8(&mut self) -> Result<u8, CursorError> {
        let mut src = self.ensure(1)?;
        self.pos += 1;
        Ok(src.get_u8())
    }

    pub fn read_u16_be(&mut self) -> Result<u16, CursorError> {
        let mut src = self.ensure(2)?;
        self.pos += 2;
        Ok(src.get_u16())
    }

    pub fn read_u32_be(&mut self) -> Result<u32, CursorError> {
        let mut src = self.ensure(4)?;
        self.pos += 4;
        Ok(src.get_u32())
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CursorError> {
        let src = self.ensure(n)?;
        self.pos += n;
        Ok(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_sequence() {
        let buf = [0x04, 0x00, 0xc8, 0x0a, 0x00, 0x00, 0x01, 0xaa];
        let mut cursor = ByteCursor::new(&buf);
        assert_eq!(cursor.read_u8(), Ok(4));
        assert_eq!(cursor.read_u16_be(), Ok(200));
        assert_eq!(cursor.read_u32_be(), Ok(0x0a00_0001));
        assert_eq!(cursor.position(), 7);
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(cursor.peek_u8(), Ok(0xaa));
        assert_eq!(cursor.read_bytes(1), Ok(&[0xaa][..]));
        assert!(cursor.at_end());
    }

    #[test]
    fn test_truncated_read_does_not_advance() {
        let buf = [0x00, 0x01, 0x02];
        let mut cursor = ByteCursor::new(&buf);
        assert_eq!(cursor.read_u8(), Ok(0));
        assert_eq!(
            cursor.read_u32_be(),
            Err(CursorError::Truncated {
                requested: 4,
                available: 2
            })
        );
        assert_eq!(cursor.position(), 1);
        assert_eq!(
            cursor.read_bytes(3),
            Err(CursorError::Truncated {
                requested: 3,
                available: 2
            })
        );
        assert_eq!(cursor.read_u16_be(), Ok(0x0102));
        assert!(cursor.read_u8().is_err());
        assert!(cursor.peek_u8().is_err());
    }

    #[test]
    fn test_zero_length_read() {
        let mut cursor = ByteCursor::new(&[]);
        assert_eq!(cursor.read_bytes(0), Ok(&[][..]));
        assert!(cursor.at_end());
    }
}
