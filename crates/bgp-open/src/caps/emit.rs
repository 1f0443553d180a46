use bytes::{BufMut, BytesMut};

use super::CapCode;
use crate::OpenParseError;

pub trait CapEmit {
    fn code(&self) -> CapCode;

    fn len(&self) -> usize {
        0
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reject values which cannot be represented on the wire.
    fn validate(&self) -> Result<(), OpenParseError> {
        Ok(())
    }

    fn emit_value(&self, _buf: &mut BytesMut) {}

    /// Write the capability TLV: code, length and value.
    fn emit(&self, buf: &mut BytesMut) -> Result<(), OpenParseError> {
        self.validate()?;
        let length = self.len();
        if length > u8::MAX as usize {
            return Err(OpenParseError::CapabilityTooLong {
                code: self.code().into(),
                length,
            });
        }
        buf.put_u8(self.code().into());
        buf.put_u8(length as u8);
        self.emit_value(buf);
        Ok(())
    }
}
