use std::fmt;

use bytes::{BufMut, BytesMut};
use serde::Serialize;

use super::{CapCode, CapEmit};

/// Capability with an unregistered code, carried verbatim.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct CapUnknown {
    pub code: u8,
    pub data: Vec<u8>,
}

impl CapUnknown {
    pub fn new(code: u8, data: Vec<u8>) -> Self {
        Self { code, data }
    }
}

impl CapEmit for CapUnknown {
    fn code(&self) -> CapCode {
        CapCode::Unknown(self.code)
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn emit_value(&self, buf: &mut BytesMut) {
        buf.put(&self.data[..]);
    }
}

impl fmt::Display for CapUnknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown: Code {} Length {}", self.code, self.data.len())
    }
}
