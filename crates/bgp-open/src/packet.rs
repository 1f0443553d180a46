use bytes::BytesMut;
use fixedbuf::{FixedBuf, FixedBufError};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::OpenParseError;

pub const BGP_PACKET_LEN: usize = 4096;
pub const BGP_HEADER_LEN: u16 = 19;
pub const BGP_MARKER: [u8; 16] = [0xffu8; 16];

#[repr(u8)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
pub enum BgpType {
    Open = 1,
    Update = 2,
    Notification = 3,
    Keepalive = 4,
    RouteRefresh = 5,
    Capability = 6,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BgpHeader {
    pub marker: [u8; 16],
    pub length: u16,
    pub typ: BgpType,
}

impl BgpHeader {
    pub fn new(typ: BgpType, length: u16) -> Self {
        Self {
            marker: BGP_MARKER,
            length,
            typ,
        }
    }

    pub fn emit(&self, buf: &mut FixedBuf) -> Result<(), FixedBufError> {
        buf.put_slice(&self.marker[..])?;
        buf.put_u16(self.length)?;
        buf.put_u8(self.typ.into())
    }
}

/// Prepend the common BGP header to an already encoded message body.
///
/// Stripping the header on receive belongs to the message dispatcher since the
/// header is shared by every message type.
pub fn construct(typ: BgpType, body: &[u8], max_len: usize) -> Result<BytesMut, OpenParseError> {
    let length = BGP_HEADER_LEN as usize + body.len();
    let max = max_len.min(u16::MAX as usize);
    if length > max {
        return Err(OpenParseError::MessageTooLarge { length, max });
    }
    let mut buf = FixedBuf::new(length);
    BgpHeader::new(typ, length as u16).emit(&mut buf)?;
    buf.put_slice(body)?;
    Ok(buf.into_inner())
}
