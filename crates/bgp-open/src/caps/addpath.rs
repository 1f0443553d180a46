use std::fmt;

use bytes::{BufMut, BytesMut};
use itertools::Itertools;
use nom::{IResult, number::complete::be_u8};
use serde::Serialize;
use strum_macros::Display;

use super::mp::validate_afi_safi;
use super::{CapCode, CapEmit};
use crate::{Afi, AfiSafi, OpenParseError, ParseBe, Safi};

#[derive(Debug, PartialEq, Clone, Ord, PartialOrd, Eq, Serialize)]
pub struct AddPathValue {
    pub afi_safi: AfiSafi,
    pub send_receive: AddPathSendReceive,
}

impl AddPathValue {
    pub fn new(afi_safi: AfiSafi, send_receive: AddPathSendReceive) -> Self {
        Self {
            afi_safi,
            send_receive,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, PartialEq, Copy, Ord, PartialOrd, Eq, Display, Serialize)]
pub enum AddPathSendReceive {
    Receive = 1,
    Send = 2,
    SendReceive = 3,
    #[strum(to_string = "Unknown({0})")]
    Unknown(u8),
}

impl From<AddPathSendReceive> for u8 {
    fn from(typ: AddPathSendReceive) -> Self {
        use AddPathSendReceive::*;
        match typ {
            Receive => 1,
            Send => 2,
            SendReceive => 3,
            Unknown(v) => v,
        }
    }
}

impl From<u8> for AddPathSendReceive {
    fn from(typ: u8) -> Self {
        use AddPathSendReceive::*;
        match typ {
            1 => Receive,
            2 => Send,
            3 => SendReceive,
            v => Unknown(v),
        }
    }
}

impl AddPathSendReceive {
    pub fn parse_be(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, val) = be_u8(input)?;
        Ok((input, val.into()))
    }

    pub fn is_receive(&self) -> bool {
        *self == AddPathSendReceive::Receive || *self == AddPathSendReceive::SendReceive
    }

    pub fn is_send(&self) -> bool {
        *self == AddPathSendReceive::Send || *self == AddPathSendReceive::SendReceive
    }
}

impl ParseBe<AddPathValue> for AddPathValue {
    fn parse_be(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, afi) = Afi::parse_be(input)?;
        let (input, safi) = Safi::parse_be(input)?;
        let (input, send_receive) = AddPathSendReceive::parse_be(input)?;
        Ok((input, Self::new(AfiSafi::new(afi, safi), send_receive)))
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize)]
pub struct CapAddPath {
    pub values: Vec<AddPathValue>,
}

impl CapAddPath {
    pub const MAX_VALUES: usize = u8::MAX as usize / 4;

    pub fn new(values: Vec<AddPathValue>) -> Self {
        Self { values }
    }

    /// One capability per `MAX_VALUES` entries; none for an empty list.
    pub fn split(values: &[AddPathValue]) -> Vec<CapAddPath> {
        values
            .chunks(Self::MAX_VALUES)
            .map(|values| Self::new(values.to_vec()))
            .collect()
    }
}

impl CapEmit for CapAddPath {
    fn code(&self) -> CapCode {
        CapCode::AddPath
    }

    fn len(&self) -> usize {
        self.values.len() * 4
    }

    fn validate(&self) -> Result<(), OpenParseError> {
        self.values
            .iter()
            .try_for_each(|val| validate_afi_safi(&val.afi_safi))
    }

    fn emit_value(&self, buf: &mut BytesMut) {
        for val in self.values.iter() {
            buf.put_u16(val.afi_safi.afi.into());
            buf.put_u8(val.afi_safi.safi.into());
            buf.put_u8(val.send_receive.into());
        }
    }
}

impl fmt::Display for CapAddPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self
            .values
            .iter()
            .map(|v| format!("{}: {}", v.afi_safi, v.send_receive))
            .join(", ");
        write!(f, "AddPath: {}", values)
    }
}
