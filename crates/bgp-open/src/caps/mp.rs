use std::fmt;

use bytes::{BufMut, BytesMut};
use nom::IResult;
use nom::number::complete::be_u8;
use serde::Serialize;

use super::{CapCode, CapEmit};
use crate::{Afi, AfiSafi, OpenParseError, ParseBe, Safi};

#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, Serialize)]
pub struct CapMultiProtocol {
    pub afi_safi: AfiSafi,
}

impl CapMultiProtocol {
    pub fn new(afi_safi: AfiSafi) -> Self {
        Self { afi_safi }
    }
}

impl ParseBe<CapMultiProtocol> for CapMultiProtocol {
    fn parse_be(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, afi) = Afi::parse_be(input)?;
        let (input, _res) = be_u8(input)?;
        let (input, safi) = Safi::parse_be(input)?;
        Ok((input, Self::new(AfiSafi::new(afi, safi))))
    }
}

impl CapEmit for CapMultiProtocol {
    fn code(&self) -> CapCode {
        CapCode::MultiProtocol
    }

    fn len(&self) -> usize {
        4
    }

    fn validate(&self) -> Result<(), OpenParseError> {
        validate_afi_safi(&self.afi_safi)
    }

    fn emit_value(&self, buf: &mut BytesMut) {
        buf.put_u16(self.afi_safi.afi.into());
        buf.put_u8(0);
        buf.put_u8(self.afi_safi.safi.into());
    }
}

pub(crate) fn validate_afi_safi(afi_safi: &AfiSafi) -> Result<(), OpenParseError> {
    if afi_safi.is_valid() {
        Ok(())
    } else {
        Err(OpenParseError::InvalidAfiSafi {
            afi: afi_safi.afi.into(),
            safi: afi_safi.safi.into(),
        })
    }
}

impl fmt::Display for CapMultiProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MultiProtocol: {}", self.afi_safi)
    }
}
