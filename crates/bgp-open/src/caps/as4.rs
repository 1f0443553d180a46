use std::fmt;

use bytes::{BufMut, BytesMut};
use nom::IResult;
use nom::number::complete::be_u32;
use serde::Serialize;

use super::{CapCode, CapEmit};
use crate::ParseBe;

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct CapAs4 {
    pub asn: u32,
}

impl CapAs4 {
    pub fn new(asn: u32) -> Self {
        Self { asn }
    }
}

impl ParseBe<CapAs4> for CapAs4 {
    fn parse_be(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, asn) = be_u32(input)?;
        Ok((input, Self::new(asn)))
    }
}

impl CapEmit for CapAs4 {
    fn code(&self) -> CapCode {
        CapCode::As4
    }

    fn len(&self) -> usize {
        4
    }

    fn emit_value(&self, buf: &mut BytesMut) {
        buf.put_u32(self.asn);
    }
}

impl fmt::Display for CapAs4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "4 Octet AS: {}", self.asn)
    }
}
