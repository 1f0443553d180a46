use std::fmt;

use bitfield_struct::bitfield;
use bytes::{BufMut, BytesMut};
use itertools::Itertools;
use nom::IResult;
use nom::number::complete::{be_u8, be_u24};
use packet_utils::{U24_MAX, u32_u24};
use serde::Serialize;

use super::mp::validate_afi_safi;
use crate::{Afi, AfiSafi, CapCode, CapEmit, OpenParseError, ParseBe, Safi};

#[bitfield(u8, debug = true)]
#[derive(PartialEq, Eq)]
pub struct LlgrFlags {
    #[bits(7)]
    pub resvd: u8,
    #[bits(1)]
    pub f_bit: bool,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct LlgrValue {
    pub afi_safi: AfiSafi,
    pub forwarding: bool,
    /// Long-lived stale time in seconds, 24 bits on the wire.
    pub stale_time: u32,
}

impl LlgrValue {
    pub fn new(afi_safi: AfiSafi, stale_time: u32) -> Self {
        Self {
            afi_safi,
            forwarding: false,
            stale_time,
        }
    }
}

impl ParseBe<LlgrValue> for LlgrValue {
    fn parse_be(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, afi) = Afi::parse_be(input)?;
        let (input, safi) = Safi::parse_be(input)?;
        let (input, flags) = be_u8(input)?;
        let (input, stale_time) = be_u24(input)?;
        let value = Self {
            afi_safi: AfiSafi::new(afi, safi),
            forwarding: LlgrFlags::from(flags).f_bit(),
            stale_time,
        };
        Ok((input, value))
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize)]
pub struct CapLlgr {
    pub values: Vec<LlgrValue>,
}

impl CapLlgr {
    pub const MAX_VALUES: usize = u8::MAX as usize / 7;

    pub fn new(values: Vec<LlgrValue>) -> Self {
        Self { values }
    }

    pub fn split(values: &[LlgrValue]) -> Vec<CapLlgr> {
        values
            .chunks(Self::MAX_VALUES)
            .map(|values| Self::new(values.to_vec()))
            .collect()
    }
}

impl CapEmit for CapLlgr {
    fn code(&self) -> CapCode {
        CapCode::Llgr
    }

    fn len(&self) -> usize {
        self.values.len() * 7
    }

    fn validate(&self) -> Result<(), OpenParseError> {
        for val in self.values.iter() {
            validate_afi_safi(&val.afi_safi)?;
            if val.stale_time > U24_MAX {
                return Err(OpenParseError::ValueOutOfRange {
                    field: "stale time",
                    value: val.stale_time,
                    max: U24_MAX,
                });
            }
        }
        Ok(())
    }

    fn emit_value(&self, buf: &mut BytesMut) {
        for val in self.values.iter() {
            buf.put_u16(val.afi_safi.afi.into());
            buf.put_u8(val.afi_safi.safi.into());
            buf.put_u8(LlgrFlags::new().with_f_bit(val.forwarding).into());
            buf.put(&u32_u24(val.stale_time)[..]);
        }
    }
}

impl fmt::Display for CapLlgr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self
            .values
            .iter()
            .map(|v| {
                format!(
                    "{} F:{} StaleTime:{}",
                    v.afi_safi,
                    if v.forwarding { 1 } else { 0 },
                    v.stale_time
                )
            })
            .join(", ");
        write!(f, "LLGR: {}", values)
    }
}
