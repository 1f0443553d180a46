use std::fmt;

use bitfield_struct::bitfield;
use bytes::{BufMut, BytesMut};
use itertools::Itertools;
use nom::{IResult, Parser};
use nom::number::complete::{be_u8, be_u16};
use serde::Serialize;

use super::mp::validate_afi_safi;
use crate::{Afi, AfiSafi, CapCode, CapEmit, OpenParseError, ParseBe, Safi, many0_complete};

pub const RESTART_TIME_MAX: u16 = 0x0fff;

#[bitfield(u16, debug = true)]
#[derive(PartialEq, Eq)]
pub struct RestartFlagTime {
    #[bits(12)]
    pub restart_time: u16,
    #[bits(2)]
    pub resvd: u8,
    pub n_flag: bool,
    pub r_flag: bool,
}

#[bitfield(u8, debug = true)]
#[derive(PartialEq, Eq)]
pub struct RestartFlags {
    #[bits(7)]
    pub resvd: u8,
    pub f_flag: bool,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct RestartValue {
    pub afi_safi: AfiSafi,
    /// Forwarding state preserved across the restart.
    pub forwarding: bool,
}

impl RestartValue {
    pub fn new(afi_safi: AfiSafi, forwarding: bool) -> Self {
        Self {
            afi_safi,
            forwarding,
        }
    }
}

impl ParseBe<RestartValue> for RestartValue {
    fn parse_be(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, afi) = Afi::parse_be(input)?;
        let (input, safi) = Safi::parse_be(input)?;
        let (input, flags) = be_u8(input)?;
        let flags = RestartFlags::from(flags);
        Ok((input, Self::new(AfiSafi::new(afi, safi), flags.f_flag())))
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize)]
pub struct CapRestart {
    /// R bit: the speaker has restarted.
    pub restart_state: bool,
    /// N bit: graceful notification support (RFC 8538).
    pub notification: bool,
    pub restart_time: u16,
    pub values: Vec<RestartValue>,
}

impl CapRestart {
    /// Entries that fit in one TLV after the 2-byte header.
    pub const MAX_VALUES: usize = (u8::MAX as usize - 2) / 4;

    pub fn new(restart_time: u16) -> Self {
        Self {
            restart_time,
            ..Default::default()
        }
    }

    /// One capability per `MAX_VALUES` entries, each repeating the header.
    pub fn split(&self) -> Vec<CapRestart> {
        if self.values.is_empty() {
            return vec![self.clone()];
        }
        self.values
            .chunks(Self::MAX_VALUES)
            .map(|values| CapRestart {
                values: values.to_vec(),
                ..*self
            })
            .collect()
    }
}

impl ParseBe<CapRestart> for CapRestart {
    fn parse_be(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, flag_time) = be_u16(input)?;
        let flag_time = RestartFlagTime::from(flag_time);
        let (input, values) = many0_complete(RestartValue::parse_be).parse(input)?;
        let cap = Self {
            restart_state: flag_time.r_flag(),
            notification: flag_time.n_flag(),
            restart_time: flag_time.restart_time(),
            values,
        };
        Ok((input, cap))
    }
}

impl CapEmit for CapRestart {
    fn code(&self) -> CapCode {
        CapCode::GracefulRestart
    }

    fn len(&self) -> usize {
        2 + self.values.len() * 4
    }

    fn validate(&self) -> Result<(), OpenParseError> {
        if self.restart_time > RESTART_TIME_MAX {
            return Err(OpenParseError::ValueOutOfRange {
                field: "restart time",
                value: self.restart_time.into(),
                max: RESTART_TIME_MAX.into(),
            });
        }
        self.values
            .iter()
            .try_for_each(|val| validate_afi_safi(&val.afi_safi))
    }

    fn emit_value(&self, buf: &mut BytesMut) {
        let flag_time = RestartFlagTime::new()
            .with_restart_time(self.restart_time)
            .with_n_flag(self.notification)
            .with_r_flag(self.restart_state);
        buf.put_u16(flag_time.into());
        for val in self.values.iter() {
            buf.put_u16(val.afi_safi.afi.into());
            buf.put_u8(val.afi_safi.safi.into());
            buf.put_u8(RestartFlags::new().with_f_flag(val.forwarding).into());
        }
    }
}

impl fmt::Display for CapRestart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GracefulRestart: restart time:{} R:{} N:{}",
            self.restart_time, self.restart_state, self.notification
        )?;
        if !self.values.is_empty() {
            let values = self
                .values
                .iter()
                .map(|v| format!("{} F:{}", v.afi_safi, v.forwarding))
                .join(", ");
            write!(f, " {}", values)?;
        }
        Ok(())
    }
}
