use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

use bytes::{BufMut, BytesMut};
use fixedbuf::FixedBuf;
use packet_utils::ByteCursor;
use serde::Serialize;

use crate::tracing::{bgp_debug, bgp_trace, bgp_warn};
use crate::{
    BGP_HEADER_LEN, CapabilityPacket, CapabilityRegistry, CapabilitySet, OpenConfig,
    OpenParseError,
};

pub const BGP_VERSION: u8 = 4;
pub const AS_TRANS: u16 = 23456;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptParamType {
    Capabilities,
    /// RFC 9072 marker in place of the first parameter type.
    Extended,
    Unknown(u8),
}

impl From<OptParamType> for u8 {
    fn from(typ: OptParamType) -> Self {
        match typ {
            OptParamType::Capabilities => 2,
            OptParamType::Extended => 255,
            OptParamType::Unknown(v) => v,
        }
    }
}

impl From<u8> for OptParamType {
    fn from(typ: u8) -> Self {
        match typ {
            2 => OptParamType::Capabilities,
            255 => OptParamType::Extended,
            v => OptParamType::Unknown(v),
        }
    }
}

/// Decoded OPEN message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenMessage {
    pub version: u8,
    /// Speaker ASN. Taken from the four-octet AS capability when present,
    /// otherwise from the 2-byte My Autonomous System field.
    pub asn: u32,
    pub hold_time: u16,
    pub bgp_identifier: Ipv4Addr,
    pub capabilities: CapabilitySet,
    /// Values of optional parameters other than Capabilities, kept verbatim.
    pub unrecognized_parameters: BTreeMap<u8, Vec<Vec<u8>>>,
}

impl OpenMessage {
    pub fn new(asn: u32, hold_time: u16, bgp_identifier: Ipv4Addr) -> Self {
        Self {
            version: BGP_VERSION,
            asn,
            hold_time,
            bgp_identifier,
            capabilities: CapabilitySet::default(),
            unrecognized_parameters: BTreeMap::new(),
        }
    }

    /// Value of the 2-byte My Autonomous System field.
    pub fn local_as_16(&self) -> u16 {
        u16::try_from(self.asn).unwrap_or(AS_TRANS)
    }

    pub fn parse_body(
        input: &[u8],
        registry: &CapabilityRegistry,
        config: &OpenConfig,
    ) -> Result<Self, OpenParseError> {
        let length = BGP_HEADER_LEN as usize + input.len();
        if length > config.max_message_len {
            return Err(OpenParseError::MessageTooLarge {
                length,
                max: config.max_message_len,
            });
        }

        let mut cursor = ByteCursor::new(input);
        let version = cursor.read_u8()?;
        if version != BGP_VERSION {
            return Err(OpenParseError::UnsupportedVersion(version));
        }
        let local_as = cursor.read_u16_be()?;
        let hold_time = cursor.read_u16_be()?;
        let bgp_identifier = Ipv4Addr::from(cursor.read_u32_be()?);

        let mut opt_param_len = cursor.read_u8()? as usize;
        let mut extended = false;
        if config.extended_opt_params
            && opt_param_len == u8::MAX as usize
            && cursor.peek_u8().ok() == Some(OptParamType::Extended.into())
        {
            cursor.read_u8()?;
            opt_param_len = cursor.read_u16_be()? as usize;
            extended = true;
        }

        let mut caps = Vec::new();
        let mut unrecognized_parameters: BTreeMap<u8, Vec<Vec<u8>>> = BTreeMap::new();
        let start = cursor.position();
        while cursor.position() - start < opt_param_len {
            let typ = cursor.read_u8()?;
            let len = if extended {
                cursor.read_u16_be()? as usize
            } else {
                cursor.read_u8()? as usize
            };
            let value = cursor.read_bytes(len)?;
            match OptParamType::from(typ) {
                OptParamType::Capabilities => parse_caps(registry, value, &mut caps)?,
                _ => {
                    bgp_debug!(typ, len, "Preserving unrecognized optional parameter");
                    unrecognized_parameters
                        .entry(typ)
                        .or_default()
                        .push(value.to_vec());
                }
            }
        }
        let consumed = cursor.position() - start;
        if consumed != opt_param_len {
            return Err(OpenParseError::TrailingBytes {
                expected: opt_param_len,
                actual: consumed,
            });
        }
        if !cursor.at_end() {
            return Err(OpenParseError::TrailingBytes {
                expected: cursor.position(),
                actual: input.len(),
            });
        }

        let mut as4 = None;
        let mut capabilities = CapabilitySet::default();
        for cap in caps.into_iter() {
            if let CapabilityPacket::As4(v) = &cap {
                as4 = Some(v.asn);
            }
            capabilities.insert(cap);
        }
        let asn = match as4 {
            Some(asn) => {
                if local_as != AS_TRANS && u32::from(local_as) != asn {
                    bgp_warn!(
                        local_as,
                        asn,
                        "My Autonomous System disagrees with four-octet AS capability"
                    );
                }
                asn
            }
            None => local_as.into(),
        };

        let open = Self {
            version,
            asn,
            hold_time,
            bgp_identifier,
            capabilities,
            unrecognized_parameters,
        };
        bgp_trace!(asn, %bgp_identifier, hold_time, "Decoded OPEN");
        Ok(open)
    }

    fn validate(&self) -> Result<(), OpenParseError> {
        if self.version != BGP_VERSION {
            return Err(OpenParseError::UnsupportedVersion(self.version));
        }
        if self.asn == 0 || (self.asn > u16::MAX as u32 && !self.capabilities.four_octet_as) {
            return Err(OpenParseError::InvalidAsn(self.asn));
        }
        Ok(())
    }

    pub fn emit_body(
        &self,
        registry: &CapabilityRegistry,
        config: &OpenConfig,
    ) -> Result<BytesMut, OpenParseError> {
        self.validate()?;

        let mut tlvs = Vec::new();
        for cap in registry.encode(self) {
            let mut buf = BytesMut::new();
            cap.encode(&mut buf)?;
            tlvs.push(buf);
        }
        let (extended, params) = match classic_params(&tlvs, &self.unrecognized_parameters) {
            Some(params) => (false, params),
            None if config.extended_opt_params => {
                (true, extended_params(&tlvs, &self.unrecognized_parameters)?)
            }
            None => {
                let length = tlvs.iter().map(|tlv| tlv.len()).sum::<usize>()
                    + self
                        .unrecognized_parameters
                        .values()
                        .flatten()
                        .map(|value| value.len())
                        .sum::<usize>();
                return Err(OpenParseError::OptParamsTooLong { length });
            }
        };

        let mut buf = FixedBuf::new(
            config
                .max_message_len
                .saturating_sub(BGP_HEADER_LEN as usize),
        );
        buf.put_u8(self.version)?;
        buf.put_u16(self.local_as_16())?;
        buf.put_u16(self.hold_time)?;
        buf.put_u32(self.bgp_identifier.into())?;
        if extended {
            buf.put_u8(u8::MAX)?;
            buf.put_u8(OptParamType::Extended.into())?;
            buf.put_u16(params.len() as u16)?;
        } else {
            buf.put_u8(params.len() as u8)?;
        }
        buf.put_slice(&params)?;

        bgp_trace!(
            asn = self.asn,
            length = buf.len(),
            extended,
            "Encoded OPEN"
        );
        Ok(buf.into_inner())
    }
}

fn parse_caps(
    registry: &CapabilityRegistry,
    input: &[u8],
    caps: &mut Vec<CapabilityPacket>,
) -> Result<(), OpenParseError> {
    let mut cursor = ByteCursor::new(input);
    while !cursor.at_end() {
        let code = cursor.read_u8()?;
        let length = cursor
            .read_u8()
            .map_err(|_| OpenParseError::malformed(code, 0))? as usize;
        let value = cursor
            .read_bytes(length)
            .map_err(|_| OpenParseError::malformed(code, length))?;
        caps.push(registry.decode(code, value)?);
    }
    Ok(())
}

/// Optional parameters with 1-byte lengths, all capability TLVs carried in a
/// single Capabilities parameter. `None` when the result needs the extended
/// format.
fn classic_params(tlvs: &[BytesMut], unknown: &BTreeMap<u8, Vec<Vec<u8>>>) -> Option<BytesMut> {
    const MAX: usize = u8::MAX as usize;

    fn put_param(buf: &mut BytesMut, typ: u8, value: &[u8]) -> Option<()> {
        let len = u8::try_from(value.len()).ok()?;
        buf.put_u8(typ);
        buf.put_u8(len);
        buf.put(value);
        Some(())
    }

    let mut buf = BytesMut::new();
    let caps: Vec<u8> = tlvs.iter().flat_map(|tlv| tlv.iter().copied()).collect();
    if !caps.is_empty() {
        put_param(&mut buf, OptParamType::Capabilities.into(), &caps)?;
    }
    for (typ, values) in unknown.iter() {
        for value in values.iter() {
            put_param(&mut buf, *typ, value)?;
        }
    }
    (buf.len() <= MAX).then_some(buf)
}

/// RFC 9072 optional parameters with 2-byte lengths.
fn extended_params(
    tlvs: &[BytesMut],
    unknown: &BTreeMap<u8, Vec<Vec<u8>>>,
) -> Result<BytesMut, OpenParseError> {
    const MAX: usize = u16::MAX as usize;

    fn put_param(buf: &mut BytesMut, typ: u8, value: &[u8]) -> Result<(), OpenParseError> {
        if value.len() > MAX {
            return Err(OpenParseError::ParameterTooLong {
                typ,
                length: value.len(),
            });
        }
        buf.put_u8(typ);
        buf.put_u16(value.len() as u16);
        buf.put(value);
        Ok(())
    }

    let mut buf = BytesMut::new();
    let caps: Vec<u8> = tlvs.iter().flat_map(|tlv| tlv.iter().copied()).collect();
    if !caps.is_empty() {
        put_param(&mut buf, OptParamType::Capabilities.into(), &caps)?;
    }
    for (typ, values) in unknown.iter() {
        for value in values.iter() {
            put_param(&mut buf, *typ, value)?;
        }
    }
    if buf.len() > MAX {
        return Err(OpenParseError::OptParamsTooLong { length: buf.len() });
    }
    Ok(buf)
}

impl fmt::Display for OpenMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Open Message:")?;
        writeln!(f, " Version: {}", self.version)?;
        writeln!(f, " AS: {}", self.asn)?;
        writeln!(f, " Hold Time: {}", self.hold_time)?;
        writeln!(f, " BGP Identifier: {}", self.bgp_identifier)?;
        write!(f, "{}", self.capabilities)?;
        for (typ, values) in self.unrecognized_parameters.iter() {
            for value in values.iter() {
                writeln!(f, " Unknown parameter: Type {} Length {}", typ, value.len())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_as_16() {
        let mut open = OpenMessage::new(65000, 90, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(open.local_as_16(), 65000);
        open.asn = 65536;
        assert_eq!(open.local_as_16(), AS_TRANS);
    }

    #[test]
    fn test_opt_param_type() {
        assert_eq!(OptParamType::from(2), OptParamType::Capabilities);
        assert_eq!(OptParamType::from(255), OptParamType::Extended);
        assert_eq!(u8::from(OptParamType::Unknown(1)), 1);
    }

    #[test]
    fn test_classic_params_limit() {
        let tlv = BytesMut::from(&[0x01, 0x04, 0x00, 0x01, 0x00, 0x01][..]);

        // 42 TLVs of 6 bytes: 252 + 2 byte parameter header.
        let tlvs = vec![tlv.clone(); 42];
        let params = classic_params(&tlvs, &BTreeMap::new()).unwrap();
        assert_eq!(params.len(), 254);
        assert_eq!(&params[..2], &[0x02, 0xfc]);

        let tlvs = vec![tlv; 43];
        assert!(classic_params(&tlvs, &BTreeMap::new()).is_none());
    }

    #[test]
    fn test_classic_params_unknown_after_caps() {
        let tlvs = vec![BytesMut::from(&[0x02, 0x00][..])];
        let mut unknown = BTreeMap::new();
        unknown.insert(9u8, vec![vec![0xde, 0xad]]);
        let params = classic_params(&tlvs, &unknown).unwrap();
        assert_eq!(&params[..], &[0x02, 0x02, 0x02, 0x00, 0x09, 0x02, 0xde, 0xad]);
    }

    #[test]
    fn test_extended_params() {
        let tlvs = vec![BytesMut::from(&[0x02, 0x00][..])];
        let params = extended_params(&tlvs, &BTreeMap::new()).unwrap();
        assert_eq!(&params[..], &[0x02, 0x00, 0x02, 0x02, 0x00]);
    }
}
