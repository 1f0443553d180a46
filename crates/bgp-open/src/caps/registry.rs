use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;

use super::*;
use crate::{OpenMessage, OpenParseError, parse_entries, parse_value};

pub type DecodeFn = fn(&[u8]) -> Result<CapabilityPacket, OpenParseError>;
pub type EncodeFn = fn(&OpenMessage) -> Vec<CapabilityPacket>;

/// Value length accepted for a registered capability code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapLength {
    Exact(usize),
    AtMost(usize),
    /// A fixed header followed by at least `min` entries of `size` bytes.
    Entries {
        header: usize,
        size: usize,
        min: usize,
    },
}

impl CapLength {
    pub fn check(&self, length: usize) -> bool {
        match *self {
            Self::Exact(n) => length == n,
            Self::AtMost(n) => length <= n,
            Self::Entries { header, size, min } => {
                length >= header + size * min && (length - header) % size == 0
            }
        }
    }
}

#[derive(Clone)]
pub struct CapabilityEntry {
    pub code: CapCode,
    pub name: &'static str,
    pub length: CapLength,
    pub decode: DecodeFn,
    /// Capability TLVs to advertise for this code, in emit order.
    pub encode: EncodeFn,
}

impl fmt::Debug for CapabilityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityEntry")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("length", &self.length)
            .finish()
    }
}

/// Immutable code to codec table for every capability this crate understands.
#[derive(Debug, Clone)]
pub struct CapabilityRegistry {
    entries: BTreeMap<u8, CapabilityEntry>,
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn vendor_packet(open: &OpenMessage, cap: VendorCap) -> Vec<CapabilityPacket> {
    open.capabilities
        .vendor
        .contains(&cap)
        .then(|| CapabilityPacket::Vendor(CapVendor::new(cap)))
        .into_iter()
        .collect()
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        let entries = [
            CapabilityEntry {
                code: CapCode::MultiProtocol,
                name: "Multiprotocol Extensions",
                length: CapLength::Exact(4),
                decode: |value| {
                    parse_value(CapCode::MultiProtocol, value).map(CapabilityPacket::MultiProtocol)
                },
                encode: |open| {
                    open.capabilities
                        .afi_safi
                        .iter()
                        .map(|afi_safi| {
                            CapabilityPacket::MultiProtocol(CapMultiProtocol::new(*afi_safi))
                        })
                        .collect()
                },
            },
            CapabilityEntry {
                code: CapCode::RouteRefresh,
                name: "Route Refresh",
                length: CapLength::AtMost(1),
                decode: |_| Ok(CapabilityPacket::RouteRefresh(CapRefresh::default())),
                encode: |open| {
                    open.capabilities
                        .route_refresh
                        .then(|| CapabilityPacket::RouteRefresh(CapRefresh::default()))
                        .into_iter()
                        .collect()
                },
            },
            CapabilityEntry {
                code: CapCode::GracefulRestart,
                name: "Graceful Restart",
                length: CapLength::Entries {
                    header: 2,
                    size: 4,
                    min: 0,
                },
                decode: |value| {
                    parse_value(CapCode::GracefulRestart, value)
                        .map(CapabilityPacket::GracefulRestart)
                },
                encode: |open| {
                    open.capabilities
                        .graceful_restart
                        .iter()
                        .flat_map(|restart| restart.split())
                        .map(CapabilityPacket::GracefulRestart)
                        .collect()
                },
            },
            CapabilityEntry {
                code: CapCode::As4,
                name: "Four-Octet AS Number",
                length: CapLength::Exact(4),
                decode: |value| parse_value(CapCode::As4, value).map(CapabilityPacket::As4),
                encode: |open| {
                    open.capabilities
                        .four_octet_as
                        .then(|| CapabilityPacket::As4(CapAs4::new(open.asn)))
                        .into_iter()
                        .collect()
                },
            },
            CapabilityEntry {
                code: CapCode::AddPath,
                name: "Add-Path",
                length: CapLength::Entries {
                    header: 0,
                    size: 4,
                    min: 0,
                },
                decode: |value| {
                    parse_entries(CapCode::AddPath, value)
                        .map(|values| CapabilityPacket::AddPath(CapAddPath::new(values)))
                },
                encode: |open| {
                    CapAddPath::split(&open.capabilities.add_path)
                        .into_iter()
                        .map(CapabilityPacket::AddPath)
                        .collect()
                },
            },
            CapabilityEntry {
                code: CapCode::EnhancedRouteRefresh,
                name: "Enhanced Route Refresh",
                length: CapLength::Exact(0),
                decode: |_| {
                    Ok(CapabilityPacket::EnhancedRouteRefresh(
                        CapEnhancedRefresh::default(),
                    ))
                },
                encode: |open| {
                    open.capabilities
                        .enhanced_route_refresh
                        .then(|| {
                            CapabilityPacket::EnhancedRouteRefresh(CapEnhancedRefresh::default())
                        })
                        .into_iter()
                        .collect()
                },
            },
            CapabilityEntry {
                code: CapCode::Llgr,
                name: "Long-Lived Graceful Restart",
                length: CapLength::Entries {
                    header: 0,
                    size: 7,
                    min: 0,
                },
                decode: |value| {
                    parse_entries(CapCode::Llgr, value)
                        .map(|values| CapabilityPacket::Llgr(CapLlgr::new(values)))
                },
                encode: |open| {
                    CapLlgr::split(&open.capabilities.llgr)
                        .into_iter()
                        .map(CapabilityPacket::Llgr)
                        .collect()
                },
            },
            CapabilityEntry {
                code: CapCode::RouteRefreshVendor,
                name: "Route Refresh (vendor)",
                length: CapLength::AtMost(1),
                decode: |_| {
                    Ok(CapabilityPacket::Vendor(CapVendor::new(
                        VendorCap::RouteRefreshVendor,
                    )))
                },
                encode: |open| vendor_packet(open, VendorCap::RouteRefreshVendor),
            },
            CapabilityEntry {
                code: CapCode::RouteRefreshCisco,
                name: "Route Refresh (Cisco)",
                length: CapLength::AtMost(1),
                decode: |_| {
                    Ok(CapabilityPacket::Vendor(CapVendor::new(
                        VendorCap::RouteRefreshCisco,
                    )))
                },
                encode: |open| vendor_packet(open, VendorCap::RouteRefreshCisco),
            },
            CapabilityEntry {
                code: CapCode::MultisessionCisco,
                name: "Multisession (Cisco)",
                length: CapLength::AtMost(1),
                decode: |_| {
                    Ok(CapabilityPacket::Vendor(CapVendor::new(
                        VendorCap::MultisessionCisco,
                    )))
                },
                encode: |open| vendor_packet(open, VendorCap::MultisessionCisco),
            },
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.code.into(), entry))
                .collect(),
        }
    }

    pub fn get(&self, code: u8) -> Option<&CapabilityEntry> {
        self.entries.get(&code)
    }

    pub fn name(&self, code: u8) -> &'static str {
        self.get(code).map_or("Unknown", |entry| entry.name)
    }

    /// Registered entries in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = &CapabilityEntry> {
        self.entries.values()
    }

    /// Decode one capability value. Unregistered codes are carried verbatim.
    pub fn decode(&self, code: u8, value: &[u8]) -> Result<CapabilityPacket, OpenParseError> {
        let Some(entry) = self.get(code) else {
            return Ok(CapabilityPacket::Unknown(CapUnknown::new(
                code,
                value.to_vec(),
            )));
        };
        if !entry.length.check(value.len()) {
            return Err(OpenParseError::malformed(code, value.len()));
        }
        (entry.decode)(value)
    }

    /// Capability TLVs for `open` in ascending code order, registered and
    /// unrecognized codes interleaved.
    pub fn encode(&self, open: &OpenMessage) -> Vec<CapabilityPacket> {
        let registered = self.iter().flat_map(|entry| (entry.encode)(open));
        let unrecognized = open
            .capabilities
            .unrecognized
            .iter()
            .flat_map(|(code, values)| {
                values
                    .iter()
                    .map(move |data| CapabilityPacket::Unknown(CapUnknown::new(*code, data.clone())))
            });
        registered
            .merge_by(unrecognized, |a, b| a.code() <= b.code())
            .collect()
    }
}
