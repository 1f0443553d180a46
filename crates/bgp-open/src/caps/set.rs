use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use super::*;
use crate::AfiSafi;
use crate::tracing::bgp_debug;

/// Capabilities advertised in one OPEN message.
///
/// Repeated capabilities accumulate in wire order; nothing is overwritten
/// except the boolean flags, which are idempotent.
#[derive(Default, Debug, PartialEq, Eq, Clone, Serialize)]
pub struct CapabilitySet {
    /// Multiprotocol Extensions, one entry per advertised AFI/SAFI.
    pub afi_safi: Vec<AfiSafi>,
    pub route_refresh: bool,
    pub enhanced_route_refresh: bool,
    pub graceful_restart: Option<CapRestart>,
    /// Four-octet AS support; the ASN itself is `OpenMessage::asn`.
    pub four_octet_as: bool,
    pub add_path: Vec<AddPathValue>,
    pub llgr: Vec<LlgrValue>,
    pub vendor: BTreeSet<VendorCap>,
    /// Values of unregistered capability codes, kept verbatim.
    pub unrecognized: BTreeMap<u8, Vec<Vec<u8>>>,
}

impl CapabilitySet {
    pub fn insert(&mut self, cap: CapabilityPacket) {
        match cap {
            CapabilityPacket::MultiProtocol(v) => {
                self.afi_safi.push(v.afi_safi);
            }
            CapabilityPacket::RouteRefresh(_) => {
                self.route_refresh = true;
            }
            CapabilityPacket::EnhancedRouteRefresh(_) => {
                self.enhanced_route_refresh = true;
            }
            CapabilityPacket::GracefulRestart(v) => {
                if let Some(restart) = self.graceful_restart.as_mut() {
                    bgp_debug!("Repeated graceful restart capability, appending entries");
                    restart.values.extend(v.values);
                } else {
                    self.graceful_restart = Some(v);
                }
            }
            CapabilityPacket::As4(_) => {
                self.four_octet_as = true;
            }
            CapabilityPacket::AddPath(v) => {
                self.add_path.extend(v.values);
            }
            CapabilityPacket::Llgr(v) => {
                self.llgr.extend(v.values);
            }
            CapabilityPacket::Vendor(v) => {
                self.vendor.insert(v.cap);
            }
            CapabilityPacket::Unknown(v) => {
                bgp_debug!(
                    code = v.code,
                    length = v.data.len(),
                    "Preserving unrecognized capability"
                );
                self.unrecognized.entry(v.code).or_default().push(v.data);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn has_afi_safi(&self, afi_safi: &AfiSafi) -> bool {
        self.afi_safi.contains(afi_safi)
    }

    pub fn add_path_for(&self, afi_safi: &AfiSafi) -> Option<AddPathSendReceive> {
        self.add_path
            .iter()
            .find(|v| v.afi_safi == *afi_safi)
            .map(|v| v.send_receive)
    }
}

impl FromIterator<CapabilityPacket> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = CapabilityPacket>>(iter: I) -> Self {
        let mut caps = CapabilitySet::default();
        for cap in iter {
            caps.insert(cap);
        }
        caps
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for afi_safi in self.afi_safi.iter() {
            writeln!(f, " {}", CapMultiProtocol::new(*afi_safi))?;
        }
        if self.route_refresh {
            writeln!(f, " {}", CapRefresh::default())?;
        }
        if self.enhanced_route_refresh {
            writeln!(f, " {}", CapEnhancedRefresh::default())?;
        }
        if let Some(v) = &self.graceful_restart {
            writeln!(f, " {}", v)?;
        }
        if self.four_octet_as {
            writeln!(f, " 4 Octet AS")?;
        }
        if !self.add_path.is_empty() {
            writeln!(f, " {}", CapAddPath::new(self.add_path.clone()))?;
        }
        if !self.llgr.is_empty() {
            writeln!(f, " {}", CapLlgr::new(self.llgr.clone()))?;
        }
        for v in self.vendor.iter() {
            writeln!(f, " {}", v)?;
        }
        for (code, values) in self.unrecognized.iter() {
            for data in values.iter() {
                writeln!(f, " {}", CapUnknown::new(*code, data.clone()))?;
            }
        }
        Ok(())
    }
}
