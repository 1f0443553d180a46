use std::fmt;

use bytes::BytesMut;

use super::*;
use crate::OpenParseError;

/// One decoded capability TLV.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum CapabilityPacket {
    MultiProtocol(CapMultiProtocol),
    RouteRefresh(CapRefresh),
    GracefulRestart(CapRestart),
    As4(CapAs4),
    AddPath(CapAddPath),
    EnhancedRouteRefresh(CapEnhancedRefresh),
    Llgr(CapLlgr),
    Vendor(CapVendor),
    Unknown(CapUnknown),
}

impl CapabilityPacket {
    fn as_emit(&self) -> &dyn CapEmit {
        match self {
            Self::MultiProtocol(m) => m,
            Self::RouteRefresh(m) => m,
            Self::GracefulRestart(m) => m,
            Self::As4(m) => m,
            Self::AddPath(m) => m,
            Self::EnhancedRouteRefresh(m) => m,
            Self::Llgr(m) => m,
            Self::Vendor(m) => m,
            Self::Unknown(m) => m,
        }
    }

    pub fn code(&self) -> u8 {
        self.as_emit().code().into()
    }

    pub fn encode(&self, buf: &mut BytesMut) -> Result<(), OpenParseError> {
        self.as_emit().emit(buf)
    }
}

impl fmt::Display for CapabilityPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultiProtocol(v) => write!(f, "{}", v),
            Self::RouteRefresh(v) => write!(f, "{}", v),
            Self::GracefulRestart(v) => write!(f, "{}", v),
            Self::As4(v) => write!(f, "{}", v),
            Self::AddPath(v) => write!(f, "{}", v),
            Self::EnhancedRouteRefresh(v) => write!(f, "{}", v),
            Self::Llgr(v) => write!(f, "{}", v),
            Self::Vendor(v) => write!(f, "{}", v),
            Self::Unknown(v) => write!(f, "{}", v),
        }
    }
}
