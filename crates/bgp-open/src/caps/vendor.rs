use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;
use strum_macros::Display;

use super::{CapCode, CapEmit};

/// Vendor capabilities which only signal support; any payload is ignored.
#[repr(u8)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    Serialize,
    IntoPrimitive,
    TryFromPrimitive,
)]
pub enum VendorCap {
    #[strum(serialize = "Route Refresh (vendor)")]
    RouteRefreshVendor = 80,
    #[strum(serialize = "Route Refresh (Cisco)")]
    RouteRefreshCisco = 128,
    #[strum(serialize = "Multisession (Cisco)")]
    MultisessionCisco = 131,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct CapVendor {
    pub cap: VendorCap,
}

impl CapVendor {
    pub fn new(cap: VendorCap) -> Self {
        Self { cap }
    }
}

impl CapEmit for CapVendor {
    fn code(&self) -> CapCode {
        u8::from(self.cap).into()
    }
}

impl fmt::Display for CapVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cap)
    }
}
