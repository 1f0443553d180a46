use std::fmt;

use serde::Serialize;

use super::{CapCode, CapEmit};

#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize)]
pub struct CapRefresh {}

impl CapEmit for CapRefresh {
    fn code(&self) -> CapCode {
        CapCode::RouteRefresh
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize)]
pub struct CapEnhancedRefresh {}

impl CapEmit for CapEnhancedRefresh {
    fn code(&self) -> CapCode {
        CapCode::EnhancedRouteRefresh
    }
}

impl fmt::Display for CapRefresh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Route Refresh")
    }
}

impl fmt::Display for CapEnhancedRefresh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Enhanced Route Refresh")
    }
}
