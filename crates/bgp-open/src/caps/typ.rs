#[repr(u8)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum CapCode {
    #[default]
    MultiProtocol = 1,
    RouteRefresh = 2,
    GracefulRestart = 64,
    As4 = 65,
    AddPath = 69,
    EnhancedRouteRefresh = 70,
    Llgr = 71,
    RouteRefreshVendor = 80,
    RouteRefreshCisco = 128,
    MultisessionCisco = 131,
    Unknown(u8),
}

impl From<CapCode> for u8 {
    fn from(typ: CapCode) -> Self {
        use CapCode::*;
        match typ {
            MultiProtocol => 1,
            RouteRefresh => 2,
            GracefulRestart => 64,
            As4 => 65,
            AddPath => 69,
            EnhancedRouteRefresh => 70,
            Llgr => 71,
            RouteRefreshVendor => 80,
            RouteRefreshCisco => 128,
            MultisessionCisco => 131,
            Unknown(v) => v,
        }
    }
}

impl From<u8> for CapCode {
    fn from(typ: u8) -> Self {
        use CapCode::*;
        match typ {
            1 => MultiProtocol,
            2 => RouteRefresh,
            64 => GracefulRestart,
            65 => As4,
            69 => AddPath,
            70 => EnhancedRouteRefresh,
            71 => Llgr,
            80 => RouteRefreshVendor,
            128 => RouteRefreshCisco,
            131 => MultisessionCisco,
            v => Unknown(v),
        }
    }
}
