pub mod typ;
pub use typ::CapCode;

pub mod packet;
pub use packet::CapabilityPacket;

pub mod emit;
pub use emit::CapEmit;

pub mod mp;
pub use mp::CapMultiProtocol;

pub mod refresh;
pub use refresh::{CapEnhancedRefresh, CapRefresh};

pub mod graceful;
pub use graceful::{CapRestart, RestartFlagTime, RestartFlags, RestartValue};

pub mod as4;
pub use as4::CapAs4;

pub mod addpath;
pub use addpath::{AddPathSendReceive, AddPathValue, CapAddPath};

pub mod llgr;
pub use llgr::{CapLlgr, LlgrFlags, LlgrValue};

pub mod vendor;
pub use vendor::{CapVendor, VendorCap};

pub mod unknown;
pub use unknown::CapUnknown;

pub mod set;
pub use set::CapabilitySet;

pub mod registry;
pub use registry::{CapLength, CapabilityEntry, CapabilityRegistry};
