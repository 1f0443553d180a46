pub mod open;
pub use open::*;

pub mod packet;
pub use packet::*;

pub mod codec;
pub use codec::*;

pub mod config;
pub use config::OpenConfig;

pub mod caps;
pub use caps::*;

pub mod afi;
pub use afi::*;

pub mod error;
pub use error::*;

pub mod parse_be;
pub use parse_be::{ParseBe, many0_complete, parse_entries, parse_value};

mod tracing;
