use serde::{Deserialize, Serialize};

use crate::BGP_PACKET_LEN;

/// Limits applied by [`OpenCodec`](crate::OpenCodec).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenConfig {
    /// Largest framed message, header included, accepted on decode or
    /// produced on encode.
    pub max_message_len: usize,
    /// Accept and emit the RFC 9072 extended optional parameters format.
    pub extended_opt_params: bool,
}

impl Default for OpenConfig {
    fn default() -> Self {
        Self {
            max_message_len: BGP_PACKET_LEN,
            extended_opt_params: true,
        }
    }
}
