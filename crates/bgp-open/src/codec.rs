use std::sync::LazyLock;

use bytes::BytesMut;

use crate::{BgpType, CapabilityRegistry, OpenConfig, OpenMessage, OpenParseError, construct};

static DEFAULT_CODEC: LazyLock<OpenCodec> = LazyLock::new(OpenCodec::default);

/// OPEN message codec. Holds no per-call state and may be shared freely
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct OpenCodec {
    registry: CapabilityRegistry,
    config: OpenConfig,
}

impl OpenCodec {
    pub fn new(config: OpenConfig) -> Self {
        Self {
            registry: CapabilityRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &OpenConfig {
        &self.config
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Decode an OPEN body with the common BGP header already stripped.
    pub fn decode(&self, body: &[u8]) -> Result<OpenMessage, OpenParseError> {
        OpenMessage::parse_body(body, &self.registry, &self.config)
    }

    pub fn encode_body(&self, open: &OpenMessage) -> Result<BytesMut, OpenParseError> {
        open.emit_body(&self.registry, &self.config)
    }

    /// Encode a complete OPEN message, header included.
    pub fn encode_message(&self, open: &OpenMessage) -> Result<BytesMut, OpenParseError> {
        let body = self.encode_body(open)?;
        construct(BgpType::Open, &body, self.config.max_message_len)
    }
}

pub fn decode_open_body(body: &[u8]) -> Result<OpenMessage, OpenParseError> {
    DEFAULT_CODEC.decode(body)
}

pub fn encode_open_body(open: &OpenMessage) -> Result<BytesMut, OpenParseError> {
    DEFAULT_CODEC.encode_body(open)
}

pub fn encode_open_message(open: &OpenMessage) -> Result<BytesMut, OpenParseError> {
    DEFAULT_CODEC.encode_message(open)
}
