use std::sync::Arc;

use dashmap::DashMap;

use oplink_core::codec::{std_msgs, MessageCodec};
use oplink_core::error::{OpLinkError, Result};
use oplink_core::protocol::TypeIdent;

/// Registry of message codecs keyed by `"<package>/<name>"`.
#[derive(Default)]
pub struct CodecRegistry {
    codecs: DashMap<String, Arc<dyn MessageCodec>>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self {
            codecs: DashMap::new(),
        }
    }

    /// Registry preloaded with the built-in `std_msgs` types.
    pub fn with_builtins() -> Result<Self> {
        let reg = Self::new();
        for codec in std_msgs::codecs()? {
            reg.register(Arc::new(codec));
        }
        Ok(reg)
    }

    /// Register (or replace) a codec under its own type tag.
    pub fn register(&self, codec: Arc<dyn MessageCodec>) {
        self.codecs.insert(codec.ident().tag(), codec);
    }

    pub fn registered_types(&self) -> Vec<String> {
        let mut out: Vec<String> = self.codecs.iter().map(|e| e.key().clone()).collect();
        out.sort();
        out
    }

    pub fn resolve(&self, ident: &TypeIdent) -> Result<Arc<dyn MessageCodec>> {
        let tag = ident.tag();
        tracing::info!(package = ident.package(), ty = ident.name(), "resolving message type");
        let found = self.codecs.get(&tag).map(|e| Arc::clone(e.value()));
        found.ok_or_else(|| {
            let known = self.registered_types();
            tracing::error!(ty = %tag, ?known, "message type not registered");
            OpLinkError::Configuration(format!("unknown message type: {tag}"))
        })
    }
}
