//! # Device-Side Asset Cache
//!
//! Stored graphics live in printer memory under short names. One upload per
//! distinct image is enough for a whole document: subsequent shapes with the
//! same identity reference the stored name instead of re-uploading.
//!
//! ## Naming
//!
//! Printer name fields are tight (EPL2 allows 8 characters), so the
//! identity key is hashed (FNV-1a, 64-bit) and rendered as a decimal string
//! truncated to 8 characters. Deterministic across runs and platforms, so
//! a stored graphic survives reconnects with the same name.

use std::collections::HashMap;

/// How image shapes reach the printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageMode {
    /// Inline raster data per shape. No printer memory used, no caching.
    #[default]
    DirectWrite,
    /// Upload in the header, reference by name per shape. Repeated shapes
    /// with the same identity share one upload.
    StoreAndReference,
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Longest name every supported protocol accepts.
const MAX_NAME_LEN: usize = 8;

/// Derive the device-side name for an asset identity key.
pub fn derive_name(identity: &str) -> String {
    let mut hash = FNV_OFFSET;
    for byte in identity.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }

    let mut name = hash.to_string();
    name.truncate(MAX_NAME_LEN);
    name
}

/// Identity-keyed map of assets already uploaded in this session.
#[derive(Debug, Default)]
pub struct AssetCache {
    names: HashMap<String, String>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of an already-uploaded asset, if any.
    pub fn get(&self, identity: &str) -> Option<&str> {
        self.names.get(identity).map(String::as_str)
    }

    /// Derive a name for a fresh asset and remember it.
    pub fn assign(&mut self, identity: &str) -> String {
        let name = derive_name(identity);
        self.names.insert(identity.to_string(), name.clone());
        name
    }

    /// Forget every stored name, e.g. after a printer memory reset.
    pub fn clear(&mut self) {
        self.names.clear();
    }
}
