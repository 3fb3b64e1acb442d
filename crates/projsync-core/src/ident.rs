//! Deterministic identifiers for units and the aggregate

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Project-type id Visual Studio uses for C# class libraries.
pub const CSHARP_PROJECT_TYPE_ID: &str = "FAE04EC0-301F-11D3-BF4B-00C04F79EFBC";

/// Produces the identifiers written into project and solution artifacts.
///
/// Implementations must be pure: the same inputs always yield the same id.
pub trait IdentifierGenerator: Send + Sync {
    /// Id of a unit's project within an aggregate.
    fn unit_id(&self, aggregate: &str, unit: &str) -> String;

    /// Project-type id for the aggregate, chosen by the primary source
    /// extension.
    fn aggregate_id(&self, aggregate: &str, primary_extension: &str) -> String;
}

/// Digest-backed identifiers: the first 128 bits of SHA-256 rendered as a
/// hyphenated lowercase UUID.
#[derive(Debug, Default, Clone, Copy)]
pub struct DigestIdentifiers;

impl DigestIdentifiers {
    pub fn new() -> Self {
        Self
    }
}

impl IdentifierGenerator for DigestIdentifiers {
    fn unit_id(&self, aggregate: &str, unit: &str) -> String {
        digest_id(&format!("{aggregate}{unit}salt"))
    }

    fn aggregate_id(&self, aggregate: &str, primary_extension: &str) -> String {
        if primary_extension.eq_ignore_ascii_case("cs") {
            return CSHARP_PROJECT_TYPE_ID.to_string();
        }
        digest_id(aggregate)
    }
}

fn digest_id(input: &str) -> String {
    let hash = Sha256::digest(input.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);
    Uuid::from_bytes(bytes).hyphenated().to_string()
}
