//! Owner identities.
//!
//! An owner is identified by the raw ed25519 public key the interaction
//! layer authenticated the call with. The ledger never derives or checks
//! it; it is only compared and hashed.

use std::fmt;

use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// OwnerId
// ---------------------------------------------------------------------------

/// Principal on whose behalf a balance is held (32-byte public key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OwnerId(pub [u8; 32]);

impl OwnerId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Identity of the holder of `key`.
    #[must_use]
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        Self(key.to_bytes())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First four bytes in hex, for compact log fields.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// A fresh random identity. Test use only.
    #[cfg(feature = "test-helpers")]
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }
}

impl From<&VerifyingKey> for OwnerId {
    fn from(key: &VerifyingKey) -> Self {
        Self::from_verifying_key(key)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "owner:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::SigningKey;

    #[test]
    fn from_verifying_key_uses_raw_key_bytes() {
        let signing = SigningKey::from_bytes(&[7u8; 32]);
        let key = signing.verifying_key();
        let owner = OwnerId::from_verifying_key(&key);
        assert_eq!(owner.as_bytes(), key.as_bytes());
        assert_eq!(OwnerId::from(&key), owner);
    }

    #[test]
    fn distinct_keys_give_distinct_owners() {
        let a = OwnerId::from_verifying_key(&SigningKey::from_bytes(&[1u8; 32]).verifying_key());
        let b = OwnerId::from_verifying_key(&SigningKey::from_bytes(&[2u8; 32]).verifying_key());
        assert_ne!(a, b);
    }

    #[test]
    fn display_and_short() {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef, 0x01, 0x02, 0x03, 0x04]);
        let owner = OwnerId::from_bytes(bytes);
        assert_eq!(owner.to_string(), "owner:deadbeef01020304");
        assert_eq!(owner.short(), "deadbeef");
    }

    #[test]
    fn ordering_follows_bytes() {
        let low = OwnerId::from_bytes([0u8; 32]);
        let high = OwnerId::from_bytes([0xffu8; 32]);
        assert!(low < high);
    }

    #[test]
    fn serde_roundtrip() {
        let owner = OwnerId::from_bytes([9u8; 32]);
        let json = serde_json::to_string(&owner).unwrap();
        let back: OwnerId = serde_json::from_str(&json).unwrap();
        assert_eq!(owner, back);
    }
}
