//! Store-native primary keys.
//!
//! # Design
//! A `DocumentKey` is 12 bytes: a 4-byte big-endian Unix timestamp in
//! seconds, 5 bytes of per-process randomness, and a 3-byte big-endian
//! counter. Only stores mint keys; everything above the store sees them as
//! opaque and reaches the wire form through `mapper::encode_id`.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

pub const KEY_LEN: usize = 12;

const COUNTER_MASK: u32 = 0x00ff_ffff;

/// Primary key of a persisted todo document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentKey([u8; KEY_LEN]);

impl DocumentKey {
    /// Mint a fresh key. Two calls in the same process never return the same
    /// key until the 24-bit counter wraps within a single second.
    pub fn generate() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as u32;
        let count = next_count();

        let mut bytes = [0u8; KEY_LEN];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(process_unique());
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    pub const fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for DocumentKey {
    type Error = usize;

    /// Fails with the actual length when `bytes` is not exactly `KEY_LEN` long.
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; KEY_LEN]>::try_from(bytes)
            .map(Self)
            .map_err(|_| bytes.len())
    }
}

fn process_unique() -> &'static [u8; 5] {
    static UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
    UNIQUE.get_or_init(|| {
        let seed = Uuid::new_v4();
        let mut out = [0u8; 5];
        out.copy_from_slice(&seed.as_bytes()[..5]);
        out
    })
}

fn next_count() -> u32 {
    static COUNTER: OnceLock<AtomicU32> = OnceLock::new();
    let counter = COUNTER.get_or_init(|| {
        let seed = Uuid::new_v4();
        let b = seed.as_bytes();
        AtomicU32::new(u32::from_be_bytes([0, b[0], b[1], b[2]]))
    });
    counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_keys_are_unique() {
        let keys: HashSet<DocumentKey> = (0..10_000).map(|_| DocumentKey::generate()).collect();
        assert_eq!(keys.len(), 10_000);
    }

    #[test]
    fn generated_keys_share_process_bytes() {
        let a = DocumentKey::generate();
        let b = DocumentKey::generate();
        assert_eq!(a.as_bytes()[4..9], b.as_bytes()[4..9]);
    }

    #[test]
    fn try_from_rejects_wrong_length() {
        assert_eq!(DocumentKey::try_from(&[1u8, 2, 3][..]), Err(3));
        assert!(DocumentKey::try_from(&[0u8; KEY_LEN][..]).is_ok());
    }
}
