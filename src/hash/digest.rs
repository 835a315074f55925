//! Content hash value type.

use std::fmt;
use std::hash::{Hash as StdHash, Hasher};

/// A fixed-size hash value identifying a source's content.
///
/// This is a thin wrapper around a 32-byte array (BLAKE3 hash).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// The size of the hash in bytes.
    pub const SIZE: usize = 32;

    /// Creates a content hash from a byte array.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a content hash from a slice.
    ///
    /// Returns `None` if the slice is not exactly 32 bytes.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != 32 {
            return None;
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Some(Self(bytes))
    }

    /// The hash as a byte array.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The hash as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        let mut result = String::with_capacity(64);
        for byte in &self.0 {
            result.push(HEX[(byte >> 4) as usize] as char);
            result.push(HEX[(byte & 0xf) as usize] as char);
        }
        result
    }

    /// Parses a hash from a 64-character hex string.
    ///
    /// Returns `None` on invalid hex or wrong length.
    pub fn from_hex(hex_str: &str) -> Option<Self> {
        if hex_str.len() != 64 {
            return None;
        }
        let mut bytes = [0u8; 32];
        for i in 0..32 {
            let byte_str = hex_str.get(i * 2..i * 2 + 2)?;
            bytes[i] = u8::from_str_radix(byte_str, 16).ok()?;
        }
        Some(Self(bytes))
    }
}

impl AsRef<[u8]> for ContentHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl StdHash for ContentHash {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(&self.0);
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let bytes = [0u8; 32];
        let hash = ContentHash::new(bytes);
        assert_eq!(hash.as_bytes(), &bytes);
    }

    #[test]
    fn test_from_slice() {
        let bytes = vec![0u8; 32];
        let hash = ContentHash::from_slice(&bytes).unwrap();
        assert_eq!(hash.as_bytes().as_ref(), bytes.as_slice());

        // Wrong size
        assert!(ContentHash::from_slice(&[0u8; 31]).is_none());
        assert!(ContentHash::from_slice(&[0u8; 33]).is_none());
    }

    #[test]
    fn test_hex_round_trip() {
        let bytes = [0xABu8; 32];
        let hash = ContentHash::new(bytes);
        let hex = hash.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(ContentHash::from_hex(&hex), Some(hash));
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(ContentHash::from_hex("zz").is_none());
        assert!(ContentHash::from_hex(&"g".repeat(64)).is_none());
    }

    #[test]
    fn test_display() {
        let bytes = [0x01u8, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF];
        let mut full_bytes = [0u8; 32];
        full_bytes[..8].copy_from_slice(&bytes);
        let hash = ContentHash::new(full_bytes);
        let s = hash.to_string();
        assert!(s.starts_with("0123456789abcdef"));
    }
}
