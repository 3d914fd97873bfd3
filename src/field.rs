//! Fixed-width field primitives
//!
//! Every value that crosses the wire does so as an exact-size byte string
//! with a fixed endianness. Each wrapper here owns its bytes and carries the
//! endianness in the type, so a big-endian value cannot be handed to a slot
//! expecting a little-endian one.

use crate::error::{BoostError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

fn check_width(bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(BoostError::BadLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// Decode `hex`, then truncate or right-pad with zeros to exactly `size`
/// bytes. The canonical way user-supplied short hex becomes a fixed-width
/// field.
pub fn buffer_and_pad(hex: &str, size: usize) -> Result<Vec<u8>> {
    let mut bytes = hex::decode(hex)?;
    bytes.resize(size, 0);
    Ok(bytes)
}

/// Signed 32-bit integer, little-endian on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Int32Le([u8; 4]);

impl Int32Le {
    pub fn from_value(value: i32) -> Self {
        Int32Le(value.to_le_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_width(bytes, 4)?;
        let mut buf = [0u8; 4];
        buf.copy_from_slice(bytes);
        Ok(Int32Le(buf))
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::from_bytes(&hex::decode(hex)?)
    }

    pub fn value(&self) -> i32 {
        i32::from_le_bytes(self.0)
    }

    pub fn to_bytes(&self) -> [u8; 4] {
        self.0
    }

    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Int32Le {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

/// Unsigned 32-bit integer, little-endian on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UInt32Le([u8; 4]);

impl UInt32Le {
    pub fn from_value(value: u32) -> Self {
        UInt32Le(value.to_le_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_width(bytes, 4)?;
        let mut buf = [0u8; 4];
        buf.copy_from_slice(bytes);
        Ok(UInt32Le(buf))
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::from_bytes(&hex::decode(hex)?)
    }

    pub fn value(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    pub fn to_bytes(&self) -> [u8; 4] {
        self.0
    }

    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for UInt32Le {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

/// Unsigned 32-bit integer, big-endian on the wire.
///
/// Exists solely because extra-nonce-1 enters the metadata preimage in
/// big-endian order, following the Stratum convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UInt32Be([u8; 4]);

impl UInt32Be {
    pub fn from_value(value: u32) -> Self {
        UInt32Be(value.to_be_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_width(bytes, 4)?;
        let mut buf = [0u8; 4];
        buf.copy_from_slice(bytes);
        Ok(UInt32Be(buf))
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::from_bytes(&hex::decode(hex)?)
    }

    pub fn value(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    pub fn to_bytes(&self) -> [u8; 4] {
        self.0
    }

    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for UInt32Be {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

/// Unsigned 16-bit integer, little-endian on the wire; carries the magic
/// number segment of a category word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UInt16Le([u8; 2]);

impl UInt16Le {
    pub fn from_value(value: u16) -> Self {
        UInt16Le(value.to_le_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_width(bytes, 2)?;
        let mut buf = [0u8; 2];
        buf.copy_from_slice(bytes);
        Ok(UInt16Le(buf))
    }

    pub fn value(&self) -> u16 {
        u16::from_le_bytes(self.0)
    }

    pub fn to_bytes(&self) -> [u8; 2] {
        self.0
    }

    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for UInt16Le {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

/// 20-byte digest: ripemd160(sha256(x))
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest20([u8; 20]);

impl Digest20 {
    pub fn new(bytes: [u8; 20]) -> Self {
        Digest20(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_width(bytes, 20)?;
        let mut buf = [0u8; 20];
        buf.copy_from_slice(bytes);
        Ok(Digest20(buf))
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::from_bytes(&hex::decode(hex)?)
    }

    pub fn to_bytes(&self) -> [u8; 20] {
        self.0
    }

    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Digest20 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

impl Serialize for Digest20 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

impl<'de> Deserialize<'de> for Digest20 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest20::from_hex(&s).map_err(D::Error::custom)
    }
}

/// 32-byte digest.
///
/// `hex` renders the bytes in wire order; `reversed_hex` is the user-facing
/// form following the Bitcoin display convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest32([u8; 32]);

impl Digest32 {
    pub fn new(bytes: [u8; 32]) -> Self {
        Digest32(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_width(bytes, 32)?;
        let mut buf = [0u8; 32];
        buf.copy_from_slice(bytes);
        Ok(Digest32(buf))
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::from_bytes(&hex::decode(hex)?)
    }

    /// Construct from the user-facing reversed hex form
    pub fn from_reversed_hex(hex: &str) -> Result<Self> {
        let mut bytes = hex::decode(hex)?;
        bytes.reverse();
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn reversed_hex(&self) -> String {
        let mut bytes = self.0;
        bytes.reverse();
        hex::encode(bytes)
    }
}

impl fmt::Display for Digest32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

impl Serialize for Digest32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

impl<'de> Deserialize<'de> for Digest32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest32::from_hex(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uint32_le_round_trip() {
        let field = UInt32Le::from_value(0x1234_5678);
        assert_eq!(field.to_bytes(), [0x78, 0x56, 0x34, 0x12]);
        assert_eq!(field.value(), 0x1234_5678);
        assert_eq!(UInt32Le::from_hex("78563412").unwrap(), field);
    }

    #[test]
    fn test_uint32_be_round_trip() {
        let field = UInt32Be::from_value(0x1234_5678);
        assert_eq!(field.to_bytes(), [0x12, 0x34, 0x56, 0x78]);
        assert_eq!(field.value(), 0x1234_5678);
    }

    #[test]
    fn test_endianness_reversal() {
        // The two wrappers of the same number are byte reverses of each other
        for n in [0u32, 1, 0xdead_beef, u32::MAX, 0x0a00_000a] {
            let mut le = UInt32Le::from_value(n).to_bytes();
            le.reverse();
            assert_eq!(le, UInt32Be::from_value(n).to_bytes());
        }
    }

    #[test]
    fn test_int32_le_negative() {
        let field = Int32Le::from_value(-1);
        assert_eq!(field.to_bytes(), [0xff; 4]);
        assert_eq!(field.value(), -1);
    }

    #[test]
    fn test_uint16_le() {
        let field = UInt16Le::from_value(0xd204);
        assert_eq!(field.to_bytes(), [0x04, 0xd2]);
        assert_eq!(field.value(), 0xd204);
    }

    #[test]
    fn test_bad_length_rejected() {
        assert!(matches!(
            UInt32Le::from_bytes(&[1, 2, 3]),
            Err(BoostError::BadLength {
                expected: 4,
                actual: 3
            })
        ));
        assert!(Digest20::from_bytes(&[0; 19]).is_err());
        assert!(Digest32::from_bytes(&[0; 33]).is_err());
    }

    #[test]
    fn test_digest32_reversed_hex() {
        let forward = "35b8fcb6882f93bddb928c9872198bcdf057ab93ed615ad938f24a63abde5881";
        let digest = Digest32::from_hex(forward).unwrap();
        let reversed = digest.reversed_hex();
        assert_eq!(Digest32::from_reversed_hex(&reversed).unwrap(), digest);
        assert_ne!(reversed, forward);
        assert_eq!(digest.hex(), forward);
    }

    #[test]
    fn test_buffer_and_pad_pads_right() {
        assert_eq!(buffer_and_pad("01", 4).unwrap(), vec![0x01, 0, 0, 0]);
    }

    #[test]
    fn test_buffer_and_pad_truncates() {
        assert_eq!(buffer_and_pad("0102030405", 4).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_buffer_and_pad_bad_hex() {
        assert!(buffer_and_pad("zz", 4).is_err());
    }

    #[test]
    fn test_digest20_hex_round_trip() {
        let hash = Digest20::from_hex("9fb8cb68b8850a13c7438e26e1d277b748be657a").unwrap();
        assert_eq!(hash.hex(), "9fb8cb68b8850a13c7438e26e1d277b748be657a");
    }
}
