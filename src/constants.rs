//! Protocol constants for Boost outputs and their redemption

/// Marker pushed at the front of every Boost locking script
pub const BOOST_MARKER: &[u8] = b"boostpow";

/// Mask selecting the category bits that survive ASICBoost version rolling.
/// Little-endian wire bytes: ff 1f 00 e0.
pub const GENERAL_PURPOSE_BITS_MASK: i32 = 0xe000_1fffu32 as i32;

/// Difficulty-1 target ("pdiff 1"), big-endian
pub const PDIFF_ONE: [u8; 32] = [
    0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Smallest legal compact-bits exponent
pub const MIN_COMPACT_EXPONENT: u32 = 1;

/// Largest legal compact-bits exponent
pub const MAX_COMPACT_EXPONENT: u32 = 33;

/// Maximum tag length in a locking script
pub const MAX_TAG_SIZE: usize = 20;

/// Extra-nonce-2 width fixed by the version-1 script body
pub const EXTRA_NONCE_2_SIZE_V1: usize = 8;

/// Extra-nonce-2 ceiling allowed by the version-2 script body
pub const MAX_EXTRA_NONCE_2_SIZE: usize = 32;

/// Upper bound on a DER signature plus its sighash-type byte
pub const MAX_SIGNATURE_SIZE: usize = 73;

/// Byte length of the proof-of-work string
pub const POW_STRING_SIZE: usize = 80;

/// Sighash base type committing to all inputs and outputs
pub const SIGHASH_ALL: u32 = 0x01;

/// Sighash flag selecting the BIP-143 algorithm on the SV chain
pub const SIGHASH_FORKID: u32 = 0x40;

/// Sequence number for final transaction
pub const SEQUENCE_FINAL: u32 = 0xffffffff;

/// Version byte of a mainnet pay-to-pubkey-hash address
pub const ADDRESS_VERSION: u8 = 0x00;

/// Version byte of a mainnet WIF-encoded private key
pub const WIF_VERSION: u8 = 0x80;
