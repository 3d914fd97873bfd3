//! Keys and addresses
//!
//! Only what redeeming a Boost output needs: hash160, a private key that is
//! erased when dropped, WIF and raw-hex key decoding, and mainnet
//! pay-to-pubkey-hash addresses.

use crate::constants::{ADDRESS_VERSION, WIF_VERSION};
use crate::error::{BoostError, Result};
use crate::field::Digest20;
use crate::script::{opcodes::*, Script};
use ripemd::Ripemd160;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// ripemd160(sha256(x))
pub fn hash160(data: &[u8]) -> Digest20 {
    let sha = Sha256::digest(data);
    Digest20::new(Ripemd160::digest(sha).into())
}

/// A secp256k1 private key. The secret bytes are overwritten when the value
/// is dropped.
pub struct PrivateKey {
    secret: SecretKey,
    pub compressed: bool,
}

impl PrivateKey {
    pub fn from_slice(bytes: &[u8], compressed: bool) -> Result<Self> {
        Ok(PrivateKey {
            secret: SecretKey::from_slice(bytes)?,
            compressed,
        })
    }

    /// Raw 32-byte key as hex; the key is treated as compressed
    pub fn from_hex(key_hex: &str) -> Result<Self> {
        Self::from_slice(&hex::decode(key_hex)?, true)
    }

    pub fn from_wif(wif: &str) -> Result<Self> {
        let payload = bs58::decode(wif)
            .with_check(Some(WIF_VERSION))
            .into_vec()
            .map_err(|err| BoostError::SignatureFailure(format!("invalid WIF: {err}")))?;
        match payload.len() {
            33 => Self::from_slice(&payload[1..], false),
            34 if payload[33] == 0x01 => Self::from_slice(&payload[1..33], true),
            _ => Err(BoostError::SignatureFailure(
                "invalid WIF payload".to_string(),
            )),
        }
    }

    pub fn to_wif(&self) -> String {
        let mut payload = vec![WIF_VERSION];
        payload.extend_from_slice(&self.secret.secret_bytes());
        if self.compressed {
            payload.push(0x01);
        }
        bs58::encode(payload).with_check().into_string()
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    /// Serialized pubkey: 33 bytes compressed or 65 uncompressed
    pub fn public_key(&self) -> Vec<u8> {
        let secp = Secp256k1::new();
        let pubkey = PublicKey::from_secret_key(&secp, &self.secret);
        if self.compressed {
            pubkey.serialize().to_vec()
        } else {
            pubkey.serialize_uncompressed().to_vec()
        }
    }

    pub fn pubkey_hash(&self) -> Digest20 {
        hash160(&self.public_key())
    }

    pub fn address(&self) -> Address {
        Address::new(self.pubkey_hash())
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.secret.non_secure_erase();
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("compressed", &self.compressed)
            .finish_non_exhaustive()
    }
}

/// A mainnet pay-to-pubkey-hash address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    hash: Digest20,
}

impl Address {
    pub fn new(hash: Digest20) -> Self {
        Address { hash }
    }

    pub fn pubkey_hash(&self) -> Digest20 {
        self.hash
    }

    /// OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG
    pub fn p2pkh_script(&self) -> Vec<u8> {
        let mut script = Script::new();
        script
            .push_op(OP_DUP)
            .push_op(OP_HASH160)
            .push_data(&self.hash.to_bytes())
            .push_op(OP_EQUALVERIFY)
            .push_op(OP_CHECKSIG);
        script.to_bytes()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut payload = vec![ADDRESS_VERSION];
        payload.extend_from_slice(&self.hash.to_bytes());
        write!(f, "{}", bs58::encode(payload).with_check().into_string())
    }
}

impl FromStr for Address {
    type Err = BoostError;

    fn from_str(s: &str) -> Result<Self> {
        let payload = bs58::decode(s)
            .with_check(Some(ADDRESS_VERSION))
            .into_vec()
            .map_err(|err| BoostError::BadScript(format!("invalid address: {err}")))?;
        if payload.len() != 21 {
            return Err(BoostError::BadLength {
                expected: 21,
                actual: payload.len(),
            });
        }
        Ok(Address::new(Digest20::from_bytes(&payload[1..])?))
    }
}
