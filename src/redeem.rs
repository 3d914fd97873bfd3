//! Boost unlocking-script synthesis and parsing
//!
//! The unlocking script pushes the signature, the miner's pubkey, and the
//! solution fields in the order the locking-script body consumes them. A
//! bounty redemption additionally carries the pubkey hash the miner chose;
//! a version-2 redemption carries the general-purpose bits right after the
//! nonce.

use crate::constants::{
    EXTRA_NONCE_2_SIZE_V1, MAX_EXTRA_NONCE_2_SIZE, MAX_SIGNATURE_SIZE,
};
use crate::error::{BoostError, Result};
use crate::field::{buffer_and_pad, Digest20, Int32Le, UInt32Be, UInt32Le};
use crate::job::{Job, ScriptVersion};
use crate::script::Script;
use crate::work::Solution;
use serde::{Deserialize, Serialize};

/// A parsed Boost unlocking script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redeem {
    /// DER signature with its trailing sighash-type byte
    pub signature: Vec<u8>,
    /// 33-byte compressed or 65-byte uncompressed pubkey
    pub miner_pubkey: Vec<u8>,
    pub solution: Solution,
    /// Present exactly when the spent job is bounty-form
    pub miner_pubkey_hash: Option<Digest20>,
}

impl Redeem {
    pub fn script_version(&self) -> ScriptVersion {
        if self.solution.general_purpose_bits.is_some() {
            ScriptVersion::V2
        } else {
            ScriptVersion::V1
        }
    }

    pub fn is_bounty(&self) -> bool {
        self.miner_pubkey_hash.is_some()
    }

    /// Emit the unlocking script
    pub fn script_bytes(&self) -> Vec<u8> {
        let mut script = Script::new();
        script
            .push_data(&self.signature)
            .push_data(&self.miner_pubkey)
            .push_data(&self.solution.nonce.to_bytes());
        if let Some(gpr) = self.solution.general_purpose_bits {
            script.push_data(&gpr.to_bytes());
        }
        script
            .push_data(&self.solution.time.to_bytes())
            .push_data(&self.solution.extra_nonce_2)
            .push_data(&self.solution.extra_nonce_1.to_bytes());
        if let Some(hash) = &self.miner_pubkey_hash {
            script.push_data(&hash.to_bytes());
        }
        script.to_bytes()
    }

    pub fn script_hex(&self) -> String {
        hex::encode(self.script_bytes())
    }

    /// Parse an unlocking script. The four template shapes are told apart
    /// by push count, with the width of the final push separating a
    /// version-1 bounty from a version-2 contract.
    pub fn from_script_bytes(bytes: &[u8]) -> Result<Self> {
        let script = Script::parse(bytes)?;
        let fields: Vec<Vec<u8>> = script
            .chunks()
            .iter()
            .enumerate()
            .map(|(i, chunk)| {
                chunk.payload().ok_or_else(|| {
                    BoostError::BadScript(format!("redeem element {i} is not a push"))
                })
            })
            .collect::<Result<_>>()?;

        let (with_gpr, with_hash) = match fields.len() {
            6 => (false, false),
            7 if fields[6].len() == 20 => (false, true),
            7 => (true, false),
            8 => (true, true),
            n => {
                return Err(BoostError::BadScript(format!(
                    "redeem script has {n} pushes; expected 6 to 8"
                )))
            }
        };

        let signature = fields[0].clone();
        if signature.is_empty() || signature.len() > MAX_SIGNATURE_SIZE {
            return Err(BoostError::BadLength {
                expected: MAX_SIGNATURE_SIZE,
                actual: signature.len(),
            });
        }
        let miner_pubkey = fields[1].clone();
        if miner_pubkey.len() != 33 && miner_pubkey.len() != 65 {
            return Err(BoostError::BadLength {
                expected: 33,
                actual: miner_pubkey.len(),
            });
        }

        let nonce = UInt32Le::from_bytes(&fields[2])?;
        let mut index = 3;
        let general_purpose_bits = if with_gpr {
            index += 1;
            Some(Int32Le::from_bytes(&fields[3])?)
        } else {
            None
        };
        let time = UInt32Le::from_bytes(&fields[index])?;
        let extra_nonce_2 = fields[index + 1].clone();
        if with_gpr {
            if extra_nonce_2.is_empty() || extra_nonce_2.len() > MAX_EXTRA_NONCE_2_SIZE {
                return Err(BoostError::BadLength {
                    expected: MAX_EXTRA_NONCE_2_SIZE,
                    actual: extra_nonce_2.len(),
                });
            }
        } else if extra_nonce_2.len() != EXTRA_NONCE_2_SIZE_V1 {
            return Err(BoostError::BadLength {
                expected: EXTRA_NONCE_2_SIZE_V1,
                actual: extra_nonce_2.len(),
            });
        }
        let extra_nonce_1 = UInt32Be::from_bytes(&fields[index + 2])?;
        let miner_pubkey_hash = if with_hash {
            Some(Digest20::from_bytes(&fields[index + 3])?)
        } else {
            None
        };

        Ok(Redeem {
            signature,
            miner_pubkey,
            solution: Solution {
                time,
                extra_nonce_1,
                extra_nonce_2,
                nonce,
                general_purpose_bits,
            },
            miner_pubkey_hash,
        })
    }

    pub fn from_hex(script_hex: &str) -> Result<Self> {
        Self::from_script_bytes(&hex::decode(script_hex)?)
    }

    /// Build from the external object form
    pub fn from_object(object: RedeemObject) -> Result<Self> {
        let general_purpose_bits = match &object.general_purpose_bits {
            Some(hex) => Some(Int32Le::from_bytes(&buffer_and_pad(hex, 4)?)?),
            None => None,
        };
        let miner_pubkey_hash = match &object.miner_pub_key_hash {
            Some(hex) => Some(Digest20::from_hex(hex)?),
            None => None,
        };
        Ok(Redeem {
            signature: hex::decode(&object.signature)?,
            miner_pubkey: hex::decode(&object.miner_pub_key)?,
            solution: Solution {
                time: UInt32Le::from_bytes(&buffer_and_pad(&object.time, 4)?)?,
                extra_nonce_1: UInt32Be::from_bytes(&buffer_and_pad(&object.extra_nonce_1, 4)?)?,
                extra_nonce_2: hex::decode(&object.extra_nonce_2)?,
                nonce: UInt32Le::from_bytes(&buffer_and_pad(&object.nonce, 4)?)?,
                general_purpose_bits,
            },
            miner_pubkey_hash,
        })
    }

    pub fn to_object(&self) -> RedeemObject {
        RedeemObject {
            signature: hex::encode(&self.signature),
            miner_pub_key: hex::encode(&self.miner_pubkey),
            time: self.solution.time.hex(),
            nonce: self.solution.nonce.hex(),
            extra_nonce_1: self.solution.extra_nonce_1.hex(),
            extra_nonce_2: hex::encode(&self.solution.extra_nonce_2),
            general_purpose_bits: self.solution.general_purpose_bits.map(|bits| bits.hex()),
            miner_pub_key_hash: self.miner_pubkey_hash.map(|hash| hash.hex()),
        }
    }
}

/// External JSON form of a redemption
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemObject {
    pub signature: String,
    pub miner_pub_key: String,
    pub time: String,
    pub nonce: String,
    pub extra_nonce_1: String,
    pub extra_nonce_2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_purpose_bits: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miner_pub_key_hash: Option<String>,
}

/// Worst-case unlocking-script size for a job, used to budget the fee
/// before the signature exists. One byte of push overhead per element, the
/// maximum signature width, and the fixed field widths; conservative
/// because real DER signatures are usually a byte or two shorter.
pub fn expected_redeem_size(job: &Job, extra_nonce_2_len: usize, compressed_pubkey: bool) -> u64 {
    let v2 = job.use_general_purpose_bits();
    let pushes = 6 + u64::from(v2) + u64::from(job.is_bounty());
    let pubkey = if compressed_pubkey { 33u64 } else { 65 };
    let extra_nonce_2 = if v2 {
        extra_nonce_2_len as u64
    } else {
        EXTRA_NONCE_2_SIZE_V1 as u64
    };
    pushes
        + MAX_SIGNATURE_SIZE as u64
        + pubkey
        + 4 // nonce
        + if v2 { 4 } else { 0 }
        + 4 // time
        + extra_nonce_2
        + 4 // extra nonce 1
        + if job.is_bounty() { 20 } else { 0 }
}
