//! Work puzzles and proof-of-work strings
//!
//! A puzzle fixes everything the buyer committed to; a solution supplies the
//! miner-controlled fields. Together they determine a synthetic 80-byte
//! block header whose double-SHA-256, read as a little-endian 256-bit
//! integer, must fall below the compact-encoded target.

use crate::constants::{GENERAL_PURPOSE_BITS_MASK, POW_STRING_SIZE};
use crate::difficulty::Bits;
use crate::error::{BoostError, Result};
use crate::field::{buffer_and_pad, Digest20, Digest32, Int32Le, UInt32Be, UInt32Le};
use crate::job::{Job, ScriptVersion};
use bitcoin_hashes::{sha256d, Hash, HashEngine};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// The miner-controlled half of a proof
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub time: UInt32Le,
    pub extra_nonce_1: UInt32Be,
    pub extra_nonce_2: Vec<u8>,
    pub nonce: UInt32Le,
    pub general_purpose_bits: Option<Int32Le>,
}

impl Solution {
    /// Build from the external share form
    pub fn from_object(object: SolutionObject) -> Result<Self> {
        let general_purpose_bits = match &object.share.bits {
            Some(hex) => Some(Int32Le::from_bytes(&buffer_and_pad(hex, 4)?)?),
            None => None,
        };
        Ok(Solution {
            time: UInt32Le::from_bytes(&buffer_and_pad(&object.share.timestamp, 4)?)?,
            extra_nonce_1: UInt32Be::from_bytes(&buffer_and_pad(&object.extra_nonce_1, 4)?)?,
            extra_nonce_2: hex::decode(&object.share.extra_nonce_2)?,
            nonce: UInt32Le::from_bytes(&buffer_and_pad(&object.share.nonce, 4)?)?,
            general_purpose_bits,
        })
    }

    pub fn to_object(&self) -> SolutionObject {
        SolutionObject {
            share: ShareObject {
                timestamp: self.time.hex(),
                nonce: self.nonce.hex(),
                extra_nonce_2: hex::encode(&self.extra_nonce_2),
                bits: self.general_purpose_bits.map(|bits| bits.hex()),
            },
            extra_nonce_1: self.extra_nonce_1.hex(),
        }
    }
}

/// Share fields as a miner reports them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareObject {
    pub timestamp: String,
    pub nonce: String,
    pub extra_nonce_2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bits: Option<String>,
}

/// External JSON form of a solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionObject {
    pub share: ShareObject,
    pub extra_nonce_1: String,
}

/// The buyer-committed half of a proof, reduced to the fields that enter
/// the proof-of-work string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub category: Int32Le,
    pub content: Digest32,
    pub bits: Bits,
    pub meta_begin: Vec<u8>,
    pub meta_end: Vec<u8>,
    pub mask: Option<Int32Le>,
}

impl Puzzle {
    /// Derive the work puzzle for a job. Bounty jobs need the redeeming
    /// miner's address; contract jobs carry their own and must not be given
    /// one.
    pub fn from_job(job: &Job, miner_address: Option<&Digest20>) -> Result<Self> {
        let payload = job.payload();
        let address = match (job.miner_pubkey_hash(), miner_address) {
            (Some(committed), None) => *committed,
            (None, Some(address)) => *address,
            _ => return Err(BoostError::InvalidPuzzle),
        };

        let mut meta_begin = payload.tag.clone();
        meta_begin.extend_from_slice(&address.to_bytes());
        let mut meta_end = payload.user_nonce.to_bytes().to_vec();
        meta_end.extend_from_slice(&payload.additional_data);

        Ok(Puzzle {
            category: payload.category,
            content: payload.content,
            bits: payload.bits,
            meta_begin,
            meta_end,
            mask: match payload.version {
                ScriptVersion::V1 => None,
                ScriptVersion::V2 => Some(Int32Le::from_value(GENERAL_PURPOSE_BITS_MASK)),
            },
        })
    }

    /// The metadata preimage: metaBegin, big-endian extra-nonce-1,
    /// extra-nonce-2, metaEnd
    pub fn metadata(&self, solution: &Solution) -> Vec<u8> {
        let mut out = self.meta_begin.clone();
        out.extend_from_slice(&solution.extra_nonce_1.to_bytes());
        out.extend_from_slice(&solution.extra_nonce_2);
        out.extend_from_slice(&self.meta_end);
        out
    }

    /// The version word of the header. With no mask the category passes
    /// through; under a mask the general-purpose bits replace everything
    /// the mask does not reserve.
    fn version(&self, solution: &Solution) -> Result<Int32Le> {
        match (self.mask, solution.general_purpose_bits) {
            (None, None) => Ok(self.category),
            (Some(mask), Some(gpr)) => {
                let mask = mask.value();
                Ok(Int32Le::from_value(
                    (self.category.value() & mask) | (gpr.value() & !mask),
                ))
            }
            _ => Err(BoostError::BadSolution),
        }
    }

    /// Assemble the proof-of-work string for a solution
    pub fn pow_string(&self, solution: &Solution) -> Result<PowString> {
        Ok(PowString {
            version: self.version(solution)?,
            content: self.content,
            metadata_hash: sha256d_digest(&self.metadata(solution)),
            time: solution.time,
            bits: self.bits,
            nonce: solution.nonce,
        })
    }
}

fn sha256d_digest(data: &[u8]) -> Digest32 {
    let mut engine = sha256d::Hash::engine();
    engine.input(data);
    Digest32::new(sha256d::Hash::from_engine(engine).to_byte_array())
}

/// The 80-byte block-header-shaped buffer hashed for proof of work. The
/// content sits in the previous-block slot and the metadata hash in the
/// merkle-root slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowString {
    pub version: Int32Le,
    pub content: Digest32,
    pub metadata_hash: Digest32,
    pub time: UInt32Le,
    pub bits: Bits,
    pub nonce: UInt32Le,
}

impl PowString {
    pub fn serialize(&self) -> [u8; POW_STRING_SIZE] {
        let mut out = [0u8; POW_STRING_SIZE];
        out[0..4].copy_from_slice(&self.version.to_bytes());
        out[4..36].copy_from_slice(&self.content.to_bytes());
        out[36..68].copy_from_slice(&self.metadata_hash.to_bytes());
        out[68..72].copy_from_slice(&self.time.to_bytes());
        out[72..76].copy_from_slice(&self.bits.to_le_bytes());
        out[76..80].copy_from_slice(&self.nonce.to_bytes());
        out
    }

    pub fn hex(&self) -> String {
        hex::encode(self.serialize())
    }

    /// Double SHA-256 of the 80 bytes
    pub fn hash(&self) -> Digest32 {
        sha256d_digest(&self.serialize())
    }

    /// Whether the hash, read as a little-endian integer, beats the target
    pub fn valid(&self) -> Result<bool> {
        let hash = U256::from_little_endian(&self.hash().to_bytes());
        Ok(hash < self.bits.target()?)
    }
}

/// A puzzle paired with a claimed solution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    pub puzzle: Puzzle,
    pub solution: Solution,
}

impl Proof {
    pub fn valid(&self) -> Result<bool> {
        self.puzzle.pow_string(&self.solution)?.valid()
    }

    pub fn check(&self) -> Result<()> {
        if !self.valid()? {
            return Err(BoostError::InvalidProof);
        }
        Ok(())
    }
}
