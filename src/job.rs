//! Boost locking-script synthesis and parsing
//!
//! A Boost output script is a fixed prefix of pushes — the marker, an
//! optional miner commitment, category, content, target, tag, user nonce and
//! additional data — followed by one of two verbatim body-opcode sequences.
//! The bodies are consensus critical: emission concatenates the prefix with
//! the constant bytes, and parsing requires the tail to match one of them
//! exactly.

use crate::constants::{BOOST_MARKER, GENERAL_PURPOSE_BITS_MASK, MAX_TAG_SIZE};
use crate::difficulty::Bits;
use crate::error::{BoostError, Result};
use crate::field::{buffer_and_pad, Digest20, Digest32, Int32Le, UInt16Le, UInt32Le};
use crate::script::{opcodes::*, Script, ScriptReader};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Version-1 script body. Assembles the metadata string, hashes it into the
/// proof-of-work string, expands the compact target, and binds the spending
/// signature to the miner's pubkey hash.
pub const BODY_V1: [u8; 113] = [
    0x7e, 0x7c, // CAT SWAP
    0x55, 0x7a, 0x76, 0x6b, 0x7e, // 5 ROLL DUP TOALTSTACK CAT
    0x52, 0x79, 0x6b, // 2 PICK TOALTSTACK
    0x55, 0x7a, 0x82, 0x54, 0x88, 0x7e, // 5 ROLL SIZE 4 EQUALVERIFY CAT
    0x55, 0x7a, 0x82, 0x58, 0x88, 0x7e, // 5 ROLL SIZE 8 EQUALVERIFY CAT
    0x7c, 0x7e, 0xaa, // SWAP CAT HASH256
    0x7c, 0x6b, 0x7e, 0x7e, // SWAP TOALTSTACK CAT CAT
    0x7c, 0x82, 0x54, 0x88, 0x7e, // SWAP SIZE 4 EQUALVERIFY CAT
    0x6c, 0x7e, // FROMALTSTACK CAT
    0x7c, 0x82, 0x54, 0x88, 0x7e, // SWAP SIZE 4 EQUALVERIFY CAT
    0xaa, // HASH256
    0x01, 0x00, 0x7e, 0x81, // PUSH 00 CAT BIN2NUM
    0x6c, // FROMALTSTACK
    0x82, 0x54, 0x88, // SIZE 4 EQUALVERIFY
    0x53, 0x7f, // 3 SPLIT
    0x76, 0x81, // DUP BIN2NUM
    0x53, 0x01, 0x21, 0xa5, 0x69, // 3 PUSH 21 WITHIN VERIFY
    0x6b, // TOALTSTACK
    0x76, 0x81, 0x00, 0xa0, 0x69, // DUP BIN2NUM 0 GREATERTHAN VERIFY
    0x1d, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, // PUSH 29 zero bytes
    0x7e, // CAT
    0x6c, 0x53, 0x94, 0x58, 0x95, 0x99, // FROMALTSTACK 3 SUB 8 MUL RSHIFT
    0x01, 0x00, 0x7e, 0x81, // PUSH 00 CAT BIN2NUM
    0x9f, 0x69, // LESSTHAN VERIFY
    0x76, 0xa9, 0x6c, 0x88, 0xac, // DUP HASH160 FROMALTSTACK EQUALVERIFY CHECKSIG
];

/// Version-2 script body. Differs from version 1 in two places: the
/// extra-nonce-2 size check relaxes to at most 32 bytes, and the version
/// word of the proof-of-work string is rebuilt from the category and the
/// miner's general-purpose bits under the `ff1f00e0` mask.
pub const BODY_V2: [u8; 134] = [
    0x7e, 0x7c, // CAT SWAP
    0x55, 0x7a, 0x76, 0x6b, 0x7e, // 5 ROLL DUP TOALTSTACK CAT
    0x52, 0x79, 0x6b, // 2 PICK TOALTSTACK
    0x55, 0x7a, 0x82, 0x54, 0x88, 0x7e, // 5 ROLL SIZE 4 EQUALVERIFY CAT
    0x55, 0x7a, 0x82, 0x01, 0x20, 0xa1, 0x69, 0x7e, // 5 ROLL SIZE 32 LESSTHANOREQUAL VERIFY CAT
    0x7c, 0x7e, 0xaa, // SWAP CAT HASH256
    0x7c, 0x6b, // SWAP TOALTSTACK
    0x54, 0x7a, // 4 ROLL
    0x53, 0x7a, // 3 ROLL
    0x04, 0xff, 0x1f, 0x00, 0xe0, // PUSH ff1f00e0
    0x76, 0x83, 0x6b, // DUP INVERT TOALTSTACK
    0x84, 0x7c, 0x6c, 0x84, 0x85, // AND SWAP FROMALTSTACK AND OR
    0x7b, 0x7e, 0x7c, 0x7e, // ROT CAT SWAP CAT
    0x7c, 0x82, 0x54, 0x88, 0x7e, // SWAP SIZE 4 EQUALVERIFY CAT
    0x6c, 0x7e, // FROMALTSTACK CAT
    0x7c, 0x82, 0x54, 0x88, 0x7e, // SWAP SIZE 4 EQUALVERIFY CAT
    0xaa, // HASH256
    0x01, 0x00, 0x7e, 0x81, // PUSH 00 CAT BIN2NUM
    0x6c, // FROMALTSTACK
    0x82, 0x54, 0x88, // SIZE 4 EQUALVERIFY
    0x53, 0x7f, // 3 SPLIT
    0x76, 0x81, // DUP BIN2NUM
    0x53, 0x01, 0x21, 0xa5, 0x69, // 3 PUSH 21 WITHIN VERIFY
    0x6b, // TOALTSTACK
    0x76, 0x81, 0x00, 0xa0, 0x69, // DUP BIN2NUM 0 GREATERTHAN VERIFY
    0x1d, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, // PUSH 29 zero bytes
    0x7e, // CAT
    0x6c, 0x53, 0x94, 0x58, 0x95, 0x99, // FROMALTSTACK 3 SUB 8 MUL RSHIFT
    0x01, 0x00, 0x7e, 0x81, // PUSH 00 CAT BIN2NUM
    0x9f, 0x69, // LESSTHAN VERIFY
    0x76, 0xa9, 0x6c, 0x88, 0xac, // DUP HASH160 FROMALTSTACK EQUALVERIFY CHECKSIG
];

/// Which script body a job carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptVersion {
    V1,
    V2,
}

/// Fields common to both job forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPayload {
    pub category: Int32Le,
    pub content: Digest32,
    pub bits: Bits,
    pub tag: Vec<u8>,
    pub user_nonce: UInt32Le,
    pub additional_data: Vec<u8>,
    pub version: ScriptVersion,
}

/// A Boost job as committed by a locking script.
///
/// A bounty pays whichever miner solves it; a contract commits to one
/// miner's pubkey hash up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    Bounty(JobPayload),
    Contract(JobPayload, Digest20),
}

impl Job {
    pub fn bounty(payload: JobPayload) -> Result<Self> {
        check_payload(&payload)?;
        Ok(Job::Bounty(payload))
    }

    pub fn contract(payload: JobPayload, miner_pubkey_hash: Digest20) -> Result<Self> {
        check_payload(&payload)?;
        Ok(Job::Contract(payload, miner_pubkey_hash))
    }

    pub fn payload(&self) -> &JobPayload {
        match self {
            Job::Bounty(payload) => payload,
            Job::Contract(payload, _) => payload,
        }
    }

    pub fn is_contract(&self) -> bool {
        matches!(self, Job::Contract(_, _))
    }

    pub fn is_bounty(&self) -> bool {
        !self.is_contract()
    }

    pub fn miner_pubkey_hash(&self) -> Option<&Digest20> {
        match self {
            Job::Bounty(_) => None,
            Job::Contract(_, hash) => Some(hash),
        }
    }

    pub fn script_version(&self) -> ScriptVersion {
        self.payload().version
    }

    pub fn use_general_purpose_bits(&self) -> bool {
        self.payload().version == ScriptVersion::V2
    }

    pub fn category(&self) -> Int32Le {
        self.payload().category
    }

    pub fn content(&self) -> Digest32 {
        self.payload().content
    }

    pub fn bits(&self) -> Bits {
        self.payload().bits
    }

    pub fn difficulty(&self) -> Result<f64> {
        self.payload().bits.difficulty()
    }

    /// The 16 category bits a buyer controls regardless of version rolling:
    /// in version 1 the low half of the word, in version 2 the bits the
    /// general-purpose mask reserves, folded together.
    pub fn magic_number(&self) -> UInt16Le {
        let category = self.category().value() as u32;
        let magic = match self.script_version() {
            ScriptVersion::V1 => category & 0xffff,
            ScriptVersion::V2 => {
                let mask = GENERAL_PURPOSE_BITS_MASK as u32;
                ((category & mask & 0xffff_0000) >> 16) | (category & mask & 0xffff)
            }
        };
        UInt16Le::from_value(magic as u16)
    }

    /// Emit the locking script
    pub fn script_bytes(&self) -> Vec<u8> {
        let payload = self.payload();
        let mut prefix = Script::new();
        prefix.push_data(BOOST_MARKER).push_op(OP_DROP);
        if let Job::Contract(_, hash) = self {
            prefix.push_data(&hash.to_bytes());
        }
        prefix
            .push_data(&payload.category.to_bytes())
            .push_data(&payload.content.to_bytes())
            .push_data(&payload.bits.to_le_bytes())
            .push_data(&payload.tag)
            .push_data(&payload.user_nonce.to_bytes())
            .push_data(&payload.additional_data);
        let mut out = prefix.to_bytes();
        out.extend_from_slice(match payload.version {
            ScriptVersion::V1 => &BODY_V1[..],
            ScriptVersion::V2 => &BODY_V2[..],
        });
        out
    }

    pub fn script_hex(&self) -> String {
        hex::encode(self.script_bytes())
    }

    /// Stable job identifier: sha256 of the locking script
    pub fn script_hash(&self) -> Digest32 {
        Digest32::new(Sha256::digest(self.script_bytes()).into())
    }

    /// Parse a locking script
    pub fn from_script_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = ScriptReader::new(bytes);

        let marker = read_push(&mut reader, "marker")?;
        if marker != BOOST_MARKER {
            return Err(BoostError::BadScript(
                "script does not start with the boostpow marker".to_string(),
            ));
        }
        let drop = reader.next_chunk()?;
        if drop.opcode != OP_DROP || drop.data.is_some() {
            return Err(BoostError::BadScript(
                "expected OP_DROP after the boostpow marker".to_string(),
            ));
        }

        // A four-byte third chunk is a bounty's category; a twenty-byte one
        // is a contract's miner commitment.
        let probe = read_push(&mut reader, "category or miner pubkey hash")?;
        let (miner_pubkey_hash, category) = match probe.len() {
            4 => (None, Int32Le::from_bytes(&probe)?),
            20 => {
                let hash = Digest20::from_bytes(&probe)?;
                let category = read_push_exact(&mut reader, "category", 4)?;
                (Some(hash), Int32Le::from_bytes(&category)?)
            }
            n => {
                return Err(BoostError::BadScript(format!(
                    "third push is {n} bytes; expected 4 (bounty) or 20 (contract)"
                )))
            }
        };

        let content = Digest32::from_bytes(&read_push_exact(&mut reader, "content", 32)?)?;
        let bits_bytes = read_push_exact(&mut reader, "target", 4)?;
        let bits = Bits::from_le_bytes([bits_bytes[0], bits_bytes[1], bits_bytes[2], bits_bytes[3]]);
        bits.target()?;

        let tag = read_push(&mut reader, "tag")?;
        if tag.len() > MAX_TAG_SIZE {
            return Err(BoostError::BadLength {
                expected: MAX_TAG_SIZE,
                actual: tag.len(),
            });
        }
        let user_nonce = UInt32Le::from_bytes(&read_push_exact(&mut reader, "user nonce", 4)?)?;
        let additional_data = read_push(&mut reader, "additional data")?;

        let tail = reader.remaining();
        let version = if tail == &BODY_V1[..] {
            ScriptVersion::V1
        } else if tail == &BODY_V2[..] {
            ScriptVersion::V2
        } else {
            return Err(BoostError::BadScript(format!(
                "unrecognized script body at offset {}",
                reader.position()
            )));
        };

        let payload = JobPayload {
            category,
            content,
            bits,
            tag,
            user_nonce,
            additional_data,
            version,
        };
        match miner_pubkey_hash {
            None => Job::bounty(payload),
            Some(hash) => Job::contract(payload, hash),
        }
    }

    pub fn from_hex(script_hex: &str) -> Result<Self> {
        Self::from_script_bytes(&hex::decode(script_hex)?)
    }

    /// Build a job from the external object form, filling defaults: zero
    /// category, empty tag and data, a random user nonce, version 1.
    pub fn from_object(object: JobObject) -> Result<Self> {
        let mut content = buffer_and_pad(&object.content, 32)?;
        content.reverse();
        let content = Digest32::from_bytes(&content)?;

        let category = match &object.category {
            Some(hex) => Int32Le::from_bytes(&buffer_and_pad(hex, 4)?)?,
            None => Int32Le::from_value(0),
        };
        let tag = match &object.tag {
            Some(hex) => hex::decode(hex)?,
            None => Vec::new(),
        };
        if tag.len() > MAX_TAG_SIZE {
            return Err(BoostError::BadLength {
                expected: MAX_TAG_SIZE,
                actual: tag.len(),
            });
        }
        let additional_data = match &object.additional_data {
            Some(hex) => hex::decode(hex)?,
            None => Vec::new(),
        };
        let user_nonce = match &object.user_nonce {
            Some(hex) => UInt32Le::from_bytes(&buffer_and_pad(hex, 4)?)?,
            None => {
                let mut nonce = [0u8; 4];
                rand::rng().fill_bytes(&mut nonce);
                UInt32Le::from_bytes(&nonce)?
            }
        };
        let version = if object.use_general_purpose_bits.unwrap_or(false) {
            ScriptVersion::V2
        } else {
            ScriptVersion::V1
        };

        let payload = JobPayload {
            category,
            content,
            bits: Bits::from_difficulty(object.diff)?,
            tag,
            user_nonce,
            additional_data,
            version,
        };
        match &object.miner_pub_key_hash {
            Some(hex) => Job::contract(payload, Digest20::from_hex(hex)?),
            None => Job::bounty(payload),
        }
    }

    pub fn to_object(&self) -> Result<JobObject> {
        let payload = self.payload();
        Ok(JobObject {
            content: payload.content.reversed_hex(),
            diff: payload.bits.difficulty()?,
            category: Some(payload.category.hex()),
            tag: Some(hex::encode(&payload.tag)),
            additional_data: Some(hex::encode(&payload.additional_data)),
            user_nonce: Some(payload.user_nonce.hex()),
            miner_pub_key_hash: self.miner_pubkey_hash().map(|hash| hash.hex()),
            use_general_purpose_bits: Some(self.use_general_purpose_bits()),
        })
    }
}

fn check_payload(payload: &JobPayload) -> Result<()> {
    if payload.tag.len() > MAX_TAG_SIZE {
        return Err(BoostError::BadLength {
            expected: MAX_TAG_SIZE,
            actual: payload.tag.len(),
        });
    }
    payload.bits.target()?;
    Ok(())
}

fn read_push(reader: &mut ScriptReader, what: &str) -> Result<Vec<u8>> {
    let at = reader.position();
    let chunk = reader.next_chunk()?;
    chunk
        .payload()
        .ok_or_else(|| BoostError::BadScript(format!("expected {what} push at offset {at}")))
}

fn read_push_exact(reader: &mut ScriptReader, what: &str, len: usize) -> Result<Vec<u8>> {
    let data = read_push(reader, what)?;
    if data.len() != len {
        return Err(BoostError::BadLength {
            expected: len,
            actual: data.len(),
        });
    }
    Ok(data)
}

/// External JSON form of a job
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobObject {
    /// Content digest in user-facing reversed hex
    pub content: String,
    pub diff: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_nonce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miner_pub_key_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_general_purpose_bits: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_payload(version: ScriptVersion) -> JobPayload {
        JobPayload {
            category: Int32Le::from_value(0),
            content: Digest32::from_hex(
                "35b8fcb6882f93bddb928c9872198bcdf057ab93ed615ad938f24a63abde5881",
            )
            .unwrap(),
            bits: Bits::new(0x1d00ffff),
            tag: vec![0u8; 20],
            user_nonce: UInt32Le::from_value(0),
            additional_data: vec![0u8; 32],
            version,
        }
    }

    #[test]
    fn test_bounty_v1_script_prefix() {
        let job = Job::bounty(test_payload(ScriptVersion::V1)).unwrap();
        let script = job.script_bytes();
        let expected_prefix = [
            "08626f6f7374706f7775",
            "0400000000",
            "2035b8fcb6882f93bddb928c9872198bcdf057ab93ed615ad938f24a63abde5881",
            "04ffff001d",
            "140000000000000000000000000000000000000000",
            "0400000000",
            "200000000000000000000000000000000000000000000000000000000000000000",
        ]
        .concat();
        assert!(job.script_hex().starts_with(&expected_prefix));
        assert_eq!(&script[script.len() - BODY_V1.len()..], &BODY_V1[..]);
    }

    #[test]
    fn test_contract_inserts_miner_hash() {
        let hash = Digest20::from_hex("9fb8cb68b8850a13c7438e26e1d277b748be657a").unwrap();
        let job = Job::contract(test_payload(ScriptVersion::V1), hash).unwrap();
        let script_hex = job.script_hex();
        assert!(script_hex
            .starts_with("08626f6f7374706f7775149fb8cb68b8850a13c7438e26e1d277b748be657a"));
    }

    #[test]
    fn test_round_trip_bounty_v1() {
        let job = Job::bounty(test_payload(ScriptVersion::V1)).unwrap();
        let parsed = Job::from_script_bytes(&job.script_bytes()).unwrap();
        assert_eq!(parsed, job);
        assert!(parsed.is_bounty());
        assert_eq!(parsed.script_version(), ScriptVersion::V1);
    }

    #[test]
    fn test_round_trip_contract_v2() {
        let hash = Digest20::from_hex("9fb8cb68b8850a13c7438e26e1d277b748be657a").unwrap();
        let job = Job::contract(test_payload(ScriptVersion::V2), hash).unwrap();
        let parsed = Job::from_script_bytes(&job.script_bytes()).unwrap();
        assert_eq!(parsed, job);
        assert!(parsed.is_contract());
        assert!(parsed.use_general_purpose_bits());
    }

    #[test]
    fn test_round_trip_short_tag_uses_small_int() {
        let mut payload = test_payload(ScriptVersion::V1);
        payload.tag = vec![0x07];
        let job = Job::bounty(payload).unwrap();
        // minimal encoding pushes the one-byte tag as OP_7
        let script = job.script_bytes();
        assert_eq!(Job::from_script_bytes(&script).unwrap(), job);
    }

    #[test]
    fn test_round_trip_empty_tag_and_data() {
        let mut payload = test_payload(ScriptVersion::V1);
        payload.tag = vec![];
        payload.additional_data = vec![];
        let job = Job::bounty(payload).unwrap();
        assert_eq!(Job::from_script_bytes(&job.script_bytes()).unwrap(), job);
    }

    #[test]
    fn test_rejects_wrong_marker() {
        let job = Job::bounty(test_payload(ScriptVersion::V1)).unwrap();
        let mut script = job.script_bytes();
        script[1] = b'x';
        assert!(matches!(
            Job::from_script_bytes(&script),
            Err(BoostError::BadScript(_))
        ));
    }

    #[test]
    fn test_rejects_mangled_body() {
        let job = Job::bounty(test_payload(ScriptVersion::V1)).unwrap();
        let mut script = job.script_bytes();
        let last = script.len() - 1;
        script[last] = 0xab;
        assert!(Job::from_script_bytes(&script).is_err());
    }

    #[test]
    fn test_rejects_truncated_body() {
        let job = Job::bounty(test_payload(ScriptVersion::V1)).unwrap();
        let script = job.script_bytes();
        assert!(Job::from_script_bytes(&script[..script.len() - 1]).is_err());
    }

    #[test]
    fn test_rejects_oversized_tag() {
        let mut payload = test_payload(ScriptVersion::V1);
        payload.tag = vec![0u8; 21];
        assert!(matches!(
            Job::bounty(payload),
            Err(BoostError::BadLength {
                expected: 20,
                actual: 21
            })
        ));
    }

    #[test]
    fn test_rejects_invalid_target() {
        let mut payload = test_payload(ScriptVersion::V1);
        payload.bits = Bits::new(0x1d800000);
        assert!(matches!(
            Job::bounty(payload),
            Err(BoostError::BadTarget)
        ));
    }

    #[test]
    fn test_magic_number_v1() {
        let mut payload = test_payload(ScriptVersion::V1);
        payload.category = Int32Le::from_value(0x0001_d2b4);
        let job = Job::bounty(payload).unwrap();
        assert_eq!(job.magic_number().value(), 0xd2b4);
    }

    #[test]
    fn test_magic_number_v2_folds_masked_bits() {
        let mut payload = test_payload(ScriptVersion::V2);
        payload.category = Int32Le::from_value(0x1234_5678);
        let job = Job::bounty(payload).unwrap();
        // 0x12345678 & e0001fff keeps only 0x1678; no high mask bits are set
        assert_eq!(job.magic_number().value(), 0x1678);

        let mut payload = test_payload(ScriptVersion::V2);
        // every maskable bit set: the top 3 fold onto the low 13
        payload.category = Int32Le::from_value(0xffff_ffffu32 as i32);
        let job = Job::bounty(payload).unwrap();
        assert_eq!(job.magic_number().value(), 0xffff);
    }

    #[test]
    fn test_script_hash_is_stable() {
        let job = Job::bounty(test_payload(ScriptVersion::V1)).unwrap();
        assert_eq!(job.script_hash(), job.script_hash());
        let other = Job::bounty(test_payload(ScriptVersion::V2)).unwrap();
        assert_ne!(job.script_hash(), other.script_hash());
    }

    #[test]
    fn test_from_object_defaults() {
        let job = Job::from_object(JobObject {
            content: "00".to_string(),
            diff: 1.0,
            category: None,
            tag: None,
            additional_data: None,
            user_nonce: Some("01020304".to_string()),
            miner_pub_key_hash: None,
            use_general_purpose_bits: None,
        })
        .unwrap();
        assert!(job.is_bounty());
        assert_eq!(job.category().value(), 0);
        assert_eq!(job.bits().value(), 0x1d00ffff);
        assert!(job.payload().tag.is_empty());
        assert_eq!(job.script_version(), ScriptVersion::V1);
    }

    #[test]
    fn test_object_round_trip() {
        let hash = Digest20::from_hex("9fb8cb68b8850a13c7438e26e1d277b748be657a").unwrap();
        let job = Job::contract(test_payload(ScriptVersion::V2), hash).unwrap();
        let object = job.to_object().unwrap();
        assert_eq!(Job::from_object(object).unwrap(), job);
    }

    #[test]
    fn test_object_json_keys_are_camel_case() {
        let job = Job::bounty(test_payload(ScriptVersion::V2)).unwrap();
        let json = serde_json::to_string(&job.to_object().unwrap()).unwrap();
        assert!(json.contains("\"additionalData\""));
        assert!(json.contains("\"userNonce\""));
        assert!(json.contains("\"useGeneralPurposeBits\""));
    }
}
