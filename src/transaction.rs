//! Transaction serialization
//!
//! Plain pre-segwit wire format: version, var-int counted inputs and
//! outputs, lock time. Satoshi amounts are 64-bit integers throughout. An
//! incomplete transaction stands in for a real one before signing, carrying
//! a declared script size on each input so fees can be budgeted ahead of
//! the signature.

use crate::error::{BoostError, Result};
use crate::field::Digest32;
use bitcoin_hashes::{sha256d, Hash, HashEngine};
use serde::{Deserialize, Serialize};

/// Append a Bitcoin var-int
pub fn write_var_int(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x10000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// Encoded width of a var-int
pub fn var_int_size(n: u64) -> u64 {
    match n {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x10000..=0xffff_ffff => 5,
        _ => 9,
    }
}

/// Reference to a previous transaction output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outpoint {
    pub txid: Digest32,
    pub vout: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub prevout: Outpoint,
    pub script: Vec<u8>,
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: u64,
    pub script: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.version.to_le_bytes());
        write_var_int(&mut out, self.inputs.len() as u64);
        for input in &self.inputs {
            out.extend_from_slice(&input.prevout.txid.to_bytes());
            out.extend_from_slice(&input.prevout.vout.to_le_bytes());
            write_var_int(&mut out, input.script.len() as u64);
            out.extend_from_slice(&input.script);
            out.extend_from_slice(&input.sequence.to_le_bytes());
        }
        write_var_int(&mut out, self.outputs.len() as u64);
        for output in &self.outputs {
            out.extend_from_slice(&output.value.to_le_bytes());
            write_var_int(&mut out, output.script.len() as u64);
            out.extend_from_slice(&output.script);
        }
        out.extend_from_slice(&self.lock_time.to_le_bytes());
        out
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = TxReader::new(bytes);
        let version = reader.read_u32()? as i32;
        let input_count = reader.read_var_int()?;
        let mut inputs = Vec::new();
        for _ in 0..input_count {
            let txid = Digest32::from_bytes(reader.read_bytes(32)?)?;
            let vout = reader.read_u32()?;
            let script_len = reader.read_var_int()? as usize;
            let script = reader.read_bytes(script_len)?.to_vec();
            let sequence = reader.read_u32()?;
            inputs.push(TransactionInput {
                prevout: Outpoint { txid, vout },
                script,
                sequence,
            });
        }
        let output_count = reader.read_var_int()?;
        let mut outputs = Vec::new();
        for _ in 0..output_count {
            let value = reader.read_u64()?;
            let script_len = reader.read_var_int()? as usize;
            let script = reader.read_bytes(script_len)?.to_vec();
            outputs.push(TransactionOutput { value, script });
        }
        let lock_time = reader.read_u32()?;
        if !reader.done() {
            return Err(BoostError::BadScript(format!(
                "{} trailing bytes after transaction at offset {}",
                bytes.len() - reader.pos,
                reader.pos
            )));
        }
        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    pub fn from_hex(tx_hex: &str) -> Result<Self> {
        Self::parse(&hex::decode(tx_hex)?)
    }

    /// Double SHA-256 of the serialization, in wire order. Display form is
    /// the reversed hex.
    pub fn txid(&self) -> Digest32 {
        let mut engine = sha256d::Hash::engine();
        engine.input(&self.serialize());
        Digest32::new(sha256d::Hash::from_engine(engine).to_byte_array())
    }
}

/// An input whose unlocking script is not yet known, only budgeted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompleteInput {
    pub prevout: Outpoint,
    pub script_size: u64,
    pub sequence: u32,
}

/// A transaction with complete outputs and placeholder input scripts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompleteTransaction {
    pub version: i32,
    pub inputs: Vec<IncompleteInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl IncompleteTransaction {
    /// Serialized size once every input carries a script of its declared
    /// size
    pub fn estimated_size(&self) -> u64 {
        let mut size = 8 + var_int_size(self.inputs.len() as u64)
            + var_int_size(self.outputs.len() as u64);
        for input in &self.inputs {
            size += 40 + var_int_size(input.script_size) + input.script_size;
        }
        for output in &self.outputs {
            let script_len = output.script.len() as u64;
            size += 8 + var_int_size(script_len) + script_len;
        }
        size
    }

    /// Swap the placeholders for real unlocking scripts
    pub fn complete(&self, scripts: Vec<Vec<u8>>) -> Result<Transaction> {
        if scripts.len() != self.inputs.len() {
            return Err(BoostError::BadScript(format!(
                "{} scripts supplied for {} inputs",
                scripts.len(),
                self.inputs.len()
            )));
        }
        Ok(Transaction {
            version: self.version,
            inputs: self
                .inputs
                .iter()
                .zip(scripts)
                .map(|(input, script)| TransactionInput {
                    prevout: input.prevout,
                    script,
                    sequence: input.sequence,
                })
                .collect(),
            outputs: self.outputs.clone(),
            lock_time: self.lock_time,
        })
    }
}

struct TxReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> TxReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        TxReader { bytes, pos: 0 }
    }

    fn done(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.pos + count > self.bytes.len() {
            return Err(BoostError::BadScript(format!(
                "transaction truncated at offset {}",
                self.pos
            )));
        }
        let slice = &self.bytes[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    fn read_u32(&mut self) -> Result<u32> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_u64(&mut self) -> Result<u64> {
        let b = self.read_bytes(8)?;
        Ok(u64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    fn read_var_int(&mut self) -> Result<u64> {
        let first = self.read_bytes(1)?[0];
        Ok(match first {
            0xfd => {
                let b = self.read_bytes(2)?;
                u16::from_le_bytes([b[0], b[1]]) as u64
            }
            0xfe => self.read_u32()? as u64,
            0xff => self.read_u64()?,
            n => n as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_transaction() -> Transaction {
        Transaction {
            version: 1,
            inputs: vec![TransactionInput {
                prevout: Outpoint {
                    txid: Digest32::from_bytes(&[0x11; 32]).unwrap(),
                    vout: 2,
                },
                script: vec![0x51, 0x52],
                sequence: 0xffffffff,
            }],
            outputs: vec![TransactionOutput {
                value: 8317,
                script: vec![0x76, 0xa9],
            }],
            lock_time: 0,
        }
    }

    #[test]
    fn test_var_int_encodings() {
        let cases: [(u64, Vec<u8>); 6] = [
            (0, vec![0x00]),
            (0xfc, vec![0xfc]),
            (0xfd, vec![0xfd, 0xfd, 0x00]),
            (0xffff, vec![0xfd, 0xff, 0xff]),
            (0x10000, vec![0xfe, 0x00, 0x00, 0x01, 0x00]),
            (
                0x1_0000_0000,
                vec![0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00],
            ),
        ];
        for (n, expected) in cases {
            let mut out = Vec::new();
            write_var_int(&mut out, n);
            assert_eq!(out, expected, "{n}");
            assert_eq!(var_int_size(n), expected.len() as u64);
        }
    }

    #[test]
    fn test_serialize_layout() {
        let tx = test_transaction();
        let bytes = tx.serialize();
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(bytes[4], 1); // input count
        assert_eq!(&bytes[5..37], &[0x11; 32]);
        assert_eq!(&bytes[37..41], &[2, 0, 0, 0]);
        assert_eq!(bytes[41], 2); // script length
        let tail = bytes.len() - 4;
        assert_eq!(&bytes[tail..], &[0, 0, 0, 0]); // lock time
    }

    #[test]
    fn test_parse_round_trip() {
        let tx = test_transaction();
        assert_eq!(Transaction::parse(&tx.serialize()).unwrap(), tx);
    }

    #[test]
    fn test_parse_rejects_truncation() {
        let bytes = test_transaction().serialize();
        for cut in [3, 10, bytes.len() - 1] {
            assert!(Transaction::parse(&bytes[..cut]).is_err(), "cut {cut}");
        }
    }

    #[test]
    fn test_parse_rejects_trailing_bytes() {
        let mut bytes = test_transaction().serialize();
        bytes.push(0x00);
        assert!(Transaction::parse(&bytes).is_err());
    }

    #[test]
    fn test_txid_is_deterministic() {
        let tx = test_transaction();
        assert_eq!(tx.txid(), tx.txid());
        let mut other = test_transaction();
        other.lock_time = 1;
        assert_ne!(tx.txid(), other.txid());
    }

    #[test]
    fn test_estimated_size_matches_completed_size() {
        let incomplete = IncompleteTransaction {
            version: 1,
            inputs: vec![IncompleteInput {
                prevout: Outpoint {
                    txid: Digest32::from_bytes(&[0x11; 32]).unwrap(),
                    vout: 0,
                },
                script_size: 153,
                sequence: 0xffffffff,
            }],
            outputs: vec![
                TransactionOutput {
                    value: 8000,
                    script: vec![0xac; 25],
                },
                TransactionOutput {
                    value: 0,
                    script: vec![0x6a; 12],
                },
            ],
            lock_time: 0,
        };
        let completed = incomplete.complete(vec![vec![0x00; 153]]).unwrap();
        assert_eq!(
            incomplete.estimated_size(),
            completed.serialize().len() as u64
        );
    }

    #[test]
    fn test_estimated_size_monotonic_in_script_size() {
        let mut incomplete = IncompleteTransaction {
            version: 1,
            inputs: vec![IncompleteInput {
                prevout: Outpoint {
                    txid: Digest32::from_bytes(&[0; 32]).unwrap(),
                    vout: 0,
                },
                script_size: 0,
                sequence: 0xffffffff,
            }],
            outputs: vec![],
            lock_time: 0,
        };
        let mut last = incomplete.estimated_size();
        for size in [1u64, 75, 76, 252, 253, 1000, 65535, 65536] {
            incomplete.inputs[0].script_size = size;
            let next = incomplete.estimated_size();
            assert!(next > last, "size {size}");
            last = next;
        }
    }

    #[test]
    fn test_complete_requires_matching_script_count() {
        let incomplete = IncompleteTransaction {
            version: 1,
            inputs: vec![],
            outputs: vec![],
            lock_time: 0,
        };
        assert!(incomplete.complete(vec![vec![]]).is_err());
    }
}
