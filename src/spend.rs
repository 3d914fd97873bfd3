//! High-level redemption facade
//!
//! Couples jobs to the transactions that carry them. An `Output` is a job
//! with its outpoint and value, built only by scanning a parsed
//! transaction; an `Input` is a redemption read back out of one. `Puzzle`
//! pairs an output with the key allowed to spend it and builds the signed
//! redeem transaction end to end.

use crate::constants::SEQUENCE_FINAL;
use crate::error::{BoostError, Result};
use crate::field::Digest32;
use crate::job::Job;
use crate::keys::{hash160, Address, PrivateKey};
use crate::redeem::{expected_redeem_size, Redeem};
use crate::script::{opcodes::*, Script};
use crate::sighash;
use crate::transaction::{
    IncompleteInput, IncompleteTransaction, Outpoint, Transaction, TransactionOutput,
};
use crate::work;
use crate::work::Solution;

/// A Boost output located in a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub txid: Digest32,
    pub vout: u32,
    pub value: u64,
    pub job: Job,
}

impl Output {
    /// Scan a transaction's outputs for Boost locking scripts. This is the
    /// only path that attaches an outpoint and value to a job.
    pub fn find_in_transaction(tx: &Transaction) -> Vec<Output> {
        let txid = tx.txid();
        tx.outputs
            .iter()
            .enumerate()
            .filter_map(|(vout, output)| {
                Job::from_script_bytes(&output.script).ok().map(|job| Output {
                    txid,
                    vout: vout as u32,
                    value: output.value,
                    job,
                })
            })
            .collect()
    }

    pub fn outpoint(&self) -> Outpoint {
        Outpoint {
            txid: self.txid,
            vout: self.vout,
        }
    }
}

/// A Boost redemption located in a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub spent_txid: Digest32,
    pub spent_vout: u32,
    pub redeem: Redeem,
}

impl Input {
    pub fn from_transaction(tx: &Transaction, input_index: usize) -> Result<Input> {
        let input = tx.inputs.get(input_index).ok_or_else(|| {
            BoostError::BadScript(format!("input index {input_index} out of range"))
        })?;
        Ok(Input {
            spent_txid: input.prevout.txid,
            spent_vout: input.prevout.vout,
            redeem: Redeem::from_script_bytes(&input.script)?,
        })
    }
}

/// A job paired with the key allowed to redeem it
pub struct Puzzle {
    job: Job,
    attachment: Option<(Outpoint, u64)>,
    key: PrivateKey,
}

impl Puzzle {
    /// For a contract output the key must hash to the committed miner
    /// address.
    pub fn new(output: Output, key: PrivateKey) -> Result<Self> {
        check_key(&output.job, &key)?;
        Ok(Puzzle {
            attachment: Some((output.outpoint(), output.value)),
            job: output.job,
            key,
        })
    }

    /// A puzzle with no outpoint can derive work and redeem scripts but
    /// not build a spending transaction.
    pub fn from_job(job: Job, key: PrivateKey) -> Result<Self> {
        check_key(&job, &key)?;
        Ok(Puzzle {
            job,
            attachment: None,
            key,
        })
    }

    pub fn job(&self) -> &Job {
        &self.job
    }

    /// The work-level puzzle this key would be solving
    pub fn work_puzzle(&self) -> Result<work::Puzzle> {
        if self.job.is_contract() {
            work::Puzzle::from_job(&self.job, None)
        } else {
            work::Puzzle::from_job(&self.job, Some(&self.key.pubkey_hash()))
        }
    }

    /// Sign `input_index` of an incomplete transaction and emit the
    /// unlocking script for it
    pub fn redeem_script(
        &self,
        solution: &Solution,
        tx: &IncompleteTransaction,
        input_index: usize,
    ) -> Result<Vec<u8>> {
        // also rejects a solution whose gpr does not pair with the version
        self.work_puzzle()?.pow_string(solution)?;
        let (_, value) = self.attachment.ok_or(BoostError::AttachmentMissing)?;
        let signature = sighash::sign(tx, input_index, &self.job.script_bytes(), value, &self.key)?;
        let redeem = Redeem {
            signature,
            miner_pubkey: self.key.public_key(),
            solution: solution.clone(),
            miner_pubkey_hash: self.job.is_bounty().then(|| self.key.pubkey_hash()),
        };
        Ok(redeem.script_bytes())
    }

    /// Build, sign and serialize the transaction that claims the bounty:
    /// one pay-to-pubkey-hash output carrying the value less the fee, and
    /// one zero-value data output.
    pub fn create_redeem_transaction(
        &self,
        solution: &Solution,
        receive: &Address,
        sats_per_byte: f64,
        op_return_data: &[Vec<u8>],
    ) -> Result<Transaction> {
        let (outpoint, value) = self.attachment.ok_or(BoostError::AttachmentMissing)?;
        let redeem_size =
            expected_redeem_size(&self.job, solution.extra_nonce_2.len(), self.key.compressed);

        let mut data_script = Script::new();
        data_script.push_op(OP_0).push_op(OP_RETURN);
        for item in op_return_data {
            data_script.push_data(item);
        }

        let mut tx = IncompleteTransaction {
            version: 1,
            inputs: vec![IncompleteInput {
                prevout: outpoint,
                script_size: redeem_size,
                sequence: SEQUENCE_FINAL,
            }],
            outputs: vec![
                TransactionOutput {
                    value: 0,
                    script: receive.p2pkh_script(),
                },
                TransactionOutput {
                    value: 0,
                    script: data_script.to_bytes(),
                },
            ],
            lock_time: 0,
        };

        let fee = (tx.estimated_size() as f64 * sats_per_byte).ceil() as u64;
        if fee >= value {
            return Err(BoostError::InsufficientFunds { fee, value });
        }
        tx.outputs[0].value = value - fee;

        let script = self.redeem_script(solution, &tx, 0)?;
        tx.complete(vec![script])
    }
}

fn check_key(job: &Job, key: &PrivateKey) -> Result<()> {
    if let Some(committed) = job.miner_pubkey_hash() {
        if hash160(&key.public_key()) != *committed {
            return Err(BoostError::InvalidPuzzle);
        }
    }
    Ok(())
}

/// An output coupled with the input that claims to spend it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    pub output: Output,
    pub input: Input,
}

impl Proof {
    /// The input must reference the output, the pubkey must bind to the
    /// metadata address, and the proof of work must meet the target.
    pub fn valid(&self) -> Result<bool> {
        if self.output.txid != self.input.spent_txid || self.output.vout != self.input.spent_vout {
            return Ok(false);
        }
        let redeem = &self.input.redeem;
        let address = match self.output.job.miner_pubkey_hash() {
            Some(committed) => *committed,
            None => redeem.miner_pubkey_hash.ok_or_else(|| {
                BoostError::BadScript(
                    "bounty redemption is missing the miner pubkey hash".to_string(),
                )
            })?,
        };
        if hash160(&redeem.miner_pubkey) != address {
            return Ok(false);
        }
        let puzzle = if self.output.job.is_contract() {
            work::Puzzle::from_job(&self.output.job, None)?
        } else {
            work::Puzzle::from_job(&self.output.job, Some(&address))?
        };
        work::Proof {
            puzzle,
            solution: redeem.solution.clone(),
        }
        .valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Bits;
    use crate::field::{Digest20, Int32Le, UInt32Le};
    use crate::job::{JobPayload, ScriptVersion};
    use crate::transaction::TransactionInput;

    const KEY_HEX: &str = "5d5c870220eeb18afe8a498324013955c316cbaaed2a824e5230362c36964c27";

    fn test_key() -> PrivateKey {
        PrivateKey::from_hex(KEY_HEX).unwrap()
    }

    fn test_job(version: ScriptVersion) -> Job {
        Job::bounty(JobPayload {
            category: Int32Le::from_value(0),
            content: Digest32::from_bytes(&[0x13; 32]).unwrap(),
            bits: Bits::new(0x1d00ffff),
            tag: b"test".to_vec(),
            user_nonce: UInt32Le::from_value(97),
            additional_data: vec![],
            version,
        })
        .unwrap()
    }

    fn carrier_transaction(job: &Job) -> Transaction {
        Transaction {
            version: 1,
            inputs: vec![TransactionInput {
                prevout: Outpoint {
                    txid: Digest32::from_bytes(&[0x55; 32]).unwrap(),
                    vout: 0,
                },
                script: vec![0x00],
                sequence: SEQUENCE_FINAL,
            }],
            outputs: vec![
                TransactionOutput {
                    value: 12345,
                    script: vec![0x51],
                },
                TransactionOutput {
                    value: 8317,
                    script: job.script_bytes(),
                },
            ],
            lock_time: 0,
        }
    }

    #[test]
    fn test_find_in_transaction_attaches_outpoint() {
        let job = test_job(ScriptVersion::V1);
        let tx = carrier_transaction(&job);
        let outputs = Output::find_in_transaction(&tx);
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].vout, 1);
        assert_eq!(outputs[0].value, 8317);
        assert_eq!(outputs[0].txid, tx.txid());
        assert_eq!(outputs[0].job, job);
    }

    #[test]
    fn test_find_in_transaction_skips_foreign_scripts() {
        let tx = Transaction {
            version: 1,
            inputs: vec![],
            outputs: vec![TransactionOutput {
                value: 1,
                script: vec![0x51, 0x87],
            }],
            lock_time: 0,
        };
        assert!(Output::find_in_transaction(&tx).is_empty());
    }

    #[test]
    fn test_contract_puzzle_rejects_wrong_key() {
        let payload = test_job(ScriptVersion::V1).payload().clone();
        let job = Job::contract(payload, Digest20::from_bytes(&[0x99; 20]).unwrap()).unwrap();
        let output = Output {
            txid: Digest32::from_bytes(&[0; 32]).unwrap(),
            vout: 0,
            value: 1000,
            job,
        };
        assert!(matches!(
            Puzzle::new(output, test_key()),
            Err(BoostError::InvalidPuzzle)
        ));
    }

    #[test]
    fn test_contract_puzzle_accepts_matching_key() {
        let key = test_key();
        let payload = test_job(ScriptVersion::V1).payload().clone();
        let job = Job::contract(payload, key.pubkey_hash()).unwrap();
        assert!(Puzzle::from_job(job, key).is_ok());
    }

    #[test]
    fn test_bare_job_cannot_build_transaction() {
        let puzzle = Puzzle::from_job(test_job(ScriptVersion::V1), test_key()).unwrap();
        let solution = Solution {
            time: UInt32Le::from_value(0),
            extra_nonce_1: crate::field::UInt32Be::from_value(0),
            extra_nonce_2: vec![0; 8],
            nonce: UInt32Le::from_value(0),
            general_purpose_bits: None,
        };
        let receive: Address = "1264UeZnzrjrMdYn1QSED5TCbY8Gd11e23".parse().unwrap();
        assert!(matches!(
            puzzle.create_redeem_transaction(&solution, &receive, 0.5, &[]),
            Err(BoostError::AttachmentMissing)
        ));
    }

    #[test]
    fn test_insufficient_funds() {
        let job = test_job(ScriptVersion::V1);
        let tx = carrier_transaction(&job);
        let mut output = Output::find_in_transaction(&tx).remove(0);
        output.value = 10;
        let puzzle = Puzzle::new(output, test_key()).unwrap();
        let solution = Solution {
            time: UInt32Le::from_value(0),
            extra_nonce_1: crate::field::UInt32Be::from_value(0),
            extra_nonce_2: vec![0; 8],
            nonce: UInt32Le::from_value(0),
            general_purpose_bits: None,
        };
        let receive: Address = "1264UeZnzrjrMdYn1QSED5TCbY8Gd11e23".parse().unwrap();
        assert!(matches!(
            puzzle.create_redeem_transaction(&solution, &receive, 1.0, &[]),
            Err(BoostError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn test_work_puzzle_uses_key_address_for_bounty() {
        let key = test_key();
        let expected = key.pubkey_hash();
        let puzzle = Puzzle::from_job(test_job(ScriptVersion::V1), key).unwrap();
        let work = puzzle.work_puzzle().unwrap();
        assert_eq!(work.meta_begin[4..24], expected.to_bytes());
    }
}
